pub mod pattern;
pub mod step;

pub use pattern::StepPattern;
pub use step::{Channel, StepSequencer, TriggerRequest, DEFAULT_PITCH, MIN_STEP_DURATION};
