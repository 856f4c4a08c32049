// Purpose: the voice layer. Notes reference an immutable Instrument, and the
// registry owns every sounding note for both the control and render paths.

pub mod instrument;
pub mod note;
pub mod registry;
#[cfg(feature = "rtrb")]
pub mod tap;

pub use instrument::{Instrument, Partial, Phasing, Sound};
pub use note::Note;
pub use registry::{KeyTransition, VoiceInfo, VoiceRegistry};
#[cfg(feature = "rtrb")]
pub use tap::ScopeTap;
