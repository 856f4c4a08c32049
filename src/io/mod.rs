// Purpose - the engine's view of its collaborators: the device playback clock
// and the polled computer keyboard.

pub mod clock;
pub mod keyboard;

pub use clock::PlaybackClock;
pub use keyboard::{KeyboardState, KEYMAP};
