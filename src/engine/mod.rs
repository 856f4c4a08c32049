//! Session wiring.
//!
//! A [`Session`] owns everything the control path touches: the preset
//! catalogue, the step sequencer and the shared voice registry. The audio
//! callback gets a [`Renderer`], which holds only a handle to the registry and
//! the playback clock.

mod renderer;
mod session;

pub use renderer::Renderer;
pub use session::Session;
