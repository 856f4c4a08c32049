pub mod config;
pub mod dsp; // Oscillators, envelopes and pitch mapping
pub mod engine; // Session object tying the control and render paths together
pub mod error;
pub mod io; // Playback clock and keyboard collaborators
pub mod sequencing; // Step sequencer and pattern grids
pub mod synth; // Notes, instruments and the shared voice registry
pub mod voices; // Preset instrument catalogue

pub use config::{AudioConfig, ChannelConfig, SessionConfig};
pub use engine::{Renderer, Session};
pub use error::{Error, Result};

/// Attenuation applied to the summed voice mix to keep polyphony below clipping.
pub const HEADROOM: f64 = 0.2;

/// Largest block of frames rendered under a single registry lock.
pub const MAX_BLOCK_SIZE: usize = 2048;
