//! Stateless signal primitives used by the instrument layer.
//!
//! Every function here is a pure function of its arguments (noise aside), so
//! instruments can evaluate them for any absolute time without carrying
//! per-voice state. None of them allocate, which keeps them safe to call from
//! inside the audio callback.

/// Time-stamped attack/decay/sustain/release envelope.
pub mod envelope;
/// Waveform generators and noise.
pub mod oscillator;
/// Scale-degree to frequency mapping.
pub mod scale;

pub use envelope::EnvelopeConfig;
pub use oscillator::{osc, Lfo, Waveform};
pub use scale::{frequency, Scale};
