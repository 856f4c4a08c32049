//! Harmonica voice.
//!
//! Two square waves an octave apart with a touch of noise for breath. The
//! envelope has no attack, a long gentle decay to a near-full sustain, and a
//! short release, so it holds as long as the key is down.
//!
//! Played from the computer keyboard by default.

use crate::{
    dsp::{EnvelopeConfig, Lfo, Waveform},
    synth::Instrument,
};

/// Create the harmonica instrument.
pub fn harmonica() -> Instrument {
    Instrument::new("Harmonica", EnvelopeConfig::new(0.0, 1.0, 0.95, 0.1))
        .volume(0.3)
        .partial_with_lfo(1.0, 0, Waveform::Square, Lfo::new(5.0, 0.001))
        .partial(0.5, 12, Waveform::Square)
        .partial(0.05, 24, Waveform::Noise)
}
