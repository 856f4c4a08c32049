//! Closed hi-hat voice.
//!
//! Mostly noise with a faint bent square underneath for metallic ring.
//! Very short: 10ms attack, 50ms decay. Half volume so it sits behind the
//! kick and snare.

use crate::{
    dsp::{EnvelopeConfig, Lfo, Waveform},
    synth::{Instrument, Phasing},
};

/// Create a closed hi-hat instrument.
pub fn hihat() -> Instrument {
    Instrument::new("Drum HiHat", EnvelopeConfig::new(0.01, 0.05, 0.0, 0.0))
        .volume(0.5)
        .max_lifetime(1.0)
        .phasing(Phasing::Chirping)
        .partial_with_lfo(0.1, -12, Waveform::Square, Lfo::new(1.5, 1.0))
        .partial(0.9, 0, Waveform::Noise)
}
