//! 8-bit bell voice.
//!
//! Like the bell, but the fundamental is a square wave at the played pitch,
//! and the envelope settles on a high sustain instead of dying away. Sounds
//! like a handheld console chime.

use crate::{
    dsp::{EnvelopeConfig, Lfo, Waveform},
    synth::Instrument,
};

/// Create the 8-bit bell instrument.
pub fn eight_bit_bell() -> Instrument {
    Instrument::new("8-Bit Bell", EnvelopeConfig::new(0.01, 0.5, 0.8, 1.0))
        .volume(1.0)
        .partial_with_lfo(1.0, 0, Waveform::Square, Lfo::new(5.0, 0.001))
        .partial(0.5, 12, Waveform::Sine)
        .partial(0.25, 24, Waveform::Sine)
}
