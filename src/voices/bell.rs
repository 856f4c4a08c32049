//! Bell voice.
//!
//! Three sines stacked an octave apart, starting an octave above the played
//! note. Fast attack, a one second decay to silence, and a one second release
//! if the key comes up before the decay is done.
//!
//! The lowest partial carries a slight 5 Hz vibrato, which is what keeps the
//! tail from sounding like a test tone.

use crate::{
    dsp::{EnvelopeConfig, Lfo, Waveform},
    synth::Instrument,
};

/// Create the bell instrument.
pub fn bell() -> Instrument {
    Instrument::new("Bell", EnvelopeConfig::new(0.01, 1.0, 0.0, 1.0))
        .volume(1.0)
        .partial_with_lfo(1.0, 12, Waveform::Sine, Lfo::new(5.0, 0.001))
        .partial(0.5, 24, Waveform::Sine)
        .partial(0.25, 36, Waveform::Sine)
}
