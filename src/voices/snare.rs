//! Snare drum voice.
//!
//! Half tone, half noise. The tonal part is a sine two octaves down with a
//! slow LFO bend; the noise stands in for the snare wires. Instant attack and
//! a 200ms decay.

use crate::{
    dsp::{EnvelopeConfig, Lfo, Waveform},
    synth::{Instrument, Phasing},
};

/// Create a snare drum instrument.
pub fn snare() -> Instrument {
    Instrument::new("Drum Snare", EnvelopeConfig::new(0.0, 0.2, 0.0, 0.0))
        .volume(1.0)
        .max_lifetime(1.0)
        .phasing(Phasing::Chirping)
        .partial_with_lfo(0.5, -24, Waveform::Sine, Lfo::new(0.5, 1.0))
        .partial(0.5, 0, Waveform::Noise)
}
