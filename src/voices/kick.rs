//! Kick drum voice.
//!
//! A sine three octaves below the note with a deep 1 Hz LFO on its phase.
//! Because percussion is phased forward from the hit, the LFO sweeps the
//! pitch from the moment of the trigger, giving the kick its thump.
//!
//! # How It Works
//!
//! 1. Sine body at note - 36 semitones
//! 2. LFO depth 1.0 bends the effective frequency through the first beat
//! 3. A pinch of noise for the beater click
//! 4. 10ms attack, 150ms decay to silence, hard stop after 1.5s

use crate::{
    dsp::{EnvelopeConfig, Lfo, Waveform},
    synth::{Instrument, Phasing},
};

/// Create a kick drum instrument.
pub fn kick() -> Instrument {
    Instrument::new("Drum Kick", EnvelopeConfig::new(0.01, 0.15, 0.0, 0.0))
        .volume(1.0)
        .max_lifetime(1.5)
        .phasing(Phasing::Chirping)
        .partial_with_lfo(0.99, -36, Waveform::Sine, Lfo::new(1.0, 1.0))
        .partial(0.01, 0, Waveform::Noise)
}
