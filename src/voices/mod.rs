//! Preset instruments.
//!
//! Each preset is a flat recipe: one envelope, a volume, and a handful of
//! pitch-offset oscillators. Use them directly, or look them up by
//! [`InstrumentKind`] through a [`Catalogue`] so every note of a kind shares
//! one instrument.
//!
//! # Example
//!
//! ```
//! use stepsynth::voices::{self, Catalogue, InstrumentKind};
//!
//! // Pitched
//! let bell = voices::bell();
//! let chime = voices::eight_bit_bell();
//! let harmonica = voices::harmonica();
//!
//! // Drums
//! let kick = voices::kick();
//! let snare = voices::snare();
//! let hihat = voices::hihat();
//!
//! let catalogue = Catalogue::new();
//! assert_eq!(catalogue.get(InstrumentKind::Kick).name(), "Drum Kick");
//! ```

mod bell;
mod eight_bit_bell;
mod harmonica;
mod hihat;
mod kick;
mod snare;

use std::{fmt, sync::Arc};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::synth::Instrument;

pub use bell::bell;
pub use eight_bit_bell::eight_bit_bell;
pub use harmonica::harmonica;
pub use hihat::hihat;
pub use kick::kick;
pub use snare::snare;

/// Names one of the preset instruments.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstrumentKind {
    Bell,
    EightBitBell,
    Harmonica,
    Kick,
    Snare,
    HiHat,
}

impl InstrumentKind {
    pub const ALL: [InstrumentKind; 6] = [
        InstrumentKind::Bell,
        InstrumentKind::EightBitBell,
        InstrumentKind::Harmonica,
        InstrumentKind::Kick,
        InstrumentKind::Snare,
        InstrumentKind::HiHat,
    ];

    /// Build a fresh instance of this preset.
    pub fn build(self) -> Instrument {
        match self {
            InstrumentKind::Bell => bell(),
            InstrumentKind::EightBitBell => eight_bit_bell(),
            InstrumentKind::Harmonica => harmonica(),
            InstrumentKind::Kick => kick(),
            InstrumentKind::Snare => snare(),
            InstrumentKind::HiHat => hihat(),
        }
    }
}

impl fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InstrumentKind::Bell => "bell",
            InstrumentKind::EightBitBell => "8-bit bell",
            InstrumentKind::Harmonica => "harmonica",
            InstrumentKind::Kick => "kick",
            InstrumentKind::Snare => "snare",
            InstrumentKind::HiHat => "hihat",
        };
        f.write_str(name)
    }
}

/// One shared instance of every preset for the lifetime of a session.
#[derive(Debug, Clone)]
pub struct Catalogue {
    instruments: [Arc<Instrument>; 6],
}

impl Catalogue {
    pub fn new() -> Self {
        Self {
            instruments: InstrumentKind::ALL.map(|kind| Arc::new(kind.build())),
        }
    }

    /// The shared instance of `kind`.
    pub fn get(&self, kind: InstrumentKind) -> &Arc<Instrument> {
        // ALL is declared in discriminant order
        &self.instruments[kind as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = (InstrumentKind, &Arc<Instrument>)> {
        InstrumentKind::ALL.into_iter().zip(self.instruments.iter())
    }
}

impl Default for Catalogue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dsp::{frequency, osc},
        synth::Note,
    };

    #[test]
    fn bell_attack_is_half_way_after_five_ms() {
        let bell = Arc::new(bell());
        let note = Note::triggered(64, bell.clone(), 0.0);
        let level = bell.envelope().amplitude(0.005, note.on, note.off);
        assert!((level - 0.5).abs() < 1e-9);
    }

    #[test]
    fn bell_sample_after_five_ms_is_half_the_mix() {
        let bell = Arc::new(bell());
        let note = Note::triggered(64, bell.clone(), 0.0);
        let time = 0.005;

        // Bell phases from the trigger backwards
        let mix: f64 = bell
            .partials()
            .iter()
            .map(|p| p.weight * osc(frequency(64 + p.semitones), -time, p.waveform, p.lfo))
            .sum();
        let sound = bell.sound(time, &note);
        assert!((sound.sample - 0.5 * mix * bell.gain()).abs() < 1e-9);
        assert!(sound.sample.abs() > 0.0);
        assert!(!sound.finished);
    }

    #[test]
    fn kick_finishes_on_lifetime_even_while_held() {
        let kick = Arc::new(kick());
        let t = 12.0;
        let note = Note::triggered(64, kick.clone(), t);
        assert!(note.is_held());
        assert!(!kick.sound(t + 1.4, &note).finished);
        assert!(kick.sound(t + 1.5 + 1e-6, &note).finished);
    }

    #[test]
    fn pitched_presets_have_no_lifetime() {
        for inst in [bell(), eight_bit_bell(), harmonica()] {
            assert_eq!(inst.lifetime(), None, "{}", inst.name());
        }
        for inst in [kick(), snare(), hihat()] {
            assert!(inst.is_one_shot(), "{}", inst.name());
        }
    }

    #[test]
    fn harmonica_sustains_while_held() {
        let inst = Arc::new(harmonica());
        let note = Note::triggered(64, inst.clone(), 0.0);
        for t in [2.0, 60.0, 3_600.0] {
            let sound = inst.sound(t, &note);
            assert!(!sound.finished);
            assert!((inst.envelope().amplitude(t, note.on, note.off) - 0.95).abs() < 1e-9);
        }
    }

    #[test]
    fn catalogue_shares_instances() {
        let catalogue = Catalogue::new();
        let a = catalogue.get(InstrumentKind::Snare).clone();
        let b = catalogue.get(InstrumentKind::Snare).clone();
        assert!(Arc::ptr_eq(&a, &b));
        for (kind, inst) in catalogue.iter() {
            assert_eq!(inst.name(), kind.build().name());
        }
    }

    #[test]
    fn preset_output_is_bounded() {
        let catalogue = Catalogue::new();
        for (_, inst) in catalogue.iter() {
            let note = Note::triggered(64, inst.clone(), 0.0);
            let weights: f64 = inst.partials().iter().map(|p| p.weight.abs()).sum();
            let bound = weights * 1.25 * inst.gain();
            for i in 0..2_000 {
                let t = i as f64 / 8_000.0;
                let s = inst.sound(t, &note).sample;
                assert!(s.abs() <= bound, "{} produced {s}", inst.name());
            }
        }
    }
}
