//! Instrument definition: one envelope, a volume, and a weighted oscillator mix.

use crate::dsp::{
    envelope::EnvelopeConfig,
    oscillator::{osc, Lfo, Waveform},
    scale::Scale,
};

use super::note::Note;

/// Which way an instrument's oscillators are phased relative to the trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phasing {
    /// Evaluate at `on - time`. Used by pitched instruments.
    Settling,
    /// Evaluate at `time - on`. Used by percussion, so LFO sweeps start at the hit.
    Chirping,
}

/// One oscillator in an instrument's mix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Partial {
    /// Mix weight
    pub weight: f64,
    /// Semitone offset added to the note id before pitch mapping
    pub semitones: i32,
    pub waveform: Waveform,
    pub lfo: Lfo,
}

/// Output of one instrument evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sound {
    pub sample: f64,
    /// The voice has nothing more to say and can be removed
    pub finished: bool,
}

/// Immutable timbre definition shared by every note that uses it.
///
/// Built with chained setters, then wrapped in an `Arc` and handed out to notes:
///
/// ```
/// use stepsynth::dsp::{EnvelopeConfig, Lfo, Waveform};
/// use stepsynth::synth::Instrument;
///
/// let organ = Instrument::new("Organ", EnvelopeConfig::new(0.05, 0.1, 0.9, 0.3))
///     .volume(0.5)
///     .partial_with_lfo(1.0, 0, Waveform::Sine, Lfo::new(5.0, 0.001))
///     .partial(0.5, 12, Waveform::Triangle);
/// assert_eq!(organ.partials().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Instrument {
    name: String,
    volume: f64,
    envelope: EnvelopeConfig,
    max_lifetime: Option<f64>,
    phasing: Phasing,
    scale: Scale,
    partials: Vec<Partial>,
}

impl Instrument {
    /// A silent, settling-phase instrument with the given envelope and unit volume.
    pub fn new(name: impl Into<String>, envelope: EnvelopeConfig) -> Self {
        Self {
            name: name.into(),
            volume: 1.0,
            envelope,
            max_lifetime: None,
            phasing: Phasing::Settling,
            scale: Scale::default(),
            partials: Vec::new(),
        }
    }

    pub fn volume(mut self, volume: f64) -> Self {
        self.volume = volume;
        self
    }

    /// Hard cutoff: the voice finishes `seconds` after its trigger, whatever the envelope says.
    pub fn max_lifetime(mut self, seconds: f64) -> Self {
        self.max_lifetime = (seconds > 0.0).then_some(seconds);
        self
    }

    pub fn phasing(mut self, phasing: Phasing) -> Self {
        self.phasing = phasing;
        self
    }

    pub fn scale(mut self, scale: Scale) -> Self {
        self.scale = scale;
        self
    }

    /// Add an unmodulated oscillator to the mix.
    pub fn partial(self, weight: f64, semitones: i32, waveform: Waveform) -> Self {
        self.partial_with_lfo(weight, semitones, waveform, Lfo::NONE)
    }

    /// Add an oscillator with LFO phase modulation to the mix.
    pub fn partial_with_lfo(
        mut self,
        weight: f64,
        semitones: i32,
        waveform: Waveform,
        lfo: Lfo,
    ) -> Self {
        self.partials.push(Partial {
            weight,
            semitones,
            waveform,
            lfo,
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn gain(&self) -> f64 {
        self.volume
    }

    pub fn envelope(&self) -> &EnvelopeConfig {
        &self.envelope
    }

    pub fn lifetime(&self) -> Option<f64> {
        self.max_lifetime
    }

    pub fn partials(&self) -> &[Partial] {
        &self.partials
    }

    /// Percussive instruments end on their lifetime instead of a release.
    pub fn is_one_shot(&self) -> bool {
        self.max_lifetime.is_some()
    }

    /// Produce this instrument's sample for `note` at playback `time`.
    ///
    /// Safe on the render path: no allocation, no locking, no panics.
    pub fn sound(&self, time: f64, note: &Note) -> Sound {
        let amplitude = self.envelope.amplitude(time, note.on, note.off);
        let finished = match self.max_lifetime {
            Some(lifetime) => time - note.on >= lifetime,
            None => self.envelope.is_finished(time, note.on, note.off),
        };

        if amplitude == 0.0 {
            return Sound {
                sample: 0.0,
                finished,
            };
        }

        let phase_time = match self.phasing {
            Phasing::Settling => note.on - time,
            Phasing::Chirping => time - note.on,
        };

        let mix: f64 = self
            .partials
            .iter()
            .map(|p| {
                let frequency = self.scale.frequency(note.id + p.semitones);
                p.weight * osc(frequency, phase_time, p.waveform, p.lfo)
            })
            .sum();

        Sound {
            sample: amplitude * mix * self.volume,
            finished,
        }
    }
}
