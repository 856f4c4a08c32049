//! Step sequencer - tempo-driven clock over a fixed grid of channel patterns.
//!
//! The sequencer runs on the control path. It is fed wall-clock elapsed time,
//! and returns the notes that became due; the caller stamps them with the
//! playback clock and hands them to the voice registry.
//!
//! Nobody lifts a key for a sequenced note, so pitched instruments are gated
//! for one step and released from there. One-shot drums end on their own
//! lifetime and carry no gate.

use std::sync::Arc;

use tracing::debug;

use super::pattern::StepPattern;
use crate::{
    error::{Error, Result},
    synth::{Instrument, Note},
};

/// Scale degree every sequencer trigger plays.
pub const DEFAULT_PITCH: i32 = 64;

/// Shortest step the accumulator can count reliably.
pub const MIN_STEP_DURATION: f64 = 1e-3;

/// A note that became due on the current step.
#[derive(Debug, Clone)]
pub struct TriggerRequest {
    pub instrument: Arc<Instrument>,
    pub id: i32,
    /// Seconds the note is held before its release, `None` for one-shots
    pub gate: Option<f64>,
}

impl TriggerRequest {
    /// Turn the request into a note triggered at playback time `now`.
    pub fn into_note(self, now: f64) -> Note {
        let mut note = Note::triggered(self.id, self.instrument, now);
        if let Some(gate) = self.gate {
            note.release(now + gate);
        }
        note
    }
}

/// One row of the grid: an instrument and its bar of steps.
#[derive(Debug, Clone)]
pub struct Channel {
    pub instrument: Arc<Instrument>,
    pub pattern: StepPattern,
}

/// Fixed-grid step sequencer
#[derive(Debug, Clone)]
pub struct StepSequencer {
    /// Tempo in beats per minute
    tempo: f64,
    /// Beats per bar
    beats: usize,
    /// Steps per beat
    subdivisions: usize,
    /// Steps per bar
    total_steps: usize,
    /// Seconds per step, derived from tempo and subdivisions
    step_duration: f64,
    /// Index of the last step fired, wraps at `total_steps`
    current_step: usize,
    /// Elapsed time not yet consumed by a step
    accumulator: f64,
    /// Scale degree emitted with each trigger
    pitch: i32,
    channels: Vec<Channel>,
}

impl StepSequencer {
    /// Create an empty sequencer for a `beats` x `subdivisions` grid at `tempo` BPM.
    pub fn new(tempo: f64, beats: usize, subdivisions: usize) -> Result<Self> {
        if !tempo.is_finite() || tempo <= 0.0 {
            return Err(Error::InvalidTempo(tempo));
        }

        let total_steps = beats
            .checked_mul(subdivisions)
            .filter(|&steps| steps > 0)
            .ok_or(Error::InvalidGrid {
                beats,
                subdivisions,
            })?;

        let step_duration = (60.0 / tempo) / subdivisions as f64;
        if step_duration < MIN_STEP_DURATION {
            return Err(Error::InvalidTempo(tempo));
        }

        Ok(Self {
            tempo,
            beats,
            subdivisions,
            total_steps,
            step_duration,
            current_step: 0,
            accumulator: 0.0,
            pitch: DEFAULT_PITCH,
            channels: Vec::new(),
        })
    }

    /// Set the scale degree emitted with each trigger.
    pub fn with_pitch(mut self, pitch: i32) -> Self {
        self.pitch = pitch;
        self
    }

    /// Add a channel, parsing its pattern against this grid.
    pub fn add_channel(&mut self, instrument: Arc<Instrument>, pattern: &str) -> Result<()> {
        let pattern = StepPattern::parse(pattern, self.total_steps())?;
        debug!(instrument = instrument.name(), %pattern, "sequencer channel added");
        self.channels.push(Channel {
            instrument,
            pattern,
        });
        Ok(())
    }

    /// Advance by `elapsed` seconds and return every trigger that became due.
    pub fn update(&mut self, elapsed: f64) -> Vec<TriggerRequest> {
        let mut triggers = Vec::new();
        self.update_into(elapsed, &mut triggers);
        triggers
    }

    /// Like [`update`](Self::update), but reuses `triggers` (cleared first).
    ///
    /// When `elapsed` spans several steps each of them fires, in order.
    pub fn update_into(&mut self, elapsed: f64, triggers: &mut Vec<TriggerRequest>) {
        triggers.clear();
        if elapsed.is_finite() && elapsed > 0.0 {
            self.accumulator += elapsed;
        }

        while self.accumulator >= self.step_duration {
            self.accumulator -= self.step_duration;
            self.current_step = (self.current_step + 1) % self.total_steps();

            let step = self.current_step;
            let gate = self.step_duration;
            triggers.extend(
                self.channels
                    .iter()
                    .filter(|c| c.pattern.is_marked(step))
                    .map(|c| TriggerRequest {
                        instrument: c.instrument.clone(),
                        id: self.pitch,
                        gate: (!c.instrument.is_one_shot()).then_some(gate),
                    }),
            );
        }
    }

    /// Rewind to step 0 with an empty accumulator.
    pub fn reset(&mut self) {
        self.current_step = 0;
        self.accumulator = 0.0;
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn step_duration(&self) -> f64 {
        self.step_duration
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    pub fn tempo(&self) -> f64 {
        self.tempo
    }

    pub fn beats(&self) -> usize {
        self.beats
    }

    pub fn subdivisions(&self) -> usize {
        self.subdivisions
    }

    pub fn pitch(&self) -> i32 {
        self.pitch
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voices;

    fn drum_machine() -> StepSequencer {
        let mut seq = StepSequencer::new(90.0, 4, 4).unwrap();
        seq.add_channel(Arc::new(voices::kick()), "X...X...X..X.X..")
            .unwrap();
        seq.add_channel(Arc::new(voices::snare()), "..X...X...X...X.")
            .unwrap();
        seq.add_channel(Arc::new(voices::hihat()), "X.X.X.X.X.X.X.XX")
            .unwrap();
        seq
    }

    #[test]
    fn step_duration_from_tempo() {
        let seq = StepSequencer::new(90.0, 4, 4).unwrap();
        assert!((seq.step_duration() - 60.0 / 90.0 / 4.0).abs() < 1e-12);
        assert_eq!(seq.total_steps(), 16);
    }

    #[test]
    fn full_cycle_returns_to_start() {
        let mut seq = drum_machine();
        let start = seq.current_step();
        let step = seq.step_duration();
        for i in 1..=16 {
            seq.update(step);
            assert_eq!(seq.current_step(), (start + i) % 16);
        }
        assert_eq!(seq.current_step(), start);
    }

    #[test]
    fn partial_steps_accumulate() {
        let mut seq = drum_machine();
        let step = seq.step_duration();
        assert!(seq.update(step * 0.4).is_empty());
        assert!(seq.update(step * 0.4).is_empty());
        assert_eq!(seq.current_step(), 0);
        seq.update(step * 0.4);
        assert_eq!(seq.current_step(), 1);
    }

    #[test]
    fn triggers_follow_the_pattern() {
        let mut seq = drum_machine();
        let step = seq.step_duration();

        // Step 1: nothing marked
        assert!(seq.update(step).is_empty());

        // Step 2: snare and hihat
        let names: Vec<String> = seq
            .update(step)
            .into_iter()
            .map(|t| t.instrument.name().to_owned())
            .collect();
        assert_eq!(names, vec!["Drum Snare", "Drum HiHat"]);
    }

    #[test]
    fn long_gaps_catch_up_instead_of_dropping() {
        let mut seq = drum_machine();
        let step = seq.step_duration();

        // A full bar in one call fires every mark once
        let triggers = seq.update(step * 16.0 + step * 0.5);
        let marks: usize = seq
            .channels()
            .iter()
            .map(|c| c.pattern.steps().iter().filter(|&&m| m).count())
            .sum();
        assert_eq!(triggers.len(), marks);
        assert_eq!(seq.current_step(), 0);
    }

    #[test]
    fn triggers_carry_the_sequencer_pitch() {
        let mut seq = StepSequencer::new(120.0, 1, 1).unwrap().with_pitch(60);
        seq.add_channel(Arc::new(voices::kick()), "X").unwrap();
        let triggers = seq.update(0.5);
        assert_eq!(triggers.len(), 1);
        let note = triggers[0].clone().into_note(3.25);
        assert_eq!(note.id, 60);
        assert_eq!(note.on, 3.25);
        assert!(note.is_held());
    }

    #[test]
    fn rejects_bad_configuration() {
        assert!(matches!(
            StepSequencer::new(0.0, 4, 4),
            Err(Error::InvalidTempo(_))
        ));
        assert!(matches!(
            StepSequencer::new(f64::NAN, 4, 4),
            Err(Error::InvalidTempo(_))
        ));
        assert!(matches!(
            StepSequencer::new(120.0, 0, 4),
            Err(Error::InvalidGrid { .. })
        ));
        assert!(matches!(
            StepSequencer::new(120.0, usize::MAX, 2),
            Err(Error::InvalidGrid { .. })
        ));

        let mut seq = StepSequencer::new(120.0, 4, 4).unwrap();
        assert!(seq.add_channel(Arc::new(voices::kick()), "X...").is_err());
        assert!(seq.channels().is_empty());
    }

    #[test]
    fn tempo_too_fast_to_count_is_rejected() {
        assert!(matches!(
            StepSequencer::new(1e20, 4, 4),
            Err(Error::InvalidTempo(_))
        ));
        assert!(matches!(
            StepSequencer::new(60_000.0, 1, 2),
            Err(Error::InvalidTempo(_))
        ));

        // Exactly one millisecond per step still counts
        let mut seq = StepSequencer::new(60_000.0, 1, 1).unwrap();
        seq.add_channel(Arc::new(voices::kick()), "X").unwrap();
        assert_eq!(seq.update(0.0105).len(), 10);
    }

    #[test]
    fn pitched_triggers_are_gated_for_one_step() {
        let mut seq = StepSequencer::new(120.0, 1, 2).unwrap();
        seq.add_channel(Arc::new(voices::harmonica()), "XX").unwrap();
        seq.add_channel(Arc::new(voices::snare()), "XX").unwrap();

        let triggers = seq.update(0.25);
        assert_eq!(triggers[0].gate, Some(0.25));
        assert_eq!(triggers[1].gate, None);

        let harmonica = triggers[0].clone().into_note(4.0);
        assert!(harmonica.is_released());
        assert_eq!(harmonica.off, 4.25);

        let snare = triggers[1].clone().into_note(4.0);
        assert!(snare.is_held());
    }

    #[test]
    fn reset_rewinds() {
        let mut seq = drum_machine();
        seq.update(seq.step_duration() * 5.5);
        seq.reset();
        assert_eq!(seq.current_step(), 0);
        assert!(seq.update(seq.step_duration() * 0.9).is_empty());
    }
}
