//! The shared collection of sounding notes.
//!
//! Both paths go through one `Mutex`. The render path holds it for one mix and
//! prune pass (O(active voices)); the control path holds it briefly per append
//! or key update. Polyphony is small, so contention stays well inside a sample
//! period.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{instrument::Instrument, note::Note};
use crate::HEADROOM;

/// Initial capacity; appends beyond this reallocate on the control path only.
const INITIAL_VOICES: usize = 64;

/// What a live key update did to the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTransition {
    /// New note added
    Triggered,
    /// Released note restarted from its attack
    Retriggered,
    /// Held note released
    Released,
}

/// Display-side copy of one registered voice.
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceInfo {
    pub id: i32,
    pub instrument: String,
    pub released: bool,
}

pub struct VoiceRegistry {
    notes: Mutex<Vec<Note>>,
}

impl VoiceRegistry {
    pub fn new() -> Self {
        Self {
            notes: Mutex::new(Vec::with_capacity(INITIAL_VOICES)),
        }
    }

    /// A panic elsewhere must not silence the audio callback, so poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, Vec<Note>> {
        self.notes.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a note; it sounds from the next rendered sample.
    pub fn add_note(&self, note: Note) {
        self.lock().push(note);
    }

    /// Append several notes under one lock.
    pub fn add_notes(&self, notes: impl IntoIterator<Item = Note>) {
        self.lock().extend(notes);
    }

    /// Mix every voice at `time`, prune finished voices, and return the
    /// headroom-scaled sum.
    pub fn render_sample(&self, time: f64) -> f64 {
        let mut notes = self.lock();
        let sum = mix_frame(&mut notes, time);
        prune(&mut notes);
        sum * HEADROOM
    }

    /// Render consecutive frames starting at `start_time` under a single lock.
    ///
    /// Voices that finish mid-block stay silent for the rest of the block and
    /// are pruned at its end.
    pub fn render_block(&self, out: &mut [f32], start_time: f64, sample_rate: f64) {
        let mut notes = self.lock();
        for (i, sample) in out.iter_mut().enumerate() {
            let time = start_time + i as f64 / sample_rate;
            *sample = (mix_frame(&mut notes, time) * HEADROOM) as f32;
        }
        prune(&mut notes);
    }

    /// Apply one polled key state to the note `id` played by `instrument`.
    ///
    /// Held and absent: trigger a new note. Held and released: retrigger it.
    /// Not held and still sounding from a press: release it.
    pub fn update_key(
        &self,
        id: i32,
        instrument: &Arc<Instrument>,
        held: bool,
        now: f64,
    ) -> Option<KeyTransition> {
        let mut notes = self.lock();
        let Some(index) = notes
            .iter()
            .position(|n| n.id == id && n.played_by(instrument))
        else {
            if !held {
                return None;
            }
            notes.push(Note::triggered(id, instrument.clone(), now));
            return Some(KeyTransition::Triggered);
        };

        let note = &mut notes[index];
        if held && note.is_released() {
            note.retrigger(now);
            Some(KeyTransition::Retriggered)
        } else if !held && note.is_held() {
            note.release(now);
            Some(KeyTransition::Released)
        } else {
            None
        }
    }

    pub fn active_count(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn snapshot(&self) -> Vec<VoiceInfo> {
        self.lock()
            .iter()
            .map(|n| VoiceInfo {
                id: n.id,
                instrument: n.instrument().name().to_owned(),
                released: n.is_released(),
            })
            .collect()
    }
}

impl Default for VoiceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// First pass: sum all live voices and mark the finished ones inactive.
fn mix_frame(notes: &mut [Note], time: f64) -> f64 {
    let mut sum = 0.0;
    for note in notes.iter_mut().filter(|n| n.active) {
        let sound = note.instrument().sound(time, note);
        sum += sound.sample;
        if sound.finished {
            note.active = false;
        }
    }
    sum
}

/// Second pass: drop everything the first pass marked.
fn prune(notes: &mut Vec<Note>) {
    notes.retain(|n| n.active);
}
