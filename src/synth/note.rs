use std::sync::Arc;

use super::instrument::Instrument;

/// One triggered pitch and its lifecycle timestamps.
///
/// `off < on` means the key is still down; `off > on` means it was released
/// at `off`. The instrument reference never changes after construction.
#[derive(Debug, Clone)]
pub struct Note {
    /// Scale degree
    pub id: i32,
    /// Playback time of the latest trigger
    pub on: f64,
    /// Playback time of the release, or `NEG_INFINITY` before the first release
    pub off: f64,
    /// Cleared by the renderer once the instrument reports the note finished
    pub active: bool,
    instrument: Arc<Instrument>,
}

impl Note {
    /// A note triggered at playback time `now`.
    pub fn triggered(id: i32, instrument: Arc<Instrument>, now: f64) -> Self {
        Self {
            id,
            on: now,
            off: f64::NEG_INFINITY,
            active: true,
            instrument,
        }
    }

    pub fn instrument(&self) -> &Arc<Instrument> {
        &self.instrument
    }

    /// Key still down.
    pub fn is_held(&self) -> bool {
        self.on > self.off
    }

    /// Released at `off`.
    pub fn is_released(&self) -> bool {
        self.off > self.on
    }

    /// Stamp the release time. Ignored if the note is already released.
    pub fn release(&mut self, now: f64) {
        if self.is_held() {
            self.off = now;
        }
    }

    /// Restart the note from its attack at `now`, held until the next release.
    pub fn retrigger(&mut self, now: f64) {
        self.on = now;
        self.off = f64::NEG_INFINITY;
        self.active = true;
    }

    /// True if this note was produced by `instrument` (reference identity).
    pub fn played_by(&self, instrument: &Arc<Instrument>) -> bool {
        Arc::ptr_eq(&self.instrument, instrument)
    }
}
