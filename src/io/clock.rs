use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

/// Playback clock derived from the number of frames handed to the device.
///
/// This is the single time base for every envelope and oscillator
/// evaluation. The render path advances it after each buffer; the control
/// path reads it to stamp new notes. Cloning shares the same counter.
#[derive(Debug, Clone)]
pub struct PlaybackClock {
    frames: Arc<AtomicU64>,
    sample_rate: f64,
}

impl PlaybackClock {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            frames: Arc::new(AtomicU64::new(0)),
            sample_rate: f64::from(sample_rate.max(1)),
        }
    }

    /// Seconds of audio rendered so far. Never decreases.
    pub fn now(&self) -> f64 {
        self.frames.load(Ordering::Acquire) as f64 / self.sample_rate
    }

    /// Record that `frames` more frames were rendered.
    pub fn advance(&self, frames: usize) {
        self.frames.fetch_add(frames as u64, Ordering::AcqRel);
    }

    pub fn frames(&self) -> u64 {
        self.frames.load(Ordering::Acquire)
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }
}
