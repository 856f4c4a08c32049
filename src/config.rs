//! Session configuration.
//!
//! Defaults reproduce the stock session: a 90 BPM drum loop on a 4x4 grid
//! with the harmonica on the computer keyboard, rendered mono at 44.1kHz.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{sequencing::DEFAULT_PITCH, voices::InstrumentKind};

/// Sample type delivered to the output device.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SampleFormat {
    /// 16-bit signed integer
    #[default]
    I16,
    /// 32-bit float
    F32,
}

impl SampleFormat {
    /// Width of one sample in bits.
    pub fn bits(self) -> u16 {
        match self {
            SampleFormat::I16 => 16,
            SampleFormat::F32 => 32,
        }
    }
}

/// Output device parameters.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct AudioConfig {
    /// Index into the enumerated output devices
    pub device_index: usize,
    pub sample_rate: u32,
    pub channels: u16,
    pub sample_format: SampleFormat,
    /// Frames per device callback
    pub block_size: u32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            device_index: 0,
            sample_rate: 44_100,
            channels: 1,
            sample_format: SampleFormat::I16,
            block_size: 256,
        }
    }
}

/// One sequencer row: which preset plays, and where.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelConfig {
    pub instrument: InstrumentKind,
    /// `X` for a hit, `.` for a rest, one character per step
    pub pattern: String,
}

impl ChannelConfig {
    pub fn new(instrument: InstrumentKind, pattern: impl Into<String>) -> Self {
        Self {
            instrument,
            pattern: pattern.into(),
        }
    }
}

/// Everything needed to build a [`Session`](crate::Session).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Tempo in beats per minute
    pub tempo: f64,
    pub beats_per_bar: usize,
    pub subdivisions_per_beat: usize,
    /// Scale degree played by every sequencer trigger
    pub sequencer_pitch: i32,
    pub channels: Vec<ChannelConfig>,
    /// Preset played from the computer keyboard
    pub keyboard_instrument: InstrumentKind,
    /// Scale degree of the lowest keyboard key
    pub keyboard_base: i32,
    pub audio: AudioConfig,
}

impl SessionConfig {
    /// Stock session with no sequencer channels.
    pub fn empty() -> Self {
        Self {
            channels: Vec::new(),
            ..Self::default()
        }
    }

    pub fn tempo(mut self, bpm: f64) -> Self {
        self.tempo = bpm;
        self
    }

    pub fn grid(mut self, beats_per_bar: usize, subdivisions_per_beat: usize) -> Self {
        self.beats_per_bar = beats_per_bar;
        self.subdivisions_per_beat = subdivisions_per_beat;
        self
    }

    /// Add a sequencer channel.
    pub fn channel(mut self, instrument: InstrumentKind, pattern: impl Into<String>) -> Self {
        self.channels.push(ChannelConfig::new(instrument, pattern));
        self
    }

    pub fn keyboard(mut self, instrument: InstrumentKind) -> Self {
        self.keyboard_instrument = instrument;
        self
    }

    pub fn audio(mut self, audio: AudioConfig) -> Self {
        self.audio = audio;
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tempo: 90.0,
            beats_per_bar: 4,
            subdivisions_per_beat: 4,
            sequencer_pitch: DEFAULT_PITCH,
            channels: vec![
                ChannelConfig::new(InstrumentKind::Kick, "X...X...X..X.X.."),
                ChannelConfig::new(InstrumentKind::Snare, "..X...X...X...X."),
                ChannelConfig::new(InstrumentKind::HiHat, "X.X.X.X.X.X.X.XX"),
            ],
            keyboard_instrument: InstrumentKind::Harmonica,
            keyboard_base: DEFAULT_PITCH,
            audio: AudioConfig::default(),
        }
    }
}
