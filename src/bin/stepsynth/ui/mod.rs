//! Status display.
//!
//! Purely observational: everything drawn is read from a [`Status`] snapshot
//! taken on the control thread and from the scope tap.

mod grid;
mod piano;
mod spectrum;
mod transport;
mod waveform;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use rtrb::Consumer;
use stepsynth::{
    io::KEYMAP,
    synth::VoiceInfo,
    Session,
};

use grid::{render_grid, GridRow};
use piano::render_piano;
use spectrum::{render_spectrum, SpectrumAnalyzer};
use transport::{render_transport, AudioStats};
use waveform::render_waveform;

/// Audio visualization buffer size
const VIS_BUFFER_SIZE: usize = 1024;

/// One frame's worth of session state.
pub struct Status {
    pub device: String,
    pub keyboard_instrument: String,
    pub tempo: f64,
    pub beats: usize,
    pub subdivisions: usize,
    pub current_step: usize,
    pub rows: Vec<GridRow>,
    pub voices: Vec<VoiceInfo>,
    pub held: [bool; KEYMAP.len()],
    /// Seconds since the control loop started
    pub wall: f64,
    /// Seconds of audio handed to the device
    pub playback: f64,
    pub sample_rate: f64,
}

impl Status {
    pub fn capture(
        session: &Session,
        device: &str,
        held: [bool; KEYMAP.len()],
        wall: f64,
    ) -> Self {
        let seq = session.sequencer();
        Self {
            device: device.to_owned(),
            keyboard_instrument: session.keyboard_instrument().name().to_owned(),
            tempo: seq.tempo(),
            beats: seq.beats(),
            subdivisions: seq.subdivisions(),
            current_step: seq.current_step(),
            rows: seq
                .channels()
                .iter()
                .map(|c| GridRow {
                    name: c.instrument.name().to_owned(),
                    steps: c.pattern.steps().to_vec(),
                })
                .collect(),
            voices: session.registry().snapshot(),
            held,
            wall,
            playback: session.now(),
            sample_rate: session.clock().sample_rate(),
        }
    }

    /// Wall time minus playback time.
    pub fn latency(&self) -> f64 {
        self.wall - self.playback
    }
}

/// UI application state
pub struct UiApp {
    /// Ring buffer receiver for audio samples
    audio_rx: Consumer<f32>,
    /// Audio sample buffer for visualization
    audio_buffer: Vec<f32>,
    spectrum: SpectrumAnalyzer,
}

impl UiApp {
    pub fn new(audio_rx: Consumer<f32>, sample_rate: f64) -> Self {
        Self {
            audio_rx,
            audio_buffer: vec![0.0; VIS_BUFFER_SIZE],
            spectrum: SpectrumAnalyzer::new(VIS_BUFFER_SIZE, sample_rate as f32),
        }
    }

    /// Pull new samples from the tap, keeping the last `VIS_BUFFER_SIZE`
    pub fn poll_audio(&mut self) {
        let before = self.audio_buffer.len();
        while let Ok(sample) = self.audio_rx.pop() {
            self.audio_buffer.push(sample);
        }

        if self.audio_buffer.len() > before {
            if self.audio_buffer.len() > VIS_BUFFER_SIZE {
                let excess = self.audio_buffer.len() - VIS_BUFFER_SIZE;
                self.audio_buffer.drain(0..excess);
            }
            self.spectrum.update(&self.audio_buffer);
        }
    }

    pub fn render(&self, frame: &mut Frame, status: &Status) {
        let area = frame.area();
        let grid_height = status.rows.len() as u16 + 4;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),           // Transport bar
                Constraint::Length(grid_height), // Sequencer grid
                Constraint::Length(5),           // Piano
                Constraint::Min(8),              // Scope + spectrum
                Constraint::Length(1),           // Help bar
            ])
            .split(area);

        let stats = AudioStats::from_buffer(&self.audio_buffer);
        render_transport(frame, chunks[0], status, &stats);

        let grid_block = Block::default()
            .title(" Sequencer ")
            .borders(Borders::ALL);
        let grid_inner = grid_block.inner(chunks[1]);
        frame.render_widget(grid_block, chunks[1]);
        render_grid(frame, grid_inner, status);

        render_piano(frame, chunks[2], status);

        let scopes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[3]);
        render_waveform(frame, scopes[0], &self.audio_buffer);
        render_spectrum(frame, scopes[1], self.spectrum.data());

        let help = Paragraph::new(" [Z..] Play  [Q/Esc] Quit")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[4]);
    }
}
