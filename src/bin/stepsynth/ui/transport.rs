//! Transport bar - tempo, step position, note count, timing and levels

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::Status;

/// Audio statistics for display
pub struct AudioStats {
    pub peak: f32,
    pub rms: f32,
}

impl AudioStats {
    pub fn from_buffer(buffer: &[f32]) -> Self {
        if buffer.is_empty() {
            return Self { peak: 0.0, rms: 0.0 };
        }
        let peak = buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        let rms = (buffer.iter().map(|&x| x * x).sum::<f32>() / buffer.len() as f32).sqrt();
        Self { peak, rms }
    }
}

pub fn render_transport(frame: &mut Frame, area: Rect, status: &Status, audio_stats: &AudioStats) {
    let block = Block::default()
        .title(format!(" stepsynth - {} ", status.device))
        .borders(Borders::ALL);

    let total_steps = status.beats * status.subdivisions;
    let beat = status.current_step / status.subdivisions.max(1) + 1;
    let released = status.voices.iter().filter(|v| v.released).count();

    let line = Line::from(vec![
        Span::styled(
            format!(" BPM: {:.0}  ", status.tempo),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("Beat {} | Step {:>2}/{}  ", beat, status.current_step + 1, total_steps),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("Notes: {} ({} releasing)  ", status.voices.len(), released),
            Style::default().fg(Color::Green),
        ),
        Span::styled(
            format!(
                "Wall {:.2}s  Play {:.2}s  Latency {:+.3}s  ",
                status.wall,
                status.playback,
                status.latency()
            ),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("{:.1}kHz  ", status.sample_rate / 1000.0),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("Peak: {:.2}  RMS: {:.2}", audio_stats.peak, audio_stats.rms),
            Style::default().fg(Color::Magenta),
        ),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_of_a_square() {
        let stats = AudioStats::from_buffer(&[0.5, -0.5, 0.5, -0.5]);
        assert_eq!(stats.peak, 0.5);
        assert!((stats.rms - 0.5).abs() < 1e-6);
        assert_eq!(AudioStats::from_buffer(&[]).peak, 0.0);
    }
}
