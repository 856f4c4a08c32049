//! Sequencer grid - channel patterns with beat markers and the current step

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::Status;

/// Width of the channel name column
const LABEL_WIDTH: usize = 12;

/// Display copy of one sequencer channel.
pub struct GridRow {
    pub name: String,
    pub steps: Vec<bool>,
}

pub fn render_grid(frame: &mut Frame, area: Rect, status: &Status) {
    let total_steps = status.beats * status.subdivisions;
    if area.height < 2 || total_steps == 0 {
        return;
    }

    // Two columns per step when it fits, otherwise one
    let available = (area.width as usize).saturating_sub(LABEL_WIDTH);
    let cell = if available >= total_steps * 2 { 2 } else { 1 };

    let mut lines = Vec::with_capacity(status.rows.len() + 2);

    // Beat markers row
    let mut markers = " ".repeat(LABEL_WIDTH);
    for step in 0..total_steps {
        let beat_start = step % status.subdivisions == 0;
        let mark = if beat_start {
            format!("{:<cell$}", step / status.subdivisions + 1)
        } else {
            format!("{:<cell$}", "·")
        };
        markers.push_str(&mark);
    }
    lines.push(Line::from(Span::styled(
        markers,
        Style::default().fg(Color::DarkGray),
    )));

    for row in &status.rows {
        let mut spans = Vec::with_capacity(total_steps + 1);
        spans.push(Span::styled(
            format!("{:<width$.width$}", row.name, width = LABEL_WIDTH - 1) + " ",
            Style::default().fg(Color::White),
        ));

        for (step, &hit) in row.steps.iter().enumerate() {
            let glyph = if hit { "▓" } else { "░" };
            let mut style = Style::default().fg(if hit { Color::Cyan } else { Color::DarkGray });
            if step == status.current_step {
                style = style.fg(if hit { Color::Yellow } else { Color::Gray });
                style = style.add_modifier(Modifier::BOLD);
            }
            spans.push(Span::styled(format!("{glyph:<cell$}"), style));
        }
        lines.push(Line::from(spans));
    }

    // Playhead row
    let mut playhead = " ".repeat(LABEL_WIDTH + status.current_step * cell);
    playhead.push('▲');
    lines.push(Line::from(Span::styled(
        playhead,
        Style::default().fg(Color::Yellow),
    )));

    frame.render_widget(Paragraph::new(lines), area);
}
