//! Piano diagram of the computer keyboard, lit while keys are held

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use stepsynth::io::KEYMAP;

use super::Status;

/// Semitone offsets of the bottom (white key) row.
const WHITE_KEYS: [usize; 9] = [0, 2, 3, 5, 7, 8, 10, 12, 14];

fn key_cell(offset: Option<usize>, held: &[bool]) -> Span<'static> {
    match offset {
        Some(offset) => {
            let label = format!(" {} ", KEYMAP[offset].to_ascii_uppercase());
            let style = if held[offset] {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default().fg(Color::White)
            };
            Span::styled(label, style)
        }
        None => Span::raw("   "),
    }
}

pub fn render_piano(frame: &mut Frame, area: Rect, status: &Status) {
    let block = Block::default()
        .title(format!(" Keyboard: {} ", status.keyboard_instrument))
        .borders(Borders::ALL);

    let border = || Span::styled("|", Style::default().fg(Color::DarkGray));

    let mut upper = vec![border()];
    let mut lower = vec![border()];
    for &white in &WHITE_KEYS {
        // A black key sits above a white key when the semitone below is not white
        let black = white
            .checked_sub(1)
            .filter(|below| !WHITE_KEYS.contains(below));
        upper.push(key_cell(black, &status.held));
        upper.push(border());
        lower.push(key_cell(Some(white), &status.held));
        lower.push(border());
    }

    let paragraph = Paragraph::new(vec![Line::from(upper), Line::from(lower)]).block(block);
    frame.render_widget(paragraph, area);
}
