//! Emoji reaction palette.
//!
//! Drawn as a small popup anchored at `reacting_to_message.position`: above the
//! anchor when there is room, below it otherwise, and always clamped inside the
//! frame. `Clear` erases whatever the popup covers.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph},
};

use crate::app::{AppState, REACTIONS};
use crate::theme::Theme;

/// Emoji per palette row.
pub const PER_ROW: usize = 6;
/// Columns per emoji cell (two for the glyph, one space each side).
const CELL_WIDTH: u16 = 4;

pub fn render_reaction_palette(frame: &mut Frame, state: &AppState, theme: &Theme) {
    let rows = REACTIONS.len().div_ceil(PER_ROW) as u16;
    let width = PER_ROW as u16 * CELL_WIDTH + 2;
    let height = rows + 2;
    let anchor = state
        .chat()
        .reacting_to_message
        .position
        .map(|p| (p.x, p.y))
        .unwrap_or((frame.area().x + 2, frame.area().y + frame.area().height / 2));
    let area = popup_rect(frame.area(), anchor, width, height);

    frame.render_widget(Clear, area);

    let lines: Vec<Line> = REACTIONS
        .chunks(PER_ROW)
        .enumerate()
        .map(|(row, emojis)| {
            Line::from(
                emojis
                    .iter()
                    .enumerate()
                    .map(|(col, emoji)| {
                        let index = row * PER_ROW + col;
                        let style = if index == state.palette_cursor {
                            Style::default().add_modifier(Modifier::REVERSED)
                        } else {
                            Style::default()
                        };
                        Span::styled(format!(" {emoji} "), style)
                    })
                    .collect::<Vec<_>>(),
            )
        })
        .collect();

    let block = Block::bordered()
        .title(" React ")
        .title_bottom(" h/l j/k · Enter · Esc ")
        .border_style(Style::default().fg(theme.border_active));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Places a `width`×`height` popup near `anchor`, inside `frame`.
fn popup_rect(frame: Rect, anchor: (u16, u16), width: u16, height: u16) -> Rect {
    let width = width.min(frame.width);
    let height = height.min(frame.height);
    let (ax, ay) = anchor;

    let y = if ay >= frame.y + height {
        ay - height
    } else {
        ay.saturating_add(1)
    };
    let max_x = frame.x + frame.width - width;
    let max_y = frame.y + frame.height - height;
    Rect::new(ax.clamp(frame.x, max_x), y.clamp(frame.y, max_y), width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn popup_prefers_space_above_anchor() {
        let frame = Rect::new(0, 0, 80, 24);
        assert_eq!(popup_rect(frame, (10, 20), 26, 6), Rect::new(10, 14, 26, 6));
    }

    #[test]
    fn popup_drops_below_and_clamps_near_edges() {
        let frame = Rect::new(0, 0, 80, 24);
        assert_eq!(popup_rect(frame, (70, 2), 26, 6), Rect::new(54, 3, 26, 6));
        assert_eq!(popup_rect(frame, (0, 23), 26, 6), Rect::new(0, 17, 26, 6));
    }
}
