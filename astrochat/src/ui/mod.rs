//! UI rendering module for astrochat.
//!
//! `render()` is the single entry point called by the event loop's
//! `terminal.draw()` closure. Layout arithmetic lives in `layout.rs`; each
//! region and overlay has its own module.

mod layout;
pub mod help;
pub mod keybindings;
pub mod message_list;
pub mod rating_modal;
pub mod reaction_palette;

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use unicode_width::UnicodeWidthStr;

use crate::app::{AppState, Mode};
use crate::theme::Theme;
use layout::{compute_layout, inner_rect, panel_block, render_header, render_status_bar};

/// Renders one complete frame.
///
/// Overlays are drawn last so they sit on top: reaction palette, then rating
/// modal, then help. The list viewport height is cached into `state` for the
/// next keypress's page movements.
pub fn render(frame: &mut Frame, state: &mut AppState, theme: &Theme) {
    let areas = compute_layout(frame, state.chat().reply_to.is_some());
    state.list_viewport_height = inner_rect(areas.list).height;

    frame.render_widget(
        Block::new().style(Style::default().bg(theme.background)),
        frame.area(),
    );

    render_header(frame, areas.header, theme);
    message_list::render_message_list(frame, areas.list, state, theme);
    if let Some(banner) = areas.reply_banner {
        render_reply_banner(frame, banner, state, theme);
    }
    render_input(frame, areas.input, state, theme);
    render_status_bar(frame, areas.status_bar, state, theme);

    if state.chat().is_reacting() {
        reaction_palette::render_reaction_palette(frame, state, theme);
    }
    if state.chat().show_rating_modal {
        rating_modal::render_rating_modal(frame, state, theme);
    }
    if state.mode == Mode::HelpOverlay {
        help::render_help_overlay(frame, theme, state.help_scroll);
    }
}

/// "Replying to <name>" plus a one-line preview of the staged target.
fn render_reply_banner(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let Some(target) = state.chat().reply_to.as_ref() else {
        return;
    };
    let title = Line::from(Span::styled(
        format!(" Replying to {} ", target.sender.display_name()),
        Style::default().fg(theme.sender_name).add_modifier(Modifier::BOLD),
    ));
    let block = panel_block(title, false, theme)
        .title(Line::from(" Ctrl-x ✕ ").alignment(Alignment::Right));
    let preview = Line::from(Span::styled(
        target.text.replace('\n', " "),
        Style::default().fg(theme.reply_quote),
    ));
    frame.render_widget(Paragraph::new(preview).block(block), area);
}

/// Compose line. Shows a placeholder when empty and the cursor while in Insert.
fn render_input(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let is_focused = state.mode == Mode::Insert;
    let block = panel_block(" Message ", is_focused, theme);
    let inner = inner_rect(area);

    let line = if state.input.is_empty() && !is_focused {
        Line::from(Span::styled(
            "Type a message… (i)",
            Style::default().fg(theme.border_inactive),
        ))
    } else {
        Line::raw(state.input.as_str())
    };

    let (scroll, cursor) = input_view(&state.input, inner.width);
    frame.render_widget(Paragraph::new(line).block(block).scroll((0, scroll)), area);

    if is_focused && inner.width > 0 {
        frame.set_cursor_position((inner.x + cursor, inner.y));
    }
}

/// Horizontal scroll and cursor column for the compose line.
///
/// Keeps the tail of long input visible. Widths are display columns, so wide
/// glyphs such as emoji take two.
fn input_view(input: &str, width: u16) -> (u16, u16) {
    let cols = u16::try_from(input.width()).unwrap_or(u16::MAX);
    let scroll = cols.saturating_sub(width.saturating_sub(1));
    (scroll, (cols - scroll).min(width.saturating_sub(1)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_cursor_follows_display_columns() {
        assert_eq!(input_view("", 10), (0, 0));
        assert_eq!(input_view("hi", 10), (0, 2));
        assert_eq!(input_view("hi 🔥", 10), (0, 5));
        // 12 columns in a 10-column box: scroll so the cursor sits in the last cell.
        assert_eq!(input_view("🔥🔥🔥🔥🔥🔥", 10), (3, 9));
    }
}
