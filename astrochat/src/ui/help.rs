//! Help overlay renderer for astrochat.
//!
//! A centred modal drawn over the chat with `Clear` erasing the background, in the
//! same `terminal.draw()` closure as everything else.

use ratatui::{
    Frame,
    layout::Constraint,
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Wrap},
};

use crate::theme::Theme;

/// Renders the help overlay scrolled by `help_scroll` rows.
///
/// Skipped on terminals narrower than 50 columns.
pub fn render_help_overlay(frame: &mut Frame, theme: &Theme, help_scroll: u16) {
    if frame.area().width < 50 {
        return;
    }

    let overlay_area = frame
        .area()
        .centered(Constraint::Percentage(80), Constraint::Percentage(80));
    frame.render_widget(Clear, overlay_area);

    let block = Block::bordered()
        .title(" Help  — j/k scroll, ? or Esc to dismiss ")
        .border_style(ratatui::style::Style::default().fg(theme.border_active));

    frame.render_widget(
        Paragraph::new(build_help_text())
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((help_scroll, 0)),
        overlay_area,
    );
}

fn build_help_text() -> Text<'static> {
    Text::from(vec![
        Line::from("Messages"),
        Line::from("  j / k         Select next / previous message"),
        Line::from("  g / G         First / last message"),
        Line::from("  Ctrl-d / u    Move half a page down / up"),
        Line::from("  click         Select a message"),
        Line::from(""),
        Line::from("Acting on the selected message"),
        Line::from("  r             Reply to it (astrologer messages only)"),
        Line::from("  e             React (right click also opens the palette)"),
        Line::from("  + / -         Like / dislike an AI reply (again to clear)"),
        Line::from("  1 / 2 / 3     Dislike reason: inaccurate / too vague / too long"),
        Line::from("  o             Show / hide the reason legend"),
        Line::from(""),
        Line::from("Composing"),
        Line::from("  i / Enter     Start typing"),
        Line::from("  Enter         Send"),
        Line::from("  Esc           Back to navigation (Esc again cancels a reply)"),
        Line::from("  Ctrl-x        Cancel the reply"),
        Line::from(""),
        Line::from("Reaction palette"),
        Line::from("  h / l, j / k  Move"),
        Line::from("  Enter         Add reaction"),
        Line::from("  Esc           Close"),
        Line::from(""),
        Line::from("Rating"),
        Line::from("  R             End chat and rate the session"),
        Line::from("  1-5, h / l    Choose stars"),
        Line::from("  Enter / Esc   Submit / not now"),
        Line::from(""),
        Line::from("General"),
        Line::from("  ?             Open / close this help"),
        Line::from("  q, Ctrl-c     Quit"),
    ])
}
