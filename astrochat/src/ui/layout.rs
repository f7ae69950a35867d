//! Screen layout for astrochat.
//!
//! Pure layout arithmetic, recomputed inside every `terminal.draw()` so the
//! geometry always follows the live terminal size.
//!
//! ```text
//! ┌ header ───────────────────────────────┐  1 row
//! │ message list                          │  fills
//! ├ reply banner (only while replying) ───┤  3 rows
//! ├ input ────────────────────────────────┤  3 rows
//! └ status bar ───────────────────────────┘  1 row
//! ```

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
};

use crate::app::{AppState, Mode};
use crate::theme::Theme;

/// Rects for one frame. Valid only inside the current draw closure.
pub struct ChatLayout {
    pub header: Rect,
    pub list: Rect,
    /// `None` when no reply target is staged.
    pub reply_banner: Option<Rect>,
    pub input: Rect,
    pub status_bar: Rect,
}

/// Splits the frame into the chat regions.
pub fn compute_layout(frame: &Frame, replying: bool) -> ChatLayout {
    let banner_height = if replying { 3 } else { 0 };
    let [header, list, banner, input, status_bar] = frame.area().layout(&Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(banner_height),
        Constraint::Length(3),
        Constraint::Length(1),
    ]));

    ChatLayout {
        header,
        list,
        reply_banner: (banner.height > 0).then_some(banner),
        input,
        status_bar,
    }
}

/// Inner `Rect` of a bordered block.
pub fn inner_rect(area: Rect) -> Rect {
    area.inner(Margin { vertical: 1, horizontal: 1 })
}

/// Bordered block; thick and highlighted when the region has focus.
pub fn panel_block<'a>(title: impl Into<Line<'a>>, is_focused: bool, theme: &Theme) -> Block<'a> {
    let border_style = if is_focused {
        Style::default().fg(theme.border_active)
    } else {
        Style::default().fg(theme.border_inactive)
    };
    let border_type = if is_focused { BorderType::Thick } else { BorderType::Plain };

    Block::bordered()
        .title(title)
        .border_type(border_type)
        .border_style(border_style)
}

/// One-row header: the astrologer's name on the left, the end-chat hint on the right.
pub fn render_header(frame: &mut Frame, area: Rect, theme: &Theme) {
    let title = Line::from(Span::styled(
        " Astrologer Vikram",
        Style::default().fg(theme.header_title).add_modifier(Modifier::BOLD),
    ));
    let action = Line::from(Span::styled(
        "End Chat [R] ",
        Style::default().fg(theme.header_action),
    ))
    .alignment(Alignment::Right);

    frame.render_widget(Paragraph::new(title), area);
    frame.render_widget(Paragraph::new(action), area);
}

/// Bottom status bar: mode indicator, then either the current notice or key hints.
pub fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let chat = state.chat();
    let (mode_text, mode_fg) = if chat.show_rating_modal {
        (" RATE ", theme.star_active)
    } else if chat.is_reacting() {
        (" REACT ", theme.status_mode_normal)
    } else {
        match state.mode {
            Mode::Insert => (" INSERT ", theme.status_mode_insert),
            Mode::Normal | Mode::HelpOverlay => (" NORMAL ", theme.status_mode_normal),
        }
    };

    let mut spans = vec![Span::styled(
        mode_text,
        Style::default().fg(mode_fg).add_modifier(Modifier::BOLD),
    )];

    if let Some(notice) = &state.notice {
        spans.push(Span::styled(format!(" {notice}"), Style::default().fg(theme.notice)));
    } else if chat.show_feedback_options {
        spans.push(Span::raw(" reasons: 1 Inaccurate  2 Too vague  3 Too long  (o to hide)"));
    } else {
        let hint = match state.mode {
            Mode::Insert => " Enter send  Esc normal  Ctrl-x cancel reply",
            _ => " j/k move  r reply  e react  +/- feedback  i type  ? help",
        };
        spans.push(Span::raw(hint));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(theme.status_bar_bg).fg(theme.status_bar_fg)),
        area,
    );
}
