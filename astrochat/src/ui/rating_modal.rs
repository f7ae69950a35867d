//! Post-chat rating modal.
//!
//! Five stars filled up to the local draft. "Submit" only appears once at least
//! one star is chosen; the draft reaches the store on submit, not on each press.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph},
};

use astrochat_core::types::MAX_RATING;

use crate::app::AppState;
use crate::theme::Theme;

pub fn render_rating_modal(frame: &mut Frame, state: &AppState, theme: &Theme) {
    if frame.area().width < 30 || frame.area().height < 9 {
        return;
    }
    let area = frame
        .area()
        .centered(Constraint::Length(44), Constraint::Length(9));
    frame.render_widget(Clear, area);

    let stars: Vec<Span> = (1..=MAX_RATING)
        .flat_map(|n| {
            let color = if n <= state.rating_draft { theme.star_active } else { theme.star_inactive };
            [
                Span::styled("★", Style::default().fg(color).add_modifier(Modifier::BOLD)),
                Span::raw("  "),
            ]
        })
        .collect();

    let mut buttons = vec![Span::styled("[Esc] Not Now", Style::default().fg(theme.chip))];
    if state.rating_draft > 0 {
        buttons.push(Span::raw("    "));
        buttons.push(Span::styled(
            "[Enter] Submit",
            Style::default().fg(theme.star_active).add_modifier(Modifier::BOLD),
        ));
    }

    let body = vec![
        Line::raw(""),
        Line::from(Span::styled(
            "How was your experience?",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Your feedback helps us improve",
            Style::default().fg(theme.sender_name),
        )),
        Line::raw(""),
        Line::from(stars),
        Line::raw(""),
        Line::from(buttons),
    ];

    let block = Block::bordered()
        .title(" End Chat ")
        .border_style(Style::default().fg(theme.border_active));
    frame.render_widget(
        Paragraph::new(body).alignment(Alignment::Center).block(block),
        area,
    );
}
