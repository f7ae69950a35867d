//! Message list renderer.
//!
//! One `ListItem` per message. A bubble is the sender line, an optional quoted
//! reply preview, the wrapped body, a reaction summary, and for AI messages the
//! like/dislike row plus reason chips once disliked. User bubbles are right
//! aligned; session events are centred and dimmed.

use astrochat_core::types::{ChatState, DislikeReason, FeedbackType, Message, MessageKind, Sender};
use chrono::{DateTime, Local};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{HighlightSpacing, List, ListItem},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::{AppState, Mode};
use crate::theme::Theme;
use crate::ui::layout::{inner_rect, panel_block};

/// Columns taken by the highlight symbol.
const HIGHLIGHT_WIDTH: u16 = 2;

/// Renders the list and caches each visible bubble's rect for mouse hit-testing.
pub fn render_message_list(frame: &mut Frame, area: Rect, state: &mut AppState, theme: &Theme) {
    let chat = state.store.state();
    let is_focused = state.mode == Mode::Normal && !chat.is_reacting() && !chat.show_rating_modal;
    let title = format!(" Messages ({}) ", chat.messages.len());
    let inner = inner_rect(area);
    let body_width = inner.width.saturating_sub(HIGHLIGHT_WIDTH + 2).max(10) as usize;

    let items: Vec<ListItem> = chat
        .messages
        .iter()
        .map(|m| ListItem::new(bubble_text(m, chat, body_width, theme)))
        .collect();
    let heights: Vec<u16> = items.iter().map(|i| i.height() as u16).collect();

    let list = List::new(items)
        .block(panel_block(title, is_focused, theme))
        .highlight_style(Style::default().bg(theme.selection_bg))
        .highlight_symbol("▌ ")
        .highlight_spacing(HighlightSpacing::Always);

    frame.render_stateful_widget(list, area, &mut state.list_state);

    state.bubble_rects = visible_rects(&heights, state.list_state.offset(), inner);
}

/// Lays out item rects from `offset` down until the viewport is full.
fn visible_rects(heights: &[u16], offset: usize, inner: Rect) -> Vec<(usize, Rect)> {
    let mut rects = Vec::new();
    let mut y = inner.y;
    let bottom = inner.y + inner.height;
    for (index, &h) in heights.iter().enumerate().skip(offset) {
        if y >= bottom {
            break;
        }
        let height = h.min(bottom - y);
        rects.push((index, Rect::new(inner.x, y, inner.width, height)));
        y += h;
    }
    rects
}

fn bubble_text<'a>(msg: &'a Message, chat: &'a ChatState, width: usize, theme: &Theme) -> Text<'a> {
    if msg.kind == MessageKind::Event {
        return Text::from(vec![
            Line::from(Span::styled(
                format!("— {} —", msg.text),
                Style::default().fg(theme.bubble_event).add_modifier(Modifier::ITALIC),
            ))
            .alignment(Alignment::Center),
            Line::raw(""),
        ]);
    }

    let align = if msg.sender.is_user() { Alignment::Right } else { Alignment::Left };
    let body_color = match msg.sender {
        Sender::User => theme.bubble_user,
        Sender::AiAstrologer => theme.bubble_ai,
        Sender::HumanAstrologer => theme.bubble_human,
        Sender::System => theme.bubble_event,
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(
            msg.sender.display_name(),
            Style::default().fg(theme.sender_name).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {}", clock(msg.timestamp)), Style::default().fg(theme.timestamp)),
    ])
    .alignment(align)];

    if msg.reply_to.is_some() {
        let quote = match chat.replied_message(msg) {
            Some(orig) => format!(
                "↪ {}: {}",
                orig.sender.display_name(),
                truncate(&orig.text, width.saturating_sub(4))
            ),
            None => "↪ original message unavailable".to_owned(),
        };
        lines.push(
            Line::from(Span::styled(
                quote,
                Style::default().fg(theme.reply_quote).add_modifier(Modifier::ITALIC),
            ))
            .alignment(align),
        );
    }

    for row in wrap(&msg.text, width) {
        lines.push(Line::from(Span::styled(row, Style::default().fg(body_color))).alignment(align));
    }

    let counts = msg.reaction_counts();
    if !counts.is_empty() {
        let summary: Vec<Span> = counts
            .iter()
            .map(|(emoji, n)| {
                let label = if *n > 1 { format!("{emoji} {n} ") } else { format!("{emoji} ") };
                Span::styled(label, Style::default().fg(theme.reaction))
            })
            .collect();
        lines.push(Line::from(summary).alignment(align));
    }

    if msg.sender == Sender::AiAstrologer {
        lines.push(feedback_line(msg.feedback_type, theme));
        if msg.feedback_type == Some(FeedbackType::Disliked) {
            lines.push(chips_line(msg.dislike_reason, theme));
        }
    }

    lines.push(Line::raw(""));
    Text::from(lines)
}

fn feedback_line(current: Option<FeedbackType>, theme: &Theme) -> Line<'static> {
    let button = |label: &'static str, kind: FeedbackType, color: Color| {
        let style = if current == Some(kind) {
            Style::default().fg(color).add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(theme.chip)
        };
        Span::styled(label, style)
    };
    Line::from(vec![
        button("[+ Like]", FeedbackType::Liked, theme.feedback_liked),
        Span::raw(" "),
        button("[- Dislike]", FeedbackType::Disliked, theme.feedback_disliked),
    ])
}

fn chips_line(selected: Option<DislikeReason>, theme: &Theme) -> Line<'static> {
    let mut spans = Vec::with_capacity(DislikeReason::ALL.len() * 2);
    for (n, reason) in DislikeReason::ALL.into_iter().enumerate() {
        let style = if selected == Some(reason) {
            Style::default().fg(theme.chip_selected).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.chip)
        };
        spans.push(Span::styled(format!("({} {})", n + 1, reason.label()), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

/// `HH:MM` in the local timezone of an epoch-millis timestamp.
fn clock(timestamp_ms: i64) -> String {
    match DateTime::from_timestamp_millis(timestamp_ms) {
        Some(t) => t.with_timezone(&Local).format("%H:%M").to_string(),
        None => "--:--".to_owned(),
    }
}

/// Cuts `text` to at most `max` terminal columns, ending in `…` when shortened.
fn truncate(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_owned();
    }
    let budget = max.saturating_sub(1);
    let mut kept = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        kept.push(c);
        used += w;
    }
    kept.push('…');
    kept
}

/// Greedy word wrap on display columns. Words wider than `width` are split.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    let mut current = String::new();
    let mut used = 0;

    for word in text.split_whitespace() {
        let word_width = word.width();
        if word_width > width {
            if !current.is_empty() {
                rows.push(std::mem::take(&mut current));
                used = 0;
            }
            for c in word.chars() {
                let w = c.width().unwrap_or(0);
                if used + w > width && !current.is_empty() {
                    rows.push(std::mem::take(&mut current));
                    used = 0;
                }
                current.push(c);
                used += w;
            }
            continue;
        }

        let needed = if current.is_empty() { word_width } else { used + 1 + word_width };
        if needed > width {
            rows.push(std::mem::take(&mut current));
            used = 0;
        }
        if !current.is_empty() {
            current.push(' ');
            used += 1;
        }
        current.push_str(word);
        used += word_width;
    }
    if !current.is_empty() || rows.is_empty() {
        rows.push(current);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::TimeZone;

    #[test]
    fn wrap_breaks_on_words_and_splits_long_ones() {
        assert_eq!(wrap("a bb ccc", 4), ["a bb", "ccc"]);
        assert_eq!(wrap("abcdefgh", 3), ["abc", "def", "gh"]);
        assert_eq!(wrap("", 5), [""]);
    }

    #[test]
    fn wrap_counts_wide_glyphs_as_two_columns() {
        assert_eq!(wrap("🔥🔥🔥", 4), ["🔥🔥", "🔥"]);
        assert_eq!(wrap("ok 🙏🙏", 5), ["ok", "🙏🙏"]);
        assert!(wrap("Namaste 🙏 Shani Mahadasha", 8).iter().all(|row| row.width() <= 8));
    }

    #[test]
    fn truncate_respects_display_width() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("🔥🔥🔥", 4), "🔥…");
        assert_eq!(truncate("abcdef", 4), "abc…");
    }

    #[test]
    fn clock_uses_local_time() {
        // 2024-12-20T08:01:00Z, shown in whatever zone the test runs in.
        let ts = 1_734_681_660_000;
        let expected = Local
            .timestamp_millis_opt(ts)
            .single()
            .unwrap()
            .format("%H:%M")
            .to_string();
        assert_eq!(clock(ts), expected);
        assert_eq!(clock(i64::MAX), "--:--");
    }

    #[test]
    fn visible_rects_stop_at_viewport() {
        let inner = Rect::new(1, 1, 20, 5);
        let rects = visible_rects(&[2, 2, 2, 2], 1, inner);
        assert_eq!(
            rects,
            vec![
                (1, Rect::new(1, 1, 20, 2)),
                (2, Rect::new(1, 3, 20, 2)),
                (3, Rect::new(1, 5, 20, 1)),
            ]
        );
    }
}
