//! Color theme system for astrochat.
//!
//! A `Theme` holds named `ratatui::style::Color` fields for every surface the chat
//! renders. Two built-in themes are provided:
//!
//! - `dark`: ANSI 16 colors, safe on any terminal.
//! - `catppuccin_mocha`: Catppuccin Mocha in RGB; needs truecolor.

use ratatui::style::Color;

/// All color values used across astrochat's UI surfaces.
#[derive(Debug, Clone)]
pub struct Theme {
    // Chrome
    /// Border of the focused area (message list in Normal, input in Insert).
    pub border_active: Color,
    pub border_inactive: Color,
    /// Header title (astrologer name).
    pub header_title: Color,
    /// "End chat" hint in the header.
    pub header_action: Color,

    // Bubbles, keyed by sender
    pub bubble_user: Color,
    pub bubble_ai: Color,
    pub bubble_human: Color,
    pub bubble_event: Color,
    /// Sender name line above each bubble.
    pub sender_name: Color,
    /// Quoted preview of the message being replied to.
    pub reply_quote: Color,
    /// Background of the selected bubble.
    pub selection_bg: Color,
    pub timestamp: Color,

    // Feedback and reactions
    pub feedback_liked: Color,
    pub feedback_disliked: Color,
    /// Unselected reason chip.
    pub chip: Color,
    /// Selected reason chip.
    pub chip_selected: Color,
    pub reaction: Color,

    // Rating modal
    pub star_active: Color,
    pub star_inactive: Color,

    // Status bar
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
    pub status_mode_normal: Color,
    pub status_mode_insert: Color,
    pub notice: Color,

    // General
    pub background: Color,
}

impl Theme {
    /// Built-in dark theme using ANSI 16 colors. Default when config is absent.
    pub fn dark() -> Self {
        Self {
            border_active: Color::Cyan,
            border_inactive: Color::DarkGray,
            header_title: Color::White,
            header_action: Color::Red,

            bubble_user: Color::Green,
            bubble_ai: Color::Magenta,
            bubble_human: Color::Blue,
            bubble_event: Color::DarkGray,
            sender_name: Color::Gray,
            reply_quote: Color::DarkGray,
            selection_bg: Color::Black,
            timestamp: Color::DarkGray,

            feedback_liked: Color::Green,
            feedback_disliked: Color::Red,
            chip: Color::DarkGray,
            chip_selected: Color::Yellow,
            reaction: Color::White,

            star_active: Color::Yellow,
            star_inactive: Color::DarkGray,

            status_bar_bg: Color::DarkGray,
            status_bar_fg: Color::White,
            status_mode_normal: Color::Cyan,
            status_mode_insert: Color::Green,
            notice: Color::Yellow,

            background: Color::Reset,
        }
    }

    /// Catppuccin Mocha in RGB truecolor.
    ///
    /// Palette source: <https://github.com/catppuccin/catppuccin> Mocha variant.
    pub fn catppuccin_mocha() -> Self {
        let green = Color::Rgb(166, 227, 161); // #a6e3a1
        let red = Color::Rgb(243, 139, 168); // #f38ba8
        let yellow = Color::Rgb(249, 226, 175); // #f9e2af
        let blue = Color::Rgb(137, 180, 250); // #89b4fa
        let mauve = Color::Rgb(203, 166, 247); // #cba6f7
        let lavender = Color::Rgb(180, 190, 254); // #b4befe
        let peach = Color::Rgb(250, 179, 135); // #fab387
        let overlay1 = Color::Rgb(127, 132, 156); // #7f849c
        let surface0 = Color::Rgb(49, 50, 68); // #313244
        let surface1 = Color::Rgb(69, 71, 90); // #45475a
        let subtext0 = Color::Rgb(166, 173, 200); // #a6adc8
        let base = Color::Rgb(30, 30, 46); // #1e1e2e
        let text = Color::Rgb(205, 214, 244); // #cdd6f4

        Self {
            border_active: lavender,
            border_inactive: overlay1,
            header_title: text,
            header_action: red,

            bubble_user: green,
            bubble_ai: mauve,
            bubble_human: blue,
            bubble_event: overlay1,
            sender_name: subtext0,
            reply_quote: overlay1,
            selection_bg: surface0,
            timestamp: overlay1,

            feedback_liked: green,
            feedback_disliked: red,
            chip: overlay1,
            chip_selected: peach,
            reaction: text,

            star_active: yellow,
            star_inactive: surface1,

            status_bar_bg: surface1,
            status_bar_fg: text,
            status_mode_normal: lavender,
            status_mode_insert: green,
            notice: yellow,

            background: base,
        }
    }

    /// Resolves a theme name from config. Unknown names fall back to `dark()`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "catppuccin-mocha" | "catppuccin_mocha" => Self::catppuccin_mocha(),
            "dark" => Self::dark(),
            other => {
                tracing::warn!(theme = other, "unknown theme, falling back to 'dark'");
                Self::dark()
            }
        }
    }
}
