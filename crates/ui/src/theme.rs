use banter_core::Author;
use ratatui::style::{Color, Modifier, Style};

/// Iceberg color theme for the chat TUI
///
/// Based on iceberg.vim color scheme (https://github.com/cocopon/iceberg.vim)
#[derive(Debug, Clone, Copy)]
pub struct Theme;

impl Theme {
    /// Primary background: deep blue-black (fills terminal)
    pub const BG: Color = Color::Rgb(22, 24, 33);

    /// Foreground: light blue-gray (primary text)
    pub const FG: Color = Color::Rgb(198, 200, 209);

    /// Secondary background for the input box
    pub const PANEL_BG: Color = Color::Rgb(30, 33, 50);

    /// Bot badge
    pub const BLUE: Color = Color::Rgb(132, 160, 198);

    pub const CYAN: Color = Color::Rgb(137, 184, 194);

    /// User badge
    pub const PURPLE: Color = Color::Rgb(160, 147, 199);

    pub const GREEN: Color = Color::Rgb(180, 190, 130);

    /// Failed messages
    pub const RED: Color = Color::Rgb(226, 120, 120);

    /// Muted text: timestamps, system badge, placeholder
    pub const MUTED: Color = Color::Rgb(107, 112, 137);

    pub const BORDER: Color = Color::Rgb(60, 65, 90);

    /// Base style for all text
    pub fn base() -> Style {
        Style::default().fg(Self::FG).bg(Self::BG)
    }

    pub fn error() -> Style {
        Style::default().fg(Self::RED).bg(Self::BG)
    }

    pub fn muted() -> Style {
        Style::default().fg(Self::MUTED).bg(Self::BG)
    }

    pub fn panel() -> Style {
        Style::default().fg(Self::FG).bg(Self::PANEL_BG)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    /// Badge color per author
    pub fn author_color(author: Author) -> Color {
        match author {
            Author::Bot => Self::BLUE,
            Author::User => Self::PURPLE,
            Author::System => Self::MUTED,
        }
    }

    pub fn badge(author: Author) -> Style {
        Style::default().fg(Self::author_color(author)).bg(Self::BG).add_modifier(Modifier::BOLD)
    }

    /// Message body style; failed messages are drawn in the error color
    pub fn body(failed: bool) -> Style {
        if failed { Self::error() } else { Self::base() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_values() {
        assert!(matches!(Theme::BG, Color::Rgb(_, _, _)));
        assert!(matches!(Theme::FG, Color::Rgb(_, _, _)));
        assert!(matches!(Theme::PANEL_BG, Color::Rgb(_, _, _)));
    }

    #[test]
    fn test_author_colors_are_distinct() {
        assert_eq!(Theme::author_color(Author::Bot), Theme::BLUE);
        assert_eq!(Theme::author_color(Author::User), Theme::PURPLE);
        assert_eq!(Theme::author_color(Author::System), Theme::MUTED);
    }

    #[test]
    fn test_body_styles() {
        assert_eq!(Theme::body(false).fg, Some(Theme::FG));
        assert_eq!(Theme::body(true).fg, Some(Theme::RED));
        assert_eq!(Theme::body(true).bg, Some(Theme::BG));
    }
}
