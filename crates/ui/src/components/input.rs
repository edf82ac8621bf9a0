use crate::theme::Theme;

use banter_chat::Composer;
use ratatui::{
    Frame,
    layout::{Position, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Bordered single-line input showing the composer draft
pub struct InputBox<'a> {
    composer: &'a Composer,
    placeholder: String,
}

impl<'a> InputBox<'a> {
    pub fn new(composer: &'a Composer, bot_name: &str) -> Self {
        Self { composer, placeholder: format!("Chat with {}...", bot_name) }
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let block = Block::default().borders(Borders::ALL).border_style(Theme::border()).style(Theme::panel());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let line = if self.composer.text().is_empty() {
            Line::from(Span::styled(self.placeholder.clone(), Theme::muted().bg(Theme::PANEL_BG)))
        } else {
            let (visible, _) = self.window(inner.width as usize);
            Line::from(Span::styled(visible.to_string(), Theme::panel()))
        };
        frame.render_widget(Paragraph::new(line).style(Theme::panel()), inner);
    }

    /// Where the terminal cursor belongs for this draft
    pub fn cursor_position(&self, area: Rect) -> Position {
        let inner = Block::default().borders(Borders::ALL).inner(area);
        let (_, column) = self.window(inner.width as usize);
        Position::new(inner.x + column as u16, inner.y)
    }

    /// The part of the draft that fits in `width` columns with the cursor
    /// visible, and the cursor's column within it
    fn window(&self, width: usize) -> (&str, usize) {
        let text = self.composer.text();
        let before = &text[..self.composer.cursor()];
        if width == 0 {
            return ("", 0);
        }

        let mut start = 0;
        let mut cursor_col = before.width();
        for c in before.chars() {
            if cursor_col < width {
                break;
            }
            start += c.len_utf8();
            cursor_col -= c.width().unwrap_or(0);
        }
        (&text[start..], cursor_col)
    }
}
