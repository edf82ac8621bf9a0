mod messages;
mod wrap;

use banter_core::{Author, Message};
use chrono::{DateTime, Local};
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Text},
    widgets::{Block, Paragraph},
};

use crate::theme::Theme;

/// Label shown next to each message. Bot messages carry the configured
/// bot name; the other two are fixed.
pub fn badge_label(author: Author, bot_name: &str) -> &str {
    match author {
        Author::Bot => bot_name,
        Author::User => "You",
        Author::System => "System",
    }
}

/// Projects a transcript into styled lines.
///
/// Holds no state of its own: the same messages, width and clock always
/// produce the same lines.
pub struct TranscriptRenderer<'a> {
    messages: &'a [Message],
    bot_name: &'a str,
    now: DateTime<Local>,
    scroll_offset: usize,
}

impl<'a> TranscriptRenderer<'a> {
    pub fn new(messages: &'a [Message], bot_name: &'a str) -> Self {
        Self { messages, bot_name, now: Local::now(), scroll_offset: 0 }
    }

    /// Reference time for calendar timestamps
    pub fn with_now(mut self, now: DateTime<Local>) -> Self {
        self.now = now;
        self
    }

    /// Lines scrolled up from the bottom (0 = newest visible)
    pub fn with_scroll_offset(mut self, offset: usize) -> Self {
        self.scroll_offset = offset;
        self
    }

    /// All transcript lines wrapped to `width` columns
    pub fn lines(&self, width: usize) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for (idx, message) in self.messages.iter().enumerate() {
            if idx > 0 {
                lines.push(Line::default());
            }
            self.render_message(message, width, &mut lines);
        }
        lines
    }

    /// Largest useful scroll offset for an area
    pub fn max_scroll(&self, area: Rect) -> usize {
        let total = self.lines(Self::content_width(area)).len();
        total.saturating_sub(area.height as usize)
    }

    /// Render the bottom of the transcript, shifted up by the scroll offset
    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let lines = self.lines(Self::content_width(area));
        let max_top = lines.len().saturating_sub(area.height as usize);
        let top = max_top - self.scroll_offset.min(max_top);

        frame.render_widget(Block::default().style(Theme::base()), area);

        let inner = Rect { x: area.x + 1, width: area.width.saturating_sub(2), ..area };
        let paragraph = Paragraph::new(Text::from(lines))
            .style(Theme::base())
            .scroll((u16::try_from(top).unwrap_or(u16::MAX), 0));
        frame.render_widget(paragraph, inner);
    }

    fn content_width(area: Rect) -> usize {
        area.width.saturating_sub(2) as usize
    }
}
