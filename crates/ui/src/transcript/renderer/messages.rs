use banter_core::{Author, Message};
use ratatui::text::{Line, Span};

use super::{badge_label, wrap::wrap_to_width};
use crate::{calendar::calendar_millis, theme::Theme};

impl<'a> super::TranscriptRenderer<'a> {
    /// Header line (marker, badge, timestamp) followed by the body behind an
    /// accent bar in the author's color
    pub(super) fn render_message(&self, message: &Message, width: usize, lines: &mut Vec<Line<'static>>) {
        let badge_style = Theme::badge(message.author);
        let marker = match message.author {
            Author::Bot => "◆ ",
            Author::User => "● ",
            Author::System => "• ",
        };

        let mut header = vec![
            Span::styled(marker, badge_style),
            Span::styled(badge_label(message.author, self.bot_name).to_string(), badge_style),
            Span::styled(format!("  {}", calendar_millis(message.sent_at, &self.now)), Theme::muted()),
        ];
        if message.failed_to_send {
            header.push(Span::styled("  not delivered", Theme::error()));
        }
        lines.push(Line::from(header));

        let accent_bar = Span::styled("┃ ", badge_style);
        let content_style = Theme::body(message.failed_to_send);
        let content_width = width.saturating_sub(2);

        for source_line in message.message.lines() {
            if source_line.trim().is_empty() {
                lines.push(Line::from(vec![accent_bar.clone()]));
                continue;
            }
            for wrapped in wrap_to_width(source_line, content_width) {
                lines.push(Line::from(vec![accent_bar.clone(), Span::styled(wrapped, content_style)]));
            }
        }
    }
}
