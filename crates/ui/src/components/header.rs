use crate::theme::Theme;

use banter_core::Identity;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Top bar: bot name on the left, session status on the right
pub struct Header<'a> {
    bot_name: &'a str,
    identity: Option<&'a Identity>,
}

impl<'a> Header<'a> {
    pub fn new(bot_name: &'a str, identity: Option<&'a Identity>) -> Self {
        Self { bot_name, identity }
    }

    /// Text of the session status section
    pub fn session_text(&self) -> String {
        match self.identity {
            Some(identity) => identity.describe(),
            None => "Not signed in (start with --name to sign in)".to_string(),
        }
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let sections = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Min(0)])
            .split(area);

        let title = Span::styled(
            self.bot_name.to_string(),
            Style::default().fg(Theme::BLUE).bg(Theme::BG).add_modifier(Modifier::BOLD),
        );
        let title = Paragraph::new(Line::from(vec![Span::styled(" ", Theme::base()), title])).style(Theme::base());
        frame.render_widget(title, sections[0]);

        let status_style = if self.identity.is_some() { Style::default().fg(Theme::GREEN) } else { Theme::muted() };
        let status = Paragraph::new(Line::from(Span::styled(format!("{} ", self.session_text()), status_style)))
            .style(Theme::base())
            .alignment(Alignment::Right);
        frame.render_widget(status, sections[1]);
    }
}
