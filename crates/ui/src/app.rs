mod event_loop;

use crate::components::{Header, InputBox};
use crate::event_handler::{EventHandler, KeyAction};
use crate::layout::ChatLayout;
use crate::transcript::{TranscriptRenderer, TranscriptView};

use banter_chat::{Composer, DeliveryPipeline};
use banter_core::{SessionProvider, Transcript};
use crossterm::event::Event;
use ratatui::{Frame, layout::Rect};
use std::io::Result;
use std::sync::Arc;
use tokio::sync::watch;

/// Main TUI application
///
/// Owns the draft and the scroll state; the transcript itself lives in the
/// pipeline's store and is mirrored here from its watch channel.
pub struct App {
    pipeline: DeliveryPipeline,
    session: Arc<dyn SessionProvider>,
    bot_name: String,
    composer: Composer,
    view: TranscriptView,
    transcript: Transcript,
    updates: watch::Receiver<Transcript>,
    transcript_area: Rect,
    should_exit: bool,
}

impl App {
    pub fn new(pipeline: DeliveryPipeline, session: Arc<dyn SessionProvider>, bot_name: impl Into<String>) -> Self {
        let mut updates = pipeline.store().subscribe();
        let transcript = updates.borrow_and_update().clone();
        let mut view = TranscriptView::new();
        view.sync(&transcript);

        Self {
            pipeline,
            session,
            bot_name: bot_name.into(),
            composer: Composer::new(),
            view,
            transcript,
            updates,
            transcript_area: Rect::default(),
            should_exit: false,
        }
    }

    pub fn pipeline(&self) -> &DeliveryPipeline {
        &self.pipeline
    }

    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    pub fn composer_mut(&mut self) -> &mut Composer {
        &mut self.composer
    }

    /// Last snapshot pulled from the store
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn view(&self) -> &TranscriptView {
        &self.view
    }

    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    /// Run the terminal UI until the user quits
    pub async fn run(&mut self) -> Result<()> {
        event_loop::run(self).await
    }

    /// Pull the newest snapshot from the store; true if it differed
    pub fn refresh(&mut self) -> bool {
        self.transcript = self.updates.borrow_and_update().clone();
        self.view.sync(&self.transcript)
    }

    pub fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event
            && let Some(action) = EventHandler::handle_key_event(key, &mut self.composer)
        {
            self.handle_action(action);
        }
    }

    pub fn handle_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Submit => {
                if self.pipeline.submit_draft(&mut self.composer).is_some() {
                    self.refresh();
                }
            }
            KeyAction::Exit => self.should_exit = true,
            KeyAction::PageUp => {
                let renderer = TranscriptRenderer::new(self.transcript.messages(), &self.bot_name);
                let max = renderer.max_scroll(self.transcript_area);
                self.view.scroll_up(self.page(), max);
            }
            KeyAction::PageDown => self.view.scroll_down(self.page()),
        }
    }

    /// Draw the whole screen
    pub fn render(&mut self, frame: &mut Frame<'_>) {
        let layout = ChatLayout::calculate(frame.area());
        self.transcript_area = layout.transcript;

        let identity = self.session.current_identity();
        Header::new(&self.bot_name, identity.as_ref()).render(frame, layout.header);

        let renderer = TranscriptRenderer::new(self.transcript.messages(), &self.bot_name);
        self.view.clamp(renderer.max_scroll(layout.transcript));
        renderer.with_scroll_offset(self.view.scroll_offset()).render(frame, layout.transcript);

        let input = InputBox::new(&self.composer, &self.bot_name);
        input.render(frame, layout.input);
        frame.set_cursor_position(input.cursor_position(layout.input));
    }

    /// Stop the store from taking late completions
    pub fn shutdown(&self) {
        self.pipeline.store().tear_down();
    }

    fn page(&self) -> usize {
        (self.transcript_area.height as usize).saturating_sub(1).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use banter_core::{Anonymous, Message, MessageId, TranscriptStore};
    use banter_providers::MockBackend;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn create_test_app(messages: usize) -> App {
        let store = TranscriptStore::seeded(
            (0..messages).map(|n| Message::system(MessageId::new(format!("s{}", n)), 0, format!("note {}", n))).collect(),
        );
        let pipeline = DeliveryPipeline::new(store, Arc::new(MockBackend::new(vec![])), Arc::new(Anonymous));
        let mut app = App::new(pipeline, Arc::new(Anonymous), "bot");
        app.transcript_area = Rect::new(0, 1, 40, 10);
        app
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    #[test]
    fn test_new_app_mirrors_store() {
        let app = create_test_app(2);
        assert_eq!(app.transcript().len(), 2);
        assert!(app.view().is_at_bottom());
        assert!(!app.should_exit());
    }

    #[test]
    fn test_escape_exits() {
        let mut app = create_test_app(0);
        press(&mut app, KeyCode::Esc);
        assert!(app.should_exit());
    }

    #[test]
    fn test_paging_is_bounded() {
        let mut app = create_test_app(30);
        press(&mut app, KeyCode::PageUp);
        assert_eq!(app.view().scroll_offset(), 9);

        for _ in 0..100 {
            press(&mut app, KeyCode::PageUp);
        }
        let max = TranscriptRenderer::new(app.transcript().messages(), "bot").max_scroll(app.transcript_area);
        assert_eq!(app.view().scroll_offset(), max);

        press(&mut app, KeyCode::PageDown);
        assert_eq!(app.view().scroll_offset(), max - 9);
    }

    #[tokio::test]
    async fn test_submit_appends_and_scrolls_to_bottom() {
        let mut app = create_test_app(30);
        press(&mut app, KeyCode::PageUp);
        assert!(!app.view().is_at_bottom());

        for c in "hi".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);

        assert!(app.composer().text().is_empty());
        assert_eq!(app.transcript().len(), 31);
        assert!(app.view().is_at_bottom());
    }

    #[test]
    fn test_blank_enter_does_nothing() {
        let mut app = create_test_app(1);
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.transcript().len(), 1);
        assert_eq!(app.composer().text(), " ");
    }

    #[test]
    fn test_shutdown_tears_down_store() {
        let app = create_test_app(0);
        app.shutdown();
        assert!(app.pipeline().store().is_torn_down());
    }
}
