use banter_chat::Composer;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io::Result;

/// What a key press asks the app to do beyond editing the draft
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Hand the draft to the delivery pipeline
    Submit,
    Exit,
    PageUp,
    PageDown,
}

/// Event handler for the TUI application
pub struct EventHandler;

impl EventHandler {
    /// Read a single event from the terminal
    pub fn read() -> Result<Option<Event>> {
        match crossterm::event::poll(std::time::Duration::from_millis(100)) {
            Ok(true) => Ok(Some(crossterm::event::read()?)),
            _ => Ok(None),
        }
    }

    /// Apply a key press to the composer; returns an action when the key
    /// means more than an edit
    pub fn handle_key_event(event: KeyEvent, composer: &mut Composer) -> Option<KeyAction> {
        if event.kind != KeyEventKind::Press {
            return None;
        }

        let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
        match event.code {
            KeyCode::Enter => return Some(KeyAction::Submit),
            KeyCode::Esc => return Some(KeyAction::Exit),
            KeyCode::PageUp => return Some(KeyAction::PageUp),
            KeyCode::PageDown => return Some(KeyAction::PageDown),
            KeyCode::Char('c') if ctrl => return Some(KeyAction::Exit),
            KeyCode::Char('u') if ctrl => return Some(KeyAction::PageUp),
            KeyCode::Char('d') if ctrl => return Some(KeyAction::PageDown),
            KeyCode::Char('a') if ctrl => composer.move_home(),
            KeyCode::Char('e') if ctrl => composer.move_end(),
            KeyCode::Char(_) if ctrl => {}
            KeyCode::Char(c) => composer.insert_char(c),
            KeyCode::Backspace => composer.backspace(),
            KeyCode::Delete => composer.delete(),
            KeyCode::Left => composer.move_left(),
            KeyCode::Right => composer.move_right(),
            KeyCode::Home => composer.move_home(),
            KeyCode::End => composer.move_end(),
            _ => {}
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_typing_edits_composer() {
        let mut composer = Composer::new();
        for c in "hey".chars() {
            assert_eq!(EventHandler::handle_key_event(key(KeyCode::Char(c)), &mut composer), None);
        }
        EventHandler::handle_key_event(key(KeyCode::Backspace), &mut composer);
        assert_eq!(composer.text(), "he");

        EventHandler::handle_key_event(ctrl('a'), &mut composer);
        EventHandler::handle_key_event(key(KeyCode::Char('t')), &mut composer);
        assert_eq!(composer.text(), "the");
    }

    #[test]
    fn test_actions() {
        let mut composer = Composer::new();
        assert_eq!(EventHandler::handle_key_event(key(KeyCode::Enter), &mut composer), Some(KeyAction::Submit));
        assert_eq!(EventHandler::handle_key_event(key(KeyCode::Esc), &mut composer), Some(KeyAction::Exit));
        assert_eq!(EventHandler::handle_key_event(ctrl('c'), &mut composer), Some(KeyAction::Exit));
        assert_eq!(EventHandler::handle_key_event(key(KeyCode::PageUp), &mut composer), Some(KeyAction::PageUp));
        assert_eq!(EventHandler::handle_key_event(ctrl('d'), &mut composer), Some(KeyAction::PageDown));
    }

    #[test]
    fn test_control_chars_are_not_inserted() {
        let mut composer = Composer::new();
        EventHandler::handle_key_event(ctrl('x'), &mut composer);
        assert!(composer.text().is_empty());
    }

    #[test]
    fn test_release_events_are_ignored() {
        let mut composer = Composer::new();
        let mut event = key(KeyCode::Char('a'));
        event.kind = KeyEventKind::Release;
        assert_eq!(EventHandler::handle_key_event(event, &mut composer), None);
        assert!(composer.text().is_empty());
    }
}
