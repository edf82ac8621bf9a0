use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Calculated layout for the chat screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatLayout {
    /// Header area (1 line)
    pub header: Rect,
    /// Main transcript area
    pub transcript: Rect,
    /// Input box (3 lines including border)
    pub input: Rect,
}

impl ChatLayout {
    pub fn calculate(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0), Constraint::Length(3)])
            .split(area);

        Self { header: chunks[0], transcript: chunks[1], input: chunks[2] }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_splits_vertically() {
        let layout = ChatLayout::calculate(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.header.height, 1);
        assert_eq!(layout.input.height, 3);
        assert_eq!(layout.transcript.height, 20);
        assert_eq!(layout.transcript.y, 1);
        assert_eq!(layout.input.y, 21);
    }

    #[test]
    fn test_tiny_terminal() {
        let layout = ChatLayout::calculate(Rect::new(0, 0, 20, 3));
        assert!(layout.header.height + layout.transcript.height + layout.input.height <= 3);
    }
}
