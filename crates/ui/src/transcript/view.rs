use banter_core::{Revision, Transcript};

/// Scroll state for the transcript pane.
///
/// `scroll_offset` counts lines up from the bottom; 0 follows the newest
/// message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranscriptView {
    scroll_offset: usize,
    seen_revision: Revision,
    seen_len: usize,
}

impl TranscriptView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take note of a new snapshot. Jumps to the bottom when messages were
    /// appended since the last one. Returns whether anything changed.
    pub fn sync(&mut self, transcript: &Transcript) -> bool {
        if transcript.revision() == self.seen_revision && transcript.len() == self.seen_len {
            return false;
        }
        if transcript.len() > self.seen_len {
            self.scroll_to_bottom();
        }
        self.seen_revision = transcript.revision();
        self.seen_len = transcript.len();
        true
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = 0;
    }

    pub fn scroll_up(&mut self, lines: usize, max: usize) {
        self.scroll_offset = self.scroll_offset.saturating_add(lines).min(max);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    /// Keep the offset within a (possibly shrunk) viewport
    pub fn clamp(&mut self, max: usize) {
        self.scroll_offset = self.scroll_offset.min(max);
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn is_at_bottom(&self) -> bool {
        self.scroll_offset == 0
    }
}
