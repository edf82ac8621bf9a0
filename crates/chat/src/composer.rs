/// Draft text for the next message, with a cursor.
///
/// The cursor is a byte offset that always sits on a char boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Composer {
    buffer: String,
    cursor: usize,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// True when submitting would do nothing
    pub fn is_blank(&self) -> bool {
        self.buffer.trim().is_empty()
    }

    pub fn insert_char(&mut self, c: char) {
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn insert_str(&mut self, s: &str) {
        self.buffer.insert_str(self.cursor, s);
        self.cursor += s.len();
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
        self.cursor = self.buffer.len();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.buffer.remove(prev);
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.buffer.len() {
            self.buffer.remove(self.cursor);
        }
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.cursor = prev;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(c) = self.buffer[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.buffer.len();
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    /// Take the draft for sending.
    ///
    /// Blank drafts stay in place and yield `None`. Otherwise the draft is
    /// cleared before this returns, so the same text cannot be submitted
    /// twice. The text is returned exactly as typed.
    pub fn submit(&mut self) -> Option<String> {
        if self.is_blank() {
            return None;
        }
        self.cursor = 0;
        Some(std::mem::take(&mut self.buffer))
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.buffer[..self.cursor].char_indices().next_back().map(|(i, _)| i)
    }
}
