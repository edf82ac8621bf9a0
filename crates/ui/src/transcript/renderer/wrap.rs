use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Greedy word wrap by display width. Words longer than `max_width` are
/// split at character boundaries. A width of 0 is treated as 1.
pub(super) fn wrap_to_width(text: &str, max_width: usize) -> Vec<String> {
    let max_width = max_width.max(1);
    let mut result = Vec::new();

    let mut current_line = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = word.width();
        let space_width = if current_line.is_empty() { 0 } else { 1 };

        if current_width + space_width + word_width > max_width {
            if !current_line.is_empty() {
                result.push(std::mem::take(&mut current_line));
                current_width = 0;
            }

            if word_width > max_width {
                let mut chunk = String::new();
                let mut chunk_width = 0;
                for ch in word.chars() {
                    let ch_width = ch.width().unwrap_or(0);
                    if chunk_width + ch_width > max_width && !chunk.is_empty() {
                        result.push(std::mem::take(&mut chunk));
                        chunk_width = 0;
                    }
                    chunk.push(ch);
                    chunk_width += ch_width;
                }
                current_width = chunk_width;
                current_line = chunk;
                continue;
            }
        }

        if !current_line.is_empty() {
            current_line.push(' ');
            current_width += 1;
        }
        current_line.push_str(word);
        current_width += word_width;
    }

    if !current_line.is_empty() {
        result.push(current_line);
    }

    result
}
