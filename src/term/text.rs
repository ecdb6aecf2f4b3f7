//! Text Measurement
//!
//! Display width in terminal cells, per `unicode-width`:
//! - ASCII printable: 1 cell
//! - CJK, most emoji: 2 cells
//! - Control and zero-width characters: 0 cells

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Measure the display width of a string in terminal cells.
pub fn string_width(s: &str) -> usize {
    s.width()
}

/// Truncate text to fit within `width` cells, ending with `…` when cut.
pub fn truncate_text(text: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    if string_width(text) <= width {
        return text.to_string();
    }

    // Leave room for the ellipsis
    let target_width = width - 1;
    let mut result = String::new();
    let mut current_width = 0;

    for c in text.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > target_width {
            break;
        }
        result.push(c);
        current_width += char_width;
    }

    result.push('…');
    result
}
