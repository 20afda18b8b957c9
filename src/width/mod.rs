//! Terminal display width helpers.
//!
//! ANSI-aware measuring and wrapping so text items size themselves in cells
//! rather than bytes.

/// Compute the display width of a string after stripping ANSI escapes.
pub fn display_width(text: &str) -> usize {
    let clean = strip_ansi_escapes::strip(text);
    let clean_str = String::from_utf8_lossy(&clean);
    unicode_width::UnicodeWidthStr::width(&*clean_str)
}

/// Widest line of `text` in display cells.
pub fn widest_line(text: &str) -> usize {
    text.split('\n').map(display_width).max().unwrap_or(0)
}

/// Greedy character wrap to `width` cells. Leading spaces on continuation
/// lines are dropped; blank input lines are kept.
pub fn wrap_to_width(content: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }

    let mut lines = Vec::new();
    for raw in content.split('\n') {
        if raw.is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current = String::new();
        for ch in raw.chars() {
            if current.is_empty() && ch == ' ' {
                continue;
            }
            current.push(ch);
            let display = display_width(&current);
            if display > width {
                current.pop();
                // A glyph wider than the whole line still gets a line.
                lines.push(std::mem::take(&mut current));
                current.push(ch);
            } else if display == width {
                lines.push(std::mem::take(&mut current));
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
    }

    lines
}
