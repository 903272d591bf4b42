//! Display truncation and wrapping. All lengths count characters, not bytes.

const ELLIPSIS: &str = "...";

/// Width of one line when truncating post bodies.
pub const LINE_WIDTH: usize = 33;

/// Keep at most `max` characters, appending `...` when anything was cut.
pub fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        None => text.to_string(),
        Some((cut, _)) => format!("{}{ELLIPSIS}", &text[..cut]),
    }
}

/// Like [`truncate`], but trims trailing whitespace before the ellipsis.
pub fn truncate_trimmed(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        None => text.to_string(),
        Some((cut, _)) => format!("{}{ELLIPSIS}", text[..cut].trim_end()),
    }
}

/// Truncate to what fits in `lines` lines of [`LINE_WIDTH`] characters.
pub fn truncate_lines(text: &str, lines: usize) -> String {
    truncate_trimmed(text, lines * LINE_WIDTH)
}

/// Greedy word wrap into rows of at most `width` characters.
///
/// Runs of whitespace collapse to one space. Words longer than a row are
/// split. Blank input yields one empty row.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    let mut row = String::new();
    let mut row_len = 0;

    for word in text.split_whitespace() {
        let mut rest = word;
        let mut rest_len = word.chars().count();
        if row_len > 0 && row_len + 1 + rest_len <= width {
            row.push(' ');
            row.push_str(rest);
            row_len += 1 + rest_len;
            continue;
        }
        if row_len > 0 {
            rows.push(std::mem::take(&mut row));
        }
        while rest_len > width {
            let cut = rest
                .char_indices()
                .nth(width)
                .map_or(rest.len(), |(i, _)| i);
            rows.push(rest[..cut].to_string());
            rest = &rest[cut..];
            rest_len -= width;
        }
        row.push_str(rest);
        row_len = rest_len;
    }

    if row_len > 0 || rows.is_empty() {
        rows.push(row);
    }
    rows
}
