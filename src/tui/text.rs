//! Width math for terminal rows. Widths are counted in chars.

pub fn visible_width(s: &str) -> usize {
    s.chars().count()
}

/// Last `max_len` characters of `s` on one line, newlines flattened to
/// spaces, with a leading `...` when anything was cut.
pub fn tail_single_line(s: &str, max_len: usize) -> String {
    let flat: Vec<char> = s
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    if flat.len() <= max_len {
        return flat.into_iter().collect();
    }
    let tail: String = flat[flat.len() - max_len..].iter().collect();
    format!("...{tail}")
}

/// Clip a string to at most `max_width` visible characters.
pub fn clip_to_width(s: &str, max_width: usize) -> String {
    s.chars().take(max_width).collect()
}

/// Greedy word wrap of one line into rows of at most `max_width` chars.
///
/// Rows break at the last space that fits; a word longer than a whole row is
/// split mid-word. Spaces at a break are dropped.
pub fn wrap_for_block(line: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 {
        return Vec::new();
    }
    let mut rows = Vec::new();
    let mut rest: &str = line;
    while visible_width(rest) > max_width {
        let cut = rest
            .char_indices()
            .nth(max_width)
            .map_or(rest.len(), |(i, _)| i);
        let row_end = if rest[cut..].starts_with(char::is_whitespace) {
            cut
        } else {
            match rest[..cut].rfind(char::is_whitespace) {
                Some(space) if !rest[..space].trim().is_empty() => space,
                _ => cut,
            }
        };
        let (row, tail) = rest.split_at(row_end);
        rows.push(row.trim_end().to_string());
        rest = tail.trim_start();
    }
    if !rest.is_empty() || rows.is_empty() {
        rows.push(rest.to_string());
    }
    rows
}
