use super::types::Syntax;

/// Check if line is a comment
pub fn is_comment(line: &str, syntax: &Syntax) -> bool {
    let trimmed = line.trim_start();
    syntax
        .comment_markers
        .iter()
        .any(|marker| trimmed.starts_with(marker.as_str()))
}

/// A line holding nothing but an opening delimiter.
pub fn is_bare_open(line: &str, syntax: &Syntax) -> bool {
    let mut chars = line.trim().chars();
    chars.next() == Some(syntax.open) && chars.next().is_none()
}

pub fn is_bare_close(line: &str, syntax: &Syntax) -> bool {
    let mut chars = line.trim().chars();
    chars.next() == Some(syntax.close) && chars.next().is_none()
}

/// Count (opening, closing) delimiters on a line. Comment lines count nothing.
pub fn delimiter_counts(line: &str, syntax: &Syntax) -> (usize, usize) {
    if is_comment(line, syntax) {
        return (0, 0);
    }

    let mut opens = 0usize;
    let mut closes = 0usize;
    for ch in line.chars() {
        if ch == syntax.open {
            opens += 1;
        } else if ch == syntax.close {
            closes += 1;
        }
    }
    (opens, closes)
}

/// Net delimiter delta for a line
pub fn delimiter_delta(line: &str, syntax: &Syntax) -> i64 {
    let (opens, closes) = delimiter_counts(line, syntax);
    opens as i64 - closes as i64
}

/// Does the trimmed line start with `key:`?
pub fn starts_with_property(line: &str, key: &str) -> bool {
    line.trim_start()
        .strip_prefix(key)
        .map_or(false, |rest| rest.starts_with(':'))
}

fn is_ident_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '$'
}

/// Value of the first `key: 'value'` (or double-quoted) occurrence on the line.
///
/// `key` must start at a word boundary, so `id` does not match inside
/// `guid`. The value runs up to the next quote of either kind.
pub fn quoted_property<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let mut search_from = 0usize;

    while let Some(found) = line[search_from..].find(key) {
        let at = search_from + found;
        search_from = at + key.len();

        let boundary = line[..at].chars().next_back().map_or(true, |c| !is_ident_char(c));
        if !boundary {
            continue;
        }

        let rest = &line[at + key.len()..];
        let Some(rest) = rest.strip_prefix(':') else {
            continue;
        };
        let rest = rest.trim_start();
        let mut chars = rest.chars();
        match chars.next() {
            Some('\'') | Some('"') => {}
            _ => continue,
        }

        let body = &rest[1..];
        if let Some(close) = body.find(['\'', '"']) {
            return Some(&body[..close]);
        }
    }

    None
}

/// Trimmed comment that mentions `word`, ignoring case.
pub fn comment_mentions(line: &str, word: &str, syntax: &Syntax) -> bool {
    is_comment(line, syntax) && line.to_lowercase().contains(&word.to_lowercase())
}
