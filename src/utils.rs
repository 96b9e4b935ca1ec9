use regex::Regex;
use std::sync::OnceLock;

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)^[a-z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?(?:\.[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?)*$"
        ).unwrap()
    })
}

/// Checks a string against the practical email grammar (the WHATWG/HTML5
/// input validation pattern): dotted labels of at most 63 characters on the
/// domain side, no quoted local parts.
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    email_regex().is_match(value)
}

/// Converts the 1-based line and column reported by the JSON parser into a
/// byte offset into the source text, clamped to the text length. Only called
/// on the error path, so the linear scan is acceptable.
#[must_use]
pub fn offset_of_line_column(source: &str, line: usize, column: usize) -> usize {
    let mut remaining = line.saturating_sub(1);
    let mut line_start = 0;
    for (i, c) in source.char_indices() {
        if remaining == 0 {
            break;
        }
        if c == '\n' {
            remaining -= 1;
            line_start = i + 1;
        }
    }
    (line_start + column.saturating_sub(1)).min(source.len())
}
