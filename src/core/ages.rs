//! Parsing for the comma-separated children ages field.

/// Split a comma-separated list of ages into integers.
///
/// Tokens are trimmed and read with leading-integer semantics: an optional
/// sign followed by digits, with anything after the digits ignored. Tokens
/// that yield no integer are dropped. Order and duplicates are preserved.
pub fn parse_children_ages(raw: &str) -> Vec<i64> {
    if raw.trim().is_empty() {
        return Vec::new();
    }

    raw.split(',').filter_map(parse_leading_int).collect()
}

/// Read the leading base-10 integer of `token`, ignoring surrounding
/// whitespace and any trailing characters.
///
/// Returns `None` when there are no leading digits or the value does not
/// fit in an `i64`.
pub fn parse_leading_int(token: &str) -> Option<i64> {
    let token = token.trim();
    let (negative, rest) = match token.as_bytes().first() {
        Some(b'-') => (true, &token[1..]),
        Some(b'+') => (false, &token[1..]),
        _ => (false, token),
    };

    let digits_len = rest
        .bytes()
        .take_while(|byte| byte.is_ascii_digit())
        .count();
    if digits_len == 0 {
        return None;
    }

    let digits = &rest[..digits_len];
    if negative {
        format!("-{digits}").parse().ok()
    } else {
        digits.parse().ok()
    }
}
