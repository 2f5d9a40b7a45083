//! MAC and IP address normalization.
//!
//! Every write path and the fingerprint report run raw identity fields
//! through these functions, so uniqueness checks and reporting always
//! compare the same canonical form. Both functions are total: they never
//! reject input.

/// Normalize an IP address string.
///
/// Trims surrounding whitespace only; no structural validation is applied.
/// Missing or empty input normalizes to an empty string.
pub fn normalize_ip(raw: Option<&str>) -> String {
    raw.unwrap_or_default().trim().to_string()
}

/// Normalize a MAC address into canonical `AA:BB:CC:DD:EE:FF` form.
///
/// The input is trimmed and uppercased, then every character outside
/// `0-9A-F` is stripped. If exactly 12 hex digits remain they are re-grouped
/// with a `:` every two characters. Anything else is returned as the
/// trimmed, uppercased original: malformed values are preserved verbatim so
/// operators can see and correct them instead of losing data.
pub fn normalize_mac(raw: Option<&str>) -> String {
    let raw = raw.unwrap_or_default().trim().to_uppercase();
    if raw.is_empty() {
        return String::new();
    }
    let hex: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, 'A'..='F'))
        .collect();
    if hex.len() == 12 {
        let mut out = String::with_capacity(17);
        for (i, pair) in hex.as_bytes().chunks(2).enumerate() {
            if i > 0 {
                out.push(':');
            }
            out.push(pair[0] as char);
            out.push(pair[1] as char);
        }
        return out;
    }
    raw
}
