//! Asset-id prefixes and sequential suffix generation.
//!
//! Asset ids follow the `PREFIX-NNN` format, where the prefix is derived
//! from the asset type and the numeric suffix is issued monotonically per
//! prefix from the used-id ledger: the next suffix is always one past the
//! highest ever issued, even when the asset holding that id was deleted.

/// Maximum length of a derived prefix.
const PREFIX_LEN: usize = 3;

/// Zero-padding width of the numeric suffix.
const SUFFIX_WIDTH: usize = 3;

/// Derive an id prefix from a raw asset type.
///
/// Keeps only ASCII alphanumerics, uppercased and truncated to three
/// characters. Returns `None` when nothing usable remains.
pub fn sanitize_prefix(raw_type: &str) -> Option<String> {
    let prefix: String = raw_type
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(PREFIX_LEN)
        .collect::<String>()
        .to_ascii_uppercase();
    if prefix.is_empty() {
        None
    } else {
        Some(prefix)
    }
}

/// Parse the numeric suffix out of `PREFIX-NNN`, if `id` matches exactly.
pub fn parse_suffix(prefix: &str, id: &str) -> Option<u32> {
    let rest = id.strip_prefix(prefix)?.strip_prefix('-')?;
    if rest.is_empty() || !rest.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    rest.parse().ok()
}

/// Compute the next id for `prefix` given every id ever used.
///
/// Ids that do not match `PREFIX-NNN` are ignored. With no matches the
/// sequence starts at 1.
pub fn next_id<'a, I>(prefix: &str, used: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let next = used
        .into_iter()
        .filter_map(|id| parse_suffix(prefix, id))
        .max()
        .map_or(1, |n| n + 1);
    format!("{prefix}-{next:0width$}", width = SUFFIX_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_filters_and_truncates() {
        assert_eq!(sanitize_prefix("Laptop").as_deref(), Some("LAP"));
        assert_eq!(sanitize_prefix("a-c").as_deref(), Some("AC"));
        assert_eq!(sanitize_prefix("--").is_none(), true);
    }

    #[test]
    fn suffix_parsing_is_strict() {
        assert_eq!(parse_suffix("LAP", "LAP-001"), Some(1));
        assert_eq!(parse_suffix("LAP", "LAP-042"), Some(42));
        assert_eq!(parse_suffix("LAP", "LAP-"), None);
        assert_eq!(parse_suffix("LAP", "LAP-12x"), None);
        assert_eq!(parse_suffix("LAP", "SRV-001"), None);
    }

    #[test]
    fn next_id_is_max_plus_one() {
        let used = ["LAP-001", "LAP-007", "SRV-099", "LAP-bad"];
        assert_eq!(next_id("LAP", used.iter().copied()), "LAP-008");
    }

    #[test]
    fn next_id_starts_at_one() {
        assert_eq!(next_id("LAP", std::iter::empty()), "LAP-001");
    }

    #[test]
    fn next_id_survives_wide_suffixes() {
        assert_eq!(next_id("LAP", ["LAP-999"].iter().copied()), "LAP-1000");
    }
}
