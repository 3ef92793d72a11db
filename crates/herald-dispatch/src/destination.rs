//! Destination normalization

/// Server suffix identifying a group chat.
pub const GROUP_SUFFIX: &str = "@g.us";

/// Normalize one raw destination identifier.
///
/// Trims surrounding whitespace and applies the group-suffix convention
/// when the ID carries no server part. Idempotent: an already-normalized
/// ID passes through unchanged. Empty input normalizes to nothing.
pub fn normalize(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.contains('@') {
        Some(trimmed.to_string())
    } else {
        Some(format!("{trimmed}{GROUP_SUFFIX}"))
    }
}

/// Normalize a caller-supplied destination list.
///
/// Order is preserved and duplicates are kept; callers may target the same
/// destination twice on purpose. Entries that normalize to nothing are
/// dropped.
pub fn normalize_all(raw: &[String]) -> Vec<String> {
    raw.iter().filter_map(|r| normalize(r)).collect()
}
