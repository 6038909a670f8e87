// src/roster/ident.rs

/// Canonical comparison key for a DNI-like identifier.
///
/// - outer whitespace is trimmed
/// - one trailing `".0"` is dropped (numbers exported from a numeric column)
/// - grouping separators (`.` and any whitespace) are removed
///
/// Total and idempotent: the result contains no `.` and no whitespace, so a
/// second pass has nothing left to strip. Empty input gives `""`, which never
/// counts as a match.
pub fn normalize_id(raw: &str) -> String {
    let t = raw.trim();
    let t = t.strip_suffix(".0").unwrap_or(t);
    t.chars().filter(|c| *c != '.' && !c.is_whitespace()).collect()
}
