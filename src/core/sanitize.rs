// src/core/sanitize.rs
use unicode_normalization::UnicodeNormalization;

/// Collapse whitespace runs to a single space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Column label → canonical key: BOM and outer whitespace dropped,
/// lowercased, inner whitespace runs become a single `_`.
/// `"Apellido y Nombre "` → `"apellido_y_nombre"`
pub fn normalize_label(s: &str) -> String {
    let s = s.trim_start_matches('\u{feff}');
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.trim().chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push('_'); prev_space = true; }
        } else {
            out.extend(ch.to_lowercase());
            prev_space = false;
        }
    }
    out
}

/// Lowercase and drop diacritics: `"COMISIÓN"` → `"comision"`.
pub fn fold_accents(s: &str) -> String {
    s.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
}
