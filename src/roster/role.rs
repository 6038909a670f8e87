// src/roster/role.rs
use serde::Serialize;

use crate::core::sanitize::fold_accents;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleCategory {
    Leadership,
    Delegate,
    Ordinary,
}

impl RoleCategory {
    pub fn label(&self) -> &'static str {
        match self {
            RoleCategory::Leadership => "Comisión Directiva",
            RoleCategory::Delegate => "Delegado",
            RoleCategory::Ordinary => "Afiliado",
        }
    }
}

/// Keyword families in priority order; the first family with a hit wins.
/// Keywords are stored folded (lowercase, no accents).
const ROLE_KEYWORDS: &[(RoleCategory, &[&str])] = &[
    (RoleCategory::Leadership, &["comision", "directiva", "directivo"]),
    (RoleCategory::Delegate, &["delegado", "delegada"]),
];

/// Case- and accent-insensitive substring match against `ROLE_KEYWORDS`.
pub fn classify_role(role_text: &str) -> RoleCategory {
    let folded = fold_accents(role_text);
    ROLE_KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|w| folded.contains(w)))
        .map(|(cat, _)| *cat)
        .unwrap_or(RoleCategory::Ordinary)
}
