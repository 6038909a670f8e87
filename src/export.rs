// src/export.rs
//
// Card export: the member row followed by one row per dependent.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    config::options::ExportOptions,
    core::csv::rows_to_string,
    roster::{Dependent, Member},
};

pub const CARD_HEADERS: [&str; 7] = ["Tipo", "DNI", "Nombre", "Vínculo", "Cargo", "Vence", "Foto"];

/// Headers + rows for one card.
pub fn card_table(member: &Member, dependents: &[Dependent]) -> (Vec<String>, Vec<Vec<String>>) {
    let headers = CARD_HEADERS.iter().map(|h| s!(*h)).collect();

    let mut rows = Vec::with_capacity(1 + dependents.len());
    rows.push(vec![
        s!("Titular"),
        member.id.clone(),
        member.full_name.clone(),
        s!(),
        member.title().to_string(),
        member.expires_label().to_string(),
        member.photo_url.clone().unwrap_or_default(),
    ]);
    for d in dependents {
        rows.push(vec![
            s!("Familiar"),
            d.dependent_id.clone().unwrap_or_default(),
            d.full_name.clone(),
            d.relationship.clone().unwrap_or_default(),
            s!(),
            s!(),
            d.photo_url.clone().unwrap_or_default(),
        ]);
    }
    (headers, rows)
}

pub fn to_export_string(
    headers: &[String],
    rows: &[Vec<String>],
    include_headers: bool,
    sep: char,
) -> String {
    let headers = if include_headers { Some(headers) } else { None };
    rows_to_string(headers, rows, sep)
}

/// Write the card to `<dir>/<dni>.<ext>` (or the explicit file) and return the path.
pub fn write_card(
    export: &ExportOptions,
    member: &Member,
    dependents: &[Dependent],
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let path = export.out_path(&member.id);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }

    let (headers, rows) = card_table(member, dependents);
    let contents = to_export_string(&headers, &rows, export.include_headers, export.format.delim());
    fs::write(&path, contents)?;
    logf!("Export: {} ({} rows)", path.display(), rows.len());
    Ok(path)
}

pub fn ensure_directory(dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if dir.exists() && !dir.is_dir() {
        return Err(format!("Path exists but is not a directory: {}", dir.display()).into());
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}
