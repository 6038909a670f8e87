// src/config/settings.rs
//
// `key=value` settings file. Missing file or unreadable lines fall back to
// defaults; unknown keys are ignored so older builds can read newer files.
use std::{fs, io, path::{Path, PathBuf}};

use super::options::{AppOptions, ExportFormat};

pub fn load(path: &Path) -> AppOptions {
    if !path.exists() {
        logd!("Settings: {} not found, using defaults", path.display());
        return AppOptions::default();
    }
    match fs::read_to_string(path) {
        Ok(text) => parse(&text),
        Err(e) => {
            loge!("Settings: could not read {}: {}", path.display(), e);
            AppOptions::default()
        }
    }
}

pub fn parse(text: &str) -> AppOptions {
    let mut opts = AppOptions::default();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') { continue; }
        let Some((key, val)) = line.split_once('=') else { continue };
        let (key, val) = (key.trim(), val.trim());
        match key {
            "members" => opts.sources.members = val.to_string(),
            "family" => opts.sources.family = val.to_string(),
            "ttl_secs" => {
                if let Ok(v) = val.parse::<u64>() { opts.cache.ttl_secs = v; }
            }
            "admin_password" => opts.admin.password = val.to_string(),
            "export_dir" => opts.export.dir = PathBuf::from(val),
            "export_format" => {
                if let Some(f) = ExportFormat::parse(val) { opts.export.format = f; }
            }
            "include_headers" => opts.export.include_headers = parse_bool(val),
            _ => {}
        }
    }
    opts
}

fn parse_bool(val: &str) -> bool {
    val == "1" || val.eq_ignore_ascii_case("true") || val.eq_ignore_ascii_case("yes")
}

pub fn render(opts: &AppOptions) -> String {
    let mut s = s!();
    s.push_str(&format!("members={}\n", opts.sources.members));
    s.push_str(&format!("family={}\n", opts.sources.family));
    s.push_str(&format!("ttl_secs={}\n", opts.cache.ttl_secs));
    s.push_str(&format!("admin_password={}\n", opts.admin.password));
    s.push_str(&format!("export_dir={}\n", opts.export.dir.display()));
    s.push_str(&format!("export_format={}\n", opts.export.format.ext()));
    s.push_str(&format!("include_headers={}\n", if opts.export.include_headers { 1 } else { 0 }));
    s
}

pub fn save(path: &Path, opts: &AppOptions) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, render(opts))
}
