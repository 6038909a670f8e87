// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use super::consts::*;

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AppOptions {
    pub sources: SourceOptions,
    pub cache: CacheOptions,
    pub admin: AdminOptions,
    pub export: ExportOptions,
}

/// Where the two roster tables come from. Either an `http://` URL,
/// a `file://` URL or a plain filesystem path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceOptions {
    pub members: String,
    pub family: String,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            members: s!(DEFAULT_MEMBERS_SOURCE),
            family: s!(DEFAULT_FAMILY_SOURCE),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheOptions {
    pub ttl_secs: u64,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self { ttl_secs: DEFAULT_TTL_SECS }
    }
}

impl CacheOptions {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdminOptions {
    pub password: String,
}

impl Default for AdminOptions {
    fn default() -> Self {
        Self { password: s!(DEFAULT_ADMIN_PASSWORD) }
    }
}

impl AdminOptions {
    /// Plain string compare. An empty configured key never unlocks.
    pub fn accepts(&self, candidate: &str) -> bool {
        !self.password.is_empty() && candidate == self.password
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv" }
    }
    pub fn delim(&self) -> char {
        match self { ExportFormat::Csv => ',', ExportFormat::Tsv => '\t' }
    }
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Some(ExportFormat::Csv),
            "tsv" => Some(ExportFormat::Tsv),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub dir: PathBuf,
    /// Explicit output file; when set it wins over `dir` + member id.
    pub file: Option<PathBuf>,
    pub include_headers: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            dir: PathBuf::from(DEFAULT_EXPORT_DIR),
            file: None,
            include_headers: true,
        }
    }
}

impl ExportOptions {
    /// `<dir>/<member_id>.<ext>` unless an explicit file was given.
    /// Only ASCII letters and digits of the id make it into the file name.
    pub fn out_path(&self, member_id: &str) -> PathBuf {
        if let Some(file) = &self.file {
            return file.clone();
        }
        let stem: String = member_id.chars().filter(char::is_ascii_alphanumeric).collect();
        let stem = if stem.is_empty() { "credencial" } else { stem.as_str() };
        self.dir.join(join!(stem, ".", self.format.ext()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_key_is_exact_and_never_empty() {
        let admin = AdminOptions::default();
        assert!(admin.accepts("stvp2025"));
        assert!(!admin.accepts("STVP2025"));
        assert!(!admin.accepts(""));

        let open = AdminOptions { password: s!() };
        assert!(!open.accepts(""));
    }

    #[test]
    fn export_path_uses_member_id_and_format() {
        let mut export = ExportOptions::default();
        assert_eq!(export.out_path("12345678"), PathBuf::from("out").join("12345678.csv"));

        export.format = ExportFormat::Tsv;
        assert_eq!(export.out_path("12345678"), PathBuf::from("out").join("12345678.tsv"));

        export.file = Some(PathBuf::from("mine.txt"));
        assert_eq!(export.out_path("12345678"), PathBuf::from("mine.txt"));
    }

    #[test]
    fn export_path_stays_inside_export_dir() {
        let export = ExportOptions::default();
        let dir = PathBuf::from("out");
        assert_eq!(export.out_path("/tmp/escape"), dir.join("tmpescape.csv"));
        assert_eq!(export.out_path("..\\..\\x"), dir.join("x.csv"));
        assert_eq!(export.out_path("../"), dir.join("credencial.csv"));
        assert_eq!(export.out_path(""), dir.join("credencial.csv"));
        for id in ["/tmp/escape", "../../etc/passwd", "C:\\x"] {
            assert_eq!(export.out_path(id).parent(), Some(dir.as_path()));
        }
    }
}
