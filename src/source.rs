// src/source.rs
//
// Where raw roster tables come from. One worker thread per table, results
// aggregated on the calling thread.

use std::{fs, path::PathBuf, sync::mpsc, thread};

use reqwest::Url;

use crate::{
    config::options::SourceOptions,
    core::{net::{http_get, parse_url}, BoxError},
    progress::Progress,
    roster::{RawTable, TableKind},
};

/// Anything that can hand out one raw table per kind.
pub trait RosterSource {
    fn fetch(&self, kind: TableKind) -> Result<RawTable, BoxError>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Location {
    Http(Url),
    File(PathBuf),
}

impl Location {
    /// `http(s)://…` → HTTP GET, `file://…` or anything without a scheme → local path.
    pub fn parse(s: &str) -> Result<Self, BoxError> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Empty source location".into());
        }
        if let Some(path) = s.strip_prefix("file://") {
            return Ok(Location::File(PathBuf::from(path)));
        }
        if s.contains("://") {
            return parse_url(s).map(Location::Http);
        }
        Ok(Location::File(PathBuf::from(s)))
    }

    pub fn read_to_string(&self) -> Result<String, BoxError> {
        match self {
            Location::Http(url) => http_get(url),
            Location::File(path) => fs::read_to_string(path)
                .map_err(|e| format!("Cannot read {}: {e}", path.display()).into()),
        }
    }
}

/// The production source: two CSV exports, remote or local.
#[derive(Clone, Debug)]
pub struct RemoteSource {
    pub members: Location,
    pub family: Location,
}

impl RemoteSource {
    pub fn from_options(opts: &SourceOptions) -> Result<Self, BoxError> {
        Ok(Self {
            members: Location::parse(&opts.members)?,
            family: Location::parse(&opts.family)?,
        })
    }

    pub fn location(&self, kind: TableKind) -> &Location {
        match kind {
            TableKind::Members => &self.members,
            TableKind::Dependents => &self.family,
        }
    }
}

impl RosterSource for RemoteSource {
    fn fetch(&self, kind: TableKind) -> Result<RawTable, BoxError> {
        let text = self.location(kind).read_to_string()?;
        let table = RawTable::from_csv(&text);
        if table.headers.is_empty() {
            return Err(format!("{} source is empty", kind.label()).into());
        }
        Ok(table)
    }
}

/// Per-table outcome of one refresh.
pub struct Fetched {
    pub members: Result<RawTable, BoxError>,
    pub dependents: Result<RawTable, BoxError>,
}

/// Fetch both tables concurrently.
pub fn fetch_all<S>(source: &S, mut progress: Option<&mut dyn Progress>) -> Fetched
where
    S: RosterSource + Sync,
{
    if let Some(p) = progress.as_deref_mut() {
        p.begin(TableKind::ALL.len());
        p.log("Descargando padrón…");
    }

    let (tx, rx) = mpsc::channel::<(TableKind, Result<RawTable, BoxError>)>();
    let mut members: Result<RawTable, BoxError> = Err("members table not fetched".into());
    let mut dependents: Result<RawTable, BoxError> = Err("dependents table not fetched".into());

    thread::scope(|scope| {
        for kind in TableKind::ALL {
            let tx = tx.clone();
            scope.spawn(move || {
                let _ = tx.send((kind, source.fetch(kind)));
            });
        }
        drop(tx);

        for (kind, result) in rx.iter() {
            match &result {
                Ok(t) => {
                    logd!("Fetch {}: {} rows", kind.label(), t.rows.len());
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_done(kind);
                    }
                }
                Err(e) => {
                    loge!("Fetch {}: {e}", kind.label());
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_failed(kind, &e.to_string());
                    }
                }
            }
            match kind {
                TableKind::Members => members = result,
                TableKind::Dependents => dependents = result,
            }
        }
    });

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    Fetched { members, dependents }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::consts::{DEFAULT_FAMILY_SOURCE, DEFAULT_MEMBERS_SOURCE};

    #[test]
    fn location_kinds() {
        assert_eq!(Location::parse("data/socios.csv").unwrap(), Location::File(PathBuf::from("data/socios.csv")));
        assert_eq!(Location::parse("file:///tmp/x.csv").unwrap(), Location::File(PathBuf::from("/tmp/x.csv")));
        assert!(matches!(Location::parse("http://example.org/a.csv").unwrap(), Location::Http(_)));
    }

    #[test]
    fn published_sheet_urls_are_http_locations() {
        for src in [DEFAULT_MEMBERS_SOURCE, DEFAULT_FAMILY_SOURCE] {
            match Location::parse(src).unwrap() {
                Location::Http(url) => {
                    assert_eq!(url.scheme(), "https");
                    assert_eq!(url.host_str(), Some("docs.google.com"));
                }
                other => panic!("expected http location, got {other:?}"),
            }
        }
    }

    #[test]
    fn empty_and_unsupported_locations_are_rejected() {
        assert!(Location::parse("  ").is_err());
        assert!(Location::parse("ftp://host/x").is_err());
    }

    struct Fixed;
    impl RosterSource for Fixed {
        fn fetch(&self, kind: TableKind) -> Result<RawTable, BoxError> {
            match kind {
                TableKind::Members => Ok(RawTable::from_csv("dni\n1\n")),
                TableKind::Dependents => Err("offline".into()),
            }
        }
    }

    #[derive(Default)]
    struct Counting { done: usize, failed: Vec<String>, finished: bool }
    impl Progress for Counting {
        fn item_done(&mut self, _t: TableKind) { self.done += 1; }
        fn item_failed(&mut self, t: TableKind, e: &str) { self.failed.push(format!("{}: {e}", t.label())); }
        fn finish(&mut self) { self.finished = true; }
    }

    #[test]
    fn fetch_all_reports_each_table() {
        let mut p = Counting::default();
        let out = fetch_all(&Fixed, Some(&mut p));
        assert_eq!(out.members.unwrap().rows.len(), 1);
        assert_eq!(out.dependents.unwrap_err().to_string(), "offline");
        assert_eq!(p.done, 1);
        assert_eq!(p.failed, vec![s!("dependents: offline")]);
        assert!(p.finished);
    }
}
