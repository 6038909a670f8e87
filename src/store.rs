// src/store.rs
//
// In-memory roster cache. Owned by the caller (no globals); nothing is written
// to disk.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use crate::{
    core::BoxError,
    progress::Progress,
    roster::{normalize_or_empty, NormalizedTable, RawTable, Roster, SchemaError, TableKind},
    source::{fetch_all, RosterSource},
};

pub struct RosterCache<S> {
    source: S,
    current: Arc<Roster>,
    fetched_at: Option<Instant>,
    stale: bool,
    last_error: Option<String>,
}

impl<S: RosterSource + Sync> RosterCache<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            current: Arc::new(Roster::empty()),
            fetched_at: None,
            stale: true,
            last_error: None,
        }
    }

    pub fn source(&self) -> &S { &self.source }

    /// Latest snapshot, fresh or not.
    pub fn current(&self) -> Arc<Roster> { Arc::clone(&self.current) }

    pub fn fetched_at(&self) -> Option<Instant> { self.fetched_at }

    /// Errors from the most recent refresh, one line per failed table.
    pub fn last_error(&self) -> Option<&str> { self.last_error.as_deref() }

    pub fn is_fresh(&self, now: Instant, ttl: Duration) -> bool {
        !self.stale
            && self
                .fetched_at
                .is_some_and(|t| now.saturating_duration_since(t) < ttl)
    }

    /// Force the next `get_or_refresh` to refetch. The current snapshot stays
    /// available until then.
    pub fn invalidate(&mut self) {
        logf!("Cache: invalidated");
        self.stale = true;
    }

    pub fn get_or_refresh(
        &mut self,
        now: Instant,
        ttl: Duration,
        progress: Option<&mut dyn Progress>,
    ) -> Arc<Roster> {
        if self.is_fresh(now, ttl) {
            return self.current();
        }
        self.refresh(now, progress)
    }

    /// Refetch both tables. A table whose fetch fails keeps its previous
    /// normalized version.
    pub fn refresh(&mut self, now: Instant, progress: Option<&mut dyn Progress>) -> Arc<Roster> {
        logf!("Cache: refresh begin");
        let fetched = fetch_all(&self.source, progress);

        let mut issues = Vec::new();
        let mut errors = Vec::new();
        let members = self.merge(TableKind::Members, fetched.members, &mut issues, &mut errors);
        let dependents = self.merge(TableKind::Dependents, fetched.dependents, &mut issues, &mut errors);

        let roster = Roster::from_tables(members, dependents, issues);
        logf!(
            "Cache: refresh end ({} members, {} dependents, {} failed)",
            roster.member_count(), roster.dependent_count(), errors.len()
        );

        self.current = Arc::new(roster);
        self.fetched_at = Some(now);
        self.stale = false;
        self.last_error = if errors.is_empty() { None } else { Some(errors.join("\n")) };
        self.current()
    }

    fn merge(
        &self,
        kind: TableKind,
        fetched: Result<RawTable, BoxError>,
        issues: &mut Vec<SchemaError>,
        errors: &mut Vec<String>,
    ) -> Arc<NormalizedTable> {
        match fetched {
            Ok(raw) => Arc::new(normalize_or_empty(raw, kind, issues)),
            Err(e) => {
                errors.push(format!("{}: {e}", kind.label()));
                issues.extend(self.current.issues().iter().filter(|i| i.table() == kind).cloned());
                Arc::clone(self.current.table(kind))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counter(AtomicUsize);
    impl RosterSource for Counter {
        fn fetch(&self, kind: TableKind) -> Result<RawTable, BoxError> {
            if kind == TableKind::Members {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
            Ok(RawTable::from_csv("dni,dni_titular\n1,1\n"))
        }
    }

    #[test]
    fn new_cache_is_stale_and_empty() {
        let cache = RosterCache::new(Counter(AtomicUsize::new(0)));
        assert!(!cache.is_fresh(Instant::now(), Duration::from_secs(60)));
        assert_eq!(cache.current().member_count(), 0);
        assert!(cache.fetched_at().is_none());
    }

    #[test]
    fn refetches_only_after_ttl() {
        let ttl = Duration::from_secs(300);
        let t0 = Instant::now();
        let mut cache = RosterCache::new(Counter(AtomicUsize::new(0)));
        cache.get_or_refresh(t0, ttl, None);
        cache.get_or_refresh(t0 + Duration::from_secs(10), ttl, None);
        assert_eq!(cache.source().0.load(Ordering::SeqCst), 1);
        cache.get_or_refresh(t0 + ttl, ttl, None);
        assert_eq!(cache.source().0.load(Ordering::SeqCst), 2);
    }
}
