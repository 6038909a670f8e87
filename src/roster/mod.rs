// src/roster/mod.rs
//
// Normalization + lookup core. Everything here is pure; I/O lives in `source`
// and caching in `store`.

pub mod ident;
pub mod lookup;
pub mod model;
pub mod photo;
pub mod role;
pub mod schema;

use std::sync::Arc;

pub use ident::normalize_id;
pub use lookup::LookupMiss;
pub use model::{Card, Dependent, Member};
pub use photo::resolve_photo;
pub use role::{classify_role, RoleCategory};
pub use schema::{normalize_table, NormalizedTable, RawTable, SchemaError, TableKind};

/// One immutable snapshot of both tables.
#[derive(Clone, Debug)]
pub struct Roster {
    members: Arc<NormalizedTable>,
    dependents: Arc<NormalizedTable>,
    issues: Vec<SchemaError>,
}

impl Default for Roster {
    fn default() -> Self {
        Self::empty()
    }
}

impl Roster {
    pub fn empty() -> Self {
        Self {
            members: Arc::new(NormalizedTable::empty(TableKind::Members)),
            dependents: Arc::new(NormalizedTable::empty(TableKind::Dependents)),
            issues: Vec::new(),
        }
    }

    /// Assemble from already-normalized tables. Tables are shared, not copied,
    /// so a partial refresh can reuse the previous snapshot's half.
    pub fn from_tables(
        members: Arc<NormalizedTable>,
        dependents: Arc<NormalizedTable>,
        issues: Vec<SchemaError>,
    ) -> Self {
        Self { members, dependents, issues }
    }

    pub fn members(&self) -> &Arc<NormalizedTable> { &self.members }
    pub fn dependents(&self) -> &Arc<NormalizedTable> { &self.dependents }
    pub fn issues(&self) -> &[SchemaError] { &self.issues }

    pub fn table(&self, kind: TableKind) -> &Arc<NormalizedTable> {
        match kind {
            TableKind::Members => &self.members,
            TableKind::Dependents => &self.dependents,
        }
    }

    pub fn member_count(&self) -> usize { self.members.len() }
    pub fn dependent_count(&self) -> usize { self.dependents.len() }

    pub fn find_member(&self, raw_query: &str) -> Result<Member, LookupMiss> {
        let out = lookup::find_member(raw_query, &self.members);
        match &out {
            Ok(m) => logd!("Lookup: hit for {} ({} dependents table rows)", m.id, self.dependents.len()),
            Err(miss) => logd!("Lookup: {miss}"),
        }
        out
    }

    pub fn find_dependents(&self, member_id: &str) -> Vec<Dependent> {
        lookup::find_dependents(member_id, &self.dependents)
    }

    /// Member + family group, ready to render.
    pub fn card(&self, raw_query: &str) -> Result<Card, LookupMiss> {
        let member = self.find_member(raw_query)?;
        let dependents = self.find_dependents(&member.id);
        Ok(Card::new(member, dependents))
    }
}

/// Normalize one raw table, degrading to an empty table on schema errors.
pub fn normalize_or_empty(raw: RawTable, kind: TableKind, issues: &mut Vec<SchemaError>) -> NormalizedTable {
    match normalize_table(raw, kind.schema()) {
        Ok(t) => t,
        Err(e) => {
            loge!("Schema: {e}");
            issues.push(e);
            NormalizedTable::empty(kind)
        }
    }
}

/// Build a fresh snapshot from both raw tables.
pub fn rebuild(raw_members: RawTable, raw_dependents: RawTable) -> Roster {
    let mut issues = Vec::new();
    let members = normalize_or_empty(raw_members, TableKind::Members, &mut issues);
    let dependents = normalize_or_empty(raw_dependents, TableKind::Dependents, &mut issues);
    logf!("Roster: {} members, {} dependents, {} issues", members.len(), dependents.len(), issues.len());
    Roster::from_tables(Arc::new(members), Arc::new(dependents), issues)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn broken_family_table_does_not_block_member_lookup() {
        let roster = rebuild(
            RawTable::from_csv("dni,nombre\n1,ANA\n"),
            RawTable::from_csv("socio,nombre\n1,HIJO\n"),
        );
        assert_eq!(roster.issues().len(), 1);
        assert_eq!(roster.dependent_count(), 0);
        let card = roster.card("1").unwrap();
        assert_eq!(card.member.full_name, "ANA");
        assert!(card.dependents.is_empty());
    }

    #[test]
    fn empty_roster_misses() {
        assert_eq!(Roster::empty().find_member("1"), Err(LookupMiss::NotInRoster));
        assert_eq!(Roster::default().card(""), Err(LookupMiss::EmptyQuery));
    }
}
