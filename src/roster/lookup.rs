// src/roster/lookup.rs
use std::{error::Error, fmt};

use super::{
    ident::normalize_id,
    model::{Dependent, Member},
    schema::NormalizedTable,
};

/// Why a lookup produced no member.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LookupMiss {
    /// Query had no usable characters after normalization.
    EmptyQuery,
    NotInRoster,
}

impl LookupMiss {
    /// Message shown to the person at the login screen.
    pub fn message(&self) -> &'static str {
        match self {
            LookupMiss::EmptyQuery => "Ingrese su número de DNI para continuar.",
            LookupMiss::NotInRoster => "DNI no encontrado en el padrón de afiliados.",
        }
    }
}

impl fmt::Display for LookupMiss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LookupMiss::EmptyQuery => "empty query",
            LookupMiss::NotInRoster => "not in roster",
        })
    }
}

impl Error for LookupMiss {}

/// First member whose canonical id equals the canonical query.
pub fn find_member(raw_query: &str, members: &NormalizedTable) -> Result<Member, LookupMiss> {
    let id = normalize_id(raw_query);
    if id.is_empty() {
        return Err(LookupMiss::EmptyQuery);
    }
    members
        .records()
        .find(|r| r.key() == id)
        .map(|r| Member::from_record(&r))
        .ok_or(LookupMiss::NotInRoster)
}

/// All dependents sponsored by `member_id`, in table order.
pub fn find_dependents(member_id: &str, dependents: &NormalizedTable) -> Vec<Dependent> {
    let id = normalize_id(member_id);
    if id.is_empty() {
        return Vec::new();
    }
    dependents
        .records()
        .filter(|r| r.key() == id)
        .map(|r| Dependent::from_record(&r))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::schema::{normalize_table, RawTable, TableKind, DEPENDENTS_SCHEMA, MEMBERS_SCHEMA};

    fn members() -> NormalizedTable {
        normalize_table(
            RawTable::from_csv("DNI,Nombre\n12.345.678,PEREZ JUAN\n30111222.0,GOMEZ ANA\n30111222,DUPLICADO\n"),
            &MEMBERS_SCHEMA,
        ).unwrap()
    }

    fn family() -> NormalizedTable {
        normalize_table(
            RawTable::from_csv(
                "DNI_TITULAR,Nombre,Parentesco\n12345678,MARIA,Hija\n99,HUERFANO,Hijo\n12345678.0,JOSE,Hijo\n",
            ),
            &DEPENDENTS_SCHEMA,
        ).unwrap()
    }

    #[test]
    fn query_is_normalized_before_matching() {
        let t = members();
        assert_eq!(find_member("12345678", &t).unwrap().full_name, "PEREZ JUAN");
        assert_eq!(find_member(" 12.345.678 ", &t).unwrap().full_name, "PEREZ JUAN");
        assert_eq!(find_member("12345678.0", &t).unwrap().full_name, "PEREZ JUAN");
    }

    #[test]
    fn first_match_wins_on_duplicate_ids() {
        assert_eq!(find_member("30111222", &members()).unwrap().full_name, "GOMEZ ANA");
    }

    #[test]
    fn empty_query_never_scans() {
        assert_eq!(find_member("", &members()), Err(LookupMiss::EmptyQuery));
        assert_eq!(find_member(" . ", &members()), Err(LookupMiss::EmptyQuery));
    }

    #[test]
    fn unknown_id_and_empty_table() {
        assert_eq!(find_member("1", &members()), Err(LookupMiss::NotInRoster));
        let empty = NormalizedTable::empty(TableKind::Members);
        assert_eq!(find_member("12345678", &empty), Err(LookupMiss::NotInRoster));
    }

    #[test]
    fn dependents_in_table_order() {
        let deps = find_dependents("12345678", &family());
        let names: Vec<_> = deps.iter().map(|d| d.full_name.as_str()).collect();
        assert_eq!(names, ["MARIA", "JOSE"]);
    }

    #[test]
    fn no_dependents_for_empty_or_unknown_id() {
        assert!(find_dependents("", &family()).is_empty());
        assert!(find_dependents("5", &family()).is_empty());
    }

    #[test]
    fn miss_messages() {
        assert_eq!(LookupMiss::EmptyQuery.to_string(), "empty query");
        assert_eq!(LookupMiss::NotInRoster.to_string(), "not in roster");
        assert!(LookupMiss::NotInRoster.message().contains("no encontrado"));
    }
}
