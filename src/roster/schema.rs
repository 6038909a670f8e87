// src/roster/schema.rs
//
// Raw CSV tables → canonical tables the lookup can trust.
//
// Column labels drift between exports ("DNI", "dni ", "Apellido y Nombre"),
// so every label goes through `normalize_label` and the identifier columns are
// found through ordered alias lists instead of fixed names.

use std::{collections::HashSet, error::Error, fmt};

use super::ident::normalize_id;
use crate::core::{csv::parse_rows, sanitize::normalize_label};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TableKind {
    Members,
    Dependents,
}

impl TableKind {
    pub const ALL: [TableKind; 2] = [TableKind::Members, TableKind::Dependents];

    pub fn label(&self) -> &'static str {
        match self {
            TableKind::Members => "members",
            TableKind::Dependents => "dependents",
        }
    }

    pub fn schema(&self) -> &'static TableSchema {
        match self {
            TableKind::Members => &MEMBERS_SCHEMA,
            TableKind::Dependents => &DEPENDENTS_SCHEMA,
        }
    }
}

/// Which columns carry identifiers, by priority.
#[derive(Debug)]
pub struct TableSchema {
    pub kind: TableKind,
    /// Lookup/join key. Required.
    pub key: &'static [&'static str],
    /// The row's own identifier when it differs from the key. Optional.
    pub own_id: &'static [&'static str],
}

pub const MEMBERS_SCHEMA: TableSchema = TableSchema {
    kind: TableKind::Members,
    key: &["dni", "documento", "nro_documento"],
    own_id: &[],
};

pub const DEPENDENTS_SCHEMA: TableSchema = TableSchema {
    kind: TableKind::Dependents,
    key: &["dni_titular", "titular"],
    own_id: &["dni_familiar", "documento_familiar"],
};

/// Table as it came off the wire: header labels + positional rows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn from_csv(text: &str) -> Self {
        Self::from_delimited(text, ',')
    }

    /// First non-blank line is the header row.
    pub fn from_delimited(text: &str, sep: char) -> Self {
        let mut rows = parse_rows(text, sep);
        if rows.is_empty() {
            return Self::default();
        }
        let headers = rows.remove(0);
        Self { headers, rows }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SchemaError {
    /// None of the key aliases is present.
    MissingKey { table: TableKind, aliases: &'static [&'static str] },
    /// Two raw labels collapse to the same canonical label.
    DuplicateColumn { table: TableKind, label: String },
}

impl SchemaError {
    pub fn table(&self) -> TableKind {
        match self {
            SchemaError::MissingKey { table, .. } | SchemaError::DuplicateColumn { table, .. } => *table,
        }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::MissingKey { table, aliases } => {
                write!(f, "{} table has no identifier column (expected one of: {})", table.label(), aliases.join(", "))
            }
            SchemaError::DuplicateColumn { table, label } => {
                write!(f, "{} table has duplicate column \"{}\"", table.label(), label)
            }
        }
    }
}

impl Error for SchemaError {}

/// Canonical table: lowercase labels, located identifier columns,
/// identifier values in `normalize_id` form, source order preserved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalizedTable {
    kind: TableKind,
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
    key: Option<usize>,
    own_id: Option<usize>,
}

impl NormalizedTable {
    /// What a table degrades to when its schema is unusable.
    pub fn empty(kind: TableKind) -> Self {
        Self { kind, columns: Vec::new(), rows: Vec::new(), key: None, own_id: None }
    }

    pub fn kind(&self) -> TableKind { self.kind }
    pub fn columns(&self) -> &[String] { &self.columns }
    pub fn len(&self) -> usize { self.rows.len() }
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    pub fn column(&self, label: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == label)
    }

    /// Canonical label of the located key column.
    pub fn key_column(&self) -> Option<&str> {
        self.key.and_then(|i| self.columns.get(i)).map(|s| s.as_str())
    }

    pub fn record(&self, i: usize) -> Option<Record<'_>> {
        self.rows.get(i).map(|row| Record { table: self, row })
    }

    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.rows.iter().map(move |row| Record { table: self, row })
    }
}

/// Borrowed view of one row with label-based access.
#[derive(Clone, Copy, Debug)]
pub struct Record<'a> {
    table: &'a NormalizedTable,
    row: &'a [String],
}

impl<'a> Record<'a> {
    /// Canonical key value ("" only for a degraded table).
    pub fn key(&self) -> &'a str {
        self.table.key.and_then(|i| self.row.get(i)).map(|s| s.as_str()).unwrap_or("")
    }

    pub fn key_label(&self) -> Option<&'a str> {
        self.table.key_column()
    }

    pub fn own_id(&self) -> Option<&'a str> {
        self.table.own_id.and_then(|i| self.row.get(i)).map(|s| s.as_str())
    }

    pub fn get(&self, label: &str) -> Option<&'a str> {
        self.table.column(label).and_then(|i| self.row.get(i)).map(|s| s.as_str())
    }

    /// First alias holding a non-empty value.
    pub fn first_non_empty(&self, aliases: &[&str]) -> Option<&'a str> {
        aliases.iter().filter_map(|a| self.get(a)).find(|v| !v.is_empty())
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        let (table, row) = (self.table, self.row);
        table.columns.iter().zip(row.iter()).map(|(c, v)| (c.as_str(), v.as_str()))
    }
}

/// Consume a raw table and produce its canonical form.
///
/// The raw table is moved in and rewritten in place; nothing of it survives.
pub fn normalize_table(raw: RawTable, schema: &TableSchema) -> Result<NormalizedTable, SchemaError> {
    let table = schema.kind;
    let columns: Vec<String> = raw.headers.iter().map(|h| normalize_label(h)).collect();

    let mut seen = HashSet::new();
    for label in columns.iter().filter(|l| !l.is_empty()) {
        if !seen.insert(label.as_str()) {
            return Err(SchemaError::DuplicateColumn { table, label: label.clone() });
        }
    }

    let find = |aliases: &[&str]| aliases.iter().find_map(|a| columns.iter().position(|c| c == a));
    let key = find(schema.key).ok_or(SchemaError::MissingKey { table, aliases: schema.key })?;
    let own_id = find(schema.own_id);

    let width = columns.len();
    let mut rows = raw.rows;
    for row in rows.iter_mut() {
        row.resize(width, s!());
        for cell in row.iter_mut() {
            if cell.trim().len() != cell.len() {
                *cell = cell.trim().to_string();
            }
        }
        row[key] = normalize_id(&row[key]);
        if let Some(i) = own_id {
            row[i] = normalize_id(&row[i]);
        }
    }

    rows.retain(|row| {
        !row[key].is_empty() || own_id.is_some_and(|i| !row[i].is_empty())
    });

    Ok(NormalizedTable { kind: table, columns, rows, key: Some(key), own_id })
}
