// src/core/csv.rs
use std::borrow::Cow;
use std::io::{self, Write};
use std::mem::take;

/* ---------------- Parsing ---------------- */

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    /// At the first char of a field.
    FieldStart,
    Unquoted,
    Quoted,
    /// Saw `"` inside a quoted field: either an escape or the closing quote.
    QuoteInQuoted,
}

/// Accumulates cells into rows; rows made only of blank cells are dropped.
struct Rows {
    out: Vec<Vec<String>>,
    row: Vec<String>,
    cell: String,
}

impl Rows {
    fn end_cell(&mut self) {
        self.row.push(take(&mut self.cell));
    }

    fn end_row(&mut self) {
        self.end_cell();
        let row = take(&mut self.row);
        if row.iter().any(|c| !c.trim().is_empty()) {
            self.out.push(row);
        }
    }
}

/// CSV/TSV text → rows. Quotes are only special at the start of a field;
/// `""` inside a quoted field is a literal quote. LF, CR and CRLF all end a
/// row. An unterminated quote runs to the end of the text.
pub fn parse_rows(text: &str, sep: char) -> Vec<Vec<String>> {
    let mut acc = Rows { out: Vec::new(), row: Vec::new(), cell: s!() };
    let mut state = State::FieldStart;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        state = match (state, ch) {
            (State::Quoted, '"') => State::QuoteInQuoted,
            (State::Quoted, c) => {
                acc.cell.push(c);
                State::Quoted
            }
            (State::QuoteInQuoted, '"') => {
                acc.cell.push('"');
                State::Quoted
            }
            (State::FieldStart, '"') => State::Quoted,
            (_, c) if c == sep => {
                acc.end_cell();
                State::FieldStart
            }
            (_, '\r') => {
                chars.next_if_eq(&'\n');
                acc.end_row();
                State::FieldStart
            }
            (_, '\n') => {
                acc.end_row();
                State::FieldStart
            }
            // text after a closing quote is kept as-is
            (_, c) => {
                acc.cell.push(c);
                State::Unquoted
            }
        };
    }
    acc.end_row();
    acc.out
}

/* ---------------- Writing ---------------- */

/// Cell as written: wrapped in quotes (with `"` doubled) only when it holds
/// the separator, a quote or a line break.
fn quote_cell(cell: &str, sep: char) -> Cow<'_, str> {
    if cell.contains(|c| c == sep || c == '"' || c == '\n' || c == '\r') {
        Cow::Owned(join!("\"", &cell.replace('"', "\"\""), "\""))
    } else {
        Cow::Borrowed(cell)
    }
}

/// One row as text, without the trailing newline.
fn format_row(row: &[String], sep: char) -> String {
    let mut line = String::new();
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            line.push(sep);
        }
        line.push_str(&quote_cell(cell, sep));
    }
    line
}

/// Write one row plus a newline.
pub fn write_row<W: Write>(mut w: W, row: &[String], sep: char) -> io::Result<()> {
    writeln!(w, "{}", format_row(row, sep))
}

/// Headers (optional) + rows into one string.
pub fn rows_to_string(headers: Option<&[String]>, rows: &[Vec<String>], sep: char) -> String {
    headers
        .into_iter()
        .chain(rows.iter().map(Vec::as_slice))
        .map(|row| format_row(row, sep) + "\n")
        .collect()
}
