// src/csv.rs
use std::io::{self, Write};
use std::mem::take;

pub const SEP: char = ',';

/* ---------------- Parsing ---------------- */

/// One parsed record and the 1-based line it started on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub line: usize,
    pub fields: Vec<String>,
}

/// Minimal CSV parser (quotes + CRLF tolerant). Blank lines are dropped.
pub fn parse_records(text: &str) -> Vec<Record> {
    let mut out = Vec::new();
    let mut field = String::new();
    let mut fields = Vec::new();
    let mut in_quotes = false;
    let mut line = 1usize;
    let mut start = 1usize;
    let mut chars = text.chars().peekable();

    let mut flush = |fields: &mut Vec<String>, start: usize| {
        if !(fields.len() == 1 && fields[0].is_empty()) {
            out.push(Record { line: start, fields: take(fields) });
        } else {
            fields.clear();
        }
    };

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && matches!(chars.peek(), Some('"')) => {
                chars.next(); // doubled quote
                field.push('"');
            }
            '"' => in_quotes = !in_quotes,
            c if c == SEP && !in_quotes => fields.push(take(&mut field)),
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && matches!(chars.peek(), Some('\n')) { chars.next(); }
                fields.push(take(&mut field));
                flush(&mut fields, start);
                line += 1;
                start = line;
            }
            '\n' => { line += 1; field.push(ch); }
            _ => field.push(ch),
        }
    }

    // Trailing record without newline, even if quotes never closed.
    if !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        flush(&mut fields, start);
    }

    out
}

/* ---------------- Writing ---------------- */

fn needs_quotes(field: &str) -> bool {
    field.contains(SEP) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single row to any writer.
pub fn write_row<W: Write, S: AsRef<str>>(mut w: W, row: &[S]) -> io::Result<()> {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 { write!(w, "{SEP}")?; }
        let cell = cell.as_ref();
        if needs_quotes(cell) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            write!(w, "{cell}")?;
        }
    }
    writeln!(w)
}
