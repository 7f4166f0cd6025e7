// src/manifest.rs
use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    path::{Path, PathBuf},
};

use crate::config::consts::{LABEL_HEADER, MANIFEST_HEADERS};
use crate::csv::{parse_records, write_row, Record};
use crate::error::{Result, ScrapeError};
use crate::file::write_with;

/// One card whose image made it to disk and decoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardEntry {
    pub id: u64,
    pub name: String,
    /// Race as reported by the card source, which may not match the key
    /// the card was requested under.
    pub category: String,
    pub image_path: PathBuf,
}

/// Acquired cards in acquisition order: race by race, then source order.
/// Duplicates across races are kept.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Manifest {
    entries: Vec<CardEntry>,
}

impl Manifest {
    pub fn new() -> Self { Self::default() }

    pub fn push(&mut self, entry: CardEntry) { self.entries.push(entry); }

    pub fn append(&mut self, other: Manifest) { self.entries.extend(other.entries); }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn get(&self, index: usize) -> Option<&CardEntry> { self.entries.get(index) }

    pub fn iter(&self) -> std::slice::Iter<'_, CardEntry> { self.entries.iter() }

    pub fn entries(&self) -> &[CardEntry] { &self.entries }

    /// Write as CSV with a header row. Overwrites whatever was at `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        write_with(path, |out| {
            write_row(&mut *out, &MANIFEST_HEADERS)?;
            for e in &self.entries {
                write_row(&mut *out, &entry_fields(e))?;
            }
            Ok(())
        })?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let mut records = parse_records(&text).into_iter();
        expect_header(path, records.next(), &MANIFEST_HEADERS)?;

        let mut entries = Vec::new();
        for rec in records {
            entries.push(parse_entry(path, &rec, MANIFEST_HEADERS.len())?);
        }
        Ok(Self { entries })
    }
}

impl FromIterator<CardEntry> for Manifest {
    fn from_iter<I: IntoIterator<Item = CardEntry>>(iter: I) -> Self {
        Self { entries: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a Manifest {
    type Item = &'a CardEntry;
    type IntoIter = std::slice::Iter<'a, CardEntry>;
    fn into_iter(self) -> Self::IntoIter { self.entries.iter() }
}

/* ---------------- Category index ---------------- */

/// Race label → dense class index.
///
/// The index of a label is its rank among the distinct labels of the
/// manifest it was built from, sorted by plain `str` ordering. Same label set
/// in, same assignment out, regardless of row order or duplicates. Building
/// from a manifest that saw different races shifts every index after the
/// first difference.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategoryIndexMap {
    index: BTreeMap<String, usize>,
    labels: Vec<String>,
}

impl CategoryIndexMap {
    pub fn build(manifest: &Manifest) -> Self {
        Self::from_labels(manifest.iter().map(|e| e.category.as_str()))
    }

    pub fn from_labels<'a, I: IntoIterator<Item = &'a str>>(labels: I) -> Self {
        let distinct: BTreeSet<&str> = labels.into_iter().collect();
        let labels: Vec<String> = distinct.into_iter().map(str::to_string).collect();
        let index = labels.iter().enumerate().map(|(i, l)| (l.clone(), i)).collect();
        Self { index, labels }
    }

    pub fn index_of(&self, label: &str) -> Option<usize> { self.index.get(label).copied() }

    pub fn label_of(&self, index: usize) -> Option<&str> { self.labels.get(index).map(String::as_str) }

    pub fn len(&self) -> usize { self.labels.len() }

    pub fn is_empty(&self) -> bool { self.labels.is_empty() }

    /// `(label, index)` in index order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.labels.iter().enumerate().map(|(i, l)| (l.as_str(), i))
    }
}

/* ---------------- Encoded table ---------------- */

/// A manifest row with its race already turned into a class index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedRow {
    pub entry: CardEntry,
    pub label: usize,
}

/// Tabular input for datasets that should not depend on a live index map.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EncodedTable {
    pub rows: Vec<EncodedRow>,
}

impl EncodedTable {
    pub fn encode(manifest: &Manifest, map: &CategoryIndexMap) -> Result<Self> {
        let mut rows = Vec::with_capacity(manifest.len());
        for e in manifest {
            let label = map
                .index_of(&e.category)
                .ok_or_else(|| ScrapeError::UnknownCategory(e.category.clone()))?;
            rows.push(EncodedRow { entry: e.clone(), label });
        }
        Ok(Self { rows })
    }

    pub fn len(&self) -> usize { self.rows.len() }

    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    pub fn save(&self, path: &Path) -> Result<()> {
        let header: Vec<&str> = MANIFEST_HEADERS.iter().copied().chain([LABEL_HEADER]).collect();
        write_with(path, |out| {
            write_row(&mut *out, header.as_slice())?;
            for r in &self.rows {
                let mut fields = entry_fields(&r.entry).to_vec();
                fields.push(r.label.to_string());
                write_row(&mut *out, fields.as_slice())?;
            }
            Ok(())
        })?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let mut records = parse_records(&text).into_iter();
        let header: Vec<&str> = MANIFEST_HEADERS.iter().copied().chain([LABEL_HEADER]).collect();
        expect_header(path, records.next(), &header)?;

        let mut rows = Vec::new();
        for rec in records {
            let entry = parse_entry(path, &rec, header.len())?;
            let label = rec.fields[4]
                .trim()
                .parse::<usize>()
                .map_err(|e| bad_row(path, rec.line, format!("{LABEL_HEADER}: {e}")))?;
            rows.push(EncodedRow { entry, label });
        }
        Ok(Self { rows })
    }
}

/* ---------------- helpers ---------------- */

fn entry_fields(e: &CardEntry) -> [String; 4] {
    [
        e.id.to_string(),
        e.name.clone(),
        e.category.clone(),
        e.image_path.to_string_lossy().into_owned(),
    ]
}

fn expect_header(path: &Path, rec: Option<Record>, want: &[&str]) -> Result<()> {
    match rec {
        Some(r) if r.fields.iter().map(|f| f.trim()).eq(want.iter().copied()) => Ok(()),
        Some(r) => Err(bad_row(path, r.line, format!("expected header {}", want.join(",")))),
        None => Err(bad_row(path, 1, "empty file".into())),
    }
}

fn parse_entry(path: &Path, rec: &Record, width: usize) -> Result<CardEntry> {
    if rec.fields.len() != width {
        return Err(bad_row(
            path,
            rec.line,
            format!("expected {width} fields, found {}", rec.fields.len()),
        ));
    }
    let id = rec.fields[0]
        .trim()
        .parse::<u64>()
        .map_err(|e| bad_row(path, rec.line, format!("id: {e}")))?;
    Ok(CardEntry {
        id,
        name: rec.fields[1].clone(),
        category: rec.fields[2].clone(),
        image_path: PathBuf::from(&rec.fields[3]),
    })
}

fn bad_row(path: &Path, line: usize, reason: String) -> ScrapeError {
    ScrapeError::Manifest { path: path.to_path_buf(), line, reason }
}
