//! Correction table loaded from `modifier_names.csv`.
//!
//! Rows look like `key;"Old Name";"New Name"`: semicolon-delimited, fields
//! quoted with `"`, no header row. Columns beyond the third are ignored.

use std::{
    collections::HashMap,
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use csv::ReaderBuilder;

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectionEntry {
    pub id: String,
    pub false_value: String,
    pub corrected_value: String,
}

#[derive(Debug, Clone, Default)]
pub struct CorrectionTable {
    entries: HashMap<String, CorrectionEntry>,
}

impl CorrectionTable {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::io(path, e))?;
        Self::from_reader(file, path)
    }

    /// Parse a table from any reader. `path` is only used in error messages.
    pub fn from_reader<R: Read>(reader: R, path: &Path) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .delimiter(b';')
            .quote(b'"')
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut table = Self::default();
        for (index, record) in reader.records().enumerate() {
            let record = record.map_err(|source| Error::Csv {
                path: path.to_path_buf(),
                source,
            })?;

            let (Some(id), Some(false_value), Some(corrected_value)) =
                (record.get(0), record.get(1), record.get(2))
            else {
                return Err(Error::MalformedCsvRow {
                    path: PathBuf::from(path),
                    row: record
                        .position()
                        .map_or(index + 1, |pos| pos.line() as usize),
                    fields: record.len(),
                });
            };

            table.insert(CorrectionEntry {
                id: id.to_string(),
                false_value: false_value.to_string(),
                corrected_value: corrected_value.to_string(),
            });
        }

        Ok(table)
    }

    /// Add an entry, replacing any previous entry with the same id.
    pub fn insert(&mut self, entry: CorrectionEntry) -> Option<CorrectionEntry> {
        self.entries.insert(entry.id.clone(), entry)
    }

    pub fn get(&self, id: &str) -> Option<&CorrectionEntry> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<CorrectionEntry> for CorrectionTable {
    fn from_iter<I: IntoIterator<Item = CorrectionEntry>>(iter: I) -> Self {
        let mut table = Self::default();
        for entry in iter {
            table.insert(entry);
        }
        table
    }
}
