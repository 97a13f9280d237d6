use crate::error::{BudgetError, Result};
use crate::schema::{RawTable, RawValue};
use log::debug;
use std::collections::HashSet;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Lists input files matching `pattern` inside `dir`, in sorted path order.
pub fn discover_files(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let full_pattern = dir.join(pattern);
    let mut files = Vec::new();

    for entry in glob::glob(&full_pattern.to_string_lossy())? {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) => return Err(BudgetError::Io(e.into())),
        }
    }

    files.sort();
    debug!("Discovered {} input files under {}", files.len(), dir.display());
    Ok(files)
}

/// Reads delimited text with one header row into a `RawTable`.
pub struct TableReader {
    na_values: HashSet<String>,
}

impl TableReader {
    pub fn new<S: AsRef<str>>(na_values: &[S]) -> Self {
        Self {
            na_values: na_values.iter().map(|s| s.as_ref().to_string()).collect(),
        }
    }

    pub fn read_path(&self, path: &Path) -> Result<RawTable> {
        let file = std::fs::File::open(path).map_err(|e| BudgetError::UnreadableTable {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;
        self.read(file, path)
    }

    /// `origin` only labels errors.
    pub fn read<R: Read>(&self, reader: R, origin: &Path) -> Result<RawTable> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let unreadable = |e: csv::Error| BudgetError::UnreadableTable {
            path: origin.to_path_buf(),
            details: e.to_string(),
        };

        let headers: Vec<String> = rdr
            .headers()
            .map_err(unreadable)?
            .iter()
            .map(|h| h.to_string())
            .collect();

        if headers.is_empty() {
            return Err(BudgetError::NoColumns(origin.to_path_buf()));
        }

        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(unreadable)?;
            if record.len() > headers.len() {
                return Err(BudgetError::RaggedRow {
                    path: origin.to_path_buf(),
                    line: record.position().map_or(0, |p| p.line()),
                    expected: headers.len(),
                    found: record.len(),
                });
            }
            rows.push(record.iter().map(|field| self.cell(field)).collect());
        }

        Ok(RawTable::new(headers, rows))
    }

    fn cell(&self, field: &str) -> RawValue {
        if self.na_values.contains(field) {
            RawValue::Missing
        } else {
            RawValue::Text(field.to_string())
        }
    }
}
