//! Country code table.
//!
//! Maps short country codes (`CN`) to display names (`China`). The side file
//! lists one country per row as `name,code[,...]`; extra columns are ignored.

use std::collections::HashMap;
use std::path::Path;

use log::{debug, warn};

use crate::config::NOT_LISTED_LABEL;

/// Immutable code → name lookup table.
///
/// Built once at startup and shared read-only with the classifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountryCodeTable {
    names: HashMap<String, String>,
}

impl CountryCodeTable {
    /// Builds a table from `(code, name)` pairs. Later duplicates win.
    pub fn from_entries<I, C, N>(entries: I) -> Self
    where
        I: IntoIterator<Item = (C, N)>,
        C: Into<String>,
        N: Into<String>,
    {
        let names = entries
            .into_iter()
            .map(|(code, name)| (code.into(), name.into()))
            .collect();
        Self { names }
    }

    /// Loads the table from a comma-separated side file.
    ///
    /// A missing or unreadable file is not fatal: a warning is logged and an
    /// empty table is returned, so every code is reported as `<not listed>`.
    /// Rows with fewer than two columns are ignored; rows the CSV reader
    /// rejects are logged and skipped.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            warn!("Could not load country codes: {} not found", path.display());
            return Self::default();
        }

        let mut reader = match csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(path)
        {
            Ok(reader) => reader,
            Err(e) => {
                warn!("Could not load country codes from {}: {}", path.display(), e);
                return Self::default();
            }
        };

        let mut names = HashMap::new();
        for (row, record) in reader.records().enumerate() {
            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    warn!("Country code format error on row {}: {}", row + 1, e);
                    continue;
                }
            };
            if let (Some(name), Some(code)) = (record.get(0), record.get(1)) {
                names.insert(code.to_string(), name.to_string());
            }
        }

        debug!(
            "Loaded {} country codes from {}",
            names.len(),
            path.display()
        );
        Self { names }
    }

    /// Display name for `code`, if listed.
    pub fn name_for(&self, code: &str) -> Option<&str> {
        self.names.get(code).map(String::as_str)
    }

    /// Display name for `code`, or `<not listed>`.
    pub fn label_for(&self, code: &str) -> &str {
        self.name_for(code).unwrap_or(NOT_LISTED_LABEL)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
