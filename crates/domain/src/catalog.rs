use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// One contestant as stored in the bundled catalog and in board files.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogEntry {
    #[serde(rename = "Filename")]
    pub filename: String,
    #[serde(rename = "DisplayName")]
    pub display_name: String,
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Season")]
    pub season: String,
}

impl CatalogEntry {
    pub fn caption(&self) -> String {
        format!("{}\n{} - {}", self.display_name, self.country, self.season)
    }
}

/// Ordered list of entries, unique by filename.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self, DomainError> {
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(entry.filename.as_str()) {
                return Err(DomainError::DuplicateFilename(entry.filename.clone()));
            }
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find(&self, filename: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| entry.filename == filename)
    }

    pub fn contains(&self, filename: &str) -> bool {
        self.find(filename).is_some()
    }

    pub fn filenames(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.filename.as_str())
    }

    /// Entries whose filename appears in `filenames`, kept in catalog order.
    pub fn subset<S: AsRef<str>>(&self, filenames: &[S]) -> Vec<CatalogEntry> {
        let wanted: HashSet<&str> = filenames.iter().map(|filename| filename.as_ref()).collect();
        self.entries
            .iter()
            .filter(|entry| wanted.contains(entry.filename.as_str()))
            .cloned()
            .collect()
    }
}
