use std::collections::BTreeSet;

use crate::Catalog;

/// Maximum number of cells dealt onto a fresh board.
pub const BOARD_SIZE: usize = 24;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardState {
    selection: Vec<String>,
    toggled: BTreeSet<String>,
    featured: Option<String>,
}

impl BoardState {
    /// Takes the first `limit` filenames of `catalog` in order.
    pub fn from_catalog(catalog: &Catalog, limit: usize) -> Self {
        Self {
            selection: catalog.filenames().take(limit).map(str::to_string).collect(),
            toggled: BTreeSet::new(),
            featured: None,
        }
    }

    /// Sets the featured cell. Filenames outside the selection clear it.
    pub fn with_featured(mut self, featured: Option<String>) -> Self {
        self.featured = featured.filter(|filename| self.selection.contains(filename));
        self
    }

    pub fn selection(&self) -> &[String] {
        &self.selection
    }

    pub fn toggled(&self) -> &BTreeSet<String> {
        &self.toggled
    }

    pub fn featured(&self) -> Option<&str> {
        self.featured.as_deref()
    }

    pub fn is_toggled(&self, filename: &str) -> bool {
        self.toggled.contains(filename)
    }

    /// Flips the toggle flag of a cell and returns whether it is now set.
    /// Filenames that are not on the board are ignored.
    pub fn toggle(&mut self, filename: &str) -> bool {
        if self.toggled.remove(filename) {
            return false;
        }
        if !self.selection.iter().any(|selected| selected == filename) {
            return false;
        }
        self.toggled.insert(filename.to_string());
        true
    }
}
