use std::path::{Path, PathBuf};

use shoe_who_domain::CatalogEntry;

use crate::ApplicationError;

/// Supplies the bundled contestant catalog.
pub trait CatalogSource {
    fn load_catalog(&self) -> Result<Vec<CatalogEntry>, ApplicationError>;
}

pub trait BoardFileStore {
    fn write_board(&self, path: &Path, entries: &[CatalogEntry]) -> Result<(), ApplicationError>;

    fn read_board(&self, path: &Path) -> Result<Vec<CatalogEntry>, ApplicationError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFilter {
    pub name: &'static str,
    pub extensions: &'static [&'static str],
}

pub const JSON_FILTER: FileFilter = FileFilter {
    name: "JSON",
    extensions: &["json"],
};

/// Modal file dialogs. `None` means the user dismissed the dialog.
pub trait FilePicker {
    fn save(&self, suggested_name: &str, filter: &FileFilter) -> Option<PathBuf>;

    fn open(&self, filter: &FileFilter) -> Option<PathBuf>;
}
