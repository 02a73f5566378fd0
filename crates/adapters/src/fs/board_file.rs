use std::fs;
use std::path::{Path, PathBuf};

use shoe_who_application::{ApplicationError, BoardFileStore};
use shoe_who_domain::CatalogEntry;

/// Board files are a compact JSON array of catalog entries.
#[derive(Debug, Default)]
pub struct JsonBoardFileStore;

impl BoardFileStore for JsonBoardFileStore {
    fn write_board(&self, path: &Path, entries: &[CatalogEntry]) -> Result<(), ApplicationError> {
        let json = serde_json::to_string(entries)
            .map_err(|error| ApplicationError::Parse(error.to_string()))?;

        let staging = staging_path(path);
        fs::write(&staging, json).map_err(|error| ApplicationError::Io(error.to_string()))?;
        fs::rename(&staging, path).map_err(|error| {
            let _ = fs::remove_file(&staging);
            ApplicationError::Io(error.to_string())
        })
    }

    fn read_board(&self, path: &Path) -> Result<Vec<CatalogEntry>, ApplicationError> {
        let raw =
            fs::read_to_string(path).map_err(|error| ApplicationError::Io(error.to_string()))?;
        serde_json::from_str(&raw).map_err(|error| ApplicationError::Parse(error.to_string()))
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "board.json".to_string());
    path.with_file_name(format!(".{name}.tmp"))
}
