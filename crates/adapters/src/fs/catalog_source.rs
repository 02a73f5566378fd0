use std::fs;
use std::path::{Path, PathBuf};

use shoe_who_application::{ApplicationError, CatalogSource};
use shoe_who_domain::CatalogEntry;

/// File name of the contestant catalog inside the assets directory.
pub const CATALOG_RESOURCE: &str = "Taskmaster.json";

#[derive(Debug, Clone)]
pub struct FsCatalogSource {
    path: PathBuf,
}

impl FsCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_assets(assets_dir: &Path) -> Self {
        Self::new(assets_dir.join(CATALOG_RESOURCE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogSource for FsCatalogSource {
    fn load_catalog(&self) -> Result<Vec<CatalogEntry>, ApplicationError> {
        let raw = fs::read_to_string(&self.path).map_err(|error| {
            ApplicationError::ResourceLoad(format!("{}: {error}", self.path.display()))
        })?;
        serde_json::from_str(&raw).map_err(|error| {
            ApplicationError::ResourceLoad(format!("{}: {error}", self.path.display()))
        })
    }
}
