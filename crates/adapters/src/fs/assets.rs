use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Maps catalog filenames to contestant images under the assets directory.
///
/// An image is reachable both by its file name (`TimKey.png`) and by its
/// stem (`TimKey`), since catalogs reference either form.
#[derive(Debug, Clone, Default)]
pub struct AssetIndex {
    images: HashMap<String, PathBuf>,
}

impl AssetIndex {
    pub fn scan(root: &Path) -> Self {
        let mut index = Self::default();
        if !root.is_dir() {
            warn!(root = %root.display(), "assets directory not found, cells will use placeholders");
            return index;
        }

        for entry in WalkDir::new(root).into_iter().filter_map(Result::ok) {
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if !is_image(path) {
                continue;
            }

            if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
                index
                    .images
                    .entry(name.to_string())
                    .or_insert_with(|| path.to_path_buf());
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                index
                    .images
                    .entry(stem.to_string())
                    .or_insert_with(|| path.to_path_buf());
            }
        }

        index
    }

    pub fn image_path(&self, filename: &str) -> Option<&Path> {
        self.images.get(filename).map(PathBuf::as_path)
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}
