mod assets;
mod board_file;
mod catalog_source;

pub use assets::AssetIndex;
pub use board_file::JsonBoardFileStore;
pub use catalog_source::{FsCatalogSource, CATALOG_RESOURCE};
