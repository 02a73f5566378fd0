pub mod dialogs;
pub mod fs;
pub mod presenters;
pub mod rng;

pub use dialogs::RfdFilePicker;
pub use fs::{AssetIndex, FsCatalogSource, JsonBoardFileStore, CATALOG_RESOURCE};
pub use presenters::{present_board, present_board_text, BoardView, CellView};
pub use rng::board_rng;
