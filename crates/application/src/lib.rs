mod error;
mod ports;
mod service;
mod use_cases;

pub use error::ApplicationError;
pub use ports::{BoardFileStore, CatalogSource, FileFilter, FilePicker, JSON_FILTER};
pub use service::{BoardService, EXPORT_FILE_NAME};
pub use use_cases::{
    BoardOutcome, ExportBoardCommand, ImportBoardCommand, NewBoardCommand, ToggleCellCommand,
};
