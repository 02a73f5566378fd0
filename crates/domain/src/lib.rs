mod board;
mod catalog;
mod error;

pub use board::{BoardState, BOARD_SIZE};
pub use catalog::{Catalog, CatalogEntry};
pub use error::DomainError;
