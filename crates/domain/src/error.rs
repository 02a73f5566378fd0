use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("catalog contains duplicate filename {0}")]
    DuplicateFilename(String),
}
