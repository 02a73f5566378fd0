use std::path::PathBuf;

#[derive(Debug, Clone, Default)]
pub struct NewBoardCommand;

#[derive(Debug, Clone)]
pub struct ToggleCellCommand {
    pub filename: String,
}

/// Without a path the user is asked through the file picker.
#[derive(Debug, Clone, Default)]
pub struct ExportBoardCommand {
    pub path: Option<PathBuf>,
}

/// Without a path the user is asked through the file picker.
#[derive(Debug, Clone, Default)]
pub struct ImportBoardCommand {
    pub path: Option<PathBuf>,
}

impl ExportBoardCommand {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }
}

impl ImportBoardCommand {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardOutcome {
    Updated,
    Exported(PathBuf),
    Imported(PathBuf),
    Cancelled,
    Failed(String),
}
