use std::path::PathBuf;

use rfd::FileDialog;
use shoe_who_application::{FileFilter, FilePicker};

/// Native modal dialogs. Blocks the calling thread until dismissed.
#[derive(Debug, Default)]
pub struct RfdFilePicker;

impl FilePicker for RfdFilePicker {
    fn save(&self, suggested_name: &str, filter: &FileFilter) -> Option<PathBuf> {
        FileDialog::new()
            .add_filter(filter.name, filter.extensions)
            .set_file_name(suggested_name)
            .save_file()
    }

    fn open(&self, filter: &FileFilter) -> Option<PathBuf> {
        FileDialog::new()
            .add_filter(filter.name, filter.extensions)
            .pick_file()
    }
}
