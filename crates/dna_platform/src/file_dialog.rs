//! Native open-file dialog.

use std::path::PathBuf;

use dna_core::error::{Error, Result};
use dna_core::picker::FilePicker;

/// rfd-backed picker. `pick_file` is modal and synchronous: the frame loop
/// stops until the user answers.
#[derive(Debug, Default)]
pub struct NativeFilePicker {
    start_dir: Option<PathBuf>,
}

impl NativeFilePicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// The next dialog opens in the directory of the last chosen file.
    pub fn last_dir(&self) -> Option<&std::path::Path> {
        self.start_dir.as_deref()
    }
}

impl FilePicker for NativeFilePicker {
    fn pick_file(&mut self, title: &str) -> Result<PathBuf> {
        let mut dialog = rfd::FileDialog::new().set_title(title);
        if let Some(dir) = &self.start_dir {
            dialog = dialog.set_directory(dir);
        }
        let Some(path) = dialog.pick_file() else {
            log::debug!("File dialog '{}' cancelled", title);
            return Err(Error::FileDialogCancelled);
        };
        self.start_dir = path.parent().map(PathBuf::from);
        log::info!("Picked {}", path.display());
        Ok(path)
    }
}
