use std::path::PathBuf;

use crate::error::Result;

/// Source of user-chosen files. The native implementation blocks the frame
/// loop until the dialog closes.
pub trait FilePicker {
    /// Ask for one file. Cancelling returns `Error::FileDialogCancelled`.
    fn pick_file(&mut self, title: &str) -> Result<PathBuf>;
}
