pub mod file_dialog;
pub mod locale;
pub mod window;

pub use file_dialog::NativeFilePicker;
pub use window::{create_window, IconData, PlatformConfig};
