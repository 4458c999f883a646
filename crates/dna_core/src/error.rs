use std::path::PathBuf;

/// Errors surfaced by the matcher, its scenes and their collaborators.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{} is not a DNA sample (file name lacks '{marker}')", path.display())]
    InvalidFormat { path: PathBuf, marker: String },

    #[error("sample slot {slot} is empty")]
    MissingSample { slot: usize },

    #[error("locale '{locale}' has no message table")]
    LocaleNotSupported { locale: String },

    /// The user closed the file dialog without choosing anything. Callers
    /// treat this as a no-op.
    #[error("file dialog cancelled")]
    FileDialogCancelled,

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid transition step {step}: expected 0 < |step| <= 255")]
    InvalidStep { step: i32 },

    #[error("no scene registered under '{name}'")]
    UnknownScene { name: String },

    #[error("asset '{}' failed to load: {reason}", path.display())]
    Asset { path: PathBuf, reason: String },

    #[error("config validation failed: {reason}")]
    Config { reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// True for outcomes that are not failures from the user's point of view.
    pub fn is_benign(&self) -> bool {
        matches!(self, Self::FileDialogCancelled)
    }
}
