pub mod assets;
pub mod dna;
pub mod draw;
pub mod error;
pub mod input;
pub mod locale;
pub mod particles;
pub mod picker;
pub mod scene;
pub mod strand;
pub mod time;
pub mod timer;
pub mod transition;

pub use error::{Error, Result};
