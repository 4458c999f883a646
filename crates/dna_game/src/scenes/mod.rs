pub mod intro;
pub mod matcher;

pub use intro::IntroScene;
pub use matcher::{MatcherScene, MatcherSettings};

pub const INTRO_SCENE: &str = "game_intro";
pub const MATCHER_SCENE: &str = "main_menu";
