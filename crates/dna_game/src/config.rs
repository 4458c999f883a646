use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use dna_core::assets::DEFAULT_ASSET_ROOT;
use dna_core::dna::DEFAULT_SAMPLE_MARKER;
use dna_core::draw::Color;
use dna_core::strand::DEFAULT_DISPLAY_BASES;
use dna_core::{Error, Result};

pub const CONFIG_PATH: &str = "game_data/config.json";

/// Startup settings. Every field has a default, so a missing file or a
/// partial one is fine.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub asset_root: String,
    pub sample_marker: String,
    pub display_bases: usize,
    pub intro_duration_ms: u64,
    pub fade_step: i32,
    pub fade_colour: [u8; 3],
    /// Forces a locale instead of reading it from the environment.
    pub locale: Option<String>,
    pub fallback_locale: Option<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            title: "DNA Matcher".to_string(),
            width: 600,
            height: 400,
            fps: 60,
            asset_root: DEFAULT_ASSET_ROOT.to_string(),
            sample_marker: DEFAULT_SAMPLE_MARKER.to_string(),
            display_bases: DEFAULT_DISPLAY_BASES,
            intro_duration_ms: 3000,
            fade_step: 4,
            fade_colour: [0, 0, 0],
            locale: None,
            fallback_locale: Some("en_GB".to_string()),
        }
    }
}

impl GameConfig {
    pub fn fade_colour(&self) -> Color {
        let [r, g, b] = self.fade_colour;
        Color::rgb(r, g, b)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(config_error(format!(
                "window size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.fps == 0 {
            return Err(config_error("fps must be non-zero"));
        }
        let step = self.fade_step.unsigned_abs();
        if step == 0 || step > 255 {
            return Err(config_error(format!(
                "fade_step must be within 1..=255 by magnitude, got {}",
                self.fade_step
            )));
        }
        if self.sample_marker.is_empty() {
            return Err(config_error("sample_marker must not be empty"));
        }
        if self.display_bases == 0 {
            return Err(config_error("display_bases must be non-zero"));
        }
        Ok(())
    }
}

/// Parse and validate a config document.
pub fn parse_config(raw: &str) -> Result<GameConfig> {
    let config: GameConfig = serde_json::from_str(raw)
        .map_err(|e| config_error(format!("failed to parse config JSON: {e}")))?;
    config.validate()?;
    Ok(config)
}

/// Load the config at `path`. A missing file yields the defaults.
pub fn load_config_from_path(path: &Path) -> Result<GameConfig> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            log::info!("No config at {}; using defaults", path.display());
            return Ok(GameConfig::default());
        }
        Err(source) => {
            return Err(Error::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    let config = parse_config(&raw)?;
    log::info!("Loaded config from {}", path.display());
    Ok(config)
}

fn config_error(reason: impl Into<String>) -> Error {
    Error::Config {
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file_path(name_hint: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "dna_config_test_{}_{}_{}.json",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    #[test]
    fn defaults_match_the_classic_window() {
        let config = GameConfig::default();
        assert_eq!((config.width, config.height, config.fps), (600, 400, 60));
        assert_eq!(config.sample_marker, ".moura");
        assert_eq!(config.fade_step, 4);
        assert_eq!(config.fade_colour(), Color::BLACK);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let config = parse_config(r#"{ "fps": 30, "fallback_locale": null }"#).expect("valid");
        assert_eq!(config.fps, 30);
        assert_eq!(config.fallback_locale, None);
        assert_eq!(config.title, "DNA Matcher");
        assert_eq!(config.display_bases, 20);
    }

    #[test]
    fn rejects_bad_values() {
        for raw in [
            r#"{ "width": 0 }"#,
            r#"{ "fps": 0 }"#,
            r#"{ "fade_step": 0 }"#,
            r#"{ "fade_step": -256 }"#,
            r#"{ "sample_marker": "" }"#,
            r#"{ "display_bases": 0 }"#,
        ] {
            let err = parse_config(raw).expect_err(raw);
            assert!(matches!(err, Error::Config { .. }), "{raw}: {err}");
        }
        assert!(parse_config(r#"{ "fade_step": -255 }"#).is_ok());
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = parse_config("{ not json").expect_err("malformed");
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let path = temp_file_path("missing");
        let config = load_config_from_path(&path).expect("defaults");
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn reads_file_from_disk() {
        let path = temp_file_path("disk");
        fs::write(&path, r#"{ "title": "Lab", "fade_colour": [255, 255, 255] }"#)
            .expect("failed to write temp config");
        let config = load_config_from_path(&path).expect("valid");
        assert_eq!(config.title, "Lab");
        assert_eq!(config.fade_colour(), Color::WHITE);
        let _ = fs::remove_file(&path);
    }
}
