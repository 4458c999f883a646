use std::sync::Arc;
use winit::error::OsError;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Icon, Window, WindowAttributes};

/// Decoded RGBA8 pixels for the window icon.
#[derive(Debug, Clone)]
pub struct IconData {
    pub rgba: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

pub struct PlatformConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
    pub icon: Option<IconData>,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            title: "DNA Matcher".to_string(),
            width: 600,
            height: 400,
            resizable: false,
            icon: None,
        }
    }
}

pub fn create_window(
    event_loop: &ActiveEventLoop,
    config: &PlatformConfig,
) -> Result<Arc<Window>, OsError> {
    let mut attrs = WindowAttributes::default()
        .with_title(&config.title)
        .with_inner_size(winit::dpi::LogicalSize::new(config.width, config.height))
        .with_resizable(config.resizable);

    if let Some(icon) = &config.icon {
        match Icon::from_rgba(icon.rgba.clone(), icon.width, icon.height) {
            Ok(icon) => attrs = attrs.with_window_icon(Some(icon)),
            Err(err) => log::warn!("Window icon rejected: {err}"),
        }
    }

    let window = event_loop.create_window(attrs)?;
    Ok(Arc::new(window))
}
