//! DNA Matcher: main loop and application entry point.
//!
//! winit drives the loop through `ApplicationHandler`. One `RedrawRequested`
//! is one frame:
//!
//!   1. `begin_frame()`: measure the wall-clock delta, schedule the next deadline
//!   2. advance timers; their events join the queued input events
//!   3. dispatch every queued event to the scene manager
//!   4. `render_frame()` into a fresh draw list (transition overlay on top)
//!   5. `advance_frame()` unless paused from the debug overlay
//!   6. hand the draw list to the canvas, with the debug overlay in the same pass
//!
//! `about_to_wait` only requests a redraw once the frame deadline has passed and
//! otherwise sleeps with `ControlFlow::WaitUntil`, which holds the frame rate.

mod assets;
mod background;
mod config;
mod interface;
mod scenes;

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use glam::Vec2;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use assets::ImageLibrary;
use background::ColourChangingBackground;
use config::{load_config_from_path, GameConfig, CONFIG_PATH};
use dna_core::draw::DrawList;
use dna_core::input::{GameEvent, InputState, Key, MouseBtn};
use dna_core::locale::Messages;
use dna_core::scene::SceneManager;
use dna_core::time::FrameClock;
use dna_core::timer::Timers;
use dna_devtools::{DebugOverlay, OverlayActions, OverlayStats};
use dna_platform::locale::system_locale;
use dna_platform::{IconData, NativeFilePicker, PlatformConfig};
use dna_render::{Canvas, GpuContext};
use scenes::{IntroScene, MatcherScene, MatcherSettings, INTRO_SCENE, MATCHER_SCENE};

const ICON_PATH: &str = "icon.png";

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error(transparent)]
    Core(#[from] dna_core::Error),
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("failed to initialise GPU: {0}")]
    Gpu(String),
    #[error("event loop failed: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
}

/// Everything that needs a live window. Built in `resumed`.
struct GameState {
    window: Arc<Window>,
    gpu: GpuContext,
    canvas: Canvas,
    canvas_size: Vec2,
    clock: FrameClock,
    input: InputState,
    timers: Timers,
    scenes: SceneManager,
    queued: Vec<GameEvent>,
    debug_overlay: DebugOverlay,
    locale: &'static str,
    paused: bool,
    single_step_requested: bool,
    last_shape_count: usize,
}

impl GameState {
    fn new(
        window: Arc<Window>,
        config: &GameConfig,
        images: &mut ImageLibrary,
        messages: Messages,
    ) -> Result<Self, StartupError> {
        let gpu = GpuContext::new(window.clone()).map_err(StartupError::Gpu)?;
        let mut canvas = Canvas::new(&gpu, &window);
        let canvas_size = Vec2::new(config.width as f32, config.height as f32);

        let mut timers = Timers::new();
        let intro = IntroScene::new(canvas_size, images, &mut timers, config);
        let matcher = MatcherScene::new(
            canvas_size,
            messages,
            MatcherSettings::from(config),
            Box::new(NativeFilePicker::new()),
            ColourChangingBackground::new(&mut rand::rng()),
        );

        let mut scenes = SceneManager::new();
        scenes.register(INTRO_SCENE, intro);
        scenes.register(MATCHER_SCENE, matcher);
        scenes.set_initial(INTRO_SCENE)?;

        for (key, image) in images.iter() {
            canvas.register_image(key, image.width, image.height, &image.rgba);
        }
        log::info!("Registered {} textures", canvas.texture_count());

        Ok(Self {
            window,
            gpu,
            canvas,
            canvas_size,
            clock: FrameClock::new(config.fps),
            input: InputState::new(),
            timers,
            scenes,
            queued: Vec::new(),
            debug_overlay: DebugOverlay::new(),
            locale: messages.locale(),
            paused: false,
            single_step_requested: false,
            last_shape_count: 0,
        })
    }

    fn queue(&mut self, event: Option<GameEvent>) {
        self.queued.extend(event);
    }

    fn frame(&mut self) {
        let dt = self.clock.begin_frame();
        if !self.paused {
            let fired = self.timers.advance(dt);
            self.queued.extend(fired);
        }

        for event in self.queued.drain(..) {
            self.scenes.dispatch_event(&event);
        }

        let mut draw_list = DrawList::new(self.canvas_size);
        self.scenes.render_frame(&mut draw_list);

        if !self.paused || std::mem::take(&mut self.single_step_requested) {
            self.scenes.advance_frame();
        }

        self.last_shape_count = draw_list.len();
        let stats = self.overlay_stats();
        let mut actions = OverlayActions::default();
        let overlay = &self.debug_overlay;
        let clock = &self.clock;
        self.canvas
            .render(&self.gpu, &self.window, &draw_list, |ctx| {
                actions = overlay.ui(ctx, clock, &stats);
            });
        self.apply_overlay_actions(actions);
    }

    fn overlay_stats(&self) -> OverlayStats {
        let mut scene_names: Vec<String> = self.scenes.scene_names().map(str::to_string).collect();
        scene_names.sort();
        OverlayStats {
            current_scene: self.scenes.current().unwrap_or("<none>").to_string(),
            transition: self
                .scenes
                .transition_status()
                .map(|(target, phase)| (target.to_string(), phase)),
            scene_names,
            shape_count: self.last_shape_count as u32,
            texture_count: self.canvas.texture_count() as u32,
            locale: self.locale.to_string(),
            paused: self.paused,
        }
    }

    fn apply_overlay_actions(&mut self, actions: OverlayActions) {
        if actions.toggle_pause {
            self.paused = !self.paused;
            log::info!("Scene updates {}", if self.paused { "PAUSED" } else { "RESUMED" });
        }
        if actions.single_step {
            self.single_step_requested = true;
        }
        if let Some(name) = actions.jump_to {
            if let Err(err) = self.scenes.request_transition(&name, None) {
                log::error!("Debug jump failed: {err}");
            }
        }
    }
}

struct App {
    config: GameConfig,
    platform: PlatformConfig,
    images: ImageLibrary,
    messages: Messages,
    state: Option<GameState>,
    startup_error: Option<StartupError>,
}

impl App {
    fn new(config: GameConfig, images: ImageLibrary, messages: Messages, icon: Option<IconData>) -> Self {
        let platform = PlatformConfig {
            title: config.title.clone(),
            width: config.width,
            height: config.height,
            resizable: false,
            icon,
        };
        Self {
            config,
            platform,
            images,
            messages,
            state: None,
            startup_error: None,
        }
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<GameState, StartupError> {
        let window = dna_platform::create_window(event_loop, &self.platform)?;
        log::info!(
            "Window created: {}x{}",
            self.platform.width,
            self.platform.height
        );
        GameState::new(window, &self.config, &mut self.images, self.messages)
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        match self.start(event_loop) {
            Ok(state) => self.state = Some(state),
            Err(err) => {
                log::error!("Startup failed: {err}");
                self.startup_error = Some(err);
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(state) = &self.state else {
            return;
        };
        if state.clock.is_due(Instant::now()) {
            state.window.request_redraw();
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(state.clock.next_deadline()));
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = self.state.as_mut() else {
            return;
        };

        let egui_consumed = state.canvas.handle_window_event(&state.window, &event);

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting.");
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                let (w, h) = (physical_size.width, physical_size.height);
                if w > 0 && h > 0 {
                    state.gpu.resize(w, h);
                }
            }

            WindowEvent::Focused(false) => state.input.release_all(),

            WindowEvent::KeyboardInput { event, .. } if !egui_consumed => {
                let PhysicalKey::Code(key_code) = event.physical_key else {
                    return;
                };
                let Some(key) = map_key(key_code) else {
                    return;
                };
                match event.state {
                    ElementState::Pressed => {
                        let Some(pressed) = state.input.key_down(key) else {
                            return;
                        };
                        match key {
                            Key::Escape => {
                                log::info!("Escape pressed, exiting.");
                                event_loop.exit();
                            }
                            Key::F3 => state.debug_overlay.toggle(),
                            _ => state.queued.push(pressed),
                        }
                    }
                    ElementState::Released => {
                        let released = state.input.key_up(key);
                        state.queue(released);
                    }
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let logical = position.to_logical::<f32>(state.window.scale_factor());
                let moved = state.input.mouse_moved(Vec2::new(logical.x, logical.y));
                state.queued.push(moved);
            }

            WindowEvent::MouseInput {
                state: button_state,
                button,
                ..
            } if !egui_consumed => {
                let Some(button) = map_mouse_button(button) else {
                    return;
                };
                let event = match button_state {
                    ElementState::Pressed => state.input.mouse_down(button),
                    ElementState::Released => state.input.mouse_up(button),
                };
                state.queue(event);
            }

            WindowEvent::RedrawRequested => {
                if state.gpu.size.0 == 0 || state.gpu.size.1 == 0 {
                    return;
                }
                state.frame();
            }

            _ => {}
        }
    }
}

fn map_key(key_code: KeyCode) -> Option<Key> {
    match key_code {
        KeyCode::Escape => Some(Key::Escape),
        KeyCode::Enter | KeyCode::NumpadEnter => Some(Key::Enter),
        KeyCode::Space => Some(Key::Space),
        KeyCode::F3 => Some(Key::F3),
        KeyCode::Digit1 | KeyCode::Numpad1 => Some(Key::Digit1),
        KeyCode::Digit2 | KeyCode::Numpad2 => Some(Key::Digit2),
        _ => None,
    }
}

fn map_mouse_button(button: MouseButton) -> Option<MouseBtn> {
    match button {
        MouseButton::Left => Some(MouseBtn::Left),
        MouseButton::Right => Some(MouseBtn::Right),
        MouseButton::Middle => Some(MouseBtn::Middle),
        _ => None,
    }
}

/// The configured locale, else the system one; falls back per config.
fn resolve_messages(config: &GameConfig) -> dna_core::Result<Messages> {
    let preferred = config
        .locale
        .clone()
        .or_else(system_locale)
        .unwrap_or_default();
    let messages = Messages::resolve(&preferred, config.fallback_locale.as_deref())?;
    log::info!("Locale: {}", messages.locale());
    Ok(messages)
}

fn load_icon(images: &mut ImageLibrary) -> Option<IconData> {
    match images.load(ICON_PATH) {
        Ok(icon) => Some(IconData {
            rgba: icon.rgba.clone(),
            width: icon.width,
            height: icon.height,
        }),
        Err(err) => {
            log::warn!("No window icon: {err}");
            None
        }
    }
}

fn run() -> Result<(), StartupError> {
    let config = load_config_from_path(Path::new(CONFIG_PATH))?;
    let messages = resolve_messages(&config)?;
    let mut images = ImageLibrary::new(config.asset_root.clone());
    let icon = load_icon(&mut images);

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config, images, messages, icon);
    event_loop.run_app(&mut app)?;

    match app.startup_error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("DNA Matcher starting...");

    if let Err(err) = run() {
        log::error!("{err}");
        std::process::exit(1);
    }
}
