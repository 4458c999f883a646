//! Scenes and the manager that switches between them.
//!
//! Frame protocol, in the order the main loop calls it:
//!
//!   1. `dispatch_event()` for every queued event -- dropped while a
//!      transition runs
//!   2. `render_frame()` -- current scene draws, then the transition (if any)
//!      advances and draws its overlay on top
//!   3. `advance_frame()` -- current scene updates, skipped while a
//!      transition runs
//!
//! The transition is driven from `render_frame`, never from `advance_frame`.
//! Moving it would let a scene update run against a half-swapped state and
//! would put the overlay under the scene instead of over it.

use std::collections::HashMap;

use crate::draw::DrawList;
use crate::error::{Error, Result};
use crate::input::GameEvent;
use crate::transition::{Transition, TransitionHost};

pub trait Scene {
    fn draw(&self, out: &mut DrawList);

    fn update(&mut self, _ctx: &mut SceneContext<'_>) {}

    fn handle_event(&mut self, _event: &GameEvent, _ctx: &mut SceneContext<'_>) {}
}

struct TransitionRequest {
    target: String,
    effect: Option<Box<dyn Transition>>,
}

/// Capability handed to a scene for the duration of one `update` or
/// `handle_event` call. Requests are applied by the manager once the call
/// returns.
pub struct SceneContext<'a> {
    current: &'a str,
    request: Option<TransitionRequest>,
}

impl<'a> SceneContext<'a> {
    pub fn new(current: &'a str) -> Self {
        Self {
            current,
            request: None,
        }
    }

    /// Name of the scene being called.
    pub fn current(&self) -> &str {
        self.current
    }

    /// Ask for a scene change. A later request in the same call replaces an
    /// earlier one.
    pub fn request_transition(&mut self, target: &str, effect: Option<Box<dyn Transition>>) {
        self.request = Some(TransitionRequest {
            target: target.to_string(),
            effect,
        });
    }

    pub fn has_request(&self) -> bool {
        self.request.is_some()
    }
}

#[derive(Default)]
pub struct SceneManager {
    scenes: HashMap<String, Box<dyn Scene>>,
    current: Option<String>,
    on_transition: bool,
    effect: Option<Box<dyn Transition>>,
}

impl SceneManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `scene` under `name`. Registering a name twice replaces the
    /// earlier scene.
    pub fn register(&mut self, name: impl Into<String>, scene: impl Scene + 'static) {
        let name = name.into();
        if self.scenes.insert(name.clone(), Box::new(scene)).is_some() {
            log::warn!("Scene '{}' registered twice; keeping the newer one", name);
        }
    }

    /// Pick the first scene. No transition, no hook.
    pub fn set_initial(&mut self, name: &str) -> Result<()> {
        if !self.scenes.contains_key(name) {
            return Err(Error::UnknownScene {
                name: name.to_string(),
            });
        }
        self.current = Some(name.to_string());
        log::info!("Initial scene: {}", name);
        Ok(())
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn is_transitioning(&self) -> bool {
        self.on_transition
    }

    /// Target and phase of the running transition.
    pub fn transition_status(&self) -> Option<(&str, u8)> {
        if !self.on_transition {
            return None;
        }
        self.effect.as_ref().map(|fx| (fx.target(), fx.phase()))
    }

    pub fn scene_names(&self) -> impl Iterator<Item = &str> {
        self.scenes.keys().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.scenes.contains_key(name)
    }

    pub fn render_frame(&mut self, out: &mut DrawList) {
        if let Some(scene) = self.current.as_ref().and_then(|name| self.scenes.get(name)) {
            scene.draw(out);
        }

        if self.on_transition {
            match self.effect.take() {
                Some(mut effect) => {
                    effect.animate(self, out);
                    // `clean()` clears the flag; only a still-running effect goes back.
                    if self.on_transition {
                        self.effect = Some(effect);
                    }
                }
                None => self.on_transition = false,
            }
        }
    }

    pub fn advance_frame(&mut self) {
        if self.on_transition {
            return;
        }
        let Some(name) = self.current.clone() else {
            return;
        };
        let request = match self.scenes.get_mut(&name) {
            Some(scene) => {
                let mut ctx = SceneContext::new(&name);
                scene.update(&mut ctx);
                ctx.request
            }
            None => None,
        };
        self.apply_request(request);
    }

    pub fn dispatch_event(&mut self, event: &GameEvent) {
        if self.on_transition {
            log::trace!("Dropping {:?} during transition", event);
            return;
        }
        let Some(name) = self.current.clone() else {
            return;
        };
        let request = match self.scenes.get_mut(&name) {
            Some(scene) => {
                let mut ctx = SceneContext::new(&name);
                scene.handle_event(event, &mut ctx);
                ctx.request
            }
            None => None,
        };
        self.apply_request(request);
    }

    /// Change to `target`, animated when `effect` is given. Requesting the
    /// current scene is a no-op, as is any request while a transition runs.
    pub fn request_transition(
        &mut self,
        target: &str,
        effect: Option<Box<dyn Transition>>,
    ) -> Result<()> {
        if self.current.as_deref() == Some(target) {
            return Ok(());
        }
        if !self.scenes.contains_key(target) {
            return Err(Error::UnknownScene {
                name: target.to_string(),
            });
        }
        if self.on_transition {
            log::warn!("Transition to '{}' ignored: another one is running", target);
            return Ok(());
        }
        match effect {
            Some(effect) => {
                log::info!(
                    "Transition {} -> {} started",
                    self.current.as_deref().unwrap_or("<none>"),
                    target
                );
                self.effect = Some(effect);
                self.on_transition = true;
            }
            None => self.swap(target),
        }
        Ok(())
    }

    fn apply_request(&mut self, request: Option<TransitionRequest>) {
        let Some(request) = request else {
            return;
        };
        if let Err(err) = self.request_transition(&request.target, request.effect) {
            log::error!("Scene transition request failed: {err}");
        }
    }
}

impl TransitionHost for SceneManager {
    fn swap(&mut self, name: &str) {
        if self.current.as_deref() == Some(name) {
            return;
        }
        log::info!("Scene changed to '{}'", name);
        self.current = Some(name.to_string());
    }

    fn clean(&mut self) {
        self.on_transition = false;
        self.effect = None;
        log::info!("Transition finished");
    }
}
