//! Splash screen: the studio logo on white until `END_INTRO` fires, then a
//! fade to the matcher.

use std::time::Duration;

use dna_core::draw::{Color, DrawList};
use dna_core::input::{GameEvent, Key, TimerId};
use dna_core::scene::{Scene, SceneContext};
use dna_core::timer::Timers;
use dna_core::transition::{FadeTransition, Transition};
use glam::Vec2;

use crate::assets::ImageLibrary;
use crate::config::GameConfig;
use crate::interface::Label;
use crate::scenes::MATCHER_SCENE;

pub const END_INTRO: TimerId = TimerId(1);

pub const LOGO_ICON: &str = "game_intro/moura_cat.png";
pub const LOGO_TITLE: &str = "game_intro/logo_title.png";

/// Vertical distance from the canvas centre to the title's centre.
const TITLE_OFFSET_Y: f32 = 74.0;

pub struct IntroScene {
    icon: Label,
    title: Label,
    target: String,
    fade_colour: Color,
    fade_step: i32,
}

impl IntroScene {
    /// Builds the splash and schedules its end on `timers`.
    pub fn new(
        canvas_size: Vec2,
        images: &mut ImageLibrary,
        timers: &mut Timers,
        config: &GameConfig,
    ) -> Self {
        let center = canvas_size * 0.5;
        let icon_size = images.load_or_placeholder(LOGO_ICON).size();
        let title_size = images.load_or_placeholder(LOGO_TITLE).size();

        timers.schedule(
            END_INTRO,
            Duration::from_millis(config.intro_duration_ms),
            false,
        );

        Self {
            icon: Label::image(LOGO_ICON, icon_size, center),
            title: Label::image(
                LOGO_TITLE,
                title_size,
                center + Vec2::new(0.0, TITLE_OFFSET_Y),
            ),
            target: MATCHER_SCENE.to_string(),
            fade_colour: config.fade_colour(),
            fade_step: config.fade_step,
        }
    }

    fn leave(&self, ctx: &mut SceneContext<'_>) {
        let effect: Option<Box<dyn Transition>> =
            match FadeTransition::new(self.target.as_str(), self.fade_colour, self.fade_step) {
                Ok(fade) => Some(Box::new(fade)),
                Err(err) => {
                    log::error!("{err}; switching without a fade");
                    None
                }
            };
        ctx.request_transition(&self.target, effect);
    }
}

impl Scene for IntroScene {
    fn draw(&self, out: &mut DrawList) {
        out.fill(Color::WHITE);
        self.icon.draw(out);
        self.title.draw(out);
    }

    fn handle_event(&mut self, event: &GameEvent, ctx: &mut SceneContext<'_>) {
        match event {
            GameEvent::Timer(END_INTRO) => {
                log::info!("Intro finished");
                self.leave(ctx);
            }
            GameEvent::KeyPressed(Key::Space | Key::Enter) => {
                log::info!("Intro skipped");
                self.leave(ctx);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dna_core::draw::Shape;
    use dna_core::scene::SceneManager;
    use std::path::PathBuf;

    /// Stand-in for the matcher.
    struct Target;

    impl Scene for Target {
        fn draw(&self, out: &mut DrawList) {
            out.fill(Color::BLACK);
        }
    }

    fn empty_images() -> ImageLibrary {
        // Nothing exists here, so every image falls back to the placeholder.
        ImageLibrary::new(PathBuf::from("dna_intro_test_no_such_dir"))
    }

    fn setup(config: &GameConfig) -> (SceneManager, Timers) {
        let mut timers = Timers::new();
        let intro = IntroScene::new(
            Vec2::new(600.0, 400.0),
            &mut empty_images(),
            &mut timers,
            config,
        );
        let mut manager = SceneManager::new();
        manager.register(crate::scenes::INTRO_SCENE, intro);
        manager.register(MATCHER_SCENE, Target);
        manager
            .set_initial(crate::scenes::INTRO_SCENE)
            .expect("intro registered");
        (manager, timers)
    }

    fn canvas() -> DrawList {
        DrawList::new(Vec2::new(600.0, 400.0))
    }

    #[test]
    fn schedules_end_timer_on_construction() {
        let config = GameConfig::default();
        let (_, mut timers) = setup(&config);
        assert!(timers.is_pending(END_INTRO));
        assert!(timers.advance(Duration::from_millis(2999)).is_empty());
        assert_eq!(
            timers.advance(Duration::from_millis(1)),
            vec![GameEvent::Timer(END_INTRO)]
        );
        assert!(!timers.is_pending(END_INTRO));
    }

    #[test]
    fn draws_logo_on_white() {
        let config = GameConfig::default();
        let (mut manager, _) = setup(&config);
        let mut out = canvas();
        manager.render_frame(&mut out);
        assert_eq!(out.shapes()[0], Shape::Fill(Color::WHITE));
        let keys: Vec<&str> = out
            .shapes()
            .iter()
            .filter_map(|s| match s {
                Shape::Image { key, .. } => Some(key.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(keys, vec![LOGO_ICON, LOGO_TITLE]);
    }

    #[test]
    fn end_timer_fades_to_matcher() {
        let config = GameConfig::default();
        let (mut manager, mut timers) = setup(&config);
        for event in timers.advance(Duration::from_millis(config.intro_duration_ms)) {
            manager.dispatch_event(&event);
        }
        assert!(manager.is_transitioning());
        assert_eq!(manager.current(), Some(crate::scenes::INTRO_SCENE));

        // Step 4: 64 frames up, 64 down, then one frame to clean up.
        for frame in 1..=128 {
            manager.render_frame(&mut canvas());
            let expected = if frame < 64 {
                crate::scenes::INTRO_SCENE
            } else {
                MATCHER_SCENE
            };
            assert_eq!(manager.current(), Some(expected), "frame {frame}");
            assert!(manager.is_transitioning());
        }
        manager.render_frame(&mut canvas());
        assert!(!manager.is_transitioning());
        assert_eq!(manager.current(), Some(MATCHER_SCENE));
    }

    #[test]
    fn space_skips_the_wait() {
        let config = GameConfig::default();
        let (mut manager, _) = setup(&config);
        manager.dispatch_event(&GameEvent::KeyPressed(Key::Space));
        assert_eq!(manager.transition_status(), Some((MATCHER_SCENE, 0)));
    }

    #[test]
    fn unrelated_timer_is_ignored() {
        let config = GameConfig::default();
        let (mut manager, _) = setup(&config);
        manager.dispatch_event(&GameEvent::Timer(TimerId(99)));
        assert!(!manager.is_transitioning());
    }

    #[test]
    fn invalid_step_switches_without_fade() {
        let config = GameConfig {
            fade_step: 0,
            ..GameConfig::default()
        };
        let (mut manager, _) = setup(&config);
        manager.dispatch_event(&GameEvent::Timer(END_INTRO));
        assert!(!manager.is_transitioning());
        assert_eq!(manager.current(), Some(MATCHER_SCENE));
    }
}
