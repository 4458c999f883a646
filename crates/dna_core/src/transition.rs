//! Scene transitions.
//!
//! A transition is owned by the `SceneManager` while it runs, but it is the
//! transition that decides when the scene actually changes and when it is
//! finished. It does so through `TransitionHost`, which the manager
//! implements with exactly two mutators.

use crate::draw::{Color, DrawList};
use crate::error::{Error, Result};

/// What a running transition may do to the manager that owns it.
pub trait TransitionHost {
    /// Make `name` the current scene.
    fn swap(&mut self, name: &str);
    /// Clear the transition flag and release the transition.
    fn clean(&mut self);
}

pub trait Transition {
    fn target(&self) -> &str;

    /// Advance one frame. Called from `SceneManager::render_frame` after the
    /// current scene has drawn, so anything pushed here lands on top.
    fn animate(&mut self, host: &mut dyn TransitionHost, out: &mut DrawList);

    /// 0 while fading in, 1 while fading out, 2 once finished.
    fn phase(&self) -> u8;
}

/// Full-screen overlay whose alpha ramps to the far bound and back. The scene
/// swap happens at the turnaround, while the overlay is at its strongest.
#[derive(Debug, Clone)]
pub struct FadeTransition {
    target: String,
    colour: Color,
    alpha: i32,
    step: i32,
    phase: u8,
    active: bool,
}

impl FadeTransition {
    /// A positive `step` starts transparent and fades to `colour`; a negative
    /// one starts opaque. Each phase takes `ceil(255 / |step|)` frames.
    pub fn new(target: impl Into<String>, colour: Color, step: i32) -> Result<Self> {
        if step == 0 || step.abs() > 255 {
            return Err(Error::InvalidStep { step });
        }
        Ok(Self {
            target: target.into(),
            colour,
            alpha: if step > 0 { 0 } else { 255 },
            step,
            phase: 0,
            active: true,
        })
    }

    pub fn alpha(&self) -> u8 {
        self.alpha.clamp(0, 255) as u8
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Frames needed to reach phase 2.
    pub fn frames_to_finish(&self) -> u32 {
        2 * 255u32.div_ceil(self.step.unsigned_abs())
    }
}

impl Transition for FadeTransition {
    fn target(&self) -> &str {
        &self.target
    }

    fn animate(&mut self, host: &mut dyn TransitionHost, out: &mut DrawList) {
        if !self.active {
            host.clean();
            return;
        }

        self.alpha += self.step;
        let bound = if self.step > 0 { 255 } else { 0 };
        let reached = if self.step > 0 {
            self.alpha >= bound
        } else {
            self.alpha <= bound
        };
        if reached {
            self.alpha = bound;
            self.step = -self.step;
            self.phase += 1;
            if self.phase == 1 {
                host.swap(&self.target);
            }
        }

        let rect = out.canvas_rect();
        out.rect(rect, self.colour.with_alpha(self.alpha()));

        if self.phase == 2 {
            self.active = false;
            log::debug!("Fade to '{}' finished", self.target);
        }
    }

    fn phase(&self) -> u8 {
        self.phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::Shape;
    use glam::Vec2;

    #[derive(Default)]
    struct RecordingHost {
        swaps: Vec<String>,
        cleans: u32,
    }

    impl TransitionHost for RecordingHost {
        fn swap(&mut self, name: &str) {
            self.swaps.push(name.to_string());
        }
        fn clean(&mut self) {
            self.cleans += 1;
        }
    }

    fn canvas() -> DrawList {
        DrawList::new(Vec2::new(600.0, 400.0))
    }

    #[test]
    fn rejects_zero_and_oversized_steps() {
        assert!(matches!(
            FadeTransition::new("menu", Color::BLACK, 0),
            Err(Error::InvalidStep { step: 0 })
        ));
        assert!(FadeTransition::new("menu", Color::BLACK, 256).is_err());
        assert!(FadeTransition::new("menu", Color::BLACK, -256).is_err());
        assert!(FadeTransition::new("menu", Color::BLACK, 255).is_ok());
        assert!(FadeTransition::new("menu", Color::BLACK, -1).is_ok());
    }

    #[test]
    fn reaches_phase_two_in_expected_frames() {
        for step in [1, 2, 3, 4, 5, 7, 16, 100, 128, 254, 255, -4, -60] {
            let mut fade = FadeTransition::new("menu", Color::BLACK, step).expect("valid step");
            let expected = 2 * 255u32.div_ceil(step.unsigned_abs());
            assert_eq!(fade.frames_to_finish(), expected);

            let mut host = RecordingHost::default();
            let mut frames = 0;
            while fade.phase() < 2 {
                fade.animate(&mut host, &mut canvas());
                frames += 1;
                assert!(frames <= expected, "step {step} overran");
            }
            assert_eq!(frames, expected, "step {step}");
            assert!(!fade.is_active());
        }
    }

    #[test]
    fn swaps_exactly_once_at_turnaround() {
        let mut fade = FadeTransition::new("menu", Color::BLACK, 4).expect("valid step");
        let mut host = RecordingHost::default();

        for frame in 1..=128 {
            fade.animate(&mut host, &mut canvas());
            if frame < 64 {
                assert!(host.swaps.is_empty(), "swapped early at frame {frame}");
            } else {
                assert_eq!(host.swaps, vec!["menu".to_string()], "frame {frame}");
            }
        }
        assert_eq!(host.cleans, 0);
        assert_eq!(fade.alpha(), 0);
    }

    #[test]
    fn call_after_finish_only_cleans() {
        let mut fade = FadeTransition::new("menu", Color::BLACK, 255).expect("valid step");
        let mut host = RecordingHost::default();
        fade.animate(&mut host, &mut canvas());
        fade.animate(&mut host, &mut canvas());
        assert_eq!(fade.phase(), 2);

        let mut out = canvas();
        fade.animate(&mut host, &mut out);
        assert_eq!(host.cleans, 1);
        assert!(out.is_empty(), "finished fade must not draw");
    }

    #[test]
    fn overlay_covers_canvas_with_current_alpha() {
        let mut fade = FadeTransition::new("menu", Color::rgb(10, 20, 30), 100).expect("valid");
        let mut host = RecordingHost::default();
        let mut out = canvas();
        fade.animate(&mut host, &mut out);

        match &out.shapes()[0] {
            Shape::Rect { rect, color, .. } => {
                assert_eq!(rect.size, Vec2::new(600.0, 400.0));
                assert_eq!(*color, Color::rgba(10, 20, 30, 100));
            }
            other => panic!("unexpected shape {other:?}"),
        }
    }

    #[test]
    fn alpha_stays_in_range_at_turnaround() {
        let mut fade = FadeTransition::new("menu", Color::BLACK, 200).expect("valid");
        let mut host = RecordingHost::default();
        fade.animate(&mut host, &mut canvas());
        assert_eq!(fade.alpha(), 200);
        fade.animate(&mut host, &mut canvas());
        assert_eq!(fade.alpha(), 255);
        assert_eq!(fade.phase(), 1);
    }
}
