//! Debug overlay drawn as an egui window on top of the game canvas.
//!
//! The canvas owns the egui context; the overlay only contributes UI inside
//! the canvas' egui pass (`Canvas::render`'s overlay callback). Its window
//! only exists while `visible` is true (toggled by F3), so it cannot steal
//! clicks from the scene otherwise.

use dna_core::time::FrameClock;

#[derive(Debug, Clone, Default)]
pub struct OverlayStats {
    pub current_scene: String,
    /// Target and phase of the running transition
    pub transition: Option<(String, u8)>,
    pub scene_names: Vec<String>,
    pub shape_count: u32,
    pub texture_count: u32,
    pub locale: String,
    /// Scene updates are suspended (drawing continues)
    pub paused: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayActions {
    pub toggle_pause: bool,
    /// Advance one scene update while paused
    pub single_step: bool,
    /// Switch to this scene immediately, without a transition
    pub jump_to: Option<String>,
}

#[derive(Debug, Default)]
pub struct DebugOverlay {
    pub visible: bool,
}

impl DebugOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
        log::info!("Debug overlay: {}", if self.visible { "ON" } else { "OFF" });
    }

    pub fn ui(&self, ctx: &egui::Context, clock: &FrameClock, stats: &OverlayStats) -> OverlayActions {
        let mut actions = OverlayActions::default();
        if !self.visible {
            return actions;
        }

        egui::Window::new("Debug")
            .default_pos([10.0, 10.0])
            .show(ctx, |ui| {
                ui.label(format!("FPS: {:.1}", clock.smoothed_fps));
                ui.label(format!("Frame time: {:.2} ms", clock.smoothed_frame_time_ms));
                ui.label(format!("Frame: {}", clock.frame_count));
                ui.separator();
                ui.label(format!("Scene: {}", stats.current_scene));
                match &stats.transition {
                    Some((target, phase)) => {
                        ui.label(format!("Transition -> {target} (phase {phase})"));
                    }
                    None => {
                        ui.label("Transition: none");
                    }
                }
                ui.label(format!("Shapes: {}", stats.shape_count));
                ui.label(format!("Textures: {}", stats.texture_count));
                ui.label(format!("Locale: {}", stats.locale));

                ui.separator();
                ui.horizontal(|ui| {
                    let pause_label = if stats.paused { "Resume" } else { "Pause" };
                    if ui.button(pause_label).clicked() {
                        actions.toggle_pause = true;
                    }
                    if stats.paused && ui.button("Step").clicked() {
                        actions.single_step = true;
                    }
                });

                ui.horizontal(|ui| {
                    for name in &stats.scene_names {
                        let enabled = *name != stats.current_scene && stats.transition.is_none();
                        if ui.add_enabled(enabled, egui::Button::new(name.as_str())).clicked() {
                            actions.jump_to = Some(name.clone());
                        }
                    }
                });
            });

        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_visibility() {
        let mut overlay = DebugOverlay::new();
        assert!(!overlay.visible);
        overlay.toggle();
        assert!(overlay.visible);
        overlay.toggle();
        assert!(!overlay.visible);
    }

    #[test]
    fn hidden_overlay_draws_nothing() {
        let overlay = DebugOverlay::new();
        let ctx = egui::Context::default();
        let clock = FrameClock::default();
        let mut actions = OverlayActions::default();
        let output = ctx.run(egui::RawInput::default(), |ctx| {
            actions = overlay.ui(ctx, &clock, &OverlayStats::default());
        });
        assert!(output.shapes.is_empty());
        assert_eq!(actions, OverlayActions::default());
    }
}
