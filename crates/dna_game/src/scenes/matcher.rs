//! The matcher screen.
//!
//! Two columns, one per sample slot: a load button, a status line and, once a
//! sample is in, its animated strand. The match button at the bottom compares
//! the full genomes of both slots; the strands only ever show a prefix.
//!
//! Keyboard shortcuts: `1`/`2` load into a slot, `Enter` runs the match.

use dna_core::dna::{SampleSlots, SLOT_COUNT};
use dna_core::draw::{Color, DrawList, Rect, Shape};
use dna_core::input::{GameEvent, Key};
use dna_core::locale::{MessageKey, Messages};
use dna_core::particles::{ParticleGroup, ParticleGroups};
use dna_core::picker::FilePicker;
use dna_core::scene::{Scene, SceneContext};
use dna_core::strand::{DnaStrand, StrandLayout};
use glam::Vec2;

use crate::background::ColourChangingBackground;
use crate::config::GameConfig;
use crate::interface::{Button, Label};

const BUTTON_SIZE: Vec2 = Vec2::new(200.0, 30.0);
const MATCH_BUTTON_SIZE: Vec2 = Vec2::new(160.0, 30.0);
const TEXT_COLOR: Color = Color::rgb(20, 20, 20);
const PANEL_COLOR: Color = Color::rgba(255, 255, 255, 170);
const LOAD_BURST_COLOR: Color = Color::rgb(46, 160, 67);
const MATCH_BURST_COLOR: Color = Color::rgb(255, 215, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatcherAction {
    Load(usize),
    Match,
}

#[derive(Debug, Clone)]
pub struct MatcherSettings {
    pub sample_marker: String,
    pub display_bases: usize,
}

impl From<&GameConfig> for MatcherSettings {
    fn from(config: &GameConfig) -> Self {
        Self {
            sample_marker: config.sample_marker.clone(),
            display_bases: config.display_bases,
        }
    }
}

struct SlotView {
    panel: Rect,
    load: Button<MatcherAction>,
    status: Label,
    strand_area: Rect,
    strand: Option<DnaStrand>,
}

pub struct MatcherScene {
    messages: Messages,
    settings: MatcherSettings,
    picker: Box<dyn FilePicker>,
    samples: SampleSlots,
    views: Vec<SlotView>,
    match_button: Button<MatcherAction>,
    result: Label,
    particles: ParticleGroups,
    background: ColourChangingBackground,
}

impl MatcherScene {
    pub fn new(
        canvas_size: Vec2,
        messages: Messages,
        settings: MatcherSettings,
        picker: Box<dyn FilePicker>,
        background: ColourChangingBackground,
    ) -> Self {
        let column_width = canvas_size.x / SLOT_COUNT as f32;
        let views = (0..SLOT_COUNT)
            .map(|slot| {
                let center_x = column_width * (slot as f32 + 0.5);
                let button_center = Vec2::new(center_x, 40.0);
                SlotView {
                    panel: Rect::new(
                        center_x - column_width * 0.5 + 10.0,
                        15.0,
                        column_width - 20.0,
                        canvas_size.y - 95.0,
                    ),
                    load: Button::new(
                        Rect::from_center(button_center, BUTTON_SIZE),
                        messages.get(MessageKey::Load),
                        MatcherAction::Load(slot),
                    ),
                    status: Label::text(
                        messages.get(MessageKey::LoadSample),
                        13.0,
                        TEXT_COLOR,
                        Vec2::new(center_x, 75.0),
                    ),
                    strand_area: Rect::new(
                        center_x - 100.0,
                        100.0,
                        200.0,
                        canvas_size.y - 215.0,
                    ),
                    strand: None,
                }
            })
            .collect();

        Self {
            messages,
            settings,
            picker,
            samples: SampleSlots::new(),
            views,
            match_button: Button::new(
                Rect::from_center(
                    Vec2::new(canvas_size.x * 0.5, canvas_size.y - 60.0),
                    MATCH_BUTTON_SIZE,
                ),
                messages.get(MessageKey::MatchButton),
                MatcherAction::Match,
            ),
            result: Label::text(
                "",
                14.0,
                TEXT_COLOR,
                Vec2::new(canvas_size.x * 0.5, canvas_size.y - 25.0),
            ),
            particles: ParticleGroups::new(),
            background,
        }
    }

    pub fn samples(&self) -> &SampleSlots {
        &self.samples
    }

    pub fn status_text(&self, slot: usize) -> Option<&str> {
        self.views.get(slot).and_then(|v| v.status.text_content())
    }

    pub fn result_text(&self) -> &str {
        self.result.text_content().unwrap_or_default()
    }

    pub fn strand(&self, slot: usize) -> Option<&DnaStrand> {
        self.views.get(slot).and_then(|v| v.strand.as_ref())
    }

    pub fn match_caption(&self) -> &str {
        self.match_button.text()
    }

    pub fn particles(&self) -> &ParticleGroups {
        &self.particles
    }

    pub fn perform(&mut self, action: MatcherAction) {
        match action {
            MatcherAction::Load(slot) => self.load_into(slot),
            MatcherAction::Match => self.run_match(),
        }
    }

    /// Ask the picker for a file and load it into `slot`. Cancelling changes
    /// nothing; a failed load keeps the previous sample and reports the error
    /// in the slot's status line.
    fn load_into(&mut self, slot: usize) {
        let Some(view) = self.views.get_mut(slot) else {
            log::warn!("No sample slot {slot}");
            return;
        };

        let path = match self.picker.pick_file(self.messages.get(MessageKey::Load)) {
            Ok(path) => path,
            Err(err) if err.is_benign() => {
                log::debug!("Slot {slot}: {err}");
                return;
            }
            Err(err) => {
                log::warn!("Slot {slot}: {err}");
                view.status.set_text(err.to_string());
                return;
            }
        };

        match self
            .samples
            .load(slot, &path, &self.settings.sample_marker)
        {
            Ok(sample) => {
                let mut layout = StrandLayout::new(view.strand_area);
                layout.display_bases = self.settings.display_bases;
                view.strand = Some(DnaStrand::new(sample.genome(), layout));
                view.status.set_text(self.messages.get(MessageKey::Loaded));
                self.particles.spawn(ParticleGroup::burst(
                    view.load.rect().center(),
                    24,
                    2.0,
                    30,
                    LOAD_BURST_COLOR,
                ));
            }
            Err(err) => {
                log::warn!("Slot {slot}: {err}");
                view.status.set_text(err.to_string());
            }
        }

        self.refresh_result();
    }

    fn run_match(&mut self) {
        match self.samples.compare() {
            Ok(ratio) => {
                self.result.set_text(self.messages.match_result(ratio));
                self.particles.spawn(ParticleGroup::burst(
                    self.match_button.rect().center(),
                    40,
                    3.0,
                    45,
                    MATCH_BURST_COLOR,
                ));
            }
            Err(err) => {
                log::info!("Match refused: {err}");
                self.result.set_text(self.messages.get(MessageKey::Match));
            }
        }
    }

    fn refresh_result(&mut self) {
        let text = if self.samples.is_full() {
            self.messages.get(MessageKey::MatchReady)
        } else {
            ""
        };
        self.result.set_text(text);
    }
}

impl Scene for MatcherScene {
    fn draw(&self, out: &mut DrawList) {
        self.background.draw(out);
        for view in &self.views {
            out.push(Shape::Rect {
                rect: view.panel,
                color: PANEL_COLOR,
                rounding: 6.0,
            });
            view.load.draw(out);
            view.status.draw(out);
            if let Some(strand) = &view.strand {
                strand.draw(out);
            }
        }
        self.match_button.draw(out);
        self.result.draw(out);
        self.particles.draw(out);
    }

    fn update(&mut self, _ctx: &mut SceneContext<'_>) {
        self.background.update();
        for strand in self.views.iter_mut().filter_map(|v| v.strand.as_mut()) {
            strand.update();
        }
        self.particles.update();
    }

    fn handle_event(&mut self, event: &GameEvent, _ctx: &mut SceneContext<'_>) {
        let mut actions: Vec<MatcherAction> = self
            .views
            .iter_mut()
            .filter_map(|v| v.load.handle_event(event))
            .collect();
        actions.extend(self.match_button.handle_event(event));

        match event {
            GameEvent::KeyPressed(Key::Digit1) => actions.push(MatcherAction::Load(0)),
            GameEvent::KeyPressed(Key::Digit2) => actions.push(MatcherAction::Load(1)),
            GameEvent::KeyPressed(Key::Enter) => actions.push(MatcherAction::Match),
            _ => {}
        }

        for action in actions {
            self.perform(action);
        }
    }
}
