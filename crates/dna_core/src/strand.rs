//! The ladder visualization of a sample.
//!
//! Only the first `display_bases` characters are shown. Each base becomes a
//! rung: two markers that slide horizontally inside the strand's bounds and a
//! line between them coloured by the base. The markers of a pair keep their
//! own speed, so a rung can stretch and shrink as well as drift.

use glam::Vec2;

use crate::draw::{Color, DrawList, Rect};

pub const DEFAULT_DISPLAY_BASES: usize = 20;

pub const MARKER_COLOR: Color = Color::rgb(40, 40, 40);

/// Rung colour for a base. Characters outside `GATC` have none.
pub fn base_color(base: char) -> Option<Color> {
    match base.to_ascii_uppercase() {
        'G' => Some(Color::rgb(46, 160, 67)),
        'A' => Some(Color::rgb(220, 60, 60)),
        'T' => Some(Color::rgb(240, 190, 40)),
        'C' => Some(Color::rgb(50, 110, 220)),
        _ => None,
    }
}

/// A point moving on one axis between two bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bouncer {
    pub x: f32,
    pub speed: f32,
}

impl Bouncer {
    /// Move one frame. Reaching or crossing a bound clamps to it and flips the
    /// direction, so `x` never leaves `[min, max]`.
    pub fn step(&mut self, min: f32, max: f32) {
        let next = self.x + self.speed;
        if next >= max && self.speed > 0.0 {
            self.x = max;
            self.speed = -self.speed;
        } else if next <= min && self.speed < 0.0 {
            self.x = min;
            self.speed = -self.speed;
        } else {
            self.x = next.clamp(min, max);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rung {
    pub base: char,
    pub y: f32,
    pub left: Bouncer,
    pub right: Bouncer,
}

#[derive(Debug, Clone, Copy)]
pub struct StrandLayout {
    /// Horizontal bounds and vertical extent of the ladder.
    pub area: Rect,
    pub display_bases: usize,
    pub marker_radius: f32,
    pub rung_width: f32,
    pub speed: f32,
}

impl StrandLayout {
    pub fn new(area: Rect) -> Self {
        Self {
            area,
            display_bases: DEFAULT_DISPLAY_BASES,
            marker_radius: 3.0,
            rung_width: 2.0,
            speed: 0.6,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DnaStrand {
    window: String,
    rungs: Vec<Rung>,
    layout: StrandLayout,
}

impl DnaStrand {
    pub fn new(genome: &str, layout: StrandLayout) -> Self {
        let window: String = genome.chars().take(layout.display_bases).collect();
        let count = window.chars().count();
        let area = layout.area;
        let (min_x, max_x) = (area.min.x, area.max().x);
        let spacing = if count > 1 {
            area.size.y / (count - 1) as f32
        } else {
            0.0
        };
        let quarter = area.size.x * 0.25;

        let rungs = window
            .chars()
            .enumerate()
            .map(|(i, base)| {
                // Stagger the start so the ladder reads as a twist rather than
                // a column of identical rungs.
                let offset = (i % 8) as f32 / 8.0 * quarter;
                let left_speed = layout.speed * (1.0 + (i % 3) as f32 * 0.25);
                let right_speed = layout.speed * (1.0 + (i % 5) as f32 * 0.15);
                Rung {
                    base,
                    y: if count > 1 {
                        area.min.y + spacing * i as f32
                    } else {
                        area.center().y
                    },
                    left: Bouncer {
                        x: (min_x + offset).min(max_x),
                        speed: left_speed,
                    },
                    right: Bouncer {
                        x: (max_x - offset).max(min_x),
                        speed: -right_speed,
                    },
                }
            })
            .collect();

        Self {
            window,
            rungs,
            layout,
        }
    }

    /// The displayed prefix of the genome.
    pub fn window(&self) -> &str {
        &self.window
    }

    pub fn rungs(&self) -> &[Rung] {
        &self.rungs
    }

    pub fn bounds(&self) -> (f32, f32) {
        (self.layout.area.min.x, self.layout.area.max().x)
    }

    pub fn update(&mut self) {
        let (min, max) = self.bounds();
        for rung in &mut self.rungs {
            rung.left.step(min, max);
            rung.right.step(min, max);
        }
    }

    pub fn draw(&self, out: &mut DrawList) {
        let radius = self.layout.marker_radius;
        for rung in &self.rungs {
            let left = Vec2::new(rung.left.x, rung.y);
            let right = Vec2::new(rung.right.x, rung.y);
            if let Some(color) = base_color(rung.base) {
                out.line(left, right, self.layout.rung_width, color);
            }
            out.circle(left, radius, MARKER_COLOR);
            out.circle(right, radius, MARKER_COLOR);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::Shape;

    fn layout() -> StrandLayout {
        StrandLayout::new(Rect::new(40.0, 80.0, 200.0, 190.0))
    }

    #[test]
    fn base_colors_cover_alphabet_case_insensitively() {
        for base in ['G', 'A', 'T', 'C', 'g', 'a', 't', 'c'] {
            assert!(base_color(base).is_some(), "{base}");
        }
        assert_eq!(base_color('G'), base_color('g'));
        assert!(base_color('N').is_none());
        assert!(base_color('\n').is_none());
    }

    #[test]
    fn bouncer_never_leaves_bounds_and_flips_on_contact() {
        for (x, speed) in [(0.0, 0.7), (10.0, -3.0), (5.0, 4.0), (9.9, 0.25), (0.0, -1.0)] {
            let mut b = Bouncer { x, speed };
            for _ in 0..500 {
                let before = b.speed;
                b.step(0.0, 10.0);
                assert!((0.0..=10.0).contains(&b.x), "x {} out of bounds", b.x);
                let at_bound = b.x == 0.0 || b.x == 10.0;
                if before.signum() != b.speed.signum() {
                    assert!(at_bound, "flipped away from a bound at {}", b.x);
                }
                assert_eq!(b.speed.abs(), speed.abs());
            }
        }
    }

    #[test]
    fn bouncer_flips_exactly_when_reaching_bound() {
        let mut b = Bouncer { x: 8.0, speed: 1.0 };
        b.step(0.0, 10.0);
        assert_eq!(b, Bouncer { x: 9.0, speed: 1.0 });
        b.step(0.0, 10.0);
        assert_eq!(b, Bouncer { x: 10.0, speed: -1.0 });
        b.step(0.0, 10.0);
        assert_eq!(b, Bouncer { x: 9.0, speed: -1.0 });
    }

    #[test]
    fn strand_keeps_only_display_window() {
        let genome = "GATTACA".repeat(5);
        let strand = DnaStrand::new(&genome, layout());
        assert_eq!(strand.window().chars().count(), DEFAULT_DISPLAY_BASES);
        assert_eq!(strand.rungs().len(), DEFAULT_DISPLAY_BASES);
        assert!(genome.starts_with(strand.window()));
        // The window is display only; the full genome is longer.
        assert_ne!(strand.window(), genome);
    }

    #[test]
    fn short_genome_shows_every_base() {
        let strand = DnaStrand::new("GAT", layout());
        assert_eq!(strand.window(), "GAT");
        let ys: Vec<f32> = strand.rungs().iter().map(|r| r.y).collect();
        assert_eq!(ys, vec![80.0, 175.0, 270.0]);
    }

    #[test]
    fn markers_stay_in_bounds_while_animating() {
        let mut strand = DnaStrand::new(&"GATC".repeat(10), layout());
        let (min, max) = strand.bounds();
        for _ in 0..2_000 {
            strand.update();
            for rung in strand.rungs() {
                assert!(rung.left.x >= min && rung.left.x <= max);
                assert!(rung.right.x >= min && rung.right.x <= max);
            }
        }
    }

    #[test]
    fn pair_markers_move_independently() {
        let mut strand = DnaStrand::new("GA", layout());
        let before = strand.rungs()[1];
        strand.update();
        let after = strand.rungs()[1];
        let left_delta = after.left.x - before.left.x;
        let right_delta = after.right.x - before.right.x;
        assert!(left_delta > 0.0 && right_delta < 0.0);
        assert_ne!(left_delta.abs(), right_delta.abs());
    }

    #[test]
    fn unknown_base_draws_markers_without_rung() {
        let strand = DnaStrand::new("GN", layout());
        let mut out = DrawList::new(Vec2::new(600.0, 400.0));
        strand.draw(&mut out);

        let lines = out
            .shapes()
            .iter()
            .filter(|s| matches!(s, Shape::Line { .. }))
            .count();
        let circles = out
            .shapes()
            .iter()
            .filter(|s| matches!(s, Shape::Circle { .. }))
            .count();
        assert_eq!(lines, 1);
        assert_eq!(circles, 4);
    }

    #[test]
    fn empty_genome_has_no_rungs() {
        let strand = DnaStrand::new("", layout());
        assert!(strand.rungs().is_empty());
        let mut out = DrawList::new(Vec2::new(600.0, 400.0));
        strand.draw(&mut out);
        assert!(out.is_empty());
    }
}
