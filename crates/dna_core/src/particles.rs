//! Short-lived particle effects owned by a scene.

use glam::Vec2;

use crate::draw::{Color, DrawList};

#[derive(Debug, Clone)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Frames left before the particle disappears.
    pub life: u32,
    pub radius: f32,
    pub color: Color,
}

#[derive(Debug, Clone, Default)]
pub struct ParticleGroup {
    particles: Vec<Particle>,
    /// Added to every velocity each frame.
    pub gravity: Vec2,
}

impl ParticleGroup {
    pub fn new(particles: Vec<Particle>) -> Self {
        Self {
            particles,
            gravity: Vec2::ZERO,
        }
    }

    /// `count` particles leaving `origin` on evenly spaced headings.
    pub fn burst(origin: Vec2, count: usize, speed: f32, life: u32, color: Color) -> Self {
        let particles = (0..count)
            .map(|i| {
                let angle = i as f32 / count.max(1) as f32 * std::f32::consts::TAU;
                Particle {
                    position: origin,
                    velocity: Vec2::from_angle(angle) * speed,
                    life,
                    radius: 2.5,
                    color,
                }
            })
            .collect();
        Self::new(particles)
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn update(&mut self) {
        let gravity = self.gravity;
        self.particles.retain_mut(|p| {
            if p.life == 0 {
                return false;
            }
            p.life -= 1;
            p.velocity += gravity;
            p.position += p.velocity;
            p.life > 0
        });
    }

    pub fn draw(&self, out: &mut DrawList) {
        for p in &self.particles {
            out.circle(p.position, p.radius, p.color);
        }
    }
}

/// The particle groups of one scene. Groups are dropped once empty.
#[derive(Debug, Clone, Default)]
pub struct ParticleGroups {
    groups: Vec<ParticleGroup>,
}

impl ParticleGroups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, group: ParticleGroup) {
        if !group.is_empty() {
            self.groups.push(group);
        }
    }

    pub fn update(&mut self) {
        for group in &mut self.groups {
            group.update();
        }
        self.groups.retain(|g| !g.is_empty());
    }

    pub fn draw(&self, out: &mut DrawList) {
        for group in &self.groups {
            group.draw(out);
        }
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn particle_count(&self) -> usize {
        self.groups.iter().map(ParticleGroup::len).sum()
    }
}
