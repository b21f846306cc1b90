use crate::config::FieldConfig;
use crate::geometry::{Rect, Viewport};
use glam::Vec2;
use rand::prelude::*;
use std::f32::consts::TAU;

/// Whether a particle takes part in integration and hit testing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PopState {
    Alive,
    /// Excluded from physics and hit testing until respawned.
    Popping { since_ms: f64 },
}

/// A single bubble.
///
/// Fields:
/// - `position`: top-left corner in viewport px (not the center)
/// - `velocity`: drift speed in px per normalized step
/// - `size`: diameter in px, fixed while alive
/// - `phase_seed`: constant in `[0, 2π)` desynchronizing drift and pulse
#[derive(Clone, Debug)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: f32,
    pub phase_seed: f32,
    pub pop: PopState,
}

impl Particle {
    #[inline]
    pub fn is_alive(&self) -> bool {
        matches!(self.pop, PopState::Alive)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.position + Vec2::splat(self.size * 0.5)
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.size * 0.5
    }
}

/// Random unit direction scaled by a speed from the spawn range.
pub fn random_velocity<R: Rng + ?Sized>(rng: &mut R, config: &FieldConfig) -> Vec2 {
    let angle = rng.gen_range(0.0..TAU);
    let speed = if config.spawn_speed_max > config.spawn_speed_min {
        rng.gen_range(config.spawn_speed_min..=config.spawn_speed_max)
    } else {
        config.spawn_speed_min
    };
    Vec2::new(angle.cos(), angle.sin()) * speed
}

/// Uniform corner for a square of `size` inside the viewport, resampled up to
/// `attempts` times while it lands inside a padded obstacle.
///
/// Returns the last sample when every attempt collides; the integrator pushes
/// it out on the next step.
pub fn random_corner<R: Rng + ?Sized>(
    rng: &mut R,
    viewport: Viewport,
    size: f32,
    obstacles: &[Rect],
    padding: f32,
    attempts: usize,
) -> Vec2 {
    let max = viewport.max_corner(size);
    let mut corner = Vec2::ZERO;
    for _ in 0..attempts.max(1) {
        corner = Vec2::new(rng.gen::<f32>() * max.x, rng.gen::<f32>() * max.y);
        let blocked = obstacles
            .iter()
            .any(|r| r.inflate(padding).overlaps_square(corner, size));
        if !blocked {
            break;
        }
    }
    corner
}

/// Owns every particle of one field. Particles are recycled in place and
/// never reallocated while the field lives.
#[derive(Clone, Debug, Default)]
pub struct ParticleStore {
    particles: Vec<Particle>,
}

impl ParticleStore {
    /// Create `config.population` particles at random positions inside `viewport`.
    pub fn populate<R: Rng + ?Sized>(config: &FieldConfig, viewport: Viewport, rng: &mut R) -> Self {
        let particles = (0..config.population)
            .map(|_| {
                let size = if config.size_max > config.size_min {
                    rng.gen_range(config.size_min..=config.size_max)
                } else {
                    config.size_min
                };
                let max = viewport.max_corner(size);
                Particle {
                    position: Vec2::new(rng.gen::<f32>() * max.x, rng.gen::<f32>() * max.y),
                    velocity: random_velocity(rng, config),
                    size,
                    phase_seed: rng.gen_range(0.0..TAU),
                    pop: PopState::Alive,
                }
            })
            .collect();
        Self { particles }
    }

    /// Build a store from explicit particles.
    pub fn from_particles(particles: Vec<Particle>) -> Self {
        Self { particles }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Particle> {
        self.particles.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Particle> {
        self.particles.iter_mut()
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    /// Pull every particle back inside a (possibly shrunken) viewport.
    pub fn clamp_into(&mut self, viewport: Viewport) {
        for p in &mut self.particles {
            p.position = viewport.clamp_corner(p.position, p.size);
        }
    }
}
