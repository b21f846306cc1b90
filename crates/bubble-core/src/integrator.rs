//! Per-particle time stepping: drift, integration, wall and obstacle bounces,
//! speed governance.
//!
//! `step` is called once per alive particle per frame. It never touches
//! popping particles and never reads the DOM; everything it needs arrives
//! through `StepContext`.

use crate::config::FieldConfig;
use crate::constants::{
    DRIFT_AMPLITUDES, DRIFT_FREQUENCIES, NOMINAL_FRAME_MS, PULSE_AMPLITUDE, PULSE_FREQUENCY,
};
use crate::geometry::{Rect, Viewport};
use crate::particle::{random_velocity, Particle};
use glam::Vec2;
use rand::Rng;

// Pushed-out particles end this far from the face so float rounding cannot
// leave them touching-but-overlapping.
const SEPARATION_EPSILON: f32 = 1e-3;

/// Read-only inputs shared by every particle in a frame.
pub struct StepContext<'a> {
    /// Normalized step: 1.0 == one nominal 60 fps frame.
    pub dt: f32,
    /// Seconds since the field was mounted; drives drift and pulse.
    pub elapsed_sec: f32,
    pub viewport: Viewport,
    pub obstacles: &'a [Rect],
    pub config: &'a FieldConfig,
}

/// Convert a frame interval to a normalized step, capping long pauses.
#[inline]
pub fn normalize_dt(elapsed_ms: f64, max_frame_ms: f64) -> f32 {
    (elapsed_ms.clamp(0.0, max_frame_ms) / NOMINAL_FRAME_MS) as f32
}

/// Smooth pseudo-random drift from summed sine/cosine terms.
///
/// Deterministic in `(elapsed_sec, phase_seed)`, so neighbouring frames
/// change gently instead of jittering.
pub fn drift(elapsed_sec: f32, phase_seed: f32) -> Vec2 {
    let mut out = Vec2::ZERO;
    for (i, (amp, freq)) in DRIFT_AMPLITUDES
        .iter()
        .zip(DRIFT_FREQUENCIES.iter())
        .enumerate()
    {
        let k = (i + 1) as f32;
        out.x += amp * (elapsed_sec * freq + phase_seed * k).sin();
        out.y += amp * (elapsed_sec * freq * 1.13 + phase_seed * k + 0.7).cos();
    }
    out
}

/// Render-only breathing scale around 1.0.
#[inline]
pub fn scale_pulse(elapsed_sec: f32, phase_seed: f32) -> f32 {
    1.0 + PULSE_AMPLITUDE * (elapsed_sec * PULSE_FREQUENCY + phase_seed).sin()
}

/// Advance one alive particle by `ctx.dt`.
pub fn step<R: Rng + ?Sized>(p: &mut Particle, ctx: &StepContext<'_>, rng: &mut R) {
    if !p.is_alive() {
        return;
    }
    let d = drift(ctx.elapsed_sec, p.phase_seed);
    p.position += (p.velocity + d) * ctx.dt;

    reflect_walls(p, ctx.viewport, ctx.config.restitution);

    if !ctx.obstacles.is_empty() {
        for obstacle in ctx.obstacles {
            resolve_obstacle(p, obstacle, ctx.viewport, ctx.config, rng);
        }
        p.position = ctx.viewport.clamp_corner(p.position, p.size);
    }

    govern_speed(p, ctx.config, rng);
}

/// Clamp to the viewport edges, sending the crossing component back inward.
pub fn reflect_walls(p: &mut Particle, viewport: Viewport, restitution: f32) {
    let max = viewport.max_corner(p.size);
    if p.position.x < 0.0 {
        p.position.x = 0.0;
        p.velocity.x = p.velocity.x.abs() * restitution;
    } else if p.position.x > max.x {
        p.position.x = max.x;
        p.velocity.x = -p.velocity.x.abs() * restitution;
    }
    if p.position.y < 0.0 {
        p.position.y = 0.0;
        p.velocity.y = p.velocity.y.abs() * restitution;
    } else if p.position.y > max.y {
        p.position.y = max.y;
        p.velocity.y = -p.velocity.y.abs() * restitution;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Face {
    Top,
    Bottom,
    Left,
    Right,
}

/// Push the particle out of one padded obstacle through its shallowest face.
///
/// Faces whose exit position would leave the viewport are skipped, so a band
/// flush with an edge (a header, a footer) always ejects toward open space.
/// Returns whether a collision was resolved.
pub fn resolve_obstacle<R: Rng + ?Sized>(
    p: &mut Particle,
    obstacle: &Rect,
    viewport: Viewport,
    config: &FieldConfig,
    rng: &mut R,
) -> bool {
    let r = obstacle.inflate(config.obstacle_padding);
    if !r.overlaps_square(p.position, p.size) {
        return false;
    }
    let max = viewport.max_corner(p.size);
    let above = r.top - p.size - SEPARATION_EPSILON;
    let below = r.bottom() + SEPARATION_EPSILON;
    let left_of = r.left - p.size - SEPARATION_EPSILON;
    let right_of = r.right() + SEPARATION_EPSILON;

    // Ties prefer the vertical axis, then top over bottom and left over right.
    let faces = [
        (Face::Top, p.position.y + p.size - r.top, above >= 0.0),
        (Face::Bottom, r.bottom() - p.position.y, below <= max.y),
        (Face::Left, p.position.x + p.size - r.left, left_of >= 0.0),
        (Face::Right, r.right() - p.position.x, right_of <= max.x),
    ];
    let shallowest = |fits: bool| {
        faces
            .iter()
            .filter(|f| f.2 || !fits)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|f| f.0)
    };
    // No face leads back into the viewport only when the obstacle covers it.
    let Some(face) = shallowest(true).or_else(|| shallowest(false)) else {
        return false;
    };

    let damping = config.obstacle_damping;
    match face {
        Face::Top => {
            p.position.y = above;
            p.velocity.y = -p.velocity.y.abs() * damping;
        }
        Face::Bottom => {
            p.position.y = below;
            p.velocity.y = p.velocity.y.abs() * damping;
        }
        Face::Left => {
            p.position.x = left_of;
            p.velocity.x = -p.velocity.x.abs() * damping;
        }
        Face::Right => {
            p.position.x = right_of;
            p.velocity.x = p.velocity.x.abs() * damping;
        }
    }

    let jitter = config.obstacle_perturbation.abs();
    if jitter > 0.0 {
        p.velocity += Vec2::new(
            rng.gen_range(-jitter..=jitter),
            rng.gen_range(-jitter..=jitter),
        );
    }
    true
}

/// Keep `|velocity|` within `[min_speed, max_speed]`.
///
/// A stalled particle gets a fresh random heading at spawn speed rather than
/// a scaled-up version of its near-zero vector.
pub fn govern_speed<R: Rng + ?Sized>(p: &mut Particle, config: &FieldConfig, rng: &mut R) {
    let speed = p.velocity.length();
    if speed > config.max_speed {
        p.velocity *= config.max_speed / speed;
    } else if speed < config.min_speed {
        p.velocity = random_velocity(rng, config);
    }
}
