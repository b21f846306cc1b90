use crate::geometry::circle_contains;
use crate::particle::Particle;
use glam::Vec2;

/// What the pointer landed on, as classified by the page adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerTarget {
    /// Plain page content; bubbles may be popped.
    Passive,
    /// A button, link, input or opted-out container. Never steals the click.
    Interactive,
}

/// A pointer-down event in viewport px.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerDown {
    pub point: Vec2,
    pub at_ms: f64,
    pub target: PointerTarget,
}

/// Index of the first alive particle whose circle contains `point`.
///
/// First match in store order wins, not the nearest.
pub fn hit_test(particles: &[Particle], point: Vec2) -> Option<usize> {
    particles
        .iter()
        .position(|p| p.is_alive() && circle_contains(p.center(), p.radius(), point))
}

/// Resolve a pointer-down to the particle it should pop, if any.
pub fn pick(particles: &[Particle], ev: &PointerDown) -> Option<usize> {
    match ev.target {
        PointerTarget::Interactive => None,
        PointerTarget::Passive => hit_test(particles, ev.point),
    }
}
