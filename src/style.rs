use crate::constants::MAX_POPULATION;
use glam::Vec2;

/// CSS `transform` placing a bubble's top-left at `position` with a centered scale.
#[inline]
pub fn transform_value(position: Vec2, scale: f32) -> String {
    format!(
        "translate3d({:.2}px, {:.2}px, 0) scale({:.4})",
        position.x, position.y, scale
    )
}

#[inline]
pub fn px_value(v: f32) -> String {
    format!("{:.1}px", v)
}

/// Parse the `data-bubble-count` override. Garbage is ignored, huge values capped.
pub fn parse_population(raw: &str) -> Option<usize> {
    raw.trim()
        .parse::<usize>()
        .ok()
        .map(|n| n.min(MAX_POPULATION))
}
