use crate::constants::{INTERACTIVE_SELECTOR, OBSTACLE_SELECTOR, POPULATION_ATTR, REDUCED_MOTION_QUERY};
use crate::style;
use bubble_core::{Rect, Viewport};
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Current layout viewport in CSS px; zero-sized if the window reports nothing.
pub fn viewport(window: &web::Window) -> Viewport {
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    Viewport::new(w as f32, h as f32)
}

pub fn prefers_reduced_motion(window: &web::Window) -> bool {
    window
        .match_media(REDUCED_MOTION_QUERY)
        .ok()
        .flatten()
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

/// True if the event target is, or sits inside, a control we must not steal from.
pub fn is_interactive_target(target: Option<web::EventTarget>) -> bool {
    target
        .and_then(|t| t.dyn_into::<web::Element>().ok())
        .and_then(|el| el.closest(INTERACTIVE_SELECTOR).ok().flatten())
        .is_some()
}

/// Push the client rect of every obstacle element into `out`.
pub fn measure_obstacles(document: &web::Document, out: &mut Vec<Rect>) {
    let list = match document.query_selector_all(OBSTACLE_SELECTOR) {
        Ok(l) => l,
        Err(e) => {
            log::warn!("[obstacles] selector query failed: {:?}", e);
            return;
        }
    };
    for i in 0..list.length() {
        if let Some(el) = list.get(i).and_then(|n| n.dyn_into::<web::Element>().ok()) {
            let r = el.get_bounding_client_rect();
            out.push(Rect::new(
                r.left() as f32,
                r.top() as f32,
                r.width() as f32,
                r.height() as f32,
            ));
        }
    }
}

pub fn population_override(container: &web::Element) -> Option<usize> {
    container
        .get_attribute(POPULATION_ATTR)
        .and_then(|raw| style::parse_population(&raw))
}
