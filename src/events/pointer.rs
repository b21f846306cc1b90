use super::Listener;
use crate::dom;
use bubble_core::{Command, PointerDown, PointerTarget, SharedCommands};
use glam::Vec2;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Queue a pointer-down in client coordinates.
///
/// The bubble layer is `pointer-events: none`, so taps reach the page
/// underneath; the target is classified here, while it still exists.
pub fn wire_pointerdown(window: &web::Window, commands: SharedCommands) -> Option<Listener> {
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        let Some(pe) = ev.dyn_ref::<web::PointerEvent>() else {
            return;
        };
        let target = if dom::is_interactive_target(ev.target()) {
            PointerTarget::Interactive
        } else {
            PointerTarget::Passive
        };
        commands.borrow_mut().push(Command::PointerDown(PointerDown {
            point: Vec2::new(pe.client_x() as f32, pe.client_y() as f32),
            at_ms: instant::now(),
            target,
        }));
    }) as Box<dyn FnMut(_)>);
    Listener::attach(window.clone().into(), "pointerdown", false, closure)
}
