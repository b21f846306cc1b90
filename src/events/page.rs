use super::Listener;
use crate::frame::SharedMount;
use crate::page::{pagehide_action, PageHideAction};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Tear `mount` down when the page is really going away.
///
/// The closure owns the mount; teardown detaches this listener and so
/// releases it.
pub fn wire_pagehide(window: &web::Window, mount: SharedMount) -> Option<Listener> {
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        let persisted = ev
            .dyn_ref::<web::PageTransitionEvent>()
            .map(|e| e.persisted())
            .unwrap_or(false);
        match pagehide_action(persisted) {
            PageHideAction::Keep => log::debug!("[mount] page cached; layer kept"),
            PageHideAction::Teardown => mount.borrow_mut().teardown(),
        }
    }) as Box<dyn FnMut(_)>);
    Listener::attach(window.clone().into(), "pagehide", false, closure)
}
