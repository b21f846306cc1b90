pub mod page;
pub mod pointer;

use crate::dom;
use bubble_core::{Command, EventKind, SharedCommands};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// A listener we attached and must detach on teardown.
///
/// Owns the closure; dropping it without `detach` would leave JS holding a
/// dangling function.
pub struct Listener {
    target: web::EventTarget,
    event: &'static str,
    capture: bool,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl Listener {
    fn attach(
        target: web::EventTarget,
        event: &'static str,
        capture: bool,
        closure: Closure<dyn FnMut(web::Event)>,
    ) -> Option<Self> {
        let opts = web::AddEventListenerOptions::new();
        opts.set_passive(true);
        opts.set_capture(capture);
        match target.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            closure.as_ref().unchecked_ref(),
            &opts,
        ) {
            Ok(()) => Some(Self {
                target,
                event,
                capture,
                closure,
            }),
            Err(e) => {
                log::error!("[events] failed to attach {}: {:?}", event, e);
                None
            }
        }
    }

    pub fn detach(self) {
        _ = self.target.remove_event_listener_with_callback_and_bool(
            self.event,
            self.closure.as_ref().unchecked_ref(),
            self.capture,
        );
    }
}

/// Attach the listener for `kind`. Handlers only enqueue commands.
pub fn wire(kind: EventKind, window: &web::Window, commands: SharedCommands) -> Option<Listener> {
    match kind {
        EventKind::Resize => wire_resize(window, commands),
        EventKind::Scroll => wire_scroll(window, commands),
        EventKind::PointerDown => pointer::wire_pointerdown(window, commands),
    }
}

fn wire_resize(window: &web::Window, commands: SharedCommands) -> Option<Listener> {
    let w = window.clone();
    let closure = Closure::wrap(Box::new(move |_ev: web::Event| {
        commands
            .borrow_mut()
            .push(Command::Resize(dom::viewport(&w)));
    }) as Box<dyn FnMut(_)>);
    Listener::attach(window.clone().into(), "resize", false, closure)
}

// Capture phase so scrolls inside nested containers are seen too; they do
// not bubble to the window.
fn wire_scroll(window: &web::Window, commands: SharedCommands) -> Option<Listener> {
    let closure = Closure::wrap(Box::new(move |_ev: web::Event| {
        commands.borrow_mut().push(Command::Scroll);
    }) as Box<dyn FnMut(_)>);
    Listener::attach(window.clone().into(), "scroll", true, closure)
}
