use crate::host::WebHost;
use bubble_core::Mount;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;

pub type SharedMount = Rc<RefCell<Mount<WebHost>>>;

/// Install the requestAnimationFrame callback driving `mount`.
///
/// The callback holds only a weak reference: once the owner drops the mount,
/// a stray frame does nothing. Scheduling itself goes through the host so
/// teardown can cancel it.
pub fn install_loop(mount: &SharedMount) {
    let weak = Rc::downgrade(mount);
    let tick = Closure::wrap(Box::new(move || {
        if let Some(m) = weak.upgrade() {
            m.borrow_mut().frame(instant::now());
        }
    }) as Box<dyn FnMut()>);
    mount.borrow_mut().host_mut().set_frame_callback(tick);
}
