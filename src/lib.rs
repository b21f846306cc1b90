#![cfg(target_arch = "wasm32")]
use bubble_core::{FieldConfig, Mount, MountState};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod host;
mod page;
mod render;
mod style;

use frame::SharedMount;
use host::WebHost;

/// Validated config for a container, honouring its population override.
fn config_for(container: &web::Element) -> FieldConfig {
    let mut config = FieldConfig::default();
    if let Some(n) = dom::population_override(container) {
        config = config.with_population(n);
    }
    match config.validate() {
        Ok(()) => config,
        Err(e) => {
            log::warn!("[field] invalid config ({}); using defaults", e);
            FieldConfig::default()
        }
    }
}

fn build_mount(container: &web::Element) -> anyhow::Result<SharedMount> {
    let config = config_for(container);
    let host = WebHost::new(container)?;
    let mount = Rc::new(RefCell::new(Mount::new(host, config)));
    frame::install_loop(&mount);
    Ok(mount)
}

/// Component-style adapter: the host framework calls `mount` from its mount
/// hook and `unmount` from its teardown hook.
#[wasm_bindgen]
pub struct BubbleField {
    mount: SharedMount,
}

#[wasm_bindgen]
impl BubbleField {
    #[wasm_bindgen(constructor)]
    pub fn new(container: web::Element) -> Result<BubbleField, JsValue> {
        build_mount(&container)
            .map(|mount| BubbleField { mount })
            .map_err(|e| JsValue::from_str(&format!("{:?}", e)))
    }

    /// Start the layer, or restart it after `unmount`. A no-op under reduced
    /// motion or while running.
    pub fn mount(&self) {
        self.mount.borrow_mut().mount();
    }

    /// Tear the layer down. Safe to call any number of times.
    pub fn unmount(&self) {
        self.mount.borrow_mut().teardown();
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.mount.borrow().state() == MountState::Running
    }
}

// Vanilla pages: mount every opted-in container for the page lifetime. A
// running layer is owned by its `pagehide` listener until teardown detaches it.
fn auto_mount(document: &web::Document) -> anyhow::Result<usize> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let nodes = document
        .query_selector_all(constants::AUTO_MOUNT_SELECTOR)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let mut mounted = 0;
    for i in 0..nodes.length() {
        let Some(container) = nodes.get(i).and_then(|n| n.dyn_into::<web::Element>().ok()) else {
            continue;
        };
        let mount = build_mount(&container)?;
        let state = mount.borrow_mut().mount();
        if !page::needs_pagehide_listener(state) {
            continue;
        }
        if let Some(l) = events::page::wire_pagehide(&window, mount.clone()) {
            mount.borrow_mut().host_mut().keep_listener(l);
            mounted += 1;
        }
    }
    Ok(mounted)
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("bubble-web starting");

    if let Some(document) = dom::window_document() {
        match auto_mount(&document) {
            Ok(n) => log::info!("[mount] auto-mounted {} layer(s)", n),
            Err(e) => log::error!("auto-mount error: {:?}", e),
        }
    }
    Ok(())
}
