use crate::dom;
use crate::events::{self, Listener};
use crate::render::BubbleElements;
use bubble_core::{
    EventKind, Host, ObstacleSource, Rect, RenderFrame, RenderSink, SharedCommands, Viewport,
};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Browser implementation of `Host` for one mounted layer.
///
/// Holds every platform handle the mount creates: listeners, the frame
/// callback and its pending request id, and the bubble elements. The frame
/// callback survives teardown so a remount can schedule it again.
pub struct WebHost {
    window: web::Window,
    document: web::Document,
    container: web::Element,
    reduced_motion: bool,
    bubbles: BubbleElements,
    listeners: Vec<Listener>,
    frame_callback: Option<Closure<dyn FnMut()>>,
    frame_id: Option<i32>,
}

impl WebHost {
    pub fn new(container: &web::Element) -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| anyhow::anyhow!("no document"))?;
        let reduced_motion = dom::prefers_reduced_motion(&window);
        Ok(Self {
            window,
            document,
            container: container.clone(),
            reduced_motion,
            bubbles: BubbleElements::default(),
            listeners: Vec::new(),
            frame_callback: None,
            frame_id: None,
        })
    }

    /// Install the callback `request_frame` schedules.
    pub fn set_frame_callback(&mut self, callback: Closure<dyn FnMut()>) {
        self.frame_callback = Some(callback);
    }

    /// Hold a page-level listener so `unlisten_all` detaches it with the rest.
    pub fn keep_listener(&mut self, listener: Listener) {
        self.listeners.push(listener);
    }
}

impl ObstacleSource for WebHost {
    fn measure(&self, out: &mut Vec<Rect>) {
        dom::measure_obstacles(&self.document, out);
    }
}

impl RenderSink for WebHost {
    fn render(&mut self, index: usize, frame: &RenderFrame) {
        self.bubbles.write(index, frame);
    }
}

impl Host for WebHost {
    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn viewport(&self) -> Viewport {
        dom::viewport(&self.window)
    }

    fn render_target_count(&self) -> usize {
        self.bubbles.len()
    }

    fn listen(&mut self, kind: EventKind, commands: SharedCommands) {
        if let Some(l) = events::wire(kind, &self.window, commands) {
            self.listeners.push(l);
        }
    }

    fn unlisten_all(&mut self) -> usize {
        let n = self.listeners.len();
        for l in self.listeners.drain(..) {
            l.detach();
        }
        n
    }

    fn request_frame(&mut self) {
        if let Some(cb) = &self.frame_callback {
            self.frame_id = self
                .window
                .request_animation_frame(cb.as_ref().unchecked_ref())
                .ok();
        }
    }

    fn cancel_frame(&mut self) {
        if let Some(id) = self.frame_id.take() {
            _ = self.window.cancel_animation_frame(id);
        }
    }

    fn acquire_targets(&mut self, count: usize) {
        self.bubbles.fill(&self.document, &self.container, count);
    }

    fn release_targets(&mut self) {
        self.bubbles.remove_all();
    }
}

impl Drop for WebHost {
    fn drop(&mut self) {
        self.cancel_frame();
        self.unlisten_all();
        self.release_targets();
    }
}
