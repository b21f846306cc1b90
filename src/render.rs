//! DOM render sink: one absolutely positioned element per particle.
//!
//! Writes only `transform`, size and the popping class, and only touches
//! size/class when they change, so a frame never forces layout.

use crate::constants::{BUBBLE_CLASS, BUBBLE_TAG, POPPING_CLASS};
use crate::style;
use bubble_core::RenderFrame;
use wasm_bindgen::JsCast;
use web_sys as web;

struct BubbleElement {
    el: web::HtmlElement,
    size: f32,
    popping: bool,
}

#[derive(Default)]
pub struct BubbleElements {
    items: Vec<BubbleElement>,
}

impl BubbleElements {
    /// Top up `container` to `count` bubble elements.
    pub fn fill(&mut self, document: &web::Document, container: &web::Element, count: usize) {
        while self.items.len() < count {
            let el = match document
                .create_element(BUBBLE_TAG)
                .ok()
                .and_then(|e| e.dyn_into::<web::HtmlElement>().ok())
            {
                Some(el) => el,
                None => {
                    log::error!("[render] could not create bubble element");
                    return;
                }
            };
            el.set_class_name(BUBBLE_CLASS);
            _ = el.set_attribute("aria-hidden", "true");
            if container.append_child(&el).is_err() {
                log::error!("[render] could not attach bubble element");
                return;
            }
            self.items.push(BubbleElement {
                el,
                size: 0.0,
                popping: false,
            });
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn write(&mut self, index: usize, frame: &RenderFrame) {
        let Some(item) = self.items.get_mut(index) else {
            return;
        };
        let css = item.el.style();
        if item.size != frame.size {
            let px = style::px_value(frame.size);
            _ = css.set_property("width", &px);
            _ = css.set_property("height", &px);
            item.size = frame.size;
        }
        _ = css.set_property("transform", &style::transform_value(frame.position, frame.scale));
        if item.popping != frame.popping {
            _ = item
                .el
                .class_list()
                .toggle_with_force(POPPING_CLASS, frame.popping);
            item.popping = frame.popping;
        }
    }

    /// Remove every element we created.
    pub fn remove_all(&mut self) {
        for item in self.items.drain(..) {
            item.el.remove();
        }
    }
}
