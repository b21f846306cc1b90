//! Inbound command queue filled by event listeners and drained once per frame.

use crate::geometry::Viewport;
use crate::pointer::PointerDown;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    Resize(Viewport),
    Scroll,
    PointerDown(PointerDown),
}

#[derive(Debug, Default)]
pub struct CommandQueue {
    items: VecDeque<Command>,
    // Consecutive scroll events collapse into one; only the flag matters.
    scroll_pending: bool,
}

/// Queue shared between listeners and the frame callback on the UI thread.
pub type SharedCommands = Rc<RefCell<CommandQueue>>;

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedCommands {
        Rc::new(RefCell::new(Self::new()))
    }

    pub fn push(&mut self, cmd: Command) {
        if let Command::Scroll = cmd {
            if self.scroll_pending {
                return;
            }
            self.scroll_pending = true;
        }
        self.items.push_back(cmd);
    }

    /// Take every queued command in arrival order.
    pub fn drain(&mut self) -> Vec<Command> {
        self.scroll_pending = false;
        self.items.drain(..).collect()
    }

    pub fn clear(&mut self) {
        self.scroll_pending = false;
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
