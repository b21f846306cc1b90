//! Mount/teardown state machine shared by every page adapter.
//!
//! `Mount<H>` owns the field and the host; the host owns the platform
//! handles (listeners, the pending animation frame). Teardown releases all
//! of them and can be called any number of times; a later `mount` starts a
//! fresh field on the same host.

use crate::command::{CommandQueue, SharedCommands};
use crate::config::FieldConfig;
use crate::field::{Field, FrameStats, RenderSink};
use crate::geometry::Viewport;
use crate::obstacles::ObstacleSource;

/// Page events the field listens to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Resize,
    Scroll,
    PointerDown,
}

pub const LISTENED_EVENTS: [EventKind; 3] =
    [EventKind::Resize, EventKind::Scroll, EventKind::PointerDown];

/// Platform side of a mounted field.
///
/// Listener callbacks must only push into the given queue; frames are
/// delivered back through `Mount::frame`.
pub trait Host: ObstacleSource + RenderSink {
    fn prefers_reduced_motion(&self) -> bool;
    fn viewport(&self) -> Viewport;
    /// Number of on-page particle elements available for rendering.
    fn render_target_count(&self) -> usize;
    fn listen(&mut self, kind: EventKind, commands: SharedCommands);
    /// Detach every listener; returns how many were removed.
    fn unlisten_all(&mut self) -> usize;
    fn request_frame(&mut self);
    fn cancel_frame(&mut self);
    /// Create render targets for up to `count` particles. Runs on every
    /// mount that leaves the field running.
    fn acquire_targets(&mut self, _count: usize) {}
    /// Remove render targets the host created for this mount.
    fn release_targets(&mut self) {}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MountState {
    Idle,
    Running,
    /// Reduced motion requested: nothing attached, nothing scheduled.
    Inert,
    TornDown,
}

pub struct Mount<H: Host> {
    host: H,
    config: FieldConfig,
    commands: SharedCommands,
    field: Option<Field>,
    state: MountState,
}

impl<H: Host> Mount<H> {
    pub fn new(host: H, config: FieldConfig) -> Self {
        Self {
            host,
            config,
            commands: CommandQueue::shared(),
            field: None,
            state: MountState::Idle,
        }
    }

    pub fn state(&self) -> MountState {
        self.state
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn field(&self) -> Option<&Field> {
        self.field.as_ref()
    }

    pub fn commands(&self) -> SharedCommands {
        self.commands.clone()
    }

    /// Start the field from `Idle`, or restart it after a teardown.
    ///
    /// A running or inert mount is left as it is.
    pub fn mount(&mut self) -> MountState {
        match self.state {
            MountState::Running | MountState::Inert => return self.state,
            MountState::Idle | MountState::TornDown => {}
        }
        if self.host.prefers_reduced_motion() {
            log::info!("[mount] reduced motion requested; field stays inert");
            self.state = MountState::Inert;
            return self.state;
        }
        self.host.acquire_targets(self.config.population);
        let population = self.config.population.min(self.host.render_target_count());
        let config = self.config.clone().with_population(population);
        let field = Field::new(config, self.host.viewport());
        for kind in LISTENED_EVENTS {
            self.host.listen(kind, self.commands.clone());
        }
        self.host.request_frame();
        log::info!(
            "[mount] field running: particles={} viewport={:.0}x{:.0}",
            field.particles().len(),
            field.viewport().width,
            field.viewport().height
        );
        self.field = Some(field);
        self.state = MountState::Running;
        self.state
    }

    /// Deliver one animation frame. Ignored unless running.
    pub fn frame(&mut self, now_ms: f64) -> Option<FrameStats> {
        if self.state != MountState::Running {
            return None;
        }
        let field = self.field.as_mut()?;
        let pending = self.commands.borrow_mut().drain();
        let stats = field.tick(now_ms, pending, &mut self.host);
        if stats.popped > 0 || stats.respawned > 0 {
            log::debug!(
                "[field] popped={} respawned={} dt={:.2}",
                stats.popped,
                stats.respawned,
                stats.dt
            );
        }
        self.host.request_frame();
        Some(stats)
    }

    /// Cancel the frame, detach listeners, cancel respawns, drop the field.
    pub fn teardown(&mut self) {
        match self.state {
            MountState::TornDown => return,
            MountState::Running => {
                self.host.cancel_frame();
                let listeners = self.host.unlisten_all();
                let respawns = self
                    .field
                    .as_mut()
                    .map(|f| f.cancel_pending())
                    .unwrap_or(0);
                log::info!(
                    "[mount] torn down: listeners={} respawns cancelled={}",
                    listeners,
                    respawns
                );
            }
            MountState::Idle | MountState::Inert => {}
        }
        self.host.release_targets();
        self.commands.borrow_mut().clear();
        self.field = None;
        self.state = MountState::TornDown;
    }
}
