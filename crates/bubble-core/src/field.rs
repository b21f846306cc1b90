//! The aggregate root of one mounted bubble layer.
//!
//! A `Field` owns its particles, obstacle snapshot, pending respawns and RNG.
//! It is created on mount and dropped on teardown by whoever mounted it;
//! nothing here is process-wide.
//!
//! Per frame the data flow is strictly linear:
//! commands -> (re)measure obstacles if stale -> settle respawns -> step -> render.

use crate::command::Command;
use crate::config::FieldConfig;
use crate::geometry::{Rect, Viewport};
use crate::integrator::{self, normalize_dt, scale_pulse, StepContext};
use crate::obstacles::{ObstacleSource, ObstacleTracker};
use crate::particle::{Particle, ParticleStore};
use crate::pointer::{pick, PointerDown};
use crate::pop::{PopController, RespawnToken};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Per-particle output written to the page every frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderFrame {
    pub position: Vec2,
    pub size: f32,
    /// Breathing scale; exactly 1.0 while popping.
    pub scale: f32,
    pub popping: bool,
}

/// Receives render output. Does no physics.
pub trait RenderSink {
    fn render(&mut self, index: usize, frame: &RenderFrame);
}

/// A pop caused by a pointer command, with the handle of its respawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Popped {
    pub index: usize,
    pub token: RespawnToken,
}

/// What happened during one `tick`, mostly for logging and tests.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameStats {
    pub dt: f32,
    pub stepped: usize,
    pub popped: usize,
    pub respawned: usize,
    pub obstacles_refreshed: bool,
}

pub struct Field {
    config: FieldConfig,
    particles: ParticleStore,
    obstacles: ObstacleTracker,
    pops: PopController,
    rng: StdRng,
    viewport: Viewport,
    started_ms: Option<f64>,
    last_frame_ms: Option<f64>,
}

impl Field {
    /// Populate a field inside `viewport` using `config.population` particles.
    pub fn new(config: FieldConfig, viewport: Viewport) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let particles = ParticleStore::populate(&config, viewport, &mut rng);
        Self::from_parts(config, viewport, particles, rng)
    }

    /// Build a field around explicit particles.
    pub fn with_particles(config: FieldConfig, viewport: Viewport, particles: Vec<Particle>) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::from_parts(config, viewport, ParticleStore::from_particles(particles), rng)
    }

    fn from_parts(
        config: FieldConfig,
        viewport: Viewport,
        particles: ParticleStore,
        rng: StdRng,
    ) -> Self {
        let obstacles = ObstacleTracker::new(config.obstacle_refresh_ms);
        Self {
            config,
            particles,
            obstacles,
            pops: PopController::new(),
            rng,
            viewport,
            started_ms: None,
            last_frame_ms: None,
        }
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn particles(&self) -> &[Particle] {
        self.particles.as_slice()
    }

    pub fn obstacles(&self) -> &[Rect] {
        self.obstacles.snapshot()
    }

    pub fn pops(&self) -> &PopController {
        &self.pops
    }

    pub fn is_obstacle_snapshot_stale(&self) -> bool {
        self.obstacles.is_stale()
    }

    /// Apply one inbound command. Never runs physics.
    ///
    /// Returns the pop caused by a pointer command, if any.
    pub fn apply(&mut self, cmd: Command) -> Option<Popped> {
        match cmd {
            Command::Resize(viewport) => {
                self.viewport = viewport;
                self.particles.clamp_into(viewport);
                self.obstacles.mark_stale();
                None
            }
            Command::Scroll => {
                self.obstacles.mark_stale();
                None
            }
            Command::PointerDown(ev) => self.pointer_down(&ev),
        }
    }

    /// Hit-test a pointer-down and pop the first alive particle under it.
    pub fn pointer_down(&mut self, ev: &PointerDown) -> Option<Popped> {
        // A respawn due before the tap must already count as alive.
        self.settle(ev.at_ms);
        let index = pick(self.particles.as_slice(), ev)?;
        self.pops
            .pop(&mut self.particles, index, ev.at_ms, self.config.pop_duration_ms)
            .map(|token| Popped { index, token })
    }

    /// Cancel one pending respawn. The particle stays popping.
    pub fn cancel_respawn(&mut self, token: RespawnToken) -> bool {
        self.pops.cancel(token)
    }

    /// Apply respawns due at or before `now_ms`.
    pub fn settle(&mut self, now_ms: f64) -> usize {
        self.pops.settle(
            &mut self.particles,
            now_ms,
            self.viewport,
            self.obstacles.snapshot(),
            &self.config,
            &mut self.rng,
        )
    }

    /// Run one scheduled frame at `now_ms`.
    pub fn tick<S, I>(&mut self, now_ms: f64, commands: I, surface: &mut S) -> FrameStats
    where
        S: ObstacleSource + RenderSink,
        I: IntoIterator<Item = Command>,
    {
        let mut stats = FrameStats::default();
        for cmd in commands {
            if self.apply(cmd).is_some() {
                stats.popped += 1;
            }
        }

        let started = *self.started_ms.get_or_insert(now_ms);
        stats.dt = match self.last_frame_ms {
            Some(last) => normalize_dt(now_ms - last, self.config.max_frame_ms),
            None => 1.0,
        };
        self.last_frame_ms = Some(now_ms);
        let elapsed_sec = ((now_ms - started) / 1000.0) as f32;

        if self.obstacles.should_refresh(now_ms) {
            self.obstacles.refresh(now_ms, self.viewport, &*surface);
            stats.obstacles_refreshed = true;
        }

        stats.respawned = self.settle(now_ms);

        let ctx = StepContext {
            dt: stats.dt,
            elapsed_sec,
            viewport: self.viewport,
            obstacles: self.obstacles.snapshot(),
            config: &self.config,
        };
        for p in self.particles.iter_mut() {
            if p.is_alive() {
                integrator::step(p, &ctx, &mut self.rng);
                stats.stepped += 1;
            }
        }

        for (i, p) in self.particles.iter().enumerate() {
            let popping = !p.is_alive();
            surface.render(
                i,
                &RenderFrame {
                    position: p.position,
                    size: p.size,
                    scale: if popping {
                        1.0
                    } else {
                        scale_pulse(elapsed_sec, p.phase_seed)
                    },
                    popping,
                },
            );
        }
        stats
    }

    /// Cancel every in-flight respawn. Safe to call repeatedly.
    pub fn cancel_pending(&mut self) -> usize {
        self.pops.cancel_all()
    }
}
