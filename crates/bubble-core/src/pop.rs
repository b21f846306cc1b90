//! Pop/respawn state machine: `Alive -> Popping -> Alive`.
//!
//! A pop schedules an explicit respawn transition due `pop_duration_ms`
//! later. Transitions are applied by `settle` from the frame loop and can be
//! cancelled by token, so teardown never leaves a callback behind.

use crate::config::FieldConfig;
use crate::constants::RESPAWN_PLACEMENT_ATTEMPTS;
use crate::geometry::{Rect, Viewport};
use crate::particle::{random_corner, random_velocity, ParticleStore, PopState};
use fnv::FnvHashMap;
use rand::Rng;

/// Handle identifying one scheduled respawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RespawnToken(u64);

#[derive(Clone, Copy, Debug)]
struct PendingRespawn {
    token: RespawnToken,
    due_ms: f64,
}

#[derive(Debug, Default)]
pub struct PopController {
    pending: FnvHashMap<usize, PendingRespawn>,
    next_token: u64,
}

impl PopController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start popping particle `index` at `now_ms`.
    ///
    /// Returns `None` when the index is out of range or the particle is
    /// already popping.
    pub fn pop(
        &mut self,
        store: &mut ParticleStore,
        index: usize,
        now_ms: f64,
        duration_ms: f64,
    ) -> Option<RespawnToken> {
        let particle = store.get_mut(index)?;
        if !particle.is_alive() {
            return None;
        }
        particle.pop = PopState::Popping { since_ms: now_ms };
        let token = RespawnToken(self.next_token);
        self.next_token = self.next_token.wrapping_add(1);
        self.pending.insert(
            index,
            PendingRespawn {
                token,
                due_ms: now_ms + duration_ms,
            },
        );
        log::debug!("[pop] particle {} popped at {:.1}ms", index, now_ms);
        Some(token)
    }

    /// Apply every respawn due at or before `now_ms`; returns how many ran.
    pub fn settle<R: Rng + ?Sized>(
        &mut self,
        store: &mut ParticleStore,
        now_ms: f64,
        viewport: Viewport,
        obstacles: &[Rect],
        config: &FieldConfig,
        rng: &mut R,
    ) -> usize {
        let mut due: Vec<usize> = self
            .pending
            .iter()
            .filter(|(_, p)| p.due_ms <= now_ms)
            .map(|(i, _)| *i)
            .collect();
        // Hash order is arbitrary; keep RNG consumption reproducible.
        due.sort_unstable();
        for index in &due {
            self.pending.remove(index);
            if let Some(p) = store.get_mut(*index) {
                p.position = random_corner(
                    rng,
                    viewport,
                    p.size,
                    obstacles,
                    config.obstacle_padding,
                    RESPAWN_PLACEMENT_ATTEMPTS,
                );
                p.velocity = random_velocity(rng, config);
                p.pop = PopState::Alive;
            }
        }
        due.len()
    }

    /// Cancel one scheduled respawn. The particle stays `Popping`.
    pub fn cancel(&mut self, token: RespawnToken) -> bool {
        let index = self
            .pending
            .iter()
            .find(|(_, p)| p.token == token)
            .map(|(i, _)| *i);
        match index {
            Some(i) => self.pending.remove(&i).is_some(),
            None => false,
        }
    }

    /// Drop every pending respawn; returns how many were cancelled.
    pub fn cancel_all(&mut self) -> usize {
        let n = self.pending.len();
        self.pending.clear();
        n
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Due time of the respawn scheduled for `index`, if any.
    pub fn due_at(&self, index: usize) -> Option<f64> {
        self.pending.get(&index).map(|p| p.due_ms)
    }
}
