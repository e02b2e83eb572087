//! Per-player grapple records

use std::collections::HashMap;

use glam::Vec3;
use tracing::warn;

use crate::host::{PlayerSlot, TetherId};

/// Grapple status for one player slot.
///
/// Inactive records carry no target and no tether; both are populated only
/// while a grapple is live.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrappleState {
    /// Steering and tether logic apply this tick
    pub active: bool,
    /// World point the player is pulled toward
    pub target: Option<Vec3>,
    /// Visual tether, spawned lazily on the first resolved tick
    pub tether: Option<TetherId>,
}

/// Slot-keyed grapple records, scoped to the mod's lifetime.
///
/// Records are created on connect and dropped on disconnect, so the key set
/// stays a subset of connected non-bot players.
#[derive(Debug, Default)]
pub struct GrappleRegistry {
    states: HashMap<PlayerSlot, GrappleState>,
}

impl GrappleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a default inactive record if the slot has none.
    pub fn ensure(&mut self, slot: PlayerSlot) {
        self.states.entry(slot).or_default();
    }

    pub fn get(&self, slot: PlayerSlot) -> Option<&GrappleState> {
        self.states.get(&slot)
    }

    pub fn get_mut(&mut self, slot: PlayerSlot) -> Option<&mut GrappleState> {
        self.states.get_mut(&slot)
    }

    /// Drop a slot's record. Callers detach first so the tether entity is
    /// destroyed before its handle is dropped here.
    pub fn remove(&mut self, slot: PlayerSlot) {
        if let Some(state) = self.states.remove(&slot) {
            if state.tether.is_some() {
                warn!(slot, "removed grapple record still held a tether handle");
            }
        }
    }
}
