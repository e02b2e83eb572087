//! Host event feed definitions
//! Lifecycle and input notifications, serialized with the tick callback.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::PlayerSlot;

/// Events delivered by the host dispatch loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostEvent {
    /// Player finished connecting and is fully in the server
    ConnectFull { slot: PlayerSlot },

    /// Player left the server
    Disconnect { slot: PlayerSlot },

    /// Player died
    Death { slot: PlayerSlot },

    /// Round ended for everyone
    RoundEnd,

    /// Player pinged a world point as their grapple target
    TargetDesignated {
        slot: PlayerSlot,
        target: TargetPayload,
    },
}

/// Designated target position, either structured or host-encoded.
///
/// Some hosts hand the ping location over as three numeric fields, others as
/// a single `"x y z"` string; both arrive here and resolve to the same
/// vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TargetPayload {
    /// Structured world position
    Point { x: f32, y: f32, z: f32 },
    /// Space-delimited `"x y z"` form
    Encoded(String),
}

/// Resolve a designated target into a world position.
///
/// Malformed encoded payloads resolve to the zero vector instead of
/// erroring; the resolver then steers toward the origin like any other
/// point.
pub fn resolve_target(target: &TargetPayload) -> Vec3 {
    match target {
        TargetPayload::Point { x, y, z } => Vec3::new(*x, *y, *z),
        TargetPayload::Encoded(raw) => match parse_triple(raw) {
            Some(point) => point,
            None => {
                warn!(payload = %raw, "malformed target payload, resolving to origin");
                Vec3::ZERO
            }
        },
    }
}

fn parse_triple(raw: &str) -> Option<Vec3> {
    let mut parts = raw.split_whitespace();
    let x = parts.next()?.parse::<f32>().ok()?;
    let y = parts.next()?.parse::<f32>().ok()?;
    let z = parts.next()?.parse::<f32>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Vec3::new(x, y, z))
}
