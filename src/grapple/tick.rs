//! Per-tick grapple resolver
//! Steers active players toward their targets and keeps tethers anchored.

use std::collections::BTreeMap;

use glam::Vec3;
use tracing::{debug, info, warn};

use crate::host::{Buttons, HostWorld, PlayerSlot};
use crate::util::time::tick_delta;

use super::registry::GrappleRegistry;
use super::{attach, geometry};
use super::{
    ARRIVE_RADIUS, MAX_GAZE_DEGREES, PULL_SPEED, STRAFE_FACTOR, TETHER_COLOR, TETHER_WIDTH,
};

/// Resolve one simulation tick across all connected players.
///
/// A tether spawn refusal aborts the remaining players this tick and is
/// retried next tick, since the handle stays unset. Every other failure
/// skips only the affected player.
pub fn run<W: HostWorld>(
    registry: &mut GrappleRegistry,
    connected: &BTreeMap<PlayerSlot, String>,
    world: &mut W,
) {
    for (&slot, name) in connected {
        let Some(view) = world.player_view(slot) else {
            continue;
        };
        if !view.valid || view.bot || !view.alive {
            continue;
        }

        let Some(state) = registry.get(slot).copied() else {
            continue;
        };
        if !state.active {
            continue;
        }

        let (Some(position), Some(view_angles)) = (view.position, view.view_angles) else {
            debug!(slot, name = %name, "player body unreadable, skipping this tick");
            continue;
        };

        let Some(target) = state.target else {
            debug!(slot, name = %name, "active grapple without a target, skipping this tick");
            continue;
        };

        // Materialize the tether once per attachment.
        let tether = match state.tether {
            Some(id) => id,
            None => {
                let Some(id) = world.spawn_tether() else {
                    warn!(
                        slot,
                        name = %name,
                        "host refused to spawn a tether, aborting this tick"
                    );
                    return;
                };
                world.tether_set_color(id, TETHER_COLOR);
                world.tether_set_width(id, TETHER_WIDTH);
                world.tether_set_end(id, target);
                world.tether_activate(id);
                if let Some(record) = registry.get_mut(slot) {
                    record.tether = Some(id);
                }
                id
            }
        };

        if position.distance(target) < ARRIVE_RADIUS {
            attach::detach(registry, world, slot);
            debug!(slot, name = %name, "player already within arrival radius");
            continue;
        }

        let gaze = geometry::angular_difference(view_angles, target - position);
        if gaze > MAX_GAZE_DEGREES {
            attach::detach(registry, world, slot);
            info!(slot, name = %name, "player looked away from grapple target");
            continue;
        }

        let mut direction = geometry::normalize(target - position);
        if view.buttons.contains(Buttons::MOVE_RIGHT) {
            direction += geometry::right_vector(view_angles) * STRAFE_FACTOR;
        } else if view.buttons.contains(Buttons::MOVE_LEFT) {
            direction -= geometry::right_vector(view_angles) * STRAFE_FACTOR;
        }
        let velocity = geometry::normalize(direction) * PULL_SPEED;

        if !world.set_velocity(slot, velocity) {
            debug!(slot, name = %name, "velocity not writable, skipping this tick");
            continue;
        }
        world.tether_teleport(tether, position, Vec3::ZERO, Vec3::ZERO);

        // Re-check arrival at the position the new velocity implies, so the
        // final approach does not overshoot visually.
        let predicted = position + velocity * tick_delta();
        if predicted.distance(target) < ARRIVE_RADIUS {
            attach::detach(registry, world, slot);
            info!(slot, name = %name, "player reached grapple target");
        }
    }
}
