//! Attachment controller: transitions into and out of the grappling state

use glam::Vec3;
use tracing::debug;

use crate::host::{HostWorld, PlayerSlot};

use super::registry::GrappleRegistry;

/// Arm a grapple toward `target`.
///
/// No-op for unknown, bot, or invalid slots. An already-armed grapple is
/// force-detached first so re-designation restarts cleanly instead of
/// stacking tethers.
pub fn on_designate<W: HostWorld>(
    registry: &mut GrappleRegistry,
    world: &mut W,
    slot: PlayerSlot,
    target: Vec3,
) {
    let Some(view) = world.player_view(slot) else {
        return;
    };
    if !view.valid || view.bot {
        return;
    }

    registry.ensure(slot);
    detach(registry, world, slot);

    if let Some(state) = registry.get_mut(slot) {
        state.active = true;
        state.target = Some(target);
        debug!(slot, name = %view.name, ?target, "grapple armed");
    }
}

/// Disengage a slot's grapple, destroying the tether if one is live.
///
/// Safe for unknown or already-detached slots. Called on arrival, lost gaze,
/// death, round end, disconnect, and as the reset step of a re-designation.
pub fn detach<W: HostWorld>(registry: &mut GrappleRegistry, world: &mut W, slot: PlayerSlot) {
    let Some(state) = registry.get_mut(slot) else {
        return;
    };
    state.active = false;
    state.target = None;
    if let Some(tether) = state.tether.take() {
        world.tether_destroy(tether);
    }
}

#[cfg(test)]
mod tests {
    use crate::sim::world::{SimPlayer, SimWorld};

    use super::*;

    #[test]
    fn designation_arms_a_live_player() {
        let mut world = SimWorld::new();
        world.add_player(SimPlayer::new(1, "anna"));
        let mut registry = GrappleRegistry::new();

        on_designate(&mut registry, &mut world, 1, Vec3::new(10.0, 0.0, 0.0));

        let state = registry.get(1).unwrap();
        assert!(state.active);
        assert_eq!(state.target, Some(Vec3::new(10.0, 0.0, 0.0)));
        assert!(state.tether.is_none());
    }

    #[test]
    fn bots_and_unknown_slots_cannot_arm() {
        let mut world = SimWorld::new();
        let mut bot = SimPlayer::new(2, "bot_07");
        bot.bot = true;
        world.add_player(bot);
        let mut registry = GrappleRegistry::new();

        on_designate(&mut registry, &mut world, 2, Vec3::X);
        on_designate(&mut registry, &mut world, 9, Vec3::X);

        assert!(registry.get(2).is_none());
        assert!(registry.get(9).is_none());
    }

    #[test]
    fn detach_clears_state_and_destroys_tether() {
        let mut world = SimWorld::new();
        world.add_player(SimPlayer::new(1, "anna"));
        let mut registry = GrappleRegistry::new();
        registry.ensure(1);
        let tether = world.spawn_tether().unwrap();
        let state = registry.get_mut(1).unwrap();
        state.active = true;
        state.target = Some(Vec3::X);
        state.tether = Some(tether);

        detach(&mut registry, &mut world, 1);

        let state = registry.get(1).unwrap();
        assert!(!state.active);
        assert!(state.target.is_none());
        assert!(state.tether.is_none());
        assert_eq!(world.tether_count(), 0);
    }

    #[test]
    fn detach_without_entry_is_a_noop() {
        let mut world = SimWorld::new();
        let mut registry = GrappleRegistry::new();
        detach(&mut registry, &mut world, 42);
        assert!(registry.get(42).is_none());
    }
}
