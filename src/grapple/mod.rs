//! Grapple hook mod: per-player state, attachment transitions, and the
//! tick resolver that binds them to a host server.

pub mod attach;
pub mod geometry;
pub mod registry;
pub mod tick;

pub use registry::{GrappleRegistry, GrappleState};

use std::collections::BTreeMap;

use tracing::info;

use crate::host::events::resolve_target;
use crate::host::{HostEvent, HostWorld, PlayerSlot, Rgb};

/// Pull speed along the steering direction, world units per second.
pub const PULL_SPEED: f32 = 500.0;
/// Distance at which the player counts as arrived at the target.
pub const ARRIVE_RADIUS: f32 = 100.0;
/// Strafe blend factor applied to the right vector.
pub const STRAFE_FACTOR: f32 = 0.5;
/// Gaze disengage threshold in degrees. The angular metric saturates at
/// 180, so this only trips at the exact boundary; the comparison is
/// observable behavior and stays as-is.
pub const MAX_GAZE_DEGREES: f32 = 180.0;
/// Tether render color (lime green).
pub const TETHER_COLOR: Rgb = Rgb {
    r: 50,
    g: 205,
    b: 50,
};
/// Tether render width.
pub const TETHER_WIDTH: f32 = 1.5;
/// Host console variable holding the ping cooldown, zeroed at load so
/// players can designate targets freely.
pub const PING_COOLDOWN_CVAR: &str = "player_ping_token_cooldown";

/// Mod metadata reported at registration.
#[derive(Debug, Clone, Copy)]
pub struct ModInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub author: &'static str,
}

/// Top-level mod state: grapple records plus the connected-player roster.
///
/// Owned by one host session and only touched from the host's serialized
/// event and tick dispatch, so there is no interior locking.
pub struct GrappleMod {
    registry: GrappleRegistry,
    connected: BTreeMap<PlayerSlot, String>,
}

impl GrappleMod {
    pub fn new() -> Self {
        Self {
            registry: GrappleRegistry::new(),
            connected: BTreeMap::new(),
        }
    }

    pub fn info() -> ModInfo {
        ModInfo {
            name: "GrappleMod",
            version: env!("CARGO_PKG_VERSION"),
            author: env!("CARGO_PKG_AUTHORS"),
        }
    }

    /// Register with the host: zero the ping cooldown and, on hot reload,
    /// re-init players who are already connected.
    pub fn load<W: HostWorld>(&mut self, world: &mut W, hot_reload: bool) {
        let info = Self::info();
        info!(
            name = info.name,
            version = info.version,
            author = info.author,
            "loading grapple mod"
        );

        world.set_convar(PING_COOLDOWN_CVAR, 0.0);

        if hot_reload {
            for slot in world.connected_slots() {
                self.init_player(world, slot);
            }
        }

        info!("grapple mod loaded");
    }

    /// Apply one host event. Events and ticks are strictly serialized by
    /// the host, so transitions made here are visible to the next tick.
    pub fn handle_event<W: HostWorld>(&mut self, world: &mut W, event: &HostEvent) {
        match event {
            HostEvent::ConnectFull { slot } => self.init_player(world, *slot),
            HostEvent::Disconnect { slot } => self.on_disconnect(world, *slot),
            HostEvent::Death { slot } => attach::detach(&mut self.registry, world, *slot),
            HostEvent::RoundEnd => self.on_round_end(world),
            HostEvent::TargetDesignated { slot, target } => {
                let point = resolve_target(target);
                attach::on_designate(&mut self.registry, world, *slot, point);
            }
        }
    }

    /// Run the grapple resolver for one simulation tick.
    pub fn on_tick<W: HostWorld>(&mut self, world: &mut W) {
        tick::run(&mut self.registry, &self.connected, world);
    }

    fn init_player<W: HostWorld>(&mut self, world: &mut W, slot: PlayerSlot) {
        let Some(view) = world.player_view(slot) else {
            return;
        };
        if view.bot || !view.valid {
            return;
        }
        self.connected.insert(slot, view.name.clone());
        self.registry.ensure(slot);
        info!(slot, name = %view.name, "added player to connected roster");
    }

    fn on_disconnect<W: HostWorld>(&mut self, world: &mut W, slot: PlayerSlot) {
        attach::detach(&mut self.registry, world, slot);
        self.registry.remove(slot);
        if let Some(name) = self.connected.remove(&slot) {
            info!(slot, name = %name, "removed player from connected roster");
        }
    }

    fn on_round_end<W: HostWorld>(&mut self, world: &mut W) {
        for slot in world.connected_slots() {
            attach::detach(&mut self.registry, world, slot);
        }
        info!("round ended, all grapples detached");
    }

    /// Read access for inspection and tests.
    pub fn grapple(&self, slot: PlayerSlot) -> Option<&GrappleState> {
        self.registry.get(slot)
    }

    pub fn is_connected(&self, slot: PlayerSlot) -> bool {
        self.connected.contains_key(&slot)
    }

    pub fn connected_count(&self) -> usize {
        self.connected.len()
    }
}

impl Default for GrappleMod {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use crate::host::TargetPayload;
    use crate::sim::world::{SimPlayer, SimWorld};

    use super::*;

    #[test]
    fn info_reports_the_manifest_identity() {
        let info = GrappleMod::info();
        assert_eq!(info.name, "GrappleMod");
        assert_eq!(info.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(info.author, "Grapple Mod Team");
    }

    #[test]
    fn load_zeroes_the_ping_cooldown() {
        let mut world = SimWorld::new();
        let mut grapple = GrappleMod::new();
        grapple.load(&mut world, false);
        assert_eq!(world.convar(PING_COOLDOWN_CVAR), Some(0.0));
    }

    #[test]
    fn hot_reload_reinits_connected_players() {
        let mut world = SimWorld::new();
        world.add_player(SimPlayer::new(1, "anna"));
        world.add_player(SimPlayer::new(2, "brett"));
        let mut bot = SimPlayer::new(3, "bot_01");
        bot.bot = true;
        world.add_player(bot);

        let mut grapple = GrappleMod::new();
        grapple.load(&mut world, true);

        assert!(grapple.is_connected(1));
        assert!(grapple.is_connected(2));
        assert!(!grapple.is_connected(3));
        assert_eq!(grapple.connected_count(), 2);
    }

    #[test]
    fn death_detaches_but_keeps_roster() {
        let mut world = SimWorld::new();
        world.add_player(SimPlayer::new(1, "anna"));
        let mut grapple = GrappleMod::new();
        grapple.load(&mut world, false);
        grapple.handle_event(&mut world, &HostEvent::ConnectFull { slot: 1 });
        grapple.handle_event(
            &mut world,
            &HostEvent::TargetDesignated {
                slot: 1,
                target: TargetPayload::Point {
                    x: 500.0,
                    y: 0.0,
                    z: 0.0,
                },
            },
        );
        assert!(grapple.grapple(1).unwrap().active);

        world.kill(1);
        grapple.handle_event(&mut world, &HostEvent::Death { slot: 1 });

        let state = grapple.grapple(1).unwrap();
        assert!(!state.active);
        assert!(state.target.is_none());
        assert!(grapple.is_connected(1));
    }

    #[test]
    fn designation_resolves_encoded_targets() {
        let mut world = SimWorld::new();
        world.add_player(SimPlayer::new(1, "anna"));
        let mut grapple = GrappleMod::new();
        grapple.load(&mut world, false);
        grapple.handle_event(&mut world, &HostEvent::ConnectFull { slot: 1 });
        grapple.handle_event(
            &mut world,
            &HostEvent::TargetDesignated {
                slot: 1,
                target: TargetPayload::Encoded("250 -40 96".to_string()),
            },
        );

        let state = grapple.grapple(1).unwrap();
        assert!(state.active);
        assert_eq!(state.target, Some(Vec3::new(250.0, -40.0, 96.0)));
    }
}
