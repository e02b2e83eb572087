//! Simulated host world
//! Stand-in for the real game server, driving the demo binary and the tests.

use std::collections::{BTreeMap, HashMap};

use glam::Vec3;
use tracing::warn;

use crate::host::{Buttons, HostWorld, PlayerSlot, PlayerView, Rgb, TetherId};

/// One simulated player.
#[derive(Debug, Clone)]
pub struct SimPlayer {
    pub slot: PlayerSlot,
    pub name: String,
    pub valid: bool,
    pub bot: bool,
    pub alive: bool,
    /// Body readable and writable this tick; cleared to model respawn.
    pub body_present: bool,
    pub position: Vec3,
    pub view_angles: Vec3,
    pub velocity: Vec3,
    pub buttons: Buttons,
}

impl SimPlayer {
    pub fn new(slot: PlayerSlot, name: &str) -> Self {
        Self {
            slot,
            name: name.to_string(),
            valid: true,
            bot: false,
            alive: true,
            body_present: true,
            position: Vec3::ZERO,
            view_angles: Vec3::ZERO,
            velocity: Vec3::ZERO,
            buttons: Buttons::empty(),
        }
    }
}

/// A spawned tether entity and the attributes set on it so far.
#[derive(Debug, Clone, Default)]
pub struct SimTether {
    pub color: Option<Rgb>,
    pub width: Option<f32>,
    pub end: Option<Vec3>,
    pub start: Option<Vec3>,
    pub active: bool,
}

/// Simulated host: players keyed by slot, spawned tethers, convars.
#[derive(Debug, Default)]
pub struct SimWorld {
    players: BTreeMap<PlayerSlot, SimPlayer>,
    tethers: HashMap<TetherId, SimTether>,
    convars: HashMap<String, f32>,
    next_tether: u64,
    tethers_spawned: u64,
    /// When set, `spawn_tether` refuses, like a host under entity pressure.
    pub fail_tether_spawns: bool,
}

impl SimWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_player(&mut self, player: SimPlayer) {
        self.players.insert(player.slot, player);
    }

    pub fn remove_player(&mut self, slot: PlayerSlot) {
        self.players.remove(&slot);
    }

    pub fn player(&self, slot: PlayerSlot) -> Option<&SimPlayer> {
        self.players.get(&slot)
    }

    pub fn player_mut(&mut self, slot: PlayerSlot) -> Option<&mut SimPlayer> {
        self.players.get_mut(&slot)
    }

    pub fn players(&self) -> impl Iterator<Item = &SimPlayer> {
        self.players.values()
    }

    pub fn kill(&mut self, slot: PlayerSlot) {
        if let Some(player) = self.players.get_mut(&slot) {
            player.alive = false;
            player.velocity = Vec3::ZERO;
        }
    }

    pub fn tether(&self, id: TetherId) -> Option<&SimTether> {
        self.tethers.get(&id)
    }

    pub fn tether_count(&self) -> usize {
        self.tethers.len()
    }

    /// Total tethers ever spawned, including destroyed ones.
    pub fn tethers_spawned(&self) -> u64 {
        self.tethers_spawned
    }

    pub fn convar(&self, name: &str) -> Option<f32> {
        self.convars.get(name).copied()
    }

    /// Advance every live body by its velocity, like the host physics step.
    pub fn step(&mut self, dt: f32) {
        for player in self.players.values_mut() {
            if player.alive && player.body_present {
                player.position += player.velocity * dt;
            }
        }
    }
}

impl HostWorld for SimWorld {
    fn player_view(&self, slot: PlayerSlot) -> Option<PlayerView> {
        let player = self.players.get(&slot)?;
        let body = player.body_present;
        Some(PlayerView {
            slot: player.slot,
            name: player.name.clone(),
            valid: player.valid,
            bot: player.bot,
            alive: player.alive,
            position: body.then_some(player.position),
            view_angles: body.then_some(player.view_angles),
            buttons: player.buttons,
        })
    }

    fn connected_slots(&self) -> Vec<PlayerSlot> {
        self.players.keys().copied().collect()
    }

    fn velocity(&self, slot: PlayerSlot) -> Option<Vec3> {
        let player = self.players.get(&slot)?;
        player.body_present.then_some(player.velocity)
    }

    fn set_velocity(&mut self, slot: PlayerSlot, velocity: Vec3) -> bool {
        match self.players.get_mut(&slot) {
            Some(player) if player.body_present => {
                player.velocity = velocity;
                true
            }
            _ => false,
        }
    }

    fn spawn_tether(&mut self) -> Option<TetherId> {
        if self.fail_tether_spawns {
            return None;
        }
        let id = TetherId(self.next_tether);
        self.next_tether += 1;
        self.tethers_spawned += 1;
        self.tethers.insert(id, SimTether::default());
        Some(id)
    }

    fn tether_set_color(&mut self, id: TetherId, color: Rgb) {
        if let Some(tether) = self.tethers.get_mut(&id) {
            tether.color = Some(color);
        }
    }

    fn tether_set_width(&mut self, id: TetherId, width: f32) {
        if let Some(tether) = self.tethers.get_mut(&id) {
            tether.width = Some(width);
        }
    }

    fn tether_set_end(&mut self, id: TetherId, end: Vec3) {
        if let Some(tether) = self.tethers.get_mut(&id) {
            tether.end = Some(end);
        }
    }

    fn tether_activate(&mut self, id: TetherId) {
        if let Some(tether) = self.tethers.get_mut(&id) {
            tether.active = true;
        }
    }

    fn tether_teleport(&mut self, id: TetherId, position: Vec3, _rotation: Vec3, _velocity: Vec3) {
        if let Some(tether) = self.tethers.get_mut(&id) {
            tether.start = Some(position);
        }
    }

    fn tether_destroy(&mut self, id: TetherId) {
        if self.tethers.remove(&id).is_none() {
            warn!(id = id.0, "destroy called on unknown tether");
        }
    }

    fn set_convar(&mut self, name: &str, value: f32) {
        self.convars.insert(name.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_integrates_live_bodies_only() {
        let mut world = SimWorld::new();
        let mut mover = SimPlayer::new(1, "anna");
        mover.velocity = Vec3::new(100.0, 0.0, 0.0);
        world.add_player(mover);
        let mut corpse = SimPlayer::new(2, "brett");
        corpse.velocity = Vec3::new(100.0, 0.0, 0.0);
        corpse.alive = false;
        world.add_player(corpse);

        world.step(0.5);

        assert_eq!(world.player(1).unwrap().position.x, 50.0);
        assert_eq!(world.player(2).unwrap().position.x, 0.0);
    }

    #[test]
    fn absent_body_hides_kinematics() {
        let mut world = SimWorld::new();
        let mut player = SimPlayer::new(1, "anna");
        player.body_present = false;
        world.add_player(player);

        let view = world.player_view(1).unwrap();
        assert!(view.valid);
        assert!(view.position.is_none());
        assert!(view.view_angles.is_none());
        assert!(world.velocity(1).is_none());
        assert!(!world.set_velocity(1, Vec3::X));

        world.player_mut(1).unwrap().body_present = true;
        assert!(world.set_velocity(1, Vec3::X));
        assert_eq!(world.velocity(1), Some(Vec3::X));
    }

    #[test]
    fn failed_spawns_do_not_count() {
        let mut world = SimWorld::new();
        world.fail_tether_spawns = true;
        assert!(world.spawn_tether().is_none());
        assert_eq!(world.tethers_spawned(), 0);

        world.fail_tether_spawns = false;
        let id = world.spawn_tether().unwrap();
        assert_eq!(world.tethers_spawned(), 1);
        world.tether_destroy(id);
        assert_eq!(world.tether_count(), 0);
        assert_eq!(world.tethers_spawned(), 1);
    }
}
