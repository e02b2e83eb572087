//! Serialized host session driving the mod the way a real host does

use std::collections::VecDeque;

use glam::Vec3;
use serde::Serialize;
use tokio::time::{interval, Duration, MissedTickBehavior};

use crate::grapple::GrappleMod;
use crate::host::{Buttons, HostEvent, PlayerSlot, TargetPayload};
use crate::util::time::{tick_delta, TICK_DURATION_MICROS};

use super::world::{SimPlayer, SimWorld};

/// A scripted host-side occurrence, applied at its scheduled tick.
#[derive(Debug, Clone)]
pub enum HostAction {
    Join(SimPlayer),
    Designate {
        slot: PlayerSlot,
        target: TargetPayload,
    },
    SetButtons {
        slot: PlayerSlot,
        buttons: Buttons,
    },
    SetViewAngles {
        slot: PlayerSlot,
        angles: Vec3,
    },
    Kill {
        slot: PlayerSlot,
    },
    Disconnect {
        slot: PlayerSlot,
    },
    RoundEnd,
}

/// One mod instance bound to one simulated world, with a script of host
/// actions applied in tick order.
pub struct Session {
    world: SimWorld,
    grapple: GrappleMod,
    script: VecDeque<(u64, HostAction)>,
    tick: u64,
}

impl Session {
    pub fn new(mut world: SimWorld, hot_reload: bool) -> Self {
        let mut grapple = GrappleMod::new();
        grapple.load(&mut world, hot_reload);
        Self {
            world,
            grapple,
            script: VecDeque::new(),
            tick: 0,
        }
    }

    /// Queue an action for a future tick. Actions scheduled for the same
    /// tick apply in insertion order.
    pub fn schedule(&mut self, tick: u64, action: HostAction) {
        let at = self.script.iter().take_while(|entry| entry.0 <= tick).count();
        self.script.insert(at, (tick, action));
    }

    /// Run one host frame: due events, then the tick callback, then the
    /// physics step. The strict ordering is the host's serialization
    /// guarantee; nothing here overlaps.
    pub fn pump(&mut self) {
        while self
            .script
            .front()
            .map_or(false, |entry| entry.0 <= self.tick)
        {
            if let Some((_, action)) = self.script.pop_front() {
                self.apply(action);
            }
        }

        self.grapple.on_tick(&mut self.world);
        self.world.step(tick_delta());
        self.tick += 1;
    }

    fn apply(&mut self, action: HostAction) {
        match action {
            HostAction::Join(player) => {
                let slot = player.slot;
                self.world.add_player(player);
                self.grapple
                    .handle_event(&mut self.world, &HostEvent::ConnectFull { slot });
            }
            HostAction::Designate { slot, target } => {
                self.grapple
                    .handle_event(&mut self.world, &HostEvent::TargetDesignated { slot, target });
            }
            HostAction::SetButtons { slot, buttons } => {
                if let Some(player) = self.world.player_mut(slot) {
                    player.buttons = buttons;
                }
            }
            HostAction::SetViewAngles { slot, angles } => {
                if let Some(player) = self.world.player_mut(slot) {
                    player.view_angles = angles;
                }
            }
            HostAction::Kill { slot } => {
                self.world.kill(slot);
                self.grapple
                    .handle_event(&mut self.world, &HostEvent::Death { slot });
            }
            HostAction::Disconnect { slot } => {
                // The event fires while the entity is still queryable; the
                // host tears the player down afterwards.
                self.grapple
                    .handle_event(&mut self.world, &HostEvent::Disconnect { slot });
                self.world.remove_player(slot);
            }
            HostAction::RoundEnd => {
                self.grapple
                    .handle_event(&mut self.world, &HostEvent::RoundEnd);
            }
        }
    }

    /// Pump a fixed number of frames back to back.
    pub fn run_for(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.pump();
        }
    }

    /// Pump frames at the real tick rate.
    pub async fn run_paced(&mut self, ticks: u64) {
        let mut tick_interval = interval(Duration::from_micros(TICK_DURATION_MICROS));
        tick_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        for _ in 0..ticks {
            tick_interval.tick().await;
            self.pump();
        }
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn world(&self) -> &SimWorld {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut SimWorld {
        &mut self.world
    }

    pub fn grapple(&self) -> &GrappleMod {
        &self.grapple
    }

    /// Summarize the session for the demo output.
    pub fn report(&self) -> SessionReport {
        let players = self
            .world
            .players()
            .map(|player| PlayerReport {
                slot: player.slot,
                name: player.name.clone(),
                position: player.position,
                velocity: player.velocity,
                alive: player.alive,
                grappling: self
                    .grapple
                    .grapple(player.slot)
                    .map_or(false, |state| state.active),
            })
            .collect();

        SessionReport {
            ticks: self.tick,
            players,
            tethers_spawned: self.world.tethers_spawned(),
            tethers_live: self.world.tether_count(),
        }
    }
}

/// Final session summary, printed by the demo binary.
#[derive(Debug, Serialize)]
pub struct SessionReport {
    pub ticks: u64,
    pub players: Vec<PlayerReport>,
    pub tethers_spawned: u64,
    pub tethers_live: usize,
}

#[derive(Debug, Serialize)]
pub struct PlayerReport {
    pub slot: PlayerSlot,
    pub name: String,
    pub position: Vec3,
    pub velocity: Vec3,
    pub alive: bool,
    pub grappling: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_apply_events_before_the_tick() {
        let mut session = Session::new(SimWorld::new(), false);
        session.schedule(0, HostAction::Join(SimPlayer::new(1, "anna")));
        session.schedule(
            0,
            HostAction::Designate {
                slot: 1,
                target: TargetPayload::Point {
                    x: 1000.0,
                    y: 0.0,
                    z: 0.0,
                },
            },
        );

        session.pump();

        // Both actions landed before the first resolver pass, so steering
        // already applied on tick zero.
        let player = session.world().player(1).unwrap();
        assert!(player.velocity.x > 0.0);
        assert!(session.grapple().grapple(1).unwrap().active);
    }

    #[test]
    fn scheduled_actions_wait_for_their_tick() {
        let mut session = Session::new(SimWorld::new(), false);
        session.schedule(5, HostAction::Join(SimPlayer::new(2, "brett")));

        session.run_for(5);
        assert!(!session.grapple().is_connected(2));

        session.pump();
        assert!(session.grapple().is_connected(2));
    }

    #[test]
    fn report_reflects_world_and_registry() {
        let mut session = Session::new(SimWorld::new(), false);
        session.schedule(0, HostAction::Join(SimPlayer::new(1, "anna")));
        session.schedule(
            0,
            HostAction::Designate {
                slot: 1,
                target: TargetPayload::Point {
                    x: 2000.0,
                    y: 0.0,
                    z: 0.0,
                },
            },
        );
        session.run_for(2);

        let report = session.report();
        assert_eq!(report.ticks, 2);
        assert_eq!(report.players.len(), 1);
        assert!(report.players[0].grappling);
        assert_eq!(report.tethers_spawned, 1);
        assert_eq!(report.tethers_live, 1);
        assert_eq!(report.players[0].velocity.length().round(), 500.0);
    }

    #[test]
    fn paced_run_advances_the_same_way() {
        let mut session = Session::new(SimWorld::new(), false);
        session.schedule(0, HostAction::Join(SimPlayer::new(4, "dana")));

        tokio_test::block_on(session.run_paced(3));

        assert_eq!(session.tick(), 3);
        assert!(session.grapple().is_connected(4));
    }
}
