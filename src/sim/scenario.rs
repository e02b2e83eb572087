//! Scripted demo scenario exercising the full event surface

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::Config;
use crate::grapple::geometry;
use crate::host::{Buttons, PlayerSlot, TargetPayload};

use super::session::{HostAction, Session};
use super::world::{SimPlayer, SimWorld};

/// Build the demo session from config knobs. Same seed, same script.
pub fn build(config: &Config) -> Session {
    let mut rng = ChaCha8Rng::seed_from_u64(config.demo_seed);
    let mut session = Session::new(SimWorld::new(), false);

    for i in 0..config.demo_players {
        let slot = i as PlayerSlot + 1;
        let mut player = SimPlayer::new(slot, &format!("player_{slot:02}"));
        player.position = Vec3::new(
            rng.gen_range(-1000.0..1000.0),
            rng.gen_range(-1000.0..1000.0),
            0.0,
        );
        player.view_angles = Vec3::new(0.0, rng.gen_range(-180.0..180.0), 0.0);

        // Each player grapples toward a point out along their own gaze.
        let reach = rng.gen_range(600.0..1500.0);
        let target = player.position + geometry::forward_vector(player.view_angles) * reach;

        session.schedule(0, HostAction::Join(player));
        session.schedule(
            8 + u64::from(i) * 4,
            HostAction::Designate {
                slot,
                target: TargetPayload::Point {
                    x: target.x,
                    y: target.y,
                    z: target.z,
                },
            },
        );
    }

    if config.demo_players > 0 {
        // The first player carves a rightward curve on the way in.
        session.schedule(
            12,
            HostAction::SetButtons {
                slot: 1,
                buttons: Buttons::MOVE_RIGHT,
            },
        );
    }
    if config.demo_players > 1 {
        session.schedule(config.demo_ticks / 3, HostAction::Kill { slot: 2 });
    }
    if config.demo_players > 2 {
        session.schedule(config.demo_ticks / 2, HostAction::Disconnect { slot: 3 });
    }

    // The round ends shortly before the session does, detaching stragglers.
    session.schedule(config.demo_ticks.saturating_sub(32), HostAction::RoundEnd);

    session
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_config() -> Config {
        Config {
            log_level: "info".to_string(),
            demo_players: 4,
            demo_ticks: 256,
            demo_seed: 7,
        }
    }

    #[test]
    fn same_seed_builds_identical_outcomes() {
        let config = demo_config();
        let mut a = build(&config);
        let mut b = build(&config);
        a.run_for(config.demo_ticks);
        b.run_for(config.demo_ticks);

        let ra = serde_json::to_string(&a.report()).unwrap();
        let rb = serde_json::to_string(&b.report()).unwrap();
        assert_eq!(ra, rb);
    }

    #[test]
    fn demo_run_spawns_and_cleans_up_tethers() {
        let config = demo_config();
        let mut session = build(&config);
        session.run_for(config.demo_ticks);

        // Every grapple has resolved by round end, one way or another.
        assert!(session.world().tethers_spawned() > 0);
        assert_eq!(session.world().tether_count(), 0);
        for player in session.world().players() {
            let grappling = session
                .grapple()
                .grapple(player.slot)
                .map_or(false, |state| state.active);
            assert!(!grappling, "player {} still grappling", player.slot);
        }
    }
}
