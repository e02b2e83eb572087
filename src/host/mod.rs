//! Host collaborator contract
//! The game host owns players, entities, and the tick loop; the mod reaches
//! back into it through `HostWorld` and never holds host references across
//! calls.

pub mod events;

pub use events::{HostEvent, TargetPayload};

use glam::Vec3;

/// Stable per-connection player index assigned by the host
pub type PlayerSlot = u32;

/// Pressed-button bitmask as reported by the host
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Buttons(pub u64);

impl Buttons {
    /// Strafe-left bit
    pub const MOVE_LEFT: Buttons = Buttons(1 << 9);
    /// Strafe-right bit
    pub const MOVE_RIGHT: Buttons = Buttons(1 << 10);

    pub fn empty() -> Self {
        Buttons(0)
    }

    pub fn contains(self, other: Buttons) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: Buttons) {
        self.0 |= other.0;
    }
}

/// RGB color for tether rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Opaque handle to a tether entity owned by the host world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TetherId(pub u64);

/// Point-in-time view of one player, translated to plain data
///
/// `position` and `view_angles` are `None` whenever the body cannot be read
/// this tick (mid-respawn, tearing down). View angles are degrees with
/// `x` pitch, `y` yaw, `z` roll.
#[derive(Debug, Clone)]
pub struct PlayerView {
    pub slot: PlayerSlot,
    pub name: String,
    pub valid: bool,
    pub bot: bool,
    pub alive: bool,
    pub position: Option<Vec3>,
    pub view_angles: Option<Vec3>,
    pub buttons: Buttons,
}

/// Mutable access to the host world.
///
/// The host serializes every call with its event and tick dispatch, so
/// implementations never need interior locking. References handed out by the
/// host may go stale between ticks; callers re-fetch views instead of caching
/// them.
pub trait HostWorld {
    /// Snapshot one player as plain data. `None` when the slot is unknown.
    fn player_view(&self, slot: PlayerSlot) -> Option<PlayerView>;

    /// Every currently connected slot, bots included.
    fn connected_slots(&self) -> Vec<PlayerSlot>;

    /// Read a player's velocity. `None` when the body is not readable.
    fn velocity(&self, slot: PlayerSlot) -> Option<Vec3>;

    /// Overwrite a player's velocity. Returns `false` when the body is not
    /// writable this tick.
    fn set_velocity(&mut self, slot: PlayerSlot, velocity: Vec3) -> bool;

    /// Spawn a tether entity. `None` when the host refuses.
    fn spawn_tether(&mut self) -> Option<TetherId>;

    fn tether_set_color(&mut self, id: TetherId, color: Rgb);

    fn tether_set_width(&mut self, id: TetherId, width: f32);

    /// Anchor the far end of the tether at a world position.
    fn tether_set_end(&mut self, id: TetherId, end: Vec3);

    /// Commit the tether into the world so it renders.
    fn tether_activate(&mut self, id: TetherId);

    /// Move the near end of the tether, overwriting rotation and velocity.
    fn tether_teleport(&mut self, id: TetherId, position: Vec3, rotation: Vec3, velocity: Vec3);

    /// Destroy a tether entity. Unknown ids are ignored.
    fn tether_destroy(&mut self, id: TetherId);

    /// Write a host console variable.
    fn set_convar(&mut self, name: &str, value: f32);
}
