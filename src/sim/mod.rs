//! Simulated host environment
//! Everything the mod needs from a game server, implemented in-process:
//! a world of players and tethers, a serialized event-then-tick session
//! loop, and a scripted demo scenario.

pub mod scenario;
pub mod session;
pub mod world;

pub use session::{HostAction, Session, SessionReport};
pub use world::{SimPlayer, SimWorld};
