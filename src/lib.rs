//! Grapple hook mod for a multiplayer shooter's server-side mod layer
//!
//! A player pings a world point; while their grapple is active, their
//! velocity is steered toward that point every simulation tick until they
//! arrive, look away, die, disconnect, or the round ends. The host server
//! is reached only through the [`host::HostWorld`] contract, so the whole
//! mod runs against the in-process [`sim`] host in tests and in the demo
//! binary.

pub mod config;
pub mod grapple;
pub mod host;
pub mod sim;
pub mod util;

pub use grapple::{GrappleMod, ModInfo};
