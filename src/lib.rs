//! Space plane battle: a single-player arcade shooter simulation.
//!
//! The library is the deterministic core. A host feeds it elapsed time and
//! an input snapshot once per frame, draws the returned world and plays the
//! returned sound cues.

pub mod collision;
pub mod compute;
pub mod config;
pub mod entities;
pub mod events;
pub mod input;
pub mod session;
pub mod spawner;
pub mod weapon;
