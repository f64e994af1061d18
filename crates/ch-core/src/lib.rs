//! ch-core: Core simulation engine for the Crystal Halls dungeon crawler
//!
//! This crate contains the deterministic world simulation with no I/O
//! dependencies: procedural dungeon generation, grid pathfinding,
//! field-of-view computation and turn resolution. Rendering, input
//! translation and the application state machine live in outer layers that
//! consume this crate's queries and actions.
//!
//! Given the same seed and the same action sequence, the engine reproduces
//! identical states and events.

pub mod combat;
pub mod dungeon;
pub mod grid;
pub mod monster;
pub mod object;
pub mod path;
pub mod player;
pub mod vision;
pub mod world;

mod consts;
mod rng;

pub use consts::*;
pub use rng::GameRng;
pub use world::{Action, ConfigError, Event, GameConfig, Occupant, World};
