//! Default tuning constants
//!
//! These seed [`GameConfig::default`](crate::world::GameConfig); the runtime
//! layer overrides them through its own configuration before calling in.

/// Number of dungeon levels generated for a standard run
pub const DEFAULT_LEVEL_COUNT: usize = 5;

/// Level extent in cells
pub const MAP_WIDTH: i32 = 80;
pub const MAP_HEIGHT: i32 = 25;

/// Viewport extent in cells (odd, so the player sits on the center cell)
pub const VIEW_WIDTH: i32 = 21;
pub const VIEW_HEIGHT: i32 = 15;

/// Base field-of-view radius before equipment bonuses
pub const BASE_VISION_RADIUS: i32 = 7;

/// Maximum items the player can carry
pub const INVENTORY_CAPACITY: usize = 10;

/// Room candidate limits
pub const MIN_ROOM_SPAN: i32 = 4;
pub const MAX_ROOM_WIDTH: i32 = 12;
pub const MAX_ROOM_HEIGHT: i32 = 8;

/// Room candidates sampled per level before greedy acceptance
pub const ROOM_ATTEMPTS: usize = 24;

/// Player actions between whole-dungeon evolve passes
pub const EVOLVE_EVERY: u64 = 64;

/// External driver tick cadence, milliseconds
pub const TICK_MILLIS: u64 = 120;

/// Starting player hit points
pub const PLAYER_MAX_HP: i32 = 20;
