//! Game configuration
//!
//! One immutable value constructed at startup and threaded through
//! generation and the runtime. Nothing in the engine reads ambient global
//! state; the outer layer decides these numbers once and passes them in.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts;

/// Configuration rejected at startup
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("level count must be at least 1")]
    NoLevels,

    #[error("viewport must be positive, got {width}x{height}")]
    BadViewport { width: i32, height: i32 },

    #[error("vision radius must be positive, got {radius}")]
    BadVisionRadius { radius: i32 },

    #[error("map {map_width}x{map_height} cannot fit rooms up to {room_width}x{room_height}")]
    MapTooSmall {
        map_width: i32,
        map_height: i32,
        room_width: i32,
        room_height: i32,
    },

    #[error("at least one room candidate is required")]
    NoRoomCandidates,
}

/// Engine configuration, injected by the runtime layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of dungeon levels to generate
    pub level_count: usize,

    /// Level extent in cells
    pub map_width: i32,
    pub map_height: i32,

    /// Viewport extent; bounds the visibility raycast rectangle
    pub view_width: i32,
    pub view_height: i32,

    /// Field-of-view radius before equipment bonuses
    pub vision_radius: i32,

    /// Maximum items the player can carry
    pub inventory_capacity: usize,

    /// Room candidate size limits
    pub max_room_width: i32,
    pub max_room_height: i32,

    /// Room candidates sampled per level
    pub room_attempts: usize,

    /// Player actions between evolve passes
    pub evolve_every: u64,

    /// External driver cadence, milliseconds between ticks. The engine
    /// never sleeps on this; it is carried for the driving layer.
    pub tick_millis: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            level_count: consts::DEFAULT_LEVEL_COUNT,
            map_width: consts::MAP_WIDTH,
            map_height: consts::MAP_HEIGHT,
            view_width: consts::VIEW_WIDTH,
            view_height: consts::VIEW_HEIGHT,
            vision_radius: consts::BASE_VISION_RADIUS,
            inventory_capacity: consts::INVENTORY_CAPACITY,
            max_room_width: consts::MAX_ROOM_WIDTH,
            max_room_height: consts::MAX_ROOM_HEIGHT,
            room_attempts: consts::ROOM_ATTEMPTS,
            evolve_every: consts::EVOLVE_EVERY,
            tick_millis: consts::TICK_MILLIS,
        }
    }
}

impl GameConfig {
    /// Check the configuration before any generation happens
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.level_count == 0 {
            return Err(ConfigError::NoLevels);
        }
        if self.view_width <= 0 || self.view_height <= 0 {
            return Err(ConfigError::BadViewport {
                width: self.view_width,
                height: self.view_height,
            });
        }
        if self.vision_radius <= 0 {
            return Err(ConfigError::BadVisionRadius {
                radius: self.vision_radius,
            });
        }
        if self.map_width < self.max_room_width + 2 || self.map_height < self.max_room_height + 2 {
            return Err(ConfigError::MapTooSmall {
                map_width: self.map_width,
                map_height: self.map_height,
                room_width: self.max_room_width,
                room_height: self.max_room_height,
            });
        }
        if self.room_attempts == 0 {
            return Err(ConfigError::NoRoomCandidates);
        }
        Ok(())
    }
}
