//! Banana Catch - a timed catch-the-falling-objects arcade game
//!
//! Core modules:
//! - `sim`: Session simulation (spawning, falling, basket collisions, countdown)
//! - `renderer`: Draw-command projection, tessellation and the WebGPU painter
//! - `platform`: Browser input mapping (keys, touch zones)
//! - `config`: Data-driven game tuning
//! - `runner`: Headless frame/countdown driver

pub mod config;
pub mod platform;
pub mod renderer;
pub mod runner;
pub mod sim;

pub use config::{ConfigError, GameConfig};
pub use runner::Runner;

/// Game configuration constants (defaults for [`GameConfig`])
pub mod consts {
    /// Length of a round in seconds
    pub const ROUND_SECONDS: u32 = 30;
    /// Score that ends the round as a win
    pub const WIN_SCORE: u32 = 25;
    /// Period of the countdown timer in seconds
    pub const COUNTDOWN_PERIOD: f32 = 1.0;

    /// Objects spawned when a round starts
    pub const INITIAL_BURST: u32 = 4;
    /// Simulated seconds between spawns
    pub const SPAWN_INTERVAL: f32 = 0.6;
    /// Chance of a second object on each spawn
    pub const DOUBLE_SPAWN_CHANCE: f64 = 0.2;
    /// Chance that a spawned object is good
    pub const GOOD_CHANCE: f64 = 0.82;

    /// Object size range (inclusive, whole pixels)
    pub const OBJECT_MIN_SIZE: u32 = 20;
    pub const OBJECT_MAX_SIZE: u32 = 36;
    /// Fall speed range in pixels per tick (half-open)
    pub const OBJECT_MIN_FALL_SPEED: f32 = 1.6;
    pub const OBJECT_MAX_FALL_SPEED: f32 = 3.4;
    /// Fall speed multiplier added per point of score
    pub const SCORE_SPEEDUP: f32 = 0.02;
    /// Distance below the viewport before a missed object is dropped
    pub const OFFSCREEN_MARGIN: f32 = 50.0;

    /// Score penalty for catching a bad object
    pub const BAD_PENALTY: u32 = 2;

    /// Basket defaults
    pub const BASKET_WIDTH: f32 = 80.0;
    pub const BASKET_HEIGHT: f32 = 40.0;
    /// Pixels moved per tick while a direction is held
    pub const BASKET_SPEED: f32 = 6.0;
    /// Basket top edge sits this far above the viewport bottom
    pub const BASKET_BOTTOM_OFFSET: f32 = 60.0;
}

/// Play field size in logical (CSS) pixels
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 500.0)
    }
}
