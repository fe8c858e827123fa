//! Game tuning
//!
//! Every balance knob lives in [`GameConfig`]. Defaults reproduce the classic
//! 30 second round; hosts may override them with a JSON blob.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Shortest countdown period a host may configure, in seconds
pub const MIN_COUNTDOWN_PERIOD: f32 = 0.01;

/// Errors raised while loading a tuning override
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Balance values for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Round length in seconds
    pub round_seconds: u32,
    /// Score needed to win
    pub win_score: u32,
    /// Countdown period in seconds
    pub countdown_period: f32,

    // === Spawning ===
    pub initial_burst: u32,
    pub spawn_interval: f32,
    pub double_spawn_chance: f64,
    pub good_chance: f64,
    pub min_size: u32,
    pub max_size: u32,
    pub min_fall_speed: f32,
    pub max_fall_speed: f32,
    /// Extra fall speed factor per point of score
    pub score_speedup: f32,
    pub offscreen_margin: f32,
    pub bad_penalty: u32,

    // === Basket ===
    pub basket_width: f32,
    pub basket_height: f32,
    pub basket_speed: f32,
    pub basket_bottom_offset: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            round_seconds: ROUND_SECONDS,
            win_score: WIN_SCORE,
            countdown_period: COUNTDOWN_PERIOD,

            initial_burst: INITIAL_BURST,
            spawn_interval: SPAWN_INTERVAL,
            double_spawn_chance: DOUBLE_SPAWN_CHANCE,
            good_chance: GOOD_CHANCE,
            min_size: OBJECT_MIN_SIZE,
            max_size: OBJECT_MAX_SIZE,
            min_fall_speed: OBJECT_MIN_FALL_SPEED,
            max_fall_speed: OBJECT_MAX_FALL_SPEED,
            score_speedup: SCORE_SPEEDUP,
            offscreen_margin: OFFSCREEN_MARGIN,
            bad_penalty: BAD_PENALTY,

            basket_width: BASKET_WIDTH,
            basket_height: BASKET_HEIGHT,
            basket_speed: BASKET_SPEED,
            basket_bottom_offset: BASKET_BOTTOM_OFFSET,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON override; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse an override, falling back to defaults on any error
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(config) => {
                log::info!("Loaded game config override");
                config
            }
            Err(e) => {
                log::warn!("Ignoring game config override: {}", e);
                Self::default()
            }
        }
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), ConfigError> {
            Err(ConfigError::Invalid { field, reason })
        }

        let floats = [
            ("countdown_period", self.countdown_period),
            ("spawn_interval", self.spawn_interval),
            ("min_fall_speed", self.min_fall_speed),
            ("max_fall_speed", self.max_fall_speed),
            ("score_speedup", self.score_speedup),
            ("offscreen_margin", self.offscreen_margin),
            ("basket_width", self.basket_width),
            ("basket_height", self.basket_height),
            ("basket_speed", self.basket_speed),
            ("basket_bottom_offset", self.basket_bottom_offset),
        ];
        if let Some(&(field, _)) = floats.iter().find(|(_, v)| !v.is_finite()) {
            return invalid(field, "must be a finite number");
        }

        if self.round_seconds == 0 {
            return invalid("round_seconds", "must be at least 1");
        }
        if self.win_score == 0 {
            return invalid("win_score", "must be at least 1");
        }
        if self.countdown_period < MIN_COUNTDOWN_PERIOD {
            return invalid("countdown_period", "must be at least 0.01 seconds");
        }
        if !(self.spawn_interval > 0.0) {
            return invalid("spawn_interval", "must be positive");
        }
        if !(0.0..=1.0).contains(&self.double_spawn_chance) {
            return invalid("double_spawn_chance", "must be within 0..=1");
        }
        if !(0.0..=1.0).contains(&self.good_chance) {
            return invalid("good_chance", "must be within 0..=1");
        }
        if self.min_size == 0 || self.min_size > self.max_size {
            return invalid("min_size", "must be positive and not above max_size");
        }
        if !(self.min_fall_speed > 0.0) || self.min_fall_speed >= self.max_fall_speed {
            return invalid("min_fall_speed", "must be positive and below max_fall_speed");
        }
        if self.score_speedup < 0.0 {
            return invalid("score_speedup", "must not be negative");
        }
        if !(self.basket_width > 0.0) || !(self.basket_height > 0.0) {
            return invalid("basket_width", "basket dimensions must be positive");
        }
        if self.basket_speed < 0.0 {
            return invalid("basket_speed", "must not be negative");
        }
        Ok(())
    }
}
