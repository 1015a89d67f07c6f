//! Simulation tunables.
//!
//! Defaults reproduce the stock game. A JSON file may override any subset of
//! fields; missing fields keep their defaults.

use std::path::Path;

use emberwild_logic::constants::{clock, survival, WORLD_HALF_EXTENT};
use emberwild_logic::stats::SurvivalRates;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Fixed RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Nominal frames per second. Animal speeds are per frame.
    pub frame_scale: f32,
    /// Day fraction gained per simulated second.
    pub day_rate: f32,
    /// Day fraction a fresh world starts at.
    pub start_day_time: f32,
    /// Seconds between survival steps.
    pub stats_interval_secs: f32,
    pub survival: SurvivalRates,

    /// Half-width of the square animals are confined to.
    pub world_half_extent: f32,
    /// Animals (re)spawn within this half-width.
    pub spawn_half_extent: f32,
    /// Animals never spawn closer than this to the origin.
    pub spawn_clearing: f32,
    pub initial_animals: usize,
    pub trees: usize,
    pub rocks: usize,
    pub bushes: usize,

    /// How long a carcass stays before removal.
    pub corpse_linger_ms: f64,
    /// Delay between removal and a replacement spawning.
    pub respawn_delay_ms: f64,
    /// Delay before a gathered node grows back.
    pub regrow_delay_ms: f64,

    pub wolf_damage: f32,
    pub wolf_strike_interval_ms: f64,
    /// Max distance for gathering from a node.
    pub gather_reach: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: None,
            frame_scale: 60.0,
            day_rate: clock::DAY_RATE,
            start_day_time: 0.5,
            stats_interval_secs: survival::STEP_INTERVAL_SECS,
            survival: SurvivalRates::default(),
            world_half_extent: WORLD_HALF_EXTENT,
            spawn_half_extent: 40.0,
            spawn_clearing: 10.0,
            initial_animals: 10,
            trees: 50,
            rocks: 30,
            bushes: 25,
            corpse_linger_ms: 5_000.0,
            respawn_delay_ms: 10_000.0,
            regrow_delay_ms: 30_000.0,
            wolf_damage: 5.0,
            wolf_strike_interval_ms: 1_000.0,
            gather_reach: 4.0,
        }
    }
}

impl SimConfig {
    /// Default config with a fixed seed, for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("frame_scale", self.frame_scale as f64),
            ("stats_interval_secs", self.stats_interval_secs as f64),
            ("world_half_extent", self.world_half_extent as f64),
            ("spawn_half_extent", self.spawn_half_extent as f64),
            ("wolf_strike_interval_ms", self.wolf_strike_interval_ms),
            ("gather_reach", self.gather_reach as f64),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }
        let non_negative = [
            ("day_rate", self.day_rate as f64),
            ("corpse_linger_ms", self.corpse_linger_ms),
            ("respawn_delay_ms", self.respawn_delay_ms),
            ("regrow_delay_ms", self.regrow_delay_ms),
            ("wolf_damage", self.wolf_damage as f64),
        ];
        for (name, value) in non_negative {
            if !(value >= 0.0) {
                return Err(ConfigError::Invalid(format!("{name} must not be negative, got {value}")));
            }
        }
        if self.spawn_half_extent > self.world_half_extent {
            return Err(ConfigError::Invalid(
                "spawn_half_extent exceeds world_half_extent".to_string(),
            ));
        }
        if self.spawn_clearing >= self.spawn_half_extent {
            return Err(ConfigError::Invalid(
                "spawn_clearing leaves no room to spawn".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.start_day_time) {
            return Err(ConfigError::Invalid(format!(
                "start_day_time must be in [0, 1), got {}",
                self.start_day_time
            )));
        }
        Ok(())
    }
}
