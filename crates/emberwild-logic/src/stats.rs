//! Player survival stats and the coarse survival step.
//!
//! Every stat lives in `[0, 100]`. All mutation goes through [`PlayerStats::apply`]
//! or helpers built on it, which clamp unconditionally, so no caller can push
//! a value out of range.

use serde::{Deserialize, Serialize};

use crate::clock::Weather;
use crate::constants::{survival, CRITICAL_STAT, STAT_MAX, STAT_MIN};

/// Health, hunger, thirst and body temperature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub health: f32,
    pub hunger: f32,
    pub thirst: f32,
    pub temperature: f32,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            health: 100.0,
            hunger: 100.0,
            thirst: 100.0,
            temperature: 50.0,
        }
    }
}

/// Partial stat update. `None` fields are left as they are.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StatsUpdate {
    pub health: Option<f32>,
    pub hunger: Option<f32>,
    pub thirst: Option<f32>,
    pub temperature: Option<f32>,
}

impl StatsUpdate {
    pub fn health(value: f32) -> Self {
        Self {
            health: Some(value),
            ..Self::default()
        }
    }
}

/// Clamp into the stat range. NaN collapses to the floor.
pub fn clamp_stat(value: f32) -> f32 {
    if value.is_nan() {
        STAT_MIN
    } else {
        value.clamp(STAT_MIN, STAT_MAX)
    }
}

impl PlayerStats {
    /// Merge the provided fields, clamping each.
    pub fn apply(&mut self, update: StatsUpdate) {
        if let Some(v) = update.health {
            self.health = clamp_stat(v);
        }
        if let Some(v) = update.hunger {
            self.hunger = clamp_stat(v);
        }
        if let Some(v) = update.thirst {
            self.thirst = clamp_stat(v);
        }
        if let Some(v) = update.temperature {
            self.temperature = clamp_stat(v);
        }
    }

    pub fn damage(&mut self, amount: f32) {
        self.apply(StatsUpdate::health(self.health - amount));
    }

    pub fn heal(&mut self, amount: f32) {
        self.apply(StatsUpdate::health(self.health + amount));
    }

    /// Add restorative amounts (food, water) on top of current values.
    pub fn restore(&mut self, hunger: f32, thirst: f32, health: f32) {
        self.apply(StatsUpdate {
            health: Some(self.health + health),
            hunger: Some(self.hunger + hunger),
            thirst: Some(self.thirst + thirst),
            temperature: None,
        });
    }

    pub fn is_starving(&self) -> bool {
        self.hunger < CRITICAL_STAT || self.thirst < CRITICAL_STAT
    }

    pub fn is_dead(&self) -> bool {
        self.health <= STAT_MIN
    }

    /// True when every field is inside `[0, 100]`.
    pub fn in_bounds(&self) -> bool {
        [self.health, self.hunger, self.thirst, self.temperature]
            .iter()
            .all(|v| (STAT_MIN..=STAT_MAX).contains(v))
    }
}

/// Per-step decay amounts and weather temperature targets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurvivalRates {
    pub hunger_decay: f32,
    pub thirst_decay: f32,
    pub starvation_damage: f32,
    pub snow_floor: f32,
    pub snow_rate: f32,
    pub rain_floor: f32,
    pub rain_rate: f32,
    pub clear_ceiling: f32,
    pub clear_rate: f32,
}

impl Default for SurvivalRates {
    fn default() -> Self {
        Self {
            hunger_decay: survival::HUNGER_DECAY,
            thirst_decay: survival::THIRST_DECAY,
            starvation_damage: survival::STARVATION_DAMAGE,
            snow_floor: survival::SNOW_FLOOR,
            snow_rate: survival::SNOW_RATE,
            rain_floor: survival::RAIN_FLOOR,
            rain_rate: survival::RAIN_RATE,
            clear_ceiling: survival::CLEAR_CEILING,
            clear_rate: survival::CLEAR_RATE,
        }
    }
}

impl SurvivalRates {
    /// Temperature after one step of `weather`. Snow and rain cool by their
    /// rate and clear weather warms by its rate, then the weather's bound is
    /// applied, so a value past the bound snaps to it.
    pub fn weather_temperature(&self, temperature: f32, weather: Weather) -> f32 {
        match weather {
            Weather::Snow => (temperature - self.snow_rate).max(self.snow_floor),
            Weather::Rain => (temperature - self.rain_rate).max(self.rain_floor),
            Weather::Clear => (temperature + self.clear_rate).min(self.clear_ceiling),
        }
    }
}

/// One coarse survival step.
///
/// Hunger and thirst decay, temperature follows the weather, and health
/// drains if hunger or thirst was critical going into the step.
pub fn survival_step(stats: &PlayerStats, weather: Weather, rates: &SurvivalRates) -> PlayerStats {
    let mut next = *stats;
    next.apply(StatsUpdate {
        health: None,
        hunger: Some(stats.hunger - rates.hunger_decay),
        thirst: Some(stats.thirst - rates.thirst_decay),
        temperature: Some(rates.weather_temperature(stats.temperature, weather)),
    });
    if stats.is_starving() {
        next.damage(rates.starvation_damage);
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_clamps_each_field() {
        let mut stats = PlayerStats::default();
        stats.apply(StatsUpdate {
            health: Some(250.0),
            hunger: Some(-40.0),
            thirst: Some(f32::NAN),
            temperature: Some(101.0),
        });
        assert_eq!(stats.health, 100.0);
        assert_eq!(stats.hunger, 0.0);
        assert_eq!(stats.thirst, 0.0);
        assert_eq!(stats.temperature, 100.0);
    }

    #[test]
    fn test_apply_leaves_unset_fields() {
        let mut stats = PlayerStats::default();
        stats.apply(StatsUpdate {
            hunger: Some(42.0),
            ..StatsUpdate::default()
        });
        assert_eq!(stats.hunger, 42.0);
        assert_eq!(stats.health, 100.0);
        assert_eq!(stats.temperature, 50.0);
    }

    #[test]
    fn test_damage_and_heal_clamp() {
        let mut stats = PlayerStats::default();
        stats.damage(130.0);
        assert_eq!(stats.health, 0.0);
        assert!(stats.is_dead());
        stats.heal(500.0);
        assert_eq!(stats.health, 100.0);
    }

    #[test]
    fn test_step_decays_hunger_and_thirst() {
        let stats = PlayerStats::default();
        let next = survival_step(&stats, Weather::Clear, &SurvivalRates::default());
        assert_eq!(next.hunger, 99.5);
        assert!((next.thirst - 99.3).abs() < 1e-4);
        assert_eq!(next.health, 100.0);
    }

    #[test]
    fn test_step_temperature_by_weather() {
        let rates = SurvivalRates::default();
        let stats = PlayerStats::default();

        let snow = survival_step(&stats, Weather::Snow, &rates);
        assert_eq!(snow.temperature, 49.0);

        let rain = survival_step(&stats, Weather::Rain, &rates);
        assert_eq!(rain.temperature, 49.5);

        // Clear weather at the ceiling stays put.
        let clear = survival_step(&stats, Weather::Clear, &rates);
        assert_eq!(clear.temperature, 50.0);
    }

    #[test]
    fn test_temperature_floors_hold() {
        let rates = SurvivalRates::default();
        let mut stats = PlayerStats {
            temperature: 20.2,
            ..PlayerStats::default()
        };
        for _ in 0..10 {
            stats = survival_step(&stats, Weather::Rain, &rates);
        }
        assert_eq!(stats.temperature, 20.0);

        for _ in 0..50 {
            stats = survival_step(&stats, Weather::Snow, &rates);
        }
        assert_eq!(stats.temperature, 0.0);
    }

    #[test]
    fn test_starvation_drains_health() {
        let rates = SurvivalRates::default();
        let stats = PlayerStats {
            hunger: 5.0,
            ..PlayerStats::default()
        };
        let next = survival_step(&stats, Weather::Clear, &rates);
        assert_eq!(next.health, 99.0);

        let thirsty = PlayerStats {
            thirst: 9.9,
            ..PlayerStats::default()
        };
        assert_eq!(survival_step(&thirsty, Weather::Clear, &rates).health, 99.0);
    }

    #[test]
    fn test_clear_ceiling_caps_a_hot_player() {
        let rates = SurvivalRates::default();
        let hot = PlayerStats {
            temperature: 80.0,
            ..PlayerStats::default()
        };
        assert_eq!(survival_step(&hot, Weather::Clear, &rates).temperature, 50.0);
        assert!((rates.weather_temperature(49.9, Weather::Clear) - 50.0).abs() < 1e-6);
        assert!((rates.weather_temperature(30.0, Weather::Clear) - 30.2).abs() < 1e-4);
    }

    #[test]
    fn test_rain_floor_lifts_a_cold_player() {
        let rates = SurvivalRates::default();
        let cold = PlayerStats {
            temperature: 5.0,
            ..PlayerStats::default()
        };
        assert_eq!(survival_step(&cold, Weather::Rain, &rates).temperature, 20.0);
        assert_eq!(rates.weather_temperature(0.5, Weather::Snow), 0.0);
    }
}
