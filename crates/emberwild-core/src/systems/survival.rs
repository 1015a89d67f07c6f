//! Survival timer - applies the stat step on a coarse interval

use emberwild_logic::clock::Weather;
use emberwild_logic::stats::{survival_step, PlayerStats, SurvivalRates};

/// Accumulate `delta_seconds` and run one survival step once the
/// accumulator exceeds `interval_secs`, then reset it. Returns whether a
/// step ran.
///
/// At most one step runs per call; a long frame does not replay missed steps.
pub fn survival_system(
    stats: &mut PlayerStats,
    accumulator: &mut f32,
    delta_seconds: f32,
    interval_secs: f32,
    weather: Weather,
    rates: &SurvivalRates,
) -> bool {
    *accumulator += delta_seconds;
    if *accumulator <= interval_secs {
        return false;
    }
    *accumulator = 0.0;
    *stats = survival_step(stats, weather, rates);
    true
}
