//! Game constants - stat bounds, AI ranges, timing gates, world size.
//!
//! Plain numeric constants with no engine dependency. The core engine reads
//! these as defaults for its tunable config.

/// Upper bound of every player stat.
pub const STAT_MAX: f32 = 100.0;
/// Lower bound of every player stat.
pub const STAT_MIN: f32 = 0.0;
/// Hunger or thirst below this starts draining health.
pub const CRITICAL_STAT: f32 = 10.0;

/// Half-width of the square world animals may roam in.
pub const WORLD_HALF_EXTENT: f32 = 45.0;

/// Number of hotbar slots.
pub const HOTBAR_SLOTS: usize = 8;

pub mod ai {
    /// Animals react to the player inside this XZ distance.
    pub const DETECTION_RANGE: f32 = 15.0;
    /// Wolves stop closing in and strike inside this XZ distance.
    pub const ATTACK_RANGE: f32 = 3.0;
    /// Minimum time between idle/wander re-rolls.
    pub const BEHAVIOR_CHANGE_INTERVAL_MS: f64 = 3000.0;
    /// Prey flee at this multiple of their base speed.
    pub const FLEE_SPEED_MULTIPLIER: f32 = 1.5;
    /// Wandering ends once the target is closer than this.
    pub const ARRIVAL_DISTANCE: f32 = 1.0;
    /// Wander targets are picked in `[MIN, MAX)` units from the animal.
    pub const WANDER_MIN_DISTANCE: f32 = 5.0;
    pub const WANDER_MAX_DISTANCE: f32 = 15.0;
}

pub mod survival {
    /// Seconds of simulated time between survival steps.
    pub const STEP_INTERVAL_SECS: f32 = 2.0;
    pub const HUNGER_DECAY: f32 = 0.5;
    pub const THIRST_DECAY: f32 = 0.7;
    /// Health lost per step while hunger or thirst is critical.
    pub const STARVATION_DAMAGE: f32 = 1.0;

    pub const SNOW_FLOOR: f32 = 0.0;
    pub const SNOW_RATE: f32 = 1.0;
    pub const RAIN_FLOOR: f32 = 20.0;
    pub const RAIN_RATE: f32 = 0.5;
    pub const CLEAR_CEILING: f32 = 50.0;
    pub const CLEAR_RATE: f32 = 0.2;
}

pub mod clock {
    /// Day fraction gained per simulated second (a full day is 100 s).
    pub const DAY_RATE: f32 = 0.01;
    pub const NIGHT_BEFORE: f32 = 0.2;
    pub const NIGHT_AFTER: f32 = 0.85;
    pub const DAWN_BEFORE: f32 = 0.3;
    pub const DUSK_AFTER: f32 = 0.75;
}
