//! World clock - day fraction, time-of-day classification, weather.

use serde::{Deserialize, Serialize};

use crate::constants::clock::{DAWN_BEFORE, DAY_RATE, DUSK_AFTER, NIGHT_AFTER, NIGHT_BEFORE};

/// Discrete phase of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeOfDay {
    Dawn,
    Day,
    Dusk,
    Night,
}

impl TimeOfDay {
    /// Classify a day fraction. Night wins over dawn and dusk where the
    /// ranges overlap, then dawn, then dusk.
    pub fn from_fraction(fraction: f32) -> Self {
        if fraction < NIGHT_BEFORE || fraction > NIGHT_AFTER {
            TimeOfDay::Night
        } else if fraction < DAWN_BEFORE {
            TimeOfDay::Dawn
        } else if fraction > DUSK_AFTER {
            TimeOfDay::Dusk
        } else {
            TimeOfDay::Day
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weather {
    #[default]
    Clear,
    Rain,
    Snow,
}

/// Continuous day counter plus the current weather.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldClock {
    day_time: f32,
    time_of_day: TimeOfDay,
    pub weather: Weather,
    /// Whole days elapsed since the clock started.
    pub days: u32,
}

impl Default for WorldClock {
    fn default() -> Self {
        Self::at(0.5)
    }
}

impl WorldClock {
    /// A clock set to `fraction` of the way through the day, clear weather.
    pub fn at(fraction: f32) -> Self {
        let mut clock = Self {
            day_time: 0.0,
            time_of_day: TimeOfDay::Day,
            weather: Weather::Clear,
            days: 0,
        };
        clock.set_day_time(fraction);
        clock
    }

    pub fn day_time(&self) -> f32 {
        self.day_time
    }

    pub fn time_of_day(&self) -> TimeOfDay {
        self.time_of_day
    }

    /// Set the day fraction directly, wrapping into `[0, 1)`.
    pub fn set_day_time(&mut self, fraction: f32) {
        let wrapped = if fraction.is_finite() {
            fraction.rem_euclid(1.0)
        } else {
            0.0
        };
        // rem_euclid can round up to exactly 1.0 for tiny negatives.
        self.day_time = if wrapped >= 1.0 { 0.0 } else { wrapped };
        self.time_of_day = TimeOfDay::from_fraction(self.day_time);
    }

    /// Advance by `delta_seconds` at `rate` day-fractions per second.
    /// Returns true when the advance crossed midnight.
    pub fn advance(&mut self, delta_seconds: f32, rate: f32) -> bool {
        let next = self.day_time + delta_seconds.max(0.0) * rate;
        let wrapped = next >= 1.0;
        if wrapped {
            self.days += next.floor() as u32;
        }
        self.set_day_time(next);
        wrapped
    }

    /// Advance at the default rate.
    pub fn tick(&mut self, delta_seconds: f32) -> bool {
        self.advance(delta_seconds, DAY_RATE)
    }

    pub fn is_night(&self) -> bool {
        self.time_of_day == TimeOfDay::Night
    }
}
