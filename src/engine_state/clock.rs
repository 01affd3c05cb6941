//! # World Clock
//!
//! A cyclic time-of-day counter advanced once per frame. The core only keeps
//! time; sky colour and lighting are derived from it by the presentation
//! layer.

use std::f32::consts::{FRAC_PI_2, TAU};

use crate::application_state::config::ClockConfig;

/// Time of day in `[0, day_length)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldClock {
    time: u32,
    day_length: u32,
    tick_rate: u32,
}

impl WorldClock {
    pub fn new(config: &ClockConfig) -> Self {
        let day_length = config.day_length.max(1);
        Self {
            time: config.start_time % day_length,
            day_length,
            tick_rate: config.tick_rate,
        }
    }

    /// Advances the clock by one frame, wrapping at the end of the day.
    pub fn tick(&mut self) {
        self.time = ((self.time as u64 + self.tick_rate as u64) % self.day_length as u64) as u32;
    }

    pub fn time(&self) -> u32 {
        self.time
    }

    pub fn day_length(&self) -> u32 {
        self.day_length
    }

    /// Angle of the sun, `-pi/2` at midnight and `pi/2` at midday.
    pub fn sun_angle(&self) -> f32 {
        self.time as f32 / self.day_length as f32 * TAU - FRAC_PI_2
    }

    /// Daylight intensity in `[0, 1]`; zero for the whole night.
    pub fn daylight(&self) -> f32 {
        self.sun_angle().sin().max(0.0)
    }
}

impl Default for WorldClock {
    fn default() -> Self {
        Self::new(&ClockConfig::default())
    }
}
