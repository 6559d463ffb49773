//! Day/night cycle.

use tycoon_core::enums::DayPhase;

/// Advance the cycle value by `dt` seconds, wrapping into `[0, 1)`.
pub fn advance(day_time: f64, dt: f64, day_length_secs: f64) -> f64 {
    if day_length_secs <= 0.0 {
        return day_time;
    }
    (day_time + dt / day_length_secs).rem_euclid(1.0)
}

pub fn is_night(day_time: f64) -> bool {
    DayPhase::from_day_time(day_time).is_night()
}
