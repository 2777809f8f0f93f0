//! Weekday labels, their accents, and compass directions.

use chrono::{DateTime, Datelike, FixedOffset, Weekday};

/// English weekday name of the observation's own calendar date.
pub fn day_label(timestamp: &DateTime<FixedOffset>) -> &'static str {
    match timestamp.weekday() {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccentColor {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Orange,
    Teal,
    Gray,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccentWeight {
    Semibold,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayAccent {
    pub color: AccentColor,
    pub weight: AccentWeight,
}

const FALLBACK_ACCENT: DayAccent = DayAccent { color: AccentColor::Gray, weight: AccentWeight::Bold };

/// Accent for a weekday label; anything unrecognized gets the gray fallback.
pub fn day_accent(label: &str) -> DayAccent {
    use AccentColor::*;

    let (color, weight) = match label {
        "Sunday" => (Red, AccentWeight::Bold),
        "Monday" => (Blue, AccentWeight::Semibold),
        "Tuesday" => (Green, AccentWeight::Bold),
        "Wednesday" => (Yellow, AccentWeight::Bold),
        "Thursday" => (Purple, AccentWeight::Bold),
        "Friday" => (Orange, AccentWeight::Bold),
        "Saturday" => (Teal, AccentWeight::Bold),
        _ => return FALLBACK_ACCENT,
    };

    DayAccent { color, weight }
}

const COMPASS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Sixteen-point compass name for a bearing in degrees.
pub fn cardinal_direction(degrees: f64) -> &'static str {
    let sector = (degrees.rem_euclid(360.0) / 22.5).round() as usize;
    COMPASS[sector % COMPASS.len()]
}
