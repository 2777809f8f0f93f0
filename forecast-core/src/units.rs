//! Temperature conversion and display formatting.

use crate::model::UnitPreference;

/// Placeholder shown for any value the provider did not deliver.
pub const PLACEHOLDER: &str = "--";

/// Convert a Celsius reading into the unit the user is viewing.
pub fn to_display_unit(temp_celsius: f64, unit: UnitPreference) -> f64 {
    match unit {
        UnitPreference::Celsius => temp_celsius,
        UnitPreference::Fahrenheit => temp_celsius * 9.0 / 5.0 + 32.0,
    }
}

/// Two decimals, or the placeholder when absent.
pub fn format_temperature(temp: Option<f64>) -> String {
    match temp {
        Some(t) if t.is_finite() => format!("{t:.2}"),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Raw provider value as-is, or the placeholder when absent.
pub fn format_reading(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => v.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}
