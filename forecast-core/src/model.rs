use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A place name as typed by the user. It may not resolve at the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastQuery {
    pub place: String,
}

impl ForecastQuery {
    pub fn new(place: impl Into<String>) -> Self {
        Self { place: place.into() }
    }
}

/// One aggregated day of provider data. Temperatures are in Celsius.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyObservation {
    /// Carries the location's own UTC offset, so the calendar date is local.
    pub timestamp: DateTime<FixedOffset>,
    pub temperature: f64,
    pub min_temperature: f64,
    pub max_temperature: f64,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_direction_degrees: Option<f64>,
    pub condition_text: String,
}

/// Normalized multi-day forecast for one resolved location.
///
/// `days` is chronological, index 0 is the current day, and it is never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    location_label: String,
    days: Vec<DailyObservation>,
}

impl Forecast {
    /// Returns `None` when `days` is empty.
    pub fn new(location_label: impl Into<String>, days: Vec<DailyObservation>) -> Option<Self> {
        if days.is_empty() {
            return None;
        }

        Some(Self { location_label: location_label.into(), days })
    }

    pub fn location_label(&self) -> &str {
        &self.location_label
    }

    pub fn days(&self) -> &[DailyObservation] {
        &self.days
    }

    /// The current day.
    pub fn today(&self) -> &DailyObservation {
        // Non-empty by construction.
        &self.days[0]
    }

    /// Days after today, at most `limit` of them.
    pub fn upcoming(&self, limit: usize) -> &[DailyObservation] {
        let rest = &self.days[1..];
        &rest[..rest.len().min(limit)]
    }
}

/// Temperature display unit. Stored data always stays in Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitPreference {
    #[default]
    Celsius,
    Fahrenheit,
}

impl UnitPreference {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnitPreference::Celsius => "C",
            UnitPreference::Fahrenheit => "F",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            UnitPreference::Celsius => UnitPreference::Fahrenheit,
            UnitPreference::Fahrenheit => UnitPreference::Celsius,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UnitPreference::Celsius => "celsius",
            UnitPreference::Fahrenheit => "fahrenheit",
        }
    }
}

impl std::fmt::Display for UnitPreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for UnitPreference {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "c" | "celsius" => Ok(UnitPreference::Celsius),
            "f" | "fahrenheit" => Ok(UnitPreference::Fahrenheit),
            _ => Err(anyhow::anyhow!(
                "Unknown unit '{value}'. Supported units: celsius, fahrenheit."
            )),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn observation(date: &str, temp: f64, conditions: &str) -> DailyObservation {
        DailyObservation {
            timestamp: DateTime::parse_from_rfc3339(&format!("{date}T00:00:00+01:00"))
                .expect("valid test timestamp"),
            temperature: temp,
            min_temperature: temp - 3.0,
            max_temperature: temp + 3.0,
            humidity: Some(70.0),
            wind_speed: Some(12.0),
            wind_direction_degrees: Some(225.0),
            condition_text: conditions.to_string(),
        }
    }

    #[test]
    fn forecast_rejects_empty_days() {
        assert!(Forecast::new("Nowhere", Vec::new()).is_none());
    }

    #[test]
    fn upcoming_is_capped_and_skips_today() {
        let days: Vec<_> = (10..16)
            .map(|d| observation(&format!("2024-03-{d}"), f64::from(d), "Clear"))
            .collect();
        let forecast = Forecast::new("Paris, France", days).expect("non-empty");

        assert_eq!(forecast.today().temperature, 10.0);
        let upcoming = forecast.upcoming(5);
        assert_eq!(upcoming.len(), 5);
        assert_eq!(upcoming[0].temperature, 11.0);
        assert_eq!(upcoming[4].temperature, 15.0);
    }

    #[test]
    fn upcoming_with_single_day_is_empty() {
        let forecast =
            Forecast::new("Oslo, Norway", vec![observation("2024-03-10", 1.0, "Snow")])
                .expect("non-empty");
        assert!(forecast.upcoming(5).is_empty());
    }

    #[test]
    fn unit_parses_short_and_long_names() {
        assert_eq!(UnitPreference::try_from("F").unwrap(), UnitPreference::Fahrenheit);
        assert_eq!(UnitPreference::try_from("celsius").unwrap(), UnitPreference::Celsius);
        let err = UnitPreference::try_from("kelvin").unwrap_err();
        assert!(err.to_string().contains("Unknown unit"));
    }

    #[test]
    fn toggling_twice_restores_unit() {
        let unit = UnitPreference::Celsius;
        assert_eq!(unit.toggled(), UnitPreference::Fahrenheit);
        assert_eq!(unit.toggled().toggled(), unit);
    }
}
