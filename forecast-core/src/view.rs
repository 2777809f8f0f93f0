//! Pure mapping from a forecast to what the dashboard shows.

use crate::{
    calendar::{DayAccent, cardinal_direction, day_accent, day_label},
    condition::{BackgroundAsset, IconAsset, classify},
    model::{DailyObservation, Forecast, UnitPreference},
    units::{PLACEHOLDER, format_reading, format_temperature, to_display_unit},
};

/// Number of days listed after the primary panel.
pub const SUMMARY_DAYS: usize = 5;

/// Current conditions for the resolved location.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimaryPanel {
    pub location_label: String,
    pub icon: IconAsset,
    /// In `unit`.
    pub temperature: String,
    pub unit: UnitPreference,
    /// Always Celsius, whatever `unit` is.
    pub min_temperature: String,
    /// Always Celsius, whatever `unit` is.
    pub max_temperature: String,
    pub wind_speed: String,
    pub wind_direction: &'static str,
    pub humidity: String,
    pub conditions: String,
}

impl PrimaryPanel {
    /// Shown before any forecast has loaded.
    pub fn placeholder(icon: IconAsset, unit: UnitPreference) -> Self {
        Self {
            location_label: String::new(),
            icon,
            temperature: PLACEHOLDER.to_string(),
            unit,
            min_temperature: PLACEHOLDER.to_string(),
            max_temperature: PLACEHOLDER.to_string(),
            wind_speed: PLACEHOLDER.to_string(),
            wind_direction: PLACEHOLDER,
            humidity: PLACEHOLDER.to_string(),
            conditions: String::new(),
        }
    }

    pub fn from_forecast(forecast: &Forecast, icon: IconAsset, unit: UnitPreference) -> Self {
        let today = forecast.today();

        Self {
            location_label: forecast.location_label().to_string(),
            icon,
            temperature: format_temperature(Some(to_display_unit(today.temperature, unit))),
            unit,
            min_temperature: format_temperature(Some(today.min_temperature)),
            max_temperature: format_temperature(Some(today.max_temperature)),
            wind_speed: format_reading(today.wind_speed),
            wind_direction: today.wind_direction_degrees.map_or(PLACEHOLDER, cardinal_direction),
            humidity: format_reading(today.humidity),
            conditions: today.condition_text.clone(),
        }
    }
}

/// One upcoming day in the list below the primary panel.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySummary {
    pub weekday: &'static str,
    pub accent: DayAccent,
    /// `None` when the condition text matched nothing.
    pub icon: Option<IconAsset>,
    pub temperature: String,
    pub unit: UnitPreference,
    /// `YYYY-MM-DD` in the location's own calendar.
    pub date: String,
}

impl DaySummary {
    pub fn from_observation(day: &DailyObservation, unit: UnitPreference) -> Self {
        let weekday = day_label(&day.timestamp);

        Self {
            weekday,
            accent: day_accent(weekday),
            icon: classify(&day.condition_text).icon(),
            temperature: format_temperature(Some(to_display_unit(day.temperature, unit))),
            unit,
            date: day.timestamp.format("%Y-%m-%d").to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub background: BackgroundAsset,
    pub unit: UnitPreference,
    pub primary: PrimaryPanel,
    pub summaries: Vec<DaySummary>,
}

impl DashboardView {
    pub fn build(
        forecast: Option<&Forecast>,
        unit: UnitPreference,
        background: BackgroundAsset,
        icon: IconAsset,
    ) -> Self {
        let Some(forecast) = forecast else {
            return Self {
                background,
                unit,
                primary: PrimaryPanel::placeholder(icon, unit),
                summaries: Vec::new(),
            };
        };

        Self {
            background,
            unit,
            primary: PrimaryPanel::from_forecast(forecast, icon, unit),
            summaries: forecast
                .upcoming(SUMMARY_DAYS)
                .iter()
                .map(|day| DaySummary::from_observation(day, unit))
                .collect(),
        }
    }
}
