//! Core library for the `forecast` dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The weather fetcher abstraction and its Visual Crossing implementation
//! - Condition classification, unit conversion and day labels
//! - Dashboard state and the view model rendered by front ends
//!
//! It is used by `forecast-cli`, but can also be reused by other front ends.

pub mod calendar;
pub mod condition;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod model;
pub mod provider;
pub mod units;
pub mod view;

pub use condition::{BackgroundAsset, ConditionCategory, IconAsset, classify};
pub use config::{Config, ProviderConfig};
pub use dashboard::{Completion, DashboardState, FETCH_FAILED_NOTICE, RequestTicket};
pub use error::FetchError;
pub use model::{DailyObservation, Forecast, ForecastQuery, UnitPreference};
pub use provider::{WeatherFetcher, fetcher_from_config};
pub use view::DashboardView;
