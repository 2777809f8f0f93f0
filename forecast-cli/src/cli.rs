use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use forecast_core::{
    Completion, Config, DashboardState, UnitPreference, WeatherFetcher, fetcher_from_config,
};
use inquire::{Password, PasswordDisplayMode, Select, Text};
use std::sync::Arc;

use crate::{app, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "Weather forecast dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key, default place and unit.
    Configure,

    /// Fetch and print the forecast for a place once.
    Show {
        /// City or place name.
        place: String,

        /// Temperature unit: celsius or fahrenheit.
        #[arg(long, value_parser = parse_unit)]
        unit: Option<UnitPreference>,
    },

    /// Interactive dashboard: type a place to search, `:unit` to toggle units.
    Dashboard {
        /// Place to load first; defaults to the configured place.
        #[arg(long)]
        place: Option<String>,

        /// Temperature unit: celsius or fahrenheit.
        #[arg(long, value_parser = parse_unit)]
        unit: Option<UnitPreference>,
    },
}

fn parse_unit(value: &str) -> Result<UnitPreference, String> {
    UnitPreference::try_from(value).map_err(|e| e.to_string())
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = Config::load()?;

        match self.command {
            Command::Configure => configure(&mut config)?,
            Command::Show { place, unit } => {
                let fetcher = fetcher_from_config(&config)?;
                let mut state = DashboardState::new(place.as_str(), unit.unwrap_or(config.unit));

                let Some(ticket) = state.request(&place) else {
                    bail!("Place name must not be empty");
                };
                let result = fetcher.fetch(ticket.query()).await;

                match state.complete(&ticket, result) {
                    Completion::Applied => {
                        let text = render::dashboard(&state.view(), chrono::Local::now())
                            .context("Failed to render forecast")?;
                        print!("{text}");
                    }
                    Completion::Failed { notice } => bail!("{notice}"),
                    Completion::Stale => bail!("Forecast request for {place} was superseded"),
                }
            }
            Command::Dashboard { place, unit } => {
                let fetcher: Arc<dyn WeatherFetcher> = Arc::from(fetcher_from_config(&config)?);
                let place = place.unwrap_or_else(|| config.default_place.clone());
                let state = DashboardState::new(place, unit.unwrap_or(config.unit));

                app::run(fetcher, state).await?;
            }
        }

        Ok(())
    }
}

fn configure(config: &mut Config) -> anyhow::Result<()> {
    let api_key = Password::new("RapidAPI key for Visual Crossing:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let place = Text::new("Default place:")
        .with_default(&config.default_place)
        .prompt()
        .context("Failed to read default place")?;

    let units = vec![UnitPreference::Celsius, UnitPreference::Fahrenheit];
    let cursor = units.iter().position(|u| *u == config.unit).unwrap_or(0);
    let unit = Select::new("Temperature unit:", units)
        .with_starting_cursor(cursor)
        .prompt()
        .context("Failed to read temperature unit")?;

    if !api_key.trim().is_empty() {
        config.set_api_key(api_key.trim().to_string());
    }
    if !place.trim().is_empty() {
        config.default_place = place.trim().to_string();
    }
    config.unit = unit;

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());

    Ok(())
}
