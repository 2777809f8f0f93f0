use chrono::{DateTime, TimeZone};
use console::Style;
use forecast_core::{
    DashboardView,
    calendar::{AccentColor, AccentWeight, DayAccent},
    view::{DaySummary, PrimaryPanel},
};
use std::fmt::{self, Write};

const RULE: &str = "────────────────────────────────────────────";

/// Render the whole dashboard as text. `now` feeds the date/time line.
pub fn dashboard<Tz>(view: &DashboardView, now: DateTime<Tz>) -> Result<String, fmt::Error>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let mut out = String::new();

    writeln!(out, "Background: {} ({})", view.background.name(), view.background.file_name())?;
    writeln!(out, "{RULE}")?;
    primary(&mut out, &view.primary, &now)?;
    writeln!(out, "{RULE}")?;

    for summary in &view.summaries {
        day(&mut out, summary)?;
    }

    Ok(out)
}

fn primary<W, Tz>(out: &mut W, panel: &PrimaryPanel, now: &DateTime<Tz>) -> fmt::Result
where
    W: Write,
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    writeln!(out, "  [{}]  {} °{}", panel.icon.name(), panel.temperature, panel.unit.symbol())?;
    writeln!(out, "  {}", Style::new().bold().apply_to(&panel.location_label))?;
    writeln!(out, "  {}    {}", now.format("%a %b %d %Y"), now.format("%H:%M:%S"))?;
    writeln!(out, "  Wind Speed       {} km/h", panel.wind_speed)?;
    writeln!(out, "  Wind Direction   {}", panel.wind_direction)?;
    // Min/max are stored and shown in Celsius regardless of the toggle.
    writeln!(out, "  Min Temperature  {} °C", panel.min_temperature)?;
    writeln!(out, "  Max Temperature  {} °C", panel.max_temperature)?;
    writeln!(out, "  Humidity         {} %", panel.humidity)?;
    writeln!(out, "  {}", panel.conditions)
}

fn day<W: Write>(out: &mut W, summary: &DaySummary) -> fmt::Result {
    let weekday = accent_style(summary.accent).apply_to(format!("{:<10}", summary.weekday));
    let icon = summary.icon.map_or("n/a", |icon| icon.name());

    writeln!(
        out,
        "  {weekday} [{icon:<5}] {:>8} °{}  {}",
        summary.temperature,
        summary.unit.symbol(),
        summary.date
    )
}

fn accent_style(accent: DayAccent) -> Style {
    let style = match accent.color {
        AccentColor::Red => Style::new().red(),
        AccentColor::Blue => Style::new().blue(),
        AccentColor::Green => Style::new().green(),
        AccentColor::Yellow => Style::new().yellow(),
        AccentColor::Purple => Style::new().magenta(),
        AccentColor::Orange => Style::new().color256(208),
        AccentColor::Teal => Style::new().cyan(),
        AccentColor::Gray => Style::new().color256(245),
    };

    match accent.weight {
        AccentWeight::Bold => style.bold(),
        AccentWeight::Semibold => style,
    }
}
