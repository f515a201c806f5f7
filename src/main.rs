mod cli;

use std::sync::Arc;

use anyhow::{Context, Result};
use smartweather_core::{AppError, Config};
use smartweather_services::{SqliteStore, WeatherSession};
use smartweather_weather::display::{
    format_clock, format_humidity, format_temperature, format_visibility, format_wind,
};
use smartweather_weather::OpenWeatherClient;

use crate::cli::CliArgs;

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse(std::env::args().skip(1))?;
    let (config, validation) = Config::load_validated()?;
    smartweather_core::init(&config.logging.filter)?;

    // Validation ran before the subscriber existed
    for warning in &validation.warnings {
        tracing::warn!("Config warning: {}", warning);
    }

    let store = SqliteStore::open(&config.database_path())
        .map_err(AppError::from)
        .context("Failed to open state database")?;
    let settings = cli::apply(&args, &store)?;
    for notice in &settings.notices {
        eprintln!("{notice}");
    }
    let prefs = settings.preferences;

    let client = OpenWeatherClient::new(&config.provider)
        .map_err(|e| AppError::Service(e.to_string()))?;
    let center = (config.default_location.lat, config.default_location.lon);
    let mut session = WeatherSession::new(Arc::new(client), store, center);

    tracing::info!("SmartWeather started");

    let query = args.query;
    let outcome = if query.trim().is_empty() {
        println!("Showing {}", config.default_location.name);
        session.refresh().await
    } else {
        if let Some(pending) = session.set_query(&query) {
            if let Err(e) = pending.await {
                tracing::warn!("Suggestion lookup task failed: {}", e);
            }
        }
        session.submit().await
    };

    if let Err(e) = outcome {
        let app: AppError = e.into();
        tracing::debug!("Session error: {:?}", app);
        eprintln!(
            "Error: {}",
            session.error().unwrap_or_else(|| app.user_message())
        );
        if app.is_retryable() {
            eprintln!("Run again to retry.");
        }
    }

    if let Some(s) = session.snapshot() {
        println!();
        println!("{}", s.location_name.as_deref().unwrap_or("Unknown location"));
        if let Some(description) = &s.condition_description {
            println!("  {description}");
        }
        println!("  Temperature: {}", format_temperature(s.temperature, prefs.unit));
        println!("  Feels like:  {}", format_temperature(s.feels_like, prefs.unit));
        println!("  Humidity:    {}", format_humidity(s.humidity_pct));
        println!("  Wind:        {}", format_wind(s.wind_speed_ms));
        println!("  Visibility:  {}", format_visibility(s.visibility_km));
        println!("  Sunrise:     {}", format_clock(s.sunrise_epoch));
        println!("  Sunset:      {}", format_clock(s.sunset_epoch));

        for persona in prefs.active_personas() {
            println!();
            println!("{persona} advisories:");
            for item in session.advisories(persona) {
                println!("  - {}: {}", item.title, item.message);
            }
        }

        let soil = session.soil_moisture();
        println!();
        println!("Soil moisture: {}% ({})", soil.percent, soil.level);
    }

    println!();
    println!("{}", session.hint());

    if !session.recent().is_empty() {
        println!();
        println!("Recent:");
        for location in session.recent() {
            println!("  {} ({:.4}, {:.4})", location.name, location.lat, location.lon);
        }
    }

    if !settings.saved.list().is_empty() {
        println!();
        println!("Saved: {}", settings.saved.list().join(", "));
    }

    println!();
    println!("Preferences: {}", prefs.summary_text());

    Ok(())
}
