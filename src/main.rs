use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use drone_weather::api::AppState;
use drone_weather::flight::{daily_verdicts, hourly_verdicts};
use drone_weather::weather::fetch_or_demo;
use drone_weather::{
    AdvisorConfig, DemoWeatherSource, DroneLimits, FlightAnalysis, FlightNarrative,
    OpenWeatherClient, WeatherMain, WeatherReport, WeatherSnapshot, WeatherSource, telemetry, web,
};

#[derive(Debug, Parser)]
#[command(
    name = "drone-weather",
    version,
    about = "Drone Weather Advisor - checks weather against your drone's flight envelope"
)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP backend
    Serve {
        #[arg(long)]
        port: Option<u16>,
        /// Serve synthetic weather instead of calling OpenWeather
        #[arg(long)]
        demo: bool,
    },
    /// Fetch the weather for a location and print the flight verdict
    Check {
        #[arg(long, allow_negative_numbers = true, requires = "lon")]
        lat: Option<f64>,
        #[arg(long, allow_negative_numbers = true, requires = "lat")]
        lon: Option<f64>,
        #[arg(long)]
        demo: bool,
    },
    /// Evaluate a single reading given on the command line
    Evaluate {
        /// Temperature in Celsius
        #[arg(long, allow_negative_numbers = true)]
        temperature: f64,
        /// Sustained wind speed in m/s
        #[arg(long)]
        wind: f64,
        /// Gust speed in m/s
        #[arg(long)]
        gust: Option<f64>,
        /// Main condition group (Clear, Clouds, Rain, ...)
        #[arg(long, default_value = "Clear")]
        weather: String,
        /// Relative humidity in percent
        #[arg(long)]
        humidity: Option<f64>,
        /// Visibility in meters
        #[arg(long)]
        visibility: Option<f64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AdvisorConfig::load_from_path(cli.config.clone())
        .with_context(|| "Failed to load configuration")?;
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    let _telemetry = telemetry::init(&config.logging)?;

    match cli.command {
        Command::Serve { port, demo } => {
            let source = weather_source(&config, demo)?;
            let state = Arc::new(AppState::new(config.drone.clone(), source));
            web::run(
                state,
                port.unwrap_or(config.server.port),
                &config.server.static_dir,
            )
            .await
        }
        Command::Check { lat, lon, demo } => {
            let location = match (lat, lon) {
                (Some(latitude), Some(longitude)) => {
                    drone_weather::Location::new(latitude, longitude, "Custom location".to_string())
                }
                _ => config.location.to_location(),
            };
            info!(location = %location.name, "Checking flight conditions");

            let source = weather_source(&config, demo)?;
            let report = fetch_or_demo(source.as_ref(), location.latitude, location.longitude)
                .await
                .truncated();

            println!("{} ({})", location.name, location.format_coordinates());
            print_report(&report, &config.drone);
            Ok(())
        }
        Command::Evaluate {
            temperature,
            wind,
            gust,
            weather,
            humidity,
            visibility,
        } => {
            let snapshot = WeatherSnapshot {
                wind_gust_ms: gust,
                humidity_pct: humidity,
                visibility_m: visibility,
                ..WeatherSnapshot::new(temperature, wind, WeatherMain::from(weather))
            };
            print_verdict(&snapshot, &config.drone, false);
            Ok(())
        }
    }
}

fn weather_source(config: &AdvisorConfig, demo: bool) -> Result<Arc<dyn WeatherSource>> {
    if demo {
        info!("Using synthetic weather data");
        return Ok(Arc::new(DemoWeatherSource));
    }
    if config.usable_api_key().is_none() {
        warn!("No OpenWeather API key configured; set OPENWEATHER_API_KEY or weather.api_key");
    }
    let client = OpenWeatherClient::new(config).with_context(|| "Failed to create weather client")?;
    Ok(Arc::new(client))
}

fn print_verdict(snapshot: &WeatherSnapshot, limits: &DroneLimits, is_demo: bool) {
    let analysis = FlightAnalysis::evaluate(snapshot, limits);
    let narrative = FlightNarrative::format(snapshot, &analysis, limits, is_demo);

    println!(
        "{} Overall: {}",
        analysis.overall_severity.badge(),
        analysis.overall_severity
    );
    for factor in &analysis.conditions {
        println!(
            "  {} {:<9} {}",
            factor.severity.badge(),
            factor.severity,
            factor.message
        );
    }
    println!();
    println!("{}", narrative.recommendation);
    println!("{}", narrative.summary);
    println!("{} - {}", narrative.confidence, narrative.timestamp);
}

fn print_report(report: &WeatherReport, limits: &DroneLimits) {
    println!(
        "Current: {:.1}°C, wind {:.1} m/s (gusts {:.1} m/s), {} [{}]",
        report.current.temperature_c,
        report.current.wind_speed_ms,
        report.current.wind_gust_ms(),
        report.current.describe(),
        report.current.weather_main.icon()
    );
    println!();
    print_verdict(&report.current, limits, report.demo_mode);

    let hourly = hourly_verdicts(report, limits);
    if !hourly.is_empty() {
        println!();
        println!("Hourly:");
        for (point, verdict) in report.hourly.iter().zip(&hourly) {
            let time = point
                .timestamp
                .map(|t| t.with_timezone(&Local).format("%a %H:%M").to_string())
                .unwrap_or_default();
            println!(
                "  {:<9} {} {:<9} {:>5.1}°C {:>4.1} m/s",
                time,
                verdict.overall_severity.badge(),
                verdict.overall_severity,
                point.temperature_c,
                point.wind_speed_ms
            );
        }
    }

    let daily = daily_verdicts(report, limits);
    if !daily.is_empty() {
        println!();
        println!("Daily:");
        for (day, verdict) in report.daily.iter().zip(&daily) {
            println!(
                "  {:<10} {} {:<9} {:>5.1}..{:.1}°C {:>4.1} m/s {}",
                day.timestamp.with_timezone(&Local).format("%a %d %b"),
                verdict.overall_severity.badge(),
                verdict.overall_severity,
                day.temp_min_c,
                day.temp_max_c,
                day.wind_speed_ms,
                day.weather_main
            );
        }
    }

    if report.demo_mode {
        println!();
        println!("Demo mode: weather data is simulated (API {})", report.api_version);
    }
}
