//! `cozy` — command-line presentation layer over the CozySphere client core.
//!
//! Everything here is rendering: the core fetches and predicts, this binary
//! parses arguments and prints.

mod output;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use cozysphere_core::cycle::CycleInterval;
use cozysphere_core::types::Relay;
use cozysphere_core::{CycleLog, HubClient, HubConfig, ThresholdSettings};
use miette::Result;
use serde_json::Value;
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser)]
#[command(name = "cozy")]
#[command(about = "CozySphere home-automation dashboard client")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Hub base URL (overrides config)
    #[arg(long)]
    base_url: Option<String>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the latest sensor reading
    Status,
    /// Show hourly averages for the last day
    Hourly,
    /// Show daily averages for the last month
    Daily,
    /// Ask the hub whether a relay should be on
    Predict {
        /// Relay to predict (fan, heater, humidifier)
        relay: Relay,
        /// Model inputs as key=value pairs (numbers and booleans are
        /// detected, anything else is sent as a string)
        #[arg(long = "param", value_parser = parse_param)]
        params: Vec<(String, Value)>,
    },
    /// Submit target temperature and humidity
    Target {
        temperature: f64,
        humidity: f64,
    },
    /// Switch a device on or off
    Device {
        /// Device name, e.g. humidifier, heater, fan
        device: String,
        state: Switch,
    },
    /// Submit the selected home mode
    Mode { name: String },
    /// List all home modes and the active one
    Modes,
    /// Activate a home mode on the hub
    Activate { name: String },
    /// Show or update the comfort thresholds
    Settings {
        /// New high temperature threshold
        #[arg(long)]
        temp_high: Option<f64>,
        /// New low humidity threshold
        #[arg(long)]
        hum_low: Option<f64>,
    },
    /// Cycle tracking
    Cycles {
        #[command(subcommand)]
        cmd: CycleCommands,
    },
}

#[derive(Subcommand)]
enum CycleCommands {
    /// Predict the next cycle from recorded intervals
    Predict {
        /// History as start..end date pairs, oldest first,
        /// e.g. 2024-01-01..2024-01-04
        #[arg(required = true, value_parser = parse_interval)]
        history: Vec<CycleInterval>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Switch {
    On,
    Off,
}

fn parse_param(raw: &str) -> std::result::Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))?;
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

fn parse_interval(raw: &str) -> std::result::Result<CycleInterval, String> {
    let (start, end) = raw
        .split_once("..")
        .ok_or_else(|| format!("expected start..end, got '{raw}'"))?;
    let start: NaiveDate = start.parse().map_err(|e| format!("bad start date: {e}"))?;
    let end: NaiveDate = end.parse().map_err(|e| format!("bad end date: {e}"))?;
    CycleInterval::new(start, end).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    let mut config = match &cli.config {
        Some(path) => HubConfig::load(path)?,
        None => HubConfig::default(),
    };
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    debug!(base_url = %config.base_url, "using hub");

    // The cycle commands are pure; only build a client when we need one.
    if let Commands::Cycles { cmd } = &cli.command {
        let CycleCommands::Predict { history } = cmd;
        let log = CycleLog::seeded(history.clone());
        output::cycle_prediction(log.predict_next());
        return Ok(());
    }

    let client = HubClient::new(&config)?;

    match cli.command {
        Commands::Status => {
            let reading = client.latest_reading().await?;
            output::reading(&reading);
        }
        Commands::Hourly => {
            let readings = client.hourly_averages().await?;
            output::reading_series("Hourly averages (last 24h)", &readings);
        }
        Commands::Daily => {
            let readings = client.daily_averages().await?;
            output::reading_series("Daily averages (last 30 days)", &readings);
        }
        Commands::Predict { relay, params } => {
            let params: serde_json::Map<String, Value> = params.into_iter().collect();
            let status = client.predict_relay_state(relay.as_str(), &params).await?;
            output::relay_status(relay, &status);
        }
        Commands::Target {
            temperature,
            humidity,
        } => {
            client.submit_targets(temperature, humidity).await?;
            output::confirm(&format!(
                "targets set to {temperature:.1}\u{b0}C / {humidity:.0}%"
            ));
        }
        Commands::Device { device, state } => {
            let on = matches!(state, Switch::On);
            client.set_device_state(&device, on).await?;
            output::confirm(&format!("{device} {}", if on { "on" } else { "off" }));
        }
        Commands::Mode { name } => {
            client.set_mode(&name).await?;
            output::confirm(&format!("mode set to {name}"));
        }
        Commands::Modes => {
            let table = client.modes().await?;
            output::mode_table(&table);
        }
        Commands::Activate { name } => {
            client.activate_mode(&name).await?;
            output::confirm(&format!("activated {name}"));
        }
        Commands::Settings { temp_high, hum_low } => {
            let current = client.settings().await?;
            if temp_high.is_none() && hum_low.is_none() {
                output::settings(&current);
            } else {
                let updated = client
                    .update_settings(&ThresholdSettings {
                        temp_threshold_high: temp_high.unwrap_or(current.temp_threshold_high),
                        hum_threshold_low: hum_low.unwrap_or(current.hum_threshold_low),
                    })
                    .await?;
                output::settings(&updated);
            }
        }
        Commands::Cycles { .. } => unreachable!("handled above"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_param_detects_json_scalars() {
        assert_eq!(
            parse_param("temperature=21.5").unwrap(),
            ("temperature".to_string(), Value::from(21.5))
        );
        assert_eq!(
            parse_param("is_home=true").unwrap(),
            ("is_home".to_string(), Value::from(true))
        );
        assert_eq!(
            parse_param("note=manual").unwrap(),
            ("note".to_string(), Value::from("manual"))
        );
        assert!(parse_param("no-equals-sign").is_err());
    }

    #[test]
    fn test_parse_interval_validates_order() {
        let interval = parse_interval("2024-01-01..2024-01-04").unwrap();
        assert_eq!(interval.start().to_string(), "2024-01-01");
        assert!(parse_interval("2024-01-04..2024-01-01").is_err());
        assert!(parse_interval("2024-01-01").is_err());
    }
}
