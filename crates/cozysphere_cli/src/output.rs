//! Terminal rendering for hub data.

use cozysphere_core::cycle::CycleInterval;
use cozysphere_core::types::{ModeTable, Relay, SensorReading, ThresholdSettings};
use owo_colors::OwoColorize;

pub fn reading(reading: &SensorReading) {
    println!(
        "{} {:.1}\u{b0}C   {} {:.0}%",
        "Temperature:".bold(),
        reading.temperature,
        "Humidity:".bold(),
        reading.humidity
    );
    if let Some(air_quality) = reading.extra.get("air_quality") {
        println!("{} {}", "Air quality:".bold(), air_quality);
    }
}

pub fn reading_series(title: &str, readings: &[SensorReading]) {
    println!("{}", title.bold());
    if readings.is_empty() {
        println!("  {}", "no data".dimmed());
        return;
    }
    for (i, r) in readings.iter().enumerate() {
        println!("  {:>3}  {:>5.1}\u{b0}C  {:>3.0}%", i, r.temperature, r.humidity);
    }
}

pub fn relay_status(relay: Relay, status: &str) {
    let rendered = match status {
        "ON" => status.green().bold().to_string(),
        "OFF" => status.red().bold().to_string(),
        other => other.yellow().to_string(),
    };
    println!("{} {}", format!("{relay}:").bold(), rendered);
}

pub fn settings(settings: &ThresholdSettings) {
    println!(
        "{} {:.1}\u{b0}C   {} {:.0}%",
        "Temp high:".bold(),
        settings.temp_threshold_high,
        "Humidity low:".bold(),
        settings.hum_threshold_low
    );
}

pub fn mode_table(table: &ModeTable) {
    for (name, thresholds) in &table.modes {
        let marker = if *name == table.current_mode {
            "*".green().to_string()
        } else {
            " ".to_string()
        };
        println!(
            "{} {:<20} temp<{:.1}\u{b0}C  hum>{:.0}%",
            marker, name, thresholds.temp_threshold_high, thresholds.hum_threshold_low
        );
    }
}

pub fn cycle_prediction(prediction: Option<CycleInterval>) {
    match prediction {
        Some(interval) => println!(
            "{} {} to {}",
            "Predicted next cycle:".bold(),
            interval.start().to_string().cyan(),
            interval.end().to_string().cyan()
        ),
        None => println!("{}", "No recorded cycles to predict from.".dimmed()),
    }
}

pub fn confirm(message: &str) {
    println!("{} {}", "ok:".green().bold(), message);
}
