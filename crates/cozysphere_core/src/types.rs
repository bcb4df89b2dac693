//! Wire types for the hub API.
//!
//! Each endpoint gets an explicit schema: the fields the dashboard relies on
//! are typed and required, anything else the backend sends rides along in a
//! flattened `extra` map. A payload missing a required field decodes to a
//! [`ClientError::Decode`](crate::error::ClientError), never to a silent
//! placeholder value.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One sensor reading (or one averaged bucket) from the hub.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Temperature in degrees Celsius
    pub temperature: f64,
    /// Relative humidity in percent
    pub humidity: f64,
    /// Any additional backend fields (air quality, timestamps, record ids)
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Relay prediction payload; the caller only sees the `status` string.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RelayPrediction {
    pub status: String,
}

/// POST body for `/target_data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetValues {
    pub target_temperature: f64,
    pub target_humidity: f64,
}

/// POST body for `/device_state`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceState {
    pub device: String,
    pub state: bool,
}

/// POST body for `/mode`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct ModeRequest {
    pub mode: String,
}

/// Global comfort thresholds the hub regulates against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSettings {
    pub temp_threshold_high: f64,
    pub hum_threshold_low: f64,
}

/// All configured home modes plus the currently active one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeTable {
    pub current_mode: String,
    pub modes: HashMap<String, ThresholdSettings>,
}

/// The relays the hub knows how to predict and drive.
///
/// The wire format is a plain string and the client accepts arbitrary relay
/// names; this enum covers the known set for callers that want it typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relay {
    Fan,
    Heater,
    Humidifier,
}

impl Relay {
    pub fn as_str(&self) -> &'static str {
        match self {
            Relay::Fan => "fan",
            Relay::Heater => "heater",
            Relay::Humidifier => "humidifier",
        }
    }
}

impl fmt::Display for Relay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Relay {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "fan" => Ok(Relay::Fan),
            "heater" => Ok(Relay::Heater),
            "humidifier" => Ok(Relay::Humidifier),
            other => Err(format!(
                "unknown relay '{}' (expected fan, heater or humidifier)",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_reading_keeps_extra_fields() {
        let reading: SensorReading = serde_json::from_value(json!({
            "temperature": 21.5,
            "humidity": 48,
            "air_quality": "Good",
            "_id": "675421ab"
        }))
        .unwrap();
        assert_eq!(reading.temperature, 21.5);
        assert_eq!(reading.humidity, 48.0);
        assert_eq!(reading.extra["air_quality"], json!("Good"));
    }

    #[test]
    fn test_reading_requires_both_measurements() {
        // No silent 22/55 fallback: a missing field is a hard decode error
        let result = serde_json::from_value::<SensorReading>(json!({ "temperature": 21.5 }));
        assert!(result.is_err());

        let result = serde_json::from_value::<SensorReading>(json!({
            "temperature": "21.5",
            "humidity": 48
        }));
        assert!(result.is_err(), "stringly-typed temperature must not decode");
    }

    #[test]
    fn test_relay_round_trip() {
        for relay in [Relay::Fan, Relay::Heater, Relay::Humidifier] {
            assert_eq!(relay.as_str().parse::<Relay>().unwrap(), relay);
        }
        assert!("aircon".parse::<Relay>().is_err());
    }
}
