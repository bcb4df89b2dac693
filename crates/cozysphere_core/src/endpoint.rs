//! Endpoint descriptors for the hub's HTTP surface.
//!
//! Each logical operation maps to a fixed (method, path) pair under the
//! configured base URL. URL construction is validated here, before any
//! request is issued; a base/path combination that does not parse is an
//! [`ClientError::InvalidEndpoint`] and never reaches the network.

use reqwest::Method;
use serde_json::Value;
use url::Url;

use crate::error::{ClientError, Result};

/// One addressable operation on the hub backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint<'a> {
    /// Latest sensor reading
    LatestReading,
    /// Hourly temperature/humidity averages over the last day
    HourlyAverages,
    /// Daily temperature/humidity averages over the last month
    DailyAverages,
    /// ML relay-state prediction for the named relay
    PredictRelay(&'a str),
    /// Submit target temperature/humidity
    SubmitTargets,
    /// Submit a device on/off state
    SubmitDeviceState,
    /// Submit the selected home mode
    SubmitMode,
    /// Read the active threshold settings
    FetchSettings,
    /// Overwrite threshold settings
    UpdateSettings,
    /// List all home modes and the currently active one
    FetchModes,
    /// Activate the named home mode
    ActivateMode(&'a str),
}

impl Endpoint<'_> {
    pub fn method(&self) -> Method {
        match self {
            Endpoint::LatestReading
            | Endpoint::HourlyAverages
            | Endpoint::DailyAverages
            | Endpoint::PredictRelay(_)
            | Endpoint::FetchSettings
            | Endpoint::FetchModes => Method::GET,
            Endpoint::SubmitTargets
            | Endpoint::SubmitDeviceState
            | Endpoint::SubmitMode
            | Endpoint::UpdateSettings
            | Endpoint::ActivateMode(_) => Method::POST,
        }
    }

    /// Path relative to the base URL, with template segments filled in.
    pub fn path(&self) -> String {
        match self {
            Endpoint::LatestReading => "/data/latest".to_string(),
            Endpoint::HourlyAverages => "/data/hourly_avg".to_string(),
            Endpoint::DailyAverages => "/data/daily_avg".to_string(),
            Endpoint::PredictRelay(relay_type) => format!("/predict_relay/{}", relay_type),
            Endpoint::SubmitTargets => "/target_data".to_string(),
            Endpoint::SubmitDeviceState => "/device_state".to_string(),
            Endpoint::SubmitMode => "/mode".to_string(),
            Endpoint::FetchSettings | Endpoint::UpdateSettings => "/settings".to_string(),
            Endpoint::FetchModes => "/modes".to_string(),
            Endpoint::ActivateMode(name) => format!("/modes/activate/{}", name),
        }
    }

    /// Resolve this endpoint against a base URL.
    ///
    /// The path is appended verbatim to the base (trailing slash trimmed),
    /// so a base of `http://host:5001/api` keeps its `/api` prefix.
    pub fn url(&self, base: &Url) -> Result<Url> {
        let path = self.path();
        let joined = format!("{}{}", base.as_str().trim_end_matches('/'), path);
        Url::parse(&joined)
            .map_err(|cause| ClientError::invalid_endpoint(base.as_str(), path, cause))
    }
}

/// Append query parameters to a URL.
///
/// `serde_json::Map` is BTree-backed, so iteration order (and therefore the
/// resulting query string) is deterministic for a given parameter set.
pub fn append_query(url: &mut Url, params: &serde_json::Map<String, Value>) {
    if params.is_empty() {
        return;
    }
    let mut pairs = url.query_pairs_mut();
    for (key, value) in params {
        pairs.append_pair(key, &stringify(value));
    }
}

/// Uniform string form of a query-parameter value, whatever its JSON type.
///
/// Strings are used unquoted; everything else takes its canonical JSON
/// rendering (`true`, `21.5`, `null`, ...).
pub fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn base() -> Url {
        Url::parse("http://localhost:5001/api").unwrap()
    }

    #[test]
    fn test_fetch_endpoints_are_get() {
        for ep in [
            Endpoint::LatestReading,
            Endpoint::HourlyAverages,
            Endpoint::DailyAverages,
            Endpoint::PredictRelay("fan"),
            Endpoint::FetchSettings,
            Endpoint::FetchModes,
        ] {
            assert_eq!(ep.method(), Method::GET, "{:?}", ep);
        }
    }

    #[test]
    fn test_submit_endpoints_are_post() {
        for ep in [
            Endpoint::SubmitTargets,
            Endpoint::SubmitDeviceState,
            Endpoint::SubmitMode,
            Endpoint::UpdateSettings,
            Endpoint::ActivateMode("Sleep Mode"),
        ] {
            assert_eq!(ep.method(), Method::POST, "{:?}", ep);
        }
    }

    #[test]
    fn test_base_prefix_is_preserved() {
        let url = Endpoint::LatestReading.url(&base()).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5001/api/data/latest");

        // Trailing slash on the base must not double up
        let slashed = Url::parse("http://localhost:5001/api/").unwrap();
        let url = Endpoint::HourlyAverages.url(&slashed).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5001/api/data/hourly_avg");
    }

    #[test]
    fn test_relay_path_template() {
        let url = Endpoint::PredictRelay("heater").url(&base()).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5001/api/predict_relay/heater");
    }

    #[test]
    fn test_query_is_deterministic_and_stringified() {
        let mut url = Endpoint::PredictRelay("fan").url(&base()).unwrap();
        let params = json!({
            "temperature": 21.5,
            "is_home": true,
            "hour": 14,
            "note": "manual"
        });
        append_query(&mut url, params.as_object().unwrap());
        // serde_json::Map iterates keys in sorted order
        assert_eq!(
            url.as_str(),
            "http://localhost:5001/api/predict_relay/fan?hour=14&is_home=true&note=manual&temperature=21.5"
        );
    }

    #[test]
    fn test_empty_params_add_no_query() {
        let mut url = Endpoint::PredictRelay("fan").url(&base()).unwrap();
        append_query(&mut url, &serde_json::Map::new());
        assert_eq!(url.query(), None);
    }
}
