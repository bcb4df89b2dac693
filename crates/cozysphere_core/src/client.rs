//! The remote data client.
//!
//! [`HubClient`] translates logical dashboard operations into HTTP calls
//! against a configured base URL. Every operation is an independent future:
//! it completes exactly once, on the caller's task context, and dropping it
//! cancels the in-flight request. The client performs no retries; a failure
//! surfaces immediately and retry policy stays with the caller.

use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::config::HubConfig;
use crate::endpoint::{Endpoint, append_query};
use crate::error::{ClientError, Result};
use crate::types::{
    DeviceState, ModeRequest, ModeTable, RelayPrediction, SensorReading, TargetValues,
    ThresholdSettings,
};
use url::Url;

/// Async HTTP client for the hub backend.
///
/// Construct one per process from an explicit [`HubConfig`] and pass it to
/// whatever renders the results. Cloning is cheap (the underlying connection
/// pool is shared) and clones stay independent per call; no locking happens
/// inside the client.
#[derive(Debug, Clone)]
pub struct HubClient {
    base: Url,
    http: reqwest::Client,
}

impl HubClient {
    /// Build a client for the given configuration.
    ///
    /// The base URL is validated here, once; a malformed base never reaches
    /// the network. The optional timeout applies to every request made
    /// through this client.
    pub fn new(config: &HubConfig) -> Result<Self> {
        let base = Url::parse(&config.base_url)
            .map_err(|cause| ClientError::invalid_endpoint(&config.base_url, "", cause))?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|cause| ClientError::transport(&config.base_url, cause))?;

        Ok(Self { base, http })
    }

    /// The resolved base URL this client talks to.
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// GET `/data/latest`: the most recent sensor reading.
    pub async fn latest_reading(&self) -> Result<SensorReading> {
        self.get_json(
            Endpoint::LatestReading,
            None,
            "a JSON object with numeric temperature and humidity",
        )
        .await
    }

    /// GET `/data/hourly_avg`: per-hour averages over the last day.
    pub async fn hourly_averages(&self) -> Result<Vec<SensorReading>> {
        self.get_json(
            Endpoint::HourlyAverages,
            None,
            "a JSON array of reading objects",
        )
        .await
    }

    /// GET `/data/daily_avg`: per-day averages over the last month.
    pub async fn daily_averages(&self) -> Result<Vec<SensorReading>> {
        self.get_json(
            Endpoint::DailyAverages,
            None,
            "a JSON array of reading objects",
        )
        .await
    }

    /// GET `/predict_relay/{relay_type}`: ask the hub's model whether the
    /// relay should be on.
    ///
    /// `params` become query parameters, each value stringified uniformly
    /// (see [`crate::endpoint::stringify`]). Returns the `status` field of
    /// the response, typically `"ON"` or `"OFF"`.
    pub async fn predict_relay_state(
        &self,
        relay_type: &str,
        params: &serde_json::Map<String, Value>,
    ) -> Result<String> {
        let prediction: RelayPrediction = self
            .get_json(
                Endpoint::PredictRelay(relay_type),
                Some(params),
                "a JSON object with a string `status` field",
            )
            .await?;
        Ok(prediction.status)
    }

    /// POST `/target_data`: set the target climate values.
    pub async fn submit_targets(&self, temperature: f64, humidity: f64) -> Result<()> {
        let body = TargetValues {
            target_temperature: temperature,
            target_humidity: humidity,
        };
        self.post(Endpoint::SubmitTargets, &body).await.map(|_| ())
    }

    /// POST `/device_state`: switch a device on or off.
    pub async fn set_device_state(&self, device: &str, on: bool) -> Result<()> {
        let body = DeviceState {
            device: device.to_string(),
            state: on,
        };
        self.post(Endpoint::SubmitDeviceState, &body)
            .await
            .map(|_| ())
    }

    /// POST `/mode`: submit the selected home mode.
    pub async fn set_mode(&self, mode: &str) -> Result<()> {
        let body = ModeRequest {
            mode: mode.to_string(),
        };
        self.post(Endpoint::SubmitMode, &body).await.map(|_| ())
    }

    /// GET `/settings`: the active comfort thresholds.
    pub async fn settings(&self) -> Result<ThresholdSettings> {
        self.get_json(
            Endpoint::FetchSettings,
            None,
            "a JSON object with threshold fields",
        )
        .await
    }

    /// POST `/settings`: overwrite the comfort thresholds. Returns the
    /// thresholds the hub acknowledged.
    pub async fn update_settings(&self, settings: &ThresholdSettings) -> Result<ThresholdSettings> {
        #[derive(serde::Deserialize)]
        struct Ack {
            settings: ThresholdSettings,
        }
        let (url, bytes) = self.post(Endpoint::UpdateSettings, settings).await?;
        if bytes.is_empty() {
            return Err(ClientError::EmptyResponse { url });
        }
        let ack: Ack = serde_json::from_slice(&bytes).map_err(|cause| {
            ClientError::decode(url, "a JSON object with a `settings` field", cause)
        })?;
        Ok(ack.settings)
    }

    /// GET `/modes`: every configured home mode plus the active one.
    pub async fn modes(&self) -> Result<ModeTable> {
        self.get_json(
            Endpoint::FetchModes,
            None,
            "a JSON object with current_mode and modes",
        )
        .await
    }

    /// POST `/modes/activate/{name}`: make the named mode active.
    pub async fn activate_mode(&self, name: &str) -> Result<()> {
        self.post(Endpoint::ActivateMode(name), &serde_json::json!({}))
            .await
            .map(|_| ())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint<'_>,
        params: Option<&serde_json::Map<String, Value>>,
        expected: &str,
    ) -> Result<T> {
        let mut url = endpoint.url(&self.base)?;
        if let Some(params) = params {
            append_query(&mut url, params);
        }
        debug!(url = %url, "GET");

        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|cause| ClientError::transport(url.as_str(), cause))?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|cause| ClientError::transport(url.as_str(), cause))?;

        check_status(&url, status, &bytes)?;
        if bytes.is_empty() {
            return Err(ClientError::EmptyResponse {
                url: url.to_string(),
            });
        }
        serde_json::from_slice(&bytes)
            .map_err(|cause| ClientError::decode(url.as_str(), expected, cause))
    }

    /// POST `body` as JSON and require a 2xx. Returns the response body for
    /// the few operations that decode an acknowledgement.
    async fn post<B: Serialize + ?Sized>(
        &self,
        endpoint: Endpoint<'_>,
        body: &B,
    ) -> Result<(String, Vec<u8>)> {
        let url = endpoint.url(&self.base)?;
        debug!(url = %url, "POST");

        let response = self
            .http
            .post(url.clone())
            .json(body)
            .send()
            .await
            .map_err(|cause| ClientError::transport(url.as_str(), cause))?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|cause| ClientError::transport(url.as_str(), cause))?;

        check_status(&url, status, &bytes)?;
        Ok((url.to_string(), bytes.to_vec()))
    }
}

fn check_status(url: &Url, status: StatusCode, body: &[u8]) -> Result<()> {
    if status.is_success() {
        return Ok(());
    }
    Err(ClientError::UnexpectedStatus {
        url: url.to_string(),
        status: status.as_u16(),
        body: String::from_utf8_lossy(body).into_owned(),
    })
}
