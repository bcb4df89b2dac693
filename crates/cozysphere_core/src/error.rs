use miette::Diagnostic;
use thiserror::Error;

/// Errors surfaced by [`HubClient`](crate::client::HubClient) operations.
///
/// Every operation reports exactly one of these through its `Result`; the
/// client never retries and never swallows a failure. Retry and logging
/// policy belong to the caller.
#[derive(Error, Diagnostic, Debug)]
pub enum ClientError {
    #[error("Invalid endpoint URL")]
    #[diagnostic(
        code(cozysphere_core::invalid_endpoint),
        help("Check the configured base URL; paths are appended verbatim, so the base must be a valid absolute http(s) URL")
    )]
    InvalidEndpoint {
        base: String,
        path: String,
        #[source]
        cause: url::ParseError,
    },

    #[error("Request to {url} failed")]
    #[diagnostic(
        code(cozysphere_core::transport_error),
        help("Check that the hub backend is running and reachable from this machine")
    )]
    Transport {
        url: String,
        #[source]
        cause: reqwest::Error,
    },

    #[error("Hub returned status {status} for {url}")]
    #[diagnostic(
        code(cozysphere_core::unexpected_status),
        help("The hub rejected the request; the response body may contain a backend error message")
    )]
    UnexpectedStatus {
        url: String,
        status: u16,
        body: String,
    },

    #[error("Empty response from {url}")]
    #[diagnostic(
        code(cozysphere_core::empty_response),
        help("The hub returned no body where a JSON payload was expected")
    )]
    EmptyResponse { url: String },

    #[error("Failed to decode response from {url}")]
    #[diagnostic(
        code(cozysphere_core::decode_error),
        help("Expected {expected}; the hub sent a body that is not valid JSON of that shape")
    )]
    Decode {
        url: String,
        expected: String,
        #[source]
        cause: serde_json::Error,
    },

    #[error("Failed to load configuration from {path}")]
    #[diagnostic(
        code(cozysphere_core::configuration_error),
        help("Check that the file exists and is valid TOML")
    )]
    Config {
        path: String,
        #[source]
        cause: Box<dyn std::error::Error + Send + Sync>,
    },
}

pub type Result<T> = std::result::Result<T, ClientError>;

// Helper constructors keep the call sites in client.rs short
impl ClientError {
    pub fn invalid_endpoint(
        base: impl Into<String>,
        path: impl Into<String>,
        cause: url::ParseError,
    ) -> Self {
        Self::InvalidEndpoint {
            base: base.into(),
            path: path.into(),
            cause,
        }
    }

    pub fn transport(url: impl Into<String>, cause: reqwest::Error) -> Self {
        Self::Transport {
            url: url.into(),
            cause,
        }
    }

    pub fn decode(
        url: impl Into<String>,
        expected: impl Into<String>,
        cause: serde_json::Error,
    ) -> Self {
        Self::Decode {
            url: url.into(),
            expected: expected.into(),
            cause,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use miette::Report;

    #[test]
    fn test_invalid_endpoint_report() {
        let cause = url::Url::parse("not a url").unwrap_err();
        let error = ClientError::invalid_endpoint("not a url", "/data/latest", cause);
        let report = Report::new(error);
        let output = format!("{:?}", report);
        assert!(output.contains("invalid_endpoint"));
    }

    #[test]
    fn test_decode_error_names_expected_shape() {
        let cause = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = ClientError::decode("http://hub/api/data/latest", "a JSON object", cause);
        let report = Report::new(error);
        let output = format!("{:?}", report);
        assert!(output.contains("a JSON object"));
        assert!(output.contains("http://hub/api/data/latest"));
    }
}
