//! voip.ms SDK: typed, blocking Rust client for the voip.ms REST API.
//! Minimal deps: reqwest + serde, with thiserror/tracing/chrono around them.
//!
//! Every call is one HTTP round trip: the request is built from a typed
//! record (query string for GET, multipart body for POST), the JSON reply is
//! checked for `"status": "success"`, and only then decoded into the payload.
//!
//! ```no_run
//! use voipms_sdk::VoipMsClient;
//!
//! let client = VoipMsClient::new("https://voip.ms/api/v1/rest.php", "me@example.com", "secret");
//! let balance = client.general().get_balance(true)?;
//! println!("{}", balance.current_balance);
//! # Ok::<(), voipms_sdk::VoipMsError>(())
//! ```

pub mod api;
pub mod client;
pub mod config;
pub(crate) mod de;
pub mod encode;
pub mod route;
pub mod types;

pub use api::{AccountsApi, CdrApi, ClientsApi, DidsApi, GeneralApi};
pub use client::{check_status, decode_envelope, VoipMsClient, SUCCESS};
pub use config::ClientConfig;
pub use encode::{FieldPolicy, Form, FormValue, ToForm};
pub use route::{IvrChoice, ParseRouteError, Route, RouteKind};
pub use types::ValueDescription;

/// Error returned by voip.ms API calls.
#[derive(Debug, thiserror::Error)]
pub enum VoipMsError {
    /// A required argument was missing; no request was sent.
    #[error("{0}")]
    Validation(String),

    /// A request field could not be turned into wire text.
    #[error("encoding: {0}")]
    Encoding(String),

    /// The HTTP exchange itself failed (connect, TLS, timeout, body read).
    #[error("transport: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx reply. `message` is the status line text, e.g. `500 Internal Server Error`.
    #[error("{message}")]
    HttpStatus { status: u16, message: String },

    /// The body was not JSON, had no status, or did not match the payload shape.
    #[error("decode: {0}")]
    Decode(String),

    /// The vendor answered with a status other than `success`; the status is the message.
    #[error("{0}")]
    ApiStatus(String),

    #[error("config: {0}")]
    Config(String),
}

impl VoipMsError {
    /// The vendor status string, when the failure came from the status envelope.
    pub fn api_status(&self) -> Option<&str> {
        match self {
            VoipMsError::ApiStatus(status) => Some(status),
            _ => None,
        }
    }

    pub fn is_api_status(&self) -> bool {
        matches!(self, VoipMsError::ApiStatus(_))
    }
}

pub type Result<T> = std::result::Result<T, VoipMsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = VoipMsClient::new("https://voip.ms/api/v1/rest.php/", "user", "pass");
        assert_eq!(client.base_url(), "https://voip.ms/api/v1/rest.php");
        assert!(!client.debug_enabled());
    }

    #[test]
    fn test_status_errors_display_verbatim() {
        let err = VoipMsError::ApiStatus("missing_account".into());
        assert_eq!(err.to_string(), "missing_account");
        assert_eq!(err.api_status(), Some("missing_account"));
        assert!(err.is_api_status());

        let err = VoipMsError::Validation("dateFrom is required!".into());
        assert_eq!(err.to_string(), "dateFrom is required!");
        assert!(err.api_status().is_none());
    }

    #[test]
    fn test_http_status_display() {
        let err = VoipMsError::HttpStatus {
            status: 502,
            message: "502 Bad Gateway".into(),
        };
        assert_eq!(err.to_string(), "502 Bad Gateway");
    }
}
