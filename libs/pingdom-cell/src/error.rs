use reqwest::header::InvalidHeaderValue;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PingdomError {
    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Invalid value for header {name}")]
    InvalidHeader {
        name: &'static str,
        #[source]
        source: InvalidHeaderValue,
    },

    #[error("Request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Pingdom API error ({status}) for {url}: {}", message.as_deref().unwrap_or(body))]
    HttpStatus {
        url: String,
        status: StatusCode,
        body: String,
        message: Option<String>,
    },

    #[error("Malformed response from {url}: {reason}")]
    MalformedResponse { url: String, reason: String },
}

impl PingdomError {
    /// URL of the request that failed, when one was issued.
    pub fn url(&self) -> Option<&str> {
        match self {
            PingdomError::Network { url, .. }
            | PingdomError::HttpStatus { url, .. }
            | PingdomError::MalformedResponse { url, .. } => Some(url),
            PingdomError::ClientBuild(_) | PingdomError::InvalidHeader { .. } => None,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            PingdomError::HttpStatus { status, .. } => Some(*status),
            PingdomError::Network { source, .. } => source.status(),
            _ => None,
        }
    }

    pub(crate) fn http_status(url: String, status: StatusCode, body: String) -> Self {
        let message = serde_json::from_str::<ErrorEnvelope>(&body)
            .ok()
            .map(|envelope| envelope.error.errormessage)
            .filter(|message| !message.is_empty());

        PingdomError::HttpStatus {
            url,
            status,
            body,
            message,
        }
    }

    pub(crate) fn malformed(url: &str, reason: impl Into<String>) -> Self {
        PingdomError::MalformedResponse {
            url: url.to_string(),
            reason: reason.into(),
        }
    }
}

/// Error body Pingdom sends with non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    errormessage: String,
}
