//! Shared error types for the services crate.

use thiserror::Error;

use boost_core::model::{PaymentStepError, ProgressError, ValidationError};
use storage::sqlite::SqliteInitError;

/// Failures below HTTP semantics: DNS, TLS, timeouts, refused connections.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransportError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("backend unreachable: {0}")]
    Unreachable(String),
}

/// Errors emitted by the REST façades.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Progress(#[from] ProgressError),
    #[error(transparent)]
    PaymentStep(#[from] PaymentStepError),
    #[error("no active session")]
    NotAuthenticated,
    #[error("session rejected by the backend")]
    Unauthorized { message: Option<String> },
    #[error("backend responded with status {status}")]
    Status { status: u16, message: Option<String> },
    #[error("payment not confirmed")]
    PaymentNotConfirmed,
    #[error("premium activation rejected")]
    ActivationRejected { message: Option<String> },
    #[error("unexpected response: missing {0}")]
    InvalidResponse(&'static str),
    #[error("could not encode request: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("could not decode response: {0}")]
    Decode(#[source] serde_json::Error),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl ApiError {
    /// Text for the transient notification shown to the user.
    ///
    /// Backend-provided messages win over the generic wording.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(err) => err.to_string(),
            Self::Progress(err) => err.to_string(),
            Self::PaymentStep(err) => err.to_string(),
            Self::NotAuthenticated => "Please sign in to continue.".to_string(),
            Self::Unauthorized { message } => message
                .clone()
                .unwrap_or_else(|| "Your session has expired. Please sign in again.".to_string()),
            Self::Status { message, .. } => message
                .clone()
                .unwrap_or_else(|| "The server could not complete the request.".to_string()),
            Self::PaymentNotConfirmed => "Payment not confirmed.".to_string(),
            Self::ActivationRejected { message } => message
                .clone()
                .unwrap_or_else(|| "Premium access could not be activated.".to_string()),
            Self::InvalidResponse(_) | Self::Decode(_) | Self::Encode(_) => {
                "Unexpected response from the server.".to_string()
            }
            Self::Transport(_) => "Network error. Check your connection and try again.".to_string(),
        }
    }

    /// True for problems caught before any request was sent.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Progress(_))
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

/// Errors emitted while reading client configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid API base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Transport(#[from] TransportError),
}
