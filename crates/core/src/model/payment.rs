use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{UserId, UserRecord};

/// Body sent to open a checkout with the payment provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutRequest {
    pub user_email: String,
    pub user_name: String,
}

impl CheckoutRequest {
    #[must_use]
    pub fn for_user(user: &UserRecord) -> Self {
        Self {
            user_email: user.email.clone(),
            user_name: user.full_name(),
        }
    }
}

/// Ephemeral checkout reference, discarded after verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub checkout_id: String,
    #[serde(default)]
    pub checkout_url: Option<String>,
    #[serde(default)]
    pub is_demo: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentVerification {
    pub is_paid: bool,
    #[serde(default)]
    pub order_id: Option<String>,
}

impl PaymentVerification {
    /// Order reference to send on activation; falls back to the checkout id.
    #[must_use]
    pub fn order_reference(&self, checkout_id: &str) -> String {
        self.order_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .unwrap_or(checkout_id)
            .to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PremiumActivation {
    pub user_id: UserId,
    pub order_id: String,
    pub checkout_id: String,
}

/// Backend answer to an activation request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ActivationReceipt {
    #[serde(default = "default_true")]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Option<UserRecord>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum PaymentStepError {
    #[error("a verification is already in flight")]
    AlreadyProcessing,
    #[error("payment already completed")]
    AlreadyCompleted,
    #[error("no verification in flight")]
    NotProcessing,
}

/// Checkout lifecycle as seen by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentStep {
    #[default]
    Checkout,
    Processing,
    Success,
}

impl PaymentStep {
    /// `checkout → processing`.
    ///
    /// # Errors
    ///
    /// Returns `PaymentStepError` when a verification is already running or
    /// the payment has already succeeded.
    pub fn begin_verification(self) -> Result<Self, PaymentStepError> {
        match self {
            Self::Checkout => Ok(Self::Processing),
            Self::Processing => Err(PaymentStepError::AlreadyProcessing),
            Self::Success => Err(PaymentStepError::AlreadyCompleted),
        }
    }

    /// `processing → success` when paid and activated, `processing → checkout`
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns `PaymentStepError::NotProcessing` outside of `Processing`.
    pub fn resolve(self, confirmed: bool) -> Result<Self, PaymentStepError> {
        match self {
            Self::Processing if confirmed => Ok(Self::Success),
            Self::Processing => Ok(Self::Checkout),
            _ => Err(PaymentStepError::NotProcessing),
        }
    }

    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Success)
    }
}
