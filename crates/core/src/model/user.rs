use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::UserId;
use crate::model::timestamp::optional_backend_time;

/// Cached copy of the backend user record.
///
/// Used for display and UI gating only. The backend stays authoritative for
/// every entitlement decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "optional_backend_time"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

impl UserRecord {
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }

    /// Initials for avatar placeholders, e.g. "JD".
    #[must_use]
    pub fn initials(&self) -> String {
        self.first_name
            .chars()
            .next()
            .into_iter()
            .chain(self.last_name.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }

    /// Returns a copy with the premium entitlement granted.
    #[must_use]
    pub fn with_premium(mut self) -> Self {
        self.is_premium = true;
        self
    }
}
