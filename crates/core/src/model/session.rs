use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::UserRecord;

/// Opaque bearer token issued by the backend.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    /// Wraps a raw token. Returns `None` for blank input.
    #[must_use]
    pub fn parse(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Never print the credential itself.
impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

/// Client-held authentication state.
///
/// A token exists exactly when a user exists; the enum makes any other
/// combination unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated { user: UserRecord, token: AuthToken },
}

impl Session {
    #[must_use]
    pub fn authenticated(user: UserRecord, token: AuthToken) -> Self {
        Self::Authenticated { user, token }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    #[must_use]
    pub fn user(&self) -> Option<&UserRecord> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated { user, .. } => Some(user),
        }
    }

    #[must_use]
    pub fn token(&self) -> Option<&AuthToken> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated { token, .. } => Some(token),
        }
    }

    #[must_use]
    pub fn is_premium(&self) -> bool {
        self.user().is_some_and(|user| user.is_premium)
    }
}

/// Observable state of the session store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub restoring: bool,
    pub session: Session,
}

impl SessionSnapshot {
    /// Initial state before durable storage has been read.
    #[must_use]
    pub fn restoring() -> Self {
        Self {
            restoring: true,
            session: Session::Anonymous,
        }
    }

    #[must_use]
    pub fn ready(session: Session) -> Self {
        Self {
            restoring: false,
            session,
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self::restoring()
    }
}
