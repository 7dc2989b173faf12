//! Navigation gating for protected views.

use crate::model::SessionSnapshot;

/// Which form the auth entry point opens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AuthTab {
    #[default]
    Login,
    Register,
}

impl AuthTab {
    #[must_use]
    pub fn as_query(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Register => "register",
        }
    }

    /// Unknown values fall back to the login tab.
    #[must_use]
    pub fn from_query(raw: &str) -> Self {
        match raw.trim() {
            "register" => Self::Register,
            _ => Self::Login,
        }
    }
}

/// Destinations services may ask the UI to move to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavTarget {
    Auth { tab: AuthTab },
    Dashboard,
}

impl NavTarget {
    /// The authentication entry point on its default tab.
    #[must_use]
    pub fn auth() -> Self {
        Self::Auth {
            tab: AuthTab::Login,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Restoration still pending; show a neutral placeholder.
    Loading,
    Render,
    Redirect(NavTarget),
}

/// Decide what a protected view may show.
#[must_use]
pub fn guard(restoring: bool, authenticated: bool) -> GuardDecision {
    match (restoring, authenticated) {
        (true, _) => GuardDecision::Loading,
        (false, true) => GuardDecision::Render,
        (false, false) => GuardDecision::Redirect(NavTarget::auth()),
    }
}

#[must_use]
pub fn guard_snapshot(snapshot: &SessionSnapshot) -> GuardDecision {
    guard(snapshot.restoring, snapshot.is_authenticated())
}

/// Gate for the checkout page: anonymous visitors are sent to sign up and
/// premium users have nothing left to buy.
#[must_use]
pub fn guard_payment(snapshot: &SessionSnapshot) -> GuardDecision {
    match guard_snapshot(snapshot) {
        GuardDecision::Redirect(_) => GuardDecision::Redirect(NavTarget::Auth {
            tab: AuthTab::Register,
        }),
        GuardDecision::Render if snapshot.session.is_premium() => {
            GuardDecision::Redirect(NavTarget::Dashboard)
        }
        other => other,
    }
}
