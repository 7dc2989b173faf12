use boost_core::model::{
    AuthToken, LoginDraft, ProfileUpdate, RegistrationDraft, UserRecord,
};
use serde::Deserialize;

use crate::api_client::ApiClient;
use crate::error::ApiError;

/// Credentials issued by `/auth/register` or `/auth/login`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSuccess {
    pub user: UserRecord,
    pub token: AuthToken,
}

#[derive(Deserialize)]
struct AuthPayload {
    user: UserRecord,
    #[serde(default)]
    token: String,
}

impl AuthPayload {
    fn into_success(self) -> Result<AuthSuccess, ApiError> {
        let token = AuthToken::parse(self.token).ok_or(ApiError::InvalidResponse("token"))?;
        Ok(AuthSuccess {
            user: self.user,
            token,
        })
    }
}

/// Exchanges credentials for a session. Never touches the session store;
/// callers decide when to `login`.
#[derive(Clone)]
pub struct AuthGateway {
    api: ApiClient,
}

impl AuthGateway {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// # Errors
    ///
    /// Returns `ApiError::Validation` before any request when the draft is
    /// incomplete, or the backend failure otherwise.
    pub async fn register(&self, draft: RegistrationDraft) -> Result<AuthSuccess, ApiError> {
        let request = draft.validate()?;
        tracing::info!(email = request.email(), "registering account");
        let payload: AuthPayload = self.api.post("/auth/register", &request).await?;
        payload.into_success()
    }

    /// # Errors
    ///
    /// Returns `ApiError::Validation` when a field is blank, or the backend
    /// failure otherwise.
    pub async fn login(&self, draft: LoginDraft) -> Result<AuthSuccess, ApiError> {
        let request = draft.validate()?;
        tracing::info!(email = request.email(), "signing in");
        let payload: AuthPayload = self.api.post("/auth/login", &request).await?;
        payload.into_success()
    }

    /// # Errors
    ///
    /// Returns `ApiError::NotAuthenticated` without a session.
    pub async fn fetch_profile(&self) -> Result<UserRecord, ApiError> {
        if !self.api.session().is_authenticated() {
            return Err(ApiError::NotAuthenticated);
        }
        self.api.get("/user/profile").await
    }

    /// Refresh the cached user from `/user/profile` after a restore.
    ///
    /// Returns the confirmed user, or `None` when nobody is signed in or the
    /// session changed while the request was in flight. A 401 signs out
    /// through the shared interceptor.
    ///
    /// # Errors
    ///
    /// Returns the backend or transport failure; the cached user is kept.
    pub async fn reconcile_session(&self) -> Result<Option<UserRecord>, ApiError> {
        let session = self.api.session();
        let Some(token) = session.token() else {
            return Ok(None);
        };
        let user: UserRecord = self.api.get("/user/profile").await?;
        if session.token().as_ref() != Some(&token) {
            tracing::debug!("session replaced during reconcile; result dropped");
            return Ok(None);
        }
        if session.user().as_ref() != Some(&user) {
            tracing::info!(user = %user.id, premium = user.is_premium, "cached user refreshed");
        }
        session.update_user(user.clone()).await;
        Ok(Some(user))
    }

    /// Push a profile edit; blank fields are left untouched server-side.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotAuthenticated` without a session.
    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<UserRecord, ApiError> {
        if !self.api.session().is_authenticated() {
            return Err(ApiError::NotAuthenticated);
        }
        let update = update.normalized();
        if update.is_empty() {
            return self.api.get("/user/profile").await;
        }
        self.api.put("/user/profile", &update).await
    }
}
