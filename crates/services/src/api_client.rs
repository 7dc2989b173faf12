use std::sync::Arc;

use boost_core::NavTarget;
use boost_core::model::AuthToken;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;
use crate::navigation::Navigator;
use crate::session_store::SessionStore;
use crate::transport::{ApiRequest, ApiResponse, ApiTransport, HttpMethod};

/// Shared request pipeline for every REST façade.
///
/// Attaches the bearer token, decodes JSON and runs the global 401 handler.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn ApiTransport>,
    session: Arc<SessionStore>,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    #[must_use]
    pub fn new(
        transport: Arc<dyn ApiTransport>,
        session: Arc<SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            transport,
            session,
            navigator,
        }
    }

    #[must_use]
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(HttpMethod::Get, path, None).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body).map_err(ApiError::Encode)?;
        self.send(HttpMethod::Post, path, Some(body)).await
    }

    /// POST without a request body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(HttpMethod::Post, path, None).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body).map_err(ApiError::Encode)?;
        self.send(HttpMethod::Put, path, Some(body)).await
    }

    /// Send one request under the API root and decode a JSON answer.
    ///
    /// An empty body decodes as `null`, so callers that ignore the payload
    /// can ask for `serde::de::IgnoredAny`.
    ///
    /// # Errors
    ///
    /// - `ApiError::Transport` when no response was received
    /// - `ApiError::Unauthorized` on 401, after the session has been cleared
    ///   if the rejected token is still the active one
    /// - `ApiError::Status` on any other non-2xx status
    /// - `ApiError::Decode` when the body does not match `T`
    pub async fn send<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
    ) -> Result<T, ApiError> {
        let bearer = self.session.token().map(|token| token.as_str().to_string());
        tracing::debug!(
            method = method.as_str(),
            path,
            authenticated = bearer.is_some(),
            "api request"
        );

        let request = ApiRequest {
            method,
            path: path.to_string(),
            body,
            bearer: bearer.clone(),
        };
        let response = self.transport.send(request).await.map_err(|err| {
            tracing::warn!(method = method.as_str(), path, error = %err, "api transport failure");
            ApiError::from(err)
        })?;
        tracing::debug!(
            method = method.as_str(),
            path,
            status = response.status,
            "api response"
        );

        if response.status == 401 {
            return Err(self.handle_unauthorized(bearer.as_deref(), &response).await);
        }
        if !response.is_success() {
            return Err(ApiError::Status {
                status: response.status,
                message: backend_message(&response.body),
            });
        }

        let body = if response.body.trim().is_empty() {
            "null"
        } else {
            response.body.as_str()
        };
        serde_json::from_str(body).map_err(ApiError::Decode)
    }

    /// Signs out only if the rejected credential is still the current one.
    /// A late 401 for a token that has since been replaced leaves the new
    /// session alone.
    async fn handle_unauthorized(&self, sent: Option<&str>, response: &ApiResponse) -> ApiError {
        let current = self.session.token();
        if current.as_ref().map(AuthToken::as_str) == sent {
            tracing::info!("backend rejected the session; signing out");
            self.session.logout().await;
            self.navigator.navigate(NavTarget::auth());
        } else {
            tracing::debug!("401 for a superseded token; session kept");
        }
        ApiError::Unauthorized {
            message: backend_message(&response.body),
        }
    }
}

/// Pull a human-readable message out of an error body.
///
/// Understands `{"detail": "..."}`, `{"message": "..."}` and the list form
/// of `detail` used for request validation errors.
fn backend_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let text = match value.get("detail").or_else(|| value.get("message"))? {
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .filter_map(|item| item.get("msg").and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join(", "),
        _ => return None,
    };
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
