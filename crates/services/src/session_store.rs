use std::sync::Arc;

use boost_core::model::{AuthToken, Session, SessionSnapshot, UserRecord};
use storage::LocalStore;
use tokio::sync::watch;

/// Durable key holding the bearer token.
pub const TOKEN_KEY: &str = "confianceboost_token";
/// Durable key holding the JSON-encoded `UserRecord`.
pub const USER_KEY: &str = "confianceboost_user";

/// Single source of truth for "is a user currently authenticated".
///
/// Durable storage is only a cache of `{token, user}`: it is written by
/// `login`/`logout`/`update_user` and read back once by `restore`. Storage
/// failures never propagate; the worst case is a logged-out session.
pub struct SessionStore {
    store: Arc<dyn LocalStore>,
    state: watch::Sender<SessionSnapshot>,
}

impl SessionStore {
    #[must_use]
    pub fn new(store: Arc<dyn LocalStore>) -> Self {
        let (state, _rx) = watch::channel(SessionSnapshot::restoring());
        Self { store, state }
    }

    /// Load the cached session from durable storage.
    ///
    /// Missing, partial or unparsable entries yield an anonymous session and
    /// wipe both keys. The token is not checked against the backend here.
    pub async fn restore(&self) -> Session {
        let session = match self.read_persisted().await {
            Some(session) => {
                tracing::info!("session restored from local storage");
                session
            }
            None => {
                self.clear_persisted().await;
                Session::Anonymous
            }
        };
        self.state.send_replace(SessionSnapshot::ready(session.clone()));
        session
    }

    /// Store a freshly issued session, replacing any previous one.
    pub async fn login(&self, user: UserRecord, token: AuthToken) {
        self.persist(&user, &token).await;
        tracing::info!(user_id = %user.id, "session started");
        self.state
            .send_replace(SessionSnapshot::ready(Session::authenticated(user, token)));
    }

    /// Drop the session from memory and durable storage.
    pub async fn logout(&self) {
        self.clear_persisted().await;
        tracing::info!("session cleared");
        self.state
            .send_replace(SessionSnapshot::ready(Session::Anonymous));
    }

    /// Replace the cached user while keeping the token. No-op when anonymous.
    pub async fn update_user(&self, user: UserRecord) {
        let Some(token) = self.token() else {
            tracing::debug!("ignoring user update without a session");
            return;
        };
        self.persist(&user, &token).await;
        self.state
            .send_replace(SessionSnapshot::ready(Session::authenticated(user, token)));
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state.subscribe()
    }

    #[must_use]
    pub fn token(&self) -> Option<AuthToken> {
        self.state.borrow().session.token().cloned()
    }

    #[must_use]
    pub fn user(&self) -> Option<UserRecord> {
        self.state.borrow().session.user().cloned()
    }

    async fn read_persisted(&self) -> Option<Session> {
        let token = match self.store.get(TOKEN_KEY).await {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(error = %err, "could not read session token");
                return None;
            }
        };
        let user = match self.store.get(USER_KEY).await {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(error = %err, "could not read cached user");
                return None;
            }
        };

        let (token, user) = match (token, user) {
            (Some(token), Some(user)) => (token, user),
            (None, None) => return None,
            _ => {
                tracing::warn!("partial session in local storage");
                return None;
            }
        };

        let Some(token) = AuthToken::parse(token) else {
            tracing::warn!("blank session token in local storage");
            return None;
        };
        match serde_json::from_str::<UserRecord>(&user) {
            Ok(user) => Some(Session::authenticated(user, token)),
            Err(err) => {
                tracing::warn!(error = %err, "corrupt cached user in local storage");
                None
            }
        }
    }

    async fn persist(&self, user: &UserRecord, token: &AuthToken) {
        let user_json = match serde_json::to_string(user) {
            Ok(json) => json,
            Err(err) => {
                tracing::warn!(error = %err, "could not encode user for local storage");
                return;
            }
        };
        if let Err(err) = self
            .store
            .set_entries(&[(TOKEN_KEY, token.as_str()), (USER_KEY, user_json.as_str())])
            .await
        {
            tracing::warn!(error = %err, "could not persist session");
        }
    }

    async fn clear_persisted(&self) {
        if let Err(err) = self.store.remove_entries(&[TOKEN_KEY, USER_KEY]).await {
            tracing::warn!(error = %err, "could not clear persisted session");
        }
    }
}
