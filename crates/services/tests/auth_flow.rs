mod common;

use std::sync::Arc;

use async_trait::async_trait;
use boost_core::model::{
    AuthToken, LoginDraft, ProfileUpdate, RegistrationDraft, UserRecord, ValidationError,
};
use boost_core::{AuthTab, NavTarget};
use serde_json::json;
use services::{
    ApiClient, ApiError, ApiRequest, ApiResponse, ApiTransport, AuthGateway, ProgressClient,
    SessionStore, TOKEN_KEY, TransportError, USER_KEY,
};
use storage::{InMemoryStore, LocalStore};
use tokio::sync::Notify;

use common::{FakeBackend, PASSWORD, RecordingNavigator, TOKEN, harness, jane, signed_in, token};

fn draft(password: &str, confirm: &str) -> RegistrationDraft {
    RegistrationDraft {
        email: "new@example.com".into(),
        password: password.into(),
        confirm_password: confirm.into(),
        first_name: "New".into(),
        last_name: "User".into(),
    }
}

#[tokio::test]
async fn register_validation_never_reaches_the_network() {
    let h = harness();
    let auth = h.services.auth();

    let err = auth
        .register(draft("secret1", "different"))
        .await
        .expect_err("mismatch");
    assert!(matches!(
        err,
        ApiError::Validation(ValidationError::PasswordMismatch)
    ));

    let err = auth
        .register(draft("abc", "abc"))
        .await
        .expect_err("short");
    assert!(matches!(
        err,
        ApiError::Validation(ValidationError::PasswordTooShort)
    ));

    let mut missing = draft("secret1", "secret1");
    missing.first_name = "   ".into();
    let err = auth.register(missing).await.expect_err("missing");
    assert!(err.is_validation());

    assert_eq!(h.backend.request_count(), 0);
}

#[tokio::test]
async fn register_returns_credentials_without_touching_the_session() {
    let h = harness();
    let success = h
        .services
        .auth()
        .register(draft("secret1", "secret1"))
        .await
        .expect("register");

    assert_eq!(success.user.email, "new@example.com");
    assert_eq!(success.token.as_str(), "tok-new");
    assert!(!h.services.session().is_authenticated());
}

#[tokio::test]
async fn backend_detail_is_surfaced_on_conflict() {
    let h = harness();
    let mut taken = draft("secret1", "secret1");
    taken.email = jane().email;
    let err = h.services.auth().register(taken).await.expect_err("taken");
    assert_eq!(err.user_message(), "Email already registered");
}

#[tokio::test]
async fn login_then_store_persists_the_session() {
    let h = harness();
    let success = h
        .services
        .auth()
        .login(LoginDraft::new(jane().email, PASSWORD))
        .await
        .expect("login");
    let session = h.services.session();
    session.login(success.user, success.token).await;

    assert!(session.is_authenticated());
    assert_eq!(
        h.local.get(TOKEN_KEY).await.expect("read token").as_deref(),
        Some(TOKEN)
    );
    assert!(h.local.get(USER_KEY).await.expect("read user").is_some());
}

#[tokio::test]
async fn blank_login_fields_fail_fast() {
    let h = harness();
    let err = h
        .services
        .auth()
        .login(LoginDraft::new("", PASSWORD))
        .await
        .expect_err("blank email");
    assert!(matches!(
        err,
        ApiError::Validation(ValidationError::MissingField("email"))
    ));
    assert_eq!(h.backend.request_count(), 0);
}

#[tokio::test]
async fn wrong_password_surfaces_message_and_keeps_state() {
    let h = harness();
    let err = h
        .services
        .auth()
        .login(LoginDraft::new(jane().email, "nope"))
        .await
        .expect_err("bad password");
    assert_eq!(err.user_message(), "Invalid credentials");
    assert!(!h.services.session().is_authenticated());
}

#[tokio::test]
async fn blank_token_in_response_is_rejected() {
    let h = harness();
    h.backend.respond(
        "/auth/login",
        200,
        json!({"user": jane(), "token": ""}),
    );
    let err = h
        .services
        .auth()
        .login(LoginDraft::new(jane().email, PASSWORD))
        .await
        .expect_err("blank token");
    assert!(matches!(err, ApiError::InvalidResponse("token")));
}

#[tokio::test]
async fn bearer_token_is_attached_only_when_authenticated() {
    let h = harness();
    h.services.catalog().stats().await.expect("public stats");
    h.services.session().login(jane(), token()).await;
    h.services.catalog().stats().await.expect("stats again");

    let requests = h.backend.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].bearer, None);
    assert_eq!(requests[1].bearer.as_deref(), Some(TOKEN));
}

#[tokio::test]
async fn any_401_clears_the_session_and_requests_auth() {
    let backend = FakeBackend::new();
    let local = InMemoryStore::new();
    let session = Arc::new(SessionStore::new(Arc::new(local.clone())));
    let navigator = RecordingNavigator::default();
    let api = ApiClient::new(
        Arc::new(backend.clone()),
        Arc::clone(&session),
        Arc::new(navigator.clone()),
    );
    let progress = ProgressClient::new(api.clone());
    let auth = AuthGateway::new(api);

    session.login(jane(), token()).await;
    backend.respond("/dashboard", 401, json!({"detail": "Token expired"}));

    let err = progress.get_dashboard().await.expect_err("expired");
    assert!(err.is_unauthorized());
    assert_eq!(err.user_message(), "Token expired");
    assert!(!session.is_authenticated());
    assert!(local.is_empty().expect("local store"));
    assert_eq!(
        navigator.targets(),
        vec![NavTarget::Auth {
            tab: AuthTab::Login
        }]
    );

    session.login(jane(), token()).await;
    backend.respond("/user/profile", 401, json!({}));
    let err = auth.fetch_profile().await.expect_err("profile 401");
    assert!(err.is_unauthorized());
    assert!(!session.is_authenticated());
    assert_eq!(navigator.targets().len(), 2);
}

/// Holds every request until released, then answers 401.
#[derive(Clone, Default)]
struct HeldRejection {
    arrived: Arc<Notify>,
    release: Arc<Notify>,
}

#[async_trait]
impl ApiTransport for HeldRejection {
    async fn send(&self, _request: ApiRequest) -> Result<ApiResponse, TransportError> {
        self.arrived.notify_one();
        self.release.notified().await;
        Ok(ApiResponse::json(401, &json!({"detail": "Token expired"})))
    }
}

#[tokio::test]
async fn late_401_for_a_replaced_token_keeps_the_new_session() {
    let transport = HeldRejection::default();
    let session = Arc::new(SessionStore::new(Arc::new(InMemoryStore::new())));
    let navigator = RecordingNavigator::default();
    let api = ApiClient::new(
        Arc::new(transport.clone()),
        Arc::clone(&session),
        Arc::new(navigator.clone()),
    );
    let progress = ProgressClient::new(api);

    let old = AuthToken::parse("tok-old").expect("old token");
    session.login(jane(), old).await;

    let in_flight = tokio::spawn(async move { progress.get_dashboard().await });
    transport.arrived.notified().await;

    session.login(jane(), token()).await;
    transport.release.notify_one();

    let err = in_flight.await.expect("join").expect_err("rejected");
    assert!(err.is_unauthorized());
    assert_eq!(session.token(), Some(token()));
    assert!(navigator.targets().is_empty());
}

async fn restored_harness(cached: &UserRecord) -> common::Harness {
    let h = harness();
    let cached = serde_json::to_string(cached).expect("user json");
    h.local
        .set_entries(&[(TOKEN_KEY, TOKEN), (USER_KEY, cached.as_str())])
        .await
        .expect("seed local store");
    h.services.session().restore().await;
    h
}

#[tokio::test]
async fn restored_session_is_reconciled_with_the_backend() {
    let h = restored_harness(&jane()).await;
    h.backend.set_premium(true);
    let session = h.services.session();
    assert!(!session.user().expect("cached").is_premium);

    let confirmed = h
        .services
        .auth()
        .reconcile_session()
        .await
        .expect("reconcile")
        .expect("signed in");
    assert!(confirmed.is_premium);
    assert!(session.user().expect("user").is_premium);

    let reloaded = SessionStore::new(Arc::new(h.local.clone()));
    assert!(reloaded.restore().await.is_premium());
}

#[tokio::test]
async fn reconcile_with_a_revoked_token_signs_out() {
    let h = restored_harness(&jane()).await;
    h.backend.respond("/user/profile", 401, json!({"detail": "Token revoked"}));

    let err = h
        .services
        .auth()
        .reconcile_session()
        .await
        .expect_err("revoked");
    assert!(err.is_unauthorized());
    assert!(!h.services.session().is_authenticated());
}

#[tokio::test]
async fn reconcile_offline_keeps_the_cached_user() {
    let h = restored_harness(&jane()).await;
    h.backend.set_offline(true);

    h.services
        .auth()
        .reconcile_session()
        .await
        .expect_err("offline");
    assert_eq!(h.services.session().user(), Some(jane()));
}

#[tokio::test]
async fn reconcile_without_a_session_is_silent() {
    let h = harness();
    let outcome = h.services.auth().reconcile_session().await.expect("anon");
    assert!(outcome.is_none());
    assert_eq!(h.backend.request_count(), 0);
}

#[tokio::test]
async fn profile_requires_a_session() {
    let h = harness();
    let err = h.services.auth().fetch_profile().await.expect_err("anon");
    assert!(matches!(err, ApiError::NotAuthenticated));
    assert_eq!(h.backend.request_count(), 0);
}

#[tokio::test]
async fn profile_update_reconciles_the_cached_user() {
    let h = signed_in().await;
    let updated = h
        .services
        .auth()
        .update_profile(ProfileUpdate {
            first_name: Some("  Janet ".into()),
            last_name: Some(String::new()),
            email: None,
        })
        .await
        .expect("update profile");
    assert_eq!(updated.first_name, "Janet");
    assert_eq!(updated.last_name, "Doe");

    let session = h.services.session();
    session.update_user(updated).await;
    assert_eq!(session.user().expect("user").first_name, "Janet");
    assert_eq!(session.token(), Some(token()));

    let put = h
        .backend
        .requests()
        .into_iter()
        .find(|req| req.path == "/user/profile")
        .expect("profile request");
    assert_eq!(put.body, Some(json!({"first_name": "Janet"})));
}

#[tokio::test]
async fn transport_failure_keeps_the_session() {
    let h = signed_in().await;
    h.backend.set_offline(true);
    let err = h
        .services
        .progress()
        .get_dashboard()
        .await
        .expect_err("offline");
    assert!(matches!(err, ApiError::Transport(_)));
    assert!(h.services.session().is_authenticated());
}
