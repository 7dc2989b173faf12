use boost_core::model::{LoginDraft, RegistrationDraft, UserRecord};
use services::{ApiError, AuthGateway, AuthSuccess, SessionStore};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Where a failed submission should be reported.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthFailure {
    /// Shown next to the form; nothing was sent.
    Invalid(String),
    /// Shown as a notification.
    Rejected(String),
}

impl AuthFailure {
    fn from_api(err: &ApiError) -> Self {
        if err.is_validation() {
            Self::Invalid(err.user_message())
        } else {
            Self::Rejected(err.user_message())
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Invalid(text) | Self::Rejected(text) => text,
        }
    }
}

/// Log in and store the issued session.
///
/// # Errors
///
/// Returns `AuthFailure` describing how to surface the problem.
pub async fn sign_in(
    auth: &AuthGateway,
    session: &SessionStore,
    form: LoginForm,
) -> Result<UserRecord, AuthFailure> {
    let draft = LoginDraft::new(form.email, form.password);
    let success = auth
        .login(draft)
        .await
        .map_err(|err| AuthFailure::from_api(&err))?;
    Ok(store(session, success).await)
}

/// Create an account and store the issued session.
///
/// # Errors
///
/// Returns `AuthFailure` describing how to surface the problem.
pub async fn sign_up(
    auth: &AuthGateway,
    session: &SessionStore,
    form: RegisterForm,
) -> Result<UserRecord, AuthFailure> {
    let draft = RegistrationDraft {
        email: form.email,
        password: form.password,
        confirm_password: form.confirm_password,
        first_name: form.first_name,
        last_name: form.last_name,
    };
    let success = auth
        .register(draft)
        .await
        .map_err(|err| AuthFailure::from_api(&err))?;
    Ok(store(session, success).await)
}

async fn store(session: &SessionStore, success: AuthSuccess) -> UserRecord {
    let user = success.user.clone();
    session.login(success.user, success.token).await;
    user
}
