use serde::Serialize;
use thiserror::Error;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    #[error("please fill in every field")]
    MissingField(&'static str),
    #[error("passwords do not match")]
    PasswordMismatch,
    #[error("password must be at least {MIN_PASSWORD_LEN} characters")]
    PasswordTooShort,
}

/// Raw login form input.
#[derive(Clone, Debug, Default)]
pub struct LoginDraft {
    pub email: String,
    pub password: String,
}

/// Wire body for `/auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

impl LoginDraft {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// # Errors
    ///
    /// Returns `ValidationError::MissingField` when either field is blank.
    pub fn validate(self) -> Result<LoginRequest, ValidationError> {
        let email = required(self.email, "email")?;
        if self.password.is_empty() {
            return Err(ValidationError::MissingField("password"));
        }
        Ok(LoginRequest {
            email,
            password: self.password,
        })
    }
}

impl LoginRequest {
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}

/// Raw registration form input, including the confirmation field.
#[derive(Clone, Debug, Default)]
pub struct RegistrationDraft {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Wire body for `/auth/register`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RegistrationRequest {
    email: String,
    password: String,
    first_name: String,
    last_name: String,
}

impl RegistrationDraft {
    /// Check required fields, confirmation and password length, in that order.
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` encountered.
    pub fn validate(self) -> Result<RegistrationRequest, ValidationError> {
        let email = required(self.email, "email")?;
        if self.password.is_empty() {
            return Err(ValidationError::MissingField("password"));
        }
        let first_name = required(self.first_name, "first_name")?;
        let last_name = required(self.last_name, "last_name")?;

        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort);
        }

        Ok(RegistrationRequest {
            email,
            password: self.password,
            first_name,
            last_name,
        })
    }
}

impl RegistrationRequest {
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}

/// Partial profile edit for `PUT /user/profile`. Blank fields are omitted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl ProfileUpdate {
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            first_name: normalize_optional(self.first_name),
            last_name: normalize_optional(self.last_name),
            email: normalize_optional(self.email),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.email.is_none()
    }
}

fn required(value: String, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}
