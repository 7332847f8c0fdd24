//! Authentication primitives such as login credentials and registrations.
//!
//! Keep form parsing outside the stores by exposing constructors that
//! validate string inputs before a caller talks to the session store. Every
//! validation failure names the form field it belongs to so the view layer
//! can render a field-level message.

use std::fmt;

use serde_json::json;
use zeroize::Zeroizing;

use super::Error;
use super::user::{DisplayName, EmailAddress, UserRole, UserValidationError};

/// Minimum accepted password length, in characters.
pub const PASSWORD_MIN: usize = 6;

/// Domain error returned when login or registration input is invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsValidationError {
    /// Email was missing or malformed.
    #[error("{0}")]
    Email(UserValidationError),
    /// Password was blank.
    #[error("password is required")]
    EmptyPassword,
    /// Password was shorter than [`PASSWORD_MIN`].
    #[error("password must be at least {min} characters")]
    PasswordTooShort {
        /// Minimum accepted length.
        min: usize,
    },
    /// Display name was missing or too long.
    #[error("{0}")]
    Name(UserValidationError),
    /// No account type was selected.
    #[error("please select an account type")]
    MissingRole,
    /// The account type literal was not recognised.
    #[error("{0}")]
    Role(UserValidationError),
}

impl CredentialsValidationError {
    /// Form field the failure belongs to.
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Email(_) => "email",
            Self::EmptyPassword | Self::PasswordTooShort { .. } => "password",
            Self::Name(_) => "name",
            Self::MissingRole | Self::Role(_) => "role",
        }
    }
}

impl From<CredentialsValidationError> for Error {
    fn from(value: CredentialsValidationError) -> Self {
        Self::invalid_request(value.to_string()).with_details(json!({ "field": value.field() }))
    }
}

/// Password held only as long as the credential check needs it.
///
/// The buffer is zeroised on drop and never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Validate a raw password.
    pub fn new(raw: &str) -> Result<Self, CredentialsValidationError> {
        if raw.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        if raw.chars().count() < PASSWORD_MIN {
            return Err(CredentialsValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }
        Ok(Self(Zeroizing::new(raw.to_owned())))
    }

    /// Password string provided by the caller.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `email` is trimmed and shaped like `local@domain.tld`.
/// - `password` is at least [`PASSWORD_MIN`] characters and keeps
///   caller-provided whitespace.
///
/// # Examples
/// ```
/// use dashboard::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("a@b.com", "secret1").unwrap();
/// assert_eq!(creds.email().as_ref(), "a@b.com");
/// assert_eq!(creds.password().expose(), "secret1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: EmailAddress,
    password: Password,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        let email = EmailAddress::new(email).map_err(CredentialsValidationError::Email)?;
        let password = Password::new(password)?;
        Ok(Self { email, password })
    }

    /// Email used for the lookup.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Password supplied by the caller.
    pub fn password(&self) -> &Password {
        &self.password
    }
}

/// Validated account registration.
///
/// Interests are free-form tags picked on the sign-up form. They travel to
/// the login service but are not part of the session identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    name: DisplayName,
    credentials: LoginCredentials,
    role: UserRole,
    interests: Vec<String>,
}

impl Registration {
    /// Validate the sign-up form.
    ///
    /// Fields are checked in form order (email, password, name, role) and the
    /// first failure is returned.
    ///
    /// # Examples
    /// ```
    /// use dashboard::domain::{Registration, UserRole};
    ///
    /// let registration = Registration::try_new(
    ///     "Grace Hopper",
    ///     "grace@example.com",
    ///     "cobol-forever",
    ///     Some("client"),
    ///     vec!["DevOps".to_owned()],
    /// )
    /// .unwrap();
    /// assert_eq!(registration.role(), UserRole::Client);
    /// ```
    pub fn try_new(
        name: &str,
        email: &str,
        password: &str,
        role: Option<&str>,
        interests: Vec<String>,
    ) -> Result<Self, CredentialsValidationError> {
        let credentials = LoginCredentials::try_from_parts(email, password)?;
        let name = DisplayName::new(name).map_err(CredentialsValidationError::Name)?;
        let role = role
            .ok_or(CredentialsValidationError::MissingRole)
            .and_then(|raw| UserRole::parse(raw).map_err(CredentialsValidationError::Role))?;

        Ok(Self {
            name,
            credentials,
            role,
            interests,
        })
    }

    /// Display name for the new account.
    pub fn name(&self) -> &DisplayName {
        &self.name
    }

    /// Email for the new account.
    pub fn email(&self) -> &EmailAddress {
        self.credentials.email()
    }

    /// Password for the new account.
    pub fn password(&self) -> &Password {
        self.credentials.password()
    }

    /// Account type for the new account.
    pub fn role(&self) -> UserRole {
        self.role
    }

    /// Interest tags picked on the form, in selection order.
    pub fn interests(&self) -> &[String] {
        &self.interests
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case("", "secret1", "email")]
    #[case("nope", "secret1", "email")]
    #[case("a@b.com", "", "password")]
    #[case("a@b.com", "12345", "password")]
    fn invalid_credentials_name_their_field(
        #[case] email: &str,
        #[case] password: &str,
        #[case] field: &str,
    ) {
        let err = LoginCredentials::try_from_parts(email, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err.field(), field);
    }

    #[rstest]
    #[case("  a@b.com  ", "secret1")]
    #[case("alice@example.org", " spaced ")]
    fn valid_credentials_trim_email_only(#[case] email: &str, #[case] password: &str) {
        let creds = LoginCredentials::try_from_parts(email, password)
            .expect("valid inputs should succeed");
        assert_eq!(creds.email().as_ref(), email.trim());
        assert_eq!(creds.password().expose(), password);
    }

    #[rstest]
    fn password_debug_is_redacted() {
        let password = Password::new("hunter22").expect("valid password");
        assert_eq!(format!("{password:?}"), "Password(***)");
    }

    #[rstest]
    #[case("", Some("client"), "name")]
    #[case("Grace", None, "role")]
    #[case("Grace", Some("admin"), "role")]
    fn invalid_registration_names_its_field(
        #[case] name: &str,
        #[case] role: Option<&str>,
        #[case] field: &str,
    ) {
        let err = Registration::try_new(name, "g@h.io", "secret1", role, Vec::new())
            .expect_err("invalid registration");
        assert_eq!(err.field(), field);
    }

    #[rstest]
    fn registration_keeps_supplied_fields() {
        let registration = Registration::try_new(
            "Grace Hopper",
            "grace@example.com",
            "secret1",
            Some("contributor"),
            vec!["DevOps".to_owned(), "Blockchain".to_owned()],
        )
        .expect("valid registration");

        assert_eq!(registration.name().as_ref(), "Grace Hopper");
        assert_eq!(registration.email().as_ref(), "grace@example.com");
        assert_eq!(registration.role(), UserRole::Contributor);
        assert_eq!(registration.interests(), ["DevOps", "Blockchain"]);
    }

    #[rstest]
    fn registration_accepts_long_names() {
        let name = "A".repeat(65);
        let registration = Registration::try_new(
            &name,
            "long@example.com",
            "secret1",
            Some("client"),
            Vec::new(),
        )
        .expect("long names register");

        assert_eq!(registration.name().as_ref(), name);
    }

    #[rstest]
    fn validation_errors_map_to_invalid_request_with_field() {
        let err: Error = CredentialsValidationError::MissingRole.into();
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            err.details().and_then(|details| details.get("field")),
            Some(&json!("role"))
        );
    }
}
