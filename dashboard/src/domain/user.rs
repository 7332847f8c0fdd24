//! User data model.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

/// Validation errors returned by the user value objects.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Identifier was blank.
    #[error("user id must not be empty")]
    EmptyId,
    /// Identifier was not a UUID.
    #[error("user id must be a valid UUID")]
    InvalidId,
    /// Display name was blank.
    #[error("name is required")]
    EmptyDisplayName,
    /// Email was blank.
    #[error("email is required")]
    EmptyEmail,
    /// Email did not look like `local@domain.tld`.
    #[error("invalid email format")]
    InvalidEmail,
    /// Role was not one of the known literals.
    #[error("unknown account type: {value}")]
    UnknownRole {
        /// The rejected input.
        value: String,
    },
    /// Avatar reference was not an absolute URL.
    #[error("avatar must be an absolute URL")]
    InvalidAvatar,
}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid, String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Wrap an already generated UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid, uuid.to_string())
    }

    fn from_owned(id: String) -> Result<Self, UserValidationError> {
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }

        let parsed = Uuid::parse_str(&id).map_err(|_| UserValidationError::InvalidId)?;
        Ok(Self(parsed, id))
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        let UserId(_, raw) = value;
        raw
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Human readable display name for the user.
///
/// Any non-blank text is accepted and kept exactly as entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

impl DisplayName {
    /// Validate and construct a [`DisplayName`] from owned input.
    pub fn new(display_name: impl Into<String>) -> Result<Self, UserValidationError> {
        Self::from_owned(display_name.into())
    }

    fn from_owned(display_name: String) -> Result<Self, UserValidationError> {
        if display_name.trim().is_empty() {
            return Err(UserValidationError::EmptyDisplayName);
        }
        Ok(Self(display_name))
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<DisplayName> for String {
    fn from(value: DisplayName) -> Self {
        value.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Loose shape check; deliverability is never verified.
        let pattern = r"\S+@\S+\.\S+";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Email address supplied at login or registration.
///
/// ## Invariants
/// - Stored trimmed.
/// - Contains a `local@domain.tld` shaped run of non-whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    ///
    /// # Examples
    /// ```
    /// use dashboard::domain::EmailAddress;
    ///
    /// let email = EmailAddress::new("  a@b.com ").unwrap();
    /// assert_eq!(email.as_ref(), "a@b.com");
    /// assert!(EmailAddress::new("not-an-email").is_err());
    /// ```
    pub fn new(email: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = email.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if !email_regex().is_match(trimmed) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Account type chosen at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UserRole {
    /// Picks up tasks on other people's projects.
    Contributor,
    /// Owns projects and posts tasks.
    Client,
}

impl UserRole {
    /// Parse the wire literal (`contributor` or `client`).
    pub fn parse(value: &str) -> Result<Self, UserValidationError> {
        match value {
            "contributor" => Ok(Self::Contributor),
            "client" => Ok(Self::Client),
            other => Err(UserValidationError::UnknownRole {
                value: other.to_owned(),
            }),
        }
    }

    /// Wire literal for this role.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Contributor => "contributor",
            Self::Client => "client",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const AVATAR_SERVICE: &str = "https://ui-avatars.com/api/";

/// Cosmetic avatar reference derived from the display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AvatarUrl(String);

impl AvatarUrl {
    /// Build the generated-avatar URL for `name`.
    ///
    /// # Examples
    /// ```
    /// use dashboard::domain::{AvatarUrl, DisplayName};
    ///
    /// let name = DisplayName::new("John Doe").unwrap();
    /// let avatar = AvatarUrl::for_name(&name);
    /// assert_eq!(
    ///     avatar.as_ref(),
    ///     "https://ui-avatars.com/api/?name=John%20Doe&background=random"
    /// );
    /// ```
    pub fn for_name(name: &DisplayName) -> Self {
        let name = urlencoding::encode(name.as_ref());
        Self(format!("{AVATAR_SERVICE}?name={name}&background=random"))
    }
}

impl AsRef<str> for AvatarUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<AvatarUrl> for String {
    fn from(value: AvatarUrl) -> Self {
        value.0
    }
}

impl TryFrom<String> for AvatarUrl {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Url::parse(&value)
            .map(|_| Self(value))
            .map_err(|_| UserValidationError::InvalidAvatar)
    }
}

/// Authenticated application user.
///
/// Immutable for the lifetime of a session. The serialised form is what the
/// durable session slot stores.
///
/// ## Invariants
/// - `id` is a valid UUID string.
/// - `name` is non-blank; `email` passes [`EmailAddress`] validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct User {
    id: UserId,
    name: DisplayName,
    email: EmailAddress,
    role: UserRole,
    avatar: AvatarUrl,
}

impl User {
    /// Build a new [`User`], deriving the avatar from the display name.
    pub fn new(id: UserId, name: DisplayName, email: EmailAddress, role: UserRole) -> Self {
        let avatar = AvatarUrl::for_name(&name);
        Self {
            id,
            name,
            email,
            role,
            avatar,
        }
    }

    /// Stable user identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Display name shown to collaborators.
    pub fn name(&self) -> &DisplayName {
        &self.name
    }

    /// Email the user signed in with.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Account type.
    pub fn role(&self) -> UserRole {
        self.role
    }

    /// Avatar reference.
    pub fn avatar(&self) -> &AvatarUrl {
        &self.avatar
    }
}
