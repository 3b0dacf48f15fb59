//! User account model and the authenticated session value.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::auth::PasswordDigest;

/// Validation errors returned by user value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// Identifiers are assigned by storage and start at one.
    NonPositiveId {
        /// Rejected identifier value.
        value: i64,
    },
    /// Username was empty or contained only whitespace.
    EmptyUsername,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveId { value } => {
                write!(f, "user id must be positive, got {value}")
            }
            Self::EmptyUsername => write!(f, "username must not be empty"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Storage-assigned user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct UserId(i64);

impl UserId {
    /// Validate and construct a [`UserId`].
    pub fn new(id: i64) -> Result<Self, UserValidationError> {
        if id < 1 {
            return Err(UserValidationError::NonPositiveId { value: id });
        }
        Ok(Self(id))
    }

    /// Raw integer value as stored in the `users.id` column.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<UserId> for i64 {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<i64> for UserId {
    type Error = UserValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Unique account name.
///
/// ## Invariants
/// - Must contain at least one non-whitespace character.
/// - Stored exactly as supplied; surrounding whitespace is significant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`] from owned input.
    pub fn new(username: impl Into<String>) -> Result<Self, UserValidationError> {
        Self::from_owned(username.into())
    }

    fn from_owned(username: String) -> Result<Self, UserValidationError> {
        if username.trim().is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        Ok(Self(username))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Registered account.
///
/// Users are created once at registration and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: Username,
    password_digest: PasswordDigest,
}

impl User {
    /// Build a [`User`] from validated components.
    pub fn new(id: UserId, username: Username, password_digest: PasswordDigest) -> Self {
        Self {
            id,
            username,
            password_digest,
        }
    }

    /// Storage-assigned identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Unique account name.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Stored password digest.
    pub fn password_digest(&self) -> &PasswordDigest {
        &self.password_digest
    }

    /// Open a session for this user.
    pub fn session(&self) -> Session {
        Session::new(self.id, self.username.clone())
    }
}

/// Authenticated identity threaded through activity log calls.
///
/// A session is only obtained from a successful authentication; hosts keep
/// it for the duration of an interaction and pass it explicitly.
///
/// # Examples
/// ```
/// use footprint::domain::{Session, UserId, Username};
///
/// let session = Session::new(UserId::new(7).unwrap(), Username::new("asha").unwrap());
/// assert_eq!(session.user_id().get(), 7);
/// assert_eq!(session.username().as_ref(), "asha");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    user_id: UserId,
    username: Username,
}

impl Session {
    /// Build a session from an identifier and its username.
    pub fn new(user_id: UserId, username: Username) -> Self {
        Self { user_id, username }
    }

    /// Authenticated user identifier.
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Authenticated username.
    pub fn username(&self) -> &Username {
        &self.username
    }
}
