//! Authentication primitives: login credentials and password digests.
//!
//! Hosts build [`LoginCredentials`] from raw input before talking to the
//! credential store, so blank usernames never reach persistence.

use std::fmt;

use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use super::user::{UserValidationError, Username};

/// Validated login credentials used by the credential store.
///
/// ## Invariants
/// - `username` must contain a non-whitespace character and is kept verbatim.
/// - `password` may be any string, including the empty string.
///
/// # Examples
/// ```
/// use footprint::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("asha", "monsoon").unwrap();
/// assert_eq!(creds.username().as_ref(), "asha");
/// assert_eq!(creds.password(), "monsoon");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: Username,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, UserValidationError> {
        Ok(Self {
            username: Username::new(username)?,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username suitable for user lookups.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Digest of the password as stored by the credential store.
    pub fn digest(&self) -> PasswordDigest {
        PasswordDigest::of(self.password())
    }
}

/// One-way digest of a password: lowercase hex SHA-256, single pass, no salt.
///
/// The digest is compared for equality only; `Debug` output is redacted.
///
/// # Examples
/// ```
/// use footprint::domain::PasswordDigest;
///
/// let digest = PasswordDigest::of("");
/// assert_eq!(
///     digest.as_str(),
///     "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
/// );
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Number of hex characters in every digest.
    pub const LEN: usize = 64;

    /// Digest a plaintext password.
    pub fn of(password: &str) -> Self {
        Self(hex::encode(Sha256::digest(password.as_bytes())))
    }

    /// Wrap a digest read back from storage.
    pub fn from_stored(digest: impl Into<String>) -> Self {
        Self(digest.into())
    }

    /// Hex representation as persisted.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(..)")
    }
}
