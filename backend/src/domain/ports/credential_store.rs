//! Driving port for account creation and authentication.
//!
//! Hosts call this port with validated credentials and never touch the
//! repository behind it, so host tests can substitute a test double.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, Session, UserId};

/// Domain use-case port for the credential store.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Create an account; fails with `DuplicateUsername` if the name is taken.
    async fn register(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;

    /// Validate credentials and open a session.
    ///
    /// Unknown usernames and wrong passwords fail identically with
    /// `AuthenticationFailed`.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Session, Error>;
}
