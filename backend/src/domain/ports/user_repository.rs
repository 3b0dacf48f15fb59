//! Port abstraction for credential persistence adapters and their errors.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{PasswordDigest, User, UserId, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Insert violated the unique username constraint.
        DuplicateUsername { username: String } => "username {username} is already registered",
    }
}

/// Storage of username/password-digest pairs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account and return its assigned identifier.
    ///
    /// Fails with [`UserPersistenceError::DuplicateUsername`] when the
    /// username already exists; nothing is written in that case.
    async fn insert(
        &self,
        username: &Username,
        password_digest: &PasswordDigest,
    ) -> Result<UserId, UserPersistenceError>;

    /// Fetch the account matching both username and digest exactly.
    async fn find_by_credentials(
        &self,
        username: &Username,
        password_digest: &PasswordDigest,
    ) -> Result<Option<User>, UserPersistenceError>;
}

/// In-memory repository for tests and hosts that do not need durability.
///
/// Identifiers are assigned sequentially from one, mirroring SQLite
/// `AUTOINCREMENT`.
#[derive(Debug, Default)]
pub struct FixtureUserRepository {
    users: Mutex<Vec<User>>,
}

impl FixtureUserRepository {
    /// Number of stored accounts.
    pub fn len(&self) -> usize {
        self.users.lock().map(|users| users.len()).unwrap_or_default()
    }

    /// Whether no account has been stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn insert(
        &self,
        username: &Username,
        password_digest: &PasswordDigest,
    ) -> Result<UserId, UserPersistenceError> {
        let mut users = self
            .users
            .lock()
            .map_err(|_| UserPersistenceError::connection("fixture store poisoned"))?;
        if users.iter().any(|user| user.username() == username) {
            return Err(UserPersistenceError::duplicate_username(username.as_ref()));
        }
        let next = i64::try_from(users.len())
            .ok()
            .and_then(|count| count.checked_add(1))
            .ok_or_else(|| UserPersistenceError::query("fixture id space exhausted"))?;
        let id = UserId::new(next).map_err(|err| UserPersistenceError::query(err.to_string()))?;
        users.push(User::new(id, username.clone(), password_digest.clone()));
        Ok(id)
    }

    async fn find_by_credentials(
        &self,
        username: &Username,
        password_digest: &PasswordDigest,
    ) -> Result<Option<User>, UserPersistenceError> {
        let users = self
            .users
            .lock()
            .map_err(|_| UserPersistenceError::connection("fixture store poisoned"))?;
        Ok(users
            .iter()
            .find(|user| user.username() == username && user.password_digest() == password_digest)
            .cloned())
    }
}
