//! Credential store service.
//!
//! Digests passwords with a single SHA-256 pass and delegates storage to the
//! user repository port.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{CredentialStore, UserPersistenceError, UserRepository};
use crate::domain::{Error, LoginCredentials, Session, UserId};

const DUPLICATE_USERNAME_MESSAGE: &str = "username already exists";
const AUTHENTICATION_FAILED_MESSAGE: &str = "invalid username or password";

fn map_repository_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::storage_unavailable(format!("credential store unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::storage_failure(format!("credential store error: {message}"))
        }
        UserPersistenceError::DuplicateUsername { .. } => {
            Error::duplicate_username(DUPLICATE_USERNAME_MESSAGE)
        }
    }
}

/// Credential store backed by a [`UserRepository`].
#[derive(Clone)]
pub struct CredentialService<R> {
    user_repo: Arc<R>,
}

impl<R> CredentialService<R> {
    /// Create a new service over the user repository.
    pub fn new(user_repo: Arc<R>) -> Self {
        Self { user_repo }
    }
}

#[async_trait]
impl<R> CredentialStore for CredentialService<R>
where
    R: UserRepository,
{
    async fn register(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let user_id = self
            .user_repo
            .insert(credentials.username(), &credentials.digest())
            .await
            .map_err(map_repository_error)?;

        info!(%user_id, "account registered");
        Ok(user_id)
    }

    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Session, Error> {
        let user = self
            .user_repo
            .find_by_credentials(credentials.username(), &credentials.digest())
            .await
            .map_err(map_repository_error)?;

        match user {
            Some(user) => {
                debug!(user_id = %user.id(), "authentication succeeded");
                Ok(user.session())
            }
            None => {
                debug!("authentication rejected");
                Err(Error::authentication_failed(AUTHENTICATION_FAILED_MESSAGE))
            }
        }
    }
}

#[cfg(test)]
#[path = "credential_service_tests.rs"]
mod tests;
