//! SQLite-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{PasswordDigest, User, UserId, Username};

use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_storage_error,
};
use super::models::{NewUserRow, UserRow};
use super::schema::users;
use super::storage::{StorageError, StorageHandle};

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    storage: StorageHandle,
}

impl DieselUserRepository {
    /// Create a new repository over the shared storage handle.
    pub fn new(storage: StorageHandle) -> Self {
        Self { storage }
    }
}

fn map_handle_error(error: StorageError) -> UserPersistenceError {
    map_storage_error(error, UserPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_basic_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn map_insert_error(error: diesel::result::Error, username: &Username) -> UserPersistenceError {
    if is_unique_violation(&error) {
        debug!(%username, "username already taken");
        return UserPersistenceError::duplicate_username(username.as_ref());
    }
    map_diesel_error(error)
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let UserRow {
        id,
        username,
        password,
    } = row;

    let id = UserId::new(id).map_err(|err| UserPersistenceError::query(err.to_string()))?;
    let username =
        Username::new(username).map_err(|err| UserPersistenceError::query(err.to_string()))?;
    Ok(User::new(id, username, PasswordDigest::from_stored(password)))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(
        &self,
        username: &Username,
        password_digest: &PasswordDigest,
    ) -> Result<UserId, UserPersistenceError> {
        let mut conn = self.storage.connection().await.map_err(map_handle_error)?;

        let new_row = NewUserRow {
            username: username.as_ref(),
            password: password_digest.as_str(),
        };

        let id: i64 = diesel::insert_into(users::table)
            .values(&new_row)
            .returning(users::id)
            .get_result(&mut *conn)
            .await
            .map_err(|err| map_insert_error(err, username))?;

        UserId::new(id).map_err(|err| UserPersistenceError::query(err.to_string()))
    }

    async fn find_by_credentials(
        &self,
        username: &Username,
        password_digest: &PasswordDigest,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.storage.connection().await.map_err(map_handle_error)?;

        let row = users::table
            .filter(
                users::username
                    .eq(username.as_ref())
                    .and(users::password.eq(password_digest.as_str())),
            )
            .select(UserRow::as_select())
            .first::<UserRow>(&mut *conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error mapping and row conversion.

    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn asha() -> Username {
        Username::new("asha").expect("valid username")
    }

    #[rstest]
    fn unique_violation_maps_to_duplicate_username(asha: Username) {
        let diesel_err = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("UNIQUE constraint failed: users.username".to_owned()),
        );

        let repo_err = map_insert_error(diesel_err, &asha);

        assert_eq!(repo_err, UserPersistenceError::duplicate_username("asha"));
    }

    #[rstest]
    fn other_insert_failures_map_to_query(asha: Username) {
        let repo_err = map_insert_error(DieselError::NotFound, &asha);

        assert!(matches!(repo_err, UserPersistenceError::Query { .. }));
    }

    #[rstest]
    fn closed_handle_maps_to_connection_error() {
        let repo_err = map_handle_error(StorageError::Closed);

        assert!(matches!(repo_err, UserPersistenceError::Connection { .. }));
    }

    #[rstest]
    fn row_conversion_keeps_stored_digest() {
        let digest = PasswordDigest::of("monsoon");
        let row = UserRow {
            id: 3,
            username: "asha".to_owned(),
            password: digest.as_str().to_owned(),
        };

        let user = row_to_user(row).expect("valid row");

        assert_eq!(user.id().get(), 3);
        assert_eq!(user.username().as_ref(), "asha");
        assert_eq!(user.password_digest(), &digest);
    }

    #[rstest]
    #[case(0, "asha")]
    #[case(4, "   ")]
    fn invalid_rows_map_to_query_errors(#[case] id: i64, #[case] username: &str) {
        let row = UserRow {
            id,
            username: username.to_owned(),
            password: PasswordDigest::of("x").as_str().to_owned(),
        };

        let err = row_to_user(row).expect_err("invalid row must fail");

        assert!(matches!(err, UserPersistenceError::Query { .. }));
    }
}
