//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`CredentialStore`, `ActivityLog`) are what hosts call.
//! Driven ports (`UserRepository`, `ActivityRepository`) are what storage
//! adapters implement.

mod macros;
pub(crate) use macros::define_port_error;

mod activity_log;
mod activity_repository;
mod credential_store;
mod user_repository;

pub use activity_log::ActivityLog;
#[cfg(test)]
pub use activity_repository::MockActivityRepository;
pub use activity_repository::{
    ActivityPersistenceError, ActivityRepository, FixtureActivityRepository,
};
pub use credential_store::CredentialStore;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{FixtureUserRepository, UserPersistenceError, UserRepository};

#[cfg(test)]
mod tests;
