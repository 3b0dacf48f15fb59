//! SQLite persistence adapters using Diesel ORM.
//!
//! This module provides concrete implementations of the domain repository
//! ports backed by SQLite via Diesel, with async support through
//! `diesel-async`'s synchronous connection wrapper.
//!
//! # Architecture
//!
//! - **Thin adapters**: Repository implementations only translate between
//!   Diesel models and domain types. No business logic resides here.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) are never exposed to the domain layer.
//! - **Single connection**: All repositories share one [`StorageHandle`];
//!   statements are serialized through it.
//! - **Strongly typed errors**: All database errors are mapped to domain
//!   persistence error types.
//!
//! # Example
//!
//! ```ignore
//! use footprint::outbound::persistence::{
//!     DieselUserRepository, StorageConfig, StorageHandle,
//! };
//!
//! let storage = StorageHandle::open(StorageConfig::new("carbon_calculator.db")).await?;
//! let repo = DieselUserRepository::new(storage.clone());
//! ```

mod diesel_activity_repository;
mod diesel_basic_error_mapping;
mod diesel_user_repository;
mod models;
mod schema;
mod storage;

pub use diesel_activity_repository::DieselActivityRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use storage::{
    IN_MEMORY_DATABASE, SqliteAsyncConnection, StorageConfig, StorageConnection, StorageError,
    StorageHandle,
};
