//! Domain primitives, the emission calculator and the services behind the
//! driving ports.
//!
//! Purpose: Define strongly typed values used by hosts and persistence
//! adapters. Types are immutable once constructed and document their
//! invariants in Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode — transport agnostic failure payload.
//! - LoginCredentials / PasswordDigest — credential inputs and stored digest.
//! - User / Session — registered account and authenticated identity.
//! - DailyActivity / ActivityRecord / Report — activity log values.
//! - emissions — the emission factor table and calculator.
//! - CredentialService / ActivityLogService — driving port implementations.

pub mod activity;
pub mod activity_log_service;
pub mod auth;
pub mod credential_service;
pub mod emissions;
pub mod error;
pub mod ports;
pub mod user;

pub use self::activity::{
    ActivityInputError, ActivityRecord, DailyActivity, NewActivityRecord, ParseReportPeriodError,
    RecordId, Report, ReportPeriod,
};
pub use self::activity_log_service::ActivityLogService;
pub use self::auth::{LoginCredentials, PasswordDigest};
pub use self::credential_service::CredentialService;
pub use self::emissions::{AnnualActivity, Assessment, EmissionFactors, UnknownRegion};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::user::{Session, User, UserId, UserValidationError, Username};

/// Convenient domain result alias.
///
/// # Examples
/// ```
/// use footprint::domain::{DomainResult, Error};
///
/// fn lookup() -> DomainResult<()> {
///     Err(Error::authentication_failed("invalid username or password"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type DomainResult<T> = Result<T, Error>;
