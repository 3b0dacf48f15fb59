//! Shared command-line adapter state.
//!
//! Commands accept this state so they only depend on the driving ports and
//! stay testable without a database.

use std::sync::Arc;

use crate::domain::ports::{ActivityLog, CredentialStore};

/// Dependency bundle for command handlers.
#[derive(Clone)]
pub struct CliState {
    /// Registration and sign-in.
    pub credentials: Arc<dyn CredentialStore>,
    /// Submission and listing of daily activity.
    pub activity: Arc<dyn ActivityLog>,
    /// Region whose emission factors apply to `add`.
    pub region: String,
}

impl CliState {
    /// Bundle the ports with the configured region.
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        activity: Arc<dyn ActivityLog>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            credentials,
            activity,
            region: region.into(),
        }
    }
}
