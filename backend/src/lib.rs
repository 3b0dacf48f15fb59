//! Personal carbon footprint tracker.
//!
//! Accounts are kept in a local SQLite database together with an append-only
//! log of activity submissions. Each submission is annualized and converted
//! to tonnes of CO2 with per-region emission factors.
//!
//! - [`domain`]: values, the emission calculator, ports and services.
//! - [`outbound`]: Diesel/SQLite repositories and the storage handle.
//! - [`inbound`]: the `footprint` command-line adapter.
//! - [`settings`]: OrthoConfig-backed runtime settings.

pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod settings;
