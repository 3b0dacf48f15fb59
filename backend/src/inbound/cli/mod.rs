//! Command-line adapter.
//!
//! ```text
//! footprint register --username asha --password monsoon
//! footprint add --username asha --password monsoon --distance 10 --electricity 100 --waste 1 --meals 2
//! footprint report --username asha --password monsoon --period weekly --json
//! ```
//!
//! Arguments are parsed with `clap`; handlers only talk to the driving ports
//! bundled in [`CliState`] and write human-readable output to the supplied
//! writer.

mod render;
mod state;

use std::io::{self, Write};

use clap::{Args, Parser, Subcommand};
use tracing::debug;

use crate::domain::{DailyActivity, Error, LoginCredentials, ReportPeriod, Session};

pub use render::{write_json, write_table};
pub use state::CliState;

/// `footprint` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "footprint",
    about = "Track your personal carbon footprint",
    version
)]
pub struct Cli {
    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported commands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Create a new account.
    Register(CredentialArgs),
    /// Record today's activity and print its annual footprint.
    Add(AddArgs),
    /// List every recorded activity for the account.
    Report(ReportArgs),
}

/// Username and password shared by every command.
#[derive(Debug, Clone, Args)]
pub struct CredentialArgs {
    /// Account name.
    #[arg(long, value_name = "name")]
    pub username: String,
    /// Account password.
    #[arg(long, value_name = "password")]
    pub password: String,
}

/// Arguments for `footprint add`.
#[derive(Debug, Clone, Args)]
pub struct AddArgs {
    #[command(flatten)]
    pub credentials: CredentialArgs,
    /// Daily commute distance in km (0 to 100).
    #[arg(long, value_name = "km", allow_negative_numbers = true)]
    pub distance: f64,
    /// Monthly electricity consumption in kWh (0 to 1000).
    #[arg(long, value_name = "kWh", allow_negative_numbers = true)]
    pub electricity: f64,
    /// Waste generated today in kg (0 to 100).
    #[arg(long, value_name = "kg", allow_negative_numbers = true)]
    pub waste: f64,
    /// Number of meals per day.
    #[arg(long, value_name = "count")]
    pub meals: u32,
}

/// Arguments for `footprint report`.
#[derive(Debug, Clone, Args)]
pub struct ReportArgs {
    #[command(flatten)]
    pub credentials: CredentialArgs,
    /// View label: daily, weekly, monthly or yearly. Every view lists all rows.
    #[arg(long, value_name = "period", default_value = "daily")]
    pub period: ReportPeriod,
    /// Print JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

/// Failures surfaced by command handlers.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// A driving port rejected the request.
    #[error(transparent)]
    Domain(#[from] Error),
    /// Output could not be written.
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
    /// The report could not be encoded as JSON.
    #[error("failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),
}

impl CliError {
    /// Domain error carried by this failure, if any.
    pub fn domain(&self) -> Option<&Error> {
        match self {
            Self::Domain(error) => Some(error),
            Self::Output(_) | Self::Encode(_) => None,
        }
    }
}

impl TryFrom<&CredentialArgs> for LoginCredentials {
    type Error = Error;

    fn try_from(args: &CredentialArgs) -> Result<Self, Self::Error> {
        Self::try_from_parts(&args.username, &args.password)
            .map_err(|err| Error::invalid_request(err.to_string()))
    }
}

async fn sign_in(state: &CliState, args: &CredentialArgs) -> Result<Session, Error> {
    let credentials = LoginCredentials::try_from(args)?;
    state.credentials.authenticate(&credentials).await
}

/// Run `command` against `state`, writing results to `out`.
///
/// # Errors
///
/// Returns [`CliError::Domain`] when validation, authentication or storage
/// fails, and the I/O variants when `out` cannot be written.
pub async fn run<W: Write>(
    state: &CliState,
    command: Command,
    out: &mut W,
) -> Result<(), CliError> {
    match command {
        Command::Register(args) => {
            let credentials = LoginCredentials::try_from(&args)?;
            let user_id = state.credentials.register(&credentials).await?;
            debug!(%user_id, "register command finished");
            writeln!(out, "Account created successfully! Please log in.")?;
        }
        Command::Add(args) => {
            let session = sign_in(state, &args.credentials).await?;
            let daily =
                DailyActivity::try_new(args.distance, args.electricity, args.waste, args.meals)
                    .map_err(|err| Error::invalid_request(err.to_string()))?;
            let record = state
                .activity
                .submit(&session, &state.region, &daily)
                .await?;
            writeln!(out, "Data added successfully!")?;
            writeln!(
                out,
                "Annual carbon footprint: {:.2} tonnes CO2 (recorded {})",
                record.total_emissions, record.date
            )?;
        }
        Command::Report(args) => {
            let session = sign_in(state, &args.credentials).await?;
            let report = state.activity.report(&session, args.period).await?;
            if args.json {
                write_json(&report, out)?;
            } else {
                write_table(&report, out)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
