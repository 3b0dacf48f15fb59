//! `footprint` entry-point: wires the SQLite adapters into the command-line host.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use mockable::DefaultClock;
use tokio::runtime::Builder;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};

use footprint::domain::{ActivityLogService, CredentialService};
use footprint::inbound::cli::{self, Cli, CliState};
use footprint::outbound::persistence::{
    DieselActivityRepository, DieselUserRepository, StorageHandle,
};
use footprint::settings::FootprintSettings;

fn main() -> ExitCode {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> io::Result<()> {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main(cli))
}

async fn async_main(cli: Cli) -> io::Result<()> {
    let settings = FootprintSettings::load_without_cli_args()
        .map_err(|error| io::Error::other(format!("load settings: {error}")))?;
    debug!(
        database = %settings.database_path().display(),
        region = settings.region(),
        "settings loaded"
    );

    let storage = StorageHandle::open(settings.storage_config())
        .await
        .map_err(io::Error::other)?;

    let credentials = CredentialService::new(Arc::new(DieselUserRepository::new(storage.clone())));
    let activity = ActivityLogService::new(
        Arc::new(DieselActivityRepository::new(storage.clone())),
        Arc::new(DefaultClock),
    );
    let state = CliState::new(
        Arc::new(credentials),
        Arc::new(activity),
        settings.region(),
    );

    let mut stdout = io::stdout().lock();
    let outcome = cli::run(&state, cli.command, &mut stdout).await;
    storage.close().await;

    outcome.map_err(io::Error::other)
}
