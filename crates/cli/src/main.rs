// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! tock - rotating timestamps for declarative infrastructure

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod commands;
mod driver;
mod error;
mod output;

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use commands::{apply, history, import, plan, rm, show};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::driver::Host;
use crate::error::TockError;
use crate::output::OutputFormat;
use tock_core::{parse_rfc3339, ResourceKind};

#[derive(Parser)]
#[command(
    name = "tock",
    version,
    about = "Tock - rotating timestamps for declarative infrastructure"
)]
struct Cli {
    /// Manifest declaring the desired resources
    #[arg(long, global = true, default_value = "tock.toml")]
    manifest: PathBuf,

    /// Directory holding resource state and the journal
    #[arg(long, global = true, default_value = ".tock")]
    state_dir: PathBuf,

    /// Pin the clock to an RFC 3339 instant
    #[arg(long, global = true, value_parser = parse_now)]
    now: Option<DateTime<Utc>>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Preview what apply would change
    ///
    /// The preview is advisory and is not saved.
    /// apply plans again against the state it finds and verifies its own commit against that plan.
    Plan,
    /// Converge state to the manifest
    Apply,
    /// Show stored resources
    Show {
        /// Only this resource
        name: Option<String>,
    },
    /// Adopt a rotating resource from its identifier
    Import {
        name: String,
        /// <rfc3339>,<rotation_rfc3339> or <rfc3339>,<years>,<months>,<days>,<hours>,<minutes>
        id: String,
    },
    /// Print the identifier of a stored rotating resource
    Id { name: String },
    /// Remove a resource from state
    Rm {
        /// rotating, offset or static
        #[arg(value_parser = parse_kind)]
        kind: ResourceKind,
        name: String,
    },
    /// Replay the lifecycle journal
    History,
}

fn parse_now(s: &str) -> Result<DateTime<Utc>, String> {
    parse_rfc3339("--now", s).map_err(|e| e.to_string())
}

fn parse_kind(s: &str) -> Result<ResourceKind, String> {
    s.parse()
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<TockError>() {
                Some(err) => eprint!("{}", err),
                None => eprint!("{}", TockError::new(format!("{:#}", e))),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let host = Host::new(cli.manifest, &cli.state_dir, cli.now, cli.format)?;

    match cli.command {
        Commands::Plan => plan::handle(&host),
        Commands::Apply => apply::handle(&host),
        Commands::Show { name } => show::handle(&host, name),
        Commands::Import { name, id } => import::handle(&host, &name, &id),
        Commands::Id { name } => import::id(&host, &name),
        Commands::Rm { kind, name } => rm::handle(&host, kind, &name),
        Commands::History => history::handle(&host),
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default `warn`)
fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
