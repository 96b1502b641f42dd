//!
//! This module implements the command-line interface for bus-ledger: command
//! parsing, building the ledger from configuration, and handing stdin/stdout
//! to the interactive menu.
//!
//! All ledger rules live in the [`bus-ledger-core`] crate. This module is
//! strictly glue: configuration in, rendered text out.
//!
//! ## How To Use
//! - For command-line users: `bus-ledger menu [--config fleet.yaml]`, or
//!   `bus-ledger fleet --config fleet.yaml [--json]` to check a config.
//! - For programmatic/integration use: call [`run`] with a constructed [`Cli`].
//!
//! [`bus-ledger-core`]: ../../bus-ledger-core/
use crate::load_config::{default_config, load_config, resolve_config_path, CliConfig};
use crate::menu::Session;
use crate::render;
use anyhow::{Context, Result};
use bus_ledger_core::shared::SharedLedger;
use bus_ledger_core::ticket_id::RandomTicketIdGenerator;
use bus_ledger_core::{Ledger, LedgerError};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

/// CLI for bus-ledger: reserve seats on a small fleet of buses.
#[derive(Parser)]
#[clap(
    name = "bus-ledger",
    version,
    about = "Register buses, reserve seats and manage tickets in an in-memory ledger"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the interactive reservation menu
    Menu {
        /// Path to a YAML config file (falls back to BUS_LEDGER_CONFIG)
        #[clap(long)]
        config: Option<PathBuf>,
    },
    /// Load the configured fleet, print the bus list and exit
    Fleet {
        /// Path to a YAML config file (falls back to BUS_LEDGER_CONFIG)
        #[clap(long)]
        config: Option<PathBuf>,
        /// Print bus summaries as JSON instead of the console report
        #[clap(long)]
        json: bool,
    },
}

/// Builds a ledger from config, registering the configured fleet in order.
pub fn build_ledger(config: &CliConfig) -> Result<Ledger<RandomTicketIdGenerator>> {
    let generator = match config.ticket_ids.seed {
        Some(seed) => RandomTicketIdGenerator::from_seed(seed),
        None => RandomTicketIdGenerator::from_entropy(),
    };
    let ledger_config = config.ticket_ids.ledger_config();
    ledger_config.trace_loaded();

    let mut ledger = Ledger::with_config(generator, ledger_config);
    for (index, bus) in config.fleet.iter().enumerate() {
        ledger
            .add_bus(bus.clone())
            .with_context(|| format!("fleet entry {index} (bus {:?})", bus.bus_number))?;
    }
    tracing::info!(buses = ledger.len(), "Ledger ready");
    Ok(ledger)
}

fn config_for(arg: Option<PathBuf>) -> Result<CliConfig> {
    match resolve_config_path(arg) {
        Some(path) => load_config(path),
        None => default_config(),
    }
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    // Emit a top-level 'trace_initialised' event at the very start
    tracing::info!("trace_initialised");

    match cli.command {
        Commands::Menu { config } => {
            let config = config_for(config)?;
            let ledger = SharedLedger::new(build_ledger(&config)?);
            tracing::info!(command = "menu", "Starting interactive session");
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            let mut session = Session::new(stdin.lock(), stdout.lock(), ledger);
            session.run().await.context("console I/O failed")?;
            Ok(())
        }
        Commands::Fleet { config, json } => {
            let config = config_for(config)?;
            let ledger = build_ledger(&config)?;
            let mut stdout = std::io::stdout().lock();
            match ledger.list_buses() {
                Ok(buses) if json => {
                    writeln!(stdout, "{}", serde_json::to_string_pretty(&buses)?)?;
                }
                Ok(buses) => write!(stdout, "{}", render::bus_list(&buses))?,
                Err(LedgerError::EmptyCollection) if json => writeln!(stdout, "[]")?,
                Err(e) => writeln!(stdout, "{}", render::error(&e))?,
            }
            tracing::info!(command = "fleet", buses = ledger.len(), "Fleet report printed");
            Ok(())
        }
    }
}
