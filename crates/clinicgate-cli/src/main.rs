//! Clinicgate unified CLI.
//!
//! Provisions a dental-clinic ReBAC+ABAC policy against an OpenFGA-compatible
//! decision service and verifies its documented intent.
//!
//! # Quick Start
//!
//! ```bash
//! # Inspect the tuple set and assertion plan (no network)
//! clinicgate plan
//!
//! # Provision the store/model/tuples and run the verification
//! clinicgate run
//!
//! # Re-run against the store created last time
//! clinicgate run --store-id 01JJ0EXAMPLE
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Clinicgate - policy provisioning and verification for the clinic CRM.
#[derive(Parser)]
#[command(name = "clinicgate")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version information.
    Version,

    /// Print the tuple set and verification plan without touching the network.
    Plan {
        /// Evaluation instant (ISO-8601, e.g. 2025-06-15T12:00:00Z).
        /// Defaults to now.
        #[arg(long)]
        at: Option<String>,
    },

    /// Provision the scenario and verify every documented expectation.
    Run {
        /// Reuse an existing store instead of creating one.
        #[arg(long)]
        store_id: Option<String>,

        /// Path to the authorization model document (JSON).
        #[arg(long)]
        model_file: Option<PathBuf>,

        /// Evaluation instant (ISO-8601). Defaults to now.
        #[arg(long)]
        at: Option<String>,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Version => {
            commands::version::run();
            Ok(())
        }
        Commands::Plan { at } => commands::plan::run(at.as_deref()),
        Commands::Run {
            store_id,
            model_file,
            at,
        } => commands::run::run(store_id, model_file, at.as_deref()),
    }
}
