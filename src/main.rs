// Copyright 2026 nvdweek Contributors
// SPDX-License-Identifier: Apache-2.0

use chrono::NaiveDate;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use nvdweek::cli;

#[derive(Parser)]
#[command(
    name = "nvdweek",
    about = "Query nvd.nist.gov for vulnerabilities published during the current week",
    version,
    after_help = "Without a subcommand, nvdweek fetches and prints this week's advisories."
)]
struct Cli {
    /// Maximum number of vulnerabilities to display (default shows all)
    #[arg(long)]
    limit: Option<usize>,

    /// Emit JSON instead of human-readable text
    #[arg(long)]
    json: bool,

    /// Write the rendered HTML to this file before parsing
    #[arg(long, value_name = "PATH")]
    debug_html: Option<PathBuf>,

    /// Reference date (YYYY-MM-DD) for the week window; defaults to today
    #[arg(long, value_name = "DATE")]
    date: Option<NaiveDate>,

    /// Enable verbose/debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check environment and diagnose issues
    Doctor,
    /// Navigate the live search page and report its title and row count
    Probe,
    /// Generate shell completion scripts
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: Shell,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let result = match cli.command {
        None => cli::fetch_cmd::run(cli.date, cli.limit, cli.json, cli.debug_html).await,
        Some(Commands::Doctor) => cli::doctor::run().await,
        Some(Commands::Probe) => cli::probe_cmd::run().await,
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "nvdweek", &mut std::io::stdout());
            Ok(())
        }
    };

    // Consistent exit codes: 0=success, 1=error
    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let directive = if verbose {
        "nvdweek=debug"
    } else {
        "nvdweek=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(directive.parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();
}
