//! Siteconf CLI
//!
//! Inspect site configuration history loaded from a fixture file

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use siteconf_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "siteconf")]
#[command(about = "Site configuration revision history", long_about = None)]
struct Cli {
    /// Engine configuration (YAML); defaults apply when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log output on stderr: pretty, json or test
    #[arg(long, global = true, default_value = "json")]
    log_format: Profile,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Page through revisions, newest first
    History(commands::history::HistoryCmdArgs),
    /// Show one revision as JSON
    Show(commands::show::ShowArgs),
    /// Print the redacted diff of one revision
    Diff(commands::diff::DiffArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init(cli.log_format);

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::History(args) => commands::history::execute(config, args).await,
        Commands::Show(args) => commands::show::execute(config, args).await,
        Commands::Diff(args) => commands::diff::execute(config, args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
