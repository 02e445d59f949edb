//! TabMerge CLI - merge a ZIP of CSV/Excel files into one table.

mod cli;
mod commands;
mod server;
mod web;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default = if verbose { "tabmerge=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Merge {
            archive,
            output,
            format,
            schema,
            preview,
            parallel,
        } => commands::merge::run(
            archive,
            output,
            format,
            schema,
            preview,
            parallel,
            cli.verbose,
        ),

        Commands::Check {
            archive,
            schema,
            json,
        } => commands::check::run(archive, schema, json, cli.verbose),

        Commands::Schema { schema, json } => commands::schema::run(schema, json, cli.verbose),

        Commands::Serve {
            port,
            no_open,
            schema,
        } => commands::serve::run(port, no_open, schema, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
