//! Serve command - open the upload-and-download web UI.

use std::path::PathBuf;

use colored::Colorize;

use super::build_merger;
use crate::server::{app, state::AppState};

/// Rows shown in the upload page preview.
const WEB_PREVIEW_ROWS: usize = 10;

pub fn run(
    port: u16,
    no_open: bool,
    schema: Option<PathBuf>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let merger = build_merger(schema, true, WEB_PREVIEW_ROWS)?;
    if verbose {
        println!("Requiring {} columns", merger.schema().len());
    }
    let state = AppState::new(merger);

    let url = format!("http://localhost:{}", port);
    println!();
    println!(
        "{} {}",
        "Starting merge server at".cyan().bold(),
        url.white().bold()
    );
    println!();
    println!("Press {} to stop the server", "Ctrl+C".yellow().bold());
    println!();

    if !no_open {
        if let Err(e) = open::that(&url) {
            eprintln!("{} Could not open browser: {}", "Warning:".yellow(), e);
        }
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        tokio::spawn(async move {
            tokio::signal::ctrl_c().await.ok();
            println!();
            println!("{}", "Shutting down...".yellow());
            std::process::exit(0);
        });

        if let Err(e) = app::run_server(state, port).await {
            eprintln!("Server error: {}", e);
        }
    });

    Ok(())
}
