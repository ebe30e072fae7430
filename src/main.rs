// src/main.rs
//
// marked-popup — render marked-up text into a popup document
//
// Reads plain text, Markdown or reStructuredText, renders it to HTML, converts that
// HTML to the restricted popup dialect, and wraps it in the styling envelope.
// Empty input produces no document.
//
// Logging goes to stderr; set RUST_LOG (e.g. RUST_LOG=marked_popup=debug) for detail.

use clap::Parser;
use marked_popup::config::Cli;
use marked_popup::Popup;
use std::io;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    let text = cli.read_input()?;
    let popup = Popup::new(cli.markup).with_envelope(cli.envelope()?);

    let Some(document) = popup.build(&text)? else {
        info!("input is empty, no popup to show");
        return Ok(());
    };

    cli.write_output(&document)?;
    Ok(())
}
