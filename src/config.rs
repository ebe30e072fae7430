// src/config.rs
//
// Command-line configuration.
//
// - Input: a file path, or stdin when absent or "-".
// - Output: stdout unless --output is given.
// - --markup selects the renderer; identifiers are matched exactly.
// - --style replaces the built-in style sheet; --no-envelope drops the envelope.

use crate::envelope::Envelope;
use crate::markup::MarkupKind;
use clap::{ArgAction, Parser};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Default maximum popup width in pixels, as handed to the display host.
pub const DEFAULT_MAX_WIDTH: u32 = 1024;

/// CLI flags
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Markup of the input: plain, markdown or reStructuredText
    #[arg(short, long, default_value_t = MarkupKind::Plain, value_parser = parse_markup)]
    pub markup: MarkupKind,

    /// Style sheet to embed instead of the built-in one
    #[arg(long)]
    pub style: Option<PathBuf>,

    /// Emit only the converted body, without the styling envelope
    #[arg(long = "no-envelope", action = ArgAction::SetTrue)]
    pub no_envelope: bool,

    /// Maximum popup width recorded on the envelope
    #[arg(long, default_value_t = DEFAULT_MAX_WIDTH)]
    pub max_width: u32,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Input file (default: stdin)
    pub input: Option<PathBuf>,
}

fn parse_markup(s: &str) -> Result<MarkupKind, String> {
    s.parse().map_err(|e: crate::Error| e.to_string())
}

impl Cli {
    pub fn read_input(&self) -> io::Result<String> {
        match self.input.as_deref() {
            Some(path) if path != Path::new("-") => fs::read_to_string(path),
            _ => io::read_to_string(io::stdin()),
        }
    }

    /// The envelope to wrap the body in, loading `--style` if given.
    pub fn envelope(&self) -> io::Result<Option<Envelope>> {
        if self.no_envelope {
            return Ok(None);
        }
        let envelope = match &self.style {
            Some(path) => Envelope::new(fs::read_to_string(path)?),
            None => Envelope::default(),
        };
        Ok(Some(envelope.with_max_width(self.max_width)))
    }

    pub fn write_output(&self, document: &str) -> io::Result<()> {
        match &self.output {
            Some(path) => fs::write(path, document),
            None => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(document.as_bytes())?;
                stdout.write_all(b"\n")?;
                stdout.flush()
            }
        }
    }
}
