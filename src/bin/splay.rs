//! splay CLI - print a JSON document as a type-dispatched outline.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use splay::term::{OutlineOptions, render_outline, write_outline};
use splay::{Size, Value};

/// Render a JSON document through the outline producers
#[derive(Parser)]
#[command(name = "splay")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input JSON file (reads stdin when omitted)
    input: Option<PathBuf>,

    /// Render width in cells (defaults to the terminal width)
    #[arg(short, long)]
    width: Option<u16>,

    /// Render height in rows (defaults to the terminal height)
    #[arg(long)]
    height: Option<u16>,

    /// Path of the root value
    #[arg(short, long, default_value = "root")]
    root: String,

    /// Spaces per nesting level
    #[arg(long, default_value = "2")]
    indent: usize,

    /// Treat RFC 3339 strings as dates
    #[arg(long)]
    dates: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn read_input(input: Option<&PathBuf>) -> Result<String> {
    match input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

/// Requested size, filling gaps from the terminal (80x24 when unknown).
fn render_size(width: Option<u16>, height: Option<u16>) -> Size {
    let (term_width, term_height) = crossterm::terminal::size().unwrap_or_else(|err| {
        tracing::debug!(%err, "terminal size unavailable, using 80x24");
        (80, 24)
    });
    Size::from((width.unwrap_or(term_width), height.unwrap_or(term_height)))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_ansi(!cli.no_color)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let source = read_input(cli.input.as_ref())?;
    let json: serde_json::Value = serde_json::from_str(&source).context("input is not valid JSON")?;

    let mut value = Value::from(json);
    if cli.dates {
        value = value.with_dates();
    }

    let size = render_size(cli.width, cli.height);
    tracing::debug!(?size, root = %cli.root, "rendering");

    let lines = render_outline(&value, size, &cli.root);
    let options = OutlineOptions {
        indent: cli.indent,
        color: !cli.no_color,
    };

    let stdout = io::stdout();
    write_outline(&mut stdout.lock(), &lines, &options).context("failed to write output")?;
    Ok(())
}
