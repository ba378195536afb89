//! dotvar CLI: feeds messages through the bot dispatcher and prints replies.
//!
//! Usage:
//!   dotvar john.doe@gmail.com            — text reply + document marker
//!   dotvar --format csv john@gmail.com   — CSV payload only
//!   cat inbox.txt | dotvar --format json — one JSON array per input line

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::debug;

use dotvar_core::{config::Config, dispatch::Dispatcher, domain::Outgoing};

#[derive(Parser)]
#[command(
    name = "dotvar",
    version,
    about = "Generate Gmail dot-variation addresses",
    long_about = "Generate Gmail dot-variation addresses.\n\nEach MESSAGE is handled like a chat message sent to the bot: Gmail addresses produce their dot variations, Drive share links produce a direct download link."
)]
struct Cli {
    /// Messages to handle (reads stdin, one per line, when omitted)
    messages: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Domain appended to every variation (overrides DOTVAR_TARGET_DOMAIN)
    #[arg(short, long)]
    domain: Option<String>,

    /// Maximum number of variations (overrides DOTVAR_MAX_VARIATIONS)
    #[arg(short, long)]
    max: Option<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Csv,
    Json,
}

fn main() -> Result<()> {
    dotvar_core::logging::init("dotvar")?;

    let cli = Cli::parse();

    let mut cfg = Config::load()?;
    if let Some(domain) = &cli.domain {
        cfg.set_target_domain(domain)?;
    }
    if let Some(max) = cli.max {
        cfg.set_max_variations(max)?;
    }
    debug!(?cfg, "loaded config");

    let dispatcher = Dispatcher::new(cfg);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.messages.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = line.context("failed to read stdin")?;
            if line.trim().is_empty() {
                continue;
            }
            render(&mut out, cli.format, &dispatcher.handle_text(&line))?;
        }
    } else {
        for msg in &cli.messages {
            render(&mut out, cli.format, &dispatcher.handle_text(msg))?;
        }
    }

    out.flush()?;
    Ok(())
}

fn render(out: &mut impl Write, format: OutputFormat, replies: &[Outgoing]) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for reply in replies {
                match reply {
                    Outgoing::Text { text } => writeln!(out, "{text}")?,
                    Outgoing::Document(doc) => writeln!(
                        out,
                        "[document: {}, {} bytes]",
                        doc.file_name,
                        doc.bytes().len()
                    )?,
                }
            }
        }
        OutputFormat::Csv => {
            for doc in replies.iter().filter_map(Outgoing::as_document) {
                out.write_all(doc.bytes())?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, replies)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
