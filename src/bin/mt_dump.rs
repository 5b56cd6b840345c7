//! Print FIN messages as a sequence tree, normalized FIN, or JSON.
//!
//! Usage:
//!   mt_dump [--format tree|fin|json] [--config FILE] [FILE]
//!
//! Reads stdin when no file is given. RJE batches print every message.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::PathBuf;
use swiftmt::config::Config;
use swiftmt::dump::dump_message;
use swiftmt::rje::decode_batch;
use tracing::info;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Tree,
    Fin,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "mt_dump", about = "Dump SWIFT MT messages")]
struct Cli {
    /// FIN or RJE file; stdin when omitted.
    file: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value = "tree")]
    format: Format,
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::default(),
    };

    let src = match &cli.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut s = String::new();
            io::stdin().read_to_string(&mut s).context("reading stdin")?;
            s
        }
    };

    let batch = decode_batch(&src, &config.parser);
    info!(
        messages = batch.messages.len(),
        rejected = batch.rejected.len(),
        "decoded input"
    );
    for rejected in &batch.rejected {
        eprintln!("message {}: parse error: {}", rejected.index + 1, rejected.reason);
    }
    for (i, decoded) in batch.messages.iter().enumerate() {
        if i > 0 {
            println!();
        }
        match cli.format {
            Format::Tree => println!("{}", dump_message(&decoded.message)),
            Format::Fin => println!("{}", decoded.message.to_fin()),
            Format::Json => println!("{}", decoded.message.to_json()?),
        }
    }
    if !batch.rejected.is_empty() && batch.messages.is_empty() {
        anyhow::bail!("no message could be parsed");
    }
    Ok(())
}
