//! Validate FIN files: sequence boundaries and structure against the MT schema.
//!
//! Usage:
//!   mt_lint [OPTIONS] [FILE.fin ...]
//!   mt_lint < file.fin
//!
//! A file may hold an RJE batch (messages separated by `$` lines); every message is checked.
//! Messages that fail to parse count as errors. Exit code 1 if any error-level findings.

use anyhow::Context;
use clap::Parser;
use std::io::{self, Read};
use std::path::PathBuf;
use swiftmt::config::Config;
use swiftmt::rje::decode_batch;
use swiftmt::validate::{validate, Finding, Severity};

#[derive(Parser, Debug)]
#[command(name = "mt_lint", about = "Validate SWIFT MT messages against their sequence schema")]
struct Cli {
    /// FIN or RJE files; reads stdin when empty.
    files: Vec<PathBuf>,
    /// Human-readable output.
    #[arg(short = 'H', long)]
    human: bool,
    /// Findings as JSON lines.
    #[arg(long, conflicts_with = "human")]
    json: bool,
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy)]
enum OutputStyle {
    Compact,
    Human,
    Json,
}

fn print_finding(source: &str, f: &Finding, style: OutputStyle) {
    let severity_str = match f.severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
    };
    match style {
        OutputStyle::Compact => {
            println!(
                "{}:{}: {}: {} [{}]",
                source,
                f.position,
                severity_str,
                f.message,
                f.rule.id()
            );
        }
        OutputStyle::Human => {
            println!("  {} tag {}: {}", source, f.position, f.message);
            println!("    rule: {} ({})", f.rule.id(), severity_str);
        }
        OutputStyle::Json => {
            let line = serde_json::json!({ "source": source, "finding": f });
            println!("{}", line);
        }
    }
}

#[derive(Default)]
struct Totals {
    errors: usize,
    warnings: usize,
}

fn lint_source(name: &str, src: &str, config: &Config, style: OutputStyle, totals: &mut Totals) {
    let batch = decode_batch(src, &config.parser);
    let several = batch.messages.len() + batch.rejected.len() > 1;
    let label = |index: usize| {
        if several {
            format!("{}#{}", name, index + 1)
        } else {
            name.to_string()
        }
    };
    for rejected in &batch.rejected {
        totals.errors += 1;
        eprintln!("{}: parse error: {}", label(rejected.index), rejected.reason);
    }
    for decoded in &batch.messages {
        let findings = validate(&decoded.message, &config.validation);
        for f in &findings {
            match f.severity {
                Severity::Error => totals.errors += 1,
                Severity::Warning => totals.warnings += 1,
            }
            print_finding(&label(decoded.index), f, style);
        }
    }
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
    let style = if cli.json {
        OutputStyle::Json
    } else if cli.human {
        OutputStyle::Human
    } else {
        OutputStyle::Compact
    };

    let mut totals = Totals::default();
    if cli.files.is_empty() {
        let mut src = String::new();
        io::stdin().read_to_string(&mut src).context("reading stdin")?;
        lint_source("<stdin>", &src, &config, style, &mut totals);
    } else {
        for path in &cli.files {
            let src = match std::fs::read_to_string(path) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("{}: {}", path.display(), e);
                    totals.errors += 1;
                    continue;
                }
            };
            lint_source(&path.display().to_string(), &src, &config, style, &mut totals);
        }
    }

    if totals.errors > 0 || totals.warnings > 0 {
        eprintln!(
            "mt_lint: {} error(s), {} warning(s)",
            totals.errors, totals.warnings
        );
    }
    if totals.errors > 0 {
        std::process::exit(1);
    }
    Ok(())
}
