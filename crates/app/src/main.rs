//! cas-reader: inspect, dump and convert Atari 8-bit cassette (CAS) files.
//!
//! All decoding lives in `cas-reader-core`; this binary only reads files,
//! routes output and turns errors into exit codes.

mod config;
mod input_gen;
mod report;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use cas_reader_core::{parse_chunk_selection, ChunkStore, DecodeStats};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use config::{Action, Cli, Config, OutputFormat};
use report::InfoReport;

fn main() {
    let config = Config::from_cli(Cli::parse());
    init_tracing(config.log_filter);
    tracing::debug!(?config, "resolved configuration");

    if let Err(err) = run(&config.action) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(action: &Action) -> Result<()> {
    let output = execute(action)?;
    print!("{output}");
    Ok(())
}

/// Perform `action` and return the text meant for stdout.
fn execute(action: &Action) -> Result<String> {
    match action {
        Action::Info { input, format } => {
            let (store, stats) = load(input)?;
            let report = InfoReport::build(&input.display().to_string(), &store, &stats);
            match format {
                OutputFormat::Text => {
                    let mut text = report.to_text();
                    if !stats.is_clean() {
                        text.push('\n');
                        text.push_str(&stats.summary_text());
                    }
                    Ok(text)
                }
                OutputFormat::Json => {
                    let mut json = report.to_json().context("failed to encode report as JSON")?;
                    json.push('\n');
                    Ok(json)
                }
            }
        }

        Action::ToBin { input, output } => {
            let (store, _) = load(input)?;
            let bytes = store.to_flat_bytes();
            write_file(output, &bytes)?;
            Ok(format!("Wrote {} bytes to {}\n", bytes.len(), output.display()))
        }

        Action::Dump {
            input,
            selection,
            options,
        } => {
            let (store, _) = load(input)?;
            let indices = match selection {
                Some(spec) => Some(
                    parse_chunk_selection(spec, store.len())
                        .with_context(|| format!("error parsing chunk selection {spec:?}"))?,
                ),
                None => None,
            };
            let mut dump = store.render_dump(indices.as_deref(), *options);
            dump.push('\n');
            Ok(dump)
        }

        Action::Rewrite { input, output } => {
            let (store, stats) = load(input)?;
            let bytes = store.reserialize();
            write_file(output, &bytes)?;
            let mut text = format!(
                "Wrote {} bytes ({} chunks) to {}\n",
                bytes.len(),
                store.len(),
                output.display()
            );
            if stats.trailing_bytes() > 0 {
                text.push_str(&format!("Dropped {} trailing bytes\n", stats.trailing_bytes()));
            }
            Ok(text)
        }

        Action::Sample {
            output,
            seed,
            records,
            description,
        } => {
            let bytes = input_gen::generate_sample_bytes(*seed, *records, description)
                .context("failed to build sample tape")?;
            write_file(output, &bytes)?;
            Ok(format!(
                "Wrote sample tape ({} records, seed {}) of {} bytes to {}\n",
                records,
                seed,
                bytes.len(),
                output.display()
            ))
        }
    }
}

fn load(path: &Path) -> Result<(ChunkStore, DecodeStats)> {
    let buffer = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let (store, stats) = ChunkStore::from_bytes_with_stats(&buffer);

    tracing::info!(
        path = %path.display(),
        bytes = buffer.len(),
        chunks = store.len(),
        "loaded tape"
    );
    if !stats.is_clean() {
        tracing::warn!(
            path = %path.display(),
            dropped = stats.trailing_bytes(),
            "tape ends with an incomplete chunk"
        );
    }

    Ok((store, stats))
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "wrote file");
    Ok(())
}
