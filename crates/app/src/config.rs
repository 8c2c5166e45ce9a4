//! Configuration for the cas-reader application.
//!
//! Command-line arguments are parsed with clap into [`Cli`], then resolved
//! into a [`Config`] with every default applied, so the rest of the program
//! never has to ask "was this flag given?".

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use cas_reader_core::DumpOptions;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const LONG_ABOUT: &str = "Read and convert Atari 8-bit cassette (CAS) files.

A CAS file is a run of typed chunks: a FUJI description, baud rate settings,
standard data records and turbo/raw signal chunks. Decoding never fails on a
damaged file; it stops at the first incomplete chunk and reports what was left.

Examples:
  cas-reader info game.cas
  cas-reader to-bin game.cas game.bin
  cas-reader dump game.cas --chunk 0,2,5-7 --hex --ascii
  cas-reader rewrite damaged.cas clean.cas
  cas-reader sample test.cas --seed 42";

/// Default number of data records in a generated sample tape
pub const DEFAULT_SAMPLE_RECORDS: usize = 8;

#[derive(Parser, Debug)]
#[command(
    name = "cas-reader",
    version = VERSION,
    about = "Inspect, dump and convert Atari 8-bit cassette (CAS) files",
    long_about = LONG_ABOUT
)]
pub struct Cli {
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        global = true,
        long_help = "Increase log verbosity (-v info, -vv debug). RUST_LOG overrides this."
    )]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show tape metadata and the chunk list
    Info {
        input: PathBuf,
        #[arg(long = "format", value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Write the concatenated data-record payloads to a binary file
    ToBin { input: PathBuf, output: PathBuf },
    /// Dump chunk contents in hex and/or ASCII
    Dump {
        input: PathBuf,
        #[arg(
            long = "chunk",
            value_name = "SPEC",
            long_help = "Chunk selection, e.g. \"0\", \"1,3,5\", \"0-5\", \"1,3-7,10\". Defaults to all chunks."
        )]
        chunk: Option<String>,
        #[arg(long = "hex", action = ArgAction::SetTrue)]
        hex: bool,
        #[arg(long = "ascii", action = ArgAction::SetTrue)]
        ascii: bool,
    },
    /// Write every decoded chunk back out, dropping trailing garbage
    Rewrite { input: PathBuf, output: PathBuf },
    /// Generate a synthetic CAS file
    Sample {
        output: PathBuf,
        #[arg(long = "seed", long_help = "Random seed for reproducible content (default: time-based)")]
        seed: Option<u64>,
        #[arg(long = "records", default_value_t = DEFAULT_SAMPLE_RECORDS)]
        records: usize,
        #[arg(long = "description", default_value = "Sample Tape")]
        description: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// A fully resolved action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Info {
        input: PathBuf,
        format: OutputFormat,
    },
    ToBin {
        input: PathBuf,
        output: PathBuf,
    },
    Dump {
        input: PathBuf,
        selection: Option<String>,
        options: DumpOptions,
    },
    Rewrite {
        input: PathBuf,
        output: PathBuf,
    },
    Sample {
        output: PathBuf,
        seed: u64,
        records: usize,
        description: String,
    },
}

/// Complete configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    pub action: Action,

    /// Default log filter when RUST_LOG is unset
    pub log_filter: &'static str,
}

impl Config {
    /// Resolve parsed arguments into a configuration.
    ///
    /// Dump falls back to hex when neither `--hex` nor `--ascii` is given, and a
    /// sample without `--seed` gets a time-based seed.
    pub fn from_cli(cli: Cli) -> Self {
        let log_filter = match cli.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        };

        let action = match cli.command {
            Command::Info { input, format } => Action::Info { input, format },
            Command::ToBin { input, output } => Action::ToBin { input, output },
            Command::Dump {
                input,
                chunk,
                hex,
                ascii,
            } => Action::Dump {
                input,
                selection: chunk,
                options: DumpOptions {
                    show_hex: hex || !ascii,
                    show_ascii: ascii,
                },
            },
            Command::Rewrite { input, output } => Action::Rewrite { input, output },
            Command::Sample {
                output,
                seed,
                records,
                description,
            } => Action::Sample {
                output,
                seed: seed.unwrap_or_else(time_seed),
                records,
                description,
            },
        };

        Config { action, log_filter }
    }
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
