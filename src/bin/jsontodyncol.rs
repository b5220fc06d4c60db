//! jsontodyncol: Convert JSON objects into MariaDB dynamic column INSERT statements
//!
//! Usage:
//!   # Read from file, output to stdout
//!   jsontodyncol -table events -column attrs data.json
//!
//!   # Read from stdin, 100 rows per statement
//!   cat events.jsonl | jsontodyncol -table events -column attrs -insert-size 100
//!
//!   # Show per-batch tracing on stderr
//!   JSONTODYNCOL_LOG=debug jsontodyncol -table events -column attrs data.json

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{Context, Result};
use clap::Parser;
use jsontodyncol::{convert_json, ConfigError, ConvertReport, InsertConfig};
use std::fs::File;
use std::io::{self, BufWriter, Read};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the tracing filter, e.g. "debug"
const LOG_ENV: &str = "JSONTODYNCOL_LOG";

/// Long flags that may also be written with a single dash, e.g. `-table`
const LONG_FLAGS: &[&str] = &[
    "table",
    "column",
    "database",
    "insert-size",
    "pretty",
    "help",
    "version",
];

#[derive(Parser, Debug)]
#[command(name = "jsontodyncol", version)]
#[command(about = "JSON to MariaDB Dynamic Column converter")]
#[command(
    long_about = "JSON to MariaDB Dynamic Column converter\n\n\
    Reads one or more JSON objects from a file and convert them into MariaDB compatible\n\
    INSERT statements. If no input file is provided the standard input is read."
)]
#[command(override_usage = "jsontodyncol -table TABLE -column COLUMN [OPTIONS] [FILE]")]
struct Args {
    /// Input file (use stdin if omitted)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Table name
    #[arg(long, value_name = "TABLE", default_value = "")]
    table: String,

    /// Column name
    #[arg(long, value_name = "COLUMN", default_value = "")]
    column: String,

    /// Database name
    #[arg(long, value_name = "DATABASE", default_value = "")]
    database: String,

    /// Number of inserted values in each statement
    #[arg(long, value_name = "N", default_value_t = 1)]
    insert_size: usize,

    /// Pretty-print output
    #[arg(long)]
    pretty: bool,
}

impl Args {
    fn to_config(&self) -> InsertConfig {
        InsertConfig::new(self.table.clone(), self.column.clone())
            .with_database(self.database.clone())
            .with_insert_size(self.insert_size)
            .with_pretty(self.pretty)
    }
}

fn main() {
    init_tracing();

    let args = match Args::try_parse_from(normalize_args(std::env::args())) {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            // --help and --version are not failures
            std::process::exit(if err.use_stderr() { 1 } else { 0 });
        }
    };

    if let Err(err) = run(&args) {
        match err.downcast_ref::<ConfigError>() {
            Some(config_err) => eprintln!("{}", config_err),
            None => eprintln!("Fatal error: {:#}", err),
        }
        std::process::exit(1);
    }
}

/// Everything that owns a handle lives in here, so it is dropped before exit
fn run(args: &Args) -> Result<ConvertReport> {
    let config = args.to_config();
    config.validate()?;

    let reader: Box<dyn Read> = match &args.input {
        Some(path) => Box::new(
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?,
        ),
        None => Box::new(io::stdin().lock()),
    };
    let writer = BufWriter::new(io::stdout().lock());

    convert_json(reader, writer, config)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .with_target(false)
        .without_time()
        .init();
}

/// Rewrite single-dash long flags (`-table t`, `-insert-size=5`) to clap's `--` form
fn normalize_args<I: IntoIterator<Item = String>>(args: I) -> Vec<String> {
    let mut normalized = Vec::new();
    let mut positional_only = false;

    for (idx, arg) in args.into_iter().enumerate() {
        if idx == 0 || positional_only {
            normalized.push(arg);
            continue;
        }
        if arg == "--" {
            positional_only = true;
            normalized.push(arg);
            continue;
        }

        let is_single_dash_long = arg
            .strip_prefix('-')
            .filter(|rest| !rest.starts_with('-'))
            .map(|rest| rest.split('=').next().unwrap_or(rest))
            .map_or(false, |name| LONG_FLAGS.contains(&name));

        if is_single_dash_long {
            normalized.push(format!("-{}", arg));
        } else {
            normalized.push(arg);
        }
    }

    normalized
}
