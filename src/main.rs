//! `psrquery` filters catalogue records, one JSON object per line, through a
//! condition string and writes the matching records to stdout.
//!
//! ```text
//! psrquery [--config FILE] CONDITIONS [RECORDS.jsonl]
//! psrquery [--config FILE] --parameters
//! psrquery --vocabularies
//! ```
//! Records are read from stdin when no file is given.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::process::ExitCode;
use std::time::Instant;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use psrquery::{Columns, Partition, QueryError, QueryParser, Record, Registry, Result, Settings};

const USAGE: &str = "usage: psrquery [--config FILE] (--parameters | --vocabularies | CONDITIONS [RECORDS.jsonl])";

enum Command {
    Parameters,
    Vocabularies,
    Filter { conditions: String, input: Option<String> },
}

struct Arguments {
    config: Option<String>,
    command: Command,
}

fn arguments() -> std::result::Result<Arguments, String> {
    let mut config = None;
    let mut positional = Vec::new();
    let mut listing = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => config = Some(args.next().ok_or("--config needs a file name")?),
            "--parameters" => listing = Some(Command::Parameters),
            "--vocabularies" => listing = Some(Command::Vocabularies),
            "-h" | "--help" => return Err(USAGE.to_string()),
            _ => positional.push(arg),
        }
    }
    let command = match (listing, positional.len()) {
        (Some(command), 0) => command,
        (None, 1 | 2) => {
            let mut positional = positional.into_iter();
            Command::Filter {
                conditions: positional.next().unwrap_or_default(),
                input: positional.next(),
            }
        }
        _ => return Err(USAGE.to_string()),
    };
    Ok(Arguments { config, command })
}

fn init_logging(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn list_parameters(registry: &Registry) -> Result<()> {
    let mut out = BufWriter::new(io::stdout().lock());
    for partition in Partition::ALL {
        writeln!(out, "# {partition}")?;
        for name in registry.names_in(partition) {
            writeln!(out, "{}", registry.lookup(name)?)?;
        }
    }
    out.flush()?;
    Ok(())
}

fn list_vocabularies(registry: &Registry) -> Result<()> {
    let mut out = BufWriter::new(io::stdout().lock());
    for (vocabulary, tokens) in registry.vocabularies() {
        writeln!(out, "{vocabulary}: {}", tokens.join(", "))?;
    }
    out.flush()?;
    Ok(())
}

fn filter(registry: &Registry, settings: &Settings, conditions: &str, input: Option<&str>) -> Result<()> {
    let query = QueryParser::new(registry)
        .tolerance(settings.tolerance)
        .parse(conditions)?;
    info!(%query, "filtering");
    let reader: Box<dyn BufRead> = match input {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(BufReader::new(io::stdin().lock())),
    };
    let started = Instant::now();
    let mut out = BufWriter::new(io::stdout().lock());
    let mut columns = Columns::new(registry);
    let (mut read, mut skipped, mut selected) = (0usize, 0usize, 0usize);
    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        read += 1;
        let record = match Record::from_json(&line).and_then(|r| registry.validate_record(&r).map(|_| r)) {
            Ok(record) => record,
            Err(e) => {
                warn!(line = number + 1, error = %e, "skipping record");
                skipped += 1;
                continue;
            }
        };
        if query.matches(&record) {
            columns.observe(&record);
            let json = serde_json::to_string(&record)?;
            writeln!(out, "{json}")?;
            selected += 1;
        }
    }
    out.flush()?;
    info!(
        ms = started.elapsed().as_secs_f64() * 1000.0,
        read,
        skipped,
        selected,
        columns = %columns.names().join(","),
        "filter complete"
    );
    Ok(())
}

fn main() -> ExitCode {
    let arguments = match arguments() {
        Ok(arguments) => arguments,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::from(2);
        }
    };
    let settings = match arguments.config.as_deref().map_or_else(Settings::load, Settings::load_from) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(2);
        }
    };
    init_logging(&settings);
    let registry = Registry::global();
    settings.check_version(registry);
    let outcome = match &arguments.command {
        Command::Parameters => list_parameters(registry),
        Command::Vocabularies => list_vocabularies(registry),
        Command::Filter { conditions, input } => filter(registry, &settings, conditions, input.as_deref()),
    };
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_query_error() => {
            error!(error = %e, "invalid query");
            ExitCode::from(2)
        }
        Err(QueryError::Io { kind: io::ErrorKind::BrokenPipe, .. }) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "failed");
            ExitCode::FAILURE
        }
    }
}
