//! Maintainer CLI for docstring override files
//!
//! Wraps the registry library for the people who edit override sources by
//! hand: look up one namespace, validate a file, re-format it canonically,
//! or export the whole registry as JSON for the documentation generator.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use ensdoc_overrides::{format_record, format_records, validate, OverrideRegistry};

#[derive(Parser)]
#[command(
    name = "ensdoc",
    about = "Docstring override registry tools for the EnSight scripting API",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Look up one override record by exact namespace
    Lookup {
        /// Override source file
        file: PathBuf,
        /// Fully-qualified dotted namespace
        namespace: String,
        /// Print the record as JSON instead of block form
        #[arg(long)]
        json: bool,
    },
    /// Run advisory consistency checks over a file
    Validate {
        /// Override source file
        file: PathBuf,
        /// Exit non-zero if any warnings were produced
        #[arg(long)]
        strict: bool,
    },
    /// Export all records as JSON for the documentation generator
    Export {
        /// Override source file
        file: PathBuf,
    },
    /// Re-format a file into canonical block form on stdout
    Format {
        /// Override source file
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("ensdoc: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    match cli.command {
        Command::Lookup {
            file,
            namespace,
            json,
        } => {
            let registry = load(&file)?;
            let record = registry.lookup(&namespace)?;
            if json {
                println!("{}", serde_json::to_string_pretty(record)?);
            } else {
                println!("{}", format_record(record));
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Validate { file, strict } => {
            let registry = load(&file)?;
            let warnings = validate(&registry);
            for warning in &warnings {
                println!("{warning}");
            }
            tracing::info!(
                records = registry.len(),
                warnings = warnings.len(),
                "validation finished"
            );
            if strict && !warnings.is_empty() {
                Ok(ExitCode::from(1))
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
        Command::Export { file } => {
            let registry = load(&file)?;
            println!("{}", registry.to_json()?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Format { file } => {
            let registry = load(&file)?;
            println!("{}", format_records(registry.records()));
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load(file: &PathBuf) -> Result<OverrideRegistry, Box<dyn std::error::Error>> {
    let registry = OverrideRegistry::load_path(file)?;
    tracing::debug!(path = %file.display(), records = registry.len(), "loaded overrides");
    Ok(registry)
}
