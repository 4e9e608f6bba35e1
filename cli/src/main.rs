//! matq - compile materials search queries into document-store criteria.
//!
//! This is the entry point for the `matq` binary.

use std::io::{self, IsTerminal};
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use matq_cli::{
    compile_query, exit_code_for_error, render, run_lines, CliError, OutputFormat, QueryKind,
};

/// Compile formula and chemical-system queries into search criteria.
#[derive(Parser)]
#[command(name = "matq")]
#[command(version)]
#[command(about = "Compile formula and chemsys queries into materials search criteria")]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a formula query, e.g. "Fe2O3", "Fe2O3, Al2O3", "Li*O2" or "ABC2".
    /// Reads one query per line from stdin when QUERY is omitted.
    Formula { query: Option<String> },
    /// Compile a chemsys query, e.g. "Li-Fe-O", "Fe-O, Li-O" or "Li-*-O".
    /// Reads one query per line from stdin when QUERY is omitted.
    Chemsys { query: Option<String> },
}

fn main() {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(io::stderr)
        .init();

    let (kind, query) = match cli.command {
        Commands::Formula { query } => (QueryKind::Formula, query),
        Commands::Chemsys { query } => (QueryKind::Chemsys, query),
    };

    let result = match query {
        Some(query) => run_single(kind, &query, cli.format),
        None if io::stdin().is_terminal() => {
            eprintln!("error: no query given (pass QUERY or pipe queries on stdin)");
            process::exit(1);
        }
        None => run_lines(kind, cli.format, io::stdin().lock(), io::stdout(), io::stderr()),
    };

    if let Err(e) = result {
        // rejected queries have already been reported
        if !matches!(e, CliError::Query(_)) {
            eprintln!("error: {}", e);
        }
        process::exit(exit_code_for_error(&e));
    }
}

fn run_single(kind: QueryKind, query: &str, format: OutputFormat) -> Result<(), CliError> {
    let criteria = compile_query(kind, query).map_err(|e| {
        eprintln!("error: {}", e);
        CliError::Query(e)
    })?;
    println!("{}", render(&criteria, format)?);
    Ok(())
}
