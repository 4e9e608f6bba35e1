//! matq CLI library.
//!
//! Compiles formula and chemsys queries from the command line or stdin and
//! renders the resulting criteria. Split into modules:
//!
//! - `format`: Output rendering (JSON, pretty JSON, text)
//! - `run`: Query dispatch and exit codes

mod format;
mod run;

pub use format::{render, OutputFormat};
pub use run::{compile_query, exit_code_for_error, run_lines, CliError, QueryKind};
