//! Query dispatch and exit codes.

use std::io::{BufRead, Write};

use matq_compiler::{compile_chemsys, compile_formula, InvalidQuery, QueryResult};
use matq_core::Criteria;
use thiserror::Error;
use tracing::{debug, warn};

use crate::format::{render, OutputFormat};

/// Which compiler a query goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    Formula,
    Chemsys,
}

/// Errors surfaced by the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Query(#[from] InvalidQuery),

    #[error("failed to render criteria: {0}")]
    Render(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Process exit code for an error: 2 for rejected queries, 1 otherwise.
pub fn exit_code_for_error(err: &CliError) -> i32 {
    match err {
        CliError::Query(_) => 2,
        CliError::Render(_) | CliError::Io(_) => 1,
    }
}

/// Compile a single query with the compiler for `kind`.
pub fn compile_query(kind: QueryKind, query: &str) -> QueryResult<Criteria> {
    debug!("compiling {:?} query '{}'", kind, query);
    match kind {
        QueryKind::Formula => compile_formula(query),
        QueryKind::Chemsys => compile_chemsys(query),
    }
}

/// Compile one query per non-blank input line, writing one rendering per line.
///
/// Rejected queries are reported on `err` and do not stop processing; the
/// first rejection is returned once all lines are done.
pub fn run_lines(
    kind: QueryKind,
    format: OutputFormat,
    input: impl BufRead,
    mut out: impl Write,
    mut err: impl Write,
) -> Result<(), CliError> {
    let mut first_rejection = None;

    for line in input.lines() {
        let line = line?;
        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        match compile_query(kind, query) {
            Ok(criteria) => writeln!(out, "{}", render(&criteria, format)?)?,
            Err(e) => {
                warn!("rejected query '{}': {}", query, e);
                writeln!(err, "error: {}", e)?;
                first_rejection.get_or_insert(e);
            }
        }
    }

    match first_rejection {
        Some(e) => Err(CliError::Query(e)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_compile_query_dispatch() {
        let crit = compile_query(QueryKind::Chemsys, "O-Fe").unwrap();
        assert!(crit.contains_field("chemsys"));
        let crit = compile_query(QueryKind::Formula, "Fe2O3").unwrap();
        assert!(crit.contains_field("nelements"));
    }

    #[test]
    fn test_run_lines() {
        let input = "O-Fe\n\n  Li-*-O \n";
        let mut out = Vec::new();
        let mut err = Vec::new();
        run_lines(QueryKind::Chemsys, OutputFormat::Json, input.as_bytes(), &mut out, &mut err)
            .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\"chemsys\":\"Fe-O\"}\n{\"elements\":{\"$all\":[\"Li\",\"O\"]},\"nelements\":3}\n"
        );
        assert!(err.is_empty());
    }

    #[test]
    fn test_run_lines_reports_rejections() {
        let input = "*O2, *O3\nFe2O3\n";
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = run_lines(
            QueryKind::Formula,
            OutputFormat::Text,
            input.as_bytes(),
            &mut out,
            &mut err,
        );
        let e = result.unwrap_err();
        assert_eq!(exit_code_for_error(&e), 2);
        assert_eq!(
            String::from_utf8(err).unwrap(),
            "error: wildcards only supported for single-formula queries\n"
        );
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{composition_reduced.Fe: 2/5, composition_reduced.O: 3/5, nelements: 2}\n"
        );
    }
}
