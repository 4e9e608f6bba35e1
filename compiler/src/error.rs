//! Query compilation errors.

use matq_composition::ParseError;
use thiserror::Error;

/// Result type for query compilation.
pub type QueryResult<T> = Result<T, InvalidQuery>;

/// A formula or chemsys query the compilers refuse.
///
/// Every failure is a deterministic input-validation error; the request
/// layer reports it verbatim as a client error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct InvalidQuery {
    pub message: String,
    #[source]
    pub parse_error: Option<ParseError>,
}

impl InvalidQuery {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            parse_error: None,
        }
    }

    pub fn wildcard_multiple_formulas() -> Self {
        Self::new("wildcards only supported for single-formula queries")
    }

    pub fn wildcard_multiple_chemsys() -> Self {
        Self::new("wildcards only supported for single-chemsys queries")
    }

    pub fn too_many_wildcards(count: usize, capacity: usize) -> Self {
        Self::new(format!(
            "too many wildcards: {} given, at most {} supported",
            count, capacity
        ))
    }

    pub fn malformed_wildcard(formula: &str, symbol: &str) -> Self {
        Self::new(format!(
            "invalid wildcard formula '{}': '{}' is not a wildcard position",
            formula, symbol
        ))
    }

    pub fn invalid_formula(formula: &str, err: ParseError) -> Self {
        Self {
            message: format!("invalid formula '{}': {}", formula, err.message),
            parse_error: Some(err),
        }
    }

    pub fn empty_chemsys_element(chemsys: &str) -> Self {
        Self::new(format!("invalid chemsys '{}': empty element", chemsys))
    }

    pub fn unknown_chemsys_element(chemsys: &str, symbol: &str) -> Self {
        Self::new(format!(
            "invalid chemsys '{}': unknown element symbol '{}'",
            chemsys, symbol
        ))
    }

    /// HTTP status the request layer should answer with.
    pub fn status_code(&self) -> u16 {
        400
    }
}

impl From<ParseError> for InvalidQuery {
    fn from(err: ParseError) -> Self {
        Self {
            message: format!("invalid formula: {}", err.message),
            parse_error: Some(err),
        }
    }
}
