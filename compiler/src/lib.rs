//! matq Compiler
//!
//! Compile human-written materials queries into document-store criteria.
//!
//! Responsibilities:
//! - Split comma-separated formula and chemsys queries
//! - Select the wildcard, anonymized or concrete compilation branch
//! - Emit exact-rational composition constraints
//! - Reject malformed queries with a single `InvalidQuery` error
//!
//! Both compilers are pure functions of their input.

mod chemsys;
mod error;
pub mod fields;
mod formula;
mod split;

pub use chemsys::{canonical_chemsys, compile_chemsys};
pub use error::{InvalidQuery, QueryResult};
pub use formula::{compile_formula, DUMMY_ALPHABET};
pub use split::split_query;
