//! matq Core Types
//!
//! This crate provides the query values shared by the criteria compilers and
//! the document-store layer that consumes them:
//! - Scalar values (the Value enum: integers, exact rationals, strings)
//! - Predicates (Equals, In, AllOf)
//! - Criteria, the ordered field → predicate mapping
//!
//! Criteria serialize to Mongo-style JSON through `serde`.

mod criteria;
mod value;

pub use criteria::*;
pub use value::*;
