//! matq Composition
//!
//! Chemical formula decomposition for query compilation:
//! - Periodic table lookup (symbols, atomic numbers, electronegativity)
//! - Species, including placeholder symbols used by anonymized formulas
//! - Formula parsing with nested groups and exact decimal amounts
//! - Derived facts: reduced ratios, integer formulas, anonymized formulas

mod composition;
mod element;
mod error;
mod lexer;
mod parser;
mod species;

pub use composition::Composition;
pub use element::Element;
pub use error::*;
pub use species::{is_placeholder_species, Species};
