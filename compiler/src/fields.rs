//! Document field names the compilers emit.

/// Number of distinct elements in a material.
pub const NELEMENTS: &str = "nelements";
/// Set of element symbols in a material.
pub const ELEMENTS: &str = "elements";
/// Canonical (sorted, `-`-joined) chemical system.
pub const CHEMSYS: &str = "chemsys";
pub const FORMULA_ANONYMOUS: &str = "formula_anonymous";
pub const FORMULA_PRETTY: &str = "formula_pretty";

/// Nested field holding the reduced fraction of one element.
pub fn composition_reduced(symbol: &str) -> String {
    format!("composition_reduced.{}", symbol)
}
