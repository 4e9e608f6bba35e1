//! Species: real elements and placeholder symbols.

use crate::Element;
use std::fmt;

/// One site label in a composition.
///
/// Placeholders (`A`, `Xa`, ...) stand in for "some element" in anonymized
/// formulas. They sort after every real element.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Species {
    Element(Element),
    Placeholder(String),
}

impl Species {
    /// Resolve a symbol to a real element or a placeholder.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        if let Some(el) = Element::from_symbol(symbol) {
            Some(Species::Element(el))
        } else if is_placeholder_species(symbol) {
            Some(Species::Placeholder(symbol.to_string()))
        } else {
            None
        }
    }

    pub fn symbol(&self) -> &str {
        match self {
            Species::Element(el) => el.symbol(),
            Species::Placeholder(s) => s,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Species::Placeholder(_))
    }

    pub fn as_element(&self) -> Option<Element> {
        match self {
            Species::Element(el) => Some(*el),
            Species::Placeholder(_) => None,
        }
    }

    /// Pauling electronegativity; always `None` for placeholders.
    pub fn electronegativity(&self) -> Option<f64> {
        self.as_element().and_then(Element::electronegativity)
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Returns true if `symbol` names a placeholder rather than a real element.
///
/// A placeholder has element-symbol shape (`[A-Z][a-z]*`), is not an element,
/// and neither its one- nor two-character prefix is an element either, so it
/// can never be misread as an element followed by lowercase noise.
pub fn is_placeholder_species(symbol: &str) -> bool {
    let mut chars = symbol.chars();
    match chars.next() {
        Some(c) if c.is_ascii_uppercase() => {}
        _ => return false,
    }
    if !chars.all(|c| c.is_ascii_lowercase()) {
        return false;
    }
    // symbol is ASCII from here on, so byte slicing is safe
    (1..=symbol.len().min(2)).all(|i| Element::from_symbol(&symbol[..i]).is_none())
}
