//! Compositions: species → exact amount.

use crate::parser::Parser;
use crate::{is_placeholder_species, ParseError, ParseResult, Span, Species};
use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, ToPrimitive, Zero};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Molecular species whose reduced formula is conventionally written doubled.
const SPECIAL_FORMULAS: [(&str, &str); 11] = [
    ("LiO", "LiO2"),
    ("NaO", "NaO2"),
    ("KO", "KO2"),
    ("HO", "H2O2"),
    ("CsO", "CsO2"),
    ("RbO", "RbO2"),
    ("O", "O2"),
    ("N", "N2"),
    ("F", "F2"),
    ("Cl", "Cl2"),
    ("H", "H2"),
];

/// A mapping from species to a positive exact amount.
///
/// All derived quantities (ratios, reduced and anonymized formulas) are
/// computed with rationals, so two strings describing the same composition
/// always yield identical results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Composition {
    amounts: BTreeMap<Species, BigRational>,
}

impl Composition {
    /// Parse a formula such as `Fe2O3`, `Mg(OH)2` or `Li0.5CoO2`.
    pub fn parse(formula: &str) -> ParseResult<Self> {
        let terms = Parser::new(formula)?.parse_formula()?;
        let comp = Self::from_amounts(terms);
        if comp.is_empty() {
            return Err(ParseError::new(
                "formula has no species with a non-zero amount",
                Span::new(0, formula.len(), 1),
            ));
        }
        Ok(comp)
    }

    /// Build a composition, summing repeated species and dropping zero amounts.
    pub fn from_amounts(amounts: impl IntoIterator<Item = (Species, BigRational)>) -> Self {
        let mut acc: BTreeMap<Species, BigRational> = BTreeMap::new();
        for (species, amount) in amounts {
            *acc.entry(species).or_insert_with(BigRational::zero) += amount;
        }
        acc.retain(|_, amount| !amount.is_zero());
        Self { amounts: acc }
    }

    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    /// Number of distinct species.
    pub fn element_count(&self) -> usize {
        self.amounts.len()
    }

    pub fn species(&self) -> impl Iterator<Item = &Species> {
        self.amounts.keys()
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.amounts.keys().map(Species::symbol)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Species, &BigRational)> {
        self.amounts.iter()
    }

    pub fn amount(&self, symbol: &str) -> Option<&BigRational> {
        self.amounts
            .iter()
            .find(|(species, _)| species.symbol() == symbol)
            .map(|(_, amount)| amount)
    }

    pub fn total(&self) -> BigRational {
        self.amounts
            .values()
            .fold(BigRational::zero(), |acc, amount| acc + amount)
    }

    pub fn has_placeholder(&self) -> bool {
        self.amounts.keys().any(Species::is_placeholder)
    }

    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.amounts
            .keys()
            .filter(|species| species.is_placeholder())
            .map(Species::symbol)
    }

    /// Each amount as a fraction of the total. The fractions sum to exactly 1.
    pub fn reduced_ratios(&self) -> BTreeMap<Species, BigRational> {
        let total = self.total();
        self.amounts
            .iter()
            .map(|(species, amount)| (species.clone(), amount / &total))
            .collect()
    }

    /// Smallest integer formula and the factor with `self == integer × factor`.
    pub fn integer_formula_and_factor(&self) -> (String, BigRational) {
        let factor = self.gcd_amount();
        let formula = self.divided_by(&factor).formula_string();
        match special_formula(&formula) {
            Some(special) => (special.to_string(), factor / BigRational::from_integer(2.into())),
            None => (formula, factor),
        }
    }

    /// The integer formula, e.g. `Fe2O3` for `Fe4O6`.
    pub fn reduced_formula(&self) -> String {
        self.integer_formula_and_factor().0
    }

    /// The composition scaled down to its reduced formula.
    pub fn reduced_composition(&self) -> Composition {
        let (_, factor) = self.integer_formula_and_factor();
        self.divided_by(&factor)
    }

    /// Stoichiometric shape with species relabelled `A, B, C, ...` by
    /// ascending amount, e.g. `A2B3` for `Fe2O3`.
    pub fn anonymized_formula(&self) -> String {
        let reduced = self.divided_by(&self.gcd_amount());
        let mut amounts: Vec<&BigRational> = reduced.amounts.values().collect();
        amounts.sort();
        amounts
            .into_iter()
            .zip(anonymous_labels())
            .map(|(amount, label)| format!("{}{}", label, format_amount(amount)))
            .collect()
    }

    /// Largest rational dividing every amount to an integer:
    /// gcd of the numerators over lcm of the denominators.
    fn gcd_amount(&self) -> BigRational {
        let mut numer = BigInt::zero();
        let mut denom = BigInt::one();
        for amount in self.amounts.values() {
            numer = numer.gcd(amount.numer());
            denom = denom.lcm(amount.denom());
        }
        if numer.is_zero() {
            return BigRational::one();
        }
        BigRational::new(numer, denom)
    }

    fn divided_by(&self, factor: &BigRational) -> Composition {
        Composition {
            amounts: self
                .amounts
                .iter()
                .map(|(species, amount)| (species.clone(), amount / factor))
                .collect(),
        }
    }

    /// Species in ascending electronegativity; amounts of 1 omitted.
    fn formula_string(&self) -> String {
        let mut entries: Vec<(&Species, &BigRational)> = self.amounts.iter().collect();
        entries.sort_by(|(a, _), (b, _)| electronegativity_order(a, b));
        entries
            .into_iter()
            .map(|(species, amount)| format!("{}{}", species.symbol(), format_amount(amount)))
            .collect()
    }
}

impl FromStr for Composition {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Composition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formula_string())
    }
}

fn special_formula(formula: &str) -> Option<&'static str> {
    SPECIAL_FORMULAS
        .iter()
        .find(|(plain, _)| *plain == formula)
        .map(|(_, special)| *special)
}

/// Undefined electronegativities (placeholders, noble gases) sort last;
/// ties fall back to the symbol.
fn electronegativity_order(a: &Species, b: &Species) -> Ordering {
    let by_x = match (a.electronegativity(), b.electronegativity()) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_x.then_with(|| a.symbol().cmp(b.symbol()))
}

fn format_amount(amount: &BigRational) -> String {
    if amount.is_one() {
        String::new()
    } else if amount.is_integer() {
        amount.numer().to_string()
    } else {
        match amount.to_f64() {
            Some(f) => f.to_string(),
            None => amount.to_string(),
        }
    }
}

/// `A`..`Z`, then two- and three-letter placeholder symbols (`Aa`, `Ab`,
/// `Ae`, ...). Past `Z` no label is an element symbol or the prefix of one,
/// so every label parses back as its own species. Several thousand labels
/// exist, far more than the species any formula carries.
fn anonymous_labels() -> impl Iterator<Item = String> {
    let upper = || (b'A'..=b'Z').map(char::from);
    let lower = || (b'a'..=b'z').map(char::from);
    let singles = upper().map(String::from);
    let pairs = upper().flat_map(move |u| lower().map(move |l| format!("{}{}", u, l)));
    let triples = upper().flat_map(move |u| {
        lower().flat_map(move |l1| lower().map(move |l2| format!("{}{}{}", u, l1, l2)))
    });
    singles.chain(pairs.chain(triples).filter(|label| is_placeholder_species(label)))
}
