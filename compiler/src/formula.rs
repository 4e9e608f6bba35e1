//! Formula queries → criteria.
//!
//! A query is a comma-separated list of formulas and compiles along one of
//! three branches:
//! - wildcard: a single formula with `*` standing for "any element";
//! - anonymized: formulas written with placeholder symbols (`ABC2`);
//! - concrete: ordinary formulas (`Fe2O3`, `Fe2O3, Al2O3`).

use crate::fields::{composition_reduced, FORMULA_ANONYMOUS, FORMULA_PRETTY, NELEMENTS};
use crate::split::split_query;
use crate::{InvalidQuery, QueryResult};
use matq_composition::{is_placeholder_species, Composition};
use matq_core::{Criteria, Predicate};
use tracing::{debug, trace};

/// Symbols substituted for `*`, in order. None of them is an element symbol.
pub const DUMMY_ALPHABET: [char; 11] = ['A', 'D', 'E', 'G', 'J', 'L', 'M', 'Q', 'R', 'X', 'Z'];

/// Compile a comma-separated formula query into criteria.
pub fn compile_formula(formulas: &str) -> QueryResult<Criteria> {
    let tokens = split_query(formulas);

    if formulas.contains('*') {
        if tokens.len() > 1 {
            return Err(InvalidQuery::wildcard_multiple_formulas());
        }
        return compile_wildcard(tokens[0]);
    }

    let comps = tokens
        .iter()
        .map(|formula| {
            Composition::parse(formula).map_err(|e| InvalidQuery::invalid_formula(formula, e))
        })
        .collect::<QueryResult<Vec<_>>>()?;

    if comps.iter().any(Composition::has_placeholder) {
        debug!("compiling {} anonymized formula(s)", comps.len());
        Ok(compile_anonymized(&comps))
    } else {
        debug!("compiling {} concrete formula(s)", comps.len());
        Ok(compile_concrete(&comps))
    }
}

fn compile_wildcard(formula: &str) -> QueryResult<Criteria> {
    let nstars = formula.matches('*').count();
    if nstars > DUMMY_ALPHABET.len() {
        return Err(InvalidQuery::too_many_wildcards(nstars, DUMMY_ALPHABET.len()));
    }
    debug!("compiling wildcard formula with {} wildcard(s)", nstars);

    // A literal placeholder could merge with a substituted dummy (`A*` -> `AA`).
    if let Some(explicit) = explicit_placeholder(formula) {
        return Err(InvalidQuery::malformed_wildcard(formula, explicit));
    }

    let used: Vec<String> = DUMMY_ALPHABET[..nstars]
        .iter()
        .map(char::to_string)
        .collect();
    let mut dummies = DUMMY_ALPHABET.iter();
    let substituted: String = formula
        .chars()
        .map(|c| match c {
            '*' => dummies.next().copied().unwrap_or(c),
            _ => c,
        })
        .collect();
    trace!("substituted wildcards: {} -> {}", formula, substituted);

    let comp = Composition::parse(&substituted)
        .map_err(|e| InvalidQuery::invalid_formula(formula, e))?;

    // Each wildcard must survive as its own placeholder, and no other
    // placeholder may appear (e.g. `*e` lexes as the symbol `Ae`).
    if let Some(stray) = comp.placeholders().find(|p| !used.iter().any(|u| u.as_str() == *p)) {
        return Err(InvalidQuery::malformed_wildcard(formula, stray));
    }
    if let Some(missing) = used.iter().find(|u| comp.amount(u).is_none()) {
        return Err(InvalidQuery::malformed_wildcard(formula, missing));
    }

    let (integer_formula, _) = comp.integer_formula_and_factor();
    let reduced = Composition::parse(&integer_formula)?;

    let mut crit = Criteria::new().with(
        FORMULA_ANONYMOUS,
        Predicate::equals(reduced.anonymized_formula()),
    );
    for (species, ratio) in reduced.reduced_ratios() {
        if !species.is_placeholder() {
            crit.insert(composition_reduced(species.symbol()), Predicate::equals(ratio));
        }
    }
    Ok(crit)
}

/// First placeholder symbol written out in `formula` itself, ignoring `*`.
fn explicit_placeholder(formula: &str) -> Option<&str> {
    let mut chars = formula.char_indices().peekable();
    while let Some((start, c)) = chars.next() {
        if !c.is_ascii_uppercase() {
            continue;
        }
        let mut end = start + c.len_utf8();
        while let Some(&(i, next)) = chars.peek() {
            if !next.is_ascii_lowercase() {
                break;
            }
            end = i + next.len_utf8();
            chars.next();
        }
        let symbol = &formula[start..end];
        if is_placeholder_species(symbol) {
            return Some(symbol);
        }
    }
    None
}

fn compile_anonymized(comps: &[Composition]) -> Criteria {
    let predicate = match comps {
        [comp] => Predicate::equals(comp.anonymized_formula()),
        _ => Predicate::one_of(comps.iter().map(Composition::anonymized_formula)),
    };
    Criteria::new().with(FORMULA_ANONYMOUS, predicate)
}

fn compile_concrete(comps: &[Composition]) -> Criteria {
    match comps {
        [comp] => {
            let mut crit =
                Criteria::new().with(NELEMENTS, Predicate::equals(comp.element_count()));
            for (species, ratio) in comp.reduced_ratios() {
                crit.insert(composition_reduced(species.symbol()), Predicate::equals(ratio));
            }
            crit
        }
        _ => Criteria::new().with(
            FORMULA_PRETTY,
            Predicate::one_of(comps.iter().map(Composition::reduced_formula)),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matq_core::Value;
    use num_bigint::BigInt;
    use num_rational::BigRational;

    fn r(n: i64, d: i64) -> Predicate {
        Predicate::equals(BigRational::new(BigInt::from(n), BigInt::from(d)))
    }

    #[test]
    fn test_concrete_single() {
        let crit = compile_formula("Fe2O3").unwrap();
        assert_eq!(
            crit,
            Criteria::new()
                .with("nelements", Predicate::equals(2i64))
                .with("composition_reduced.Fe", r(2, 5))
                .with("composition_reduced.O", r(3, 5))
        );
    }

    #[test]
    fn test_concrete_multiple() {
        let crit = compile_formula("Fe2O3, Al2O3").unwrap();
        assert_eq!(
            crit,
            Criteria::new().with("formula_pretty", Predicate::one_of(["Fe2O3", "Al2O3"]))
        );
        // pretty formulas are reduced
        let crit = compile_formula("Fe4O6,O3Al2").unwrap();
        assert_eq!(
            crit.get("formula_pretty"),
            Some(&Predicate::one_of(["Fe2O3", "Al2O3"]))
        );
    }

    #[test]
    fn test_anonymized() {
        assert_eq!(
            compile_formula("ABC2").unwrap(),
            Criteria::new().with("formula_anonymous", Predicate::equals("ABC2"))
        );
        assert_eq!(
            compile_formula("A2B3, ABC3").unwrap(),
            Criteria::new().with("formula_anonymous", Predicate::one_of(["A2B3", "ABC3"]))
        );
    }

    #[test]
    fn test_one_anonymized_token_anonymizes_all() {
        assert_eq!(
            compile_formula("Fe2O3, AB").unwrap(),
            Criteria::new().with("formula_anonymous", Predicate::one_of(["A2B3", "AB"]))
        );
    }

    #[test]
    fn test_wildcard() {
        let crit = compile_formula("*2O3").unwrap();
        assert_eq!(
            crit,
            Criteria::new()
                .with("formula_anonymous", Predicate::equals("A2B3"))
                .with("composition_reduced.O", r(3, 5))
        );
    }

    #[test]
    fn test_wildcard_reduces_first() {
        let crit = compile_formula("Li2*2O4").unwrap();
        assert_eq!(
            crit,
            Criteria::new()
                .with("formula_anonymous", Predicate::equals("ABC2"))
                .with("composition_reduced.Li", r(1, 4))
                .with("composition_reduced.O", r(1, 2))
        );
    }

    #[test]
    fn test_all_wildcards() {
        let crit = compile_formula("**2").unwrap();
        assert_eq!(
            crit,
            Criteria::new().with("formula_anonymous", Predicate::equals("AB2"))
        );
    }

    #[test]
    fn test_wildcard_requires_single_formula() {
        let err = compile_formula("*O2, *O3").unwrap_err();
        assert_eq!(err, InvalidQuery::wildcard_multiple_formulas());
    }

    #[test]
    fn test_wildcard_capacity() {
        assert!(compile_formula(&"*".repeat(11)).is_ok());
        let err = compile_formula(&"*".repeat(12)).unwrap_err();
        assert_eq!(err, InvalidQuery::too_many_wildcards(12, 11));
    }

    #[test]
    fn test_wildcard_must_be_whole_symbol() {
        let err = compile_formula("*e2O3").unwrap_err();
        assert!(err.message.contains("'Ae'"), "{}", err);
        assert!(compile_formula("*Xa").is_err());
        assert!(compile_formula("*0O").is_err());
    }

    #[test]
    fn test_wildcard_rejects_explicit_placeholders() {
        let cases = [
            ("A*", "A"),
            ("*A", "A"),
            ("A*B*", "A"),
            ("D*", "D"),
            ("Fe*Xa2", "Xa"),
        ];
        for (formula, symbol) in cases {
            assert_eq!(
                compile_formula(formula).unwrap_err(),
                InvalidQuery::malformed_wildcard(formula, symbol),
                "{}",
                formula
            );
        }
    }

    #[test]
    fn test_explicit_placeholder_scan() {
        assert_eq!(explicit_placeholder("Li*O2"), None);
        assert_eq!(explicit_placeholder("*e2O3"), None);
        assert_eq!(explicit_placeholder("Fe(*Xa)2"), Some("Xa"));
        assert_eq!(explicit_placeholder("B*E"), Some("E"));
    }

    #[test]
    fn test_parse_errors_propagate() {
        let err = compile_formula("Fe2O3, Bq").unwrap_err();
        assert_eq!(
            err.message,
            "invalid formula 'Bq': unknown element symbol 'Bq'"
        );
        assert!(err.parse_error.is_some());
        assert!(compile_formula("").is_err());
        assert!(compile_formula("Fe2O3,").is_err());
        assert!(compile_formula("*(").is_err());
    }

    #[test]
    fn test_nelements_is_int() {
        let crit = compile_formula("LiFePO4").unwrap();
        assert_eq!(
            crit.get("nelements").and_then(Predicate::as_equals),
            Some(&Value::Int(4))
        );
        assert_eq!(crit.len(), 5);
    }
}
