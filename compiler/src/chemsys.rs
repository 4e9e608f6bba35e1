//! Chemical-system queries → criteria.

use crate::fields::{CHEMSYS, ELEMENTS, NELEMENTS};
use crate::split::split_query;
use crate::{InvalidQuery, QueryResult};
use matq_composition::Element;
use matq_core::{Criteria, Predicate};
use tracing::debug;

const WILDCARD: &str = "*";

/// Compile a comma-separated chemsys query (`Li-Fe-O, Fe-O`) into criteria.
pub fn compile_chemsys(chemsys: &str) -> QueryResult<Criteria> {
    let tokens = split_query(chemsys);

    if chemsys.contains('*') {
        if tokens.len() > 1 {
            return Err(InvalidQuery::wildcard_multiple_chemsys());
        }
        let positions = split_positions(tokens[0])?;
        let pinned: Vec<&str> = positions
            .iter()
            .copied()
            .filter(|p| *p != WILDCARD)
            .collect();
        debug!(
            "compiling wildcard chemsys: {} position(s), {} pinned",
            positions.len(),
            pinned.len()
        );

        let mut crit = Criteria::new().with(NELEMENTS, Predicate::equals(positions.len()));
        if !pinned.is_empty() {
            crit.insert(ELEMENTS, Predicate::all_of(pinned));
        }
        return Ok(crit);
    }

    let keys = tokens
        .iter()
        .map(|token| canonical_chemsys(token))
        .collect::<QueryResult<Vec<_>>>()?;
    debug!("compiling {} chemsys value(s)", keys.len());

    let predicate = match keys.as_slice() {
        [key] => Predicate::equals(key.as_str()),
        _ => Predicate::one_of(keys),
    };
    Ok(Criteria::new().with(CHEMSYS, predicate))
}

/// Sorted, deduplicated `-`-joined form of a chemsys, e.g. `Fe-Li-O`.
pub fn canonical_chemsys(chemsys: &str) -> QueryResult<String> {
    let mut elements = split_positions(chemsys)?;
    elements.sort_unstable();
    elements.dedup();
    Ok(elements.join("-"))
}

/// Trimmed `-`-separated positions; each is an element symbol or `*`.
fn split_positions(chemsys: &str) -> QueryResult<Vec<&str>> {
    chemsys
        .split('-')
        .map(str::trim)
        .map(|p| {
            if p.is_empty() {
                Err(InvalidQuery::empty_chemsys_element(chemsys))
            } else if p == WILDCARD || Element::from_symbol(p).is_some() {
                Ok(p)
            } else {
                Err(InvalidQuery::unknown_chemsys_element(chemsys, p))
            }
        })
        .collect()
}
