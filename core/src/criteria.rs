//! Field/predicate search criteria.
//!
//! A `Criteria` is what the formula and chemsys compilers hand to the
//! document-store layer. Field names are dotted paths (`composition_reduced.Fe`)
//! that the store resolves as nested-document lookups.

use crate::Value;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::btree_map;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A condition on a single document field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Field must equal the value.
    Equals(Value),
    /// Field must equal one member of the set.
    In(BTreeSet<Value>),
    /// Set-valued field must contain every member of the set.
    AllOf(BTreeSet<Value>),
}

impl Predicate {
    pub fn equals(value: impl Into<Value>) -> Self {
        Predicate::Equals(value.into())
    }

    pub fn one_of<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Self {
        Predicate::In(values.into_iter().map(Into::into).collect())
    }

    pub fn all_of<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Self {
        Predicate::AllOf(values.into_iter().map(Into::into).collect())
    }

    /// The Mongo-style operator name, or `None` for plain equality.
    pub fn operator(&self) -> Option<&'static str> {
        match self {
            Predicate::Equals(_) => None,
            Predicate::In(_) => Some("$in"),
            Predicate::AllOf(_) => Some("$all"),
        }
    }

    /// Get the compared value if this is an Equals predicate.
    pub fn as_equals(&self) -> Option<&Value> {
        match self {
            Predicate::Equals(v) => Some(v),
            _ => None,
        }
    }

    /// Get the member set if this is an In or AllOf predicate.
    pub fn values(&self) -> Option<&BTreeSet<Value>> {
        match self {
            Predicate::Equals(_) => None,
            Predicate::In(set) | Predicate::AllOf(set) => Some(set),
        }
    }
}

impl Serialize for Predicate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Predicate::Equals(v) => v.serialize(serializer),
            Predicate::In(set) => serialize_operator(serializer, "$in", set),
            Predicate::AllOf(set) => serialize_operator(serializer, "$all", set),
        }
    }
}

fn serialize_operator<S: Serializer>(
    serializer: S,
    operator: &str,
    set: &BTreeSet<Value>,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(1))?;
    map.serialize_entry(operator, set)?;
    map.end()
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Equals(v) => write!(f, "{}", v),
            Predicate::In(set) => write_set(f, "in", set),
            Predicate::AllOf(set) => write_set(f, "all", set),
        }
    }
}

fn write_set(f: &mut fmt::Formatter<'_>, name: &str, set: &BTreeSet<Value>) -> fmt::Result {
    write!(f, "{}[", name)?;
    for (i, v) in set.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", v)?;
    }
    write!(f, "]")
}

/// An ordered mapping from field name to predicate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    fields: BTreeMap<String, Predicate>,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the predicate for a field, replacing any previous one.
    pub fn insert(&mut self, field: impl Into<String>, predicate: Predicate) {
        self.fields.insert(field.into(), predicate);
    }

    /// Builder form of [`Criteria::insert`].
    pub fn with(mut self, field: impl Into<String>, predicate: Predicate) -> Self {
        self.insert(field, predicate);
        self
    }

    pub fn get(&self, field: &str) -> Option<&Predicate> {
        self.fields.get(field)
    }

    pub fn contains_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Predicate> {
        self.fields.iter()
    }
}

impl<'a> IntoIterator for &'a Criteria {
    type Item = (&'a String, &'a Predicate);
    type IntoIter = btree_map::Iter<'a, String, Predicate>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl FromIterator<(String, Predicate)> for Criteria {
    fn from_iter<T: IntoIterator<Item = (String, Predicate)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl Serialize for Criteria {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (field, predicate) in &self.fields {
            map.serialize_entry(field, predicate)?;
        }
        map.end()
    }
}

impl fmt::Display for Criteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (field, predicate)) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", field, predicate)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;
    use num_rational::BigRational;
    use serde_json::json;

    fn ratio(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    #[test]
    fn test_set_predicates_are_canonical() {
        assert_eq!(
            Predicate::one_of(["Fe2O3", "Al2O3", "Fe2O3"]),
            Predicate::one_of(["Al2O3", "Fe2O3"])
        );
        assert_ne!(
            Predicate::one_of(["Li", "O"]),
            Predicate::all_of(["Li", "O"])
        );
        assert_eq!(Predicate::all_of(["O", "Li"]).values().map(|s| s.len()), Some(2));
    }

    #[test]
    fn test_insert_replaces() {
        let mut crit = Criteria::new();
        crit.insert("nelements", Predicate::equals(2i64));
        crit.insert("nelements", Predicate::equals(3i64));
        assert_eq!(crit.len(), 1);
        assert_eq!(
            crit.get("nelements").and_then(Predicate::as_equals),
            Some(&Value::Int(3))
        );
    }

    #[test]
    fn test_insertion_order_irrelevant() {
        let a = Criteria::new()
            .with("nelements", Predicate::equals(2i64))
            .with("composition_reduced.O", Predicate::equals(ratio(3, 5)));
        let b = Criteria::new()
            .with("composition_reduced.O", Predicate::equals(ratio(3, 5)))
            .with("nelements", Predicate::equals(2i64));
        assert_eq!(a, b);
        assert_eq!(
            a.fields().collect::<Vec<_>>(),
            vec!["composition_reduced.O", "nelements"]
        );
    }

    #[test]
    fn test_json_rendering() {
        let crit = Criteria::new()
            .with("nelements", Predicate::equals(3i64))
            .with("elements", Predicate::all_of(["O", "Li"]))
            .with("formula_pretty", Predicate::one_of(["Fe2O3", "Al2O3"]))
            .with("composition_reduced.Fe", Predicate::equals(ratio(2, 5)));

        assert_eq!(
            serde_json::to_value(&crit).unwrap(),
            json!({
                "nelements": 3,
                "elements": {"$all": ["Li", "O"]},
                "formula_pretty": {"$in": ["Al2O3", "Fe2O3"]},
                "composition_reduced.Fe": 0.4,
            })
        );
    }

    #[test]
    fn test_set_operator_json() {
        assert_eq!(
            serde_json::to_value(Predicate::one_of([1i64, 3, 2])).unwrap(),
            json!({"$in": [1, 2, 3]})
        );
        assert_eq!(
            serde_json::to_value(Predicate::AllOf(BTreeSet::new())).unwrap(),
            json!({"$all": []})
        );
    }

    #[test]
    fn test_display() {
        let crit = Criteria::new()
            .with("chemsys", Predicate::one_of(["Fe-O", "Li-O"]))
            .with("nelements", Predicate::equals(2i64));
        assert_eq!(
            crit.to_string(),
            r#"{chemsys: in["Fe-O", "Li-O"], nelements: 2}"#
        );
        assert_eq!(Criteria::new().to_string(), "{}");
    }
}
