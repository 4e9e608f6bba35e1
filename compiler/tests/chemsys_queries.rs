//! Chemical-system query integration tests.

use matq_compiler::{canonical_chemsys, compile_chemsys, InvalidQuery};
use matq_core::{Criteria, Predicate};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

mod canonical {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_single_chemsys() {
        assert_eq!(
            compile_chemsys("O-Fe-Li").unwrap(),
            Criteria::new().with("chemsys", Predicate::equals("Fe-Li-O"))
        );
    }

    #[test]
    fn test_order_invariance() {
        assert_eq!(
            compile_chemsys("Li-Fe-O").unwrap(),
            compile_chemsys("Fe-O-Li").unwrap()
        );

        let mut elements = vec!["Li", "Fe", "Mn", "P", "O", "Co"];
        let expected = compile_chemsys(&elements.join("-")).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            elements.shuffle(&mut rng);
            assert_eq!(compile_chemsys(&elements.join("-")).unwrap(), expected);
        }
    }

    #[test]
    fn test_idempotence() {
        for query in ["O-Fe-Li", "Si", "Zr-O-Ba-Ti", "O-O-Fe"] {
            let key = canonical_chemsys(query).unwrap();
            assert_eq!(canonical_chemsys(&key).unwrap(), key);
            assert_eq!(
                compile_chemsys(&key).unwrap(),
                compile_chemsys(query).unwrap()
            );
        }
    }

    #[test]
    fn test_multiple_chemsys() {
        assert_eq!(
            compile_chemsys("O-Li, Fe-O,O-Fe").unwrap(),
            Criteria::new().with("chemsys", Predicate::one_of(["Li-O", "Fe-O"]))
        );
    }
}

mod wildcard {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_wildcard_chemsys() {
        assert_eq!(
            compile_chemsys("Li-*-O").unwrap(),
            Criteria::new()
                .with("nelements", Predicate::equals(3i64))
                .with("elements", Predicate::all_of(["Li", "O"]))
        );
    }

    #[test]
    fn test_wildcard_position_order_is_irrelevant() {
        assert_eq!(
            compile_chemsys("*-O-Li").unwrap(),
            compile_chemsys("Li-*-O").unwrap()
        );
    }

    #[test]
    fn test_only_wildcards() {
        assert_eq!(
            compile_chemsys("*-*-*").unwrap(),
            Criteria::new().with("nelements", Predicate::equals(3i64))
        );
    }

    #[test]
    fn test_multiple_wildcard_chemsys_fail() {
        let err = compile_chemsys("*-O, *-N").unwrap_err();
        assert_eq!(err, InvalidQuery::wildcard_multiple_chemsys());
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_json_rendering() {
        let crit = compile_chemsys("Li-*-O").unwrap();
        assert_eq!(
            serde_json::to_value(&crit).unwrap(),
            serde_json::json!({"nelements": 3, "elements": {"$all": ["Li", "O"]}})
        );
    }
}
