//! Property tests for evaluation over uncertain values.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use murk_eval::{Session, Ternary, Value};
use proptest::prelude::*;

fn session() -> Session {
    Session::builder().prelude(false).build().unwrap()
}

/// Writes `n` as an integer, a float or an unreduced ratio. Zero as a float
/// is written negative.
fn written(n: i64, form: usize) -> String {
    match form {
        0 => n.to_string(),
        1 if n == 0 => "-0.0".to_string(),
        1 => format!("{n}.0"),
        _ => format!("{}/2", n * 2),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Adding to a disjunction adds to every candidate.
    #[test]
    fn addition_distributes_over_candidates(a in -1000i64..1000, b in -1000i64..1000, c in -1000i64..1000) {
        let result = session()
            .eval_str(&format!("(candidates (+ {a} (any-of {b} {c})))"))
            .unwrap();
        let candidates = result.to_vec().unwrap();
        prop_assert!(candidates.contains(&Value::int(a + b)));
        prop_assert!(candidates.contains(&Value::int(a + c)));
        prop_assert!(candidates.len() <= 2);
    }

    /// Equality with a disjunction is definite exactly when the candidates
    /// agree on the answer, whatever representation each number is written in.
    #[test]
    fn equality_with_candidates(
        x in 0i64..5, b in 0i64..5, c in 0i64..5,
        forms in (0usize..3, 0usize..3, 0usize..3),
    ) {
        let result = session()
            .eval_str(&format!(
                "(= {} (any-of {} {}))",
                written(x, forms.0),
                written(b, forms.1),
                written(c, forms.2),
            ))
            .unwrap();
        let expected = match (x == b, x == c) {
            (true, true) => Ternary::True,
            (false, false) => Ternary::False,
            _ => Ternary::Maybe,
        };
        prop_assert_eq!(result.as_ternary(), Some(expected));
    }

    /// A value inside a closed range compares the same way as the range
    /// against anything outside it.
    #[test]
    fn range_comparison_outside_bounds(lo in -100i64..100, width in 0i64..50, gap in 1i64..50) {
        let hi = lo + width;
        let above = hi + gap;
        let result = session()
            .eval_str(&format!("(< (num-in-range {lo} {hi}) {above})"))
            .unwrap();
        prop_assert_eq!(result, Value::boolean(true));
    }
}
