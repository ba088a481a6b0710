use rstest::rstest;

use goo::{get_value, ACCEPTANCE_TABLE};
use test_support::fixtures::{goo_suite, goo_tagged_suite};

#[rstest]
#[case::with_zero(0, 0, 0)]
#[case::with_positive(5, 5, 25)]
#[case::with_mix(5, -5, 5)]
#[case::with_negative(-5, -5, -5)]
fn test_get_value(#[case] a: i32, #[case] b: i32, #[case] expected: i64) {
    assert_eq!(get_value(a, b), expected);
}

#[rstest]
#[case::with_zero(0, 0)]
#[case::with_positive(5, 5)]
#[case::with_mix(5, -5)]
#[case::with_negative(-5, -5)]
fn test_get_value_is_deterministic(#[case] a: i32, #[case] b: i32) {
    let first = get_value(a, b);
    for _ in 0..10 {
        assert_eq!(get_value(a, b), first);
    }
}

#[test]
fn test_inputs_are_not_mutated() {
    let (a, b) = (5, -5);
    let _ = get_value(a, b);
    assert_eq!((a, b), (5, -5));
}

#[test_log::test]
fn test_plain_suite() {
    let report = goo_suite().run(get_value);
    log::info!("{}", report.to_json().unwrap());
    report.assert_success();
    assert_eq!(report.passed(), 3);
}

#[test_log::test]
fn test_tagged_suite() {
    let report = goo_tagged_suite().run(get_value);
    log::info!("{}", report.to_json().unwrap());
    report.assert_success();

    let negative = report
        .outcome("TestGetValueWithNegative")
        .expect("negative case missing");
    assert_eq!(negative.actual, Some(-5));
    assert_eq!(negative.properties["requirement"], "REQ-GOO-004");
}

#[test]
fn test_tagged_suite_matches_library_table() {
    let suite = goo_tagged_suite();
    assert_eq!(suite.cases.len(), ACCEPTANCE_TABLE.len());
    for row in ACCEPTANCE_TABLE {
        assert!(
            suite
                .cases
                .iter()
                .any(|c| c.a == row.a && c.b == row.b && c.expected == row.expected),
            "({}, {}) -> {} not covered by the tagged suite",
            row.a,
            row.b,
            row.expected
        );
    }
}

#[test]
fn test_wrong_formula_is_caught_per_case() {
    // `a == b ? a * b : a + b` fits only two of the four points.
    let report = goo_tagged_suite().run(|a, b| {
        if a == b {
            i64::from(a) * i64::from(b)
        } else {
            i64::from(a) + i64::from(b)
        }
    });

    let failed: Vec<&str> = report.failures().iter().map(|o| o.name.as_str()).collect();
    assert_eq!(
        failed,
        vec!["TestGetValueWithMix", "TestGetValueWithNegative"]
    );
    assert!(report.failures().iter().all(|o| o.properties.contains_key("requirement")));
}

#[tokio::test]
async fn test_tagged_suite_in_parallel() {
    let report = goo_tagged_suite().run_parallel(get_value).await;
    report.assert_success();
    assert_eq!(report.outcomes.len(), 4);
}
