use crate::acceptance::{AcceptanceCase, AcceptanceSuite};

/// Suite name shared by the plain and tagged suites.
pub const GOO_SUITE: &str = "GooTest";

/// The plain suite: three literal cases, no tags.
pub fn goo_suite() -> AcceptanceSuite {
    AcceptanceSuite::new(GOO_SUITE)
        .case(AcceptanceCase::new("TestGetValueWithZero", 0, 0, 0))
        .case(AcceptanceCase::new("TestGetValueWithPositive", 5, 5, 25))
        .case(AcceptanceCase::new("TestGetValueWithMix", 5, -5, 5))
}

/// The tagged suite: the plain cases plus the all-negative case, each
/// carrying a requirement tag.
pub fn goo_tagged_suite() -> AcceptanceSuite {
    let requirements = ["REQ-GOO-001", "REQ-GOO-002", "REQ-GOO-003"];

    let mut suite = AcceptanceSuite::new(GOO_SUITE);
    for (case, requirement) in goo_suite().cases.into_iter().zip(requirements) {
        suite = suite.case(case.requirement(requirement));
    }
    suite.case(
        AcceptanceCase::new("TestGetValueWithNegative", -5, -5, -5).requirement("REQ-GOO-004"),
    )
}
