pub mod acceptance;
pub mod fixtures;
pub mod test_client;
pub mod timeouts;

// Re-export commonly used items
pub use acceptance::{AcceptanceCase, AcceptanceSuite, CaseOutcome, CaseStatus, SuiteReport};
pub use test_client::MCPTestClient;

/// Check if running in CI environment.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
}
