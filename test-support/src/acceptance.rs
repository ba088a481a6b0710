//! Example-based acceptance harness.
//!
//! A suite is a named list of literal `(a, b) -> expected` cases. Each case
//! may carry free-form key/value properties (requirement tags and the like)
//! that travel with its outcome into the report. Cases are evaluated
//! independently: a wrong value or a panic fails only the case that caused it.

use std::{
    collections::BTreeMap,
    fmt,
    panic::{self, AssertUnwindSafe},
    sync::Arc,
};

use futures::future::join_all;
use serde::Serialize;

/// Property key used for requirement identifiers.
pub const REQUIREMENT_KEY: &str = "requirement";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptanceCase {
    pub name: String,
    pub a: i32,
    pub b: i32,
    pub expected: i64,
    pub properties: BTreeMap<String, String>,
}

impl AcceptanceCase {
    pub fn new(name: impl Into<String>, a: i32, b: i32, expected: i64) -> Self {
        Self {
            name: name.into(),
            a,
            b,
            expected,
            properties: BTreeMap::new(),
        }
    }

    /// Attach a property. A later value for the same key replaces the earlier one.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Attach a requirement tag.
    pub fn requirement(self, id: impl Into<String>) -> Self {
        self.with_property(REQUIREMENT_KEY, id)
    }

    fn outcome(&self, actual: Result<i64, String>) -> CaseOutcome {
        let (actual, panic) = match actual {
            Ok(value) => (Some(value), None),
            Err(message) => (None, Some(message)),
        };
        let status = if actual == Some(self.expected) {
            CaseStatus::Passed
        } else {
            CaseStatus::Failed
        };
        CaseOutcome {
            name: self.name.clone(),
            status,
            a: self.a,
            b: self.b,
            expected: self.expected,
            actual,
            panic,
            properties: self.properties.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseStatus {
    Passed,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseOutcome {
    pub name: String,
    pub status: CaseStatus,
    pub a: i32,
    pub b: i32,
    pub expected: i64,
    /// `None` when the function panicked.
    pub actual: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub panic: Option<String>,
    pub properties: BTreeMap<String, String>,
}

impl CaseOutcome {
    pub fn passed(&self) -> bool {
        self.status == CaseStatus::Passed
    }
}

impl fmt::Display for CaseOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: get_value({}, {})", self.name, self.a, self.b)?;
        match (&self.actual, &self.panic) {
            (Some(actual), _) => write!(f, " = {}, expected {}", actual, self.expected)?,
            (None, Some(message)) => write!(f, " panicked: {}", message)?,
            (None, None) => write!(f, " produced no value")?,
        }
        for (key, value) in &self.properties {
            write!(f, " [{}={}]", key, value)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct AcceptanceSuite {
    pub name: String,
    pub cases: Vec<AcceptanceCase>,
}

impl AcceptanceSuite {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cases: Vec::new(),
        }
    }

    pub fn case(mut self, case: AcceptanceCase) -> Self {
        self.cases.push(case);
        self
    }

    pub fn find(&self, name: &str) -> Option<&AcceptanceCase> {
        self.cases.iter().find(|case| case.name == name)
    }

    /// Evaluate every case in order on the current thread.
    pub fn run<F>(&self, f: F) -> SuiteReport
    where
        F: Fn(i32, i32) -> i64,
    {
        let outcomes = self
            .cases
            .iter()
            .map(|case| case.outcome(call_isolated(&f, case.a, case.b)))
            .collect();

        SuiteReport {
            suite: self.name.clone(),
            outcomes,
        }
    }

    /// Evaluate every case on its own blocking task, all at once.
    /// Outcomes keep the suite's case order.
    pub async fn run_parallel<F>(&self, f: F) -> SuiteReport
    where
        F: Fn(i32, i32) -> i64 + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        let tasks = self.cases.iter().map(|case| {
            let f = Arc::clone(&f);
            let (a, b) = (case.a, case.b);
            tokio::task::spawn_blocking(move || call_isolated(f.as_ref(), a, b))
        });

        let outcomes = join_all(tasks)
            .await
            .into_iter()
            .zip(&self.cases)
            .map(|(joined, case)| {
                let actual = joined.unwrap_or_else(|e| Err(format!("task failed: {}", e)));
                case.outcome(actual)
            })
            .collect();

        SuiteReport {
            suite: self.name.clone(),
            outcomes,
        }
    }
}

fn call_isolated<F>(f: &F, a: i32, b: i32) -> Result<i64, String>
where
    F: Fn(i32, i32) -> i64 + ?Sized,
{
    panic::catch_unwind(AssertUnwindSafe(|| f(a, b))).map_err(|payload| {
        if let Some(message) = payload.downcast_ref::<&str>() {
            message.to_string()
        } else if let Some(message) = payload.downcast_ref::<String>() {
            message.clone()
        } else {
            "non-string panic payload".to_string()
        }
    })
}

#[derive(Debug, Clone)]
pub struct SuiteReport {
    pub suite: String,
    pub outcomes: Vec<CaseOutcome>,
}

/// JSON shape of a rendered report.
#[derive(Serialize)]
struct ReportDocument<'a> {
    suite: &'a str,
    tests: usize,
    failures: usize,
    cases: &'a [CaseOutcome],
}

impl SuiteReport {
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    pub fn failures(&self) -> Vec<&CaseOutcome> {
        self.outcomes.iter().filter(|o| !o.passed()).collect()
    }

    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(CaseOutcome::passed)
    }

    pub fn outcome(&self, name: &str) -> Option<&CaseOutcome> {
        self.outcomes.iter().find(|o| o.name == name)
    }

    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(ReportDocument {
            suite: &self.suite,
            tests: self.outcomes.len(),
            failures: self.outcomes.len() - self.passed(),
            cases: &self.outcomes,
        })
    }

    /// Panic with every failing case if any case failed.
    pub fn assert_success(&self) {
        let failures = self.failures();
        if failures.is_empty() {
            return;
        }
        let lines: Vec<String> = failures.iter().map(|o| format!("  {}", o)).collect();
        panic!(
            "{}: {} of {} case(s) failed\n{}",
            self.suite,
            failures.len(),
            self.outcomes.len(),
            lines.join("\n")
        );
    }
}
