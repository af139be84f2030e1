pub mod connectivity;
pub mod env;

pub use connectivity::ConnectivityCheck;
pub use env::EnvironmentCheck;

use async_trait::async_trait;

/// Outcome of a single check. The explanation is always present on failure;
/// on success it is whatever the check wants to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub passed: bool,
    pub explanation: Option<String>,
}

impl CheckResult {
    pub fn pass() -> Self {
        Self {
            passed: true,
            explanation: None,
        }
    }

    pub fn pass_with(explanation: impl Into<String>) -> Self {
        Self {
            passed: true,
            explanation: Some(explanation.into()),
        }
    }

    pub fn fail(explanation: impl Into<String>) -> Self {
        Self {
            passed: false,
            explanation: Some(explanation.into()),
        }
    }

    pub fn explanation(&self) -> &str {
        self.explanation.as_deref().unwrap_or("")
    }
}

#[async_trait]
pub trait Check: Send + Sync {
    fn name(&self) -> &str;

    /// Line printed before the check starts.
    fn banner(&self) -> &str;

    async fn run(&self) -> CheckResult;

    /// Status line for a finished run, glyph included.
    fn describe(&self, result: &CheckResult) -> String;

    /// Top-level summary line used when this check is the one that failed.
    fn failure_summary(&self) -> &str;

    /// Static follow-up pointers shown after a failure.
    fn hints(&self) -> &[&str] {
        &[]
    }
}
