use crate::{
    checks::{Check, CheckResult},
    PreflightError,
};
use std::io::Write;
use tracing::{debug, info};

const TITLE: &str = "🔍 Testing Retell Custom LLM Setup...";
const RULE_WIDTH: usize = 50;
const HINTS_HEADER: &str = "If Retell is still not responding, check:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Completed(CheckResult),
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckRecord {
    pub name: String,
    pub outcome: Outcome,
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub records: Vec<CheckRecord>,
    pub summary: String,
}

impl RunReport {
    pub fn all_passed(&self) -> bool {
        self.records
            .iter()
            .all(|record| matches!(&record.outcome, Outcome::Completed(r) if r.passed))
    }

    pub fn result(&self, name: &str) -> Option<&Outcome> {
        self.records
            .iter()
            .find(|record| record.name == name)
            .map(|record| &record.outcome)
    }
}

/// Ordered list of dependent checks. Each check runs only if every earlier
/// one passed.
pub struct Runner {
    checks: Vec<Box<dyn Check>>,
}

impl Default for Runner {
    fn default() -> Self {
        Self::new()
    }
}

impl Runner {
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    pub fn register(&mut self, check: Box<dyn Check>) {
        debug!("Registering check: {}", check.name());
        self.checks.push(check);
    }

    pub fn list_checks(&self) -> Vec<String> {
        self.checks.iter().map(|check| check.name().to_string()).collect()
    }

    /// Runs the pipeline and prints the report to `out`. Check failures are
    /// part of the report; only a failing writer produces an error.
    pub async fn run(&self, out: &mut dyn Write) -> Result<RunReport, PreflightError> {
        writeln!(out, "{}", TITLE)?;
        writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;

        let mut records = Vec::with_capacity(self.checks.len());
        let mut failed: Option<&dyn Check> = None;

        for check in &self.checks {
            if failed.is_some() {
                debug!("Skipping check {}", check.name());
                records.push(CheckRecord {
                    name: check.name().to_string(),
                    outcome: Outcome::Skipped,
                });
                continue;
            }

            writeln!(out, "{}", check.banner())?;
            let result = check.run().await;
            writeln!(out, "{}", check.describe(&result))?;
            writeln!(out)?;
            info!("Check {} passed: {}", check.name(), result.passed);

            if !result.passed {
                failed = Some(&**check);
            }
            records.push(CheckRecord {
                name: check.name().to_string(),
                outcome: Outcome::Completed(result),
            });
        }

        let summary = match failed {
            Some(check) => {
                write_hints(out, check.hints())?;
                check.failure_summary().to_string()
            }
            None => success_summary(self.checks.len()),
        };
        writeln!(out, "{}", summary)?;
        out.flush()?;

        Ok(RunReport { records, summary })
    }
}

fn write_hints(out: &mut dyn Write, hints: &[&str]) -> std::io::Result<()> {
    if hints.is_empty() {
        return Ok(());
    }
    writeln!(out, "{}", HINTS_HEADER)?;
    for (i, hint) in hints.iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, hint)?;
    }
    writeln!(out)
}

fn success_summary(count: usize) -> String {
    match count {
        2 => "🎉 Both checks passed! Your setup should be working.".to_string(),
        n => format!("🎉 All {} checks passed! Your setup should be working.", n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FixedCheck {
        name: &'static str,
        passed: bool,
    }

    #[async_trait]
    impl Check for FixedCheck {
        fn name(&self) -> &str {
            self.name
        }

        fn banner(&self) -> &str {
            "Testing fixed..."
        }

        async fn run(&self) -> CheckResult {
            if self.passed {
                CheckResult::pass()
            } else {
                CheckResult::fail("nope")
            }
        }

        fn describe(&self, result: &CheckResult) -> String {
            format!("{} -> {}", self.name, result.passed)
        }

        fn failure_summary(&self) -> &str {
            "fixed failed"
        }

        fn hints(&self) -> &[&str] {
            &["look here"]
        }
    }

    #[tokio::test]
    async fn test_stops_at_first_failure() {
        let mut runner = Runner::new();
        runner.register(Box::new(FixedCheck { name: "a", passed: false }));
        runner.register(Box::new(FixedCheck { name: "b", passed: true }));

        let mut out = Vec::new();
        let report = runner.run(&mut out).await.unwrap();
        let printed = String::from_utf8(out).unwrap();

        assert!(!report.all_passed());
        assert_eq!(report.result("b"), Some(&Outcome::Skipped));
        assert_eq!(report.summary, "fixed failed");
        assert!(printed.contains("1. look here"));
        assert!(!printed.contains("b -> "));
        assert!(printed.trim_end().ends_with("fixed failed"));
    }

    #[tokio::test]
    async fn test_empty_pipeline_passes() {
        let runner = Runner::default();
        let mut out = Vec::new();
        let report = runner.run(&mut out).await.unwrap();
        assert!(report.all_passed());
        assert!(runner.list_checks().is_empty());
    }

    #[test]
    fn test_success_summary() {
        assert!(success_summary(2).contains("Both checks passed"));
        assert!(success_summary(3).contains("All 3 checks passed"));
    }
}
