use super::{Check, CheckResult};
use crate::config::{EnvSource, ProcessEnv, REQUIRED_VARS};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

/// Verifies that every required variable is bound to a non-empty value.
pub struct EnvironmentCheck {
    required: Vec<String>,
    source: Arc<dyn EnvSource>,
}

impl EnvironmentCheck {
    pub fn new(source: Arc<dyn EnvSource>) -> Self {
        Self::with_required(source, REQUIRED_VARS)
    }

    pub fn with_required(source: Arc<dyn EnvSource>, required: &[&str]) -> Self {
        Self {
            required: required.iter().map(|name| name.to_string()).collect(),
            source,
        }
    }

    pub fn required(&self) -> &[String] {
        &self.required
    }

    /// Every unset or empty name, in declared order.
    pub fn missing_vars(&self) -> Vec<String> {
        self.required
            .iter()
            .filter(|name| {
                let bound = self.source.is_set(name);
                debug!("{} present: {}", name, bound);
                !bound
            })
            .cloned()
            .collect()
    }

    pub fn evaluate(&self) -> CheckResult {
        let missing = self.missing_vars();
        if missing.is_empty() {
            CheckResult::pass()
        } else {
            warn!("{} required variable(s) missing", missing.len());
            CheckResult::fail(format!("{:?}", missing))
        }
    }
}

impl Default for EnvironmentCheck {
    fn default() -> Self {
        Self::new(Arc::new(ProcessEnv))
    }
}

#[async_trait]
impl Check for EnvironmentCheck {
    fn name(&self) -> &str {
        "environment"
    }

    fn banner(&self) -> &str {
        "Testing environment variables..."
    }

    async fn run(&self) -> CheckResult {
        self.evaluate()
    }

    fn describe(&self, result: &CheckResult) -> String {
        if result.passed {
            "✅ All required environment variables present".to_string()
        } else {
            format!("❌ Missing environment variables: {}", result.explanation())
        }
    }

    fn failure_summary(&self) -> &str {
        "❌ Environment variables test failed."
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn check_with(pairs: &[(&str, &str)]) -> EnvironmentCheck {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EnvironmentCheck::new(Arc::new(env))
    }

    #[test]
    fn test_all_present() {
        let check = check_with(&[("RETELL_API_KEY", "key_abc"), ("OPENAI_API_KEY", "sk-abc")]);
        let result = check.evaluate();
        assert!(result.passed);
        assert_eq!(result.explanation, None);
    }

    #[test]
    fn test_reports_every_missing_name_in_order() {
        let check = check_with(&[]);
        assert_eq!(check.missing_vars(), vec!["RETELL_API_KEY", "OPENAI_API_KEY"]);
        assert_eq!(
            check.evaluate().explanation(),
            r#"["RETELL_API_KEY", "OPENAI_API_KEY"]"#
        );
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        let check = check_with(&[("RETELL_API_KEY", ""), ("OPENAI_API_KEY", "sk-abc")]);
        assert_eq!(check.missing_vars(), vec!["RETELL_API_KEY"]);
    }

    #[tokio::test]
    async fn test_describe_failure() {
        let check = check_with(&[("RETELL_API_KEY", "key_abc")]);
        let result = check.run().await;
        assert_eq!(
            check.describe(&result),
            r#"❌ Missing environment variables: ["OPENAI_API_KEY"]"#
        );
    }
}
