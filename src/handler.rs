// src/handler.rs

//! Per-path change handlers.
//!
//! The tracker reports *that* something changed; a handler decides what to
//! do about it. The default handler only classifies and logs — it takes no
//! remediation action.

use anyhow::Result;
use regex::Regex;
use tracing::info;

use crate::config::model::RuleConfig;
use crate::errors::PollwatchError;
use crate::watch::state::ChangeKind;

/// Caller-supplied reaction to one reported path.
///
/// May fail; whether a failure aborts the watch loop or is logged and
/// skipped is the runner's `on_handler_error` policy.
pub trait ChangeHandler {
    fn on_change(&mut self, rel_path: &str, kind: ChangeKind) -> Result<()>;
}

/// A compiled classification rule: first matching rule wins.
#[derive(Debug, Clone)]
struct ClassifyRule {
    pattern: Regex,
    note: String,
}

/// Default handler: matches each reported path against an ordered rule
/// list and logs the first matching rule's note alongside the change kind.
/// Paths matching no rule are still logged, just without a note.
#[derive(Debug, Clone, Default)]
pub struct RuleHandler {
    rules: Vec<ClassifyRule>,
}

impl RuleHandler {
    /// Handler with the built-in rule set.
    pub fn with_default_rules() -> Self {
        // The defaults cannot fail to compile; exercised in tests below.
        Self::from_rules(&default_rules()).unwrap_or_default()
    }

    /// Handler from configured rules; falls back to the built-in set when
    /// the config has none.
    pub fn from_config(rules: &[RuleConfig]) -> crate::errors::Result<Self> {
        if rules.is_empty() {
            return Ok(Self::with_default_rules());
        }
        Self::from_rules(rules)
    }

    fn from_rules(rules: &[RuleConfig]) -> crate::errors::Result<Self> {
        let mut compiled = Vec::with_capacity(rules.len());
        for rule in rules {
            let pattern = Regex::new(&rule.pattern).map_err(|e| {
                PollwatchError::ConfigError(format!(
                    "invalid handler rule pattern {:?}: {e}",
                    rule.pattern
                ))
            })?;
            compiled.push(ClassifyRule {
                pattern,
                note: rule.note.clone(),
            });
        }
        Ok(Self { rules: compiled })
    }
}

impl ChangeHandler for RuleHandler {
    fn on_change(&mut self, rel_path: &str, kind: ChangeKind) -> Result<()> {
        match self.rules.iter().find(|r| r.pattern.is_match(rel_path)) {
            Some(rule) => info!(path = %rel_path, change = %kind, "{}", rule.note),
            None => info!(path = %rel_path, change = %kind, "file changed"),
        }
        Ok(())
    }
}

fn default_rules() -> Vec<RuleConfig> {
    vec![
        RuleConfig::new(
            r"\.rs$",
            "source file changed; a rebuild or test run may be due",
        ),
        RuleConfig::new(
            r"(^|/)Cargo\.(toml|lock)$",
            "manifest changed; dependencies may need refreshing",
        ),
        RuleConfig::new(r"\.(toml|ya?ml|json)$", "configuration file changed"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rules_compile() {
        let handler = RuleHandler::with_default_rules();
        assert_eq!(handler.rules.len(), default_rules().len());
    }

    #[test]
    fn first_matching_rule_wins() {
        let rules = vec![
            RuleConfig::new(r"\.toml$", "first"),
            RuleConfig::new(r"Cargo\.toml$", "second"),
        ];
        let handler = RuleHandler::from_rules(&rules).unwrap();
        let matched = handler
            .rules
            .iter()
            .find(|r| r.pattern.is_match("Cargo.toml"))
            .unwrap();
        assert_eq!(matched.note, "first");
    }
}
