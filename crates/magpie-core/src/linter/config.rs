//! Lint configuration: severity overrides and the aggressive flag.

use std::collections::HashMap;

use super::rule::Severity;

/// Configuration for the linter, loaded from `[lint]` in `magpie.toml`.
///
/// The aggressive flag decides what an indeterminate receiver type
/// means: enabled, unknown receivers count as provisional matches and
/// rules report them with suggestion-only fixes. It can be set globally
/// and overridden per rule.
#[derive(Debug, Clone, Default)]
pub struct LintConfig {
    /// Per-rule severity overrides. Key = rule name.
    overrides: HashMap<String, Severity>,
    /// Global aggressive flag.
    aggressive: bool,
    /// Per-rule aggressive overrides, taking precedence over the global
    /// flag.
    aggressive_overrides: HashMap<String, bool>,
}

impl LintConfig {
    /// Create a new empty config (all rules use their default severity,
    /// aggressive off).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the severity for a specific rule.
    pub fn set_severity(&mut self, rule_name: &str, severity: Severity) {
        self.overrides.insert(rule_name.to_string(), severity);
    }

    /// Get the effective severity for a rule, falling back to its default.
    pub fn effective_severity(&self, rule_name: &str, default: Severity) -> Severity {
        self.overrides.get(rule_name).copied().unwrap_or(default)
    }

    /// Check if a rule is explicitly disabled.
    pub fn is_disabled(&self, rule_name: &str) -> bool {
        self.overrides.get(rule_name) == Some(&Severity::Off)
    }

    /// Set the global aggressive flag.
    pub fn set_aggressive(&mut self, aggressive: bool) {
        self.aggressive = aggressive;
    }

    /// Override the aggressive flag for a single rule.
    pub fn set_rule_aggressive(&mut self, rule_name: &str, aggressive: bool) {
        self.aggressive_overrides
            .insert(rule_name.to_string(), aggressive);
    }

    /// Effective aggressive flag for a rule.
    pub fn aggressive_for(&self, rule_name: &str) -> bool {
        self.aggressive_overrides
            .get(rule_name)
            .copied()
            .unwrap_or(self.aggressive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = LintConfig::new();
        assert_eq!(
            config.effective_severity("no-array-prototype-flat", Severity::Warn),
            Severity::Warn
        );
        assert!(!config.aggressive_for("no-array-prototype-flat"));
    }

    #[test]
    fn override_severity() {
        let mut config = LintConfig::new();
        config.set_severity("no-array-prototype-includes", Severity::Error);

        assert_eq!(
            config.effective_severity("no-array-prototype-includes", Severity::Warn),
            Severity::Error
        );
        assert_eq!(
            config.effective_severity("no-array-prototype-flat", Severity::Warn),
            Severity::Warn
        );
    }

    #[test]
    fn disable_rule() {
        let mut config = LintConfig::new();
        config.set_severity("no-array-prototype-flat", Severity::Off);

        assert!(config.is_disabled("no-array-prototype-flat"));
        assert!(!config.is_disabled("no-array-prototype-includes"));
    }

    #[test]
    fn per_rule_aggressive_overrides_global() {
        let mut config = LintConfig::new();
        config.set_aggressive(true);
        config.set_rule_aggressive("no-promise-prototype-finally", false);

        assert!(config.aggressive_for("no-array-prototype-flat"));
        assert!(!config.aggressive_for("no-promise-prototype-finally"));
    }
}
