//! Loading lint configuration from `magpie.toml`.
//!
//! The file is discovered by walking up from the working directory, or
//! named explicitly with `--config`. Severity strings follow the usual
//! convention: "off", "warn" (or "warning") and "error".
//!
//! ```toml
//! [lint]
//! aggressive = false
//!
//! [lint.rules]
//! no-array-prototype-flat = "error"
//! no-regexp-prototype-compile = "off"
//!
//! [lint.aggressive-rules]
//! no-string-prototype-replaceall = true
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use magpie_core::linter::{LintConfig, Severity};

#[derive(Debug, Default, Deserialize)]
struct Manifest {
    #[serde(default)]
    lint: LintSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct LintSection {
    #[serde(default)]
    rules: BTreeMap<String, String>,
    #[serde(default)]
    aggressive: bool,
    #[serde(default)]
    aggressive_rules: BTreeMap<String, bool>,
}

/// Load the lint configuration.
///
/// An explicit `--config` path must exist and parse; a discovered
/// `magpie.toml` is used when present, and its absence just means
/// defaults.
pub fn load_lint_config(explicit: Option<&Path>) -> anyhow::Result<LintConfig> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => find_manifest(),
    };
    let Some(path) = path else {
        return Ok(LintConfig::new());
    };

    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let manifest: Manifest = toml::from_str(&text)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    Ok(build_config(&manifest.lint))
}

fn build_config(section: &LintSection) -> LintConfig {
    let mut config = LintConfig::new();
    config.set_aggressive(section.aggressive);
    for (rule_name, severity_str) in &section.rules {
        let severity = match severity_str.as_str() {
            "off" => Severity::Off,
            "warn" | "warning" => Severity::Warn,
            "error" => Severity::Error,
            _ => continue,
        };
        config.set_severity(rule_name, severity);
    }
    for (rule_name, aggressive) in &section.aggressive_rules {
        config.set_rule_aggressive(rule_name, *aggressive);
    }
    config
}

/// Walk up from CWD to find `magpie.toml`.
fn find_manifest() -> Option<PathBuf> {
    let mut dir = std::env::current_dir().ok()?;
    loop {
        let candidate = dir.join("magpie.toml");
        if candidate.is_file() {
            return Some(candidate);
        }
        if !dir.pop() {
            return None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("magpie.toml");
        std::fs::write(
            &path,
            r#"
            [lint]
            aggressive = true

            [lint.rules]
            no-array-prototype-flat = "error"
            no-regexp-prototype-compile = "off"
            no-promise-prototype-finally = "bogus"

            [lint.aggressive-rules]
            no-string-prototype-replaceall = false
        "#,
        )
        .unwrap();

        let config = load_lint_config(Some(&path)).unwrap();
        assert_eq!(
            config.effective_severity("no-array-prototype-flat", Severity::Warn),
            Severity::Error
        );
        assert!(config.is_disabled("no-regexp-prototype-compile"));
        // Unrecognized severity strings fall back to the default.
        assert_eq!(
            config.effective_severity("no-promise-prototype-finally", Severity::Warn),
            Severity::Warn
        );
        assert!(config.aggressive_for("no-array-prototype-flat"));
        assert!(!config.aggressive_for("no-string-prototype-replaceall"));
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(load_lint_config(Some(&path)).is_err());
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("magpie.toml");
        std::fs::write(&path, "[lint\nbroken").unwrap();
        assert!(load_lint_config(Some(&path)).is_err());
    }
}
