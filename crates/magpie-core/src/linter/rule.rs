//! Lint rule trait and supporting types.
//!
//! Each lint rule implements `LintRule` and provides metadata (`RuleMeta`)
//! plus one or more `check_*` methods that inspect AST nodes.

use crate::scope::ScopeInfo;
use crate::syntax::ast;
use crate::syntax::token::Span;
use crate::syntax::{Interner, Symbol};
use crate::typing::ReceiverClassifier;

use super::config::LintConfig;

/// Severity level for a lint diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Rule is disabled.
    Off,
    /// Reports as a warning (does not affect exit code).
    Warn,
    /// Reports as an error (causes non-zero exit code).
    Error,
}

/// Category of a lint rule: the language edition that introduced the
/// flagged feature, or `Legacy` for deprecated Annex B features.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Es2016,
    Es2018,
    Es2019,
    Es2021,
    Es2022,
    Es2023,
    Legacy,
}

impl Category {
    /// Prefix used in diagnostic messages.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Es2016 => "ES2016",
            Category::Es2018 => "ES2018",
            Category::Es2019 => "ES2019",
            Category::Es2021 => "ES2021",
            Category::Es2022 => "ES2022",
            Category::Es2023 => "ES2023",
            Category::Legacy => "Legacy",
        }
    }
}

/// Static metadata for a lint rule.
pub struct RuleMeta {
    /// Rule name, e.g. "no-array-prototype-flat".
    pub name: &'static str,
    /// Lint code, e.g. "M1002".
    pub code: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    /// Category.
    pub category: Category,
    /// Default severity when no config override is set.
    pub default_severity: Severity,
    /// Whether the rule can provide auto-fixes.
    pub fixable: bool,
}

/// Context passed to each rule during lint checking.
pub struct LintContext<'a> {
    /// The original source code.
    pub source: &'a str,
    /// String interner (resolve Symbol → &str).
    pub interner: &'a Interner,
    /// Path of the file being linted.
    pub file_path: &'a str,
    /// Resolved binding information for the program.
    pub scopes: &'a ScopeInfo,
    /// Receiver type classifier for this program.
    pub classifier: &'a ReceiverClassifier<'a>,
    /// Effective configuration.
    pub config: &'a LintConfig,
}

impl<'a> LintContext<'a> {
    pub fn resolve(&self, sym: Symbol) -> &'a str {
        self.interner.resolve(sym)
    }

    /// Effective aggressive flag for a rule, honoring per-rule
    /// overrides over the global setting.
    pub fn aggressive_for(&self, rule_name: &str) -> bool {
        self.config.aggressive_for(rule_name)
    }
}

/// A suggested auto-fix: replace a span with new text.
#[derive(Debug, Clone)]
pub struct LintFix {
    /// The span to replace.
    pub span: Span,
    /// Replacement text.
    pub replacement: String,
}

/// A fix the linter must not apply automatically, offered with an
/// explanation instead.
#[derive(Debug, Clone)]
pub struct LintSuggestion {
    /// What applying the suggestion does.
    pub message: String,
    /// The edit itself.
    pub fix: LintFix,
}

/// A single lint diagnostic emitted by a rule.
#[derive(Debug, Clone)]
pub struct LintDiagnostic {
    /// Rule name (e.g. "no-array-prototype-flat").
    pub rule: &'static str,
    /// Lint code (e.g. "M1002").
    pub code: &'static str,
    /// Human-readable message.
    pub message: String,
    /// Source location.
    pub span: Span,
    /// Severity level.
    pub severity: Severity,
    /// Auto-fix, safe to apply without review.
    pub fix: Option<LintFix>,
    /// Fixes that need review before applying.
    pub suggestions: Vec<LintSuggestion>,
    /// Additional notes.
    pub notes: Vec<String>,
}

/// Trait that every lint rule must implement.
///
/// Rules receive individual AST nodes and return diagnostics.
/// Default implementations return no diagnostics, so rules only
/// need to override the methods relevant to them.
pub trait LintRule: Send + Sync {
    /// Static metadata for this rule.
    fn meta(&self) -> &RuleMeta;

    /// Check a whole program.
    fn check_program(
        &self,
        _program: &ast::Program,
        _ctx: &LintContext<'_>,
    ) -> Vec<LintDiagnostic> {
        vec![]
    }

    /// Check a statement node.
    fn check_statement(
        &self,
        _stmt: &ast::Statement,
        _ctx: &LintContext<'_>,
    ) -> Vec<LintDiagnostic> {
        vec![]
    }

    /// Check an expression node.
    fn check_expression(
        &self,
        _expr: &ast::Expression,
        _ctx: &LintContext<'_>,
    ) -> Vec<LintDiagnostic> {
        vec![]
    }
}
