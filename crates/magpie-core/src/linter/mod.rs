//! Magpie linter.
//!
//! AST-based lint analysis for JavaScript source files. The bundled rules
//! flag uses of newer (or deprecated) built-in prototype members so code
//! can stay compatible with older runtimes.
//!
//! # Architecture
//!
//! - Each rule implements [`LintRule`] and checks individual AST nodes.
//!   The prototype rules share the [`RestrictionSet`] engine, which asks
//!   the receiver classifier whether `object.member` has a forbidden
//!   receiver type.
//! - The [`LintRunner`](runner::LintRunner) walks the AST once and
//!   dispatches to all active rules (single-pass visitor).
//! - [`Linter`] is the public entry point: create one, then call
//!   [`lint_source`](Linter::lint_source) or
//!   [`lint_program`](Linter::lint_program).
//!
//! # Example
//!
//! ```ignore
//! use magpie_core::linter::Linter;
//!
//! let linter = Linter::new();
//! let result = linter.lint_source("[1, 2].flat();", "test.js");
//! for d in &result.diagnostics {
//!     println!("[{}] {}: {}", d.code, d.rule, d.message);
//! }
//! ```

pub mod config;
pub mod restriction;
pub mod rule;
pub mod rules;
mod runner;

pub use config::LintConfig;
pub use restriction::{ClassRestriction, RestrictionSet};
pub use rule::{
    Category, LintContext, LintDiagnostic, LintFix, LintRule, LintSuggestion, RuleMeta, Severity,
};

use crate::scope::ScopeInfo;
use crate::syntax::ast::index::ExprIndex;
use crate::syntax::ast::Program;
use crate::syntax::parser::Parser;
use crate::syntax::Interner;
use crate::typing::{ReceiverClassifier, TypeInferencer, TypeProvider};
use runner::LintRunner;

/// Result of linting a single file.
#[derive(Debug)]
pub struct LintResult {
    /// All diagnostics emitted for this file.
    pub diagnostics: Vec<LintDiagnostic>,
    /// File path that was linted.
    pub file_path: String,
    /// Number of diagnostics that have an auto-fix.
    pub fixable_count: usize,
}

/// The Magpie linter. Holds a set of enabled rules and configuration.
pub struct Linter {
    rules: Vec<Box<dyn LintRule>>,
    config: LintConfig,
}

impl Linter {
    /// Create a linter with all default rules and default severities.
    pub fn new() -> Self {
        Self {
            rules: rules::all_rules(),
            config: LintConfig::new(),
        }
    }

    /// Create a linter with configuration overrides.
    pub fn with_config(config: LintConfig) -> Self {
        Self {
            rules: rules::all_rules(),
            config,
        }
    }

    /// Lint a parsed program.
    ///
    /// Receiver types are inferred from the syntax alone; see
    /// [`lint_program_with_types`](Self::lint_program_with_types) to
    /// supply checker-backed type information.
    pub fn lint_program(
        &self,
        program: &Program,
        source: &str,
        interner: &Interner,
        file_path: &str,
    ) -> LintResult {
        self.lint_inner(program, source, interner, file_path, None)
    }

    /// Lint a parsed program with type information from an external
    /// checker. Rules fall back to syntactic inference for nodes the
    /// provider has no answer for.
    pub fn lint_program_with_types(
        &self,
        program: &Program,
        source: &str,
        interner: &Interner,
        file_path: &str,
        provider: &dyn TypeProvider,
    ) -> LintResult {
        self.lint_inner(program, source, interner, file_path, Some(provider))
    }

    fn lint_inner(
        &self,
        program: &Program,
        source: &str,
        interner: &Interner,
        file_path: &str,
        provider: Option<&dyn TypeProvider>,
    ) -> LintResult {
        let scopes = ScopeInfo::analyze(program);
        let index = ExprIndex::build(program);
        let inferencer = TypeInferencer::new(&index, &scopes, interner);
        let classifier = ReceiverClassifier::new(&inferencer, provider);

        let active_rules: Vec<&dyn LintRule> = self
            .rules
            .iter()
            .filter(|r| !self.config.is_disabled(r.meta().name))
            .map(|r| r.as_ref())
            .collect();

        let ctx = LintContext {
            source,
            interner,
            file_path,
            scopes: &scopes,
            classifier: &classifier,
            config: &self.config,
        };

        let runner = LintRunner::new(&active_rules, &ctx);
        let mut diagnostics = runner.run(program);

        // Apply severity overrides.
        diagnostics.retain_mut(|d| {
            let eff = self.config.effective_severity(d.rule, d.severity);
            if eff == Severity::Off {
                return false;
            }
            d.severity = eff;
            true
        });

        let fixable_count = diagnostics.iter().filter(|d| d.fix.is_some()).count();

        LintResult {
            diagnostics,
            file_path: file_path.to_string(),
            fixable_count,
        }
    }

    /// Convenience: parse source code and lint it.
    ///
    /// Parse errors are converted to lint diagnostics so the caller gets
    /// a uniform result.
    pub fn lint_source(&self, source: &str, file_path: &str) -> LintResult {
        match Parser::parse_source(source) {
            Ok((program, interner)) => {
                self.lint_program(&program, source, &interner, file_path)
            }
            Err(e) => {
                let diagnostics = vec![LintDiagnostic {
                    rule: "parse-error",
                    code: "M0001",
                    message: format!("Parse error: {e}"),
                    span: e.span,
                    severity: Severity::Error,
                    fix: None,
                    suggestions: vec![],
                    notes: vec![],
                }];
                LintResult {
                    diagnostics,
                    file_path: file_path.to_string(),
                    fixable_count: 0,
                }
            }
        }
    }
}

impl Default for Linter {
    fn default() -> Self {
        Self::new()
    }
}
