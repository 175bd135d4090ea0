//! Lint runner: single-pass AST visitor that dispatches to all active rules.

use crate::syntax::ast::visitor::{self, Visitor};
use crate::syntax::ast::{self, Program};

use super::rule::{LintContext, LintDiagnostic, LintRule};

/// Runs the active lint rules over a program in a single traversal.
pub struct LintRunner<'a> {
    rules: &'a [&'a dyn LintRule],
    ctx: &'a LintContext<'a>,
    diagnostics: Vec<LintDiagnostic>,
}

impl<'a> LintRunner<'a> {
    /// Create a new runner with the given rules and context.
    pub fn new(rules: &'a [&'a dyn LintRule], ctx: &'a LintContext<'a>) -> Self {
        Self {
            rules,
            ctx,
            diagnostics: Vec::new(),
        }
    }

    /// Run all rules over the program and return collected diagnostics.
    pub fn run(mut self, program: &Program) -> Vec<LintDiagnostic> {
        // First, let rules inspect the program as a whole.
        for rule in self.rules {
            self.diagnostics.extend(rule.check_program(program, self.ctx));
        }

        // Then walk the AST, dispatching statement and expression checks.
        self.visit_program(program);

        self.diagnostics
    }
}

impl<'a, 'ast> Visitor<'ast> for LintRunner<'a> {
    fn visit_statement(&mut self, stmt: &'ast ast::Statement) {
        for rule in self.rules {
            self.diagnostics.extend(rule.check_statement(stmt, self.ctx));
        }
        visitor::walk_statement(self, stmt);
    }

    fn visit_expression(&mut self, expr: &'ast ast::Expression) {
        for rule in self.rules {
            self.diagnostics.extend(rule.check_expression(expr, self.ctx));
        }
        visitor::walk_expression(self, expr);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linter::config::LintConfig;
    use crate::linter::rule::{Category, RuleMeta, Severity};
    use crate::scope::ScopeInfo;
    use crate::syntax::ast::index::ExprIndex;
    use crate::syntax::parser::Parser;
    use crate::typing::{ReceiverClassifier, TypeInferencer};

    /// A trivial test rule that flags every statement.
    struct FlagAllStatements;

    static FLAG_ALL_META: RuleMeta = RuleMeta {
        name: "flag-all",
        code: "T0001",
        description: "Flags every statement (test only)",
        category: Category::Legacy,
        default_severity: Severity::Warn,
        fixable: false,
    };

    impl LintRule for FlagAllStatements {
        fn meta(&self) -> &RuleMeta {
            &FLAG_ALL_META
        }

        fn check_statement(
            &self,
            stmt: &ast::Statement,
            _ctx: &LintContext<'_>,
        ) -> Vec<LintDiagnostic> {
            vec![LintDiagnostic {
                rule: self.meta().name,
                code: self.meta().code,
                message: "flagged".to_string(),
                span: stmt.span(),
                severity: Severity::Warn,
                fix: None,
                suggestions: vec![],
                notes: vec![],
            }]
        }
    }

    fn run_rules(source: &str, rules: &[&dyn LintRule]) -> Vec<LintDiagnostic> {
        let (program, interner) = Parser::parse_source(source).unwrap();
        let scopes = ScopeInfo::analyze(&program);
        let index = ExprIndex::build(&program);
        let inferencer = TypeInferencer::new(&index, &scopes, &interner);
        let classifier = ReceiverClassifier::new(&inferencer, None);
        let config = LintConfig::new();
        let ctx = LintContext {
            source,
            interner: &interner,
            file_path: "test.js",
            scopes: &scopes,
            classifier: &classifier,
            config: &config,
        };
        LintRunner::new(rules, &ctx).run(&program)
    }

    #[test]
    fn runner_dispatches_to_rules() {
        let diags = run_rules("const x = 1;", &[&FlagAllStatements]);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, "T0001");
        assert_eq!(diags[0].message, "flagged");
    }

    #[test]
    fn runner_visits_nested_statements() {
        let diags = run_rules("if (a) { b; }", &[&FlagAllStatements]);
        // The `if` statement plus the block and the inner expression
        // statement are each flagged.
        assert_eq!(diags.len(), 3);
    }

    #[test]
    fn runner_empty_rules() {
        let diags = run_rules("const x = 1;", &[]);
        assert!(diags.is_empty());
    }
}
