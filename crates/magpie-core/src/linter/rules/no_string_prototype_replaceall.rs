//! Rule: no-string-prototype-replaceall (M1005)
//!
//! Flags `String.prototype.replaceAll`, added in ES2021. A global regex
//! passed to `replace` covers the same ground on older runtimes.

use crate::linter::restriction::{ClassRestriction, RestrictionSet};
use crate::linter::rule::*;
use crate::syntax::ast;
use crate::typing::TypeTag;

pub struct NoStringPrototypeReplaceAll;

static META: RuleMeta = RuleMeta {
    name: "no-string-prototype-replaceall",
    code: "M1005",
    description: "Disallow the `String.prototype.replaceAll` method",
    category: Category::Es2021,
    default_severity: Severity::Warn,
    fixable: false,
};

static RESTRICTIONS: RestrictionSet = RestrictionSet::methods(&[ClassRestriction {
    class: TypeTag::String,
    members: &["replaceAll"],
}]);

impl LintRule for NoStringPrototypeReplaceAll {
    fn meta(&self) -> &RuleMeta {
        &META
    }

    fn check_expression(
        &self,
        expr: &ast::Expression,
        ctx: &LintContext<'_>,
    ) -> Vec<LintDiagnostic> {
        RESTRICTIONS.check(&META, expr, ctx)
    }
}

#[cfg(test)]
mod tests {
    use crate::linter::config::LintConfig;
    use crate::linter::rule::LintDiagnostic;
    use crate::linter::Linter;

    fn lint(source: &str) -> Vec<LintDiagnostic> {
        let linter = Linter::new();
        linter.lint_source(source, "test.js").diagnostics
    }

    fn has_rule(diags: &[LintDiagnostic], code: &str) -> bool {
        diags.iter().any(|d| d.code == code)
    }

    #[test]
    fn string_literal_receiver_flagged() {
        let diags = lint("\"a-b-c\".replaceAll(\"-\", \"_\");");
        assert!(has_rule(&diags, "M1005"), "got: {diags:?}");
    }

    #[test]
    fn template_receiver_flagged() {
        let diags = lint("`a-${b}-c`.replaceAll(\"-\", \"_\");");
        assert!(has_rule(&diags, "M1005"), "got: {diags:?}");
    }

    #[test]
    fn concatenation_receiver_flagged() {
        // `a + "-"` types as a string through the operator rules.
        let diags = lint("(a + \"-\").replaceAll(\"-\", \"_\");");
        assert!(has_rule(&diags, "M1005"), "got: {diags:?}");
    }

    #[test]
    fn replace_ok() {
        let diags = lint("\"a-b\".replace(\"-\", \"_\");");
        assert!(!has_rule(&diags, "M1005"), "got: {diags:?}");
    }

    #[test]
    fn unknown_receiver_ok_by_default() {
        let diags = lint("name.replaceAll(\"-\", \"_\");");
        assert!(!has_rule(&diags, "M1005"), "got: {diags:?}");
    }

    #[test]
    fn per_rule_aggressive_override() {
        let mut config = LintConfig::new();
        config.set_rule_aggressive("no-string-prototype-replaceall", true);
        let linter = Linter::with_config(config);
        let diags = linter
            .lint_source("name.replaceAll(\"-\", \"_\");", "test.js")
            .diagnostics;
        assert!(has_rule(&diags, "M1005"), "got: {diags:?}");
    }
}
