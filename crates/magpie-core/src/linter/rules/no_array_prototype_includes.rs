//! Rule: no-array-prototype-includes (M1001)
//!
//! Flags `Array.prototype.includes`, added in ES2016. Use `indexOf(x) !== -1`
//! on runtimes that predate it.

use crate::linter::restriction::{ClassRestriction, RestrictionSet};
use crate::linter::rule::*;
use crate::syntax::ast;
use crate::typing::TypeTag;

pub struct NoArrayPrototypeIncludes;

static META: RuleMeta = RuleMeta {
    name: "no-array-prototype-includes",
    code: "M1001",
    description: "Disallow the `Array.prototype.includes` method",
    category: Category::Es2016,
    default_severity: Severity::Warn,
    fixable: false,
};

static RESTRICTIONS: RestrictionSet = RestrictionSet::methods(&[ClassRestriction {
    class: TypeTag::Array,
    members: &["includes"],
}]);

impl LintRule for NoArrayPrototypeIncludes {
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
    fn array_literal_receiver_flagged() {
        let diags = lint("[1, 2, 3].includes(2);");
        assert!(has_rule(&diags, "M1001"), "got: {diags:?}");
        assert!(diags[0].message.contains("Array.prototype.includes"));
    }

    #[test]
    fn const_array_binding_flagged() {
        let diags = lint("const xs = [1, 2]; xs.includes(1);");
        assert!(has_rule(&diags, "M1001"), "got: {diags:?}");
    }

    #[test]
    fn string_receiver_ok() {
        // `String.prototype.includes` is ES2015 and a different method.
        let diags = lint("\"abc\".includes(\"a\");");
        assert!(!has_rule(&diags, "M1001"), "got: {diags:?}");
    }

    #[test]
    fn unknown_receiver_ok_by_default() {
        let diags = lint("foo.includes(1);");
        assert!(!has_rule(&diags, "M1001"), "got: {diags:?}");
    }

    #[test]
    fn other_array_method_ok() {
        let diags = lint("[1, 2].indexOf(1);");
        assert!(!has_rule(&diags, "M1001"), "got: {diags:?}");
    }
}
