//! Rule: no-symbol-prototype-description (M1011)
//!
//! Flags the `Symbol.prototype.description` accessor, added in ES2019.

use crate::linter::restriction::{ClassRestriction, RestrictionSet};
use crate::linter::rule::*;
use crate::syntax::ast;
use crate::typing::TypeTag;

pub struct NoSymbolPrototypeDescription;

static META: RuleMeta = RuleMeta {
    name: "no-symbol-prototype-description",
    code: "M1011",
    description: "Disallow the `Symbol.prototype.description` property",
    category: Category::Es2019,
    default_severity: Severity::Warn,
    fixable: false,
};

static RESTRICTIONS: RestrictionSet = RestrictionSet::properties(&[ClassRestriction {
    class: TypeTag::Symbol,
    members: &["description"],
}]);

impl LintRule for NoSymbolPrototypeDescription {
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
    fn symbol_call_receiver_flagged() {
        let diags = lint("Symbol(\"tag\").description;");
        assert!(has_rule(&diags, "M1011"), "got: {diags:?}");
        // Accessors are worded as properties, not methods.
        assert!(diags[0].message.contains("property"));
    }

    #[test]
    fn symbol_binding_flagged() {
        let diags = lint("const s = Symbol(\"tag\"); s.description;");
        assert!(has_rule(&diags, "M1011"), "got: {diags:?}");
    }

    #[test]
    fn to_string_ok() {
        let diags = lint("Symbol(\"tag\").toString();");
        assert!(!has_rule(&diags, "M1011"), "got: {diags:?}");
    }

    #[test]
    fn unknown_receiver_ok_by_default() {
        let diags = lint("node.description;");
        assert!(!has_rule(&diags, "M1011"), "got: {diags:?}");
    }
}
