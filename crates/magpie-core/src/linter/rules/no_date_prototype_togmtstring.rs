//! Rule: no-date-prototype-togmtstring (M1009)
//!
//! Flags the deprecated Annex B `Date.prototype.toGMTString` method and
//! auto-fixes it to `toUTCString`.

use crate::linter::restriction::{ClassRestriction, RestrictionSet};
use crate::linter::rule::*;
use crate::syntax::ast;
use crate::typing::TypeTag;

pub struct NoDatePrototypeToGMTString;

static META: RuleMeta = RuleMeta {
    name: "no-date-prototype-togmtstring",
    code: "M1009",
    description: "Disallow the deprecated `Date.prototype.toGMTString` method",
    category: Category::Legacy,
    default_severity: Severity::Warn,
    fixable: true,
};

static RESTRICTIONS: RestrictionSet = RestrictionSet::methods(&[ClassRestriction {
    class: TypeTag::Date,
    members: &["toGMTString"],
}])
.with_fixes(&[("toGMTString", "toUTCString")]);

impl LintRule for NoDatePrototypeToGMTString {
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
    fn new_date_receiver_flagged_with_fix() {
        let diags = lint("new Date().toGMTString();");
        assert!(has_rule(&diags, "M1009"), "got: {diags:?}");
        let fix = diags[0].fix.as_ref().unwrap();
        assert_eq!(fix.replacement, "toUTCString");
    }

    #[test]
    fn date_binding_flagged() {
        let diags = lint("const d = new Date(); d.toGMTString();");
        assert!(has_rule(&diags, "M1009"), "got: {diags:?}");
    }

    #[test]
    fn to_utc_string_ok() {
        let diags = lint("new Date().toUTCString();");
        assert!(!has_rule(&diags, "M1009"), "got: {diags:?}");
    }

    #[test]
    fn shadowed_date_ok() {
        // A local `Date` binding is not the global constructor.
        let diags = lint("const Date = makeClock(); new Date().toGMTString();");
        assert!(!has_rule(&diags, "M1009"), "got: {diags:?}");
    }
}
