//! Rule: no-intl-numberformat-prototype-formatrange (M1010)
//!
//! Flags `Intl.NumberFormat.prototype.formatRange` and
//! `formatRangeToParts`, added in ES2023.

use crate::linter::restriction::{ClassRestriction, RestrictionSet};
use crate::linter::rule::*;
use crate::syntax::ast;
use crate::typing::{IntlFormatterKind, TypeTag};

pub struct NoIntlNumberFormatPrototypeFormatRange;

static META: RuleMeta = RuleMeta {
    name: "no-intl-numberformat-prototype-formatrange",
    code: "M1010",
    description: "Disallow the `Intl.NumberFormat.prototype.{formatRange,formatRangeToParts}` methods",
    category: Category::Es2023,
    default_severity: Severity::Warn,
    fixable: false,
};

static RESTRICTIONS: RestrictionSet = RestrictionSet::methods(&[ClassRestriction {
    class: TypeTag::IntlFormatter(IntlFormatterKind::NumberFormat),
    members: &["formatRange", "formatRangeToParts"],
}]);

impl LintRule for NoIntlNumberFormatPrototypeFormatRange {
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
    fn format_range_flagged() {
        let diags = lint("new Intl.NumberFormat(\"en\").formatRange(1, 2);");
        assert!(has_rule(&diags, "M1010"), "got: {diags:?}");
        assert!(diags[0]
            .message
            .contains("Intl.NumberFormat.prototype.formatRange"));
    }

    #[test]
    fn format_range_to_parts_flagged() {
        let diags = lint("new Intl.NumberFormat(\"en\").formatRangeToParts(1, 2);");
        assert!(has_rule(&diags, "M1010"), "got: {diags:?}");
    }

    #[test]
    fn formatter_binding_flagged() {
        let diags = lint(
            "const nf = new Intl.NumberFormat(\"en\"); nf.formatRange(1, 2);",
        );
        assert!(has_rule(&diags, "M1010"), "got: {diags:?}");
    }

    #[test]
    fn format_ok() {
        let diags = lint("new Intl.NumberFormat(\"en\").format(1);");
        assert!(!has_rule(&diags, "M1010"), "got: {diags:?}");
    }

    #[test]
    fn date_time_format_ok() {
        // A different formatter class; this rule only covers NumberFormat.
        let diags = lint("new Intl.DateTimeFormat(\"en\").formatRange(a, b);");
        assert!(!has_rule(&diags, "M1010"), "got: {diags:?}");
    }
}
