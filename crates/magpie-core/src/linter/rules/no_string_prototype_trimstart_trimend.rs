//! Rule: no-string-prototype-trimstart-trimend (M1006)
//!
//! Flags `String.prototype.trimStart` and `trimEnd`, added in ES2019.
//! Auto-fixes to the Annex B `trimLeft`/`trimRight` aliases, which older
//! engines shipped first.

use crate::linter::restriction::{ClassRestriction, RestrictionSet};
use crate::linter::rule::*;
use crate::syntax::ast;
use crate::typing::TypeTag;

pub struct NoStringPrototypeTrimStartTrimEnd;

static META: RuleMeta = RuleMeta {
    name: "no-string-prototype-trimstart-trimend",
    code: "M1006",
    description: "Disallow the `String.prototype.{trimStart,trimEnd}` methods",
    category: Category::Es2019,
    default_severity: Severity::Warn,
    fixable: true,
};

static RESTRICTIONS: RestrictionSet = RestrictionSet::methods(&[ClassRestriction {
    class: TypeTag::String,
    members: &["trimStart", "trimEnd"],
}])
.with_fixes(&[("trimStart", "trimLeft"), ("trimEnd", "trimRight")]);

impl LintRule for NoStringPrototypeTrimStartTrimEnd {
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
    fn trim_start_flagged_with_fix() {
        let diags = lint("\" x \".trimStart();");
        assert!(has_rule(&diags, "M1006"), "got: {diags:?}");
        let fix = diags[0].fix.as_ref().unwrap();
        assert_eq!(fix.replacement, "trimLeft");
    }

    #[test]
    fn trim_end_flagged_with_fix() {
        let diags = lint("\" x \".trimEnd();");
        assert!(has_rule(&diags, "M1006"), "got: {diags:?}");
        let fix = diags[0].fix.as_ref().unwrap();
        assert_eq!(fix.replacement, "trimRight");
    }

    #[test]
    fn fix_span_covers_property_only() {
        let source = "\" x \".trimStart();";
        let diags = lint(source);
        let fix = diags[0].fix.as_ref().unwrap();
        assert_eq!(&source[fix.span.start..fix.span.end], "trimStart");
    }

    #[test]
    fn computed_access_flagged_without_fix() {
        // Rewriting a computed key would also have to rewrite its quotes,
        // so only the diagnostic is emitted.
        let diags = lint("\" x \"[\"trimStart\"]();");
        assert!(has_rule(&diags, "M1006"), "got: {diags:?}");
        assert!(diags[0].fix.is_none());
        assert!(diags[0].suggestions.is_empty());
    }

    #[test]
    fn aggressive_match_demotes_fix_to_suggestion() {
        let mut config = LintConfig::new();
        config.set_aggressive(true);
        let linter = Linter::with_config(config);
        let diags = linter.lint_source("s.trimStart();", "test.js").diagnostics;
        assert!(has_rule(&diags, "M1006"), "got: {diags:?}");
        assert!(diags[0].fix.is_none());
        assert_eq!(diags[0].suggestions.len(), 1);
        assert_eq!(diags[0].suggestions[0].fix.replacement, "trimLeft");
    }

    #[test]
    fn trim_ok() {
        let diags = lint("\" x \".trim();");
        assert!(!has_rule(&diags, "M1006"), "got: {diags:?}");
    }
}
