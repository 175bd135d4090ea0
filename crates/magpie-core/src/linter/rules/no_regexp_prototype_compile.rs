//! Rule: no-regexp-prototype-compile (M1008)
//!
//! Flags the deprecated Annex B `RegExp.prototype.compile` method.
//! Construct a new `RegExp` instead of mutating one in place.

use crate::linter::restriction::{ClassRestriction, RestrictionSet};
use crate::linter::rule::*;
use crate::syntax::ast;
use crate::typing::TypeTag;

pub struct NoRegExpPrototypeCompile;

static META: RuleMeta = RuleMeta {
    name: "no-regexp-prototype-compile",
    code: "M1008",
    description: "Disallow the deprecated `RegExp.prototype.compile` method",
    category: Category::Legacy,
    default_severity: Severity::Warn,
    fixable: false,
};

static RESTRICTIONS: RestrictionSet = RestrictionSet::methods(&[ClassRestriction {
    class: TypeTag::RegExp,
    members: &["compile"],
}]);

impl LintRule for NoRegExpPrototypeCompile {
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
