//! Rule: no-promise-prototype-finally (M1007)
//!
//! Flags `Promise.prototype.finally`, added in ES2018.

use crate::linter::restriction::{ClassRestriction, RestrictionSet};
use crate::linter::rule::*;
use crate::syntax::ast;
use crate::typing::TypeTag;

pub struct NoPromisePrototypeFinally;

static META: RuleMeta = RuleMeta {
    name: "no-promise-prototype-finally",
    code: "M1007",
    description: "Disallow the `Promise.prototype.finally` method",
    category: Category::Es2018,
    default_severity: Severity::Warn,
    fixable: false,
};

static RESTRICTIONS: RestrictionSet = RestrictionSet::methods(&[ClassRestriction {
    class: TypeTag::Promise,
    members: &["finally"],
}]);

impl LintRule for NoPromisePrototypeFinally {
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
