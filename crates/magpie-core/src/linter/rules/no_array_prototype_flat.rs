//! Rule: no-array-prototype-flat (M1002)
//!
//! Flags `Array.prototype.flat` and `Array.prototype.flatMap`, added in
//! ES2019.

use crate::linter::restriction::{ClassRestriction, RestrictionSet};
use crate::linter::rule::*;
use crate::syntax::ast;
use crate::typing::TypeTag;

pub struct NoArrayPrototypeFlat;

static META: RuleMeta = RuleMeta {
    name: "no-array-prototype-flat",
    code: "M1002",
    description: "Disallow the `Array.prototype.{flat,flatMap}` methods",
    category: Category::Es2019,
    default_severity: Severity::Warn,
    fixable: false,
};

static RESTRICTIONS: RestrictionSet = RestrictionSet::methods(&[ClassRestriction {
    class: TypeTag::Array,
    members: &["flat", "flatMap"],
}]);

impl LintRule for NoArrayPrototypeFlat {
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
