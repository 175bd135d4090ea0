//! Rule: no-array-prototype-findlast (M1003)
//!
//! Flags `findLast` and `findLastIndex` on arrays and typed arrays, added
//! in ES2023.

use crate::linter::restriction::{ClassRestriction, RestrictionSet};
use crate::linter::rule::*;
use crate::syntax::ast;
use crate::typing::{TypeTag, TypedArrayKind};

pub struct NoArrayPrototypeFindLast;

static META: RuleMeta = RuleMeta {
    name: "no-array-prototype-findlast",
    code: "M1003",
    description: "Disallow the `Array.prototype.{findLast,findLastIndex}` methods",
    category: Category::Es2023,
    default_severity: Severity::Warn,
    fixable: false,
};

static MEMBERS: &[&str] = &["findLast", "findLastIndex"];

static RESTRICTIONS: RestrictionSet = RestrictionSet::methods(&[
    ClassRestriction {
        class: TypeTag::Array,
        members: MEMBERS,
    },
    ClassRestriction {
        class: TypeTag::TypedArray(TypedArrayKind::Int8),
        members: MEMBERS,
    },
    ClassRestriction {
        class: TypeTag::TypedArray(TypedArrayKind::Uint8),
        members: MEMBERS,
    },
    ClassRestriction {
        class: TypeTag::TypedArray(TypedArrayKind::Uint8Clamped),
        members: MEMBERS,
    },
    ClassRestriction {
        class: TypeTag::TypedArray(TypedArrayKind::Int16),
        members: MEMBERS,
    },
    ClassRestriction {
        class: TypeTag::TypedArray(TypedArrayKind::Uint16),
        members: MEMBERS,
    },
    ClassRestriction {
        class: TypeTag::TypedArray(TypedArrayKind::Int32),
        members: MEMBERS,
    },
    ClassRestriction {
        class: TypeTag::TypedArray(TypedArrayKind::Uint32),
        members: MEMBERS,
    },
    ClassRestriction {
        class: TypeTag::TypedArray(TypedArrayKind::Float32),
        members: MEMBERS,
    },
    ClassRestriction {
        class: TypeTag::TypedArray(TypedArrayKind::Float64),
        members: MEMBERS,
    },
    ClassRestriction {
        class: TypeTag::TypedArray(TypedArrayKind::BigInt64),
        members: MEMBERS,
    },
    ClassRestriction {
        class: TypeTag::TypedArray(TypedArrayKind::BigUint64),
        members: MEMBERS,
    },
]);

impl LintRule for NoArrayPrototypeFindLast {
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
    fn find_last_flagged() {
        let diags = lint("[1, 2, 3].findLast(x => x > 1);");
        assert!(has_rule(&diags, "M1003"), "got: {diags:?}");
    }

    #[test]
    fn find_last_index_flagged() {
        let diags = lint("[1, 2, 3].findLastIndex(x => x > 1);");
        assert!(has_rule(&diags, "M1003"), "got: {diags:?}");
    }

    #[test]
    fn typed_array_receiver_flagged() {
        let diags = lint("new Uint8Array(8).findLast(x => x);");
        assert!(has_rule(&diags, "M1003"), "got: {diags:?}");
        assert!(diags[0].message.contains("Uint8Array.prototype.findLast"));
    }

    #[test]
    fn find_ok() {
        let diags = lint("[1, 2, 3].find(x => x > 1);");
        assert!(!has_rule(&diags, "M1003"), "got: {diags:?}");
    }
}
