//! Rule: no-array-string-prototype-at (M1004)
//!
//! Flags the `at` method on arrays, strings and typed arrays, added in
//! ES2022.

use crate::linter::restriction::{ClassRestriction, RestrictionSet};
use crate::linter::rule::*;
use crate::syntax::ast;
use crate::typing::{TypeTag, TypedArrayKind};

pub struct NoArrayStringPrototypeAt;

static META: RuleMeta = RuleMeta {
    name: "no-array-string-prototype-at",
    code: "M1004",
    description: "Disallow the `{Array,String,TypedArray}.prototype.at` method",
    category: Category::Es2022,
    default_severity: Severity::Warn,
    fixable: false,
};

static MEMBERS: &[&str] = &["at"];

static RESTRICTIONS: RestrictionSet = RestrictionSet::methods(&[
    ClassRestriction {
        class: TypeTag::Array,
        members: MEMBERS,
    },
    ClassRestriction {
        class: TypeTag::String,
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

impl LintRule for NoArrayStringPrototypeAt {
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

    fn lint_aggressive(source: &str) -> Vec<LintDiagnostic> {
        let mut config = LintConfig::new();
        config.set_aggressive(true);
        let linter = Linter::with_config(config);
        linter.lint_source(source, "test.js").diagnostics
    }

    fn has_rule(diags: &[LintDiagnostic], code: &str) -> bool {
        diags.iter().any(|d| d.code == code)
    }

    #[test]
    fn array_at_flagged() {
        let diags = lint("[1, 2, 3].at(-1);");
        assert!(has_rule(&diags, "M1004"), "got: {diags:?}");
        assert!(diags[0].message.contains("Array.prototype.at"));
    }

    #[test]
    fn string_at_flagged() {
        let diags = lint("\"hello\".at(0);");
        assert!(has_rule(&diags, "M1004"), "got: {diags:?}");
        assert!(diags[0].message.contains("String.prototype.at"));
    }

    #[test]
    fn typed_array_at_flagged() {
        let diags = lint("new Int32Array(4).at(0);");
        assert!(has_rule(&diags, "M1004"), "got: {diags:?}");
        assert!(diags[0].message.contains("Int32Array.prototype.at"));
    }

    #[test]
    fn unknown_receiver_ok_by_default() {
        let diags = lint("buf.at(0);");
        assert!(!has_rule(&diags, "M1004"), "got: {diags:?}");
    }

    #[test]
    fn unknown_receiver_flagged_in_aggressive_mode() {
        let diags = lint_aggressive("buf.at(0);");
        assert!(has_rule(&diags, "M1004"), "got: {diags:?}");
        // An assumed receiver reports as the first listed class and
        // carries an explanatory note.
        assert!(diags[0].message.contains("Array.prototype.at"));
        assert!(!diags[0].notes.is_empty());
    }
}
