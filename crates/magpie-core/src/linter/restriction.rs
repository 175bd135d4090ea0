//! Restriction engine shared by the prototype-method rules.
//!
//! A rule declares which members of which classes are forbidden; the
//! engine recognizes member accesses, determines the property name,
//! asks the receiver classifier whether the receiver is of a restricted
//! class, and builds the diagnostic. An `Exact` classification may carry
//! the rule's auto-fix; an `Aggressive` one demotes the fix to a
//! suggestion, since the receiver type was assumed rather than proven.

use crate::syntax::ast::{ExprId, Expression};
use crate::syntax::token::Span;
use crate::typing::{MatchStrength, TypeTag};

use super::rule::{LintContext, LintDiagnostic, LintFix, LintSuggestion, RuleMeta};

/// Forbidden members of one class.
pub struct ClassRestriction {
    pub class: TypeTag,
    pub members: &'static [&'static str],
}

/// A rule's full restriction table plus its fix table.
pub struct RestrictionSet {
    restrictions: &'static [ClassRestriction],
    /// Member name → replacement member name, applied at the property
    /// position of a dot access.
    fixes: &'static [(&'static str, &'static str)],
    /// "method" or "property", for message wording.
    noun: &'static str,
}

impl RestrictionSet {
    pub const fn methods(restrictions: &'static [ClassRestriction]) -> Self {
        Self {
            restrictions,
            fixes: &[],
            noun: "method",
        }
    }

    pub const fn properties(restrictions: &'static [ClassRestriction]) -> Self {
        Self {
            restrictions,
            fixes: &[],
            noun: "property",
        }
    }

    pub const fn with_fixes(self, fixes: &'static [(&'static str, &'static str)]) -> Self {
        Self {
            restrictions: self.restrictions,
            fixes,
            noun: self.noun,
        }
    }

    /// Evaluate one expression node against the table. Non-member
    /// expressions and dynamic keys produce nothing; the first class the
    /// classifier matches produces the diagnostic.
    pub fn check(
        &self,
        meta: &RuleMeta,
        expr: &Expression,
        ctx: &LintContext<'_>,
    ) -> Vec<LintDiagnostic> {
        let Some(access) = MemberAccess::extract(expr, ctx) else {
            return vec![];
        };
        let aggressive = ctx.aggressive_for(meta.name);
        for restriction in self.restrictions {
            if !restriction.members.contains(&access.name) {
                continue;
            }
            let strength =
                ctx.classifier
                    .classify(access.id, access.object, restriction.class, aggressive);
            if !strength.is_match() {
                continue;
            }
            return vec![self.build_diagnostic(meta, &access, restriction.class, strength)];
        }
        vec![]
    }

    fn build_diagnostic(
        &self,
        meta: &RuleMeta,
        access: &MemberAccess<'_>,
        class: TypeTag,
        strength: MatchStrength,
    ) -> LintDiagnostic {
        let message = format!(
            "{} '{}.prototype.{}' {} is forbidden.",
            meta.category.label(),
            class.name(),
            access.name,
            self.noun
        );
        let mut diagnostic = LintDiagnostic {
            rule: meta.name,
            code: meta.code,
            message,
            span: access.span,
            severity: meta.default_severity,
            fix: None,
            suggestions: vec![],
            notes: vec![],
        };
        // Replacement fixes only apply at a dot-access property
        // position; rewriting a computed key would have to preserve its
        // quoting.
        if let Some(replacement) = self.replacement_for(access.name) {
            if !access.computed {
                let fix = LintFix {
                    span: access.property_span,
                    replacement: replacement.to_string(),
                };
                match strength {
                    MatchStrength::Exact => diagnostic.fix = Some(fix),
                    _ => diagnostic.suggestions.push(LintSuggestion {
                        message: format!("Replace with '{replacement}'."),
                        fix,
                    }),
                }
            }
        }
        if strength == MatchStrength::Aggressive {
            diagnostic.notes.push(format!(
                "the receiver type could not be determined; it is treated as \
                 '{}' because the aggressive option is enabled",
                class.name()
            ));
        }
        diagnostic
    }

    fn replacement_for(&self, member: &str) -> Option<&'static str> {
        self.fixes
            .iter()
            .find(|(from, _)| *from == member)
            .map(|(_, to)| *to)
    }
}

/// A member access with a statically known property name.
struct MemberAccess<'a> {
    /// Id of the access node itself.
    id: ExprId,
    /// The receiver expression.
    object: &'a Expression,
    name: &'a str,
    property_span: Span,
    span: Span,
    computed: bool,
}

impl<'a> MemberAccess<'a> {
    fn extract(expr: &'a Expression, ctx: &LintContext<'a>) -> Option<MemberAccess<'a>> {
        match expr {
            Expression::Member(member) => Some(MemberAccess {
                id: member.id,
                object: &member.object,
                name: ctx.resolve(member.property.name),
                property_span: member.property.span,
                span: member.span,
                computed: false,
            }),
            Expression::Index(index) => {
                let name = static_key(&index.index, ctx)?;
                Some(MemberAccess {
                    id: index.id,
                    object: &index.object,
                    name,
                    property_span: index.index.span(),
                    span: index.span,
                    computed: true,
                })
            }
            _ => None,
        }
    }
}

/// Statically resolvable computed key: a string literal, or a template
/// with no substitutions. Anything else is dynamic and unmatchable.
fn static_key<'a>(index: &'a Expression, ctx: &LintContext<'a>) -> Option<&'a str> {
    match index.unwrap_transparent() {
        Expression::String(lit) => Some(ctx.resolve(lit.value)),
        Expression::Template(template) if template.expressions.is_empty() => {
            match template.quasis.as_slice() {
                [single] => Some(ctx.resolve(*single)),
                _ => None,
            }
        }
        _ => None,
    }
}
