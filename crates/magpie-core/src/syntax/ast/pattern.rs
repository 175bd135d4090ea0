//! Binding patterns for declarations, parameters and catch clauses.

use crate::syntax::ast::expression::{Expression, PropertyKey};
use crate::syntax::ast::Identifier;
use crate::syntax::token::Span;

#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    Identifier(Identifier),
    Array(Box<ArrayPattern>),
    Object(Box<ObjectPattern>),
    /// `target = default`
    Assignment(Box<AssignmentPattern>),
    /// `...rest`
    Rest(Box<RestPattern>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayPattern {
    /// `None` entries are holes (`[, b]`).
    pub elements: Vec<Option<Pattern>>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectPattern {
    pub properties: Vec<ObjectPatternProperty>,
    pub rest: Option<Pattern>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectPatternProperty {
    pub key: PropertyKey,
    pub value: Pattern,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentPattern {
    pub target: Pattern,
    pub default: Expression,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RestPattern {
    pub argument: Pattern,
    pub span: Span,
}

impl Pattern {
    pub fn span(&self) -> Span {
        match self {
            Pattern::Identifier(ident) => ident.span,
            Pattern::Array(p) => p.span,
            Pattern::Object(p) => p.span,
            Pattern::Assignment(p) => p.span,
            Pattern::Rest(p) => p.span,
        }
    }

    /// The bound name when this is a plain identifier pattern.
    pub fn as_identifier(&self) -> Option<&Identifier> {
        match self {
            Pattern::Identifier(ident) => Some(ident),
            _ => None,
        }
    }
}
