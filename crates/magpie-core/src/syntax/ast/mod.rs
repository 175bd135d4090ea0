//! AST definitions for the ECMAScript subset Magpie lints.
//!
//! Every expression node carries a parser-assigned [`ExprId`], a stable
//! identity used to key the inference cache and the scope resolution map.
//! Declaration names and property names are plain [`Identifier`]s; they
//! are not expressions and carry no id.

pub mod expression;
pub mod index;
pub mod pattern;
pub mod statement;
pub mod visitor;

pub use expression::*;
pub use index::ExprIndex;
pub use pattern::*;
pub use statement::*;

use crate::syntax::interner::Symbol;
use crate::syntax::token::Span;

/// Stable identity of an expression node within one parsed program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExprId(pub u32);

/// A name in a non-expression position: declarations, parameters,
/// property names, import/export bindings.
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub name: Symbol,
    pub span: Span,
}

/// A parsed source file.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
    pub span: Span,
}
