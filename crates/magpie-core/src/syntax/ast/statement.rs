//! Statement nodes.

use crate::syntax::ast::expression::Expression;
use crate::syntax::ast::pattern::Pattern;
use crate::syntax::ast::Identifier;
use crate::syntax::interner::Symbol;
use crate::syntax::token::Span;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Expression(Box<ExpressionStatement>),
    VariableDecl(Box<VariableDeclaration>),
    Function(Box<FunctionDeclaration>),
    Class(Box<ClassDeclaration>),
    Return(Box<ReturnStatement>),
    If(Box<IfStatement>),
    For(Box<ForStatement>),
    ForIn(Box<ForInStatement>),
    While(Box<WhileStatement>),
    DoWhile(Box<DoWhileStatement>),
    Block(Box<BlockStatement>),
    Break(Span),
    Continue(Span),
    Throw(Box<ThrowStatement>),
    Try(Box<TryStatement>),
    Switch(Box<SwitchStatement>),
    Empty(Span),
    Debugger(Span),
    Import(Box<ImportDeclaration>),
    Export(Box<ExportDeclaration>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    pub expression: Expression,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    pub kind: DeclarationKind,
    pub declarators: Vec<VariableDeclarator>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    Var,
    Let,
    Const,
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclarationKind::Var => write!(f, "var"),
            DeclarationKind::Let => write!(f, "let"),
            DeclarationKind::Const => write!(f, "const"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclarator {
    pub pattern: Pattern,
    pub init: Option<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDeclaration {
    pub name: Identifier,
    pub params: Vec<Pattern>,
    pub body: Vec<Statement>,
    pub is_async: bool,
    pub is_generator: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDeclaration {
    pub name: Identifier,
    pub superclass: Option<Expression>,
    pub body: Vec<crate::syntax::ast::expression::ClassMember>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement {
    pub argument: Option<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub test: Expression,
    pub consequent: Statement,
    pub alternate: Option<Statement>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStatement {
    pub init: Option<ForInit>,
    pub test: Option<Expression>,
    pub update: Option<Expression>,
    pub body: Statement,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ForInit {
    VariableDecl(VariableDeclaration),
    Expression(Expression),
}

/// Covers both `for (… in …)` and `for (… of …)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForInStatement {
    pub left: ForTarget,
    pub right: Expression,
    pub body: Statement,
    pub is_of: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ForTarget {
    Declaration(VariableDeclaration),
    Expression(Expression),
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStatement {
    pub test: Expression,
    pub body: Statement,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DoWhileStatement {
    pub body: Statement,
    pub test: Expression,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockStatement {
    pub statements: Vec<Statement>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThrowStatement {
    pub argument: Expression,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TryStatement {
    pub block: Vec<Statement>,
    pub handler: Option<CatchClause>,
    pub finalizer: Option<Vec<Statement>>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatchClause {
    /// `catch {}` without a binding has no param.
    pub param: Option<Pattern>,
    pub body: Vec<Statement>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchStatement {
    pub discriminant: Expression,
    pub cases: Vec<SwitchCase>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCase {
    /// `None` for the `default:` clause.
    pub test: Option<Expression>,
    pub consequent: Vec<Statement>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportDeclaration {
    pub specifiers: Vec<ImportSpecifier>,
    pub source: Symbol,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportSpecifier {
    pub local: Identifier,
    pub kind: ImportKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImportKind {
    /// `import x from "m"`
    Default,
    /// `import { imported as local } from "m"`
    Named { imported: Symbol },
    /// `import * as x from "m"`
    Namespace,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportDeclaration {
    pub kind: ExportKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExportKind {
    /// `export const x = …`, `export function f() {}`, …
    Declaration(Statement),
    /// `export default expr`
    DefaultExpression(Expression),
    /// `export { a, b as c }`: the local names being exported.
    Named(Vec<Identifier>),
}

impl Statement {
    pub fn span(&self) -> Span {
        match self {
            Statement::Expression(s) => s.span,
            Statement::VariableDecl(s) => s.span,
            Statement::Function(s) => s.span,
            Statement::Class(s) => s.span,
            Statement::Return(s) => s.span,
            Statement::If(s) => s.span,
            Statement::For(s) => s.span,
            Statement::ForIn(s) => s.span,
            Statement::While(s) => s.span,
            Statement::DoWhile(s) => s.span,
            Statement::Block(s) => s.span,
            Statement::Break(span) => *span,
            Statement::Continue(span) => *span,
            Statement::Throw(s) => s.span,
            Statement::Try(s) => s.span,
            Statement::Switch(s) => s.span,
            Statement::Empty(span) => *span,
            Statement::Debugger(span) => *span,
            Statement::Import(s) => s.span,
            Statement::Export(s) => s.span,
        }
    }
}
