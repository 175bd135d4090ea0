//! Expression nodes.

use crate::syntax::ast::pattern::Pattern;
use crate::syntax::ast::statement::Statement;
use crate::syntax::ast::{ExprId, Identifier};
use crate::syntax::interner::Symbol;
use crate::syntax::token::Span;

/// An ECMAScript expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Number(Box<NumberLiteral>),
    BigInt(Box<BigIntLiteral>),
    String(Box<StringLiteral>),
    Boolean(Box<BooleanLiteral>),
    Null(Box<NullLiteral>),
    RegExp(Box<RegExpLiteral>),
    Template(Box<TemplateLiteral>),
    TaggedTemplate(Box<TaggedTemplateExpression>),
    Identifier(Box<IdentifierExpression>),
    Array(Box<ArrayLiteral>),
    Object(Box<ObjectLiteral>),
    Function(Box<FunctionExpression>),
    Arrow(Box<ArrowFunctionExpression>),
    Class(Box<ClassExpression>),
    Unary(Box<UnaryExpression>),
    Update(Box<UpdateExpression>),
    Binary(Box<BinaryExpression>),
    Logical(Box<LogicalExpression>),
    Assignment(Box<AssignmentExpression>),
    Conditional(Box<ConditionalExpression>),
    Sequence(Box<SequenceExpression>),
    Call(Box<CallExpression>),
    New(Box<NewExpression>),
    Member(Box<MemberExpression>),
    Index(Box<IndexExpression>),
    Chain(Box<ChainExpression>),
    Paren(Box<ParenExpression>),
    This(Box<ThisExpression>),
    Super(Box<SuperExpression>),
    Await(Box<AwaitExpression>),
    Yield(Box<YieldExpression>),
    Spread(Box<SpreadElement>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumberLiteral {
    pub value: f64,
    pub id: ExprId,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BigIntLiteral {
    pub digits: Symbol,
    pub id: ExprId,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StringLiteral {
    pub value: Symbol,
    pub id: ExprId,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BooleanLiteral {
    pub value: bool,
    pub id: ExprId,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NullLiteral {
    pub id: ExprId,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegExpLiteral {
    pub pattern: Symbol,
    pub flags: Symbol,
    pub id: ExprId,
    pub span: Span,
}

/// A template literal. `quasis` holds the cooked string parts; there is
/// always one more quasi than there are interpolated expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateLiteral {
    pub quasis: Vec<Symbol>,
    pub expressions: Vec<Expression>,
    pub id: ExprId,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaggedTemplateExpression {
    pub tag: Expression,
    pub template: TemplateLiteral,
    pub id: ExprId,
    pub span: Span,
}

/// An identifier in expression position, i.e. a variable reference.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentifierExpression {
    pub name: Symbol,
    pub id: ExprId,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayLiteral {
    /// `None` entries are elisions (`[1, , 3]`).
    pub elements: Vec<Option<Expression>>,
    pub id: ExprId,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectLiteral {
    pub members: Vec<ObjectMember>,
    pub id: ExprId,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ObjectMember {
    /// `key: value`, including methods (`key(…) {…}` parses with a
    /// function expression as the value).
    Property(Box<PropertyDefinition>),
    /// `{ a }`: the expression is always an identifier reference.
    Shorthand(Expression),
    /// `{ ...rest }`
    Spread(Expression),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDefinition {
    pub key: PropertyKey,
    pub value: Expression,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKey {
    Identifier(Identifier),
    String(Symbol, Span),
    Number(f64, Span),
    Computed(Expression),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionExpression {
    pub name: Option<Identifier>,
    pub params: Vec<Pattern>,
    pub body: Vec<Statement>,
    pub is_async: bool,
    pub is_generator: bool,
    pub id: ExprId,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrowFunctionExpression {
    pub params: Vec<Pattern>,
    pub body: ArrowBody,
    pub is_async: bool,
    pub id: ExprId,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArrowBody {
    Expression(Expression),
    Block(Vec<Statement>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassExpression {
    pub name: Option<Identifier>,
    pub superclass: Option<Expression>,
    pub body: Vec<ClassMember>,
    pub id: ExprId,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassMember {
    pub key: PropertyKey,
    pub kind: ClassMemberKind,
    pub is_static: bool,
    /// Method/accessor bodies are function expressions; field
    /// initializers are arbitrary expressions; bare field declarations
    /// have no value.
    pub value: Option<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassMemberKind {
    Method,
    Getter,
    Setter,
    Field,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpression {
    pub operator: UnaryOperator,
    pub operand: Expression,
    pub id: ExprId,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Minus,
    Plus,
    Not,
    BitNot,
    Typeof,
    Void,
    Delete,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateExpression {
    pub operator: UpdateOperator,
    pub operand: Expression,
    pub prefix: bool,
    pub id: ExprId,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOperator {
    Increment,
    Decrement,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpression {
    pub operator: BinaryOperator,
    pub left: Expression,
    pub right: Expression,
    pub id: ExprId,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Equal,
    NotEqual,
    StrictEqual,
    StrictNotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    ShiftLeft,
    ShiftRight,
    ShiftRightUnsigned,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Exponent,
    BitAnd,
    BitOr,
    BitXor,
    In,
    Instanceof,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogicalExpression {
    pub operator: LogicalOperator,
    pub left: Expression,
    pub right: Expression,
    pub id: ExprId,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOperator {
    And,
    Or,
    Nullish,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentExpression {
    pub operator: AssignmentOperator,
    /// The target is an expression (identifier, member access, or a
    /// destructuring array/object literal).
    pub target: Expression,
    pub value: Expression,
    pub id: ExprId,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentOperator {
    Assign,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Exponent,
    ShiftLeft,
    ShiftRight,
    ShiftRightUnsigned,
    BitAnd,
    BitOr,
    BitXor,
    And,
    Or,
    Nullish,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalExpression {
    pub test: Expression,
    pub consequent: Expression,
    pub alternate: Expression,
    pub id: ExprId,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SequenceExpression {
    pub expressions: Vec<Expression>,
    pub id: ExprId,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpression {
    pub callee: Expression,
    pub arguments: Vec<Expression>,
    /// True for `f?.(x)`.
    pub optional: bool,
    pub id: ExprId,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewExpression {
    pub callee: Expression,
    pub arguments: Vec<Expression>,
    pub id: ExprId,
    pub span: Span,
}

/// Non-computed member access, `object.property`.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberExpression {
    pub object: Expression,
    pub property: Identifier,
    /// True for `object?.property`.
    pub optional: bool,
    pub id: ExprId,
    pub span: Span,
}

/// Computed member access, `object[index]`.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexExpression {
    pub object: Expression,
    pub index: Expression,
    /// True for `object?.[index]`.
    pub optional: bool,
    pub id: ExprId,
    pub span: Span,
}

/// Wrapper around the outermost node of an optional chain.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainExpression {
    pub expression: Expression,
    pub id: ExprId,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParenExpression {
    pub expression: Expression,
    pub id: ExprId,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThisExpression {
    pub id: ExprId,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SuperExpression {
    pub id: ExprId,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AwaitExpression {
    pub argument: Expression,
    pub id: ExprId,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct YieldExpression {
    pub argument: Option<Expression>,
    pub delegate: bool,
    pub id: ExprId,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpreadElement {
    pub argument: Expression,
    pub id: ExprId,
    pub span: Span,
}

impl Expression {
    pub fn id(&self) -> ExprId {
        match self {
            Expression::Number(e) => e.id,
            Expression::BigInt(e) => e.id,
            Expression::String(e) => e.id,
            Expression::Boolean(e) => e.id,
            Expression::Null(e) => e.id,
            Expression::RegExp(e) => e.id,
            Expression::Template(e) => e.id,
            Expression::TaggedTemplate(e) => e.id,
            Expression::Identifier(e) => e.id,
            Expression::Array(e) => e.id,
            Expression::Object(e) => e.id,
            Expression::Function(e) => e.id,
            Expression::Arrow(e) => e.id,
            Expression::Class(e) => e.id,
            Expression::Unary(e) => e.id,
            Expression::Update(e) => e.id,
            Expression::Binary(e) => e.id,
            Expression::Logical(e) => e.id,
            Expression::Assignment(e) => e.id,
            Expression::Conditional(e) => e.id,
            Expression::Sequence(e) => e.id,
            Expression::Call(e) => e.id,
            Expression::New(e) => e.id,
            Expression::Member(e) => e.id,
            Expression::Index(e) => e.id,
            Expression::Chain(e) => e.id,
            Expression::Paren(e) => e.id,
            Expression::This(e) => e.id,
            Expression::Super(e) => e.id,
            Expression::Await(e) => e.id,
            Expression::Yield(e) => e.id,
            Expression::Spread(e) => e.id,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Expression::Number(e) => e.span,
            Expression::BigInt(e) => e.span,
            Expression::String(e) => e.span,
            Expression::Boolean(e) => e.span,
            Expression::Null(e) => e.span,
            Expression::RegExp(e) => e.span,
            Expression::Template(e) => e.span,
            Expression::TaggedTemplate(e) => e.span,
            Expression::Identifier(e) => e.span,
            Expression::Array(e) => e.span,
            Expression::Object(e) => e.span,
            Expression::Function(e) => e.span,
            Expression::Arrow(e) => e.span,
            Expression::Class(e) => e.span,
            Expression::Unary(e) => e.span,
            Expression::Update(e) => e.span,
            Expression::Binary(e) => e.span,
            Expression::Logical(e) => e.span,
            Expression::Assignment(e) => e.span,
            Expression::Conditional(e) => e.span,
            Expression::Sequence(e) => e.span,
            Expression::Call(e) => e.span,
            Expression::New(e) => e.span,
            Expression::Member(e) => e.span,
            Expression::Index(e) => e.span,
            Expression::Chain(e) => e.span,
            Expression::Paren(e) => e.span,
            Expression::This(e) => e.span,
            Expression::Super(e) => e.span,
            Expression::Await(e) => e.span,
            Expression::Yield(e) => e.span,
            Expression::Spread(e) => e.span,
        }
    }

    /// Strips parentheses and chain wrappers, both of which are
    /// transparent for typing and matching purposes.
    pub fn unwrap_transparent(&self) -> &Expression {
        match self {
            Expression::Paren(e) => e.expression.unwrap_transparent(),
            Expression::Chain(e) => e.expression.unwrap_transparent(),
            other => other,
        }
    }
}
