//! Syntactic type inference.
//!
//! Computes a [`TypeTag`] for an expression from tree shape and scope
//! information alone. The answer is `None` whenever the type cannot be
//! pinned down, and callers treat `None` as "unknown", never as an
//! error. Results are memoized per expression id, and the cache doubles
//! as the cycle guard: an entry is seeded to `None` before descending
//! into a node, so an initializer chain that loops back on itself reads
//! the sentinel and collapses to unknown.

use std::cell::{Cell, RefCell};

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::scope::{DeclKind, ScopeInfo};
use crate::syntax::ast::expression::{
    AssignmentOperator, BinaryOperator, IdentifierExpression, UnaryOperator,
};
use crate::syntax::ast::index::ExprIndex;
use crate::syntax::ast::{ExprId, Expression};
use crate::syntax::Interner;

use super::globals::{self, WellKnownGlobal};
use super::tag::TypeTag;

/// Bound on inference recursion through initializer chains. Past it the
/// result degrades to unknown instead of overflowing the stack.
const MAX_INFER_DEPTH: usize = 128;

/// Memoizing expression type inferencer for one parsed program.
pub struct TypeInferencer<'a> {
    index: &'a ExprIndex<'a>,
    scopes: &'a ScopeInfo,
    interner: &'a Interner,
    cache: RefCell<FxHashMap<ExprId, Option<TypeTag>>>,
    depth: Cell<usize>,
}

impl<'a> TypeInferencer<'a> {
    pub fn new(index: &'a ExprIndex<'a>, scopes: &'a ScopeInfo, interner: &'a Interner) -> Self {
        Self {
            index,
            scopes,
            interner,
            cache: RefCell::new(FxHashMap::default()),
            depth: Cell::new(0),
        }
    }

    /// Infer the type of an expression, or `None` when it is unknown.
    pub fn infer(&self, expression: &Expression) -> Option<TypeTag> {
        let expression = expression.unwrap_transparent();
        let id = expression.id();
        if let Some(cached) = self.cache.borrow().get(&id).copied() {
            // Either a finished result or the in-progress sentinel; a
            // sentinel hit means we looped back into this node.
            return cached;
        }
        if self.depth.get() >= MAX_INFER_DEPTH {
            debug!("inference depth limit hit at expression {}, giving up", id.0);
            return None;
        }
        self.cache.borrow_mut().insert(id, None);
        self.depth.set(self.depth.get() + 1);
        let result = self.infer_shape(expression);
        self.depth.set(self.depth.get() - 1);
        trace!("inferred {:?} for expression {}", result, id.0);
        self.cache.borrow_mut().insert(id, result);
        result
    }

    fn infer_shape(&self, expression: &Expression) -> Option<TypeTag> {
        match expression {
            Expression::Number(_) => Some(TypeTag::Number),
            Expression::BigInt(_) => Some(TypeTag::BigInt),
            Expression::String(_) => Some(TypeTag::String),
            Expression::Boolean(_) => Some(TypeTag::Boolean),
            Expression::Null(_) => Some(TypeTag::Null),
            Expression::RegExp(_) => Some(TypeTag::RegExp),
            Expression::Template(_) => Some(TypeTag::String),
            Expression::Array(_) => Some(TypeTag::Array),
            Expression::Object(_) => Some(TypeTag::Object),
            Expression::Function(_) => Some(TypeTag::Function),
            Expression::Arrow(_) => Some(TypeTag::Function),
            Expression::Class(_) => Some(TypeTag::Function),
            Expression::Identifier(ident) => self.infer_identifier(ident),
            Expression::Unary(unary) => self.infer_unary(unary.operator, &unary.operand),
            Expression::Update(_) => Some(TypeTag::Number),
            Expression::Binary(binary) => {
                self.infer_binary(binary.operator, &binary.left, &binary.right)
            }
            Expression::Logical(logical) => self.agreement(&logical.left, &logical.right),
            Expression::Assignment(assignment) => {
                self.infer_assignment(assignment.operator, &assignment.target, &assignment.value)
            }
            Expression::Conditional(conditional) => {
                self.agreement(&conditional.consequent, &conditional.alternate)
            }
            Expression::Sequence(sequence) => {
                let last = sequence.expressions.last()?;
                self.infer(last)
            }
            Expression::Call(call) => self.callee_return_type(&call.callee),
            Expression::New(new) => self.callee_return_type(&new.callee),
            Expression::TaggedTemplate(tagged) => self.callee_return_type(&tagged.tag),
            // Member reads, `this`, `await` and the rest have no
            // syntactically evident type.
            _ => None,
        }
    }

    /// Identifier typing: a binding pinned to its sole initializer takes
    /// the initializer's type, a function declaration is a `Function`,
    /// and an undeclared name falls back to the well-known globals.
    fn infer_identifier(&self, ident: &IdentifierExpression) -> Option<TypeTag> {
        match self.scopes.resolve_reference(ident.id) {
            Some(variable) => {
                let declaration = variable.single_declaration()?;
                if declaration.kind == DeclKind::Function {
                    return Some(TypeTag::Function);
                }
                if variable.is_init_stable() {
                    let init = self.index.get(declaration.init?)?;
                    return self.infer(init);
                }
                None
            }
            None => globals::lookup(self.interner.resolve(ident.name))
                .map(WellKnownGlobal::reference_type),
        }
    }

    fn infer_unary(&self, operator: UnaryOperator, operand: &Expression) -> Option<TypeTag> {
        match operator {
            UnaryOperator::Not | UnaryOperator::Delete => Some(TypeTag::Boolean),
            UnaryOperator::Plus => Some(TypeTag::Number),
            UnaryOperator::Minus | UnaryOperator::BitNot => match self.infer(operand)? {
                TypeTag::BigInt => Some(TypeTag::BigInt),
                _ => Some(TypeTag::Number),
            },
            UnaryOperator::Typeof => Some(TypeTag::String),
            UnaryOperator::Void => Some(TypeTag::Undefined),
        }
    }

    fn infer_binary(
        &self,
        operator: BinaryOperator,
        left: &Expression,
        right: &Expression,
    ) -> Option<TypeTag> {
        match operator {
            BinaryOperator::Add => self.addition(left, right),
            BinaryOperator::Equal
            | BinaryOperator::NotEqual
            | BinaryOperator::StrictEqual
            | BinaryOperator::StrictNotEqual
            | BinaryOperator::Less
            | BinaryOperator::LessEqual
            | BinaryOperator::Greater
            | BinaryOperator::GreaterEqual
            | BinaryOperator::In
            | BinaryOperator::Instanceof => Some(TypeTag::Boolean),
            BinaryOperator::Subtract
            | BinaryOperator::Multiply
            | BinaryOperator::Divide
            | BinaryOperator::Modulo
            | BinaryOperator::Exponent
            | BinaryOperator::BitAnd
            | BinaryOperator::BitOr
            | BinaryOperator::BitXor => self.arithmetic(left, right),
            BinaryOperator::ShiftLeft
            | BinaryOperator::ShiftRight
            | BinaryOperator::ShiftRightUnsigned => Some(TypeTag::Number),
        }
    }

    fn infer_assignment(
        &self,
        operator: AssignmentOperator,
        target: &Expression,
        value: &Expression,
    ) -> Option<TypeTag> {
        match operator {
            AssignmentOperator::Assign => self.infer(value),
            AssignmentOperator::Add => self.addition(target, value),
            AssignmentOperator::Subtract
            | AssignmentOperator::Multiply
            | AssignmentOperator::Divide
            | AssignmentOperator::Modulo
            | AssignmentOperator::Exponent
            | AssignmentOperator::BitAnd
            | AssignmentOperator::BitOr
            | AssignmentOperator::BitXor => self.arithmetic(target, value),
            AssignmentOperator::ShiftLeft
            | AssignmentOperator::ShiftRight
            | AssignmentOperator::ShiftRightUnsigned => Some(TypeTag::Number),
            AssignmentOperator::And | AssignmentOperator::Or | AssignmentOperator::Nullish => {
                self.agreement(target, value)
            }
        }
    }

    /// `+` typing. A string operand forces string concatenation and a
    /// bigint operand forces bigint arithmetic. After that the ladder
    /// leans right: a numeric right side means numeric addition, an
    /// unknown right side gives up, and any other known right side is
    /// assumed to stringify.
    fn addition(&self, left: &Expression, right: &Expression) -> Option<TypeTag> {
        let left = self.infer(left);
        let right = self.infer(right);
        if left == Some(TypeTag::String) || right == Some(TypeTag::String) {
            return Some(TypeTag::String);
        }
        if left == Some(TypeTag::BigInt) || right == Some(TypeTag::BigInt) {
            return Some(TypeTag::BigInt);
        }
        if right == Some(TypeTag::Number) {
            return Some(TypeTag::Number);
        }
        if left == Some(TypeTag::Number)
            && matches!(right, Some(TypeTag::Null) | Some(TypeTag::Undefined))
        {
            return Some(TypeTag::Number);
        }
        right?;
        Some(TypeTag::String)
    }

    /// Arithmetic and bitwise typing: bigint if either side is bigint,
    /// unknown only when both sides are unknown, numeric otherwise.
    fn arithmetic(&self, left: &Expression, right: &Expression) -> Option<TypeTag> {
        let left = self.infer(left);
        let right = self.infer(right);
        if left == Some(TypeTag::BigInt) || right == Some(TypeTag::BigInt) {
            return Some(TypeTag::BigInt);
        }
        if left.is_none() && right.is_none() {
            return None;
        }
        Some(TypeTag::Number)
    }

    /// Branch typing for `?:` and the logical operators: the common type
    /// when both sides agree, unknown otherwise.
    fn agreement(&self, left: &Expression, right: &Expression) -> Option<TypeTag> {
        let left = self.infer(left);
        let right = self.infer(right);
        if left == right {
            left
        } else {
            None
        }
    }

    /// Return type of calling, constructing, or tagging with `callee`.
    /// Only a bare well-known constructor or a dotted member of a
    /// well-known namespace resolves; everything else is unknown.
    fn callee_return_type(&self, callee: &Expression) -> Option<TypeTag> {
        match callee.unwrap_transparent() {
            Expression::Identifier(ident) => {
                if !self.is_global_reference(ident) {
                    return None;
                }
                globals::lookup(self.interner.resolve(ident.name))?.construction_type()
            }
            Expression::Member(member) => {
                let Expression::Identifier(object) = member.object.unwrap_transparent() else {
                    return None;
                };
                if !self.is_global_reference(object) {
                    return None;
                }
                let namespace = globals::lookup(self.interner.resolve(object.name))?;
                namespace
                    .member(self.interner.resolve(member.property.name))?
                    .construction_type()
            }
            _ => None,
        }
    }

    /// Whether the identifier reaches the global environment rather than
    /// a local binding. Shadowed names resolve locally and fail this.
    fn is_global_reference(&self, ident: &IdentifierExpression) -> bool {
        self.scopes.resolve_reference(ident.id).is_none()
    }
}
