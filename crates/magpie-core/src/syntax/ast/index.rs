//! Dense lookup from expression ids to their nodes.

use crate::syntax::ast::visitor::{walk_expression, Visitor};
use crate::syntax::ast::{ExprId, Expression, Program};
use rustc_hash::FxHashMap;

/// Maps every [`ExprId`] in a program back to its expression node.
///
/// The inferencer uses this to jump from a binding's recorded initializer
/// id to the initializer expression itself.
pub struct ExprIndex<'ast> {
    nodes: FxHashMap<ExprId, &'ast Expression>,
}

impl<'ast> ExprIndex<'ast> {
    pub fn build(program: &'ast Program) -> Self {
        let mut builder = IndexBuilder {
            nodes: FxHashMap::default(),
        };
        builder.visit_program(program);
        Self {
            nodes: builder.nodes,
        }
    }

    pub fn get(&self, id: ExprId) -> Option<&'ast Expression> {
        self.nodes.get(&id).copied()
    }

    /// All indexed expressions, in no particular order.
    pub fn expressions(&self) -> impl Iterator<Item = &'ast Expression> + '_ {
        self.nodes.values().copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

struct IndexBuilder<'ast> {
    nodes: FxHashMap<ExprId, &'ast Expression>,
}

impl<'ast> Visitor<'ast> for IndexBuilder<'ast> {
    fn visit_expression(&mut self, expression: &'ast Expression) {
        self.nodes.insert(expression.id(), expression);
        walk_expression(self, expression);
    }
}
