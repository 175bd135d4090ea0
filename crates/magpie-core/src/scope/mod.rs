//! Scope analysis: binding, hoisting and reference resolution.
//!
//! [`ScopeInfo`] is the read-only product of the binder. The typing
//! layer asks it two questions: which variable does an identifier
//! reference resolve to, and is that variable's value pinned to its
//! initializer.

mod binder;
pub mod variable;

pub use variable::{
    DeclKind, Declaration, Reference, ReferenceKind, Scope, ScopeId, ScopeKind, VarId, Variable,
};

use crate::syntax::ast::{ExprId, Program};
use rustc_hash::FxHashMap;

/// The scope tree, variables and resolved references of one program.
pub struct ScopeInfo {
    scopes: Vec<Scope>,
    variables: Vec<Variable>,
    resolved: FxHashMap<ExprId, VarId>,
}

impl ScopeInfo {
    pub fn analyze(program: &Program) -> Self {
        binder::bind(program)
    }

    /// The variable an identifier expression resolves to. `None` means
    /// the name has no binding anywhere in the file, i.e. it refers to a
    /// global.
    pub fn resolve_reference(&self, expr_id: ExprId) -> Option<&Variable> {
        self.resolved
            .get(&expr_id)
            .map(|id| &self.variables[id.0 as usize])
    }

    pub fn variable(&self, id: VarId) -> &Variable {
        &self.variables[id.0 as usize]
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0 as usize]
    }

    pub fn global_scope(&self) -> &Scope {
        &self.scopes[0]
    }

    pub fn scopes(&self) -> impl Iterator<Item = &Scope> {
        self.scopes.iter()
    }

    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.variables.iter()
    }
}
