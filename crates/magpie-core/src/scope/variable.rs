//! Variables, declarations and references produced by scope analysis.

use crate::syntax::ast::ExprId;
use crate::syntax::interner::Symbol;
use crate::syntax::token::Span;
use rustc_hash::FxHashMap;

/// Identifies a variable within one [`ScopeInfo`](crate::scope::ScopeInfo).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarId(pub u32);

/// How a binding was introduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    /// `var x`
    Var,
    /// `let x`
    Let,
    /// `const x`
    Const,
    /// `function f() {}` or a named function expression's self-binding
    Function,
    /// `class C {}`
    Class,
    /// Function or method parameter
    Param,
    /// `catch (e)`
    CatchParam,
    /// `import … from "m"`
    Import,
}

/// A single declaration site of a variable.
#[derive(Debug, Clone)]
pub struct Declaration {
    pub kind: DeclKind,
    /// Span of the declared name.
    pub span: Span,
    /// The initializer expression, recorded only for plain-identifier
    /// declarators (`let x = init`). Destructuring declarators and all
    /// non-declarator bindings have no usable initializer.
    pub init: Option<ExprId>,
}

/// How a reference uses a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Read,
    /// Plain assignment target (`x = …`).
    Write,
    /// Compound assignment or update (`x += …`, `x++`).
    ReadWrite,
}

/// A resolved identifier reference.
#[derive(Debug, Clone)]
pub struct Reference {
    pub expr_id: ExprId,
    pub kind: ReferenceKind,
    pub span: Span,
}

/// A variable with all its declaration sites and references.
#[derive(Debug, Clone)]
pub struct Variable {
    pub id: VarId,
    pub name: Symbol,
    /// Scope the variable is bound in.
    pub scope: ScopeId,
    pub declarations: Vec<Declaration>,
    pub references: Vec<Reference>,
}

impl Variable {
    /// The declaration, when there is exactly one. Redeclared variables
    /// (`var x; var x;`) yield `None`.
    pub fn single_declaration(&self) -> Option<&Declaration> {
        match self.declarations.as_slice() {
            [declaration] => Some(declaration),
            _ => None,
        }
    }

    /// Number of references that write to the variable. Initializers in
    /// declarators are not references and do not count.
    pub fn write_count(&self) -> usize {
        self.references
            .iter()
            .filter(|r| matches!(r.kind, ReferenceKind::Write | ReferenceKind::ReadWrite))
            .count()
    }

    /// Whether the variable's value can be pinned to its initializer: a
    /// single plain declarator that is either `const` or never written
    /// after declaration.
    pub fn is_init_stable(&self) -> bool {
        let Some(declaration) = self.single_declaration() else {
            return false;
        };
        match declaration.kind {
            DeclKind::Const => declaration.init.is_some(),
            DeclKind::Var | DeclKind::Let => {
                declaration.init.is_some() && self.write_count() == 0
            }
            _ => false,
        }
    }
}

/// Scope identifier, an index into the scope table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(pub u32);

/// Scope kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    /// Top level of a file.
    Global,
    /// Function, method or arrow body. `var` hoists to the nearest
    /// scope of this kind (or global).
    Function,
    /// Braced block, loop head, switch body or catch clause.
    Block,
    /// Class body; holds the class's self-binding.
    Class,
}

/// A scope in the scope tree.
#[derive(Debug, Clone)]
pub struct Scope {
    pub id: ScopeId,
    pub kind: ScopeKind,
    /// Parent scope, `None` for the global scope.
    pub parent: Option<ScopeId>,
    /// Bindings introduced directly in this scope.
    pub bindings: FxHashMap<Symbol, VarId>,
}

impl Scope {
    pub fn new(id: ScopeId, kind: ScopeKind, parent: Option<ScopeId>) -> Self {
        Self {
            id,
            kind,
            parent,
            bindings: FxHashMap::default(),
        }
    }

    /// Whether `var` declarations land in this scope.
    pub fn is_var_boundary(&self) -> bool {
        matches!(self.kind, ScopeKind::Global | ScopeKind::Function)
    }
}
