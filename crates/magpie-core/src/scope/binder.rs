//! The binder walks a program once, building the scope tree and
//! resolving identifier references.
//!
//! References are not resolved at the point they are seen. Each open
//! scope keeps a pending list; when a scope closes, references that
//! match one of its bindings are resolved and the rest bubble up to the
//! parent. Hoisting needs no separate pass this way: by the time a scope
//! closes, every declaration in it has been recorded, so a use that
//! precedes its declaration in source order still resolves.

use crate::scope::variable::{
    DeclKind, Declaration, Reference, ReferenceKind, Scope, ScopeId, ScopeKind, VarId, Variable,
};
use crate::scope::ScopeInfo;
use crate::syntax::ast::expression::*;
use crate::syntax::ast::pattern::{ObjectPatternProperty, Pattern};
use crate::syntax::ast::statement::*;
use crate::syntax::ast::{ExprId, Identifier, Program};
use crate::syntax::interner::Symbol;
use crate::syntax::token::Span;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

struct PendingRef {
    name: Symbol,
    expr_id: ExprId,
    kind: ReferenceKind,
    span: Span,
}

struct Frame {
    scope: ScopeId,
    pending: Vec<PendingRef>,
}

pub(super) struct Binder {
    scopes: Vec<Scope>,
    variables: Vec<Variable>,
    resolved: FxHashMap<ExprId, VarId>,
    frames: Vec<Frame>,
}

pub(super) fn bind(program: &Program) -> ScopeInfo {
    let mut binder = Binder::new();
    for statement in &program.statements {
        binder.bind_statement(statement);
    }
    let info = binder.finish();
    debug!(
        "bound {} scopes, {} variables, {} resolved references",
        info.scopes.len(),
        info.variables.len(),
        info.resolved.len()
    );
    info
}

impl Binder {
    fn new() -> Self {
        let global = Scope::new(ScopeId(0), ScopeKind::Global, None);
        Binder {
            scopes: vec![global],
            variables: Vec::new(),
            resolved: FxHashMap::default(),
            frames: vec![Frame {
                scope: ScopeId(0),
                pending: Vec::new(),
            }],
        }
    }

    fn finish(mut self) -> ScopeInfo {
        // Close the global scope; anything still pending afterwards is a
        // reference to an undeclared (global) name and stays unresolved.
        let unresolved = self.resolve_frame_bindings();
        if !unresolved.is_empty() {
            trace!("{} references resolve to globals", unresolved.len());
        }
        ScopeInfo {
            scopes: self.scopes,
            variables: self.variables,
            resolved: self.resolved,
        }
    }

    // ── scope management ──

    fn current_scope(&self) -> ScopeId {
        self.frames
            .last()
            .map(|f| f.scope)
            .unwrap_or(ScopeId(0))
    }

    fn push_scope(&mut self, kind: ScopeKind) {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes
            .push(Scope::new(id, kind, Some(self.current_scope())));
        self.frames.push(Frame {
            scope: id,
            pending: Vec::new(),
        });
    }

    fn pop_scope(&mut self) {
        let unresolved = self.resolve_frame_bindings();
        if let Some(frame) = self.frames.last_mut() {
            frame.pending.extend(unresolved);
        }
    }

    /// Resolve the top frame's pending references against its scope's
    /// bindings, popping the frame. Returns references that did not
    /// match.
    fn resolve_frame_bindings(&mut self) -> Vec<PendingRef> {
        let Some(frame) = self.frames.pop() else {
            return Vec::new();
        };
        let mut unresolved = Vec::new();
        for pending in frame.pending {
            match self.scopes[frame.scope.0 as usize].bindings.get(&pending.name) {
                Some(&var_id) => {
                    self.resolved.insert(pending.expr_id, var_id);
                    self.variables[var_id.0 as usize].references.push(Reference {
                        expr_id: pending.expr_id,
                        kind: pending.kind,
                        span: pending.span,
                    });
                }
                None => unresolved.push(pending),
            }
        }
        unresolved
    }

    /// Declare a binding. `var` declarations land in the nearest
    /// function or global scope; everything else binds in the current
    /// scope. Redeclaring a name in the same scope adds a declaration
    /// site to the existing variable.
    fn declare(&mut self, name: Symbol, kind: DeclKind, span: Span, init: Option<ExprId>) {
        let mut scope_id = self.current_scope();
        if kind == DeclKind::Var {
            while !self.scopes[scope_id.0 as usize].is_var_boundary() {
                match self.scopes[scope_id.0 as usize].parent {
                    Some(parent) => scope_id = parent,
                    None => break,
                }
            }
        }

        let declaration = Declaration { kind, span, init };
        match self.scopes[scope_id.0 as usize].bindings.get(&name) {
            Some(&existing) => {
                self.variables[existing.0 as usize]
                    .declarations
                    .push(declaration);
            }
            None => {
                let var_id = VarId(self.variables.len() as u32);
                self.variables.push(Variable {
                    id: var_id,
                    name,
                    scope: scope_id,
                    declarations: vec![declaration],
                    references: Vec::new(),
                });
                self.scopes[scope_id.0 as usize].bindings.insert(name, var_id);
            }
        }
    }

    fn reference(&mut self, name: Symbol, expr_id: ExprId, kind: ReferenceKind, span: Span) {
        if let Some(frame) = self.frames.last_mut() {
            frame.pending.push(PendingRef {
                name,
                expr_id,
                kind,
                span,
            });
        }
    }

    // ── statements ──

    fn bind_statement(&mut self, statement: &Statement) {
        match statement {
            Statement::Expression(stmt) => self.bind_expression(&stmt.expression),
            Statement::VariableDecl(decl) => self.bind_variable_declaration(decl),
            Statement::Function(decl) => {
                self.declare(decl.name.name, DeclKind::Function, decl.name.span, None);
                self.push_scope(ScopeKind::Function);
                self.bind_params(&decl.params);
                for statement in &decl.body {
                    self.bind_statement(statement);
                }
                self.pop_scope();
            }
            Statement::Class(decl) => {
                if let Some(superclass) = &decl.superclass {
                    self.bind_expression(superclass);
                }
                self.declare(decl.name.name, DeclKind::Class, decl.name.span, None);
                self.push_scope(ScopeKind::Class);
                self.declare(decl.name.name, DeclKind::Class, decl.name.span, None);
                self.bind_class_members(&decl.body);
                self.pop_scope();
            }
            Statement::Return(stmt) => {
                if let Some(argument) = &stmt.argument {
                    self.bind_expression(argument);
                }
            }
            Statement::If(stmt) => {
                self.bind_expression(&stmt.test);
                self.bind_statement(&stmt.consequent);
                if let Some(alternate) = &stmt.alternate {
                    self.bind_statement(alternate);
                }
            }
            Statement::For(stmt) => {
                self.push_scope(ScopeKind::Block);
                match &stmt.init {
                    Some(ForInit::VariableDecl(decl)) => self.bind_variable_declaration(decl),
                    Some(ForInit::Expression(expr)) => self.bind_expression(expr),
                    None => {}
                }
                if let Some(test) = &stmt.test {
                    self.bind_expression(test);
                }
                if let Some(update) = &stmt.update {
                    self.bind_expression(update);
                }
                self.bind_statement(&stmt.body);
                self.pop_scope();
            }
            Statement::ForIn(stmt) => {
                self.push_scope(ScopeKind::Block);
                match &stmt.left {
                    ForTarget::Declaration(decl) => self.bind_variable_declaration(decl),
                    ForTarget::Expression(expr) => self.bind_assignment_target(expr, false),
                }
                self.bind_expression(&stmt.right);
                self.bind_statement(&stmt.body);
                self.pop_scope();
            }
            Statement::While(stmt) => {
                self.bind_expression(&stmt.test);
                self.bind_statement(&stmt.body);
            }
            Statement::DoWhile(stmt) => {
                self.bind_statement(&stmt.body);
                self.bind_expression(&stmt.test);
            }
            Statement::Block(stmt) => {
                self.push_scope(ScopeKind::Block);
                for statement in &stmt.statements {
                    self.bind_statement(statement);
                }
                self.pop_scope();
            }
            Statement::Throw(stmt) => self.bind_expression(&stmt.argument),
            Statement::Try(stmt) => {
                self.push_scope(ScopeKind::Block);
                for statement in &stmt.block {
                    self.bind_statement(statement);
                }
                self.pop_scope();

                if let Some(handler) = &stmt.handler {
                    self.push_scope(ScopeKind::Block);
                    if let Some(param) = &handler.param {
                        self.declare_pattern(param, DeclKind::CatchParam, None);
                        self.bind_pattern_expressions(param);
                    }
                    for statement in &handler.body {
                        self.bind_statement(statement);
                    }
                    self.pop_scope();
                }

                if let Some(finalizer) = &stmt.finalizer {
                    self.push_scope(ScopeKind::Block);
                    for statement in finalizer {
                        self.bind_statement(statement);
                    }
                    self.pop_scope();
                }
            }
            Statement::Switch(stmt) => {
                self.bind_expression(&stmt.discriminant);
                self.push_scope(ScopeKind::Block);
                for case in &stmt.cases {
                    if let Some(test) = &case.test {
                        self.bind_expression(test);
                    }
                    for statement in &case.consequent {
                        self.bind_statement(statement);
                    }
                }
                self.pop_scope();
            }
            Statement::Import(decl) => {
                for specifier in &decl.specifiers {
                    self.declare(
                        specifier.local.name,
                        DeclKind::Import,
                        specifier.local.span,
                        None,
                    );
                }
            }
            Statement::Export(decl) => match &decl.kind {
                ExportKind::Declaration(statement) => self.bind_statement(statement),
                ExportKind::DefaultExpression(expression) => self.bind_expression(expression),
                ExportKind::Named(_) => {}
            },
            Statement::Break(_)
            | Statement::Continue(_)
            | Statement::Empty(_)
            | Statement::Debugger(_) => {}
        }
    }

    fn bind_variable_declaration(&mut self, declaration: &VariableDeclaration) {
        let kind = match declaration.kind {
            DeclarationKind::Var => DeclKind::Var,
            DeclarationKind::Let => DeclKind::Let,
            DeclarationKind::Const => DeclKind::Const,
        };
        for declarator in &declaration.declarators {
            // Only a plain `name = init` declarator pins the initializer
            // to the variable.
            let init = match (&declarator.pattern, &declarator.init) {
                (Pattern::Identifier(_), Some(init)) => Some(init.id()),
                _ => None,
            };
            self.declare_pattern(&declarator.pattern, kind, init);
            if let Some(init) = &declarator.init {
                self.bind_expression(init);
            }
            self.bind_pattern_expressions(&declarator.pattern);
        }
    }

    /// Declare every identifier bound by a pattern. Defaults and
    /// computed keys are walked separately by
    /// [`bind_pattern_expressions`].
    fn declare_pattern(&mut self, pattern: &Pattern, kind: DeclKind, init: Option<ExprId>) {
        match pattern {
            Pattern::Identifier(Identifier { name, span }) => {
                self.declare(*name, kind, *span, init);
            }
            Pattern::Array(array) => {
                for element in array.elements.iter().flatten() {
                    self.declare_pattern(element, kind, None);
                }
            }
            Pattern::Object(object) => {
                for ObjectPatternProperty { value, .. } in &object.properties {
                    self.declare_pattern(value, kind, None);
                }
                if let Some(rest) = &object.rest {
                    self.declare_pattern(rest, kind, None);
                }
            }
            Pattern::Assignment(assignment) => {
                self.declare_pattern(&assignment.target, kind, None);
            }
            Pattern::Rest(rest) => self.declare_pattern(&rest.argument, kind, None),
        }
    }

    /// Walk the expressions embedded in a pattern: defaults and computed
    /// property keys.
    fn bind_pattern_expressions(&mut self, pattern: &Pattern) {
        match pattern {
            Pattern::Identifier(_) => {}
            Pattern::Array(array) => {
                for element in array.elements.iter().flatten() {
                    self.bind_pattern_expressions(element);
                }
            }
            Pattern::Object(object) => {
                for property in &object.properties {
                    if let PropertyKey::Computed(key) = &property.key {
                        self.bind_expression(key);
                    }
                    self.bind_pattern_expressions(&property.value);
                }
                if let Some(rest) = &object.rest {
                    self.bind_pattern_expressions(rest);
                }
            }
            Pattern::Assignment(assignment) => {
                self.bind_pattern_expressions(&assignment.target);
                self.bind_expression(&assignment.default);
            }
            Pattern::Rest(rest) => self.bind_pattern_expressions(&rest.argument),
        }
    }

    fn bind_params(&mut self, params: &[Pattern]) {
        for param in params {
            self.declare_pattern(param, DeclKind::Param, None);
        }
        for param in params {
            self.bind_pattern_expressions(param);
        }
    }

    fn bind_class_members(&mut self, members: &[ClassMember]) {
        for member in members {
            if let PropertyKey::Computed(key) = &member.key {
                self.bind_expression(key);
            }
            if let Some(value) = &member.value {
                self.bind_expression(value);
            }
        }
    }

    // ── expressions ──

    fn bind_expression(&mut self, expression: &Expression) {
        match expression {
            Expression::Identifier(expr) => {
                self.reference(expr.name, expr.id, ReferenceKind::Read, expr.span);
            }
            Expression::Number(_)
            | Expression::BigInt(_)
            | Expression::String(_)
            | Expression::Boolean(_)
            | Expression::Null(_)
            | Expression::RegExp(_)
            | Expression::This(_)
            | Expression::Super(_) => {}
            Expression::Template(expr) => {
                for expression in &expr.expressions {
                    self.bind_expression(expression);
                }
            }
            Expression::TaggedTemplate(expr) => {
                self.bind_expression(&expr.tag);
                for expression in &expr.template.expressions {
                    self.bind_expression(expression);
                }
            }
            Expression::Array(expr) => {
                for element in expr.elements.iter().flatten() {
                    self.bind_expression(element);
                }
            }
            Expression::Object(expr) => {
                for member in &expr.members {
                    match member {
                        ObjectMember::Property(property) => {
                            if let PropertyKey::Computed(key) = &property.key {
                                self.bind_expression(key);
                            }
                            self.bind_expression(&property.value);
                        }
                        ObjectMember::Shorthand(value) | ObjectMember::Spread(value) => {
                            self.bind_expression(value);
                        }
                    }
                }
            }
            Expression::Function(expr) => {
                self.push_scope(ScopeKind::Function);
                // A named function expression binds its own name inside
                // itself only.
                if let Some(name) = &expr.name {
                    self.declare(name.name, DeclKind::Function, name.span, None);
                }
                self.bind_params(&expr.params);
                for statement in &expr.body {
                    self.bind_statement(statement);
                }
                self.pop_scope();
            }
            Expression::Arrow(expr) => {
                self.push_scope(ScopeKind::Function);
                self.bind_params(&expr.params);
                match &expr.body {
                    ArrowBody::Expression(body) => self.bind_expression(body),
                    ArrowBody::Block(body) => {
                        for statement in body {
                            self.bind_statement(statement);
                        }
                    }
                }
                self.pop_scope();
            }
            Expression::Class(expr) => {
                if let Some(superclass) = &expr.superclass {
                    self.bind_expression(superclass);
                }
                self.push_scope(ScopeKind::Class);
                if let Some(name) = &expr.name {
                    self.declare(name.name, DeclKind::Class, name.span, None);
                }
                self.bind_class_members(&expr.body);
                self.pop_scope();
            }
            Expression::Unary(expr) => self.bind_expression(&expr.operand),
            Expression::Update(expr) => {
                match expr.operand.unwrap_transparent() {
                    Expression::Identifier(target) => {
                        self.reference(
                            target.name,
                            target.id,
                            ReferenceKind::ReadWrite,
                            target.span,
                        );
                    }
                    _ => self.bind_expression(&expr.operand),
                }
            }
            Expression::Binary(expr) => {
                self.bind_expression(&expr.left);
                self.bind_expression(&expr.right);
            }
            Expression::Logical(expr) => {
                self.bind_expression(&expr.left);
                self.bind_expression(&expr.right);
            }
            Expression::Assignment(expr) => {
                self.bind_assignment_target(
                    &expr.target,
                    expr.operator != AssignmentOperator::Assign,
                );
                self.bind_expression(&expr.value);
            }
            Expression::Conditional(expr) => {
                self.bind_expression(&expr.test);
                self.bind_expression(&expr.consequent);
                self.bind_expression(&expr.alternate);
            }
            Expression::Sequence(expr) => {
                for expression in &expr.expressions {
                    self.bind_expression(expression);
                }
            }
            Expression::Call(expr) => {
                self.bind_expression(&expr.callee);
                for argument in &expr.arguments {
                    self.bind_expression(argument);
                }
            }
            Expression::New(expr) => {
                self.bind_expression(&expr.callee);
                for argument in &expr.arguments {
                    self.bind_expression(argument);
                }
            }
            Expression::Member(expr) => self.bind_expression(&expr.object),
            Expression::Index(expr) => {
                self.bind_expression(&expr.object);
                self.bind_expression(&expr.index);
            }
            Expression::Chain(expr) => self.bind_expression(&expr.expression),
            Expression::Paren(expr) => self.bind_expression(&expr.expression),
            Expression::Await(expr) => self.bind_expression(&expr.argument),
            Expression::Yield(expr) => {
                if let Some(argument) = &expr.argument {
                    self.bind_expression(argument);
                }
            }
            Expression::Spread(expr) => self.bind_expression(&expr.argument),
        }
    }

    /// Walk the target of an assignment. Identifiers become writes;
    /// array and object literals destructure into their elements; member
    /// targets only read their object.
    fn bind_assignment_target(&mut self, target: &Expression, compound: bool) {
        let kind = if compound {
            ReferenceKind::ReadWrite
        } else {
            ReferenceKind::Write
        };
        match target {
            Expression::Identifier(expr) => {
                self.reference(expr.name, expr.id, kind, expr.span);
            }
            Expression::Paren(expr) => self.bind_assignment_target(&expr.expression, compound),
            Expression::Array(expr) => {
                for element in expr.elements.iter().flatten() {
                    match element {
                        Expression::Assignment(default) => {
                            self.bind_assignment_target(&default.target, false);
                            self.bind_expression(&default.value);
                        }
                        Expression::Spread(spread) => {
                            self.bind_assignment_target(&spread.argument, false);
                        }
                        other => self.bind_assignment_target(other, false),
                    }
                }
            }
            Expression::Object(expr) => {
                for member in &expr.members {
                    match member {
                        ObjectMember::Property(property) => {
                            if let PropertyKey::Computed(key) = &property.key {
                                self.bind_expression(key);
                            }
                            match &property.value {
                                Expression::Assignment(default) => {
                                    self.bind_assignment_target(&default.target, false);
                                    self.bind_expression(&default.value);
                                }
                                other => self.bind_assignment_target(other, false),
                            }
                        }
                        ObjectMember::Shorthand(value) => {
                            self.bind_assignment_target(value, false);
                        }
                        ObjectMember::Spread(value) => {
                            self.bind_assignment_target(value, false);
                        }
                    }
                }
            }
            other => self.bind_expression(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::ScopeInfo;
    use crate::syntax::interner::Interner;
    use crate::syntax::parser::Parser;

    fn analyze(source: &str) -> (Program, Interner, ScopeInfo) {
        let (program, interner) = Parser::parse_source(source).expect("should parse");
        let info = ScopeInfo::analyze(&program);
        (program, interner, info)
    }

    fn variable<'a>(info: &'a ScopeInfo, interner: &Interner, name: &str) -> &'a Variable {
        let sym = interner.get(name).expect("name should be interned");
        info.variables()
            .find(|v| v.name == sym)
            .expect("variable should exist")
    }

    #[test]
    fn const_with_initializer_is_stable() {
        let (_, interner, info) = analyze("const s = \"abc\"; s.at(0);");
        assert!(variable(&info, &interner, "s").is_init_stable());
    }

    #[test]
    fn let_without_writes_is_stable() {
        let (_, interner, info) = analyze("let n = 1; use(n);");
        assert!(variable(&info, &interner, "n").is_init_stable());
    }

    #[test]
    fn let_with_write_is_not_stable() {
        let (_, interner, info) = analyze("let n = 1; n = \"x\";");
        let var = variable(&info, &interner, "n");
        assert_eq!(var.write_count(), 1);
        assert!(!var.is_init_stable());
    }

    #[test]
    fn update_counts_as_write() {
        let (_, interner, info) = analyze("let n = 1; n++;");
        assert!(!variable(&info, &interner, "n").is_init_stable());
    }

    #[test]
    fn destructured_declarator_has_no_initializer() {
        let (_, interner, info) = analyze("const [a] = xs;");
        let var = variable(&info, &interner, "a");
        let decl = var.single_declaration().expect("one declaration");
        assert!(decl.init.is_none());
        assert!(!var.is_init_stable());
    }

    #[test]
    fn parameters_are_never_stable() {
        let (_, interner, info) = analyze("function f(p) { return p; }");
        let var = variable(&info, &interner, "p");
        assert_eq!(var.single_declaration().map(|d| d.kind), Some(DeclKind::Param));
        assert!(!var.is_init_stable());
    }

    #[test]
    fn use_before_function_declaration_resolves() {
        let (program, interner, info) = analyze("f(); function f() {}");
        let sym = interner.get("f").expect("interned");
        let index = crate::syntax::ast::ExprIndex::build(&program);
        let reference = index
            .expressions()
            .filter_map(|expr| match expr {
                Expression::Identifier(e) if e.name == sym => Some(e.id),
                _ => None,
            })
            .next()
            .expect("reference to f");
        let var = info.resolve_reference(reference).expect("should resolve");
        assert_eq!(var.single_declaration().map(|d| d.kind), Some(DeclKind::Function));
    }

    #[test]
    fn var_hoists_out_of_blocks() {
        let (_, interner, info) = analyze("function f() { { var x = 1; } return x; }");
        let var = variable(&info, &interner, "x");
        // One declaration, one read, no writes.
        assert_eq!(var.declarations.len(), 1);
        assert_eq!(var.references.len(), 1);
        assert_eq!(var.write_count(), 0);
    }

    #[test]
    fn shadowed_name_resolves_to_local() {
        let (program, _, info) = analyze("function f(Array) { return Array.of(1); }");
        let index = crate::syntax::ast::ExprIndex::build(&program);
        let mut resolved = 0;
        for expr in index.expressions() {
            if let Expression::Identifier(e) = expr {
                if info.resolve_reference(e.id).is_some() {
                    resolved += 1;
                }
            }
        }
        assert_eq!(resolved, 1);
    }

    #[test]
    fn unresolved_identifier_stays_unresolved() {
        let (program, _, info) = analyze("Promise.resolve(1);");
        let index = crate::syntax::ast::ExprIndex::build(&program);
        for expr in index.expressions() {
            if let Expression::Identifier(e) = expr {
                assert!(info.resolve_reference(e.id).is_none());
            }
        }
    }

    #[test]
    fn redeclared_var_is_not_single() {
        let (_, interner, info) = analyze("var x = 1; var x = 2;");
        let var = variable(&info, &interner, "x");
        assert_eq!(var.declarations.len(), 2);
        assert!(var.single_declaration().is_none());
    }

    #[test]
    fn catch_and_import_bindings_have_their_kinds() {
        let (_, interner, info) =
            analyze("import { load } from \"m\"; try { f(); } catch (err) { g(err); }");
        let load = variable(&info, &interner, "load");
        assert_eq!(load.single_declaration().map(|d| d.kind), Some(DeclKind::Import));
        let err = variable(&info, &interner, "err");
        assert_eq!(
            err.single_declaration().map(|d| d.kind),
            Some(DeclKind::CatchParam)
        );
    }

    #[test]
    fn destructuring_assignment_records_writes() {
        let (_, interner, info) = analyze("let a = 1, b = 2; [a, b] = pair;");
        assert_eq!(variable(&info, &interner, "a").write_count(), 1);
        assert_eq!(variable(&info, &interner, "b").write_count(), 1);
    }
}
