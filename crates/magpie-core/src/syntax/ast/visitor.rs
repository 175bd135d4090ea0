//! AST traversal.
//!
//! `Visitor` is lifetime-parameterized over the tree so implementations
//! can retain references to visited nodes. The `walk_*` functions perform
//! the recursion; override a `visit_*` method and call the matching
//! `walk_*` to keep descending.

use crate::syntax::ast::expression::*;
use crate::syntax::ast::pattern::*;
use crate::syntax::ast::statement::*;
use crate::syntax::ast::Program;

pub trait Visitor<'ast> {
    fn visit_program(&mut self, program: &'ast Program) {
        walk_program(self, program);
    }

    fn visit_statement(&mut self, statement: &'ast Statement) {
        walk_statement(self, statement);
    }

    fn visit_expression(&mut self, expression: &'ast Expression) {
        walk_expression(self, expression);
    }

    fn visit_pattern(&mut self, pattern: &'ast Pattern) {
        walk_pattern(self, pattern);
    }
}

pub fn walk_program<'ast, V: Visitor<'ast> + ?Sized>(v: &mut V, program: &'ast Program) {
    for statement in &program.statements {
        v.visit_statement(statement);
    }
}

pub fn walk_statement<'ast, V: Visitor<'ast> + ?Sized>(v: &mut V, statement: &'ast Statement) {
    match statement {
        Statement::Expression(s) => v.visit_expression(&s.expression),
        Statement::VariableDecl(s) => walk_variable_declaration(v, s),
        Statement::Function(s) => {
            for param in &s.params {
                v.visit_pattern(param);
            }
            for stmt in &s.body {
                v.visit_statement(stmt);
            }
        }
        Statement::Class(s) => {
            if let Some(superclass) = &s.superclass {
                v.visit_expression(superclass);
            }
            for member in &s.body {
                walk_class_member(v, member);
            }
        }
        Statement::Return(s) => {
            if let Some(argument) = &s.argument {
                v.visit_expression(argument);
            }
        }
        Statement::If(s) => {
            v.visit_expression(&s.test);
            v.visit_statement(&s.consequent);
            if let Some(alternate) = &s.alternate {
                v.visit_statement(alternate);
            }
        }
        Statement::For(s) => {
            match &s.init {
                Some(ForInit::VariableDecl(decl)) => walk_variable_declaration(v, decl),
                Some(ForInit::Expression(expr)) => v.visit_expression(expr),
                None => {}
            }
            if let Some(test) = &s.test {
                v.visit_expression(test);
            }
            if let Some(update) = &s.update {
                v.visit_expression(update);
            }
            v.visit_statement(&s.body);
        }
        Statement::ForIn(s) => {
            match &s.left {
                ForTarget::Declaration(decl) => walk_variable_declaration(v, decl),
                ForTarget::Expression(expr) => v.visit_expression(expr),
            }
            v.visit_expression(&s.right);
            v.visit_statement(&s.body);
        }
        Statement::While(s) => {
            v.visit_expression(&s.test);
            v.visit_statement(&s.body);
        }
        Statement::DoWhile(s) => {
            v.visit_statement(&s.body);
            v.visit_expression(&s.test);
        }
        Statement::Block(s) => {
            for stmt in &s.statements {
                v.visit_statement(stmt);
            }
        }
        Statement::Throw(s) => v.visit_expression(&s.argument),
        Statement::Try(s) => {
            for stmt in &s.block {
                v.visit_statement(stmt);
            }
            if let Some(handler) = &s.handler {
                if let Some(param) = &handler.param {
                    v.visit_pattern(param);
                }
                for stmt in &handler.body {
                    v.visit_statement(stmt);
                }
            }
            if let Some(finalizer) = &s.finalizer {
                for stmt in finalizer {
                    v.visit_statement(stmt);
                }
            }
        }
        Statement::Switch(s) => {
            v.visit_expression(&s.discriminant);
            for case in &s.cases {
                if let Some(test) = &case.test {
                    v.visit_expression(test);
                }
                for stmt in &case.consequent {
                    v.visit_statement(stmt);
                }
            }
        }
        Statement::Export(s) => match &s.kind {
            ExportKind::Declaration(decl) => v.visit_statement(decl),
            ExportKind::DefaultExpression(expr) => v.visit_expression(expr),
            ExportKind::Named(_) => {}
        },
        Statement::Break(_)
        | Statement::Continue(_)
        | Statement::Empty(_)
        | Statement::Debugger(_)
        | Statement::Import(_) => {}
    }
}

pub fn walk_variable_declaration<'ast, V: Visitor<'ast> + ?Sized>(
    v: &mut V,
    declaration: &'ast VariableDeclaration,
) {
    for declarator in &declaration.declarators {
        v.visit_pattern(&declarator.pattern);
        if let Some(init) = &declarator.init {
            v.visit_expression(init);
        }
    }
}

pub fn walk_expression<'ast, V: Visitor<'ast> + ?Sized>(v: &mut V, expression: &'ast Expression) {
    match expression {
        Expression::Number(_)
        | Expression::BigInt(_)
        | Expression::String(_)
        | Expression::Boolean(_)
        | Expression::Null(_)
        | Expression::RegExp(_)
        | Expression::Identifier(_)
        | Expression::This(_)
        | Expression::Super(_) => {}
        Expression::Template(e) => {
            for expr in &e.expressions {
                v.visit_expression(expr);
            }
        }
        Expression::TaggedTemplate(e) => {
            v.visit_expression(&e.tag);
            for expr in &e.template.expressions {
                v.visit_expression(expr);
            }
        }
        Expression::Array(e) => {
            for element in e.elements.iter().flatten() {
                v.visit_expression(element);
            }
        }
        Expression::Object(e) => {
            for member in &e.members {
                match member {
                    ObjectMember::Property(prop) => {
                        walk_property_key(v, &prop.key);
                        v.visit_expression(&prop.value);
                    }
                    ObjectMember::Shorthand(expr) | ObjectMember::Spread(expr) => {
                        v.visit_expression(expr);
                    }
                }
            }
        }
        Expression::Function(e) => {
            for param in &e.params {
                v.visit_pattern(param);
            }
            for stmt in &e.body {
                v.visit_statement(stmt);
            }
        }
        Expression::Arrow(e) => {
            for param in &e.params {
                v.visit_pattern(param);
            }
            match &e.body {
                ArrowBody::Expression(expr) => v.visit_expression(expr),
                ArrowBody::Block(statements) => {
                    for stmt in statements {
                        v.visit_statement(stmt);
                    }
                }
            }
        }
        Expression::Class(e) => {
            if let Some(superclass) = &e.superclass {
                v.visit_expression(superclass);
            }
            for member in &e.body {
                walk_class_member(v, member);
            }
        }
        Expression::Unary(e) => v.visit_expression(&e.operand),
        Expression::Update(e) => v.visit_expression(&e.operand),
        Expression::Binary(e) => {
            v.visit_expression(&e.left);
            v.visit_expression(&e.right);
        }
        Expression::Logical(e) => {
            v.visit_expression(&e.left);
            v.visit_expression(&e.right);
        }
        Expression::Assignment(e) => {
            v.visit_expression(&e.target);
            v.visit_expression(&e.value);
        }
        Expression::Conditional(e) => {
            v.visit_expression(&e.test);
            v.visit_expression(&e.consequent);
            v.visit_expression(&e.alternate);
        }
        Expression::Sequence(e) => {
            for expr in &e.expressions {
                v.visit_expression(expr);
            }
        }
        Expression::Call(e) => {
            v.visit_expression(&e.callee);
            for argument in &e.arguments {
                v.visit_expression(argument);
            }
        }
        Expression::New(e) => {
            v.visit_expression(&e.callee);
            for argument in &e.arguments {
                v.visit_expression(argument);
            }
        }
        Expression::Member(e) => v.visit_expression(&e.object),
        Expression::Index(e) => {
            v.visit_expression(&e.object);
            v.visit_expression(&e.index);
        }
        Expression::Chain(e) => v.visit_expression(&e.expression),
        Expression::Paren(e) => v.visit_expression(&e.expression),
        Expression::Await(e) => v.visit_expression(&e.argument),
        Expression::Yield(e) => {
            if let Some(argument) = &e.argument {
                v.visit_expression(argument);
            }
        }
        Expression::Spread(e) => v.visit_expression(&e.argument),
    }
}

pub fn walk_class_member<'ast, V: Visitor<'ast> + ?Sized>(v: &mut V, member: &'ast ClassMember) {
    walk_property_key(v, &member.key);
    if let Some(value) = &member.value {
        v.visit_expression(value);
    }
}

pub fn walk_property_key<'ast, V: Visitor<'ast> + ?Sized>(v: &mut V, key: &'ast PropertyKey) {
    if let PropertyKey::Computed(expr) = key {
        v.visit_expression(expr);
    }
}

pub fn walk_pattern<'ast, V: Visitor<'ast> + ?Sized>(v: &mut V, pattern: &'ast Pattern) {
    match pattern {
        Pattern::Identifier(_) => {}
        Pattern::Array(p) => {
            for element in p.elements.iter().flatten() {
                v.visit_pattern(element);
            }
        }
        Pattern::Object(p) => {
            for property in &p.properties {
                walk_property_key(v, &property.key);
                v.visit_pattern(&property.value);
            }
            if let Some(rest) = &p.rest {
                v.visit_pattern(rest);
            }
        }
        Pattern::Assignment(p) => {
            v.visit_pattern(&p.target);
            v.visit_expression(&p.default);
        }
        Pattern::Rest(p) => v.visit_pattern(&p.argument),
    }
}
