//! Statement parsing.

use crate::syntax::ast::expression::{BinaryOperator, Expression};
use crate::syntax::ast::statement::*;
use crate::syntax::parser::{expr, pattern, ParseError, Parser, MAX_PARSE_DEPTH};
use crate::syntax::token::{Span, Token};

pub fn parse_statement(parser: &mut Parser) -> Result<Statement, ParseError> {
    parser.depth += 1;
    if parser.depth > MAX_PARSE_DEPTH {
        parser.depth -= 1;
        return Err(ParseError::new(
            format!("statement nesting exceeds {} levels", MAX_PARSE_DEPTH),
            parser.current_span(),
        ));
    }
    let result = parse_statement_inner(parser);
    parser.depth -= 1;
    result
}

fn parse_statement_inner(parser: &mut Parser) -> Result<Statement, ParseError> {
    match parser.current() {
        Token::Var | Token::Let | Token::Const => parse_variable_statement(parser),
        Token::Function => parse_function_declaration(parser, false),
        Token::Async if matches!(parser.peek(), Token::Function) => {
            parse_function_declaration(parser, true)
        }
        Token::Class => parse_class_declaration(parser),
        Token::If => parse_if(parser),
        Token::While => parse_while(parser),
        Token::Do => parse_do_while(parser),
        Token::For => parse_for(parser),
        Token::Switch => parse_switch(parser),
        Token::Try => parse_try(parser),
        Token::Return => parse_return(parser),
        Token::Throw => parse_throw(parser),
        Token::Break => {
            let span = parser.current_span();
            parser.advance();
            parser.eat(&Token::Semicolon);
            Ok(Statement::Break(span))
        }
        Token::Continue => {
            let span = parser.current_span();
            parser.advance();
            parser.eat(&Token::Semicolon);
            Ok(Statement::Continue(span))
        }
        Token::Debugger => {
            let span = parser.current_span();
            parser.advance();
            parser.eat(&Token::Semicolon);
            Ok(Statement::Debugger(span))
        }
        Token::Semicolon => {
            let span = parser.current_span();
            parser.advance();
            Ok(Statement::Empty(span))
        }
        Token::Import => parse_import(parser),
        Token::Export => parse_export(parser),
        Token::LeftBrace => {
            let start = parser.current_span();
            let (statements, end) = expr::parse_function_body(parser)?;
            Ok(Statement::Block(Box::new(BlockStatement {
                statements,
                span: start.merge(&end),
            })))
        }
        _ => parse_expression_statement(parser),
    }
}

fn parse_expression_statement(parser: &mut Parser) -> Result<Statement, ParseError> {
    let expression = expr::parse_expression(parser)?;
    let mut span = expression.span();
    if parser.check(&Token::Semicolon) {
        span = span.merge(&parser.current_span());
        parser.advance();
    }
    Ok(Statement::Expression(Box::new(ExpressionStatement {
        expression,
        span,
    })))
}

fn declaration_kind(token: &Token) -> Option<DeclarationKind> {
    match token {
        Token::Var => Some(DeclarationKind::Var),
        Token::Let => Some(DeclarationKind::Let),
        Token::Const => Some(DeclarationKind::Const),
        _ => None,
    }
}

fn parse_variable_statement(parser: &mut Parser) -> Result<Statement, ParseError> {
    let declaration = parse_variable_declaration(parser)?;
    let mut span = declaration.span;
    if parser.check(&Token::Semicolon) {
        span = span.merge(&parser.current_span());
        parser.advance();
    }
    Ok(Statement::VariableDecl(Box::new(VariableDeclaration {
        span,
        ..declaration
    })))
}

/// Parse `var|let|const` plus its declarator list, without a trailing
/// semicolon. Shared between statements and `for` heads.
fn parse_variable_declaration(parser: &mut Parser) -> Result<VariableDeclaration, ParseError> {
    let start = parser.current_span();
    let kind = match declaration_kind(parser.current()) {
        Some(kind) => kind,
        None => return Err(parser.unexpected("'var', 'let' or 'const'")),
    };
    parser.advance();

    let mut declarators = Vec::new();
    loop {
        declarators.push(parse_declarator(parser)?);
        if !parser.eat(&Token::Comma) {
            break;
        }
    }

    let end = declarators
        .last()
        .map(|d| d.span)
        .unwrap_or(start);
    Ok(VariableDeclaration {
        kind,
        declarators,
        span: start.merge(&end),
    })
}

fn parse_declarator(parser: &mut Parser) -> Result<VariableDeclarator, ParseError> {
    let binding = pattern::parse_binding_target(parser)?;
    let init = if parser.eat(&Token::Equal) {
        Some(expr::parse_assignment(parser)?)
    } else {
        None
    };
    let end = init
        .as_ref()
        .map(|e| e.span())
        .unwrap_or_else(|| binding.span());
    let span = binding.span().merge(&end);
    Ok(VariableDeclarator {
        pattern: binding,
        init,
        span,
    })
}

fn parse_function_declaration(parser: &mut Parser, is_async: bool) -> Result<Statement, ParseError> {
    let start = parser.current_span();
    if is_async {
        parser.advance();
    }
    parser.expect(&Token::Function)?;
    let is_generator = parser.eat(&Token::Star);
    let name = parser.expect_identifier()?;
    let params = expr::parse_params(parser)?;
    let (body, body_end) = expr::parse_function_body(parser)?;
    Ok(Statement::Function(Box::new(FunctionDeclaration {
        name,
        params,
        body,
        is_async,
        is_generator,
        span: start.merge(&body_end),
    })))
}

fn parse_class_declaration(parser: &mut Parser) -> Result<Statement, ParseError> {
    let start = parser.expect(&Token::Class)?;
    let name = parser.expect_identifier()?;
    let superclass = if parser.eat(&Token::Extends) {
        Some(expr::parse_call_chain(parser, true)?)
    } else {
        None
    };
    let (body, end) = expr::parse_class_body(parser)?;
    Ok(Statement::Class(Box::new(ClassDeclaration {
        name,
        superclass,
        body,
        span: start.merge(&end),
    })))
}

fn parse_if(parser: &mut Parser) -> Result<Statement, ParseError> {
    let start = parser.expect(&Token::If)?;
    parser.expect(&Token::LeftParen)?;
    let test = expr::parse_expression(parser)?;
    parser.expect(&Token::RightParen)?;
    let consequent = parse_statement(parser)?;
    let alternate = if parser.eat(&Token::Else) {
        Some(parse_statement(parser)?)
    } else {
        None
    };
    let end = alternate
        .as_ref()
        .map(|s| s.span())
        .unwrap_or_else(|| consequent.span());
    Ok(Statement::If(Box::new(IfStatement {
        test,
        consequent,
        alternate,
        span: start.merge(&end),
    })))
}

fn parse_while(parser: &mut Parser) -> Result<Statement, ParseError> {
    let start = parser.expect(&Token::While)?;
    parser.expect(&Token::LeftParen)?;
    let test = expr::parse_expression(parser)?;
    parser.expect(&Token::RightParen)?;
    let body = parse_statement(parser)?;
    let span = start.merge(&body.span());
    Ok(Statement::While(Box::new(WhileStatement {
        test,
        body,
        span,
    })))
}

fn parse_do_while(parser: &mut Parser) -> Result<Statement, ParseError> {
    let start = parser.expect(&Token::Do)?;
    let body = parse_statement(parser)?;
    parser.expect(&Token::While)?;
    parser.expect(&Token::LeftParen)?;
    let test = expr::parse_expression(parser)?;
    let end = parser.expect(&Token::RightParen)?;
    parser.eat(&Token::Semicolon);
    Ok(Statement::DoWhile(Box::new(DoWhileStatement {
        body,
        test,
        span: start.merge(&end),
    })))
}

fn parse_for(parser: &mut Parser) -> Result<Statement, ParseError> {
    let start = parser.expect(&Token::For)?;
    parser.expect(&Token::LeftParen)?;

    // Empty initializer.
    if parser.eat(&Token::Semicolon) {
        return finish_classic_for(parser, start, None);
    }

    if declaration_kind(parser.current()).is_some() {
        let kind_span = parser.current_span();
        let kind = declaration_kind(parser.current()).unwrap_or(DeclarationKind::Var);
        parser.advance();
        let binding = pattern::parse_binding_target(parser)?;

        if parser.check(&Token::Of) || parser.check(&Token::In) {
            let is_of = parser.check(&Token::Of);
            parser.advance();
            let right = if is_of {
                expr::parse_assignment(parser)?
            } else {
                expr::parse_expression(parser)?
            };
            parser.expect(&Token::RightParen)?;
            let body = parse_statement(parser)?;
            let span = start.merge(&body.span());
            let declaration = VariableDeclaration {
                kind,
                declarators: vec![VariableDeclarator {
                    span: binding.span(),
                    pattern: binding,
                    init: None,
                }],
                span: kind_span,
            };
            return Ok(Statement::ForIn(Box::new(ForInStatement {
                left: ForTarget::Declaration(declaration),
                right,
                body,
                is_of,
                span,
            })));
        }

        // Classic for with a declaration: finish the first declarator,
        // then any remaining ones.
        let mut declarators = Vec::new();
        let init = if parser.eat(&Token::Equal) {
            Some(expr::parse_assignment(parser)?)
        } else {
            None
        };
        let first_end = init
            .as_ref()
            .map(|e| e.span())
            .unwrap_or_else(|| binding.span());
        declarators.push(VariableDeclarator {
            span: binding.span().merge(&first_end),
            pattern: binding,
            init,
        });
        while parser.eat(&Token::Comma) {
            declarators.push(parse_declarator(parser)?);
        }
        let decl_end = declarators.last().map(|d| d.span).unwrap_or(kind_span);
        let declaration = VariableDeclaration {
            kind,
            declarators,
            span: kind_span.merge(&decl_end),
        };
        parser.expect(&Token::Semicolon)?;
        return finish_classic_for(parser, start, Some(ForInit::VariableDecl(declaration)));
    }

    let head = expr::parse_expression(parser)?;

    if parser.check(&Token::Of) {
        parser.advance();
        let right = expr::parse_assignment(parser)?;
        parser.expect(&Token::RightParen)?;
        let body = parse_statement(parser)?;
        let span = start.merge(&body.span());
        return Ok(Statement::ForIn(Box::new(ForInStatement {
            left: ForTarget::Expression(head),
            right,
            body,
            is_of: false,
            span,
        })));
    }

    // `for (x in y)` parses as a single `in` binary expression; split it
    // back apart.
    if let Expression::Binary(binary) = &head {
        if binary.operator == BinaryOperator::In && parser.check(&Token::RightParen) {
            let Expression::Binary(binary) = head else {
                unreachable!();
            };
            parser.advance();
            let body = parse_statement(parser)?;
            let span = start.merge(&body.span());
            return Ok(Statement::ForIn(Box::new(ForInStatement {
                left: ForTarget::Expression(binary.left),
                right: binary.right,
                body,
                is_of: false,
                span,
            })));
        }
    }

    parser.expect(&Token::Semicolon)?;
    finish_classic_for(parser, start, Some(ForInit::Expression(head)))
}

fn finish_classic_for(
    parser: &mut Parser,
    start: Span,
    init: Option<ForInit>,
) -> Result<Statement, ParseError> {
    let test = if parser.check(&Token::Semicolon) {
        None
    } else {
        Some(expr::parse_expression(parser)?)
    };
    parser.expect(&Token::Semicolon)?;

    let update = if parser.check(&Token::RightParen) {
        None
    } else {
        Some(expr::parse_expression(parser)?)
    };
    parser.expect(&Token::RightParen)?;

    let body = parse_statement(parser)?;
    let span = start.merge(&body.span());
    Ok(Statement::For(Box::new(ForStatement {
        init,
        test,
        update,
        body,
        span,
    })))
}

fn parse_switch(parser: &mut Parser) -> Result<Statement, ParseError> {
    let start = parser.expect(&Token::Switch)?;
    parser.expect(&Token::LeftParen)?;
    let discriminant = expr::parse_expression(parser)?;
    parser.expect(&Token::RightParen)?;
    parser.expect(&Token::LeftBrace)?;

    let mut cases = Vec::new();
    while !parser.check(&Token::RightBrace) && !parser.check(&Token::Eof) {
        let case_start = parser.current_span();
        let test = if parser.eat(&Token::Case) {
            let test = expr::parse_expression(parser)?;
            parser.expect(&Token::Colon)?;
            Some(test)
        } else {
            parser.expect(&Token::Default)?;
            parser.expect(&Token::Colon)?;
            None
        };

        let mut consequent = Vec::new();
        while !matches!(
            parser.current(),
            Token::Case | Token::Default | Token::RightBrace | Token::Eof
        ) {
            consequent.push(parse_statement(parser)?);
        }
        let case_end = consequent
            .last()
            .map(|s| s.span())
            .unwrap_or(case_start);
        cases.push(SwitchCase {
            test,
            consequent,
            span: case_start.merge(&case_end),
        });
    }

    let end = parser.expect(&Token::RightBrace)?;
    Ok(Statement::Switch(Box::new(SwitchStatement {
        discriminant,
        cases,
        span: start.merge(&end),
    })))
}

fn parse_try(parser: &mut Parser) -> Result<Statement, ParseError> {
    let start = parser.expect(&Token::Try)?;
    let (block, mut end) = expr::parse_function_body(parser)?;

    let handler = if parser.check(&Token::Catch) {
        let catch_start = parser.current_span();
        parser.advance();
        let param = if parser.eat(&Token::LeftParen) {
            let param = pattern::parse_binding_target(parser)?;
            parser.expect(&Token::RightParen)?;
            Some(param)
        } else {
            None
        };
        let (body, catch_end) = expr::parse_function_body(parser)?;
        end = catch_end;
        Some(CatchClause {
            param,
            body,
            span: catch_start.merge(&catch_end),
        })
    } else {
        None
    };

    let finalizer = if parser.eat(&Token::Finally) {
        let (body, finally_end) = expr::parse_function_body(parser)?;
        end = finally_end;
        Some(body)
    } else {
        None
    };

    if handler.is_none() && finalizer.is_none() {
        return Err(parser.unexpected("'catch' or 'finally'"));
    }

    Ok(Statement::Try(Box::new(TryStatement {
        block,
        handler,
        finalizer,
        span: start.merge(&end),
    })))
}

fn parse_return(parser: &mut Parser) -> Result<Statement, ParseError> {
    let keyword = parser.expect(&Token::Return)?;

    // Automatic semicolon insertion: `return` followed by a line break
    // returns undefined.
    let argument = if parser.current().starts_expression()
        && parser.current_span().line == keyword.line
    {
        Some(expr::parse_expression(parser)?)
    } else {
        None
    };

    let mut span = argument
        .as_ref()
        .map(|e| keyword.merge(&e.span()))
        .unwrap_or(keyword);
    if parser.check(&Token::Semicolon) {
        span = span.merge(&parser.current_span());
        parser.advance();
    }
    Ok(Statement::Return(Box::new(ReturnStatement {
        argument,
        span,
    })))
}

fn parse_throw(parser: &mut Parser) -> Result<Statement, ParseError> {
    let start = parser.expect(&Token::Throw)?;
    let argument = expr::parse_expression(parser)?;
    let mut span = start.merge(&argument.span());
    if parser.check(&Token::Semicolon) {
        span = span.merge(&parser.current_span());
        parser.advance();
    }
    Ok(Statement::Throw(Box::new(ThrowStatement {
        argument,
        span,
    })))
}

fn parse_module_source(parser: &mut Parser) -> Result<crate::syntax::interner::Symbol, ParseError> {
    match parser.current().clone() {
        Token::StringLiteral(source) => {
            parser.advance();
            Ok(source)
        }
        _ => Err(parser.unexpected("a module path")),
    }
}

fn parse_import(parser: &mut Parser) -> Result<Statement, ParseError> {
    let start = parser.expect(&Token::Import)?;

    // Bare import: `import "polyfill";`
    if matches!(parser.current(), Token::StringLiteral(_)) {
        let source = parse_module_source(parser)?;
        let mut span = start;
        if parser.check(&Token::Semicolon) {
            span = span.merge(&parser.current_span());
            parser.advance();
        }
        return Ok(Statement::Import(Box::new(ImportDeclaration {
            specifiers: Vec::new(),
            source,
            span,
        })));
    }

    let mut specifiers = Vec::new();

    // Default specifier, optionally followed by named or namespace
    // imports.
    let mut expect_more = true;
    if matches!(parser.current(), Token::Identifier(_)) || parser.current().is_soft_keyword() {
        let local = parser.expect_identifier()?;
        specifiers.push(ImportSpecifier {
            local,
            kind: ImportKind::Default,
        });
        expect_more = parser.eat(&Token::Comma);
    }

    if expect_more {
        if parser.eat(&Token::Star) {
            parser.expect(&Token::As)?;
            let local = parser.expect_identifier()?;
            specifiers.push(ImportSpecifier {
                local,
                kind: ImportKind::Namespace,
            });
        } else if parser.eat(&Token::LeftBrace) {
            while !parser.check(&Token::RightBrace) {
                // The imported name may be any keyword
                // (`import { default as d }`).
                let imported = parser.expect_property_name()?;
                let local = if parser.eat(&Token::As) {
                    parser.expect_identifier()?
                } else {
                    imported.clone()
                };
                specifiers.push(ImportSpecifier {
                    local,
                    kind: ImportKind::Named {
                        imported: imported.name,
                    },
                });
                if !parser.eat(&Token::Comma) {
                    break;
                }
            }
            parser.expect(&Token::RightBrace)?;
        } else if specifiers.is_empty() {
            return Err(parser.unexpected("import specifiers"));
        }
    }

    parser.expect(&Token::From)?;
    let source = parse_module_source(parser)?;
    let mut span = start;
    if parser.check(&Token::Semicolon) {
        span = span.merge(&parser.current_span());
        parser.advance();
    }
    Ok(Statement::Import(Box::new(ImportDeclaration {
        specifiers,
        source,
        span,
    })))
}

fn parse_export(parser: &mut Parser) -> Result<Statement, ParseError> {
    let start = parser.expect(&Token::Export)?;

    if parser.eat(&Token::Default) {
        let expression = expr::parse_assignment(parser)?;
        let mut span = start.merge(&expression.span());
        if parser.check(&Token::Semicolon) {
            span = span.merge(&parser.current_span());
            parser.advance();
        }
        return Ok(Statement::Export(Box::new(ExportDeclaration {
            kind: ExportKind::DefaultExpression(expression),
            span,
        })));
    }

    if parser.eat(&Token::LeftBrace) {
        let mut names = Vec::new();
        while !parser.check(&Token::RightBrace) {
            let local = parser.expect_identifier()?;
            if parser.eat(&Token::As) {
                // Exported alias; only the local binding matters for
                // scope analysis.
                parser.expect_property_name()?;
            }
            names.push(local);
            if !parser.eat(&Token::Comma) {
                break;
            }
        }
        let mut span = start.merge(&parser.expect(&Token::RightBrace)?);
        if parser.check(&Token::Semicolon) {
            span = span.merge(&parser.current_span());
            parser.advance();
        }
        return Ok(Statement::Export(Box::new(ExportDeclaration {
            kind: ExportKind::Named(names),
            span,
        })));
    }

    match parser.current() {
        Token::Var | Token::Let | Token::Const | Token::Function | Token::Class | Token::Async => {
            let declaration = parse_statement(parser)?;
            let span = start.merge(&declaration.span());
            Ok(Statement::Export(Box::new(ExportDeclaration {
                kind: ExportKind::Declaration(declaration),
                span,
            })))
        }
        _ => Err(parser.unexpected("a declaration")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::ast::Program;

    fn parse(source: &str) -> Program {
        let (program, _) = Parser::parse_source(source).expect("should parse");
        program
    }

    #[test]
    fn variable_declaration_with_multiple_declarators() {
        let program = parse("let a = 1, b, c = 3;");
        let Statement::VariableDecl(decl) = &program.statements[0] else {
            panic!("expected variable declaration");
        };
        assert_eq!(decl.kind, DeclarationKind::Let);
        assert_eq!(decl.declarators.len(), 3);
        assert!(decl.declarators[1].init.is_none());
    }

    #[test]
    fn for_of_parses_as_for_in_variant() {
        let program = parse("for (const item of items) {}");
        let Statement::ForIn(stmt) = &program.statements[0] else {
            panic!("expected for-of");
        };
        assert!(stmt.is_of);
        assert!(matches!(stmt.left, ForTarget::Declaration(_)));
    }

    #[test]
    fn for_in_with_bare_target() {
        let program = parse("for (key in obj) {}");
        let Statement::ForIn(stmt) = &program.statements[0] else {
            panic!("expected for-in");
        };
        assert!(!stmt.is_of);
        assert!(matches!(stmt.left, ForTarget::Expression(_)));
    }

    #[test]
    fn classic_for_with_declaration() {
        let program = parse("for (let i = 0; i < 10; i++) {}");
        let Statement::For(stmt) = &program.statements[0] else {
            panic!("expected for");
        };
        assert!(matches!(stmt.init, Some(ForInit::VariableDecl(_))));
        assert!(stmt.test.is_some());
        assert!(stmt.update.is_some());
    }

    #[test]
    fn return_argument_stays_on_same_line() {
        let program = parse("function f() { return\n1; }");
        let Statement::Function(func) = &program.statements[0] else {
            panic!("expected function declaration");
        };
        let Statement::Return(ret) = &func.body[0] else {
            panic!("expected return");
        };
        assert!(ret.argument.is_none());
    }

    #[test]
    fn return_with_argument() {
        let program = parse("function f() { return 1; }");
        let Statement::Function(func) = &program.statements[0] else {
            panic!("expected function declaration");
        };
        let Statement::Return(ret) = &func.body[0] else {
            panic!("expected return");
        };
        assert!(ret.argument.is_some());
    }

    #[test]
    fn brace_at_statement_position_is_a_block() {
        let program = parse("{ let x = 1; }");
        assert!(matches!(program.statements[0], Statement::Block(_)));
    }

    #[test]
    fn try_catch_without_binding() {
        let program = parse("try { f(); } catch { g(); } finally { h(); }");
        let Statement::Try(stmt) = &program.statements[0] else {
            panic!("expected try");
        };
        let handler = stmt.handler.as_ref().expect("catch clause");
        assert!(handler.param.is_none());
        assert!(stmt.finalizer.is_some());
    }

    #[test]
    fn switch_with_cases_and_default() {
        let program = parse("switch (x) { case 1: f(); break; default: g(); }");
        let Statement::Switch(stmt) = &program.statements[0] else {
            panic!("expected switch");
        };
        assert_eq!(stmt.cases.len(), 2);
        assert!(stmt.cases[0].test.is_some());
        assert!(stmt.cases[1].test.is_none());
    }

    #[test]
    fn import_forms() {
        let program = parse(
            "import \"side-effect\";\n\
             import d from \"a\";\n\
             import d2, { x, y as z } from \"b\";\n\
             import * as ns from \"c\";",
        );
        assert_eq!(program.statements.len(), 4);
        let Statement::Import(third) = &program.statements[2] else {
            panic!("expected import");
        };
        assert_eq!(third.specifiers.len(), 3);
        assert!(matches!(
            third.specifiers[2].kind,
            ImportKind::Named { .. }
        ));
    }

    #[test]
    fn export_forms() {
        let program = parse(
            "export const a = 1;\n\
             export default function f() {}\n\
             export { a, b as c };",
        );
        let Statement::Export(first) = &program.statements[0] else {
            panic!("expected export");
        };
        assert!(matches!(first.kind, ExportKind::Declaration(_)));
        let Statement::Export(third) = &program.statements[2] else {
            panic!("expected export");
        };
        let ExportKind::Named(names) = &third.kind else {
            panic!("expected named export");
        };
        assert_eq!(names.len(), 2);
    }

    #[test]
    fn async_function_declaration() {
        let program = parse("async function load() { await fetch(url); }");
        let Statement::Function(func) = &program.statements[0] else {
            panic!("expected function declaration");
        };
        assert!(func.is_async);
    }

    #[test]
    fn do_while_statement() {
        let program = parse("do { f(); } while (x);");
        assert!(matches!(program.statements[0], Statement::DoWhile(_)));
    }
}
