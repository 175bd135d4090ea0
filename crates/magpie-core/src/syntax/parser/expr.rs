//! Expression parsing.
//!
//! Binary operators are parsed by precedence climbing over a single
//! table; everything else is straight recursive descent.

use crate::syntax::ast::expression::*;
use crate::syntax::ast::pattern::Pattern;
use crate::syntax::ast::Identifier;
use crate::syntax::ast::Statement;
use crate::syntax::parser::{pattern, stmt, ParseError, Parser, MAX_PARSE_DEPTH};
use crate::syntax::token::{Span, TemplatePart, Token};

/// Parse a full expression, including comma sequences (`a, b`).
pub fn parse_expression(parser: &mut Parser) -> Result<Expression, ParseError> {
    let first = parse_assignment(parser)?;
    if !parser.check(&Token::Comma) {
        return Ok(first);
    }

    let start = first.span();
    let mut expressions = vec![first];
    while parser.eat(&Token::Comma) {
        expressions.push(parse_assignment(parser)?);
    }
    let end = expressions
        .last()
        .map(|e| e.span())
        .unwrap_or(start);
    Ok(Expression::Sequence(Box::new(SequenceExpression {
        expressions,
        id: parser.next_id(),
        span: parser.combine_spans(&start, &end),
    })))
}

/// Parse a single assignment-level expression (no comma sequences).
pub fn parse_assignment(parser: &mut Parser) -> Result<Expression, ParseError> {
    parser.depth += 1;
    if parser.depth > MAX_PARSE_DEPTH {
        parser.depth -= 1;
        return Err(ParseError::new(
            format!("expression nesting exceeds {} levels", MAX_PARSE_DEPTH),
            parser.current_span(),
        ));
    }
    let result = parse_assignment_inner(parser);
    parser.depth -= 1;
    result
}

fn parse_assignment_inner(parser: &mut Parser) -> Result<Expression, ParseError> {
    if parser.check(&Token::Yield) {
        return parse_yield(parser);
    }
    if is_arrow_ahead(parser) {
        return parse_arrow(parser);
    }

    let target = parse_conditional(parser)?;

    let Some(operator) = assignment_op(parser.current()) else {
        return Ok(target);
    };
    parser.advance();
    let value = parse_assignment(parser)?;
    let span = parser.combine_spans(&target.span(), &value.span());
    Ok(Expression::Assignment(Box::new(AssignmentExpression {
        operator,
        target,
        value,
        id: parser.next_id(),
        span,
    })))
}

fn parse_yield(parser: &mut Parser) -> Result<Expression, ParseError> {
    let start = parser.expect(&Token::Yield)?;
    let delegate = parser.eat(&Token::Star);
    let argument = if parser.current().starts_expression() {
        Some(parse_assignment(parser)?)
    } else {
        None
    };
    let end = argument.as_ref().map(|a| a.span()).unwrap_or(start);
    Ok(Expression::Yield(Box::new(YieldExpression {
        argument,
        delegate,
        id: parser.next_id(),
        span: parser.combine_spans(&start, &end),
    })))
}

fn parse_conditional(parser: &mut Parser) -> Result<Expression, ParseError> {
    let test = parse_binary(parser, 1)?;
    if !parser.eat(&Token::Question) {
        return Ok(test);
    }

    let consequent = parse_assignment(parser)?;
    parser.expect(&Token::Colon)?;
    let alternate = parse_assignment(parser)?;
    let span = parser.combine_spans(&test.span(), &alternate.span());
    Ok(Expression::Conditional(Box::new(ConditionalExpression {
        test,
        consequent,
        alternate,
        id: parser.next_id(),
        span,
    })))
}

enum BinaryOp {
    Binary(BinaryOperator),
    Logical(LogicalOperator),
}

/// Precedence and kind for a binary operator token. Higher numbers bind
/// tighter.
fn binary_op(token: &Token) -> Option<(u8, BinaryOp)> {
    use BinaryOperator as B;
    use LogicalOperator as L;
    let entry = match token {
        Token::QuestionQuestion => (1, BinaryOp::Logical(L::Nullish)),
        Token::PipePipe => (1, BinaryOp::Logical(L::Or)),
        Token::AmpAmp => (2, BinaryOp::Logical(L::And)),
        Token::Pipe => (3, BinaryOp::Binary(B::BitOr)),
        Token::Caret => (4, BinaryOp::Binary(B::BitXor)),
        Token::Amp => (5, BinaryOp::Binary(B::BitAnd)),
        Token::EqualEqual => (6, BinaryOp::Binary(B::Equal)),
        Token::BangEqual => (6, BinaryOp::Binary(B::NotEqual)),
        Token::EqualEqualEqual => (6, BinaryOp::Binary(B::StrictEqual)),
        Token::BangEqualEqual => (6, BinaryOp::Binary(B::StrictNotEqual)),
        Token::Less => (7, BinaryOp::Binary(B::Less)),
        Token::LessEqual => (7, BinaryOp::Binary(B::LessEqual)),
        Token::Greater => (7, BinaryOp::Binary(B::Greater)),
        Token::GreaterEqual => (7, BinaryOp::Binary(B::GreaterEqual)),
        Token::In => (7, BinaryOp::Binary(B::In)),
        Token::Instanceof => (7, BinaryOp::Binary(B::Instanceof)),
        Token::LessLess => (8, BinaryOp::Binary(B::ShiftLeft)),
        Token::GreaterGreater => (8, BinaryOp::Binary(B::ShiftRight)),
        Token::GreaterGreaterGreater => (8, BinaryOp::Binary(B::ShiftRightUnsigned)),
        Token::Plus => (9, BinaryOp::Binary(B::Add)),
        Token::Minus => (9, BinaryOp::Binary(B::Subtract)),
        Token::Star => (10, BinaryOp::Binary(B::Multiply)),
        Token::Slash => (10, BinaryOp::Binary(B::Divide)),
        Token::Percent => (10, BinaryOp::Binary(B::Modulo)),
        Token::StarStar => (11, BinaryOp::Binary(B::Exponent)),
        _ => return None,
    };
    Some(entry)
}

fn assignment_op(token: &Token) -> Option<AssignmentOperator> {
    use AssignmentOperator as A;
    let op = match token {
        Token::Equal => A::Assign,
        Token::PlusEqual => A::Add,
        Token::MinusEqual => A::Subtract,
        Token::StarEqual => A::Multiply,
        Token::SlashEqual => A::Divide,
        Token::PercentEqual => A::Modulo,
        Token::StarStarEqual => A::Exponent,
        Token::LessLessEqual => A::ShiftLeft,
        Token::GreaterGreaterEqual => A::ShiftRight,
        Token::GreaterGreaterGreaterEqual => A::ShiftRightUnsigned,
        Token::AmpEqual => A::BitAnd,
        Token::PipeEqual => A::BitOr,
        Token::CaretEqual => A::BitXor,
        Token::AmpAmpEqual => A::And,
        Token::PipePipeEqual => A::Or,
        Token::QuestionQuestionEqual => A::Nullish,
        _ => return None,
    };
    Some(op)
}

fn parse_binary(parser: &mut Parser, min_precedence: u8) -> Result<Expression, ParseError> {
    let mut left = parse_unary(parser)?;

    while let Some((precedence, op)) = binary_op(parser.current()) {
        if precedence < min_precedence {
            break;
        }
        parser.advance();
        // Exponentiation is right-associative.
        let next_min = match op {
            BinaryOp::Binary(BinaryOperator::Exponent) => precedence,
            _ => precedence + 1,
        };
        let right = parse_binary(parser, next_min)?;
        let span = parser.combine_spans(&left.span(), &right.span());
        left = match op {
            BinaryOp::Binary(operator) => Expression::Binary(Box::new(BinaryExpression {
                operator,
                left,
                right,
                id: parser.next_id(),
                span,
            })),
            BinaryOp::Logical(operator) => Expression::Logical(Box::new(LogicalExpression {
                operator,
                left,
                right,
                id: parser.next_id(),
                span,
            })),
        };
    }

    Ok(left)
}

fn parse_unary(parser: &mut Parser) -> Result<Expression, ParseError> {
    parser.depth += 1;
    if parser.depth > MAX_PARSE_DEPTH {
        parser.depth -= 1;
        return Err(ParseError::new(
            format!("expression nesting exceeds {} levels", MAX_PARSE_DEPTH),
            parser.current_span(),
        ));
    }
    let result = parse_unary_inner(parser);
    parser.depth -= 1;
    result
}

fn parse_unary_inner(parser: &mut Parser) -> Result<Expression, ParseError> {
    let start = parser.current_span();

    let operator = match parser.current() {
        Token::Bang => Some(UnaryOperator::Not),
        Token::Tilde => Some(UnaryOperator::BitNot),
        Token::Plus => Some(UnaryOperator::Plus),
        Token::Minus => Some(UnaryOperator::Minus),
        Token::Typeof => Some(UnaryOperator::Typeof),
        Token::Void => Some(UnaryOperator::Void),
        Token::Delete => Some(UnaryOperator::Delete),
        _ => None,
    };
    if let Some(operator) = operator {
        parser.advance();
        let operand = parse_unary(parser)?;
        let span = parser.combine_spans(&start, &operand.span());
        return Ok(Expression::Unary(Box::new(UnaryExpression {
            operator,
            operand,
            id: parser.next_id(),
            span,
        })));
    }

    let update = match parser.current() {
        Token::PlusPlus => Some(UpdateOperator::Increment),
        Token::MinusMinus => Some(UpdateOperator::Decrement),
        _ => None,
    };
    if let Some(operator) = update {
        parser.advance();
        let operand = parse_unary(parser)?;
        let span = parser.combine_spans(&start, &operand.span());
        return Ok(Expression::Update(Box::new(UpdateExpression {
            operator,
            operand,
            prefix: true,
            id: parser.next_id(),
            span,
        })));
    }

    if parser.check(&Token::Await) {
        parser.advance();
        let argument = parse_unary(parser)?;
        let span = parser.combine_spans(&start, &argument.span());
        return Ok(Expression::Await(Box::new(AwaitExpression {
            argument,
            id: parser.next_id(),
            span,
        })));
    }

    parse_postfix(parser)
}

fn parse_postfix(parser: &mut Parser) -> Result<Expression, ParseError> {
    let expr = parse_call_chain(parser, true)?;

    let operator = match parser.current() {
        Token::PlusPlus => UpdateOperator::Increment,
        Token::MinusMinus => UpdateOperator::Decrement,
        _ => return Ok(expr),
    };
    let op_span = parser.current_span();
    parser.advance();
    let span = parser.combine_spans(&expr.span(), &op_span);
    Ok(Expression::Update(Box::new(UpdateExpression {
        operator,
        operand: expr,
        prefix: false,
        id: parser.next_id(),
        span,
    })))
}

/// Parse member accesses, calls, indexing and tagged templates off a
/// primary expression. With `allow_call` false (the callee of `new`),
/// call parentheses are left for the caller.
pub(super) fn parse_call_chain(
    parser: &mut Parser,
    allow_call: bool,
) -> Result<Expression, ParseError> {
    let mut expr = if parser.check(&Token::New) {
        parse_new(parser)?
    } else {
        parse_primary(parser)?
    };
    let mut saw_optional = false;

    loop {
        match parser.current() {
            Token::Dot => {
                parser.advance();
                let property = parser.expect_property_name()?;
                let span = parser.combine_spans(&expr.span(), &property.span);
                expr = Expression::Member(Box::new(MemberExpression {
                    object: expr,
                    property,
                    optional: false,
                    id: parser.next_id(),
                    span,
                }));
            }
            Token::QuestionDot => {
                parser.advance();
                saw_optional = true;
                if parser.check(&Token::LeftParen) {
                    if !allow_call {
                        return Err(parser.unexpected("a property name"));
                    }
                    let (arguments, end) = parse_arguments(parser)?;
                    let span = parser.combine_spans(&expr.span(), &end);
                    expr = Expression::Call(Box::new(CallExpression {
                        callee: expr,
                        arguments,
                        optional: true,
                        id: parser.next_id(),
                        span,
                    }));
                } else if parser.eat(&Token::LeftBracket) {
                    let index = parse_expression(parser)?;
                    let end = parser.expect(&Token::RightBracket)?;
                    let span = parser.combine_spans(&expr.span(), &end);
                    expr = Expression::Index(Box::new(IndexExpression {
                        object: expr,
                        index,
                        optional: true,
                        id: parser.next_id(),
                        span,
                    }));
                } else {
                    let property = parser.expect_property_name()?;
                    let span = parser.combine_spans(&expr.span(), &property.span);
                    expr = Expression::Member(Box::new(MemberExpression {
                        object: expr,
                        property,
                        optional: true,
                        id: parser.next_id(),
                        span,
                    }));
                }
            }
            Token::LeftBracket => {
                parser.advance();
                let index = parse_expression(parser)?;
                let end = parser.expect(&Token::RightBracket)?;
                let span = parser.combine_spans(&expr.span(), &end);
                expr = Expression::Index(Box::new(IndexExpression {
                    object: expr,
                    index,
                    optional: false,
                    id: parser.next_id(),
                    span,
                }));
            }
            Token::LeftParen if allow_call => {
                let (arguments, end) = parse_arguments(parser)?;
                let span = parser.combine_spans(&expr.span(), &end);
                expr = Expression::Call(Box::new(CallExpression {
                    callee: expr,
                    arguments,
                    optional: false,
                    id: parser.next_id(),
                    span,
                }));
            }
            Token::TemplateLiteral(_) => {
                let template_span = parser.current_span();
                let Token::TemplateLiteral(parts) = parser.current().clone() else {
                    unreachable!();
                };
                parser.advance();
                let template = template_to_ast(parser, parts, template_span)?;
                let span = parser.combine_spans(&expr.span(), &template_span);
                expr = Expression::TaggedTemplate(Box::new(TaggedTemplateExpression {
                    tag: expr,
                    template,
                    id: parser.next_id(),
                    span,
                }));
            }
            _ => break,
        }
    }

    if saw_optional {
        let span = expr.span();
        expr = Expression::Chain(Box::new(ChainExpression {
            expression: expr,
            id: parser.next_id(),
            span,
        }));
    }
    Ok(expr)
}

fn parse_new(parser: &mut Parser) -> Result<Expression, ParseError> {
    let start = parser.expect(&Token::New)?;
    let callee = parse_call_chain(parser, false)?;
    let (arguments, end) = if parser.check(&Token::LeftParen) {
        parse_arguments(parser)?
    } else {
        (Vec::new(), callee.span())
    };
    let span = parser.combine_spans(&start, &end);
    Ok(Expression::New(Box::new(NewExpression {
        callee,
        arguments,
        id: parser.next_id(),
        span,
    })))
}

/// Parse a parenthesized argument list. Returns the arguments and the
/// span of the closing parenthesis.
pub(super) fn parse_arguments(parser: &mut Parser) -> Result<(Vec<Expression>, Span), ParseError> {
    parser.expect(&Token::LeftParen)?;
    let mut arguments = Vec::new();

    while !parser.check(&Token::RightParen) {
        if parser.check(&Token::DotDotDot) {
            let start = parser.current_span();
            parser.advance();
            let argument = parse_assignment(parser)?;
            let span = parser.combine_spans(&start, &argument.span());
            arguments.push(Expression::Spread(Box::new(SpreadElement {
                argument,
                id: parser.next_id(),
                span,
            })));
        } else {
            arguments.push(parse_assignment(parser)?);
        }
        if !parser.eat(&Token::Comma) {
            break;
        }
    }

    let end = parser.expect(&Token::RightParen)?;
    Ok((arguments, end))
}

fn parse_primary(parser: &mut Parser) -> Result<Expression, ParseError> {
    let start = parser.current_span();
    match parser.current().clone() {
        Token::NumberLiteral(value) => {
            parser.advance();
            Ok(Expression::Number(Box::new(NumberLiteral {
                value,
                id: parser.next_id(),
                span: start,
            })))
        }
        Token::BigIntLiteral(digits) => {
            parser.advance();
            Ok(Expression::BigInt(Box::new(BigIntLiteral {
                digits,
                id: parser.next_id(),
                span: start,
            })))
        }
        Token::StringLiteral(value) => {
            parser.advance();
            Ok(Expression::String(Box::new(StringLiteral {
                value,
                id: parser.next_id(),
                span: start,
            })))
        }
        Token::True | Token::False => {
            let value = parser.check(&Token::True);
            parser.advance();
            Ok(Expression::Boolean(Box::new(BooleanLiteral {
                value,
                id: parser.next_id(),
                span: start,
            })))
        }
        Token::Null => {
            parser.advance();
            Ok(Expression::Null(Box::new(NullLiteral {
                id: parser.next_id(),
                span: start,
            })))
        }
        Token::RegExpLiteral { pattern, flags } => {
            parser.advance();
            Ok(Expression::RegExp(Box::new(RegExpLiteral {
                pattern,
                flags,
                id: parser.next_id(),
                span: start,
            })))
        }
        Token::TemplateLiteral(parts) => {
            parser.advance();
            let template = template_to_ast(parser, parts, start)?;
            Ok(Expression::Template(Box::new(template)))
        }
        Token::Identifier(name) => {
            parser.advance();
            Ok(Expression::Identifier(Box::new(IdentifierExpression {
                name,
                id: parser.next_id(),
                span: start,
            })))
        }
        Token::This => {
            parser.advance();
            Ok(Expression::This(Box::new(ThisExpression {
                id: parser.next_id(),
                span: start,
            })))
        }
        Token::Super => {
            parser.advance();
            Ok(Expression::Super(Box::new(SuperExpression {
                id: parser.next_id(),
                span: start,
            })))
        }
        Token::LeftParen => {
            parser.advance();
            let expression = parse_expression(parser)?;
            let end = parser.expect(&Token::RightParen)?;
            Ok(Expression::Paren(Box::new(ParenExpression {
                expression,
                id: parser.next_id(),
                span: parser.combine_spans(&start, &end),
            })))
        }
        Token::LeftBracket => parse_array_literal(parser),
        Token::LeftBrace => parse_object_literal(parser),
        Token::Function => parse_function_expression(parser, false, start),
        Token::Async if matches!(parser.peek(), Token::Function) => {
            parser.advance();
            parse_function_expression(parser, true, start)
        }
        Token::Class => parse_class_expression(parser),
        token if token.is_soft_keyword() => {
            // `of`, `from`, `as`, `static` and `async` double as plain
            // identifiers in expression position.
            let text = token.keyword_text().unwrap_or_default();
            let name = parser.intern(text);
            parser.advance();
            Ok(Expression::Identifier(Box::new(IdentifierExpression {
                name,
                id: parser.next_id(),
                span: start,
            })))
        }
        _ => Err(parser.unexpected("an expression")),
    }
}

fn parse_array_literal(parser: &mut Parser) -> Result<Expression, ParseError> {
    let start = parser.expect(&Token::LeftBracket)?;
    let mut elements = Vec::new();

    while !parser.check(&Token::RightBracket) {
        if parser.check(&Token::Comma) {
            // Elision: `[1, , 3]`.
            parser.advance();
            elements.push(None);
            continue;
        }
        if parser.check(&Token::DotDotDot) {
            let spread_start = parser.current_span();
            parser.advance();
            let argument = parse_assignment(parser)?;
            let span = parser.combine_spans(&spread_start, &argument.span());
            elements.push(Some(Expression::Spread(Box::new(SpreadElement {
                argument,
                id: parser.next_id(),
                span,
            }))));
        } else {
            elements.push(Some(parse_assignment(parser)?));
        }
        if !parser.eat(&Token::Comma) {
            break;
        }
    }

    let end = parser.expect(&Token::RightBracket)?;
    Ok(Expression::Array(Box::new(ArrayLiteral {
        elements,
        id: parser.next_id(),
        span: parser.combine_spans(&start, &end),
    })))
}

/// Whether a token can begin a property key, used to tell modifier
/// positions (`async f()`, `get x()`, `static m()`) apart from keys that
/// merely look like modifiers (`async: 1`, `get() {}`).
fn starts_property_key(token: &Token) -> bool {
    matches!(
        token,
        Token::Identifier(_)
            | Token::StringLiteral(_)
            | Token::NumberLiteral(_)
            | Token::LeftBracket
            | Token::Star
    ) || token.keyword_text().is_some()
}

pub(super) fn parse_property_key(parser: &mut Parser) -> Result<PropertyKey, ParseError> {
    let span = parser.current_span();
    match parser.current().clone() {
        Token::Identifier(name) => {
            parser.advance();
            Ok(PropertyKey::Identifier(Identifier { name, span }))
        }
        Token::StringLiteral(value) => {
            parser.advance();
            Ok(PropertyKey::String(value, span))
        }
        Token::NumberLiteral(value) => {
            parser.advance();
            Ok(PropertyKey::Number(value, span))
        }
        Token::LeftBracket => {
            parser.advance();
            let expr = parse_assignment(parser)?;
            parser.expect(&Token::RightBracket)?;
            Ok(PropertyKey::Computed(expr))
        }
        token => match token.keyword_text() {
            Some(text) => {
                let name = parser.intern(text);
                parser.advance();
                Ok(PropertyKey::Identifier(Identifier { name, span }))
            }
            None => Err(parser.unexpected("a property name")),
        },
    }
}

fn parse_object_literal(parser: &mut Parser) -> Result<Expression, ParseError> {
    let start = parser.expect(&Token::LeftBrace)?;
    let mut members = Vec::new();

    while !parser.check(&Token::RightBrace) {
        if parser.check(&Token::DotDotDot) {
            parser.advance();
            members.push(ObjectMember::Spread(parse_assignment(parser)?));
        } else {
            members.push(parse_object_member(parser)?);
        }
        if !parser.eat(&Token::Comma) {
            break;
        }
    }

    let end = parser.expect(&Token::RightBrace)?;
    Ok(Expression::Object(Box::new(ObjectLiteral {
        members,
        id: parser.next_id(),
        span: parser.combine_spans(&start, &end),
    })))
}

fn parse_object_member(parser: &mut Parser) -> Result<ObjectMember, ParseError> {
    let member_start = parser.current_span();

    let is_async = parser.check(&Token::Async) && starts_property_key(parser.peek());
    if is_async {
        parser.advance();
    }
    let is_generator = parser.eat(&Token::Star);
    let is_accessor = match parser.current() {
        Token::Identifier(sym) => {
            let text = parser.resolve(*sym);
            (text == "get" || text == "set") && starts_property_key(parser.peek())
        }
        _ => false,
    };
    if is_accessor {
        parser.advance();
    }

    let key = parse_property_key(parser)?;

    if parser.check(&Token::LeftParen) {
        // Method shorthand; accessors parse the same way here.
        let params = parse_params(parser)?;
        let (body, body_end) = parse_function_body(parser)?;
        let span = parser.combine_spans(&member_start, &body_end);
        let value = Expression::Function(Box::new(FunctionExpression {
            name: None,
            params,
            body,
            is_async,
            is_generator,
            id: parser.next_id(),
            span,
        }));
        return Ok(ObjectMember::Property(Box::new(PropertyDefinition {
            key,
            value,
            span,
        })));
    }
    if is_accessor {
        return Err(parser.unexpected("'('"));
    }

    if parser.eat(&Token::Colon) {
        let value = parse_assignment(parser)?;
        let span = parser.combine_spans(&member_start, &value.span());
        return Ok(ObjectMember::Property(Box::new(PropertyDefinition {
            key,
            value,
            span,
        })));
    }

    // Shorthand `{ a }`.
    match key {
        PropertyKey::Identifier(ident) => Ok(ObjectMember::Shorthand(Expression::Identifier(
            Box::new(IdentifierExpression {
                name: ident.name,
                id: parser.next_id(),
                span: ident.span,
            }),
        ))),
        _ => Err(parser.unexpected("':'")),
    }
}

pub(super) fn parse_params(parser: &mut Parser) -> Result<Vec<Pattern>, ParseError> {
    parser.expect(&Token::LeftParen)?;
    let mut params = Vec::new();

    while !parser.check(&Token::RightParen) {
        params.push(pattern::parse_pattern(parser)?);
        if !parser.eat(&Token::Comma) {
            break;
        }
    }

    parser.expect(&Token::RightParen)?;
    Ok(params)
}

/// Parse a `{ … }` function body. Returns the statements and the span of
/// the closing brace.
pub(super) fn parse_function_body(
    parser: &mut Parser,
) -> Result<(Vec<Statement>, Span), ParseError> {
    parser.expect(&Token::LeftBrace)?;
    let mut body = Vec::new();
    while !parser.check(&Token::RightBrace) && !parser.check(&Token::Eof) {
        body.push(stmt::parse_statement(parser)?);
    }
    let end = parser.expect(&Token::RightBrace)?;
    Ok((body, end))
}

fn parse_function_expression(
    parser: &mut Parser,
    is_async: bool,
    start: Span,
) -> Result<Expression, ParseError> {
    parser.expect(&Token::Function)?;
    let is_generator = parser.eat(&Token::Star);
    let name = match parser.current() {
        Token::Identifier(_) => Some(parser.expect_identifier()?),
        token if token.is_soft_keyword() => Some(parser.expect_identifier()?),
        _ => None,
    };
    let params = parse_params(parser)?;
    let (body, body_end) = parse_function_body(parser)?;
    Ok(Expression::Function(Box::new(FunctionExpression {
        name,
        params,
        body,
        is_async,
        is_generator,
        id: parser.next_id(),
        span: parser.combine_spans(&start, &body_end),
    })))
}

/// Parse the body of a class, from `{` to `}`. Shared between class
/// expressions and class declarations.
pub(super) fn parse_class_body(
    parser: &mut Parser,
) -> Result<(Vec<ClassMember>, Span), ParseError> {
    parser.expect(&Token::LeftBrace)?;
    let mut members = Vec::new();

    while !parser.check(&Token::RightBrace) && !parser.check(&Token::Eof) {
        if parser.eat(&Token::Semicolon) {
            continue;
        }
        members.push(parse_class_member(parser)?);
    }

    let end = parser.expect(&Token::RightBrace)?;
    Ok((members, end))
}

fn parse_class_member(parser: &mut Parser) -> Result<ClassMember, ParseError> {
    let member_start = parser.current_span();

    // `static` is a modifier unless it is itself the member name
    // (`static() {}`, `static = 1`).
    let is_static = parser.check(&Token::Static)
        && !matches!(parser.peek(), Token::LeftParen | Token::Equal);
    if is_static {
        parser.advance();
    }

    let is_async = parser.check(&Token::Async)
        && starts_property_key(parser.peek())
        && !matches!(parser.peek(), Token::LeftParen | Token::Equal);
    if is_async {
        parser.advance();
    }
    let is_generator = parser.eat(&Token::Star);

    let accessor_kind = match parser.current() {
        Token::Identifier(sym) => {
            let text = parser.resolve(*sym);
            let kind = match text {
                "get" => Some(ClassMemberKind::Getter),
                "set" => Some(ClassMemberKind::Setter),
                _ => None,
            };
            if kind.is_some() && starts_property_key(parser.peek()) {
                kind
            } else {
                None
            }
        }
        _ => None,
    };
    if accessor_kind.is_some() {
        parser.advance();
    }

    let key = parse_property_key(parser)?;

    if parser.check(&Token::LeftParen) {
        let params = parse_params(parser)?;
        let (body, body_end) = parse_function_body(parser)?;
        let span = parser.combine_spans(&member_start, &body_end);
        let value = Expression::Function(Box::new(FunctionExpression {
            name: None,
            params,
            body,
            is_async,
            is_generator,
            id: parser.next_id(),
            span,
        }));
        return Ok(ClassMember {
            key,
            kind: accessor_kind.unwrap_or(ClassMemberKind::Method),
            is_static,
            value: Some(value),
            span,
        });
    }

    if parser.eat(&Token::Equal) {
        let value = parse_assignment(parser)?;
        let span = parser.combine_spans(&member_start, &value.span());
        parser.eat(&Token::Semicolon);
        return Ok(ClassMember {
            key,
            kind: ClassMemberKind::Field,
            is_static,
            value: Some(value),
            span,
        });
    }

    parser.eat(&Token::Semicolon);
    Ok(ClassMember {
        key,
        kind: ClassMemberKind::Field,
        is_static,
        value: None,
        span: member_start,
    })
}

fn parse_class_expression(parser: &mut Parser) -> Result<Expression, ParseError> {
    let start = parser.expect(&Token::Class)?;
    let name = match parser.current() {
        Token::Identifier(_) => Some(parser.expect_identifier()?),
        _ => None,
    };
    let superclass = if parser.eat(&Token::Extends) {
        Some(parse_call_chain(parser, true)?)
    } else {
        None
    };
    let (body, end) = parse_class_body(parser)?;
    Ok(Expression::Class(Box::new(ClassExpression {
        name,
        superclass,
        body,
        id: parser.next_id(),
        span: parser.combine_spans(&start, &end),
    })))
}

// ── arrow functions ──

/// Token lookahead for `( … ) =>` without consuming anything.
fn paren_lookahead_is_arrow(parser: &Parser, start_offset: usize) -> bool {
    let mut depth = 0usize;
    let mut i = start_offset;
    loop {
        match parser.peek_at(i) {
            Token::LeftParen => depth += 1,
            Token::RightParen => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return parser.peek_at(i + 1) == &Token::Arrow;
                }
            }
            Token::Eof => return false,
            _ => {}
        }
        i += 1;
    }
}

fn is_arrow_ahead(parser: &Parser) -> bool {
    match parser.current() {
        Token::Identifier(_) => parser.peek() == &Token::Arrow,
        Token::LeftParen => paren_lookahead_is_arrow(parser, 0),
        Token::Async => match parser.peek() {
            Token::Identifier(_) => parser.peek_at(2) == &Token::Arrow,
            Token::LeftParen => paren_lookahead_is_arrow(parser, 1),
            // `async => …` uses async itself as the parameter.
            Token::Arrow => true,
            _ => false,
        },
        token if token.is_soft_keyword() => parser.peek() == &Token::Arrow,
        _ => false,
    }
}

fn parse_arrow(parser: &mut Parser) -> Result<Expression, ParseError> {
    let start = parser.current_span();
    let is_async = parser.check(&Token::Async) && !matches!(parser.peek(), Token::Arrow);
    if is_async {
        parser.advance();
    }

    let params = if parser.check(&Token::LeftParen) {
        parse_params(parser)?
    } else {
        vec![Pattern::Identifier(parser.expect_identifier()?)]
    };

    parser.expect(&Token::Arrow)?;

    let (body, end) = if parser.check(&Token::LeftBrace) {
        let (statements, end) = parse_function_body(parser)?;
        (ArrowBody::Block(statements), end)
    } else {
        let expr = parse_assignment(parser)?;
        let end = expr.span();
        (ArrowBody::Expression(expr), end)
    };

    Ok(Expression::Arrow(Box::new(ArrowFunctionExpression {
        params,
        body,
        is_async,
        id: parser.next_id(),
        span: parser.combine_spans(&start, &end),
    })))
}

// ── template literals ──

/// Convert lexed template parts into an AST template literal, parsing
/// each interpolation's token stream as an expression. The result always
/// has exactly one more quasi than interpolated expressions.
fn template_to_ast(
    parser: &mut Parser,
    parts: Vec<TemplatePart>,
    span: Span,
) -> Result<TemplateLiteral, ParseError> {
    let mut quasis = Vec::new();
    let mut expressions = Vec::new();

    for part in parts {
        match part {
            TemplatePart::String(text) => quasis.push(text),
            TemplatePart::Expression(tokens) => {
                if quasis.len() == expressions.len() {
                    let empty = parser.intern("");
                    quasis.push(empty);
                }
                expressions.push(parser.parse_embedded(tokens, span)?);
            }
        }
    }
    if quasis.len() == expressions.len() {
        let empty = parser.intern("");
        quasis.push(empty);
    }

    Ok(TemplateLiteral {
        quasis,
        expressions,
        id: parser.next_id(),
        span,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::ast::Program;

    fn parse_expr(source: &str) -> (Program, Expression) {
        let (program, _) = Parser::parse_source(source).expect("should parse");
        let Statement::Expression(stmt) = &program.statements[0] else {
            panic!("expected an expression statement");
        };
        let expr = stmt.expression.clone();
        (program, expr)
    }

    #[test]
    fn precedence_mul_binds_tighter_than_add() {
        let (_, expr) = parse_expr("a + b * c;");
        let Expression::Binary(add) = expr else {
            panic!("expected binary");
        };
        assert_eq!(add.operator, BinaryOperator::Add);
        assert!(matches!(add.right, Expression::Binary(_)));
    }

    #[test]
    fn exponent_is_right_associative() {
        let (_, expr) = parse_expr("a ** b ** c;");
        let Expression::Binary(outer) = expr else {
            panic!("expected binary");
        };
        assert_eq!(outer.operator, BinaryOperator::Exponent);
        assert!(matches!(outer.left, Expression::Identifier(_)));
        assert!(matches!(outer.right, Expression::Binary(_)));
    }

    #[test]
    fn optional_chain_is_wrapped() {
        let (_, expr) = parse_expr("a?.b.c;");
        let Expression::Chain(chain) = expr else {
            panic!("expected chain wrapper, got {:?}", expr);
        };
        assert!(matches!(chain.expression, Expression::Member(_)));
    }

    #[test]
    fn plain_member_chain_is_not_wrapped() {
        let (_, expr) = parse_expr("a.b.c;");
        assert!(matches!(expr, Expression::Member(_)));
    }

    #[test]
    fn new_without_arguments() {
        let (_, expr) = parse_expr("new Date;");
        let Expression::New(new) = expr else {
            panic!("expected new expression");
        };
        assert!(new.arguments.is_empty());
    }

    #[test]
    fn new_member_callee_binds_before_call() {
        let (_, expr) = parse_expr("new ns.Thing(1);");
        let Expression::New(new) = expr else {
            panic!("expected new expression");
        };
        assert!(matches!(new.callee, Expression::Member(_)));
        assert_eq!(new.arguments.len(), 1);
    }

    #[test]
    fn arrow_with_parenthesized_params() {
        let (_, expr) = parse_expr("(a, b) => a + b;");
        let Expression::Arrow(arrow) = expr else {
            panic!("expected arrow function");
        };
        assert_eq!(arrow.params.len(), 2);
        assert!(matches!(arrow.body, ArrowBody::Expression(_)));
    }

    #[test]
    fn parenthesized_sequence_is_not_an_arrow() {
        let (_, expr) = parse_expr("(a, b);");
        let Expression::Paren(paren) = expr else {
            panic!("expected parenthesized expression");
        };
        assert!(matches!(paren.expression, Expression::Sequence(_)));
    }

    #[test]
    fn async_arrow_parses() {
        let (_, expr) = parse_expr("async (x) => x;");
        let Expression::Arrow(arrow) = expr else {
            panic!("expected arrow function");
        };
        assert!(arrow.is_async);
    }

    #[test]
    fn template_quasi_expression_alternation() {
        let (_, expr) = parse_expr("`a${b}c${d}`;");
        let Expression::Template(template) = expr else {
            panic!("expected template literal");
        };
        assert_eq!(template.expressions.len(), 2);
        assert_eq!(template.quasis.len(), 3);
    }

    #[test]
    fn tagged_template_parses() {
        let (_, expr) = parse_expr("tag`x${y}`;");
        assert!(matches!(expr, Expression::TaggedTemplate(_)));
    }

    #[test]
    fn object_literal_shorthand_and_methods() {
        let (_, expr) = parse_expr("({ a, b: 1, c() {}, get d() { return 1; }, ...rest });");
        let Expression::Paren(paren) = expr else {
            panic!("expected parenthesized object");
        };
        let Expression::Object(object) = &paren.expression else {
            panic!("expected object literal");
        };
        assert_eq!(object.members.len(), 5);
        assert!(matches!(object.members[0], ObjectMember::Shorthand(_)));
        assert!(matches!(object.members[4], ObjectMember::Spread(_)));
    }

    #[test]
    fn conditional_nests_in_assignment() {
        let (_, expr) = parse_expr("x = a ? b : c;");
        let Expression::Assignment(assign) = expr else {
            panic!("expected assignment");
        };
        assert!(matches!(assign.value, Expression::Conditional(_)));
    }

    #[test]
    fn logical_assignment_operators_parse() {
        let (_, expr) = parse_expr("a ??= b;");
        let Expression::Assignment(assign) = expr else {
            panic!("expected assignment");
        };
        assert_eq!(assign.operator, AssignmentOperator::Nullish);
    }

    #[test]
    fn spread_in_call_arguments() {
        let (_, expr) = parse_expr("f(...items, 1);");
        let Expression::Call(call) = expr else {
            panic!("expected call");
        };
        assert_eq!(call.arguments.len(), 2);
        assert!(matches!(call.arguments[0], Expression::Spread(_)));
    }

    #[test]
    fn class_expression_with_members() {
        let (_, expr) = parse_expr(
            "(class Point { static origin = null; x = 0; get len() { return 0; } move(dx) {} });",
        );
        let Expression::Paren(paren) = expr else {
            panic!("expected parenthesized class");
        };
        let Expression::Class(class) = &paren.expression else {
            panic!("expected class expression");
        };
        assert_eq!(class.body.len(), 4);
        assert!(class.body[0].is_static);
        assert_eq!(class.body[2].kind, ClassMemberKind::Getter);
    }

    #[test]
    fn in_operator_has_relational_precedence() {
        let (_, expr) = parse_expr("a in b === true;");
        let Expression::Binary(outer) = expr else {
            panic!("expected binary");
        };
        assert_eq!(outer.operator, BinaryOperator::StrictEqual);
        let Expression::Binary(inner) = &outer.left else {
            panic!("expected inner binary");
        };
        assert_eq!(inner.operator, BinaryOperator::In);
    }
}
