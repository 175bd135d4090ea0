//! Binding pattern parsing for declarations, parameters and catch
//! clauses.

use crate::syntax::ast::expression::PropertyKey;
use crate::syntax::ast::pattern::{
    ArrayPattern, AssignmentPattern, ObjectPattern, ObjectPatternProperty, Pattern, RestPattern,
};
use crate::syntax::parser::{expr, ParseError, Parser};
use crate::syntax::token::Token;

/// Parse a pattern with an optional default (`x = 1`, `[a] = []`). Used
/// for function parameters and destructuring elements.
pub fn parse_pattern(parser: &mut Parser) -> Result<Pattern, ParseError> {
    let target = parse_binding_target(parser)?;
    if !parser.check(&Token::Equal) {
        return Ok(target);
    }
    parser.advance();
    let default = expr::parse_assignment(parser)?;
    let span = target.span().merge(&default.span());
    Ok(Pattern::Assignment(Box::new(AssignmentPattern {
        target,
        default,
        span,
    })))
}

/// Parse a pattern without consuming a trailing `= …`. Declarators use
/// this so the initializer stays separate from the pattern.
pub fn parse_binding_target(parser: &mut Parser) -> Result<Pattern, ParseError> {
    match parser.current() {
        Token::DotDotDot => {
            let start = parser.current_span();
            parser.advance();
            let argument = parse_binding_target(parser)?;
            let span = start.merge(&argument.span());
            Ok(Pattern::Rest(Box::new(RestPattern { argument, span })))
        }
        Token::LeftBracket => parse_array_pattern(parser),
        Token::LeftBrace => parse_object_pattern(parser),
        _ => Ok(Pattern::Identifier(parser.expect_identifier()?)),
    }
}

fn parse_array_pattern(parser: &mut Parser) -> Result<Pattern, ParseError> {
    let start = parser.expect(&Token::LeftBracket)?;
    let mut elements = Vec::new();

    while !parser.check(&Token::RightBracket) {
        if parser.check(&Token::Comma) {
            // Hole: `[, b]`.
            parser.advance();
            elements.push(None);
            continue;
        }
        elements.push(Some(parse_pattern(parser)?));
        if !parser.eat(&Token::Comma) {
            break;
        }
    }

    let end = parser.expect(&Token::RightBracket)?;
    Ok(Pattern::Array(Box::new(ArrayPattern {
        elements,
        span: start.merge(&end),
    })))
}

fn parse_object_pattern(parser: &mut Parser) -> Result<Pattern, ParseError> {
    let start = parser.expect(&Token::LeftBrace)?;
    let mut properties = Vec::new();
    let mut rest = None;

    while !parser.check(&Token::RightBrace) {
        if parser.check(&Token::DotDotDot) {
            let rest_start = parser.current_span();
            parser.advance();
            let argument = parse_binding_target(parser)?;
            let span = rest_start.merge(&argument.span());
            rest = Some(Pattern::Rest(Box::new(RestPattern { argument, span })));
            if !parser.eat(&Token::Comma) {
                break;
            }
            continue;
        }

        let prop_start = parser.current_span();
        let key = expr::parse_property_key(parser)?;
        let mut value = if parser.eat(&Token::Colon) {
            parse_binding_target(parser)?
        } else {
            // Shorthand `{ a }`.
            match &key {
                PropertyKey::Identifier(ident) => Pattern::Identifier(ident.clone()),
                _ => return Err(parser.unexpected("':'")),
            }
        };
        if parser.eat(&Token::Equal) {
            let default = expr::parse_assignment(parser)?;
            let span = value.span().merge(&default.span());
            value = Pattern::Assignment(Box::new(AssignmentPattern {
                target: value,
                default,
                span,
            }));
        }
        let span = prop_start.merge(&value.span());
        properties.push(ObjectPatternProperty { key, value, span });
        if !parser.eat(&Token::Comma) {
            break;
        }
    }

    let end = parser.expect(&Token::RightBrace)?;
    Ok(Pattern::Object(Box::new(ObjectPattern {
        properties,
        rest,
        span: start.merge(&end),
    })))
}
