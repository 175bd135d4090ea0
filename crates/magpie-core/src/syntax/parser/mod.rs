//! Recursive-descent parser for the ECMAScript subset Magpie lints.
//!
//! The parser consumes the token stream produced by [`Lexer`] and builds
//! the AST defined in [`crate::syntax::ast`]. It assigns every expression
//! node a fresh [`ExprId`] as it goes; ids are dense and start at zero so
//! downstream passes can key caches by them.

pub mod expr;
pub mod pattern;
pub mod stmt;

use crate::syntax::ast::{ExprId, Identifier, Program};
use crate::syntax::interner::{Interner, Symbol};
use crate::syntax::lexer::Lexer;
use crate::syntax::token::{Span, Token};
use thiserror::Error;

/// Maximum nesting depth before rejecting a parse. Keeps deeply nested
/// machine-generated input from overflowing the stack.
pub const MAX_PARSE_DEPTH: usize = 120;

/// A parse error with its source location.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

impl ParseError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

/// Parser state. The parsing routines live in [`stmt`], [`expr`] and
/// [`pattern`] as free functions over `&mut Parser`.
pub struct Parser {
    tokens: Vec<(Token, Span)>,
    pos: usize,
    interner: Interner,
    pub(super) depth: usize,
    next_expr_id: u32,
}

impl Parser {
    pub fn new(tokens: Vec<(Token, Span)>, interner: Interner) -> Self {
        Self {
            tokens,
            pos: 0,
            interner,
            depth: 0,
            next_expr_id: 0,
        }
    }

    /// Tokenize and parse a whole source file.
    pub fn parse_source(source: &str) -> Result<(Program, Interner), ParseError> {
        let lexer = Lexer::new(source);
        let (tokens, interner) = lexer.tokenize().map_err(|errors| {
            let first = &errors[0];
            ParseError::new(first.to_string(), first.span())
        })?;
        Parser::new(tokens, interner).parse()
    }

    /// Parse the token stream into a program.
    pub fn parse(mut self) -> Result<(Program, Interner), ParseError> {
        let start_span = self.current_span();
        let mut statements = Vec::new();

        while !self.check(&Token::Eof) {
            let before = self.pos;
            statements.push(stmt::parse_statement(&mut self)?);
            if self.pos == before {
                // A statement parser failed to make progress; bail rather
                // than loop forever.
                return Err(self.unexpected("a statement"));
            }
        }

        let span = self.combine_spans(&start_span, &self.current_span());
        Ok((Program { statements, span }, self.interner))
    }

    // ── token stream helpers ──

    pub(super) fn current(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)].0
    }

    pub(super) fn current_span(&self) -> Span {
        self.tokens[self.pos.min(self.tokens.len() - 1)].1
    }

    pub(super) fn peek(&self) -> &Token {
        let idx = (self.pos + 1).min(self.tokens.len() - 1);
        &self.tokens[idx].0
    }

    pub(super) fn peek_at(&self, offset: usize) -> &Token {
        let idx = (self.pos + offset).min(self.tokens.len() - 1);
        &self.tokens[idx].0
    }

    pub(super) fn advance(&mut self) {
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
    }

    pub(super) fn check(&self, token: &Token) -> bool {
        self.current() == token
    }

    /// Consume the current token if it matches.
    pub(super) fn eat(&mut self, token: &Token) -> bool {
        if self.check(token) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(super) fn expect(&mut self, token: &Token) -> Result<Span, ParseError> {
        if self.check(token) {
            let span = self.current_span();
            self.advance();
            Ok(span)
        } else {
            Err(self.unexpected(&format!("'{}'", token)))
        }
    }

    /// Consume an identifier, allowing the contextual keywords ECMAScript
    /// permits as binding names.
    pub(super) fn expect_identifier(&mut self) -> Result<Identifier, ParseError> {
        let span = self.current_span();
        let name = match self.current() {
            Token::Identifier(sym) => *sym,
            token if token.is_soft_keyword() => {
                let text = token.keyword_text().unwrap_or_default();
                self.interner.intern(text)
            }
            _ => return Err(self.unexpected("an identifier")),
        };
        self.advance();
        Ok(Identifier { name, span })
    }

    /// Consume a property name after `.` or `?.`. Any keyword is legal
    /// here (`promise.finally`, `map.delete`).
    pub(super) fn expect_property_name(&mut self) -> Result<Identifier, ParseError> {
        let span = self.current_span();
        let name = match self.current() {
            Token::Identifier(sym) => *sym,
            token => match token.keyword_text() {
                Some(text) => self.interner.intern(text),
                None => return Err(self.unexpected("a property name")),
            },
        };
        self.advance();
        Ok(Identifier { name, span })
    }

    pub(super) fn intern(&mut self, text: &str) -> Symbol {
        self.interner.intern(text)
    }

    pub(super) fn resolve(&self, sym: Symbol) -> &str {
        self.interner.resolve(sym)
    }

    pub(super) fn next_id(&mut self) -> ExprId {
        let id = ExprId(self.next_expr_id);
        self.next_expr_id += 1;
        id
    }

    pub(super) fn combine_spans(&self, start: &Span, end: &Span) -> Span {
        start.merge(end)
    }

    pub(super) fn unexpected(&self, expected: &str) -> ParseError {
        ParseError::new(
            format!("expected {}, found '{}'", expected, self.current()),
            self.current_span(),
        )
    }

    /// Parse an embedded token stream (a template literal interpolation)
    /// as a single expression, reusing this parser's interner and id
    /// counter.
    pub(super) fn parse_embedded(
        &mut self,
        mut tokens: Vec<(Token, Span)>,
        fallback_span: Span,
    ) -> Result<crate::syntax::ast::Expression, ParseError> {
        let end = tokens.last().map(|(_, s)| *s).unwrap_or(fallback_span);
        tokens.push((Token::Eof, end));

        let saved_tokens = std::mem::replace(&mut self.tokens, tokens);
        let saved_pos = std::mem::replace(&mut self.pos, 0);
        let result = expr::parse_expression(self);
        self.tokens = saved_tokens;
        self.pos = saved_pos;
        result
    }
}
