//! Lexer for the ECMAScript subset Magpie lints.
//!
//! Tokenization is driven by logos for ordinary tokens, with two constructs
//! handled by manual scanning before logos sees them: template literals
//! (which carry nested token streams) and regular expression literals
//! (where `/` is only a regex opener in operand position).

use crate::syntax::interner::Interner;
use crate::syntax::token::{Span, TemplatePart, Token};
use logos::Logos;
use thiserror::Error;

/// Logos-based token enum for lexing.
///
/// Converted to the public `Token` enum after each match.
#[derive(Logos, Debug, Clone, PartialEq)]
enum LogosToken {
    // Whitespace (skip); comments are consumed by the manual skip loop
    #[regex(r"[ \t\r\n]+", logos::skip)]
    Whitespace,

    // Keywords (must come before identifiers)
    #[token("var")]
    Var,

    #[token("let")]
    Let,

    #[token("const")]
    Const,

    #[token("function")]
    Function,

    #[token("class")]
    Class,

    #[token("if")]
    If,

    #[token("else")]
    Else,

    #[token("switch")]
    Switch,

    #[token("case")]
    Case,

    #[token("default")]
    Default,

    #[token("for")]
    For,

    #[token("while")]
    While,

    #[token("do")]
    Do,

    #[token("break")]
    Break,

    #[token("continue")]
    Continue,

    #[token("return")]
    Return,

    #[token("async")]
    Async,

    #[token("await")]
    Await,

    #[token("try")]
    Try,

    #[token("catch")]
    Catch,

    #[token("finally")]
    Finally,

    #[token("throw")]
    Throw,

    #[token("import")]
    Import,

    #[token("export")]
    Export,

    #[token("from")]
    From,

    #[token("as")]
    As,

    #[token("new")]
    New,

    #[token("this")]
    This,

    #[token("super")]
    Super,

    #[token("static")]
    Static,

    #[token("extends")]
    Extends,

    #[token("typeof")]
    Typeof,

    #[token("instanceof")]
    Instanceof,

    #[token("delete")]
    Delete,

    #[token("void")]
    Void,

    #[token("in")]
    In,

    #[token("of")]
    Of,

    #[token("yield")]
    Yield,

    #[token("debugger")]
    Debugger,

    #[token("true")]
    True,

    #[token("false")]
    False,

    #[token("null")]
    Null,

    // Identifiers (must come after keywords)
    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*", |lex| lex.slice().to_string())]
    Identifier(String),

    // BigInt literals (before plain numbers so `1n` is one token)
    #[regex(r"[0-9]+(_[0-9]+)*n", parse_bigint)]
    #[regex(r"0x[0-9a-fA-F]+(_[0-9a-fA-F]+)*n", parse_bigint)]
    #[regex(r"0b[01]+(_[01]+)*n", parse_bigint)]
    #[regex(r"0o[0-7]+(_[0-7]+)*n", parse_bigint)]
    BigIntLiteral(String),

    // Numbers with numeric separator support
    #[regex(r"0x[0-9a-fA-F]+(_[0-9a-fA-F]+)*", parse_hex)]
    #[regex(r"0b[01]+(_[01]+)*", parse_binary)]
    #[regex(r"0o[0-7]+(_[0-7]+)*", parse_octal)]
    #[regex(r"[0-9]+(_[0-9]+)*", parse_number)]
    #[regex(r"[0-9]+(_[0-9]+)*\.[0-9]*(_[0-9]+)*([eE][+-]?[0-9]+(_[0-9]+)*)?", parse_number)]
    #[regex(r"[0-9]+(_[0-9]+)*[eE][+-]?[0-9]+(_[0-9]+)*", parse_number)]
    #[regex(r"\.[0-9]+(_[0-9]+)*([eE][+-]?[0-9]+(_[0-9]+)*)?", parse_number)]
    NumberLiteral(f64),

    // Strings
    #[regex(r#""([^"\\\n]|\\.)*""#, parse_string)]
    #[regex(r"'([^'\\\n]|\\.)*'", parse_string)]
    StringLiteral(String),

    // Template literal start (handled by the manual loop; kept so a stray
    // backtick inside a sub-stream still produces a token to report on)
    #[token("`")]
    Backtick,

    // Operators (longer lexemes must come before their prefixes)
    #[token(">>>=")]
    GreaterGreaterGreaterEqual,

    #[token("===")]
    EqualEqualEqual,

    #[token("!==")]
    BangEqualEqual,

    #[token(">>>")]
    GreaterGreaterGreater,

    #[token("**=")]
    StarStarEqual,

    #[token("<<=")]
    LessLessEqual,

    #[token(">>=")]
    GreaterGreaterEqual,

    #[token("&&=")]
    AmpAmpEqual,

    #[token("||=")]
    PipePipeEqual,

    #[token("??=")]
    QuestionQuestionEqual,

    #[token("**")]
    StarStar,

    #[token("==")]
    EqualEqual,

    #[token("!=")]
    BangEqual,

    #[token("<=")]
    LessEqual,

    #[token(">=")]
    GreaterEqual,

    #[token("&&")]
    AmpAmp,

    #[token("||")]
    PipePipe,

    #[token("??")]
    QuestionQuestion,

    #[token("++")]
    PlusPlus,

    #[token("--")]
    MinusMinus,

    #[token("<<")]
    LessLess,

    #[token(">>")]
    GreaterGreater,

    #[token("?.")]
    QuestionDot,

    #[token("=>")]
    Arrow,

    #[token("+=")]
    PlusEqual,

    #[token("-=")]
    MinusEqual,

    #[token("*=")]
    StarEqual,

    #[token("/=")]
    SlashEqual,

    #[token("%=")]
    PercentEqual,

    #[token("&=")]
    AmpEqual,

    #[token("|=")]
    PipeEqual,

    #[token("^=")]
    CaretEqual,

    // Single-character tokens
    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,

    #[token("%")]
    Percent,

    #[token("!")]
    Bang,

    #[token("~")]
    Tilde,

    #[token("<")]
    Less,

    #[token(">")]
    Greater,

    #[token("&")]
    Amp,

    #[token("|")]
    Pipe,

    #[token("^")]
    Caret,

    #[token("=")]
    Equal,

    #[token("?")]
    Question,

    #[token("...")]
    DotDotDot,

    #[token(".")]
    Dot,

    #[token(":")]
    Colon,

    #[token("(")]
    LeftParen,

    #[token(")")]
    RightParen,

    #[token("{")]
    LeftBrace,

    #[token("}")]
    RightBrace,

    #[token("[")]
    LeftBracket,

    #[token("]")]
    RightBracket,

    #[token(";")]
    Semicolon,

    #[token(",")]
    Comma,
}

// Helper parsing functions

fn parse_hex(lex: &mut logos::Lexer<LogosToken>) -> Option<f64> {
    let s = lex.slice()[2..].replace('_', "");
    u128::from_str_radix(&s, 16).ok().map(|n| n as f64)
}

fn parse_binary(lex: &mut logos::Lexer<LogosToken>) -> Option<f64> {
    let s = lex.slice()[2..].replace('_', "");
    u128::from_str_radix(&s, 2).ok().map(|n| n as f64)
}

fn parse_octal(lex: &mut logos::Lexer<LogosToken>) -> Option<f64> {
    let s = lex.slice()[2..].replace('_', "");
    u128::from_str_radix(&s, 8).ok().map(|n| n as f64)
}

fn parse_number(lex: &mut logos::Lexer<LogosToken>) -> Option<f64> {
    lex.slice().replace('_', "").parse().ok()
}

fn parse_bigint(lex: &mut logos::Lexer<LogosToken>) -> Option<String> {
    let s = lex.slice();
    // Drop the trailing `n`; the digits are all the type system needs.
    Some(s[..s.len() - 1].replace('_', ""))
}

fn parse_string(lex: &mut logos::Lexer<LogosToken>) -> Option<String> {
    let s = lex.slice();
    let inner = &s[1..s.len() - 1];
    Some(unescape_string(inner))
}

fn unescape_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('r') => result.push('\r'),
            Some('t') => result.push('\t'),
            Some('b') => result.push('\u{0008}'),
            Some('f') => result.push('\u{000C}'),
            Some('v') => result.push('\u{000B}'),
            Some('0') => result.push('\0'),
            Some('u') => {
                if chars.peek() == Some(&'{') {
                    chars.next();
                    let mut hex = String::new();
                    for ch in chars.by_ref() {
                        if ch == '}' {
                            break;
                        }
                        hex.push(ch);
                    }
                    if let Some(unicode_char) =
                        u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32)
                    {
                        result.push(unicode_char);
                    }
                } else {
                    let mut hex = String::new();
                    for _ in 0..4 {
                        match chars.peek() {
                            Some(&ch) if ch.is_ascii_hexdigit() => {
                                hex.push(ch);
                                chars.next();
                            }
                            _ => break,
                        }
                    }
                    if hex.len() == 4 {
                        if let Some(unicode_char) =
                            u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32)
                        {
                            result.push(unicode_char);
                        }
                    }
                }
            }
            Some('x') => {
                let mut hex = String::new();
                for _ in 0..2 {
                    match chars.peek() {
                        Some(&ch) if ch.is_ascii_hexdigit() => {
                            hex.push(ch);
                            chars.next();
                        }
                        _ => break,
                    }
                }
                if hex.len() == 2 {
                    if let Ok(code_point) = u8::from_str_radix(&hex, 16) {
                        result.push(code_point as char);
                    }
                }
            }
            Some(other) => result.push(other),
            None => break,
        }
    }

    result
}

/// Main lexer structure.
pub struct Lexer<'a> {
    source: &'a str,
    tokens: Vec<(Token, Span)>,
    errors: Vec<LexError>,
    interner: Interner,
}

/// Lexer error types.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    #[error("unexpected character '{char}'")]
    UnexpectedCharacter { char: char, span: Span },
    #[error("unterminated template literal")]
    UnterminatedTemplate { span: Span },
    #[error("unterminated regular expression literal")]
    UnterminatedRegExp { span: Span },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::UnexpectedCharacter { span, .. }
            | LexError::UnterminatedTemplate { span }
            | LexError::UnterminatedRegExp { span } => *span,
        }
    }
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            tokens: Vec::new(),
            errors: Vec::new(),
            interner: Interner::with_capacity(256),
        }
    }

    /// Create a new lexer with an existing interner.
    ///
    /// Used for lexing template literal expressions, which share the
    /// interner with the parent lexer.
    fn with_interner(source: &'a str, interner: Interner) -> Self {
        Self {
            source,
            tokens: Vec::new(),
            errors: Vec::new(),
            interner,
        }
    }

    pub fn tokenize(mut self) -> Result<(Vec<(Token, Span)>, Interner), Vec<LexError>> {
        let mut pos = 0;
        let mut line = 1u32;
        let mut column = 1u32;

        while pos < self.source.len() {
            // Skip whitespace and comments manually so templates and regex
            // literals can be spotted before logos consumes their openers.
            let bytes = self.source.as_bytes();
            while pos < bytes.len() {
                match bytes[pos] {
                    b' ' | b'\t' | b'\r' => {
                        column += 1;
                        pos += 1;
                    }
                    b'\n' => {
                        line += 1;
                        column = 1;
                        pos += 1;
                    }
                    b'/' if pos + 1 < bytes.len() => match bytes[pos + 1] {
                        b'/' => {
                            pos += 2;
                            column += 2;
                            while pos < bytes.len() && bytes[pos] != b'\n' {
                                pos += 1;
                                column += 1;
                            }
                        }
                        b'*' => {
                            pos += 2;
                            column += 2;
                            while pos + 1 < bytes.len() {
                                if bytes[pos] == b'*' && bytes[pos + 1] == b'/' {
                                    pos += 2;
                                    column += 2;
                                    break;
                                }
                                if bytes[pos] == b'\n' {
                                    line += 1;
                                    column = 1;
                                } else {
                                    column += 1;
                                }
                                pos += 1;
                            }
                        }
                        _ => break,
                    },
                    _ => break,
                }
            }

            if pos >= self.source.len() {
                break;
            }

            // Template literal?
            if self.source.as_bytes()[pos] == b'`' {
                let start_span = Span::new(pos, pos + 1, line, column);
                let content_start = pos + 1;
                column += 1;

                match self.lex_template(content_start) {
                    Ok((template, end_pos)) => {
                        let span =
                            Span::new(start_span.start, end_pos, start_span.line, start_span.column);
                        self.tokens.push((Token::TemplateLiteral(template), span));
                        for c in self.source[content_start..end_pos].chars() {
                            if c == '\n' {
                                line += 1;
                                column = 1;
                            } else {
                                column += 1;
                            }
                        }
                        pos = end_pos;
                        continue;
                    }
                    Err(err) => {
                        self.errors.push(err);
                        pos = self.source.len();
                        continue;
                    }
                }
            }

            // Regex literal? Only when the previous token leaves us in
            // operand position; otherwise `/` is division.
            if self.source.as_bytes()[pos] == b'/' && self.regex_allowed() {
                match self.lex_regex(pos, line, column) {
                    Ok((token, span, end_pos)) => {
                        self.tokens.push((token, span));
                        for c in self.source[pos..end_pos].chars() {
                            if c == '\n' {
                                line += 1;
                                column = 1;
                            } else {
                                column += 1;
                            }
                        }
                        pos = end_pos;
                        continue;
                    }
                    Err(err) => {
                        self.errors.push(err);
                        pos = self.source.len();
                        continue;
                    }
                }
            }

            // Use logos for regular tokens
            let mut logos_lexer = LogosToken::lexer(&self.source[pos..]);

            if let Some(token_result) = logos_lexer.next() {
                let range = logos_lexer.span();
                let abs_start = pos + range.start;
                let abs_end = pos + range.end;

                let span = Span::new(abs_start, abs_end, line, column);

                match token_result {
                    Ok(logos_token) => {
                        let token = self.convert_token(logos_token);
                        self.tokens.push((token, span));
                    }
                    Err(_) => {
                        let char = self.source[abs_start..].chars().next().unwrap_or('\0');
                        self.errors.push(LexError::UnexpectedCharacter { char, span });
                    }
                }

                for c in self.source[abs_start..abs_end].chars() {
                    if c == '\n' {
                        line += 1;
                        column = 1;
                    } else {
                        column += 1;
                    }
                }

                pos = abs_end;
            } else {
                break;
            }
        }

        let eof_span = Span::new(self.source.len(), self.source.len(), line, column);
        self.tokens.push((Token::Eof, eof_span));

        if self.errors.is_empty() {
            Ok((self.tokens, self.interner))
        } else {
            Err(self.errors)
        }
    }

    /// True when the token stream so far leaves `/` in operand position.
    fn regex_allowed(&self) -> bool {
        match self.tokens.last() {
            None => true,
            Some((token, _)) => !matches!(
                token,
                Token::Identifier(_)
                    | Token::NumberLiteral(_)
                    | Token::BigIntLiteral(_)
                    | Token::StringLiteral(_)
                    | Token::TemplateLiteral(_)
                    | Token::RegExpLiteral { .. }
                    | Token::True
                    | Token::False
                    | Token::Null
                    | Token::This
                    | Token::Super
                    | Token::RightParen
                    | Token::RightBracket
                    | Token::PlusPlus
                    | Token::MinusMinus
            ),
        }
    }

    fn lex_regex(
        &mut self,
        start: usize,
        line: u32,
        column: u32,
    ) -> Result<(Token, Span, usize), LexError> {
        let bytes = self.source.as_bytes();
        let mut pos = start + 1;
        let mut in_class = false;

        loop {
            if pos >= bytes.len() {
                let span = Span::new(start, self.source.len(), line, column);
                return Err(LexError::UnterminatedRegExp { span });
            }
            match bytes[pos] {
                b'\\' => {
                    if pos + 1 >= bytes.len() {
                        let span = Span::new(start, self.source.len(), line, column);
                        return Err(LexError::UnterminatedRegExp { span });
                    }
                    pos += 2;
                }
                b'[' => {
                    in_class = true;
                    pos += 1;
                }
                b']' => {
                    in_class = false;
                    pos += 1;
                }
                b'/' if !in_class => break,
                b'\n' => {
                    let span = Span::new(start, pos, line, column);
                    return Err(LexError::UnterminatedRegExp { span });
                }
                _ => pos += 1,
            }
        }

        let pattern = self.interner.intern(&self.source[start + 1..pos]);
        pos += 1;

        let flags_start = pos;
        while pos < bytes.len() && (bytes[pos] as char).is_ascii_alphabetic() {
            pos += 1;
        }
        let flags = self.interner.intern(&self.source[flags_start..pos]);

        let span = Span::new(start, pos, line, column);
        Ok((Token::RegExpLiteral { pattern, flags }, span, pos))
    }

    fn convert_token(&mut self, logos_token: LogosToken) -> Token {
        match logos_token {
            LogosToken::Var => Token::Var,
            LogosToken::Let => Token::Let,
            LogosToken::Const => Token::Const,
            LogosToken::Function => Token::Function,
            LogosToken::Class => Token::Class,
            LogosToken::If => Token::If,
            LogosToken::Else => Token::Else,
            LogosToken::Switch => Token::Switch,
            LogosToken::Case => Token::Case,
            LogosToken::Default => Token::Default,
            LogosToken::For => Token::For,
            LogosToken::While => Token::While,
            LogosToken::Do => Token::Do,
            LogosToken::Break => Token::Break,
            LogosToken::Continue => Token::Continue,
            LogosToken::Return => Token::Return,
            LogosToken::Async => Token::Async,
            LogosToken::Await => Token::Await,
            LogosToken::Try => Token::Try,
            LogosToken::Catch => Token::Catch,
            LogosToken::Finally => Token::Finally,
            LogosToken::Throw => Token::Throw,
            LogosToken::Import => Token::Import,
            LogosToken::Export => Token::Export,
            LogosToken::From => Token::From,
            LogosToken::As => Token::As,
            LogosToken::New => Token::New,
            LogosToken::This => Token::This,
            LogosToken::Super => Token::Super,
            LogosToken::Static => Token::Static,
            LogosToken::Extends => Token::Extends,
            LogosToken::Typeof => Token::Typeof,
            LogosToken::Instanceof => Token::Instanceof,
            LogosToken::Delete => Token::Delete,
            LogosToken::Void => Token::Void,
            LogosToken::In => Token::In,
            LogosToken::Of => Token::Of,
            LogosToken::Yield => Token::Yield,
            LogosToken::Debugger => Token::Debugger,
            LogosToken::True => Token::True,
            LogosToken::False => Token::False,
            LogosToken::Null => Token::Null,
            LogosToken::Identifier(s) => Token::Identifier(self.interner.intern(&s)),
            LogosToken::NumberLiteral(n) => Token::NumberLiteral(n),
            LogosToken::BigIntLiteral(s) => Token::BigIntLiteral(self.interner.intern(&s)),
            LogosToken::StringLiteral(s) => Token::StringLiteral(self.interner.intern(&s)),
            LogosToken::GreaterGreaterGreaterEqual => Token::GreaterGreaterGreaterEqual,
            LogosToken::EqualEqualEqual => Token::EqualEqualEqual,
            LogosToken::BangEqualEqual => Token::BangEqualEqual,
            LogosToken::GreaterGreaterGreater => Token::GreaterGreaterGreater,
            LogosToken::StarStarEqual => Token::StarStarEqual,
            LogosToken::LessLessEqual => Token::LessLessEqual,
            LogosToken::GreaterGreaterEqual => Token::GreaterGreaterEqual,
            LogosToken::AmpAmpEqual => Token::AmpAmpEqual,
            LogosToken::PipePipeEqual => Token::PipePipeEqual,
            LogosToken::QuestionQuestionEqual => Token::QuestionQuestionEqual,
            LogosToken::StarStar => Token::StarStar,
            LogosToken::EqualEqual => Token::EqualEqual,
            LogosToken::BangEqual => Token::BangEqual,
            LogosToken::LessEqual => Token::LessEqual,
            LogosToken::GreaterEqual => Token::GreaterEqual,
            LogosToken::AmpAmp => Token::AmpAmp,
            LogosToken::PipePipe => Token::PipePipe,
            LogosToken::QuestionQuestion => Token::QuestionQuestion,
            LogosToken::PlusPlus => Token::PlusPlus,
            LogosToken::MinusMinus => Token::MinusMinus,
            LogosToken::LessLess => Token::LessLess,
            LogosToken::GreaterGreater => Token::GreaterGreater,
            LogosToken::QuestionDot => Token::QuestionDot,
            LogosToken::Arrow => Token::Arrow,
            LogosToken::PlusEqual => Token::PlusEqual,
            LogosToken::MinusEqual => Token::MinusEqual,
            LogosToken::StarEqual => Token::StarEqual,
            LogosToken::SlashEqual => Token::SlashEqual,
            LogosToken::PercentEqual => Token::PercentEqual,
            LogosToken::AmpEqual => Token::AmpEqual,
            LogosToken::PipeEqual => Token::PipeEqual,
            LogosToken::CaretEqual => Token::CaretEqual,
            LogosToken::Plus => Token::Plus,
            LogosToken::Minus => Token::Minus,
            LogosToken::Star => Token::Star,
            LogosToken::Slash => Token::Slash,
            LogosToken::Percent => Token::Percent,
            LogosToken::Bang => Token::Bang,
            LogosToken::Tilde => Token::Tilde,
            LogosToken::Less => Token::Less,
            LogosToken::Greater => Token::Greater,
            LogosToken::Amp => Token::Amp,
            LogosToken::Pipe => Token::Pipe,
            LogosToken::Caret => Token::Caret,
            LogosToken::Equal => Token::Equal,
            LogosToken::Question => Token::Question,
            LogosToken::DotDotDot => Token::DotDotDot,
            LogosToken::Dot => Token::Dot,
            LogosToken::Colon => Token::Colon,
            LogosToken::LeftParen => Token::LeftParen,
            LogosToken::RightParen => Token::RightParen,
            LogosToken::LeftBrace => Token::LeftBrace,
            LogosToken::RightBrace => Token::RightBrace,
            LogosToken::LeftBracket => Token::LeftBracket,
            LogosToken::RightBracket => Token::RightBracket,
            LogosToken::Semicolon => Token::Semicolon,
            LogosToken::Comma => Token::Comma,
            LogosToken::Whitespace => {
                unreachable!("whitespace is skipped")
            }
            LogosToken::Backtick => unreachable!("backtick handled separately"),
        }
    }

    fn lex_template(&mut self, start: usize) -> Result<(Vec<TemplatePart>, usize), LexError> {
        let mut parts = Vec::new();
        let mut string_part = String::new();
        let bytes = self.source.as_bytes();
        let mut pos = start;

        while pos < bytes.len() {
            match bytes[pos] {
                b'`' => {
                    if !string_part.is_empty() || parts.is_empty() {
                        let sym = self.interner.intern(&string_part);
                        parts.push(TemplatePart::String(sym));
                    }
                    return Ok((parts, pos + 1));
                }
                b'\\' if pos + 1 < bytes.len() => {
                    pos += 1;
                    match bytes[pos] {
                        b'n' => {
                            string_part.push('\n');
                            pos += 1;
                        }
                        b'r' => {
                            string_part.push('\r');
                            pos += 1;
                        }
                        b't' => {
                            string_part.push('\t');
                            pos += 1;
                        }
                        b'\\' => {
                            string_part.push('\\');
                            pos += 1;
                        }
                        b'`' => {
                            string_part.push('`');
                            pos += 1;
                        }
                        b'$' => {
                            string_part.push('$');
                            pos += 1;
                        }
                        b'0' => {
                            string_part.push('\0');
                            pos += 1;
                        }
                        b'u' => {
                            pos += 1;
                            if pos < bytes.len() && bytes[pos] == b'{' {
                                pos += 1;
                                let mut hex = String::new();
                                while pos < bytes.len() && bytes[pos] != b'}' {
                                    hex.push(bytes[pos] as char);
                                    pos += 1;
                                }
                                if pos < bytes.len() {
                                    pos += 1;
                                }
                                if let Some(unicode_char) =
                                    u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32)
                                {
                                    string_part.push(unicode_char);
                                }
                            } else {
                                let mut hex = String::new();
                                for _ in 0..4 {
                                    if pos < bytes.len()
                                        && (bytes[pos] as char).is_ascii_hexdigit()
                                    {
                                        hex.push(bytes[pos] as char);
                                        pos += 1;
                                    } else {
                                        break;
                                    }
                                }
                                if hex.len() == 4 {
                                    if let Some(unicode_char) =
                                        u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32)
                                    {
                                        string_part.push(unicode_char);
                                    }
                                }
                            }
                        }
                        // Unknown escape: the backslash is dropped, as in
                        // ordinary string literals.
                        other if other.is_ascii() => {
                            string_part.push(other as char);
                            pos += 1;
                        }
                        _ => {
                            if let Some(ch) = self.source[pos..].chars().next() {
                                string_part.push(ch);
                                pos += ch.len_utf8();
                            } else {
                                pos += 1;
                            }
                        }
                    }
                }
                b'$' if pos + 1 < bytes.len() && bytes[pos + 1] == b'{' => {
                    let sym = self.interner.intern(&string_part);
                    parts.push(TemplatePart::String(sym));
                    string_part.clear();

                    pos += 2;
                    let expr_start = pos;
                    let mut brace_depth = 1;

                    while pos < bytes.len() && brace_depth > 0 {
                        match bytes[pos] {
                            b'{' => brace_depth += 1,
                            b'}' => {
                                brace_depth -= 1;
                                if brace_depth == 0 {
                                    break;
                                }
                            }
                            _ => {}
                        }
                        pos += 1;
                    }

                    if brace_depth != 0 {
                        let span = Span::new(expr_start - 2, pos, 0, 0);
                        return Err(LexError::UnterminatedTemplate { span });
                    }

                    // Tokenize the interpolated expression with a sub-lexer
                    // that shares our interner.
                    let expr_str = &self.source[expr_start..pos];
                    let current_interner = std::mem::take(&mut self.interner);
                    let expr_lexer = Lexer::with_interner(expr_str, current_interner);
                    match expr_lexer.tokenize() {
                        Ok((tokens, updated_interner)) => {
                            self.interner = updated_interner;
                            let tokens_without_eof: Vec<_> = tokens
                                .into_iter()
                                .filter(|(t, _)| !matches!(t, Token::Eof))
                                .collect();
                            parts.push(TemplatePart::Expression(tokens_without_eof));
                        }
                        Err(_) => {
                            let span = Span::new(expr_start - 2, pos, 0, 0);
                            return Err(LexError::UnterminatedTemplate { span });
                        }
                    }

                    pos += 1;
                }
                other if other.is_ascii() => {
                    string_part.push(other as char);
                    pos += 1;
                }
                _ => match self.source[pos..].chars().next() {
                    Some(ch) => {
                        string_part.push(ch);
                        pos += ch.len_utf8();
                    }
                    None => pos += 1,
                },
            }
        }

        let span = Span::new(start, self.source.len(), 0, 0);
        Err(LexError::UnterminatedTemplate { span })
    }
}
