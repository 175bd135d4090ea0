//! Token definitions for the ECMAScript subset Magpie understands.
//!
//! This module defines all tokens that can appear in linted source code,
//! including keywords, operators, literals, and special tokens.

use crate::syntax::interner::Symbol;
use std::fmt;

/// A token in an ECMAScript source file.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Declarations
    Var,
    Let,
    Const,
    Function,
    Class,

    // Control flow
    If,
    Else,
    Switch,
    Case,
    Default,
    For,
    While,
    Do,
    Break,
    Continue,
    Return,

    // Async/Error handling
    Async,
    Await,
    Try,
    Catch,
    Finally,
    Throw,

    // Modules
    Import,
    Export,
    From,
    As,

    // Object model
    New,
    This,
    Super,
    Static,
    Extends,

    // Operator keywords
    Typeof,
    Instanceof,
    Delete,
    Void,
    In,
    Of,

    // Misc reserved
    Yield,
    Debugger,

    // Literals
    NumberLiteral(f64),
    BigIntLiteral(Symbol),
    StringLiteral(Symbol),
    TemplateLiteral(Vec<TemplatePart>),
    RegExpLiteral { pattern: Symbol, flags: Symbol },
    True,
    False,
    Null,

    // Identifiers
    Identifier(Symbol),

    // Arithmetic
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    StarStar,

    // Unary
    PlusPlus,
    MinusMinus,
    Bang,
    Tilde,

    // Comparison
    EqualEqual,
    BangEqual,
    EqualEqualEqual,
    BangEqualEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,

    // Logical
    AmpAmp,
    PipePipe,
    QuestionQuestion,

    // Bitwise
    Amp,
    Pipe,
    Caret,
    LessLess,
    GreaterGreater,
    GreaterGreaterGreater,

    // Assignment
    Equal,
    PlusEqual,
    MinusEqual,
    StarEqual,
    SlashEqual,
    PercentEqual,
    StarStarEqual,
    AmpEqual,
    PipeEqual,
    CaretEqual,
    LessLessEqual,
    GreaterGreaterEqual,
    GreaterGreaterGreaterEqual,
    AmpAmpEqual,
    PipePipeEqual,
    QuestionQuestionEqual,

    // Other
    Question,
    QuestionDot,
    DotDotDot,
    Dot,
    Colon,
    Arrow,

    // Delimiters
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    Semicolon,
    Comma,

    // Special
    Eof,
}

/// A part of a template literal.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplatePart {
    String(Symbol),
    Expression(Vec<(Token, Span)>),
}

/// Source location information for a token or AST node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: u32,
    pub column: u32,
}

impl Span {
    pub fn new(start: usize, end: usize, line: u32, column: u32) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }

    pub fn merge(&self, other: &Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
            line: self.line.min(other.line),
            column: self.column.min(other.column),
        }
    }
}

impl Token {
    /// The source text of a keyword token.
    ///
    /// ECMAScript allows every reserved word as a property name
    /// (`promise.finally`, `collection.delete`), so the parser needs to
    /// recover the identifier text behind keyword tokens.
    pub fn keyword_text(&self) -> Option<&'static str> {
        let text = match self {
            Token::Var => "var",
            Token::Let => "let",
            Token::Const => "const",
            Token::Function => "function",
            Token::Class => "class",
            Token::If => "if",
            Token::Else => "else",
            Token::Switch => "switch",
            Token::Case => "case",
            Token::Default => "default",
            Token::For => "for",
            Token::While => "while",
            Token::Do => "do",
            Token::Break => "break",
            Token::Continue => "continue",
            Token::Return => "return",
            Token::Async => "async",
            Token::Await => "await",
            Token::Try => "try",
            Token::Catch => "catch",
            Token::Finally => "finally",
            Token::Throw => "throw",
            Token::Import => "import",
            Token::Export => "export",
            Token::From => "from",
            Token::As => "as",
            Token::New => "new",
            Token::This => "this",
            Token::Super => "super",
            Token::Static => "static",
            Token::Extends => "extends",
            Token::Typeof => "typeof",
            Token::Instanceof => "instanceof",
            Token::Delete => "delete",
            Token::Void => "void",
            Token::In => "in",
            Token::Of => "of",
            Token::Yield => "yield",
            Token::Debugger => "debugger",
            Token::True => "true",
            Token::False => "false",
            Token::Null => "null",
            _ => return None,
        };
        Some(text)
    }

    /// Returns true if this token may appear as the right-hand side of a
    /// soft keyword position (`of`, `from`, `as`, `static`, `async`), i.e.
    /// the contextual keywords ECMAScript still allows as binding names.
    pub fn is_soft_keyword(&self) -> bool {
        matches!(
            self,
            Token::Of | Token::From | Token::As | Token::Static | Token::Async
        )
    }

    /// Returns true if an expression can start with this token.
    pub fn starts_expression(&self) -> bool {
        matches!(
            self,
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
                | Token::New
                | Token::Function
                | Token::Class
                | Token::Async
                | Token::Await
                | Token::Yield
                | Token::Typeof
                | Token::Delete
                | Token::Void
                | Token::Plus
                | Token::Minus
                | Token::Bang
                | Token::Tilde
                | Token::PlusPlus
                | Token::MinusMinus
                | Token::LeftParen
                | Token::LeftBrace
                | Token::LeftBracket
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Var => write!(f, "var"),
            Token::Let => write!(f, "let"),
            Token::Const => write!(f, "const"),
            Token::Function => write!(f, "function"),
            Token::Class => write!(f, "class"),
            Token::If => write!(f, "if"),
            Token::Else => write!(f, "else"),
            Token::Switch => write!(f, "switch"),
            Token::Case => write!(f, "case"),
            Token::Default => write!(f, "default"),
            Token::For => write!(f, "for"),
            Token::While => write!(f, "while"),
            Token::Do => write!(f, "do"),
            Token::Break => write!(f, "break"),
            Token::Continue => write!(f, "continue"),
            Token::Return => write!(f, "return"),
            Token::Async => write!(f, "async"),
            Token::Await => write!(f, "await"),
            Token::Try => write!(f, "try"),
            Token::Catch => write!(f, "catch"),
            Token::Finally => write!(f, "finally"),
            Token::Throw => write!(f, "throw"),
            Token::Import => write!(f, "import"),
            Token::Export => write!(f, "export"),
            Token::From => write!(f, "from"),
            Token::As => write!(f, "as"),
            Token::New => write!(f, "new"),
            Token::This => write!(f, "this"),
            Token::Super => write!(f, "super"),
            Token::Static => write!(f, "static"),
            Token::Extends => write!(f, "extends"),
            Token::Typeof => write!(f, "typeof"),
            Token::Instanceof => write!(f, "instanceof"),
            Token::Delete => write!(f, "delete"),
            Token::Void => write!(f, "void"),
            Token::In => write!(f, "in"),
            Token::Of => write!(f, "of"),
            Token::Yield => write!(f, "yield"),
            Token::Debugger => write!(f, "debugger"),
            Token::NumberLiteral(n) => write!(f, "{}", n),
            Token::BigIntLiteral(_) => write!(f, "<bigint>"),
            Token::StringLiteral(_) => write!(f, "\"<string>\""),
            Token::TemplateLiteral(_) => write!(f, "`...`"),
            Token::RegExpLiteral { .. } => write!(f, "/<regexp>/"),
            Token::True => write!(f, "true"),
            Token::False => write!(f, "false"),
            Token::Null => write!(f, "null"),
            Token::Identifier(_) => write!(f, "<identifier>"),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::Percent => write!(f, "%"),
            Token::StarStar => write!(f, "**"),
            Token::PlusPlus => write!(f, "++"),
            Token::MinusMinus => write!(f, "--"),
            Token::Bang => write!(f, "!"),
            Token::Tilde => write!(f, "~"),
            Token::EqualEqual => write!(f, "=="),
            Token::BangEqual => write!(f, "!="),
            Token::EqualEqualEqual => write!(f, "==="),
            Token::BangEqualEqual => write!(f, "!=="),
            Token::Less => write!(f, "<"),
            Token::LessEqual => write!(f, "<="),
            Token::Greater => write!(f, ">"),
            Token::GreaterEqual => write!(f, ">="),
            Token::AmpAmp => write!(f, "&&"),
            Token::PipePipe => write!(f, "||"),
            Token::QuestionQuestion => write!(f, "??"),
            Token::Amp => write!(f, "&"),
            Token::Pipe => write!(f, "|"),
            Token::Caret => write!(f, "^"),
            Token::LessLess => write!(f, "<<"),
            Token::GreaterGreater => write!(f, ">>"),
            Token::GreaterGreaterGreater => write!(f, ">>>"),
            Token::Equal => write!(f, "="),
            Token::PlusEqual => write!(f, "+="),
            Token::MinusEqual => write!(f, "-="),
            Token::StarEqual => write!(f, "*="),
            Token::SlashEqual => write!(f, "/="),
            Token::PercentEqual => write!(f, "%="),
            Token::StarStarEqual => write!(f, "**="),
            Token::AmpEqual => write!(f, "&="),
            Token::PipeEqual => write!(f, "|="),
            Token::CaretEqual => write!(f, "^="),
            Token::LessLessEqual => write!(f, "<<="),
            Token::GreaterGreaterEqual => write!(f, ">>="),
            Token::GreaterGreaterGreaterEqual => write!(f, ">>>="),
            Token::AmpAmpEqual => write!(f, "&&="),
            Token::PipePipeEqual => write!(f, "||="),
            Token::QuestionQuestionEqual => write!(f, "??="),
            Token::Question => write!(f, "?"),
            Token::QuestionDot => write!(f, "?."),
            Token::DotDotDot => write!(f, "..."),
            Token::Dot => write!(f, "."),
            Token::Colon => write!(f, ":"),
            Token::Arrow => write!(f, "=>"),
            Token::LeftParen => write!(f, "("),
            Token::RightParen => write!(f, ")"),
            Token::LeftBrace => write!(f, "{{"),
            Token::RightBrace => write!(f, "}}"),
            Token::LeftBracket => write!(f, "["),
            Token::RightBracket => write!(f, "]"),
            Token::Semicolon => write!(f, ";"),
            Token::Comma => write!(f, ","),
            Token::Eof => write!(f, "EOF"),
        }
    }
}
