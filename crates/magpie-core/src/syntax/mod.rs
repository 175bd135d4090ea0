//! Source-level machinery: tokens, lexer, AST and parser.

pub mod ast;
pub mod interner;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::{ExprId, ExprIndex, Expression, Program};
pub use interner::{Interner, Symbol};
pub use lexer::{LexError, Lexer};
pub use parser::{ParseError, Parser};
pub use token::{Span, Token};
