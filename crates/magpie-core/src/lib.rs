//! Magpie core library.
//!
//! Everything needed to lint a JavaScript file for uses of newer
//! built-in prototype members:
//! - **Syntax**: lexer, AST and parser (`syntax` module)
//! - **Scope**: binding and reference resolution (`scope` module)
//! - **Typing**: receiver-type classification, from syntactic inference
//!   or an external checker (`typing` module)
//! - **Linter**: rules, runner and configuration (`linter` module)
//!
//! # Example
//!
//! ```rust,ignore
//! use magpie_core::linter::Linter;
//!
//! let linter = Linter::new();
//! let result = linter.lint_source("[1, 2].flat();", "example.js");
//! for d in &result.diagnostics {
//!     println!("[{}] {}", d.code, d.message);
//! }
//! ```

#![warn(rust_2018_idioms)]

pub mod linter;
pub mod scope;
pub mod syntax;
pub mod typing;

pub use linter::{LintConfig, LintDiagnostic, LintResult, Linter, Severity};
pub use scope::ScopeInfo;
pub use syntax::{Interner, ParseError, Parser, Span, Symbol};
pub use typing::{MatchStrength, ReceiverClassifier, TypeProvider, TypeTag};
