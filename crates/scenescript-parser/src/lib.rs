//! scenescript parser crate.
//!
//! This crate provides the lexer and parser for scenescript source code.
//! It includes:
//! - Lexical analysis over any line/column tracking [`CharSource`]
//! - Abstract Syntax Tree (AST) definitions allocated in a `bumpalo` arena
//! - A recursive-descent parser that reports problems as diagnostics
//!
//! # Example
//!
//! ```
//! use bumpalo::Bump;
//! use scenescript_core::Diagnostics;
//! use scenescript_parser::Parser;
//!
//! let arena = Bump::new();
//! let mut diagnostics = Diagnostics::new();
//! let source = r#"
//!     count = 0
//!     while (count < 3)
//!         println('count = {}', count)
//!         count = count + 1
//!     end
//! "#;
//!
//! let script = Parser::parse(source, &arena, &mut diagnostics);
//! assert!(!diagnostics.has_errors());
//! assert_eq!(script.statements().len(), 2);
//! ```

pub mod ast;
pub mod lexer;

pub use ast::{Parser, Script};
pub use lexer::{CharSource, Cursor, Lexer, Token, TokenKind};
