//! Lexical analysis for scenescript.

mod cursor;
mod lexer;
mod token;

pub use cursor::{CharSource, Cursor};
pub use lexer::Lexer;
pub use token::{Token, TokenKind, lookup_keyword};
