//! Abstract Syntax Tree (AST) for scenescript.
//!
//! This module provides:
//! - AST node definitions: a closed set of statement and expression kinds
//! - The recursive-descent [`Parser`]
//! - [`dump`], an indented rendering of a parsed script
//!
//! All nodes are allocated in a `bumpalo` arena and borrow from it.

pub mod ops;

mod parser;

pub mod expr;
mod expr_parser;

pub mod stmt;
mod stmt_parser;

mod dump;

pub use dump::dump;
pub use expr::*;
pub use ops::*;
pub use parser::Parser;
pub use stmt::*;

/// A parsed script.
///
/// The script borrows from an arena allocator. All AST nodes are allocated
/// in the arena and remain valid for the lifetime of the arena.
#[derive(Debug, Clone, Copy)]
pub struct Script<'ast> {
    statements: &'ast [Stmt<'ast>],
}

impl<'ast> Script<'ast> {
    /// Create a script from parsed statements.
    pub fn new(statements: &'ast [Stmt<'ast>]) -> Self {
        Self { statements }
    }

    /// The top-level statements in source order.
    pub fn statements(&self) -> &'ast [Stmt<'ast>] {
        self.statements
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}
