//! Statement AST nodes for scenescript.

use crate::ast::Ident;
use crate::ast::expr::Expr;
use scenescript_core::Location;

/// A statement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stmt<'ast> {
    /// `name = expr`
    Assignment(&'ast AssignmentStmt<'ast>),
    /// `if (cond) ... [else ...] end`
    If(&'ast IfStmt<'ast>),
    /// `while (cond) ... end`
    While(&'ast WhileStmt<'ast>),
    /// A bare expression
    Expression(ExprStmt<'ast>),
    /// `print(...)` or `println(...)`
    Print(&'ast PrintStmt<'ast>),
}

impl<'ast> Stmt<'ast> {
    /// Get the location of this statement.
    pub fn location(&self) -> Location {
        match self {
            Self::Assignment(s) => s.location,
            Self::If(s) => s.location,
            Self::While(s) => s.location,
            Self::Expression(s) => s.location,
            Self::Print(s) => s.location,
        }
    }
}

/// Assignment to a variable; the first assignment declares it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssignmentStmt<'ast> {
    pub target: Ident<'ast>,
    pub value: &'ast Expr<'ast>,
    pub location: Location,
}

/// A conditional.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IfStmt<'ast> {
    pub condition: &'ast Expr<'ast>,
    pub then_body: &'ast [Stmt<'ast>],
    /// `None` when there is no `else` branch.
    pub else_body: Option<&'ast [Stmt<'ast>]>,
    pub location: Location,
}

/// A loop that tests its condition before each iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WhileStmt<'ast> {
    pub condition: &'ast Expr<'ast>,
    pub body: &'ast [Stmt<'ast>],
    pub location: Location,
}

/// An expression evaluated as a statement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExprStmt<'ast> {
    pub expr: &'ast Expr<'ast>,
    pub location: Location,
}

/// A call of the built-in output functions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrintStmt<'ast> {
    /// `true` for `println`.
    pub newline: bool,
    /// Format string followed by its arguments.
    pub args: &'ast [Expr<'ast>],
    pub location: Location,
}

impl PrintStmt<'_> {
    /// Name of the registry function implementing this statement.
    pub fn function_name(&self) -> &'static str {
        if self.newline { "println" } else { "print" }
    }
}
