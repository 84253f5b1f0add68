//! Expression AST nodes for scenescript.
//!
//! # Expression Precedence
//!
//! From lowest to highest:
//! 1. `or`
//! 2. `and`
//! 3. Equality (`==`, `<>`)
//! 4. Relational (`<`, `<=`, `>`, `>=`)
//! 5. Additive (`+`, `-`)
//! 6. Multiplicative (`*`, `/`)
//! 7. Prefix unary (`-`, `not`)
//! 8. Member access and method calls (`.`)

use crate::ast::{BinaryOp, UnaryOp};
use scenescript_core::Location;

/// An identifier with its location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ident<'ast> {
    pub name: &'ast str,
    pub location: Location,
}

impl<'ast> Ident<'ast> {
    #[inline]
    pub fn new(name: &'ast str, location: Location) -> Self {
        Self { name, location }
    }
}

/// An expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Expr<'ast> {
    /// Number literal
    Number(NumberLiteral),
    /// `true` or `false`
    Bool(BoolLiteral),
    /// String literal
    String(StringLiteral<'ast>),
    /// Variable reference
    Identifier(Ident<'ast>),
    /// Binary operation
    Binary(&'ast BinaryExpr<'ast>),
    /// Unary prefix operation
    Unary(&'ast UnaryExpr<'ast>),
    /// `object.member`
    MemberGet(&'ast MemberGetExpr<'ast>),
    /// `object.member = value`
    MemberSet(&'ast MemberSetExpr<'ast>),
    /// `object.method(args)`
    MethodCall(&'ast MethodCallExpr<'ast>),
    /// `function(args)`
    FunctionCall(&'ast CallExpr<'ast>),
    /// `Class(args)`
    ConstructorCall(&'ast CallExpr<'ast>),
}

impl<'ast> Expr<'ast> {
    /// Get the location of this expression.
    pub fn location(&self) -> Location {
        match self {
            Self::Number(e) => e.location,
            Self::Bool(e) => e.location,
            Self::String(e) => e.location,
            Self::Identifier(e) => e.location,
            Self::Binary(e) => e.location,
            Self::Unary(e) => e.location,
            Self::MemberGet(e) => e.location,
            Self::MemberSet(e) => e.location,
            Self::MethodCall(e) => e.location,
            Self::FunctionCall(e) => e.location,
            Self::ConstructorCall(e) => e.location,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumberLiteral {
    pub value: f64,
    pub location: Location,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoolLiteral {
    pub value: bool,
    pub location: Location,
}

/// A string literal with escapes already decoded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StringLiteral<'ast> {
    pub value: &'ast str,
    pub location: Location,
}

/// A binary operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinaryExpr<'ast> {
    /// Left operand
    pub left: &'ast Expr<'ast>,
    /// Operator
    pub op: BinaryOp,
    /// Right operand
    pub right: &'ast Expr<'ast>,
    /// Location of the left operand
    pub location: Location,
}

/// A unary prefix operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnaryExpr<'ast> {
    pub op: UnaryOp,
    pub operand: &'ast Expr<'ast>,
    /// Location of the operator
    pub location: Location,
}

/// Reading a member through its accessor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemberGetExpr<'ast> {
    pub object: &'ast Expr<'ast>,
    pub member: Ident<'ast>,
    pub location: Location,
}

/// Writing a member through its setter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemberSetExpr<'ast> {
    pub object: &'ast Expr<'ast>,
    pub member: Ident<'ast>,
    pub value: &'ast Expr<'ast>,
    pub location: Location,
}

/// A method call on a receiver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MethodCallExpr<'ast> {
    pub object: &'ast Expr<'ast>,
    pub method: Ident<'ast>,
    pub args: &'ast [Expr<'ast>],
    pub location: Location,
}

/// A call of a free function or a constructor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CallExpr<'ast> {
    pub callee: Ident<'ast>,
    pub args: &'ast [Expr<'ast>],
    pub location: Location,
}

/// Returns `true` if `name` is spelled like a class name.
///
/// Calls of such names are constructor calls.
pub fn is_class_name(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_uppercase())
}
