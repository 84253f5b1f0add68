//! Operator definitions for scenescript expressions.
//!
//! Provides enums for binary and unary operators along with precedence
//! information for the Pratt parser.

use crate::lexer::TokenKind;
use std::fmt;

/// Binary operators, from lowest to highest precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// `or`
    Or,
    /// `and`
    And,
    /// `==`
    Equal,
    /// `<>`
    NotEqual,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
}

impl BinaryOp {
    /// Get the binding power (precedence) for this operator.
    ///
    /// Higher values bind more tightly. Returns (left_bp, right_bp); every
    /// binary operator is left-associative.
    pub fn binding_power(&self) -> (u8, u8) {
        use BinaryOp::*;
        match self {
            Or => (1, 2),
            And => (3, 4),
            Equal | NotEqual => (5, 6),
            Less | LessEqual | Greater | GreaterEqual => (7, 8),
            Add | Sub => (9, 10),
            Mul | Div => (11, 12),
        }
    }

    /// Try to convert a token kind to a binary operator.
    pub fn from_token(token: TokenKind) -> Option<Self> {
        use TokenKind::*;
        Some(match token {
            Or => BinaryOp::Or,
            And => BinaryOp::And,
            EqualEqual => BinaryOp::Equal,
            LessGreater => BinaryOp::NotEqual,
            Less => BinaryOp::Less,
            LessEqual => BinaryOp::LessEqual,
            Greater => BinaryOp::Greater,
            GreaterEqual => BinaryOp::GreaterEqual,
            Plus => BinaryOp::Add,
            Minus => BinaryOp::Sub,
            Star => BinaryOp::Mul,
            Slash => BinaryOp::Div,
            _ => return None,
        })
    }

    /// Source text of the operator.
    pub fn as_str(&self) -> &'static str {
        use BinaryOp::*;
        match self {
            Or => "or",
            And => "and",
            Equal => "==",
            NotEqual => "<>",
            Less => "<",
            LessEqual => "<=",
            Greater => ">",
            GreaterEqual => ">=",
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unary prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// `-`
    Neg,
    /// `not`
    Not,
}

impl UnaryOp {
    /// Binding power of the operand; tighter than any binary operator.
    pub const fn binding_power() -> u8 {
        13
    }

    /// Try to convert a token kind to a unary operator.
    pub fn from_token(token: TokenKind) -> Option<Self> {
        match token {
            TokenKind::Minus => Some(UnaryOp::Neg),
            TokenKind::Not => Some(UnaryOp::Not),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "not",
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Binding power of member access and method calls.
pub const MEMBER_BINDING_POWER: u8 = 15;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precedence_order() {
        let levels = [
            BinaryOp::Or,
            BinaryOp::And,
            BinaryOp::Equal,
            BinaryOp::Less,
            BinaryOp::Add,
            BinaryOp::Mul,
        ];
        for pair in levels.windows(2) {
            assert!(pair[0].binding_power().0 < pair[1].binding_power().0);
        }
        assert!(BinaryOp::Mul.binding_power().1 < UnaryOp::binding_power());
        assert!(UnaryOp::binding_power() < MEMBER_BINDING_POWER);
    }

    #[test]
    fn from_token() {
        assert_eq!(
            BinaryOp::from_token(TokenKind::LessGreater),
            Some(BinaryOp::NotEqual)
        );
        assert_eq!(BinaryOp::from_token(TokenKind::Equal), None);
        assert_eq!(UnaryOp::from_token(TokenKind::Not), Some(UnaryOp::Not));
        assert_eq!(UnaryOp::from_token(TokenKind::Plus), None);
    }

    #[test]
    fn display() {
        assert_eq!(BinaryOp::NotEqual.to_string(), "<>");
        assert_eq!(UnaryOp::Not.to_string(), "not");
    }
}
