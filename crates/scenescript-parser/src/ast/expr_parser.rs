//! Expression parsing using Pratt parsing (precedence climbing).

use bumpalo::collections::Vec as BumpVec;
use scenescript_core::{ParseError, ParseErrorKind};

use super::parser::Parser;
use crate::ast::expr::*;
use crate::ast::{BinaryOp, MEMBER_BINDING_POWER, UnaryOp};
use crate::lexer::{CharSource, TokenKind};

impl<'ast, S: CharSource> Parser<'ast, S> {
    /// Parse an expression with a minimum binding power.
    ///
    /// Only operators binding at least as tightly as `min_bp` are consumed.
    pub fn parse_expr(&mut self, min_bp: u8) -> Result<&'ast Expr<'ast>, ParseError> {
        let mut lhs = self.parse_prefix()?;

        loop {
            if self.check(TokenKind::Dot) {
                if MEMBER_BINDING_POWER < min_bp {
                    break;
                }
                lhs = self.parse_member(lhs)?;
                continue;
            }

            if let Some(op) = BinaryOp::from_token(self.peek().kind) {
                if op == BinaryOp::Sub && self.at_line_start() {
                    break;
                }
                let (l_bp, r_bp) = op.binding_power();
                if l_bp < min_bp {
                    break;
                }

                self.advance();
                let rhs = self.parse_expr(r_bp)?;
                lhs = self.arena.alloc(Expr::Binary(self.arena.alloc(BinaryExpr {
                    left: lhs,
                    op,
                    right: rhs,
                    location: lhs.location(),
                })));
                continue;
            }

            break;
        }

        Ok(lhs)
    }

    /// Parse a prefix expression (the start of an expression).
    fn parse_prefix(&mut self) -> Result<&'ast Expr<'ast>, ParseError> {
        let token = *self.peek();

        let expr = match token.kind {
            TokenKind::Number => {
                self.advance();
                let value = token.lexeme.parse::<f64>().map_err(|_| {
                    ParseError::new(
                        ParseErrorKind::UnexpectedToken,
                        token.location,
                        format!("invalid number '{}'", token.lexeme),
                    )
                })?;
                Expr::Number(NumberLiteral {
                    value,
                    location: token.location,
                })
            }

            TokenKind::String => {
                self.advance();
                Expr::String(StringLiteral {
                    value: token.lexeme,
                    location: token.location,
                })
            }

            TokenKind::True | TokenKind::False => {
                self.advance();
                Expr::Bool(BoolLiteral {
                    value: token.kind == TokenKind::True,
                    location: token.location,
                })
            }

            TokenKind::Identifier => {
                self.advance();
                let ident = Ident::new(token.lexeme, token.location);
                if self.check(TokenKind::LeftParen) && !self.at_line_start() {
                    self.parse_call(ident)?
                } else {
                    Expr::Identifier(ident)
                }
            }

            TokenKind::LeftParen => {
                self.advance();
                self.nesting += 1;
                let inner = self.parse_expr(0)?;
                self.expect(TokenKind::RightParen)?;
                self.nesting -= 1;
                return Ok(inner);
            }

            TokenKind::Minus | TokenKind::Not => {
                self.advance();
                let op = if token.kind == TokenKind::Minus {
                    UnaryOp::Neg
                } else {
                    UnaryOp::Not
                };
                let operand = self.parse_expr(UnaryOp::binding_power())?;
                Expr::Unary(self.arena.alloc(UnaryExpr {
                    op,
                    operand,
                    location: token.location,
                }))
            }

            TokenKind::Error => {
                return Err(ParseError::new(
                    ParseErrorKind::Lexical,
                    token.location,
                    "",
                ));
            }

            TokenKind::Eof => {
                return Err(ParseError::unexpected_eof(token.location, "an expression"));
            }

            kind => {
                return Err(ParseError::expected_expression(
                    token.location,
                    kind.description(),
                ));
            }
        };

        Ok(self.arena.alloc(expr))
    }

    /// Parse `name(args)` after the name has been consumed.
    fn parse_call(&mut self, callee: Ident<'ast>) -> Result<Expr<'ast>, ParseError> {
        let args = self.parse_arguments()?;
        let call = self.arena.alloc(CallExpr {
            callee,
            args,
            location: callee.location,
        });
        Ok(if is_class_name(callee.name) {
            Expr::ConstructorCall(call)
        } else {
            Expr::FunctionCall(call)
        })
    }

    /// Parse `.member` or `.method(args)` following `object`.
    fn parse_member(&mut self, object: &'ast Expr<'ast>) -> Result<&'ast Expr<'ast>, ParseError> {
        self.expect(TokenKind::Dot)?;
        let name = match self.peek().kind {
            TokenKind::Identifier => self.advance(),
            TokenKind::Error => return Err(self.error_at_current("")),
            kind => {
                return Err(ParseError::expected_identifier(
                    self.peek().location,
                    kind.description(),
                ));
            }
        };
        let member = Ident::new(name.lexeme, name.location);
        let location = object.location();

        let expr = if self.check(TokenKind::LeftParen) {
            let args = self.parse_arguments()?;
            Expr::MethodCall(self.arena.alloc(MethodCallExpr {
                object,
                method: member,
                args,
                location,
            }))
        } else {
            Expr::MemberGet(self.arena.alloc(MemberGetExpr {
                object,
                member,
                location,
            }))
        };
        Ok(self.arena.alloc(expr))
    }

    /// Parse a parenthesized, comma separated argument list.
    pub(super) fn parse_arguments(&mut self) -> Result<&'ast [Expr<'ast>], ParseError> {
        self.expect(TokenKind::LeftParen)?;
        let mut args = BumpVec::new_in(self.arena);

        if self.eat(TokenKind::RightParen).is_some() {
            return Ok(args.into_bump_slice());
        }

        self.nesting += 1;
        loop {
            args.push(*self.parse_expr(0)?);
            if self.eat(TokenKind::Comma).is_some() {
                continue;
            }
            if self.eat(TokenKind::RightParen).is_some() {
                break;
            }
            return Err(self.error_at_current("',' or ')'"));
        }
        self.nesting -= 1;

        Ok(args.into_bump_slice())
    }
}

#[cfg(test)]
mod tests {
    use bumpalo::Bump;

    use crate::ast::*;
    use crate::lexer::Cursor;

    fn parse_expr<'ast>(source: &str, arena: &'ast Bump) -> &'ast Expr<'ast> {
        let mut parser = Parser::new(Cursor::new(source), arena);
        let expr = parser.parse_expr(0).unwrap();
        assert!(parser.is_eof(), "unparsed input in {:?}", source);
        expr
    }

    fn binary<'a, 'ast>(expr: &'a Expr<'ast>) -> &'a BinaryExpr<'ast> {
        match expr {
            Expr::Binary(b) => b,
            other => panic!("expected binary expression, got {:?}", other),
        }
    }

    #[test]
    fn literals() {
        let arena = Bump::new();
        assert!(matches!(parse_expr("2.5", &arena), Expr::Number(n) if n.value == 2.5));
        assert!(matches!(parse_expr("true", &arena), Expr::Bool(b) if b.value));
        assert!(matches!(parse_expr("'hi'", &arena), Expr::String(s) if s.value == "hi"));
        assert!(matches!(parse_expr("count", &arena), Expr::Identifier(i) if i.name == "count"));
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let arena = Bump::new();
        let expr = binary(parse_expr("1 + 2 * 3", &arena));
        assert_eq!(expr.op, BinaryOp::Add);
        assert_eq!(binary(expr.right).op, BinaryOp::Mul);
    }

    #[test]
    fn left_associative() {
        let arena = Bump::new();
        let expr = binary(parse_expr("8 - 4 - 2", &arena));
        assert_eq!(expr.op, BinaryOp::Sub);
        assert_eq!(binary(expr.left).op, BinaryOp::Sub);
        assert!(matches!(expr.right, Expr::Number(n) if n.value == 2.0));
    }

    #[test]
    fn logical_precedence() {
        let arena = Bump::new();
        let expr = binary(parse_expr("a or b and c == d < e", &arena));
        assert_eq!(expr.op, BinaryOp::Or);
        let and = binary(expr.right);
        assert_eq!(and.op, BinaryOp::And);
        let eq = binary(and.right);
        assert_eq!(eq.op, BinaryOp::Equal);
        assert_eq!(binary(eq.right).op, BinaryOp::Less);
    }

    #[test]
    fn parentheses_override_precedence() {
        let arena = Bump::new();
        let expr = binary(parse_expr("(1 + 2) * 3", &arena));
        assert_eq!(expr.op, BinaryOp::Mul);
        assert_eq!(binary(expr.left).op, BinaryOp::Add);
    }

    #[test]
    fn unary_operators() {
        let arena = Bump::new();
        match parse_expr("not a == b", &arena) {
            Expr::Binary(b) => assert!(matches!(b.left, Expr::Unary(u) if u.op == UnaryOp::Not)),
            other => panic!("unexpected {:?}", other),
        }
        match parse_expr("-c.red", &arena) {
            Expr::Unary(u) => {
                assert_eq!(u.op, UnaryOp::Neg);
                assert!(matches!(u.operand, Expr::MemberGet(_)));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn calls() {
        let arena = Bump::new();
        match parse_expr("max(1, 2)", &arena) {
            Expr::FunctionCall(call) => {
                assert_eq!(call.callee.name, "max");
                assert_eq!(call.args.len(), 2);
            }
            other => panic!("unexpected {:?}", other),
        }
        match parse_expr("Color()", &arena) {
            Expr::ConstructorCall(call) => {
                assert_eq!(call.callee.name, "Color");
                assert!(call.args.is_empty());
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn member_chains() {
        let arena = Bump::new();
        match parse_expr("a.scale(2).red", &arena) {
            Expr::MemberGet(get) => {
                assert_eq!(get.member.name, "red");
                match get.object {
                    Expr::MethodCall(call) => {
                        assert_eq!(call.method.name, "scale");
                        assert_eq!(call.args.len(), 1);
                        assert!(matches!(call.object, Expr::Identifier(i) if i.name == "a"));
                    }
                    other => panic!("unexpected {:?}", other),
                }
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn missing_close_paren() {
        let arena = Bump::new();
        let mut parser = Parser::new(Cursor::new("f(1, 2"), &arena);
        let error = parser.parse_expr(0).unwrap_err();
        assert_eq!(error.kind, scenescript_core::ParseErrorKind::ExpectedToken);
        assert_eq!(error.message, "expected ',' or ')', found end of input");
    }

    #[test]
    fn missing_operand() {
        let arena = Bump::new();
        let mut parser = Parser::new(Cursor::new("1 +"), &arena);
        let error = parser.parse_expr(0).unwrap_err();
        assert_eq!(error.kind, scenescript_core::ParseErrorKind::UnexpectedEof);
    }
}
