//! Statement parsing.
//!
//! Statements are separated by whitespace; `;` is an optional separator.
//! `if` and `while` bodies run until the matching `end`.

use bumpalo::collections::Vec as BumpVec;
use scenescript_core::{ParseError, ParseErrorKind};

use super::parser::Parser;
use crate::ast::expr::{Expr, MemberSetExpr};
use crate::ast::stmt::*;
use crate::lexer::{CharSource, Token, TokenKind};

impl<'ast, S: CharSource> Parser<'ast, S> {
    /// Parse a single statement.
    pub fn parse_statement(&mut self) -> Result<Stmt<'ast>, ParseError> {
        match self.peek().kind {
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::Print | TokenKind::Println => self.parse_print(),
            TokenKind::End | TokenKind::Else => {
                let token = *self.peek();
                Err(ParseError::unexpected_token(
                    token.location,
                    token.kind.description(),
                ))
            }
            _ => self.parse_expression_statement(),
        }
    }

    /// Parse an assignment, a member assignment or a bare expression.
    fn parse_expression_statement(&mut self) -> Result<Stmt<'ast>, ParseError> {
        let expr = self.parse_expr(0)?;
        let location = expr.location();

        if self.eat(TokenKind::Equal).is_none() {
            return Ok(Stmt::Expression(ExprStmt { expr, location }));
        }

        let value = self.parse_expr(0)?;
        match expr {
            Expr::Identifier(target) => Ok(Stmt::Assignment(self.arena.alloc(AssignmentStmt {
                target: *target,
                value,
                location,
            }))),
            Expr::MemberGet(get) => {
                let set = self.arena.alloc(Expr::MemberSet(self.arena.alloc(MemberSetExpr {
                    object: get.object,
                    member: get.member,
                    value,
                    location,
                })));
                Ok(Stmt::Expression(ExprStmt {
                    expr: set,
                    location,
                }))
            }
            _ => Err(ParseError::new(
                ParseErrorKind::InvalidAssignmentTarget,
                location,
                "only variables and members can be assigned",
            )),
        }
    }

    /// Parse `if (cond) ... [else ...] end`.
    fn parse_if(&mut self) -> Result<Stmt<'ast>, ParseError> {
        let keyword = self.advance();
        self.block_depth += 1;

        let condition = self.parse_condition()?;
        let then_body = self.parse_block(&keyword, &[TokenKind::Else, TokenKind::End])?;
        let else_body = match self.eat(TokenKind::Else) {
            Some(_) => Some(self.parse_block(&keyword, &[TokenKind::End])?),
            None => None,
        };
        self.expect(TokenKind::End)?;
        self.block_depth -= 1;

        if then_body.is_empty() && else_body.is_none_or(|body| body.is_empty()) {
            self.warn("W001", "empty 'if' body", keyword.location);
        }

        Ok(Stmt::If(self.arena.alloc(IfStmt {
            condition,
            then_body,
            else_body,
            location: keyword.location,
        })))
    }

    /// Parse `while (cond) ... end`.
    fn parse_while(&mut self) -> Result<Stmt<'ast>, ParseError> {
        let keyword = self.advance();
        self.block_depth += 1;

        let condition = self.parse_condition()?;
        let body = self.parse_block(&keyword, &[TokenKind::End])?;
        self.expect(TokenKind::End)?;
        self.block_depth -= 1;

        if body.is_empty() {
            self.warn("W001", "empty 'while' body", keyword.location);
        }

        Ok(Stmt::While(self.arena.alloc(WhileStmt {
            condition,
            body,
            location: keyword.location,
        })))
    }

    /// Parse `print(fmt, args...)` or `println(fmt, args...)`.
    fn parse_print(&mut self) -> Result<Stmt<'ast>, ParseError> {
        let keyword = self.advance();
        let args = self.parse_arguments()?;
        Ok(Stmt::Print(self.arena.alloc(PrintStmt {
            newline: keyword.kind == TokenKind::Println,
            args,
            location: keyword.location,
        })))
    }

    /// Parse a parenthesized condition.
    fn parse_condition(&mut self) -> Result<&'ast Expr<'ast>, ParseError> {
        self.expect(TokenKind::LeftParen)?;
        let condition = self.parse_expr(0)?;
        self.expect(TokenKind::RightParen)?;
        Ok(condition)
    }

    /// Parse statements until one of `terminators` is the current token.
    ///
    /// The terminator is left unconsumed.
    fn parse_block(
        &mut self,
        opener: &Token<'ast>,
        terminators: &[TokenKind],
    ) -> Result<&'ast [Stmt<'ast>], ParseError> {
        let mut statements = BumpVec::new_in(self.arena);
        let mut after_statement = false;

        loop {
            let kind = self.peek().kind;
            if terminators.contains(&kind) {
                break;
            }
            match kind {
                TokenKind::Eof => {
                    return Err(ParseError::new(
                        ParseErrorKind::UnterminatedBlock,
                        self.peek().location,
                        format!(
                            "expected 'end' to close '{}' opened at {}",
                            opener.lexeme, opener.location
                        ),
                    ));
                }
                TokenKind::Semicolon => self.separator(&mut after_statement),
                _ => {
                    statements.push(self.parse_statement()?);
                    after_statement = true;
                }
            }
        }

        Ok(statements.into_bump_slice())
    }
}

#[cfg(test)]
mod tests {
    use bumpalo::Bump;
    use scenescript_core::{DiagnosticLevel, Diagnostics};

    use crate::ast::*;

    fn parse<'ast>(source: &str, arena: &'ast Bump) -> (Script<'ast>, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let script = Parser::parse(source, arena, &mut diagnostics);
        (script, diagnostics)
    }

    fn codes(diagnostics: &Diagnostics) -> Vec<String> {
        diagnostics.iter().map(|m| m.code.clone()).collect()
    }

    #[test]
    fn assignment_and_expression() {
        let arena = Bump::new();
        let (script, diagnostics) = parse("x = 1\nx", &arena);
        assert!(diagnostics.is_empty());
        let statements = script.statements();
        assert_eq!(statements.len(), 2);
        assert!(matches!(statements[0], Stmt::Assignment(a) if a.target.name == "x"));
        assert!(matches!(statements[1], Stmt::Expression(e) if matches!(e.expr, Expr::Identifier(_))));
    }

    #[test]
    fn member_assignment() {
        let arena = Bump::new();
        let (script, diagnostics) = parse("c.red = 0.5", &arena);
        assert!(diagnostics.is_empty());
        match script.statements()[0] {
            Stmt::Expression(ExprStmt {
                expr: Expr::MemberSet(set),
                ..
            }) => {
                assert_eq!(set.member.name, "red");
                assert!(matches!(set.value, Expr::Number(n) if n.value == 0.5));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn line_start_minus_or_paren_begins_statement() {
        let arena = Bump::new();
        let (script, diagnostics) = parse("c = Color(1, 2, 3)\n-c.green\nx = c\n(1 + 2)", &arena);
        assert!(diagnostics.is_empty(), "{}", diagnostics);
        let statements = script.statements();
        assert_eq!(statements.len(), 4);
        assert!(matches!(statements[1], Stmt::Expression(e) if matches!(e.expr, Expr::Unary(_))));
        assert!(matches!(statements[2], Stmt::Assignment(a) if matches!(a.value, Expr::Identifier(_))));
        assert!(matches!(statements[3], Stmt::Expression(e) if matches!(e.expr, Expr::Binary(_))));
    }

    #[test]
    fn line_breaks_inside_parentheses_continue() {
        let arena = Bump::new();
        let (script, diagnostics) = parse("x = max(1\n- 2, (3\n- 4))\ny = a +\nb", &arena);
        assert!(diagnostics.is_empty(), "{}", diagnostics);
        let statements = script.statements();
        assert_eq!(statements.len(), 2);
        match statements[0] {
            Stmt::Assignment(a) => match a.value {
                Expr::FunctionCall(call) => {
                    assert_eq!(call.args.len(), 2);
                    assert!(call.args.iter().all(|arg| matches!(arg, Expr::Binary(_))));
                }
                other => panic!("unexpected {:?}", other),
            },
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn invalid_assignment_target() {
        let arena = Bump::new();
        let (script, diagnostics) = parse("1 + 2 = 3\ny = 1", &arena);
        assert_eq!(codes(&diagnostics), vec!["P006"]);
        assert_eq!(script.statements().len(), 1);
    }

    #[test]
    fn if_else() {
        let arena = Bump::new();
        let (script, diagnostics) = parse(
            "if (n == 42) println('yes') else println('no'); x = 1 end",
            &arena,
        );
        assert!(diagnostics.is_empty(), "{}", diagnostics);
        match script.statements()[0] {
            Stmt::If(stmt) => {
                assert_eq!(stmt.then_body.len(), 1);
                assert_eq!(stmt.else_body.map(|b| b.len()), Some(2));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn while_loop_with_separators() {
        let arena = Bump::new();
        let (script, diagnostics) = parse(
            "n = 90; a=1; b=1; count=2; res=1; while(count<n) res=a+b; a=b; b=res; count=count+1 end; res",
            &arena,
        );
        assert!(diagnostics.is_empty(), "{}", diagnostics);
        assert_eq!(script.statements().len(), 7);
        match script.statements()[5] {
            Stmt::While(stmt) => assert_eq!(stmt.body.len(), 4),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn print_statements() {
        let arena = Bump::new();
        let (script, _) = parse("print('{} {}', 1, 2) println()", &arena);
        match (script.statements()[0], script.statements()[1]) {
            (Stmt::Print(first), Stmt::Print(second)) => {
                assert!(!first.newline);
                assert_eq!(first.args.len(), 3);
                assert!(second.newline);
                assert!(second.args.is_empty());
                assert_eq!(second.function_name(), "println");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn unbalanced_parenthesis() {
        let arena = Bump::new();
        let (script, diagnostics) = parse("print('z = {}', z", &arena);
        assert!(diagnostics.has_errors());
        assert!(script.is_empty());
        assert_eq!(
            diagnostics.render(),
            "ERROR [P001]: expected ',' or ')', found end of input [1:18]\n"
        );
    }

    #[test]
    fn missing_end() {
        let arena = Bump::new();
        let (script, diagnostics) = parse("while (x < 3)\n  x = x + 1\n", &arena);
        assert!(script.is_empty());
        assert_eq!(codes(&diagnostics), vec!["P007"]);
        let message = diagnostics.errors().next().unwrap();
        assert_eq!(
            message.text,
            "expected 'end' to close 'while' opened at 1:1"
        );
    }

    #[test]
    fn recovery_continues_after_broken_block() {
        let arena = Bump::new();
        let (script, diagnostics) = parse(
            "if (x ==) println('a') end\ny = 2\nwhile (y) y = ) end\nz = 3",
            &arena,
        );
        assert_eq!(diagnostics.error_count(), 2);
        let names: Vec<_> = script
            .statements()
            .iter()
            .filter_map(|s| match s {
                Stmt::Assignment(a) => Some(a.target.name),
                _ => None,
            })
            .collect();
        assert_eq!(names, vec!["y", "z"]);
    }

    #[test]
    fn stray_end_is_reported() {
        let arena = Bump::new();
        let (script, diagnostics) = parse("end\nx = 1", &arena);
        assert_eq!(codes(&diagnostics), vec!["P002"]);
        assert_eq!(script.statements().len(), 1);
    }

    #[test]
    fn lexer_errors_are_reported_once() {
        let arena = Bump::new();
        let (_, diagnostics) = parse("x = $\ny = 2", &arena);
        assert_eq!(codes(&diagnostics), vec!["L001"]);
    }

    #[test]
    fn warnings() {
        let arena = Bump::new();
        let (script, diagnostics) = parse("; x = 1;; while (x < 1) end", &arena);
        assert!(!diagnostics.has_errors());
        assert_eq!(codes(&diagnostics), vec!["W002", "W002", "W001"]);
        assert!(diagnostics.iter().all(|m| m.level == DiagnosticLevel::Warning));
        assert_eq!(script.statements().len(), 2);
    }

    #[test]
    fn empty_if_with_else_body_is_not_warned() {
        let arena = Bump::new();
        let (_, diagnostics) = parse("if (true) else x = 1 end", &arena);
        assert!(diagnostics.is_empty());
    }
}
