//! Indented tree rendering of a parsed script.

use std::fmt::{self, Write};

use crate::ast::{Expr, Script, Stmt};

/// Render `script` as an indented tree, one node per line.
///
/// ```
/// use bumpalo::Bump;
/// use scenescript_core::Diagnostics;
/// use scenescript_parser::{Parser, ast::dump};
///
/// let arena = Bump::new();
/// let script = Parser::parse("x = -1", &arena, &mut Diagnostics::new());
/// assert_eq!(dump(&script), "Assignment x\n  Unary -\n    Number 1\n");
/// ```
pub fn dump(script: &Script<'_>) -> String {
    let mut out = String::new();
    let mut dumper = Dumper {
        out: &mut out,
        depth: 0,
    };
    // Writing into a String cannot fail.
    let _ = dumper.statements(script.statements());
    out
}

struct Dumper<'w, W> {
    out: &'w mut W,
    depth: usize,
}

impl<W: Write> Dumper<'_, W> {
    fn line(&mut self, args: fmt::Arguments<'_>) -> fmt::Result {
        for _ in 0..self.depth {
            self.out.write_str("  ")?;
        }
        self.out.write_fmt(args)?;
        self.out.write_char('\n')
    }

    fn nested(&mut self, f: impl FnOnce(&mut Self) -> fmt::Result) -> fmt::Result {
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn statements(&mut self, statements: &[Stmt<'_>]) -> fmt::Result {
        for statement in statements {
            self.statement(statement)?;
        }
        Ok(())
    }

    fn statement(&mut self, statement: &Stmt<'_>) -> fmt::Result {
        match statement {
            Stmt::Assignment(s) => {
                self.line(format_args!("Assignment {}", s.target.name))?;
                self.nested(|d| d.expr(s.value))
            }
            Stmt::If(s) => {
                self.line(format_args!("If"))?;
                self.nested(|d| {
                    d.line(format_args!("Condition"))?;
                    d.nested(|d| d.expr(s.condition))?;
                    d.line(format_args!("Then"))?;
                    d.nested(|d| d.statements(s.then_body))?;
                    if let Some(body) = s.else_body {
                        d.line(format_args!("Else"))?;
                        d.nested(|d| d.statements(body))?;
                    }
                    Ok(())
                })
            }
            Stmt::While(s) => {
                self.line(format_args!("While"))?;
                self.nested(|d| {
                    d.line(format_args!("Condition"))?;
                    d.nested(|d| d.expr(s.condition))?;
                    d.line(format_args!("Body"))?;
                    d.nested(|d| d.statements(s.body))
                })
            }
            Stmt::Expression(s) => {
                self.line(format_args!("Expression"))?;
                self.nested(|d| d.expr(s.expr))
            }
            Stmt::Print(s) => {
                self.line(format_args!("Print {}", s.function_name()))?;
                self.nested(|d| d.exprs(s.args))
            }
        }
    }

    fn exprs(&mut self, exprs: &[Expr<'_>]) -> fmt::Result {
        for expr in exprs {
            self.expr(expr)?;
        }
        Ok(())
    }

    fn expr(&mut self, expr: &Expr<'_>) -> fmt::Result {
        match expr {
            Expr::Number(e) => self.line(format_args!("Number {}", e.value)),
            Expr::Bool(e) => self.line(format_args!("Bool {}", e.value)),
            Expr::String(e) => self.line(format_args!("String {:?}", e.value)),
            Expr::Identifier(e) => self.line(format_args!("Identifier {}", e.name)),
            Expr::Binary(e) => {
                self.line(format_args!("Binary {}", e.op))?;
                self.nested(|d| {
                    d.expr(e.left)?;
                    d.expr(e.right)
                })
            }
            Expr::Unary(e) => {
                self.line(format_args!("Unary {}", e.op))?;
                self.nested(|d| d.expr(e.operand))
            }
            Expr::MemberGet(e) => {
                self.line(format_args!("MemberGet {}", e.member.name))?;
                self.nested(|d| d.expr(e.object))
            }
            Expr::MemberSet(e) => {
                self.line(format_args!("MemberSet {}", e.member.name))?;
                self.nested(|d| {
                    d.expr(e.object)?;
                    d.expr(e.value)
                })
            }
            Expr::MethodCall(e) => {
                self.line(format_args!("MethodCall {}", e.method.name))?;
                self.nested(|d| {
                    d.expr(e.object)?;
                    d.exprs(e.args)
                })
            }
            Expr::FunctionCall(e) => {
                self.line(format_args!("FunctionCall {}", e.callee.name))?;
                self.nested(|d| d.exprs(e.args))
            }
            Expr::ConstructorCall(e) => {
                self.line(format_args!("ConstructorCall {}", e.callee.name))?;
                self.nested(|d| d.exprs(e.args))
            }
        }
    }
}
