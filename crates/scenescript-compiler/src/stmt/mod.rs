//! Statement lowering.
//!
//! Statements leave the operand stack as they found it. The one exception
//! is the script's final statement when it is a bare expression: its value
//! stays on the stack and becomes the result of the run.

mod if_stmt;
mod while_stmt;

use scenescript_core::CompilationError;
use scenescript_parser::ast::{AssignmentStmt, ExprStmt, PrintStmt, Stmt};

use crate::bytecode::Instruction;
use crate::compiler::{Result, ScriptCompiler};
use crate::expr::{compile_args, compile_expr};

/// Compile a statement. `is_result` is set for the last top-level statement.
pub(crate) fn compile_stmt(
    compiler: &mut ScriptCompiler<'_>,
    stmt: &Stmt<'_>,
    is_result: bool,
) -> Result<()> {
    compiler.emitter().set_line(stmt.location().line);
    match stmt {
        Stmt::Assignment(assignment) => compile_assignment(compiler, assignment),
        Stmt::If(if_stmt) => if_stmt::compile_if(compiler, if_stmt),
        Stmt::While(while_stmt) => while_stmt::compile_while(compiler, while_stmt),
        Stmt::Expression(expr_stmt) => compile_expression(compiler, expr_stmt, is_result),
        Stmt::Print(print) => compile_print(compiler, print),
    }
}

/// Compile a nested statement block.
pub(crate) fn compile_block(compiler: &mut ScriptCompiler<'_>, body: &[Stmt<'_>]) -> Result<()> {
    for stmt in body {
        compile_stmt(compiler, stmt, false)?;
    }
    Ok(())
}

/// The value is compiled before the target is declared, so `x = x + 1`
/// reads the previous `x`.
fn compile_assignment(compiler: &mut ScriptCompiler<'_>, assignment: &AssignmentStmt<'_>) -> Result<()> {
    compile_expr(compiler, assignment.value)?;
    let slot = compiler.symbols().declare(assignment.target.name);
    let emitter = compiler.emitter();
    emitter.set_line(assignment.location.line);
    emitter.emit(Instruction::Store(slot));
    Ok(())
}

fn compile_expression(compiler: &mut ScriptCompiler<'_>, stmt: &ExprStmt<'_>, is_result: bool) -> Result<()> {
    compile_expr(compiler, stmt.expr)?;
    if !is_result {
        compiler.emitter().emit(Instruction::Pop);
    }
    Ok(())
}

/// `print`/`println` call the registered function of the same name and
/// discard its result.
fn compile_print(compiler: &mut ScriptCompiler<'_>, print: &PrintStmt<'_>) -> Result<()> {
    let name = print.function_name();
    let argc = print.args.len();
    let Some(handle) = compiler.resolve_function(name, argc, print.location)? else {
        return Err(CompilationError::UnknownFunction {
            name: name.to_string(),
            arity: argc,
            location: print.location,
        });
    };

    compile_args(compiler, print.args)?;
    let emitter = compiler.emitter();
    emitter.set_line(print.location.line);
    emitter.emit(Instruction::Call { handle, argc });
    emitter.emit(Instruction::Pop);
    Ok(())
}
