//! While loop compilation.

use scenescript_parser::ast::WhileStmt;

use super::compile_block;
use crate::compiler::{Result, ScriptCompiler};
use crate::expr::compile_expr;

pub(super) fn compile_while(compiler: &mut ScriptCompiler<'_>, stmt: &WhileStmt<'_>) -> Result<()> {
    let loop_start = compiler.emitter().current_offset();

    compile_expr(compiler, stmt.condition)?;
    compiler.emitter().set_line(stmt.location.line);
    let exit_jump = compiler.emitter().emit_jump_if_false();

    compile_block(compiler, stmt.body)?;

    compiler.emitter().set_line(stmt.location.line);
    compiler.emitter().emit_loop(loop_start);
    compiler.emitter().patch_jump(exit_jump);
    Ok(())
}
