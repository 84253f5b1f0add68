//! If statement compilation.

use scenescript_parser::ast::IfStmt;

use super::compile_block;
use crate::compiler::{Result, ScriptCompiler};
use crate::expr::compile_expr;

/// ```text
///     <condition>
///     JUMP_IF_FALSE else
///     <then>
///     JUMP end            (only with an else branch)
/// else:
///     <else>
/// end:
/// ```
pub(super) fn compile_if(compiler: &mut ScriptCompiler<'_>, stmt: &IfStmt<'_>) -> Result<()> {
    compile_expr(compiler, stmt.condition)?;
    compiler.emitter().set_line(stmt.location.line);
    let else_jump = compiler.emitter().emit_jump_if_false();

    compile_block(compiler, stmt.then_body)?;

    match stmt.else_body {
        Some(else_body) => {
            let end_jump = compiler.emitter().emit_jump();
            compiler.emitter().patch_jump(else_jump);
            compile_block(compiler, else_body)?;
            compiler.emitter().patch_jump(end_jump);
        }
        None => compiler.emitter().patch_jump(else_jump),
    }
    Ok(())
}
