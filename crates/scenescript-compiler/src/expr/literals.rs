//! Literal expression compilation.

use scenescript_parser::ast::{BoolLiteral, NumberLiteral, StringLiteral};

use crate::compiler::{Result, ScriptCompiler};

pub(super) fn compile_number(compiler: &mut ScriptCompiler<'_>, literal: &NumberLiteral) -> Result<()> {
    let emitter = compiler.emitter();
    emitter.set_line(literal.location.line);
    emitter.emit_number(literal.value);
    Ok(())
}

pub(super) fn compile_bool(compiler: &mut ScriptCompiler<'_>, literal: &BoolLiteral) -> Result<()> {
    let emitter = compiler.emitter();
    emitter.set_line(literal.location.line);
    emitter.emit_bool(literal.value);
    Ok(())
}

pub(super) fn compile_string(compiler: &mut ScriptCompiler<'_>, literal: &StringLiteral<'_>) -> Result<()> {
    let emitter = compiler.emitter();
    emitter.set_line(literal.location.line);
    emitter.emit_string(literal.value);
    Ok(())
}
