//! Expression lowering.
//!
//! Every expression leaves exactly one value on the operand stack.

mod calls;
mod literals;
mod member;
mod operators;

use scenescript_core::CompilationError;
use scenescript_parser::ast::{Expr, Ident};

use crate::bytecode::Instruction;
use crate::compiler::{Result, ScriptCompiler};

/// Compile an expression.
pub(crate) fn compile_expr(compiler: &mut ScriptCompiler<'_>, expr: &Expr<'_>) -> Result<()> {
    match expr {
        Expr::Number(literal) => literals::compile_number(compiler, literal),
        Expr::Bool(literal) => literals::compile_bool(compiler, literal),
        Expr::String(literal) => literals::compile_string(compiler, literal),
        Expr::Identifier(ident) => compile_identifier(compiler, ident),
        Expr::Binary(binary) => operators::compile_binary(compiler, binary),
        Expr::Unary(unary) => operators::compile_unary(compiler, unary),
        Expr::MemberGet(get) => member::compile_member_get(compiler, get),
        Expr::MemberSet(set) => member::compile_member_set(compiler, set),
        Expr::MethodCall(call) => member::compile_method_call(compiler, call),
        Expr::FunctionCall(call) => calls::compile_function_call(compiler, call),
        Expr::ConstructorCall(call) => calls::compile_constructor_call(compiler, call),
    }
}

/// Compile arguments left to right.
pub(crate) fn compile_args(compiler: &mut ScriptCompiler<'_>, args: &[Expr<'_>]) -> Result<()> {
    for arg in args {
        compile_expr(compiler, arg)?;
    }
    Ok(())
}

fn compile_identifier(compiler: &mut ScriptCompiler<'_>, ident: &Ident<'_>) -> Result<()> {
    let slot = match compiler.symbols().lookup(ident.name) {
        Some(slot) => slot,
        None if compiler.options().strict_declarations => {
            return Err(CompilationError::UndeclaredVariable {
                name: ident.name.to_string(),
                location: ident.location,
            });
        }
        // Read before any assignment; fails at run time unless a loop
        // assigns it first.
        None => compiler.symbols().declare(ident.name),
    };
    compiler.emitter().set_line(ident.location.line);
    compiler.emitter().emit(Instruction::Load(slot));
    Ok(())
}
