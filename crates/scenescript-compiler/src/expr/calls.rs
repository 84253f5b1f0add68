//! Function and constructor calls.
//!
//! A call pushes its arguments left to right and then emits a single
//! `CALL` carrying the registry handle resolved here.

use scenescript_core::CompilationError;
use scenescript_parser::ast::CallExpr;

use super::compile_args;
use crate::bytecode::Instruction;
use crate::compiler::{Result, ScriptCompiler};

pub(super) fn compile_function_call(compiler: &mut ScriptCompiler<'_>, call: &CallExpr<'_>) -> Result<()> {
    let name = call.callee.name;
    let argc = call.args.len();
    let Some(handle) = compiler.resolve_function(name, argc, call.location)? else {
        return Err(CompilationError::UnknownFunction {
            name: name.to_string(),
            arity: argc,
            location: call.location,
        });
    };

    compile_args(compiler, call.args)?;
    let emitter = compiler.emitter();
    emitter.set_line(call.location.line);
    emitter.emit(Instruction::Call { handle, argc });
    Ok(())
}

/// `Name(args)` resolves to the `Name_constructor` registered by the class.
pub(super) fn compile_constructor_call(compiler: &mut ScriptCompiler<'_>, call: &CallExpr<'_>) -> Result<()> {
    let class = call.callee.name;
    let argc = call.args.len();
    let constructor = format!("{}_constructor", class);
    let Some(handle) = compiler.resolve_function(&constructor, argc, call.location)? else {
        return Err(CompilationError::UnknownConstructor {
            class: class.to_string(),
            arity: argc,
            location: call.location,
        });
    };

    compile_args(compiler, call.args)?;
    let emitter = compiler.emitter();
    emitter.set_line(call.location.line);
    emitter.emit(Instruction::Call { handle, argc });
    Ok(())
}
