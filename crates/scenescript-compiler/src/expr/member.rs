//! Member access and method calls.
//!
//! The receiver's class is only known at run time, so these compile to
//! `CALL_METHOD` referencing a dispatch table of every class implementing
//! the method with that arity. At least one class must implement it.
//!
//! | form            | method         | argc |
//! |-----------------|----------------|------|
//! | `obj.m(a, b)`   | `m`            | 2    |
//! | `obj.field`     | `field`        | 0    |
//! | `obj.field = v` | `set_field`    | 1    |

use scenescript_core::{CompilationError, Location};
use scenescript_parser::ast::{MemberGetExpr, MemberSetExpr, MethodCallExpr};

use super::{compile_args, compile_expr};
use crate::bytecode::Instruction;
use crate::compiler::{Result, ScriptCompiler};

pub(super) fn compile_member_get(compiler: &mut ScriptCompiler<'_>, get: &MemberGetExpr<'_>) -> Result<()> {
    check_method(compiler, get.member.name, 0, get.member.location)?;
    compile_expr(compiler, get.object)?;
    emit_call_method(compiler, get.member.name, 0, get.location);
    Ok(())
}

pub(super) fn compile_member_set(compiler: &mut ScriptCompiler<'_>, set: &MemberSetExpr<'_>) -> Result<()> {
    let setter = format!("set_{}", set.member.name);
    check_method(compiler, &setter, 1, set.member.location)?;
    compile_expr(compiler, set.object)?;
    compile_expr(compiler, set.value)?;
    emit_call_method(compiler, &setter, 1, set.location);
    Ok(())
}

pub(super) fn compile_method_call(compiler: &mut ScriptCompiler<'_>, call: &MethodCallExpr<'_>) -> Result<()> {
    let argc = call.args.len();
    check_method(compiler, call.method.name, argc, call.method.location)?;
    compile_expr(compiler, call.object)?;
    compile_args(compiler, call.args)?;
    emit_call_method(compiler, call.method.name, argc, call.location);
    Ok(())
}

fn check_method(compiler: &ScriptCompiler<'_>, method: &str, argc: usize, location: Location) -> Result<()> {
    if compiler.registry().has_method(method, argc) {
        Ok(())
    } else {
        Err(CompilationError::UnknownMethod {
            method: method.to_string(),
            arity: argc,
            location,
        })
    }
}

fn emit_call_method(compiler: &mut ScriptCompiler<'_>, method: &str, argc: usize, location: Location) {
    let method = compiler.intern_method(method, argc);
    let emitter = compiler.emitter();
    emitter.set_line(location.line);
    emitter.emit(Instruction::CallMethod { method, argc });
}
