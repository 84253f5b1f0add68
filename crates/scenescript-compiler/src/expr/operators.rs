//! Binary and unary operators.
//!
//! Both operands are always evaluated; `and` and `or` do not short-circuit.

use scenescript_parser::ast::{BinaryExpr, BinaryOp, UnaryExpr, UnaryOp};

use super::compile_expr;
use crate::bytecode::Instruction;
use crate::compiler::{Result, ScriptCompiler};

pub(super) fn compile_binary(compiler: &mut ScriptCompiler<'_>, binary: &BinaryExpr<'_>) -> Result<()> {
    compile_expr(compiler, binary.left)?;
    compile_expr(compiler, binary.right)?;

    let instruction = match binary.op {
        BinaryOp::Or => Instruction::Or,
        BinaryOp::And => Instruction::And,
        BinaryOp::Equal => Instruction::Eq,
        BinaryOp::NotEqual => Instruction::Ne,
        BinaryOp::Less => Instruction::Lt,
        BinaryOp::LessEqual => Instruction::Le,
        BinaryOp::Greater => Instruction::Gt,
        BinaryOp::GreaterEqual => Instruction::Ge,
        BinaryOp::Add => Instruction::Add,
        BinaryOp::Sub => Instruction::Sub,
        BinaryOp::Mul => Instruction::Mul,
        BinaryOp::Div => Instruction::Div,
    };
    let emitter = compiler.emitter();
    emitter.set_line(binary.location.line);
    emitter.emit(instruction);
    Ok(())
}

pub(super) fn compile_unary(compiler: &mut ScriptCompiler<'_>, unary: &UnaryExpr<'_>) -> Result<()> {
    compile_expr(compiler, unary.operand)?;

    let instruction = match unary.op {
        UnaryOp::Neg => Instruction::Neg,
        UnaryOp::Not => Instruction::Not,
    };
    let emitter = compiler.emitter();
    emitter.set_line(unary.location.line);
    emitter.emit(instruction);
    Ok(())
}
