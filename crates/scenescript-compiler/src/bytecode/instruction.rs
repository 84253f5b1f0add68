//! The instruction set of the stack machine.

use std::fmt;

use scenescript_registry::FunctionHandle;

/// A single bytecode instruction.
///
/// The machine is stack-based: operators pop their operands and push one
/// result. Jump targets are absolute instruction indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    // =========================================================================
    // Constants and variables
    // =========================================================================
    /// Push a constant from the pool.
    Constant(u32),
    /// Push the value of a variable slot.
    Load(u32),
    /// Pop into a variable slot.
    Store(u32),
    /// Discard the top of the stack.
    Pop,

    // =========================================================================
    // Arithmetic
    // =========================================================================
    /// Numeric addition, or concatenation when either operand is a string.
    Add,
    Sub,
    Mul,
    Div,
    /// Numeric negation.
    Neg,

    // =========================================================================
    // Logic and comparison
    // =========================================================================
    /// Boolean negation.
    Not,
    /// Boolean conjunction; both operands are evaluated.
    And,
    /// Boolean disjunction; both operands are evaluated.
    Or,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,

    // =========================================================================
    // Control flow
    // =========================================================================
    /// Continue at the target index.
    Jump(usize),
    /// Pop a bool; continue at the target index if it is false.
    JumpIfFalse(usize),

    // =========================================================================
    // Calls
    // =========================================================================
    /// Pop `argc` arguments, call a registered function, push its result.
    Call { handle: FunctionHandle, argc: usize },
    /// Pop `argc` arguments and the receiver beneath them, call the
    /// receiver class's method named by the program's method table.
    CallMethod { method: u32, argc: usize },
}

impl Instruction {
    /// Mnemonic used in disassembly.
    pub fn name(&self) -> &'static str {
        match self {
            Instruction::Constant(_) => "CONSTANT",
            Instruction::Load(_) => "LOAD",
            Instruction::Store(_) => "STORE",
            Instruction::Pop => "POP",
            Instruction::Add => "ADD",
            Instruction::Sub => "SUB",
            Instruction::Mul => "MUL",
            Instruction::Div => "DIV",
            Instruction::Neg => "NEG",
            Instruction::Not => "NOT",
            Instruction::And => "AND",
            Instruction::Or => "OR",
            Instruction::Eq => "EQ",
            Instruction::Ne => "NE",
            Instruction::Lt => "LT",
            Instruction::Gt => "GT",
            Instruction::Le => "LE",
            Instruction::Ge => "GE",
            Instruction::Jump(_) => "JUMP",
            Instruction::JumpIfFalse(_) => "JUMP_IF_FALSE",
            Instruction::Call { .. } => "CALL",
            Instruction::CallMethod { .. } => "CALL_METHOD",
        }
    }

    /// Net change in operand stack depth.
    pub fn stack_effect(&self) -> isize {
        match self {
            Instruction::Constant(_) | Instruction::Load(_) => 1,
            Instruction::Store(_) | Instruction::Pop | Instruction::JumpIfFalse(_) => -1,
            Instruction::Neg | Instruction::Not | Instruction::Jump(_) => 0,
            Instruction::Add
            | Instruction::Sub
            | Instruction::Mul
            | Instruction::Div
            | Instruction::And
            | Instruction::Or
            | Instruction::Eq
            | Instruction::Ne
            | Instruction::Lt
            | Instruction::Gt
            | Instruction::Le
            | Instruction::Ge => -1,
            Instruction::Call { argc, .. } => 1 - *argc as isize,
            Instruction::CallMethod { argc, .. } => -(*argc as isize),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Constant(index) | Instruction::Load(index) | Instruction::Store(index) => {
                write!(f, "{} {}", self.name(), index)
            }
            Instruction::Jump(target) | Instruction::JumpIfFalse(target) => {
                write!(f, "{} {:04}", self.name(), target)
            }
            Instruction::Call { handle, argc } => write!(f, "{} {} {}", self.name(), handle, argc),
            Instruction::CallMethod { method, argc } => {
                write!(f, "{} {} {}", self.name(), method, argc)
            }
            _ => f.write_str(self.name()),
        }
    }
}
