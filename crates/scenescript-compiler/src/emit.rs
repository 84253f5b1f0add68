//! Bytecode emitter.
//!
//! The [`BytecodeEmitter`] appends instructions together with their source
//! line, interns constants, and handles forward jumps by backpatching.
//!
//! # Example
//!
//! ```
//! use scenescript_compiler::bytecode::Instruction;
//! use scenescript_compiler::emit::BytecodeEmitter;
//!
//! let mut emitter = BytecodeEmitter::new();
//! emitter.set_line(1);
//! emitter.emit_number(1.0);
//! let skip = emitter.emit_jump_if_false();
//! emitter.emit(Instruction::Pop);
//! emitter.patch_jump(skip);
//!
//! let program = emitter.finish(Vec::new(), Vec::new());
//! assert_eq!(program.code()[1], Instruction::JumpIfFalse(3));
//! ```

use crate::bytecode::{Constant, ConstantPool, Instruction, MethodTable, Program};

/// A forward jump whose target is not yet known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "forward jumps must be patched"]
pub struct JumpLabel {
    offset: usize,
    conditional: bool,
}

/// Emits the instructions of one program.
#[derive(Debug, Default)]
pub struct BytecodeEmitter {
    code: Vec<Instruction>,
    lines: Vec<u32>,
    constants: ConstantPool,
    current_line: u32,
}

impl BytecodeEmitter {
    pub fn new() -> Self {
        Self {
            current_line: 1,
            ..Self::default()
        }
    }

    /// Set current source line for debug info.
    ///
    /// All subsequent instructions will be associated with this line number.
    pub fn set_line(&mut self, line: u32) {
        self.current_line = line;
    }

    pub fn current_line(&self) -> u32 {
        self.current_line
    }

    /// Index the next emitted instruction will have.
    pub fn current_offset(&self) -> usize {
        self.code.len()
    }

    // ==========================================================================
    // Basic Emission
    // ==========================================================================

    pub fn emit(&mut self, instruction: Instruction) {
        self.code.push(instruction);
        self.lines.push(self.current_line);
    }

    /// Emit a constant load. Constants are deduplicated.
    pub fn emit_constant(&mut self, constant: Constant) {
        let index = self.constants.add(constant);
        self.emit(Instruction::Constant(index));
    }

    pub fn emit_number(&mut self, value: f64) {
        self.emit_constant(Constant::Number(value));
    }

    pub fn emit_bool(&mut self, value: bool) {
        self.emit_constant(Constant::Bool(value));
    }

    pub fn emit_string(&mut self, value: &str) {
        self.emit_constant(Constant::String(value.to_string()));
    }

    // ==========================================================================
    // Jumps
    // ==========================================================================

    /// Emit a forward unconditional jump to be patched later.
    pub fn emit_jump(&mut self) -> JumpLabel {
        let label = JumpLabel {
            offset: self.current_offset(),
            conditional: false,
        };
        self.emit(Instruction::Jump(usize::MAX));
        label
    }

    /// Emit a forward conditional jump to be patched later.
    pub fn emit_jump_if_false(&mut self) -> JumpLabel {
        let label = JumpLabel {
            offset: self.current_offset(),
            conditional: true,
        };
        self.emit(Instruction::JumpIfFalse(usize::MAX));
        label
    }

    /// Point a forward jump at the next instruction to be emitted.
    ///
    /// The placeholder is rewritten from the label, so patching the same
    /// label twice retargets it.
    pub fn patch_jump(&mut self, label: JumpLabel) {
        let target = self.current_offset();
        let patched = if label.conditional {
            Instruction::JumpIfFalse(target)
        } else {
            Instruction::Jump(target)
        };
        if let Some(slot) = self.code.get_mut(label.offset) {
            *slot = patched;
        }
    }

    /// Emit a backward jump to `loop_start`.
    pub fn emit_loop(&mut self, loop_start: usize) {
        self.emit(Instruction::Jump(loop_start));
    }

    /// Finish emission and assemble the program.
    pub fn finish(self, slot_names: Vec<String>, methods: Vec<MethodTable>) -> Program {
        Program::new(self.code, self.lines, self.constants, slot_names, methods)
    }
}
