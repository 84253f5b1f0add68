//! A compiled script.

use std::fmt;

use super::{Constant, ConstantPool, Instruction, MethodTable};

/// The flat instruction sequence produced by compiling one script.
///
/// Alongside the code, a program carries everything the stack machine
/// needs to execute it: the constant pool, the source line of every
/// instruction, the variable names behind each slot (for error messages)
/// and the dispatch tables referenced by `CALL_METHOD`.
#[derive(Debug, Clone, Default)]
pub struct Program {
    code: Vec<Instruction>,
    lines: Vec<u32>,
    constants: ConstantPool,
    slot_names: Vec<String>,
    methods: Vec<MethodTable>,
}

impl Program {
    pub fn new(
        code: Vec<Instruction>,
        lines: Vec<u32>,
        constants: ConstantPool,
        slot_names: Vec<String>,
        methods: Vec<MethodTable>,
    ) -> Self {
        Self {
            code,
            lines,
            constants,
            slot_names,
            methods,
        }
    }

    pub fn code(&self) -> &[Instruction] {
        &self.code
    }

    pub fn len(&self) -> usize {
        self.code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    /// Source line of the instruction at `offset`, or 0 if out of range.
    pub fn line_at(&self, offset: usize) -> u32 {
        self.lines.get(offset).copied().unwrap_or(0)
    }

    pub fn constant(&self, index: u32) -> Option<&Constant> {
        self.constants.get(index)
    }

    pub fn constants(&self) -> &ConstantPool {
        &self.constants
    }

    /// Number of variable slots the program uses.
    pub fn slot_count(&self) -> usize {
        self.slot_names.len()
    }

    pub fn slot_name(&self, slot: u32) -> Option<&str> {
        self.slot_names.get(slot as usize).map(String::as_str)
    }

    pub fn method(&self, index: u32) -> Option<&MethodTable> {
        self.methods.get(index as usize)
    }

    pub fn method_name(&self, index: u32) -> Option<&str> {
        self.method(index).map(MethodTable::name)
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut previous_line = None;
        for (offset, instruction) in self.code.iter().enumerate() {
            let line = self.line_at(offset);
            if previous_line == Some(line) {
                write!(f, "{:04}    |  {}", offset, instruction)?;
            } else {
                write!(f, "{:04} {:4}  {}", offset, line, instruction)?;
            }
            previous_line = Some(line);

            match instruction {
                Instruction::Constant(index) => {
                    if let Some(constant) = self.constant(*index) {
                        write!(f, " ({})", constant)?;
                    }
                }
                Instruction::Load(slot) | Instruction::Store(slot) => {
                    if let Some(name) = self.slot_name(*slot) {
                        write!(f, " ({})", name)?;
                    }
                }
                Instruction::CallMethod { method, .. } => {
                    if let Some(name) = self.method_name(*method) {
                        write!(f, " ({})", name)?;
                    }
                }
                _ => {}
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Program {
        let mut constants = ConstantPool::new();
        let one = constants.add_number(1.0);
        Program::new(
            vec![
                Instruction::Constant(one),
                Instruction::Store(0),
                Instruction::Load(0),
                Instruction::CallMethod { method: 0, argc: 0 },
            ],
            vec![1, 1, 2, 2],
            constants,
            vec!["x".to_string()],
            vec![MethodTable::new("red", 0)],
        )
    }

    #[test]
    fn accessors() {
        let program = sample();
        assert_eq!(program.len(), 4);
        assert_eq!(program.slot_count(), 1);
        assert_eq!(program.slot_name(0), Some("x"));
        assert_eq!(program.method_name(0), Some("red"));
        assert_eq!(program.line_at(2), 2);
        assert_eq!(program.line_at(99), 0);
    }

    #[test]
    fn disassembly() {
        let listing = sample().to_string();
        let lines: Vec<&str> = listing.lines().collect();
        assert_eq!(lines[0], "0000    1  CONSTANT 0 (1)");
        assert_eq!(lines[1], "0001    |  STORE 0 (x)");
        assert_eq!(lines[2], "0002    2  LOAD 0 (x)");
        assert_eq!(lines[3], "0003    |  CALL_METHOD 0 0 (red)");
    }
}
