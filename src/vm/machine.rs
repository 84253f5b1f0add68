//! The fetch-decode-execute loop.

use std::fmt;

use log::{debug, trace};
use scenescript_compiler::{Instruction, Program};
use scenescript_core::{RuntimeError, RuntimeErrorKind, Stack, Variant};
use scenescript_registry::FunctionRegistry;

use super::ops;

/// Maximum depth of the operand stack.
pub const OPERAND_STACK_CAPACITY: usize = 256;

type Result<T> = std::result::Result<T, RuntimeErrorKind>;

/// Executes one program.
///
/// The machine owns the operand stack and the slot table; both start
/// empty (every slot unset) and are discarded when the run ends.
pub struct Machine<'a> {
    program: &'a Program,
    registry: &'a FunctionRegistry,
    stack: Stack<Variant, OPERAND_STACK_CAPACITY>,
    slots: Vec<Variant>,
    pc: usize,
}

impl<'a> Machine<'a> {
    pub fn new(program: &'a Program, registry: &'a FunctionRegistry) -> Self {
        Self {
            program,
            registry,
            stack: Stack::new(),
            slots: vec![Variant::Unset; program.slot_count()],
            pc: 0,
        }
    }

    /// Run to the end of the program.
    ///
    /// Returns the value left on top of the operand stack, or
    /// [`Variant::Unset`] if the stack is empty. The first failing
    /// instruction stops the run.
    pub fn run(mut self, output: &mut dyn fmt::Write) -> std::result::Result<Variant, RuntimeError> {
        let program = self.program;
        let code = program.code();
        let mut executed: u64 = 0;

        while let Some(&instruction) = code.get(self.pc) {
            let offset = self.pc;
            self.pc += 1;
            trace!("{:04} {} (depth {})", offset, instruction, self.stack.count());

            self.execute(instruction, output)
                .map_err(|kind| RuntimeError::new(kind, program.line_at(offset)))?;
            executed += 1;
        }

        debug!(
            "executed {} instruction(s), {} value(s) left on the stack",
            executed,
            self.stack.count()
        );
        Ok(self.stack.pop().unwrap_or_default())
    }

    fn execute(&mut self, instruction: Instruction, output: &mut dyn fmt::Write) -> Result<()> {
        match instruction {
            Instruction::Constant(index) => {
                let constant = self
                    .program
                    .constant(index)
                    .ok_or(RuntimeErrorKind::InvalidConstant {
                        index: index as usize,
                    })?;
                self.push(constant.to_variant())?;
            }
            Instruction::Load(slot) => {
                let value = self.load(slot)?;
                self.push(value)?;
            }
            Instruction::Store(slot) => {
                let value = self.pop()?;
                let target = self
                    .slots
                    .get_mut(slot as usize)
                    .ok_or(RuntimeErrorKind::InvalidSlot { slot: slot as usize })?;
                *target = value;
            }
            Instruction::Pop => {
                self.pop()?;
            }

            Instruction::Neg => {
                let operand = self.pop()?;
                self.push(ops::negate(operand)?)?;
            }
            Instruction::Not => {
                let operand = self.pop()?;
                self.push(ops::not(operand)?)?;
            }
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
            | Instruction::Ge => {
                let right = self.pop()?;
                let left = self.pop()?;
                self.push(ops::binary(instruction, left, right)?)?;
            }

            Instruction::Jump(target) => self.jump(target)?,
            Instruction::JumpIfFalse(target) => {
                let value = self.pop()?;
                if !ops::condition(value)? {
                    self.jump(target)?;
                }
            }

            Instruction::Call { handle, argc } => {
                let args: Vec<Variant> = self.stack.pop_n(argc)?.collect();
                let result = self.registry.call_function(handle, &args, output)?;
                self.push(result)?;
            }
            Instruction::CallMethod { method, argc } => {
                let result = self.call_method(method, argc, output)?;
                self.push(result)?;
            }
        }
        Ok(())
    }

    fn load(&self, slot: u32) -> Result<Variant> {
        let value = self
            .slots
            .get(slot as usize)
            .ok_or(RuntimeErrorKind::InvalidSlot { slot: slot as usize })?;
        if value.is_unset() {
            return Err(RuntimeErrorKind::UnsetVariable {
                name: self.program.slot_name(slot).unwrap_or("?").to_string(),
            });
        }
        Ok(value.clone())
    }

    /// Jumping to the end of the program halts it.
    fn jump(&mut self, target: usize) -> Result<()> {
        let len = self.program.len();
        if target > len {
            return Err(RuntimeErrorKind::InvalidJump { target, len });
        }
        self.pc = target;
        Ok(())
    }

    /// Dispatch a method on the class of the receiver beneath the arguments.
    fn call_method(&mut self, method: u32, argc: usize, output: &mut dyn fmt::Write) -> Result<Variant> {
        let program = self.program;
        let table = program
            .method(method)
            .ok_or(RuntimeErrorKind::InvalidMethodIndex {
                index: method as usize,
            })?;
        // Receiver first, then the arguments in call order.
        let args: Vec<Variant> = self.stack.pop_n(argc + 1)?.collect();

        let class = match &args[0] {
            Variant::Object(object) => object.class_name(),
            other => {
                return Err(RuntimeErrorKind::NotAnObject {
                    method: table.name().to_string(),
                    actual: other.type_name(),
                });
            }
        };
        let handle = table.handle_for(class).ok_or_else(|| match table.sole_class() {
            Some(expected) => RuntimeErrorKind::WrongReceiver {
                method: table.name().to_string(),
                expected: expected.to_string(),
                actual: class.to_string(),
            },
            None => RuntimeErrorKind::NoSuchMethod {
                class: class.to_string(),
                method: table.name().to_string(),
                arity: argc,
            },
        })?;
        self.registry.call_function(handle, &args, output)
    }

    #[inline]
    fn push(&mut self, value: Variant) -> Result<()> {
        self.stack.push(value).map_err(RuntimeErrorKind::from)
    }

    #[inline]
    fn pop(&mut self) -> Result<Variant> {
        self.stack.pop().map_err(RuntimeErrorKind::from)
    }
}

#[cfg(test)]
mod tests {
    use scenescript_compiler::{ConstantPool, MethodTable};
    use scenescript_core::NativeError;

    use super::*;

    fn run(program: &Program) -> std::result::Result<Variant, RuntimeError> {
        let registry = FunctionRegistry::new();
        let mut output = String::new();
        Machine::new(program, &registry).run(&mut output)
    }

    fn program(code: Vec<Instruction>, constants: ConstantPool, slots: &[&str]) -> Program {
        let lines = (1..=code.len() as u32).collect();
        let slots = slots.iter().map(|s| s.to_string()).collect();
        Program::new(code, lines, constants, slots, Vec::new())
    }

    #[test]
    fn empty_program_is_unset() {
        let result = run(&Program::default()).unwrap();
        assert!(result.is_unset());
    }

    #[test]
    fn store_and_load() {
        let mut constants = ConstantPool::new();
        let two = constants.add_number(2.0);
        let code = vec![
            Instruction::Constant(two),
            Instruction::Store(0),
            Instruction::Load(0),
            Instruction::Load(0),
            Instruction::Mul,
        ];
        assert_eq!(run(&program(code, constants, &["x"])).unwrap(), Variant::from(4.0));
    }

    #[test]
    fn unset_variable_names_the_slot() {
        let code = vec![Instruction::Load(0)];
        let error = run(&program(code, ConstantPool::new(), &["ghost"])).unwrap_err();
        assert_eq!(
            error,
            RuntimeError::new(
                RuntimeErrorKind::UnsetVariable {
                    name: "ghost".to_string()
                },
                1
            )
        );
    }

    #[test]
    fn underflow_reports_line() {
        let mut constants = ConstantPool::new();
        let one = constants.add_number(1.0);
        let code = vec![Instruction::Constant(one), Instruction::Add];
        let error = run(&program(code, constants, &[])).unwrap_err();
        assert_eq!(error.kind, RuntimeErrorKind::StackUnderflow);
        assert_eq!(error.line, 2);
    }

    #[test]
    fn overflow() {
        let mut constants = ConstantPool::new();
        let one = constants.add_number(1.0);
        let code = vec![Instruction::Constant(one); OPERAND_STACK_CAPACITY + 1];
        let error = run(&program(code, constants, &[])).unwrap_err();
        assert_eq!(
            error.kind,
            RuntimeErrorKind::StackOverflow {
                capacity: OPERAND_STACK_CAPACITY
            }
        );
    }

    #[test]
    fn jump_outside_program() {
        let error = run(&program(vec![Instruction::Jump(5)], ConstantPool::new(), &[])).unwrap_err();
        assert_eq!(error.kind, RuntimeErrorKind::InvalidJump { target: 5, len: 1 });

        // Jumping to the end is a halt.
        assert!(run(&program(vec![Instruction::Jump(1)], ConstantPool::new(), &[])).is_ok());
    }

    #[test]
    fn condition_must_be_bool() {
        let mut constants = ConstantPool::new();
        let one = constants.add_number(1.0);
        let code = vec![Instruction::Constant(one), Instruction::JumpIfFalse(2)];
        let error = run(&program(code, constants, &[])).unwrap_err();
        assert!(matches!(error.kind, RuntimeErrorKind::ConditionNotBool { .. }));
    }

    #[test]
    fn calls_receive_arguments_in_order() {
        fn minus(a: f64, b: f64) -> std::result::Result<f64, NativeError> {
            Ok(a - b)
        }

        let mut registry = FunctionRegistry::new();
        let handle = registry.add_function("minus", minus).unwrap();
        let mut constants = ConstantPool::new();
        let ten = constants.add_number(10.0);
        let three = constants.add_number(3.0);
        let code = vec![
            Instruction::Constant(ten),
            Instruction::Constant(three),
            Instruction::Call { handle, argc: 2 },
        ];
        let program = program(code, constants, &[]);

        let mut output = String::new();
        let result = Machine::new(&program, &registry).run(&mut output).unwrap();
        assert_eq!(result, Variant::from(7.0));
    }

    #[test]
    fn method_on_non_object() {
        let mut constants = ConstantPool::new();
        let one = constants.add_number(1.0);
        let code = vec![
            Instruction::Constant(one),
            Instruction::CallMethod { method: 0, argc: 0 },
        ];
        let methods = vec![MethodTable::new("red", 0)];
        let program = Program::new(code, vec![3, 3], constants, Vec::new(), methods);
        let error = run(&program).unwrap_err();
        assert_eq!(
            error,
            RuntimeError::new(
                RuntimeErrorKind::NotAnObject {
                    method: "red".to_string(),
                    actual: "number".to_string(),
                },
                3
            )
        );
    }
}
