//! The stack machine.
//!
//! Executes a compiled [`Program`](scenescript_compiler::Program) against
//! a fixed-capacity operand stack and a slot table holding the script's
//! variables. Native functions and methods are called through the
//! [`FunctionRegistry`](scenescript_registry::FunctionRegistry).

mod machine;
mod ops;

pub use machine::{Machine, OPERAND_STACK_CAPACITY};
