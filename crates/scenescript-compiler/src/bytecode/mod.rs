//! Bytecode definitions for the scenescript stack machine.
//!
//! - [`Instruction`] - the instruction set
//! - [`ConstantPool`] - deduplicated literal storage
//! - [`MethodTable`] - per-call-site method dispatch
//! - [`Program`] - a compiled script ready for execution

mod constant;
mod instruction;
mod method_table;
mod program;

pub use constant::{Constant, ConstantPool};
pub use instruction::Instruction;
pub use method_table::MethodTable;
pub use program::Program;
