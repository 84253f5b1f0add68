//! scenescript compiler
//!
//! Lowers a parsed [`Script`] to a flat [`Program`] for the stack machine
//! in a single pass over the statements.
//!
//! ## Modules
//!
//! - [`bytecode`]: Instruction set, constant pool and [`Program`]
//! - [`emit`]: Bytecode emitter with jump backpatching
//! - [`symbol_table`]: Variable name to slot resolution
//!
//! Variables resolve to slots at compile time. Function and constructor
//! calls resolve to registry handles at compile time, so an unknown
//! name/arity combination fails compilation. Method calls are checked
//! against the set of registered method names and dispatched on the
//! receiver's class at run time.
//!
//! # Example
//!
//! ```
//! use bumpalo::Bump;
//! use scenescript_compiler::{CompilerOptions, compile};
//! use scenescript_core::Diagnostics;
//! use scenescript_parser::Parser;
//! use scenescript_registry::FunctionRegistry;
//!
//! let arena = Bump::new();
//! let mut diagnostics = Diagnostics::new();
//! let script = Parser::parse("x = 1 + 2\nx", &arena, &mut diagnostics);
//!
//! let registry = FunctionRegistry::new();
//! let program = compile(&script, &registry, &CompilerOptions::default())?;
//! assert_eq!(program.slot_count(), 1);
//! # Ok::<(), scenescript_core::CompilationError>(())
//! ```

pub mod bytecode;
mod compiler;
pub mod emit;
mod expr;
mod stmt;
pub mod symbol_table;

pub use bytecode::{Constant, ConstantPool, Instruction, MethodTable, Program};
pub use compiler::ScriptCompiler;
pub use emit::{BytecodeEmitter, JumpLabel};
pub use symbol_table::SymbolTable;

pub use scenescript_core::CompilationError;

use scenescript_parser::Script;
use scenescript_registry::FunctionRegistry;

/// Settings that change what the compiler accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompilerOptions {
    /// Reject reads of variables that no earlier statement assigns.
    pub strict_declarations: bool,
}

impl CompilerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strict_declarations(mut self, strict: bool) -> Self {
        self.strict_declarations = strict;
        self
    }
}

/// Compile a script against the functions in `registry`.
pub fn compile(
    script: &Script<'_>,
    registry: &FunctionRegistry,
    options: &CompilerOptions,
) -> Result<Program, CompilationError> {
    ScriptCompiler::new(registry, options).compile(script)
}
