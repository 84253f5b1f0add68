//! scenescript
//!
//! An embeddable scripting language for driving scenes from native code.
//! Source is parsed into an arena-allocated AST, compiled to a flat
//! instruction stream and executed on a small stack machine. Native
//! functions and classes are exposed to scripts through registries.
//!
//! # Example
//!
//! ```
//! use scenescript::{Engine, NativeError};
//!
//! fn area(width: f64, height: f64) -> Result<f64, NativeError> {
//!     Ok(width * height)
//! }
//!
//! let mut engine = Engine::new()?;
//! engine.register_function("area", area)?;
//!
//! let source = r#"
//!     a = area(3, 4)
//!     if (a > 10)
//!         println('big: {}', a)
//!     else
//!         println('small: {}', a)
//!     end
//! "#;
//! engine.execute(source)?;
//! assert_eq!(engine.output(), "big: 12\n");
//! # Ok::<(), scenescript::ScriptError>(())
//! ```
//!
//! # Crates
//!
//! - `scenescript-core`: values, diagnostics, errors and the fixed stack
//! - `scenescript-parser`: lexer, AST and parser
//! - `scenescript-registry`: name mangling, native adapters and meta-classes
//! - `scenescript-compiler`: bytecode and the compiler
//! - `scenescript-modules`: built-in functions and classes

pub mod engine;
pub mod options;
pub mod vm;

pub use engine::Engine;
pub use options::EngineOptions;
pub use vm::{Machine, OPERAND_STACK_CAPACITY};

pub use scenescript_compiler::{CompilerOptions, Instruction, Program};
pub use scenescript_core::{
    ClassRef, CompilationError, DiagnosticLevel, DiagnosticMessage, Diagnostics, FromVariant,
    IntoVariant, Location, NativeClass, NativeError, ObjectRef, RegistrationError, RuntimeError,
    RuntimeErrorKind, ScriptError, ScriptResult, Variant,
};
pub use scenescript_parser::Script;
pub use scenescript_registry::{
    CallContext, ClassBuilder, FunctionHandle, FunctionRegistry, MetaClass, MetaClassRegistry,
};
