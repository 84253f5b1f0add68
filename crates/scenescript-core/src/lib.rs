//! Core types shared by every scenescript crate.
//!
//! This crate provides:
//! - Source locations and the diagnostics collection
//! - The dynamic [`Variant`] value and shared class instances
//! - Conversion traits between variants and native Rust types
//! - The fixed-capacity [`Stack`] used by the stack machine
//! - Error types for every processing phase

pub mod class;
pub mod convert;
pub mod diagnostics;
pub mod error;
pub mod location;
pub mod stack;
pub mod variant;

pub use class::{ClassRef, NativeClass, ObjectRef, ScriptObject};
pub use convert::{FromVariant, IntoVariant};
pub use diagnostics::{DiagnosticLevel, DiagnosticMessage, Diagnostics};
pub use error::{
    CompilationError, ConversionError, LexError, MangleError, NativeError, ParseError,
    ParseErrorKind, RegistrationError, RuntimeError, RuntimeErrorKind, ScriptError, ScriptResult,
    StackError,
};
pub use location::Location;
pub use stack::Stack;
pub use variant::Variant;
