//! scenescript registry crate.
//!
//! Bridges native Rust functions and types into scripts:
//! - [`mangle`]/[`demangle`]: invertible registry keys encoding name and arity
//! - [`NativeFunction`] and [`IntoNativeFunction`]: uniform adapters over typed callables
//! - [`FunctionRegistry`]: dense, handle-indexed function storage
//! - [`MetaClass`], [`MetaClassRegistry`] and [`ClassBuilder`]: native class registration

mod class_builder;
mod function_registry;
mod mangle;
mod meta_class;
mod native;

pub use class_builder::ClassBuilder;
pub use function_registry::{FunctionHandle, FunctionRegistry, method_name};
pub use mangle::{Demangled, MANGLE_PREFIX, demangle, mangle, mangle_with_arity};
pub use meta_class::{MetaClass, MetaClassRegistry};
pub use native::{Arity, CallContext, IntoNativeFunction, NativeFunction};
