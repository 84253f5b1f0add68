//! FunctionRegistry - dense storage of native functions keyed by mangled name.
//!
//! Functions are registered once during setup. The compiler resolves a
//! mangled name to a [`FunctionHandle`] a single time; the stack machine
//! calls by handle, which is a plain index into the function table.
//!
//! # Storage Model
//!
//! - **Functions**: a `Vec` of entries; a handle is the entry's index
//! - **Names**: mangled name -> handle
//! - **Methods**: `(method, argument count)` -> the classes implementing
//!   it, so the compiler can build a per-call-site dispatch table
//!
//! # Example
//!
//! ```
//! use scenescript_core::{NativeError, Variant};
//! use scenescript_registry::{FunctionRegistry, mangle_with_arity};
//!
//! fn double(x: f64) -> Result<f64, NativeError> {
//!     Ok(x * 2.0)
//! }
//!
//! let mut registry = FunctionRegistry::new();
//! registry.add_function("double", double).unwrap();
//!
//! let handle = registry
//!     .index_for_function(&mangle_with_arity("double", 1).unwrap())
//!     .unwrap();
//! let mut output = String::new();
//! let result = registry.call_function(handle, &[Variant::from(21.0)], &mut output);
//! assert_eq!(result.unwrap(), Variant::from(42.0));
//! ```

use std::fmt;

use log::debug;
use rustc_hash::FxHashMap;
use scenescript_core::{MangleError, NativeError, RegistrationError, RuntimeErrorKind, Variant};

use crate::mangle::{mangle, mangle_with_arity};
use crate::native::{Arity, CallContext, IntoNativeFunction, NativeFunction};

/// Stable index of a registered function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FunctionHandle(usize);

impl FunctionHandle {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for FunctionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A class method: script-visible name and argument count, receiver excluded.
type MethodKey = (String, usize);

struct Entry {
    name: String,
    mangled: String,
    function: NativeFunction,
}

/// Registry of native functions.
#[derive(Default)]
pub struct FunctionRegistry {
    entries: Vec<Entry>,
    by_name: FxHashMap<String, FunctionHandle>,
    methods: FxHashMap<MethodKey, Vec<(String, FunctionHandle)>>,
}

impl FunctionRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    // ==========================================================================
    // Registration
    // ==========================================================================

    /// Register a fixed-arity function under `mangle_with_arity(name, arity)`.
    ///
    /// Re-registering the same name and arity is rejected.
    pub fn add_function<Args>(
        &mut self,
        name: &str,
        function: impl IntoNativeFunction<Args>,
    ) -> Result<FunctionHandle, RegistrationError> {
        let function = function.into_native_function();
        let Arity::Fixed(arity) = function.arity() else {
            return Err(RegistrationError::WrongArityKind {
                name: name.to_string(),
                expected: "fixed-arity",
            });
        };
        let mangled = mangle_with_arity(name, arity)?;
        self.insert(name, mangled, None, function)
    }

    /// Register a variadic function under `mangle(name)`.
    pub fn add_variadic_function<F>(
        &mut self,
        name: &str,
        function: F,
    ) -> Result<FunctionHandle, RegistrationError>
    where
        F: Fn(&mut CallContext<'_>) -> Result<Variant, NativeError> + 'static,
    {
        let mangled = mangle(name)?;
        self.insert(name, mangled, None, NativeFunction::variadic(function))
    }

    /// Register a method of `class` under `"<class>_<method>"`.
    ///
    /// The function takes the receiver as its first argument, so its
    /// arity is one more than the script-visible argument count.
    pub fn add_method<Args>(
        &mut self,
        class: &str,
        method: &str,
        function: impl IntoNativeFunction<Args>,
    ) -> Result<FunctionHandle, RegistrationError> {
        let name = method_name(class, method);
        let function = function.into_native_function();
        let arity = match function.arity() {
            Arity::Fixed(arity) if arity > 0 => arity,
            _ => {
                return Err(RegistrationError::WrongArityKind {
                    name,
                    expected: "receiver-first fixed-arity",
                });
            }
        };
        let mangled = mangle_with_arity(&name, arity)?;
        let key = (method.to_string(), arity - 1);
        self.insert(&name, mangled, Some((class.to_string(), key)), function)
    }

    fn insert(
        &mut self,
        name: &str,
        mangled: String,
        method: Option<(String, MethodKey)>,
        function: NativeFunction,
    ) -> Result<FunctionHandle, RegistrationError> {
        if self.by_name.contains_key(&mangled) {
            return Err(RegistrationError::DuplicateFunction {
                name: format!("{}/{}", name, function.arity()),
            });
        }

        let handle = FunctionHandle(self.entries.len());
        debug!(
            "registered native function {} {} as {}",
            name,
            function.signature(),
            handle
        );
        self.by_name.insert(mangled.clone(), handle);
        if let Some((class, key)) = method {
            self.methods.entry(key).or_default().push((class, handle));
        }
        self.entries.push(Entry {
            name: name.to_string(),
            mangled,
            function,
        });
        Ok(handle)
    }

    /// Remove every function registered after the first `len`.
    pub(crate) fn truncate(&mut self, len: usize) {
        if len >= self.entries.len() {
            return;
        }
        for entry in self.entries.drain(len..) {
            self.by_name.remove(&entry.mangled);
        }
        let cutoff = FunctionHandle(len);
        self.methods.retain(|_, classes| {
            classes.retain(|(_, handle)| *handle < cutoff);
            !classes.is_empty()
        });
    }

    // ==========================================================================
    // Lookup
    // ==========================================================================

    /// Resolve a mangled name to its handle.
    pub fn index_for_function(&self, mangled: &str) -> Option<FunctionHandle> {
        self.by_name.get(mangled).copied()
    }

    /// Resolve a call of `name` with `argc` arguments.
    ///
    /// A fixed-arity registration is preferred over a variadic one.
    pub fn resolve(&self, name: &str, argc: usize) -> Result<Option<FunctionHandle>, MangleError> {
        if let Some(handle) = self.index_for_function(&mangle_with_arity(name, argc)?) {
            return Ok(Some(handle));
        }
        Ok(self.index_for_function(&mangle(name)?))
    }

    /// Resolve `method` of `class` called with `argc` script arguments.
    pub fn index_for_method(&self, class: &str, method: &str, argc: usize) -> Option<FunctionHandle> {
        let mangled = mangle_with_arity(&method_name(class, method), argc + 1).ok()?;
        self.index_for_function(&mangled)
    }

    /// Returns `true` if any class has `method` taking `argc` script arguments.
    pub fn has_method(&self, method: &str, argc: usize) -> bool {
        self.methods.contains_key(&(method.to_string(), argc))
    }

    /// Every `(class, handle)` implementing `method` with `argc` script
    /// arguments, in registration order.
    pub fn method_implementations(&self, method: &str, argc: usize) -> &[(String, FunctionHandle)] {
        self.methods
            .get(&(method.to_string(), argc))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Get a function by handle.
    pub fn get(&self, handle: FunctionHandle) -> Option<&NativeFunction> {
        self.entries.get(handle.0).map(|entry| &entry.function)
    }

    /// The unmangled name a function was registered under.
    pub fn name(&self, handle: FunctionHandle) -> Option<&str> {
        self.entries.get(handle.0).map(|entry| entry.name.as_str())
    }

    pub fn mangled_name(&self, handle: FunctionHandle) -> Option<&str> {
        self.entries.get(handle.0).map(|entry| entry.mangled.as_str())
    }

    // ==========================================================================
    // Calls
    // ==========================================================================

    /// Call a function by handle.
    ///
    /// `output` receives anything the function prints.
    pub fn call_function(
        &self,
        handle: FunctionHandle,
        args: &[Variant],
        output: &mut dyn fmt::Write,
    ) -> Result<Variant, RuntimeErrorKind> {
        let entry = self
            .entries
            .get(handle.0)
            .ok_or(RuntimeErrorKind::InvalidFunctionHandle { handle: handle.0 })?;
        let mut ctx = CallContext::new(args, output);
        entry
            .function
            .call(&mut ctx)
            .map_err(|source| RuntimeErrorKind::Native {
                function: entry.name.clone(),
                source,
            })
    }

    // ==========================================================================
    // Iteration
    // ==========================================================================

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(handle, name, function)` in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (FunctionHandle, &str, &NativeFunction)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| (FunctionHandle(index), entry.name.as_str(), &entry.function))
    }
}

impl fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("count", &self.entries.len())
            .field(
                "functions",
                &self.entries.iter().map(|e| e.mangled.as_str()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Registry name of a class member: `"<class>_<member>"`.
pub fn method_name(class: &str, member: &str) -> String {
    format!("{}_{}", class, member)
}
