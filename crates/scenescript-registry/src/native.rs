//! Native function storage and call context.
//!
//! Every native callable is stored as a type-erased [`NativeFunction`]
//! taking a [`CallContext`]. Typed Rust functions are adapted through
//! [`IntoNativeFunction`], which converts each argument with
//! [`FromVariant`] and the return value with [`IntoVariant`].
//!
//! ```
//! use scenescript_core::{NativeError, Variant};
//! use scenescript_registry::{Arity, CallContext, IntoNativeFunction};
//!
//! fn hypot(x: f64, y: f64) -> Result<f64, NativeError> {
//!     Ok(x.hypot(y))
//! }
//!
//! let function = hypot.into_native_function();
//! assert_eq!(function.arity(), Arity::Fixed(2));
//! assert_eq!(function.signature(), "(number, number) -> number");
//!
//! let mut output = String::new();
//! let args = [Variant::from(3.0), Variant::from(4.0)];
//! let result = function.call(&mut CallContext::new(&args, &mut output)).unwrap();
//! assert_eq!(result, Variant::from(5.0));
//! ```

use std::fmt;
use std::rc::Rc;

use scenescript_core::{FromVariant, IntoVariant, NativeError, Variant};

/// Number of arguments a native function accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    /// Exactly this many arguments.
    Fixed(usize),
    /// Any number of arguments.
    Variadic,
}

impl Arity {
    /// Returns `true` if `count` arguments are accepted.
    pub fn accepts(&self, count: usize) -> bool {
        match self {
            Arity::Fixed(n) => *n == count,
            Arity::Variadic => true,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Fixed(n) => write!(f, "{}", n),
            Arity::Variadic => f.write_str("variadic"),
        }
    }
}

/// Context passed to native function calls.
///
/// Provides the arguments in call order and the output sink that
/// `print`-style functions write to.
pub struct CallContext<'a> {
    args: &'a [Variant],
    output: &'a mut dyn fmt::Write,
}

impl<'a> CallContext<'a> {
    pub fn new(args: &'a [Variant], output: &'a mut dyn fmt::Write) -> Self {
        Self { args, output }
    }

    /// All arguments in call order.
    pub fn args(&self) -> &'a [Variant] {
        self.args
    }

    pub fn arg_count(&self) -> usize {
        self.args.len()
    }

    /// Convert the argument at `index` to `T`.
    ///
    /// A conversion failure is reported with the argument index.
    pub fn arg<T: FromVariant>(&self, index: usize) -> Result<T, NativeError> {
        let value = self.args.get(index).ok_or(NativeError::ArgumentCount {
            expected: index + 1,
            actual: self.args.len(),
        })?;
        T::from_variant(value).map_err(|source| NativeError::Argument { index, source })
    }

    /// The output sink.
    pub fn output(&mut self) -> &mut dyn fmt::Write {
        &mut *self.output
    }

    pub fn write_str(&mut self, text: &str) -> Result<(), NativeError> {
        self.output.write_str(text).map_err(NativeError::from)
    }
}

type NativeCall = dyn Fn(&mut CallContext<'_>) -> Result<Variant, NativeError>;

/// Type-erased native function.
///
/// Cloning shares the underlying callable.
#[derive(Clone)]
pub struct NativeFunction {
    arity: Arity,
    signature: String,
    call: Rc<NativeCall>,
}

impl NativeFunction {
    /// Wrap a raw callable with a declared arity and signature.
    pub fn new<F>(arity: Arity, signature: impl Into<String>, call: F) -> Self
    where
        F: Fn(&mut CallContext<'_>) -> Result<Variant, NativeError> + 'static,
    {
        Self {
            arity,
            signature: signature.into(),
            call: Rc::new(call),
        }
    }

    /// Wrap a callable that accepts any number of arguments.
    pub fn variadic<F>(call: F) -> Self
    where
        F: Fn(&mut CallContext<'_>) -> Result<Variant, NativeError> + 'static,
    {
        Self::new(Arity::Variadic, "(...) -> any", call)
    }

    #[inline]
    pub fn arity(&self) -> Arity {
        self.arity
    }

    /// Human-readable parameter and return types.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Invoke the function.
    ///
    /// Fixed-arity functions reject a context with the wrong number of
    /// arguments before the callable runs.
    pub fn call(&self, ctx: &mut CallContext<'_>) -> Result<Variant, NativeError> {
        match self.arity {
            Arity::Fixed(expected) if expected != ctx.arg_count() => {
                Err(NativeError::ArgumentCount {
                    expected,
                    actual: ctx.arg_count(),
                })
            }
            _ => (self.call)(ctx),
        }
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
            .field("arity", &self.arity)
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

/// Conversion of a typed Rust callable into a [`NativeFunction`].
///
/// Implemented for `Fn(A1, ..., An) -> Result<R, NativeError>` with up to
/// five parameters, where every `Ai: FromVariant` and `R: IntoVariant`.
/// `Args` only disambiguates the implementations.
pub trait IntoNativeFunction<Args> {
    fn into_native_function(self) -> NativeFunction;
}

impl IntoNativeFunction<NativeFunction> for NativeFunction {
    fn into_native_function(self) -> NativeFunction {
        self
    }
}

macro_rules! impl_into_native_function {
    ($count:literal; $($ty:ident $var:ident $idx:tt),*) => {
        impl<F, R, $($ty,)*> IntoNativeFunction<($($ty,)*)> for F
        where
            F: Fn($($ty),*) -> Result<R, NativeError> + 'static,
            R: IntoVariant,
            $($ty: FromVariant,)*
        {
            fn into_native_function(self) -> NativeFunction {
                let params: [&str; $count] = [$($ty::TYPE_NAME),*];
                let signature = format!("({}) -> {}", params.join(", "), R::TYPE_NAME);
                NativeFunction::new(Arity::Fixed($count), signature, move |_ctx: &mut CallContext<'_>| {
                    $(let $var = _ctx.arg::<$ty>($idx)?;)*
                    Ok((self)($($var),*)?.into_variant())
                })
            }
        }
    };
}

impl_into_native_function!(0;);
impl_into_native_function!(1; A1 a1 0);
impl_into_native_function!(2; A1 a1 0, A2 a2 1);
impl_into_native_function!(3; A1 a1 0, A2 a2 1, A3 a3 2);
impl_into_native_function!(4; A1 a1 0, A2 a2 1, A3 a3 2, A4 a4 3);
impl_into_native_function!(5; A1 a1 0, A2 a2 1, A3 a3 2, A4 a4 3, A5 a5 4);
