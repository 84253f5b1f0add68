//! Conversion traits between [`Variant`] and native Rust types.
//!
//! - [`FromVariant`]: extract a Rust value from a [`Variant`] argument
//! - [`IntoVariant`]: convert a Rust return value into a [`Variant`]
//!
//! ## Supported Types
//!
//! - Numbers: `f64`, `f32`, and the integer types (integral values only)
//! - Boolean: `bool`
//! - Strings: `String` (and `&'static str` as a return type)
//! - Unit: `()` as a return type, producing [`Variant::Unset`]
//! - Objects: [`ClassRef`] for any instance, [`ObjectRef<T>`] for a checked `T`
//! - [`Variant`] itself, passed through unchanged
//!
//! Each implementation carries a `TYPE_NAME` used when rendering native
//! signatures.

use crate::class::{ClassRef, NativeClass, ObjectRef};
use crate::error::ConversionError;
use crate::variant::Variant;

/// Extract a value from a [`Variant`].
pub trait FromVariant: Sized {
    /// Script-facing name of the accepted type.
    const TYPE_NAME: &'static str;

    /// Returns a `ConversionError` if the variant holds an incompatible value.
    fn from_variant(value: &Variant) -> Result<Self, ConversionError>;
}

/// Convert a value into a [`Variant`].
pub trait IntoVariant {
    /// Script-facing name of the produced type.
    const TYPE_NAME: &'static str;

    fn into_variant(self) -> Variant;
}

fn mismatch(expected: &str, value: &Variant) -> ConversionError {
    ConversionError::TypeMismatch {
        expected: expected.to_string(),
        actual: value.type_name(),
    }
}

// ============================================================================
// Number implementations
// ============================================================================

impl FromVariant for f64 {
    const TYPE_NAME: &'static str = "number";

    fn from_variant(value: &Variant) -> Result<Self, ConversionError> {
        match value {
            Variant::Double(v) => Ok(*v),
            _ => Err(mismatch(<Self as FromVariant>::TYPE_NAME, value)),
        }
    }
}

impl IntoVariant for f64 {
    const TYPE_NAME: &'static str = "number";

    fn into_variant(self) -> Variant {
        Variant::Double(self)
    }
}

impl FromVariant for f32 {
    const TYPE_NAME: &'static str = "number";

    fn from_variant(value: &Variant) -> Result<Self, ConversionError> {
        f64::from_variant(value).map(|v| v as f32)
    }
}

impl IntoVariant for f32 {
    const TYPE_NAME: &'static str = "number";

    fn into_variant(self) -> Variant {
        Variant::Double(self as f64)
    }
}

macro_rules! impl_variant_int {
    ($($ty:ty),*) => {
        $(
            impl FromVariant for $ty {
                const TYPE_NAME: &'static str = "integer";

                fn from_variant(value: &Variant) -> Result<Self, ConversionError> {
                    let v = f64::from_variant(value)
                        .map_err(|_| mismatch(<Self as FromVariant>::TYPE_NAME, value))?;
                    if v.fract() == 0.0 && v >= <$ty>::MIN as f64 && v <= <$ty>::MAX as f64 {
                        Ok(v as $ty)
                    } else {
                        Err(ConversionError::NotAnInteger { value: v })
                    }
                }
            }

            impl IntoVariant for $ty {
                const TYPE_NAME: &'static str = "number";

                fn into_variant(self) -> Variant {
                    Variant::Double(self as f64)
                }
            }
        )*
    };
}

impl_variant_int!(i8, i16, i32, i64, u8, u16, u32, u64, usize);

// ============================================================================
// Bool, string and unit implementations
// ============================================================================

impl FromVariant for bool {
    const TYPE_NAME: &'static str = "bool";

    fn from_variant(value: &Variant) -> Result<Self, ConversionError> {
        match value {
            Variant::Bool(v) => Ok(*v),
            _ => Err(mismatch(<Self as FromVariant>::TYPE_NAME, value)),
        }
    }
}

impl IntoVariant for bool {
    const TYPE_NAME: &'static str = "bool";

    fn into_variant(self) -> Variant {
        Variant::Bool(self)
    }
}

impl FromVariant for String {
    const TYPE_NAME: &'static str = "string";

    fn from_variant(value: &Variant) -> Result<Self, ConversionError> {
        match value {
            Variant::String(v) => Ok(v.clone()),
            _ => Err(mismatch(<Self as FromVariant>::TYPE_NAME, value)),
        }
    }
}

impl IntoVariant for String {
    const TYPE_NAME: &'static str = "string";

    fn into_variant(self) -> Variant {
        Variant::String(self)
    }
}

impl IntoVariant for &'static str {
    const TYPE_NAME: &'static str = "string";

    fn into_variant(self) -> Variant {
        Variant::String(self.to_string())
    }
}

impl IntoVariant for () {
    const TYPE_NAME: &'static str = "unset";

    fn into_variant(self) -> Variant {
        Variant::Unset
    }
}

// ============================================================================
// Variant and object implementations
// ============================================================================

impl FromVariant for Variant {
    const TYPE_NAME: &'static str = "any";

    fn from_variant(value: &Variant) -> Result<Self, ConversionError> {
        Ok(value.clone())
    }
}

impl IntoVariant for Variant {
    const TYPE_NAME: &'static str = "any";

    fn into_variant(self) -> Variant {
        self
    }
}

impl FromVariant for ClassRef {
    const TYPE_NAME: &'static str = "object";

    fn from_variant(value: &Variant) -> Result<Self, ConversionError> {
        match value {
            Variant::Object(object) => Ok(object.clone()),
            _ => Err(mismatch(<Self as FromVariant>::TYPE_NAME, value)),
        }
    }
}

impl IntoVariant for ClassRef {
    const TYPE_NAME: &'static str = "object";

    fn into_variant(self) -> Variant {
        Variant::Object(self)
    }
}

impl<T: NativeClass> FromVariant for ObjectRef<T> {
    const TYPE_NAME: &'static str = T::CLASS_NAME;

    fn from_variant(value: &Variant) -> Result<Self, ConversionError> {
        match value {
            Variant::Object(object) => ObjectRef::new(object.clone()),
            _ => Err(mismatch(<Self as FromVariant>::TYPE_NAME, value)),
        }
    }
}

impl<T: NativeClass> IntoVariant for ObjectRef<T> {
    const TYPE_NAME: &'static str = T::CLASS_NAME;

    fn into_variant(self) -> Variant {
        Variant::Object(self.into_class_ref())
    }
}
