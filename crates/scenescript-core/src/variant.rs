//! The dynamic value type used by the stack machine.

use std::cmp::Ordering;
use std::fmt;

use crate::class::ClassRef;

/// A runtime value.
///
/// Numbers, booleans and strings are plain values copied freely. Objects
/// are shared [`ClassRef`] handles. `Unset` marks a variable slot that has
/// not been assigned and is the result of a program that leaves nothing on
/// the stack.
#[derive(Debug, Clone, Default)]
pub enum Variant {
    #[default]
    Unset,
    Double(f64),
    Bool(bool),
    String(String),
    Object(ClassRef),
}

impl Variant {
    /// Name of the value's type, as used in error messages.
    ///
    /// Objects report their class name.
    pub fn type_name(&self) -> String {
        match self {
            Variant::Unset => "unset".to_string(),
            Variant::Double(_) => "number".to_string(),
            Variant::Bool(_) => "bool".to_string(),
            Variant::String(_) => "string".to_string(),
            Variant::Object(object) => object.class_name().to_string(),
        }
    }

    #[inline]
    pub fn is_unset(&self) -> bool {
        matches!(self, Variant::Unset)
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            Variant::Double(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Variant::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Variant::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ClassRef> {
        match self {
            Variant::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Script equality (`==`).
    ///
    /// Values of different types are never equal. Objects compare by identity.
    pub fn script_eq(&self, other: &Variant) -> bool {
        match (self, other) {
            (Variant::Unset, Variant::Unset) => true,
            (Variant::Double(a), Variant::Double(b)) => a == b,
            (Variant::Bool(a), Variant::Bool(b)) => a == b,
            (Variant::String(a), Variant::String(b)) => a == b,
            (Variant::Object(a), Variant::Object(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    /// Ordering used by the relational operators.
    ///
    /// Only numbers and strings are ordered; every other pairing is `None`,
    /// which makes all four relational operators evaluate to `false`.
    pub fn script_cmp(&self, other: &Variant) -> Option<Ordering> {
        match (self, other) {
            (Variant::Double(a), Variant::Double(b)) => a.partial_cmp(b),
            (Variant::String(a), Variant::String(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl PartialEq for Variant {
    fn eq(&self, other: &Self) -> bool {
        self.script_eq(other)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Unset => f.write_str("unset"),
            // Integral doubles render without a fractional part.
            Variant::Double(value) => write!(f, "{}", value),
            Variant::Bool(value) => write!(f, "{}", value),
            Variant::String(value) => f.write_str(value),
            Variant::Object(object) => write!(f, "{}", object),
        }
    }
}

impl From<f64> for Variant {
    fn from(value: f64) -> Self {
        Variant::Double(value)
    }
}

impl From<bool> for Variant {
    fn from(value: bool) -> Self {
        Variant::Bool(value)
    }
}

impl From<&str> for Variant {
    fn from(value: &str) -> Self {
        Variant::String(value.to_string())
    }
}

impl From<String> for Variant {
    fn from(value: String) -> Self {
        Variant::String(value)
    }
}

impl From<ClassRef> for Variant {
    fn from(value: ClassRef) -> Self {
        Variant::Object(value)
    }
}
