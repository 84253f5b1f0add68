//! Math functions.
//!
//! All functions take and return numbers.

use scenescript_core::{NativeError, RegistrationError};
use scenescript_registry::FunctionRegistry;

/// Defines a native function forwarding to an `f64` method.
macro_rules! f64_wrapper {
    ($(#[$meta:meta])* $name:ident($($arg:ident),*) => $body:expr) => {
        $(#[$meta])*
        pub fn $name($($arg: f64),*) -> Result<f64, NativeError> {
            Ok($body)
        }
    };
}

// =============================================================================
// CONSTANTS
// =============================================================================

/// Pi constant, `pi()`.
pub fn pi() -> Result<f64, NativeError> {
    Ok(std::f64::consts::PI)
}

// =============================================================================
// FUNCTIONS
// =============================================================================

f64_wrapper!(
    /// Square root.
    sqrt(x) => x.sqrt()
);
f64_wrapper!(
    /// Absolute value.
    abs(x) => x.abs()
);
f64_wrapper!(
    /// Sine of angle in radians.
    sin(x) => x.sin()
);
f64_wrapper!(
    /// Cosine of angle in radians.
    cos(x) => x.cos()
);
f64_wrapper!(
    /// Tangent of angle in radians.
    tan(x) => x.tan()
);
f64_wrapper!(
    /// `x` raised to the power `y`.
    pow(x, y) => x.powf(y)
);
f64_wrapper!(min(a, b) => a.min(b));
f64_wrapper!(max(a, b) => a.max(b));
f64_wrapper!(floor(x) => x.floor());
f64_wrapper!(ceil(x) => x.ceil());
f64_wrapper!(
    /// Round half away from zero.
    round(x) => x.round()
);

// =============================================================================
// INSTALLATION
// =============================================================================

/// Register the math functions.
pub fn install(registry: &mut FunctionRegistry) -> Result<(), RegistrationError> {
    registry.add_function("pi", pi)?;
    registry.add_function("sqrt", sqrt)?;
    registry.add_function("abs", abs)?;
    registry.add_function("sin", sin)?;
    registry.add_function("cos", cos)?;
    registry.add_function("tan", tan)?;
    registry.add_function("pow", pow)?;
    registry.add_function("min", min)?;
    registry.add_function("max", max)?;
    registry.add_function("floor", floor)?;
    registry.add_function("ceil", ceil)?;
    registry.add_function("round", round)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use scenescript_core::Variant;

    use super::*;

    #[test]
    fn wrappers() {
        assert!((pi().unwrap() - std::f64::consts::PI).abs() < f64::EPSILON);
        assert!((sqrt(4.0).unwrap() - 2.0).abs() < f64::EPSILON);
        assert!((abs(-5.0).unwrap() - 5.0).abs() < f64::EPSILON);
        assert!(sin(0.0).unwrap().abs() < f64::EPSILON);
        assert!((cos(0.0).unwrap() - 1.0).abs() < f64::EPSILON);
        assert!((pow(2.0, 3.0).unwrap() - 8.0).abs() < f64::EPSILON);
        assert!((min(3.0, 5.0).unwrap() - 3.0).abs() < f64::EPSILON);
        assert!((max(3.0, 5.0).unwrap() - 5.0).abs() < f64::EPSILON);
        assert!((floor(3.7).unwrap() - 3.0).abs() < f64::EPSILON);
        assert!((ceil(3.2).unwrap() - 4.0).abs() < f64::EPSILON);
        assert!((round(-2.5).unwrap() + 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn registered_by_arity() {
        let mut registry = FunctionRegistry::new();
        install(&mut registry).unwrap();
        assert_eq!(registry.len(), 12);

        let handle = registry.resolve("pow", 2).unwrap().unwrap();
        assert_eq!(registry.get(handle).unwrap().signature(), "(number, number) -> number");
        assert!(registry.resolve("pow", 1).unwrap().is_none());

        let mut output = String::new();
        let result = registry.call_function(handle, &[Variant::from(3.0), Variant::from(2.0)], &mut output);
        assert_eq!(result.unwrap(), Variant::from(9.0));
    }
}
