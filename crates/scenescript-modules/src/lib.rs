//! Built-in library for scenescript.
//!
//! - **std** - `print` and `println` with `{}` format strings
//! - **math** - `sqrt`, `abs`, `sin`, `cos`, `tan`, `pow`, `min`, `max`,
//!   `floor`, `ceil`, `round` and `pi`
//! - **measurement** - the `Measurement` stopwatch class
//! - **color** - the `Color` RGB class
//!
//! # Usage
//!
//! ```
//! use scenescript_registry::{FunctionRegistry, MetaClassRegistry};
//!
//! let mut functions = FunctionRegistry::new();
//! let mut classes = MetaClassRegistry::new();
//! scenescript_modules::install(&mut functions, &mut classes)?;
//!
//! assert!(classes.contains("Color"));
//! assert!(functions.resolve("sqrt", 1)?.is_some());
//! # Ok::<(), Box<dyn core::error::Error>>(())
//! ```

pub mod color;
pub mod math;
pub mod measurement;
pub mod std;

pub use color::{Color, ColorClass};
pub use measurement::{Measurement, MeasurementClass};

use log::debug;
use scenescript_core::RegistrationError;
use scenescript_registry::{FunctionRegistry, MetaClassRegistry};

/// Install every built-in function and class.
pub fn install(
    functions: &mut FunctionRegistry,
    classes: &mut MetaClassRegistry,
) -> Result<(), RegistrationError> {
    self::std::install(functions)?;
    math::install(functions)?;
    classes.add_meta_class(MeasurementClass, functions)?;
    classes.add_meta_class(ColorClass, functions)?;
    debug!(
        "installed built-in modules: {} function(s), {} class(es)",
        functions.len(),
        classes.len()
    );
    Ok(())
}
