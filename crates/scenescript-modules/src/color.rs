//! The `Color` class.
//!
//! An RGB triple with `red`, `green` and `blue` properties. `add` and
//! `scale` return new colors and leave the receiver unchanged.

use std::fmt;
use std::ops::{Add, Mul};

use scenescript_core::{NativeClass, NativeError, ObjectRef, RegistrationError};
use scenescript_registry::{ClassBuilder, FunctionRegistry, MetaClass};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

impl Color {
    pub const fn new(red: f64, green: f64, blue: f64) -> Self {
        Self { red, green, blue }
    }
}

impl Add for Color {
    type Output = Color;

    fn add(self, other: Color) -> Color {
        Color::new(self.red + other.red, self.green + other.green, self.blue + other.blue)
    }
}

impl Mul<f64> for Color {
    type Output = Color;

    fn mul(self, factor: f64) -> Color {
        Color::new(self.red * factor, self.green * factor, self.blue * factor)
    }
}

impl NativeClass for Color {
    const CLASS_NAME: &'static str = "Color";
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color({}, {}, {})", self.red, self.green, self.blue)
    }
}

fn construct(red: f64, green: f64, blue: f64) -> Result<ObjectRef<Color>, NativeError> {
    Ok(ObjectRef::wrap(Color::new(red, green, blue)))
}

fn construct_black() -> Result<ObjectRef<Color>, NativeError> {
    Ok(ObjectRef::wrap(Color::default()))
}

fn add(color: ObjectRef<Color>, other: ObjectRef<Color>) -> Result<ObjectRef<Color>, NativeError> {
    let lhs = *color.get()?;
    let rhs = *other.get()?;
    Ok(ObjectRef::wrap(lhs + rhs))
}

fn scale(color: ObjectRef<Color>, factor: f64) -> Result<ObjectRef<Color>, NativeError> {
    let color = *color.get()?;
    Ok(ObjectRef::wrap(color * factor))
}

/// Registers `Color`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ColorClass;

impl MetaClass for ColorClass {
    fn name(&self) -> &str {
        Color::CLASS_NAME
    }

    fn init(&self, registry: &mut FunctionRegistry) -> Result<(), RegistrationError> {
        ClassBuilder::<Color>::new(registry)
            .constructor(construct)?
            .constructor(construct_black)?
            .method("add", add)?
            .method("scale", scale)?
            .property("red", |c: &Color| c.red, |c: &mut Color, v: f64| c.red = v)?
            .property("green", |c: &Color| c.green, |c: &mut Color, v: f64| c.green = v)?
            .property("blue", |c: &Color| c.blue, |c: &mut Color, v: f64| c.blue = v)?;
        Ok(())
    }
}
