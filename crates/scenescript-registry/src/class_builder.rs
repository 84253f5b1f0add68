//! ClassBuilder for registering a native type's functions.
//!
//! ClassBuilder provides a fluent API used from [`MetaClass::init`] to
//! register a [`NativeClass`]'s constructor, methods and member accessors
//! under the type-scoped names the compiler looks up:
//!
//! | script form       | registered name          | arity        |
//! |-------------------|--------------------------|--------------|
//! | `Type(args)`      | `Type_constructor`       | `args`       |
//! | `obj.m(args)`     | `Type_m`                 | `1 + args`   |
//! | `obj.field`       | `Type_field`             | `1`          |
//! | `obj.field = v`   | `Type_set_field`         | `2`          |
//!
//! # Example
//!
//! ```
//! use std::fmt;
//! use scenescript_core::{NativeClass, NativeError, ObjectRef};
//! use scenescript_registry::{ClassBuilder, FunctionRegistry};
//!
//! #[derive(Debug)]
//! struct Light {
//!     power: f64,
//! }
//!
//! impl NativeClass for Light {
//!     const CLASS_NAME: &'static str = "Light";
//! }
//!
//! impl fmt::Display for Light {
//!     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
//!         write!(f, "Light({})", self.power)
//!     }
//! }
//!
//! fn new_light(power: f64) -> Result<ObjectRef<Light>, NativeError> {
//!     Ok(ObjectRef::wrap(Light { power }))
//! }
//!
//! let mut registry = FunctionRegistry::new();
//! ClassBuilder::<Light>::new(&mut registry)
//!     .constructor(new_light)?
//!     .property("power", |light| light.power, |light, power: f64| light.power = power)?;
//!
//! assert!(registry.resolve("Light_constructor", 1)?.is_some());
//! assert!(registry.index_for_method("Light", "set_power", 1).is_some());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! [`MetaClass::init`]: crate::MetaClass::init

use std::marker::PhantomData;

use scenescript_core::{FromVariant, IntoVariant, NativeClass, ObjectRef, RegistrationError, Variant};

use crate::function_registry::FunctionRegistry;
use crate::native::{Arity, CallContext, IntoNativeFunction, NativeFunction};

/// Builder registering the functions of native type `T`.
pub struct ClassBuilder<'r, T: NativeClass> {
    registry: &'r mut FunctionRegistry,
    _marker: PhantomData<T>,
}

impl<'r, T: NativeClass> ClassBuilder<'r, T> {
    pub fn new(registry: &'r mut FunctionRegistry) -> Self {
        Self {
            registry,
            _marker: PhantomData,
        }
    }

    /// Register a constructor, `"<Type>_constructor"`.
    ///
    /// Overloads with different parameter counts may be registered.
    pub fn constructor<Args>(
        self,
        function: impl IntoNativeFunction<Args>,
    ) -> Result<Self, RegistrationError> {
        let name = format!("{}_constructor", T::CLASS_NAME);
        self.registry.add_function(&name, function)?;
        Ok(self)
    }

    /// Register a method, `"<Type>_<name>"`.
    ///
    /// The function receives the receiver first, typically as `ObjectRef<T>`.
    pub fn method<Args>(
        self,
        name: &str,
        function: impl IntoNativeFunction<Args>,
    ) -> Result<Self, RegistrationError> {
        self.registry.add_method(T::CLASS_NAME, name, function)?;
        Ok(self)
    }

    /// Register a read accessor, `"<Type>_<member>"`.
    pub fn getter<R, G>(self, member: &str, get: G) -> Result<Self, RegistrationError>
    where
        G: Fn(&T) -> R + 'static,
        R: IntoVariant,
    {
        let signature = format!("({}) -> {}", T::CLASS_NAME, R::TYPE_NAME);
        let function = NativeFunction::new(Arity::Fixed(1), signature, move |ctx: &mut CallContext<'_>| {
            let object = ctx.arg::<ObjectRef<T>>(0)?;
            let value = get(&*object.get()?);
            Ok(value.into_variant())
        });
        self.registry.add_method(T::CLASS_NAME, member, function)?;
        Ok(self)
    }

    /// Register a write accessor, `"<Type>_set_<member>"`.
    pub fn setter<V, S>(self, member: &str, set: S) -> Result<Self, RegistrationError>
    where
        S: Fn(&mut T, V) + 'static,
        V: FromVariant,
    {
        let signature = format!("({}, {}) -> unset", T::CLASS_NAME, V::TYPE_NAME);
        let function = NativeFunction::new(Arity::Fixed(2), signature, move |ctx: &mut CallContext<'_>| {
            let object = ctx.arg::<ObjectRef<T>>(0)?;
            let value = ctx.arg::<V>(1)?;
            set(&mut *object.get_mut()?, value);
            Ok(Variant::Unset)
        });
        self.registry
            .add_method(T::CLASS_NAME, &format!("set_{}", member), function)?;
        Ok(self)
    }

    /// Register both accessors of a member.
    pub fn property<R, V, G, S>(self, member: &str, get: G, set: S) -> Result<Self, RegistrationError>
    where
        G: Fn(&T) -> R + 'static,
        R: IntoVariant,
        S: Fn(&mut T, V) + 'static,
        V: FromVariant,
    {
        self.getter(member, get)?.setter(member, set)
    }
}
