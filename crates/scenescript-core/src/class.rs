//! Script-visible class instances.
//!
//! A native type becomes constructible from scripts by implementing
//! [`NativeClass`]. Instances are stored behind a reference-counted
//! [`ClassRef`] that remembers the class name, so the dynamic type can be
//! checked before any downcast is attempted.

use std::any::Any;
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

use crate::error::ConversionError;

/// A native type exposed to scripts as a class.
///
/// `CLASS_NAME` is the name scripts use to construct the type and the
/// identity used for dynamic type checks.
pub trait NativeClass: Any + fmt::Display + fmt::Debug {
    /// Script-visible class name.
    const CLASS_NAME: &'static str;
}

/// Object-safe view of a [`NativeClass`].
pub trait ScriptObject: fmt::Display + fmt::Debug {
    /// Script-visible class name of the concrete type.
    fn class_name(&self) -> &'static str;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: NativeClass> ScriptObject for T {
    fn class_name(&self) -> &'static str {
        T::CLASS_NAME
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Shared handle to a class instance.
///
/// Cloning a `ClassRef` shares the instance; it is released when the last
/// handle is dropped. Equality is identity.
#[derive(Clone)]
pub struct ClassRef {
    class: &'static str,
    inner: Rc<RefCell<dyn ScriptObject>>,
}

impl ClassRef {
    /// Wrap a native value in a new instance.
    pub fn new<T: NativeClass>(value: T) -> Self {
        let inner: Rc<RefCell<dyn ScriptObject>> = Rc::new(RefCell::new(value));
        Self {
            class: T::CLASS_NAME,
            inner,
        }
    }

    /// The dynamic class name of this instance.
    #[inline]
    pub fn class_name(&self) -> &'static str {
        self.class
    }

    /// Returns `true` if this instance is a `T`.
    pub fn is<T: NativeClass>(&self) -> bool {
        self.class == T::CLASS_NAME
    }

    /// Borrow the instance as a `T`.
    ///
    /// Fails with [`ConversionError::ClassMismatch`] naming both classes when
    /// the dynamic type is not `T`.
    pub fn borrow<T: NativeClass>(&self) -> Result<Ref<'_, T>, ConversionError> {
        self.check::<T>()?;
        let cell = self.inner.try_borrow().map_err(|_| self.already_borrowed())?;
        Ref::filter_map(cell, |object| object.as_any().downcast_ref::<T>())
            .map_err(|_| self.mismatch::<T>())
    }

    /// Mutably borrow the instance as a `T`.
    pub fn borrow_mut<T: NativeClass>(&self) -> Result<RefMut<'_, T>, ConversionError> {
        self.check::<T>()?;
        let cell = self
            .inner
            .try_borrow_mut()
            .map_err(|_| self.already_borrowed())?;
        RefMut::filter_map(cell, |object| object.as_any_mut().downcast_mut::<T>())
            .map_err(|_| self.mismatch::<T>())
    }

    /// Returns `true` if both handles refer to the same instance.
    #[inline]
    pub fn ptr_eq(&self, other: &ClassRef) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Number of live handles to this instance.
    pub fn holders(&self) -> usize {
        Rc::strong_count(&self.inner)
    }

    fn check<T: NativeClass>(&self) -> Result<(), ConversionError> {
        if self.class == T::CLASS_NAME {
            Ok(())
        } else {
            Err(self.mismatch::<T>())
        }
    }

    fn mismatch<T: NativeClass>(&self) -> ConversionError {
        ConversionError::ClassMismatch {
            expected: T::CLASS_NAME.to_string(),
            actual: self.class.to_string(),
        }
    }

    fn already_borrowed(&self) -> ConversionError {
        ConversionError::AlreadyBorrowed {
            class: self.class.to_string(),
        }
    }
}

impl PartialEq for ClassRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Display for ClassRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_borrow() {
            Ok(object) => fmt::Display::fmt(&*object, f),
            Err(_) => write!(f, "<{} instance>", self.class),
        }
    }
}

impl fmt::Debug for ClassRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_borrow() {
            Ok(object) => f.debug_tuple("ClassRef").field(&*object).finish(),
            Err(_) => f.debug_tuple("ClassRef").field(&self.class).finish(),
        }
    }
}

/// A class instance already known to be a `T`.
///
/// Produced by argument conversion; borrowing cannot fail on the class check
/// again, only on a conflicting borrow.
pub struct ObjectRef<T: NativeClass> {
    inner: ClassRef,
    _marker: PhantomData<T>,
}

impl<T: NativeClass> ObjectRef<T> {
    /// Wrap a native value in a new instance.
    pub fn wrap(value: T) -> Self {
        Self {
            inner: ClassRef::new(value),
            _marker: PhantomData,
        }
    }

    /// Checked conversion from an untyped handle.
    pub fn new(inner: ClassRef) -> Result<Self, ConversionError> {
        inner.check::<T>()?;
        Ok(Self {
            inner,
            _marker: PhantomData,
        })
    }

    pub fn get(&self) -> Result<Ref<'_, T>, ConversionError> {
        self.inner.borrow::<T>()
    }

    pub fn get_mut(&self) -> Result<RefMut<'_, T>, ConversionError> {
        self.inner.borrow_mut::<T>()
    }

    /// The untyped handle.
    pub fn class_ref(&self) -> &ClassRef {
        &self.inner
    }

    pub fn into_class_ref(self) -> ClassRef {
        self.inner
    }
}

impl<T: NativeClass> Clone for ObjectRef<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: NativeClass> fmt::Debug for ObjectRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ObjectRef").field(&self.inner).finish()
    }
}
