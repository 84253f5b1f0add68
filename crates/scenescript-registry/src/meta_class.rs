//! Meta-classes: registration descriptors for native types.
//!
//! Each native type exposed to scripts provides one [`MetaClass`]. Adding
//! it to a [`MetaClassRegistry`] runs its `init` routine once, which
//! registers the type's constructor, methods and accessors in the
//! [`FunctionRegistry`]. Meta-classes are immutable after registration and
//! are looked up by name; instances never point back at them.

use std::fmt;
use std::rc::Rc;

use log::{debug, warn};
use rustc_hash::FxHashMap;
use scenescript_core::RegistrationError;

use crate::function_registry::FunctionRegistry;

/// Registration descriptor of a native type.
pub trait MetaClass {
    /// Script-visible class name.
    fn name(&self) -> &str;

    /// Register the class's functions.
    fn init(&self, registry: &mut FunctionRegistry) -> Result<(), RegistrationError>;
}

/// Set of registered meta-classes, keyed by name.
#[derive(Default)]
pub struct MetaClassRegistry {
    classes: FxHashMap<String, Rc<dyn MetaClass>>,
    order: Vec<String>,
}

impl MetaClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `meta_class` and run its `init` against `functions`.
    ///
    /// Returns `Ok(false)` without touching either registry when a class
    /// with the same name is already registered. If `init` fails, the
    /// functions it registered are removed again and the error is returned.
    pub fn add_meta_class<M: MetaClass + 'static>(
        &mut self,
        meta_class: M,
        functions: &mut FunctionRegistry,
    ) -> Result<bool, RegistrationError> {
        let name = meta_class.name().to_string();
        if self.classes.contains_key(&name) {
            warn!("meta-class '{}' is already registered; ignoring", name);
            return Ok(false);
        }

        let mark = functions.len();
        if let Err(error) = meta_class.init(functions) {
            functions.truncate(mark);
            return Err(error);
        }

        debug!(
            "registered meta-class '{}' with {} function(s)",
            name,
            functions.len() - mark
        );
        self.order.push(name.clone());
        self.classes.insert(name, Rc::new(meta_class));
        Ok(true)
    }

    pub fn get(&self, name: &str) -> Option<&dyn MetaClass> {
        self.classes.get(name).map(|class| class.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// Class names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl fmt::Debug for MetaClassRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetaClassRegistry")
            .field("classes", &self.order)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use scenescript_core::NativeError;

    use super::*;

    struct Counter {
        name: &'static str,
        inits: Rc<Cell<usize>>,
    }

    fn counter(name: &'static str) -> (Counter, Rc<Cell<usize>>) {
        let inits = Rc::new(Cell::new(0));
        (
            Counter {
                name,
                inits: Rc::clone(&inits),
            },
            inits,
        )
    }

    impl MetaClass for Counter {
        fn name(&self) -> &str {
            self.name
        }

        fn init(&self, registry: &mut FunctionRegistry) -> Result<(), RegistrationError> {
            self.inits.set(self.inits.get() + 1);
            registry.add_function(&format!("{}_constructor", self.name), zero)?;
            Ok(())
        }
    }

    struct Broken;

    impl MetaClass for Broken {
        fn name(&self) -> &str {
            "Broken"
        }

        fn init(&self, registry: &mut FunctionRegistry) -> Result<(), RegistrationError> {
            registry.add_function("Broken_constructor", zero)?;
            registry.add_function("Broken_constructor", zero)?;
            Ok(())
        }
    }

    fn zero() -> Result<f64, NativeError> {
        Ok(0.0)
    }

    #[test]
    fn init_runs_once() {
        let mut functions = FunctionRegistry::new();
        let mut classes = MetaClassRegistry::new();
        let (meta, inits) = counter("Lamp");

        assert_eq!(classes.add_meta_class(meta, &mut functions), Ok(true));
        assert_eq!(inits.get(), 1);
        assert!(classes.contains("Lamp"));
        assert_eq!(classes.get("Lamp").map(|c| c.name()), Some("Lamp"));
        assert!(functions.resolve("Lamp_constructor", 0).unwrap().is_some());
    }

    #[test]
    fn duplicate_name_leaves_registries_unchanged() {
        let mut functions = FunctionRegistry::new();
        let mut classes = MetaClassRegistry::new();
        let (first, _) = counter("Lamp");
        let (second, second_inits) = counter("Lamp");

        assert_eq!(classes.add_meta_class(first, &mut functions), Ok(true));
        let before = functions.len();
        assert_eq!(classes.add_meta_class(second, &mut functions), Ok(false));
        assert_eq!(second_inits.get(), 0);
        assert_eq!(functions.len(), before);
        assert_eq!(classes.len(), 1);
    }

    #[test]
    fn failed_init_is_rolled_back() {
        let mut functions = FunctionRegistry::new();
        let mut classes = MetaClassRegistry::new();

        let error = classes.add_meta_class(Broken, &mut functions).unwrap_err();
        assert!(matches!(error, RegistrationError::DuplicateFunction { .. }));
        assert!(functions.is_empty());
        assert!(!classes.contains("Broken"));
    }

    #[test]
    fn names_in_registration_order() {
        let mut functions = FunctionRegistry::new();
        let mut classes = MetaClassRegistry::new();
        classes.add_meta_class(counter("B").0, &mut functions).unwrap();
        classes.add_meta_class(counter("A").0, &mut functions).unwrap();
        assert_eq!(classes.names().collect::<Vec<_>>(), vec!["B", "A"]);
    }
}
