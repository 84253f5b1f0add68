//! Method dispatch tables.

use rustc_hash::FxHashMap;
use scenescript_registry::FunctionHandle;

/// Implementations of one method name and argument count, keyed by the
/// receiver's class.
///
/// Built at compile time from the registry, so `CALL_METHOD` resolves to a
/// handle with a single lookup on the receiver's class name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodTable {
    name: String,
    argc: usize,
    classes: FxHashMap<String, FunctionHandle>,
}

impl MethodTable {
    pub fn new(name: impl Into<String>, argc: usize) -> Self {
        Self {
            name: name.into(),
            argc,
            classes: FxHashMap::default(),
        }
    }

    pub fn insert(&mut self, class: impl Into<String>, handle: FunctionHandle) {
        self.classes.insert(class.into(), handle);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Script-visible argument count, receiver excluded.
    pub fn argc(&self) -> usize {
        self.argc
    }

    #[inline]
    pub fn handle_for(&self, class: &str) -> Option<FunctionHandle> {
        self.classes.get(class).copied()
    }

    /// The implementing class when there is exactly one.
    pub fn sole_class(&self) -> Option<&str> {
        match self.classes.len() {
            1 => self.classes.keys().next().map(String::as_str),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
