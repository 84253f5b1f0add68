//! Variable name to slot resolution.

use rustc_hash::FxHashMap;

/// Names of the script's variables and the slot each one occupies.
///
/// Scripts have a single flat scope, so slots are never reused.
#[derive(Debug, Default)]
pub struct SymbolTable {
    slots: FxHashMap<String, u32>,
    names: Vec<String>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot of `name`, declaring it if needed.
    pub fn declare(&mut self, name: &str) -> u32 {
        if let Some(&slot) = self.slots.get(name) {
            return slot;
        }
        let slot = self.names.len() as u32;
        self.slots.insert(name.to_string(), slot);
        self.names.push(name.to_string());
        slot
    }

    pub fn lookup(&self, name: &str) -> Option<u32> {
        self.slots.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Variable names indexed by slot.
    pub fn into_names(self) -> Vec<String> {
        self.names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declare_is_idempotent() {
        let mut symbols = SymbolTable::new();
        assert_eq!(symbols.declare("a"), 0);
        assert_eq!(symbols.declare("b"), 1);
        assert_eq!(symbols.declare("a"), 0);
        assert_eq!(symbols.len(), 2);
        assert_eq!(symbols.lookup("b"), Some(1));
        assert_eq!(symbols.lookup("c"), None);
        assert_eq!(symbols.into_names(), vec!["a", "b"]);
    }
}
