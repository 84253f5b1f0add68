//! Constant pool for compiled programs.
//!
//! The constant pool stores the literal values referenced by `CONSTANT`
//! instructions. Identical literals share one entry.

use std::fmt;

use ordered_float::OrderedFloat;
use rustc_hash::FxHashMap;
use scenescript_core::Variant;

/// Values stored in the constant pool.
#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
    Number(f64),
    Bool(bool),
    String(String),
}

impl Constant {
    /// The runtime value of this constant.
    pub fn to_variant(&self) -> Variant {
        match self {
            Constant::Number(value) => Variant::Double(*value),
            Constant::Bool(value) => Variant::Bool(*value),
            Constant::String(value) => Variant::String(value.clone()),
        }
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constant::Number(value) => write!(f, "{}", value),
            Constant::Bool(value) => write!(f, "{}", value),
            Constant::String(value) => write!(f, "{:?}", value),
        }
    }
}

/// Key for constant deduplication (hashable version of Constant).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum ConstantKey {
    Number(OrderedFloat<f64>),
    Bool(bool),
    String(String),
}

/// Program-level constant pool with deduplication.
#[derive(Debug, Clone, Default)]
pub struct ConstantPool {
    constants: Vec<Constant>,
    index: FxHashMap<ConstantKey, u32>,
}

impl ConstantPool {
    /// Create a new empty constant pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or get existing constant, returns index.
    pub fn add(&mut self, constant: Constant) -> u32 {
        let key = match &constant {
            Constant::Number(value) => ConstantKey::Number(OrderedFloat(*value)),
            Constant::Bool(value) => ConstantKey::Bool(*value),
            Constant::String(value) => ConstantKey::String(value.clone()),
        };

        if let Some(&index) = self.index.get(&key) {
            return index;
        }

        let index = self.constants.len() as u32;
        self.constants.push(constant);
        self.index.insert(key, index);
        index
    }

    pub fn add_number(&mut self, value: f64) -> u32 {
        self.add(Constant::Number(value))
    }

    pub fn add_bool(&mut self, value: bool) -> u32 {
        self.add(Constant::Bool(value))
    }

    pub fn add_string(&mut self, value: &str) -> u32 {
        self.add(Constant::String(value.to_string()))
    }

    /// Get constant by index.
    pub fn get(&self, index: u32) -> Option<&Constant> {
        self.constants.get(index as usize)
    }

    pub fn constants(&self) -> &[Constant] {
        &self.constants
    }

    pub fn len(&self) -> usize {
        self.constants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constants.is_empty()
    }
}
