//! The compiling visitor.
//!
//! [`ScriptCompiler`] walks a script's statements once, in order, and
//! drives the [`BytecodeEmitter`]. Expression and statement lowering live
//! in the [`expr`](crate::expr) and [`stmt`](crate::stmt) modules as free
//! functions taking the compiler.

use log::debug;
use rustc_hash::FxHashMap;
use scenescript_core::{CompilationError, Location};
use scenescript_parser::Script;
use scenescript_registry::{FunctionHandle, FunctionRegistry};

use crate::CompilerOptions;
use crate::bytecode::{MethodTable, Program};
use crate::emit::BytecodeEmitter;
use crate::stmt;
use crate::symbol_table::SymbolTable;

pub(crate) type Result<T> = std::result::Result<T, CompilationError>;

/// Compiles one script against a function registry.
pub struct ScriptCompiler<'a> {
    registry: &'a FunctionRegistry,
    options: &'a CompilerOptions,
    emitter: BytecodeEmitter,
    symbols: SymbolTable,
    methods: FxHashMap<(String, usize), u32>,
    method_tables: Vec<MethodTable>,
}

impl<'a> ScriptCompiler<'a> {
    pub fn new(registry: &'a FunctionRegistry, options: &'a CompilerOptions) -> Self {
        Self {
            registry,
            options,
            emitter: BytecodeEmitter::new(),
            symbols: SymbolTable::new(),
            methods: FxHashMap::default(),
            method_tables: Vec::new(),
        }
    }

    /// Compile every statement of `script` into a program.
    ///
    /// All statements are stack-neutral except a final expression
    /// statement, whose value is left on the stack as the run result.
    pub fn compile(mut self, script: &Script<'_>) -> Result<Program> {
        let statements = script.statements();
        for (index, statement) in statements.iter().enumerate() {
            let is_result = index + 1 == statements.len();
            stmt::compile_stmt(&mut self, statement, is_result)?;
        }

        let program = self
            .emitter
            .finish(self.symbols.into_names(), self.method_tables);
        debug!(
            "compiled {} statement(s) to {} instruction(s), {} constant(s), {} slot(s)",
            statements.len(),
            program.len(),
            program.constants().len(),
            program.slot_count()
        );
        Ok(program)
    }

    // ==========================================================================
    // Accessors
    // ==========================================================================

    pub(crate) fn emitter(&mut self) -> &mut BytecodeEmitter {
        &mut self.emitter
    }

    pub(crate) fn symbols(&mut self) -> &mut SymbolTable {
        &mut self.symbols
    }

    pub(crate) fn registry(&self) -> &'a FunctionRegistry {
        self.registry
    }

    pub(crate) fn options(&self) -> &CompilerOptions {
        self.options
    }

    // ==========================================================================
    // Resolution
    // ==========================================================================

    /// Resolve a free function or constructor call.
    ///
    /// Returns `Ok(None)` when no registration accepts `argc` arguments.
    pub(crate) fn resolve_function(
        &self,
        name: &str,
        argc: usize,
        location: Location,
    ) -> Result<Option<FunctionHandle>> {
        self.registry
            .resolve(name, argc)
            .map_err(|source| CompilationError::InvalidName { source, location })
    }

    /// Index of the dispatch table for `method` taking `argc` arguments,
    /// built from every class that implements it.
    pub(crate) fn intern_method(&mut self, method: &str, argc: usize) -> u32 {
        let key = (method.to_string(), argc);
        if let Some(&index) = self.methods.get(&key) {
            return index;
        }

        let mut table = MethodTable::new(method, argc);
        for (class, handle) in self.registry.method_implementations(method, argc) {
            table.insert(class.as_str(), *handle);
        }
        let index = self.method_tables.len() as u32;
        self.methods.insert(key, index);
        self.method_tables.push(table);
        index
    }
}
