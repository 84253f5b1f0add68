//! The scripting engine facade.
//!
//! An [`Engine`] owns one processing session: the function and meta-class
//! registries, the diagnostics of the last parse, and the output buffer
//! that `print`/`println` write to. Registration happens first; after that
//! scripts can be executed any number of times.

use std::fmt;
use std::io::{self, Read, Write as _};

use bumpalo::Bump;
use log::{debug, info};
use scenescript_compiler::{Program, compile};
use scenescript_core::{Diagnostics, NativeError, RegistrationError, ScriptError, ScriptResult, Variant};
use scenescript_parser::{Parser, Script};
use scenescript_registry::{
    CallContext, FunctionHandle, FunctionRegistry, IntoNativeFunction, MetaClass, MetaClassRegistry,
};

use crate::options::EngineOptions;
use crate::vm::Machine;

/// Parses, compiles and runs scripts.
///
/// ```
/// use scenescript::Engine;
///
/// let mut engine = Engine::new()?;
/// let result = engine.execute("x = 2\nprintln('x = {}', x)\nx * 21")?;
/// assert_eq!(result.as_double(), Some(42.0));
/// assert_eq!(engine.output(), "x = 2\n");
/// # Ok::<(), scenescript::ScriptError>(())
/// ```
pub struct Engine {
    options: EngineOptions,
    functions: FunctionRegistry,
    classes: MetaClassRegistry,
    diagnostics: Diagnostics,
    output: String,
}

impl Engine {
    /// Create an engine with default options and the built-in modules.
    pub fn new() -> ScriptResult<Self> {
        Self::with_options(EngineOptions::default())
    }

    pub fn with_options(options: EngineOptions) -> ScriptResult<Self> {
        let mut engine = Self {
            options,
            functions: FunctionRegistry::new(),
            classes: MetaClassRegistry::new(),
            diagnostics: Diagnostics::new(),
            output: String::new(),
        };
        if engine.options.load_default_modules {
            scenescript_modules::install(&mut engine.functions, &mut engine.classes)?;
        }
        Ok(engine)
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    // ==========================================================================
    // Registration
    // ==========================================================================

    /// Register a fixed-arity native function.
    pub fn register_function<Args>(
        &mut self,
        name: &str,
        function: impl IntoNativeFunction<Args>,
    ) -> Result<FunctionHandle, RegistrationError> {
        self.functions.add_function(name, function)
    }

    /// Register a native function taking any number of arguments.
    pub fn register_variadic_function<F>(
        &mut self,
        name: &str,
        function: F,
    ) -> Result<FunctionHandle, RegistrationError>
    where
        F: Fn(&mut CallContext<'_>) -> Result<Variant, NativeError> + 'static,
    {
        self.functions.add_variadic_function(name, function)
    }

    /// Register a native class.
    ///
    /// Returns `Ok(false)` if a class with the same name already exists.
    pub fn register_meta_class<M: MetaClass + 'static>(
        &mut self,
        meta_class: M,
    ) -> Result<bool, RegistrationError> {
        self.classes.add_meta_class(meta_class, &mut self.functions)
    }

    pub fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    pub fn classes(&self) -> &MetaClassRegistry {
        &self.classes
    }

    // ==========================================================================
    // Pipeline
    // ==========================================================================

    /// Parse `source` into `arena`.
    ///
    /// Replaces the engine's diagnostics. Fails if the script has errors,
    /// or warnings while warnings are treated as errors.
    pub fn parse<'ast>(&mut self, source: &str, arena: &'ast Bump) -> ScriptResult<Script<'ast>> {
        self.diagnostics.reset();
        let script = Parser::parse(source, arena, &mut self.diagnostics);
        self.check_diagnostics()?;
        Ok(script)
    }

    /// Compile a parsed script against the registered functions.
    pub fn compile(&self, script: &Script<'_>) -> ScriptResult<Program> {
        let program = compile(script, &self.functions, &self.options.compiler_options())?;
        Ok(program)
    }

    /// Run a compiled program, appending its printed output to
    /// [`output`](Self::output).
    pub fn run(&mut self, program: &Program) -> ScriptResult<Variant> {
        let mut sink = OutputSink {
            buffer: &mut self.output,
            echo: self.options.echo_output,
        };
        let result = Machine::new(program, &self.functions).run(&mut sink)?;
        debug!("script finished with {}", result.type_name());
        Ok(result)
    }

    /// Parse, compile and run `source`.
    pub fn execute(&mut self, source: &str) -> ScriptResult<Variant> {
        let arena = Bump::new();
        let script = self.parse(source, &arena)?;
        let program = self.compile(&script)?;
        self.run(&program)
    }

    /// Read a script to the end and execute it.
    pub fn execute_reader<R: Read>(&mut self, mut reader: R) -> ScriptResult<Variant> {
        let mut source = String::new();
        reader.read_to_string(&mut source)?;
        self.execute(&source)
    }

    // ==========================================================================
    // Output and diagnostics
    // ==========================================================================

    /// Everything printed since creation or the last [`take_output`](Self::take_output).
    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }

    /// Diagnostics of the most recent parse.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn has_diagnostic_output(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// The diagnostics rendered one per line.
    pub fn diagnostic_output(&self) -> String {
        self.diagnostics.render()
    }

    fn check_diagnostics(&self) -> ScriptResult<()> {
        if self.diagnostics.has_errors() {
            info!(
                "script not executed: {} error(s)",
                self.diagnostics.error_count()
            );
            return Err(ScriptError::Syntax {
                errors: self.diagnostics.error_count(),
            });
        }
        if self.options.warnings_as_errors && self.diagnostics.has_warnings() {
            info!(
                "script not executed: {} warning(s) treated as errors",
                self.diagnostics.warning_count()
            );
            return Err(ScriptError::Warnings {
                warnings: self.diagnostics.warning_count(),
            });
        }
        Ok(())
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("options", &self.options)
            .field("functions", &self.functions)
            .field("classes", &self.classes)
            .field("diagnostics", &self.diagnostics.len())
            .finish()
    }
}

/// Output target handed to native functions during a run.
struct OutputSink<'a> {
    buffer: &'a mut String,
    echo: bool,
}

impl fmt::Write for OutputSink<'_> {
    fn write_str(&mut self, text: &str) -> fmt::Result {
        self.buffer.push_str(text);
        if self.echo {
            io::stdout().write_all(text.as_bytes()).map_err(|_| fmt::Error)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> Engine {
        let _ = env_logger::builder().is_test(true).try_init();
        Engine::new().unwrap()
    }

    #[test]
    fn final_expression_is_the_result() {
        let mut engine = engine();
        assert_eq!(engine.execute("x = 1\nx").unwrap(), Variant::from(1.0));
        assert!(engine.execute("x = 1").unwrap().is_unset());
    }

    #[test]
    fn output_accumulates_until_taken() {
        let mut engine = engine();
        engine.execute("print('a')").unwrap();
        engine.execute("println('b{}', 1)").unwrap();
        assert_eq!(engine.take_output(), "ab1\n");
        assert_eq!(engine.output(), "");
    }

    #[test]
    fn syntax_errors_block_execution() {
        let mut engine = engine();
        let error = engine.execute("z = 1\nprint('z = {}', z").unwrap_err();
        assert!(matches!(error, ScriptError::Syntax { errors } if errors >= 1));
        assert_eq!(engine.output(), "");
        assert!(engine.has_diagnostic_output());
        assert!(engine.diagnostic_output().contains("ERROR"));
    }

    #[test]
    fn warnings_only_block_when_configured() {
        let mut engine = engine();
        assert!(engine.execute("x = 1;;").is_ok());
        assert!(engine.diagnostics().has_warnings());

        let mut strict = Engine::with_options(EngineOptions::new().with_warnings_as_errors(true)).unwrap();
        let error = strict.execute("x = 1;;").unwrap_err();
        assert!(matches!(error, ScriptError::Warnings { .. }));
    }

    #[test]
    fn diagnostics_are_replaced_by_each_parse() {
        let mut engine = engine();
        let _ = engine.execute("(");
        assert!(engine.has_diagnostic_output());
        engine.execute("1").unwrap();
        assert!(!engine.has_diagnostic_output());
    }

    #[test]
    fn without_default_modules() {
        let mut engine = Engine::with_options(EngineOptions::new().with_default_modules(false)).unwrap();
        assert!(engine.classes().is_empty());
        let error = engine.execute("println('hi')").unwrap_err();
        assert!(matches!(error, ScriptError::Compilation(_)));
    }

    #[test]
    fn custom_functions() {
        fn twice(x: f64) -> Result<f64, NativeError> {
            Ok(x * 2.0)
        }

        let mut engine = engine();
        engine.register_function("twice", twice).unwrap();
        engine
            .register_variadic_function("count", |ctx: &mut CallContext<'_>| {
                Ok(Variant::from(ctx.arg_count() as f64))
            })
            .unwrap();
        assert_eq!(engine.execute("twice(count(1, 2, 3))").unwrap(), Variant::from(6.0));
    }

    #[test]
    fn execute_reader() {
        let mut engine = engine();
        let source = "a = 2\nb = 3\na * b";
        assert_eq!(engine.execute_reader(source.as_bytes()).unwrap(), Variant::from(6.0));
    }
}
