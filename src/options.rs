//! Engine configuration.

use scenescript_compiler::CompilerOptions;

/// Settings for an [`Engine`](crate::Engine).
///
/// ```
/// use scenescript::EngineOptions;
///
/// let options = EngineOptions::new()
///     .with_strict_declarations(true)
///     .with_warnings_as_errors(true);
/// assert!(options.load_default_modules);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOptions {
    /// Refuse to run scripts that produced warnings.
    pub warnings_as_errors: bool,
    /// Reject reads of variables that no earlier statement assigns.
    pub strict_declarations: bool,
    /// Also write script output to stdout.
    pub echo_output: bool,
    /// Install the built-in functions and classes on creation.
    pub load_default_modules: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            warnings_as_errors: false,
            strict_declarations: false,
            echo_output: false,
            load_default_modules: true,
        }
    }
}

impl EngineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_warnings_as_errors(mut self, enabled: bool) -> Self {
        self.warnings_as_errors = enabled;
        self
    }

    pub fn with_strict_declarations(mut self, enabled: bool) -> Self {
        self.strict_declarations = enabled;
        self
    }

    pub fn with_echo_output(mut self, enabled: bool) -> Self {
        self.echo_output = enabled;
        self
    }

    pub fn with_default_modules(mut self, enabled: bool) -> Self {
        self.load_default_modules = enabled;
        self
    }

    pub(crate) fn compiler_options(&self) -> CompilerOptions {
        CompilerOptions::new().with_strict_declarations(self.strict_declarations)
    }
}
