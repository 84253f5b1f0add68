//! Unified error types for scenescript.
//!
//! One error type per processing phase, plus a top-level wrapper:
//!
//! ```text
//! ScriptError (top-level wrapper)
//! ├── RegistrationError - function / meta-class registration
//! ├── CompilationError  - call resolution and declaration checks
//! └── RuntimeError      - stack machine execution
//!
//! LexError / ParseError - recorded as diagnostics, never returned to callers
//! MangleError           - malformed mangled names
//! NativeError           - failures inside native adapters
//! ConversionError       - Variant <-> native type conversion
//! StackError            - fixed-capacity stack misuse
//! ```

use thiserror::Error;

use crate::Location;

// ============================================================================
// Lexer Errors
// ============================================================================

/// Errors that occur during tokenization.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    /// A character that cannot start any token.
    #[error("unexpected character '{ch}'")]
    UnexpectedChar { ch: char, location: Location },

    /// A string literal reached the end of the line or input before its closing quote.
    #[error("unterminated string literal")]
    UnterminatedString { location: Location },

    /// An unknown escape sequence inside a string literal.
    #[error("invalid escape sequence '\\{ch}'")]
    InvalidEscape { ch: char, location: Location },

    /// A numeric literal that could not be converted.
    #[error("invalid number '{text}'")]
    InvalidNumber { text: String, location: Location },
}

impl LexError {
    /// Diagnostic code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            LexError::UnexpectedChar { .. } => "L001",
            LexError::UnterminatedString { .. } => "L002",
            LexError::InvalidEscape { .. } => "L003",
            LexError::InvalidNumber { .. } => "L004",
        }
    }

    /// Where this error occurred.
    pub fn location(&self) -> Location {
        match self {
            LexError::UnexpectedChar { location, .. }
            | LexError::UnterminatedString { location }
            | LexError::InvalidEscape { location, .. }
            | LexError::InvalidNumber { location, .. } => *location,
        }
    }
}

// ============================================================================
// Parse Errors
// ============================================================================

/// Categories of parse errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// A specific token was expected but not found.
    ExpectedToken,
    /// An unexpected token was encountered.
    UnexpectedToken,
    /// Unexpected end of input.
    UnexpectedEof,
    /// An expression was expected.
    ExpectedExpression,
    /// An identifier was expected.
    ExpectedIdentifier,
    /// The left side of `=` cannot be assigned to.
    InvalidAssignmentTarget,
    /// An `if` or `while` block is missing its closing `end`.
    UnterminatedBlock,
    /// The offending token was produced by the lexer as an error token.
    /// The lexer has already reported it.
    Lexical,
}

impl ParseErrorKind {
    /// Diagnostic code for this kind.
    pub fn code(&self) -> &'static str {
        match self {
            ParseErrorKind::ExpectedToken => "P001",
            ParseErrorKind::UnexpectedToken => "P002",
            ParseErrorKind::UnexpectedEof => "P003",
            ParseErrorKind::ExpectedExpression => "P004",
            ParseErrorKind::ExpectedIdentifier => "P005",
            ParseErrorKind::InvalidAssignmentTarget => "P006",
            ParseErrorKind::UnterminatedBlock => "P007",
            ParseErrorKind::Lexical => "P000",
        }
    }

    /// Returns a human-readable name for this error kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseErrorKind::ExpectedToken => "expected token",
            ParseErrorKind::UnexpectedToken => "unexpected token",
            ParseErrorKind::UnexpectedEof => "unexpected end of input",
            ParseErrorKind::ExpectedExpression => "expected expression",
            ParseErrorKind::ExpectedIdentifier => "expected identifier",
            ParseErrorKind::InvalidAssignmentTarget => "invalid assignment target",
            ParseErrorKind::UnterminatedBlock => "unterminated block",
            ParseErrorKind::Lexical => "invalid token",
        }
    }
}

impl std::fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parse error with location.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind} at {location}: {message}")]
pub struct ParseError {
    /// The category of error.
    pub kind: ParseErrorKind,
    /// Where the error occurred.
    pub location: Location,
    /// Detail message.
    pub message: String,
}

impl ParseError {
    /// Create a new parse error.
    pub fn new(kind: ParseErrorKind, location: Location, message: impl Into<String>) -> Self {
        Self {
            kind,
            location,
            message: message.into(),
        }
    }

    /// A specific token was expected.
    pub fn expected_token(location: Location, expected: &str, found: &str) -> Self {
        Self::new(
            ParseErrorKind::ExpectedToken,
            location,
            format!("expected {}, found {}", expected, found),
        )
    }

    /// An unexpected token was found.
    pub fn unexpected_token(location: Location, token: &str) -> Self {
        Self::new(
            ParseErrorKind::UnexpectedToken,
            location,
            format!("unexpected {}", token),
        )
    }

    /// The input ended too early.
    pub fn unexpected_eof(location: Location, expected: &str) -> Self {
        Self::new(
            ParseErrorKind::UnexpectedEof,
            location,
            format!("unexpected end of input, expected {}", expected),
        )
    }

    /// An expression was expected.
    pub fn expected_expression(location: Location, found: &str) -> Self {
        Self::new(
            ParseErrorKind::ExpectedExpression,
            location,
            format!("expected expression, found {}", found),
        )
    }

    /// An identifier was expected.
    pub fn expected_identifier(location: Location, found: &str) -> Self {
        Self::new(
            ParseErrorKind::ExpectedIdentifier,
            location,
            format!("expected identifier, found {}", found),
        )
    }

    /// Diagnostic code for this error.
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }
}

// ============================================================================
// Mangling Errors
// ============================================================================

/// Errors produced by the name mangler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MangleError {
    /// An empty base name cannot be mangled.
    #[error("cannot mangle an empty name")]
    EmptyName,

    /// A name starting with a digit would make the length field ambiguous.
    #[error("cannot mangle '{name}': names must not start with a digit")]
    LeadingDigit { name: String },

    /// The input does not start with the mangling prefix.
    #[error("'{input}' is not a mangled name: missing '_SR' prefix")]
    InvalidPrefix { input: String },

    /// The length field is missing or not numeric.
    #[error("'{input}' is not a mangled name: length field is not numeric")]
    InvalidLength { input: String },

    /// The length field claims more characters than remain.
    #[error("'{input}' is not a mangled name: length {expected} exceeds the {available} remaining characters")]
    LengthMismatch {
        input: String,
        expected: usize,
        available: usize,
    },

    /// The arity trailer was started but has no digits.
    #[error("'{input}' is not a mangled name: truncated arity trailer")]
    TruncatedTrailer { input: String },

    /// Characters after the name are not a valid arity trailer.
    #[error("'{input}' is not a mangled name: malformed arity trailer")]
    InvalidTrailer { input: String },
}

// ============================================================================
// Registration Errors
// ============================================================================

/// Errors raised while registering native functions and classes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// The function name could not be mangled.
    #[error(transparent)]
    Mangle(#[from] MangleError),

    /// A function with the same mangled name already exists.
    #[error("function '{name}' is already registered")]
    DuplicateFunction { name: String },

    /// A variadic adapter was passed where a fixed-arity one was required, or vice versa.
    #[error("function '{name}': expected a {expected} adapter")]
    WrongArityKind { name: String, expected: &'static str },
}

// ============================================================================
// Conversion & Native Errors
// ============================================================================

/// Conversion failures between [`Variant`](crate::Variant) and native types.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// The variant holds a different kind of value.
    #[error("expected {expected}, found {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// A number was required to be integral.
    #[error("expected an integer, found {value}")]
    NotAnInteger { value: f64 },

    /// A class instance of a different dynamic type was supplied.
    #[error("expected instance of '{expected}', found instance of '{actual}'")]
    ClassMismatch { expected: String, actual: String },

    /// The class instance is already mutably borrowed.
    #[error("instance of '{class}' is already in use")]
    AlreadyBorrowed { class: String },
}

/// Errors returned by native adapters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NativeError {
    /// The number of arguments does not match the adapter's arity.
    #[error("expected {expected} argument(s), got {actual}")]
    ArgumentCount { expected: usize, actual: usize },

    /// An argument could not be converted to the parameter type.
    #[error("argument {index}: {source}")]
    Argument {
        index: usize,
        #[source]
        source: ConversionError,
    },

    /// A conversion failure outside argument extraction.
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// A format string did not match its arguments.
    #[error("format error: {0}")]
    Format(String),

    /// The output sink rejected a write.
    #[error("failed to write output")]
    Output,

    /// Any other failure raised by a native function.
    #[error("{0}")]
    Failed(String),
}

impl NativeError {
    /// Create a free-form native error.
    pub fn failed(message: impl Into<String>) -> Self {
        NativeError::Failed(message.into())
    }
}

impl From<std::fmt::Error> for NativeError {
    fn from(_: std::fmt::Error) -> Self {
        NativeError::Output
    }
}

// ============================================================================
// Compilation Errors
// ============================================================================

/// Errors raised while lowering the AST to bytecode.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompilationError {
    /// No function with this name accepts this many arguments.
    #[error("at {location}: unknown function '{name}' taking {arity} argument(s)")]
    UnknownFunction {
        name: String,
        arity: usize,
        location: Location,
    },

    /// No class with this name has a constructor taking this many arguments.
    #[error("at {location}: unknown constructor '{class}' taking {arity} argument(s)")]
    UnknownConstructor {
        class: String,
        arity: usize,
        location: Location,
    },

    /// No registered class has a method with this name and arity.
    #[error("at {location}: no class has a method '{method}' taking {arity} argument(s)")]
    UnknownMethod {
        method: String,
        arity: usize,
        location: Location,
    },

    /// A variable is read before any statement assigns it.
    #[error("at {location}: variable '{name}' is used before it is assigned")]
    UndeclaredVariable { name: String, location: Location },

    /// A name could not be mangled.
    #[error("at {location}: {source}")]
    InvalidName {
        #[source]
        source: MangleError,
        location: Location,
    },
}

impl CompilationError {
    /// Where the error occurred.
    pub fn location(&self) -> Location {
        match self {
            CompilationError::UnknownFunction { location, .. }
            | CompilationError::UnknownConstructor { location, .. }
            | CompilationError::UnknownMethod { location, .. }
            | CompilationError::UndeclaredVariable { location, .. }
            | CompilationError::InvalidName { location, .. } => *location,
        }
    }
}

// ============================================================================
// Stack Errors
// ============================================================================

/// Misuse of a fixed-capacity [`Stack`](crate::Stack).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StackError {
    /// Push onto a full stack.
    #[error("stack overflow (capacity {capacity})")]
    Overflow { capacity: usize },

    /// Pop or peek on an empty stack.
    #[error("stack underflow")]
    Underflow,

    /// Peek deeper than the number of elements.
    #[error("stack depth {depth} out of range for {count} element(s)")]
    OutOfRange { depth: usize, count: usize },
}

// ============================================================================
// Runtime Errors
// ============================================================================

/// What went wrong while executing a program.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeErrorKind {
    /// The operand stack is full.
    #[error("operand stack overflow (capacity {capacity})")]
    StackOverflow { capacity: usize },

    /// An instruction needed more operands than the stack holds.
    #[error("operand stack underflow")]
    StackUnderflow,

    /// A variable was read before being assigned.
    #[error("variable '{name}' is not set")]
    UnsetVariable { name: String },

    /// A slot index outside the slot table.
    #[error("invalid variable slot {slot}")]
    InvalidSlot { slot: usize },

    /// A constant index outside the constant pool.
    #[error("invalid constant index {index}")]
    InvalidConstant { index: usize },

    /// A jump to an instruction that does not exist.
    #[error("jump target {target} is outside the program (length {len})")]
    InvalidJump { target: usize, len: usize },

    /// A method index outside the program's method table.
    #[error("invalid method index {index}")]
    InvalidMethodIndex { index: usize },

    /// An instruction executed where it has no meaning.
    #[error("instruction {name} is not valid here")]
    InvalidInstruction { name: &'static str },

    /// A function handle that the registry does not know.
    #[error("invalid function handle {handle}")]
    InvalidFunctionHandle { handle: usize },

    /// A binary operator applied to incompatible operands.
    #[error("cannot apply '{operation}' to {left} and {right}")]
    TypeMismatch {
        operation: &'static str,
        left: String,
        right: String,
    },

    /// A unary operator applied to an incompatible operand.
    #[error("cannot apply '{operation}' to {operand}")]
    UnaryTypeMismatch {
        operation: &'static str,
        operand: String,
    },

    /// An `if` or `while` condition that is not a boolean.
    #[error("condition must be a bool, found {actual}")]
    ConditionNotBool { actual: String },

    /// A method was called on a value that is not a class instance.
    #[error("cannot call method '{method}' on {actual}")]
    NotAnObject { method: String, actual: String },

    /// The receiver's class has no such method.
    #[error("class '{class}' has no method '{method}' taking {arity} argument(s)")]
    NoSuchMethod {
        class: String,
        method: String,
        arity: usize,
    },

    /// The method exists, but only on one other class.
    #[error("method '{method}' expects an instance of '{expected}', found instance of '{actual}'")]
    WrongReceiver {
        method: String,
        expected: String,
        actual: String,
    },

    /// A native function failed.
    #[error("in '{function}': {source}")]
    Native {
        function: String,
        #[source]
        source: NativeError,
    },
}

impl From<StackError> for RuntimeErrorKind {
    fn from(error: StackError) -> Self {
        match error {
            StackError::Overflow { capacity } => RuntimeErrorKind::StackOverflow { capacity },
            StackError::Underflow | StackError::OutOfRange { .. } => {
                RuntimeErrorKind::StackUnderflow
            }
        }
    }
}

/// A runtime failure together with the source line of the failing instruction.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("runtime error at line {line}: {kind}")]
pub struct RuntimeError {
    /// What went wrong.
    pub kind: RuntimeErrorKind,
    /// Source line of the instruction that failed (0 if unknown).
    pub line: u32,
}

impl RuntimeError {
    /// Create a runtime error.
    pub fn new(kind: RuntimeErrorKind, line: u32) -> Self {
        Self { kind, line }
    }
}

// ============================================================================
// Top-level error
// ============================================================================

/// Any failure while processing a script from source to result.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The script has lexical or syntax errors; details are in the diagnostics.
    #[error("script has {errors} syntax error(s)")]
    Syntax { errors: usize },

    /// The script has warnings and warnings are treated as errors.
    #[error("script has {warnings} warning(s) and warnings are treated as errors")]
    Warnings { warnings: usize },

    /// Registration failed.
    #[error(transparent)]
    Registration(#[from] RegistrationError),

    /// Compilation failed.
    #[error(transparent)]
    Compilation(#[from] CompilationError),

    /// Execution failed.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    /// Reading the script failed.
    #[error("failed to read script: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for top-level script processing.
pub type ScriptResult<T> = Result<T, ScriptError>;
