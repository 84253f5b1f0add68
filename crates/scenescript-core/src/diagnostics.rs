//! Diagnostic collection shared by every processing stage.
//!
//! The lexer, parser and compiler report problems here instead of aborting,
//! so a single pass over a script can surface every problem it contains.

use std::fmt;

use crate::Location;

/// The severity level of a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DiagnosticLevel {
    /// No severity. Never blocks execution and is rendered as `NONE`.
    None,
    /// A potential problem that does not block execution.
    Warning,
    /// A problem that prevents the script from being executed.
    Error,
}

impl DiagnosticLevel {
    /// The upper-case label used when rendering.
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticLevel::None => "NONE",
            DiagnosticLevel::Warning => "WARNING",
            DiagnosticLevel::Error => "ERROR",
        }
    }
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single diagnostic message.
///
/// Rendered as `<LEVEL> [<code>]: <text> [<line>:<column>]`.
///
/// # Examples
///
/// ```
/// use scenescript_core::{DiagnosticLevel, DiagnosticMessage, Location};
///
/// let message = DiagnosticMessage::new(
///     DiagnosticLevel::Error,
///     "P001",
///     "expected ')'",
///     Location::new(3, 14),
/// );
/// assert_eq!(message.to_string(), "ERROR [P001]: expected ')' [3:14]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    /// Severity of the message.
    pub level: DiagnosticLevel,
    /// Stable short code identifying the kind of problem.
    pub code: String,
    /// Human-readable description.
    pub text: String,
    /// Where the problem was detected.
    pub location: Location,
}

impl DiagnosticMessage {
    /// Create a new diagnostic message.
    pub fn new(
        level: DiagnosticLevel,
        code: impl Into<String>,
        text: impl Into<String>,
        location: Location,
    ) -> Self {
        Self {
            level,
            code: code.into(),
            text: text.into(),
            location,
        }
    }
}

impl fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}]: {} [{}:{}]",
            self.level, self.code, self.text, self.location.line, self.location.column
        )
    }
}

/// An ordered collection of diagnostic messages.
///
/// `Diagnostics` accumulates messages in insertion order and tracks whether
/// any error or warning has been reported.
///
/// # Examples
///
/// ```
/// use scenescript_core::{Diagnostics, Location};
///
/// let mut diagnostics = Diagnostics::new();
/// diagnostics.warning("W001", "empty loop body", Location::new(1, 1));
/// assert!(diagnostics.has_warnings());
/// assert!(!diagnostics.has_errors());
///
/// diagnostics.reset();
/// assert!(diagnostics.is_empty());
/// ```
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    messages: Vec<DiagnosticMessage>,
    has_errors: bool,
    has_warnings: bool,
}

impl Diagnostics {
    /// Creates a new, empty diagnostics collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a message to the collection.
    pub fn add(&mut self, message: DiagnosticMessage) {
        match message.level {
            DiagnosticLevel::Error => self.has_errors = true,
            DiagnosticLevel::Warning => self.has_warnings = true,
            DiagnosticLevel::None => {}
        }
        self.messages.push(message);
    }

    /// Report an error.
    pub fn error(&mut self, code: &str, text: impl Into<String>, location: Location) {
        self.add(DiagnosticMessage::new(
            DiagnosticLevel::Error,
            code,
            text,
            location,
        ));
    }

    /// Report a warning.
    pub fn warning(&mut self, code: &str, text: impl Into<String>, location: Location) {
        self.add(DiagnosticMessage::new(
            DiagnosticLevel::Warning,
            code,
            text,
            location,
        ));
    }

    /// Returns `true` if any error has been reported since the last reset.
    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    /// Returns `true` if any warning has been reported since the last reset.
    pub fn has_warnings(&self) -> bool {
        self.has_warnings
    }

    /// Returns `true` if the collection contains no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Total number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Removes all messages and clears the error and warning flags.
    pub fn reset(&mut self) {
        self.messages.clear();
        self.has_errors = false;
        self.has_warnings = false;
    }

    /// Iterate over all messages in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticMessage> {
        self.messages.iter()
    }

    /// Iterate over error messages only.
    pub fn errors(&self) -> impl Iterator<Item = &DiagnosticMessage> {
        self.messages
            .iter()
            .filter(|m| m.level == DiagnosticLevel::Error)
    }

    /// Iterate over warning messages only.
    pub fn warnings(&self) -> impl Iterator<Item = &DiagnosticMessage> {
        self.messages
            .iter()
            .filter(|m| m.level == DiagnosticLevel::Warning)
    }

    /// Number of error messages.
    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    /// Number of warning messages.
    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    /// Render all messages, one per line, in insertion order.
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Writes all messages to the provided writer.
    pub fn emit<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for message in &self.messages {
            writeln!(writer, "{}", message)?;
        }
        Ok(())
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for message in &self.messages {
            writeln!(f, "{}", message)?;
        }
        Ok(())
    }
}

impl IntoIterator for Diagnostics {
    type Item = DiagnosticMessage;
    type IntoIter = std::vec::IntoIter<DiagnosticMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.into_iter()
    }
}

impl Extend<DiagnosticMessage> for Diagnostics {
    fn extend<I: IntoIterator<Item = DiagnosticMessage>>(&mut self, iter: I) {
        for message in iter {
            self.add(message);
        }
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a DiagnosticMessage;
    type IntoIter = std::slice::Iter<'a, DiagnosticMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}
