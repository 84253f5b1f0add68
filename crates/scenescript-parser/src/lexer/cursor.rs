//! Character sources consumed by the lexer.

use scenescript_core::Location;

/// A line/column tracking stream of characters.
///
/// The lexer only ever looks at the current character, so any reader that
/// can report its position and step forward one character can feed it.
pub trait CharSource {
    /// The character under the cursor, or `None` at end of input.
    fn current(&self) -> Option<char>;

    /// Step past the current character.
    ///
    /// Stepping past a newline increments the line and resets the column.
    fn advance(&mut self);

    /// Returns `true` if the current character ends a line.
    fn at_end_of_line(&self) -> bool {
        self.current() == Some('\n')
    }

    /// Returns `true` once every character has been consumed.
    fn at_end(&self) -> bool {
        self.current().is_none()
    }

    /// Location of the current character.
    fn location(&self) -> Location;
}

/// A cursor over an in-memory string.
#[derive(Debug, Clone)]
pub struct Cursor<'src> {
    chars: std::str::Chars<'src>,
    current: Option<char>,
    location: Location,
}

impl<'src> Cursor<'src> {
    /// Create a cursor at the start of `source`.
    ///
    /// A leading byte order mark is skipped.
    pub fn new(source: &'src str) -> Self {
        let source = source.strip_prefix('\u{FEFF}').unwrap_or(source);
        let mut chars = source.chars();
        let current = chars.next();
        Self {
            chars,
            current,
            location: Location::start(),
        }
    }
}

impl CharSource for Cursor<'_> {
    #[inline]
    fn current(&self) -> Option<char> {
        self.current
    }

    #[inline]
    fn advance(&mut self) {
        match self.current {
            None => return,
            Some('\n') => self.location = self.location.next_line(),
            Some(_) => self.location = self.location.next_column(),
        }
        self.current = self.chars.next();
    }

    #[inline]
    fn location(&self) -> Location {
        self.location
    }
}

/// Check if a character can start an identifier.
#[inline]
pub fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Check if a character can continue an identifier.
#[inline]
pub fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
