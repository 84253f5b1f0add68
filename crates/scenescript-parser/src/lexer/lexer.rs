//! Main lexer implementation for scenescript.
//!
//! The [`Lexer`] converts a [`CharSource`] into a stream of [`Token`]s.
//! It dispatches on the first character of each token and never aborts:
//! malformed input produces an [`TokenKind::Error`] token and a recorded
//! [`LexError`], and scanning continues after it.
//!
//! All lexemes are copied into the arena, so the source can be dropped as
//! soon as lexing completes.

use bumpalo::Bump;
use scenescript_core::{LexError, Location};

use super::cursor::{CharSource, Cursor, is_ident_continue, is_ident_start};
use super::token::{Token, TokenKind, lookup_keyword};

/// Lexer for scenescript source code.
///
/// The `'ast` lifetime is the arena where token lexemes are allocated.
pub struct Lexer<'ast, S> {
    /// Character source.
    source: S,
    /// Arena for allocating token lexemes.
    arena: &'ast Bump,
    /// Scratch space for the lexeme being scanned.
    buffer: String,
    /// Accumulated errors.
    errors: Vec<LexError>,
    /// Set once the end-of-input token has been produced.
    finished: bool,
}

impl<'src, 'ast> Lexer<'ast, Cursor<'src>> {
    /// Create a lexer over a string.
    pub fn from_str(source: &'src str, arena: &'ast Bump) -> Self {
        Self::new(Cursor::new(source), arena)
    }
}

impl<'ast, S: CharSource> Lexer<'ast, S> {
    /// Create a lexer over any character source.
    pub fn new(source: S, arena: &'ast Bump) -> Self {
        Self {
            source,
            arena,
            buffer: String::with_capacity(32),
            errors: Vec::new(),
            finished: false,
        }
    }

    /// Take accumulated errors, leaving an empty vec.
    pub fn take_errors(&mut self) -> Vec<LexError> {
        std::mem::take(&mut self.errors)
    }

    /// Check if any errors are waiting to be taken.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Location of the next unread character.
    pub fn location(&self) -> Location {
        self.source.location()
    }

    /// Scan and return the next token.
    ///
    /// Once the end of input is reached every further call returns `Eof`.
    pub fn next_token(&mut self) -> Token<'ast> {
        loop {
            self.skip_whitespace();

            let start = self.source.location();
            let Some(c) = self.source.current() else {
                self.finished = true;
                return Token::new(TokenKind::Eof, "", start);
            };

            // `//` starts a comment; a lone slash is division.
            if c == '/' {
                self.source.advance();
                if self.source.current() == Some('/') {
                    self.skip_line();
                    continue;
                }
                return Token::new(TokenKind::Slash, "/", start);
            }

            return match c {
                '"' | '\'' => self.scan_string(c, start),
                c if c.is_ascii_digit() => self.scan_number(start),
                '.' => self.scan_dot(start),
                c if is_ident_start(c) => self.scan_identifier(start),
                _ => self.scan_operator(c, start),
            };
        }
    }

    // =========================================
    // Internal: helpers
    // =========================================

    fn skip_whitespace(&mut self) {
        while self.source.current().is_some_and(char::is_whitespace) {
            self.source.advance();
        }
    }

    /// Skip to the end of the current line, leaving the newline unread.
    fn skip_line(&mut self) {
        while !self.source.at_end() && !self.source.at_end_of_line() {
            self.source.advance();
        }
    }

    fn make_token(&self, kind: TokenKind, location: Location) -> Token<'ast> {
        let lexeme = self.arena.alloc_str(&self.buffer);
        Token::new(kind, lexeme, location)
    }

    /// Record an error and produce an error token carrying the scanned text.
    fn make_error(&mut self, error: LexError, location: Location) -> Token<'ast> {
        self.errors.push(error);
        self.make_token(TokenKind::Error, location)
    }

    /// Consume the current character into the lexeme buffer.
    fn bump(&mut self) {
        if let Some(c) = self.source.current() {
            self.buffer.push(c);
            self.source.advance();
        }
    }

    // =========================================
    // Scanning: Strings
    // =========================================

    /// Scan a string literal. Strings may not span lines.
    fn scan_string(&mut self, quote: char, start: Location) -> Token<'ast> {
        self.buffer.clear();
        self.source.advance(); // opening quote
        let mut invalid_escape = None;

        loop {
            if self.source.at_end() || self.source.at_end_of_line() {
                let error = LexError::UnterminatedString { location: start };
                return self.make_error(error, start);
            }
            let Some(c) = self.source.current() else {
                break;
            };
            let location = self.source.location();
            self.source.advance();

            if c == quote {
                break;
            }
            if c != '\\' {
                self.buffer.push(c);
                continue;
            }

            match self.source.current() {
                Some('n') => self.buffer.push('\n'),
                Some('t') => self.buffer.push('\t'),
                Some('\\') => self.buffer.push('\\'),
                Some('\'') => self.buffer.push('\''),
                Some('"') => self.buffer.push('"'),
                Some(other) if other != '\n' => {
                    if invalid_escape.is_none() {
                        invalid_escape = Some(LexError::InvalidEscape {
                            ch: other,
                            location,
                        });
                    }
                }
                // Backslash at end of line: the unterminated check reports it.
                _ => continue,
            }
            self.source.advance();
        }

        match invalid_escape {
            Some(error) => self.make_error(error, start),
            None => self.make_token(TokenKind::String, start),
        }
    }

    // =========================================
    // Scanning: Numbers
    // =========================================

    /// Scan a number: digits, an optional fraction and an optional exponent.
    fn scan_number(&mut self, start: Location) -> Token<'ast> {
        self.buffer.clear();
        self.consume_digits();

        if self.source.current() == Some('.') {
            self.bump();
            self.consume_digits();
        }

        self.finish_number(start)
    }

    /// Scan either a `.` delimiter or a number such as `.5`.
    fn scan_dot(&mut self, start: Location) -> Token<'ast> {
        self.buffer.clear();
        self.bump();
        if self.source.current().is_some_and(|c| c.is_ascii_digit()) {
            self.consume_digits();
            return self.finish_number(start);
        }
        self.make_token(TokenKind::Dot, start)
    }

    /// Scan the optional exponent and validate the literal.
    fn finish_number(&mut self, start: Location) -> Token<'ast> {
        if let Some('e' | 'E') = self.source.current() {
            self.bump();
            if let Some('+' | '-') = self.source.current() {
                self.bump();
            }
            if !self.source.current().is_some_and(|c| c.is_ascii_digit()) {
                let error = LexError::InvalidNumber {
                    text: self.buffer.clone(),
                    location: start,
                };
                return self.make_error(error, start);
            }
            self.consume_digits();
        }

        if self.buffer.parse::<f64>().is_err() {
            let error = LexError::InvalidNumber {
                text: self.buffer.clone(),
                location: start,
            };
            return self.make_error(error, start);
        }
        self.make_token(TokenKind::Number, start)
    }

    fn consume_digits(&mut self) {
        while self.source.current().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
        }
    }

    // =========================================
    // Scanning: Identifiers and keywords
    // =========================================

    /// Scan an identifier or keyword.
    fn scan_identifier(&mut self, start: Location) -> Token<'ast> {
        self.buffer.clear();
        while self.source.current().is_some_and(is_ident_continue) {
            self.bump();
        }
        let kind = lookup_keyword(&self.buffer).unwrap_or(TokenKind::Identifier);
        self.make_token(kind, start)
    }

    // =========================================
    // Scanning: Operators
    // =========================================

    /// Scan an operator or punctuation token.
    fn scan_operator(&mut self, c: char, start: Location) -> Token<'ast> {
        self.buffer.clear();
        self.bump();

        let kind = match c {
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,

            '=' => self.follow('=', TokenKind::EqualEqual, TokenKind::Equal),
            '>' => self.follow('=', TokenKind::GreaterEqual, TokenKind::Greater),
            '<' => match self.source.current() {
                Some('=') => {
                    self.bump();
                    TokenKind::LessEqual
                }
                Some('>') => {
                    self.bump();
                    TokenKind::LessGreater
                }
                _ => TokenKind::Less,
            },

            _ => {
                let error = LexError::UnexpectedChar { ch: c, location: start };
                return self.make_error(error, start);
            }
        };

        self.make_token(kind, start)
    }

    /// Consume `next` if present and return `matched`, otherwise `single`.
    fn follow(&mut self, next: char, matched: TokenKind, single: TokenKind) -> TokenKind {
        if self.source.current() == Some(next) {
            self.bump();
            matched
        } else {
            single
        }
    }
}

/// Tokens up to, but not including, the end of input.
impl<'ast, S: CharSource> Iterator for Lexer<'ast, S> {
    type Item = Token<'ast>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            None
        } else {
            Some(token)
        }
    }
}
