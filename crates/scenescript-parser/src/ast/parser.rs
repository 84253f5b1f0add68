//! Parser infrastructure for scenescript.
//!
//! Provides the main [`Parser`] struct with token navigation, diagnostic
//! reporting and error recovery.

use bumpalo::Bump;
use bumpalo::collections::Vec as BumpVec;
use log::debug;
use scenescript_core::{Diagnostics, Location, ParseError, ParseErrorKind};

use crate::ast::Script;
use crate::lexer::{CharSource, Cursor, Lexer, Token, TokenKind};

/// Recursive-descent parser with one token of lookahead.
///
/// The parser never fails as a whole. Lexical and syntax errors are
/// recorded as diagnostics, the offending construct is dropped and parsing
/// resumes at the next statement.
///
/// The `'ast` lifetime refers to the arena where AST nodes and token
/// lexemes are allocated.
pub struct Parser<'ast, S> {
    /// Token source.
    pub(super) lexer: Lexer<'ast, S>,
    /// The lookahead token.
    pub(super) current: Token<'ast>,
    /// Location of the most recently consumed token.
    pub(super) previous: Location,
    /// Arena allocator for AST nodes.
    pub(super) arena: &'ast Bump,
    /// Reported problems.
    pub(super) diagnostics: Diagnostics,
    /// `if`/`while` blocks opened and not yet closed by `end`.
    ///
    /// Left untouched when an error unwinds out of a block, so recovery
    /// knows how many `end`s to skip.
    pub(super) block_depth: usize,
    /// Open parentheses around the expression being parsed.
    pub(super) nesting: usize,
}

impl<'src, 'ast> Parser<'ast, Cursor<'src>> {
    /// Parse a complete script from a string.
    ///
    /// Diagnostics are appended to `diagnostics`; the returned script holds
    /// every statement that parsed cleanly.
    ///
    /// # Example
    ///
    /// ```
    /// use bumpalo::Bump;
    /// use scenescript_core::Diagnostics;
    /// use scenescript_parser::Parser;
    ///
    /// let arena = Bump::new();
    /// let mut diagnostics = Diagnostics::new();
    /// let script = Parser::parse("x = 1\nprintln('{}', x)", &arena, &mut diagnostics);
    /// assert_eq!(script.statements().len(), 2);
    /// assert!(!diagnostics.has_errors());
    /// ```
    pub fn parse(
        source: &'src str,
        arena: &'ast Bump,
        diagnostics: &mut Diagnostics,
    ) -> Script<'ast> {
        Self::parse_from(Cursor::new(source), arena, diagnostics)
    }
}

impl<'ast, S: CharSource> Parser<'ast, S> {
    /// Create a parser reading from any character source.
    pub fn new(source: S, arena: &'ast Bump) -> Self {
        let lexer = Lexer::new(source, arena);
        let start = lexer.location();
        let mut parser = Self {
            lexer,
            current: Token::new(TokenKind::Eof, "", start),
            previous: start,
            arena,
            diagnostics: Diagnostics::new(),
            block_depth: 0,
            nesting: 0,
        };
        parser.current = parser.lexer.next_token();
        parser.report_lex_errors();
        parser
    }

    /// Parse a complete script from a character source.
    pub fn parse_from(source: S, arena: &'ast Bump, diagnostics: &mut Diagnostics) -> Script<'ast> {
        let mut parser = Self::new(source, arena);
        let script = parser.parse_script();
        diagnostics.extend(parser.diagnostics);
        script
    }

    /// Diagnostics reported so far.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }

    /// Parse statements until the end of input.
    pub fn parse_script(&mut self) -> Script<'ast> {
        let mut statements = BumpVec::new_in(self.arena);
        let mut after_statement = false;

        while !self.is_eof() {
            if self.check(TokenKind::Semicolon) {
                self.separator(&mut after_statement);
                continue;
            }

            let start = self.current.location;
            match self.parse_statement() {
                Ok(statement) => {
                    statements.push(statement);
                    after_statement = true;
                }
                Err(error) => {
                    self.report(error);
                    self.nesting = 0;
                    if self.current.location == start {
                        self.advance();
                    }
                    self.synchronize();
                    after_statement = false;
                }
            }
        }

        debug!(
            "parsed {} top-level statement(s) with {} error(s)",
            statements.len(),
            self.diagnostics.error_count()
        );
        Script::new(statements.into_bump_slice())
    }

    // ========================================================================
    // Token Navigation
    // ========================================================================

    /// Peek at the current token without consuming it.
    #[inline]
    pub fn peek(&self) -> &Token<'ast> {
        &self.current
    }

    /// Get the current token and advance to the next.
    pub fn advance(&mut self) -> Token<'ast> {
        let token = self.current;
        if token.kind != TokenKind::Eof {
            self.previous = token.location;
            self.current = self.lexer.next_token();
            self.report_lex_errors();
        }
        token
    }

    /// Check if the current token matches the given kind.
    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    /// Outside parentheses, a token on a later line than the previous one
    /// starts a new statement instead of continuing the expression.
    #[inline]
    pub(super) fn at_line_start(&self) -> bool {
        self.nesting == 0 && self.current.location.line > self.previous.line
    }

    /// Check if the current token is EOF.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    /// If the current token matches the given kind, consume and return it.
    pub fn eat(&mut self, kind: TokenKind) -> Option<Token<'ast>> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    /// Expect the current token to be of the given kind.
    pub fn expect(&mut self, kind: TokenKind) -> Result<Token<'ast>, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error_at_current(kind.description()))
        }
    }

    /// Build an error for an unexpected current token.
    pub(super) fn error_at_current(&self, expected: &str) -> ParseError {
        let token = self.current;
        match token.kind {
            TokenKind::Error => ParseError::new(ParseErrorKind::Lexical, token.location, ""),
            _ => ParseError::expected_token(token.location, expected, token.kind.description()),
        }
    }

    // ========================================================================
    // Error Handling
    // ========================================================================

    /// Record a parse error as a diagnostic.
    ///
    /// Errors caused by error tokens are dropped: the lexer reported them.
    pub(super) fn report(&mut self, error: ParseError) {
        if error.kind != ParseErrorKind::Lexical {
            self.diagnostics
                .error(error.code(), error.message, error.location);
        }
    }

    pub(super) fn warn(&mut self, code: &str, text: impl Into<String>, location: Location) {
        self.diagnostics.warning(code, text, location);
    }

    fn report_lex_errors(&mut self) {
        for error in self.lexer.take_errors() {
            self.diagnostics
                .error(error.code(), error.to_string(), error.location());
        }
    }

    /// Consume a `;` separator, warning when it does not follow a statement.
    pub(super) fn separator(&mut self, after_statement: &mut bool) {
        let token = self.advance();
        if !*after_statement {
            self.warn("W002", "redundant ';'", token.location);
        }
        *after_statement = false;
    }

    /// Skip tokens until the next statement can be parsed.
    ///
    /// Blocks that were open when the error occurred are skipped up to their
    /// closing `end`. Outside any block, parsing resumes after a `;`, at a
    /// statement keyword, or at the first token of a new line.
    pub fn synchronize(&mut self) {
        let mut depth = std::mem::take(&mut self.block_depth);

        loop {
            let token = self.current;
            match token.kind {
                TokenKind::Eof => return,
                TokenKind::If | TokenKind::While if depth > 0 => depth += 1,
                TokenKind::End if depth > 0 => {
                    depth -= 1;
                    self.advance();
                    if depth == 0 {
                        return;
                    }
                    continue;
                }
                TokenKind::Semicolon if depth == 0 => {
                    self.advance();
                    return;
                }
                kind if depth == 0 && kind.starts_statement() => return,
                _ if depth == 0 && token.location.line > self.previous.line => return,
                _ => {}
            }
            self.advance();
        }
    }
}
