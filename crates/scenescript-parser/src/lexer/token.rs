//! Token types and definitions for the scenescript lexer.

use scenescript_core::Location;
use std::fmt;

/// A token from the source code.
///
/// The `'ast` lifetime refers to the arena where the lexeme is allocated.
/// String literal lexemes hold the decoded contents without quotes.
#[derive(Clone, Copy, PartialEq)]
pub struct Token<'ast> {
    /// The type of token.
    pub kind: TokenKind,
    /// The text of this token (allocated in arena).
    pub lexeme: &'ast str,
    /// Location of the first character.
    pub location: Location,
}

impl<'ast> Token<'ast> {
    /// Create a new token.
    #[inline]
    pub fn new(kind: TokenKind, lexeme: &'ast str, location: Location) -> Self {
        Self {
            kind,
            lexeme,
            location,
        }
    }
}

impl fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?} @ {:?})", self.kind, self.lexeme, self.location)
    }
}

/// All token types in scenescript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // =========================================
    // Literals
    // =========================================
    /// Number literal: `42`, `3.14`, `1e-3`
    Number,
    /// String literal: `"hello"`, `'a'`
    String,

    /// User-defined identifier
    Identifier,

    // =========================================
    // Keywords
    // =========================================
    /// `true`
    True,
    /// `false`
    False,
    /// `if`
    If,
    /// `else`
    Else,
    /// `while`
    While,
    /// `end`
    End,
    /// `and`
    And,
    /// `or`
    Or,
    /// `not`
    Not,
    /// `print`
    Print,
    /// `println`
    Println,

    // =========================================
    // Operators
    // =========================================
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `=`
    Equal,
    /// `==`
    EqualEqual,
    /// `<>`
    LessGreater,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,

    // =========================================
    // Delimiters
    // =========================================
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `,`
    Comma,
    /// `.`
    Dot,
    /// `;`
    Semicolon,

    // =========================================
    // Special
    // =========================================
    /// End of input
    Eof,
    /// Lexical error; the lexer has already reported it
    Error,
}

impl TokenKind {
    /// Check if this token kind is a keyword.
    pub fn is_keyword(self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            True | False | If | Else | While | End | And | Or | Not | Print | Println
        )
    }

    /// Check if this token kind can begin a statement on its own.
    pub fn starts_statement(self) -> bool {
        use TokenKind::*;
        matches!(self, If | While | Print | Println)
    }

    /// Human-readable description used in diagnostics.
    pub fn description(self) -> &'static str {
        use TokenKind::*;
        match self {
            Number => "number",
            String => "string",
            Identifier => "identifier",
            True => "'true'",
            False => "'false'",
            If => "'if'",
            Else => "'else'",
            While => "'while'",
            End => "'end'",
            And => "'and'",
            Or => "'or'",
            Not => "'not'",
            Print => "'print'",
            Println => "'println'",
            Plus => "'+'",
            Minus => "'-'",
            Star => "'*'",
            Slash => "'/'",
            Equal => "'='",
            EqualEqual => "'=='",
            LessGreater => "'<>'",
            Less => "'<'",
            LessEqual => "'<='",
            Greater => "'>'",
            GreaterEqual => "'>='",
            LeftParen => "'('",
            RightParen => "')'",
            Comma => "','",
            Dot => "'.'",
            Semicolon => "';'",
            Eof => "end of input",
            Error => "invalid token",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Look up a keyword by its text.
pub fn lookup_keyword(ident: &str) -> Option<TokenKind> {
    use TokenKind::*;
    Some(match ident {
        "true" => True,
        "false" => False,
        "if" => If,
        "else" => Else,
        "while" => While,
        "end" => End,
        "and" => And,
        "or" => Or,
        "not" => Not,
        "print" => Print,
        "println" => Println,
        _ => return None,
    })
}
