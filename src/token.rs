//! Lexical tokens produced by the lexer, and the guards parsers use to
//! consume them.

/// The closed set of lexeme categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `{`
    OpenBrace,

    /// `}`
    CloseBrace,

    /// `[`
    OpenBracket,

    /// `]`
    CloseBracket,

    /// `(`
    OpenParen,

    /// `)`
    CloseParen,

    /// `,`
    Comma,

    /// `:`
    Colon,

    /// `.`
    Period,

    /// `@`
    At,

    /// A `$` that does not start a word
    Dollar,

    /// Symbolic or word operator
    ///
    /// Covers `=`, `!=`, `>`, `>=`, `<`, `<=`, `+`, `-`, `*`, `/`, `%` and
    /// the word operators `BETWEEN`, `LIKE`, `AND`, `OR` (matched regardless
    /// of case; the lexeme keeps the source spelling).
    Operator,

    /// Quoted string literal with escapes already decoded
    ///
    /// # Examples
    /// ```text
    /// "hello"
    /// 'it\'s'
    /// ```
    String,

    /// Integer number
    ///
    /// # Examples
    /// ```text
    /// 42
    /// 007
    /// ```
    Int,

    /// Number that consumed a decimal point or an exponent
    ///
    /// # Examples
    /// ```text
    /// 3.14
    /// 1e-10
    /// ```
    Double,

    /// Identifier, possibly `$`-prefixed
    ///
    /// # Examples
    /// ```text
    /// user
    /// item_count
    /// $doc
    /// ```
    Word,

    /// A maximal run of spaces, tabs, carriage returns, and newlines
    ///
    /// The lexeme is a run of spaces whose length equals the number of
    /// whitespace characters consumed; callers only ever use the extent.
    Whitespace,

    /// The character source is exhausted; the only token without a lexeme
    EndOfInput,

    /// Single character no other rule matched
    Unknown,
}

/// A classified, positioned unit of lexical meaning.
///
/// Tokens are produced by the lexer and never mutated. `position` is the
/// character offset at which scanning of the token *completed*, not where it
/// started; it exists for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: Option<String>,
    pub position: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, position: usize) -> Self {
        Token {
            kind,
            lexeme: Some(lexeme.into()),
            position,
        }
    }

    /// A token with no lexeme; used for the end-of-input sentinel.
    pub fn bare(kind: TokenKind, position: usize) -> Self {
        Token {
            kind,
            lexeme: None,
            position,
        }
    }

    /// The lexeme text, or `""` for tokens without one.
    pub fn text(&self) -> &str {
        self.lexeme.as_deref().unwrap_or("")
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Returns the token unchanged if it has the expected kind.
    ///
    /// This is the sole error-signaling primitive the parser layer builds
    /// on; the error carries the offending token for diagnostic display.
    ///
    /// # Examples
    ///
    /// ```
    /// use sift_lang::{Token, TokenKind};
    ///
    /// let token = Token::new(TokenKind::Word, "price", 5);
    /// assert!(token.clone().expect(TokenKind::Word).is_ok());
    /// assert!(token.expect(TokenKind::Operator).is_err());
    /// ```
    pub fn expect(self, kind: TokenKind) -> Result<Token, TokenError> {
        if self.kind == kind {
            Ok(self)
        } else {
            Err(TokenError::UnexpectedToken(self))
        }
    }

    /// Two-kind variant of [`expect`](Token::expect).
    pub fn expect_either(self, first: TokenKind, second: TokenKind) -> Result<Token, TokenError> {
        if self.kind == first || self.kind == second {
            Ok(self)
        } else {
            Err(TokenError::UnexpectedToken(self))
        }
    }
}

/// Errors surfaced to token consumers.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenError {
    /// A token did not have the kind the consumer required
    UnexpectedToken(Token),
}

impl TokenError {
    /// The token that triggered the error.
    pub fn token(&self) -> &Token {
        match self {
            TokenError::UnexpectedToken(token) => token,
        }
    }
}

impl std::fmt::Display for TokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenError::UnexpectedToken(token) => match &token.lexeme {
                Some(text) => write!(
                    f,
                    "Unexpected token {:?} '{}' at position {}",
                    token.kind, text, token.position
                ),
                None => write!(
                    f,
                    "Unexpected token {:?} at position {}",
                    token.kind, token.position
                ),
            },
        }
    }
}

impl std::error::Error for TokenError {}
