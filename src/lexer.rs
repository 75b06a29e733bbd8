use crate::cursor::Cursor;
use crate::token::{Token, TokenError, TokenKind};

/// Words that lex as operators, matched regardless of case.
const KEYWORD_OPERATORS: [&str; 4] = ["BETWEEN", "LIKE", "AND", "OR"];

fn is_keyword_operator(word: &str) -> bool {
    KEYWORD_OPERATORS
        .iter()
        .any(|keyword| keyword.eq_ignore_ascii_case(word))
}

fn is_space(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\r' | '\n')
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '$'
}

/// The tokenizer.
///
/// Pulls characters from a [`Cursor`] on demand, never further ahead than
/// one character of disambiguation, and yields one [`Token`] per call,
/// buffering at most one token of lookahead. Malformed input degrades into
/// `Unknown` or truncated-but-well-formed tokens; the lexer itself never
/// fails. One `Lexer` per stream; the instance owns mutable cursor state and
/// is not meant to be shared across threads.
///
/// # Examples
///
/// ```
/// use sift_lang::{Lexer, TokenKind};
///
/// let mut lexer = Lexer::new("$[price] >= 10");
/// assert_eq!(lexer.read_token(true).kind, TokenKind::Dollar);
/// assert_eq!(lexer.read_token(true).kind, TokenKind::OpenBracket);
/// ```
pub struct Lexer<I> {
    cursor: Cursor<I>,
    lookahead: Option<Token>,
    current: Option<Token>,
}

impl<'a> Lexer<std::str::Chars<'a>> {
    pub fn new(input: &'a str) -> Self {
        Lexer::from_source(input.chars())
    }
}

impl<I: Iterator<Item = char>> Lexer<I> {
    /// Builds a lexer over any sequential character source.
    ///
    /// Behaves identically to [`Lexer::new`] with respect to position
    /// counting and end-of-input detection.
    pub fn from_source(source: I) -> Self {
        Lexer {
            cursor: Cursor::new(source),
            lookahead: None,
            current: None,
        }
    }

    /// Reads the next token, consuming a buffered lookahead token first.
    ///
    /// With `eat_whitespace` set, whitespace never surfaces as a token: runs
    /// of spaces, tabs, carriage returns, and newlines are skipped before
    /// dispatch, and a buffered `Whitespace` token is discarded in favor of
    /// a fresh scan from the cursor's current position. The returned token
    /// becomes the new [`current`](Lexer::current) token.
    pub fn read_token(&mut self, eat_whitespace: bool) -> Token {
        let token = match self.take_buffered(eat_whitespace) {
            Some(token) => token,
            None => self.scan_token(eat_whitespace),
        };
        self.current = Some(token.clone());
        token
    }

    /// Returns the next token without consuming it.
    ///
    /// Repeated calls are idempotent, and a following
    /// [`read_token`](Lexer::read_token) with the same whitespace intent
    /// returns this exact token. At most one token is ever buffered.
    pub fn look_ahead(&mut self, eat_whitespace: bool) -> Token {
        let token = match self.take_buffered(eat_whitespace) {
            Some(token) => token,
            None => self.scan_token(eat_whitespace),
        };
        self.lookahead = Some(token.clone());
        token
    }

    /// The last token consumed through [`read_token`](Lexer::read_token).
    pub fn current(&self) -> Option<&Token> {
        self.current.as_ref()
    }

    /// Character offset of the underlying cursor.
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    /// Whether the character source is exhausted.
    pub fn at_end(&self) -> bool {
        self.cursor.at_end()
    }

    /// Guard for `while`-style consumption loops.
    ///
    /// Fails with [`TokenError::UnexpectedToken`] if the current token is
    /// the end-of-input sentinel, so a loop waiting for a closing delimiter
    /// that never comes errors out instead of spinning. Returns `Ok(false)`
    /// otherwise.
    pub fn check_end_of_input(&self) -> Result<bool, TokenError> {
        match &self.current {
            Some(token) if token.kind == TokenKind::EndOfInput => {
                Err(TokenError::UnexpectedToken(token.clone()))
            }
            _ => Ok(false),
        }
    }

    // A buffered whitespace token is stale the moment a caller asks for
    // whitespace to be skipped; drop it so the scan resumes past the run.
    fn take_buffered(&mut self, eat_whitespace: bool) -> Option<Token> {
        match self.lookahead.take() {
            Some(token) if eat_whitespace && token.kind == TokenKind::Whitespace => None,
            other => other,
        }
    }

    fn scan_token(&mut self, eat_whitespace: bool) -> Token {
        if eat_whitespace {
            while matches!(self.cursor.current(), Some(ch) if is_space(ch)) {
                self.cursor.advance();
            }
        } else if matches!(self.cursor.current(), Some(ch) if is_space(ch)) {
            return self.scan_whitespace();
        }

        let Some(ch) = self.cursor.current() else {
            return Token::bare(TokenKind::EndOfInput, self.cursor.position());
        };

        match ch {
            '%' | '/' | '*' | '+' | '-' | '=' => {
                self.cursor.advance();
                self.token(TokenKind::Operator, String::from(ch))
            }
            '!' => {
                self.cursor.advance();
                if self.cursor.current() == Some('=') {
                    self.cursor.advance();
                    self.token(TokenKind::Operator, "!=")
                } else {
                    // The grammar has no unary '!'; a bare one matches no rule.
                    self.token(TokenKind::Unknown, "!")
                }
            }
            '>' | '<' => {
                self.cursor.advance();
                if self.cursor.current() == Some('=') {
                    self.cursor.advance();
                    self.token(TokenKind::Operator, format!("{ch}="))
                } else {
                    self.token(TokenKind::Operator, String::from(ch))
                }
            }
            '[' => {
                self.cursor.advance();
                self.token(TokenKind::OpenBracket, "[")
            }
            ']' => {
                self.cursor.advance();
                self.token(TokenKind::CloseBracket, "]")
            }
            '{' => {
                self.cursor.advance();
                self.token(TokenKind::OpenBrace, "{")
            }
            '}' => {
                self.cursor.advance();
                self.token(TokenKind::CloseBrace, "}")
            }
            '(' => {
                self.cursor.advance();
                self.token(TokenKind::OpenParen, "(")
            }
            ')' => {
                self.cursor.advance();
                self.token(TokenKind::CloseParen, ")")
            }
            ',' => {
                self.cursor.advance();
                self.token(TokenKind::Comma, ",")
            }
            ':' => {
                self.cursor.advance();
                self.token(TokenKind::Colon, ":")
            }
            '.' => {
                self.cursor.advance();
                self.token(TokenKind::Period, ".")
            }
            '@' => {
                self.cursor.advance();
                self.token(TokenKind::At, "@")
            }
            '$' => {
                self.cursor.advance();
                match self.cursor.current() {
                    Some(next) if is_word_char(next) => {
                        let mut word = String::from("$");
                        word.push_str(&self.read_word());
                        self.token(TokenKind::Word, word)
                    }
                    _ => self.token(TokenKind::Dollar, "$"),
                }
            }
            '"' | '\'' => self.scan_string(ch),
            '0'..='9' => self.scan_number(),
            ch if is_word_char(ch) => {
                let word = self.read_word();
                if is_keyword_operator(&word) {
                    self.token(TokenKind::Operator, word)
                } else {
                    self.token(TokenKind::Word, word)
                }
            }
            other => {
                self.cursor.advance();
                self.token(TokenKind::Unknown, String::from(other))
            }
        }
    }

    fn scan_whitespace(&mut self) -> Token {
        let mut count = 0;
        while matches!(self.cursor.current(), Some(ch) if is_space(ch)) {
            count += 1;
            self.cursor.advance();
        }
        // Only the extent of the run matters to callers, not which
        // characters formed it.
        self.token(TokenKind::Whitespace, " ".repeat(count))
    }

    fn read_word(&mut self) -> String {
        let mut word = String::new();
        while let Some(ch) = self.cursor.current() {
            if !is_word_char(ch) {
                break;
            }
            word.push(ch);
            self.cursor.advance();
        }
        word
    }

    fn scan_number(&mut self) -> Token {
        let mut number = String::new();
        let mut seen_dot = false;
        let mut seen_exponent = false;
        let mut seen_sign = false;
        // A sign is only legal in the slot right after the exponent marker.
        let mut sign_slot = false;

        while let Some(ch) = self.cursor.current() {
            match ch {
                '0'..='9' => sign_slot = false,
                '.' if !seen_dot => {
                    seen_dot = true;
                    sign_slot = false;
                }
                'e' | 'E' if !seen_exponent => {
                    seen_exponent = true;
                    sign_slot = true;
                }
                '+' | '-' if sign_slot && !seen_sign => {
                    seen_sign = true;
                    sign_slot = false;
                }
                _ => break,
            }
            number.push(ch);
            self.cursor.advance();
        }

        // The lexeme is not validated here; conversion failures belong to
        // the consumer.
        if seen_dot || seen_exponent {
            self.token(TokenKind::Double, number)
        } else {
            self.token(TokenKind::Int, number)
        }
    }

    fn scan_string(&mut self, quote: char) -> Token {
        let mut text = String::new();
        self.cursor.advance(); // Consume opening quote

        while let Some(ch) = self.cursor.current() {
            if ch == quote {
                self.cursor.advance();
                break;
            }
            if ch == '\\' {
                self.cursor.advance();
                let Some(escaped) = self.cursor.current() else {
                    break;
                };
                match escaped {
                    'b' => text.push('\u{0008}'),
                    'f' => text.push('\u{000C}'),
                    'n' => text.push('\n'),
                    'r' => text.push('\r'),
                    't' => text.push('\t'),
                    'u' => text.push(self.read_hex_escape()),
                    // Covers \\, \/, escaped quotes, and anything else:
                    // the escaped character itself.
                    other => text.push(other),
                }
                self.cursor.advance();
            } else {
                text.push(ch);
                self.cursor.advance();
            }
        }

        // A missing closing quote ends the string with what accumulated.
        self.token(TokenKind::String, text)
    }

    // Reads the four characters after `\u`, leaving the cursor on the last
    // one. Non-hex characters in a slot contribute zero, as do slots lost to
    // end-of-input; code units a char cannot hold decode to U+FFFD.
    fn read_hex_escape(&mut self) -> char {
        let mut code = 0u32;
        for _ in 0..4 {
            self.cursor.advance();
            let digit = self
                .cursor
                .current()
                .and_then(|ch| ch.to_digit(16))
                .unwrap_or(0);
            code = code * 16 + digit;
        }
        char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    fn token(&self, kind: TokenKind, text: impl Into<String>) -> Token {
        Token::new(kind, text, self.cursor.position())
    }
}

#[test]
fn test_keyword_operators() {
    let mut lexer = Lexer::new("a BETWEEN 1 and 10");
    assert_eq!(lexer.read_token(true).kind, TokenKind::Word);
    let between = lexer.read_token(true);
    assert_eq!(between.kind, TokenKind::Operator);
    assert_eq!(between.text(), "BETWEEN");
    assert_eq!(lexer.read_token(true).kind, TokenKind::Int);
    assert_eq!(lexer.read_token(true).kind, TokenKind::Operator);
    assert_eq!(lexer.read_token(true).kind, TokenKind::Int);
    assert_eq!(lexer.read_token(true).kind, TokenKind::EndOfInput);
}

#[test]
fn test_object_expression() {
    let mut lexer = Lexer::new(r#"{"a": 1.5}"#);
    assert_eq!(lexer.read_token(true).kind, TokenKind::OpenBrace);
    let name = lexer.read_token(true);
    assert_eq!(name.kind, TokenKind::String);
    assert_eq!(name.text(), "a");
    assert_eq!(lexer.read_token(true).kind, TokenKind::Colon);
    let number = lexer.read_token(true);
    assert_eq!(number.kind, TokenKind::Double);
    assert_eq!(number.text(), "1.5");
    assert_eq!(lexer.read_token(true).kind, TokenKind::CloseBrace);
    assert_eq!(lexer.read_token(true).kind, TokenKind::EndOfInput);
}
