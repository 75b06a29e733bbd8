//! JSON serialization for token streams.
//!
//! Tokens serialize as objects with `kind`, `text`, and `position` fields.
//! Kind names are stable snake_case strings, `text` is the lexeme (`null`
//! for the end-of-input sentinel), and `position` is the token's completion
//! offset. Output is deterministic and machine-readable, suitable for
//! piping into other tools.
//!
//! # Examples
//!
//! ```
//! use sift_lang::{Lexer, output};
//!
//! let mut lexer = Lexer::new("@");
//! let token = lexer.read_token(true);
//! let json = output::token_to_json(&token);
//! assert_eq!(json["kind"], "at");
//! assert_eq!(json["text"], "@");
//! ```

use crate::token::{Token, TokenKind};
use serde_json::{Value, json};

/// Stable serialized name for a token kind.
pub fn kind_name(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::OpenBrace => "open_brace",
        TokenKind::CloseBrace => "close_brace",
        TokenKind::OpenBracket => "open_bracket",
        TokenKind::CloseBracket => "close_bracket",
        TokenKind::OpenParen => "open_paren",
        TokenKind::CloseParen => "close_paren",
        TokenKind::Comma => "comma",
        TokenKind::Colon => "colon",
        TokenKind::Period => "period",
        TokenKind::At => "at",
        TokenKind::Dollar => "dollar",
        TokenKind::Operator => "operator",
        TokenKind::String => "string",
        TokenKind::Int => "int",
        TokenKind::Double => "double",
        TokenKind::Word => "word",
        TokenKind::Whitespace => "whitespace",
        TokenKind::EndOfInput => "end_of_input",
        TokenKind::Unknown => "unknown",
    }
}

/// Converts one token to its JSON object form.
pub fn token_to_json(token: &Token) -> Value {
    json!({
        "kind": kind_name(token.kind),
        "text": token.lexeme,
        "position": token.position,
    })
}

/// Converts a token stream to a JSON array.
pub fn tokens_to_json(tokens: &[Token]) -> Value {
    Value::Array(tokens.iter().map(token_to_json).collect())
}

#[test]
fn test_token_json_shape() {
    let token = Token::new(TokenKind::Operator, ">=", 7);
    let json = token_to_json(&token);
    assert_eq!(json["kind"], "operator");
    assert_eq!(json["text"], ">=");
    assert_eq!(json["position"], 7);
}

#[test]
fn test_end_of_input_serializes_null_text() {
    let token = Token::bare(TokenKind::EndOfInput, 3);
    let json = token_to_json(&token);
    assert_eq!(json["kind"], "end_of_input");
    assert!(json["text"].is_null());
}
