//! Tokenize query text for inspection

use crate::{Lexer, Token, TokenKind};

/// Options for the scan command
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// The query text to tokenize
    pub query: String,
    /// Keep whitespace tokens in the stream
    pub keep_whitespace: bool,
}

/// Tokenize the query and collect the stream, end-of-input sentinel
/// included.
pub fn execute_scan(options: &ScanOptions) -> Vec<Token> {
    let mut lexer = Lexer::new(&options.query);
    let mut tokens = Vec::new();

    loop {
        let token = lexer.read_token(!options.keep_whitespace);
        let done = token.kind == TokenKind::EndOfInput;
        tokens.push(token);
        if done {
            break;
        }
    }

    tokens
}

#[test]
fn test_scan_elides_whitespace_by_default() {
    let options = ScanOptions {
        query: "a = 1".to_string(),
        keep_whitespace: false,
    };
    let kinds: Vec<TokenKind> = execute_scan(&options).iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Word,
            TokenKind::Operator,
            TokenKind::Int,
            TokenKind::EndOfInput,
        ]
    );
}

#[test]
fn test_scan_keeps_whitespace_when_asked() {
    let options = ScanOptions {
        query: "a = 1".to_string(),
        keep_whitespace: true,
    };
    let kinds: Vec<TokenKind> = execute_scan(&options).iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Word,
            TokenKind::Whitespace,
            TokenKind::Operator,
            TokenKind::Whitespace,
            TokenKind::Int,
            TokenKind::EndOfInput,
        ]
    );
}
