// tests/scanner_api_tests.rs
//
// Lookahead buffering, whitespace interaction, the expect guards, and
// cursor/position behavior.

use sift_lang::lexer::Lexer;
use sift_lang::token::{Token, TokenError, TokenKind};

// ============================================================================
// Lookahead
// ============================================================================

#[test]
fn test_look_ahead_then_read_returns_identical_token() {
    let mut lexer = Lexer::new("alpha beta");

    let peeked = lexer.look_ahead(true);
    let read = lexer.read_token(true);
    assert_eq!(peeked, read);
    assert_eq!(read.text(), "alpha");

    // The cursor advanced once, not twice
    let next = lexer.read_token(true);
    assert_eq!(next.text(), "beta");
}

#[test]
fn test_look_ahead_is_idempotent() {
    let mut lexer = Lexer::new("alpha beta");

    let first = lexer.look_ahead(true);
    let second = lexer.look_ahead(true);
    let third = lexer.look_ahead(true);
    assert_eq!(first, second);
    assert_eq!(second, third);

    assert_eq!(lexer.read_token(true), first);
}

#[test]
fn test_look_ahead_does_not_become_current() {
    let mut lexer = Lexer::new("a b");

    assert!(lexer.current().is_none());
    lexer.look_ahead(true);
    assert!(lexer.current().is_none());

    let token = lexer.read_token(true);
    assert_eq!(lexer.current(), Some(&token));
}

#[test]
fn test_look_ahead_at_end_of_input() {
    let mut lexer = Lexer::new("");
    assert_eq!(lexer.look_ahead(true).kind, TokenKind::EndOfInput);
    assert_eq!(lexer.read_token(true).kind, TokenKind::EndOfInput);
}

// ============================================================================
// Whitespace vs. Lookahead
// ============================================================================

#[test]
fn test_buffered_whitespace_is_discarded_when_skipping() {
    let mut lexer = Lexer::new("a b");

    let a = lexer.read_token(false);
    assert_eq!(a.text(), "a");

    // Buffer a real whitespace token, then ask for whitespace-free reading:
    // the stale buffer must be dropped and the scan must resume past the run.
    let buffered = lexer.look_ahead(false);
    assert_eq!(buffered.kind, TokenKind::Whitespace);

    let b = lexer.read_token(true);
    assert_eq!(b.kind, TokenKind::Word);
    assert_eq!(b.text(), "b");
}

#[test]
fn test_buffered_whitespace_survives_when_not_skipping() {
    let mut lexer = Lexer::new("a  b");

    lexer.read_token(false);
    let buffered = lexer.look_ahead(false);
    assert_eq!(buffered.kind, TokenKind::Whitespace);

    // Same whitespace intent: the exact buffered token comes back
    let read = lexer.read_token(false);
    assert_eq!(read, buffered);
    assert_eq!(read.text(), "  ");

    assert_eq!(lexer.read_token(false).text(), "b");
}

#[test]
fn test_look_ahead_replaces_stale_whitespace_buffer() {
    let mut lexer = Lexer::new("a b");

    lexer.read_token(false);
    assert_eq!(lexer.look_ahead(false).kind, TokenKind::Whitespace);

    // A skipping peek discards the buffered run and re-buffers the word
    let replacement = lexer.look_ahead(true);
    assert_eq!(replacement.kind, TokenKind::Word);
    assert_eq!(replacement.text(), "b");

    // The buffered word is returned regardless of the whitespace flag
    let read = lexer.read_token(false);
    assert_eq!(read, replacement);
}

#[test]
fn test_buffered_word_returned_for_either_flag() {
    let mut lexer = Lexer::new("x y");

    let peeked = lexer.look_ahead(true);
    assert_eq!(peeked.text(), "x");

    let read = lexer.read_token(false);
    assert_eq!(read, peeked);
}

// ============================================================================
// End-of-Input Guard
// ============================================================================

#[test]
fn test_check_end_of_input_before_any_read() {
    let lexer = Lexer::new("");
    assert_eq!(lexer.check_end_of_input(), Ok(false));
}

#[test]
fn test_check_end_of_input_fails_at_sentinel() {
    let mut lexer = Lexer::new("");
    lexer.read_token(true);

    let error = lexer.check_end_of_input().unwrap_err();
    let TokenError::UnexpectedToken(token) = error;
    assert_eq!(token.kind, TokenKind::EndOfInput);
}

#[test]
fn test_check_end_of_input_passes_mid_stream() {
    let mut lexer = Lexer::new("a b");
    lexer.read_token(true);
    assert_eq!(lexer.check_end_of_input(), Ok(false));
}

#[test]
fn test_guard_stops_runaway_consumption_loop() {
    // A parser waiting for a ']' that never comes must error, not spin
    let mut lexer = Lexer::new("[1, 2");
    assert_eq!(lexer.read_token(true).kind, TokenKind::OpenBracket);

    let mut error = None;
    for _ in 0..100 {
        let token = lexer.read_token(true);
        if token.kind == TokenKind::CloseBracket {
            break;
        }
        if let Err(e) = lexer.check_end_of_input() {
            error = Some(e);
            break;
        }
    }

    let error = error.expect("guard never fired");
    assert_eq!(error.token().kind, TokenKind::EndOfInput);
}

// ============================================================================
// Expect Guards
// ============================================================================

#[test]
fn test_expect_matching_kind_returns_token() {
    let mut lexer = Lexer::new("price");
    let token = lexer.read_token(true).expect(TokenKind::Word).unwrap();
    assert_eq!(token.text(), "price");
}

#[test]
fn test_expect_mismatch_carries_offending_token() {
    let mut lexer = Lexer::new("42");
    let error = lexer
        .read_token(true)
        .expect(TokenKind::Word)
        .unwrap_err();

    let offending = error.token();
    assert_eq!(offending.kind, TokenKind::Int);
    assert_eq!(offending.text(), "42");
}

#[test]
fn test_expect_either() {
    let mut lexer = Lexer::new("3.5 ,");

    let number = lexer
        .read_token(true)
        .expect_either(TokenKind::Int, TokenKind::Double)
        .unwrap();
    assert_eq!(number.text(), "3.5");

    let error = lexer
        .read_token(true)
        .expect_either(TokenKind::Int, TokenKind::Double)
        .unwrap_err();
    assert_eq!(error.token().kind, TokenKind::Comma);
}

#[test]
fn test_unexpected_token_display() {
    let token = Token::new(TokenKind::Operator, ">=", 12);
    let error = TokenError::UnexpectedToken(token);
    let message = error.to_string();
    assert!(message.contains("Unexpected token"), "got: {}", message);
    assert!(message.contains(">="), "got: {}", message);
    assert!(message.contains("12"), "got: {}", message);
}

// ============================================================================
// Construction and Positions
// ============================================================================

#[test]
fn test_str_and_source_constructions_agree() {
    let input = r#"{"a": 1.5} BETWEEN"#;
    let mut from_str = Lexer::new(input);
    let mut from_source = Lexer::from_source(input.chars());

    loop {
        let a = from_str.read_token(true);
        let b = from_source.read_token(true);
        assert_eq!(a, b);
        if a.kind == TokenKind::EndOfInput {
            break;
        }
    }
    assert_eq!(from_str.position(), from_source.position());
    assert!(from_str.at_end());
    assert!(from_source.at_end());
}

#[test]
fn test_positions_are_monotonic() {
    let mut lexer = Lexer::new(r#"$[price] >= 10 AND name LIKE "J%""#);

    let mut last = 0;
    loop {
        let token = lexer.read_token(true);
        assert!(
            token.position >= last,
            "position went backwards: {} after {}",
            token.position,
            last
        );
        last = token.position;
        if token.kind == TokenKind::EndOfInput {
            break;
        }
    }
}

#[test]
fn test_position_records_completion_not_start() {
    // Offsets mark where scanning finished, so a later token always carries
    // a larger offset than an earlier one even when lexemes are long.
    let mut lexer = Lexer::new("alpha beta");
    let alpha = lexer.read_token(true);
    let beta = lexer.read_token(true);
    assert!(alpha.position >= "alpha".len());
    assert!(beta.position > alpha.position);
}

#[test]
fn test_at_end_tracks_the_cursor() {
    let mut lexer = Lexer::new("a");
    assert!(!lexer.at_end());
    lexer.read_token(true);
    assert!(lexer.at_end());
}

// ============================================================================
// Sessions
// ============================================================================

#[test]
fn test_independent_sessions_do_not_interfere() {
    let mut first = Lexer::new("a AND b");
    let mut second = Lexer::new("1 OR 2");

    assert_eq!(first.read_token(true).text(), "a");
    assert_eq!(second.read_token(true).text(), "1");
    assert_eq!(first.read_token(true).text(), "AND");
    assert_eq!(second.read_token(true).text(), "OR");
    assert_eq!(first.read_token(true).text(), "b");
    assert_eq!(second.read_token(true).text(), "2");
}
