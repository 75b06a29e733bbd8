pub mod cli;
pub mod cursor;
pub mod lexer;
pub mod output;
pub mod token;

pub use cursor::Cursor;
pub use lexer::Lexer;
pub use output::{token_to_json, tokens_to_json};
pub use token::{Token, TokenError, TokenKind};
