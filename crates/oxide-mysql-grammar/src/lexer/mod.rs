//! MySQL Lexer/Tokenizer
//!
//! A hand-written tokenizer that emits every token, whitespace and comments on
//! the hidden channel, so offsets can be mapped back to the source text.

mod keywords;
mod token;
mod tokenizer;

pub use keywords::{Keyword, KeywordStatus};
pub use token::{Channel, Token, TokenStream, TokenType};
pub use tokenizer::{Lexer, LexerOptions, DEFAULT_CHARSETS};
