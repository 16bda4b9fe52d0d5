//! # oxide-mysql-grammar
//!
//! Version aware tokenizer and tree builder for the MySQL dialect.
//!
//! This crate provides:
//! - A hand-written tokenizer with per-version keyword tables and SQL mode
//!   sensitive quoting rules
//! - A recursive descent tree builder with Pratt expression parsing and two
//!   prediction modes
//! - An arena-based parse tree with a depth-first walker
//!
//! ```rust
//! use oxide_mysql_grammar::lexer::{Lexer, LexerOptions};
//! use oxide_mysql_grammar::parser::{Parser, ParserOptions, StartRule};
//! use oxide_mysql_grammar::tree::ParseTree;
//!
//! let sql = "SELECT id FROM users";
//! let tokens = Lexer::new(sql, &LexerOptions::default()).tokenize(&mut ());
//! let mut errors = ();
//! let mut parser = Parser::new(&tokens, ParserOptions::default(), &mut errors);
//! parser.parse(StartRule::Query).unwrap();
//! let nodes = parser.into_nodes();
//! let tree = ParseTree::new(sql, tokens, nodes);
//!
//! let root = tree.root().unwrap();
//! assert!(tree.to_string_tree(root).starts_with("(query (simpleStatement (selectStatement"));
//! ```

pub mod error;
pub mod lexer;
pub mod parser;
pub mod sql_mode;
pub mod tree;
pub mod version;

pub use error::{ErrorListener, ErrorOrigin, ParseCancelled, RecognitionKind, SyntaxErrorEvent};
pub use lexer::{Keyword, Lexer, LexerOptions, Token, TokenType};
pub use parser::{ErrorStrategy, Parser, ParserOptions, PredictionMode, StartRule};
pub use sql_mode::SqlMode;
pub use tree::{NodeId, ParseTree, ParseTreeListener, ParseTreeWalker, RuleContext, RuleKind};
pub use version::{ServerVersion, VersionFamily};
