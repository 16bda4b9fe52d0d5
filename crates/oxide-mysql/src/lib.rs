//! # oxide-mysql
//!
//! MySQL text analysis for editors and language tooling.
//!
//! This crate provides:
//! - A delimiter-aware statement splitter that understands comments, quoting
//!   and the `DELIMITER` directive
//! - A two-pass parser that is fast on valid input and precise on broken input,
//!   with at most one tokenizer error and one parser error per call
//! - A reference graph of tables, schemas, columns, aliases, literal values and
//!   function calls, with single-table inference for unqualified columns
//! - A token based query type classifier that works on unparseable statements
//! - Keyword and reserved word lookups per server version
//!
//! ## Parsing
//!
//! ```rust
//! use oxide_mysql::{MySqlParser, Reference};
//!
//! let parser = MySqlParser::default();
//! let result = parser.parse("SELECT id FROM users");
//!
//! let table = result.tables().next().unwrap();
//! let column = result.columns().next().unwrap();
//! assert_eq!(table.table, "users");
//! assert_eq!(column.table, Some(table.id));
//!
//! // Offsets are byte positions in the parsed text.
//! assert!(matches!(result.node_at_offset(16), Some(Reference::Table(_))));
//! assert!(matches!(result.node_at_offset(0), Some(Reference::Keyword(_))));
//! ```
//!
//! ## Errors
//!
//! Malformed SQL never fails the call. The result carries the diagnostics:
//!
//! ```rust
//! use oxide_mysql::{MySqlParser, ParserConfig};
//!
//! let parser = MySqlParser::new(ParserConfig::with_version("5.7.0"));
//! let result = parser.parse("CREATE ROLE app_developer");
//! assert!(result.parser_error().is_some());
//!
//! let result = MySqlParser::default().parse("\"");
//! let error = result.lexer_error().unwrap();
//! assert_eq!(error.message, "Unfinished double quoted string literal");
//! ```

pub mod config;
pub mod diagnostics;
pub mod keywords;
pub mod parser;
pub mod query_type;
pub mod references;
pub mod resolver;
pub mod result;
pub mod splitter;

pub use config::{ConfigError, ParserConfig};
pub use diagnostics::{LexerError, ParserError, Position, SyntaxDiagnostic};
pub use keywords::{is_keyword, is_reserved_keyword, version_to_number};
pub use parser::{MySqlParser, ParseHooks};
pub use query_type::{QueryType, classify};
pub use references::{
    AliasReference, AliasTarget, Clause, ColumnReference, DataType, FunctionReference,
    KeywordReference, Reference, ReferenceId, SchemaReference, TableReference, ValueReference,
    unquote,
};
pub use result::ParseResult;
pub use splitter::{Statement, split_statements, statement_at_offset};

pub use oxide_mysql_grammar::{SqlMode, StartRule, Token, VersionFamily};
