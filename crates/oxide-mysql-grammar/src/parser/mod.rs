//! MySQL tree builder
//!
//! A recursive descent parser that builds a [`ParseTree`](crate::tree::ParseTree)
//! with one rule node per grammar rule. Expressions follow MySQL's precedence
//! ladder; bit expressions use Pratt parsing.
//!
//! Two knobs mirror a table-driven parser:
//! - [`PredictionMode`]: `Sll` commits to an alternative from the next one or
//!   two tokens, `Ll` speculatively tries ambiguous alternatives and backtracks.
//! - [`ErrorStrategy`]: `Bail` gives up at the first syntax error without
//!   reporting it, `Recover` reports every error and keeps going.

mod ddl;
mod dml;
mod expr;
mod parser;
mod pratt;
mod select;
mod utility;

use core::str::FromStr;

use thiserror::Error;

pub use parser::Parser;

use crate::sql_mode::SqlMode;
use crate::version::ServerVersion;

/// How ambiguous decisions are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PredictionMode {
    /// Commit to an alternative using bounded lookahead.
    #[default]
    Sll,
    /// Try ambiguous alternatives speculatively and backtrack on failure.
    Ll,
}

/// What happens on a syntax error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorStrategy {
    /// Abort with [`ParseCancelled`](crate::error::ParseCancelled), reporting nothing.
    Bail,
    /// Report the error, repair or resynchronise, and continue.
    #[default]
    Recover,
}

/// Settings for one parser run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    pub server_version: ServerVersion,
    pub sql_mode: SqlMode,
    pub prediction_mode: PredictionMode,
    pub error_strategy: ErrorStrategy,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            server_version: ServerVersion::V8_0,
            sql_mode: SqlMode::NO_MODE,
            prediction_mode: PredictionMode::Ll,
            error_strategy: ErrorStrategy::Recover,
        }
    }
}

/// Grammar rules that can be used as entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StartRule {
    /// A script of statements separated by `;`.
    #[default]
    Query,
    SimpleStatement,
    SelectStatement,
    Expr,
    Identifier,
}

impl StartRule {
    /// Returns the grammar name of the rule.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::SimpleStatement => "simpleStatement",
            Self::SelectStatement => "selectStatement",
            Self::Expr => "expr",
            Self::Identifier => "identifier",
        }
    }
}

/// Error for start rule names the parser has no entry point for.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown start rule: {0}")]
pub struct UnknownStartRule(pub String);

impl FromStr for StartRule {
    type Err = UnknownStartRule;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "query" => Ok(Self::Query),
            "simpleStatement" => Ok(Self::SimpleStatement),
            "selectStatement" => Ok(Self::SelectStatement),
            "expr" => Ok(Self::Expr),
            "identifier" => Ok(Self::Identifier),
            _ => Err(UnknownStartRule(s.to_string())),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::error::{ErrorListener, SyntaxErrorEvent};
    use crate::lexer::{Lexer, LexerOptions};
    use crate::tree::ParseTree;

    use super::{Parser, ParserOptions, StartRule};

    #[derive(Default)]
    pub struct Messages(pub Vec<String>);

    impl ErrorListener for Messages {
        fn syntax_error(&mut self, event: &SyntaxErrorEvent<'_>) {
            self.0.push(event.message.to_string());
        }
    }

    /// Tokenizes and parses `sql`, returning the tree and the raw error messages.
    pub fn parse(sql: &str, rule: StartRule, options: ParserOptions) -> (ParseTree, Vec<String>) {
        let lexer_options = LexerOptions {
            server_version: options.server_version,
            sql_mode: options.sql_mode,
            ..LexerOptions::default()
        };
        let tokens = Lexer::new(sql, &lexer_options).tokenize(&mut ());
        let mut messages = Messages::default();
        let mut parser = Parser::new(&tokens, options, &mut messages);
        let _ = parser.parse(rule);
        let nodes = parser.into_nodes();
        (ParseTree::new(sql, tokens, nodes), messages.0)
    }

    /// Parses with default options, asserts there were no errors and renders the tree.
    pub fn render(sql: &str, rule: StartRule) -> String {
        let (tree, messages) = parse(sql, rule, ParserOptions::default());
        assert!(messages.is_empty(), "errors for {sql}: {messages:?}");
        tree.root()
            .map(|root| tree.to_string_tree(root))
            .unwrap_or_default()
    }
}
