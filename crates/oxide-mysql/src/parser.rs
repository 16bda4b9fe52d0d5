//! The parse orchestrator.
//!
//! Every parse first runs the tree builder with bounded lookahead and the
//! bail strategy. Most input is well formed and finishes there. When that
//! pass gives up, the tokens are parsed again with speculative prediction and
//! error recovery, and only the second pass reports diagnostics.

use tracing::{debug, warn};

use oxide_mysql_grammar::error::{ErrorListener, ParseCancelled};
use oxide_mysql_grammar::lexer::{Lexer, LexerOptions, Token};
use oxide_mysql_grammar::parser::{ErrorStrategy, Parser, ParserOptions, PredictionMode, StartRule};
use oxide_mysql_grammar::tree::{Node, ParseTree, ParseTreeListener, ParseTreeWalker};

use crate::config::ParserConfig;
use crate::diagnostics::{LexerErrorTranslator, ParserErrorTranslator};
use crate::keywords;
use crate::resolver::ReferenceResolver;
use crate::result::ParseResult;
use crate::splitter::{self, Statement};

/// Caller supplied observers for a single parse.
///
/// The parser listener sees the tree walk of the completed pass. The error
/// listeners receive the raw engine events; parser events only come from the
/// recovering pass.
#[derive(Default)]
pub struct ParseHooks<'a> {
    pub parser_listener: Option<&'a mut dyn ParseTreeListener>,
    pub lexer_error_listener: Option<&'a mut dyn ErrorListener>,
    pub parser_error_listener: Option<&'a mut dyn ErrorListener>,
}

/// Entry point for parsing MySQL text with one configuration.
///
/// ```
/// use oxide_mysql::{MySqlParser, QueryType};
///
/// let parser = MySqlParser::default();
/// let result = parser.parse("SELECT id FROM users WHERE name = 'x'");
/// assert!(!result.has_errors());
/// assert_eq!(result.query_type(), QueryType::Select);
/// assert_eq!(result.tables().count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MySqlParser {
    config: ParserConfig,
}

impl MySqlParser {
    #[must_use]
    pub const fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Changes the server version used by later parses and keyword lookups.
    pub fn set_version(&mut self, version: impl Into<String>) {
        self.config.version = version.into();
    }

    /// Parses `text` as a script of statements.
    #[must_use]
    pub fn parse(&self, text: &str) -> ParseResult {
        self.parse_rule(text, StartRule::Query)
    }

    /// Parses `text` starting at the given grammar rule.
    #[must_use]
    pub fn parse_rule(&self, text: &str, start_rule: StartRule) -> ParseResult {
        self.parse_with_hooks(text, start_rule, ParseHooks::default())
    }

    /// Parses `text`, forwarding events to the observers in `hooks`.
    #[must_use]
    pub fn parse_with_hooks(
        &self,
        text: &str,
        start_rule: StartRule,
        hooks: ParseHooks<'_>,
    ) -> ParseResult {
        let ParseHooks {
            parser_listener,
            lexer_error_listener,
            parser_error_listener,
        } = hooks;
        let server_version = self.config.server_version();
        let lexer_options = LexerOptions {
            server_version,
            sql_mode: self.config.mode,
            charsets: self.config.charsets.clone(),
        };

        let mut lexer_errors = LexerErrorTranslator::new();
        let tokens = {
            let mut listener = (&mut lexer_errors, lexer_error_listener);
            Lexer::new(text, &lexer_options).tokenize(&mut listener)
        };

        let fast = ParserOptions {
            server_version,
            sql_mode: self.config.mode,
            prediction_mode: PredictionMode::Sll,
            error_strategy: ErrorStrategy::Bail,
        };
        let mut parser_errors = ParserErrorTranslator::new();
        let nodes = match run_pass(&tokens, fast, start_rule, &mut parser_errors) {
            Ok(nodes) => nodes,
            Err(cancelled) => {
                debug!(
                    rule = start_rule.name(),
                    token = cancelled.token_index,
                    "fast parse aborted, retrying with error recovery"
                );
                parser_errors.reset();
                let exact = ParserOptions {
                    prediction_mode: PredictionMode::Ll,
                    error_strategy: ErrorStrategy::Recover,
                    ..fast
                };
                let mut listener = (&mut parser_errors, parser_error_listener);
                let mut parser = Parser::new(&tokens, exact, &mut listener);
                if let Err(cancelled) = parser.parse(start_rule) {
                    warn!(token = cancelled.token_index, "recovering parse was cancelled");
                }
                parser.into_nodes()
            }
        };

        let tree = ParseTree::new(text, tokens, nodes);
        let mut resolver = ReferenceResolver::new();
        {
            let mut listener = (&mut resolver, parser_listener);
            ParseTreeWalker::walk(&mut listener, &tree);
        }

        ParseResult::new(
            tree,
            resolver.finish(),
            lexer_errors.into_error(),
            parser_errors.into_error(),
            self.config.version_family(),
        )
    }

    /// Splits a script with a `\n` line break and `;` as the initial delimiter.
    #[must_use]
    pub fn split_statements(&self, text: &str) -> Vec<Statement> {
        splitter::split_statements(text, "\n", ";")
    }

    /// Splits `text` and parses every statement on its own.
    ///
    /// Offsets inside each [`ParseResult`] are relative to its statement;
    /// add [`Statement::start`] to map them back into `text`.
    #[must_use]
    pub fn split_and_parse(&self, text: &str) -> Vec<(Statement, ParseResult)> {
        self.split_statements(text)
            .into_iter()
            .map(|statement| {
                let result = self.parse(&statement.text);
                (statement, result)
            })
            .collect()
    }

    /// All keywords of the configured version, sorted.
    #[must_use]
    pub fn keywords(&self) -> &'static [&'static str] {
        keywords::keywords(self.config.version_family())
    }

    /// Reserved keywords of the configured version, sorted.
    #[must_use]
    pub fn reserved_keywords(&self) -> &'static [&'static str] {
        keywords::reserved_keywords(self.config.version_family())
    }

    #[must_use]
    pub fn is_keyword(&self, word: &str) -> bool {
        keywords::is_keyword(word, self.config.version_family())
    }

    #[must_use]
    pub fn is_reserved_keyword(&self, word: &str) -> bool {
        keywords::is_reserved_keyword(word, self.config.version_family())
    }
}

fn run_pass(
    tokens: &[Token],
    options: ParserOptions,
    start_rule: StartRule,
    listener: &mut dyn ErrorListener,
) -> Result<Vec<Node>, ParseCancelled> {
    let mut parser = Parser::new(tokens, options, listener);
    parser.parse(start_rule)?;
    Ok(parser.into_nodes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxide_mysql_grammar::error::SyntaxErrorEvent;
    use oxide_mysql_grammar::tree::{RuleContext, RuleKind};

    #[derive(Default)]
    struct CountingErrors(usize);

    impl ErrorListener for CountingErrors {
        fn syntax_error(&mut self, _event: &SyntaxErrorEvent<'_>) {
            self.0 += 1;
        }
    }

    #[derive(Default)]
    struct ExitedRules(Vec<RuleKind>);

    impl ParseTreeListener for ExitedRules {
        fn exit_rule(&mut self, ctx: &RuleContext<'_>) {
            self.0.push(ctx.kind);
        }
    }

    #[test]
    fn test_valid_input_has_no_errors() {
        let result = MySqlParser::default().parse("SELECT id FROM users");
        assert!(result.lexer_error().is_none());
        assert!(result.parser_error().is_none());
        assert!(result.tree().root().is_some());
    }

    #[test]
    fn test_invalid_input_reports_parser_error() {
        let result = MySqlParser::default().parse("SELCT id FROM users");
        assert!(result.lexer_error().is_none());
        assert!(result.parser_error().is_some());
    }

    #[test]
    fn test_hooks_see_only_the_final_pass() {
        let parser = MySqlParser::default();
        let mut errors = CountingErrors::default();
        let mut rules = ExitedRules::default();
        let hooks = ParseHooks {
            parser_listener: Some(&mut rules),
            parser_error_listener: Some(&mut errors),
            ..ParseHooks::default()
        };
        let result = parser.parse_with_hooks("SELECT id FROM users", StartRule::Query, hooks);
        assert!(!result.has_errors());
        assert_eq!(errors.0, 0);
        assert!(rules.0.contains(&RuleKind::TableRef));
        assert_eq!(rules.0.last(), Some(&RuleKind::Query));

        let mut errors = CountingErrors::default();
        let hooks = ParseHooks {
            parser_error_listener: Some(&mut errors),
            ..ParseHooks::default()
        };
        let result = parser.parse_with_hooks("SELECT FROM", StartRule::Query, hooks);
        assert!(result.parser_error().is_some());
        assert!(errors.0 >= 1);
    }

    #[test]
    fn test_lexer_hook_receives_tokenizer_errors() {
        let mut errors = CountingErrors::default();
        let hooks = ParseHooks {
            lexer_error_listener: Some(&mut errors),
            ..ParseHooks::default()
        };
        let result = MySqlParser::default().parse_with_hooks("'", StartRule::Query, hooks);
        assert!(result.lexer_error().is_some());
        assert_eq!(errors.0, 1);
    }

    #[test]
    fn test_set_version_changes_keywords() {
        let mut parser = MySqlParser::default();
        assert!(parser.is_reserved_keyword("window"));
        parser.set_version("5.7.30");
        assert!(!parser.is_reserved_keyword("window"));
        assert_eq!(parser.config().version, "5.7.30");

        parser.set_version("garbage");
        assert!(parser.keywords().is_empty());
        assert!(!parser.is_keyword("select"));
    }

    #[test]
    fn test_start_rule_expr() {
        let result = MySqlParser::default().parse_rule("a + 1", StartRule::Expr);
        assert!(!result.has_errors());
        assert_eq!(result.columns().count(), 1);
    }

    #[test]
    fn test_split_and_parse() {
        let parser = MySqlParser::default();
        let pairs = parser.split_and_parse("SELECT 1; DROP TABLE t;\nSELEC 2");
        assert_eq!(pairs.len(), 3);
        assert!(!pairs[0].1.has_errors());
        assert!(pairs[1].1.is_ddl());
        assert!(pairs[2].1.parser_error().is_some());
        assert_eq!(pairs[2].0.start, 24);
    }
}
