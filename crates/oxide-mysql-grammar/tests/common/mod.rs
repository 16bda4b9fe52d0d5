#![allow(dead_code)]

use oxide_mysql_grammar::error::{ErrorListener, ErrorOrigin, SyntaxErrorEvent};
use oxide_mysql_grammar::lexer::{Lexer, LexerOptions, Token};
use oxide_mysql_grammar::parser::{Parser, ParserOptions, StartRule};
use oxide_mysql_grammar::tree::ParseTree;
use oxide_mysql_grammar::ParseCancelled;

/// One reported syntax error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reported {
    pub message: String,
    pub line: usize,
    pub column: usize,
    pub from_lexer: bool,
}

#[derive(Debug, Default)]
pub struct Recorder(pub Vec<Reported>);

impl ErrorListener for Recorder {
    fn syntax_error(&mut self, event: &SyntaxErrorEvent<'_>) {
        self.0.push(Reported {
            message: event.message.to_string(),
            line: event.line,
            column: event.column,
            from_lexer: matches!(event.origin, ErrorOrigin::Lexer { .. }),
        });
    }
}

pub fn tokenize(sql: &str, options: &ParserOptions) -> Vec<Token> {
    let lexer_options = LexerOptions {
        server_version: options.server_version,
        sql_mode: options.sql_mode,
        ..LexerOptions::default()
    };
    Lexer::new(sql, &lexer_options).tokenize(&mut ())
}

/// Parses `sql` from `rule` and returns the tree, the reported errors and the
/// parser outcome.
pub fn parse_with(
    sql: &str,
    rule: StartRule,
    options: ParserOptions,
) -> (ParseTree, Vec<Reported>, Result<(), ParseCancelled>) {
    let tokens = tokenize(sql, &options);
    let mut recorder = Recorder::default();
    let mut parser = Parser::new(&tokens, options, &mut recorder);
    let outcome = parser.parse(rule);
    let nodes = parser.into_nodes();
    (ParseTree::new(sql, tokens, nodes), recorder.0, outcome)
}

/// Parses a script with default options and panics on any error.
pub fn parse_query(sql: &str) -> ParseTree {
    let (tree, errors, outcome) = parse_with(sql, StartRule::Query, ParserOptions::default());
    assert!(outcome.is_ok(), "parse of {sql} was cancelled");
    assert!(errors.is_empty(), "errors for {sql}: {errors:?}");
    tree
}

pub fn string_tree(tree: &ParseTree) -> String {
    tree.root()
        .map(|root| tree.to_string_tree(root))
        .unwrap_or_default()
}
