//! Prediction modes, error strategies and version gates.

mod common;
use common::*;

use oxide_mysql_grammar::parser::{ErrorStrategy, ParserOptions, PredictionMode, StartRule};
use oxide_mysql_grammar::ServerVersion;

fn options(prediction_mode: PredictionMode, error_strategy: ErrorStrategy) -> ParserOptions {
    ParserOptions {
        prediction_mode,
        error_strategy,
        ..ParserOptions::default()
    }
}

#[test]
fn bail_cancels_without_reporting() {
    let (_, errors, outcome) = parse_with(
        "SELECT FROM",
        StartRule::Query,
        options(PredictionMode::Sll, ErrorStrategy::Bail),
    );
    assert!(errors.is_empty());
    assert!(outcome.is_err());
}

#[test]
fn bail_accepts_valid_input() {
    let (_, errors, outcome) = parse_with(
        "SELECT a FROM t WHERE b = 1",
        StartRule::Query,
        options(PredictionMode::Sll, ErrorStrategy::Bail),
    );
    assert!(errors.is_empty());
    assert!(outcome.is_ok());
}

#[test]
fn nested_table_parens_need_full_prediction() {
    let sql = "SELECT * FROM ((t1 JOIN t2))";
    let (_, _, fast) = parse_with(
        sql,
        StartRule::Query,
        options(PredictionMode::Sll, ErrorStrategy::Bail),
    );
    assert!(fast.is_err());

    let (_, errors, full) = parse_with(
        sql,
        StartRule::Query,
        options(PredictionMode::Ll, ErrorStrategy::Recover),
    );
    assert!(full.is_ok());
    assert!(errors.is_empty());
}

#[test]
fn recover_reports_and_resumes_at_next_statement() {
    let (tree, errors, outcome) = parse_with(
        "SELECT * FROM; SELECT 2",
        StartRule::Query,
        ParserOptions::default(),
    );
    assert!(outcome.is_ok());
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.starts_with("mismatched input ';' expecting"));
    assert_eq!((errors[0].line, errors[0].column), (1, 13));
    assert_eq!(string_tree(&tree).matches("(simpleStatement").count(), 2);
}

#[test]
fn missing_closing_parenthesis_is_repaired() {
    let (_, errors, _) = parse_with("SELECT (1 + 2", StartRule::Query, ParserOptions::default());
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "missing ) at '<EOF>'");
}

#[test]
fn extraneous_token_is_deleted() {
    let (_, errors, _) = parse_with("SELECT (1 2)", StartRule::Query, ParserOptions::default());
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.starts_with("extraneous input '2' expecting"));
}

#[test]
fn role_statements_are_gated_by_version() {
    let (_, errors, _) = parse_with(
        "CREATE ROLE r1",
        StartRule::Query,
        ParserOptions {
            server_version: ServerVersion::new(8, 0, 11),
            ..ParserOptions::default()
        },
    );
    assert!(errors.is_empty());

    let (_, errors, _) = parse_with(
        "CREATE ROLE r1",
        StartRule::Query,
        ParserOptions {
            server_version: ServerVersion::new(5, 7, 30),
            ..ParserOptions::default()
        },
    );
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "no viable alternative at input 'ROLE'");
}

#[test]
fn reserved_words_follow_the_version_family() {
    let parse_for = |server_version| {
        let (_, errors, _) = parse_with(
            "SELECT rank FROM scores",
            StartRule::Query,
            ParserOptions {
                server_version,
                ..ParserOptions::default()
            },
        );
        errors
    };
    assert!(parse_for(ServerVersion::new(5, 7, 30)).is_empty());
    assert!(!parse_for(ServerVersion::new(8, 0, 2)).is_empty());
}

#[test]
fn unknown_statement_is_not_viable() {
    let (_, errors, _) = parse_with("FOO bar", StartRule::Query, ParserOptions::default());
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "no viable alternative at input 'FOO'");
}
