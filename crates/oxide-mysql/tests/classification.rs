//! Query type classification of parse results.

mod common;
use common::*;

use oxide_mysql::{MySqlParser, QueryType, classify};

#[test]
fn classifies_common_statements() {
    let cases = [
        ("SELECT 1", QueryType::Select),
        ("insert into t values (1)", QueryType::Insert),
        ("UPDATE t SET a = 1", QueryType::Update),
        ("DELETE FROM t", QueryType::Delete),
        ("CREATE TABLE t (a INT)", QueryType::CreateTable),
        ("DROP TABLE t", QueryType::DropTable),
        ("TRUNCATE TABLE t", QueryType::TruncateTable),
        ("SHOW FULL TABLES", QueryType::ShowTables),
        ("USE shop", QueryType::Use),
    ];
    for (sql, expected) in cases {
        assert_eq!(parse(sql).query_type(), expected, "{sql}");
    }
}

#[test]
fn broken_statements_still_classify() {
    let result = parse("SELECT FROM WHERE");
    assert!(result.parser_error().is_some());
    assert_eq!(result.query_type(), QueryType::Select);

    let result = parse("CREATE");
    assert_eq!(result.query_type(), QueryType::Ambiguous);
}

#[test]
fn comments_and_whitespace_are_skipped() {
    let result = parse("/* header */ -- note\n  (SELECT 1)");
    assert_eq!(result.query_type(), QueryType::Select);
}

#[test]
fn ddl_membership() {
    assert!(parse("ALTER TABLE t ADD COLUMN b INT").is_ddl());
    assert!(parse("RENAME TABLE a TO b").is_ddl());
    assert!(!parse("SELECT 1").is_ddl());
    assert!(!parse("SHOW TABLES").is_ddl());
}

#[test]
fn classify_raw_tokens() {
    let result = MySqlParser::default().parse("EXPLAIN SELECT 1");
    assert_eq!(classify(result.tokens()), QueryType::ExplainStatement);
    assert_eq!(QueryType::ExplainStatement.as_str(), "explain_statement");
}

#[test]
fn split_scripts_classify_each_statement() {
    let parser = MySqlParser::default();
    let kinds: Vec<_> = parser
        .split_and_parse("BEGIN; UPDATE t SET a = 1; COMMIT;")
        .iter()
        .map(|(_, result)| result.query_type())
        .collect();
    assert_eq!(
        kinds,
        vec![QueryType::BeginWork, QueryType::Update, QueryType::Commit]
    );
}

#[test]
fn quoted_routine_names() {
    assert_eq!(
        parse("CREATE FUNCTION `f`() RETURNS INT RETURN 1").query_type(),
        QueryType::CreateFunction
    );
    assert_eq!(
        parse("CREATE AGGREGATE FUNCTION `median` RETURNS REAL SONAME 'udf.so'").query_type(),
        QueryType::CreateUdf
    );
}
