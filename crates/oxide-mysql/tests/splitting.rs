//! Script splitting through the public API.

mod common;
use common::*;

use oxide_mysql::{MySqlParser, Statement, split_statements, statement_at_offset};

#[test]
fn two_statement_script() {
    let statements =
        MySqlParser::default().split_statements("SELECT * FROM users; SELECT * FROM posts;");
    assert_eq!(
        statements,
        vec![
            Statement {
                text: "SELECT * FROM users".to_string(),
                start: 0,
                stop: 19,
            },
            Statement {
                text: "SELECT * FROM posts".to_string(),
                start: 21,
                stop: 40,
            },
        ]
    );
}

#[test]
fn single_delimiter_yields_trimmed_statement() {
    for sql in ["SELECT 1;", "  SELECT 1  ;  ", "\n\tSELECT 1\n;"] {
        let statements = split_statements(sql, "\n", ";");
        assert_eq!(texts(&statements), vec!["SELECT 1"], "input {sql:?}");
    }
}

#[test]
fn comments_and_whitespace_yield_nothing() {
    for sql in ["-- just a comment\n", "# note", "/* block */", "   \n\t ", ""] {
        assert!(split_statements(sql, "\n", ";").is_empty(), "input {sql:?}");
    }
}

#[test]
fn spans_map_back_into_the_script() {
    let sql = "-- setup\nCREATE TABLE t (a INT);\n\nINSERT INTO t VALUES ('a;b');\nSELECT a FROM t";
    let statements = split_statements(sql, "\n", ";");
    assert_eq!(statements.len(), 3);
    for statement in &statements {
        assert_eq!(&sql[statement.start..statement.stop], statement.text);
    }
    assert_eq!(statements[1].text, "INSERT INTO t VALUES ('a;b')");
}

#[test]
fn procedure_body_with_custom_delimiter() {
    let sql = "DELIMITER //\n\
               CREATE PROCEDURE p()\nBEGIN\n  SELECT 1;\n  SELECT 2;\nEND //\n\
               DELIMITER ;\n\
               CALL p();";
    let statements = split_statements(sql, "\n", ";");
    assert_eq!(
        texts(&statements),
        vec![
            "CREATE PROCEDURE p()\nBEGIN\n  SELECT 1;\n  SELECT 2;\nEND",
            "CALL p()"
        ]
    );
}

#[test]
fn directive_after_unterminated_statement() {
    let sql = "USE shop\nDELIMITER $$\nCREATE TRIGGER t BEFORE INSERT ON o FOR EACH ROW SET @n = 1$$\n";
    let statements = split_statements(sql, "\n", ";");
    assert_eq!(
        texts(&statements),
        vec![
            "USE shop",
            "CREATE TRIGGER t BEFORE INSERT ON o FOR EACH ROW SET @n = 1"
        ]
    );
}

#[test]
fn statement_lookup() {
    let statements = split_statements("SELECT * FROM users; SELECT * FROM posts;", "\n", ";");
    assert_eq!(statement_at_offset(&statements, 33), statements.get(1));
    assert_eq!(statement_at_offset(&statements, 0), statements.first());
    assert_eq!(statement_at_offset(&statements, 20), None);
    assert_eq!(statement_at_offset(&statements, 100), None);

    let single = split_statements("SELECT 1", "\n", ";");
    assert_eq!(statement_at_offset(&single, 4), single.first());
}

#[test]
fn offsets_outside_every_statement() {
    let sql = "  SELECT 1;   SELECT 2;  ";
    let statements = split_statements(sql, "\n", ";");
    for offset in 0..sql.len() + 2 {
        let inside = statements.iter().any(|s| s.start <= offset && offset <= s.stop);
        assert_eq!(statement_at_offset(&statements, offset).is_some(), inside);
    }
    assert_eq!(statement_at_offset(&statements, 0), None);
}

#[test]
fn statements_serialize_as_json() {
    let statements = split_statements("SELECT 1", "\n", ";");
    let json = serde_json::to_value(&statements).unwrap();
    assert_eq!(json, serde_json::json!([{"text": "SELECT 1", "start": 0, "stop": 8}]));
}
