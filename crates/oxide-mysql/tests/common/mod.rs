#![allow(dead_code)]

use oxide_mysql::{MySqlParser, ParseResult, ParserConfig, Statement};

/// Parses `sql` with the default 8.0 configuration.
pub fn parse(sql: &str) -> ParseResult {
    MySqlParser::default().parse(sql)
}

/// Parses `sql` for the given server version.
pub fn parse_for(version: &str, sql: &str) -> ParseResult {
    MySqlParser::new(ParserConfig::with_version(version)).parse(sql)
}

/// Parses `sql` and panics when any diagnostic is reported.
pub fn parse_clean(sql: &str) -> ParseResult {
    let result = parse(sql);
    assert!(
        !result.has_errors(),
        "errors for {sql}: {:?}",
        result.diagnostics()
    );
    result
}

pub fn texts(statements: &[Statement]) -> Vec<&str> {
    statements.iter().map(|s| s.text.as_str()).collect()
}

/// Byte offset of the first occurrence of `needle` in `sql`.
pub fn offset_of(sql: &str, needle: &str) -> usize {
    sql.find(needle)
        .unwrap_or_else(|| panic!("{needle} not found in {sql}"))
}
