//! Delimiter-aware statement splitting.
//!
//! Follows the rules of the `mysql` command line client: comments and quoted
//! text hide delimiters, and a `DELIMITER` directive ends the pending
//! statement and changes the terminator for the rest of the script.

use serde::Serialize;
use tracing::trace;

const DELIMITER_KEYWORD: &str = "delimiter";

/// One statement of a script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statement {
    /// The statement text without its delimiter and surrounding whitespace.
    pub text: String,
    /// Byte offset of the first byte.
    pub start: usize,
    /// Byte offset one past the last byte.
    pub stop: usize,
}

impl Statement {
    /// Returns true if `offset` lies within `[start, stop]`.
    #[must_use]
    pub const fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset <= self.stop
    }
}

/// Splits `text` into statements.
///
/// `line_break` ends line comments and `DELIMITER` directives; `delimiter` is
/// the initial statement terminator.
///
/// ```
/// use oxide_mysql::split_statements;
///
/// let statements = split_statements("SELECT 1; -- done\nSELECT 2", "\n", ";");
/// assert_eq!(statements.len(), 2);
/// assert_eq!(statements[1].text, "SELECT 2");
/// ```
#[must_use]
pub fn split_statements(text: &str, line_break: &str, delimiter: &str) -> Vec<Statement> {
    let bytes = text.as_bytes();
    let line_break = if line_break.is_empty() { "\n" } else { line_break };
    let mut delimiter = if delimiter.is_empty() { ";" } else { delimiter }.to_string();
    let mut statements = Vec::new();

    let mut head = 0;
    let mut tail = 0;
    let mut have_content = false;

    while tail < bytes.len() {
        match bytes[tail] {
            b'/' if bytes.get(tail + 1) == Some(&b'*') => {
                let hidden_command = bytes.get(tail + 2) == Some(&b'!');
                let end = find(text, "*/", tail + 2).map_or(bytes.len(), |pos| pos + 2);
                if hidden_command {
                    have_content = true;
                } else if !have_content {
                    head = end;
                }
                tail = end;
            }
            b'-' if bytes.get(tail + 1) == Some(&b'-')
                && is_comment_dash_end(text, tail + 2, line_break) =>
            {
                tail = line_end(text, tail, line_break);
                if !have_content {
                    head = tail;
                }
            }
            b'#' => {
                tail = line_end(text, tail, line_break);
                if !have_content {
                    head = tail;
                }
            }
            quote @ (b'"' | b'\'' | b'`') => {
                have_content = true;
                tail = skip_quoted(bytes, tail, quote);
            }
            b'd' | b'D' if at_delimiter_directive(text, tail) => {
                push_statement(&mut statements, text, head, tail);
                let value_start = tail + DELIMITER_KEYWORD.len();
                let value_end = find(text, line_break, value_start).unwrap_or(bytes.len());
                let value = text.get(value_start..value_end).unwrap_or_default().trim();
                if !value.is_empty() {
                    delimiter = value.to_string();
                }
                let mut run = value_end;
                while text.get(run..).is_some_and(|rest| rest.starts_with(line_break)) {
                    run += line_break.len();
                }
                tail = run;
                head = run;
                have_content = false;
            }
            _ if text.get(tail..).is_some_and(|rest| rest.starts_with(delimiter.as_str())) => {
                push_statement(&mut statements, text, head, tail);
                tail += delimiter.len();
                head = tail;
                have_content = false;
            }
            byte => {
                if !byte.is_ascii_whitespace() {
                    have_content = true;
                }
                tail += 1;
            }
        }
    }
    push_statement(&mut statements, text, head, bytes.len());
    statements
}

/// Returns the first statement whose span contains `offset`.
#[must_use]
pub fn statement_at_offset(statements: &[Statement], offset: usize) -> Option<&Statement> {
    statements.iter().find(|statement| statement.contains(offset))
}

fn find(text: &str, needle: &str, from: usize) -> Option<usize> {
    text.get(from..)
        .and_then(|rest| rest.find(needle))
        .map(|pos| pos + from)
}

/// Offset just past the line break ending the line that contains `from`.
fn line_end(text: &str, from: usize, line_break: &str) -> usize {
    find(text, line_break, from).map_or(text.len(), |pos| pos + line_break.len())
}

/// `--` starts a comment only when followed by whitespace or the end of input.
fn is_comment_dash_end(text: &str, pos: usize, line_break: &str) -> bool {
    match text.as_bytes().get(pos) {
        None | Some(b' ' | b'\t' | b'\r' | b'\n') => true,
        Some(_) => text.get(pos..).is_some_and(|rest| rest.starts_with(line_break)),
    }
}

/// Returns the offset just past the closing quote, or the end of input.
fn skip_quoted(bytes: &[u8], open: usize, quote: u8) -> usize {
    let mut pos = open + 1;
    while pos < bytes.len() {
        match bytes[pos] {
            b'\\' => pos += 2,
            byte if byte == quote => return pos + 1,
            _ => pos += 1,
        }
    }
    bytes.len()
}

const fn is_identifier_byte(byte: u8) -> bool {
    byte >= 0x80 || byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'$'
}

fn at_delimiter_directive(text: &str, pos: usize) -> bool {
    let bytes = text.as_bytes();
    if pos > 0 && is_identifier_byte(bytes[pos - 1]) {
        return false;
    }
    let end = pos + DELIMITER_KEYWORD.len();
    let Some(word) = bytes.get(pos..end) else {
        return false;
    };
    word.eq_ignore_ascii_case(DELIMITER_KEYWORD.as_bytes())
}

fn push_statement(statements: &mut Vec<Statement>, text: &str, head: usize, tail: usize) {
    let Some(region) = text.get(head..tail) else {
        return;
    };
    let without_leading = region.trim_start();
    let trimmed = without_leading.trim_end();
    if trimmed.is_empty() {
        return;
    }
    let start = head + (region.len() - without_leading.len());
    let stop = start + trimmed.len();
    trace!(start, stop, "split statement");
    statements.push(Statement {
        text: trimmed.to_string(),
        start,
        stop,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(statements: &[Statement]) -> Vec<&str> {
        statements.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn test_two_statements() {
        let statements = split_statements("SELECT * FROM users; SELECT * FROM posts;", "\n", ";");
        assert_eq!(
            statements,
            vec![
                Statement {
                    text: "SELECT * FROM users".to_string(),
                    start: 0,
                    stop: 19
                },
                Statement {
                    text: "SELECT * FROM posts".to_string(),
                    start: 21,
                    stop: 40
                },
            ]
        );
    }

    #[test]
    fn test_comment_only_input() {
        assert!(split_statements("-- just a comment\n", "\n", ";").is_empty());
        assert!(split_statements("/* block */ # hash\n  \n", "\n", ";").is_empty());
        assert!(split_statements("", "\n", ";").is_empty());
    }

    #[test]
    fn test_leading_comments_are_dropped() {
        let statements = split_statements("-- header\n/* note */ SELECT 1;", "\n", ";");
        assert_eq!(texts(&statements), vec!["SELECT 1"]);
        assert_eq!(statements[0].start, 21);
    }

    #[test]
    fn test_trailing_comment_stays() {
        let statements = split_statements("SELECT 1 /* keep */;", "\n", ";");
        assert_eq!(texts(&statements), vec!["SELECT 1 /* keep */"]);
    }

    #[test]
    fn test_hidden_command_is_content() {
        let statements = split_statements("/*!40101 SET NAMES utf8 */;\nSELECT 1", "\n", ";");
        assert_eq!(texts(&statements), vec!["/*!40101 SET NAMES utf8 */", "SELECT 1"]);
    }

    #[test]
    fn test_delimiters_inside_quotes_and_comments() {
        let sql = "SELECT 'a;b', \"c;d\", `e;f` -- g;h\nFROM t; SELECT 'it\\'s;'";
        let statements = split_statements(sql, "\n", ";");
        assert_eq!(
            texts(&statements),
            vec!["SELECT 'a;b', \"c;d\", `e;f` -- g;h\nFROM t", "SELECT 'it\\'s;'"]
        );
    }

    #[test]
    fn test_double_dash_needs_whitespace() {
        let statements = split_statements("SELECT 1--2;SELECT 3", "\n", ";");
        assert_eq!(texts(&statements), vec!["SELECT 1--2", "SELECT 3"]);
    }

    #[test]
    fn test_delimiter_directive() {
        let sql = "DELIMITER $$\nCREATE PROCEDURE p() BEGIN SELECT 1; END$$\ndelimiter ;\nSELECT 2;";
        let statements = split_statements(sql, "\n", ";");
        assert_eq!(
            texts(&statements),
            vec!["CREATE PROCEDURE p() BEGIN SELECT 1; END", "SELECT 2"]
        );
        assert_eq!(statements[0].start, 13);
        assert_eq!(&sql[statements[1].start..statements[1].stop], "SELECT 2");
    }

    #[test]
    fn test_delimiter_word_inside_statement() {
        // The rest of the line becomes the delimiter, which never occurs again.
        let statements = split_statements("SELECT delimiter FROM t; SELECT 1", "\n", ";");
        assert_eq!(texts(&statements), vec!["SELECT"]);

        let statements = split_statements("SELECT my_delimiter FROM t; SELECT 1", "\n", ";");
        assert_eq!(texts(&statements), vec!["SELECT my_delimiter FROM t", "SELECT 1"]);
    }

    #[test]
    fn test_delimiter_directive_without_terminator() {
        let sql = "SELECT 1 DELIMITER $$\nSELECT 2$$";
        let statements = split_statements(sql, "\n", ";");
        assert_eq!(texts(&statements), vec!["SELECT 1", "SELECT 2"]);
        assert_eq!((statements[0].start, statements[0].stop), (0, 8));
        assert_eq!(&sql[statements[1].start..statements[1].stop], "SELECT 2");
    }

    #[test]
    fn test_delimiter_value_needs_no_separator() {
        let statements = split_statements("delimiter$$\nSELECT 1$$SELECT 2", "\n", ";");
        assert_eq!(texts(&statements), vec!["SELECT 1", "SELECT 2"]);
    }

    #[test]
    fn test_custom_initial_delimiter_and_line_break() {
        let statements = split_statements("SELECT 1 GO\r\nSELECT 2 GO", "\r\n", "GO");
        assert_eq!(texts(&statements), vec!["SELECT 1", "SELECT 2"]);
    }

    #[test]
    fn test_unterminated_quote_runs_to_end() {
        let statements = split_statements("SELECT 'abc; SELECT 2", "\n", ";");
        assert_eq!(texts(&statements), vec!["SELECT 'abc; SELECT 2"]);
    }

    #[test]
    fn test_statement_at_offset() {
        let statements = split_statements("SELECT * FROM users; SELECT * FROM posts;", "\n", ";");
        assert_eq!(statement_at_offset(&statements, 33).map(|s| s.start), Some(21));
        assert_eq!(statement_at_offset(&statements, 19).map(|s| s.start), Some(0));
        assert!(statement_at_offset(&statements, 20).is_none());
        assert!(statement_at_offset(&statements, 41).is_none());

        let single = split_statements("SELECT 1", "\n", ";");
        assert_eq!(statement_at_offset(&single, 4), single.first());
    }
}
