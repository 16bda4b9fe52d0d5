//! Structured syntax diagnostics.
//!
//! The grammar engine reports raw messages such as `mismatched input ';'`.
//! The translators in this module turn them into [`LexerError`] and
//! [`ParserError`] values with editor-friendly messages. Each translator keeps
//! only the latest error it saw; [`LexerErrorTranslator::reset`] and
//! [`ParserErrorTranslator::reset`] discard it between parse attempts.

use serde::Serialize;
use thiserror::Error;

use oxide_mysql_grammar::error::{ErrorListener, ErrorOrigin, RecognitionKind, SyntaxErrorEvent};
use oxide_mysql_grammar::lexer::{Token, TokenType};

/// Number of expected tokens listed in a parser error message.
const MAX_EXPECTED_IN_MESSAGE: usize = 5;

/// A line and character position. Lines start at 1, characters at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub line: usize,
    pub character: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LexerErrorData {
    /// Byte offset of the tokenizer cursor when the error was detected.
    pub offset: usize,
    /// Where the unrecognised text starts.
    pub position: Position,
}

/// The tokenizer could not make sense of part of the input.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message}")]
pub struct LexerError {
    pub message: String,
    pub data: LexerErrorData,
}

impl LexerError {
    /// Numeric code identifying tokenizer errors.
    pub const CODE: u32 = 1;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParserErrorData {
    /// Display names of every token that would have been accepted.
    pub expected_tokens: Vec<String>,
    /// The token the parser rejected.
    pub offending_token: Token,
    pub line: usize,
    pub character: usize,
}

/// The token sequence does not match the grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message}")]
pub struct ParserError {
    pub message: String,
    pub data: ParserErrorData,
}

impl ParserError {
    /// Numeric code identifying grammar errors.
    pub const CODE: u32 = 2;
}

/// Either kind of syntax error.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SyntaxDiagnostic {
    #[error(transparent)]
    Lexer(LexerError),
    #[error(transparent)]
    Parser(ParserError),
}

impl SyntaxDiagnostic {
    #[must_use]
    pub const fn code(&self) -> u32 {
        match self {
            Self::Lexer(_) => LexerError::CODE,
            Self::Parser(_) => ParserError::CODE,
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Lexer(error) => &error.message,
            Self::Parser(error) => &error.message,
        }
    }

    /// Position of the first character the diagnostic refers to.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::Lexer(error) => error.data.position,
            Self::Parser(error) => Position {
                line: error.data.line,
                character: error.data.character,
            },
        }
    }
}

/// Captures the latest tokenizer error of a parse attempt.
#[derive(Debug, Default)]
pub struct LexerErrorTranslator {
    error: Option<LexerError>,
}

impl LexerErrorTranslator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets the captured error.
    pub fn reset(&mut self) {
        self.error = None;
    }

    #[must_use]
    pub const fn error(&self) -> Option<&LexerError> {
        self.error.as_ref()
    }

    #[must_use]
    pub fn into_error(self) -> Option<LexerError> {
        self.error
    }
}

impl ErrorListener for LexerErrorTranslator {
    fn syntax_error(&mut self, event: &SyntaxErrorEvent<'_>) {
        let ErrorOrigin::Lexer { text, offset } = event.origin else {
            return;
        };
        self.error = Some(LexerError {
            message: lexer_message(text),
            data: LexerErrorData {
                offset,
                position: Position {
                    line: event.line,
                    character: event.column,
                },
            },
        });
    }
}

fn lexer_message(text: &str) -> String {
    match text.chars().next() {
        Some('/') => return "Unfinished multiline comment".to_string(),
        Some('"') => return "Unfinished double quoted string literal".to_string(),
        Some('\'') => return "Unfinished single quoted string literal".to_string(),
        Some('`') => return "Unfinished back tick quoted string literal".to_string(),
        _ => {}
    }
    let prefix = text.get(..2).map(str::to_ascii_lowercase);
    match prefix.as_deref() {
        Some("x'") => "Unfinished hex string literal".to_string(),
        Some("b'") => "Unfinished binary string literal".to_string(),
        _ => format!("\"{text}\" is no valid input at all"),
    }
}

/// Captures the latest grammar error of a parse attempt.
#[derive(Debug, Default)]
pub struct ParserErrorTranslator {
    error: Option<ParserError>,
}

impl ParserErrorTranslator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets the captured error.
    pub fn reset(&mut self) {
        self.error = None;
    }

    #[must_use]
    pub const fn error(&self) -> Option<&ParserError> {
        self.error.as_ref()
    }

    #[must_use]
    pub fn into_error(self) -> Option<ParserError> {
        self.error
    }
}

impl ErrorListener for ParserErrorTranslator {
    fn syntax_error(&mut self, event: &SyntaxErrorEvent<'_>) {
        let ErrorOrigin::Parser {
            offending,
            expected,
            recognition,
        } = event.origin
        else {
            return;
        };
        let expected_tokens = expected_names(expected);
        self.error = Some(ParserError {
            message: parser_message(event.message, offending, &expected_tokens, recognition),
            data: ParserErrorData {
                expected_tokens,
                offending_token: offending.clone(),
                line: event.line,
                character: event.column,
            },
        });
    }
}

/// Display names without duplicates, in the order the parser checked them.
fn expected_names(expected: &[TokenType]) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(expected.len());
    for token_type in expected {
        let name = token_type.display_name();
        if !names.iter().any(|existing| existing == name) {
            names.push(name.to_string());
        }
    }
    names
}

fn parser_message(
    raw: &str,
    offending: &Token,
    expected: &[String],
    recognition: Option<RecognitionKind>,
) -> String {
    match recognition {
        None => {
            let listed = expected
                .iter()
                .take(MAX_EXPECTED_IN_MESSAGE)
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            if expected.len() == 1 && raw.contains("missing") {
                format!("Missing {listed}")
            } else {
                format!("Extraneous input \"{}\" found, expecting {listed}", offending.text)
            }
        }
        Some(RecognitionKind::InputMismatch | RecognitionKind::NoViableAlt) => {
            if offending.is_eof() {
                "Statement is incomplete".to_string()
            } else {
                format!("\"{}\" is not valid at this position", offending.text)
            }
        }
        Some(RecognitionKind::FailedPredicate) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxide_mysql_grammar::lexer::{Channel, Keyword};

    fn token(token_type: TokenType, text: &str, start: usize) -> Token {
        Token {
            token_type,
            channel: Channel::Default,
            text: text.to_string(),
            start,
            stop: start + text.len().max(1) - 1,
            line: 1,
            column: start,
            index: 0,
        }
    }

    fn parser_event(
        translator: &mut ParserErrorTranslator,
        message: &str,
        offending: &Token,
        expected: &[TokenType],
        recognition: Option<RecognitionKind>,
    ) {
        translator.syntax_error(&SyntaxErrorEvent {
            line: offending.line,
            column: offending.column,
            message,
            origin: ErrorOrigin::Parser {
                offending,
                expected,
                recognition,
            },
        });
    }

    #[test]
    fn test_lexer_messages() {
        assert_eq!(lexer_message("/* open"), "Unfinished multiline comment");
        assert_eq!(lexer_message("\"abc"), "Unfinished double quoted string literal");
        assert_eq!(lexer_message("'abc"), "Unfinished single quoted string literal");
        assert_eq!(lexer_message("`abc"), "Unfinished back tick quoted string literal");
        assert_eq!(lexer_message("X'0F"), "Unfinished hex string literal");
        assert_eq!(lexer_message("b'01"), "Unfinished binary string literal");
        assert_eq!(lexer_message("\u{1}"), "\"\u{1}\" is no valid input at all");
    }

    #[test]
    fn test_lexer_translator_ignores_parser_events() {
        let mut translator = LexerErrorTranslator::new();
        let offending = token(TokenType::Identifier, "x", 0);
        translator.syntax_error(&SyntaxErrorEvent {
            line: 1,
            column: 0,
            message: "mismatched input",
            origin: ErrorOrigin::Parser {
                offending: &offending,
                expected: &[],
                recognition: Some(RecognitionKind::InputMismatch),
            },
        });
        assert!(translator.error().is_none());
    }

    #[test]
    fn test_last_error_wins_and_reset_clears() {
        let mut translator = LexerErrorTranslator::new();
        for (text, offset) in [("'a", 2), ("\"b", 9)] {
            translator.syntax_error(&SyntaxErrorEvent {
                line: 1,
                column: offset - 2,
                message: "token recognition error",
                origin: ErrorOrigin::Lexer { text, offset },
            });
        }
        let error = translator.error().unwrap();
        assert_eq!(error.message, "Unfinished double quoted string literal");
        assert_eq!(error.data.offset, 9);
        assert_eq!(error.data.position, Position { line: 1, character: 7 });

        translator.reset();
        assert!(translator.into_error().is_none());
    }

    #[test]
    fn test_missing_and_extraneous() {
        let mut translator = ParserErrorTranslator::new();
        let eof = token(TokenType::Eof, "", 9);
        parser_event(&mut translator, "missing ) at '<EOF>'", &eof, &[TokenType::ClosePar], None);
        assert_eq!(translator.error().unwrap().message, "Missing )");

        let two = token(TokenType::Int, "2", 10);
        parser_event(
            &mut translator,
            "extraneous input '2' expecting )",
            &two,
            &[TokenType::ClosePar],
            None,
        );
        assert_eq!(
            translator.error().unwrap().message,
            "Extraneous input \"2\" found, expecting )"
        );
    }

    #[test]
    fn test_expected_list_is_capped_in_message_only() {
        let mut translator = ParserErrorTranslator::new();
        let offending = token(TokenType::Comma, ",", 3);
        let expected = [
            TokenType::Keyword(Keyword::From),
            TokenType::Keyword(Keyword::Where),
            TokenType::Keyword(Keyword::Group),
            TokenType::Keyword(Keyword::Having),
            TokenType::Keyword(Keyword::Order),
            TokenType::Keyword(Keyword::Limit),
            TokenType::Keyword(Keyword::From),
        ];
        parser_event(&mut translator, "extraneous input ','", &offending, &expected, None);
        let error = translator.into_error().unwrap();
        assert_eq!(
            error.message,
            "Extraneous input \",\" found, expecting FROM, WHERE, GROUP, HAVING, ORDER"
        );
        assert_eq!(error.data.expected_tokens.len(), 6);
    }

    #[test]
    fn test_mismatch_messages() {
        let mut translator = ParserErrorTranslator::new();
        let eof = token(TokenType::Eof, "", 14);
        parser_event(
            &mut translator,
            "mismatched input '<EOF>' expecting identifier",
            &eof,
            &[TokenType::Identifier],
            Some(RecognitionKind::InputMismatch),
        );
        assert_eq!(translator.error().unwrap().message, "Statement is incomplete");

        let word = token(TokenType::Identifier, "SELCT", 0);
        parser_event(
            &mut translator,
            "no viable alternative at input 'SELCT'",
            &word,
            &[],
            Some(RecognitionKind::NoViableAlt),
        );
        let error = translator.error().unwrap();
        assert_eq!(error.message, "\"SELCT\" is not valid at this position");
        assert_eq!(error.data.offending_token.text, "SELCT");
    }

    #[test]
    fn test_failed_predicate_keeps_raw_message() {
        let mut translator = ParserErrorTranslator::new();
        let role = token(TokenType::Keyword(Keyword::Role), "ROLE", 7);
        let raw = "rule createRole failed predicate: {serverVersion >= 80000}?";
        parser_event(
            &mut translator,
            raw,
            &role,
            &[],
            Some(RecognitionKind::FailedPredicate),
        );
        assert_eq!(translator.error().unwrap().message, raw);
    }

    #[test]
    fn test_diagnostic_codes_and_json() {
        let diagnostic = SyntaxDiagnostic::Lexer(LexerError {
            message: "Unfinished single quoted string literal".to_string(),
            data: LexerErrorData {
                offset: 1,
                position: Position { line: 1, character: 0 },
            },
        });
        assert_eq!(diagnostic.code(), 1);
        assert_eq!(diagnostic.to_string(), "Unfinished single quoted string literal");
        let json = serde_json::to_value(&diagnostic).unwrap();
        assert_eq!(json["kind"], "lexer");
        assert_eq!(json["data"]["position"]["character"], 0);
    }
}
