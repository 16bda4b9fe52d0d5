//! Syntax error reporting shared by the tokenizer and the tree builder.

use thiserror::Error;

use crate::lexer::{Token, TokenType};

/// The kind of recognition failure behind a parser report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecognitionKind {
    /// The current token does not match the one the rule requires.
    InputMismatch,
    /// None of the alternatives of a decision matches the input.
    NoViableAlt,
    /// A semantic predicate (such as a server version gate) failed.
    FailedPredicate,
}

/// Where a syntax error was detected.
#[derive(Debug, Clone, Copy)]
pub enum ErrorOrigin<'a> {
    /// The tokenizer could not match any token.
    Lexer {
        /// The text consumed since the start of the failed token.
        text: &'a str,
        /// Byte offset of the tokenizer cursor when the error was detected.
        offset: usize,
    },
    /// The tree builder rejected a token.
    Parser {
        /// The token the parser could not accept.
        offending: &'a Token,
        /// Token types that would have been accepted at this position.
        expected: &'a [TokenType],
        /// `None` when the error was repaired inline by deleting or
        /// inserting a single token.
        recognition: Option<RecognitionKind>,
    },
}

/// A single syntax error report.
#[derive(Debug, Clone, Copy)]
pub struct SyntaxErrorEvent<'a> {
    /// 1-based line.
    pub line: usize,
    /// 0-based character column.
    pub column: usize,
    /// The raw engine message.
    pub message: &'a str,
    /// Details that depend on which stage detected the error.
    pub origin: ErrorOrigin<'a>,
}

/// Receives syntax errors from the tokenizer or the tree builder.
pub trait ErrorListener {
    /// Called once per reported error.
    fn syntax_error(&mut self, event: &SyntaxErrorEvent<'_>);
}

impl ErrorListener for () {
    fn syntax_error(&mut self, _event: &SyntaxErrorEvent<'_>) {}
}

impl<L: ErrorListener + ?Sized> ErrorListener for &mut L {
    fn syntax_error(&mut self, event: &SyntaxErrorEvent<'_>) {
        (**self).syntax_error(event);
    }
}

impl<L: ErrorListener> ErrorListener for Option<L> {
    fn syntax_error(&mut self, event: &SyntaxErrorEvent<'_>) {
        if let Some(listener) = self {
            listener.syntax_error(event);
        }
    }
}

impl<A: ErrorListener, B: ErrorListener> ErrorListener for (A, B) {
    fn syntax_error(&mut self, event: &SyntaxErrorEvent<'_>) {
        self.0.syntax_error(event);
        self.1.syntax_error(event);
    }
}

/// Returned when the bail strategy aborts at the first syntax error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("parsing cancelled at token {token_index}")]
pub struct ParseCancelled {
    /// Index of the offending token in the full token list.
    pub token_index: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter(usize);

    impl ErrorListener for Counter {
        fn syntax_error(&mut self, _event: &SyntaxErrorEvent<'_>) {
            self.0 += 1;
        }
    }

    fn lexer_event() -> SyntaxErrorEvent<'static> {
        SyntaxErrorEvent {
            line: 1,
            column: 0,
            message: "token recognition error at: '\"'",
            origin: ErrorOrigin::Lexer {
                text: "\"",
                offset: 1,
            },
        }
    }

    #[test]
    fn test_pair_forwards_to_both() {
        let mut first = Counter::default();
        let mut second = Counter::default();
        {
            let mut pair = (&mut first, Some(&mut second));
            pair.syntax_error(&lexer_event());
            pair.syntax_error(&lexer_event());
        }
        assert_eq!(first.0, 2);
        assert_eq!(second.0, 2);
    }

    #[test]
    fn test_none_swallows_events() {
        let mut listener: Option<Counter> = None;
        listener.syntax_error(&lexer_event());
        assert!(listener.is_none());
    }
}
