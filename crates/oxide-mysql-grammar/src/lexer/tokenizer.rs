//! MySQL tokenizer.

use crate::error::{ErrorListener, ErrorOrigin, SyntaxErrorEvent};
use crate::sql_mode::SqlMode;
use crate::version::{ServerVersion, VersionFamily};

use super::{Channel, Keyword, Token, TokenType};

/// Character sets accepted as `_name` introducers by a MySQL 8.0 server.
pub const DEFAULT_CHARSETS: &[&str] = &[
    "armscii8", "ascii", "big5", "binary", "cp1250", "cp1251", "cp1256", "cp1257", "cp850",
    "cp852", "cp866", "cp932", "dec8", "eucjpms", "euckr", "gb18030", "gb2312", "gbk", "geostd8",
    "greek", "hebrew", "hp8", "keybcs2", "koi8r", "koi8u", "latin1", "latin2", "latin5", "latin7",
    "macce", "macroman", "sjis", "swe7", "tis620", "ucs2", "ujis", "utf16", "utf16le", "utf32",
    "utf8", "utf8mb3", "utf8mb4",
];

/// Settings that change how text is split into tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerOptions {
    /// Controls keyword availability and version comments.
    pub server_version: ServerVersion,
    /// Active SQL modes.
    pub sql_mode: SqlMode,
    /// Lowercase charset names accepted after a leading underscore.
    pub charsets: Vec<String>,
}

impl Default for LexerOptions {
    fn default() -> Self {
        Self {
            server_version: ServerVersion::V8_0,
            sql_mode: SqlMode::NO_MODE,
            charsets: DEFAULT_CHARSETS.iter().map(ToString::to_string).collect(),
        }
    }
}

/// A lexer that splits MySQL text into tokens.
pub struct Lexer<'a> {
    /// The input source code.
    input: &'a str,
    options: &'a LexerOptions,
    family: VersionFamily,
    /// The current byte position.
    pos: usize,
    /// The byte position of the start of the current token.
    start: usize,
    line: usize,
    column: usize,
    start_line: usize,
    start_column: usize,
    /// Inside a `/*!` comment whose body is lexed as code.
    in_version_comment: bool,
    last_significant: Option<TokenType>,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    #[must_use]
    pub fn new(input: &'a str, options: &'a LexerOptions) -> Self {
        Self {
            input,
            options,
            family: options.server_version.grammar_family(),
            pos: 0,
            start: 0,
            line: 1,
            column: 0,
            start_line: 1,
            start_column: 0,
            in_version_comment: false,
            last_significant: None,
            tokens: Vec::new(),
        }
    }

    /// Tokenizes the whole input, hidden tokens included.
    ///
    /// The returned list always ends with an [`TokenType::Eof`] token.
    /// Unrecognisable input is reported to `listener` and skipped.
    pub fn tokenize(mut self, listener: &mut dyn ErrorListener) -> Vec<Token> {
        loop {
            self.start = self.pos;
            self.start_line = self.line;
            self.start_column = self.column;
            let Some(c) = self.peek() else {
                self.push_eof();
                return self.tokens;
            };
            self.next_token(c, listener);
        }
    }

    fn next_token(&mut self, c: char, listener: &mut dyn ErrorListener) {
        match c {
            ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c' => {
                while self.peek().is_some_and(is_whitespace) {
                    self.advance();
                }
                self.push(TokenType::Whitespace);
            }
            '#' => self.line_comment(),
            '-' if self.peek_at(1) == Some('-')
                && self.peek_at(2).map_or(true, |c| c.is_ascii_whitespace() || c.is_ascii_control()) =>
            {
                self.line_comment();
            }
            '/' if self.peek_at(1) == Some('*') => self.block_comment(listener),
            '*' if self.in_version_comment && self.peek_at(1) == Some('/') => {
                self.advance_by(2);
                self.in_version_comment = false;
                self.push(TokenType::Comment);
            }
            '\'' => self.quoted(TokenType::SingleQuotedText, listener),
            '"' => self.quoted(TokenType::DoubleQuotedText, listener),
            '`' => self.quoted(TokenType::BackTickQuotedId, listener),
            'x' | 'X' if self.peek_at(1) == Some('\'') => {
                self.prefixed_string(TokenType::Hex, listener);
            }
            'b' | 'B' if self.peek_at(1) == Some('\'') => {
                self.prefixed_string(TokenType::Bin, listener);
            }
            'n' | 'N' if self.peek_at(1) == Some('\'') => {
                self.advance();
                self.quoted(TokenType::NCharText, listener);
            }
            '0'..='9' => self.number(),
            '.' if self.peek_at(1).is_some_and(|c| c.is_ascii_digit())
                && !matches!(
                    self.last_significant,
                    Some(TokenType::Identifier | TokenType::BackTickQuotedId)
                ) =>
            {
                self.number();
            }
            '@' => self.at_sign(listener),
            c if is_identifier_start(c) => self.word(),
            _ => self.operator(c, listener),
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_at(&self, n: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(n)
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn advance_by(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    fn push(&mut self, token_type: TokenType) {
        let channel = match token_type {
            TokenType::Whitespace | TokenType::Comment => Channel::Hidden,
            _ => Channel::Default,
        };
        if channel == Channel::Default {
            self.last_significant = Some(token_type);
        }
        self.tokens.push(Token {
            token_type,
            channel,
            text: self.input[self.start..self.pos].to_string(),
            start: self.start,
            stop: self.pos.saturating_sub(1),
            line: self.start_line,
            column: self.start_column,
            index: self.tokens.len(),
        });
    }

    fn push_eof(&mut self) {
        self.tokens.push(Token {
            token_type: TokenType::Eof,
            channel: Channel::Default,
            text: String::new(),
            start: self.pos,
            stop: self.pos,
            line: self.line,
            column: self.column,
            index: self.tokens.len(),
        });
    }

    fn report(&self, listener: &mut dyn ErrorListener) {
        let text = &self.input[self.start..self.pos];
        let message = format!("token recognition error at: '{text}'");
        listener.syntax_error(&SyntaxErrorEvent {
            line: self.start_line,
            column: self.start_column,
            message: &message,
            origin: ErrorOrigin::Lexer {
                text,
                offset: self.pos,
            },
        });
    }

    fn line_comment(&mut self) {
        while self.peek().is_some_and(|c| c != '\n') {
            self.advance();
        }
        self.push(TokenType::Comment);
    }

    fn block_comment(&mut self, listener: &mut dyn ErrorListener) {
        self.advance_by(2);
        if self.peek() == Some('!') {
            self.advance();
            let digits_start = self.pos;
            while self.peek().is_some_and(|c| c.is_ascii_digit()) && self.pos - digits_start < 5 {
                self.advance();
            }
            let required = self.input[digits_start..self.pos].parse::<u32>().ok();
            if required.map_or(true, |v| self.options.server_version.number() >= v) {
                self.in_version_comment = true;
                self.push(TokenType::Comment);
                return;
            }
        }
        loop {
            match self.advance() {
                Some('*') if self.peek() == Some('/') => {
                    self.advance();
                    self.push(TokenType::Comment);
                    return;
                }
                Some(_) => {}
                None => {
                    self.report(listener);
                    return;
                }
            }
        }
    }

    /// Scans a quoted region starting at the opening quote.
    fn quoted(&mut self, token_type: TokenType, listener: &mut dyn ErrorListener) {
        let Some(quote) = self.advance() else {
            return;
        };
        let escapes = quote != '`' && !self.options.sql_mode.contains(SqlMode::NO_BACKSLASH_ESCAPES);
        loop {
            match self.advance() {
                Some('\\') if escapes => {
                    self.advance();
                }
                Some(c) if c == quote => {
                    if self.peek() == Some(quote) {
                        self.advance();
                    } else {
                        break;
                    }
                }
                Some(_) => {}
                None => {
                    self.report(listener);
                    return;
                }
            }
        }
        let token_type = if token_type == TokenType::DoubleQuotedText
            && self.options.sql_mode.contains(SqlMode::ANSI_QUOTES)
        {
            TokenType::BackTickQuotedId
        } else {
            token_type
        };
        self.push(token_type);
    }

    /// Scans `x'..'` and `b'..'` literals.
    fn prefixed_string(&mut self, token_type: TokenType, listener: &mut dyn ErrorListener) {
        self.advance_by(2);
        while self.peek().is_some_and(|c| c != '\'') {
            self.advance();
        }
        if self.advance().is_none() {
            self.report(listener);
        } else {
            self.push(token_type);
        }
    }

    fn number(&mut self) {
        let radix_prefix = (self.peek(), self.peek_at(1));
        if let (Some('0'), Some(marker @ ('x' | 'b'))) = radix_prefix {
            let is_digit = |c: char| {
                if marker == 'x' {
                    c.is_ascii_hexdigit()
                } else {
                    c == '0' || c == '1'
                }
            };
            if self.peek_at(2).is_some_and(is_digit) {
                self.advance_by(2);
                while self.peek().is_some_and(is_digit) {
                    self.advance();
                }
                if self.peek().is_some_and(is_identifier_part) {
                    self.identifier_tail();
                    return;
                }
                self.push(if marker == 'x' { TokenType::Hex } else { TokenType::Bin });
                return;
            }
        }

        let mut token_type = TokenType::Int;
        self.digits();
        if self.peek() == Some('.') {
            self.advance();
            self.digits();
            token_type = TokenType::Decimal;
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            let sign = usize::from(matches!(self.peek_at(1), Some('+' | '-')));
            if self.peek_at(1 + sign).is_some_and(|c| c.is_ascii_digit()) {
                self.advance_by(1 + sign);
                self.digits();
                token_type = TokenType::Float;
            }
        }
        if token_type == TokenType::Int && self.peek().is_some_and(is_identifier_part) {
            self.identifier_tail();
            return;
        }
        self.push(token_type);
    }

    fn digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    /// Finishes an identifier that started with digits, such as `1st`.
    fn identifier_tail(&mut self) {
        while self.peek().is_some_and(is_identifier_part) {
            self.advance();
        }
        self.push(TokenType::Identifier);
    }

    fn at_sign(&mut self, listener: &mut dyn ErrorListener) {
        match self.peek_at(1) {
            Some('@') => {
                self.advance_by(2);
                self.push(TokenType::AtAt);
            }
            Some('\'' | '"' | '`') => {
                self.advance();
                let before = self.tokens.len();
                self.quoted(TokenType::SingleQuotedText, listener);
                if self.tokens.len() > before {
                    self.tokens.pop();
                    self.push(TokenType::UserVariable);
                }
            }
            Some(c) if is_identifier_part(c) || c == '.' => {
                self.advance();
                while self
                    .peek()
                    .is_some_and(|c| is_identifier_part(c) || c == '.')
                {
                    self.advance();
                }
                self.push(TokenType::UserVariable);
            }
            _ => {
                self.advance();
                self.report(listener);
            }
        }
    }

    fn word(&mut self) {
        while self.peek().is_some_and(is_identifier_part) {
            self.advance();
        }
        let text = &self.input[self.start..self.pos];
        let is_charset = text.strip_prefix('_').is_some_and(|name| {
            self.options
                .charsets
                .iter()
                .any(|known| known.eq_ignore_ascii_case(name))
        });
        let token_type = if is_charset {
            TokenType::UnderscoreCharset
        } else {
            match Keyword::from_word(text) {
                Some(keyword) if keyword.is_available(self.family) => TokenType::Keyword(keyword),
                _ => TokenType::Identifier,
            }
        };
        self.push(token_type);
    }

    fn operator(&mut self, c: char, listener: &mut dyn ErrorListener) {
        let next = self.peek_at(1);
        let (token_type, len) = match (c, next) {
            ('<', Some('=')) if self.peek_at(2) == Some('>') => (TokenType::NullSafeEqual, 3),
            ('<', Some('=')) => (TokenType::LessOrEqual, 2),
            ('<', Some('>')) | ('!', Some('=')) => (TokenType::NotEqual, 2),
            ('<', Some('<')) => (TokenType::ShiftLeft, 2),
            ('<', _) => (TokenType::Less, 1),
            ('>', Some('=')) => (TokenType::GreaterOrEqual, 2),
            ('>', Some('>')) => (TokenType::ShiftRight, 2),
            ('>', _) => (TokenType::Greater, 1),
            ('=', _) => (TokenType::Equal, 1),
            ('!', _) => (TokenType::LogicalNot, 1),
            ('-', Some('>')) if self.peek_at(2) == Some('>') => {
                (TokenType::JsonUnquotedSeparator, 3)
            }
            ('-', Some('>')) => (TokenType::JsonSeparator, 2),
            ('-', _) => (TokenType::Minus, 1),
            ('+', _) => (TokenType::Plus, 1),
            ('*', _) => (TokenType::Mult, 1),
            ('/', _) => (TokenType::Div, 1),
            ('%', _) => (TokenType::Mod, 1),
            ('~', _) => (TokenType::BitNot, 1),
            ('^', _) => (TokenType::BitXor, 1),
            ('&', Some('&')) => (TokenType::LogicalAnd, 2),
            ('&', _) => (TokenType::BitAnd, 1),
            ('|', Some('|')) if self.options.sql_mode.contains(SqlMode::PIPES_AS_CONCAT) => {
                (TokenType::ConcatPipes, 2)
            }
            ('|', Some('|')) => (TokenType::LogicalOr, 2),
            ('|', _) => (TokenType::BitOr, 1),
            (':', Some('=')) => (TokenType::Assign, 2),
            (':', _) => (TokenType::Colon, 1),
            ('.', _) => (TokenType::Dot, 1),
            (',', _) => (TokenType::Comma, 1),
            (';', _) => (TokenType::Semicolon, 1),
            ('(', _) => (TokenType::OpenPar, 1),
            (')', _) => (TokenType::ClosePar, 1),
            ('{', _) => (TokenType::OpenCurly, 1),
            ('}', _) => (TokenType::CloseCurly, 1),
            ('?', _) => (TokenType::ParamMarker, 1),
            _ => {
                self.advance();
                self.report(listener);
                return;
            }
        };
        self.advance_by(len);
        self.push(token_type);
    }
}

const fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c')
}

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$' || !c.is_ascii()
}

fn is_identifier_part(c: char) -> bool {
    is_identifier_start(c) || c.is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<(String, usize, usize, usize)>);

    impl ErrorListener for Recorder {
        fn syntax_error(&mut self, event: &SyntaxErrorEvent<'_>) {
            if let ErrorOrigin::Lexer { text, offset } = event.origin {
                self.0
                    .push((text.to_string(), offset, event.line, event.column));
            }
        }
    }

    fn significant(input: &str, options: &LexerOptions) -> Vec<TokenType> {
        Lexer::new(input, options)
            .tokenize(&mut ())
            .into_iter()
            .filter(|t| t.channel == Channel::Default)
            .map(|t| t.token_type)
            .collect()
    }

    #[test]
    fn test_simple_select() {
        let options = LexerOptions::default();
        assert_eq!(
            significant("SELECT id FROM users;", &options),
            vec![
                TokenType::Keyword(Keyword::Select),
                TokenType::Identifier,
                TokenType::Keyword(Keyword::From),
                TokenType::Identifier,
                TokenType::Semicolon,
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn test_offsets_are_inclusive() {
        let options = LexerOptions::default();
        let tokens = Lexer::new("SELECT id", &options).tokenize(&mut ());
        let id = &tokens[2];
        assert_eq!(id.text, "id");
        assert_eq!((id.start, id.stop), (7, 8));
        assert_eq!(id.index, 2);
        assert!(tokens[3].is_eof());
    }

    #[test]
    fn test_lines_and_columns() {
        let options = LexerOptions::default();
        let tokens = Lexer::new("SELECT\n  1", &options).tokenize(&mut ());
        let one = tokens
            .iter()
            .find(|t| t.token_type == TokenType::Int)
            .map(|t| (t.line, t.column));
        assert_eq!(one, Some((2, 2)));
    }

    #[test]
    fn test_numbers() {
        let options = LexerOptions::default();
        assert_eq!(
            significant("1 1.5 .5 1e10 0x1F x'1F' 0b01 b'01' 1abc", &options),
            vec![
                TokenType::Int,
                TokenType::Decimal,
                TokenType::Decimal,
                TokenType::Float,
                TokenType::Hex,
                TokenType::Hex,
                TokenType::Bin,
                TokenType::Bin,
                TokenType::Identifier,
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn test_strings_and_quotes() {
        let options = LexerOptions::default();
        assert_eq!(
            significant(r#"'it''s' "a\"b" `col` N'x'"#, &options),
            vec![
                TokenType::SingleQuotedText,
                TokenType::DoubleQuotedText,
                TokenType::BackTickQuotedId,
                TokenType::NCharText,
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn test_ansi_quotes_turn_double_quotes_into_identifiers() {
        let options = LexerOptions {
            sql_mode: SqlMode::ANSI_QUOTES,
            ..LexerOptions::default()
        };
        assert_eq!(
            significant("\"users\"", &options),
            vec![TokenType::BackTickQuotedId, TokenType::Eof]
        );
    }

    #[test]
    fn test_comments_are_hidden() {
        let options = LexerOptions::default();
        assert_eq!(
            significant("SELECT /* c */ 1 -- tail\n# more\n", &options),
            vec![
                TokenType::Keyword(Keyword::Select),
                TokenType::Int,
                TokenType::Eof
            ]
        );
    }

    #[test]
    fn test_double_dash_needs_whitespace() {
        let options = LexerOptions::default();
        assert_eq!(
            significant("1--1", &options),
            vec![
                TokenType::Int,
                TokenType::Minus,
                TokenType::Minus,
                TokenType::Int,
                TokenType::Eof
            ]
        );
    }

    #[test]
    fn test_version_comments() {
        let new = LexerOptions::default();
        assert_eq!(
            significant("SELECT /*!50700 1 */", &new),
            vec![
                TokenType::Keyword(Keyword::Select),
                TokenType::Int,
                TokenType::Eof
            ]
        );
        let old = LexerOptions {
            server_version: ServerVersion::new(5, 6, 0),
            ..LexerOptions::default()
        };
        assert_eq!(
            significant("SELECT /*!50700 1 */", &old),
            vec![TokenType::Keyword(Keyword::Select), TokenType::Eof]
        );
    }

    #[test]
    fn test_keyword_availability_depends_on_version() {
        let v8 = LexerOptions::default();
        let v57 = LexerOptions {
            server_version: ServerVersion::new(5, 7, 0),
            ..LexerOptions::default()
        };
        assert_eq!(
            significant("ROLE", &v8)[0],
            TokenType::Keyword(Keyword::Role)
        );
        assert_eq!(significant("ROLE", &v57)[0], TokenType::Identifier);
    }

    #[test]
    fn test_operators() {
        let options = LexerOptions::default();
        assert_eq!(
            significant("<=> <> != <= >= << >> && || := ->>", &options),
            vec![
                TokenType::NullSafeEqual,
                TokenType::NotEqual,
                TokenType::NotEqual,
                TokenType::LessOrEqual,
                TokenType::GreaterOrEqual,
                TokenType::ShiftLeft,
                TokenType::ShiftRight,
                TokenType::LogicalAnd,
                TokenType::LogicalOr,
                TokenType::Assign,
                TokenType::JsonUnquotedSeparator,
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn test_variables_and_charsets() {
        let options = LexerOptions::default();
        assert_eq!(
            significant("@a @'b' @@session _utf8mb4'x' _other", &options),
            vec![
                TokenType::UserVariable,
                TokenType::UserVariable,
                TokenType::AtAt,
                TokenType::Keyword(Keyword::Session),
                TokenType::UnderscoreCharset,
                TokenType::SingleQuotedText,
                TokenType::Identifier,
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn test_unfinished_string_is_reported() {
        let options = LexerOptions::default();
        let mut recorder = Recorder::default();
        let tokens = Lexer::new("\"abc", &options).tokenize(&mut recorder);
        assert_eq!(recorder.0, vec![("\"abc".to_string(), 4, 1, 0)]);
        assert_eq!(tokens.len(), 1);
    }

    #[test]
    fn test_unknown_character_is_skipped() {
        let options = LexerOptions::default();
        let mut recorder = Recorder::default();
        let tokens = Lexer::new("1 \\ 2", &options).tokenize(&mut recorder);
        assert_eq!(recorder.0.len(), 1);
        assert_eq!(recorder.0[0].0, "\\");
        assert_eq!(
            tokens
                .iter()
                .filter(|t| t.token_type == TokenType::Int)
                .count(),
            2
        );
    }
}
