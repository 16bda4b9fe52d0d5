//! Token types and the token cursor handed to the tree builder.

use serde::Serialize;

use super::Keyword;

/// The kind of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenType {
    /// A keyword available in the configured server version.
    Keyword(Keyword),
    /// An unquoted identifier.
    Identifier,
    /// A back-tick quoted identifier.
    BackTickQuotedId,
    /// `'text'`
    SingleQuotedText,
    /// `"text"`, an identifier when `ANSI_QUOTES` is active.
    DoubleQuotedText,
    /// `N'text'`
    NCharText,
    /// An integer literal.
    Int,
    /// A fixed point literal such as `1.5`.
    Decimal,
    /// A literal with an exponent such as `1e10`.
    Float,
    /// `0x1F` or `x'1F'`
    Hex,
    /// `0b01` or `b'01'`
    Bin,
    /// A charset introducer such as `_utf8mb4`.
    UnderscoreCharset,
    /// `@name`, `@'name'` or `` @`name` ``
    UserVariable,
    /// `@@`
    AtAt,
    /// `?`
    ParamMarker,
    /// `=`
    Equal,
    /// `<=>`
    NullSafeEqual,
    /// `>=`
    GreaterOrEqual,
    /// `>`
    Greater,
    /// `<=`
    LessOrEqual,
    /// `<`
    Less,
    /// `!=` or `<>`
    NotEqual,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Mult,
    /// `/`
    Div,
    /// `%`
    Mod,
    /// `!`
    LogicalNot,
    /// `~`
    BitNot,
    /// `<<`
    ShiftLeft,
    /// `>>`
    ShiftRight,
    /// `&&`
    LogicalAnd,
    /// `&`
    BitAnd,
    /// `^`
    BitXor,
    /// `||` without `PIPES_AS_CONCAT`
    LogicalOr,
    /// `||` with `PIPES_AS_CONCAT`
    ConcatPipes,
    /// `|`
    BitOr,
    /// `.`
    Dot,
    /// `,`
    Comma,
    /// `;`
    Semicolon,
    /// `:`
    Colon,
    /// `:=`
    Assign,
    /// `(`
    OpenPar,
    /// `)`
    ClosePar,
    /// `{`
    OpenCurly,
    /// `}`
    CloseCurly,
    /// `->`
    JsonSeparator,
    /// `->>`
    JsonUnquotedSeparator,
    /// Spaces, tabs and line breaks.
    Whitespace,
    /// Any comment, including version comment markers.
    Comment,
    /// End of input.
    Eof,
}

impl TokenType {
    /// Returns the canonical name used when listing expected tokens.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Keyword(keyword) => keyword.as_str(),
            Self::Identifier => "identifier",
            Self::BackTickQuotedId => "back tick quoted identifier",
            Self::SingleQuotedText => "single quoted text",
            Self::DoubleQuotedText => "double quoted text",
            Self::NCharText => "national string",
            Self::Int => "integer",
            Self::Decimal => "decimal number",
            Self::Float => "float number",
            Self::Hex => "hex number",
            Self::Bin => "binary number",
            Self::UnderscoreCharset => "charset introducer",
            Self::UserVariable => "user variable",
            Self::AtAt => "@@",
            Self::ParamMarker => "?",
            Self::Equal => "=",
            Self::NullSafeEqual => "<=>",
            Self::GreaterOrEqual => ">=",
            Self::Greater => ">",
            Self::LessOrEqual => "<=",
            Self::Less => "<",
            Self::NotEqual => "<>",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Mult => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::LogicalNot => "!",
            Self::BitNot => "~",
            Self::ShiftLeft => "<<",
            Self::ShiftRight => ">>",
            Self::LogicalAnd => "&&",
            Self::BitAnd => "&",
            Self::BitXor => "^",
            Self::LogicalOr | Self::ConcatPipes => "||",
            Self::BitOr => "|",
            Self::Dot => ".",
            Self::Comma => ",",
            Self::Semicolon => ";",
            Self::Colon => ":",
            Self::Assign => ":=",
            Self::OpenPar => "(",
            Self::ClosePar => ")",
            Self::OpenCurly => "{",
            Self::CloseCurly => "}",
            Self::JsonSeparator => "->",
            Self::JsonUnquotedSeparator => "->>",
            Self::Whitespace => "whitespace",
            Self::Comment => "comment",
            Self::Eof => "<EOF>",
        }
    }

    /// Returns the keyword if this is a keyword token type.
    #[must_use]
    pub const fn as_keyword(self) -> Option<Keyword> {
        match self {
            Self::Keyword(keyword) => Some(keyword),
            _ => None,
        }
    }
}

impl core::fmt::Display for TokenType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// The channel a token is emitted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Channel {
    /// Significant tokens seen by the tree builder.
    Default,
    /// Whitespace and comments.
    Hidden,
}

/// A token with its location in the source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// The kind of token.
    pub token_type: TokenType,
    /// The channel the token was emitted on.
    pub channel: Channel,
    /// The matched source text.
    pub text: String,
    /// Byte offset of the first byte.
    pub start: usize,
    /// Byte offset of the last byte (inclusive).
    pub stop: usize,
    /// 1-based line of the first character.
    pub line: usize,
    /// 0-based character column of the first character.
    pub column: usize,
    /// Position of the token in the full token list.
    pub index: usize,
}

impl Token {
    /// Returns true if this is the end-of-input token.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.token_type == TokenType::Eof
    }

    /// Returns the keyword if this is a keyword token.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<Keyword> {
        self.token_type.as_keyword()
    }

    /// Returns true if this token is the given keyword.
    #[must_use]
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.token_type == TokenType::Keyword(keyword)
    }

    /// Returns true if `offset` lies within `[start, stop]`.
    #[must_use]
    pub const fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset <= self.stop
    }
}

/// A resettable cursor over a token list.
#[derive(Debug, Clone)]
pub struct TokenStream<'a> {
    tokens: &'a [Token],
    cursor: usize,
}

impl<'a> TokenStream<'a> {
    /// Creates a cursor positioned at the first token.
    #[must_use]
    pub const fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, cursor: 0 }
    }

    /// Moves the cursor back to the first token.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Returns the next token on the default channel.
    ///
    /// Once the end-of-input token is reached it is returned on every call.
    pub fn next_default_channel_token(&mut self) -> Option<&'a Token> {
        while let Some(token) = self.tokens.get(self.cursor) {
            if !token.is_eof() {
                self.cursor += 1;
            }
            if token.channel == Channel::Default {
                return Some(token);
            }
        }
        None
    }

    /// Returns every token, hidden ones included.
    #[must_use]
    pub const fn tokens(&self) -> &'a [Token] {
        self.tokens
    }
}
