//! Semantic references found in a parse tree.
//!
//! All references of one parse live in a single flat list; links between
//! them are [`ReferenceId`]s into that list, never ownership.

use serde::Serialize;

/// Index of a reference in [`ParseResult::references`](crate::ParseResult::references).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ReferenceId(pub usize);

/// The clause a column or value appears in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Clause {
    #[serde(rename = "whereClause")]
    Where,
    #[serde(rename = "valuesClause")]
    Values,
    #[serde(rename = "fieldsClause")]
    Fields,
}

/// Coarse type of a literal value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    String,
    Number,
    Boolean,
    Date,
    Null,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionReference {
    pub id: ReferenceId,
    pub function: String,
    pub start: usize,
    pub stop: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordReference {
    pub id: ReferenceId,
    pub keyword: String,
    pub start: usize,
    pub stop: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaReference {
    pub id: ReferenceId,
    pub schema: String,
    pub start: usize,
    pub stop: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableReference {
    pub id: ReferenceId,
    pub table: String,
    pub schema: Option<ReferenceId>,
    pub alias: Option<ReferenceId>,
    /// True when the table was only named as a column qualifier (`t` in `t.a`).
    pub qualifier: bool,
    pub start: usize,
    pub stop: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnReference {
    pub id: ReferenceId,
    pub column: String,
    pub table: Option<ReferenceId>,
    pub alias: Option<ReferenceId>,
    pub clause: Option<Clause>,
    pub start: usize,
    pub stop: usize,
}

/// What an alias names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AliasTarget {
    Table(ReferenceId),
    /// A select list alias; `None` when the aliased expression is not a plain column.
    Column(Option<ReferenceId>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AliasReference {
    pub id: ReferenceId,
    pub alias: String,
    pub target: AliasTarget,
    pub start: usize,
    pub stop: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueReference {
    pub id: ReferenceId,
    /// The literal text without its quotes.
    pub value: String,
    pub data_type: DataType,
    pub clause: Option<Clause>,
    pub column: Option<ReferenceId>,
    pub start: usize,
    pub stop: usize,
}

/// A semantic mention in the source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Reference {
    Function(FunctionReference),
    Keyword(KeywordReference),
    Column(ColumnReference),
    Schema(SchemaReference),
    Table(TableReference),
    Alias(AliasReference),
    Value(ValueReference),
}

impl Reference {
    #[must_use]
    pub const fn id(&self) -> ReferenceId {
        match self {
            Self::Function(r) => r.id,
            Self::Keyword(r) => r.id,
            Self::Column(r) => r.id,
            Self::Schema(r) => r.id,
            Self::Table(r) => r.id,
            Self::Alias(r) => r.id,
            Self::Value(r) => r.id,
        }
    }

    /// Byte offset of the first byte of the significant identifier.
    #[must_use]
    pub const fn start(&self) -> usize {
        match self {
            Self::Function(r) => r.start,
            Self::Keyword(r) => r.start,
            Self::Column(r) => r.start,
            Self::Schema(r) => r.start,
            Self::Table(r) => r.start,
            Self::Alias(r) => r.start,
            Self::Value(r) => r.start,
        }
    }

    /// Byte offset of the last byte (inclusive).
    #[must_use]
    pub const fn stop(&self) -> usize {
        match self {
            Self::Function(r) => r.stop,
            Self::Keyword(r) => r.stop,
            Self::Column(r) => r.stop,
            Self::Schema(r) => r.stop,
            Self::Table(r) => r.stop,
            Self::Alias(r) => r.stop,
            Self::Value(r) => r.stop,
        }
    }

    /// Returns true if `offset` lies within `[start, stop]`.
    #[must_use]
    pub const fn contains(&self, offset: usize) -> bool {
        self.start() <= offset && offset <= self.stop()
    }

    /// The name, keyword or literal text the reference carries.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Function(r) => &r.function,
            Self::Keyword(r) => &r.keyword,
            Self::Column(r) => &r.column,
            Self::Schema(r) => &r.schema,
            Self::Table(r) => &r.table,
            Self::Alias(r) => &r.alias,
            Self::Value(r) => &r.value,
        }
    }
}

/// Strips one pair of matching `"`, `'` or `` ` `` delimiters.
///
/// No escape sequences are decoded.
///
/// ```
/// use oxide_mysql::unquote;
///
/// assert_eq!(unquote("`users`"), "users");
/// assert_eq!(unquote("'\"1\"'"), "\"1\"");
/// assert_eq!(unquote("users"), "users");
/// ```
#[must_use]
pub fn unquote(text: &str) -> &str {
    let bytes = text.as_bytes();
    match (bytes.first(), bytes.last()) {
        (Some(&first), Some(&last))
            if bytes.len() >= 2 && first == last && matches!(first, b'"' | b'\'' | b'`') =>
        {
            &text[1..text.len() - 1]
        }
        _ => text,
    }
}
