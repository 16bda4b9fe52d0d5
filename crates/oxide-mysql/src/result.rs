//! The outcome of one parse call.

use oxide_mysql_grammar::lexer::Token;
use oxide_mysql_grammar::tree::ParseTree;
use oxide_mysql_grammar::version::VersionFamily;

use crate::diagnostics::{LexerError, ParserError, SyntaxDiagnostic};
use crate::keywords;
use crate::query_type::{self, QueryType};
use crate::references::{
    AliasReference, ColumnReference, FunctionReference, KeywordReference, Reference, ReferenceId,
    SchemaReference, TableReference, ValueReference,
};

/// Everything one parse produced: tree, tokens, references and at most one
/// error of each kind.
///
/// A result with errors still carries the partial tree and whatever
/// references could be found in it.
#[derive(Debug, Clone)]
pub struct ParseResult {
    tree: ParseTree,
    references: Vec<Reference>,
    lexer_error: Option<LexerError>,
    parser_error: Option<ParserError>,
    version_family: Option<VersionFamily>,
}

macro_rules! typed_references {
    ($($(#[$meta:meta])* $method:ident => $variant:ident($ty:ty),)*) => {
        $(
            $(#[$meta])*
            pub fn $method(&self) -> impl Iterator<Item = &$ty> + '_ {
                self.references.iter().filter_map(|reference| match reference {
                    Reference::$variant(inner) => Some(inner),
                    _ => None,
                })
            }
        )*
    };
}

impl ParseResult {
    pub(crate) const fn new(
        tree: ParseTree,
        references: Vec<Reference>,
        lexer_error: Option<LexerError>,
        parser_error: Option<ParserError>,
        version_family: Option<VersionFamily>,
    ) -> Self {
        Self {
            tree,
            references,
            lexer_error,
            parser_error,
            version_family,
        }
    }

    #[must_use]
    pub const fn tree(&self) -> &ParseTree {
        &self.tree
    }

    /// Every token, hidden ones and the end-of-input token included.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        self.tree.tokens()
    }

    /// The text that was parsed.
    #[must_use]
    pub fn source(&self) -> &str {
        self.tree.source()
    }

    /// References in the order the tree walk found them.
    #[must_use]
    pub fn references(&self) -> &[Reference] {
        &self.references
    }

    #[must_use]
    pub fn reference(&self, id: ReferenceId) -> Option<&Reference> {
        self.references.get(id.0)
    }

    typed_references! {
        tables => Table(TableReference),
        schemas => Schema(SchemaReference),
        columns => Column(ColumnReference),
        aliases => Alias(AliasReference),
        values => Value(ValueReference),
        functions => Function(FunctionReference),
    }

    #[must_use]
    pub const fn lexer_error(&self) -> Option<&LexerError> {
        self.lexer_error.as_ref()
    }

    #[must_use]
    pub const fn parser_error(&self) -> Option<&ParserError> {
        self.parser_error.as_ref()
    }

    /// The errors that are present, tokenizer error first.
    #[must_use]
    pub fn diagnostics(&self) -> Vec<SyntaxDiagnostic> {
        let lexer = self.lexer_error.iter().cloned().map(SyntaxDiagnostic::Lexer);
        let parser = self.parser_error.iter().cloned().map(SyntaxDiagnostic::Parser);
        lexer.chain(parser).collect()
    }

    #[must_use]
    pub const fn has_errors(&self) -> bool {
        self.lexer_error.is_some() || self.parser_error.is_some()
    }

    /// The first non-EOF token whose `[start, stop]` contains `offset`.
    #[must_use]
    pub fn token_at_offset(&self, offset: usize) -> Option<&Token> {
        self.tokens()
            .iter()
            .find(|token| !token.is_eof() && token.contains(offset))
    }

    /// The first reference, in discovery order, that contains `offset`.
    #[must_use]
    pub fn reference_at_offset(&self, offset: usize) -> Option<&Reference> {
        self.references
            .iter()
            .find(|reference| reference.contains(offset))
    }

    /// The reference at `offset`, or a keyword reference when the token
    /// there is a reserved word of the configured version.
    ///
    /// A synthesized keyword reference is not part of
    /// [`ParseResult::references`]; its id is one past the last reference.
    #[must_use]
    pub fn node_at_offset(&self, offset: usize) -> Option<Reference> {
        if let Some(reference) = self.reference_at_offset(offset) {
            return Some(reference.clone());
        }
        let token = self.token_at_offset(offset)?;
        if !keywords::is_reserved_keyword(&token.text, self.version_family) {
            return None;
        }
        Some(Reference::Keyword(KeywordReference {
            id: ReferenceId(self.references.len()),
            keyword: token.text.clone(),
            start: token.start,
            stop: token.stop,
        }))
    }

    #[must_use]
    pub fn query_type(&self) -> QueryType {
        query_type::classify(self.tokens())
    }

    /// Returns true when the statement changes the schema.
    #[must_use]
    pub fn is_ddl(&self) -> bool {
        self.query_type().is_ddl()
    }
}
