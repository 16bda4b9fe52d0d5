//! Parser core: token cursor, node construction and error handling.

use tracing::trace;

use crate::error::{
    ErrorListener, ErrorOrigin, ParseCancelled, RecognitionKind, SyntaxErrorEvent,
};
use crate::lexer::{Channel, Keyword, KeywordStatus, Token, TokenType};
use crate::sql_mode::SqlMode;
use crate::tree::{Node, NodeId, RuleKind};
use crate::version::{ServerVersion, VersionFamily};

use super::{ErrorStrategy, ParserOptions, PredictionMode, StartRule};

pub(super) type PResult<T = ()> = Result<T, Abort>;

/// Why a rule stopped early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Abort {
    /// The bail strategy gave up at the token with this index.
    Cancelled(usize),
    /// The error was reported; unwind to the statement list and skip ahead.
    Resync,
    /// A speculative alternative did not match.
    Backtrack,
}

/// Tokens that can start a statement, used for error reports.
const STATEMENT_STARTS: &[TokenType] = &[
    TokenType::Keyword(Keyword::Select),
    TokenType::Keyword(Keyword::Insert),
    TokenType::Keyword(Keyword::Update),
    TokenType::Keyword(Keyword::Delete),
    TokenType::Keyword(Keyword::Create),
    TokenType::Keyword(Keyword::Drop),
    TokenType::Keyword(Keyword::Alter),
    TokenType::Keyword(Keyword::Set),
    TokenType::Keyword(Keyword::Show),
    TokenType::Keyword(Keyword::Use),
    TokenType::OpenPar,
];

/// Statements accepted up to the next terminator without further structure.
const OTHER_STATEMENT_STARTS: &[Keyword] = &[
    Keyword::Analyze,
    Keyword::Binlog,
    Keyword::Cache,
    Keyword::Call,
    Keyword::Change,
    Keyword::Check,
    Keyword::Checksum,
    Keyword::Deallocate,
    Keyword::Do,
    Keyword::Execute,
    Keyword::Flush,
    Keyword::Get,
    Keyword::Grant,
    Keyword::Handler,
    Keyword::Help,
    Keyword::Import,
    Keyword::Install,
    Keyword::Kill,
    Keyword::Load,
    Keyword::Lock,
    Keyword::Optimize,
    Keyword::Prepare,
    Keyword::Purge,
    Keyword::Repair,
    Keyword::Reset,
    Keyword::Resignal,
    Keyword::Revoke,
    Keyword::Shutdown,
    Keyword::Signal,
    Keyword::Stop,
    Keyword::Uninstall,
    Keyword::Unlock,
    Keyword::Xa,
];

struct Snapshot {
    pos: usize,
    nodes: usize,
    stack: usize,
    parent_children: Vec<NodeId>,
    last_consumed: Option<usize>,
    expected: Vec<TokenType>,
}

/// MySQL tree builder.
pub struct Parser<'t, 'l> {
    tokens: &'t [Token],
    /// Indices of the default channel tokens, in order.
    significant: Vec<usize>,
    eof: Token,
    /// Position in `significant`.
    pos: usize,
    options: ParserOptions,
    family: VersionFamily,
    listener: &'l mut dyn ErrorListener,
    nodes: Vec<Node>,
    /// Open rule nodes, innermost last.
    stack: Vec<usize>,
    /// Token types checked since the last consumed token.
    expected: Vec<TokenType>,
    last_consumed: Option<usize>,
    speculating: usize,
}

impl<'t, 'l> Parser<'t, 'l> {
    /// Creates a parser over a token list produced by the tokenizer.
    ///
    /// Hidden channel tokens are skipped. Errors are reported to `listener`
    /// when the strategy is [`ErrorStrategy::Recover`].
    pub fn new(
        tokens: &'t [Token],
        options: ParserOptions,
        listener: &'l mut dyn ErrorListener,
    ) -> Self {
        let significant = tokens
            .iter()
            .enumerate()
            .filter(|(_, token)| token.channel == Channel::Default)
            .map(|(index, _)| index)
            .collect();
        let eof = tokens.iter().rev().find(|token| token.is_eof()).cloned();
        let eof = eof.unwrap_or_else(|| {
            let end = tokens.last().map_or(0, |token| token.stop + 1);
            Token {
                token_type: TokenType::Eof,
                channel: Channel::Default,
                text: String::new(),
                start: end,
                stop: end,
                line: tokens.last().map_or(1, |token| token.line),
                column: 0,
                index: tokens.len(),
            }
        });
        Self {
            tokens,
            significant,
            eof,
            pos: 0,
            options,
            family: options.server_version.grammar_family(),
            listener,
            nodes: Vec::new(),
            stack: Vec::new(),
            expected: Vec::new(),
            last_consumed: None,
            speculating: 0,
        }
    }

    /// Parses the input starting at `rule`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseCancelled`] when the bail strategy hits a syntax error.
    /// With the recover strategy errors go to the listener and this returns `Ok`.
    pub fn parse(&mut self, rule: StartRule) -> Result<(), ParseCancelled> {
        let result = match rule {
            StartRule::Query => self.query(),
            StartRule::SimpleStatement => self.simple_statement(),
            StartRule::SelectStatement => self.select_statement(),
            StartRule::Expr => self.expr(),
            StartRule::Identifier => self.identifier(),
        };
        match result {
            Err(Abort::Cancelled(token_index)) => Err(ParseCancelled { token_index }),
            Ok(()) | Err(Abort::Resync | Abort::Backtrack) => Ok(()),
        }
    }

    /// Returns the nodes built so far; the first one is the root.
    #[must_use]
    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }

    // Settings

    pub(super) const fn server_version(&self) -> ServerVersion {
        self.options.server_version
    }

    pub(super) fn has_mode(&self, mode: SqlMode) -> bool {
        self.options.sql_mode.contains(mode)
    }

    pub(super) fn is_ll(&self) -> bool {
        self.options.prediction_mode == PredictionMode::Ll
    }

    // Token cursor

    /// Returns the `k`-th significant token ahead (`k = 1` is the current one).
    pub(super) fn lt(&self, k: usize) -> &Token {
        self.significant
            .get((self.pos + k).saturating_sub(1))
            .and_then(|&index| self.tokens.get(index))
            .unwrap_or(&self.eof)
    }

    pub(super) fn la(&self, k: usize) -> TokenType {
        self.lt(k).token_type
    }

    pub(super) fn la_is_kw(&self, k: usize, keyword: Keyword) -> bool {
        self.la(k) == TokenType::Keyword(keyword)
    }

    fn current_index(&self) -> usize {
        self.significant
            .get(self.pos)
            .copied()
            .unwrap_or(self.eof.index)
    }

    /// Returns the type of the token following the parenthesised group that
    /// starts at lookahead `k`.
    pub(super) fn la_after_parens(&self, k: usize) -> TokenType {
        let mut depth = 0usize;
        let mut i = k;
        loop {
            match self.la(i) {
                TokenType::OpenPar => depth += 1,
                TokenType::ClosePar => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return self.la(i + 1);
                    }
                }
                TokenType::Eof => return TokenType::Eof,
                _ => {}
            }
            i += 1;
        }
    }

    /// Returns true if the next token is directly attached to the current one.
    pub(super) fn next_is_adjacent(&self) -> bool {
        self.lt(1).stop + 1 == self.lt(2).start
    }

    fn note(&mut self, token_type: TokenType) {
        if !self.expected.contains(&token_type) {
            self.expected.push(token_type);
        }
    }

    pub(super) fn at(&mut self, token_type: TokenType) -> bool {
        self.note(token_type);
        self.la(1) == token_type
    }

    pub(super) fn at_kw(&mut self, keyword: Keyword) -> bool {
        self.at(TokenType::Keyword(keyword))
    }

    pub(super) fn at_any_kw(&mut self, keywords: &[Keyword]) -> bool {
        let mut found = false;
        for &keyword in keywords {
            found |= self.at_kw(keyword);
        }
        found
    }

    pub(super) fn accept(&mut self, token_type: TokenType) -> bool {
        if self.at(token_type) {
            self.consume();
            true
        } else {
            false
        }
    }

    pub(super) fn accept_kw(&mut self, keyword: Keyword) -> bool {
        self.accept(TokenType::Keyword(keyword))
    }

    /// Consumes the next token if it is one of `keywords`.
    pub(super) fn accept_any_kw(&mut self, keywords: &[Keyword]) -> bool {
        if self.at_any_kw(keywords) {
            self.consume();
            true
        } else {
            false
        }
    }

    /// Returns true if `token_type` can be used as an unquoted identifier.
    pub(super) fn is_identifier(&self, token_type: TokenType) -> bool {
        match token_type {
            TokenType::Identifier | TokenType::BackTickQuotedId => true,
            TokenType::Keyword(keyword) => keyword.status(self.family) == KeywordStatus::NonReserved,
            _ => false,
        }
    }

    pub(super) fn at_identifier(&mut self) -> bool {
        self.note(TokenType::Identifier);
        self.is_identifier(self.la(1))
    }

    pub(super) fn at_text(&mut self) -> bool {
        self.note(TokenType::SingleQuotedText);
        matches!(
            self.la(1),
            TokenType::SingleQuotedText | TokenType::DoubleQuotedText
        )
    }

    /// Adds the current token to the open rule and moves past it.
    pub(super) fn consume(&mut self) {
        let index = self.current_index();
        self.add_terminal(index, false);
        self.last_consumed = Some(index);
        if self.la(1) != TokenType::Eof {
            self.pos += 1;
        }
        self.expected.clear();
    }

    fn consume_error(&mut self) {
        let index = self.current_index();
        self.add_terminal(index, true);
        self.last_consumed = Some(index);
        if self.la(1) != TokenType::Eof {
            self.pos += 1;
        }
    }

    pub(super) fn expect(&mut self, token_type: TokenType) -> PResult {
        if self.at(token_type) {
            self.consume();
            return Ok(());
        }
        if self.speculating == 0 && self.options.error_strategy == ErrorStrategy::Recover {
            if self.la(2) == token_type {
                let message = format!(
                    "extraneous input {} expecting {}",
                    self.quoted_current(),
                    self.expected_display()
                );
                self.report(None, &message);
                self.consume_error();
                self.consume();
                return Ok(());
            }
            if matches!(token_type, TokenType::ClosePar | TokenType::CloseCurly) {
                self.expected = vec![token_type];
                let message = format!(
                    "missing {} at {}",
                    token_type.display_name(),
                    self.quoted_current()
                );
                self.report(None, &message);
                self.expected.clear();
                return Ok(());
            }
        }
        Err(self.mismatch())
    }

    pub(super) fn expect_kw(&mut self, keyword: Keyword) -> PResult {
        self.expect(TokenType::Keyword(keyword))
    }

    /// Consumes one token of the given kinds or fails.
    pub(super) fn expect_any(&mut self, token_types: &[TokenType]) -> PResult {
        let mut found = false;
        for &token_type in token_types {
            found |= self.at(token_type);
        }
        if found {
            self.consume();
            Ok(())
        } else {
            Err(self.mismatch())
        }
    }

    pub(super) fn expect_any_kw(&mut self, keywords: &[Keyword]) -> PResult {
        if self.accept_any_kw(keywords) {
            Ok(())
        } else {
            Err(self.mismatch())
        }
    }

    /// Consumes tokens up to, but excluding, the next `;` or the end of input.
    pub(super) fn consume_to_statement_end(&mut self) {
        while !matches!(self.la(1), TokenType::Semicolon | TokenType::Eof) {
            self.consume();
        }
    }

    fn skip_to_statement_end(&mut self) {
        while !matches!(self.la(1), TokenType::Semicolon | TokenType::Eof) {
            self.consume_error();
        }
    }

    // Node construction

    /// Builds a rule node around whatever `body` consumes.
    ///
    /// The node stays in the tree when `body` fails, so partial input still
    /// shows up in the result.
    pub(super) fn rule(&mut self, kind: RuleKind, body: impl FnOnce(&mut Self) -> PResult) -> PResult {
        let id = self.nodes.len();
        self.nodes.push(Node::rule(kind, self.current_index()));
        self.attach(id);
        self.stack.push(id);
        let result = body(self);
        self.close(id);
        result
    }

    /// Like [`Parser::rule`], but the new node adopts the last child of the
    /// open rule as its first child. Used for left recursive rules.
    pub(super) fn wrap(&mut self, kind: RuleKind, body: impl FnOnce(&mut Self) -> PResult) -> PResult {
        if self.stack.is_empty() {
            return self.wrap_root(kind, body);
        }
        let id = self.nodes.len();
        let adopted = self
            .stack
            .last()
            .and_then(|&parent| self.nodes.get_mut(parent))
            .and_then(|parent| parent.children.pop());
        let start = adopted
            .and_then(|child| self.nodes.get(child.0))
            .map_or_else(|| self.current_index(), |child| child.start_token);
        let mut node = Node::rule(kind, start);
        node.children.extend(adopted);
        self.nodes.push(node);
        self.attach(id);
        self.stack.push(id);
        let result = body(self);
        self.close(id);
        result
    }

    /// Wraps the root when a start rule is itself left recursive.
    ///
    /// The old root moves to the end of the arena so that the root keeps index 0.
    fn wrap_root(&mut self, kind: RuleKind, body: impl FnOnce(&mut Self) -> PResult) -> PResult {
        let moved = self.nodes.len();
        let Some(root) = self.nodes.first_mut() else {
            return self.rule(kind, body);
        };
        let start = root.start_token;
        let old_root = core::mem::replace(root, Node::rule(kind, start));
        self.nodes.push(old_root);
        if let Some(root) = self.nodes.first_mut() {
            root.children.push(NodeId(moved));
        }
        self.stack.push(0);
        let result = body(self);
        self.close(0);
        result
    }

    fn attach(&mut self, id: usize) {
        if let Some(parent) = self.stack.last().and_then(|&parent| self.nodes.get_mut(parent)) {
            parent.children.push(NodeId(id));
        }
    }

    fn add_terminal(&mut self, token: usize, error: bool) {
        let id = self.nodes.len();
        self.nodes.push(Node::terminal(token, error));
        self.attach(id);
    }

    fn close(&mut self, id: usize) {
        self.stack.pop();
        let last = self.last_consumed;
        if let Some(node) = self.nodes.get_mut(id) {
            node.stop_token = last.filter(|&last| last >= node.start_token);
        }
    }

    // Speculation

    /// Runs `body` as a speculative alternative.
    ///
    /// On failure everything it built or consumed is rolled back and nothing
    /// is reported.
    pub(super) fn speculate(&mut self, rule: RuleKind, body: impl FnOnce(&mut Self) -> PResult) -> bool {
        let snapshot = Snapshot {
            pos: self.pos,
            nodes: self.nodes.len(),
            stack: self.stack.len(),
            parent_children: self
                .stack
                .last()
                .and_then(|&parent| self.nodes.get(parent))
                .map(|parent| parent.children.clone())
                .unwrap_or_default(),
            last_consumed: self.last_consumed,
            expected: self.expected.clone(),
        };
        self.speculating += 1;
        let result = body(self);
        self.speculating -= 1;
        if result.is_ok() {
            return true;
        }
        trace!(rule = rule.name(), token = self.lt(1).index, "speculation failed, backtracking");
        self.nodes.truncate(snapshot.nodes);
        self.stack.truncate(snapshot.stack);
        if let Some(parent) = self.stack.last().and_then(|&parent| self.nodes.get_mut(parent)) {
            parent.children = snapshot.parent_children;
        }
        self.pos = snapshot.pos;
        self.last_consumed = snapshot.last_consumed;
        self.expected = snapshot.expected;
        false
    }

    // Errors

    fn quoted_current(&self) -> String {
        let token = self.lt(1);
        if token.is_eof() {
            "'<EOF>'".to_string()
        } else {
            format!("'{}'", token.text)
        }
    }

    fn expected_display(&self) -> String {
        match self.expected.as_slice() {
            [one] => one.display_name().to_string(),
            many => {
                let names: Vec<&str> = many.iter().map(|t| t.display_name()).collect();
                format!("{{{}}}", names.join(", "))
            }
        }
    }

    fn report(&mut self, recognition: Option<RecognitionKind>, message: &str) {
        let offending = self.lt(1).clone();
        let expected = self.expected.clone();
        self.listener.syntax_error(&SyntaxErrorEvent {
            line: offending.line,
            column: offending.column,
            message,
            origin: ErrorOrigin::Parser {
                offending: &offending,
                expected: &expected,
                recognition,
            },
        });
    }

    fn syntax_error(&mut self, kind: RecognitionKind, message: &str) -> Abort {
        if self.speculating > 0 {
            return Abort::Backtrack;
        }
        match self.options.error_strategy {
            ErrorStrategy::Bail => Abort::Cancelled(self.current_index()),
            ErrorStrategy::Recover => {
                self.report(Some(kind), message);
                Abort::Resync
            }
        }
    }

    /// The current token is not the one the rule requires.
    pub(super) fn mismatch(&mut self) -> Abort {
        let message = format!(
            "mismatched input {} expecting {}",
            self.quoted_current(),
            self.expected_display()
        );
        self.syntax_error(RecognitionKind::InputMismatch, &message)
    }

    /// None of the alternatives of a decision matches the current token.
    pub(super) fn no_viable(&mut self, alternatives: &[TokenType]) -> Abort {
        for &alternative in alternatives {
            self.note(alternative);
        }
        let message = format!("no viable alternative at input {}", self.quoted_current());
        self.syntax_error(RecognitionKind::NoViableAlt, &message)
    }

    /// A version gate rejected the rule.
    pub(super) fn failed_predicate(&mut self, rule: RuleKind, predicate: &str) -> Abort {
        let message = format!("rule {} failed predicate: {{{predicate}}}?", rule.name());
        self.syntax_error(RecognitionKind::FailedPredicate, &message)
    }

    // Statements

    pub(super) fn query(&mut self) -> PResult {
        self.rule(RuleKind::Query, |p| loop {
            if p.at(TokenType::Eof) {
                p.consume();
                return Ok(());
            }
            if p.accept(TokenType::Semicolon) {
                continue;
            }
            match p.simple_statement() {
                Ok(()) => {}
                Err(Abort::Resync) => {
                    p.skip_to_statement_end();
                    continue;
                }
                Err(abort) => return Err(abort),
            }
            if !p.at(TokenType::Eof) {
                match p.expect(TokenType::Semicolon) {
                    Ok(()) => {}
                    Err(Abort::Resync) => p.skip_to_statement_end(),
                    Err(abort) => return Err(abort),
                }
            }
        })
    }

    pub(super) fn simple_statement(&mut self) -> PResult {
        self.rule(RuleKind::SimpleStatement, |p| {
            let keyword = match p.la(1) {
                TokenType::OpenPar => return p.select_statement(),
                TokenType::Keyword(keyword) => keyword,
                _ => return Err(p.no_viable(STATEMENT_STARTS)),
            };
            match keyword {
                Keyword::Select | Keyword::With => p.select_statement(),
                Keyword::Insert => p.insert_statement(),
                Keyword::Replace => p.replace_statement(),
                Keyword::Update => p.update_statement(),
                Keyword::Delete => p.delete_statement(),
                Keyword::Create => p.create_statement(),
                Keyword::Drop => p.drop_statement(),
                Keyword::Alter => p.alter_statement(),
                Keyword::Truncate => p.truncate_table(),
                Keyword::Rename => p.rename_statement(),
                Keyword::Use => p.use_command(),
                Keyword::Set => p.set_statement(),
                Keyword::Start
                | Keyword::Begin
                | Keyword::Commit
                | Keyword::Rollback
                | Keyword::Savepoint
                | Keyword::Release => p.transaction_or_savepoint(),
                Keyword::Show => p.show_statement(),
                Keyword::Describe | Keyword::Desc | Keyword::Explain => p.describe_or_explain(),
                _ if OTHER_STATEMENT_STARTS.contains(&keyword) => p.other_statement(),
                _ => Err(p.no_viable(STATEMENT_STARTS)),
            }
        })
    }

    /// Accepts the rest of the statement without structure.
    pub(super) fn other_statement(&mut self) -> PResult {
        self.rule(RuleKind::OtherStatement, |p| {
            p.consume();
            p.consume_to_statement_end();
            Ok(())
        })
    }

    /// Checks that the server version is at least `required`.
    pub(super) fn require_version(&mut self, rule: RuleKind, required: ServerVersion) -> PResult {
        if self.server_version() >= required {
            Ok(())
        } else {
            Err(self.failed_predicate(rule, &format!("serverVersion >= {}", required.number())))
        }
    }
}
