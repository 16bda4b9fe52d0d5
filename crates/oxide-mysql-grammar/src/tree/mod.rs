//! Arena-based concrete syntax tree.
//!
//! Rule nodes are tagged with a [`RuleKind`] when they are built; terminal
//! nodes point at tokens. Nodes hold no parent links: tree walks hand the
//! ancestor chain to listeners instead (see [`ParseTreeWalker`]).

mod node;
mod walker;

pub use node::{Node, NodeId, NodeKind, RuleKind};
pub use walker::{ParseTreeListener, ParseTreeWalker, RuleContext};

use crate::lexer::Token;

/// A parse tree together with the source and tokens it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTree {
    source: String,
    tokens: Vec<Token>,
    nodes: Vec<Node>,
}

impl ParseTree {
    /// Creates a tree from the nodes produced by the parser.
    ///
    /// The first node is the root.
    #[must_use]
    pub fn new(source: impl Into<String>, tokens: Vec<Token>, nodes: Vec<Node>) -> Self {
        Self {
            source: source.into(),
            tokens,
            nodes,
        }
    }

    /// Returns the root node, `None` for an empty tree.
    #[must_use]
    pub fn root(&self) -> Option<NodeId> {
        (!self.nodes.is_empty()).then_some(NodeId(0))
    }

    /// Returns the source text the tree was built from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns every token, hidden ones included.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    #[must_use]
    pub fn rule_kind(&self, id: NodeId) -> Option<RuleKind> {
        self.node(id).and_then(Node::rule_kind)
    }

    /// Returns true if `id` is a rule node of the given kind.
    #[must_use]
    pub fn is_rule(&self, id: NodeId, kind: RuleKind) -> bool {
        self.rule_kind(id) == Some(kind)
    }

    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map_or(&[][..], Node::children)
    }

    #[must_use]
    pub fn child(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.children(id).get(index).copied()
    }

    /// Returns the first child that is a rule node of the given kind.
    #[must_use]
    pub fn find_child(&self, id: NodeId, kind: RuleKind) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|&child| self.is_rule(child, kind))
    }

    /// Returns the token of a terminal or error node.
    #[must_use]
    pub fn token(&self, id: NodeId) -> Option<&Token> {
        match self.node(id)?.kind {
            NodeKind::Terminal(index) | NodeKind::Error(index) => self.tokens.get(index),
            NodeKind::Rule(_) => None,
        }
    }

    /// Returns the first token covered by the node.
    #[must_use]
    pub fn start_token(&self, id: NodeId) -> Option<&Token> {
        self.tokens.get(self.node(id)?.start_token)
    }

    /// Returns the last token covered by the node.
    #[must_use]
    pub fn stop_token(&self, id: NodeId) -> Option<&Token> {
        self.tokens.get(self.node(id)?.stop_token?)
    }

    /// Byte offset of the first byte covered by the node.
    #[must_use]
    pub fn start(&self, id: NodeId) -> usize {
        self.start_token(id).map_or(0, |token| token.start)
    }

    /// Byte offset of the last byte covered by the node (inclusive).
    ///
    /// Rules that matched nothing report their start offset.
    #[must_use]
    pub fn stop(&self, id: NodeId) -> usize {
        self.stop_token(id)
            .map_or_else(|| self.start(id), |token| token.stop)
    }

    /// Returns the source text covered by the node, hidden tokens included.
    #[must_use]
    pub fn text(&self, id: NodeId) -> &str {
        let (Some(start), Some(stop)) = (self.start_token(id), self.stop_token(id)) else {
            return "";
        };
        let end = if stop.is_eof() { stop.start } else { stop.stop + 1 };
        self.source.get(start.start..end).unwrap_or_default()
    }

    /// Renders the subtree in LISP style, e.g. `(query (simpleStatement ...) <EOF>)`.
    #[must_use]
    pub fn to_string_tree(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_tree(id, &mut out);
        out
    }

    fn write_tree(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.node(id) else {
            return;
        };
        match node.kind {
            NodeKind::Rule(kind) => {
                out.push('(');
                out.push_str(kind.name());
                for &child in &node.children {
                    out.push(' ');
                    self.write_tree(child, out);
                }
                out.push(')');
            }
            NodeKind::Terminal(_) | NodeKind::Error(_) => {
                if let Some(token) = self.token(id) {
                    if token.is_eof() {
                        out.push_str("<EOF>");
                    } else {
                        out.push_str(&token.text);
                    }
                }
            }
        }
    }
}
