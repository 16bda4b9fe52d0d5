//! Depth-first tree walks with an explicit ancestor chain.

use crate::lexer::Token;

use super::{NodeId, NodeKind, ParseTree, RuleKind};

/// A rule node seen during a walk, together with its ancestors.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    /// The tree being walked.
    pub tree: &'a ParseTree,
    /// The rule node.
    pub node: NodeId,
    /// The rule kind of `node`.
    pub kind: RuleKind,
    /// Ancestors of `node`, root first.
    ancestors: &'a [NodeId],
}

impl<'a> RuleContext<'a> {
    /// Returns the direct parent, `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.ancestors.last().copied()
    }

    /// Iterates over the ancestors, nearest first.
    pub fn ancestors(&self) -> impl Iterator<Item = NodeId> + 'a {
        self.ancestors.iter().rev().copied()
    }

    /// Returns the nearest ancestor of the given kind.
    #[must_use]
    pub fn find_ancestor(&self, kind: RuleKind) -> Option<NodeId> {
        let tree = self.tree;
        self.ancestors().find(|&id| tree.is_rule(id, kind))
    }

    /// Returns the full path from the root down to this node.
    #[must_use]
    pub fn path(&self) -> Vec<NodeId> {
        let mut path = self.ancestors.to_vec();
        path.push(self.node);
        path
    }

    #[must_use]
    pub fn children(&self) -> &'a [NodeId] {
        self.tree.children(self.node)
    }

    #[must_use]
    pub fn text(&self) -> &'a str {
        self.tree.text(self.node)
    }
}

/// Callbacks fired by [`ParseTreeWalker::walk`].
#[allow(unused_variables)]
pub trait ParseTreeListener {
    /// Called before the children of a rule node are visited.
    fn enter_rule(&mut self, ctx: &RuleContext<'_>) {}

    /// Called after all children of a rule node were visited.
    fn exit_rule(&mut self, ctx: &RuleContext<'_>) {}

    fn visit_terminal(&mut self, tree: &ParseTree, node: NodeId, token: &Token) {}

    fn visit_error_node(&mut self, tree: &ParseTree, node: NodeId, token: &Token) {}
}

impl ParseTreeListener for () {}

impl<L: ParseTreeListener + ?Sized> ParseTreeListener for &mut L {
    fn enter_rule(&mut self, ctx: &RuleContext<'_>) {
        (**self).enter_rule(ctx);
    }

    fn exit_rule(&mut self, ctx: &RuleContext<'_>) {
        (**self).exit_rule(ctx);
    }

    fn visit_terminal(&mut self, tree: &ParseTree, node: NodeId, token: &Token) {
        (**self).visit_terminal(tree, node, token);
    }

    fn visit_error_node(&mut self, tree: &ParseTree, node: NodeId, token: &Token) {
        (**self).visit_error_node(tree, node, token);
    }
}

impl<L: ParseTreeListener> ParseTreeListener for Option<L> {
    fn enter_rule(&mut self, ctx: &RuleContext<'_>) {
        if let Some(listener) = self {
            listener.enter_rule(ctx);
        }
    }

    fn exit_rule(&mut self, ctx: &RuleContext<'_>) {
        if let Some(listener) = self {
            listener.exit_rule(ctx);
        }
    }

    fn visit_terminal(&mut self, tree: &ParseTree, node: NodeId, token: &Token) {
        if let Some(listener) = self {
            listener.visit_terminal(tree, node, token);
        }
    }

    fn visit_error_node(&mut self, tree: &ParseTree, node: NodeId, token: &Token) {
        if let Some(listener) = self {
            listener.visit_error_node(tree, node, token);
        }
    }
}

impl<A: ParseTreeListener, B: ParseTreeListener> ParseTreeListener for (A, B) {
    fn enter_rule(&mut self, ctx: &RuleContext<'_>) {
        self.0.enter_rule(ctx);
        self.1.enter_rule(ctx);
    }

    fn exit_rule(&mut self, ctx: &RuleContext<'_>) {
        self.0.exit_rule(ctx);
        self.1.exit_rule(ctx);
    }

    fn visit_terminal(&mut self, tree: &ParseTree, node: NodeId, token: &Token) {
        self.0.visit_terminal(tree, node, token);
        self.1.visit_terminal(tree, node, token);
    }

    fn visit_error_node(&mut self, tree: &ParseTree, node: NodeId, token: &Token) {
        self.0.visit_error_node(tree, node, token);
        self.1.visit_error_node(tree, node, token);
    }
}

/// Depth-first walker over a [`ParseTree`].
pub struct ParseTreeWalker;

impl ParseTreeWalker {
    /// Walks the whole tree from its root.
    ///
    /// `exit_rule` fires after every child of the rule has been visited, so a
    /// listener that only implements it sees nodes in post-order.
    pub fn walk<L: ParseTreeListener + ?Sized>(listener: &mut L, tree: &ParseTree) {
        if let Some(root) = tree.root() {
            let mut ancestors = Vec::new();
            Self::walk_node(listener, tree, root, &mut ancestors);
        }
    }

    fn walk_node<L: ParseTreeListener + ?Sized>(
        listener: &mut L,
        tree: &ParseTree,
        id: NodeId,
        ancestors: &mut Vec<NodeId>,
    ) {
        let Some(node) = tree.node(id) else {
            return;
        };
        match node.kind() {
            NodeKind::Terminal(index) => {
                if let Some(token) = tree.tokens().get(index) {
                    listener.visit_terminal(tree, id, token);
                }
            }
            NodeKind::Error(index) => {
                if let Some(token) = tree.tokens().get(index) {
                    listener.visit_error_node(tree, id, token);
                }
            }
            NodeKind::Rule(kind) => {
                listener.enter_rule(&RuleContext {
                    tree,
                    node: id,
                    kind,
                    ancestors: ancestors.as_slice(),
                });
                ancestors.push(id);
                for &child in node.children() {
                    Self::walk_node(listener, tree, child, ancestors);
                }
                ancestors.pop();
                listener.exit_rule(&RuleContext {
                    tree,
                    node: id,
                    kind,
                    ancestors: ancestors.as_slice(),
                });
            }
        }
    }
}
