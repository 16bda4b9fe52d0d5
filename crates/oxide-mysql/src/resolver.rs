//! Reference resolution over a parse tree.
//!
//! [`ReferenceResolver`] listens to a tree walk and records every table,
//! schema, column, alias, literal value and function call in discovery
//! order. [`ReferenceResolver::finish`] then binds unqualified columns to the
//! table of their query when it names exactly one, and applies single-table
//! inference to the whole statement.

use std::collections::HashMap;

use tracing::debug;

use oxide_mysql_grammar::lexer::TokenType;
use oxide_mysql_grammar::tree::{NodeId, ParseTree, ParseTreeListener, RuleContext, RuleKind};

use crate::references::{
    AliasReference, AliasTarget, Clause, ColumnReference, DataType, FunctionReference, Reference,
    ReferenceId, SchemaReference, TableReference, ValueReference, unquote,
};

/// Collects references while the tree is walked.
#[derive(Debug, Default)]
pub struct ReferenceResolver {
    references: Vec<Reference>,
    /// `tableRef` and `tableName` nodes and the table reference built for them.
    table_nodes: HashMap<NodeId, ReferenceId>,
    /// `columnRef` nodes and the column reference built for them.
    column_nodes: HashMap<NodeId, ReferenceId>,
    /// Columns waiting for the single table of their query, which the
    /// post-order walk only reaches after the select list.
    pending_tables: Vec<(ReferenceId, NodeId)>,
}

impl ParseTreeListener for ReferenceResolver {
    fn exit_rule(&mut self, ctx: &RuleContext<'_>) {
        match ctx.kind {
            RuleKind::TableRef | RuleKind::TableName => {
                self.table(ctx);
            }
            RuleKind::SchemaRef | RuleKind::SchemaName => {
                self.schema(ctx);
            }
            RuleKind::TableAlias => {
                self.table_alias(ctx);
            }
            RuleKind::ColumnRef => {
                self.column(ctx);
            }
            RuleKind::SelectAlias => {
                self.select_alias(ctx);
            }
            RuleKind::Predicate => {
                self.value(ctx);
            }
            RuleKind::FunctionCall => {
                self.function(ctx);
            }
            _ => {}
        }
    }
}

impl ReferenceResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Links deferred tables, runs single-table inference and returns the
    /// references in discovery order.
    #[must_use]
    pub fn finish(mut self) -> Vec<Reference> {
        for (column, node) in std::mem::take(&mut self.pending_tables) {
            let table = self.table_nodes.get(&node).copied();
            if let (Some(table), Some(Reference::Column(column))) =
                (table, self.references.get_mut(column.0))
            {
                column.table = Some(table);
            }
        }
        infer_single_table(&mut self.references);

        let count = |matches: fn(&Reference) -> bool| {
            self.references.iter().filter(|r| matches(r)).count()
        };
        debug!(
            tables = count(|r| matches!(r, Reference::Table(_))),
            columns = count(|r| matches!(r, Reference::Column(_))),
            values = count(|r| matches!(r, Reference::Value(_))),
            total = self.references.len(),
            "resolved references"
        );
        self.references
    }

    fn push(&mut self, build: impl FnOnce(ReferenceId) -> Reference) -> ReferenceId {
        let id = ReferenceId(self.references.len());
        self.references.push(build(id));
        id
    }

    fn push_schema(&mut self, tree: &ParseTree, node: NodeId) -> ReferenceId {
        self.push(|id| {
            Reference::Schema(SchemaReference {
                id,
                schema: name(tree, node),
                start: tree.start(node),
                stop: tree.stop(node),
            })
        })
    }

    fn push_table(
        &mut self,
        tree: &ParseTree,
        schema: Option<NodeId>,
        node: NodeId,
        qualifier: bool,
    ) -> ReferenceId {
        let schema = schema.map(|schema| self.push_schema(tree, schema));
        self.push(|id| {
            Reference::Table(TableReference {
                id,
                table: name(tree, node),
                schema,
                alias: None,
                qualifier,
                start: tree.start(node),
                stop: tree.stop(node),
            })
        })
    }

    fn table(&mut self, ctx: &RuleContext<'_>) -> Option<()> {
        let tree = ctx.tree;
        let (schema, table) = match identifiers(tree, ctx.node).as_slice() {
            [table] => (None, *table),
            [schema, table] => (Some(*schema), *table),
            _ => return None,
        };
        let id = self.push_table(tree, schema, table, false);
        self.table_nodes.insert(ctx.node, id);
        Some(())
    }

    fn schema(&mut self, ctx: &RuleContext<'_>) -> Option<()> {
        let node = *identifiers(ctx.tree, ctx.node).first()?;
        self.push_schema(ctx.tree, node);
        Some(())
    }

    fn table_alias(&mut self, ctx: &RuleContext<'_>) -> Option<()> {
        let tree = ctx.tree;
        let siblings = tree.children(ctx.parent()?);
        let position = siblings.iter().position(|&sibling| sibling == ctx.node)?;
        let table_node = siblings[..position]
            .iter()
            .rev()
            .copied()
            .find(|&sibling| tree.is_rule(sibling, RuleKind::TableRef))?;
        let table = *self.table_nodes.get(&table_node)?;
        let alias_node = *identifiers(tree, ctx.node).first()?;

        let alias = self.push(|id| {
            Reference::Alias(AliasReference {
                id,
                alias: name(tree, alias_node),
                target: AliasTarget::Table(table),
                start: tree.start(alias_node),
                stop: tree.stop(alias_node),
            })
        });
        if let Some(Reference::Table(table)) = self.references.get_mut(table.0) {
            table.alias = Some(alias);
        }
        Some(())
    }

    fn column(&mut self, ctx: &RuleContext<'_>) -> Option<()> {
        let tree = ctx.tree;
        let (table, column) = match identifiers(tree, ctx.node).as_slice() {
            [column] => (None, *column),
            [table, column] => (Some(self.push_table(tree, None, *table, true)), *column),
            [schema, table, column] => {
                (Some(self.push_table(tree, Some(*schema), *table, true)), *column)
            }
            _ => return None,
        };
        let clause = clause_of(ctx);
        let id = self.push(|id| {
            Reference::Column(ColumnReference {
                id,
                column: name(tree, column),
                table,
                alias: None,
                clause,
                start: tree.start(column),
                stop: tree.stop(column),
            })
        });
        self.column_nodes.insert(ctx.node, id);
        if table.is_none() {
            if let Some(table_node) = single_table_in_scope(ctx) {
                self.pending_tables.push((id, table_node));
            }
        }
        Some(())
    }

    /// `expr AS alias` in a select list.
    fn select_alias(&mut self, ctx: &RuleContext<'_>) -> Option<()> {
        let tree = ctx.tree;
        let item = ctx.parent()?;
        let alias_node = tree.children(ctx.node).last().copied()?;
        let column = tree
            .child(item, 0)
            .and_then(|expr| tree.child(expr, 0))
            .and_then(|primary| tree.child(primary, 0))
            .filter(|&predicate| tree.is_rule(predicate, RuleKind::Predicate))
            .and_then(|predicate| plain_column(tree, predicate))
            .and_then(|node| self.column_nodes.get(&node).copied());

        let alias = self.push(|id| {
            Reference::Alias(AliasReference {
                id,
                alias: name(tree, alias_node),
                target: AliasTarget::Column(column),
                start: tree.start(alias_node),
                stop: tree.stop(alias_node),
            })
        });
        if let Some(Reference::Column(column)) = column.and_then(|c| self.references.get_mut(c.0)) {
            column.alias = Some(alias);
        }
        Some(())
    }

    /// A predicate that is nothing but a literal.
    fn value(&mut self, ctx: &RuleContext<'_>) -> Option<()> {
        let tree = ctx.tree;
        let bit = only_child(tree, ctx.node, RuleKind::BitExpr)?;
        let simple = only_child(tree, bit, RuleKind::SimpleExprLiteral)?;
        let literal = tree.find_child(simple, RuleKind::Literal)?;
        let kind_node = tree.child(literal, 0)?;
        let (data_type, value) = match tree.rule_kind(kind_node)? {
            RuleKind::TextLiteral => (DataType::String, text_literal_value(tree, kind_node)),
            RuleKind::NumLiteral => (DataType::Number, tree.text(kind_node).to_string()),
            RuleKind::BoolLiteral => (DataType::Boolean, tree.text(kind_node).to_string()),
            RuleKind::NullLiteral => (DataType::Null, tree.text(kind_node).to_string()),
            RuleKind::TemporalLiteral => {
                let string = tree.children(kind_node).last().copied()?;
                (DataType::Date, unquote(tree.text(string)).to_string())
            }
            _ => return None,
        };
        let clause = clause_of(ctx);
        let column = self.compared_column(ctx);
        self.push(|id| {
            Reference::Value(ValueReference {
                id,
                value,
                data_type,
                clause,
                column,
                start: tree.start(literal),
                stop: tree.stop(literal),
            })
        });
        Some(())
    }

    /// The column a value is compared with or assigned to: `col = 'x'` or `SET col = 'x'`.
    fn compared_column(&self, ctx: &RuleContext<'_>) -> Option<ReferenceId> {
        let tree = ctx.tree;
        let mut child = ctx.node;
        for ancestor in ctx.ancestors() {
            match tree.rule_kind(ancestor)? {
                RuleKind::PrimaryExprPredicate | RuleKind::ExprIs => child = ancestor,
                RuleKind::PrimaryExprCompare => {
                    let left = tree.child(ancestor, 0)?;
                    if left == child || !tree.is_rule(left, RuleKind::PrimaryExprPredicate) {
                        return None;
                    }
                    let column = plain_column(tree, tree.child(left, 0)?)?;
                    return self.column_nodes.get(&column).copied();
                }
                RuleKind::UpdateElement => {
                    let column = tree.find_child(ancestor, RuleKind::ColumnRef)?;
                    return self.column_nodes.get(&column).copied();
                }
                _ => return None,
            }
        }
        None
    }

    fn function(&mut self, ctx: &RuleContext<'_>) -> Option<()> {
        let tree = ctx.tree;
        let callee = tree.child(ctx.node, 0)?;
        let open = tree.child(ctx.node, 1)?;
        if !tree.is_rule(callee, RuleKind::Identifier)
            || tree.token(open)?.token_type != TokenType::OpenPar
        {
            return None;
        }
        let token = tree.start_token(callee)?;
        if token.token_type != TokenType::Identifier {
            return None;
        }
        let function = token.text.clone();
        self.push(|id| {
            Reference::Function(FunctionReference {
                id,
                function,
                start: tree.start(callee),
                stop: tree.stop(callee),
            })
        });
        Some(())
    }
}

/// Binds every column to the only table of the statement, and values
/// without a column to the column at the same position.
fn infer_single_table(references: &mut [Reference]) {
    let mut tables = references.iter().filter_map(|reference| match reference {
        Reference::Table(table) if !table.qualifier => Some(table.id),
        _ => None,
    });
    let (Some(table), None) = (tables.next(), tables.next()) else {
        return;
    };

    let mut columns = Vec::new();
    for reference in references.iter_mut() {
        if let Reference::Column(column) = reference {
            column.table = Some(table);
            columns.push(column.id);
        }
    }
    let values = references.iter_mut().filter_map(|reference| match reference {
        Reference::Value(value) => Some(value),
        _ => None,
    });
    for (value, column) in values.zip(columns) {
        if value.column.is_none() {
            value.column = Some(column);
        }
    }
}

/// The matched `identifier` children of a node.
fn identifiers(tree: &ParseTree, node: NodeId) -> Vec<NodeId> {
    tree.children(node)
        .iter()
        .copied()
        .filter(|&child| {
            tree.is_rule(child, RuleKind::Identifier) && tree.stop_token(child).is_some()
        })
        .collect()
}

fn name(tree: &ParseTree, node: NodeId) -> String {
    unquote(tree.text(node)).to_string()
}

fn only_child(tree: &ParseTree, node: NodeId, kind: RuleKind) -> Option<NodeId> {
    match tree.children(node) {
        [child] if tree.is_rule(*child, kind) => Some(*child),
        _ => None,
    }
}

/// The `columnRef` of a predicate that is nothing but a column.
fn plain_column(tree: &ParseTree, predicate: NodeId) -> Option<NodeId> {
    let bit = only_child(tree, predicate, RuleKind::BitExpr)?;
    let simple = only_child(tree, bit, RuleKind::SimpleExprColumnRef)?;
    tree.find_child(simple, RuleKind::ColumnRef)
}

/// The string content of a text literal, adjacent strings concatenated.
fn text_literal_value(tree: &ParseTree, node: NodeId) -> String {
    tree.children(node)
        .iter()
        .filter_map(|&child| tree.token(child))
        .filter_map(|token| match token.token_type {
            TokenType::SingleQuotedText | TokenType::DoubleQuotedText => {
                Some(unquote(&token.text))
            }
            TokenType::NCharText => token.text.get(1..).map(unquote),
            _ => None,
        })
        .collect()
}

fn clause_of(ctx: &RuleContext<'_>) -> Option<Clause> {
    let tree = ctx.tree;
    ctx.ancestors().find_map(|ancestor| match tree.rule_kind(ancestor)? {
        RuleKind::WhereClause => Some(Clause::Where),
        RuleKind::InsertValues => Some(Clause::Values),
        RuleKind::Fields => Some(Clause::Fields),
        _ => None,
    })
}

/// The `tableRef` node of the only table the enclosing query reads from.
fn single_table_in_scope(ctx: &RuleContext<'_>) -> Option<NodeId> {
    let tree = ctx.tree;
    for ancestor in ctx.ancestors() {
        match tree.rule_kind(ancestor) {
            Some(RuleKind::QuerySpecification) => {
                let from = tree.find_child(ancestor, RuleKind::FromClause)?;
                let list = tree.find_child(from, RuleKind::TableReferenceList)?;
                return single_table(tree, list);
            }
            Some(RuleKind::UpdateStatement) => {
                let list = tree.find_child(ancestor, RuleKind::TableReferenceList)?;
                return single_table(tree, list);
            }
            Some(
                RuleKind::DeleteStatement | RuleKind::InsertStatement | RuleKind::ReplaceStatement,
            ) => return tree.find_child(ancestor, RuleKind::TableRef),
            _ => {}
        }
    }
    None
}

fn single_table(tree: &ParseTree, list: NodeId) -> Option<NodeId> {
    let mut references = tree
        .children(list)
        .iter()
        .copied()
        .filter(|&child| tree.is_rule(child, RuleKind::TableReference));
    let (Some(reference), None) = (references.next(), references.next()) else {
        return None;
    };
    let factor = only_child(tree, reference, RuleKind::TableFactor)?;
    let single = only_child(tree, factor, RuleKind::SingleTable)?;
    tree.find_child(single, RuleKind::TableRef)
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxide_mysql_grammar::lexer::{Lexer, LexerOptions};
    use oxide_mysql_grammar::parser::{Parser, ParserOptions, StartRule};
    use oxide_mysql_grammar::tree::ParseTreeWalker;

    fn resolve(sql: &str) -> Vec<Reference> {
        let options = LexerOptions::default();
        let tokens = Lexer::new(sql, &options).tokenize(&mut ());
        let mut errors = None::<()>;
        let mut parser = Parser::new(&tokens, ParserOptions::default(), &mut errors);
        parser.parse(StartRule::Query).unwrap();
        let nodes = parser.into_nodes();
        let tree = ParseTree::new(sql, tokens, nodes);
        let mut resolver = ReferenceResolver::new();
        ParseTreeWalker::walk(&mut resolver, &tree);
        resolver.finish()
    }

    fn tables(references: &[Reference]) -> Vec<&TableReference> {
        references
            .iter()
            .filter_map(|r| match r {
                Reference::Table(t) => Some(t),
                _ => None,
            })
            .collect()
    }

    fn columns(references: &[Reference]) -> Vec<&ColumnReference> {
        references
            .iter()
            .filter_map(|r| match r {
                Reference::Column(c) => Some(c),
                _ => None,
            })
            .collect()
    }

    fn values(references: &[Reference]) -> Vec<&ValueReference> {
        references
            .iter()
            .filter_map(|r| match r {
                Reference::Value(v) => Some(v),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_single_table_select() {
        let refs = resolve("SELECT id FROM users");
        let tables = tables(&refs);
        let columns = columns(&refs);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].table, "users");
        assert_eq!((tables[0].start, tables[0].stop), (15, 19));
        assert_eq!(columns[0].column, "id");
        assert_eq!(columns[0].table, Some(tables[0].id));
        assert_eq!(columns[0].clause, None);
    }

    #[test]
    fn test_schema_qualified_table() {
        let refs = resolve("SELECT * FROM `shop`.`orders`");
        let Reference::Schema(schema) = &refs[0] else {
            panic!("expected schema first, got {refs:?}");
        };
        assert_eq!(schema.schema, "shop");
        let table = tables(&refs)[0];
        assert_eq!(table.table, "orders");
        assert_eq!(table.schema, Some(schema.id));
        assert_eq!(table.start, 21);
    }

    #[test]
    fn test_table_alias() {
        let refs = resolve("SELECT u.name FROM users AS u WHERE u.id = 1");
        let users = tables(&refs).into_iter().find(|t| !t.qualifier).unwrap();
        let alias = refs
            .iter()
            .find_map(|r| match r {
                Reference::Alias(a) => Some(a),
                _ => None,
            })
            .unwrap();
        assert_eq!(alias.alias, "u");
        assert_eq!(alias.target, AliasTarget::Table(users.id));
        assert_eq!(users.alias, Some(alias.id));
    }

    #[test]
    fn test_qualified_columns_build_inline_tables() {
        let refs = resolve("SELECT a.x, b.y FROM a JOIN b ON a.id = b.id");
        let columns = columns(&refs);
        assert_eq!(columns.len(), 4);
        for column in &columns {
            let Some(Reference::Table(table)) = column.table.map(|id| &refs[id.0]) else {
                panic!("column without table: {column:?}");
            };
            assert!(table.qualifier);
        }
        assert_eq!(tables(&refs).iter().filter(|t| !t.qualifier).count(), 2);
    }

    #[test]
    fn test_join_leaves_unqualified_columns_unbound() {
        let refs = resolve("SELECT x FROM a JOIN b ON a.id = b.id");
        assert_eq!(columns(&refs)[0].table, None);
    }

    #[test]
    fn test_where_clause_values() {
        let refs = resolve("SELECT * FROM users WHERE name = 'bob' AND age > 30 AND vip IS TRUE");
        let columns = columns(&refs);
        let values = values(&refs);
        assert_eq!(values.len(), 2);
        assert_eq!(values[0].value, "bob");
        assert_eq!(values[0].data_type, DataType::String);
        assert_eq!(values[0].clause, Some(Clause::Where));
        assert_eq!(values[0].column, Some(columns[0].id));
        assert_eq!(values[1].value, "30");
        assert_eq!(values[1].data_type, DataType::Number);
        assert_eq!(values[1].column, Some(columns[1].id));
        assert!(columns.iter().all(|c| c.clause == Some(Clause::Where)));
    }

    #[test]
    fn test_insert_fields_and_values() {
        let refs = resolve("INSERT INTO users (id, name, born) VALUES (1, \"ann\", DATE '1990-01-02')");
        let table = tables(&refs)[0];
        let columns = columns(&refs);
        let values = values(&refs);
        assert_eq!(columns.len(), 3);
        assert!(columns.iter().all(|c| c.clause == Some(Clause::Fields)));
        assert!(columns.iter().all(|c| c.table == Some(table.id)));
        assert_eq!(values.len(), 3);
        assert!(values.iter().all(|v| v.clause == Some(Clause::Values)));
        assert_eq!(values[1].value, "ann");
        assert_eq!(values[2].data_type, DataType::Date);
        assert_eq!(values[2].value, "1990-01-02");
        for (value, column) in values.iter().zip(&columns) {
            assert_eq!(value.column, Some(column.id));
        }
    }

    #[test]
    fn test_update_assignments() {
        let refs = resolve("UPDATE users SET active = FALSE, note = NULL WHERE id = 7");
        let columns = columns(&refs);
        let values = values(&refs);
        assert_eq!(values.len(), 3);
        assert_eq!(values[0].data_type, DataType::Boolean);
        assert_eq!(values[0].column, Some(columns[0].id));
        assert_eq!(values[1].data_type, DataType::Null);
        assert_eq!(values[1].clause, None);
        assert_eq!(values[2].clause, Some(Clause::Where));
        assert_eq!(values[2].column, Some(columns[2].id));
    }

    #[test]
    fn test_select_alias_binds_plain_columns_only() {
        let refs = resolve("SELECT name AS n, COUNT(*) total FROM users");
        let aliases: Vec<&AliasReference> = refs
            .iter()
            .filter_map(|r| match r {
                Reference::Alias(a) => Some(a),
                _ => None,
            })
            .collect();
        let name = columns(&refs)[0];
        assert_eq!(aliases[0].alias, "n");
        assert_eq!(aliases[0].target, AliasTarget::Column(Some(name.id)));
        assert_eq!(name.alias, Some(aliases[0].id));
        assert_eq!(aliases[1].alias, "total");
        assert_eq!(aliases[1].target, AliasTarget::Column(None));
    }

    #[test]
    fn test_function_calls() {
        let refs = resolve("SELECT concat(a, 'x'), `quoted`(1), db.fn(2) FROM t");
        let functions: Vec<&str> = refs
            .iter()
            .filter_map(|r| match r {
                Reference::Function(f) => Some(f.function.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(functions, vec!["concat"]);
    }

    #[test]
    fn test_use_and_create_database_schemas() {
        let refs = resolve("USE shop; CREATE DATABASE archive");
        let schemas: Vec<&str> = refs.iter().map(Reference::text).collect();
        assert_eq!(schemas, vec!["shop", "archive"]);
    }

    #[test]
    fn test_multiple_tables_skip_inference() {
        let refs = resolve("SELECT 1 FROM a; SELECT x FROM b WHERE x = 2");
        let columns = columns(&refs);
        let b = tables(&refs)[1];
        // Still bound through the FROM clause of their own query.
        assert!(columns.iter().all(|c| c.table == Some(b.id)));
        assert_eq!(values(&refs)[0].column, None);
        assert_eq!(values(&refs)[1].column, Some(columns[1].id));
    }
}
