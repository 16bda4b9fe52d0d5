//! SELECT statements, query expressions and table references.

use crate::lexer::{Keyword, TokenType};
use crate::tree::RuleKind;

use super::parser::{PResult, Parser};

const SELECT_OPTIONS: &[Keyword] = &[
    Keyword::All,
    Keyword::Distinct,
    Keyword::Distinctrow,
    Keyword::HighPriority,
    Keyword::StraightJoin,
    Keyword::SqlSmallResult,
    Keyword::SqlBigResult,
    Keyword::SqlBufferResult,
    Keyword::SqlCalcFoundRows,
    Keyword::SqlNoCache,
    Keyword::SqlCache,
];

const JOIN_STARTS: &[Keyword] = &[
    Keyword::Join,
    Keyword::Inner,
    Keyword::Cross,
    Keyword::StraightJoin,
    Keyword::Left,
    Keyword::Right,
    Keyword::Natural,
];

const OUTFILE_OPTIONS: &[Keyword] = &[
    Keyword::Character,
    Keyword::Charset,
    Keyword::Set,
    Keyword::Fields,
    Keyword::Columns,
    Keyword::Lines,
    Keyword::Terminated,
    Keyword::Optionally,
    Keyword::Enclosed,
    Keyword::Escaped,
    Keyword::Starting,
    Keyword::By,
];

impl Parser<'_, '_> {
    pub(super) fn select_statement(&mut self) -> PResult {
        self.rule(RuleKind::SelectStatement, |p| {
            p.query_expression()?;
            while p.at_locking_clause() {
                p.locking_clause()?;
            }
            Ok(())
        })
    }

    pub(super) fn query_expression(&mut self) -> PResult {
        self.rule(RuleKind::QueryExpression, |p| {
            if p.at_kw(Keyword::With) {
                p.with_clause()?;
            }
            p.query_expression_body()?;
            if p.at_kw(Keyword::Order) {
                p.order_clause()?;
            }
            if p.at_kw(Keyword::Limit) {
                p.limit_clause()?;
            }
            Ok(())
        })
    }

    fn with_clause(&mut self) -> PResult {
        self.rule(RuleKind::WithClause, |p| {
            p.consume();
            p.accept_kw(Keyword::Recursive);
            loop {
                p.rule(RuleKind::CommonTableExpression, |p| {
                    p.identifier()?;
                    if p.at(TokenType::OpenPar) {
                        p.identifier_list_in_parens()?;
                    }
                    p.expect_kw(Keyword::As)?;
                    p.subquery()
                })?;
                if !p.accept(TokenType::Comma) {
                    return Ok(());
                }
            }
        })
    }

    fn query_expression_body(&mut self) -> PResult {
        self.rule(RuleKind::QueryExpressionBody, |p| {
            p.query_primary()?;
            while p.accept_kw(Keyword::Union) {
                p.accept_any_kw(&[Keyword::All, Keyword::Distinct]);
                p.query_primary()?;
            }
            Ok(())
        })
    }

    fn query_primary(&mut self) -> PResult {
        if self.la(1) == TokenType::OpenPar {
            self.query_expression_parens()
        } else {
            self.query_specification()
        }
    }

    fn query_expression_parens(&mut self) -> PResult {
        self.rule(RuleKind::QueryExpressionParens, |p| {
            p.expect(TokenType::OpenPar)?;
            p.query_expression()?;
            while p.at_locking_clause() {
                p.locking_clause()?;
            }
            p.expect(TokenType::ClosePar)
        })
    }

    /// A parenthesised query expression used as a value or a table.
    pub(super) fn subquery(&mut self) -> PResult {
        self.rule(RuleKind::Subquery, Self::query_expression_parens)
    }

    fn query_specification(&mut self) -> PResult {
        self.rule(RuleKind::QuerySpecification, |p| {
            p.expect_kw(Keyword::Select)?;
            while p.at_any_kw(SELECT_OPTIONS) {
                p.leaf(RuleKind::SelectOption)?;
            }
            p.select_item_list()?;
            if p.at_kw(Keyword::Into) {
                p.into_clause()?;
            }
            if p.at_kw(Keyword::From) {
                p.from_clause()?;
            }
            if p.at_kw(Keyword::Where) {
                p.where_clause()?;
            }
            if p.at_kw(Keyword::Group) {
                p.group_by_clause()?;
            }
            if p.at_kw(Keyword::Having) {
                p.rule(RuleKind::HavingClause, |p| {
                    p.consume();
                    p.expr()
                })?;
            }
            Ok(())
        })
    }

    fn select_item_list(&mut self) -> PResult {
        self.rule(RuleKind::SelectItemList, |p| {
            if !p.accept(TokenType::Mult) {
                p.select_item()?;
            }
            while p.accept(TokenType::Comma) {
                p.select_item()?;
            }
            Ok(())
        })
    }

    fn at_table_wild(&self) -> bool {
        if !self.is_identifier(self.la(1)) || self.la(2) != TokenType::Dot {
            return false;
        }
        match self.la(3) {
            TokenType::Mult => true,
            next => {
                self.is_identifier(next)
                    && self.la(4) == TokenType::Dot
                    && self.la(5) == TokenType::Mult
            }
        }
    }

    fn select_item(&mut self) -> PResult {
        self.rule(RuleKind::SelectItem, |p| {
            if p.at_table_wild() {
                return p.rule(RuleKind::TableWild, |p| {
                    p.identifier()?;
                    p.expect(TokenType::Dot)?;
                    if p.la(1) != TokenType::Mult {
                        p.identifier()?;
                        p.expect(TokenType::Dot)?;
                    }
                    p.expect(TokenType::Mult)
                });
            }
            p.expr()?;
            let has_alias = p.at_kw(Keyword::As) | p.at_identifier() | p.at_text();
            if has_alias {
                p.rule(RuleKind::SelectAlias, |p| {
                    p.accept_kw(Keyword::As);
                    p.text_or_identifier()
                })?;
            }
            Ok(())
        })
    }

    fn into_clause(&mut self) -> PResult {
        self.rule(RuleKind::IntoClause, |p| {
            p.consume();
            if p.accept_kw(Keyword::Outfile) {
                p.text_literal()?;
                while p.at_any_kw(OUTFILE_OPTIONS) || p.at_text() {
                    p.consume();
                }
                return Ok(());
            }
            if p.accept_kw(Keyword::Dumpfile) {
                return p.text_literal();
            }
            loop {
                if !p.accept(TokenType::UserVariable) {
                    p.text_or_identifier()?;
                }
                if !p.accept(TokenType::Comma) {
                    return Ok(());
                }
            }
        })
    }

    fn from_clause(&mut self) -> PResult {
        self.rule(RuleKind::FromClause, |p| {
            p.consume();
            if p.accept_kw(Keyword::Dual) {
                return Ok(());
            }
            p.table_reference_list()
        })
    }

    pub(super) fn where_clause(&mut self) -> PResult {
        self.rule(RuleKind::WhereClause, |p| {
            p.expect_kw(Keyword::Where)?;
            p.expr()
        })
    }

    fn group_by_clause(&mut self) -> PResult {
        self.rule(RuleKind::GroupByClause, |p| {
            p.consume();
            p.expect_kw(Keyword::By)?;
            p.order_expression()?;
            while p.accept(TokenType::Comma) {
                p.order_expression()?;
            }
            if p.la_is_kw(1, Keyword::With) && p.la_is_kw(2, Keyword::Rollup) {
                p.consume();
                p.consume();
            }
            Ok(())
        })
    }

    pub(super) fn order_clause(&mut self) -> PResult {
        self.rule(RuleKind::OrderClause, |p| {
            p.expect_kw(Keyword::Order)?;
            p.expect_kw(Keyword::By)?;
            p.order_expression()?;
            while p.accept(TokenType::Comma) {
                p.order_expression()?;
            }
            Ok(())
        })
    }

    fn order_expression(&mut self) -> PResult {
        self.rule(RuleKind::OrderExpression, |p| {
            p.expr()?;
            p.accept_any_kw(&[Keyword::Asc, Keyword::Desc]);
            Ok(())
        })
    }

    pub(super) fn limit_clause(&mut self) -> PResult {
        self.rule(RuleKind::LimitClause, |p| {
            p.expect_kw(Keyword::Limit)?;
            p.rule(RuleKind::LimitOptions, |p| {
                p.limit_option()?;
                if p.accept(TokenType::Comma) || p.accept_kw(Keyword::Offset) {
                    p.limit_option()?;
                }
                Ok(())
            })
        })
    }

    fn limit_option(&mut self) -> PResult {
        if self.at_identifier() {
            return self.identifier();
        }
        self.expect_any(&[TokenType::Int, TokenType::ParamMarker])
    }

    pub(super) fn at_locking_clause(&mut self) -> bool {
        (self.at_kw(Keyword::For)
            && matches!(
                self.la(2),
                TokenType::Keyword(Keyword::Update | Keyword::Share)
            ))
            || (self.at_kw(Keyword::Lock) && self.la_is_kw(2, Keyword::In))
    }

    fn locking_clause(&mut self) -> PResult {
        self.rule(RuleKind::LockingClause, |p| {
            if p.accept_kw(Keyword::Lock) {
                p.expect_kw(Keyword::In)?;
                p.expect_kw(Keyword::Share)?;
                return p.expect_kw(Keyword::Mode);
            }
            p.expect_kw(Keyword::For)?;
            p.expect_any_kw(&[Keyword::Update, Keyword::Share])?;
            if p.accept_kw(Keyword::Of) {
                p.table_ref()?;
                while p.accept(TokenType::Comma) {
                    p.table_ref()?;
                }
            }
            if !p.accept_kw(Keyword::Nowait) && p.accept_kw(Keyword::Skip) {
                p.expect_kw(Keyword::Locked)?;
            }
            Ok(())
        })
    }

    pub(super) fn table_reference_list(&mut self) -> PResult {
        self.rule(RuleKind::TableReferenceList, |p| {
            p.table_reference()?;
            while p.accept(TokenType::Comma) {
                p.table_reference()?;
            }
            Ok(())
        })
    }

    fn table_reference(&mut self) -> PResult {
        self.rule(RuleKind::TableReference, |p| {
            p.table_factor()?;
            while p.at_any_kw(JOIN_STARTS) {
                p.joined_table()?;
            }
            Ok(())
        })
    }

    fn joined_table(&mut self) -> PResult {
        self.rule(RuleKind::JoinedTable, |p| {
            let natural = p.accept_kw(Keyword::Natural);
            let outer = p.accept_any_kw(&[Keyword::Left, Keyword::Right]);
            if outer {
                p.accept_kw(Keyword::Outer);
            } else {
                p.accept_any_kw(&[Keyword::Inner, Keyword::Cross]);
            }
            if !p.accept_kw(Keyword::StraightJoin) {
                p.expect_kw(Keyword::Join)?;
            }
            p.table_factor()?;
            if natural {
                return Ok(());
            }
            if p.accept_kw(Keyword::On) {
                p.expr()?;
            } else if p.accept_kw(Keyword::Using) {
                p.identifier_list_in_parens()?;
            }
            Ok(())
        })
    }

    fn table_factor(&mut self) -> PResult {
        self.rule(RuleKind::TableFactor, |p| {
            if p.la(1) != TokenType::OpenPar {
                return p.single_table();
            }
            match p.la(2) {
                TokenType::Keyword(Keyword::Select | Keyword::With) => p.derived_table(),
                // `((` opens either a nested query or a nested table list.
                TokenType::OpenPar if p.is_ll() => {
                    if p.speculate(RuleKind::DerivedTable, Self::derived_table) {
                        Ok(())
                    } else {
                        p.table_reference_list_parens()
                    }
                }
                TokenType::OpenPar => p.derived_table(),
                _ => p.table_reference_list_parens(),
            }
        })
    }

    fn single_table(&mut self) -> PResult {
        self.rule(RuleKind::SingleTable, |p| {
            p.table_ref()?;
            if p.accept_kw(Keyword::Partition) {
                p.identifier_list_in_parens()?;
            }
            if p.at_table_alias() {
                p.table_alias()?;
            }
            while p.at_any_kw(&[Keyword::Use, Keyword::Force, Keyword::Ignore])
                && matches!(
                    p.la(2),
                    TokenType::Keyword(Keyword::Index | Keyword::Key)
                )
            {
                p.index_hint()?;
            }
            Ok(())
        })
    }

    fn index_hint(&mut self) -> PResult {
        self.rule(RuleKind::IndexHint, |p| {
            p.consume();
            p.consume();
            if p.accept_kw(Keyword::For) && !p.accept_kw(Keyword::Join) {
                p.expect_any_kw(&[Keyword::Order, Keyword::Group])?;
                p.expect_kw(Keyword::By)?;
            }
            p.expect(TokenType::OpenPar)?;
            if !p.at(TokenType::ClosePar) {
                p.identifier_or_keyword()?;
                while p.accept(TokenType::Comma) {
                    p.identifier_or_keyword()?;
                }
            }
            p.expect(TokenType::ClosePar)
        })
    }

    fn derived_table(&mut self) -> PResult {
        self.rule(RuleKind::DerivedTable, |p| {
            p.subquery()?;
            if p.at_table_alias() {
                p.table_alias()?;
            }
            if p.at(TokenType::OpenPar) {
                p.identifier_list_in_parens()?;
            }
            Ok(())
        })
    }

    fn table_reference_list_parens(&mut self) -> PResult {
        self.rule(RuleKind::TableReferenceListParens, |p| {
            p.expect(TokenType::OpenPar)?;
            p.table_reference_list()?;
            p.expect(TokenType::ClosePar)
        })
    }

    pub(super) fn at_table_alias(&mut self) -> bool {
        self.at_kw(Keyword::As) | self.at(TokenType::Equal) | self.at_identifier()
    }

    pub(super) fn table_alias(&mut self) -> PResult {
        self.rule(RuleKind::TableAlias, |p| {
            if !p.accept_kw(Keyword::As) {
                p.accept(TokenType::Equal);
            }
            p.identifier()
        })
    }

    /// `name` or `schema.name`.
    pub(super) fn table_ref(&mut self) -> PResult {
        self.rule(RuleKind::TableRef, Self::qualified_identifier)
    }

    /// Like [`Parser::table_ref`], for names that are being defined.
    pub(super) fn table_name(&mut self) -> PResult {
        self.rule(RuleKind::TableName, Self::qualified_identifier)
    }

    fn qualified_identifier(&mut self) -> PResult {
        self.identifier()?;
        if self.la(1) == TokenType::Dot && self.la(2) != TokenType::Mult {
            self.consume();
            self.identifier_or_keyword()?;
        }
        Ok(())
    }

    /// `(a, b, ...)`
    pub(super) fn identifier_list_in_parens(&mut self) -> PResult {
        self.expect(TokenType::OpenPar)?;
        self.identifier()?;
        while self.accept(TokenType::Comma) {
            self.identifier()?;
        }
        self.expect(TokenType::ClosePar)
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::test_support::{parse, render};
    use crate::parser::{ErrorStrategy, ParserOptions, PredictionMode, StartRule};

    #[test]
    fn test_simple_select_shape() {
        let rendered = render("SELECT id FROM users", StartRule::SelectStatement);
        assert!(rendered.starts_with(
            "(selectStatement (queryExpression (queryExpressionBody (querySpecification SELECT"
        ));
        assert!(rendered.contains(
            "(fromClause FROM (tableReferenceList (tableReference (tableFactor (singleTable (tableRef (identifier users)))))))"
        ));
    }

    #[test]
    fn test_select_clauses() {
        let rendered = render(
            "SELECT DISTINCT u.*, count(*) AS n FROM users u LEFT JOIN posts p ON p.user_id = u.id \
             WHERE u.active = 1 GROUP BY u.id WITH ROLLUP HAVING n > 1 ORDER BY n DESC LIMIT 10 OFFSET 5 FOR UPDATE",
            StartRule::SelectStatement,
        );
        for part in [
            "(selectOption DISTINCT)",
            "(tableWild (identifier u) . *)",
            "(selectAlias AS (identifier n))",
            "(tableAlias (identifier u))",
            "(joinedTable LEFT JOIN",
            "(whereClause WHERE",
            "(groupByClause GROUP BY",
            "WITH ROLLUP)",
            "(havingClause HAVING",
            "(orderClause ORDER BY",
            "(limitClause LIMIT (limitOptions 10 OFFSET 5))",
            "(lockingClause FOR UPDATE)",
        ] {
            assert!(rendered.contains(part), "missing {part} in {rendered}");
        }
    }

    #[test]
    fn test_union_and_subquery() {
        let rendered = render(
            "SELECT a FROM t UNION ALL (SELECT b FROM u) ORDER BY 1",
            StartRule::SelectStatement,
        );
        assert!(rendered.contains("UNION ALL (queryExpressionParens ("));
        let rendered = render(
            "SELECT * FROM (SELECT 1 AS x) AS d WHERE x IN (SELECT 1)",
            StartRule::SelectStatement,
        );
        assert!(rendered.contains("(derivedTable (subquery (queryExpressionParens ("));
        assert!(rendered.contains("(predicateExprIn IN (subquery"));
    }

    #[test]
    fn test_with_clause() {
        let rendered = render(
            "WITH RECURSIVE c (n) AS (SELECT 1) SELECT n FROM c",
            StartRule::SelectStatement,
        );
        assert!(rendered.contains("(withClause WITH RECURSIVE (commonTableExpression (identifier c) ( (identifier n) ) AS (subquery"));
    }

    #[test]
    fn test_nested_parens_need_backtracking() {
        let sll = ParserOptions {
            prediction_mode: PredictionMode::Sll,
            error_strategy: ErrorStrategy::Recover,
            ..ParserOptions::default()
        };
        let (_, messages) = parse("SELECT * FROM ((users))", StartRule::SelectStatement, sll);
        assert!(!messages.is_empty());

        let rendered = render("SELECT * FROM ((users))", StartRule::SelectStatement);
        assert!(rendered.contains(
            "(tableReferenceListParens ( (tableReferenceList (tableReference (tableFactor (tableReferenceListParens ("
        ));
    }

    #[test]
    fn test_index_hints_and_locking() {
        let rendered = render(
            "SELECT * FROM t FORCE INDEX (idx_a) LOCK IN SHARE MODE",
            StartRule::SelectStatement,
        );
        assert!(rendered.contains("(indexHint FORCE INDEX ( (identifier idx_a) ))"));
        assert!(rendered.contains("(lockingClause LOCK IN SHARE MODE)"));
    }
}
