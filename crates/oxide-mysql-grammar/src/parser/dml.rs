//! INSERT, REPLACE, UPDATE and DELETE.

use crate::lexer::{Keyword, TokenType};
use crate::tree::RuleKind;

use super::parser::{PResult, Parser};

impl Parser<'_, '_> {
    pub(super) fn insert_statement(&mut self) -> PResult {
        self.rule(RuleKind::InsertStatement, |p| {
            p.expect_kw(Keyword::Insert)?;
            p.accept_any_kw(&[Keyword::LowPriority, Keyword::Delayed, Keyword::HighPriority]);
            p.accept_kw(Keyword::Ignore);
            p.accept_kw(Keyword::Into);
            p.table_ref()?;
            p.insert_source()?;
            if p.at_kw(Keyword::On) {
                p.rule(RuleKind::InsertUpdateList, |p| {
                    p.consume();
                    p.expect_kw(Keyword::Duplicate)?;
                    p.expect_kw(Keyword::Key)?;
                    p.expect_kw(Keyword::Update)?;
                    p.update_list()
                })?;
            }
            Ok(())
        })
    }

    pub(super) fn replace_statement(&mut self) -> PResult {
        self.rule(RuleKind::ReplaceStatement, |p| {
            p.expect_kw(Keyword::Replace)?;
            p.accept_any_kw(&[Keyword::LowPriority, Keyword::Delayed]);
            p.accept_kw(Keyword::Into);
            p.table_ref()?;
            p.insert_source()
        })
    }

    /// Everything between the target table and `ON DUPLICATE KEY UPDATE`.
    fn insert_source(&mut self) -> PResult {
        if self.accept_kw(Keyword::Partition) {
            self.identifier_list_in_parens()?;
        }
        if self.accept_kw(Keyword::Set) {
            return self.update_list();
        }
        let with_fields = self.la(1) == TokenType::OpenPar
            && !matches!(
                self.la(2),
                TokenType::Keyword(Keyword::Select | Keyword::With) | TokenType::OpenPar
            );
        let after_fields = if with_fields {
            self.la_after_parens(1)
        } else {
            self.la(1)
        };
        match after_fields {
            TokenType::Keyword(Keyword::Values | Keyword::Value) => {
                self.rule(RuleKind::InsertFromConstructor, |p| {
                    if with_fields {
                        p.fields_in_parens()?;
                    }
                    p.insert_values()
                })
            }
            TokenType::Keyword(Keyword::Select | Keyword::With) | TokenType::OpenPar => {
                self.rule(RuleKind::InsertQueryExpression, |p| {
                    if with_fields {
                        p.fields_in_parens()?;
                    }
                    p.query_expression()
                })
            }
            _ if with_fields => self.rule(RuleKind::InsertFromConstructor, |p| {
                p.fields_in_parens()?;
                p.insert_values()
            }),
            _ => Err(self.no_viable(&[
                TokenType::Keyword(Keyword::Values),
                TokenType::Keyword(Keyword::Set),
                TokenType::Keyword(Keyword::Select),
                TokenType::OpenPar,
            ])),
        }
    }

    fn fields_in_parens(&mut self) -> PResult {
        self.expect(TokenType::OpenPar)?;
        if !self.at(TokenType::ClosePar) {
            self.rule(RuleKind::Fields, |p| {
                p.column_ref()?;
                while p.accept(TokenType::Comma) {
                    p.column_ref()?;
                }
                Ok(())
            })?;
        }
        self.expect(TokenType::ClosePar)
    }

    fn insert_values(&mut self) -> PResult {
        self.rule(RuleKind::InsertValues, |p| {
            p.expect_any_kw(&[Keyword::Values, Keyword::Value])?;
            p.rule(RuleKind::ValueList, |p| {
                loop {
                    p.expect(TokenType::OpenPar)?;
                    if !p.at(TokenType::ClosePar) {
                        p.values()?;
                    }
                    p.expect(TokenType::ClosePar)?;
                    if !p.accept(TokenType::Comma) {
                        return Ok(());
                    }
                }
            })
        })
    }

    fn values(&mut self) -> PResult {
        self.rule(RuleKind::Values, |p| {
            loop {
                p.expr_or_default()?;
                if !p.accept(TokenType::Comma) {
                    return Ok(());
                }
            }
        })
    }

    fn expr_or_default(&mut self) -> PResult {
        if self.la_is_kw(1, Keyword::Default) && self.la(2) != TokenType::OpenPar {
            self.consume();
            return Ok(());
        }
        self.expr()
    }

    pub(super) fn update_list(&mut self) -> PResult {
        self.rule(RuleKind::UpdateList, |p| {
            loop {
                p.rule(RuleKind::UpdateElement, |p| {
                    p.column_ref()?;
                    p.expect(TokenType::Equal)?;
                    p.expr_or_default()
                })?;
                if !p.accept(TokenType::Comma) {
                    return Ok(());
                }
            }
        })
    }

    pub(super) fn update_statement(&mut self) -> PResult {
        self.rule(RuleKind::UpdateStatement, |p| {
            p.expect_kw(Keyword::Update)?;
            p.accept_kw(Keyword::LowPriority);
            p.accept_kw(Keyword::Ignore);
            p.table_reference_list()?;
            p.expect_kw(Keyword::Set)?;
            p.update_list()?;
            p.where_order_limit()
        })
    }

    fn where_order_limit(&mut self) -> PResult {
        if self.at_kw(Keyword::Where) {
            self.where_clause()?;
        }
        if self.at_kw(Keyword::Order) {
            self.order_clause()?;
        }
        if self.at_kw(Keyword::Limit) {
            self.limit_clause()?;
        }
        Ok(())
    }

    pub(super) fn delete_statement(&mut self) -> PResult {
        self.rule(RuleKind::DeleteStatement, |p| {
            p.expect_kw(Keyword::Delete)?;
            while p.accept_any_kw(&[Keyword::LowPriority, Keyword::Quick, Keyword::Ignore]) {}

            if !p.accept_kw(Keyword::From) {
                // DELETE t1, t2 FROM <table references> [WHERE ...]
                p.delete_target_list()?;
                p.expect_kw(Keyword::From)?;
                p.table_reference_list()?;
                if p.at_kw(Keyword::Where) {
                    p.where_clause()?;
                }
                return Ok(());
            }

            let multi_table = p.la(2) == TokenType::Comma
                || (p.la(2) == TokenType::Dot && p.la(3) == TokenType::Mult)
                || matches!(p.la(2), TokenType::Keyword(Keyword::Using))
                || (p.la(2) == TokenType::Dot && p.la_is_kw(4, Keyword::Using));
            if multi_table {
                // DELETE FROM t1, t2 USING <table references> [WHERE ...]
                p.delete_target_list()?;
                p.expect_kw(Keyword::Using)?;
                p.table_reference_list()?;
                if p.at_kw(Keyword::Where) {
                    p.where_clause()?;
                }
                return Ok(());
            }

            p.table_ref()?;
            if p.at_table_alias() {
                p.table_alias()?;
            }
            if p.accept_kw(Keyword::Partition) {
                p.identifier_list_in_parens()?;
            }
            p.where_order_limit()
        })
    }

    /// Tables named before `FROM` or `USING` in a multi-table delete, each
    /// optionally followed by `.*`.
    fn delete_target_list(&mut self) -> PResult {
        self.rule(RuleKind::TableRefList, |p| {
            loop {
                p.table_ref()?;
                if p.la(1) == TokenType::Dot && p.la(2) == TokenType::Mult {
                    p.consume();
                    p.consume();
                }
                if !p.accept(TokenType::Comma) {
                    return Ok(());
                }
            }
        })
    }
}
