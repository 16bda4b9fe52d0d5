//! USE, SET, transactions, SHOW, DESCRIBE and EXPLAIN.

use crate::lexer::{Keyword, TokenType};
use crate::tree::RuleKind;

use super::parser::{PResult, Parser};

const SET_SCOPES: &[Keyword] = &[
    Keyword::Global,
    Keyword::Session,
    Keyword::Local,
    Keyword::Persist,
    Keyword::PersistOnly,
];

/// Statements EXPLAIN can describe.
const EXPLAINABLE: &[Keyword] = &[
    Keyword::Select,
    Keyword::With,
    Keyword::Insert,
    Keyword::Update,
    Keyword::Delete,
    Keyword::Replace,
];

impl Parser<'_, '_> {
    pub(super) fn use_command(&mut self) -> PResult {
        self.rule(RuleKind::UseCommand, |p| {
            p.expect_kw(Keyword::Use)?;
            p.rule(RuleKind::SchemaRef, Self::identifier)
        })
    }

    pub(super) fn set_statement(&mut self) -> PResult {
        self.rule(RuleKind::SetStatement, |p| {
            p.expect_kw(Keyword::Set)?;
            let transaction = p.la_is_kw(1, Keyword::Transaction)
                || (p.at_any_kw(SET_SCOPES) && p.la_is_kw(2, Keyword::Transaction));
            if transaction
                || p.at_any_kw(&[Keyword::Password, Keyword::Role])
                || (p.la_is_kw(1, Keyword::Default) && p.la_is_kw(2, Keyword::Role))
            {
                p.consume_to_statement_end();
                return Ok(());
            }
            loop {
                p.option_value()?;
                if !p.accept(TokenType::Comma) {
                    return Ok(());
                }
            }
        })
    }

    fn option_value(&mut self) -> PResult {
        self.rule(RuleKind::OptionValue, |p| {
            if p.accept_kw(Keyword::Names) {
                p.charset_name()?;
                if p.accept_kw(Keyword::Collate) {
                    p.charset_name()?;
                }
                return Ok(());
            }
            if p.at_charset_clause() {
                return p.charset_clause();
            }
            match p.la(1) {
                TokenType::UserVariable => p.consume(),
                TokenType::AtAt => {
                    p.consume();
                    if p.at_any_kw(SET_SCOPES) && p.la(2) == TokenType::Dot {
                        p.consume();
                        p.consume();
                    }
                    p.system_variable_name()?;
                }
                _ => {
                    let scoped = p.at_any_kw(SET_SCOPES)
                        && !matches!(
                            p.la(2),
                            TokenType::Equal | TokenType::Assign | TokenType::Dot
                        );
                    if scoped {
                        p.consume();
                    }
                    p.system_variable_name()?;
                }
            }
            p.expect_any(&[TokenType::Equal, TokenType::Assign])?;
            if p.at_any_kw(&[Keyword::On, Keyword::All, Keyword::Binary, Keyword::Row])
                || (p.la_is_kw(1, Keyword::Default) && p.la(2) != TokenType::OpenPar)
            {
                p.consume();
                return Ok(());
            }
            p.expr()
        })
    }

    fn system_variable_name(&mut self) -> PResult {
        self.identifier_or_keyword()?;
        if self.accept(TokenType::Dot) {
            self.identifier_or_keyword()?;
        }
        Ok(())
    }

    pub(super) fn transaction_or_savepoint(&mut self) -> PResult {
        let TokenType::Keyword(keyword) = self.la(1) else {
            return Err(self.mismatch());
        };
        match keyword {
            Keyword::Savepoint | Keyword::Release => self.rule(RuleKind::SavepointStatement, |p| {
                if !p.accept_kw(Keyword::Savepoint) {
                    p.expect_kw(Keyword::Release)?;
                    p.expect_kw(Keyword::Savepoint)?;
                }
                p.identifier()
            }),
            Keyword::Rollback => {
                let to = if self.la_is_kw(2, Keyword::Work) {
                    self.la_is_kw(3, Keyword::To)
                } else {
                    self.la_is_kw(2, Keyword::To)
                };
                if to {
                    self.rule(RuleKind::SavepointStatement, |p| {
                        p.consume();
                        p.accept_kw(Keyword::Work);
                        p.expect_kw(Keyword::To)?;
                        p.accept_kw(Keyword::Savepoint);
                        p.identifier()
                    })
                } else {
                    self.rule(RuleKind::TransactionStatement, Self::transaction_end)
                }
            }
            Keyword::Commit => self.rule(RuleKind::TransactionStatement, Self::transaction_end),
            Keyword::Begin => self.rule(RuleKind::TransactionStatement, |p| {
                p.consume();
                p.accept_kw(Keyword::Work);
                Ok(())
            }),
            _ if self.la_is_kw(2, Keyword::Transaction) => {
                self.rule(RuleKind::TransactionStatement, |p| {
                    p.consume();
                    p.consume();
                    loop {
                        if p.accept_kw(Keyword::With) {
                            p.expect_kw(Keyword::Consistent)?;
                            p.expect_kw(Keyword::Snapshot)?;
                        } else if p.accept_kw(Keyword::Read) {
                            p.expect_any_kw(&[Keyword::Only, Keyword::Write])?;
                        } else {
                            return Ok(());
                        }
                        if !p.accept(TokenType::Comma) {
                            return Ok(());
                        }
                    }
                })
            }
            _ => self.other_statement(),
        }
    }

    /// `COMMIT` or `ROLLBACK` with their optional chaining clauses.
    fn transaction_end(&mut self) -> PResult {
        self.consume();
        self.accept_kw(Keyword::Work);
        if self.accept_kw(Keyword::And) {
            self.accept_kw(Keyword::No);
            self.expect_kw(Keyword::Chain)?;
        }
        if self.la_is_kw(1, Keyword::No) && self.la_is_kw(2, Keyword::Release) {
            self.consume();
        }
        self.accept_kw(Keyword::Release);
        Ok(())
    }

    pub(super) fn show_statement(&mut self) -> PResult {
        self.rule(RuleKind::ShowStatement, |p| {
            p.expect_kw(Keyword::Show)?;
            p.accept_any_kw(&[Keyword::Full, Keyword::Extended]);
            if p.la_is_kw(1, Keyword::Create)
                && matches!(p.la(2), TokenType::Keyword(Keyword::Table | Keyword::View))
            {
                p.consume();
                p.consume();
                return p.table_ref();
            }
            if p.accept_any_kw(&[
                Keyword::Columns,
                Keyword::Fields,
                Keyword::Index,
                Keyword::Indexes,
                Keyword::Keys,
            ]) {
                p.expect_any_kw(&[Keyword::From, Keyword::In])?;
                p.table_ref()?;
                if p.accept_any_kw(&[Keyword::From, Keyword::In]) {
                    p.rule(RuleKind::SchemaRef, Self::identifier)?;
                }
            } else if p.accept_kw(Keyword::Tables) {
                if p.accept_any_kw(&[Keyword::From, Keyword::In]) {
                    p.rule(RuleKind::SchemaRef, Self::identifier)?;
                }
            }
            p.consume_to_statement_end();
            Ok(())
        })
    }

    pub(super) fn describe_or_explain(&mut self) -> PResult {
        let explain = match self.la(2) {
            TokenType::OpenPar => true,
            TokenType::Keyword(Keyword::Analyze | Keyword::For) => true,
            TokenType::Keyword(Keyword::Format) => self.la(3) == TokenType::Equal,
            TokenType::Keyword(Keyword::Extended | Keyword::Partitions) => {
                matches!(self.la(3), TokenType::Keyword(k) if EXPLAINABLE.contains(&k))
                    || self.la(3) == TokenType::OpenPar
            }
            TokenType::Keyword(keyword) => EXPLAINABLE.contains(&keyword),
            _ => false,
        };
        if explain {
            self.explain_statement()
        } else {
            self.rule(RuleKind::DescribeStatement, |p| {
                p.consume();
                p.table_ref()?;
                if p.at_text() {
                    p.text_literal()?;
                } else if p.at_identifier() {
                    p.rule(RuleKind::ColumnRef, Self::identifier)?;
                }
                Ok(())
            })
        }
    }

    fn explain_statement(&mut self) -> PResult {
        self.rule(RuleKind::ExplainStatement, |p| {
            p.consume();
            if p.accept_kw(Keyword::Format) {
                p.expect(TokenType::Equal)?;
                p.text_or_identifier()?;
            } else {
                p.accept_any_kw(&[Keyword::Extended, Keyword::Partitions, Keyword::Analyze]);
            }
            if p.accept_kw(Keyword::For) {
                p.expect_kw(Keyword::Connection)?;
                return p.expect(TokenType::Int);
            }
            match p.la(1) {
                TokenType::Keyword(Keyword::Insert) => p.insert_statement(),
                TokenType::Keyword(Keyword::Replace) => p.replace_statement(),
                TokenType::Keyword(Keyword::Update) => p.update_statement(),
                TokenType::Keyword(Keyword::Delete) => p.delete_statement(),
                _ => p.select_statement(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::test_support::render;
    use crate::parser::StartRule;

    fn statement(sql: &str) -> String {
        render(sql, StartRule::SimpleStatement)
    }

    #[test]
    fn test_use() {
        assert_eq!(
            statement("USE shop"),
            "(simpleStatement (useCommand USE (schemaRef (identifier shop))))"
        );
    }

    #[test]
    fn test_set_variants() {
        assert!(statement("SET @a = 1, @@session.sql_mode = 'ANSI'")
            .contains("(optionValue @a = (exprIs"));
        assert!(statement("SET GLOBAL max_connections = 100")
            .contains("(optionValue GLOBAL (identifier max_connections) ="));
        assert!(statement("SET NAMES utf8mb4 COLLATE utf8mb4_bin")
            .contains("(optionValue NAMES (identifier utf8mb4) COLLATE (identifier utf8mb4_bin))"));
        assert!(statement("SET autocommit = ON").ends_with("(optionValue (identifier autocommit) = ON)))"));
        assert_eq!(
            statement("SET TRANSACTION ISOLATION LEVEL READ COMMITTED"),
            "(simpleStatement (setStatement SET TRANSACTION ISOLATION LEVEL READ COMMITTED))"
        );
    }

    #[test]
    fn test_transactions_and_savepoints() {
        assert_eq!(
            statement("START TRANSACTION READ ONLY"),
            "(simpleStatement (transactionStatement START TRANSACTION READ ONLY))"
        );
        assert_eq!(
            statement("COMMIT WORK AND NO CHAIN"),
            "(simpleStatement (transactionStatement COMMIT WORK AND NO CHAIN))"
        );
        assert_eq!(
            statement("ROLLBACK TO SAVEPOINT sp1"),
            "(simpleStatement (savepointStatement ROLLBACK TO SAVEPOINT (identifier sp1)))"
        );
        assert_eq!(
            statement("RELEASE SAVEPOINT sp1"),
            "(simpleStatement (savepointStatement RELEASE SAVEPOINT (identifier sp1)))"
        );
    }

    #[test]
    fn test_show() {
        assert!(statement("SHOW FULL COLUMNS FROM users")
            .contains("(showStatement SHOW FULL COLUMNS FROM (tableRef (identifier users)))"));
        assert!(statement("SHOW CREATE TABLE users").contains("(tableRef (identifier users))"));
        assert_eq!(
            statement("SHOW VARIABLES LIKE 'max%'"),
            "(simpleStatement (showStatement SHOW VARIABLES LIKE 'max%'))"
        );
    }

    #[test]
    fn test_describe_and_explain() {
        assert_eq!(
            statement("DESCRIBE users email"),
            "(simpleStatement (describeStatement DESCRIBE (tableRef (identifier users)) (columnRef (identifier email))))"
        );
        assert!(statement("EXPLAIN SELECT 1").starts_with("(simpleStatement (explainStatement EXPLAIN (selectStatement"));
        assert!(statement("EXPLAIN FORMAT = JSON DELETE FROM t").contains("(deleteStatement DELETE FROM"));
        assert!(statement("EXPLAIN FOR CONNECTION 4").ends_with("FOR CONNECTION 4))"));
    }
}
