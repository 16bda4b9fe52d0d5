//! CREATE, DROP, ALTER TABLE, TRUNCATE and RENAME.

use crate::lexer::{Keyword, TokenType};
use crate::tree::RuleKind;
use crate::version::ServerVersion;

use super::parser::{PResult, Parser};

const CREATE_OBJECTS: &[TokenType] = &[
    TokenType::Keyword(Keyword::Table),
    TokenType::Keyword(Keyword::Database),
    TokenType::Keyword(Keyword::Index),
    TokenType::Keyword(Keyword::View),
    TokenType::Keyword(Keyword::Procedure),
    TokenType::Keyword(Keyword::Function),
    TokenType::Keyword(Keyword::Trigger),
    TokenType::Keyword(Keyword::User),
];

/// Objects whose definitions are accepted without further structure.
const OTHER_OBJECTS: &[Keyword] = &[
    Keyword::Aggregate,
    Keyword::Event,
    Keyword::Function,
    Keyword::Logfile,
    Keyword::Procedure,
    Keyword::Server,
    Keyword::Tablespace,
    Keyword::Trigger,
    Keyword::Undo,
    Keyword::User,
];

const DATA_TYPES: &[Keyword] = &[
    Keyword::Int,
    Keyword::Integer,
    Keyword::Tinyint,
    Keyword::Smallint,
    Keyword::Mediumint,
    Keyword::Middleint,
    Keyword::Bigint,
    Keyword::Int1,
    Keyword::Int2,
    Keyword::Int3,
    Keyword::Int4,
    Keyword::Int8,
    Keyword::Decimal,
    Keyword::Dec,
    Keyword::Numeric,
    Keyword::Fixed,
    Keyword::Float,
    Keyword::Float4,
    Keyword::Float8,
    Keyword::Double,
    Keyword::Real,
    Keyword::Bit,
    Keyword::Bool,
    Keyword::Boolean,
    Keyword::Serial,
    Keyword::Char,
    Keyword::Character,
    Keyword::Nchar,
    Keyword::National,
    Keyword::Varchar,
    Keyword::Varcharacter,
    Keyword::Nvarchar,
    Keyword::Binary,
    Keyword::Varbinary,
    Keyword::Tinytext,
    Keyword::Text,
    Keyword::Mediumtext,
    Keyword::Longtext,
    Keyword::Long,
    Keyword::Tinyblob,
    Keyword::Blob,
    Keyword::Mediumblob,
    Keyword::Longblob,
    Keyword::Date,
    Keyword::Time,
    Keyword::Timestamp,
    Keyword::Datetime,
    Keyword::Year,
    Keyword::Enum,
    Keyword::Set,
    Keyword::Json,
];

const TABLE_OPTIONS: &[Keyword] = &[
    Keyword::AutoIncrement,
    Keyword::AvgRowLength,
    Keyword::Checksum,
    Keyword::Comment,
    Keyword::Connection,
    Keyword::Engine,
    Keyword::KeyBlockSize,
    Keyword::MaxRows,
    Keyword::MinRows,
    Keyword::PackKeys,
    Keyword::Password,
    Keyword::RowFormat,
    Keyword::Tablespace,
];

const CONSTRAINT_STARTS: &[Keyword] = &[
    Keyword::Constraint,
    Keyword::Primary,
    Keyword::Unique,
    Keyword::Index,
    Keyword::Key,
    Keyword::Fulltext,
    Keyword::Spatial,
    Keyword::Foreign,
    Keyword::Check,
];

impl Parser<'_, '_> {
    pub(super) fn create_statement(&mut self) -> PResult {
        self.rule(RuleKind::CreateStatement, |p| {
            p.expect_kw(Keyword::Create)?;
            let TokenType::Keyword(object) = p.la(1) else {
                return Err(p.no_viable(CREATE_OBJECTS));
            };
            match object {
                Keyword::Table | Keyword::Temporary => p.create_table(),
                Keyword::Database | Keyword::Schema => p.create_database(),
                Keyword::Index
                | Keyword::Unique
                | Keyword::Fulltext
                | Keyword::Spatial
                | Keyword::Online
                | Keyword::Offline => p.create_index(),
                Keyword::View => p.create_view(),
                Keyword::Or | Keyword::Algorithm | Keyword::Definer | Keyword::Sql => {
                    if p.statement_contains(Keyword::View) {
                        p.create_view()
                    } else {
                        p.other_statement()
                    }
                }
                Keyword::Role => p.create_role(),
                _ if OTHER_OBJECTS.contains(&object) => p.other_statement(),
                _ => Err(p.no_viable(CREATE_OBJECTS)),
            }
        })
    }

    /// Returns true if `keyword` occurs before the end of the current statement.
    fn statement_contains(&self, keyword: Keyword) -> bool {
        let mut k = 1;
        loop {
            match self.la(k) {
                TokenType::Semicolon | TokenType::Eof => return false,
                TokenType::Keyword(found) if found == keyword => return true,
                _ => k += 1,
            }
        }
    }

    fn if_not_exists(&mut self) -> PResult {
        if !self.at_kw(Keyword::If) {
            return Ok(());
        }
        self.rule(RuleKind::IfNotExists, |p| {
            p.consume();
            p.expect_kw(Keyword::Not)?;
            p.expect_kw(Keyword::Exists)
        })
    }

    fn if_exists(&mut self) -> PResult {
        if !self.at_kw(Keyword::If) {
            return Ok(());
        }
        self.rule(RuleKind::IfExists, |p| {
            p.consume();
            p.expect_kw(Keyword::Exists)
        })
    }

    fn create_table(&mut self) -> PResult {
        self.rule(RuleKind::CreateTable, |p| {
            p.accept_kw(Keyword::Temporary);
            p.expect_kw(Keyword::Table)?;
            p.if_not_exists()?;
            p.table_name()?;

            if p.accept_kw(Keyword::Like) {
                return p.table_ref();
            }
            if p.la(1) == TokenType::OpenPar && p.la_is_kw(2, Keyword::Like) {
                p.consume();
                p.consume();
                p.table_ref()?;
                return p.expect(TokenType::ClosePar);
            }
            let element_list = p.la(1) == TokenType::OpenPar
                && !matches!(
                    p.la(2),
                    TokenType::Keyword(Keyword::Select | Keyword::With) | TokenType::OpenPar
                );
            if element_list {
                p.consume();
                p.table_element_list()?;
                p.expect(TokenType::ClosePar)?;
            }
            p.table_options()?;
            p.accept_any_kw(&[Keyword::Ignore, Keyword::Replace]);
            let as_query = p.accept_kw(Keyword::As);
            if as_query
                || p.at_any_kw(&[Keyword::Select, Keyword::With])
                || p.at(TokenType::OpenPar)
            {
                p.query_expression()?;
            }
            Ok(())
        })
    }

    fn table_options(&mut self) -> PResult {
        loop {
            let charset = self.la_is_kw(1, Keyword::Default)
                && matches!(
                    self.la(2),
                    TokenType::Keyword(
                        Keyword::Charset | Keyword::Character | Keyword::Char | Keyword::Collate
                    )
                );
            if charset || self.at_charset_clause() {
                self.accept_kw(Keyword::Default);
                if self.accept_kw(Keyword::Collate) {
                    self.accept(TokenType::Equal);
                    self.charset_name()?;
                } else {
                    self.charset_clause()?;
                }
            } else if self.accept_kw(Keyword::Collate) {
                self.accept(TokenType::Equal);
                self.charset_name()?;
            } else if self.accept_any_kw(TABLE_OPTIONS) {
                self.accept(TokenType::Equal);
                self.table_option_value()?;
            } else {
                return Ok(());
            }
            self.accept(TokenType::Comma);
        }
    }

    /// A single token option value such as `InnoDB`, `DYNAMIC`, `'text'` or `10`.
    fn table_option_value(&mut self) -> PResult {
        match self.la(1) {
            TokenType::Eof | TokenType::Semicolon | TokenType::Comma | TokenType::ClosePar => {
                Err(self.mismatch())
            }
            _ => {
                self.consume();
                Ok(())
            }
        }
    }

    fn table_element_list(&mut self) -> PResult {
        self.rule(RuleKind::TableElementList, |p| {
            loop {
                if p.at_any_kw(CONSTRAINT_STARTS) {
                    p.table_constraint_def()?;
                } else {
                    p.column_definition()?;
                }
                if !p.accept(TokenType::Comma) {
                    return Ok(());
                }
            }
        })
    }

    fn column_definition(&mut self) -> PResult {
        self.rule(RuleKind::ColumnDefinition, |p| {
            p.rule(RuleKind::ColumnName, Self::identifier)?;
            p.data_type()?;
            while p.column_attribute()? {}
            Ok(())
        })
    }

    pub(super) fn data_type(&mut self) -> PResult {
        self.rule(RuleKind::DataType, |p| {
            let national = p.accept_kw(Keyword::National);
            if p.accept_kw(Keyword::Long) {
                p.accept_any_kw(&[Keyword::Varchar, Keyword::Varbinary]);
            } else if p.la_is_kw(1, Keyword::Enum) || p.la_is_kw(1, Keyword::Set) {
                p.consume();
                p.expect(TokenType::OpenPar)?;
                p.text_literal()?;
                while p.accept(TokenType::Comma) {
                    p.text_literal()?;
                }
                return p.expect(TokenType::ClosePar);
            } else if national {
                p.expect_any_kw(&[
                    Keyword::Char,
                    Keyword::Character,
                    Keyword::Varchar,
                    Keyword::Varcharacter,
                ])?;
            } else {
                p.expect_any_kw(DATA_TYPES)?;
            }
            p.accept_any_kw(&[Keyword::Varying, Keyword::Precision]);
            if p.at(TokenType::OpenPar) {
                p.field_length()?;
            }
            loop {
                if p.accept_any_kw(&[Keyword::Unsigned, Keyword::Signed, Keyword::Zerofill]) {
                    continue;
                }
                if p.at_charset_clause() {
                    p.charset_clause()?;
                    continue;
                }
                if !p.accept_any_kw(&[Keyword::Binary, Keyword::Ascii]) {
                    return Ok(());
                }
            }
        })
    }

    /// Parses one column attribute. Returns false if none follows.
    fn column_attribute(&mut self) -> PResult<bool> {
        let starts = self.la_is_kw(1, Keyword::Not)
            || self.at_any_kw(&[
                Keyword::Null,
                Keyword::Default,
                Keyword::On,
                Keyword::AutoIncrement,
                Keyword::Primary,
                Keyword::Key,
                Keyword::Unique,
                Keyword::Comment,
                Keyword::Collate,
                Keyword::Generated,
                Keyword::As,
                Keyword::Virtual,
                Keyword::Stored,
                Keyword::Visible,
                Keyword::Invisible,
                Keyword::Check,
                Keyword::References,
                Keyword::Serial,
            ]);
        if !starts {
            return Ok(false);
        }
        self.rule(RuleKind::ColumnAttribute, |p| {
            let TokenType::Keyword(keyword) = p.la(1) else {
                return Err(p.mismatch());
            };
            match keyword {
                Keyword::Not => {
                    p.consume();
                    p.expect_kw(Keyword::Null)
                }
                Keyword::Default => {
                    p.consume();
                    if p.accept(TokenType::OpenPar) {
                        p.expr()?;
                        return p.expect(TokenType::ClosePar);
                    }
                    p.simple_expr()
                }
                Keyword::On => {
                    p.consume();
                    p.expect_kw(Keyword::Update)?;
                    p.simple_expr()
                }
                Keyword::Primary => {
                    p.consume();
                    p.expect_kw(Keyword::Key)
                }
                Keyword::Unique => {
                    p.consume();
                    p.accept_kw(Keyword::Key);
                    Ok(())
                }
                Keyword::Comment => {
                    p.consume();
                    p.text_literal()
                }
                Keyword::Collate => {
                    p.consume();
                    p.charset_name()
                }
                Keyword::Generated | Keyword::As => {
                    if p.accept_kw(Keyword::Generated) {
                        p.expect_kw(Keyword::Always)?;
                    }
                    p.expect_kw(Keyword::As)?;
                    p.expect(TokenType::OpenPar)?;
                    p.expr()?;
                    p.expect(TokenType::ClosePar)?;
                    p.accept_any_kw(&[Keyword::Virtual, Keyword::Stored]);
                    Ok(())
                }
                Keyword::Check => {
                    p.consume();
                    p.expect(TokenType::OpenPar)?;
                    p.expr()?;
                    p.expect(TokenType::ClosePar)
                }
                Keyword::References => p.references(),
                Keyword::Serial => {
                    p.consume();
                    p.expect_kw(Keyword::Default)?;
                    p.expect_kw(Keyword::Value)
                }
                _ => {
                    p.consume();
                    Ok(())
                }
            }
        })?;
        Ok(true)
    }

    fn references(&mut self) -> PResult {
        self.expect_kw(Keyword::References)?;
        self.table_ref()?;
        if self.at(TokenType::OpenPar) {
            self.key_list()?;
        }
        while self.la_is_kw(1, Keyword::On)
            && matches!(
                self.la(2),
                TokenType::Keyword(Keyword::Delete | Keyword::Update)
            )
        {
            self.consume();
            self.consume();
            if self.accept_kw(Keyword::Set) {
                self.expect_any_kw(&[Keyword::Null, Keyword::Default])?;
            } else if self.accept_kw(Keyword::No) {
                self.expect_kw(Keyword::Action)?;
            } else {
                self.expect_any_kw(&[Keyword::Restrict, Keyword::Cascade])?;
            }
        }
        Ok(())
    }

    fn table_constraint_def(&mut self) -> PResult {
        self.rule(RuleKind::TableConstraintDef, |p| {
            if p.accept_kw(Keyword::Constraint) && p.at_identifier() {
                p.identifier()?;
            }
            if p.accept_kw(Keyword::Check) {
                p.expect(TokenType::OpenPar)?;
                p.expr()?;
                p.expect(TokenType::ClosePar)?;
                if p.la_is_kw(1, Keyword::Not) {
                    p.consume();
                }
                if p.at_identifier() && p.lt(1).text.eq_ignore_ascii_case("ENFORCED") {
                    p.consume();
                }
                return Ok(());
            }
            if p.accept_kw(Keyword::Foreign) {
                p.expect_kw(Keyword::Key)?;
                if p.at_identifier() {
                    p.identifier()?;
                }
                p.key_list()?;
                return p.references();
            }
            if p.accept_kw(Keyword::Primary) {
                p.expect_kw(Keyword::Key)?;
            } else if p.accept_any_kw(&[Keyword::Unique, Keyword::Fulltext, Keyword::Spatial]) {
                p.accept_any_kw(&[Keyword::Index, Keyword::Key]);
            } else {
                p.expect_any_kw(&[Keyword::Index, Keyword::Key])?;
            }
            if p.at_identifier() {
                p.identifier()?;
            }
            p.index_type()?;
            p.key_list()?;
            p.index_options()
        })
    }

    fn index_type(&mut self) -> PResult {
        if self.accept_kw(Keyword::Using) {
            self.expect_any_kw(&[Keyword::Btree, Keyword::Hash])?;
        }
        Ok(())
    }

    fn index_options(&mut self) -> PResult {
        loop {
            if self.at_kw(Keyword::Using) {
                self.index_type()?;
            } else if self.accept_kw(Keyword::Comment) {
                self.text_literal()?;
            } else if self.accept_kw(Keyword::KeyBlockSize) {
                self.accept(TokenType::Equal);
                self.expect(TokenType::Int)?;
            } else if !self.accept_any_kw(&[Keyword::Visible, Keyword::Invisible]) {
                return Ok(());
            }
        }
    }

    fn key_list(&mut self) -> PResult {
        self.rule(RuleKind::KeyList, |p| {
            p.expect(TokenType::OpenPar)?;
            loop {
                if p.accept(TokenType::OpenPar) {
                    p.expr()?;
                    p.expect(TokenType::ClosePar)?;
                } else {
                    p.identifier()?;
                    if p.at(TokenType::OpenPar) {
                        p.field_length()?;
                    }
                }
                p.accept_any_kw(&[Keyword::Asc, Keyword::Desc]);
                if !p.accept(TokenType::Comma) {
                    break;
                }
            }
            p.expect(TokenType::ClosePar)
        })
    }

    fn create_index(&mut self) -> PResult {
        self.rule(RuleKind::CreateIndex, |p| {
            p.accept_any_kw(&[Keyword::Online, Keyword::Offline]);
            p.accept_any_kw(&[Keyword::Unique, Keyword::Fulltext, Keyword::Spatial]);
            p.expect_kw(Keyword::Index)?;
            p.identifier()?;
            p.index_type()?;
            p.expect_kw(Keyword::On)?;
            p.table_ref()?;
            p.key_list()?;
            p.index_options()?;
            p.algorithm_and_lock()
        })
    }

    /// `ALGORITHM [=] name` and `LOCK [=] name` in any order.
    fn algorithm_and_lock(&mut self) -> PResult {
        while self.accept_any_kw(&[Keyword::Algorithm, Keyword::Lock]) {
            self.accept(TokenType::Equal);
            if !self.accept_kw(Keyword::Default) {
                self.identifier()?;
            }
        }
        Ok(())
    }

    fn create_database(&mut self) -> PResult {
        self.rule(RuleKind::CreateDatabase, |p| {
            p.consume();
            p.if_not_exists()?;
            p.rule(RuleKind::SchemaName, Self::identifier)?;
            loop {
                p.accept_kw(Keyword::Default);
                if p.at_charset_clause() {
                    p.charset_clause()?;
                } else if p.accept_kw(Keyword::Collate) {
                    p.accept(TokenType::Equal);
                    p.charset_name()?;
                } else {
                    return Ok(());
                }
            }
        })
    }

    fn create_view(&mut self) -> PResult {
        self.rule(RuleKind::CreateView, |p| {
            if p.accept_kw(Keyword::Or) {
                p.expect_kw(Keyword::Replace)?;
            }
            if p.accept_kw(Keyword::Algorithm) {
                p.expect(TokenType::Equal)?;
                p.identifier()?;
            }
            if p.accept_kw(Keyword::Definer) {
                p.expect(TokenType::Equal)?;
                p.user()?;
            }
            if p.accept_kw(Keyword::Sql) {
                p.expect_kw(Keyword::Security)?;
                p.expect_any_kw(&[Keyword::Definer, Keyword::Invoker])?;
            }
            p.expect_kw(Keyword::View)?;
            p.table_name()?;
            if p.at(TokenType::OpenPar) {
                p.identifier_list_in_parens()?;
            }
            p.expect_kw(Keyword::As)?;
            p.query_expression()?;
            if p.la_is_kw(1, Keyword::With) {
                p.consume();
                p.accept_any_kw(&[Keyword::Cascaded, Keyword::Local]);
                p.expect_kw(Keyword::Check)?;
                p.expect_kw(Keyword::Option)?;
            }
            Ok(())
        })
    }

    /// `name`, `'name'@'host'` or `CURRENT_USER[()]`.
    fn user(&mut self) -> PResult {
        if self.accept_kw(Keyword::CurrentUser) {
            if self.accept(TokenType::OpenPar) {
                self.expect(TokenType::ClosePar)?;
            }
            return Ok(());
        }
        self.text_or_identifier()?;
        self.accept(TokenType::UserVariable);
        Ok(())
    }

    fn role_list(&mut self) -> PResult {
        self.rule(RuleKind::RoleList, |p| {
            p.user()?;
            while p.accept(TokenType::Comma) {
                p.user()?;
            }
            Ok(())
        })
    }

    fn create_role(&mut self) -> PResult {
        self.rule(RuleKind::CreateRole, |p| {
            p.require_version(RuleKind::CreateRole, ServerVersion::V8_0)?;
            p.expect_kw(Keyword::Role)?;
            p.if_not_exists()?;
            p.role_list()
        })
    }

    pub(super) fn drop_statement(&mut self) -> PResult {
        self.rule(RuleKind::DropStatement, |p| {
            p.expect_kw(Keyword::Drop)?;
            let TokenType::Keyword(object) = p.la(1) else {
                return Err(p.no_viable(CREATE_OBJECTS));
            };
            match object {
                Keyword::Table | Keyword::Tables | Keyword::Temporary => {
                    p.rule(RuleKind::DropTable, |p| {
                        p.accept_kw(Keyword::Temporary);
                        p.expect_any_kw(&[Keyword::Table, Keyword::Tables])?;
                        p.if_exists()?;
                        p.table_ref_list()?;
                        p.accept_any_kw(&[Keyword::Restrict, Keyword::Cascade]);
                        Ok(())
                    })
                }
                Keyword::Database | Keyword::Schema => p.rule(RuleKind::DropDatabase, |p| {
                    p.consume();
                    p.if_exists()?;
                    p.rule(RuleKind::SchemaRef, Self::identifier)
                }),
                Keyword::Index | Keyword::Online | Keyword::Offline => {
                    p.rule(RuleKind::DropIndex, |p| {
                        p.accept_any_kw(&[Keyword::Online, Keyword::Offline]);
                        p.expect_kw(Keyword::Index)?;
                        p.identifier()?;
                        p.expect_kw(Keyword::On)?;
                        p.table_ref()?;
                        p.algorithm_and_lock()
                    })
                }
                Keyword::View => p.rule(RuleKind::DropView, |p| {
                    p.consume();
                    p.if_exists()?;
                    p.table_ref_list()?;
                    p.accept_any_kw(&[Keyword::Restrict, Keyword::Cascade]);
                    Ok(())
                }),
                Keyword::Role => p.rule(RuleKind::DropRole, |p| {
                    p.require_version(RuleKind::DropRole, ServerVersion::V8_0)?;
                    p.consume();
                    p.if_exists()?;
                    p.role_list()
                }),
                _ if OTHER_OBJECTS.contains(&object) => p.other_statement(),
                _ => Err(p.no_viable(CREATE_OBJECTS)),
            }
        })
    }

    fn table_ref_list(&mut self) -> PResult {
        self.rule(RuleKind::TableRefList, |p| {
            p.table_ref()?;
            while p.accept(TokenType::Comma) {
                p.table_ref()?;
            }
            Ok(())
        })
    }

    pub(super) fn alter_statement(&mut self) -> PResult {
        let mut k = 2;
        while matches!(
            self.la(k),
            TokenType::Keyword(Keyword::Online | Keyword::Offline | Keyword::Ignore)
        ) {
            k += 1;
        }
        if !self.la_is_kw(k, Keyword::Table) {
            return self.other_statement();
        }
        self.rule(RuleKind::AlterTable, |p| {
            p.expect_kw(Keyword::Alter)?;
            while p.accept_any_kw(&[Keyword::Online, Keyword::Offline, Keyword::Ignore]) {}
            p.expect_kw(Keyword::Table)?;
            p.table_ref()?;
            if matches!(p.la(1), TokenType::Semicolon | TokenType::Eof) {
                return Ok(());
            }
            loop {
                p.alter_list_item()?;
                if !p.accept(TokenType::Comma) {
                    return Ok(());
                }
            }
        })
    }

    fn alter_list_item(&mut self) -> PResult {
        self.rule(RuleKind::AlterListItem, |p| {
            let TokenType::Keyword(action) = p.la(1) else {
                return p.skip_alter_item();
            };
            match action {
                Keyword::Add => {
                    p.consume();
                    if p.at_any_kw(CONSTRAINT_STARTS) {
                        return p.table_constraint_def();
                    }
                    p.accept_kw(Keyword::Column);
                    if p.accept(TokenType::OpenPar) {
                        p.column_definition()?;
                        while p.accept(TokenType::Comma) {
                            p.column_definition()?;
                        }
                        return p.expect(TokenType::ClosePar);
                    }
                    p.column_definition()?;
                    p.column_position()
                }
                Keyword::Drop => {
                    p.consume();
                    if p.accept_kw(Keyword::Primary) {
                        return p.expect_kw(Keyword::Key);
                    }
                    if p.accept_kw(Keyword::Foreign) {
                        p.expect_kw(Keyword::Key)?;
                        return p.identifier();
                    }
                    if !p.accept_any_kw(&[Keyword::Index, Keyword::Key, Keyword::Check]) {
                        p.accept_kw(Keyword::Column);
                    }
                    p.identifier()?;
                    p.accept_any_kw(&[Keyword::Restrict, Keyword::Cascade]);
                    Ok(())
                }
                Keyword::Modify => {
                    p.consume();
                    p.accept_kw(Keyword::Column);
                    p.column_definition()?;
                    p.column_position()
                }
                Keyword::Change => {
                    p.consume();
                    p.accept_kw(Keyword::Column);
                    p.identifier()?;
                    p.column_definition()?;
                    p.column_position()
                }
                Keyword::Rename => {
                    p.consume();
                    if p.accept_any_kw(&[Keyword::Column, Keyword::Index, Keyword::Key]) {
                        p.identifier()?;
                        p.expect_kw(Keyword::To)?;
                        return p.identifier();
                    }
                    p.accept_any_kw(&[Keyword::To, Keyword::As]);
                    p.table_name()
                }
                Keyword::Alter => {
                    p.consume();
                    p.accept_kw(Keyword::Column);
                    p.identifier()?;
                    if p.accept_kw(Keyword::Set) {
                        if p.accept_kw(Keyword::Default) {
                            if p.accept(TokenType::OpenPar) {
                                p.expr()?;
                                return p.expect(TokenType::ClosePar);
                            }
                            return p.simple_expr();
                        }
                        return p.expect_any_kw(&[Keyword::Visible, Keyword::Invisible]);
                    }
                    p.expect_kw(Keyword::Drop)?;
                    p.expect_kw(Keyword::Default)
                }
                _ => p.skip_alter_item(),
            }
        })
    }

    fn column_position(&mut self) -> PResult {
        if self.accept_kw(Keyword::After) {
            return self.identifier();
        }
        self.accept_kw(Keyword::First);
        Ok(())
    }

    /// Table options and other alter actions, kept as plain tokens.
    fn skip_alter_item(&mut self) -> PResult {
        if matches!(self.la(1), TokenType::Semicolon | TokenType::Eof | TokenType::Comma) {
            return Err(self.mismatch());
        }
        let mut depth = 0usize;
        loop {
            match self.la(1) {
                TokenType::Semicolon | TokenType::Eof => return Ok(()),
                TokenType::Comma if depth == 0 => return Ok(()),
                TokenType::OpenPar => depth += 1,
                TokenType::ClosePar => depth = depth.saturating_sub(1),
                _ => {}
            }
            self.consume();
        }
    }

    pub(super) fn truncate_table(&mut self) -> PResult {
        self.rule(RuleKind::TruncateTable, |p| {
            p.expect_kw(Keyword::Truncate)?;
            p.accept_kw(Keyword::Table);
            p.table_ref()
        })
    }

    pub(super) fn rename_statement(&mut self) -> PResult {
        if !matches!(
            self.la(2),
            TokenType::Keyword(Keyword::Table | Keyword::Tables)
        ) {
            return self.other_statement();
        }
        self.rule(RuleKind::RenameTable, |p| {
            p.consume();
            p.consume();
            loop {
                p.rule(RuleKind::RenamePair, |p| {
                    p.table_ref()?;
                    p.expect_kw(Keyword::To)?;
                    p.table_name()
                })?;
                if !p.accept(TokenType::Comma) {
                    return Ok(());
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::test_support::{parse, render};
    use crate::parser::{ParserOptions, StartRule};
    use crate::version::ServerVersion;

    fn statement(sql: &str) -> String {
        render(sql, StartRule::SimpleStatement)
    }

    #[test]
    fn test_create_table() {
        let rendered = statement(
            "CREATE TABLE IF NOT EXISTS shop.items (\
               id INT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY, \
               name VARCHAR(64) CHARACTER SET utf8mb4 COLLATE utf8mb4_bin DEFAULT '', \
               price DECIMAL(10, 2) DEFAULT 0.00, \
               kind ENUM('a', 'b'), \
               owner_id INT, \
               KEY idx_name (name(10)), \
               CONSTRAINT fk_owner FOREIGN KEY (owner_id) REFERENCES users (id) ON DELETE CASCADE\
             ) ENGINE = InnoDB DEFAULT CHARSET = utf8mb4",
        );
        assert!(rendered.contains("(createTable TABLE (ifNotExists IF NOT EXISTS) (tableName (identifier shop) . (identifier items))"));
        assert!(rendered.contains("(columnDefinition (columnName (identifier id)) (dataType INT UNSIGNED)"));
        assert!(rendered.contains("(columnAttribute NOT NULL)"));
        assert!(rendered.contains("(tableConstraintDef CONSTRAINT (identifier fk_owner) FOREIGN KEY"));
        assert!(rendered.contains("ENGINE = InnoDB DEFAULT CHARSET = (identifier utf8mb4)"));
    }

    #[test]
    fn test_create_table_as_select_and_like() {
        assert!(statement("CREATE TABLE t2 AS SELECT * FROM t1").contains("AS (queryExpression"));
        assert!(statement("CREATE TEMPORARY TABLE t2 LIKE t1").contains("LIKE (tableRef (identifier t1))"));
    }

    #[test]
    fn test_create_index_database_view() {
        assert!(statement("CREATE UNIQUE INDEX idx ON users (email)")
            .contains("(createIndex UNIQUE INDEX (identifier idx) ON (tableRef (identifier users)) (keyList ("));
        assert!(statement("CREATE DATABASE IF NOT EXISTS app DEFAULT CHARACTER SET utf8mb4")
            .contains("(createDatabase DATABASE (ifNotExists IF NOT EXISTS) (schemaName (identifier app))"));
        assert!(statement("CREATE OR REPLACE DEFINER = CURRENT_USER VIEW v (a) AS SELECT 1 WITH CHECK OPTION")
            .contains("(createView OR REPLACE DEFINER = CURRENT_USER VIEW (tableName (identifier v))"));
    }

    #[test]
    fn test_create_role_depends_on_version() {
        assert!(statement("CREATE ROLE app_developer").contains("(createRole ROLE (roleList"));

        let old = ParserOptions {
            server_version: ServerVersion::V5_7,
            ..ParserOptions::default()
        };
        let (_, messages) = parse("CREATE ROLE app_developer", StartRule::Query, old);
        assert_eq!(messages, vec!["no viable alternative at input 'ROLE'".to_string()]);

        let unknown = ParserOptions {
            server_version: ServerVersion::new(5, 5, 0),
            ..ParserOptions::default()
        };
        let (_, messages) = parse("CREATE ROLE app_developer", StartRule::Query, unknown);
        assert_eq!(
            messages,
            vec!["rule createRole failed predicate: {serverVersion >= 80000}?".to_string()]
        );
    }

    #[test]
    fn test_drop_forms() {
        assert!(statement("DROP TABLE IF EXISTS a, b").contains("(dropTable TABLE (ifExists IF EXISTS) (tableRefList"));
        assert!(statement("DROP DATABASE app").contains("(dropDatabase DATABASE (schemaRef (identifier app)))"));
        assert!(statement("DROP INDEX idx ON users").contains("(dropIndex INDEX (identifier idx) ON"));
        assert!(statement("DROP VIEW v").contains("(dropView VIEW"));
        assert!(statement("DROP PROCEDURE p").contains("(otherStatement PROCEDURE p)"));
    }

    #[test]
    fn test_alter_truncate_rename() {
        let rendered = statement(
            "ALTER TABLE users ADD COLUMN age INT AFTER name, DROP COLUMN legacy, \
             MODIFY email VARCHAR(255) NOT NULL, RENAME TO members, ENGINE = InnoDB",
        );
        assert!(rendered.contains("(alterTable ALTER TABLE (tableRef (identifier users)) (alterListItem ADD COLUMN (columnDefinition"));
        assert!(rendered.contains("(alterListItem RENAME TO (tableName (identifier members)))"));
        assert!(rendered.contains("(alterListItem ENGINE = InnoDB)"));
        assert!(statement("TRUNCATE TABLE logs").contains("(truncateTable TRUNCATE TABLE (tableRef (identifier logs)))"));
        assert!(statement("RENAME TABLE a TO b, c TO d").contains("(renamePair (tableRef (identifier a)) TO (tableName (identifier b)))"));
    }
}
