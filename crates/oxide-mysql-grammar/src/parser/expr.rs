//! Expressions.
//!
//! The boolean ladder (`OR`, `XOR`, `AND`, `NOT`) and the bit expression
//! operators are parsed by precedence climbing. Comparisons, predicates and
//! simple expressions follow the MySQL grammar rule by rule.

use crate::lexer::{Keyword, TokenType};
use crate::sql_mode::SqlMode;
use crate::tree::RuleKind;

use super::parser::{PResult, Parser};
use super::pratt::{
    allows_interval, infix_binding_power, logical_binding_power, LogicalOp, NOT_BINDING_POWER,
};

/// Keywords that are built-in functions when followed by `(`.
const RUNTIME_FUNCTIONS: &[Keyword] = &[
    Keyword::Char,
    Keyword::Charset,
    Keyword::Collation,
    Keyword::CurrentUser,
    Keyword::Database,
    Keyword::Date,
    Keyword::Day,
    Keyword::Format,
    Keyword::Hour,
    Keyword::If,
    Keyword::Insert,
    Keyword::Left,
    Keyword::Microsecond,
    Keyword::Minute,
    Keyword::Mod,
    Keyword::Month,
    Keyword::Password,
    Keyword::Quarter,
    Keyword::Repeat,
    Keyword::Replace,
    Keyword::Reverse,
    Keyword::Right,
    Keyword::Schema,
    Keyword::Second,
    Keyword::Time,
    Keyword::Timestamp,
    Keyword::Truncate,
    Keyword::User,
    Keyword::Values,
    Keyword::Week,
    Keyword::Year,
];

/// Built-in functions that may be called without parentheses.
const NO_PAREN_FUNCTIONS: &[Keyword] = &[
    Keyword::CurrentDate,
    Keyword::CurrentTime,
    Keyword::CurrentTimestamp,
    Keyword::CurrentUser,
    Keyword::Localtime,
    Keyword::Localtimestamp,
    Keyword::UtcDate,
    Keyword::UtcTime,
    Keyword::UtcTimestamp,
];

const WINDOW_FUNCTIONS: &[Keyword] = &[
    Keyword::CumeDist,
    Keyword::DenseRank,
    Keyword::FirstValue,
    Keyword::Lag,
    Keyword::LastValue,
    Keyword::Lead,
    Keyword::NthValue,
    Keyword::Ntile,
    Keyword::PercentRank,
    Keyword::Rank,
    Keyword::RowNumber,
];

const SUM_FUNCTIONS: &[&str] = &[
    "AVG",
    "BIT_AND",
    "BIT_OR",
    "BIT_XOR",
    "COUNT",
    "GROUP_CONCAT",
    "JSON_ARRAYAGG",
    "JSON_OBJECTAGG",
    "MAX",
    "MIN",
    "STD",
    "STDDEV",
    "STDDEV_POP",
    "STDDEV_SAMP",
    "SUM",
    "VARIANCE",
    "VAR_POP",
    "VAR_SAMP",
];

const INTERVAL_UNITS: &[Keyword] = &[
    Keyword::Microsecond,
    Keyword::Second,
    Keyword::Minute,
    Keyword::Hour,
    Keyword::Day,
    Keyword::Week,
    Keyword::Month,
    Keyword::Quarter,
    Keyword::Year,
    Keyword::SecondMicrosecond,
    Keyword::MinuteMicrosecond,
    Keyword::MinuteSecond,
    Keyword::HourMicrosecond,
    Keyword::HourSecond,
    Keyword::HourMinute,
    Keyword::DayMicrosecond,
    Keyword::DaySecond,
    Keyword::DayMinute,
    Keyword::DayHour,
    Keyword::YearMonth,
];

const CAST_TYPES: &[Keyword] = &[
    Keyword::Binary,
    Keyword::Char,
    Keyword::Nchar,
    Keyword::Signed,
    Keyword::Unsigned,
    Keyword::Date,
    Keyword::Time,
    Keyword::Datetime,
    Keyword::Decimal,
    Keyword::Json,
    Keyword::Real,
    Keyword::Double,
    Keyword::Float,
    Keyword::Year,
];

const SIMPLE_EXPR_STARTS: &[TokenType] = &[
    TokenType::Identifier,
    TokenType::Int,
    TokenType::SingleQuotedText,
    TokenType::OpenPar,
    TokenType::Minus,
];

const fn is_literal_start(token_type: TokenType) -> bool {
    matches!(
        token_type,
        TokenType::SingleQuotedText
            | TokenType::DoubleQuotedText
            | TokenType::NCharText
            | TokenType::UnderscoreCharset
            | TokenType::Int
            | TokenType::Decimal
            | TokenType::Float
            | TokenType::Hex
            | TokenType::Bin
            | TokenType::Keyword(Keyword::True | Keyword::False | Keyword::Null)
    )
}

const fn is_comp_op(token_type: TokenType) -> bool {
    matches!(
        token_type,
        TokenType::Equal
            | TokenType::NullSafeEqual
            | TokenType::GreaterOrEqual
            | TokenType::Greater
            | TokenType::LessOrEqual
            | TokenType::Less
            | TokenType::NotEqual
    )
}

impl Parser<'_, '_> {
    /// Wraps the current token in a rule node of its own.
    pub(super) fn leaf(&mut self, kind: RuleKind) -> PResult {
        self.rule(kind, |p| {
            p.consume();
            Ok(())
        })
    }

    pub(super) fn identifier(&mut self) -> PResult {
        self.rule(RuleKind::Identifier, |p| {
            if p.at_identifier() {
                p.consume();
                Ok(())
            } else {
                Err(p.mismatch())
            }
        })
    }

    /// An identifier in a position where reserved words are allowed too,
    /// such as after a `.` qualifier.
    pub(super) fn identifier_or_keyword(&mut self) -> PResult {
        self.rule(RuleKind::Identifier, |p| {
            if p.at_identifier() || matches!(p.la(1), TokenType::Keyword(_)) {
                p.consume();
                Ok(())
            } else {
                Err(p.mismatch())
            }
        })
    }

    pub(super) fn text_or_identifier(&mut self) -> PResult {
        if self.at_text() {
            self.text_literal()
        } else {
            self.identifier()
        }
    }

    pub(super) fn charset_name(&mut self) -> PResult {
        if self.accept_kw(Keyword::Binary) || self.accept_kw(Keyword::Default) {
            return Ok(());
        }
        self.text_or_identifier()
    }

    /// `CHARSET name`, `CHAR SET name` or `CHARACTER SET name`.
    pub(super) fn charset_clause(&mut self) -> PResult {
        if !self.accept_kw(Keyword::Charset) {
            self.expect_any_kw(&[Keyword::Character, Keyword::Char])?;
            self.expect_kw(Keyword::Set)?;
        }
        self.accept(TokenType::Equal);
        self.charset_name()
    }

    pub(super) fn at_charset_clause(&mut self) -> bool {
        self.at_kw(Keyword::Charset)
            || (matches!(
                self.la(1),
                TokenType::Keyword(Keyword::Character | Keyword::Char)
            ) && self.la_is_kw(2, Keyword::Set))
    }

    pub(super) fn column_ref(&mut self) -> PResult {
        self.rule(RuleKind::ColumnRef, |p| {
            p.identifier()?;
            for _ in 0..2 {
                if !p.accept(TokenType::Dot) {
                    break;
                }
                p.identifier_or_keyword()?;
            }
            Ok(())
        })
    }

    pub(super) fn expr_list(&mut self) -> PResult {
        self.rule(RuleKind::ExprList, |p| {
            p.expr()?;
            while p.accept(TokenType::Comma) {
                p.expr()?;
            }
            Ok(())
        })
    }

    pub(super) fn expr(&mut self) -> PResult {
        self.expr_bp(0)
    }

    fn expr_bp(&mut self, min_bp: u8) -> PResult {
        if self.at_kw(Keyword::Not) && !self.has_mode(SqlMode::HIGH_NOT_PRECEDENCE) {
            self.rule(RuleKind::ExprNot, |p| {
                p.consume();
                p.expr_bp(NOT_BINDING_POWER)
            })?;
        } else {
            self.expr_is()?;
        }

        while let Some((op, left_bp, right_bp)) = logical_binding_power(self.la(1)) {
            if left_bp < min_bp {
                break;
            }
            let kind = match op {
                LogicalOp::Or => RuleKind::ExprOr,
                LogicalOp::Xor => RuleKind::ExprXor,
                LogicalOp::And => RuleKind::ExprAnd,
            };
            self.wrap(kind, |p| {
                p.consume();
                p.expr_bp(right_bp)
            })?;
        }
        Ok(())
    }

    fn expr_is(&mut self) -> PResult {
        self.rule(RuleKind::ExprIs, |p| {
            p.bool_pri()?;
            let truth = |t: TokenType| {
                matches!(
                    t,
                    TokenType::Keyword(Keyword::True | Keyword::False | Keyword::Unknown)
                )
            };
            if p.at_kw(Keyword::Is)
                && (truth(p.la(2)) || (p.la_is_kw(2, Keyword::Not) && truth(p.la(3))))
            {
                p.consume();
                p.accept_kw(Keyword::Not);
                p.expect_any_kw(&[Keyword::True, Keyword::False, Keyword::Unknown])?;
            }
            Ok(())
        })
    }

    fn bool_pri(&mut self) -> PResult {
        self.rule(RuleKind::PrimaryExprPredicate, Self::predicate)?;
        loop {
            let is_null = self.la_is_kw(1, Keyword::Is)
                && (self.la_is_kw(2, Keyword::Null)
                    || (self.la_is_kw(2, Keyword::Not) && self.la_is_kw(3, Keyword::Null)));
            if is_null {
                self.wrap(RuleKind::PrimaryExprIsNull, |p| {
                    p.consume();
                    p.accept_kw(Keyword::Not);
                    p.expect_kw(Keyword::Null)
                })?;
            } else if is_comp_op(self.la(1)) {
                let all_any = matches!(
                    self.la(2),
                    TokenType::Keyword(Keyword::All | Keyword::Any | Keyword::Some)
                ) && self.la(3) == TokenType::OpenPar;
                if all_any {
                    self.wrap(RuleKind::PrimaryExprAllAny, |p| {
                        p.leaf(RuleKind::CompOp)?;
                        p.consume();
                        p.subquery()
                    })?;
                } else {
                    self.wrap(RuleKind::PrimaryExprCompare, |p| {
                        p.leaf(RuleKind::CompOp)?;
                        p.predicate()
                    })?;
                }
            } else {
                return Ok(());
            }
        }
    }

    fn predicate(&mut self) -> PResult {
        self.rule(RuleKind::Predicate, |p| {
            p.bit_expr()?;
            if p.at_kw(Keyword::Sounds) {
                p.consume();
                p.expect_kw(Keyword::Like)?;
                return p.bit_expr();
            }
            let negatable = |t: TokenType| {
                matches!(
                    t,
                    TokenType::Keyword(
                        Keyword::In
                            | Keyword::Between
                            | Keyword::Like
                            | Keyword::Regexp
                            | Keyword::Rlike
                    )
                )
            };
            if p.la_is_kw(1, Keyword::Not) && negatable(p.la(2)) {
                p.consume();
            }
            match p.la(1) {
                TokenType::Keyword(Keyword::In) => p.rule(RuleKind::PredicateExprIn, |p| {
                    p.consume();
                    if p.la(1) == TokenType::OpenPar && p.la_is_kw(2, Keyword::Select) {
                        return p.subquery();
                    }
                    p.expect(TokenType::OpenPar)?;
                    p.expr_list()?;
                    p.expect(TokenType::ClosePar)
                }),
                TokenType::Keyword(Keyword::Between) => {
                    p.rule(RuleKind::PredicateExprBetween, |p| {
                        p.consume();
                        p.bit_expr()?;
                        p.expect_kw(Keyword::And)?;
                        p.predicate()
                    })
                }
                TokenType::Keyword(Keyword::Like) => p.rule(RuleKind::PredicateExprLike, |p| {
                    p.consume();
                    p.simple_expr()?;
                    if p.accept_kw(Keyword::Escape) {
                        p.simple_expr()?;
                    }
                    Ok(())
                }),
                TokenType::Keyword(Keyword::Regexp | Keyword::Rlike) => {
                    p.rule(RuleKind::PredicateExprRegexp, |p| {
                        p.consume();
                        p.bit_expr()
                    })
                }
                _ => Ok(()),
            }
        })
    }

    pub(super) fn bit_expr(&mut self) -> PResult {
        self.bit_expr_bp(0)
    }

    fn bit_expr_bp(&mut self, min_bp: u8) -> PResult {
        self.rule(RuleKind::BitExpr, Self::simple_expr)?;
        loop {
            let op = self.la(1);
            let Some((left_bp, right_bp)) = infix_binding_power(op) else {
                return Ok(());
            };
            if left_bp < min_bp {
                return Ok(());
            }
            self.wrap(RuleKind::BitExpr, |p| {
                p.consume();
                if allows_interval(op) && p.la_is_kw(1, Keyword::Interval) {
                    p.consume();
                    p.expr()?;
                    p.interval_unit()
                } else {
                    p.bit_expr_bp(right_bp)
                }
            })?;
        }
    }

    pub(super) fn simple_expr(&mut self) -> PResult {
        self.simple_expr_head()?;
        loop {
            match self.la(1) {
                TokenType::Keyword(Keyword::Collate) => {
                    self.wrap(RuleKind::SimpleExprCollate, |p| {
                        p.consume();
                        p.text_or_identifier()
                    })?;
                }
                TokenType::ConcatPipes => {
                    self.wrap(RuleKind::SimpleExprConcat, |p| {
                        p.consume();
                        p.simple_expr_head()
                    })?;
                }
                TokenType::JsonSeparator | TokenType::JsonUnquotedSeparator => {
                    self.wrap(RuleKind::SimpleExprJsonSeparator, |p| {
                        p.consume();
                        p.text_literal()
                    })?;
                }
                _ => return Ok(()),
            }
        }
    }

    fn simple_expr_head(&mut self) -> PResult {
        let next = self.la(2);
        match self.la(1) {
            TokenType::UserVariable | TokenType::AtAt => {
                self.rule(RuleKind::SimpleExprVariable, Self::variable)
            }
            TokenType::ParamMarker => self.leaf(RuleKind::SimpleExprParamMarker),
            TokenType::Plus | TokenType::Minus | TokenType::BitNot => {
                self.rule(RuleKind::SimpleExprUnary, |p| {
                    p.consume();
                    p.simple_expr()
                })
            }
            TokenType::LogicalNot => self.rule(RuleKind::SimpleExprNot, |p| {
                p.consume();
                p.simple_expr()
            }),
            TokenType::Keyword(Keyword::Not) if self.has_mode(SqlMode::HIGH_NOT_PRECEDENCE) => {
                self.rule(RuleKind::SimpleExprNot, |p| {
                    p.consume();
                    p.simple_expr()
                })
            }
            TokenType::OpenPar if next == TokenType::Keyword(Keyword::Select) => {
                self.rule(RuleKind::SimpleExprSubQuery, Self::subquery)
            }
            TokenType::OpenPar => self.rule(RuleKind::SimpleExprList, |p| {
                p.consume();
                p.expr_list()?;
                p.expect(TokenType::ClosePar)
            }),
            TokenType::Keyword(Keyword::Exists) => self.rule(RuleKind::SimpleExprExists, |p| {
                p.consume();
                p.subquery()
            }),
            TokenType::Keyword(Keyword::Case) => self.case_expr(),
            TokenType::Keyword(Keyword::Binary) => self.rule(RuleKind::SimpleExprBinary, |p| {
                p.consume();
                p.simple_expr()
            }),
            TokenType::Keyword(Keyword::Convert) if next == TokenType::OpenPar => self.cast_expr(),
            TokenType::Keyword(Keyword::Interval) => {
                self.rule(RuleKind::SimpleExprInterval, |p| {
                    p.consume();
                    p.expr()?;
                    p.interval_unit()?;
                    if p.accept(TokenType::Plus) {
                        p.expr()?;
                    }
                    Ok(())
                })
            }
            TokenType::Keyword(Keyword::Default) if next == TokenType::OpenPar => {
                self.rule(RuleKind::SimpleExprDefault, |p| {
                    p.consume();
                    p.expect(TokenType::OpenPar)?;
                    p.column_ref()?;
                    p.expect(TokenType::ClosePar)
                })
            }
            TokenType::Keyword(Keyword::Date | Keyword::Time | Keyword::Timestamp)
                if next == TokenType::SingleQuotedText =>
            {
                self.rule(RuleKind::SimpleExprLiteral, Self::literal)
            }
            TokenType::Keyword(keyword) if WINDOW_FUNCTIONS.contains(&keyword) && next == TokenType::OpenPar => {
                self.rule(RuleKind::SimpleExprSum, Self::sum_expr)
            }
            TokenType::Keyword(keyword)
                if (RUNTIME_FUNCTIONS.contains(&keyword) && next == TokenType::OpenPar)
                    || NO_PAREN_FUNCTIONS.contains(&keyword) =>
            {
                self.rule(RuleKind::SimpleExprRuntimeFunction, Self::runtime_function_call)
            }
            current if is_literal_start(current) => {
                self.rule(RuleKind::SimpleExprLiteral, Self::literal)
            }
            current if self.is_identifier(current) && next == TokenType::OpenPar => {
                let name = self.lt(1).text.to_ascii_uppercase();
                let builtin = current == TokenType::Identifier
                    || current == TokenType::Keyword(Keyword::Avg);
                let attached = self.next_is_adjacent() || self.has_mode(SqlMode::IGNORE_SPACE);
                if builtin && attached && name == "CAST" {
                    self.cast_expr()
                } else if builtin && attached && SUM_FUNCTIONS.contains(&name.as_str()) {
                    self.rule(RuleKind::SimpleExprSum, Self::sum_expr)
                } else {
                    self.rule(RuleKind::SimpleExprFunction, Self::function_call)
                }
            }
            current
                if self.is_identifier(current)
                    && next == TokenType::Dot
                    && self.is_identifier(self.la(3))
                    && self.la(4) == TokenType::OpenPar =>
            {
                self.rule(RuleKind::SimpleExprFunction, Self::function_call)
            }
            current if self.is_identifier(current) => {
                self.rule(RuleKind::SimpleExprColumnRef, Self::column_ref)
            }
            _ => Err(self.no_viable(SIMPLE_EXPR_STARTS)),
        }
    }

    fn variable(&mut self) -> PResult {
        self.rule(RuleKind::Variable, |p| {
            if p.accept(TokenType::UserVariable) {
                if p.accept(TokenType::Assign) {
                    p.expr()?;
                }
                return Ok(());
            }
            p.expect(TokenType::AtAt)?;
            let scoped = matches!(
                p.la(1),
                TokenType::Keyword(
                    Keyword::Global | Keyword::Session | Keyword::Local | Keyword::Persist
                )
            ) && p.la(2) == TokenType::Dot;
            if scoped {
                p.consume();
                p.consume();
            }
            p.identifier_or_keyword()?;
            if p.accept(TokenType::Dot) {
                p.identifier_or_keyword()?;
            }
            Ok(())
        })
    }

    fn case_expr(&mut self) -> PResult {
        self.rule(RuleKind::SimpleExprCase, |p| {
            p.consume();
            if !p.at_kw(Keyword::When) {
                p.expr()?;
            }
            loop {
                p.rule(RuleKind::WhenExpression, |p| {
                    p.expect_kw(Keyword::When)?;
                    p.expr()
                })?;
                p.rule(RuleKind::ThenExpression, |p| {
                    p.expect_kw(Keyword::Then)?;
                    p.expr()
                })?;
                if !p.at_kw(Keyword::When) {
                    break;
                }
            }
            if p.at_kw(Keyword::Else) {
                p.rule(RuleKind::ElseExpression, |p| {
                    p.consume();
                    p.expr()
                })?;
            }
            p.expect_kw(Keyword::End)
        })
    }

    /// `CAST(expr AS type)`, `CONVERT(expr, type)` or `CONVERT(expr USING charset)`.
    fn cast_expr(&mut self) -> PResult {
        self.rule(RuleKind::SimpleExprCast, |p| {
            let convert = p.la_is_kw(1, Keyword::Convert);
            p.consume();
            p.expect(TokenType::OpenPar)?;
            p.expr()?;
            if convert {
                if p.accept_kw(Keyword::Using) {
                    p.charset_name()?;
                } else {
                    p.expect(TokenType::Comma)?;
                    p.cast_type()?;
                }
            } else {
                p.expect_kw(Keyword::As)?;
                p.cast_type()?;
            }
            p.expect(TokenType::ClosePar)
        })
    }

    fn cast_type(&mut self) -> PResult {
        self.rule(RuleKind::CastType, |p| {
            p.expect_any_kw(CAST_TYPES)?;
            p.accept_any_kw(&[Keyword::Int, Keyword::Integer, Keyword::Precision]);
            if p.at(TokenType::OpenPar) {
                p.field_length()?;
            }
            if p.at_charset_clause() {
                p.charset_clause()?;
            } else {
                p.accept_kw(Keyword::Ascii);
            }
            Ok(())
        })
    }

    /// `(n)` or `(m, d)`.
    pub(super) fn field_length(&mut self) -> PResult {
        self.expect(TokenType::OpenPar)?;
        self.expect(TokenType::Int)?;
        if self.accept(TokenType::Comma) {
            self.expect(TokenType::Int)?;
        }
        self.expect(TokenType::ClosePar)
    }

    pub(super) fn interval_unit(&mut self) -> PResult {
        self.rule(RuleKind::IntervalUnit, |p| p.expect_any_kw(INTERVAL_UNITS))
    }

    fn runtime_function_call(&mut self) -> PResult {
        self.rule(RuleKind::RuntimeFunctionCall, |p| {
            p.consume();
            if !p.accept(TokenType::OpenPar) {
                return Ok(());
            }
            if !p.at(TokenType::ClosePar) {
                p.expr_list()?;
                if p.accept_kw(Keyword::Using) {
                    p.charset_name()?;
                }
            }
            p.expect(TokenType::ClosePar)
        })
    }

    fn function_call(&mut self) -> PResult {
        self.rule(RuleKind::FunctionCall, |p| {
            let name = p.lt(1).text.to_ascii_uppercase();
            p.identifier()?;
            if p.accept(TokenType::Dot) {
                p.identifier()?;
            }
            p.expect(TokenType::OpenPar)?;
            if !p.at(TokenType::ClosePar) {
                p.function_arguments(&name)?;
            }
            p.expect(TokenType::ClosePar)
        })
    }

    /// Arguments of a function call, with the keyword forms of a few
    /// built-in string and date functions.
    fn function_arguments(&mut self, name: &str) -> PResult {
        match name {
            "EXTRACT" => {
                self.interval_unit()?;
                self.expect_kw(Keyword::From)?;
                self.expr()
            }
            "POSITION" => {
                self.bit_expr()?;
                self.expect_kw(Keyword::In)?;
                self.expr()
            }
            "TRIM" => {
                let positional =
                    self.accept_any_kw(&[Keyword::Leading, Keyword::Trailing, Keyword::Both]);
                if !self.at_kw(Keyword::From) {
                    self.expr()?;
                }
                if self.accept_kw(Keyword::From) || positional {
                    self.expr()?;
                }
                Ok(())
            }
            "SUBSTRING" | "SUBSTR" | "MID" => {
                self.expr()?;
                if self.accept_kw(Keyword::From) {
                    self.expr()?;
                    if self.accept_kw(Keyword::For) {
                        self.expr()?;
                    }
                } else {
                    while self.accept(TokenType::Comma) {
                        self.expr()?;
                    }
                }
                Ok(())
            }
            _ => self.udf_expr_list(),
        }
    }

    fn udf_expr_list(&mut self) -> PResult {
        self.rule(RuleKind::UdfExprList, |p| {
            loop {
                p.rule(RuleKind::UdfExpr, |p| {
                    p.expr()?;
                    if p.accept_kw(Keyword::As) {
                        p.text_or_identifier()?;
                    }
                    Ok(())
                })?;
                if !p.accept(TokenType::Comma) {
                    return Ok(());
                }
            }
        })
    }

    /// Aggregate and window functions.
    fn sum_expr(&mut self) -> PResult {
        self.rule(RuleKind::SumExpr, |p| {
            p.consume();
            p.expect(TokenType::OpenPar)?;
            p.accept_any_kw(&[Keyword::Distinct, Keyword::All]);
            if !p.accept(TokenType::Mult) && !p.at(TokenType::ClosePar) {
                p.expr_list()?;
            }
            if p.at_kw(Keyword::Order) {
                p.order_clause()?;
            }
            if p.accept_kw(Keyword::Separator) {
                p.text_literal()?;
            }
            p.expect(TokenType::ClosePar)?;
            if p.at_kw(Keyword::Over) {
                p.windowing_clause()?;
            }
            Ok(())
        })
    }

    fn windowing_clause(&mut self) -> PResult {
        self.rule(RuleKind::WindowingClause, |p| {
            p.consume();
            if !p.at(TokenType::OpenPar) {
                return p.identifier();
            }
            p.consume();
            if p.at_identifier() {
                p.identifier()?;
            }
            if p.accept_kw(Keyword::Partition) {
                p.expect_kw(Keyword::By)?;
                p.expr_list()?;
            }
            if p.at_kw(Keyword::Order) {
                p.order_clause()?;
            }
            // Frame clause, kept as plain tokens.
            let mut depth = 0usize;
            loop {
                match p.la(1) {
                    TokenType::ClosePar if depth == 0 => break,
                    TokenType::Eof | TokenType::Semicolon => break,
                    TokenType::OpenPar => depth += 1,
                    TokenType::ClosePar => depth -= 1,
                    _ => {}
                }
                p.consume();
            }
            p.expect(TokenType::ClosePar)
        })
    }

    pub(super) fn literal(&mut self) -> PResult {
        self.rule(RuleKind::Literal, |p| match p.la(1) {
            TokenType::UnderscoreCharset
                if matches!(p.la(2), TokenType::Hex | TokenType::Bin) =>
            {
                p.consume();
                p.consume();
                Ok(())
            }
            TokenType::SingleQuotedText
            | TokenType::DoubleQuotedText
            | TokenType::NCharText
            | TokenType::UnderscoreCharset => p.text_literal(),
            TokenType::Int | TokenType::Decimal | TokenType::Float => {
                p.leaf(RuleKind::NumLiteral)
            }
            TokenType::Hex | TokenType::Bin => {
                p.consume();
                Ok(())
            }
            TokenType::Keyword(Keyword::True | Keyword::False) => p.leaf(RuleKind::BoolLiteral),
            TokenType::Keyword(Keyword::Null) => p.leaf(RuleKind::NullLiteral),
            TokenType::Keyword(Keyword::Date | Keyword::Time | Keyword::Timestamp) => {
                p.rule(RuleKind::TemporalLiteral, |p| {
                    p.consume();
                    p.expect(TokenType::SingleQuotedText)
                })
            }
            _ => Err(p.no_viable(&[
                TokenType::SingleQuotedText,
                TokenType::Int,
                TokenType::Keyword(Keyword::Null),
            ])),
        })
    }

    /// One or more adjacent strings, optionally introduced by a charset.
    pub(super) fn text_literal(&mut self) -> PResult {
        self.rule(RuleKind::TextLiteral, |p| {
            if !p.accept(TokenType::NCharText) {
                p.accept(TokenType::UnderscoreCharset);
                p.expect_any(&[TokenType::SingleQuotedText, TokenType::DoubleQuotedText])?;
            }
            while matches!(
                p.la(1),
                TokenType::SingleQuotedText | TokenType::DoubleQuotedText
            ) {
                p.consume();
            }
            Ok(())
        })
    }
}
