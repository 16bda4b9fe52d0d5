//! Binding powers for the bit expression operators.
//!
//! From loosest to tightest: `|`, `&`, `<<` `>>`, `+` `-`, `*` `/` `%` `DIV`
//! `MOD`, `^`. All of them are left associative.

use crate::lexer::{Keyword, TokenType};

/// Returns the infix binding power for a token.
///
/// Returns `(left_bp, right_bp)`; `None` if the token is not a bit
/// expression operator.
#[must_use]
pub const fn infix_binding_power(token_type: TokenType) -> Option<(u8, u8)> {
    match token_type {
        TokenType::BitOr => Some((1, 2)),
        TokenType::BitAnd => Some((3, 4)),
        TokenType::ShiftLeft | TokenType::ShiftRight => Some((5, 6)),
        TokenType::Plus | TokenType::Minus => Some((7, 8)),
        TokenType::Mult
        | TokenType::Div
        | TokenType::Mod
        | TokenType::Keyword(Keyword::Div | Keyword::Mod) => Some((9, 10)),
        TokenType::BitXor => Some((11, 12)),
        _ => None,
    }
}

/// Returns true for the operators that may be followed by an `INTERVAL` operand.
#[must_use]
pub const fn allows_interval(token_type: TokenType) -> bool {
    matches!(token_type, TokenType::Plus | TokenType::Minus)
}

/// Binding powers for the logical operators of `expr`.
///
/// Returns the rule the operator builds together with `(left_bp, right_bp)`.
#[must_use]
pub const fn logical_binding_power(token_type: TokenType) -> Option<(LogicalOp, u8, u8)> {
    match token_type {
        TokenType::Keyword(Keyword::Or) | TokenType::LogicalOr => Some((LogicalOp::Or, 1, 2)),
        TokenType::Keyword(Keyword::Xor) => Some((LogicalOp::Xor, 3, 4)),
        TokenType::Keyword(Keyword::And) | TokenType::LogicalAnd => Some((LogicalOp::And, 5, 6)),
        _ => None,
    }
}

/// Right binding power of a prefix `NOT` at the `expr` level.
pub const NOT_BINDING_POWER: u8 = 7;

/// Logical operators of the `expr` rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    Or,
    Xor,
    And,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_order() {
        let (or, _) = infix_binding_power(TokenType::BitOr).unwrap_or_default();
        let (plus, _) = infix_binding_power(TokenType::Plus).unwrap_or_default();
        let (mult, _) = infix_binding_power(TokenType::Mult).unwrap_or_default();
        let (xor, _) = infix_binding_power(TokenType::BitXor).unwrap_or_default();
        assert!(or < plus);
        assert!(plus < mult);
        assert!(mult < xor);
    }

    #[test]
    fn test_keyword_operators() {
        assert_eq!(
            infix_binding_power(TokenType::Keyword(Keyword::Div)),
            infix_binding_power(TokenType::Div)
        );
        assert_eq!(infix_binding_power(TokenType::Comma), None);
    }

    #[test]
    fn test_logical_operators() {
        assert!(matches!(
            logical_binding_power(TokenType::Keyword(Keyword::And)),
            Some((LogicalOp::And, 5, 6))
        ));
        assert!(logical_binding_power(TokenType::Keyword(Keyword::Not)).is_none());
    }
}
