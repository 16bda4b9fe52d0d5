//! SQL modes that change how text is tokenized or parsed.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// The subset of MySQL's `sql_mode` flags that affect parsing.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct SqlMode: u32 {
        /// Double-quoted text is an identifier, not a string.
        const ANSI_QUOTES = 1;
        /// `NOT` binds tighter than comparison operators.
        const HIGH_NOT_PRECEDENCE = 1 << 1;
        /// `||` concatenates strings instead of being a logical OR.
        const PIPES_AS_CONCAT = 1 << 2;
        /// Allows whitespace between a function name and its parenthesis.
        const IGNORE_SPACE = 1 << 3;
        /// Backslash is an ordinary character inside string literals.
        const NO_BACKSLASH_ESCAPES = 1 << 4;
    }
}

impl SqlMode {
    /// No flags set.
    pub const NO_MODE: Self = Self::empty();

    /// Parses a comma separated `sql_mode` value such as `"ANSI,NO_BACKSLASH_ESCAPES"`.
    ///
    /// Combination modes are expanded to the flags relevant for parsing and
    /// names that do not influence parsing are ignored.
    #[must_use]
    pub fn from_mode_string(modes: &str) -> Self {
        let mut result = Self::NO_MODE;
        for name in modes.split(',') {
            let name = name.trim().to_ascii_uppercase();
            match name.as_str() {
                "ANSI" | "DB2" | "MAXDB" | "MSSQL" | "ORACLE" | "POSTGRESQL" => {
                    result |= Self::ANSI_QUOTES | Self::PIPES_AS_CONCAT | Self::IGNORE_SPACE;
                }
                "ANSI_QUOTES" => result |= Self::ANSI_QUOTES,
                "HIGH_NOT_PRECEDENCE" => result |= Self::HIGH_NOT_PRECEDENCE,
                "PIPES_AS_CONCAT" => result |= Self::PIPES_AS_CONCAT,
                "IGNORE_SPACE" => result |= Self::IGNORE_SPACE,
                "NO_BACKSLASH_ESCAPES" => result |= Self::NO_BACKSLASH_ESCAPES,
                _ => {}
            }
        }
        result
    }
}
