//! Numeric server versions and the keyword families derived from them.

/// A MySQL server version encoded as `MAJOR * 10000 + MINOR * 100 + PATCH`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ServerVersion(pub u32);

impl ServerVersion {
    /// The lowest version of the 8.0 series.
    pub const V8_0: Self = Self(80000);
    /// The lowest version of the 5.7 series.
    pub const V5_7: Self = Self(50700);
    /// The lowest version of the 5.6 series.
    pub const V5_6: Self = Self(50600);

    /// Builds a version from its components.
    #[must_use]
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self(major * 10000 + minor * 100 + patch)
    }

    /// Returns the raw numeric version.
    #[must_use]
    pub const fn number(self) -> u32 {
        self.0
    }

    /// Returns the keyword family for this version, if it is a supported one.
    #[must_use]
    pub const fn family(self) -> Option<VersionFamily> {
        if self.0 >= Self::V8_0.0 {
            Some(VersionFamily::V8_0)
        } else if self.0 >= Self::V5_7.0 {
            Some(VersionFamily::V5_7)
        } else if self.0 >= Self::V5_6.0 {
            Some(VersionFamily::V5_6)
        } else {
            None
        }
    }

    /// Returns the family the tokenizer and tree builder use.
    ///
    /// Versions outside the supported range fall back to the newest grammar.
    #[must_use]
    pub const fn grammar_family(self) -> VersionFamily {
        match self.family() {
            Some(family) => family,
            None => VersionFamily::V8_0,
        }
    }
}

/// A server series with its own keyword table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VersionFamily {
    /// MySQL 5.6.
    V5_6,
    /// MySQL 5.7.
    V5_7,
    /// MySQL 8.0.
    V8_0,
}

impl VersionFamily {
    /// Returns the series as `MAJOR.MINOR`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V5_6 => "5.6",
            Self::V5_7 => "5.7",
            Self::V8_0 => "8.0",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        assert_eq!(ServerVersion::new(5, 7, 20).number(), 50720);
        assert_eq!(ServerVersion::new(8, 0, 0), ServerVersion::V8_0);
    }

    #[test]
    fn test_family() {
        assert_eq!(ServerVersion(80023).family(), Some(VersionFamily::V8_0));
        assert_eq!(ServerVersion(50744).family(), Some(VersionFamily::V5_7));
        assert_eq!(ServerVersion(50600).family(), Some(VersionFamily::V5_6));
        assert_eq!(ServerVersion(50500).family(), None);
        assert_eq!(ServerVersion(0).grammar_family(), VersionFamily::V8_0);
    }
}
