//! Keyword and version policy.
//!
//! Version strings such as `"8.0.32"` are normalised to the numeric form used
//! by the grammar engine. Keyword queries are scoped to a version family; an
//! unrecognised version has no keywords at all.

use once_cell::sync::Lazy;
use tracing::warn;

use oxide_mysql_grammar::lexer::Keyword;
use oxide_mysql_grammar::version::{ServerVersion, VersionFamily};

/// Keyword words of one version family, sorted alphabetically.
struct KeywordTable {
    all: Vec<&'static str>,
    reserved: Vec<&'static str>,
}

impl KeywordTable {
    fn build(family: VersionFamily) -> Self {
        let mut all: Vec<&'static str> = Keyword::all()
            .iter()
            .filter(|keyword| keyword.is_available(family))
            .map(|keyword| keyword.as_str())
            .collect();
        all.sort_unstable();
        let reserved = all
            .iter()
            .copied()
            .filter(|word| {
                Keyword::from_word(word).is_some_and(|keyword| keyword.is_reserved(family))
            })
            .collect();
        Self { all, reserved }
    }
}

static TABLES: Lazy<[KeywordTable; 3]> = Lazy::new(|| {
    [
        KeywordTable::build(VersionFamily::V5_6),
        KeywordTable::build(VersionFamily::V5_7),
        KeywordTable::build(VersionFamily::V8_0),
    ]
});

fn table(family: VersionFamily) -> &'static KeywordTable {
    let [v56, v57, v80] = &*TABLES;
    match family {
        VersionFamily::V5_6 => v56,
        VersionFamily::V5_7 => v57,
        VersionFamily::V8_0 => v80,
    }
}

/// Converts `"MAJOR.MINOR.PATCH"` to `MAJOR * 10000 + MINOR * 100 + PATCH`.
///
/// A suffix after the patch number (`"8.0.32-log"`) is ignored. Returns `None`
/// for anything else.
///
/// ```
/// use oxide_mysql::version_to_number;
///
/// assert_eq!(version_to_number("5.7.20"), Some(50720));
/// assert_eq!(version_to_number("8.0.0"), Some(80000));
/// assert_eq!(version_to_number("latest"), None);
/// ```
#[must_use]
pub fn version_to_number(version: &str) -> Option<u32> {
    let mut parts = version.trim().splitn(3, '.');
    let major = parse_component(parts.next()?)?;
    let minor = parse_component(parts.next()?)?;
    let patch_text = parts.next()?;
    let digits = patch_text
        .find(|c: char| !c.is_ascii_digit())
        .map_or(patch_text, |end| &patch_text[..end]);
    let patch = parse_component(digits)?;
    if minor > 99 || patch > 99 {
        return None;
    }
    major.checked_mul(10_000)?.checked_add(minor * 100 + patch)
}

fn parse_component(text: &str) -> Option<u32> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Normalises a version string, logging a warning when it cannot be read.
#[must_use]
pub fn server_version(version: &str) -> Option<ServerVersion> {
    let number = version_to_number(version);
    if number.is_none() {
        warn!(version, "unrecognised server version, keyword lookups will be empty");
    }
    number.map(ServerVersion)
}

/// Returns the keyword family for a version string, `None` when unknown.
#[must_use]
pub fn version_family(version: &str) -> Option<VersionFamily> {
    version_to_number(version).and_then(|number| ServerVersion(number).family())
}

/// All keywords of the family, reserved or not.
#[must_use]
pub fn keywords(family: Option<VersionFamily>) -> &'static [&'static str] {
    family.map_or(&[], |family| table(family).all.as_slice())
}

/// The reserved keywords of the family.
#[must_use]
pub fn reserved_keywords(family: Option<VersionFamily>) -> &'static [&'static str] {
    family.map_or(&[], |family| table(family).reserved.as_slice())
}

/// Returns true if `word` is a keyword in the family (case-insensitive).
#[must_use]
pub fn is_keyword(word: &str, family: Option<VersionFamily>) -> bool {
    match (family, Keyword::from_word(word)) {
        (Some(family), Some(keyword)) => keyword.is_available(family),
        _ => false,
    }
}

/// Returns true if `word` is a reserved keyword in the family (case-insensitive).
#[must_use]
pub fn is_reserved_keyword(word: &str, family: Option<VersionFamily>) -> bool {
    match (family, Keyword::from_word(word)) {
        (Some(family), Some(keyword)) => keyword.is_reserved(family),
        _ => false,
    }
}
