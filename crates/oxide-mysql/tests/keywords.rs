//! Version normalisation and keyword tables.

use oxide_mysql::keywords::{keywords, reserved_keywords, version_family};
use oxide_mysql::{
    MySqlParser, ParserConfig, VersionFamily, is_keyword, is_reserved_keyword, version_to_number,
};

const FAMILIES: [Option<VersionFamily>; 4] = [
    Some(VersionFamily::V5_6),
    Some(VersionFamily::V5_7),
    Some(VersionFamily::V8_0),
    None,
];

#[test]
fn version_numbers() {
    assert_eq!(version_to_number("5.7.20"), Some(50720));
    assert_eq!(version_to_number("8.0.0"), Some(80000));
    assert_eq!(version_to_number("8.0.32-log"), Some(80032));
    assert_eq!(version_to_number("5.6"), None);
    assert_eq!(version_to_number("8.x.0"), None);
    assert_eq!(version_to_number(""), None);
}

#[test]
fn families() {
    assert_eq!(version_family("5.6.51"), Some(VersionFamily::V5_6));
    assert_eq!(version_family("5.7.0"), Some(VersionFamily::V5_7));
    assert_eq!(version_family("8.0.36"), Some(VersionFamily::V8_0));
    assert_eq!(version_family("nonsense"), None);
}

#[test]
fn reserved_implies_keyword() {
    for family in FAMILIES {
        for word in reserved_keywords(family) {
            assert!(is_keyword(word, family), "{word} in {family:?}");
            assert!(is_reserved_keyword(word, family));
        }
        for word in keywords(family) {
            if is_reserved_keyword(word, family) {
                assert!(is_keyword(word, family));
            }
        }
    }
    for word in ["select", "Select", "users", "", "`select`"] {
        for family in FAMILIES {
            assert!(!is_reserved_keyword(word, family) || is_keyword(word, family));
        }
    }
}

#[test]
fn lookups_ignore_case() {
    let family = Some(VersionFamily::V8_0);
    assert!(is_keyword("select", family));
    assert!(is_reserved_keyword("SeLeCt", family));
    assert!(!is_keyword("users", family));
}

#[test]
fn unknown_version_has_no_keywords() {
    assert!(keywords(None).is_empty());
    assert!(reserved_keywords(None).is_empty());

    let parser = MySqlParser::new(ParserConfig::with_version("8"));
    assert!(parser.keywords().is_empty());
    assert!(parser.reserved_keywords().is_empty());
    assert!(!parser.is_reserved_keyword("SELECT"));
}

#[test]
fn tables_grow_with_versions() {
    let v57 = Some(VersionFamily::V5_7);
    let v80 = Some(VersionFamily::V8_0);
    assert!(!is_keyword("LATERAL", v57));
    assert!(is_reserved_keyword("LATERAL", v80));
    assert!(keywords(v80).contains(&"LATERAL"));
}
