//! TOML scheme loading.
//!
//! A scheme file is a set of TOML tables named after the character
//! groups, each mapping canonical Devanagari keys to this scheme's own
//! spellings, plus the `alternates` / `accented_vowel_alternates` /
//! `shortcuts` tables. The bundled schemes are embedded at compile time;
//! `parse_scheme_toml` is public so callers can load their own files.

use std::collections::BTreeMap;

use serde::Deserialize;

use super::{Group, Scheme, SchemeStore};

pub const DEVANAGARI_TOML: &str = include_str!("data/devanagari.toml");
pub const TELUGU_TOML: &str = include_str!("data/telugu.toml");
pub const IAST_TOML: &str = include_str!("data/iast.toml");
pub const ITRANS_TOML: &str = include_str!("data/itrans.toml");
pub const HK_TOML: &str = include_str!("data/hk.toml");

/// Bundled scheme sources: (name, toml, is_roman).
pub const BUNDLED: [(&str, &str, bool); 5] = [
    ("devanagari", DEVANAGARI_TOML, false),
    ("telugu", TELUGU_TOML, false),
    ("iast", IAST_TOML, true),
    ("itrans", ITRANS_TOML, true),
    ("hk", HK_TOML, true),
];

#[derive(Debug, thiserror::Error)]
pub enum SchemeError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("scheme defines no character groups")]
    Empty,
    #[error("empty key in group {0}")]
    EmptyKey(&'static str),
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawScheme {
    #[serde(default)]
    vowels: BTreeMap<String, String>,
    #[serde(default)]
    vowel_marks: BTreeMap<String, String>,
    #[serde(default)]
    yogavaahas: BTreeMap<String, String>,
    #[serde(default)]
    virama: BTreeMap<String, String>,
    #[serde(default)]
    consonants: BTreeMap<String, String>,
    #[serde(default)]
    extra_consonants: BTreeMap<String, String>,
    #[serde(default)]
    accents: BTreeMap<String, String>,
    #[serde(default)]
    symbols: BTreeMap<String, String>,
    #[serde(default)]
    zwj: BTreeMap<String, String>,
    #[serde(default)]
    skip: BTreeMap<String, String>,
    #[serde(default)]
    alternates: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    accented_vowel_alternates: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    shortcuts: BTreeMap<String, String>,
}

/// Parse TOML text into a [`Scheme`].
///
/// Only structural problems are errors; a scheme missing groups or keys
/// is valid and simply produces partial transliteration maps later.
pub fn parse_scheme_toml(toml_str: &str) -> Result<Scheme, SchemeError> {
    let raw: RawScheme =
        toml::from_str(toml_str).map_err(|e| SchemeError::Parse(e.to_string()))?;

    let mut scheme = Scheme::new();
    let tables = [
        (Group::Vowels, raw.vowels),
        (Group::VowelMarks, raw.vowel_marks),
        (Group::Yogavaahas, raw.yogavaahas),
        (Group::Virama, raw.virama),
        (Group::Consonants, raw.consonants),
        (Group::ExtraConsonants, raw.extra_consonants),
        (Group::Accents, raw.accents),
        (Group::Symbols, raw.symbols),
        (Group::Zwj, raw.zwj),
        (Group::Skip, raw.skip),
    ];
    for (group, table) in tables {
        if table.is_empty() {
            // A group that is absent from the file stays absent from the
            // scheme; the map builder treats that differently from an
            // empty value.
            continue;
        }
        if table.keys().any(|key| key.is_empty()) {
            return Err(SchemeError::EmptyKey(group.name()));
        }
        scheme.set_group(group, table);
    }
    if scheme.groups.is_empty() {
        return Err(SchemeError::Empty);
    }
    scheme.alternates = raw.alternates;
    scheme.accented_vowel_alternates = raw.accented_vowel_alternates;
    scheme.shortcuts = raw.shortcuts;
    Ok(scheme)
}

/// Register every bundled scheme. The bundled TOML must be valid; this
/// is checked by tests over [`BUNDLED`].
pub(crate) fn register_bundled(store: &mut SchemeStore) {
    for (name, toml_str, is_roman) in BUNDLED {
        let scheme = parse_scheme_toml(toml_str)
            .unwrap_or_else(|e| panic!("bundled scheme {name} must be valid: {e}"));
        if is_roman {
            store.add_roman_scheme(name, scheme);
        } else {
            store.add_brahmic_scheme(name, scheme);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_toml() {
        let toml = r#"
[vowels]
"अ" = "a"
"आ" = "ā"

[consonants]
"क" = "k"

[virama]
"्" = ""

[alternates]
"ā" = ["aa"]
"#;
        let scheme = parse_scheme_toml(toml).unwrap();
        assert_eq!(scheme.value(Group::Vowels, "अ"), Some("a"));
        assert_eq!(scheme.value(Group::Virama, "्"), Some(""));
        assert_eq!(scheme.alternates["ā"], vec!["aa"]);
        assert!(scheme.group(Group::Symbols).is_none());
    }

    #[test]
    fn error_invalid_toml() {
        let err = parse_scheme_toml("not valid toml {{{").unwrap_err();
        assert!(matches!(err, SchemeError::Parse(_)));
    }

    #[test]
    fn error_unknown_table() {
        let err = parse_scheme_toml("[conzonants]\n\"क\" = \"k\"\n").unwrap_err();
        assert!(matches!(err, SchemeError::Parse(_)));
    }

    #[test]
    fn error_no_groups() {
        let err = parse_scheme_toml("[alternates]\n\"ā\" = [\"aa\"]\n").unwrap_err();
        assert!(matches!(err, SchemeError::Empty));
    }

    #[test]
    fn error_empty_key() {
        let err = parse_scheme_toml("[vowels]\n\"\" = \"a\"\n").unwrap_err();
        assert!(matches!(err, SchemeError::EmptyKey("vowels")));
    }

    #[test]
    fn bundled_schemes_parse() {
        for (name, toml_str, _) in BUNDLED {
            let scheme = parse_scheme_toml(toml_str)
                .unwrap_or_else(|e| panic!("bundled scheme {name} failed to parse: {e}"));
            assert!(
                scheme.group(Group::Vowels).is_some(),
                "{name} has no vowels"
            );
            assert!(
                scheme.group(Group::Consonants).is_some(),
                "{name} has no consonants"
            );
            assert!(
                scheme.value(Group::Virama, "्").is_some(),
                "{name} has no virama"
            );
        }
    }

    #[test]
    fn bundled_schemes_share_canonical_keys() {
        let deva = parse_scheme_toml(DEVANAGARI_TOML).unwrap();
        for (name, toml_str, _) in BUNDLED {
            let scheme = parse_scheme_toml(toml_str).unwrap();
            for (group, table) in &scheme.groups {
                let Some(reference) = deva.group(*group) else {
                    continue;
                };
                for key in table.keys() {
                    assert!(
                        reference.contains_key(key),
                        "{name}: {} key {key:?} missing from devanagari",
                        group.name()
                    );
                }
            }
        }
    }

    #[test]
    fn load_from_file() {
        use std::io::Write as _;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all("[vowels]\n\"अ\" = \"a\"\n".as_bytes()).unwrap();
        let text = std::fs::read_to_string(file.path()).unwrap();
        let scheme = parse_scheme_toml(&text).unwrap();
        assert_eq!(scheme.value(Group::Vowels, "अ"), Some("a"));
    }
}
