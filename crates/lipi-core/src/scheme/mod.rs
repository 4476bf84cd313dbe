//! Scheme definitions and the scheme store.
//!
//! A scheme describes one writing system as a set of group tables
//! (vowels, consonants, marks, ...) keyed by canonical Devanagari glyphs,
//! so that any two schemes can be cross-referenced group by group.

pub mod loader;

use std::collections::BTreeMap;

/// Character-table groups a scheme may define.
///
/// `alternates`, `accented_vowel_alternates` and `shortcuts` are not
/// groups: they have different value shapes and live as separate fields
/// on [`Scheme`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Group {
    Vowels,
    VowelMarks,
    Yogavaahas,
    Virama,
    Consonants,
    ExtraConsonants,
    Accents,
    Symbols,
    Zwj,
    Skip,
}

impl Group {
    pub const ALL: [Group; 10] = [
        Group::Vowels,
        Group::VowelMarks,
        Group::Yogavaahas,
        Group::Virama,
        Group::Consonants,
        Group::ExtraConsonants,
        Group::Accents,
        Group::Symbols,
        Group::Zwj,
        Group::Skip,
    ];

    /// Groups whose empty destination values stay empty instead of
    /// falling back to the source value.
    pub fn keeps_empty_target(self) -> bool {
        matches!(self, Group::Virama | Group::Zwj | Group::Skip)
    }

    pub fn name(self) -> &'static str {
        match self {
            Group::Vowels => "vowels",
            Group::VowelMarks => "vowel_marks",
            Group::Yogavaahas => "yogavaahas",
            Group::Virama => "virama",
            Group::Consonants => "consonants",
            Group::ExtraConsonants => "extra_consonants",
            Group::Accents => "accents",
            Group::Symbols => "symbols",
            Group::Zwj => "zwj",
            Group::Skip => "skip",
        }
    }
}

/// One writing-system definition.
///
/// Every table maps a canonical Devanagari key to this scheme's own
/// spelling of it. A missing group is different from an empty one: the
/// map builder skips a (from, to) group pair entirely when either side
/// lacks the group.
#[derive(Debug, Clone, Default)]
pub struct Scheme {
    pub groups: BTreeMap<Group, BTreeMap<String, String>>,
    /// Primary spelling -> additional accepted spellings.
    pub alternates: BTreeMap<String, Vec<String>>,
    /// Accented vowel (vowel token + one accent char) -> synonym spellings.
    pub accented_vowel_alternates: BTreeMap<String, Vec<String>>,
    /// Canonical text form -> preferred user-facing form.
    pub shortcuts: BTreeMap<String, String>,
    /// Set by [`SchemeStore::add_roman_scheme`]; consulted by the map builder.
    pub is_roman: bool,
}

impl Scheme {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn group(&self, group: Group) -> Option<&BTreeMap<String, String>> {
        self.groups.get(&group)
    }

    /// Insert a group table, replacing any previous one. Builder-style,
    /// mainly for tests and programmatic construction.
    pub fn with_group(mut self, group: Group, entries: &[(&str, &str)]) -> Self {
        self.set_group(
            group,
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        );
        self
    }

    pub fn set_group(&mut self, group: Group, table: BTreeMap<String, String>) {
        self.groups.insert(group, table);
    }

    /// Look up one value, e.g. `scheme.value(Group::Virama, "्")`.
    pub fn value(&self, group: Group, key: &str) -> Option<&str> {
        self.groups.get(&group)?.get(key).map(String::as_str)
    }
}

/// The vowel sign a Devanagari independent vowel combines into.
/// अ is absent: the inherent vowel has no written mark.
fn vowel_to_mark(vowel: &str) -> Option<&'static str> {
    Some(match vowel {
        "आ" => "ा",
        "इ" => "ि",
        "ई" => "ी",
        "उ" => "ु",
        "ऊ" => "ू",
        "ऋ" => "ृ",
        "ॠ" => "ॄ",
        "ऌ" => "ॢ",
        "ॡ" => "ॣ",
        "ऎ" => "ॆ",
        "ए" => "े",
        "ऐ" => "ै",
        "ऒ" => "ॊ",
        "ओ" => "ो",
        "औ" => "ौ",
        _ => return None,
    })
}

/// Named scheme registry. Schemes are registered once and read-only
/// afterwards; the engine owns one store per instance.
#[derive(Debug, Default)]
pub struct SchemeStore {
    schemes: BTreeMap<String, Scheme>,
}

impl SchemeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a scheme whose consonants carry an inherent vowel.
    pub fn add_brahmic_scheme(&mut self, name: &str, scheme: Scheme) {
        self.schemes.insert(name.to_string(), scheme);
    }

    /// Register a scheme whose consonants carry no inherent vowel.
    ///
    /// If the scheme does not define `vowel_marks`, the table is
    /// synthesized from `vowels`: each canonical vowel except अ is keyed
    /// under its vowel-sign counterpart with the scheme's own spelling.
    pub fn add_roman_scheme(&mut self, name: &str, mut scheme: Scheme) {
        if !scheme.groups.contains_key(&Group::VowelMarks) {
            let mut marks = BTreeMap::new();
            if let Some(vowels) = scheme.groups.get(&Group::Vowels) {
                for (key, value) in vowels {
                    if key == "अ" {
                        continue;
                    }
                    if let Some(mark) = vowel_to_mark(key) {
                        marks.insert(mark.to_string(), value.clone());
                    }
                }
            }
            scheme.set_group(Group::VowelMarks, marks);
        }
        scheme.is_roman = true;
        self.schemes.insert(name.to_string(), scheme);
    }

    pub fn get(&self, name: &str) -> Option<&Scheme> {
        self.schemes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.schemes.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemes.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roman_fixture() -> Scheme {
        Scheme::new()
            .with_group(
                Group::Vowels,
                &[("अ", "a"), ("आ", "ā"), ("इ", "i"), ("ए", "e")],
            )
            .with_group(Group::Consonants, &[("क", "k"), ("न", "n")])
            .with_group(Group::Virama, &[("्", "")])
    }

    #[test]
    fn roman_scheme_synthesizes_vowel_marks() {
        let mut store = SchemeStore::new();
        store.add_roman_scheme("test", roman_fixture());

        let scheme = store.get("test").unwrap();
        assert!(scheme.is_roman);
        let marks = scheme.group(Group::VowelMarks).unwrap();
        assert_eq!(marks.get("ा").map(String::as_str), Some("ā"));
        assert_eq!(marks.get("ि").map(String::as_str), Some("i"));
        assert_eq!(marks.get("े").map(String::as_str), Some("e"));
        // The inherent vowel has no mark.
        assert_eq!(marks.len(), 3);
    }

    #[test]
    fn explicit_vowel_marks_are_kept() {
        let mut store = SchemeStore::new();
        let scheme = roman_fixture().with_group(Group::VowelMarks, &[("ा", "aa")]);
        store.add_roman_scheme("test", scheme);

        let marks = store.get("test").unwrap().group(Group::VowelMarks).unwrap();
        assert_eq!(marks.get("ा").map(String::as_str), Some("aa"));
        assert_eq!(marks.len(), 1);
    }

    #[test]
    fn brahmic_scheme_is_stored_verbatim() {
        let mut store = SchemeStore::new();
        let scheme = Scheme::new().with_group(Group::Vowels, &[("अ", "అ")]);
        store.add_brahmic_scheme("test", scheme);

        let scheme = store.get("test").unwrap();
        assert!(!scheme.is_roman);
        assert!(scheme.group(Group::VowelMarks).is_none());
    }

    #[test]
    fn names_are_sorted_and_unique() {
        let mut store = SchemeStore::new();
        store.add_brahmic_scheme("b", Scheme::new());
        store.add_roman_scheme("a", Scheme::new());
        store.add_brahmic_scheme("b", Scheme::new());
        let names: Vec<&str> = store.names().collect();
        assert_eq!(names, ["a", "b"]);
    }
}
