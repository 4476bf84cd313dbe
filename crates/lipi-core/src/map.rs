//! Transliteration map construction.
//!
//! Merges an ordered (from, to) scheme pair into the flat lookup tables
//! the scanners consume. Built on demand and cached by the dispatcher;
//! an unknown scheme name produces an empty map, which degrades to
//! pass-through downstream.

use std::collections::{BTreeSet, HashMap};

use tracing::warn;

use crate::scheme::{Group, Scheme, SchemeStore};

#[derive(Debug, Clone, Default)]
pub struct TransMap {
    /// Source token -> destination string, for every non-mark group.
    pub letters: HashMap<String, String>,
    /// Source token -> destination string, for vowel marks and virama.
    pub marks: HashMap<String, String>,
    /// Subset of `letters` whose source token is a consonant; drives the
    /// implicit-vowel state machine.
    pub consonants: HashMap<String, String>,
    /// Subset of `letters` used for accent reordering.
    pub accents: HashMap<String, String>,
    /// Longest source token in chars; the scanner lookahead window.
    pub max_token_length: usize,
    /// Destination scheme's virama string ("" for Roman schemes).
    pub virama: String,
    pub from_is_roman: bool,
    pub to_is_roman: bool,
    /// The inherent vowel अ in each scheme's spelling.
    pub to_scheme_a: String,
    pub from_scheme_a: String,
    /// Source-side accent/yogavaaha characters, for reordering
    /// untransliterated input (Brahmic scanner pre-pass).
    pub from_accent_chars: BTreeSet<char>,
    pub from_yogavaaha_chars: BTreeSet<char>,
    /// Destination-side equivalents, for reordering transliterated
    /// output (Roman scanner post-pass).
    pub to_accent_chars: BTreeSet<char>,
    pub to_yogavaaha_chars: BTreeSet<char>,
}

impl TransMap {
    pub fn build(store: &SchemeStore, from: &str, to: &str) -> TransMap {
        let empty = Scheme::default();
        let from_scheme = store.get(from).unwrap_or(&empty);
        let to_scheme = store.get(to).unwrap_or(&empty);

        let mut map = TransMap {
            from_is_roman: from_scheme.is_roman,
            to_is_roman: to_scheme.is_roman,
            ..TransMap::default()
        };
        let alternates = &from_scheme.alternates;
        let no_alts: Vec<String> = Vec::new();

        for (&group, from_table) in &from_scheme.groups {
            let Some(to_table) = to_scheme.group(group) else {
                // The whole group is skipped when the destination scheme
                // lacks it, not filled in key by key.
                continue;
            };
            for (key, f) in from_table {
                let Some(t) = to_table.get(key) else { continue };
                let t = if t.is_empty() && !group.keeps_empty_target() {
                    f.clone()
                } else {
                    t.clone()
                };
                let alts = alternates.get(f).unwrap_or(&no_alts);

                map.max_token_length = map.max_token_length.max(f.chars().count());
                for alt in alts {
                    map.max_token_length = map.max_token_length.max(alt.chars().count());
                }

                match group {
                    Group::VowelMarks | Group::Virama => {
                        map.marks.insert(f.clone(), t.clone());
                        for alt in alts {
                            map.marks.insert(alt.clone(), t.clone());
                        }
                    }
                    _ => {
                        map.letters.insert(f.clone(), t.clone());
                        for alt in alts {
                            map.letters.insert(alt.clone(), t.clone());
                        }
                        if matches!(group, Group::Consonants | Group::ExtraConsonants) {
                            map.consonants.insert(f.clone(), t.clone());
                            for alt in alts {
                                map.consonants.insert(alt.clone(), t.clone());
                            }
                        }
                        if group == Group::Accents {
                            map.accents.insert(f.clone(), t.clone());
                            for alt in alts {
                                map.accents.insert(alt.clone(), t.clone());
                            }
                        }
                    }
                }
            }
        }

        map.resolve_accented_vowel_alternates(from_scheme);

        map.virama = to_scheme
            .value(Group::Virama, "्")
            .unwrap_or_default()
            .to_string();
        map.to_scheme_a = to_scheme
            .value(Group::Vowels, "अ")
            .unwrap_or_default()
            .to_string();
        map.from_scheme_a = from_scheme
            .value(Group::Vowels, "अ")
            .unwrap_or_default()
            .to_string();

        for (f, t) in &map.accents {
            map.from_accent_chars.extend(f.chars());
            map.to_accent_chars.extend(t.chars());
        }
        if let Some(table) = from_scheme.group(Group::Yogavaahas) {
            for v in table.values() {
                map.from_yogavaaha_chars.extend(v.chars());
            }
        }
        if let Some(table) = to_scheme.group(Group::Yogavaahas) {
            for v in table.values() {
                map.to_yogavaaha_chars.extend(v.chars());
            }
        }

        map
    }

    /// Expand `accented_vowel_alternates`: each synonym spelling gets the
    /// base vowel's mapping with the accent translated through `accents`
    /// (falling back to the accent marker itself).
    fn resolve_accented_vowel_alternates(&mut self, from_scheme: &Scheme) {
        for (base, synonyms) in &from_scheme.accented_vowel_alternates {
            let Some(accent) = base.chars().next_back() else {
                continue;
            };
            let base_vowel = &base[..base.len() - accent.len_utf8()];
            let accent = accent.to_string();
            let target_accent = self.accents.get(&accent).unwrap_or(&accent).clone();

            // The inherent vowel has no mark entry; an empty prefix is
            // correct there.
            let mark_base = self.marks.get(base_vowel).cloned().unwrap_or_default();
            let letter_base = match self.letters.get(base_vowel) {
                Some(letter) => letter.clone(),
                None => {
                    warn!(base_vowel, "accented vowel alternate without a base vowel mapping");
                    String::new()
                }
            };
            for synonym in synonyms {
                self.marks
                    .insert(synonym.clone(), format!("{mark_base}{target_accent}"));
                self.letters
                    .insert(synonym.clone(), format!("{letter_base}{target_accent}"));
            }
        }
    }
}
