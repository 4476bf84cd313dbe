//! Scanner for Roman source schemes.
//!
//! Greedy longest-token matching over a bounded lookahead window,
//! combined with the implicit-vowel state machine: a consonant leaves
//! its vowel pending until the next token decides whether it surfaces
//! as a mark, the inherent vowel, or a virama.

use std::collections::VecDeque;

use crate::map::TransMap;
use crate::reorder::swap_adjacent;
use crate::translit::Options;

pub(crate) fn transliterate_roman(data: &str, map: &TransMap, options: &Options) -> String {
    let chars: Vec<char> = data.chars().collect();
    // An empty map would give a zero-length window; clamp so the scan
    // still advances and passes everything through unmapped.
    let max_len = map.max_token_length.max(1);

    let mut buf = String::with_capacity(data.len());
    let mut token_buffer: VecDeque<char> = VecDeque::with_capacity(max_len);
    let mut had_consonant = false;
    let mut skipping_sgml = false;
    let mut toggled_trans = false;
    let mut i = 0;

    while i < chars.len() || !token_buffer.is_empty() {
        // Refill the window one character per pass.
        let wanted = max_len - token_buffer.len();
        if wanted > 0 && i < chars.len() {
            token_buffer.push_back(chars[i]);
            i += 1;
            if wanted > 1 {
                continue;
            }
        }

        // Longest prefix first.
        for j in 0..max_len {
            let take = max_len - j;
            let token: String = token_buffer.iter().take(take).collect();

            if skipping_sgml {
                skipping_sgml = token != ">";
            } else if token == "<" {
                skipping_sgml = options.skip_sgml;
            } else if token == "##" {
                toggled_trans = !toggled_trans;
                token_buffer.drain(..2);
                break;
            }
            let skipping = skipping_sgml || toggled_trans;

            if !skipping {
                if let Some(letter) = map.letters.get(&token) {
                    if map.to_is_roman {
                        buf.push_str(letter);
                    } else {
                        // The implicit vowel: right after a consonant, a
                        // vowel surfaces as a mark, अ surfaces as nothing,
                        // and anything else breaks the cluster with a
                        // virama.
                        if had_consonant {
                            if let Some(mark) = map.marks.get(&token) {
                                buf.push_str(mark);
                            } else if token != map.from_scheme_a {
                                buf.push_str(&map.virama);
                                buf.push_str(letter);
                            }
                        } else {
                            buf.push_str(letter);
                        }
                        had_consonant = map.consonants.contains_key(&token);
                    }
                    token_buffer.drain(..take.min(token_buffer.len()));
                    break;
                }
                if j + 1 == max_len {
                    // Nothing matched down to one character.
                    if had_consonant {
                        had_consonant = false;
                        if !options.syncope {
                            buf.push_str(&map.virama);
                        }
                    }
                    if let Some(c) = token_buffer.pop_front() {
                        buf.push(c);
                    }
                }
            } else if j + 1 == max_len {
                if let Some(c) = token_buffer.pop_front() {
                    buf.push(c);
                }
            }
        }
    }

    if had_consonant && !options.syncope {
        buf.push_str(&map.virama);
    }

    // Brahmic targets write the accent after the yogavaaha.
    if !map.to_is_roman && !map.accents.is_empty() {
        buf = swap_adjacent(&buf, &map.to_accent_chars, &map.to_yogavaaha_chars);
    }
    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheme::loader::register_bundled;
    use crate::scheme::SchemeStore;

    fn convert(data: &str, from: &str, to: &str, options: &Options) -> String {
        let mut store = SchemeStore::new();
        register_bundled(&mut store);
        let map = TransMap::build(&store, from, to);
        transliterate_roman(data, &map, options)
    }

    fn convert_default(data: &str, from: &str, to: &str) -> String {
        convert(data, from, to, &Options::default())
    }

    #[test]
    fn iast_to_devanagari() {
        assert_eq!(convert_default("namaste", "iast", "devanagari"), "नमस्ते");
        assert_eq!(convert_default("namaskāra", "iast", "devanagari"), "नमस्कार");
        assert_eq!(convert_default("saṃskr̥ta", "iast", "devanagari"), "संस्कृत");
        assert_eq!(
            convert_default("śrīmadbhagavadgītā", "iast", "devanagari"),
            "श्रीमद्भगवद्गीता"
        );
    }

    #[test]
    fn explicit_virama_between_consonants() {
        assert_eq!(convert_default("sta", "iast", "devanagari"), "स्त");
        assert_eq!(convert_default("kṣa", "iast", "devanagari"), "क्ष");
    }

    #[test]
    fn trailing_consonant_gets_virama() {
        assert_eq!(convert_default("tat", "iast", "devanagari"), "तत्");
    }

    #[test]
    fn syncope_drops_virama_on_bare_consonants() {
        let syncope = Options {
            syncope: true,
            ..Options::default()
        };
        assert_eq!(convert("namaskar", "iast", "devanagari", &syncope), "नमस्कर");
        assert_eq!(
            convert("namaskar", "iast", "devanagari", &Options::default()),
            "नमस्कर्"
        );
        // A space after a bare consonant is also unvoweled.
        assert_eq!(convert("tat tvam", "iast", "devanagari", &syncope), "तत त्वम");
    }

    #[test]
    fn unmapped_characters_pass_through() {
        assert_eq!(convert_default("na-ma!", "iast", "devanagari"), "न-म!");
        assert_eq!(
            convert_default("namaste duniya", "iast", "devanagari"),
            "नमस्ते दुनिय"
        );
    }

    #[test]
    fn greedy_match_prefers_longer_tokens() {
        // "ai" must win over "a" + "i".
        assert_eq!(convert_default("kai", "iast", "devanagari"), "कै");
        assert_eq!(convert_default("ai", "iast", "devanagari"), "ऐ");
        // ITRANS three-char tokens.
        assert_eq!(convert_default("chha", "itrans", "devanagari"), "छ");
        assert_eq!(convert_default("AUM", "itrans", "devanagari"), "ॐ");
    }

    #[test]
    fn itrans_to_devanagari() {
        assert_eq!(convert_default("namaste", "itrans", "devanagari"), "नमस्ते");
        assert_eq!(convert_default("gItA", "itrans", "devanagari"), "गीता");
        assert_eq!(convert_default("geetaa", "itrans", "devanagari"), "गीता");
        assert_eq!(convert_default("saMskRRita", "itrans", "devanagari"), "संस्कृत");
    }

    #[test]
    fn roman_to_roman_has_no_implicit_vowels() {
        assert_eq!(convert_default("namaste", "iast", "hk"), "namaste");
        assert_eq!(convert_default("saṃskr̥ta", "iast", "hk"), "saMskRta");
        assert_eq!(convert_default("zAstra", "hk", "iast"), "śāstra");
    }

    #[test]
    fn sgml_tags_skipped_when_enabled() {
        let options = Options {
            skip_sgml: true,
            ..Options::default()
        };
        assert_eq!(
            convert("na<b>ma</b>ste", "iast", "devanagari", &options),
            "न<b>म</b>स्ते"
        );
    }

    #[test]
    fn sgml_tags_transliterated_when_disabled() {
        assert_eq!(
            convert_default("na<b>ma</b>ste", "iast", "devanagari"),
            "न<ब्>म</ब्>स्ते"
        );
    }

    #[test]
    fn double_hash_toggles_transliteration() {
        // One pair: the wrapped span is left untransliterated.
        assert_eq!(
            convert_default("na##ma##ste", "iast", "devanagari"),
            "नmaस्ते"
        );
        // Odd count: suppression runs to the end of the input.
        assert_eq!(convert_default("na##maste", "iast", "devanagari"), "नmaste");
    }

    #[test]
    fn empty_map_passes_input_through() {
        let store = SchemeStore::new();
        let map = TransMap::build(&store, "nope", "nope");
        assert_eq!(
            transliterate_roman("abc def", &map, &Options::default()),
            "abc def"
        );
    }

    #[test]
    fn accents_reorder_after_yogavaahas() {
        // The accent lands after the anusvara in Devanagari output.
        assert_eq!(convert_default("sa\u{0301}ṃ", "iast", "devanagari"), "सं॑");
        assert_eq!(convert_default("sāṃ", "iast", "devanagari"), "सां");
    }

    #[test]
    fn precomposed_accented_vowels_match_via_alternates() {
        assert_eq!(convert_default("s\u{00E1}", "iast", "devanagari"), "स॑");
        assert_eq!(convert_default("\u{00E1}", "iast", "devanagari"), "अ॑");
    }
}
