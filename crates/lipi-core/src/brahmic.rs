//! Scanner for Brahmic source schemes.
//!
//! Brahmic input is one scalar per phoneme unit, so the scan is
//! character by character with no lookahead. The only carried state is
//! the pending inherent vowel (for Roman targets) and the `#` literal
//! toggle.

use crate::map::TransMap;
use crate::reorder::swap_adjacent;
use crate::translit::Options;

pub(crate) fn transliterate_brahmic(data: &str, map: &TransMap, _options: &Options) -> String {
    // Roman targets want the accent right after its vowel, before the
    // yogavaaha; reorder the input so the scan sees it that way.
    let reordered;
    let data = if map.to_is_roman && !map.accents.is_empty() {
        reordered = swap_adjacent(data, &map.from_yogavaaha_chars, &map.from_accent_chars);
        reordered.as_str()
    } else {
        data
    };

    let mut buf = String::with_capacity(data.len());
    let mut dangling_hash = false;
    let mut had_roman_consonant = false;
    let mut skipping = false;
    let mut key = String::with_capacity(4);

    for c in data.chars() {
        if c == '#' {
            if dangling_hash {
                skipping = !skipping;
                dangling_hash = false;
            } else {
                dangling_hash = true;
            }
            if had_roman_consonant {
                buf.push_str(&map.to_scheme_a);
                had_roman_consonant = false;
            }
            continue;
        }
        if skipping {
            buf.push(c);
            continue;
        }

        key.clear();
        key.push(c);

        if let Some(mark) = map.marks.get(&key) {
            // A mark resolves the pending consonant's vowel itself.
            buf.push_str(mark);
            had_roman_consonant = false;
            continue;
        }

        if dangling_hash {
            buf.push('#');
            dangling_hash = false;
        }
        if had_roman_consonant {
            buf.push_str(&map.to_scheme_a);
            had_roman_consonant = false;
        }
        match map.letters.get(&key) {
            Some(letter) => {
                buf.push_str(letter);
                had_roman_consonant = map.to_is_roman && map.consonants.contains_key(&key);
            }
            None => buf.push(c),
        }
    }
    if had_roman_consonant {
        buf.push_str(&map.to_scheme_a);
    }
    buf
}
