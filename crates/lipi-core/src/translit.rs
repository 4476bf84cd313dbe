//! The transliteration engine facade.
//!
//! `Transliterator` owns the scheme store, the default options and the
//! single-slot map cache, and orchestrates the per-scheme literal
//! rewrites around the two scanners. Unknown scheme names and unmapped
//! text degrade to pass-through; user-facing validation belongs to
//! callers.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug_span, warn};

use crate::brahmic::transliterate_brahmic;
use crate::map::TransMap;
use crate::reorder::{swap_digit_after_marks, swap_marks_after_digit};
use crate::roman::transliterate_roman;
use crate::scheme::loader::register_bundled;
use crate::scheme::{Group, Scheme, SchemeStore};

/// Transliteration options. Compared structurally for map-cache
/// validity, so the maps are `BTreeMap`s and substitution order is
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Pass text between `<` and `>` through unmodified.
    pub skip_sgml: bool,
    /// Leave bare consonants bare instead of attaching a virama.
    pub syncope: bool,
    /// Destination scheme name -> literal substitutions applied as a
    /// final pass over the output.
    pub preferred_alternates: BTreeMap<String, BTreeMap<String, String>>,
}

struct CachedMap {
    from: String,
    to: String,
    options: Options,
    map: Arc<TransMap>,
}

/// The engine. Construct one per scheme set; there is no process-wide
/// instance.
pub struct Transliterator {
    store: SchemeStore,
    defaults: Options,
    cache: Mutex<Option<CachedMap>>,
}

impl Default for Transliterator {
    fn default() -> Self {
        Self::new()
    }
}

impl Transliterator {
    /// An engine with no registered schemes.
    pub fn new() -> Self {
        Self {
            store: SchemeStore::new(),
            defaults: Options::default(),
            cache: Mutex::new(None),
        }
    }

    /// An engine preloaded with the bundled schemes.
    pub fn with_bundled_schemes() -> Self {
        let mut engine = Self::new();
        register_bundled(&mut engine.store);
        engine
    }

    pub fn add_brahmic_scheme(&mut self, name: &str, scheme: Scheme) {
        self.store.add_brahmic_scheme(name, scheme);
        self.invalidate_cache();
    }

    pub fn add_roman_scheme(&mut self, name: &str, scheme: Scheme) {
        self.store.add_roman_scheme(name, scheme);
        self.invalidate_cache();
    }

    pub fn store(&self) -> &SchemeStore {
        &self.store
    }

    pub fn scheme_names(&self) -> Vec<&str> {
        self.store.names().collect()
    }

    pub fn defaults(&self) -> &Options {
        &self.defaults
    }

    pub fn set_defaults(&mut self, options: Options) {
        self.defaults = options;
    }

    /// Transliterate with the stored default options.
    pub fn transliterate(&self, data: &str, from: &str, to: &str) -> String {
        let defaults = self.defaults.clone();
        self.transliterate_with(data, from, to, &defaults)
    }

    /// Transliterate with explicit options.
    pub fn transliterate_with(
        &self,
        data: &str,
        from: &str,
        to: &str,
        options: &Options,
    ) -> String {
        let _span = debug_span!("transliterate", from, to, len = data.len()).entered();
        let map = self.cached_map(from, to, options);

        let mut text = data.to_string();
        if from == "itrans" {
            text = itrans_preprocess(&text);
        }
        if from == "tamil_superscripted" {
            let marks = self.superscripted_mark_chars(from);
            text = swap_digit_after_marks(&text, &marks, &superscript_digits());
            warn!("transliteration from tamil_superscripted is only partially supported");
        }
        if let Some(scheme) = self.store.get(from) {
            text = expand_shortcuts(&text, &scheme.shortcuts);
        }

        let mut result = if map.from_is_roman {
            transliterate_roman(&text, &map, options)
        } else {
            transliterate_brahmic(&text, &map, options)
        };

        if let Some(scheme) = self.store.get(to) {
            result = contract_shortcuts(&result, &scheme.shortcuts);
        }
        if to == "tamil_superscripted" {
            let marks = self.superscripted_mark_chars(to);
            result = swap_marks_after_digit(&result, &marks, &superscript_digits());
        }
        if let Some(substitutions) = options.preferred_alternates.get(to) {
            for (from_text, to_text) in substitutions {
                result = result.replace(from_text, to_text);
            }
        }
        result
    }

    /// Transliterate each space-separated word independently, preserving
    /// input order. No state crosses word boundaries.
    pub fn transliterate_wordwise(
        &self,
        data: &str,
        from: &str,
        to: &str,
    ) -> Vec<(String, String)> {
        let defaults = self.defaults.clone();
        self.transliterate_wordwise_with(data, from, to, &defaults)
    }

    pub fn transliterate_wordwise_with(
        &self,
        data: &str,
        from: &str,
        to: &str,
        options: &Options,
    ) -> Vec<(String, String)> {
        data.split(' ')
            .filter(|word| !word.is_empty())
            .map(|word| {
                (
                    word.to_string(),
                    self.transliterate_with(word, from, to, options),
                )
            })
            .collect()
    }

    fn cached_map(&self, from: &str, to: &str, options: &Options) -> Arc<TransMap> {
        let mut slot = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(entry) = slot.as_ref() {
            if entry.from == from && entry.to == to && entry.options == *options {
                return Arc::clone(&entry.map);
            }
        }
        let map = {
            let _span = debug_span!("build_map", from, to).entered();
            Arc::new(TransMap::build(&self.store, from, to))
        };
        *slot = Some(CachedMap {
            from: from.to_string(),
            to: to.to_string(),
            options: options.clone(),
            map: Arc::clone(&map),
        });
        map
    }

    fn invalidate_cache(&mut self) {
        *self.cache.get_mut().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Vowel marks, virama and the Vedic accents of the named scheme, as
    /// a character set for the superscript-digit reordering.
    fn superscripted_mark_chars(&self, name: &str) -> BTreeSet<char> {
        let mut set = BTreeSet::new();
        if let Some(scheme) = self.store.get(name) {
            if let Some(marks) = scheme.group(Group::VowelMarks) {
                for value in marks.values() {
                    set.extend(value.chars());
                }
            }
            if let Some(virama) = scheme.value(Group::Virama, "्") {
                set.extend(virama.chars());
            }
        }
        set.insert('॑');
        set.insert('॒');
        set
    }
}

fn superscript_digits() -> BTreeSet<char> {
    ['²', '³', '⁴'].into_iter().collect()
}

/// ITRANS literal conventions, rewritten into engine conventions before
/// scanning: `{\m+}` is the anusvara ligature, `.h` an explicit virama
/// marker that the tables already cover, and `\x` escapes one character
/// (except the accent markers `'`, `` ` ``, `_`).
fn itrans_preprocess(data: &str) -> String {
    let text = data.replace("{\\m+}", ".h.N").replace(".h", "");

    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.peek().copied() {
            None => out.push_str("####"),
            Some('\'') | Some('`') | Some('_') => out.push(c),
            Some(next) => {
                chars.next();
                out.push_str("##");
                out.push(next);
                out.push_str("##");
            }
        }
    }
    out
}

/// Rewrite user-facing shortcut forms into the canonical forms the
/// tables use. A key that contains its own shortcut is swapped out
/// first so the substitution cannot double up.
fn expand_shortcuts(text: &str, shortcuts: &BTreeMap<String, String>) -> String {
    let mut out = text.to_string();
    for (key, shortcut) in shortcuts {
        if key.contains(shortcut) {
            out = out.replace(key, shortcut);
        }
        out = out.replace(shortcut, key);
    }
    out
}

/// Mirror of `expand_shortcuts` for the output side.
fn contract_shortcuts(text: &str, shortcuts: &BTreeMap<String, String>) -> String {
    let mut out = text.to_string();
    for (key, shortcut) in shortcuts {
        if shortcut.contains(key) {
            out = out.replace(shortcut, key);
        }
        out = out.replace(key, shortcut);
    }
    out
}
