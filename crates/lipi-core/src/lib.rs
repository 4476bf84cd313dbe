//! Table-driven transliteration between Indic and romanized writing
//! systems.
//!
//! Schemes are cross-referenced through canonical Devanagari keys, so
//! any registered pair can be transliterated: a greedy longest-match
//! scanner handles Roman sources, a character-level scanner handles
//! Brahmic sources, and both share one derived lookup map per (from,
//! to, options) triple.
//!
//! ```
//! use lipi_core::Transliterator;
//!
//! let engine = Transliterator::with_bundled_schemes();
//! assert_eq!(engine.transliterate("namaste", "iast", "devanagari"), "नमस्ते");
//! ```

mod brahmic;
pub mod map;
mod reorder;
mod roman;
pub mod scheme;
pub mod translit;

pub use map::TransMap;
pub use scheme::loader::{parse_scheme_toml, SchemeError};
pub use scheme::{Group, Scheme, SchemeStore};
pub use translit::{Options, Transliterator};
