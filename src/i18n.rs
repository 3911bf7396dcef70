//! Label translation seam.
//!
//! The host application usually owns a locale table; the timeline only needs
//! `resolve(key)` for twelve month names and the "all dates" label. When no
//! provider is wired up, keys fall back to a deterministic capitalized form
//! ("all-dates" -> "All Dates"), so labels stay readable.

use std::collections::HashMap;

/// Label key for the unfiltered state.
pub const KEY_ALL_DATES: &str = "all-dates";

/// Canonical month keys, index 0 = January.
pub const MONTH_KEYS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Key for a calendar month (1..=12); out-of-range months get no key.
pub fn month_key(month: u32) -> Option<&'static str> {
    MONTH_KEYS.get(month.checked_sub(1)? as usize).copied()
}

/// Locale lookup capability.
pub trait Translator {
    /// Resolve a canonical key to a display string in the active locale.
    fn resolve(&self, key: &str) -> Option<String>;
}

/// Translator with no locale data; every lookup falls back.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTranslator;

impl Translator for NoTranslator {
    fn resolve(&self, _key: &str) -> Option<String> {
        None
    }
}

/// Static key->string table, the shape the original UI ships per locale.
#[derive(Debug, Clone, Default)]
pub struct TableTranslator {
    table: HashMap<String, String>,
}

impl TableTranslator {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            table: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Load a locale table from its JSON form (`{"key": "string", ...}`).
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self {
            table: serde_json::from_str(json)?,
        })
    }
}

impl Translator for TableTranslator {
    fn resolve(&self, key: &str) -> Option<String> {
        self.table.get(key).cloned()
    }
}

/// Resolve a key, falling back to the capitalized key when the provider has
/// no entry for it.
pub fn display(translator: &dyn Translator, key: &str) -> String {
    translator.resolve(key).unwrap_or_else(|| fallback(key))
}

// "all-dates" -> "All Dates", "january" -> "January"
fn fallback(key: &str) -> String {
    key.split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
