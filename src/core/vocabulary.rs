// File: src/core/vocabulary.rs
use crate::config::IconConfig;
use crate::core::corpus::SymbolCorpusIndex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Word -> symbol file name, as produced by the offline builder.
/// Keys are uppercase words; values are file names with extension.
/// Sorted keys keep the persisted form byte-stable across rebuilds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VocabularyMap {
    entries: BTreeMap<String, String>,
}

impl VocabularyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, word: &str, file_name: &str) -> Option<String> {
        self.entries.insert(word.trim().to_uppercase(), file_name.to_string())
    }

    /// Exact-key lookup.
    pub fn get(&self, word: &str) -> Option<&str> {
        self.entries.get(word).map(String::as_str)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains_key(word)
    }

    /// Uppercase key first, then lowercase (hand-edited maps sometimes carry
    /// lowercase keys).
    pub fn lookup(&self, word: &str) -> Option<&str> {
        self.get(&word.to_uppercase())
            .or_else(|| self.get(&word.to_lowercase()))
    }

    /// The icon reference for `word`; never empty.
    pub fn icon_for(&self, word: &str, icons: &IconConfig) -> String {
        match self.lookup(word) {
            Some(file_name) => icon_path(file_name, icons),
            None => icons.fallback_icon.clone(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(w, f)| (w.as_str(), f.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sorts every entry by whether its file is still present in `corpus`.
    pub fn audit(&self, corpus: &SymbolCorpusIndex, icons: &IconConfig) -> MapAudit {
        let mut audit = MapAudit::default();
        for (word, file_name) in self.iter() {
            let pair = (word.to_string(), file_name.to_string());
            if file_name == icons.sentinel_file {
                audit.sentinel.push(pair);
            } else if corpus.contains_file(file_name) {
                audit.existing.push(pair);
            } else {
                audit.missing.push(pair);
            }
        }
        audit
    }
}

/// Curator-supplied word -> file name pairs, same shape as the built map.
/// Entries are checked against the corpus before the builder accepts them.
pub type ManualOverrideMap = VocabularyMap;

/// Turns a map value into a served path. The sentinel lives outside the symbol prefix.
pub fn icon_path(file_name: &str, icons: &IconConfig) -> String {
    if file_name.is_empty() || file_name == icons.sentinel_file {
        icons.fallback_icon.clone()
    } else {
        format!("{}{}", icons.symbol_prefix, file_name)
    }
}

/// Result of checking a persisted map against the current corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapAudit {
    pub existing: Vec<(String, String)>,
    pub sentinel: Vec<(String, String)>,
    /// Entries whose file has disappeared from the corpus since the build.
    pub missing: Vec<(String, String)>,
}

impl MapAudit {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Core words that have no entry in `map` and will show the fallback icon.
pub fn uncovered_core_words<'a>(core_words: &'a [String], map: &VocabularyMap) -> Vec<&'a str> {
    core_words
        .iter()
        .filter(|word| map.lookup(word).is_none())
        .map(String::as_str)
        .collect()
}
