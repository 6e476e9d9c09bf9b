// File: src/core/corpus.rs
use crate::core::normalizer::fold_key;
use crate::core::types::SymbolId;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

/// Runs of letters and digits. Underscores and punctuation are boundaries, so
/// `eat_1_,_to` yields {eat, 1, to}.
static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\W_]+").expect("static regex"));

/// Case-folded word set of a label or identifier.
pub fn word_tokens(text: &str) -> BTreeSet<String> {
    WORD.find_iter(&text.to_lowercase())
        .map(|m| m.as_str().to_string())
        .collect()
}

/// One available symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolEntry {
    pub id: SymbolId,
    /// The file name as found in the backing store, extension included.
    pub file_name: String,
    pub tokens: BTreeSet<String>,
}

/// Immutable index over the symbol set, built once from a listing.
/// Rebuilding means scanning the store again and constructing a new index.
#[derive(Debug, Clone, Default)]
pub struct SymbolCorpusIndex {
    entries: BTreeMap<SymbolId, SymbolEntry>,
    files: BTreeSet<String>,
}

impl SymbolCorpusIndex {
    /// Builds the index from raw file names. The `extension` (without dot) is
    /// stripped case-insensitively when present. When two names fold to the
    /// same identifier, the lexicographically first file name represents it.
    pub fn build<I, S>(file_names: I, extension: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut names: Vec<String> = file_names
            .into_iter()
            .map(|name| name.as_ref().trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();
        names.sort();
        names.dedup();

        let mut entries = BTreeMap::new();
        for file_name in &names {
            let id = fold_key(strip_extension(file_name, extension));
            if id.is_empty() || entries.contains_key(&id) {
                continue;
            }
            let tokens = word_tokens(&id);
            entries.insert(
                id.clone(),
                SymbolEntry { id, file_name: file_name.clone(), tokens },
            );
        }

        Self { entries, files: names.into_iter().collect() }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn entry(&self, id: &str) -> Option<&SymbolEntry> {
        self.entries.get(id)
    }

    pub fn tokens(&self, id: &str) -> Option<&BTreeSet<String>> {
        self.entries.get(id).map(|entry| &entry.tokens)
    }

    /// True when a file with exactly this name was part of the listing.
    pub fn contains_file(&self, file_name: &str) -> bool {
        self.files.contains(file_name)
    }

    /// All entries in ascending identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &SymbolEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn strip_extension<'a>(file_name: &'a str, extension: &str) -> &'a str {
    let suffix_len = extension.len() + 1;
    if extension.is_empty() || file_name.len() < suffix_len {
        return file_name;
    }
    let split = file_name.len() - suffix_len;
    match (file_name.get(..split), file_name.get(split..)) {
        (Some(stem), Some(suffix))
            if suffix.starts_with('.') && suffix[1..].eq_ignore_ascii_case(extension) =>
        {
            stem
        }
        _ => file_name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_are_stripped_and_lowercased() {
        let index = SymbolCorpusIndex::build(["Ball.SVG", "want_to.svg", "notes.txt"], "svg");
        assert!(index.contains("ball"));
        assert!(index.contains("want_to"));
        assert!(index.contains("notes.txt"));
        assert_eq!(index.entry("ball").unwrap().file_name, "Ball.SVG");
        assert!(index.contains_file("Ball.SVG"));
        assert!(!index.contains_file("ball.svg"));
    }

    #[test]
    fn tokens_split_on_underscores_and_punctuation() {
        let index = SymbolCorpusIndex::build(["eat_1_,_to.svg", "ice-cream cone.svg"], "svg");
        let expected: BTreeSet<String> = ["eat", "1", "to"].iter().map(|s| s.to_string()).collect();
        assert_eq!(index.tokens("eat_1_,_to"), Some(&expected));
        assert_eq!(index.tokens("ice-cream cone").map(|t| t.len()), Some(3));
    }

    #[test]
    fn case_variants_collapse_to_one_entry() {
        let index = SymbolCorpusIndex::build(["dog.svg", "Dog.svg"], "svg");
        assert_eq!(index.len(), 1);
        assert_eq!(index.entry("dog").unwrap().file_name, "Dog.svg");
        assert!(index.contains_file("dog.svg"));
    }

    #[test]
    fn empty_listing_gives_empty_index() {
        let index = SymbolCorpusIndex::build(Vec::<String>::new(), "svg");
        assert!(index.is_empty());
        assert_eq!(index.iter().count(), 0);
        let bare = SymbolCorpusIndex::build([".svg", "  "], "svg");
        assert!(bare.is_empty());
        assert!(bare.contains_file(".svg"));
    }

    #[test]
    fn enumeration_is_sorted() {
        let index = SymbolCorpusIndex::build(["zebra.svg", "apple.svg", "mango.svg"], "svg");
        let ids: Vec<&str> = index.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["apple", "mango", "zebra"]);
    }
}
