// File: src/builder.rs
use crate::config::{BuilderConfig, IconConfig};
use crate::core::corpus::SymbolCorpusIndex;
use crate::core::normalizer::fold_key;
use crate::core::vocabulary::{ManualOverrideMap, VocabularyMap};
use crate::matching::{TierKind, TieredMatcher};
use std::collections::HashSet;

/// How one vocabulary word was resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordOutcome {
    Override { file_name: String },
    Matched { file_name: String, tier: TierKind },
    Unmatched,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordReport {
    pub word: String,
    pub outcome: WordOutcome,
    /// An override that named a file missing from the corpus and was discarded.
    pub rejected_override: Option<String>,
}

/// The built map plus a per-word account of how it came about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub map: VocabularyMap,
    pub words: Vec<WordReport>,
}

impl BuildReport {
    pub fn override_count(&self) -> usize {
        self.count(|o| matches!(o, WordOutcome::Override { .. }))
    }

    pub fn matched_count(&self) -> usize {
        self.count(|o| matches!(o, WordOutcome::Matched { .. }))
    }

    pub fn unmatched(&self) -> impl Iterator<Item = &str> {
        self.words
            .iter()
            .filter(|w| w.outcome == WordOutcome::Unmatched)
            .map(|w| w.word.as_str())
    }

    pub fn rejected_overrides(&self) -> impl Iterator<Item = (&str, &str)> {
        self.words
            .iter()
            .filter_map(|w| w.rejected_override.as_deref().map(|file| (w.word.as_str(), file)))
    }

    fn count(&self, pred: impl Fn(&WordOutcome) -> bool) -> usize {
        self.words.iter().filter(|w| pred(&w.outcome)).count()
    }
}

/// Offline word -> symbol mapping. Pure over its inputs: the same corpus,
/// vocabulary and overrides always give the same map. Reading inputs and
/// writing the result are left to `persistence`.
pub struct VocabularyBuilder {
    matcher: TieredMatcher,
    sentinel_file: String,
}

impl VocabularyBuilder {
    pub fn new(config: &BuilderConfig, icons: &IconConfig) -> Self {
        Self {
            matcher: TieredMatcher::for_vocabulary(
                &config.infinitive_suffixes,
                &config.numbered_suffixes,
            ),
            sentinel_file: icons.sentinel_file.clone(),
        }
    }

    /// Core words are resolved first; verbs and nouns only add words not seen yet.
    /// Words with no symbol are left out of the map.
    pub fn build(
        &self,
        core_vocabulary: &[String],
        extra_verbs: &[String],
        extra_nouns: &[String],
        corpus: &SymbolCorpusIndex,
        overrides: &ManualOverrideMap,
    ) -> BuildReport {
        let mut report = BuildReport::default();
        let mut seen = HashSet::new();

        let words = core_vocabulary.iter().chain(extra_verbs).chain(extra_nouns);
        for raw in words {
            let word = raw.trim().to_uppercase();
            if word.is_empty() || !seen.insert(word.clone()) {
                continue;
            }

            let mut rejected_override = None;
            if let Some(file_name) = overrides.get(&word) {
                if self.override_is_valid(file_name, corpus) {
                    tracing::debug!(word = %word, file = %file_name, "manual override");
                    report.map.insert(&word, file_name);
                    report.words.push(WordReport {
                        word,
                        outcome: WordOutcome::Override { file_name: file_name.to_string() },
                        rejected_override: None,
                    });
                    continue;
                }
                tracing::warn!(
                    word = %word,
                    file = %file_name,
                    "manual override names a missing symbol; trying auto-match"
                );
                rejected_override = Some(file_name.to_string());
            }

            let outcome = match self.matcher.find(&fold_key(&word), corpus) {
                Some(hit) => {
                    tracing::debug!(word = %word, file = %hit.entry.file_name, tier = %hit.tier, "matched");
                    report.map.insert(&word, &hit.entry.file_name);
                    WordOutcome::Matched { file_name: hit.entry.file_name.clone(), tier: hit.tier }
                }
                None => {
                    tracing::debug!(word = %word, "no symbol");
                    WordOutcome::Unmatched
                }
            };
            report.words.push(WordReport { word, outcome, rejected_override });
        }

        tracing::info!(
            words = report.words.len(),
            mapped = report.map.len(),
            overrides = report.override_count(),
            "vocabulary map built"
        );
        report
    }

    /// Overrides may name the sentinel, or a file that really exists.
    fn override_is_valid(&self, file_name: &str, corpus: &SymbolCorpusIndex) -> bool {
        file_name == self.sentinel_file || corpus.contains_file(file_name)
    }
}
