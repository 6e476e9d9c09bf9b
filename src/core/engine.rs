// File: src/core/engine.rs
use crate::config::{EngineConfig, IconConfig, SynthesisConfig};
use crate::core::corpus::SymbolCorpusIndex;
use crate::core::normalizer::{fold_key, AliasTable};
use crate::core::types::{CoreWordIcon, DetectedTile, Detection, SuggestionEnvelope};
use crate::core::vocabulary::{icon_path, VocabularyMap};
use crate::error::Result;
use crate::matching::TieredMatcher;
use crate::persistence::{load_aliases, load_core_vocabulary, load_vocabulary_map, scan_symbol_directory};

/// Hard ceiling on suggested words for any template.
pub const MAX_SENTENCE_WORDS: usize = 5;

const SUBJECT: &str = "I";
const WANT: &str = "WANT";
const SEE: &str = "SEE";
const NOTHING: &str = "NOTHING";
const AND: &str = "AND";

// Immutable after construction; every query takes `&self`.
pub struct SentenceEngine {
    aliases: AliasTable,
    corpus: SymbolCorpusIndex,
    vocabulary: VocabularyMap,
    core_words: Vec<String>,
    matcher: TieredMatcher,
    icons: IconConfig,
    synthesis: SynthesisConfig,
}

impl SentenceEngine {
    pub fn new(
        config: &EngineConfig,
        aliases: AliasTable,
        corpus: SymbolCorpusIndex,
        vocabulary: VocabularyMap,
        core_words: Vec<String>,
    ) -> Self {
        Self {
            aliases,
            corpus,
            vocabulary,
            core_words,
            matcher: TieredMatcher::for_labels(),
            icons: config.icons.clone(),
            synthesis: config.synthesis.clone(),
        }
    }

    /// Loads every input named by `config`. Only a missing core vocabulary (or
    /// a malformed file) is fatal; a missing symbol directory or map degrades
    /// to fallback icons.
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        let core_words = load_core_vocabulary(&config.core_words_path)?;
        let files = scan_symbol_directory(&config.symbols_dir, config.extension());
        let corpus = SymbolCorpusIndex::build(files, config.extension());
        let vocabulary = load_vocabulary_map(&config.vocabulary_map_path)?;
        let aliases = match &config.aliases_path {
            Some(path) => load_aliases(path)?,
            None => AliasTable::default(),
        };
        tracing::info!(
            symbols = corpus.len(),
            mapped_words = vocabulary.len(),
            core_words = core_words.len(),
            "sentence engine ready"
        );
        Ok(Self::new(config, aliases, corpus, vocabulary, core_words))
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    pub fn corpus(&self) -> &SymbolCorpusIndex {
        &self.corpus
    }

    pub fn vocabulary(&self) -> &VocabularyMap {
        &self.vocabulary
    }

    pub fn core_words(&self) -> &[String] {
        &self.core_words
    }

    pub fn icons(&self) -> &IconConfig {
        &self.icons
    }

    /// The display word for a detector label: the alias-resolved token in
    /// uppercase, or the vocabulary key it corresponds to. `None` for labels
    /// that fold to nothing.
    pub fn canonical_word(&self, label: &str) -> Option<String> {
        let token = self.aliases.normalize(label);
        if token.is_empty() {
            return None;
        }
        let display = token.to_uppercase().replace('_', " ");
        let joined = display.replace(' ', "_");
        let compact: String = display.chars().filter(|c| c.is_alphanumeric()).collect();

        let known = [&display, &joined, &compact]
            .into_iter()
            .find(|key| !key.is_empty() && self.vocabulary.contains(key))
            .cloned();
        Some(known.unwrap_or(display))
    }

    /// Unique display words of the first `max_detections` detections, in order.
    /// Records without a usable label are skipped.
    pub fn detected_words(&self, detections: &[Detection]) -> Vec<String> {
        let mut words: Vec<String> = Vec::new();
        for detection in detections.iter().take(self.synthesis.max_detections) {
            let Some(label) = detection.label() else {
                tracing::debug!("skipping detection without a label");
                continue;
            };
            if let Some(word) = self.canonical_word(label) {
                if !words.contains(&word) {
                    words.push(word);
                }
            }
        }
        words
    }

    pub fn is_food_like(&self, word: &str) -> bool {
        let lower = word.to_lowercase().replace('_', " ");
        self.synthesis
            .food_keywords
            .iter()
            .any(|keyword| !keyword.is_empty() && lower.contains(&keyword.to_lowercase()))
    }

    /// Vocabulary icon for a sentence word; the fallback when unmapped.
    pub fn icon_for(&self, word: &str) -> String {
        self.vocabulary.icon_for(word, &self.icons)
    }

    /// Icon for a detected word: a live corpus match first, then the vocabulary.
    pub fn tile_for(&self, word: &str) -> DetectedTile {
        let icon = match self.matcher.find(&fold_key(word), &self.corpus) {
            Some(hit) => icon_path(&hit.entry.file_name, &self.icons),
            None => self.icon_for(word),
        };
        DetectedTile { word: word.to_string(), icon }
    }

    pub fn suggest(&self, detections: &[Detection]) -> SuggestionEnvelope {
        let detected = self.detected_words(detections);
        let suggested_words = self.compose(&detected);
        let icons = suggested_words.iter().map(|word| self.icon_for(word)).collect();
        let sentence = render_sentence(&suggested_words);
        let detected_tiles = detected.iter().map(|word| self.tile_for(word)).collect();

        SuggestionEnvelope { detected, detected_tiles, suggested_words, icons, sentence }
    }

    /// Every core word with its icon, in vocabulary order.
    pub fn core_word_icons(&self) -> Vec<CoreWordIcon> {
        self.core_words
            .iter()
            .map(|word| CoreWordIcon { word: word.clone(), icon: self.icon_for(word) })
            .collect()
    }

    fn compose(&self, detected: &[String]) -> Vec<String> {
        let Some(primary) = detected.first() else {
            return vec![SUBJECT.into(), SEE.into(), NOTHING.into()];
        };
        let verb = if self.is_food_like(primary) { WANT } else { SEE };
        let mut words = vec![SUBJECT.to_string(), verb.to_string(), primary.clone()];

        if self.synthesis.conjoin_secondary {
            if let Some(secondary) = detected.get(1) {
                words.push(AND.to_string());
                words.push(secondary.clone());
            }
        }
        words.truncate(MAX_SENTENCE_WORDS);
        words
    }
}

/// "I" stays capitalised; everything after it is lowercase prose.
fn render_sentence(words: &[String]) -> String {
    words
        .iter()
        .enumerate()
        .map(|(i, word)| {
            let word = word.replace('_', " ");
            if i == 0 { word } else { word.to_lowercase() }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
