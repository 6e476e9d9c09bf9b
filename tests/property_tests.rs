use aac_core::core::corpus::{word_tokens, SymbolCorpusIndex};
use aac_core::core::normalizer::AliasTable;
use aac_core::core::types::Detection;
use aac_core::core::vocabulary::VocabularyMap;
use aac_core::matching::{Query, Tier, TierKind, TieredMatcher};
use aac_core::{EngineConfig, SentenceEngine};
use proptest::prelude::*;

fn label() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[ a-zA-Z_]{0,16}").unwrap()
}

fn symbol_id() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z]{1,4}(_[a-z]{1,4}){0,2}").unwrap()
}

fn corpus_of(ids: &[String]) -> SymbolCorpusIndex {
    SymbolCorpusIndex::build(ids.iter().map(|id| format!("{id}.svg")), "svg")
}

fn vocabulary_matcher() -> TieredMatcher {
    let config = EngineConfig::default();
    TieredMatcher::for_vocabulary(
        &config.builder.infinitive_suffixes,
        &config.builder.numbered_suffixes,
    )
}

proptest! {
    #[test]
    fn default_aliases_normalize_idempotently(raw in prop_oneof![
        label(),
        Just("Sports Ball".to_string()),
        Just(" cell phone ".to_string()),
        Just("HOT DOG".to_string()),
    ]) {
        let aliases = AliasTable::default();
        let once = aliases.normalize(&raw);
        prop_assert_eq!(aliases.normalize(&once), once);
    }

    // Small alphabets force chains and cycles between the pairs.
    #[test]
    fn custom_aliases_normalize_idempotently(
        pairs in proptest::collection::vec(("[a-c]{1,2}", "[a-c]{1,2}"), 0..8),
        raw in "[a-c]{1,2}",
    ) {
        let aliases = AliasTable::from_pairs(pairs);
        let once = aliases.normalize(&raw);
        prop_assert_eq!(aliases.normalize(&once), once);
    }

    #[test]
    fn exact_identifier_always_wins(
        ids in proptest::collection::vec(symbol_id(), 1..12),
        pick in any::<proptest::sample::Index>(),
    ) {
        let corpus = corpus_of(&ids);
        let target = pick.get(&ids);
        for matcher in [TieredMatcher::for_labels(), vocabulary_matcher()] {
            let hit = matcher.find(target, &corpus).unwrap();
            prop_assert_eq!(hit.tier, TierKind::Exact);
            prop_assert_eq!(&hit.entry.id, target);
        }
    }

    #[test]
    fn token_subset_picks_a_shortest_covering_symbol(
        ids in proptest::collection::vec(symbol_id(), 1..12),
        words in proptest::collection::vec("[a-z]{1,4}", 1..3),
    ) {
        let corpus = corpus_of(&ids);
        let query = Query::new(&words.join(" "));
        if let Some(best) = Tier::TokenSubset.best(&query, &corpus) {
            prop_assert!(query.words.is_subset(&best.entry.tokens));
            let best_len = best.entry.id.chars().count();
            for entry in corpus.iter().filter(|e| query.words.is_subset(&e.tokens)) {
                prop_assert!(entry.id.chars().count() >= best_len);
            }
        } else {
            prop_assert!(corpus.iter().all(|e| !query.words.is_subset(&e.tokens)));
        }
    }

    #[test]
    fn corpus_tokens_are_underscore_free(id in symbol_id()) {
        prop_assert!(word_tokens(&id).iter().all(|t| !t.is_empty() && !t.contains('_')));
    }

    #[test]
    fn envelope_stays_within_bounds(
        names in proptest::collection::vec(prop_oneof![
            label(),
            Just("pizza".to_string()),
            Just("dog".to_string()),
            Just("sports ball".to_string()),
        ], 0..6),
        conjoin in any::<bool>(),
    ) {
        let mut config = EngineConfig::default();
        config.synthesis.conjoin_secondary = conjoin;
        let mut vocabulary = VocabularyMap::new();
        vocabulary.insert("I", "i.svg");
        vocabulary.insert("PIZZA", "pizza.svg");
        let engine = SentenceEngine::new(
            &config,
            AliasTable::default(),
            SymbolCorpusIndex::build(["i.svg", "pizza.svg", "dog.svg", "ball.svg"], "svg"),
            vocabulary,
            vec!["I".to_string()],
        );
        let detections: Vec<Detection> =
            names.iter().map(|name| Detection::new(name, 0.5)).collect();

        let envelope = engine.suggest(&detections);
        prop_assert!((3..=5).contains(&envelope.suggested_words.len()));
        prop_assert_eq!(envelope.icons.len(), envelope.suggested_words.len());
        prop_assert!(envelope.icons.iter().all(|icon| !icon.is_empty()));
        prop_assert!(envelope.detected.len() <= config.synthesis.max_detections);
        prop_assert_eq!(envelope.detected_tiles.len(), envelope.detected.len());
        prop_assert!(envelope.sentence.starts_with("I "));
        if !conjoin {
            prop_assert_eq!(envelope.suggested_words.len(), 3);
        }
    }
}
