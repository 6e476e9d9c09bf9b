// File: src/matching/matcher.rs
use crate::core::corpus::{SymbolCorpusIndex, SymbolEntry};
use crate::core::normalizer::AliasTable;
use crate::matching::tiers::{Query, Tier, TierKind};

/// Which tier answered, and with which symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierMatch<'c> {
    pub tier: TierKind,
    pub entry: &'c SymbolEntry,
}

/// An ordered list of tiers. The first tier with any candidate wins outright;
/// later tiers are never consulted once an earlier one has answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TieredMatcher {
    tiers: Vec<Tier>,
    /// One-letter tokens only go through tiers that accept them.
    restrict_single_letters: bool,
}

impl TieredMatcher {
    pub fn new(tiers: Vec<Tier>, restrict_single_letters: bool) -> Self {
        Self { tiers, restrict_single_letters }
    }

    /// exact, underscore, token-subset, substring.
    pub fn for_labels() -> Self {
        Self::new(
            vec![Tier::Exact, Tier::UnderscoreJoined, Tier::TokenSubset, Tier::Substring],
            false,
        )
    }

    /// The label sequence with the action-word suffix tiers slotted in after
    /// the underscore tier, and with one-letter words kept out of the loose tiers.
    pub fn for_vocabulary(infinitive_suffixes: &[String], numbered_suffixes: &[String]) -> Self {
        Self::new(
            vec![
                Tier::Exact,
                Tier::UnderscoreJoined,
                Tier::InfinitiveMarker(infinitive_suffixes.to_vec()),
                Tier::NumberedVariant(numbered_suffixes.to_vec()),
                Tier::TokenSubset,
                Tier::Substring,
            ],
            true,
        )
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    /// Matches an already normalized token.
    pub fn find<'c>(&self, token: &str, corpus: &'c SymbolCorpusIndex) -> Option<TierMatch<'c>> {
        let query = Query::new(token);
        let single_letter = self.restrict_single_letters && query.is_single_letter();

        self.tiers
            .iter()
            .filter(|tier| !single_letter || tier.kind().accepts_single_letter())
            .find_map(|tier| {
                tier.best(&query, corpus).map(|candidate| {
                    tracing::debug!(token, tier = %tier.kind(), symbol = %candidate.entry.id, "tier hit");
                    TierMatch { tier: tier.kind(), entry: candidate.entry }
                })
            })
    }

    /// Normalizes a raw detector label through `aliases`, then matches it.
    pub fn match_label<'c>(
        &self,
        label: &str,
        aliases: &AliasTable,
        corpus: &'c SymbolCorpusIndex,
    ) -> Option<TierMatch<'c>> {
        self.find(&aliases.normalize(label), corpus)
    }
}
