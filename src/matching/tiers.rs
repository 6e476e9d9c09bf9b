// File: src/matching/tiers.rs
use crate::core::corpus::{word_tokens, SymbolCorpusIndex, SymbolEntry};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

/// A folded token prepared for matching, with its derived forms computed once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub token: String,
    /// The token with spaces replaced by underscores.
    pub joined: String,
    pub words: BTreeSet<String>,
}

impl Query {
    pub fn new(token: &str) -> Self {
        Self {
            token: token.to_string(),
            joined: token.replace(' ', "_"),
            words: word_tokens(token),
        }
    }

    /// Exactly one letter or digit, ignoring punctuation.
    pub fn is_single_letter(&self) -> bool {
        self.token.chars().filter(|c| c.is_alphanumeric()).count() == 1
    }
}

/// A symbol proposed by one tier. Candidates order by the tier's own rank,
/// then by identifier length, then lexicographically, so `min()` picks the winner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'c> {
    pub rank: usize,
    pub entry: &'c SymbolEntry,
}

impl Ord for Candidate<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank
            .cmp(&other.rank)
            .then_with(|| self.entry.id.chars().count().cmp(&other.entry.id.chars().count()))
            .then_with(|| self.entry.id.cmp(&other.entry.id))
    }
}

impl PartialOrd for Candidate<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TierKind {
    Exact,
    UnderscoreJoined,
    InfinitiveMarker,
    NumberedVariant,
    TokenSubset,
    Substring,
}

impl TierKind {
    /// Tiers that may still answer for a one-letter word.
    pub fn accepts_single_letter(self) -> bool {
        matches!(self, TierKind::Exact | TierKind::UnderscoreJoined)
    }
}

impl fmt::Display for TierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TierKind::Exact => "exact",
            TierKind::UnderscoreJoined => "underscore",
            TierKind::InfinitiveMarker => "infinitive-marker",
            TierKind::NumberedVariant => "numbered-variant",
            TierKind::TokenSubset => "token-subset",
            TierKind::Substring => "substring",
        };
        f.write_str(name)
    }
}

/// One rule in the matching priority sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tier {
    /// The token is an identifier.
    Exact,
    /// The token with spaces as underscores is an identifier.
    UnderscoreJoined,
    /// The identifier starts with `joined + suffix`; earlier suffixes rank first.
    InfinitiveMarker(Vec<String>),
    /// Same shape as `InfinitiveMarker`, for numbered variants of a symbol.
    NumberedVariant(Vec<String>),
    /// Every word of the token appears among the identifier's tokens.
    TokenSubset,
    /// Either string contains the other; identifiers starting with the token rank first.
    Substring,
}

impl Tier {
    pub fn kind(&self) -> TierKind {
        match self {
            Tier::Exact => TierKind::Exact,
            Tier::UnderscoreJoined => TierKind::UnderscoreJoined,
            Tier::InfinitiveMarker(_) => TierKind::InfinitiveMarker,
            Tier::NumberedVariant(_) => TierKind::NumberedVariant,
            Tier::TokenSubset => TierKind::TokenSubset,
            Tier::Substring => TierKind::Substring,
        }
    }

    /// Every identifier this tier accepts for `query`, unordered.
    pub fn candidates<'c>(&self, query: &Query, corpus: &'c SymbolCorpusIndex) -> Vec<Candidate<'c>> {
        match self {
            Tier::Exact => exact(corpus, &query.token),
            Tier::UnderscoreJoined => exact(corpus, &query.joined),
            Tier::InfinitiveMarker(suffixes) | Tier::NumberedVariant(suffixes) => {
                if query.words.is_empty() {
                    return Vec::new();
                }
                suffixes
                    .iter()
                    .enumerate()
                    .flat_map(move |(rank, suffix)| {
                        let pattern = format!("{}{}", query.joined, suffix);
                        corpus
                            .iter()
                            .filter(move |entry| entry.id.starts_with(&pattern))
                            .map(move |entry| Candidate { rank, entry })
                    })
                    .collect()
            }
            Tier::TokenSubset => {
                if query.words.is_empty() {
                    return Vec::new();
                }
                corpus
                    .iter()
                    .filter(|entry| query.words.is_subset(&entry.tokens))
                    .map(|entry| Candidate { rank: 0, entry })
                    .collect()
            }
            Tier::Substring => {
                if query.words.is_empty() {
                    return Vec::new();
                }
                let token = query.token.as_str();
                corpus
                    .iter()
                    .filter(|entry| entry.id.contains(token) || token.contains(entry.id.as_str()))
                    .map(|entry| Candidate {
                        rank: if entry.id.starts_with(token) { 0 } else { 1 },
                        entry,
                    })
                    .collect()
            }
        }
    }

    /// The winning candidate of this tier alone.
    pub fn best<'c>(&self, query: &Query, corpus: &'c SymbolCorpusIndex) -> Option<Candidate<'c>> {
        self.candidates(query, corpus).into_iter().min()
    }
}

fn exact<'c>(corpus: &'c SymbolCorpusIndex, id: &str) -> Vec<Candidate<'c>> {
    corpus
        .entry(id)
        .map(|entry| Candidate { rank: 0, entry })
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(names: &[&str]) -> SymbolCorpusIndex {
        SymbolCorpusIndex::build(names.iter().map(|n| format!("{n}.svg")), "svg")
    }

    fn ids(candidates: &[Candidate<'_>]) -> BTreeSet<String> {
        candidates.iter().map(|c| c.entry.id.clone()).collect()
    }

    #[test]
    fn token_subset_requires_every_word() {
        let index = corpus(&["sports_ball", "ball_game", "sports", "ballet"]);
        let found = Tier::TokenSubset.candidates(&Query::new("sports ball"), &index);
        assert_eq!(ids(&found), BTreeSet::from(["sports_ball".to_string()]));

        let found = Tier::TokenSubset.candidates(&Query::new("ball"), &index);
        assert_eq!(
            ids(&found),
            BTreeSet::from(["sports_ball".to_string(), "ball_game".to_string()])
        );
    }

    #[test]
    fn equal_length_candidates_break_ties_lexicographically() {
        let index = corpus(&["red_cup", "big_cup", "cup_of_tea"]);
        let best = Tier::TokenSubset.best(&Query::new("cup"), &index).unwrap();
        assert_eq!(best.entry.id, "big_cup");
    }

    #[test]
    fn substring_prefers_prefix_then_length() {
        let index = corpus(&["a_ball", "ballet", "balloon_big"]);
        let best = Tier::Substring.best(&Query::new("ball"), &index).unwrap();
        assert_eq!(best.entry.id, "ballet");

        let index = corpus(&["hot", "hotdog_stand"]);
        let found = Tier::Substring.candidates(&Query::new("hotdog"), &index);
        assert_eq!(found.len(), 2);
        let best = Tier::Substring.best(&Query::new("hotdog"), &index).unwrap();
        assert_eq!(best.entry.id, "hotdog_stand");
    }

    #[test]
    fn wordless_tokens_match_nothing_permissive() {
        let index = corpus(&["ball", "cup"]);
        for token in ["", "  ", "!!"] {
            let query = Query::new(token);
            assert!(Tier::TokenSubset.candidates(&query, &index).is_empty());
            assert!(Tier::Substring.candidates(&query, &index).is_empty());
        }
    }

    #[test]
    fn suffix_tiers_rank_by_suffix_order() {
        let index = corpus(&["go_to_bed", "go_,_to", "go_away"]);
        let tier = Tier::InfinitiveMarker(vec!["_,_to".into(), "_to".into()]);
        let found = tier.candidates(&Query::new("go"), &index);
        assert_eq!(found.len(), 2);
        assert_eq!(tier.best(&Query::new("go"), &index).unwrap().entry.id, "go_,_to");

        let numbered = Tier::NumberedVariant(vec!["_1_,_to".into()]);
        let index = corpus(&["eat_1_,_to", "eat_2_,_to"]);
        assert_eq!(numbered.best(&Query::new("eat"), &index).unwrap().entry.id, "eat_1_,_to");
    }

    #[test]
    fn underscore_tier_joins_spaces() {
        let index = corpus(&["teddy_bear"]);
        assert!(Tier::Exact.best(&Query::new("teddy bear"), &index).is_none());
        let best = Tier::UnderscoreJoined.best(&Query::new("teddy bear"), &index).unwrap();
        assert_eq!(best.entry.id, "teddy_bear");
    }

    #[test]
    fn single_letter_detection_ignores_punctuation() {
        assert!(Query::new("i").is_single_letter());
        assert!(Query::new("a.").is_single_letter());
        assert!(!Query::new("go").is_single_letter());
        assert!(!Query::new("").is_single_letter());
    }
}
