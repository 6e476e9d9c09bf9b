// File: src/core/normalizer.rs
use std::collections::{BTreeMap, HashSet};

/// Detector labels that should resolve to a different canonical token.
const DEFAULT_ALIASES: &[(&str, &str)] = &[
    ("sports ball", "ball"),
    ("tennis ball", "ball"),
    ("soccer ball", "ball"),
    ("basketball", "ball"),
    ("baseball", "ball"),
    ("cell phone", "phone"),
    ("mobile phone", "phone"),
    ("teddy bear", "toy"),
    ("hot dog", "hotdog"),
    ("hamburger", "burger"),
    ("bicycle", "bike"),
    ("laptop", "computer"),
    ("dining table", "table"),
    ("potted plant", "plant"),
    ("traffic light", "light"),
    ("stop sign", "sign"),
    ("parking meter", "meter"),
    ("fire hydrant", "hydrant"),
];

/// The single key-folding rule for every table in the engine: trim, then lowercase.
pub fn fold_key(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Maps raw detector labels to canonical lookup tokens.
///
/// Keys and values are folded on the way in, and alias chains are collapsed at
/// construction, so `normalize` is idempotent: a canonical token is never
/// itself an alias for something else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasTable {
    aliases: BTreeMap<String, String>,
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::from_pairs(DEFAULT_ALIASES.iter().map(|&(k, v)| (k.to_string(), v.to_string())))
    }
}

impl AliasTable {
    /// A table with no aliases; `normalize` only folds.
    pub fn empty() -> Self {
        Self { aliases: BTreeMap::new() }
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut raw = BTreeMap::new();
        for (label, token) in pairs {
            let (label, token) = (fold_key(&label), fold_key(&token));
            if label.is_empty() || label == token {
                continue;
            }
            raw.insert(label, token);
        }
        Self { aliases: collapse_chains(raw) }
    }

    /// Returns a copy with `extra` layered over the current entries.
    pub fn merged_with(&self, extra: impl IntoIterator<Item = (String, String)>) -> Self {
        Self::from_pairs(self.aliases.clone().into_iter().chain(extra))
    }

    pub fn normalize(&self, raw_label: &str) -> String {
        let folded = fold_key(raw_label);
        match self.aliases.get(&folded) {
            Some(token) => token.clone(),
            None => folded,
        }
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

/// Follows `a -> b -> c` so every label points straight at its final token.
/// Labels caught in a cycle are dropped.
fn collapse_chains(raw: BTreeMap<String, String>) -> BTreeMap<String, String> {
    let mut collapsed = BTreeMap::new();
    'labels: for (label, first) in &raw {
        let mut seen: HashSet<&str> = HashSet::from([label.as_str()]);
        let mut token = first;
        while let Some(next) = raw.get(token) {
            if !seen.insert(token.as_str()) {
                tracing::warn!(label = %label, "alias cycle; dropping alias");
                continue 'labels;
            }
            token = next;
        }
        collapsed.insert(label.clone(), token.clone());
    }
    collapsed
}
