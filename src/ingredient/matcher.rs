use crate::reference::nutrients::{NutrientProfile, NutritionTable};
use serde::Serialize;

/// Words must be longer than this many characters to take part in the
/// word tier.
pub const DEFAULT_MIN_WORD_LENGTH: usize = 3;

/// Matching strategies, in the order they are attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    /// Name equals a table key.
    Exact,
    /// Name contains a key, or a key contains the name.
    Substring,
    /// A long enough word of the name occurs inside a key.
    Word,
}

impl MatchTier {
    pub const PRIORITY: [MatchTier; 3] = [MatchTier::Exact, MatchTier::Substring, MatchTier::Word];

    pub fn label(self) -> &'static str {
        match self {
            MatchTier::Exact => "exact",
            MatchTier::Substring => "substring",
            MatchTier::Word => "word",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MatchResult {
    Found {
        canonical_name: String,
        profile: NutrientProfile,
        tier: MatchTier,
    },
    NotFound,
}

impl MatchResult {
    pub fn is_found(&self) -> bool {
        matches!(self, MatchResult::Found { .. })
    }

    pub fn canonical_name(&self) -> Option<&str> {
        match self {
            MatchResult::Found { canonical_name, .. } => Some(canonical_name),
            MatchResult::NotFound => None,
        }
    }

    pub fn profile(&self) -> Option<&NutrientProfile> {
        match self {
            MatchResult::Found { profile, .. } => Some(profile),
            MatchResult::NotFound => None,
        }
    }
}

/// Greedy, order-sensitive lookup of normalized names in a nutrition table.
///
/// Tiers run exact, substring, word; the first hit wins and table order
/// breaks ties. This is a heuristic, not a best-match search: a name can
/// resolve to an earlier, less specific key.
#[derive(Debug, Clone, Copy)]
pub struct IngredientMatcher<'a> {
    table: &'a NutritionTable,
    min_word_length: usize,
}

impl<'a> IngredientMatcher<'a> {
    pub fn new(table: &'a NutritionTable) -> Self {
        Self {
            table,
            min_word_length: DEFAULT_MIN_WORD_LENGTH,
        }
    }

    pub fn with_min_word_length(table: &'a NutritionTable, min_word_length: usize) -> Self {
        Self {
            table,
            min_word_length,
        }
    }

    pub fn find(&self, normalized_name: &str) -> MatchResult {
        // An empty name is contained in every key; it must not match.
        if normalized_name.is_empty() {
            return MatchResult::NotFound;
        }

        let hit = MatchTier::PRIORITY
            .iter()
            .find_map(|&tier| self.try_tier(tier, normalized_name).map(|key| (tier, key)));

        match hit {
            Some((tier, key)) => {
                tracing::debug!(name = normalized_name, key, tier = tier.label(), "matched ingredient");
                let profile = self.table.get(key).copied().unwrap_or_default();
                MatchResult::Found {
                    canonical_name: key.to_string(),
                    profile,
                    tier,
                }
            }
            None => {
                tracing::debug!(name = normalized_name, "no ingredient match");
                MatchResult::NotFound
            }
        }
    }

    /// Key selected by a single tier, if any.
    pub fn try_tier(&self, tier: MatchTier, name: &str) -> Option<&'a str> {
        let table = self.table;
        match tier {
            MatchTier::Exact => table.position(name).map(|i| table.entries()[i].name.as_str()),
            MatchTier::Substring => table
                .iter()
                .map(|(key, _)| key)
                .find(|key| name.contains(key) || key.contains(name)),
            MatchTier::Word => name
                .split_whitespace()
                .filter(|word| word.chars().count() > self.min_word_length)
                .find_map(|word| table.iter().map(|(key, _)| key).find(|key| key.contains(word))),
        }
    }
}

/// Free-function form of [`IngredientMatcher::find`] with the default word
/// length.
pub fn match_ingredient(normalized_name: &str, table: &NutritionTable) -> MatchResult {
    IngredientMatcher::new(table).find(normalized_name)
}
