use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Nutrient values per 100 g of an ingredient (or, once scaled, for a
/// given mass).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutrientProfile {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
}

impl NutrientProfile {
    pub fn new(calories: f64, protein: f64, carbs: f64, fat: f64, fiber: f64) -> Self {
        Self {
            calories,
            protein,
            carbs,
            fat,
            fiber,
        }
    }

    /// Apply `f` to every field.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            calories: f(self.calories),
            protein: f(self.protein),
            carbs: f(self.carbs),
            fat: f(self.fat),
            fiber: f(self.fiber),
        }
    }

    pub fn fields(&self) -> [(&'static str, f64); 5] {
        [
            ("calories", self.calories),
            ("protein", self.protein),
            ("carbs", self.carbs),
            ("fat", self.fat),
            ("fiber", self.fiber),
        ]
    }
}

impl std::ops::Add for NutrientProfile {
    type Output = NutrientProfile;

    fn add(self, other: NutrientProfile) -> NutrientProfile {
        NutrientProfile {
            calories: self.calories + other.calories,
            protein: self.protein + other.protein,
            carbs: self.carbs + other.carbs,
            fat: self.fat + other.fat,
            fiber: self.fiber + other.fiber,
        }
    }
}

/// One row of the nutrition table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutritionEntry {
    pub name: String,
    #[serde(flatten)]
    pub profile: NutrientProfile,
}

/// Canonical ingredient name -> per-100 g profile.
///
/// The table is ordered. Enumeration order is the position an entry was
/// inserted at (the array order of the source file) and it is the
/// tie-break for the substring and word matching tiers: when several keys
/// could match, the earliest one wins.
#[derive(Debug, Clone, Default)]
pub struct NutritionTable {
    entries: Vec<NutritionEntry>,
    index: HashMap<String, usize>,
}

impl NutritionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, NutrientProfile)>,
        K: AsRef<str>,
    {
        let mut table = Self::new();
        for (name, profile) in entries {
            table.push(name.as_ref(), profile);
        }
        table
    }

    /// Append an entry at the end of the enumeration order. Names are
    /// lower-cased. Returns `false` and keeps the existing entry when the
    /// name is already present.
    pub fn push(&mut self, name: &str, profile: NutrientProfile) -> bool {
        let key = name.trim().to_lowercase();
        if self.index.contains_key(&key) {
            return false;
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push(NutritionEntry { name: key, profile });
        true
    }

    pub fn get(&self, name: &str) -> Option<&NutrientProfile> {
        self.index.get(name).map(|&i| &self.entries[i].profile)
    }

    /// Keys with their profiles, in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &NutrientProfile)> {
        self.entries.iter().map(|e| (e.name.as_str(), &e.profile))
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn entries(&self) -> &[NutritionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
