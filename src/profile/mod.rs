//! Defense profile: a target's defensive snapshot at resolution time
//!
//! The profile is read-only during resolution; the ability-score
//! counters are the only state written back, and only by the caller
//! through `apply_ability_delta`.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::{Ability, AbilityDeltaEntry, AbilityKind, TagSet};
use crate::mitigation::entries::MitigationEntry;

/// Standard tag set plus free-text custom rules, shared by immunities
/// and vulnerabilities.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraitRules {
    #[serde(default)]
    pub standard: TagSet,
    #[serde(default)]
    pub custom: Vec<String>,
}

impl TraitRules {
    pub fn of(standard: TagSet) -> Self {
        Self {
            standard,
            custom: Vec::new(),
        }
    }

    pub fn with_custom(mut self, rules: &[&str]) -> Self {
        self.custom = rules.iter().map(|r| r.to_string()).collect();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.standard.is_empty() && self.custom.is_empty()
    }
}

/// Flat damage absorption, primarily for objects and constructs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hardness {
    pub value: i64,
}

/// Accumulated ability-track counters; monotonic, never negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScoreState {
    pub damage: i64,
    pub drain: i64,
    pub user_penalty: i64,
}

/// A target's defensive profile snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefenseProfile {
    #[serde(default)]
    pub immunities: TraitRules,
    #[serde(default)]
    pub vulnerabilities: TraitRules,
    /// Structured energy-resistance entries.
    #[serde(default)]
    pub resistance_entries: Vec<MitigationEntry>,
    /// Free-text energy-resistance rules.
    #[serde(default)]
    pub resistance_custom: Vec<String>,
    /// Structured physical damage-reduction entries.
    #[serde(default)]
    pub reduction_entries: Vec<MitigationEntry>,
    /// Free-text damage-reduction rules.
    #[serde(default)]
    pub reduction_custom: Vec<String>,
    #[serde(default)]
    pub hardness: Hardness,
    /// Construct traits nullify the entire ability track.
    #[serde(default)]
    pub construct_traits: bool,
    /// Undead traits nullify drain/penalty and physical-ability damage.
    #[serde(default)]
    pub undead_traits: bool,
    #[serde(default)]
    pub abilities: AHashMap<Ability, AbilityScoreState>,
}

impl DefenseProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ability(&self, ability: Ability) -> AbilityScoreState {
        self.abilities.get(&ability).copied().unwrap_or_default()
    }

    /// Fold one ability delta into the counters. Amounts are clamped so
    /// the running totals stay non-negative and monotonic.
    pub fn apply_ability_delta(&mut self, entry: &AbilityDeltaEntry) {
        let amount = entry.amount.max(0);
        if amount == 0 {
            return;
        }
        let state = self.abilities.entry(entry.ability).or_default();
        match entry.kind {
            AbilityKind::Damage => state.damage += amount,
            AbilityKind::Drain => state.drain += amount,
            AbilityKind::Penalty => state.user_penalty += amount,
        }
    }
}
