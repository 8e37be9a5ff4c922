//! Core type definitions used throughout the engine

use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Sentinel id for damage that carries no type at all.
pub const UNTYPED: &str = "untyped";

/// Sentinel id for "no listed type" (the `DR 10/—` style entry).
/// Matched as a literal tag by the bypass machinery.
pub const NO_TYPE: &str = "-";

/// Wildcard id accepted in bypass type lists.
pub const ALL_TYPES: &str = "all";

/// A damage type tag: physical, energy, alignment, material, ability-track
/// or the `untyped` sentinel. Open vocabulary, always stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeTag(String);

impl TypeTag {
    /// Normalize a raw identifier into a tag (trimmed, lowercased).
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn untyped() -> Self {
        Self(UNTYPED.to_string())
    }

    pub fn no_type() -> Self {
        Self(NO_TYPE.to_string())
    }

    pub fn is_untyped(&self) -> bool {
        self.0 == UNTYPED
    }

    pub fn is_no_type(&self) -> bool {
        self.0 == NO_TYPE
    }

    pub fn is_wildcard(&self) -> bool {
        self.0 == ALL_TYPES
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeTag {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// Set of type tags carried by one damage instance or one rule entry.
pub type TagSet = AHashSet<TypeTag>;

/// Build a tag set from raw identifiers (normalizing each).
pub fn tag_set(raw: &[&str]) -> TagSet {
    raw.iter().map(|r| TypeTag::new(r)).collect()
}

/// One typed, valued component of a damage event.
///
/// Values are coerced to non-negative integers between pipeline stages;
/// the formula string is informational only (roll provenance).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageInstance {
    pub tags: TagSet,
    pub value: i64,
    #[serde(default)]
    pub formula: String,
}

impl DamageInstance {
    pub fn new(tags: TagSet, value: i64) -> Self {
        Self {
            tags,
            value: value.max(0),
            formula: String::new(),
        }
    }

    /// Clamp the value back to the non-negative range.
    pub fn clamp_value(&mut self) {
        if self.value < 0 {
            self.value = 0;
        }
    }

    pub fn has_tag(&self, tag: &TypeTag) -> bool {
        self.tags.contains(tag)
    }
}

/// The six ability scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ability {
    Str,
    Dex,
    Con,
    Int,
    Wis,
    Cha,
}

impl Ability {
    pub const ALL: [Ability; 6] = [
        Ability::Str,
        Ability::Dex,
        Ability::Con,
        Ability::Int,
        Ability::Wis,
        Ability::Cha,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Ability::Str => "str",
            Ability::Dex => "dex",
            Ability::Con => "con",
            Ability::Int => "int",
            Ability::Wis => "wis",
            Ability::Cha => "cha",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Ability::Str => "strength",
            Ability::Dex => "dexterity",
            Ability::Con => "constitution",
            Ability::Int => "intelligence",
            Ability::Wis => "wisdom",
            Ability::Cha => "charisma",
        }
    }

    /// Str/Dex/Con.
    pub fn is_physical(self) -> bool {
        matches!(self, Ability::Str | Ability::Dex | Ability::Con)
    }

    /// Int/Wis/Cha.
    pub fn is_mental(self) -> bool {
        !self.is_physical()
    }

    /// Parse an abbreviation or full name, case-insensitive.
    pub fn parse(raw: &str) -> Option<Ability> {
        let lower = raw.trim().to_lowercase();
        Ability::ALL
            .into_iter()
            .find(|a| a.key() == lower || a.name() == lower)
    }
}

/// Which ability-score counter a redirected amount lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbilityKind {
    Damage,
    Drain,
    Penalty,
}

impl AbilityKind {
    pub const ALL: [AbilityKind; 3] =
        [AbilityKind::Damage, AbilityKind::Drain, AbilityKind::Penalty];

    pub fn key(self) -> &'static str {
        match self {
            AbilityKind::Damage => "damage",
            AbilityKind::Drain => "drain",
            AbilityKind::Penalty => "penalty",
        }
    }

    pub fn parse(raw: &str) -> Option<AbilityKind> {
        match raw.trim().to_lowercase().as_str() {
            "damage" => Some(AbilityKind::Damage),
            "drain" => Some(AbilityKind::Drain),
            "penalty" | "penalties" => Some(AbilityKind::Penalty),
            _ => None,
        }
    }
}

/// One accumulated ability-track delta, always non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityDeltaEntry {
    pub ability: Ability,
    pub kind: AbilityKind,
    pub amount: i64,
}

impl AbilityDeltaEntry {
    pub fn new(ability: Ability, kind: AbilityKind, amount: i64) -> Self {
        Self {
            ability,
            kind,
            amount: amount.max(0),
        }
    }
}

/// Unique identifier for resolution targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetId(pub Uuid);

impl TargetId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TargetId {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_normalization() {
        assert_eq!(TypeTag::new("  Cold-Iron "), TypeTag::new("cold-iron"));
        assert_eq!(TypeTag::new("FIRE").as_str(), "fire");
    }

    #[test]
    fn test_tag_sentinels() {
        assert!(TypeTag::untyped().is_untyped());
        assert!(TypeTag::no_type().is_no_type());
        assert!(TypeTag::new("ALL").is_wildcard());
        assert!(!TypeTag::new("fire").is_wildcard());
    }

    #[test]
    fn test_tag_set_equality() {
        let a = tag_set(&["slashing", "silver"]);
        let b = tag_set(&["Silver", "SLASHING"]);
        assert_eq!(a, b);
        let c = tag_set(&["slashing"]);
        assert_ne!(a, c);
    }

    #[test]
    fn test_instance_never_constructed_negative() {
        let inst = DamageInstance::new(tag_set(&["fire"]), -4);
        assert_eq!(inst.value, 0);
    }

    #[test]
    fn test_ability_groups() {
        assert!(Ability::Str.is_physical());
        assert!(Ability::Con.is_physical());
        assert!(Ability::Wis.is_mental());
        assert!(!Ability::Cha.is_physical());
    }

    #[test]
    fn test_ability_parse() {
        assert_eq!(Ability::parse("STR"), Some(Ability::Str));
        assert_eq!(Ability::parse("wisdom"), Some(Ability::Wis));
        assert_eq!(Ability::parse("luck"), None);
    }

    #[test]
    fn test_ability_kind_parse() {
        assert_eq!(AbilityKind::parse("Drain"), Some(AbilityKind::Drain));
        assert_eq!(AbilityKind::parse("penalties"), Some(AbilityKind::Penalty));
        assert_eq!(AbilityKind::parse("heal"), None);
    }

    #[test]
    fn test_delta_entry_clamps() {
        let e = AbilityDeltaEntry::new(Ability::Str, AbilityKind::Drain, -3);
        assert_eq!(e.amount, 0);
    }
}
