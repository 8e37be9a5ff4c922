//! Source metadata and raw roll components entering classification

use serde::{Deserialize, Serialize};

/// One raw rolled damage component, before typing and scaling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollComponent {
    pub value: i64,
    /// Explicit type annotation from the roll; wins over derived tags.
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub formula: String,
}

impl RollComponent {
    pub fn untagged(value: i64) -> Self {
        Self {
            value,
            types: Vec::new(),
            formula: String::new(),
        }
    }

    pub fn typed(value: i64, types: &[&str]) -> Self {
        Self {
            value,
            types: types.iter().map(|t| t.to_string()).collect(),
            formula: String::new(),
        }
    }
}

/// What produced the damage: a weapon swing or an ability/spell effect.
/// Selects the escalation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Weapon,
    Spell,
}

/// Item/ammo/spell metadata accompanying one damage event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageSource {
    pub kind: SourceKind,
    /// Material and alignment tags carried by the weapon.
    #[serde(default)]
    pub weapon_tags: Vec<String>,
    /// Material and alignment tags carried by the ammunition.
    #[serde(default)]
    pub ammo_tags: Vec<String>,
    /// Ranged weapon firing ammunition: ammo tags supersede weapon tags.
    #[serde(default)]
    pub uses_ammo: bool,
    /// The action's raw enhancement bonus.
    #[serde(default)]
    pub enhancement_bonus: i32,
    /// Explicit enhancement on the ammunition, wins over everything.
    #[serde(default)]
    pub ammo_enhancement: Option<i32>,
    /// Registry-flagged ability-damage type id declared by the effect.
    #[serde(default)]
    pub ability_type: Option<String>,
    /// Damage ratio for this application (1.0 full, 0.5 half).
    #[serde(default = "full_ratio")]
    pub ratio: f64,
}

fn full_ratio() -> f64 {
    1.0
}

impl DamageSource {
    pub fn weapon() -> Self {
        Self {
            kind: SourceKind::Weapon,
            weapon_tags: Vec::new(),
            ammo_tags: Vec::new(),
            uses_ammo: false,
            enhancement_bonus: 0,
            ammo_enhancement: None,
            ability_type: None,
            ratio: 1.0,
        }
    }

    pub fn spell() -> Self {
        Self {
            kind: SourceKind::Spell,
            ..Self::weapon()
        }
    }

    /// Tags active on outgoing damage: ammo supersedes weapon when a
    /// ranged weapon fires ammunition.
    pub fn active_item_tags(&self) -> &[String] {
        if self.uses_ammo {
            &self.ammo_tags
        } else {
            &self.weapon_tags
        }
    }
}

impl Default for DamageSource {
    fn default() -> Self {
        Self::weapon()
    }
}
