//! Priority escalation: potency-driven auto-bypass
//!
//! Weapon attacks rank by effective enhancement bonus; ability and spell
//! effects rank by the highest priority-ladder segment containing a tag
//! present on the damage. A positive rank flattens every segment at or
//! below it into an auxiliary bypass set.

use crate::classify::source::{DamageSource, SourceKind};
use crate::core::constants::EPIC_BONUS_FLOOR;
use crate::core::types::{TagSet, TypeTag};
use crate::registry::PriorityLadder;

/// Escalation result consumed by the mitigation pipeline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Escalation {
    pub rank: i32,
    pub types: TagSet,
}

impl Escalation {
    pub fn is_active(&self) -> bool {
        !self.types.is_empty()
    }
}

/// Effective enhancement rank of a weapon attack.
///
/// Ammunition's explicit enhancement wins outright. A `magic` material
/// tag floors the rank at 1; an `epic` tag counts only when the raw
/// bonus is already at the epic floor, clamping the rank to it.
pub fn weapon_rank(source: &DamageSource) -> i32 {
    if let Some(ammo) = source.ammo_enhancement {
        return ammo.max(0);
    }

    let tags: TagSet = source
        .active_item_tags()
        .iter()
        .map(|raw| TypeTag::new(raw))
        .collect();
    let raw = source.enhancement_bonus.max(0);
    let mut rank = raw;

    if tags.contains(&TypeTag::new("epic")) && raw >= EPIC_BONUS_FLOOR {
        rank = rank.max(EPIC_BONUS_FLOOR);
    }
    if tags.contains(&TypeTag::new("magic")) {
        rank = rank.max(1);
    }
    rank
}

/// Compute the escalation for one damage event.
pub fn escalate(source: &DamageSource, ladder: &PriorityLadder, damage_tags: &TagSet) -> Escalation {
    let rank = match source.kind {
        SourceKind::Weapon => weapon_rank(source),
        SourceKind::Spell => ladder.rank_for_tags(damage_tags),
    };

    let types = if rank > 0 {
        ladder.flatten_through(rank)
    } else {
        TagSet::default()
    };

    Escalation { rank, types }
}
