//! Ability redirection: fork damage into hit-point and ability tracks
//!
//! Instances whose tags carry an ability-redirect registry flag leave
//! the hit-point track. Their amounts survive type immunity (honoring
//! the immunity bypass), creature-trait nullification, and the parsed
//! phrase rules before accumulating as deltas.

use crate::ability::patterns::AbilityImmunityRule;
use crate::bypass::ResolvedBypass;
use crate::core::types::{Ability, AbilityDeltaEntry, AbilityKind, DamageInstance, TagSet, TypeTag};
use crate::profile::DefenseProfile;
use crate::registry::TypeRegistry;

/// The two disjoint outputs of the fork.
#[derive(Debug, Clone, Default)]
pub struct TrackSplit {
    pub hit_points: Vec<DamageInstance>,
    pub ability: Vec<AbilityDeltaEntry>,
}

pub fn redirect_abilities(
    instances: Vec<DamageInstance>,
    profile: &DefenseProfile,
    immunity_bypass: &ResolvedBypass,
    rules: &[AbilityImmunityRule],
    registry: &TypeRegistry,
) -> TrackSplit {
    let custom_tags: TagSet = profile
        .immunities
        .custom
        .iter()
        .map(|raw| TypeTag::new(raw))
        .collect();

    let mut split = TrackSplit::default();

    for instance in instances {
        // Sorted for a deterministic walk over the hashed tag set.
        let mut redirect_tags: Vec<&TypeTag> = instance
            .tags
            .iter()
            .filter(|tag| registry.redirect(tag).is_some())
            .collect();
        if redirect_tags.is_empty() {
            split.hit_points.push(instance);
            continue;
        }
        redirect_tags.sort();

        let type_immune = instance.tags.iter().any(|tag| {
            (profile.immunities.standard.contains(tag) || custom_tags.contains(tag))
                && !immunity_bypass.covers(tag)
        });
        if type_immune {
            tracing::debug!(tags = ?instance.tags, "ability instance nullified by type immunity");
            continue;
        }

        let redirects: Vec<_> = redirect_tags
            .into_iter()
            .filter_map(|tag| registry.redirect(tag))
            .collect();
        for redirect in redirects {
            for &ability in &redirect.abilities {
                if nullified_by_traits(profile, ability, redirect.kind) {
                    continue;
                }
                if rules.iter().any(|rule| rule.matches(ability, redirect.kind)) {
                    continue;
                }
                if instance.value > 0 {
                    split
                        .ability
                        .push(AbilityDeltaEntry::new(ability, redirect.kind, instance.value));
                }
            }
        }
    }

    split
}

/// Construct traits nullify everything; undead traits nullify drain and
/// penalty outright, and damage against physical abilities only.
fn nullified_by_traits(profile: &DefenseProfile, ability: Ability, kind: AbilityKind) -> bool {
    if profile.construct_traits {
        return true;
    }
    if profile.undead_traits {
        return match kind {
            AbilityKind::Damage => ability.is_physical(),
            AbilityKind::Drain | AbilityKind::Penalty => true,
        };
    }
    false
}
