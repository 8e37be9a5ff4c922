//! Immunity stage: zero out instances matching an unbypassed immunity

use crate::bypass::ResolvedBypass;
use crate::core::types::{DamageInstance, TagSet, TypeTag};
use crate::profile::TraitRules;

/// Zero every instance with an immune tag, unless the resolved bypass
/// covers that tag (or everything).
pub fn apply_immunity(instances: &mut [DamageInstance], rules: &TraitRules, bypass: &ResolvedBypass) {
    if rules.is_empty() {
        return;
    }
    let custom: TagSet = rules.custom.iter().map(|raw| TypeTag::new(raw)).collect();

    for instance in instances.iter_mut() {
        if instance.value == 0 {
            continue;
        }
        let immune = instance
            .tags
            .iter()
            .any(|tag| (rules.standard.contains(tag) || custom.contains(tag)) && !bypass.covers(tag));
        if immune {
            tracing::debug!(tags = ?instance.tags, "instance nullified by immunity");
            instance.value = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::tag_set;

    fn instance(tags: &[&str], value: i64) -> DamageInstance {
        DamageInstance::new(tag_set(tags), value)
    }

    #[test]
    fn test_standard_immunity_zeroes() {
        let mut instances = vec![instance(&["fire"], 20), instance(&["cold"], 10)];
        let rules = TraitRules::of(tag_set(&["fire"]));
        apply_immunity(&mut instances, &rules, &ResolvedBypass::default());
        assert_eq!(instances[0].value, 0);
        assert_eq!(instances[1].value, 10);
    }

    #[test]
    fn test_custom_immunity_matches_as_tag() {
        let mut instances = vec![instance(&["hellfire"], 12)];
        let rules = TraitRules::default().with_custom(&["Hellfire"]);
        apply_immunity(&mut instances, &rules, &ResolvedBypass::default());
        assert_eq!(instances[0].value, 0);
    }

    #[test]
    fn test_bypassed_tag_survives() {
        let mut instances = vec![instance(&["fire"], 20)];
        let rules = TraitRules::of(tag_set(&["fire"]));
        let bypass = ResolvedBypass {
            all: false,
            types: tag_set(&["fire"]),
            ignore_amount: 0,
        };
        apply_immunity(&mut instances, &rules, &bypass);
        assert_eq!(instances[0].value, 20);
    }

    #[test]
    fn test_wildcard_bypass_disables_immunity() {
        let mut instances = vec![instance(&["fire"], 20)];
        let rules = TraitRules::of(tag_set(&["fire"]));
        let bypass = ResolvedBypass {
            all: true,
            types: TagSet::default(),
            ignore_amount: 0,
        };
        apply_immunity(&mut instances, &rules, &bypass);
        assert_eq!(instances[0].value, 20);
    }

    #[test]
    fn test_mixed_tags_one_immune_suffices() {
        // A fire/slashing hybrid is still shut down by fire immunity.
        let mut instances = vec![instance(&["fire", "slashing"], 15)];
        let rules = TraitRules::of(tag_set(&["fire"]));
        apply_immunity(&mut instances, &rules, &ResolvedBypass::default());
        assert_eq!(instances[0].value, 0);
    }
}
