//! Vulnerability stage: amplify matching instances

use crate::core::types::{DamageInstance, TagSet, TypeTag};
use crate::profile::TraitRules;

/// Amplify every instance matching a vulnerability by the configured
/// multiplier, flooring to an integer. No bypass applies to this stage.
pub fn apply_vulnerability(instances: &mut [DamageInstance], rules: &TraitRules, multiplier: f64) {
    if rules.is_empty() || multiplier <= 0.0 {
        return;
    }
    let custom: TagSet = rules.custom.iter().map(|raw| TypeTag::new(raw)).collect();

    for instance in instances.iter_mut() {
        if instance.value == 0 {
            continue;
        }
        let vulnerable = instance
            .tags
            .iter()
            .any(|tag| rules.standard.contains(tag) || custom.contains(tag));
        if vulnerable {
            instance.value = ((instance.value as f64) * multiplier).floor() as i64;
            instance.clamp_value();
        }
    }
}
