//! Hardness stage: flat absorption before resistance and reduction
//!
//! Greedy single pass in descending-value order, no remainder
//! redistribution. A hard material on the incoming damage disables the
//! stage entirely when the hardness is at or below the material ceiling.

use crate::bypass::ResolvedBypass;
use crate::core::constants::HARD_MATERIAL_HARDNESS_CEILING;
use crate::core::types::DamageInstance;
use crate::profile::Hardness;
use crate::registry::TypeRegistry;

pub fn apply_hardness(
    instances: &mut [DamageInstance],
    hardness: Hardness,
    bypass: &ResolvedBypass,
    registry: &TypeRegistry,
) {
    if hardness.value <= 0 {
        return;
    }

    // Hardness is not type-keyed: any applicable bypass skips the stage.
    if bypass.all || instances.iter().any(|i| bypass.covers_any(&i.tags)) {
        tracing::debug!("hardness stage bypassed");
        return;
    }

    let hard_material = instances
        .iter()
        .flat_map(|i| i.tags.iter())
        .any(|tag| registry.is_hard_material(tag));
    if hard_material && hardness.value <= HARD_MATERIAL_HARDNESS_CEILING {
        tracing::debug!(hardness = hardness.value, "hardness disabled by hard material");
        return;
    }

    let mut budget = (hardness.value - bypass.ignore_amount).max(0);
    if budget == 0 {
        return;
    }

    // Stable descending order: ties keep classification order.
    let mut order: Vec<usize> = (0..instances.len()).collect();
    order.sort_by(|&a, &b| instances[b].value.cmp(&instances[a].value));

    for idx in order {
        if budget == 0 {
            break;
        }
        let absorbed = instances[idx].value.min(budget);
        instances[idx].value -= absorbed;
        budget -= absorbed;
    }
}
