//! Type classification: raw roll components to damage instances
//!
//! An explicit annotation on a component wins. Otherwise tags are the
//! union of the declared ability-damage type and the active item tags
//! (ammo superseding weapon), with `untyped` as the fallback. Values are
//! ratio-scaled, floored and clamped; instances are sorted by descending
//! value for the later greedy stages, ties keeping original order.

use crate::classify::source::{DamageSource, RollComponent};
use crate::core::types::{DamageInstance, TagSet, TypeTag};
use crate::registry::TypeRegistry;

pub fn classify(
    components: &[RollComponent],
    source: &DamageSource,
    registry: &TypeRegistry,
) -> Vec<DamageInstance> {
    let mut instances: Vec<DamageInstance> = components
        .iter()
        .map(|component| classify_component(component, source, registry))
        .collect();

    // Stable: equal values keep the roll's original order.
    instances.sort_by(|a, b| b.value.cmp(&a.value));
    instances
}

fn classify_component(
    component: &RollComponent,
    source: &DamageSource,
    registry: &TypeRegistry,
) -> DamageInstance {
    let tags = if component.types.is_empty() {
        derived_tags(source, registry)
    } else {
        component
            .types
            .iter()
            .map(|raw| registry.resolve(raw))
            .collect()
    };

    let mut instance = DamageInstance::new(tags, scale_value(component.value, source.ratio));
    instance.formula = component.formula.clone();
    instance
}

fn derived_tags(source: &DamageSource, registry: &TypeRegistry) -> TagSet {
    let mut tags = TagSet::default();
    if let Some(ability_type) = &source.ability_type {
        tags.insert(registry.resolve(ability_type));
    }
    for raw in source.active_item_tags() {
        tags.insert(registry.resolve(raw));
    }
    if tags.is_empty() {
        tags.insert(TypeTag::untyped());
    }
    tags
}

fn scale_value(value: i64, ratio: f64) -> i64 {
    ((value.max(0) as f64) * ratio).floor() as i64
}
