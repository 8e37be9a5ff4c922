//! Shared resistance/reduction applicator and remainder redistribution
//!
//! Exactly one qualifying entry is applied per category: the
//! highest-amount one, against the highest-value instance it qualifies
//! for. Overflow beyond that instance's remaining value moves to the
//! first sibling with an identical tag set, or is discarded.

use crate::bypass::{DefenseCategory, ResolvedBypass};
use crate::core::types::{DamageInstance, TagSet, TypeTag};
use crate::mitigation::entries::MitigationEntry;
use crate::registry::TypeRegistry;

/// Apply one category (resistance or reduction) over the instance list.
pub fn apply_category(
    instances: &mut [DamageInstance],
    entries: &[MitigationEntry],
    bypass: &ResolvedBypass,
    category: DefenseCategory,
    escalated: &TagSet,
    registry: &TypeRegistry,
) {
    if instances.is_empty() || entries.is_empty() {
        return;
    }

    // Eligible instances, highest current value first (stable).
    let mut order: Vec<usize> = (0..instances.len())
        .filter(|&i| instances[i].value > 0 && eligible(&instances[i], category, escalated, registry))
        .collect();
    order.sort_by(|&a, &b| instances[b].value.cmp(&instances[a].value));
    if order.is_empty() {
        return;
    }

    // Highest-amount qualifying entry, first configured on ties; entries
    // whose every tag is covered by bypass are already defeated.
    let mut best: Option<(usize, usize, i64)> = None;
    for (e_idx, entry) in entries.iter().enumerate() {
        if entry.tags.iter().all(|t| bypass.covers(t)) {
            continue;
        }
        if let Some(&idx) = order.iter().find(|&&i| qualifies(entry, &instances[i], bypass)) {
            if best.map_or(true, |(_, _, amount)| entry.amount > amount) {
                best = Some((e_idx, idx, entry.amount));
            }
        }
    }

    let Some((entry_idx, inst_idx, _)) = best else {
        return;
    };
    let amount = entries[entry_idx].amount;
    tracing::debug!(
        category = category.name(),
        amount,
        "applying mitigation entry"
    );

    instances[inst_idx].value -= amount;
    if instances[inst_idx].value < 0 {
        let remainder = instances[inst_idx].value;
        instances[inst_idx].value = 0;
        redistribute_remainder(instances, inst_idx, remainder);
    }
}

/// Reduction only touches instances whose tags all fall inside the
/// recognized physical-damage universe (or the escalated set);
/// resistance has no such restriction.
fn eligible(
    instance: &DamageInstance,
    category: DefenseCategory,
    escalated: &TagSet,
    registry: &TypeRegistry,
) -> bool {
    match category {
        DefenseCategory::Reduction => instance
            .tags
            .iter()
            .all(|tag| registry.in_physical_universe(tag) || escalated.contains(tag)),
        _ => true,
    }
}

/// The `-` sentinel counts as present on every instance; a missing
/// match-all tag does not disqualify when the bypass covers it.
fn qualifies(entry: &MitigationEntry, instance: &DamageInstance, bypass: &ResolvedBypass) -> bool {
    if entry.match_all {
        entry
            .tags
            .iter()
            .all(|tag| tag_present(instance, tag) || bypass.covers(tag))
    } else {
        entry.tags.iter().any(|tag| tag_present(instance, tag))
    }
}

fn tag_present(instance: &DamageInstance, tag: &TypeTag) -> bool {
    tag.is_no_type() || instance.tags.contains(tag)
}

/// Move a negative overflow onto the first other instance with an
/// identical tag set, clamping it at zero. No exact match discards the
/// remainder.
pub fn redistribute_remainder(instances: &mut [DamageInstance], from: usize, remainder: i64) {
    if remainder >= 0 {
        return;
    }
    let tags = instances[from].tags.clone();
    for (i, instance) in instances.iter_mut().enumerate() {
        if i == from {
            continue;
        }
        if instance.tags == tags {
            instance.value = (instance.value + remainder).max(0);
            return;
        }
    }
    tracing::debug!("no co-typed sibling, mitigation remainder discarded");
}
