//! Mitigation pipeline: fixed stage order over the hit-point track
//!
//! Immunity, vulnerability, hardness, resistance, reduction — always in
//! that order. Values are clamped non-negative between stages; the final
//! delta is the sum of what survives.

use crate::bypass::{DefenseCategory, Escalation, OverrideChain};
use crate::core::types::{DamageInstance, TagSet};
use crate::mitigation::applicator::apply_category;
use crate::mitigation::entries::collect_entries;
use crate::mitigation::hardness::apply_hardness;
use crate::mitigation::immunity::apply_immunity;
use crate::mitigation::vulnerability::apply_vulnerability;
use crate::profile::DefenseProfile;
use crate::registry::TypeRegistry;

/// Everything the pipeline needs beyond the profile and instances.
#[derive(Debug)]
pub struct PipelineConfig<'a> {
    pub registry: &'a TypeRegistry,
    pub overrides: &'a OverrideChain,
    pub escalation: &'a Escalation,
    pub vulnerability_multiplier: f64,
}

/// Run all stages, mutating the instance list in place. Returns the
/// summed non-negative hit-point delta.
pub fn run_pipeline(
    instances: &mut [DamageInstance],
    profile: &DefenseProfile,
    config: &PipelineConfig<'_>,
    warnings: &mut Vec<String>,
) -> i64 {
    // Stage 1: immunity
    let immunity_bypass = config.overrides.resolve(DefenseCategory::Immunity);
    apply_immunity(instances, &profile.immunities, &immunity_bypass);
    clamp_all(instances);

    // Stage 2: vulnerability
    apply_vulnerability(
        instances,
        &profile.vulnerabilities,
        config.vulnerability_multiplier,
    );
    clamp_all(instances);

    // Stage 3: hardness
    let hardness_bypass = config.overrides.resolve(DefenseCategory::Hardness);
    apply_hardness(instances, profile.hardness, &hardness_bypass, config.registry);
    clamp_all(instances);

    // Stage 4: energy resistance
    let resistance_entries = collect_entries(
        &profile.resistance_entries,
        &profile.resistance_custom,
        config.registry,
        warnings,
    );
    let resistance_bypass = config.overrides.resolve(DefenseCategory::Resistance);
    apply_category(
        instances,
        &resistance_entries,
        &resistance_bypass,
        DefenseCategory::Resistance,
        &TagSet::default(),
        config.registry,
    );
    clamp_all(instances);

    // Stage 5: physical damage reduction. The escalated set joins the
    // resolved bypass and widens the candidate universe.
    let reduction_entries = collect_entries(
        &profile.reduction_entries,
        &profile.reduction_custom,
        config.registry,
        warnings,
    );
    let reduction_bypass = config
        .overrides
        .resolve(DefenseCategory::Reduction)
        .with_extra(&config.escalation.types);
    apply_category(
        instances,
        &reduction_entries,
        &reduction_bypass,
        DefenseCategory::Reduction,
        &config.escalation.types,
        config.registry,
    );
    clamp_all(instances);

    instances.iter().map(|i| i.value).sum()
}

fn clamp_all(instances: &mut [DamageInstance]) {
    for instance in instances.iter_mut() {
        instance.clamp_value();
    }
}
