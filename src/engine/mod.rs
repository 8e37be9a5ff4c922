//! Resolution entry point and multi-target application glue
//!
//! One `ResolutionContext` is built per damage-application call and
//! treated as immutable for its duration; `resolve` is a pure function
//! of its inputs. Persisting the returned deltas is the caller's job.

use std::panic::{catch_unwind, AssertUnwindSafe};

use serde::{Deserialize, Serialize};

use crate::ability::{parse_rules, redirect_abilities};
use crate::bypass::{escalate, DefenseCategory, OverrideChain};
use crate::classify::{classify, DamageSource, RollComponent};
use crate::core::constants::{MASSIVE_DAMAGE_THRESHOLD, VULNERABILITY_MULTIPLIER};
use crate::core::types::{AbilityDeltaEntry, DamageInstance, TagSet, TargetId};
use crate::mitigation::{run_pipeline, PipelineConfig};
use crate::profile::DefenseProfile;
use crate::registry::{PriorityLadder, TypeRegistry};

/// Per-call tunables; see `core::constants` for the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    pub vulnerability_multiplier: f64,
    pub massive_damage_threshold: i64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            vulnerability_multiplier: VULNERABILITY_MULTIPLIER,
            massive_damage_threshold: MASSIVE_DAMAGE_THRESHOLD,
        }
    }
}

/// Immutable configuration snapshot for one damage-application call.
#[derive(Debug, Clone, Default)]
pub struct ResolutionContext {
    pub registry: TypeRegistry,
    pub ladder: PriorityLadder,
    pub overrides: OverrideChain,
    pub tuning: Tuning,
}

impl ResolutionContext {
    /// Builtin registry, standard ladder, no overrides.
    pub fn standard() -> Self {
        Self {
            registry: TypeRegistry::builtin(),
            ladder: PriorityLadder::standard(),
            overrides: OverrideChain::default(),
            tuning: Tuning::default(),
        }
    }

    pub fn with_overrides(mut self, overrides: OverrideChain) -> Self {
        self.overrides = overrides;
        self
    }
}

/// Everything one resolution produced. `hp_delta` is non-negative; the
/// caller subtracts it from the health pool and persists the ability
/// deltas.
#[derive(Debug, Clone, Default)]
pub struct DamageReport {
    pub hp_delta: i64,
    pub instances: Vec<DamageInstance>,
    pub ability_deltas: Vec<AbilityDeltaEntry>,
    pub escalation_rank: i32,
    pub warnings: Vec<String>,
}

/// Resolve one damage event against one target profile.
pub fn resolve(
    components: &[RollComponent],
    source: &DamageSource,
    profile: &DefenseProfile,
    ctx: &ResolutionContext,
) -> DamageReport {
    let instances = classify(components, source, &ctx.registry);

    let mut damage_tags = TagSet::default();
    for instance in &instances {
        for tag in &instance.tags {
            damage_tags.insert(tag.clone());
        }
    }
    let escalation = escalate(source, &ctx.ladder, &damage_tags);

    let immunity_bypass = ctx.overrides.resolve(DefenseCategory::Immunity);
    let ability_rules = parse_rules(&profile.immunities.custom);
    let mut split = redirect_abilities(
        instances,
        profile,
        &immunity_bypass,
        &ability_rules,
        &ctx.registry,
    );

    let mut warnings = Vec::new();
    let config = PipelineConfig {
        registry: &ctx.registry,
        overrides: &ctx.overrides,
        escalation: &escalation,
        vulnerability_multiplier: ctx.tuning.vulnerability_multiplier,
    };
    let hp_delta = run_pipeline(&mut split.hit_points, profile, &config, &mut warnings);

    tracing::debug!(
        hp_delta,
        ability_entries = split.ability.len(),
        rank = escalation.rank,
        "damage resolved"
    );

    DamageReport {
        hp_delta,
        instances: split.hit_points,
        ability_deltas: split.ability,
        escalation_rank: escalation.rank,
        warnings,
    }
}

/// Receiver for best-effort outcome notifications. Implementations must
/// not assume they are called: dispatch failures are swallowed.
pub trait OutcomeSink {
    fn massive_damage(&self, _target: TargetId, _hp_delta: i64) {}
}

/// Default sink: drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl OutcomeSink for NullSink {}

/// One target's resolution outcome.
#[derive(Debug, Clone)]
pub struct TargetOutcome {
    pub target: TargetId,
    pub report: DamageReport,
}

/// Resolve the same damage event against several targets. Each target
/// is independent; order of outcomes follows the input order.
pub fn resolve_for_targets(
    targets: &[(TargetId, &DefenseProfile)],
    components: &[RollComponent],
    source: &DamageSource,
    ctx: &ResolutionContext,
    sink: &dyn OutcomeSink,
) -> Vec<TargetOutcome> {
    targets
        .iter()
        .map(|(target, profile)| {
            let report = resolve(components, source, profile, ctx);
            if report.hp_delta >= ctx.tuning.massive_damage_threshold {
                notify_massive(sink, *target, report.hp_delta);
            }
            TargetOutcome {
                target: *target,
                report,
            }
        })
        .collect()
}

/// Fire-and-forget: a misbehaving sink cannot fail the resolution.
fn notify_massive(sink: &dyn OutcomeSink, target: TargetId, hp_delta: i64) {
    let result = catch_unwind(AssertUnwindSafe(|| sink.massive_damage(target, hp_delta)));
    if result.is_err() {
        tracing::warn!(?target, "outcome sink panicked, notification dropped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{tag_set, Ability, AbilityKind};
    use crate::mitigation::MitigationEntry;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_resolve_fire_against_resistance() {
        let mut profile = DefenseProfile::new();
        profile
            .resistance_entries
            .push(MitigationEntry::any(10, tag_set(&["fire"])));

        let components = [RollComponent::typed(20, &["fire"])];
        let report = resolve(
            &components,
            &DamageSource::spell(),
            &profile,
            &ResolutionContext::standard(),
        );
        assert_eq!(report.hp_delta, 10);
    }

    #[test]
    fn test_resolve_forks_ability_track() {
        let mut source = DamageSource::spell();
        source.ability_type = Some("strdrain".into());
        source.ratio = 0.5;

        let components = [RollComponent::untagged(8)];
        let report = resolve(
            &components,
            &source,
            &DefenseProfile::new(),
            &ResolutionContext::standard(),
        );
        assert_eq!(report.hp_delta, 0);
        assert_eq!(report.ability_deltas.len(), 1);
        let entry = report.ability_deltas[0];
        assert_eq!(entry.ability, Ability::Str);
        assert_eq!(entry.kind, AbilityKind::Drain);
        assert_eq!(entry.amount, 4);
    }

    #[test]
    fn test_targets_resolve_independently() {
        let mut resistant = DefenseProfile::new();
        resistant
            .resistance_entries
            .push(MitigationEntry::any(10, tag_set(&["fire"])));
        let bare = DefenseProfile::new();

        let a = TargetId::new();
        let b = TargetId::new();
        let components = [RollComponent::typed(20, &["fire"])];
        let outcomes = resolve_for_targets(
            &[(a, &resistant), (b, &bare)],
            &components,
            &DamageSource::spell(),
            &ResolutionContext::standard(),
            &NullSink,
        );
        assert_eq!(outcomes[0].report.hp_delta, 10);
        assert_eq!(outcomes[1].report.hp_delta, 20);
        assert_eq!(outcomes[0].target, a);
        assert_eq!(outcomes[1].target, b);
    }

    struct CountingSink(AtomicUsize);

    impl OutcomeSink for CountingSink {
        fn massive_damage(&self, _target: TargetId, _hp_delta: i64) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct PanickingSink;

    impl OutcomeSink for PanickingSink {
        fn massive_damage(&self, _target: TargetId, _hp_delta: i64) {
            panic!("relay unavailable");
        }
    }

    #[test]
    fn test_massive_damage_notification() {
        let sink = CountingSink(AtomicUsize::new(0));
        let components = [RollComponent::typed(80, &["fire"])];
        resolve_for_targets(
            &[(TargetId::new(), &DefenseProfile::new())],
            &components,
            &DamageSource::spell(),
            &ResolutionContext::standard(),
            &sink,
        );
        assert_eq!(sink.0.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_sink_panic_does_not_fail_resolution() {
        let components = [RollComponent::typed(80, &["fire"])];
        let outcomes = resolve_for_targets(
            &[(TargetId::new(), &DefenseProfile::new())],
            &components,
            &DamageSource::spell(),
            &ResolutionContext::standard(),
            &PanickingSink,
        );
        assert_eq!(outcomes[0].report.hp_delta, 80);
    }

    #[test]
    fn test_malformed_custom_entry_surfaces_warning() {
        let mut profile = DefenseProfile::new();
        profile.reduction_custom = vec!["slashing only".to_string()];

        let components = [RollComponent::typed(10, &["slashing"])];
        let report = resolve(
            &components,
            &DamageSource::weapon(),
            &profile,
            &ResolutionContext::standard(),
        );
        assert_eq!(report.hp_delta, 10);
        assert_eq!(report.warnings.len(), 1);
    }
}
