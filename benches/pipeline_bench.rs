//! Benchmark for a representative multi-instance resolution

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use wardbreak::classify::{DamageSource, RollComponent};
use wardbreak::core::types::tag_set;
use wardbreak::engine::{resolve, ResolutionContext};
use wardbreak::mitigation::MitigationEntry;
use wardbreak::profile::{DefenseProfile, Hardness, TraitRules};

fn layered_profile() -> DefenseProfile {
    let mut profile = DefenseProfile::new();
    profile.immunities = TraitRules::of(tag_set(&["acid"]));
    profile.vulnerabilities = TraitRules::of(tag_set(&["cold"]));
    profile.hardness = Hardness { value: 8 };
    profile
        .resistance_entries
        .push(MitigationEntry::any(10, tag_set(&["fire"])));
    profile
        .reduction_entries
        .push(MitigationEntry::any(5, tag_set(&["silver"])));
    profile.reduction_custom = vec!["10 coldiron or good".to_string()];
    profile
}

fn bench_resolve(c: &mut Criterion) {
    let profile = layered_profile();
    let ctx = ResolutionContext::standard();
    let mut source = DamageSource::weapon();
    source.weapon_tags = vec!["slashing".into(), "silver".into()];
    source.enhancement_bonus = 2;

    let components = vec![
        RollComponent::untagged(14),
        RollComponent::typed(9, &["fire"]),
        RollComponent::typed(7, &["cold"]),
        RollComponent::typed(5, &["acid"]),
        RollComponent::typed(4, &["strdrain"]),
    ];

    c.bench_function("resolve_layered_profile", |b| {
        b.iter(|| {
            resolve(
                black_box(&components),
                black_box(&source),
                black_box(&profile),
                black_box(&ctx),
            )
        })
    });
}

criterion_group!(benches, bench_resolve);
criterion_main!(benches);
