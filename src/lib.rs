//! Wardbreak - layered damage-mitigation resolution engine
//!
//! Rolled damage components plus a target's defensive profile go in;
//! final hit-point and ability-score deltas come out. The layered rules
//! hierarchy (immunity, vulnerability, hardness, energy resistance,
//! physical damage reduction, ability redirection) honors a three-scope
//! bypass cascade and a potency-driven auto-bypass escalation.

pub mod ability;
pub mod bypass;
pub mod classify;
pub mod core;
pub mod engine;
pub mod mitigation;
pub mod profile;
pub mod registry;

pub use crate::core::types::{
    tag_set, Ability, AbilityDeltaEntry, AbilityKind, DamageInstance, TagSet, TargetId, TypeTag,
};
pub use crate::engine::{
    resolve, resolve_for_targets, DamageReport, NullSink, OutcomeSink, ResolutionContext,
    TargetOutcome, Tuning,
};
