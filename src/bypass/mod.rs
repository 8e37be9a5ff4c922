//! Bypass resolution: override cascade and priority escalation

pub mod cascade;
pub mod escalation;

pub use cascade::{
    BypassOverride, BypassSetting, CategoryOverrides, DefenseCategory, IgnoreSetting,
    OverrideChain, ResolvedBypass,
};
pub use escalation::{escalate, weapon_rank, Escalation};
