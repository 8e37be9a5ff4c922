//! AbilityRedirector: ability-track fork and immunity rules

pub mod patterns;
pub mod redirect;

pub use patterns::{parse_rules, AbilityImmunityRule, AbilityScope};
pub use redirect::{redirect_abilities, TrackSplit};
