pub mod constants;
pub mod error;
pub mod types;

pub use error::{Result, WardError};
pub use types::{
    tag_set, Ability, AbilityDeltaEntry, AbilityKind, DamageInstance, TagSet, TargetId, TypeTag,
};
