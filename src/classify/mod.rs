//! TypeClassifier: raw roll data to typed damage instances

pub mod classifier;
pub mod source;

pub use classifier::classify;
pub use source::{DamageSource, RollComponent, SourceKind};
