//! Engine constants - all tunable values in one place
//!
//! Resolution reads these through `Tuning`, never directly, so a context
//! can override any of them per call.

/// Default amplification applied to instances matching a vulnerability.
/// Exact ruleset multiplier is configurable via `Tuning`.
pub const VULNERABILITY_MULTIPLIER: f64 = 1.5;

/// Minimum raw enhancement bonus for an `epic` material tag to count,
/// and the rank it clamps to when it does.
pub const EPIC_BONUS_FLOOR: i32 = 6;

/// Hard materials disable the hardness stage entirely up to and
/// including this hardness value.
pub const HARD_MATERIAL_HARDNESS_CEILING: i64 = 20;

/// Default hit-point delta at or above which an outcome sink is notified.
pub const MASSIVE_DAMAGE_THRESHOLD: i64 = 50;
