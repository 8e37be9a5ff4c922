//! Bypass override cascade: attack, action, global scopes
//!
//! Each defense category resolves independently. The walk goes from the
//! most specific scope to the least; the first override with
//! `inherit = false` is authoritative and stops the walk, whether it
//! enables a bypass or explicitly declares none. All-inherit chains
//! resolve to no effect.

use serde::{Deserialize, Serialize};

use crate::core::types::{TagSet, TypeTag};

/// Defense categories subject to bypass overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefenseCategory {
    Hardness,
    Resistance,
    Reduction,
    Immunity,
}

impl DefenseCategory {
    pub fn name(self) -> &'static str {
        match self {
            DefenseCategory::Hardness => "hardness",
            DefenseCategory::Resistance => "resistance",
            DefenseCategory::Reduction => "reduction",
            DefenseCategory::Immunity => "immunity",
        }
    }
}

/// Bypass-type list for one category at one scope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BypassSetting {
    pub enabled: bool,
    /// Raw type ids; may contain the wildcard `all`.
    #[serde(default)]
    pub types: Vec<String>,
}

/// Flat-amount hardness ignore for one scope (hardness category only).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IgnoreSetting {
    pub enabled: bool,
    pub value: i64,
}

/// One category's override at one scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BypassOverride {
    /// True defers to the next broader scope.
    #[serde(default = "inherit_default")]
    pub inherit: bool,
    #[serde(default)]
    pub bypass: BypassSetting,
    #[serde(default)]
    pub ignore: Option<IgnoreSetting>,
}

fn inherit_default() -> bool {
    true
}

impl Default for BypassOverride {
    fn default() -> Self {
        Self {
            inherit: true,
            bypass: BypassSetting::default(),
            ignore: None,
        }
    }
}

impl BypassOverride {
    /// Explicit override enabling a bypass for the given type ids.
    pub fn bypassing(types: &[&str]) -> Self {
        Self {
            inherit: false,
            bypass: BypassSetting {
                enabled: true,
                types: types.iter().map(|t| t.to_string()).collect(),
            },
            ignore: None,
        }
    }

    /// Explicit override declaring no bypass (blocks broader scopes).
    pub fn none() -> Self {
        Self {
            inherit: false,
            bypass: BypassSetting::default(),
            ignore: None,
        }
    }

    pub fn with_ignore(mut self, value: i64) -> Self {
        self.inherit = false;
        self.ignore = Some(IgnoreSetting {
            enabled: true,
            value,
        });
        self
    }
}

/// Per-category overrides configured at one scope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryOverrides {
    #[serde(default)]
    pub hardness: Option<BypassOverride>,
    #[serde(default)]
    pub resistance: Option<BypassOverride>,
    #[serde(default)]
    pub reduction: Option<BypassOverride>,
    #[serde(default)]
    pub immunity: Option<BypassOverride>,
}

impl CategoryOverrides {
    pub fn get(&self, category: DefenseCategory) -> Option<&BypassOverride> {
        match category {
            DefenseCategory::Hardness => self.hardness.as_ref(),
            DefenseCategory::Resistance => self.resistance.as_ref(),
            DefenseCategory::Reduction => self.reduction.as_ref(),
            DefenseCategory::Immunity => self.immunity.as_ref(),
        }
    }

    pub fn set(&mut self, category: DefenseCategory, ov: BypassOverride) {
        match category {
            DefenseCategory::Hardness => self.hardness = Some(ov),
            DefenseCategory::Resistance => self.resistance = Some(ov),
            DefenseCategory::Reduction => self.reduction = Some(ov),
            DefenseCategory::Immunity => self.immunity = Some(ov),
        }
    }

    /// Convenience for a single-category scope.
    pub fn single(category: DefenseCategory, ov: BypassOverride) -> Self {
        let mut scope = Self::default();
        scope.set(category, ov);
        scope
    }
}

/// The full attack → action → global override chain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverrideChain {
    #[serde(default)]
    pub attack: Option<CategoryOverrides>,
    #[serde(default)]
    pub action: Option<CategoryOverrides>,
    #[serde(default)]
    pub global: Option<CategoryOverrides>,
}

/// Effective bypass for one category after cascade resolution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedBypass {
    pub all: bool,
    pub types: TagSet,
    /// Hardness only: flat amount subtracted from the hardness value.
    pub ignore_amount: i64,
}

impl ResolvedBypass {
    pub fn covers(&self, tag: &TypeTag) -> bool {
        self.all || self.types.contains(tag)
    }

    pub fn covers_any(&self, tags: &TagSet) -> bool {
        self.all || tags.iter().any(|t| self.types.contains(t))
    }

    pub fn is_empty(&self) -> bool {
        !self.all && self.types.is_empty() && self.ignore_amount == 0
    }

    /// Union in an auxiliary bypass set (priority escalation output).
    pub fn with_extra(mut self, extra: &TagSet) -> Self {
        for tag in extra {
            self.types.insert(tag.clone());
        }
        self
    }
}

impl OverrideChain {
    /// Resolve one category against the cascade.
    pub fn resolve(&self, category: DefenseCategory) -> ResolvedBypass {
        for scope in [&self.attack, &self.action, &self.global] {
            let Some(overrides) = scope else { continue };
            let Some(ov) = overrides.get(category) else {
                continue;
            };
            if ov.inherit {
                continue;
            }

            // Explicit scope: authoritative even when it enables nothing.
            let mut resolved = ResolvedBypass::default();
            if ov.bypass.enabled {
                for raw in &ov.bypass.types {
                    let tag = TypeTag::new(raw);
                    if tag.is_wildcard() {
                        resolved.all = true;
                    } else {
                        resolved.types.insert(tag);
                    }
                }
            }
            if let Some(ignore) = ov.ignore {
                if ignore.enabled {
                    resolved.ignore_amount = ignore.value.max(0);
                }
            }
            return resolved;
        }
        ResolvedBypass::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::tag_set;

    #[test]
    fn test_all_inherit_resolves_empty() {
        let chain = OverrideChain::default();
        let resolved = chain.resolve(DefenseCategory::Reduction);
        assert!(resolved.is_empty());
    }

    #[test]
    fn test_attack_scope_wins() {
        let chain = OverrideChain {
            attack: Some(CategoryOverrides::single(
                DefenseCategory::Reduction,
                BypassOverride::bypassing(&["Silver"]),
            )),
            action: None,
            global: Some(CategoryOverrides::single(
                DefenseCategory::Reduction,
                BypassOverride::bypassing(&["coldiron"]),
            )),
        };
        let resolved = chain.resolve(DefenseCategory::Reduction);
        assert_eq!(resolved.types, tag_set(&["silver"]));
        assert!(!resolved.covers(&TypeTag::new("coldiron")));
    }

    #[test]
    fn test_explicit_no_bypass_blocks_broader_scope() {
        let chain = OverrideChain {
            attack: Some(CategoryOverrides::single(
                DefenseCategory::Resistance,
                BypassOverride::none(),
            )),
            action: None,
            global: Some(CategoryOverrides::single(
                DefenseCategory::Resistance,
                BypassOverride::bypassing(&["fire"]),
            )),
        };
        let resolved = chain.resolve(DefenseCategory::Resistance);
        assert!(resolved.is_empty());
    }

    #[test]
    fn test_inherit_falls_through_to_global() {
        let chain = OverrideChain {
            attack: Some(CategoryOverrides::single(
                DefenseCategory::Reduction,
                BypassOverride::default(),
            )),
            action: None,
            global: Some(CategoryOverrides::single(
                DefenseCategory::Reduction,
                BypassOverride::bypassing(&["magic"]),
            )),
        };
        let resolved = chain.resolve(DefenseCategory::Reduction);
        assert!(resolved.covers(&TypeTag::new("magic")));
    }

    #[test]
    fn test_wildcard() {
        let chain = OverrideChain {
            attack: None,
            action: None,
            global: Some(CategoryOverrides::single(
                DefenseCategory::Reduction,
                BypassOverride::bypassing(&["ALL"]),
            )),
        };
        let resolved = chain.resolve(DefenseCategory::Reduction);
        assert!(resolved.all);
        assert!(resolved.covers(&TypeTag::new("anything")));
    }

    #[test]
    fn test_categories_resolve_independently() {
        let chain = OverrideChain {
            attack: Some(CategoryOverrides::single(
                DefenseCategory::Reduction,
                BypassOverride::bypassing(&["silver"]),
            )),
            action: None,
            global: None,
        };
        assert!(chain.resolve(DefenseCategory::Resistance).is_empty());
        assert!(!chain.resolve(DefenseCategory::Reduction).is_empty());
    }

    #[test]
    fn test_hardness_ignore_amount() {
        let chain = OverrideChain {
            attack: None,
            action: Some(CategoryOverrides::single(
                DefenseCategory::Hardness,
                BypassOverride::none().with_ignore(5),
            )),
            global: None,
        };
        let resolved = chain.resolve(DefenseCategory::Hardness);
        assert_eq!(resolved.ignore_amount, 5);
    }

    #[test]
    fn test_disabled_ignore_is_zero() {
        let mut ov = BypassOverride::none();
        ov.ignore = Some(IgnoreSetting {
            enabled: false,
            value: 9,
        });
        let chain = OverrideChain {
            attack: Some(CategoryOverrides::single(DefenseCategory::Hardness, ov)),
            action: None,
            global: None,
        };
        assert_eq!(chain.resolve(DefenseCategory::Hardness).ignore_amount, 0);
    }

    #[test]
    fn test_no_type_sentinel_is_literal() {
        let chain = OverrideChain {
            attack: None,
            action: None,
            global: Some(CategoryOverrides::single(
                DefenseCategory::Reduction,
                BypassOverride::bypassing(&["-"]),
            )),
        };
        let resolved = chain.resolve(DefenseCategory::Reduction);
        assert!(resolved.covers(&TypeTag::no_type()));
        assert!(!resolved.covers(&TypeTag::new("slashing")));
    }
}
