//! Parse-once ability-immunity phrase rules
//!
//! Custom immunity strings such as "All Ability Damage", "Strength
//! Drain", "Mental Ability Penalty" or "All Physical Abilities" are
//! parsed into `{scope, kind}` tuples at configuration-load time and
//! matched against `(ability, kind)` at resolution time. Strings that do
//! not fit the grammar are not ability rules (they keep acting as plain
//! type-tag immunities on the hit-point track).

use crate::core::types::{Ability, AbilityKind};

/// Which abilities a rule covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbilityScope {
    All,
    Mental,
    Physical,
    Specific(Ability),
}

/// One parsed rule; `kind: None` matches every kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbilityImmunityRule {
    pub scope: AbilityScope,
    pub kind: Option<AbilityKind>,
}

impl AbilityImmunityRule {
    /// Parse a phrase; `None` when the text is not an ability rule.
    pub fn parse(text: &str) -> Option<Self> {
        let mut scope: Option<AbilityScope> = None;
        let mut kind: Option<AbilityKind> = None;
        let mut saw_filler = false;

        for token in text.to_lowercase().split_whitespace() {
            match token {
                "all" => {
                    scope.get_or_insert(AbilityScope::All);
                }
                "mental" => scope = Some(AbilityScope::Mental),
                "physical" => scope = Some(AbilityScope::Physical),
                "ability" | "abilities" | "score" | "scores" => saw_filler = true,
                "damage" => kind = Some(AbilityKind::Damage),
                "drain" => kind = Some(AbilityKind::Drain),
                "penalty" | "penalties" => kind = Some(AbilityKind::Penalty),
                other => match Ability::parse(other) {
                    Some(ability) => scope = Some(AbilityScope::Specific(ability)),
                    None => return None,
                },
            }
        }

        // A bare kind word or a bare group word is too ambiguous to be a
        // rule unless the phrase names abilities at all.
        let grouped = matches!(
            scope,
            Some(AbilityScope::Mental | AbilityScope::Physical | AbilityScope::Specific(_))
        );
        if grouped || (scope.is_some() && (saw_filler || kind.is_some())) {
            Some(Self {
                scope: scope.unwrap_or(AbilityScope::All),
                kind,
            })
        } else if kind.is_some() && saw_filler {
            Some(Self {
                scope: AbilityScope::All,
                kind,
            })
        } else {
            None
        }
    }

    pub fn matches(&self, ability: Ability, kind: AbilityKind) -> bool {
        let scope_hit = match self.scope {
            AbilityScope::All => true,
            AbilityScope::Mental => ability.is_mental(),
            AbilityScope::Physical => ability.is_physical(),
            AbilityScope::Specific(a) => a == ability,
        };
        scope_hit && self.kind.map_or(true, |k| k == kind)
    }
}

/// Parse every custom string that fits the grammar.
pub fn parse_rules(custom: &[String]) -> Vec<AbilityImmunityRule> {
    custom
        .iter()
        .filter_map(|text| AbilityImmunityRule::parse(text))
        .collect()
}
