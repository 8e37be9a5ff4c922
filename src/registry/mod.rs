//! Type-tag registry and priority ladder
//!
//! The registry maps each known tag to its kind (physical, energy,
//! alignment, material, untyped, ability) and to its ability-redirect
//! metadata. Unknown names are never fatal: `resolve` falls back to the
//! normalized literal id so homebrew content degrades gracefully.

pub mod loader;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::{tag_set, Ability, AbilityKind, TagSet, TypeTag};

/// Broad category a tag belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagKind {
    /// Slashing, piercing, bludgeoning
    Physical,
    /// Fire, cold, acid, electricity, sonic, ...
    Energy,
    /// Good, evil, lawful, chaotic
    Alignment,
    /// Silver, cold iron, adamantine, magic, epic, ...
    Material,
    /// The `untyped` sentinel
    Untyped,
    /// Redirects into an ability-score counter instead of hit points
    Ability,
    /// Anything the registry has never heard of
    Other,
}

/// Ability-track metadata for tags flagged as ability damage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityRedirect {
    pub abilities: Vec<Ability>,
    pub kind: AbilityKind,
}

/// Everything the registry knows about one tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagInfo {
    pub kind: TagKind,
    #[serde(default)]
    pub redirect: Option<AbilityRedirect>,
    /// Hard materials disable low hardness entirely (adamantine rule).
    #[serde(default)]
    pub hard_material: bool,
}

impl TagInfo {
    pub fn of_kind(kind: TagKind) -> Self {
        Self {
            kind,
            redirect: None,
            hard_material: false,
        }
    }
}

/// Registry of known type tags.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    tags: AHashMap<TypeTag, TagInfo>,
}

impl TypeRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The standard d20 vocabulary: physical, energy, alignment and
    /// material tags plus one ability-track tag per ability and kind
    /// (`strdamage`, `condrain`, `wispenalty`, ...).
    pub fn builtin() -> Self {
        let mut reg = Self::default();

        for id in ["slashing", "piercing", "bludgeoning"] {
            reg.insert(id, TagInfo::of_kind(TagKind::Physical));
        }
        for id in ["fire", "cold", "acid", "electricity", "sonic", "force"] {
            reg.insert(id, TagInfo::of_kind(TagKind::Energy));
        }
        for id in ["good", "evil", "lawful", "chaotic"] {
            reg.insert(id, TagInfo::of_kind(TagKind::Alignment));
        }
        for id in ["magic", "silver", "coldiron", "adamantine", "epic"] {
            reg.insert(id, TagInfo::of_kind(TagKind::Material));
        }
        reg.set_hard_material("adamantine");
        reg.insert("untyped", TagInfo::of_kind(TagKind::Untyped));

        for ability in Ability::ALL {
            for kind in AbilityKind::ALL {
                let id = format!("{}{}", ability.key(), kind.key());
                reg.insert(
                    &id,
                    TagInfo {
                        kind: TagKind::Ability,
                        redirect: Some(AbilityRedirect {
                            abilities: vec![ability],
                            kind,
                        }),
                        hard_material: false,
                    },
                );
            }
        }

        reg
    }

    pub fn insert(&mut self, id: &str, info: TagInfo) {
        self.tags.insert(TypeTag::new(id), info);
    }

    pub fn set_hard_material(&mut self, id: &str) {
        if let Some(info) = self.tags.get_mut(&TypeTag::new(id)) {
            info.hard_material = true;
        }
    }

    /// Resolve a raw name to a tag. Unknown names fall back to the
    /// normalized literal id (never fatal).
    pub fn resolve(&self, raw: &str) -> TypeTag {
        let tag = TypeTag::new(raw);
        if !self.tags.contains_key(&tag) && !tag.is_no_type() && !tag.is_wildcard() {
            tracing::debug!(tag = %tag, "unregistered damage type, using literal id");
        }
        tag
    }

    pub fn info(&self, tag: &TypeTag) -> Option<&TagInfo> {
        self.tags.get(tag)
    }

    pub fn kind(&self, tag: &TypeTag) -> TagKind {
        self.tags.get(tag).map(|i| i.kind).unwrap_or(TagKind::Other)
    }

    pub fn redirect(&self, tag: &TypeTag) -> Option<&AbilityRedirect> {
        self.tags.get(tag).and_then(|i| i.redirect.as_ref())
    }

    pub fn is_hard_material(&self, tag: &TypeTag) -> bool {
        self.tags.get(tag).map(|i| i.hard_material).unwrap_or(false)
    }

    /// Whether a tag belongs to the recognized physical-damage universe
    /// consumed by the reduction stage.
    pub fn in_physical_universe(&self, tag: &TypeTag) -> bool {
        matches!(
            self.kind(tag),
            TagKind::Physical | TagKind::Material | TagKind::Alignment | TagKind::Untyped
        )
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// Ranked list of type segments used by the auto-bypass escalation.
/// Index 0 is the lowest rank.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriorityLadder {
    segments: Vec<Vec<TypeTag>>,
}

impl PriorityLadder {
    pub fn new(segments: Vec<Vec<TypeTag>>) -> Self {
        Self { segments }
    }

    pub fn from_raw(raw: &[Vec<String>]) -> Self {
        Self {
            segments: raw
                .iter()
                .map(|seg| seg.iter().map(|id| TypeTag::new(id)).collect())
                .collect(),
        }
    }

    /// The conventional enhancement-bonus ladder: rank 1 magic, rank 3
    /// silver/cold iron, rank 4 adamantine, rank 5 alignments, rank 6 epic.
    pub fn standard() -> Self {
        Self {
            segments: vec![
                vec![],
                tag_vec(&["magic"]),
                vec![],
                tag_vec(&["silver", "coldiron"]),
                tag_vec(&["adamantine"]),
                tag_vec(&["good", "evil", "lawful", "chaotic"]),
                tag_vec(&["epic"]),
            ],
        }
    }

    pub fn segments(&self) -> &[Vec<TypeTag>] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Highest segment index containing any tag present on the damage,
    /// scanning from the top down. 0 when nothing matches.
    pub fn rank_for_tags(&self, damage_tags: &TagSet) -> i32 {
        for idx in (0..self.segments.len()).rev() {
            if self.segments[idx].iter().any(|t| damage_tags.contains(t)) {
                return idx as i32;
            }
        }
        0
    }

    /// Union of segments 0..=rank, empty segments skipped.
    pub fn flatten_through(&self, rank: i32) -> TagSet {
        let mut out = TagSet::default();
        if rank < 0 {
            return out;
        }
        let top = (rank as usize).min(self.segments.len().saturating_sub(1));
        if self.segments.is_empty() {
            return out;
        }
        for segment in &self.segments[..=top] {
            for tag in segment {
                out.insert(tag.clone());
            }
        }
        out
    }
}

fn tag_vec(raw: &[&str]) -> Vec<TypeTag> {
    raw.iter().map(|r| TypeTag::new(r)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::tag_set;

    #[test]
    fn test_builtin_kinds() {
        let reg = TypeRegistry::builtin();
        assert_eq!(reg.kind(&TypeTag::new("slashing")), TagKind::Physical);
        assert_eq!(reg.kind(&TypeTag::new("fire")), TagKind::Energy);
        assert_eq!(reg.kind(&TypeTag::new("good")), TagKind::Alignment);
        assert_eq!(reg.kind(&TypeTag::new("silver")), TagKind::Material);
        assert_eq!(reg.kind(&TypeTag::new("untyped")), TagKind::Untyped);
        assert_eq!(reg.kind(&TypeTag::new("strdrain")), TagKind::Ability);
        assert_eq!(reg.kind(&TypeTag::new("plasma")), TagKind::Other);
    }

    #[test]
    fn test_builtin_redirects() {
        let reg = TypeRegistry::builtin();
        let redirect = reg.redirect(&TypeTag::new("condrain")).unwrap();
        assert_eq!(redirect.abilities, vec![Ability::Con]);
        assert_eq!(redirect.kind, AbilityKind::Drain);
        assert!(reg.redirect(&TypeTag::new("fire")).is_none());
    }

    #[test]
    fn test_adamantine_is_hard() {
        let reg = TypeRegistry::builtin();
        assert!(reg.is_hard_material(&TypeTag::new("adamantine")));
        assert!(!reg.is_hard_material(&TypeTag::new("silver")));
    }

    #[test]
    fn test_physical_universe() {
        let reg = TypeRegistry::builtin();
        assert!(reg.in_physical_universe(&TypeTag::new("slashing")));
        assert!(reg.in_physical_universe(&TypeTag::new("silver")));
        assert!(reg.in_physical_universe(&TypeTag::new("evil")));
        assert!(reg.in_physical_universe(&TypeTag::new("untyped")));
        assert!(!reg.in_physical_universe(&TypeTag::new("fire")));
        assert!(!reg.in_physical_universe(&TypeTag::new("plasma")));
    }

    #[test]
    fn test_resolve_unknown_falls_back_to_literal() {
        let reg = TypeRegistry::builtin();
        assert_eq!(reg.resolve("Hellfire").as_str(), "hellfire");
    }

    #[test]
    fn test_ladder_rank_scans_top_down() {
        let ladder = PriorityLadder::from_raw(&[
            vec![],
            vec!["magic".into()],
            vec![],
            vec!["silver".into(), "coldIron".into()],
            vec!["adamantine".into()],
        ]);
        assert_eq!(ladder.rank_for_tags(&tag_set(&["adamantine"])), 4);
        assert_eq!(ladder.rank_for_tags(&tag_set(&["silver", "fire"])), 3);
        assert_eq!(ladder.rank_for_tags(&tag_set(&["magic"])), 1);
        assert_eq!(ladder.rank_for_tags(&tag_set(&["fire"])), 0);
    }

    #[test]
    fn test_ladder_flatten_skips_empty_segments() {
        let ladder = PriorityLadder::from_raw(&[
            vec![],
            vec!["magic".into()],
            vec![],
            vec!["silver".into(), "coldIron".into()],
            vec!["adamantine".into()],
        ]);
        let flat = ladder.flatten_through(3);
        assert_eq!(flat, tag_set(&["magic", "silver", "coldiron"]));
        assert!(!flat.contains(&TypeTag::new("adamantine")));
    }

    #[test]
    fn test_ladder_flatten_clamps_to_length() {
        let ladder = PriorityLadder::from_raw(&[vec!["magic".into()]]);
        assert_eq!(ladder.flatten_through(10), tag_set(&["magic"]));
        assert!(PriorityLadder::default().flatten_through(3).is_empty());
    }

    #[test]
    fn test_standard_ladder_matches_enhancement_ranks() {
        let ladder = PriorityLadder::standard();
        // Rank 3 weapon beats silver and cold iron but not adamantine.
        let flat = ladder.flatten_through(3);
        assert!(flat.contains(&TypeTag::new("silver")));
        assert!(flat.contains(&TypeTag::new("coldiron")));
        assert!(!flat.contains(&TypeTag::new("adamantine")));
    }
}
