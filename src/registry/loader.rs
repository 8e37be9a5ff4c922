//! Load homebrew registry content from TOML files
//!
//! Content files extend the builtin catalog. Invalid TOML is an error;
//! individually malformed entries are skipped with a warning so one bad
//! homebrew tag cannot take the whole registry down.

use std::fs;
use std::path::Path;

use crate::core::error::{Result, WardError};
use crate::core::types::{Ability, AbilityKind};
use crate::registry::{AbilityRedirect, PriorityLadder, TagInfo, TagKind, TypeRegistry};

/// Load a content file on top of the builtin catalog.
pub fn load_content(path: &Path) -> Result<(TypeRegistry, Option<PriorityLadder>)> {
    let content = fs::read_to_string(path)?;
    parse_content(&content)
}

/// Parse a content file: `[[tag]]` entries plus an optional `[ladder]`
/// table with a `segments` array-of-arrays.
pub fn parse_content(content: &str) -> Result<(TypeRegistry, Option<PriorityLadder>)> {
    let toml: toml::Value = content
        .parse()
        .map_err(|e| WardError::Registry(format!("invalid TOML: {}", e)))?;

    let mut registry = TypeRegistry::builtin();

    if let Some(tags) = toml.get("tag").and_then(|v| v.as_array()) {
        for entry in tags {
            match parse_tag_entry(entry) {
                Some((id, info)) => registry.insert(&id, info),
                None => {
                    tracing::warn!(entry = %entry, "skipping malformed registry tag entry");
                }
            }
        }
    }

    let ladder = toml
        .get("ladder")
        .and_then(|v| v.get("segments"))
        .and_then(|v| v.as_array())
        .map(|segments| parse_ladder_segments(segments));

    Ok((registry, ladder))
}

fn parse_tag_entry(value: &toml::Value) -> Option<(String, TagInfo)> {
    let id = value.get("id").and_then(|v| v.as_str())?;
    if id.trim().is_empty() {
        return None;
    }

    let kind = match value.get("kind").and_then(|v| v.as_str()) {
        Some(k) => parse_kind(k)?,
        None => TagKind::Other,
    };

    let redirect = if kind == TagKind::Ability {
        let abilities: Vec<Ability> = value
            .get("abilities")
            .and_then(|v| v.as_array())
            .map(|list| {
                list.iter()
                    .filter_map(|a| a.as_str())
                    .filter_map(Ability::parse)
                    .collect()
            })
            .unwrap_or_default();
        let effect = value
            .get("effect")
            .and_then(|v| v.as_str())
            .and_then(AbilityKind::parse)?;
        if abilities.is_empty() {
            return None;
        }
        Some(AbilityRedirect {
            abilities,
            kind: effect,
        })
    } else {
        None
    };

    let hard_material = value.get("hard").and_then(|v| v.as_bool()).unwrap_or(false);

    Some((
        id.to_string(),
        TagInfo {
            kind,
            redirect,
            hard_material,
        },
    ))
}

fn parse_kind(raw: &str) -> Option<TagKind> {
    match raw.trim().to_lowercase().as_str() {
        "physical" => Some(TagKind::Physical),
        "energy" => Some(TagKind::Energy),
        "alignment" => Some(TagKind::Alignment),
        "material" => Some(TagKind::Material),
        "untyped" => Some(TagKind::Untyped),
        "ability" => Some(TagKind::Ability),
        "other" => Some(TagKind::Other),
        _ => None,
    }
}

fn parse_ladder_segments(segments: &[toml::Value]) -> PriorityLadder {
    let raw: Vec<Vec<String>> = segments
        .iter()
        .map(|seg| {
            seg.as_array()
                .map(|tags| {
                    tags.iter()
                        .filter_map(|t| t.as_str())
                        .map(|t| t.to_string())
                        .collect()
                })
                .unwrap_or_default()
        })
        .collect();
    PriorityLadder::from_raw(&raw)
}
