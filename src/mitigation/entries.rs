//! Resistance/reduction entries and the free-text rule grammar
//!
//! Structured entries come straight from the defense profile. Free-text
//! entries use the `"<amount> <type>[ and|or <type>]"` grammar; `and`
//! makes the entry match-all. A missing numeric amount drops the entry
//! with a warning, never an error.

use serde::{Deserialize, Serialize};

use crate::core::types::{TagSet, TypeTag};
use crate::registry::TypeRegistry;

/// One resistance or reduction entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MitigationEntry {
    pub amount: i64,
    pub tags: TagSet,
    /// True: every listed tag must be present (subject to the bypass
    /// short-circuit). False: any single listed tag suffices.
    #[serde(default)]
    pub match_all: bool,
}

impl MitigationEntry {
    pub fn any(amount: i64, tags: TagSet) -> Self {
        Self {
            amount,
            tags,
            match_all: false,
        }
    }

    pub fn all(amount: i64, tags: TagSet) -> Self {
        Self {
            amount,
            tags,
            match_all: true,
        }
    }

    /// The `DR 10/—` style entry: no listed type.
    pub fn no_type(amount: i64) -> Self {
        let mut tags = TagSet::default();
        tags.insert(TypeTag::no_type());
        Self {
            amount,
            tags,
            match_all: false,
        }
    }
}

/// Parse one free-text entry. Returns `None` (after warning) when the
/// numeric amount is missing or the text is empty.
pub fn parse_custom_entry(
    text: &str,
    registry: &TypeRegistry,
    warnings: &mut Vec<String>,
) -> Option<MitigationEntry> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let amount_token = parts.next()?;
    let Ok(amount) = amount_token.parse::<i64>() else {
        let warning = format!(
            "custom mitigation entry {:?} is missing a numeric amount, skipping",
            trimmed
        );
        tracing::warn!("{}", warning);
        warnings.push(warning);
        return None;
    };

    let rest = parts.next().unwrap_or("").trim();
    if rest.is_empty() || rest == "-" || rest == "—" {
        return Some(MitigationEntry::no_type(amount.max(0)));
    }

    let lower = rest.to_lowercase();
    let (names, match_all): (Vec<&str>, bool) = if lower.contains(" and ") {
        (lower.split(" and ").collect(), true)
    } else if lower.contains(" or ") {
        (lower.split(" or ").collect(), false)
    } else {
        (vec![lower.as_str()], false)
    };

    let tags: TagSet = names
        .iter()
        .map(|name| match name.trim() {
            "-" | "—" => TypeTag::no_type(),
            other => registry.resolve(other),
        })
        .collect();

    Some(MitigationEntry {
        amount: amount.max(0),
        tags,
        match_all,
    })
}

/// Merge structured entries with parsed free-text ones.
pub fn collect_entries(
    structured: &[MitigationEntry],
    custom: &[String],
    registry: &TypeRegistry,
    warnings: &mut Vec<String>,
) -> Vec<MitigationEntry> {
    let mut entries: Vec<MitigationEntry> = structured.to_vec();
    for text in custom {
        if let Some(entry) = parse_custom_entry(text, registry, warnings) {
            entries.push(entry);
        }
    }
    entries
}
