use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The whole dictionary document (`dictionary.json`): meat-type key -> entry.
/// BTreeMap keeps iteration order deterministic, which matters for search
/// tie-breaking.
pub type Dictionary = BTreeMap<String, MeatType>;

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MeatType {
    pub name: String,

    pub description: String,

    /// Freshness-level key ("fresh", "acceptable", "spoiled", ...) -> details.
    #[serde(default)]
    pub levels: BTreeMap<String, FreshnessLevel>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FreshnessLevel {
    pub name: String,

    /// Color, texture, smell characteristics at this level.
    pub properties: String,

    /// Observable signs to check for.
    pub signs: String,

    /// Storage guidance.
    pub storage: String,
}
