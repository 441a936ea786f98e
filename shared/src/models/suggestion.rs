//! Item Suggestion Model

use serde::{Deserialize, Serialize};

/// Structured suggestions for a freshly captured item
///
/// Produced by a `SuggestionProvider` implementation; the shipped one is a
/// deterministic stand-in, so this type is the seam a real model plugs into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSuggestions {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
}
