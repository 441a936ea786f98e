//! Inventory Item Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::suggestion::ItemSuggestions;

/// Lifecycle status of an inventory item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    Active,
    Archived,
    Lost,
    Disposed,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Active => "active",
            ItemStatus::Archived => "archived",
            ItemStatus::Lost => "lost",
            ItemStatus::Disposed => "disposed",
        }
    }

    /// Parse from the stored/submitted representation
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(ItemStatus::Active),
            "archived" => Some(ItemStatus::Archived),
            "lost" => Some(ItemStatus::Lost),
            "disposed" => Some(ItemStatus::Disposed),
            _ => None,
        }
    }
}

impl Default for ItemStatus {
    fn default() -> Self {
        ItemStatus::Active
    }
}

impl std::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Inventory item entity
///
/// `short_id` is assigned exactly once at insert time and never changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub short_id: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub serial_no: Option<String>,
    pub location: Option<String>,
    pub status: ItemStatus,
    pub purchase_date: Option<NaiveDate>,
    pub warranty_expiry: Option<NaiveDate>,
    pub created_at: i64,
    pub updated_at: i64,
    #[serde(default)]
    pub images: Vec<ItemImage>,
}

/// Image attached to an item
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ItemImage {
    pub id: String,
    pub item_id: String,
    /// Path relative to the media directory
    pub path: String,
    pub created_at: i64,
}

/// Create item payload
///
/// Dates arrive as raw ISO strings so that malformed input surfaces as a
/// validation error instead of a body-deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemCreate {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub serial_no: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
    pub purchase_date: Option<String>,
    pub warranty_expiry: Option<String>,
    /// Free-form hint forwarded to the suggestion provider
    pub text_hint: Option<String>,
}

/// Update item payload (partial, all fields optional)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub serial_no: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
    pub purchase_date: Option<String>,
    pub warranty_expiry: Option<String>,
}

/// Public (scan-facing) view of an item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemPublic {
    pub short_id: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub location: Option<String>,
    pub status: ItemStatus,
    /// Fully-qualified URL of the first attached image, if any
    pub primary_image: Option<String>,
}

/// Response for item creation: the stored record plus generated suggestions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCreateResponse {
    pub item: Item,
    pub suggestions: ItemSuggestions,
}
