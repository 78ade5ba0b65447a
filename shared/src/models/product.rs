//! Product model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::util::{bool_or_string, default_true, number_or_string};

/// Product entity
///
/// Reads carry the image URLs under `image`; `images` is accepted too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    /// Category reference (name or id, as chosen in the dropdown)
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub material: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, deserialize_with = "number_or_string")]
    pub quantity_per_pack: u32,
    #[serde(default, deserialize_with = "number_or_string")]
    pub price_per_pack: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_true", deserialize_with = "bool_or_string")]
    pub is_active: bool,
    #[serde(default, rename = "image", alias = "images")]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}
