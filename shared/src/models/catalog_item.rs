//! Catalog item model (category, material, size)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::util::{bool_or_string, default_true};

/// Category, material and size share this shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(default = "default_true", deserialize_with = "bool_or_string")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Which catalog list an item belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogKind {
    Category,
    Material,
    Size,
}

impl CatalogKind {
    pub const ALL: [CatalogKind; 3] = [Self::Category, Self::Material, Self::Size];

    /// API path segment under `/api/v1`
    pub fn path(&self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Material => "material",
            Self::Size => "size",
        }
    }

    /// Human label used in messages
    pub fn label(&self) -> &'static str {
        match self {
            Self::Category => "Category",
            Self::Material => "Material",
            Self::Size => "Size",
        }
    }

    /// Key of the list inside a paginated payload
    pub fn plural(&self) -> &'static str {
        match self {
            Self::Category => "categories",
            Self::Material => "materials",
            Self::Size => "sizes",
        }
    }
}

impl std::fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

impl std::str::FromStr for CatalogKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "category" | "categories" => Ok(Self::Category),
            "material" | "materials" => Ok(Self::Material),
            "size" | "sizes" => Ok(Self::Size),
            other => Err(format!("unknown catalog list: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_mongo_style_item() {
        let item: CatalogItem = serde_json::from_str(
            r#"{"_id":"a1","name":"Trays","isActive":true,
                "createdAt":"2024-05-01T10:00:00.000Z","updatedAt":"2024-05-01T10:00:00.000Z","__v":0}"#,
        )
        .unwrap();
        assert_eq!(item.id, "a1");
        assert!(item.is_active);
        assert!(item.created_at.is_some());
    }

    #[test]
    fn test_missing_active_defaults_true() {
        let item: CatalogItem = serde_json::from_str(r#"{"id":"x","name":"Steel"}"#).unwrap();
        assert!(item.is_active);
        assert!(item.created_at.is_none());
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!("materials".parse::<CatalogKind>().unwrap(), CatalogKind::Material);
        assert!("colour".parse::<CatalogKind>().is_err());
    }
}
