//! Product records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Physical condition of a listed device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCondition {
    New,
    Used,
    Broken,
    ForParts,
}

impl ProductCondition {
    pub const ALL: [ProductCondition; 4] = [
        ProductCondition::New,
        ProductCondition::Used,
        ProductCondition::Broken,
        ProductCondition::ForParts,
    ];

    /// Value used in filters, e.g. `for_parts`
    pub fn as_str(self) -> &'static str {
        match self {
            ProductCondition::New => "new",
            ProductCondition::Used => "used",
            ProductCondition::Broken => "broken",
            ProductCondition::ForParts => "for_parts",
        }
    }

    /// Badge text, e.g. `for parts`
    pub fn badge(self) -> String {
        self.as_str().replace('_', " ")
    }

    /// Filter option label, e.g. `For Parts`
    pub fn label(self) -> &'static str {
        match self {
            ProductCondition::New => "New",
            ProductCondition::Used => "Used",
            ProductCondition::Broken => "Broken",
            ProductCondition::ForParts => "For Parts",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == value)
    }
}

impl std::fmt::Display for ProductCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Listing status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    Active,
    Sold,
    Pending,
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductStatus::Active => write!(f, "active"),
            ProductStatus::Sold => write!(f, "sold"),
            ProductStatus::Pending => write!(f, "pending"),
        }
    }
}

/// A marketplace listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub title: String,
    pub brand: String,
    pub model: String,
    pub category: String,
    pub condition: ProductCondition,
    pub price: u32,
    pub location: String,
    pub description: String,
    pub image: String,
    pub status: ProductStatus,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Case-insensitive match of `needle` (already lowercased) against
    /// title, brand and description
    pub fn matches_search(&self, needle: &str) -> bool {
        [&self.title, &self.brand, &self.description]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_round_trip_through_filter_value() {
        for condition in ProductCondition::ALL {
            assert_eq!(ProductCondition::parse(condition.as_str()), Some(condition));
        }
        assert_eq!(ProductCondition::parse("refurbished"), None);
    }

    #[test]
    fn test_condition_badge() {
        assert_eq!(ProductCondition::ForParts.badge(), "for parts");
        assert_eq!(ProductCondition::Used.badge(), "used");
    }

    #[test]
    fn test_product_serializes_camel_case() {
        let product = crate::catalog::data::products().remove(0);
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["condition"], "broken");
        assert_eq!(json["status"], "active");
        assert!(json.get("createdAt").is_some());
    }
}
