//! Client-side filtering and sorting over the catalog

use std::cmp::Reverse;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::product::{Product, ProductCondition};

/// Category filter values and their labels
pub const CATEGORIES: [(&str, &str); 5] = [
    ("smartphone", "Smartphones"),
    ("laptop", "Laptops"),
    ("tablet", "Tablets"),
    ("headphones", "Headphones"),
    ("accessories", "Accessories"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOption {
    #[default]
    Newest,
    PriceLow,
    PriceHigh,
}

impl SortOption {
    pub const ALL: [SortOption; 3] = [SortOption::Newest, SortOption::PriceLow, SortOption::PriceHigh];

    pub fn as_str(self) -> &'static str {
        match self {
            SortOption::Newest => "newest",
            SortOption::PriceLow => "price_low",
            SortOption::PriceHigh => "price_high",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortOption::Newest => "Newest First",
            SortOption::PriceLow => "Price: Low to High",
            SortOption::PriceHigh => "Price: High to Low",
        }
    }
}

impl FromStr for SortOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|option| option.as_str() == s)
            .ok_or_else(|| format!("unknown sort option '{}'", s))
    }
}

/// Label for a category filter value, if it is one
pub fn category_label(value: &str) -> Option<&'static str> {
    CATEGORIES
        .iter()
        .find(|(v, _)| *v == value)
        .map(|(_, label)| *label)
}

/// Current filter selection; `None` means "all"
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterState {
    pub category: Option<String>,
    pub condition: Option<ProductCondition>,
    pub search: String,
    pub sort_by: SortOption,
}

impl FilterState {
    pub fn accepts(&self, product: &Product) -> bool {
        if let Some(category) = &self.category {
            if &product.category != category {
                return false;
            }
        }
        if let Some(condition) = self.condition {
            if product.condition != condition {
                return false;
            }
        }
        if !self.search.is_empty() {
            return product.matches_search(&self.search.to_lowercase());
        }
        true
    }

    /// Filter then sort. The sort is stable, so equal keys keep catalog order.
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        let mut visible: Vec<Product> = products
            .iter()
            .filter(|product| self.accepts(product))
            .cloned()
            .collect();

        match self.sort_by {
            SortOption::PriceLow => visible.sort_by_key(|p| p.price),
            SortOption::PriceHigh => visible.sort_by_key(|p| Reverse(p.price)),
            SortOption::Newest => visible.sort_by_key(|p| Reverse(p.created_at)),
        }
        visible
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;
    use crate::catalog::data::products;

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    fn prices(products: &[Product]) -> Vec<u32> {
        products.iter().map(|p| p.price).collect()
    }

    #[test]
    fn test_default_filter_shows_everything() {
        let catalog = products();
        let visible = FilterState::default().apply(&catalog);
        assert_eq!(ids(&visible), vec!["1", "2", "3", "4", "5", "6"]);
    }

    #[test]
    fn test_category_filter() {
        let filters = FilterState {
            category: Some("laptop".into()),
            ..FilterState::default()
        };
        assert_eq!(ids(&filters.apply(&products())), vec!["2", "4"]);
    }

    #[test]
    fn test_condition_filter() {
        let filters = FilterState {
            condition: Some(ProductCondition::Broken),
            ..FilterState::default()
        };
        assert_eq!(ids(&filters.apply(&products())), vec!["1", "6"]);
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let catalog = products();
        let by_brand = FilterState {
            search: "APPLE".into(),
            ..FilterState::default()
        };
        assert_eq!(ids(&by_brand.apply(&catalog)), vec!["1", "2", "6"]);

        let by_description = FilterState {
            search: "warranty".into(),
            ..FilterState::default()
        };
        assert_eq!(ids(&by_description.apply(&catalog)), vec!["3"]);
    }

    #[test]
    fn test_filters_combine() {
        let filters = FilterState {
            category: Some("smartphone".into()),
            condition: Some(ProductCondition::New),
            search: "galaxy".into(),
            sort_by: SortOption::Newest,
        };
        assert_eq!(ids(&filters.apply(&products())), vec!["3"]);
    }

    #[test]
    fn test_empty_category_yields_nothing() {
        let filters = FilterState {
            category: Some("accessories".into()),
            ..FilterState::default()
        };
        assert!(filters.apply(&products()).is_empty());
    }

    #[test]
    fn test_sort_price_low() {
        let filters = FilterState {
            sort_by: SortOption::PriceLow,
            ..FilterState::default()
        };
        assert_eq!(prices(&filters.apply(&products())), vec![150, 220, 350, 400, 899, 1200]);
    }

    #[test]
    fn test_sort_price_high() {
        let filters = FilterState {
            sort_by: SortOption::PriceHigh,
            ..FilterState::default()
        };
        assert_eq!(prices(&filters.apply(&products())), vec![1200, 899, 400, 350, 220, 150]);
    }

    #[test]
    fn test_sort_newest_first() {
        let base = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let mut catalog = products();
        for (offset, product) in catalog.iter_mut().enumerate() {
            product.created_at = base + Duration::hours(offset as i64);
        }

        let visible = FilterState::default().apply(&catalog);
        assert_eq!(ids(&visible), vec!["6", "5", "4", "3", "2", "1"]);
    }

    #[test]
    fn test_sort_option_parsing() {
        assert_eq!("price_low".parse::<SortOption>(), Ok(SortOption::PriceLow));
        assert!("cheapest".parse::<SortOption>().is_err());
        assert_eq!(category_label("tablet"), Some("Tablets"));
        assert_eq!(category_label("phones"), None);
    }
}
