//! Marketplace catalog
//!
//! Six hard-coded listings browsed with in-memory filtering and sorting.

mod data;
mod filter;
mod product;
mod view;

pub use filter::{category_label, FilterState, SortOption, CATEGORIES};
pub use product::{Product, ProductCondition};
pub use view::MarketplaceView;
