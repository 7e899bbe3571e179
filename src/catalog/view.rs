//! Marketplace browsing state: filters, detail selection, filter panel

use tracing::debug;

use super::data;
use super::filter::FilterState;
use super::product::Product;

/// What the marketplace page is showing
#[derive(Debug, Clone)]
pub struct MarketplaceView {
    catalog: Vec<Product>,
    filters: FilterState,
    selected: Option<String>,
    show_filters: bool,
}

impl Default for MarketplaceView {
    fn default() -> Self {
        Self::new(data::products())
    }
}

impl MarketplaceView {
    pub fn new(catalog: Vec<Product>) -> Self {
        Self {
            catalog,
            filters: FilterState::default(),
            selected: None,
            show_filters: false,
        }
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn filters_mut(&mut self) -> &mut FilterState {
        &mut self.filters
    }

    pub fn reset_filters(&mut self) {
        self.filters = FilterState::default();
        debug!("marketplace filters reset");
    }

    /// Products passing the current filters, in display order
    pub fn visible(&self) -> Vec<Product> {
        self.filters.apply(&self.catalog)
    }

    /// Open the detail view for `id`; returns the product if it exists
    pub fn select(&mut self, id: &str) -> Option<&Product> {
        let product = self.catalog.iter().find(|p| p.id == id)?;
        self.selected = Some(product.id.clone());
        Some(product)
    }

    /// Product in the detail view, if one is open
    pub fn selected(&self) -> Option<&Product> {
        let id = self.selected.as_deref()?;
        self.catalog.iter().find(|p| p.id == id)
    }

    /// Close the detail view; closing when nothing is open is fine
    pub fn close(&mut self) {
        self.selected = None;
    }

    /// Flip the filter panel, returning whether it is now shown
    pub fn toggle_filters(&mut self) -> bool {
        self.show_filters = !self.show_filters;
        self.show_filters
    }

    pub fn filters_shown(&self) -> bool {
        self.show_filters
    }
}
