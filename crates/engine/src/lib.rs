//! # Pricewatch Engine
//!
//! The session object behind the dashboard. `Dashboard` parses the dataset
//! once, keeps the rows immutable for its whole lifetime, and owns the only
//! piece of mutable state: the current `FilterState`. Every selection change
//! goes through the priority-ordered transition, and `view` re-derives all
//! outputs synchronously from scratch.

use analytics::{AnalyticsEngine, BoxplotComparison, CompetitorPromo, PromoAnalysis};
use core_types::{CanonicalRow, CurrencyMode, FilterDimension, FilterState, PriceType, RawRecord};
use filters::{FilterOptions, apply_filters, cascading_options, options_for};
use ingest::{CurrencyNormalizer, parse_rows};

pub mod view;

pub use view::DashboardView;

pub struct Dashboard {
    rows: Vec<CanonicalRow>,
    filters: FilterState,
    analytics: AnalyticsEngine,
}

impl Dashboard {
    /// Creates a session over already-parsed rows with no active filters.
    pub fn new(rows: Vec<CanonicalRow>) -> Self {
        tracing::info!(rows = rows.len(), "Dashboard initialized.");
        Self {
            rows,
            filters: FilterState::new(),
            analytics: AnalyticsEngine::new(),
        }
    }

    /// Parses the raw dataset once and creates a session over it.
    pub fn from_raw(raw: &[RawRecord], normalizer: &CurrencyNormalizer) -> Self {
        Self::new(parse_rows(raw, normalizer))
    }

    pub fn rows(&self) -> &[CanonicalRow] {
        &self.rows
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Changes one selector, clearing every lower-priority one.
    pub fn select(&mut self, dimension: FilterDimension, value: Option<String>) -> &FilterState {
        if let Some(v) = value.as_deref() {
            let offered = options_for(&self.rows, &self.filters, dimension);
            if !offered.iter().any(|o| o == v) {
                tracing::warn!(%dimension, value = v, "Selected value is not among the current options; no rows will match.");
            }
        }
        self.filters = self.filters.select(dimension, value);
        tracing::debug!(filters = ?self.filters, "Filter selection changed.");
        &self.filters
    }

    /// Clears every selector.
    pub fn reset(&mut self) {
        self.filters = FilterState::new();
    }

    pub fn options(&self) -> FilterOptions {
        cascading_options(&self.rows, &self.filters)
    }

    pub fn filtered_rows(&self) -> Vec<&CanonicalRow> {
        apply_filters(&self.rows, &self.filters)
    }

    pub fn comparisons(&self, price_type: PriceType, currency: CurrencyMode) -> Vec<BoxplotComparison> {
        self.analytics
            .compare_by_group(&self.rows, &self.filters, price_type, currency)
    }

    /// Promotion analysis over the rows matching the current selection.
    pub fn promotions(&self, currency: CurrencyMode) -> PromoAnalysis {
        self.analytics
            .analyze_promotions_in(self.filtered_rows(), currency)
    }

    pub fn promotions_by_competitor(&self, currency: CurrencyMode) -> Vec<CompetitorPromo> {
        self.analytics
            .analyze_by_competitor_in(self.filtered_rows(), currency)
    }

    /// Re-derives every output for the current selection in one pass.
    pub fn view(&self, price_type: PriceType, currency: CurrencyMode) -> DashboardView {
        let filtered = self.filtered_rows();
        DashboardView {
            filters: self.filters.clone(),
            options: self.options(),
            price_type,
            currency,
            matching_rows: filtered.len(),
            comparisons: self.comparisons(price_type, currency),
            promotions: self
                .analytics
                .analyze_promotions_in(filtered.iter().copied(), currency),
            promotions_by_competitor: self
                .analytics
                .analyze_by_competitor_in(filtered.iter().copied(), currency),
        }
    }
}
