use analytics::{BoxplotComparison, CompetitorPromo, PromoAnalysis};
use core_types::{CurrencyMode, FilterState, PriceType};
use filters::FilterOptions;
use serde::Serialize;

/// Everything the presentation layer needs for one filter selection.
///
/// A fresh value is produced on every call to `Dashboard::view`; nothing in
/// it is updated in place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub filters: FilterState,
    pub options: FilterOptions,
    pub price_type: PriceType,
    pub currency: CurrencyMode,
    /// Rows matching every active selector.
    pub matching_rows: usize,
    pub comparisons: Vec<BoxplotComparison>,
    pub promotions: PromoAnalysis,
    pub promotions_by_competitor: Vec<CompetitorPromo>,
}
