//! # Pricewatch Filter Engine
//!
//! Narrows the canonical row set by the active `FilterState` and derives the
//! cascading option lists shown in each selector.
//!
//! - **Conjunction:** a row is kept iff every set selector equals the row's
//!   attribute exactly. Unset selectors do not constrain.
//! - **Funnel:** the options of a dimension are computed from the rows that
//!   satisfy only the dimensions above it, so the country list never depends
//!   on any selection.

use core_types::{CanonicalRow, FilterDimension, FilterState};
use itertools::Itertools;
use serde::Serialize;

/// The selectable values of every dimension, each deduplicated and sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub countries: Vec<String>,
    pub competitors: Vec<String>,
    pub segments: Vec<String>,
    pub kit_sizes: Vec<String>,
}

impl FilterOptions {
    pub fn get(&self, dimension: FilterDimension) -> &[String] {
        match dimension {
            FilterDimension::Country => &self.countries,
            FilterDimension::Competitor => &self.competitors,
            FilterDimension::Segment => &self.segments,
            FilterDimension::KitSize => &self.kit_sizes,
        }
    }
}

/// Whether a single row satisfies every active selector.
pub fn matches(row: &CanonicalRow, filters: &FilterState) -> bool {
    filters
        .active()
        .all(|(dimension, value)| row.attribute(dimension) == Some(value))
}

/// Keeps the rows that satisfy every active selector, in input order.
pub fn apply_filters<'a, I>(rows: I, filters: &FilterState) -> Vec<&'a CanonicalRow>
where
    I: IntoIterator<Item = &'a CanonicalRow>,
{
    rows.into_iter().filter(|row| matches(row, filters)).collect()
}

/// The option list for one dimension, narrowed by the dimensions above it.
pub fn options_for(
    rows: &[CanonicalRow],
    filters: &FilterState,
    dimension: FilterDimension,
) -> Vec<String> {
    let parents = filters.narrowed_to_parents_of(dimension);
    rows.iter()
        .filter(|row| matches(row, &parents))
        .filter_map(|row| row.attribute(dimension))
        .filter(|value| dimension != FilterDimension::KitSize || !value.is_empty())
        .unique()
        .sorted()
        .map(str::to_string)
        .collect()
}

/// Computes the cascading option lists for all four selectors.
pub fn cascading_options(rows: &[CanonicalRow], filters: &FilterState) -> FilterOptions {
    let options = FilterOptions {
        countries: options_for(rows, filters, FilterDimension::Country),
        competitors: options_for(rows, filters, FilterDimension::Competitor),
        segments: options_for(rows, filters, FilterDimension::Segment),
        kit_sizes: options_for(rows, filters, FilterDimension::KitSize),
    };
    tracing::debug!(
        countries = options.countries.len(),
        competitors = options.competitors.len(),
        segments = options.segments.len(),
        kit_sizes = options.kit_sizes.len(),
        "Derived cascading filter options."
    );
    options
}
