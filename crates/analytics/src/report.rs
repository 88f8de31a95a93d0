use rust_decimal::Decimal;
use serde::Serialize;

/// Box-plot statistics for one sequence of prices.
///
/// Quartiles use the nearest-rank method: the sorted value at index
/// `floor(n * p)`. An empty input yields the all-zero sentinel from `new()`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxplotStats {
    pub min: Decimal,
    pub q1: Decimal,
    pub median: Decimal,
    pub q3: Decimal,
    pub max: Decimal,
    pub mean: Decimal,
    /// The input sorted ascending; renderers use it for outlier fencing.
    pub values: Vec<Decimal>,
}

impl BoxplotStats {
    /// Creates the zeroed-out statistics of an empty sequence.
    pub fn new() -> Self {
        Self {
            min: Decimal::ZERO,
            q1: Decimal::ZERO,
            median: Decimal::ZERO,
            q3: Decimal::ZERO,
            max: Decimal::ZERO,
            mean: Decimal::ZERO,
            values: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Default for BoxplotStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Base versus promotional prices for one group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxplotComparison {
    /// The competitor, or "Todos" when no country is selected.
    pub label: String,
    pub base: BoxplotStats,
    pub promo: BoxplotStats,
    /// `(promo mean - base mean) / base mean * 100`, zero when the base mean is zero.
    pub percentage_diff: Decimal,
}

/// Promotion presence and average discounts over a set of rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromoAnalysis {
    /// Over rows with a promotion and a strictly positive promo amount.
    pub avg_promo_amount: Decimal,
    /// Over rows with a promotion and a negative recurring percentage, in percent units.
    pub avg_recurring_promo_pct: Decimal,
    /// Over all rows with a non-zero installation percentage, in percent units.
    pub avg_alta_promo_pct: Decimal,
    pub with_promo_count: usize,
    pub without_promo_count: usize,
    pub total_count: usize,
}

impl PromoAnalysis {
    /// Creates the analysis of an empty row set.
    pub fn new() -> Self {
        Self {
            avg_promo_amount: Decimal::ZERO,
            avg_recurring_promo_pct: Decimal::ZERO,
            avg_alta_promo_pct: Decimal::ZERO,
            with_promo_count: 0,
            without_promo_count: 0,
            total_count: 0,
        }
    }

    /// Share of rows carrying a promotion, in percent. Zero for an empty set.
    pub fn promo_share_pct(&self) -> Decimal {
        if self.total_count == 0 {
            return Decimal::ZERO;
        }
        Decimal::from(self.with_promo_count)
            .checked_div(Decimal::from(self.total_count))
            .map_or(Decimal::ZERO, |share| share.saturating_mul(Decimal::ONE_HUNDRED))
    }
}

impl Default for PromoAnalysis {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompetitorPromo {
    pub competitor: String,
    pub analysis: PromoAnalysis,
}
