use crate::enums::{CurrencyMode, FilterDimension, PriceType};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An untyped record as handed over by the dataset loader, keyed by the
/// source's Spanish field labels.
pub type RawRecord = serde_json::Map<String, serde_json::Value>;

/// The three prices of one category (recurring or installation) in one currency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSet {
    pub base: Decimal,
    pub promo: Decimal,
    pub effective: Decimal,
}

/// One priced offer observation, fully typed and normalized.
///
/// Built once by the row parser and never mutated afterwards. Every local
/// price has a reference-currency twin produced by the same conversion rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRow {
    pub id: i64,
    /// Canonical display name, e.g. "Argentina".
    pub country: String,
    pub competitor: String,
    /// "Hogares", "Negocios", or the source text when it matches neither.
    pub segment: String,
    pub kit_size: Option<String>,

    pub recurring: PriceSet,
    pub recurring_local: PriceSet,
    pub installation: PriceSet,
    pub installation_local: PriceSet,

    pub promo_amount: Option<Decimal>,
    pub promo_amount_local: Option<Decimal>,
    /// Signed ratio; negative values are discounts.
    pub recurring_promo_pct: Option<Decimal>,
    /// Signed ratio; negative values are discounts.
    pub installation_promo_pct: Option<Decimal>,

    /// The presence flag exactly as observed.
    pub promo_flag: String,
    pub has_promo: bool,
    pub promo_duration: Option<String>,
}

impl CanonicalRow {
    /// Selects the price set for a category and currency.
    pub fn prices(&self, price_type: PriceType, currency: CurrencyMode) -> &PriceSet {
        match (price_type, currency) {
            (PriceType::Recurring, CurrencyMode::Reference) => &self.recurring,
            (PriceType::Recurring, CurrencyMode::Local) => &self.recurring_local,
            (PriceType::Installation, CurrencyMode::Reference) => &self.installation,
            (PriceType::Installation, CurrencyMode::Local) => &self.installation_local,
        }
    }

    /// The row's value for a filter dimension. Rows without a kit size yield `None`.
    pub fn attribute(&self, dimension: FilterDimension) -> Option<&str> {
        match dimension {
            FilterDimension::Country => Some(self.country.as_str()),
            FilterDimension::Competitor => Some(self.competitor.as_str()),
            FilterDimension::Segment => Some(self.segment.as_str()),
            FilterDimension::KitSize => self.kit_size.as_deref(),
        }
    }
}
