use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The price category a box-plot is drawn for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum PriceType {
    /// The monthly fee.
    Recurring,
    /// The one-off installation ("alta") fee.
    Installation,
}

impl PriceType {
    /// Installation prices are frequently recorded as zero when not charged,
    /// so zeros are dropped before computing statistics for them.
    pub fn drops_zero_values(&self) -> bool {
        matches!(self, PriceType::Installation)
    }
}

impl fmt::Display for PriceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceType::Recurring => write!(f, "recurring"),
            PriceType::Installation => write!(f, "installation"),
        }
    }
}

impl FromStr for PriceType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "recurring" | "mensual" => Ok(PriceType::Recurring),
            "installation" | "alta" => Ok(PriceType::Installation),
            other => Err(CoreError::InvalidInput("price type".to_string(), other.to_string())),
        }
    }
}

/// Which of the two stored currencies a price is read in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum CurrencyMode {
    /// Converted to the reference currency with the static exchange rates.
    Reference,
    /// The country's own currency, as observed.
    Local,
}

impl fmt::Display for CurrencyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurrencyMode::Reference => write!(f, "reference"),
            CurrencyMode::Local => write!(f, "local"),
        }
    }
}

impl FromStr for CurrencyMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reference" | "usd" => Ok(CurrencyMode::Reference),
            "local" => Ok(CurrencyMode::Local),
            other => Err(CoreError::InvalidInput("currency mode".to_string(), other.to_string())),
        }
    }
}

/// The four filter selectors, declared in priority order.
///
/// The derived `Ord` follows declaration order, so `Country < Competitor < Segment < KitSize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterDimension {
    Country,
    Competitor,
    Segment,
    KitSize,
}

impl FilterDimension {
    /// Every dimension, highest priority first.
    pub const ALL: [FilterDimension; 4] = [
        FilterDimension::Country,
        FilterDimension::Competitor,
        FilterDimension::Segment,
        FilterDimension::KitSize,
    ];

    /// The dimensions that narrow the option list of `self`.
    pub fn higher_priority(&self) -> &'static [FilterDimension] {
        use FilterDimension::*;
        match self {
            Country => &[],
            Competitor => &[Country],
            Segment => &[Country, Competitor],
            KitSize => &[Country, Competitor, Segment],
        }
    }
}

impl fmt::Display for FilterDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterDimension::Country => write!(f, "country"),
            FilterDimension::Competitor => write!(f, "competitor"),
            FilterDimension::Segment => write!(f, "segment"),
            FilterDimension::KitSize => write!(f, "kit_size"),
        }
    }
}

impl FromStr for FilterDimension {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "country" => Ok(FilterDimension::Country),
            "competitor" => Ok(FilterDimension::Competitor),
            "segment" => Ok(FilterDimension::Segment),
            "kit_size" | "kit" => Ok(FilterDimension::KitSize),
            other => Err(CoreError::InvalidInput("filter dimension".to_string(), other.to_string())),
        }
    }
}
