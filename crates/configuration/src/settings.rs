use core_types::{CurrencyMode, PriceType};
use serde::Deserialize;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub dataset: DatasetSettings,
    pub display: DisplaySettings,
    pub logging: LoggingSettings,
}

/// Where the raw pricing observations are read from.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatasetSettings {
    /// Path to a JSON array of raw records.
    pub path: String,
}

/// Defaults for the views shown when the CLI is not told otherwise.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub price_type: PriceType,
    pub currency: CurrencyMode,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// An `EnvFilter` directive, e.g. "info" or "pricewatch=debug,filters=trace".
    pub level: String,
}

// --- Default Implementations ---
// This allows a user to omit any section from their toml, or the file
// entirely, and still have it work with sensible defaults.

impl Default for DatasetSettings {
    fn default() -> Self {
        Self {
            path: "data/prices.json".to_string(),
        }
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            price_type: PriceType::Recurring,
            currency: CurrencyMode::Reference,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
