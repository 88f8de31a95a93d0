use crate::error::ConfigError;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;
pub mod tables;

// Re-export the core types to provide a clean public API.
pub use settings::{DatasetSettings, DisplaySettings, LoggingSettings, Settings};
pub use tables::MarketTables;

/// Loads the application settings from `config.toml` in the working directory.
///
/// The file is optional; any value can also be overridden through environment
/// variables such as `PRICEWATCH__DATASET__PATH`.
pub fn load_config() -> Result<Settings, ConfigError> {
    load_config_from("config")
}

/// Loads settings from the named file (extension optional) plus the environment.
pub fn load_config_from(name: &str) -> Result<Settings, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::with_name(name).required(false))
        .add_source(config::Environment::with_prefix("PRICEWATCH").separator("__"))
        .build()?;

    let settings = builder.try_deserialize::<Settings>()?;
    validate(&settings)?;

    tracing::debug!(dataset = %settings.dataset.path, "Configuration loaded.");
    Ok(settings)
}

fn validate(settings: &Settings) -> Result<(), ConfigError> {
    if settings.dataset.path.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "dataset.path must not be empty".to_string(),
        ));
    }
    if settings.logging.level.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "logging.level must not be empty".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{CurrencyMode, PriceType};

    #[test]
    fn missing_file_yields_defaults() {
        let settings = load_config_from("does-not-exist/pricewatch").unwrap();
        assert_eq!(settings.display.price_type, PriceType::Recurring);
        assert_eq!(settings.display.currency, CurrencyMode::Reference);
        assert!(!settings.dataset.path.is_empty());
    }

    #[test]
    fn rejects_empty_dataset_path() {
        let mut settings = Settings::default();
        settings.dataset.path = "  ".to_string();
        assert!(matches!(validate(&settings), Err(ConfigError::ValidationError(_))));
    }
}
