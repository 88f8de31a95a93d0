use configuration::MarketTables;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Maps country identifiers to canonical names and converts local prices to
/// the reference currency.
///
/// Both operations are total: unknown identifiers fall back to the uppercased
/// input for names and to a 1:1 rate for conversion.
#[derive(Debug, Clone)]
pub struct CurrencyNormalizer {
    tables: MarketTables,
    /// Canonical display name -> rate, so "Perú" and "PE" convert alike.
    rates_by_country: HashMap<String, Decimal>,
}

impl CurrencyNormalizer {
    pub fn new(tables: MarketTables) -> Self {
        let mut rates_by_country = HashMap::new();
        for (code, rate) in &tables.exchange_rates {
            if rate.is_zero() {
                tracing::warn!(country = %code, "Exchange rate is zero; prices will pass through unconverted.");
            }
            if let Some(name) = tables.country_aliases.get(code) {
                rates_by_country.insert(name.clone(), *rate);
            }
        }
        Self {
            tables,
            rates_by_country,
        }
    }

    pub fn reference_currency(&self) -> &str {
        &self.tables.reference_currency
    }

    /// Resolves any known spelling of a country to its display name.
    pub fn normalize_country(&self, raw: Option<&str>) -> String {
        let key = raw.unwrap_or_default().trim().to_uppercase();
        match self.tables.country_aliases.get(&key) {
            Some(name) => name.clone(),
            None => key,
        }
    }

    /// The rate for a country identifier, or one if it is unknown or zero.
    pub fn rate_for(&self, country: &str) -> Decimal {
        let key = country.trim().to_uppercase();
        self.tables
            .exchange_rates
            .get(&key)
            .or_else(|| {
                self.tables
                    .country_aliases
                    .get(&key)
                    .and_then(|name| self.rates_by_country.get(name))
            })
            .or_else(|| self.rates_by_country.get(country.trim()))
            .copied()
            .filter(|rate| !rate.is_zero())
            .unwrap_or(Decimal::ONE)
    }

    pub fn convert_to_reference(&self, value: Decimal, country: &str) -> Decimal {
        value.checked_div(self.rate_for(country)).unwrap_or(value)
    }
}

impl Default for CurrencyNormalizer {
    fn default() -> Self {
        Self::new(MarketTables::default())
    }
}
