use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::collections::BTreeMap;

/// Exchange rates expressed as local currency units per one unit of the
/// reference currency, keyed by ISO 3166 alpha-2 code.
const EXCHANGE_RATES: &[(&str, Decimal)] = &[
    ("AR", dec!(1676)),
    ("BO", dec!(6.96)),
    ("BR", dec!(5.5)),
    ("CL", dec!(950)),
    ("CO", dec!(4000)),
    ("CR", dec!(510)),
    ("EC", dec!(1)),
    ("GT", dec!(7.75)),
    ("MX", dec!(18.5)),
    ("PA", dec!(1)),
    ("PE", dec!(3.75)),
    ("PY", dec!(7900)),
    ("UY", dec!(40)),
    ("US", dec!(1)),
];

/// Every accepted spelling of a country, already uppercased, and its display name.
const COUNTRY_ALIASES: &[(&str, &str)] = &[
    ("AR", "Argentina"),
    ("ARG", "Argentina"),
    ("ARGENTINA", "Argentina"),
    ("BO", "Bolivia"),
    ("BOL", "Bolivia"),
    ("BOLIVIA", "Bolivia"),
    ("BR", "Brasil"),
    ("BRA", "Brasil"),
    ("BRASIL", "Brasil"),
    ("BRAZIL", "Brasil"),
    ("CL", "Chile"),
    ("CHL", "Chile"),
    ("CHI", "Chile"),
    ("CHILE", "Chile"),
    ("CO", "Colombia"),
    ("COL", "Colombia"),
    ("COLOMBIA", "Colombia"),
    ("CR", "Costa Rica"),
    ("CRI", "Costa Rica"),
    ("COSTA RICA", "Costa Rica"),
    ("EC", "Ecuador"),
    ("ECU", "Ecuador"),
    ("ECUADOR", "Ecuador"),
    ("GT", "Guatemala"),
    ("GTM", "Guatemala"),
    ("GUA", "Guatemala"),
    ("GUATEMALA", "Guatemala"),
    ("MX", "México"),
    ("MEX", "México"),
    ("MEXICO", "México"),
    ("MÉXICO", "México"),
    ("PA", "Panamá"),
    ("PAN", "Panamá"),
    ("PANAMA", "Panamá"),
    ("PANAMÁ", "Panamá"),
    ("PE", "Perú"),
    ("PER", "Perú"),
    ("PERU", "Perú"),
    ("PERÚ", "Perú"),
    ("PY", "Paraguay"),
    ("PRY", "Paraguay"),
    ("PAR", "Paraguay"),
    ("PARAGUAY", "Paraguay"),
    ("UY", "Uruguay"),
    ("URY", "Uruguay"),
    ("URU", "Uruguay"),
    ("URUGUAY", "Uruguay"),
    ("US", "Estados Unidos"),
    ("USA", "Estados Unidos"),
    ("EEUU", "Estados Unidos"),
    ("ESTADOS UNIDOS", "Estados Unidos"),
];

/// The static lookup tables used to normalize countries and convert prices.
///
/// These are compiled in and never read from `config.toml`. `Default` yields
/// the built-in tables; tests can construct alternates directly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketTables {
    /// Label of the currency all converted prices are expressed in.
    pub reference_currency: String,
    /// Uppercased country identifier -> local units per reference unit.
    pub exchange_rates: BTreeMap<String, Decimal>,
    /// Uppercased alias -> canonical display name.
    pub country_aliases: BTreeMap<String, String>,
}

impl MarketTables {
    pub fn new(
        reference_currency: impl Into<String>,
        exchange_rates: impl IntoIterator<Item = (String, Decimal)>,
        country_aliases: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        Self {
            reference_currency: reference_currency.into(),
            exchange_rates: exchange_rates
                .into_iter()
                .map(|(k, v)| (k.trim().to_uppercase(), v))
                .collect(),
            country_aliases: country_aliases
                .into_iter()
                .map(|(k, v)| (k.trim().to_uppercase(), v))
                .collect(),
        }
    }
}

impl Default for MarketTables {
    fn default() -> Self {
        Self::new(
            "USD",
            EXCHANGE_RATES.iter().map(|(k, v)| (k.to_string(), *v)),
            COUNTRY_ALIASES.iter().map(|(k, v)| (k.to_string(), v.to_string())),
        )
    }
}
