//! # Pricewatch Ingest
//!
//! Turns the untyped records of the competitor-pricing dataset into typed
//! `CanonicalRow`s, normalizing countries and segments and converting every
//! local price to the reference currency exactly once.
//!
//! ## Public API
//!
//! - `CurrencyNormalizer`: country aliasing and exchange-rate conversion over injected `MarketTables`.
//! - `RowParser` / `parse_rows`: the one-to-one, order-preserving record parser.
//! - `Field` / `FIELD_LABELS`: the fixed source-label table.

pub mod currency;
pub mod fields;
pub mod parser;

pub use currency::CurrencyNormalizer;
pub use fields::{FIELD_LABELS, Field};
pub use parser::{RowParser, is_promo_flag, normalize_segment, parse_rows};
