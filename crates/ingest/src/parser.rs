use crate::currency::CurrencyNormalizer;
use crate::fields::{Field, FieldReader};
use core_types::{CanonicalRow, PriceSet, RawRecord};
use rust_decimal::Decimal;

/// Flag values (lowercased, trimmed) that mean "this offer has a promotion".
pub const PROMO_VOCABULARY: [&str; 3] = ["si", "sí", "yes"];

/// The closed set of segment names.
pub const SEGMENTS: [&str; 2] = ["Hogares", "Negocios"];

pub fn is_promo_flag(flag: &str) -> bool {
    let flag = flag.trim().to_lowercase();
    PROMO_VOCABULARY.contains(&flag.as_str())
}

/// Maps segment text onto the closed set case-insensitively; anything else
/// is passed through unchanged.
pub fn normalize_segment(raw: &str) -> String {
    let trimmed = raw.trim();
    SEGMENTS
        .iter()
        .find(|s| s.to_lowercase() == trimmed.to_lowercase())
        .map(|s| s.to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// Turns raw records into canonical rows, one to one and in order.
///
/// Parsing never fails: missing prices become zero, missing optional amounts
/// and percentages stay `None`.
pub struct RowParser<'a> {
    normalizer: &'a CurrencyNormalizer,
}

impl<'a> RowParser<'a> {
    pub fn new(normalizer: &'a CurrencyNormalizer) -> Self {
        Self { normalizer }
    }

    pub fn parse_rows(&self, raw: &[RawRecord]) -> Vec<CanonicalRow> {
        let rows: Vec<CanonicalRow> = raw
            .iter()
            .enumerate()
            .map(|(idx, record)| self.parse_row(idx, record))
            .collect();
        tracing::debug!(rows = rows.len(), "Parsed raw records into canonical rows.");
        rows
    }

    /// Parses one record. `position` is its zero-based index in the input,
    /// used as the identifier when the record carries none.
    pub fn parse_row(&self, position: usize, record: &RawRecord) -> CanonicalRow {
        let reader = FieldReader::new(record);
        let raw_country = reader.text(Field::Country).unwrap_or_default();

        let local = |base: Field, promo: Field, effective: Field| PriceSet {
            base: reader.decimal(base).unwrap_or(Decimal::ZERO),
            promo: reader.decimal(promo).unwrap_or(Decimal::ZERO),
            effective: reader.decimal(effective).unwrap_or(Decimal::ZERO),
        };
        let recurring_local = local(
            Field::RecurringBase,
            Field::RecurringPromo,
            Field::RecurringEffective,
        );
        let installation_local = local(
            Field::InstallationBase,
            Field::InstallationPromo,
            Field::InstallationEffective,
        );
        let promo_amount_local = reader.decimal(Field::PromoAmount);
        let promo_flag = reader.text(Field::PromoFlag).unwrap_or_default();

        CanonicalRow {
            id: reader
                .integer(Field::Id)
                .unwrap_or_else(|| position as i64 + 1),
            country: self.normalizer.normalize_country(Some(raw_country.as_str())),
            competitor: reader.text(Field::Competitor).unwrap_or_default(),
            segment: normalize_segment(&reader.text(Field::Segment).unwrap_or_default()),
            kit_size: reader.text(Field::KitSize),

            recurring: self.to_reference(&recurring_local, &raw_country),
            recurring_local,
            installation: self.to_reference(&installation_local, &raw_country),
            installation_local,

            promo_amount: promo_amount_local
                .map(|v| self.normalizer.convert_to_reference(v, &raw_country)),
            promo_amount_local,
            recurring_promo_pct: reader.decimal(Field::RecurringPromoPct),
            installation_promo_pct: reader.decimal(Field::InstallationPromoPct),

            has_promo: is_promo_flag(&promo_flag),
            promo_flag,
            promo_duration: reader.text(Field::PromoDuration),
        }
    }

    fn to_reference(&self, prices: &PriceSet, country: &str) -> PriceSet {
        PriceSet {
            base: self.normalizer.convert_to_reference(prices.base, country),
            promo: self.normalizer.convert_to_reference(prices.promo, country),
            effective: self.normalizer.convert_to_reference(prices.effective, country),
        }
    }
}

/// Parses a whole batch with the given normalizer.
pub fn parse_rows(raw: &[RawRecord], normalizer: &CurrencyNormalizer) -> Vec<CanonicalRow> {
    RowParser::new(normalizer).parse_rows(raw)
}
