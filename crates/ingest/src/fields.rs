use core_types::RawRecord;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde_json::Value;
use std::str::FromStr;

/// A canonical attribute of a raw pricing record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    Country,
    Competitor,
    Segment,
    KitSize,
    RecurringBase,
    RecurringPromo,
    RecurringEffective,
    InstallationBase,
    InstallationPromo,
    InstallationEffective,
    PromoAmount,
    RecurringPromoPct,
    InstallationPromoPct,
    PromoFlag,
    PromoDuration,
}

/// Source label -> canonical attribute. Applied once per record at parse time.
pub const FIELD_LABELS: &[(&str, Field)] = &[
    ("ID", Field::Id),
    ("País", Field::Country),
    ("Competidor", Field::Competitor),
    ("Segmento", Field::Segment),
    ("Tamaño Kit", Field::KitSize),
    ("Precio Base Mensual", Field::RecurringBase),
    ("Precio Promo Mensual", Field::RecurringPromo),
    ("Precio Efectivo Mensual", Field::RecurringEffective),
    ("Precio Base Alta", Field::InstallationBase),
    ("Precio Promo Alta", Field::InstallationPromo),
    ("Precio Efectivo Alta", Field::InstallationEffective),
    ("Monto Promo", Field::PromoAmount),
    ("% Promo Mensual", Field::RecurringPromoPct),
    ("% Promo Alta", Field::InstallationPromoPct),
    ("Tiene Promo", Field::PromoFlag),
    ("Duración Promo", Field::PromoDuration),
];

impl Field {
    pub fn label(&self) -> &'static str {
        FIELD_LABELS
            .iter()
            .find(|(_, field)| field == self)
            .map(|(label, _)| *label)
            .unwrap_or_default()
    }
}

/// Typed read access to one raw record through the label table.
pub struct FieldReader<'a> {
    record: &'a RawRecord,
}

impl<'a> FieldReader<'a> {
    pub fn new(record: &'a RawRecord) -> Self {
        Self { record }
    }

    /// Exact label first, then a trimmed, case-insensitive match.
    fn value(&self, field: Field) -> Option<&'a Value> {
        let label = field.label();
        if let Some(value) = self.record.get(label) {
            return Some(value);
        }
        let wanted = label.to_lowercase();
        self.record
            .iter()
            .find(|(key, _)| key.trim().to_lowercase() == wanted)
            .map(|(_, value)| value)
    }

    /// Trimmed text; empty strings and `null` are absent.
    pub fn text(&self, field: Field) -> Option<String> {
        let text = match self.value(field)? {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => return None,
        };
        (!text.is_empty()).then_some(text)
    }

    pub fn decimal(&self, field: Field) -> Option<Decimal> {
        let value = self.value(field)?;
        let parsed = parse_decimal(value);
        if parsed.is_none() && !value.is_null() && value.as_str().is_none_or(|s| !s.trim().is_empty()) {
            tracing::debug!(field = field.label(), value = %value, "Ignoring unparseable numeric value.");
        }
        parsed
    }

    pub fn integer(&self, field: Field) -> Option<i64> {
        match self.value(field)? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// Coerces a JSON value to a decimal. Booleans, arrays and objects are absent.
pub fn parse_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Some(Decimal::from(i));
            }
            let text = n.to_string();
            Decimal::from_str(&text)
                .or_else(|_| Decimal::from_scientific(&text))
                .ok()
                .or_else(|| n.as_f64().and_then(Decimal::from_f64))
        }
        Value::String(s) => parse_decimal_text(s),
        _ => None,
    }
}

/// Parses numeric text as found in spreadsheets exported by hand.
///
/// Plain and scientific notation are accepted as is. Otherwise the number is
/// the first run of digits and separators; currency prefixes such as "Bs." or
/// "S/." and unit suffixes around it are ignored, but text with a second
/// number after it is absent. When both `.` and `,` appear the last one is
/// the decimal separator; a lone `,` is a decimal separator. A `%` right after
/// the number makes it a percentage, returned as a ratio.
pub fn parse_decimal_text(text: &str) -> Option<Decimal> {
    let trimmed = text.trim();
    if let Ok(value) = Decimal::from_str(trimmed).or_else(|_| Decimal::from_scientific(trimmed)) {
        return Some(value);
    }

    let chars: Vec<char> = trimmed.chars().collect();
    let start = (0..chars.len()).find(|&i| starts_number(&chars, i))?;
    let mut end = start + 1;
    while end < chars.len()
        && (chars[end].is_ascii_digit() || matches!(chars[end], '.' | ',') || chars[end].is_whitespace())
    {
        end += 1;
    }
    let rest = &chars[end..];
    if rest.iter().any(char::is_ascii_digit) {
        return None;
    }
    let is_percent = rest.iter().find(|c| !c.is_whitespace()) == Some(&'%');

    let span: String = chars[start..end]
        .iter()
        .filter(|c| !c.is_whitespace())
        .collect();
    let mut digits = span.trim_end_matches(['.', ',']).to_string();

    match (digits.rfind('.'), digits.rfind(',')) {
        (Some(dot), Some(comma)) if comma > dot => {
            digits = digits.replace('.', "").replace(',', ".");
        }
        (Some(_), Some(_)) => digits = digits.replace(',', ""),
        (None, Some(_)) => digits = digits.replace(',', "."),
        _ => {}
    }
    if let Some(fraction) = digits.strip_prefix('.') {
        digits = format!("0.{fraction}");
    } else if let Some(fraction) = digits.strip_prefix("-.") {
        digits = format!("-0.{fraction}");
    }

    let value = Decimal::from_str(&digits).ok()?;
    if is_percent {
        value.checked_div(Decimal::ONE_HUNDRED)
    } else {
        Some(value)
    }
}

/// Whether the number starts at `chars[i]`: a digit, or a sign or separator
/// directly followed by one. Separators glued to a word ("Bs.100") are part
/// of the word.
fn starts_number(chars: &[char], i: usize) -> bool {
    let digit_at = |j: usize| chars.get(j).is_some_and(char::is_ascii_digit);
    let separator_at = |j: usize| chars.get(j).is_some_and(|c| matches!(c, '.' | ','));
    let detached = i == 0 || chars[i - 1].is_whitespace() || chars[i - 1] == '$';
    match chars[i] {
        c if c.is_ascii_digit() => true,
        '-' => digit_at(i + 1) || (separator_at(i + 1) && digit_at(i + 2)),
        '.' | ',' => detached && digit_at(i + 1),
        _ => false,
    }
}
