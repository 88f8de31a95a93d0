use crate::collate::locale_cmp;
use crate::report::{BoxplotComparison, CompetitorPromo, PromoAnalysis};
use crate::stats::{compute_stats, mean, percentage_diff};
use core_types::{CanonicalRow, CurrencyMode, FilterState, PriceType};
use filters::apply_filters;
use itertools::Itertools;
use rust_decimal::Decimal;

/// Label of the single group used when no country is selected.
pub const ALL_GROUP_LABEL: &str = "Todos";

/// A stateless calculator for deriving box-plot and promotion views from
/// canonical pricing rows.
#[derive(Debug, Default)]
pub struct AnalyticsEngine {}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compares base and promotional prices per group.
    ///
    /// Without a country selection the whole filtered set is one "Todos"
    /// group; with one, there is a group per competitor, sorted by label.
    /// Groups whose base prices end up empty are left out.
    pub fn compare_by_group(
        &self,
        rows: &[CanonicalRow],
        filters: &FilterState,
        price_type: PriceType,
        currency: CurrencyMode,
    ) -> Vec<BoxplotComparison> {
        let eligible = apply_filters(rows, filters);
        if eligible.is_empty() {
            return Vec::new();
        }

        let groups: Vec<(String, Vec<&CanonicalRow>)> = if filters.country.is_none() {
            vec![(ALL_GROUP_LABEL.to_string(), eligible)]
        } else {
            eligible
                .into_iter()
                .into_group_map_by(|row| row.competitor.clone())
                .into_iter()
                .sorted_by(|a, b| locale_cmp(&a.0, &b.0))
                .collect()
        };

        let comparisons: Vec<BoxplotComparison> = groups
            .into_iter()
            .filter_map(|(label, members)| self.compare_group(label, &members, price_type, currency))
            .collect();

        tracing::debug!(
            groups = comparisons.len(),
            %price_type,
            %currency,
            "Computed box-plot comparisons."
        );
        comparisons
    }

    fn compare_group(
        &self,
        label: String,
        rows: &[&CanonicalRow],
        price_type: PriceType,
        currency: CurrencyMode,
    ) -> Option<BoxplotComparison> {
        let mut base: Vec<Decimal> = rows.iter().map(|r| r.prices(price_type, currency).base).collect();
        let mut promo: Vec<Decimal> = rows.iter().map(|r| r.prices(price_type, currency).promo).collect();

        if price_type.drops_zero_values() {
            base.retain(|v| !v.is_zero());
            promo.retain(|v| !v.is_zero());
        }
        if base.is_empty() {
            tracing::debug!(group = %label, "Dropping group without base prices.");
            return None;
        }

        let base = compute_stats(&base);
        let promo = compute_stats(&promo);
        let diff = percentage_diff(base.mean, promo.mean);

        Some(BoxplotComparison {
            label,
            base,
            promo,
            percentage_diff: diff,
        })
    }

    /// Promotion analysis with promo amounts in the reference currency.
    pub fn analyze_promotions<'a, I>(&self, rows: I) -> PromoAnalysis
    where
        I: IntoIterator<Item = &'a CanonicalRow>,
    {
        self.analyze_promotions_in(rows, CurrencyMode::Reference)
    }

    /// Promotion presence counts and average discounts.
    ///
    /// The installation percentage average covers every row, not
    /// only rows flagged as having a promotion.
    pub fn analyze_promotions_in<'a, I>(&self, rows: I, currency: CurrencyMode) -> PromoAnalysis
    where
        I: IntoIterator<Item = &'a CanonicalRow>,
    {
        let rows: Vec<&CanonicalRow> = rows.into_iter().collect();
        if rows.is_empty() {
            return PromoAnalysis::new();
        }

        let (with_promo, without_promo): (Vec<&CanonicalRow>, Vec<&CanonicalRow>) =
            rows.iter().copied().partition(|r| r.has_promo);

        let amounts: Vec<Decimal> = with_promo
            .iter()
            .filter_map(|r| match currency {
                CurrencyMode::Reference => r.promo_amount,
                CurrencyMode::Local => r.promo_amount_local,
            })
            .filter(|v| *v > Decimal::ZERO)
            .collect();

        let recurring_discounts: Vec<Decimal> = with_promo
            .iter()
            .filter_map(|r| r.recurring_promo_pct)
            .filter(|v| *v < Decimal::ZERO)
            .map(as_percent)
            .collect();

        let alta_discounts: Vec<Decimal> = rows
            .iter()
            .filter_map(|r| r.installation_promo_pct)
            .filter(|v| !v.is_zero())
            .map(as_percent)
            .collect();

        PromoAnalysis {
            avg_promo_amount: mean(&amounts),
            avg_recurring_promo_pct: mean(&recurring_discounts),
            avg_alta_promo_pct: mean(&alta_discounts),
            with_promo_count: with_promo.len(),
            without_promo_count: without_promo.len(),
            total_count: rows.len(),
        }
    }

    /// Runs the promotion analysis per competitor, sorted by competitor.
    pub fn analyze_by_competitor<'a, I>(&self, rows: I) -> Vec<CompetitorPromo>
    where
        I: IntoIterator<Item = &'a CanonicalRow>,
    {
        self.analyze_by_competitor_in(rows, CurrencyMode::Reference)
    }

    pub fn analyze_by_competitor_in<'a, I>(&self, rows: I, currency: CurrencyMode) -> Vec<CompetitorPromo>
    where
        I: IntoIterator<Item = &'a CanonicalRow>,
    {
        rows.into_iter()
            .into_group_map_by(|row| row.competitor.clone())
            .into_iter()
            .sorted_by(|a, b| locale_cmp(&a.0, &b.0))
            .map(|(competitor, members)| CompetitorPromo {
                analysis: self.analyze_promotions_in(members, currency),
                competitor,
            })
            .collect()
    }
}

/// A signed ratio as a positive percentage, e.g. -0.25 -> 25. Saturates at `Decimal::MAX`.
fn as_percent(ratio: Decimal) -> Decimal {
    ratio.abs().saturating_mul(Decimal::ONE_HUNDRED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{FilterDimension, PriceSet};
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn row(country: &str, competitor: &str, base: Decimal, promo: Decimal) -> CanonicalRow {
        let prices = PriceSet {
            base,
            promo,
            effective: promo,
        };
        CanonicalRow {
            id: 0,
            country: country.to_string(),
            competitor: competitor.to_string(),
            segment: "Hogares".to_string(),
            kit_size: None,
            recurring: prices,
            recurring_local: PriceSet {
                base: base * dec!(10),
                promo: promo * dec!(10),
                effective: promo * dec!(10),
            },
            installation: prices,
            installation_local: prices,
            promo_amount: None,
            promo_amount_local: None,
            recurring_promo_pct: None,
            installation_promo_pct: None,
            promo_flag: String::new(),
            has_promo: false,
            promo_duration: None,
        }
    }

    fn promo_row(flag: bool, amount: Option<Decimal>, recurring: Option<Decimal>, alta: Option<Decimal>) -> CanonicalRow {
        CanonicalRow {
            promo_amount: amount,
            promo_amount_local: amount.map(|a| a.saturating_mul(dec!(10))),
            recurring_promo_pct: recurring,
            installation_promo_pct: alta,
            promo_flag: if flag { "Sí".to_string() } else { "No".to_string() },
            has_promo: flag,
            ..row("Chile", "Entel", dec!(10), dec!(8))
        }
    }

    #[test]
    fn no_country_means_a_single_todos_group() {
        let rows = vec![
            row("Chile", "B", dec!(10), dec!(8)),
            row("Perú", "A", dec!(30), dec!(24)),
        ];
        let out = AnalyticsEngine::new().compare_by_group(
            &rows,
            &FilterState::new(),
            PriceType::Recurring,
            CurrencyMode::Reference,
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].label, ALL_GROUP_LABEL);
        assert_eq!(out[0].base.mean, dec!(20));
        assert_eq!(out[0].promo.mean, dec!(16));
        assert_eq!(out[0].percentage_diff, dec!(-20));
    }

    #[test]
    fn country_selection_groups_by_competitor_in_order() {
        let rows = vec![
            row("Chile", "B", dec!(10), dec!(8)),
            row("Chile", "A", dec!(20), dec!(20)),
            row("Perú", "C", dec!(5), dec!(5)),
        ];
        let filters = FilterState::new().select(FilterDimension::Country, Some("Chile".into()));
        let out = AnalyticsEngine::new().compare_by_group(
            &rows,
            &filters,
            PriceType::Recurring,
            CurrencyMode::Local,
        );
        let labels: Vec<&str> = out.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["A", "B"]);
        assert_eq!(out[1].base.mean, dec!(100));
        assert_eq!(out[0].percentage_diff, Decimal::ZERO);
    }

    #[test]
    fn installation_zeros_are_dropped() {
        let rows = vec![
            row("Chile", "A", dec!(0), dec!(0)),
            row("Chile", "A", dec!(0), dec!(0)),
            row("Chile", "A", dec!(50), dec!(0)),
            row("Chile", "A", dec!(100), dec!(40)),
        ];
        let out = AnalyticsEngine::new().compare_by_group(
            &rows,
            &FilterState::new(),
            PriceType::Installation,
            CurrencyMode::Reference,
        );
        assert_eq!(out[0].base.min, dec!(50));
        assert_eq!(out[0].base.max, dec!(100));
        assert_eq!(out[0].base.values.len(), 2);
        assert_eq!(out[0].promo.values, vec![dec!(40)]);
    }

    #[test]
    fn recurring_zeros_are_kept() {
        let rows = vec![row("Chile", "A", dec!(0), dec!(0)), row("Chile", "A", dec!(10), dec!(5))];
        let out = AnalyticsEngine::new().compare_by_group(
            &rows,
            &FilterState::new(),
            PriceType::Recurring,
            CurrencyMode::Reference,
        );
        assert_eq!(out[0].base.values.len(), 2);
        assert_eq!(out[0].base.min, Decimal::ZERO);
    }

    #[test]
    fn groups_without_installation_prices_are_omitted() {
        let rows = vec![row("Chile", "A", dec!(0), dec!(10)), row("Chile", "B", dec!(30), dec!(0))];
        let filters = FilterState::new().select(FilterDimension::Country, Some("Chile".into()));
        let out = AnalyticsEngine::new().compare_by_group(
            &rows,
            &filters,
            PriceType::Installation,
            CurrencyMode::Reference,
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].label, "B");
        assert!(out[0].promo.is_empty());
        assert_eq!(out[0].percentage_diff, dec!(-100));
    }

    #[test]
    fn no_matching_rows_yield_no_groups() {
        let rows = vec![row("Chile", "A", dec!(10), dec!(5))];
        let filters = FilterState::new().select(FilterDimension::Country, Some("Perú".into()));
        let out = AnalyticsEngine::new().compare_by_group(
            &rows,
            &filters,
            PriceType::Recurring,
            CurrencyMode::Reference,
        );
        assert!(out.is_empty());
    }

    #[test]
    fn promo_averages_follow_their_own_exclusion_rules() {
        let rows = vec![
            promo_row(true, Some(dec!(10)), Some(dec!(-0.2)), Some(dec!(-0.5))),
            promo_row(true, Some(dec!(0)), Some(dec!(0.1)), None),
            promo_row(true, None, Some(dec!(-0.4)), Some(dec!(0))),
            promo_row(false, Some(dec!(99)), Some(dec!(-0.9)), Some(dec!(-1))),
        ];
        let analysis = AnalyticsEngine::new().analyze_promotions(&rows);

        assert_eq!(analysis.avg_promo_amount, dec!(10));
        // only -0.2 and -0.4 qualify
        assert_eq!(analysis.avg_recurring_promo_pct, dec!(30));
        // -0.5 and -1 qualify, regardless of the promo flag
        assert_eq!(analysis.avg_alta_promo_pct, dec!(75));
        assert_eq!(analysis.with_promo_count, 3);
        assert_eq!(analysis.without_promo_count, 1);
        assert_eq!(analysis.total_count, 4);
    }

    #[test]
    fn local_promo_amounts_can_be_requested() {
        let rows = vec![promo_row(true, Some(dec!(10)), None, None)];
        let analysis = AnalyticsEngine::new().analyze_promotions_in(&rows, CurrencyMode::Local);
        assert_eq!(analysis.avg_promo_amount, dec!(100));
    }

    #[test]
    fn empty_rows_yield_an_all_zero_analysis() {
        let rows: Vec<CanonicalRow> = Vec::new();
        let analysis = AnalyticsEngine::new().analyze_promotions(&rows);
        assert_eq!(analysis, PromoAnalysis::new());
        assert_eq!(analysis.promo_share_pct(), Decimal::ZERO);
    }

    #[test]
    fn per_competitor_analysis_is_sorted() {
        let rows = vec![
            CanonicalRow { competitor: "Movistar".into(), ..promo_row(true, None, None, None) },
            CanonicalRow { competitor: "Claro".into(), ..promo_row(false, None, None, None) },
            CanonicalRow { competitor: "Movistar".into(), ..promo_row(false, None, None, None) },
        ];
        let out = AnalyticsEngine::new().analyze_by_competitor(&rows);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].competitor, "Claro");
        assert_eq!(out[0].analysis.total_count, 1);
        assert_eq!(out[1].competitor, "Movistar");
        assert_eq!(out[1].analysis.with_promo_count, 1);
        assert_eq!(out[1].analysis.promo_share_pct(), dec!(50));
    }

    #[test]
    fn huge_percentages_saturate_instead_of_overflowing() {
        let huge = Decimal::from_i128_with_scale(-1_000_000_000_000_000_000_000_000_000, 0);
        let rows = vec![
            promo_row(true, Some(Decimal::MAX), Some(huge), Some(huge)),
            promo_row(true, Some(Decimal::MAX), Some(dec!(-0.5)), Some(Decimal::MIN)),
        ];
        let analysis = AnalyticsEngine::new().analyze_promotions(&rows);
        assert_eq!(analysis.avg_alta_promo_pct, Decimal::MAX);
        assert_eq!(analysis.avg_promo_amount, Decimal::MAX);
        assert!(analysis.avg_recurring_promo_pct > dec!(50));
        assert_eq!(analysis.total_count, 2);
    }

    #[test]
    fn prices_near_the_decimal_limit_still_compare() {
        let big = Decimal::from_i128_with_scale(50_000_000_000_000_000_000_000_000_000, 0);
        let huge = PriceSet {
            base: big,
            promo: big,
            effective: big,
        };
        let rows = vec![
            CanonicalRow { recurring: huge, ..row("Chile", "A", dec!(1), dec!(1)) },
            CanonicalRow { recurring: huge, ..row("Chile", "A", dec!(1), dec!(1)) },
        ];
        let out = AnalyticsEngine::new().compare_by_group(
            &rows,
            &FilterState::new(),
            PriceType::Recurring,
            CurrencyMode::Reference,
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].base.mean, big);
        assert_eq!(out[0].percentage_diff, Decimal::ZERO);
    }

    proptest! {
        #[test]
        fn promo_counts_always_add_up(flags in prop::collection::vec(any::<bool>(), 0..50)) {
            let rows: Vec<CanonicalRow> = flags
                .iter()
                .map(|f| promo_row(*f, None, None, None))
                .collect();
            let a = AnalyticsEngine::new().analyze_promotions(&rows);
            prop_assert_eq!(a.with_promo_count + a.without_promo_count, a.total_count);
            prop_assert_eq!(a.total_count, rows.len());
        }
    }
}
