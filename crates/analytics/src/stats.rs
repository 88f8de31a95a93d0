use crate::report::BoxplotStats;
use rust_decimal::Decimal;

/// Computes min, nearest-rank quartiles, max and mean of `values`.
pub fn compute_stats(values: &[Decimal]) -> BoxplotStats {
    if values.is_empty() {
        return BoxplotStats::new();
    }

    let mut sorted = values.to_vec();
    sorted.sort();

    let n = sorted.len();
    // floor(n * p) for p = 0.25, 0.5, 0.75; always < n.
    let q1 = sorted[n / 4];
    let median = sorted[n / 2];
    let q3 = sorted[n * 3 / 4];

    let (min, max) = (sorted[0], sorted[n - 1]);
    BoxplotStats {
        min,
        q1,
        median,
        q3,
        max,
        // The fallback path in `mean` rounds per term; keep it inside the range.
        mean: mean(values).clamp(min, max),
        values: sorted,
    }
}

/// Arithmetic mean; zero for an empty slice.
///
/// When the running sum would overflow, the mean is taken as the sum of
/// `value / n` instead, saturating at the bounds of `Decimal`.
pub fn mean(values: &[Decimal]) -> Decimal {
    if values.is_empty() {
        return Decimal::ZERO;
    }
    let n = Decimal::from(values.len());
    let sum = values
        .iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(*v));
    if let Some(mean) = sum.and_then(|s| s.checked_div(n)) {
        return mean;
    }

    tracing::warn!(values = values.len(), "Sum overflows Decimal; averaging scaled terms.");
    values
        .iter()
        .filter_map(|v| v.checked_div(n))
        .fold(Decimal::ZERO, |acc, term| acc.saturating_add(term))
}

/// Relative change from `base_mean` to `promo_mean`, in percent.
///
/// Zero when `base_mean` is zero. Results beyond the range of `Decimal`
/// saturate at `Decimal::MAX` or `Decimal::MIN`.
pub fn percentage_diff(base_mean: Decimal, promo_mean: Decimal) -> Decimal {
    if base_mean.is_zero() {
        return Decimal::ZERO;
    }
    let ratio = match promo_mean.checked_sub(base_mean) {
        Some(delta) => delta.checked_div(base_mean),
        None => promo_mean
            .checked_div(base_mean)
            .and_then(|r| r.checked_sub(Decimal::ONE)),
    };
    match ratio {
        Some(ratio) => ratio.saturating_mul(Decimal::ONE_HUNDRED),
        None => {
            tracing::warn!(%base_mean, %promo_mean, "Percentage difference overflows Decimal; saturating.");
            if (promo_mean > base_mean) == base_mean.is_sign_positive() {
                Decimal::MAX
            } else {
                Decimal::MIN
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn four_values_use_nearest_rank_indices() {
        let stats = compute_stats(&[dec!(40), dec!(10), dec!(30), dec!(20)]);
        assert_eq!(stats.min, dec!(10));
        assert_eq!(stats.q1, dec!(20));
        assert_eq!(stats.median, dec!(30));
        assert_eq!(stats.q3, dec!(40));
        assert_eq!(stats.max, dec!(40));
        assert_eq!(stats.mean, dec!(25));
        assert_eq!(stats.values, vec![dec!(10), dec!(20), dec!(30), dec!(40)]);
    }

    #[test]
    fn single_value_fills_every_field() {
        let stats = compute_stats(&[dec!(7.5)]);
        assert_eq!(stats.min, dec!(7.5));
        assert_eq!(stats.q1, dec!(7.5));
        assert_eq!(stats.q3, dec!(7.5));
        assert_eq!(stats.mean, dec!(7.5));
    }

    #[test]
    fn five_values_are_not_interpolated() {
        let stats = compute_stats(&[dec!(1), dec!(2), dec!(3), dec!(4), dec!(100)]);
        // indices 1, 2, 3
        assert_eq!(stats.q1, dec!(2));
        assert_eq!(stats.median, dec!(3));
        assert_eq!(stats.q3, dec!(4));
        assert_eq!(stats.mean, dec!(22));
    }

    #[test]
    fn empty_input_is_the_zero_sentinel() {
        let stats = compute_stats(&[]);
        assert_eq!(stats, BoxplotStats::new());
        assert!(stats.values.is_empty());
        assert_eq!(stats.mean, Decimal::ZERO);
    }

    #[test]
    fn percentage_diff_of_a_discount_is_negative() {
        assert_eq!(percentage_diff(dec!(50), dec!(40)), dec!(-20));
        assert_eq!(percentage_diff(dec!(0), dec!(40)), Decimal::ZERO);
    }

    #[test]
    fn overflowing_sum_still_yields_a_mean() {
        let big = Decimal::from_i128_with_scale(50_000_000_000_000_000_000_000_000_000, 0);
        let stats = compute_stats(&[big, big]);
        assert_eq!(stats.mean, big);
        assert_eq!(stats.median, big);

        let stats = compute_stats(&[Decimal::MAX, Decimal::MAX, Decimal::MAX]);
        assert_eq!(stats.mean, Decimal::MAX);
    }

    #[test]
    fn overflowing_percentage_diff_saturates() {
        // MIN - MAX overflows; the ratio path gives -1 - 1 = -2.
        assert_eq!(percentage_diff(Decimal::MAX, Decimal::MIN), dec!(-200));
        let tiny = Decimal::new(1, 28);
        assert_eq!(percentage_diff(tiny, Decimal::MAX), Decimal::MAX);
        assert_eq!(percentage_diff(tiny, Decimal::MIN), Decimal::MIN);
        assert_eq!(percentage_diff(-tiny, Decimal::MAX), Decimal::MIN);
    }

    fn arb_prices() -> impl Strategy<Value = Vec<Decimal>> {
        prop::collection::vec((-1_000_000i64..1_000_000).prop_map(|c| Decimal::new(c, 2)), 1..60)
    }

    /// Any representable decimal, including values near `Decimal::MAX`.
    fn arb_extreme() -> impl Strategy<Value = Decimal> {
        (any::<u32>(), any::<u32>(), any::<u32>(), any::<bool>(), 0u32..=28)
            .prop_map(|(lo, mid, hi, negative, scale)| Decimal::from_parts(lo, mid, hi, negative, scale))
    }

    proptest! {
        #[test]
        fn extreme_values_never_panic(values in prop::collection::vec(arb_extreme(), 1..20)) {
            let s = compute_stats(&values);
            prop_assert!(s.min <= s.q1 && s.q1 <= s.median && s.median <= s.q3 && s.q3 <= s.max);
            prop_assert!(s.min <= s.mean && s.mean <= s.max);
            let _ = percentage_diff(s.mean, s.max);
            let _ = percentage_diff(s.max, s.min);
        }

        #[test]
        fn quartiles_are_ordered(values in arb_prices()) {
            let s = compute_stats(&values);
            prop_assert!(s.min <= s.q1);
            prop_assert!(s.q1 <= s.median);
            prop_assert!(s.median <= s.q3);
            prop_assert!(s.q3 <= s.max);
            prop_assert!(s.min <= s.mean && s.mean <= s.max);
            prop_assert_eq!(s.values.len(), values.len());
        }

        #[test]
        fn zero_base_mean_gives_zero_diff(promo in -1_000_000i64..1_000_000) {
            prop_assert_eq!(percentage_diff(Decimal::ZERO, Decimal::new(promo, 2)), Decimal::ZERO);
        }
    }
}
