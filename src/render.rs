use analytics::{BoxplotComparison, CompetitorPromo, PromoAnalysis};
use comfy_table::{Cell, CellAlignment, Table};
use core_types::FilterDimension;
use filters::FilterOptions;
use rust_decimal::Decimal;

fn money(value: Decimal) -> Cell {
    Cell::new(value.round_dp(2)).set_alignment(CellAlignment::Right)
}

fn pct(value: Decimal) -> Cell {
    Cell::new(format!("{}%", value.round_dp(1))).set_alignment(CellAlignment::Right)
}

pub fn options_table(options: &FilterOptions) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Filter", "Options"]);
    for dimension in FilterDimension::ALL {
        let values = options.get(dimension);
        let listed = if values.is_empty() {
            "-".to_string()
        } else {
            values.join(", ")
        };
        table.add_row(vec![Cell::new(dimension), Cell::new(listed)]);
    }
    table
}

/// Box-plot rows; `unit` labels the money columns (e.g. "USD" or "local").
pub fn boxplot_table(comparisons: &[BoxplotComparison], unit: &str) -> Table {
    let mut table = Table::new();
    let mut header = vec!["Group".to_string(), "Price".to_string(), "N".to_string()];
    header.extend(["Min", "Q1", "Median", "Q3", "Max", "Mean"].map(|h| format!("{h} ({unit})")));
    header.push("Promo vs Base".to_string());
    table.set_header(header);
    for comparison in comparisons {
        for (kind, stats) in [("base", &comparison.base), ("promo", &comparison.promo)] {
            let diff = if kind == "base" {
                Cell::new("")
            } else {
                pct(comparison.percentage_diff)
            };
            table.add_row(vec![
                Cell::new(&comparison.label),
                Cell::new(kind),
                Cell::new(stats.values.len()).set_alignment(CellAlignment::Right),
                money(stats.min),
                money(stats.q1),
                money(stats.median),
                money(stats.q3),
                money(stats.max),
                money(stats.mean),
                diff,
            ]);
        }
    }
    table
}

pub fn promo_table(overall: &PromoAnalysis, by_competitor: &[CompetitorPromo], unit: &str) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        "Competitor".to_string(),
        "Rows".to_string(),
        "With promo".to_string(),
        "Without".to_string(),
        "Share".to_string(),
        format!("Avg amount ({unit})"),
        "Avg monthly disc.".to_string(),
        "Avg alta disc.".to_string(),
    ]);
    let rows = by_competitor
        .iter()
        .map(|c| (c.competitor.as_str(), &c.analysis))
        .chain(std::iter::once(("Total", overall)));
    for (label, analysis) in rows {
        table.add_row(vec![
            Cell::new(label),
            Cell::new(analysis.total_count),
            Cell::new(analysis.with_promo_count),
            Cell::new(analysis.without_promo_count),
            pct(analysis.promo_share_pct()),
            money(analysis.avg_promo_amount),
            pct(analysis.avg_recurring_promo_pct),
            pct(analysis.avg_alta_promo_pct),
        ]);
    }
    table
}
