use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use configuration::{MarketTables, Settings, load_config};
use core_types::{CurrencyMode, FilterDimension, PriceType, RawRecord};
use engine::Dashboard;
use ingest::CurrencyNormalizer;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod render;

/// Competitor pricing explorer: cascading filters, box-plots and promotion analytics.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the JSON dataset (defaults to `dataset.path` in config.toml).
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Country selector; codes such as "AR" are resolved to their display name.
    #[arg(long, global = true)]
    country: Option<String>,

    #[arg(long, global = true)]
    competitor: Option<String>,

    /// Segment selector (e.g., "Hogares", "Negocios").
    #[arg(long, global = true)]
    segment: Option<String>,

    /// Kit size selector.
    #[arg(long, global = true)]
    kit: Option<String>,

    /// Print JSON instead of tables.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the selectable values of each filter for the current selection.
    Options,
    /// Compare base and promotional prices as box-plot statistics.
    Boxplot(ViewArgs),
    /// Show promotion presence and average discounts, overall and per competitor.
    Promos(CurrencyArgs),
    /// Print every derived output for the current selection.
    View(ViewArgs),
}

#[derive(Args)]
struct ViewArgs {
    /// The price category to analyze.
    #[arg(long, value_enum)]
    price_type: Option<PriceType>,

    /// Reference currency or the country's own.
    #[arg(long, value_enum)]
    currency: Option<CurrencyMode>,
}

#[derive(Args)]
struct CurrencyArgs {
    /// Currency of the promo amounts.
    #[arg(long, value_enum)]
    currency: Option<CurrencyMode>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = load_config().context("Failed to load configuration")?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.logging.level))
        .context("Invalid log level in configuration")?;
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let normalizer = CurrencyNormalizer::new(MarketTables::default());
    let data_path = cli
        .data
        .clone()
        .unwrap_or_else(|| PathBuf::from(&settings.dataset.path));
    let raw = load_dataset(&data_path)?;

    let mut dashboard = Dashboard::from_raw(&raw, &normalizer);
    apply_selection(&mut dashboard, &cli, &normalizer);

    match &cli.command {
        Commands::Options => {
            let options = dashboard.options();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&options)?);
            } else {
                println!("{}", render::options_table(&options));
            }
        }
        Commands::Boxplot(args) => {
            let (price_type, currency) = resolve_view(args, &settings);
            let comparisons = dashboard.comparisons(price_type, currency);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&comparisons)?);
            } else {
                let unit = currency_unit(currency, &normalizer);
                println!("{}", render::boxplot_table(&comparisons, unit));
            }
        }
        Commands::Promos(args) => {
            let currency = args.currency.unwrap_or(settings.display.currency);
            let overall = dashboard.promotions(currency);
            let by_competitor = dashboard.promotions_by_competitor(currency);
            if cli.json {
                let promos = serde_json::json!({
                    "currency": currency,
                    "overall": overall,
                    "by_competitor": by_competitor,
                });
                println!("{}", serde_json::to_string_pretty(&promos)?);
            } else {
                let unit = currency_unit(currency, &normalizer);
                println!("{}", render::promo_table(&overall, &by_competitor, unit));
            }
        }
        Commands::View(args) => {
            let (price_type, currency) = resolve_view(args, &settings);
            let view = dashboard.view(price_type, currency);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                let unit = currency_unit(currency, &normalizer);
                println!("{} of {} rows match.\n", view.matching_rows, dashboard.rows().len());
                println!("{}\n", render::options_table(&view.options));
                println!("{}\n", render::boxplot_table(&view.comparisons, unit));
                println!(
                    "{}",
                    render::promo_table(&view.promotions, &view.promotions_by_competitor, unit)
                );
            }
        }
    }

    Ok(())
}

/// Reads a JSON array of raw records.
fn load_dataset(path: &Path) -> Result<Vec<RawRecord>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset at {:?}", path))?;
    let records: Vec<RawRecord> = serde_json::from_str(&text)
        .with_context(|| format!("Dataset at {:?} is not a JSON array of objects", path))?;
    tracing::info!(records = records.len(), path = %path.display(), "Dataset loaded.");
    Ok(records)
}

/// Applies the CLI selectors in priority order, so each one is narrowed by
/// those above it exactly as an interactive user would pick them.
fn apply_selection(dashboard: &mut Dashboard, cli: &Cli, normalizer: &CurrencyNormalizer) {
    let country = cli
        .country
        .as_deref()
        .map(|c| normalizer.normalize_country(Some(c)));
    let selections = [
        (FilterDimension::Country, country),
        (FilterDimension::Competitor, cli.competitor.clone()),
        (FilterDimension::Segment, cli.segment.as_deref().map(ingest::normalize_segment)),
        (FilterDimension::KitSize, cli.kit.clone()),
    ];
    for (dimension, value) in selections {
        if value.is_some() {
            dashboard.select(dimension, value);
        }
    }
}

fn currency_unit(currency: CurrencyMode, normalizer: &CurrencyNormalizer) -> &str {
    match currency {
        CurrencyMode::Reference => normalizer.reference_currency(),
        CurrencyMode::Local => "local",
    }
}

fn resolve_view(args: &ViewArgs, settings: &Settings) -> (PriceType, CurrencyMode) {
    (
        args.price_type.unwrap_or(settings.display.price_type),
        args.currency.unwrap_or(settings.display.currency),
    )
}
