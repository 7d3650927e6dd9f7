use analytics::{AnalyticsConfig, AnalyticsEngine};
use api_client::{ApiError, MarketDataClient, StooqClient, align};
use backtester::BacktestRunner;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use comfy_table::Table;
use configuration::Config;
use core_types::{PriceSeries, Variant, VariantMetrics};
use datastore::CsvStore;
use indicatif::{ProgressBar, ProgressStyle};
use rust_decimal::Decimal;
use strategies::SmaMomentum;
use tokio::task::JoinHandle;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// The comparison order of the report: the strategy first, then what it is
/// judged against.
const DISPLAY_ORDER: [Variant; 3] = [Variant::Strategy, Variant::BuyAndHold, Variant::Benchmark];

/// The main entry point for the Meridian backtest application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging, honoring RUST_LOG when set.
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    let config = configuration::load_config()?;

    match cli.command {
        Commands::Fetch(args) => handle_fetch(args, &config).await,
        Commands::Backtest(args) => handle_backtest(&args, &config),
        Commands::Analyze => handle_analyze(&config),
        Commands::Run(args) => {
            handle_backtest(&args, &config)?;
            handle_analyze(&config)
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// A momentum backtest and analytics pipeline for one equity versus its benchmark.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download daily close history and persist the aligned price snapshot.
    Fetch(FetchArgs),
    /// Compute the lagged momentum signal and persist the return series.
    Backtest(BacktestArgs),
    /// Derive equity curves and performance metrics from the return series.
    Analyze,
    /// Backtest and analyze in one invocation.
    Run(BacktestArgs),
}

#[derive(Parser)]
struct FetchArgs {
    /// Override the traded asset symbol from config.toml.
    #[arg(long)]
    asset: Option<String>,

    /// Override the benchmark symbol from config.toml.
    #[arg(long)]
    benchmark: Option<String>,

    /// Override the start of the requested history (format: YYYY-MM-DD).
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Override the end of the requested history (format: YYYY-MM-DD).
    #[arg(long)]
    to: Option<NaiveDate>,
}

#[derive(Parser)]
struct BacktestArgs {
    /// Override the SMA window length from config.toml.
    #[arg(long)]
    window: Option<usize>,
}

// ==============================================================================
// Command Handlers
// ==============================================================================

/// Handles the orchestration of the data acquisition step.
async fn handle_fetch(args: FetchArgs, config: &Config) -> anyhow::Result<()> {
    let asset_symbol = args
        .asset
        .unwrap_or_else(|| config.fetch.asset_symbol.clone());
    let benchmark_symbol = args
        .benchmark
        .unwrap_or_else(|| config.fetch.benchmark_symbol.clone());
    let start = args.from.unwrap_or(config.fetch.start_date);
    let end = args.to.unwrap_or(config.fetch.end_date);

    println!("Fetching {asset_symbol} and {benchmark_symbol} from {start} to {end}...");

    let progress_bar = ProgressBar::new(2);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("=>-"),
    );

    // Both downloads run concurrently; each task owns its own client.
    let asset_task = spawn_fetch(asset_symbol.clone(), start, end, progress_bar.clone());
    let benchmark_task = spawn_fetch(benchmark_symbol.clone(), start, end, progress_bar.clone());
    let (asset, benchmark) = tokio::try_join!(asset_task, benchmark_task)?;
    let (asset, benchmark) = (asset?, benchmark?);
    progress_bar.finish_with_message("Download complete.");

    let records = align(&asset, &benchmark);
    anyhow::ensure!(
        !records.is_empty(),
        "no overlapping trading dates between {asset_symbol} and {benchmark_symbol}"
    );

    CsvStore::new(&config.data).save_price_history(&records)?;
    println!("Aligned price snapshot saved ({} rows).", records.len());

    Ok(())
}

fn spawn_fetch(
    symbol: String,
    start: NaiveDate,
    end: NaiveDate,
    progress_bar: ProgressBar,
) -> JoinHandle<Result<PriceSeries, ApiError>> {
    tokio::spawn(async move {
        let client = StooqClient::new();
        progress_bar.set_message(format!("Fetching {symbol}..."));
        let series = client.fetch_daily_closes(&symbol, start, end).await?;
        progress_bar.inc(1);
        Ok(series)
    })
}

/// Handles the signal & return stage.
fn handle_backtest(args: &BacktestArgs, config: &Config) -> anyhow::Result<()> {
    let window = args.window.unwrap_or(config.strategy.sma_window);
    println!("Backtesting the {window}-day SMA momentum rule...");

    let strategy = SmaMomentum::new(window)?;
    let mut runner = BacktestRunner::new(Box::new(strategy), CsvStore::new(&config.data));
    let records = runner.run()?;

    println!("Backtest finished: {} return rows saved.", records.len());
    Ok(())
}

/// Handles the performance analytics stage.
fn handle_analyze(config: &Config) -> anyhow::Result<()> {
    let store = CsvStore::new(&config.data);
    let records = store.load_returns()?;

    let engine = AnalyticsEngine::new(AnalyticsConfig {
        trading_days_per_year: config.analytics.trading_days_per_year,
        risk_free_rate: config.analytics.risk_free_rate,
    });
    let report = engine.analyze(&records, &DISPLAY_ORDER)?;

    store.save_equity_curve(&report.equity_curve)?;
    store.save_metrics(&report.metrics)?;

    println!("\nFinal Performance Metrics:");
    println!("{}", render_metrics_table(&report.metrics));
    Ok(())
}

fn render_metrics_table(metrics: &[VariantMetrics]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Variant", "CAGR", "Sharpe Ratio", "Max Drawdown"]);
    for row in metrics {
        table.add_row(vec![
            row.variant.label().to_string(),
            format_pct(row.cagr),
            format!("{:.2}", row.sharpe_ratio),
            format_pct(row.max_drawdown),
        ]);
    }
    table
}

/// Formats a fractional value as a percentage, e.g. -0.1534 -> "-15.34%".
fn format_pct(value: Decimal) -> String {
    format!("{:.2}%", value * Decimal::ONE_HUNDRED)
}
