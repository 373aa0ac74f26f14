//! LiveChart CLI - run recorded market data through the chart core.
//!
//! Commands:
//! - `compute` - one-shot compute of every configured indicator, JSON on stdout
//! - `replay` - seed a chart session with history, stream the rest as live
//!   data, and print every surface call as one JSON line

mod input;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use livechart_core::catalog::compute_indicator;
use livechart_core::domain::{IndicatorOutput, Series};
use livechart_core::CacheStats;
use livechart_view::layout::PaneLayout;
use livechart_view::overlay::SourcedSignal;
use livechart_view::{ChartSession, ChartType, RecordingSurface, ViewConfig, ViewMode};

#[derive(Parser)]
#[command(
    name = "livechart",
    about = "LiveChart CLI - indicators, signals and live view updates over recorded data"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute every configured indicator over a candle file.
    Compute {
        /// CSV with time, open, high, low, close and optional value columns.
        #[arg(long)]
        candles: PathBuf,

        /// TOML file of [[indicator]] tables.
        #[arg(long)]
        indicators: PathBuf,
    },
    /// Replay a candle file through a chart session.
    Replay {
        #[arg(long)]
        candles: PathBuf,

        #[arg(long)]
        indicators: PathBuf,

        /// View tunables (TOML). Defaults apply when omitted.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Rows delivered as the initial history snapshot.
        #[arg(long, default_value_t = 100)]
        history: usize,

        /// area, candlestick, bar or hollow.
        #[arg(long, default_value = "candlestick")]
        chart_type: String,

        /// Feed the live rows as ticks (close or value) instead of snapshots.
        #[arg(long, default_value_t = false)]
        ticks: bool,

        /// Simulated milliseconds between live rows.
        #[arg(long, default_value_t = 250)]
        step_ms: u64,

        /// Container height handed to the pane layout.
        #[arg(long, default_value_t = 600.0)]
        height: f64,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compute {
            candles,
            indicators,
        } => run_compute(&candles, &indicators),
        Commands::Replay {
            candles,
            indicators,
            config,
            history,
            chart_type,
            ticks,
            step_ms,
            height,
        } => run_replay(ReplayArgs {
            candles,
            indicators,
            config,
            history,
            chart_type,
            ticks,
            step_ms,
            height,
        }),
    }
}

fn run_compute(candles: &Path, indicators: &Path) -> Result<()> {
    let series = Series::from_points(input::read_points(candles)?);
    let descriptors = input::read_indicators(indicators)?;
    info!(points = series.len(), indicators = descriptors.len(), "computing");

    let outputs: BTreeMap<String, IndicatorOutput> = descriptors
        .iter()
        .map(|d| (d.id.to_string(), compute_indicator(&series, d)))
        .collect();

    println!("{}", serde_json::to_string_pretty(&outputs)?);
    Ok(())
}

struct ReplayArgs {
    candles: PathBuf,
    indicators: PathBuf,
    config: Option<PathBuf>,
    history: usize,
    chart_type: String,
    ticks: bool,
    step_ms: u64,
    height: f64,
}

#[derive(Serialize)]
struct ReplaySummary<'a> {
    points: usize,
    mode: ViewMode,
    signals: &'a [SourcedSignal],
    layout: &'a PaneLayout,
    cache_hits: u64,
    cache_misses: u64,
    rejected_ticks: usize,
}

fn run_replay(args: ReplayArgs) -> Result<()> {
    let Some(chart_type) = ChartType::from_name(&args.chart_type) else {
        bail!(
            "unknown chart type '{}'. Valid: area, candlestick, bar, hollow",
            args.chart_type
        );
    };
    let config = match &args.config {
        Some(path) => ViewConfig::load(path).context("load view config")?,
        None => ViewConfig::default(),
    };
    let points = input::read_points(&args.candles)?;
    let descriptors = input::read_indicators(&args.indicators)?;

    let split = args.history.min(points.len());
    let (history, live) = points.split_at(split);
    info!(
        history = history.len(),
        live = live.len(),
        chart_type = ?chart_type,
        "replay starting"
    );

    let surface = RecordingSurface::new(1_000.0, args.height);
    let mut session = ChartSession::new(surface, chart_type, config, args.height);
    let mut now_ms = 0u64;

    session.set_indicators(descriptors);
    session.on_snapshot(Series::from_points(history.iter().copied()), now_ms);
    flush(&mut session)?;

    let mut working = session.series().clone();
    let mut rejected = 0usize;
    for point in live {
        now_ms += args.step_ms;
        session.poll(now_ms);

        if args.ticks {
            let Some(price) = point.price() else {
                rejected += 1;
                continue;
            };
            if session.on_tick(point.time, price, now_ms).is_err() {
                rejected += 1;
            }
        } else {
            if let Err(err) = working.push(*point) {
                warn!(%err, "live row skipped");
                rejected += 1;
                continue;
            }
            session.on_snapshot(working.clone(), now_ms);
        }
        flush(&mut session)?;
    }

    // let any pending scroll fire before summarising
    session.poll(now_ms + session.engine().config().scroll_debounce_ms);
    flush(&mut session)?;

    let stats: CacheStats = session.cache_stats();
    let summary = ReplaySummary {
        points: session.series().len(),
        mode: session.mode(),
        signals: session.signals(),
        layout: session.layout(),
        cache_hits: stats.hits,
        cache_misses: stats.misses,
        rejected_ticks: rejected,
    };
    println!("{}", serde_json::to_string(&serde_json::json!({ "summary": summary }))?);
    info!(
        points = summary.points,
        hits = stats.hits,
        misses = stats.misses,
        "replay finished"
    );
    Ok(())
}

/// Print and forget the calls the session made since the last flush.
fn flush(session: &mut ChartSession<RecordingSurface>) -> Result<()> {
    let Some(surface) = session.surface_mut() else {
        return Ok(());
    };
    for call in surface.drain_calls() {
        println!("{}", serde_json::to_string(&call)?);
    }
    Ok(())
}
