use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use eustat_viz::models::{Record, current_year_window};
use eustat_viz::surface::Scene;
use eustat_viz::viz::{BubbleChart, BubbleChartConfig, LineChartConfig};
use eustat_viz::{AnimationDriver, DatasetStore, EurostatClient, FrameSink, Indicator, Selection};
use eustat_viz::{api, stats, storage, viz};
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "eustat",
    version,
    about = "Fetch Eurostat life expectancy, population & GDP per capita and chart them"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch all indicators (and optionally save them and print stats).
    Fetch(FetchArgs),
    /// Line chart of one indicator for one country.
    Line(LineArgs),
    /// Bubble chart (GDP vs. life expectancy, size = population) for one year.
    Bubble(BubbleArgs),
    /// One bubble chart per year, written as numbered SVG frames.
    Animate(AnimateArgs),
    /// Print grouped statistics.
    Stats(SourceArgs),
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Use a saved dataset (.json or .csv) instead of fetching from Eurostat.
    #[arg(long)]
    data: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct FetchArgs {
    /// Save results to file (format inferred by --format or extension).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
    /// Print grouped statistics to stdout.
    #[arg(long, default_value_t = false)]
    stats: bool,
}

#[derive(Args, Debug)]
struct ChartArgs {
    #[command(flatten)]
    source: SourceArgs,
    /// Output SVG path.
    #[arg(long)]
    out: PathBuf,
    /// Locale for tick labels (en, de, fr, es, it, pt, nl, ro).
    #[arg(long, default_value = "en")]
    locale: String,
}

#[derive(Args, Debug)]
struct LineArgs {
    #[command(flatten)]
    chart: ChartArgs,
    /// Country code (e.g., BE)
    #[arg(short, long)]
    country: Option<String>,
    /// Indicator code: SV, POP or PIB
    #[arg(short, long)]
    indicator: Option<String>,
    /// Width of the chart (default 800).
    #[arg(long, default_value_t = 800)]
    width: u32,
    /// Height of the chart (default 400).
    #[arg(long, default_value_t = 400)]
    height: u32,
}

#[derive(Args, Debug)]
struct BubbleArgs {
    #[command(flatten)]
    chart: ChartArgs,
    /// Year to plot.
    #[arg(short, long)]
    year: Option<i32>,
    /// Width of the chart (default 800).
    #[arg(long, default_value_t = 800)]
    width: u32,
    /// Height of the chart (default 600).
    #[arg(long, default_value_t = 600)]
    height: u32,
}

#[derive(Args, Debug)]
struct AnimateArgs {
    #[command(flatten)]
    source: SourceArgs,
    /// Directory for the frames (`bubble_<year>.svg`).
    #[arg(long)]
    out_dir: PathBuf,
    /// Delay between frames in milliseconds.
    #[arg(long, default_value_t = 1000)]
    delay_ms: u64,
    #[arg(long, default_value = "en")]
    locale: String,
    #[arg(long, default_value_t = 800)]
    width: u32,
    #[arg(long, default_value_t = 600)]
    height: u32,
}

fn fmt_num(x: f64) -> String {
    // Format up to 4 decimals, then trim trailing zeros and trailing dot.
    let s = format!("{:.4}", x);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Fetch(args) => cmd_fetch(args),
        Command::Line(args) => cmd_line(args),
        Command::Bubble(args) => cmd_bubble(args),
        Command::Animate(args) => cmd_animate(args),
        Command::Stats(args) => cmd_stats(args),
    }
}

fn fetch_store() -> Result<DatasetStore> {
    let mut store = DatasetStore::new();
    let years = current_year_window();
    api::fetch_cycle(&EurostatClient::default(), &mut store, &years)
        .context("fetch from Eurostat")?;
    Ok(store)
}

fn load_store(source: &SourceArgs) -> Result<DatasetStore> {
    match &source.data {
        Some(path) => {
            let records = storage::load(path)?;
            info!("loaded {} records from {}", records.len(), path.display());
            Ok(DatasetStore::from_records(records))
        }
        None => fetch_store(),
    }
}

fn save_records(records: &[Record], path: &Path, format: Option<&OutFormat>) -> Result<()> {
    let fmt = match format {
        Some(OutFormat::Csv) => "csv",
        Some(OutFormat::Json) => "json",
        None => path.extension().and_then(|e| e.to_str()).unwrap_or("json"),
    }
    .to_ascii_lowercase();
    match fmt.as_str() {
        "csv" => storage::save_csv(records, path),
        "json" => storage::save_json(records, path),
        other => anyhow::bail!("unsupported format: {}", other),
    }
}

fn print_stats(records: &[Record]) {
    for s in stats::grouped_summary(records) {
        println!(
            "{} • {}  count={} years={}..{}  min={} max={} mean={} median={}",
            s.key.country,
            s.key.indicator,
            s.count,
            s.first_year,
            s.last_year,
            fmt_num(s.min),
            fmt_num(s.max),
            fmt_num(s.mean),
            fmt_num(s.median)
        );
    }
}

fn cmd_fetch(args: FetchArgs) -> Result<()> {
    let store = fetch_store()?;
    if let Some(path) = args.out.as_ref() {
        save_records(store.records(), path, args.format.as_ref())?;
        eprintln!("Saved {} rows to {}", store.len(), path.display());
    }
    if args.stats {
        print_stats(store.records());
    }
    Ok(())
}

fn cmd_line(args: LineArgs) -> Result<()> {
    let indicator = args
        .indicator
        .as_deref()
        .map(str::parse::<Indicator>)
        .transpose()?;
    let selection = Selection {
        country: args.country,
        indicator,
        year: None,
    };
    // Selection problems are reported before any network traffic.
    selection.line_target()?;

    let store = load_store(&args.chart.source)?;
    let config = LineChartConfig {
        width: args.width,
        height: args.height,
        locale: args.chart.locale,
        ..LineChartConfig::default()
    };
    viz::plot_line(&store, &selection, &config, &args.chart.out)?;
    eprintln!("Wrote line chart to {}", args.chart.out.display());
    Ok(())
}

fn cmd_bubble(args: BubbleArgs) -> Result<()> {
    let year = Selection {
        year: args.year,
        ..Selection::default()
    }
    .bubble_year()?;

    let store = load_store(&args.chart.source)?;
    let config = BubbleChartConfig {
        width: args.width,
        height: args.height,
        locale: args.chart.locale,
        ..BubbleChartConfig::default()
    };
    viz::plot_bubbles(&store, year, &config, &args.chart.out)?;
    eprintln!("Wrote bubble chart to {}", args.chart.out.display());
    Ok(())
}

/// Writes one SVG per animation frame; years without a complete country are skipped.
struct FrameWriter<'a> {
    store: &'a DatasetStore,
    config: BubbleChartConfig,
    out_dir: PathBuf,
    selected: Option<i32>,
    written: Vec<PathBuf>,
    error: Option<anyhow::Error>,
}

impl FrameWriter<'_> {
    fn write_frame(&self, year: i32) -> Result<Option<PathBuf>> {
        let scene: Scene = match BubbleChart::from_store(self.store, year, &self.config) {
            Ok(chart) => chart.scene(),
            Err(eustat_viz::Error::EmptyResult(what)) => {
                warn!("skipping frame: no data for {what}");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };
        let path = self.out_dir.join(format!("bubble_{year}.svg"));
        viz::save_svg(&scene, &path)?;
        Ok(Some(path))
    }
}

impl FrameSink for FrameWriter<'_> {
    fn select_year(&mut self, year: i32) {
        self.selected = Some(year);
    }

    fn render_year(&mut self, year: i32) {
        match self.write_frame(year) {
            Ok(Some(path)) => {
                eprintln!("frame {year} -> {}", path.display());
                self.written.push(path);
            }
            Ok(None) => {}
            Err(e) => self.error = Some(e),
        }
    }

    fn keep_running(&self) -> bool {
        self.error.is_none()
    }
}

fn cmd_animate(args: AnimateArgs) -> Result<()> {
    let store = load_store(&args.source)?;
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create {}", args.out_dir.display()))?;

    let mut writer = FrameWriter {
        store: &store,
        config: BubbleChartConfig {
            width: args.width,
            height: args.height,
            locale: args.locale,
            ..BubbleChartConfig::default()
        },
        out_dir: args.out_dir.clone(),
        selected: None,
        written: Vec::new(),
        error: None,
    };

    let mut driver = AnimationDriver::new(Duration::from_millis(args.delay_ms));
    driver.start(store.distinct_years(), std::time::Instant::now());
    driver.run_blocking(&mut writer);

    if let Some(e) = writer.error {
        return Err(e);
    }
    if writer.written.is_empty() {
        anyhow::bail!("no year has data for all of SV, POP and PIB");
    }
    eprintln!(
        "Wrote {} frames to {} (last year {})",
        writer.written.len(),
        args.out_dir.display(),
        writer.selected.unwrap_or_default()
    );
    Ok(())
}

fn cmd_stats(args: SourceArgs) -> Result<()> {
    let store = load_store(&args)?;
    print_stats(store.records());
    Ok(())
}
