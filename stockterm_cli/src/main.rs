use std::path::PathBuf;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use stockterm_lib::report::{ConsoleSink, FileSink};
use stockterm_lib::stock_list::{collect_requests, load_default_stock_list, load_stock_list_file};
use stockterm_lib::stockterm_api::Client;
use stockterm_lib::{
    Analyzer, ReportEntry, Reporter, Settings, StockEntry, StockTermError, YahooSource,
};

const USAGE_ERROR: &str = "Usage: stockterm [SYMBOL TERM]";
const UNHANDLED_ERROR: &str = "Unhandled Error";

#[derive(Parser)]
#[command(name = "stockterm")]
#[command(about = "Analyze stock price history over long, mid and short terms")]
struct Cli {
    /// Ad-hoc request as SYMBOL TERM (LONG, MID or SHORT). Omit to analyze the stock list.
    args: Vec<String>,

    /// YAML stock list to use instead of the built-in one
    #[arg(long)]
    stocks: Option<PathBuf>,

    /// Directory for the text report (default ./report, or STOCKTERM_REPORT_DIR)
    #[arg(long)]
    report_dir: Option<PathBuf>,

    /// Only print to the console
    #[arg(long)]
    no_file_report: bool,
}

#[derive(Debug, PartialEq)]
enum Invocation {
    StockList,
    AdHoc(StockEntry),
    Usage,
}

impl Invocation {
    fn from_args(args: &[String]) -> Self {
        match args {
            [] => Invocation::StockList,
            [symbol, term] => Invocation::AdHoc(StockEntry::new(symbol, term)),
            _ => Invocation::Usage,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("stockterm=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let mut reporter = Reporter::new().with_sink(ConsoleSink::new());
            reporter.error(usage_entry(&e));
            reporter.finish();
            return Ok(());
        }
    };
    let settings = apply_overrides(Settings::from_env(), &cli);

    let mut reporter = build_reporter(&cli, &settings);
    reporter.open_destinations();

    if let Err(e) = run(&cli, &settings, &mut reporter).await {
        tracing::error!("{}", e);
        reporter.error(ReportEntry::new(UNHANDLED_ERROR).with_data(e.to_string()));
    }
    reporter.finish();

    Ok(())
}

/// Turns a rejected command line into the usage error event.
fn usage_entry(err: &clap::Error) -> ReportEntry {
    let rendered = err.to_string();
    let detail = rendered
        .lines()
        .next()
        .unwrap_or_default()
        .trim_start_matches("error: ")
        .to_string();
    ReportEntry::new(USAGE_ERROR).with_data(detail)
}

fn apply_overrides(mut settings: Settings, cli: &Cli) -> Settings {
    if let Some(dir) = &cli.report_dir {
        settings.report_dir = dir.clone();
    }
    settings
}

fn build_reporter(cli: &Cli, settings: &Settings) -> Reporter {
    let mut reporter = Reporter::new().with_sink(ConsoleSink::new());
    if !cli.no_file_report {
        reporter.add_sink(FileSink::with_dir(settings.report_dir.clone()));
    }
    reporter
}

async fn run(
    cli: &Cli,
    settings: &Settings,
    reporter: &mut Reporter,
) -> Result<(), StockTermError> {
    let source = YahooSource::new(Client::with_base_url(&settings.base_url));

    match Invocation::from_args(&cli.args) {
        Invocation::Usage => {
            reporter.error(ReportEntry::new(USAGE_ERROR).with_data(cli.args.join(" ")));
        }
        Invocation::AdHoc(entry) => {
            Analyzer::new(source, reporter)
                .with_retry(settings.retry)
                .analyze_entry(&entry)
                .await;
        }
        Invocation::StockList => {
            let entries = match &cli.stocks {
                Some(path) => load_stock_list_file(path)?,
                None => load_default_stock_list()?,
            };
            let requests = collect_requests(&entries, reporter);
            Analyzer::new(source, reporter)
                .with_retry(settings.retry)
                .analyze_all(&requests)
                .await;
        }
    }
    Ok(())
}
