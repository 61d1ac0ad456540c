//! ledgerlens main entry point

mod render;

use anyhow::{bail, Context};
use chrono::{Local, NaiveDate};
use clap::Parser;
use ledgerlens_config::{Config, ConfigError, Granularity};
use ledgerlens_core::{
    advance, can_advance, retreat, DefaultErrorLogger, ErrorLogger, JsonFileSource, Period,
    ReportEngine,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use render::Renderer;

#[derive(Parser, Debug)]
#[command(name = "ledgerlens")]
#[command(version)]
#[command(about = "Monthly and annual income/expense reports with period-over-period comparison", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "ledgerlens.yaml")]
    config: PathBuf,

    /// Transaction JSON file (overrides data.transactions_file)
    #[arg(short, long)]
    transactions: Option<PathBuf>,

    /// Report granularity: month or year
    #[arg(short, long)]
    granularity: Option<Granularity>,

    /// Anchor date (YYYY-MM-DD), defaults to today
    #[arg(short, long)]
    date: Option<NaiveDate>,

    /// Move the anchor back this many periods
    #[arg(long, default_value_t = 0)]
    back: u32,

    /// Move the anchor forward this many periods
    #[arg(long, default_value_t = 0)]
    forward: u32,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Print the default configuration and exit
    #[arg(long)]
    init_config: bool,
}

fn load_config(path: &Path) -> anyhow::Result<Config> {
    match Config::load(path) {
        Ok(config) => Ok(config),
        // A missing file just means defaults
        Err(ConfigError::FileNotFound { .. }) => Ok(Config::default()),
        Err(e) => Err(anyhow::anyhow!("{}", e.to_details()))
            .with_context(|| format!("failed to load configuration from {}", path.display())),
    }
}

/// Apply --back/--forward to the anchor, refusing to land in a future period
fn navigate(
    mut anchor: NaiveDate,
    granularity: Granularity,
    back: u32,
    forward: u32,
    today: NaiveDate,
) -> anyhow::Result<NaiveDate> {
    for _ in 0..back {
        anchor = retreat(anchor, granularity)?;
    }
    for _ in 0..forward {
        if !can_advance(anchor, granularity, today) {
            bail!("cannot move past the current {} ({})", granularity, today);
        }
        anchor = advance(anchor, granularity)?;
    }
    if Period::containing(anchor, granularity).starts_after(today) {
        bail!("the {} containing {} has not started yet ({})", granularity, anchor, today);
    }
    Ok(anchor)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.init_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let config = load_config(&args.config)?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    let transactions_file = args
        .transactions
        .clone()
        .unwrap_or_else(|| config.data.transactions_file.clone());
    let granularity = args.granularity.unwrap_or(config.report.default_granularity);
    let today = Local::now().date_naive();
    let anchor = navigate(args.date.unwrap_or(today), granularity, args.back, args.forward, today)?;

    let source = JsonFileSource::new(transactions_file);
    log::info!(
        "building {} report for {} from {}",
        granularity,
        anchor,
        source.path().display()
    );

    let engine = ReportEngine::new(Arc::new(source));
    let report = match engine.report(anchor, granularity) {
        Ok(report) => report,
        Err(e) => {
            DefaultErrorLogger.log_error(&e, "report");
            return Err(e).context("failed to build report");
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", Renderer::from_config(&config).render(&report)?);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_navigate_back() {
        let anchor = navigate(date(2024, 3, 31), Granularity::Month, 2, 0, date(2024, 3, 31)).unwrap();
        assert_eq!(anchor, date(2024, 1, 29));
    }

    #[test]
    fn test_navigate_forward_stops_at_present() {
        let today = date(2024, 6, 15);
        assert!(navigate(date(2024, 5, 1), Granularity::Month, 0, 1, today).is_ok());
        assert!(navigate(date(2024, 5, 1), Granularity::Month, 0, 2, today).is_err());
        assert!(navigate(date(2024, 6, 15), Granularity::Year, 0, 1, today).is_err());
    }

    #[test]
    fn test_navigate_rejects_future_anchor() {
        let today = date(2024, 6, 15);
        assert!(navigate(date(2099, 6, 1), Granularity::Month, 0, 0, today).is_err());
        assert!(navigate(date(2024, 7, 1), Granularity::Month, 0, 0, today).is_err());
        assert!(navigate(date(2025, 1, 1), Granularity::Year, 0, 0, today).is_err());
        // Later days of the current period are fine
        assert!(navigate(date(2024, 6, 30), Granularity::Month, 0, 0, today).is_ok());
        assert!(navigate(date(2024, 12, 31), Granularity::Year, 0, 0, today).is_ok());
        // Stepping back out of the future lands in the past
        assert_eq!(
            navigate(date(2024, 8, 10), Granularity::Month, 2, 0, today).unwrap(),
            date(2024, 6, 10)
        );
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "ledgerlens", "--granularity", "year", "--date", "2024-02-29", "--back", "1", "--json",
        ])
        .unwrap();
        assert_eq!(args.granularity, Some(Granularity::Year));
        assert_eq!(args.date, Some(date(2024, 2, 29)));
        assert_eq!(args.back, 1);
        assert!(args.json);
    }
}
