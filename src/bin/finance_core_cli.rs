use std::{env, error::Error, path::PathBuf, process};

use chrono::NaiveDate;
use finance_core::{
    cli::{output, render_budgets, render_day, render_month},
    config::{Config, ConfigManager},
    core::{
        calendar_aggregator::DaySummary,
        services::{BudgetService, CalendarFilters, CalendarService},
        Clock, MonthCursor, SystemClock,
    },
    init,
    storage::JsonSnapshotSource,
    utils::build_info,
};

type CliResult<T> = Result<T, Box<dyn Error>>;

#[tokio::main]
async fn main() {
    init();
    if env::var_os("NO_COLOR").is_some() {
        output::disable_colors();
    }

    if let Err(err) = run().await {
        output::error(err);
        process::exit(1);
    }
}

async fn run() -> CliResult<()> {
    let mut args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        print_usage();
        process::exit(1);
    }
    let command = args.remove(0);
    let clock = SystemClock;

    match command.as_str() {
        "budgets" => {
            let config = load_config();
            let reference = match args.len() {
                2 => parse_date(&args[1])?,
                1 if parse_date(&args[0]).is_ok() => parse_date(&args.remove(0))?,
                _ => clock.today(),
            };
            let snapshot = take_snapshot(&mut args, 0, &config)?;
            let source = JsonSnapshotSource::new(snapshot);
            let dashboard = BudgetService::load(&source, None, reference).await?;
            print!("{}", render_budgets(&dashboard, &config));
        }
        "calendar" => {
            let config = load_config();
            let snapshot = take_snapshot(&mut args, 1, &config)?;
            let month = args.first().ok_or("missing month (YYYY-MM)")?;
            let cursor = MonthCursor::new(parse_month(month)?);
            let source = JsonSnapshotSource::new(snapshot);
            let today = clock.today();
            let view =
                CalendarService::load(&source, &cursor, &CalendarFilters::default(), Some(today))
                    .await?;
            print!("{}", render_month(&view, &config, today));
        }
        "day" => {
            let config = load_config();
            let snapshot = take_snapshot(&mut args, 1, &config)?;
            let date = parse_date(args.first().ok_or("missing date (YYYY-MM-DD)")?)?;
            let cursor = MonthCursor::new(date);
            let source = JsonSnapshotSource::new(snapshot);
            let view =
                CalendarService::load(&source, &cursor, &CalendarFilters::default(), None).await?;
            let summary = view
                .day(date)
                .cloned()
                .unwrap_or_else(|| DaySummary::empty(date));
            print!("{}", render_day(&summary, &config));
        }
        "version" => {
            println!("{}", build_info::current().summary());
        }
        other => {
            output::error(format!("unknown command `{other}`"));
            print_usage();
            process::exit(1);
        }
    }

    Ok(())
}

/// Falls back to defaults when the configuration cannot be read.
fn load_config() -> Config {
    match ConfigManager::new().and_then(|manager| manager.load()) {
        Ok(config) => config,
        Err(err) => {
            output::warning(format!("using default configuration: {err}"));
            Config::default()
        }
    }
}

/// Uses the leading argument as the snapshot path when more than `remaining`
/// arguments are left; otherwise the configured `snapshot_path`.
fn take_snapshot(args: &mut Vec<String>, remaining: usize, config: &Config) -> CliResult<PathBuf> {
    if args.len() > remaining {
        return Ok(PathBuf::from(args.remove(0)));
    }
    config
        .snapshot_path
        .clone()
        .ok_or_else(|| "no snapshot given and `snapshot_path` is not configured".into())
}

fn parse_date(value: &str) -> CliResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|err| format!("invalid date `{value}`: {err}").into())
}

fn parse_month(value: &str) -> CliResult<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d")
        .map_err(|err| format!("invalid month `{value}`: {err}").into())
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  finance_core_cli budgets [snapshot.json] [YYYY-MM-DD]");
    eprintln!("  finance_core_cli calendar [snapshot.json] <YYYY-MM>");
    eprintln!("  finance_core_cli day [snapshot.json] <YYYY-MM-DD>");
    eprintln!("  finance_core_cli version");
}
