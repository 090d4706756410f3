use std::path::Path;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cricstats::config::Config;
use cricstats::error::{AppError, Result};
use cricstats::ingest::load_dir;
use cricstats::query::run_query;
use cricstats::state::EventTable;

fn main() {
    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cfg.log_level))
        .init();

    let args = match CliArgs::parse(std::env::args().skip(1)) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("usage: cricstats [data-dir] [--year YYYY] [--player NAME]");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(cfg, args) {
        error!("Fatal error: {e}");
        std::process::exit(1);
    }
}

#[derive(Debug, Default)]
struct CliArgs {
    data_dir: Option<String>,
    year: Option<i32>,
    player: Option<String>,
}

impl CliArgs {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let mut out = Self::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--year" => {
                    let v = args
                        .next()
                        .ok_or_else(|| AppError::Config("--year needs a value".to_string()))?;
                    let year = v
                        .parse::<i32>()
                        .map_err(|_| AppError::Config(format!("invalid year: {v}")))?;
                    out.year = Some(year);
                }
                "--player" => {
                    let v = args
                        .next()
                        .ok_or_else(|| AppError::Config("--player needs a value".to_string()))?;
                    out.player = Some(v);
                }
                other if out.data_dir.is_none() && !other.starts_with("--") => {
                    out.data_dir = Some(other.to_string());
                }
                other => {
                    return Err(AppError::Config(format!("unknown argument: {other}")));
                }
            }
        }
        Ok(out)
    }
}

fn run(cfg: Config, args: CliArgs) -> Result<()> {
    let dir = args.data_dir.unwrap_or(cfg.data_dir);
    let (table, stats) = load_dir(Path::new(&dir))?;
    info!(
        "loaded {} deliveries from {} matches ({} files)",
        table.len(),
        stats.matches_loaded,
        stats.files_total,
    );

    let years = table.available_years();
    match (args.year, args.player) {
        (Some(year), Some(player)) => print_report(&table, year, &player),
        (Some(year), None) => {
            println!("Players in {year}:");
            for name in table.players_in_year(year) {
                println!("  {name}");
            }
        }
        _ => {
            println!("Available seasons: {years:?}");
            println!("Pick one with --year YYYY, then a batter with --player NAME.");
        }
    }
    Ok(())
}

fn print_report(table: &EventTable, year: i32, player: &str) {
    let report = run_query(table, year, player);
    if report.is_empty() {
        println!("No innings found for \"{player}\" in {year}.");
        return;
    }

    println!("{player} — {year} season");
    println!(
        "{:<12} {:<12} {:<28} {:>5} {:>6} {:>8}",
        "Date", "Opponent", "Venue", "Runs", "Balls", "SR"
    );
    for m in &report.matches {
        println!(
            "{:<12} {:<12} {:<28} {:>5} {:>6} {:>8.2}",
            m.date.format("%Y-%m-%d"),
            m.opponent,
            truncate(&m.venue, 28),
            m.runs,
            m.balls_faced,
            m.strike_rate,
        );
    }
    println!(
        "Season: {} runs, overall strike rate {:.2}",
        report.totals.total_runs, report.totals.overall_strike_rate,
    );
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
