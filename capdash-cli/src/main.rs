//! CapDash CLI — market overview from the terminal.
//!
//! Commands:
//! - `index` — index snapshot: day-over-day change, volatility read, crash-day history
//! - `compare` — top-2 market-cap comparison and allocation recommendation
//! - `dashboard` — both pipelines, plus JSON/CSV artifacts

use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};

use capdash_core::analytics::SeriesDisplay;
use capdash_core::data::{RankingScraper, YahooProvider};
use capdash_core::domain::Allocation;
use capdash_runner::{
    run_compare, run_dashboard, run_index_snapshot, save_artifacts, CompareReport,
    DashboardConfig, DashboardReport, IndexReport,
};

#[derive(Parser)]
#[command(name = "capdash", about = "CapDash CLI — market-cap overview dashboard")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Index snapshot: day-over-day change, volatility, crash-day history.
    Index {
        /// Optional TOML config file (symbols, URLs, page metadata).
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Compare the top two companies by market capitalization.
    Compare {
        /// Optional TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Run both pipelines and save report artifacts.
    Dashboard {
        /// Optional TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output directory for report.json and the series CSVs.
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,

        /// Print only; skip writing artifacts.
        #[arg(long, default_value_t = false)]
        no_artifacts: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Index { config } => run_index_cmd(config),
        Commands::Compare { config } => run_compare_cmd(config),
        Commands::Dashboard {
            config,
            output_dir,
            no_artifacts,
        } => run_dashboard_cmd(config, output_dir, no_artifacts),
    }
}

fn load_config(path: Option<PathBuf>) -> Result<DashboardConfig> {
    match path {
        Some(p) => Ok(DashboardConfig::from_file(&p)?),
        None => Ok(DashboardConfig::default()),
    }
}

fn run_index_cmd(config: Option<PathBuf>) -> Result<()> {
    let config = load_config(config)?;
    let provider = YahooProvider::new();

    let report = run_index_snapshot(
        &provider,
        &config.index_symbol,
        &config.volatility_symbol,
        Local::now().date_naive(),
    )?;
    print_index(&report);
    Ok(())
}

fn run_compare_cmd(config: Option<PathBuf>) -> Result<()> {
    let config = load_config(config)?;
    let provider = YahooProvider::new();
    let scraper = RankingScraper::new(&config.ranking_url, &config.user_agent);

    let report = run_compare(&scraper, &provider)?;
    print_compare(&report);
    Ok(())
}

fn run_dashboard_cmd(
    config: Option<PathBuf>,
    output_dir: PathBuf,
    no_artifacts: bool,
) -> Result<()> {
    let config = load_config(config)?;
    let provider = YahooProvider::new();
    let scraper = RankingScraper::new(&config.ranking_url, &config.user_agent);

    let report = run_dashboard(&config, &provider, &scraper, Local::now().date_naive())?;
    print_dashboard(&report);

    if !no_artifacts {
        let run_dir = save_artifacts(&report, &output_dir)?;
        println!("Artifacts saved to: {}", run_dir.display());
    }

    Ok(())
}

// ─── Rendering ──────────────────────────────────────────────────────

fn print_dashboard(report: &DashboardReport) {
    println!("{}", report.page.title);
    println!("{}", "=".repeat(report.page.title.len()));
    println!();
    print_index(&report.index);
    println!();
    print_compare(&report.compare);
}

fn print_index(report: &IndexReport) {
    println!("Index snapshot ({})", report.index_symbol);
    println!(
        "  {:<18} {:>12.2}  {}",
        report.index_symbol,
        report.index_current,
        fmt_change(report.index_change_pct)
    );
    println!(
        "  {:<18} {:>12.2}  {}",
        report.volatility_symbol,
        report.volatility_current,
        fmt_change(report.volatility_change_pct)
    );

    if report.volatility_calm {
        println!("  Volatility {:.2} <= 15: favorable entry", report.volatility_current);
    } else {
        println!("  Volatility {:.2} > 15: caution", report.volatility_current);
    }

    if let (true, Some(change)) = (report.sell_alert, report.index_change_pct) {
        println!(
            "  ALERT: {} dropped {:+.2}% day-over-day — consider selling",
            report.index_symbol, change
        );
    } else if let (Some(crash), Some(days)) = (&report.last_crash, report.days_since_last_crash) {
        println!(
            "  Last crash day ({:.2}%): {} — {} days ago",
            crash.pct_change, crash.date, days
        );
    } else {
        println!("  No day in the window dropped 3% or more");
    }

    println!(
        "  {} crash day(s) across {} sessions",
        report.crash_days.len(),
        report.series.len()
    );
}

fn print_compare(report: &CompareReport) {
    println!("Top companies by market cap");
    for (rank, panel) in [(1, &report.leader), (2, &report.runner_up)] {
        let company = &panel.record;
        match panel.display {
            SeriesDisplay::Computed { latest, change_pct } => {
                println!(
                    "  #{rank} {:<22} {:>10}  {:+.2}%",
                    company.name,
                    format_trillions(latest),
                    change_pct
                );
            }
            SeriesDisplay::Unavailable => {
                println!(
                    "  #{rank} {:<22} {:>10}",
                    company.name,
                    company.fallback_display()
                );
            }
        }
    }

    let comparison = &report.comparison;
    if let (Some(diff), Some(pct)) = (comparison.absolute_diff, comparison.diff_percent) {
        println!(
            "  Gap: {} ({:.2}%)",
            format_billions(diff.abs()),
            pct.abs()
        );
    }

    match comparison.allocation {
        Some(Allocation::FullLeader) => println!(
            "  Allocation: 100% {} / liquidate {} (100:0)",
            comparison.leader.name, comparison.runner_up.name
        ),
        Some(Allocation::SplitEven) => println!(
            "  Allocation: 50% {} / 50% {} (50:50)",
            comparison.leader.name, comparison.runner_up.name
        ),
        None => println!("  Allocation: unavailable (missing market cap)"),
    }
}

fn fmt_change(change: Option<f64>) -> String {
    match change {
        Some(pct) => format!("{pct:+.2}%"),
        None => "n/a".to_string(),
    }
}

fn format_trillions(usd: f64) -> String {
    format!("${:.3} T", usd / 1e12)
}

fn format_billions(usd: f64) -> String {
    format!("${:.1} B", usd / 1e9)
}
