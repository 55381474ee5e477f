use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use betsync::error::AnalysisError;
use betsync::export::export_report;
use betsync::report::{AnalysisReport, analyze_csv};
use betsync::risk::ScoringConfig;

struct CliArgs {
    csv_path: PathBuf,
    json: bool,
    xlsx_out: Option<PathBuf>,
}

fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let Some(args) = parse_args()? else {
        eprintln!("Usage: betsync <history.csv> [--json] [--xlsx <out.xlsx>]");
        return Ok(ExitCode::from(2));
    };

    let raw = fs::read_to_string(&args.csv_path)
        .with_context(|| format!("read {}", args.csv_path.display()))?;

    let cfg = ScoringConfig::from_env();
    let report = match analyze_csv(&raw, &cfg) {
        Ok(report) => report,
        Err(AnalysisError::MissingColumns(columns)) => {
            eprintln!("Missing required columns: {}", columns.join(", "));
            return Ok(ExitCode::FAILURE);
        }
        Err(AnalysisError::NoValidRows) => {
            eprintln!("No valid rows after cleaning. Check your CSV formatting.");
            return Ok(ExitCode::FAILURE);
        }
    };

    if args.json {
        let rendered = serde_json::to_string_pretty(&report).context("serialize report")?;
        println!("{rendered}");
    } else {
        print_report(&report);
    }

    if let Some(path) = args.xlsx_out {
        export_report(&path, &report)?;
        println!("Exported workbook to {}", path.display());
    }

    Ok(ExitCode::SUCCESS)
}

fn parse_args() -> Result<Option<CliArgs>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut csv_path = None;
    let mut json = false;
    let mut xlsx_out = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--json" => json = true,
            "--xlsx" => {
                let path = iter.next().context("--xlsx requires a path")?;
                xlsx_out = Some(PathBuf::from(path));
            }
            other if csv_path.is_none() && !other.starts_with("--") => {
                csv_path = Some(PathBuf::from(other));
            }
            other => return Err(anyhow::anyhow!("unexpected argument: {other}")),
        }
    }

    Ok(csv_path.map(|csv_path| CliArgs {
        csv_path,
        json,
        xlsx_out,
    }))
}

fn print_report(report: &AnalysisReport) {
    let m = &report.metrics;
    let p = &report.profile;

    println!("Limit Risk Score: {:.1}/100 ({})", p.score, p.band.label());
    println!("Avg CLV: {:.2}%", m.avg_clv);
    println!("% Bets Beating Close: {:.1}%", m.pos_clv_rate * 100.0);
    println!(
        "Bets analyzed: {} ({} dropped)",
        report.records.len(),
        report.dropped_rows
    );
    println!();

    println!("Sub-risks:");
    let sub = &p.sub_risks;
    for (name, value) in [
        ("clv", sub.clv),
        ("posclv", sub.pos_clv),
        ("stake", sub.stake),
        ("market", sub.market),
        ("book", sub.book),
        ("lead_mean", sub.lead_mean),
        ("lead_std", sub.lead_std),
    ] {
        println!("  {name:<10} {value:.2}");
    }
    println!();

    println!("Stake CV: {:.2}%", m.stake_cv);
    println!("Market HHI: {:.4}  Book HHI: {:.4}", m.market_hhi, m.book_hhi);
    println!("Lead hours: mean {:.1}, std {:.1}", m.lead_mean, m.lead_std);
    println!();

    if !report.distributions.top_markets.is_empty() {
        println!(
            "Markets hit (top {}):",
            report.distributions.top_markets.len()
        );
        for market in &report.distributions.top_markets {
            println!("  {:<24} {}", market.market_type, market.count);
        }
        println!();
    }

    println!("Recommendations:");
    for rec in &report.recommendations {
        println!("  - {rec}");
    }
}
