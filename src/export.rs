use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::report::AnalysisReport;

/// Write a finished report to a two-sheet workbook: Summary (metrics,
/// sub-risks, score, recommendations) and Bets (the cleaned rows).
pub fn export_report(path: &Path, report: &AnalysisReport) -> Result<()> {
    let mut workbook = Workbook::new();

    let summary = workbook.add_worksheet();
    summary.set_name("Summary").context("name summary sheet")?;
    write_rows(summary, &summary_rows(report))?;

    let bets = workbook.add_worksheet();
    bets.set_name("Bets").context("name bets sheet")?;
    write_rows(bets, &bet_rows(report))?;

    workbook
        .save(path)
        .with_context(|| format!("save workbook {}", path.display()))?;
    Ok(())
}

fn summary_rows(report: &AnalysisReport) -> Vec<Vec<String>> {
    let m = &report.metrics;
    let p = &report.profile;
    let sub = &p.sub_risks;

    let mut rows = vec![
        vec!["Metric".to_string(), "Value".to_string()],
        kv("Bets analyzed", report.records.len().to_string()),
        kv("Rows dropped", report.dropped_rows.to_string()),
        kv("Avg CLV (%)", format!("{:.2}", m.avg_clv)),
        kv("% Bets beating close", format!("{:.1}", m.pos_clv_rate * 100.0)),
        kv("Stake CV (%)", format!("{:.2}", m.stake_cv)),
        kv("Market HHI", format!("{:.4}", m.market_hhi)),
        kv("Book HHI", format!("{:.4}", m.book_hhi)),
        kv("Lead mean (hours)", format!("{:.2}", m.lead_mean)),
        kv("Lead std (hours)", format!("{:.2}", m.lead_std)),
        Vec::new(),
        vec!["Sub-risk".to_string(), "Value".to_string()],
        kv("CLV", format!("{:.2}", sub.clv)),
        kv("Positive CLV rate", format!("{:.2}", sub.pos_clv)),
        kv("Stake consistency", format!("{:.2}", sub.stake)),
        kv("Market concentration", format!("{:.2}", sub.market)),
        kv("Book concentration", format!("{:.2}", sub.book)),
        kv("Lead mean", format!("{:.2}", sub.lead_mean)),
        kv("Lead consistency", format!("{:.2}", sub.lead_std)),
        Vec::new(),
        kv("Limit risk score", format!("{:.1}", p.score)),
        kv("Band", p.band.label().to_string()),
        Vec::new(),
        vec!["Recommendations".to_string()],
    ];
    for rec in &report.recommendations {
        rows.push(vec![rec.clone()]);
    }
    rows
}

fn bet_rows(report: &AnalysisReport) -> Vec<Vec<String>> {
    let mut rows = vec![vec![
        "Book".to_string(),
        "Sport".to_string(),
        "MarketType".to_string(),
        "OddsPlaced (dec)".to_string(),
        "ClosingOdds (dec)".to_string(),
        "Stake".to_string(),
        "BetTime".to_string(),
        "EventTime".to_string(),
        "LeadHours".to_string(),
        "CLV (%)".to_string(),
        "Result".to_string(),
    ]];
    for record in &report.records {
        rows.push(vec![
            record.book.clone(),
            record.sport.clone(),
            record.market_type.clone(),
            format!("{:.4}", record.odds_placed_decimal),
            format!("{:.4}", record.closing_odds_decimal),
            format!("{:.2}", record.stake),
            record.bet_time.format("%Y-%m-%d %H:%M:%S").to_string(),
            record.event_time.format("%Y-%m-%d %H:%M:%S").to_string(),
            format!("{:.2}", record.lead_hours),
            format!("{:.2}", record.clv_percent),
            record.result.clone(),
        ]);
    }
    rows
}

fn kv(key: &str, value: String) -> Vec<String> {
    vec![key.to_string(), value]
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}
