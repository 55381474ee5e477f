use std::fs;
use std::path::PathBuf;

use betsync::error::AnalysisError;
use betsync::report::analyze_csv;
use betsync::risk::{RiskBand, ScoringConfig};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn sample_history_analyzes_with_zero_drops() {
    let raw = read_fixture("sample_history.csv");
    let report = analyze_csv(&raw, &ScoringConfig::default()).expect("sample should analyze");

    assert_eq!(report.records.len(), 5);
    assert_eq!(report.dropped_rows, 0);

    // Row one: +110 converts to 2.10; +100 falls inside the decimal band
    // and reads as the decimal quote 100.0.
    let first = &report.records[0];
    assert!((first.odds_placed_decimal - 2.10).abs() < 1e-9);
    assert!((first.closing_odds_decimal - 100.0).abs() < 1e-9);
    assert!(report.metrics.avg_clv > 900.0);

    assert!((report.metrics.pos_clv_rate - 0.4).abs() < 1e-9);
    assert!(report.profile.score >= 0.0 && report.profile.score <= 100.0);
    assert_eq!(report.profile.band, RiskBand::Recreational);
    // The inflated average CLV trips exactly that advisory.
    assert!(report.recommendations.iter().any(|r| r.contains("CLV")));
}

#[test]
fn sample_lead_hours_match_the_schedule() {
    let raw = read_fixture("sample_history.csv");
    let report = analyze_csv(&raw, &ScoringConfig::default()).expect("sample should analyze");
    let leads: Vec<f64> = report.records.iter().map(|r| r.lead_hours).collect();
    let expected = [6.5, 5.9167, 33.5, 99.25, 7.0];
    for (got, want) in leads.iter().zip(expected) {
        assert!((got - want).abs() < 1e-3, "lead {got} vs {want}");
    }
}

#[test]
fn messy_history_drops_only_the_broken_rows() {
    let raw = read_fixture("messy_history.csv");
    let report = analyze_csv(&raw, &ScoringConfig::default()).expect("should analyze");

    assert_eq!(report.records.len(), 3);
    assert_eq!(report.dropped_rows, 3);
    assert_eq!(report.records[0].book, "Rivers, PA");
    // Unsigned 150 reads as +150.
    assert!((report.records[1].odds_placed_decimal - 2.50).abs() < 1e-9);
}

#[test]
fn missing_columns_are_a_structural_error() {
    let raw = "Book,Sport,OddsPlaced,ClosingOdds,BetTime,EventTime\n";
    let err = analyze_csv(raw, &ScoringConfig::default()).expect_err("structural failure");
    assert_eq!(
        err,
        AnalysisError::MissingColumns(vec!["MarketType".to_string(), "Stake".to_string()])
    );
}

#[test]
fn all_rows_invalid_is_the_empty_dataset_error() {
    let raw = "Book,Sport,MarketType,OddsPlaced,ClosingOdds,Stake,BetTime,EventTime\n\
               Bet99,NBA,PlayerPoints,notodds,+100,50,2025-10-10 13:00:00,2025-10-10 19:30:00\n\
               Bet99,NBA,PlayerPoints,nope,+100,50,2025-10-10 13:00:00,2025-10-10 19:30:00\n";
    let err = analyze_csv(raw, &ScoringConfig::default()).expect_err("empty dataset");
    assert_eq!(err, AnalysisError::NoValidRows);
}

#[test]
fn header_only_input_is_the_empty_dataset_error() {
    let raw = "Book,Sport,MarketType,OddsPlaced,ClosingOdds,Stake,BetTime,EventTime,Result\n";
    let err = analyze_csv(raw, &ScoringConfig::default()).expect_err("empty dataset");
    assert_eq!(err, AnalysisError::NoValidRows);
}

#[test]
fn report_serializes_for_downstream_consumers() {
    let raw = read_fixture("sample_history.csv");
    let report = analyze_csv(&raw, &ScoringConfig::default()).expect("sample should analyze");
    let json = serde_json::to_string(&report).expect("report serializes");
    assert!(json.contains("\"score\""));
    assert!(json.contains("\"top_markets\""));
    assert!(json.contains("\"clv_percent\""));
}
