use std::collections::HashMap;

use serde::Serialize;

use crate::dataset::parse_history_csv;
use crate::error::AnalysisError;
use crate::metrics::{AggregateMetrics, compute_metrics};
use crate::recommend::recommendations;
use crate::records::{CleanedRecord, WagerRecord, clean_records};
use crate::risk::{RiskProfile, ScoringConfig, score_metrics};

pub const HISTOGRAM_BINS: usize = 20;
pub const TOP_MARKETS: usize = 10;

/// Everything one analysis pass hands to a presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub metrics: AggregateMetrics,
    pub profile: RiskProfile,
    pub recommendations: Vec<String>,
    pub records: Vec<CleanedRecord>,
    pub dropped_rows: usize,
    pub distributions: Distributions,
}

/// Pre-binned chart data so callers never re-derive it from the records.
#[derive(Debug, Clone, Serialize)]
pub struct Distributions {
    pub clv_percent: Vec<HistogramBin>,
    pub stake: Vec<HistogramBin>,
    pub lead_hours: Vec<HistogramBin>,
    pub top_markets: Vec<MarketCount>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct HistogramBin {
    pub lo: f64,
    pub hi: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarketCount {
    pub market_type: String,
    pub count: usize,
}

/// Run the full linear pass over raw CSV text: parse, clean, aggregate,
/// score, recommend. Stateless; one invocation per upload.
pub fn analyze_csv(raw: &str, cfg: &ScoringConfig) -> Result<AnalysisReport, AnalysisError> {
    let rows = parse_history_csv(raw)?;
    analyze_records(&rows, cfg)
}

pub fn analyze_records(
    rows: &[WagerRecord],
    cfg: &ScoringConfig,
) -> Result<AnalysisReport, AnalysisError> {
    let cleaned = clean_records(rows);
    if cleaned.records.is_empty() {
        return Err(AnalysisError::NoValidRows);
    }

    let metrics = compute_metrics(&cleaned.records);
    let profile = score_metrics(&metrics, cfg);
    let recommendations = recommendations(&profile, cfg);
    let distributions = compute_distributions(&cleaned.records);

    Ok(AnalysisReport {
        metrics,
        profile,
        recommendations,
        records: cleaned.records,
        dropped_rows: cleaned.dropped,
        distributions,
    })
}

fn compute_distributions(records: &[CleanedRecord]) -> Distributions {
    let clv: Vec<f64> = records.iter().map(|r| r.clv_percent).collect();
    let stake: Vec<f64> = records.iter().map(|r| r.stake).collect();
    let lead: Vec<f64> = records.iter().map(|r| r.lead_hours).collect();
    Distributions {
        clv_percent: histogram(&clv, HISTOGRAM_BINS),
        stake: histogram(&stake, HISTOGRAM_BINS),
        lead_hours: histogram(&lead, HISTOGRAM_BINS),
        top_markets: top_market_counts(records, TOP_MARKETS),
    }
}

/// Fixed-width bins across the observed value range. A constant series
/// collapses into the first bin.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    let bins = bins.max(1);
    let Some(&first) = values.first() else {
        return Vec::new();
    };
    let mut lo = first;
    let mut hi = first;
    for &v in values {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    let width = if hi > lo { (hi - lo) / bins as f64 } else { 1.0 };

    let mut counts = vec![0usize; bins];
    for &v in values {
        let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .iter()
        .enumerate()
        .map(|(i, &count)| HistogramBin {
            lo: lo + i as f64 * width,
            hi: lo + (i + 1) as f64 * width,
            count,
        })
        .collect()
}

/// Market types by descending bet count, name as tie-break, top `limit`.
pub fn top_market_counts(records: &[CleanedRecord], limit: usize) -> Vec<MarketCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        *counts.entry(record.market_type.as_str()).or_insert(0) += 1;
    }
    let mut rows: Vec<MarketCount> = counts
        .into_iter()
        .map(|(market_type, count)| MarketCount {
            market_type: market_type.to_string(),
            count,
        })
        .collect();
    rows.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.market_type.cmp(&b.market_type))
    });
    rows.truncate(limit);
    rows
}

#[cfg(test)]
mod tests {
    use super::{histogram, top_market_counts};
    use crate::records::{WagerRecord, clean_records};

    #[test]
    fn histogram_counts_sum_to_sample_size() {
        let values = [1.0, 2.0, 2.5, 3.0, 9.9, 10.0];
        let bins = histogram(&values, 5);
        assert_eq!(bins.len(), 5);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), values.len());
        assert!((bins[0].lo - 1.0).abs() < 1e-12);
        assert!((bins[4].hi - 10.0).abs() < 1e-12);
    }

    #[test]
    fn histogram_of_constant_series_uses_first_bin() {
        let bins = histogram(&[3.0, 3.0, 3.0], 4);
        assert_eq!(bins[0].count, 3);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 3);
    }

    #[test]
    fn histogram_of_empty_series_is_empty() {
        assert!(histogram(&[], 20).is_empty());
    }

    #[test]
    fn top_markets_order_is_deterministic() {
        let mut raw = Vec::new();
        for market in ["Totals", "Moneyline", "Moneyline", "AltSpread", "Totals"] {
            raw.push(WagerRecord {
                book: "Bet99".to_string(),
                sport: "NBA".to_string(),
                market_type: market.to_string(),
                odds_placed: "+110".to_string(),
                closing_odds: "+100".to_string(),
                stake: "50".to_string(),
                bet_time: "2025-10-10 13:00:00".to_string(),
                event_time: "2025-10-10 19:30:00".to_string(),
                result: "W".to_string(),
            });
        }
        let records = clean_records(&raw).records;
        let top = top_market_counts(&records, 10);
        let names: Vec<&str> = top.iter().map(|m| m.market_type.as_str()).collect();
        // Equal counts fall back to name order.
        assert_eq!(names, vec!["Moneyline", "Totals", "AltSpread"]);
        assert_eq!(top[0].count, 2);
    }

    #[test]
    fn top_markets_respects_the_limit() {
        let raw: Vec<WagerRecord> = (0..12)
            .map(|i| WagerRecord {
                book: "Bet99".to_string(),
                sport: "NBA".to_string(),
                market_type: format!("Market{i:02}"),
                odds_placed: "+110".to_string(),
                closing_odds: "+100".to_string(),
                stake: "50".to_string(),
                bet_time: "2025-10-10 13:00:00".to_string(),
                event_time: "2025-10-10 19:30:00".to_string(),
                result: "W".to_string(),
            })
            .collect();
        let records = clean_records(&raw).records;
        assert_eq!(top_market_counts(&records, 10).len(), 10);
    }
}
