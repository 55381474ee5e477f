use std::collections::HashMap;

use serde::Serialize;

use crate::records::CleanedRecord;

/// Guards the stake CV against division by zero when all stakes are equal.
pub const STAKE_CV_EPSILON: f64 = 1e-9;

/// Flat aggregate statistics over one cleaned dataset.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AggregateMetrics {
    pub avg_clv: f64,
    pub pos_clv_rate: f64,
    pub stake_cv: f64,
    pub market_hhi: f64,
    pub book_hhi: f64,
    pub lead_mean: f64,
    pub lead_std: f64,
}

pub fn compute_metrics(records: &[CleanedRecord]) -> AggregateMetrics {
    if records.is_empty() {
        return AggregateMetrics {
            avg_clv: 0.0,
            pos_clv_rate: 0.0,
            stake_cv: 0.0,
            market_hhi: 0.0,
            book_hhi: 0.0,
            lead_mean: 0.0,
            lead_std: 0.0,
        };
    }

    let clv: Vec<f64> = records.iter().map(|r| r.clv_percent).collect();
    let stakes: Vec<f64> = records.iter().map(|r| r.stake).collect();
    let leads: Vec<f64> = records.iter().map(|r| r.lead_hours).collect();

    let positive = records.iter().filter(|r| r.clv_percent > 0.0).count();

    AggregateMetrics {
        avg_clv: mean(&clv),
        pos_clv_rate: positive as f64 / records.len() as f64,
        stake_cv: sample_std(&stakes) / (mean(&stakes) + STAKE_CV_EPSILON) * 100.0,
        market_hhi: herfindahl(records.iter().map(|r| r.market_type.as_str())),
        book_hhi: herfindahl(records.iter().map(|r| r.book.as_str())),
        lead_mean: mean(&leads),
        lead_std: sample_std(&leads),
    }
}

/// Sum of squared category shares. Empty or missing values count as their
/// own category rather than being excluded.
pub fn herfindahl<'a>(values: impl IntoIterator<Item = &'a str>) -> f64 {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut total = 0usize;
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
        total += 1;
    }
    if total == 0 {
        return 0.0;
    }
    counts
        .values()
        .map(|&count| {
            let share = count as f64 / total as f64;
            share * share
        })
        .sum()
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (N-1 denominator); 0.0 below two samples.
fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    var.sqrt()
}
