use chrono::NaiveDateTime;
use serde::Serialize;

use crate::odds::normalize_odds;
use crate::timeparse::parse_timestamp;

/// One raw row of uploaded wager history. Untouched after ingestion.
#[derive(Debug, Clone)]
pub struct WagerRecord {
    pub book: String,
    pub sport: String,
    pub market_type: String,
    pub odds_placed: String,
    pub closing_odds: String,
    pub stake: String,
    pub bet_time: String,
    pub event_time: String,
    pub result: String,
}

/// A wager row that survived normalization. All derived numbers are finite.
#[derive(Debug, Clone, Serialize)]
pub struct CleanedRecord {
    pub book: String,
    pub sport: String,
    pub market_type: String,
    pub odds_placed_decimal: f64,
    pub closing_odds_decimal: f64,
    pub stake: f64,
    pub bet_time: NaiveDateTime,
    pub event_time: NaiveDateTime,
    pub lead_hours: f64,
    pub clv_percent: f64,
    pub result: String,
}

#[derive(Debug, Clone, Default)]
pub struct CleanOutcome {
    pub records: Vec<CleanedRecord>,
    /// Rows discarded for unparseable odds, stake, or timestamps.
    pub dropped: usize,
}

/// Normalize every row, silently dropping the unrecoverable ones.
pub fn clean_records(rows: &[WagerRecord]) -> CleanOutcome {
    let mut out = CleanOutcome::default();
    for row in rows {
        match clean_record(row) {
            Some(record) => out.records.push(record),
            None => out.dropped += 1,
        }
    }
    if out.dropped > 0 {
        tracing::debug!(
            dropped = out.dropped,
            kept = out.records.len(),
            "dropped rows with unparseable fields"
        );
    }
    out
}

fn clean_record(row: &WagerRecord) -> Option<CleanedRecord> {
    let odds_placed_decimal = normalize_odds(&row.odds_placed)?;
    let closing_odds_decimal = normalize_odds(&row.closing_odds)?;
    let stake = row
        .stake
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())?;
    let bet_time = parse_timestamp(&row.bet_time)?;
    let event_time = parse_timestamp(&row.event_time)?;

    // Negative lead (bet recorded after event start) is kept as-is.
    let lead_hours = (event_time - bet_time).num_milliseconds() as f64 / 3_600_000.0;
    let clv_percent = (closing_odds_decimal - odds_placed_decimal) / odds_placed_decimal * 100.0;

    if !odds_placed_decimal.is_finite()
        || !closing_odds_decimal.is_finite()
        || !lead_hours.is_finite()
        || !clv_percent.is_finite()
    {
        return None;
    }

    Some(CleanedRecord {
        book: row.book.clone(),
        sport: row.sport.clone(),
        market_type: row.market_type.clone(),
        odds_placed_decimal,
        closing_odds_decimal,
        stake,
        bet_time,
        event_time,
        lead_hours,
        clv_percent,
        result: row.result.clone(),
    })
}
