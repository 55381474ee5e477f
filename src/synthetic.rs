use chrono::{Duration, NaiveDate, NaiveDateTime};
use rand::Rng;

use crate::dataset::REQUIRED_COLUMNS;
use crate::records::WagerRecord;

const BOOKS: &[&str] = &["Bet99", "FanDuel", "Bet365", "BetMGM"];
const MARKETS: &[(&str, &str)] = &[
    ("NBA", "PlayerPoints"),
    ("NBA", "AltSpread"),
    ("NHL", "Moneyline"),
    ("NHL", "ShotsOnGoal"),
    ("NFL", "Totals"),
    ("MLB", "Moneyline"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileKind {
    /// Varied books, markets, stakes, and timing; CLV hovers around zero.
    Recreational,
    /// One book, one market, flat stakes, early and regular timing,
    /// consistently positive CLV.
    Sharp,
}

#[derive(Debug, Clone, Copy)]
pub struct SyntheticConfig {
    pub rows: usize,
    pub profile: ProfileKind,
    pub start: NaiveDate,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            rows: 200,
            profile: ProfileKind::Recreational,
            start: NaiveDate::from_ymd_opt(2025, 9, 1).expect("valid date"),
        }
    }
}

/// Generate a plausible wager history for demos, benches, and tests.
pub fn generate_history(cfg: &SyntheticConfig, rng: &mut impl Rng) -> Vec<WagerRecord> {
    (0..cfg.rows).map(|i| generate_row(cfg, i, rng)).collect()
}

fn generate_row(cfg: &SyntheticConfig, index: usize, rng: &mut impl Rng) -> WagerRecord {
    let day = cfg.start + Duration::days((index / 4) as i64);

    let (book, sport, market, stake, lead_hours, clv_pct, bet_hour) = match cfg.profile {
        ProfileKind::Recreational => {
            let (sport, market) = MARKETS[rng.gen_range(0..MARKETS.len())];
            (
                BOOKS[rng.gen_range(0..BOOKS.len())],
                sport,
                market,
                (rng.gen_range(10.0..150.0_f64) / 5.0).round() * 5.0,
                rng.gen_range(1.0..24.0),
                rng.gen_range(-3.0..3.0),
                rng.gen_range(9..22),
            )
        }
        ProfileKind::Sharp => (
            "Bet99",
            "NBA",
            "PlayerPoints",
            100.0,
            rng.gen_range(46.0..50.0),
            rng.gen_range(2.0..6.0),
            11,
        ),
    };

    let placed = rng.gen_range(1.80..2.20_f64);
    let closing = placed * (1.0 + clv_pct / 100.0);
    let bet_time = day
        .and_hms_opt(bet_hour, rng.gen_range(0..60), 0)
        .expect("valid time");
    let event_time = bet_time + Duration::minutes((lead_hours * 60.0) as i64);

    WagerRecord {
        book: book.to_string(),
        sport: sport.to_string(),
        market_type: market.to_string(),
        odds_placed: format_odds(placed, rng.gen_bool(0.5)),
        closing_odds: format_odds(closing, rng.gen_bool(0.5)),
        stake: format!("{stake}"),
        bet_time: format_time(bet_time),
        event_time: format_time(event_time),
        result: if rng.gen_bool(0.5) { "W" } else { "L" }.to_string(),
    }
}

/// Quote decimal odds either as-is or in American form, so generated files
/// exercise both normalization paths.
fn format_odds(decimal: f64, american: bool) -> String {
    if !american {
        return format!("{decimal:.2}");
    }
    if decimal >= 2.0 {
        format!("+{:.0}", (decimal - 1.0) * 100.0)
    } else {
        format!("-{:.0}", 100.0 / (decimal - 1.0))
    }
}

fn format_time(t: NaiveDateTime) -> String {
    t.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Render records back to the canonical CSV layout.
pub fn history_to_csv(rows: &[WagerRecord]) -> String {
    let mut out = String::new();
    out.push_str(&REQUIRED_COLUMNS.join(","));
    out.push_str(",Result\n");
    for row in rows {
        out.push_str(&format!(
            "{},{},{},{},{},{},{},{},{}\n",
            row.book,
            row.sport,
            row.market_type,
            row.odds_placed,
            row.closing_odds,
            row.stake,
            row.bet_time,
            row.event_time,
            row.result,
        ));
    }
    out
}
