use crate::error::AnalysisError;
use crate::records::WagerRecord;

/// Required header columns, case-sensitive. `Result` is carried when present
/// but never required; scoring ignores it.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "Book",
    "Sport",
    "MarketType",
    "OddsPlaced",
    "ClosingOdds",
    "Stake",
    "BetTime",
    "EventTime",
];

/// The sample history from the upload helper text. Cleans with zero drops.
pub const SAMPLE_HISTORY_CSV: &str = include_str!("../tests/fixtures/sample_history.csv");

/// Parse delimited wager history into raw records.
///
/// Tolerant of BOMs, CRLF endings, blank lines, quoted fields, and ragged
/// rows (short rows are padded with empty fields, extras ignored). The only
/// hard failure is structural: required columns absent from the header.
pub fn parse_history_csv(raw: &str) -> Result<Vec<WagerRecord>, AnalysisError> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let mut lines = raw.lines().filter(|line| !line.trim().is_empty());

    let header: Vec<String> = match lines.next() {
        Some(line) => split_line(line)
            .into_iter()
            .map(|cell| cell.trim().to_string())
            .collect(),
        None => Vec::new(),
    };

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|name| !header.iter().any(|cell| cell == *name))
        .map(|name| name.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(AnalysisError::MissingColumns(missing));
    }

    let column = |name: &str| -> usize {
        header
            .iter()
            .position(|cell| cell == name)
            .expect("required column verified above")
    };
    let book = column("Book");
    let sport = column("Sport");
    let market_type = column("MarketType");
    let odds_placed = column("OddsPlaced");
    let closing_odds = column("ClosingOdds");
    let stake = column("Stake");
    let bet_time = column("BetTime");
    let event_time = column("EventTime");
    let result = header.iter().position(|cell| cell == "Result");

    let mut rows = Vec::new();
    let mut ragged = 0usize;
    for line in lines {
        let fields = split_line(line);
        if fields.len() < header.len() {
            ragged += 1;
        }
        let field = |idx: usize| fields.get(idx).cloned().unwrap_or_default();
        rows.push(WagerRecord {
            book: field(book),
            sport: field(sport),
            market_type: field(market_type),
            odds_placed: field(odds_placed),
            closing_odds: field(closing_odds),
            stake: field(stake),
            bet_time: field(bet_time),
            event_time: field(event_time),
            result: result.map(field).unwrap_or_default(),
        });
    }
    if ragged > 0 {
        tracing::warn!(ragged, total = rows.len(), "padded short csv rows");
    }
    Ok(rows)
}

/// Split one CSV line. Commas inside double quotes are literal; a doubled
/// quote inside a quoted field escapes a quote.
fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);
    fields
}
