/// Convert a raw odds quote (American or Decimal) into canonical decimal odds.
///
/// A leading `-` always means explicit negative American odds and is handled
/// before the decimal-range heuristic ever runs; reordering these checks
/// changes how edge values like `-1.5` classify.
pub fn normalize_odds(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.starts_with('-') {
        let v = s.parse::<f64>().ok()?;
        return negative_american(v);
    }
    american_to_decimal(s)
}

fn american_to_decimal(s: &str) -> Option<f64> {
    let v = s.parse::<f64>().ok()?;

    // Decimal range heuristic: quotes in [1.01, 100.0] read as already-decimal.
    if (1.01..=100.0).contains(&v) {
        return Some(v);
    }

    if let Some(rest) = s.strip_prefix('+') {
        let a = rest.parse::<f64>().ok()?;
        return Some(1.0 + a / 100.0);
    }

    if v < 0.0 {
        return negative_american(v);
    }

    // Large unsigned quote like 110 reads as +110.
    if v >= 100.0 {
        return Some(1.0 + v / 100.0);
    }

    None
}

fn negative_american(v: f64) -> Option<f64> {
    if !v.is_finite() || v == 0.0 {
        return None;
    }
    Some(1.0 + 100.0 / v.abs())
}
