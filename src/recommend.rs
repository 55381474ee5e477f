use crate::risk::{RiskProfile, ScoringConfig};

const CLV_ADVICE: &str =
    "High positive CLV: mix in later bets or smaller edges to look less sharp.";
const POS_CLV_ADVICE: &str =
    "Large share beating the close: add some neutral/coin-flip markets.";
const STAKE_ADVICE: &str =
    "Stake sizes too consistent: vary stakes ±10–25% around your base.";
const MARKET_ADVICE: &str =
    "Market concentration high: add 2–3 different markets or sports weekly.";
const BOOK_ADVICE: &str =
    "Book concentration high: spread action across additional legal books.";
const LEAD_MEAN_ADVICE: &str =
    "You bet very early on average: add some closer-to-start bets.";
const LEAD_STD_ADVICE: &str =
    "Bet timing is very consistent: randomize time-of-day you place bets.";

/// Shown when nothing trips the threshold; the list is never empty.
pub const NEUTRAL_ADVICE: &str =
    "Profile looks reasonably recreational. Keep rotating markets, stakes, and timing.";

/// One fixed advisory per sub-risk above the threshold, in sub-risk order.
pub fn recommendations(profile: &RiskProfile, cfg: &ScoringConfig) -> Vec<String> {
    let sub = &profile.sub_risks;
    let mut out = Vec::new();
    for (value, advice) in [
        (sub.clv, CLV_ADVICE),
        (sub.pos_clv, POS_CLV_ADVICE),
        (sub.stake, STAKE_ADVICE),
        (sub.market, MARKET_ADVICE),
        (sub.book, BOOK_ADVICE),
        (sub.lead_mean, LEAD_MEAN_ADVICE),
        (sub.lead_std, LEAD_STD_ADVICE),
    ] {
        if value > cfg.advice_threshold {
            out.push(advice.to_string());
        }
    }
    if out.is_empty() {
        out.push(NEUTRAL_ADVICE.to_string());
    }
    out
}
