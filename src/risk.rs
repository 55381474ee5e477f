use std::env;

use serde::Serialize;

use crate::metrics::AggregateMetrics;

/// Every heuristic band, weight, and threshold behind the limit-risk score.
///
/// The scoring algorithm itself never hard-codes a number; tuning happens
/// here and nowhere else.
#[derive(Debug, Clone, Copy)]
pub struct ScoringConfig {
    /// Avg CLV (%) where risk starts accruing; 1% is ordinary, 5%+ looks sharp.
    pub clv_floor: f64,
    pub clv_span: f64,
    /// Beating the close more than 55% of the time becomes suspicious.
    pub pos_clv_floor: f64,
    pub pos_clv_span: f64,
    /// Stake CV at or below this reads as robotic; capped before scoring.
    pub stake_cv_calm: f64,
    pub stake_cv_cap: f64,
    pub market_hhi_floor: f64,
    pub market_hhi_span: f64,
    pub book_hhi_floor: f64,
    pub book_hhi_span: f64,
    /// Average lead (hours) beyond which betting looks model-driven.
    pub lead_mean_floor: f64,
    pub lead_mean_span: f64,
    /// Lead stddev (hours) at or below this reads as scheduled.
    pub lead_std_calm: f64,
    pub lead_std_cap: f64,
    pub weights: RiskWeights,
    /// Sub-risks above this trigger an advisory.
    pub advice_threshold: f64,
    /// Composite-score cutoffs for the risk band.
    pub elevated_score: f64,
    pub high_score: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct RiskWeights {
    pub clv: f64,
    pub pos_clv: f64,
    pub stake: f64,
    pub market: f64,
    pub book: f64,
    pub lead_mean: f64,
    pub lead_std: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            clv_floor: 1.0,
            clv_span: 4.0,
            pos_clv_floor: 0.55,
            pos_clv_span: 0.25,
            stake_cv_calm: 12.0,
            stake_cv_cap: 30.0,
            market_hhi_floor: 0.20,
            market_hhi_span: 0.60,
            book_hhi_floor: 0.25,
            book_hhi_span: 0.60,
            lead_mean_floor: 12.0,
            lead_mean_span: 48.0,
            lead_std_calm: 6.0,
            lead_std_cap: 24.0,
            weights: RiskWeights {
                clv: 0.28,
                pos_clv: 0.12,
                stake: 0.16,
                market: 0.14,
                book: 0.10,
                lead_mean: 0.10,
                lead_std: 0.10,
            },
            advice_threshold: 0.6,
            elevated_score: 40.0,
            high_score: 66.0,
        }
    }
}

impl ScoringConfig {
    /// Defaults with optional environment overrides for the caller-facing
    /// knobs. The bands and weights themselves are not env-tunable.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Some(v) = env_f64("BETSYNC_ADVICE_THRESHOLD") {
            cfg.advice_threshold = v.clamp(0.0, 1.0);
        }
        if let Some(v) = env_f64("BETSYNC_ELEVATED_SCORE") {
            cfg.elevated_score = v.clamp(0.0, 100.0);
        }
        if let Some(v) = env_f64("BETSYNC_HIGH_SCORE") {
            cfg.high_score = v.clamp(cfg.elevated_score, 100.0);
        }
        cfg
    }
}

fn env_f64(key: &str) -> Option<f64> {
    env::var(key).ok().and_then(|v| v.trim().parse::<f64>().ok())
}

/// Seven normalized pattern risks, each in [0, 1].
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SubRisks {
    pub clv: f64,
    pub pos_clv: f64,
    pub stake: f64,
    pub market: f64,
    pub book: f64,
    pub lead_mean: f64,
    pub lead_std: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskBand {
    Recreational,
    Elevated,
    High,
}

impl RiskBand {
    pub fn from_score(score: f64, cfg: &ScoringConfig) -> Self {
        if score >= cfg.high_score {
            RiskBand::High
        } else if score >= cfg.elevated_score {
            RiskBand::Elevated
        } else {
            RiskBand::Recreational
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskBand::Recreational => "recreational",
            RiskBand::Elevated => "elevated",
            RiskBand::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct RiskProfile {
    pub sub_risks: SubRisks,
    /// Weighted composite in [0, 100], one decimal place.
    pub score: f64,
    pub band: RiskBand,
}

/// Map aggregate metrics to the weighted composite limit-risk score.
/// Pure and total for finite inputs.
pub fn score_metrics(metrics: &AggregateMetrics, cfg: &ScoringConfig) -> RiskProfile {
    let sub_risks = SubRisks {
        clv: clamp01((metrics.avg_clv - cfg.clv_floor) / cfg.clv_span),
        pos_clv: clamp01((metrics.pos_clv_rate - cfg.pos_clv_floor) / cfg.pos_clv_span),
        stake: clamp01(
            (cfg.stake_cv_calm - metrics.stake_cv.min(cfg.stake_cv_cap)) / cfg.stake_cv_calm,
        ),
        market: clamp01((metrics.market_hhi - cfg.market_hhi_floor) / cfg.market_hhi_span),
        book: clamp01((metrics.book_hhi - cfg.book_hhi_floor) / cfg.book_hhi_span),
        lead_mean: clamp01((metrics.lead_mean - cfg.lead_mean_floor) / cfg.lead_mean_span),
        lead_std: clamp01(
            (cfg.lead_std_calm - metrics.lead_std.min(cfg.lead_std_cap)) / cfg.lead_std_calm,
        ),
    };

    let w = &cfg.weights;
    let combined = w.clv * sub_risks.clv
        + w.pos_clv * sub_risks.pos_clv
        + w.stake * sub_risks.stake
        + w.market * sub_risks.market
        + w.book * sub_risks.book
        + w.lead_mean * sub_risks.lead_mean
        + w.lead_std * sub_risks.lead_std;
    let score = (100.0 * combined * 10.0).round() / 10.0;

    RiskProfile {
        sub_risks,
        score,
        band: RiskBand::from_score(score, cfg),
    }
}

pub fn clamp01(v: f64) -> f64 {
    v.clamp(0.0, 1.0)
}
