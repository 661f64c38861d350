// Health Scoring - Weights as Data
// Maps aggregated figures to a bounded 0-100 heuristic score.
// One canonical formula: base 50, banded profitability and efficiency
// bonuses, flat loss penalty, degenerate zero-revenue handling first.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// ============================================================================
// SCORE WEIGHTS
// ============================================================================

/// Scoring weights and band edges. Band edges are percentages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Starting score before bonuses and penalties
    pub base: i32,

    /// Margin band edges (inclusive lower bounds)
    pub margin_high_pct: f64,
    pub margin_mid_pct: f64,

    /// Bonuses for the margin bands: >= high, >= mid, > 0
    pub margin_high_bonus: i32,
    pub margin_mid_bonus: i32,
    pub margin_low_bonus: i32,

    /// Expense-ratio band edges (inclusive upper bounds)
    pub lean_expense_pct: f64,
    pub moderate_expense_pct: f64,

    /// Bonuses for the expense-ratio bands: <= lean, <= moderate
    pub lean_expense_bonus: i32,
    pub moderate_expense_bonus: i32,

    /// Flat penalty applied whenever profit is negative
    pub loss_penalty: i32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        ScoreWeights {
            base: 50,
            margin_high_pct: 25.0,
            margin_mid_pct: 15.0,
            margin_high_bonus: 30,
            margin_mid_bonus: 20,
            margin_low_bonus: 10,
            lean_expense_pct: 40.0,
            moderate_expense_pct: 70.0,
            lean_expense_bonus: 20,
            moderate_expense_bonus: 10,
            loss_penalty: 40,
        }
    }
}

impl ScoreWeights {
    /// Load weight overrides from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read weights file: {:?}", path.as_ref()))?;

        serde_json::from_str(&content).context("Failed to parse weights JSON")
    }
}

// ============================================================================
// SCORE BREAKDOWN
// ============================================================================

/// The individual components behind one score, for reporting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub base: i32,
    pub profitability_bonus: i32,
    pub efficiency_bonus: i32,
    pub loss_penalty: i32,
    pub score: u8,
}

// ============================================================================
// HEALTH SCORER
// ============================================================================

pub struct HealthScorer {
    weights: ScoreWeights,
}

impl HealthScorer {
    pub fn new() -> Self {
        HealthScorer {
            weights: ScoreWeights::default(),
        }
    }

    pub fn with_weights(weights: ScoreWeights) -> Self {
        HealthScorer { weights }
    }

    /// Score one window. Total over all real inputs, result always in [0,100].
    pub fn score(&self, revenue: f64, expenses: f64, profit: f64) -> u8 {
        self.breakdown(revenue, expenses, profit).score
    }

    /// Score with the contributing components exposed.
    ///
    /// Degenerate inputs take precedence over the banded formula:
    /// zero revenue with active burn pins the score to 0, zero revenue
    /// with no expenses means "no data yet" and returns the base score.
    pub fn breakdown(&self, revenue: f64, expenses: f64, profit: f64) -> ScoreBreakdown {
        let w = &self.weights;

        if revenue <= 0.0 {
            let score = if expenses > 0.0 {
                0
            } else {
                clamp_score(w.base)
            };
            return ScoreBreakdown {
                base: w.base,
                profitability_bonus: 0,
                efficiency_bonus: 0,
                loss_penalty: 0,
                score,
            };
        }

        let margin = profit / revenue * 100.0;
        let expense_ratio = expenses / revenue * 100.0;

        let profitability_bonus = if margin >= w.margin_high_pct {
            w.margin_high_bonus
        } else if margin >= w.margin_mid_pct {
            w.margin_mid_bonus
        } else if margin > 0.0 {
            w.margin_low_bonus
        } else {
            0
        };

        let efficiency_bonus = if expense_ratio <= w.lean_expense_pct {
            w.lean_expense_bonus
        } else if expense_ratio <= w.moderate_expense_pct {
            w.moderate_expense_bonus
        } else {
            0
        };

        let loss_penalty = if profit < 0.0 { w.loss_penalty } else { 0 };

        let total = w.base + profitability_bonus + efficiency_bonus - loss_penalty;

        ScoreBreakdown {
            base: w.base,
            profitability_bonus,
            efficiency_bonus,
            loss_penalty,
            score: clamp_score(total),
        }
    }
}

impl Default for HealthScorer {
    fn default() -> Self {
        Self::new()
    }
}

fn clamp_score(score: i32) -> u8 {
    score.clamp(0, 100) as u8
}

/// Score one window with the default weights
pub fn compute_health_score(revenue: f64, expenses: f64, profit: f64) -> u8 {
    HealthScorer::new().score(revenue, expenses, profit)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_data_scores_base() {
        assert_eq!(compute_health_score(0.0, 0.0, 0.0), 50);
    }

    #[test]
    fn test_zero_revenue_active_burn_scores_zero() {
        assert_eq!(compute_health_score(0.0, 100.0, -100.0), 0);
    }

    #[test]
    fn test_strong_quarter_hits_ceiling() {
        // margin 60% -> +30, expense ratio 40% -> +20, no loss
        assert_eq!(compute_health_score(1000.0, 400.0, 600.0), 100);
    }

    #[test]
    fn test_loss_quarter() {
        // margin negative -> +0, ratio 120% -> +0, loss -> -40
        assert_eq!(compute_health_score(1000.0, 1200.0, -200.0), 10);
    }

    #[test]
    fn test_mid_band_bonuses() {
        // margin 20% -> +20, ratio 80% -> +0
        assert_eq!(compute_health_score(1000.0, 800.0, 200.0), 70);

        // margin 10% -> +10, ratio 90% -> +0
        assert_eq!(compute_health_score(1000.0, 900.0, 100.0), 60);

        // margin 35% -> +30, ratio 65% -> +10
        assert_eq!(compute_health_score(1000.0, 650.0, 350.0), 90);
    }

    #[test]
    fn test_band_edges_inclusive() {
        // margin exactly 25 takes the high bonus, ratio exactly 40 the lean bonus
        assert_eq!(compute_health_score(1000.0, 400.0, 250.0), 100);

        // margin exactly 15 takes the mid bonus
        let breakdown = HealthScorer::new().breakdown(1000.0, 850.0, 150.0);
        assert_eq!(breakdown.profitability_bonus, 20);
    }

    #[test]
    fn test_score_always_bounded() {
        let cases = [
            (0.0, 0.0, 0.0),
            (0.0, 5000.0, -5000.0),
            (1.0, 0.0, 1.0),
            (100.0, 99.0, 1.0),
            (100.0, 101.0, -1.0),
            (1_000_000.0, 1.0, 999_999.0),
            (50.0, 5000.0, -4950.0),
        ];
        for (revenue, expenses, profit) in cases {
            let score = compute_health_score(revenue, expenses, profit);
            assert!(score <= 100, "score {} out of bounds", score);
        }
    }

    #[test]
    fn test_breakdown_components_sum() {
        let breakdown = HealthScorer::new().breakdown(1000.0, 650.0, 350.0);
        assert_eq!(breakdown.base, 50);
        assert_eq!(breakdown.profitability_bonus, 30);
        assert_eq!(breakdown.efficiency_bonus, 10);
        assert_eq!(breakdown.loss_penalty, 0);
        assert_eq!(breakdown.score, 90);
    }

    #[test]
    fn test_idempotent() {
        let first = compute_health_score(1234.5, 678.9, 555.6);
        let second = compute_health_score(1234.5, 678.9, 555.6);
        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_weights() {
        let weights = ScoreWeights {
            loss_penalty: 50,
            ..ScoreWeights::default()
        };
        let scorer = HealthScorer::with_weights(weights);
        assert_eq!(scorer.score(1000.0, 1200.0, -200.0), 0);
    }
}
