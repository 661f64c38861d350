// Risk Evaluation Engine
// Fixed-order rule checks over one window or a pair of period windows.
// Stateless: identical inputs always produce identical alert lists, checks
// are never deduplicated or reordered.

use crate::alerts::{Alert, AlertCode};
use crate::metrics::{expense_ratio, profit_margin, PeriodFigures};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// ============================================================================
// RISK THRESHOLDS
// ============================================================================

/// Threshold table for the alert checks. All `_pct` fields are percentages,
/// `inventory_revenue_ratio` is a plain fraction of revenue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskThresholds {
    /// Expense ratio above this fires ExpenseRatioHigh
    pub expense_ratio_alert_pct: f64,

    /// Non-negative margin below this fires ThinMargin
    pub thin_margin_pct: f64,

    /// Period-over-period expense growth above this fires ExpenseSpike
    pub expense_spike_pct: f64,

    /// Margin below this fires MarginBelowFloor in the period comparison
    pub margin_floor_pct: f64,

    /// Inventory cost above this fraction of revenue fires InventoryOverhang
    pub inventory_revenue_ratio: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        RiskThresholds {
            expense_ratio_alert_pct: 85.0,
            thin_margin_pct: 10.0,
            expense_spike_pct: 20.0,
            margin_floor_pct: 10.0,
            inventory_revenue_ratio: 0.5,
        }
    }
}

impl RiskThresholds {
    /// Load threshold overrides from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read thresholds file: {:?}", path.as_ref()))?;

        serde_json::from_str(&content).context("Failed to parse thresholds JSON")
    }
}

// ============================================================================
// RISK EVALUATOR
// ============================================================================

pub struct RiskEvaluator {
    thresholds: RiskThresholds,
}

impl RiskEvaluator {
    pub fn new() -> Self {
        RiskEvaluator {
            thresholds: RiskThresholds::default(),
        }
    }

    pub fn with_thresholds(thresholds: RiskThresholds) -> Self {
        RiskEvaluator { thresholds }
    }

    pub fn thresholds(&self) -> &RiskThresholds {
        &self.thresholds
    }

    /// Current-window checks, evaluated in fixed order.
    ///
    /// The returned list is never empty: when no check fires, exactly one
    /// Stable alert is appended instead.
    pub fn current_alerts(
        &self,
        revenue: f64,
        expenses: f64,
        profit: f64,
        margin: f64,
    ) -> Vec<Alert> {
        let t = &self.thresholds;
        let mut alerts = Vec::new();

        // Check 1: operating at a loss
        if profit < 0.0 {
            alerts.push(Alert::new(AlertCode::OperatingLoss { loss: profit }));
        }

        // Check 2: zero revenue with active burn
        if revenue == 0.0 && expenses > 0.0 {
            alerts.push(Alert::new(AlertCode::ZeroRevenueBurn { expenses }));
        }

        // Check 3: expenses consuming most of revenue
        if revenue > 0.0 {
            let ratio = expense_ratio(revenue, expenses);
            if ratio > t.expense_ratio_alert_pct {
                alerts.push(Alert::new(AlertCode::ExpenseRatioHigh { ratio_pct: ratio }));
            }
        }

        // Check 4: thin margin (lower bound inclusive)
        if margin >= 0.0 && margin < t.thin_margin_pct {
            alerts.push(Alert::new(AlertCode::ThinMargin { margin_pct: margin }));
        }

        if alerts.is_empty() {
            alerts.push(Alert::new(AlertCode::Stable));
        }

        alerts
    }

    /// Current-window checks for an aggregated window
    pub fn evaluate_figures(&self, figures: &PeriodFigures) -> Vec<Alert> {
        let derived = figures.derived();
        self.current_alerts(
            figures.revenue,
            figures.expenses,
            derived.profit,
            derived.margin,
        )
    }

    /// Period-over-period checks, evaluated in fixed order.
    pub fn period_alerts(
        &self,
        current_revenue: f64,
        previous_revenue: f64,
        current_expenses: f64,
        previous_expenses: f64,
        inventory_cost: f64,
    ) -> Vec<Alert> {
        let t = &self.thresholds;
        let mut alerts = Vec::new();

        let current_margin = profit_margin(current_revenue, current_expenses);
        let previous_margin = profit_margin(previous_revenue, previous_expenses);

        // Check 1: expense spike versus the prior period
        if previous_expenses > 0.0 {
            let increase = (current_expenses - previous_expenses) / previous_expenses * 100.0;
            if increase > t.expense_spike_pct {
                alerts.push(Alert::new(AlertCode::ExpenseSpike {
                    increase_pct: increase,
                }));
            }
        }

        // Check 2: margin declined versus the prior period
        if current_margin < previous_margin {
            alerts.push(Alert::new(AlertCode::MarginDecline {
                current_pct: current_margin,
                previous_pct: previous_margin,
            }));
        }

        // Check 3: margin under the risk floor
        if current_margin < t.margin_floor_pct {
            alerts.push(Alert::new(AlertCode::MarginBelowFloor {
                margin_pct: current_margin,
            }));
        }

        // Check 4: inventory cost disproportionate to revenue
        if inventory_cost > current_revenue * t.inventory_revenue_ratio {
            alerts.push(Alert::new(AlertCode::InventoryOverhang {
                inventory_cost,
                revenue: current_revenue,
            }));
        }

        if alerts.is_empty() {
            alerts.push(Alert::new(AlertCode::AllHealthy));
        }

        alerts
    }

    /// Period-over-period checks for two aggregated windows; inventory cost
    /// is taken from the current window
    pub fn compare_periods(&self, current: &PeriodFigures, previous: &PeriodFigures) -> Vec<Alert> {
        self.period_alerts(
            current.revenue,
            previous.revenue,
            current.expenses,
            previous.expenses,
            current.inventory_cost,
        )
    }
}

impl Default for RiskEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// FREE FUNCTIONS (default thresholds)
// ============================================================================

/// Current-window alerts with the default thresholds
pub fn generate_alerts(revenue: f64, expenses: f64, profit: f64, margin: f64) -> Vec<Alert> {
    RiskEvaluator::new().current_alerts(revenue, expenses, profit, margin)
}

/// Period-comparison alerts with the default thresholds
pub fn generate_period_risk_alerts(
    current_revenue: f64,
    previous_revenue: f64,
    current_expenses: f64,
    previous_expenses: f64,
    inventory_cost: f64,
) -> Vec<Alert> {
    RiskEvaluator::new().period_alerts(
        current_revenue,
        previous_revenue,
        current_expenses,
        previous_expenses,
        inventory_cost,
    )
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::Severity;

    fn codes(alerts: &[Alert]) -> Vec<&AlertCode> {
        alerts.iter().map(|a| &a.code).collect()
    }

    #[test]
    fn test_healthy_window_is_stable_only() {
        // margin 60%, ratio 40%: nothing fires
        let alerts = generate_alerts(1000.0, 400.0, 600.0, 60.0);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].code, AlertCode::Stable);
        assert_eq!(alerts[0].severity, Severity::Info);
    }

    #[test]
    fn test_loss_fires_critical() {
        let alerts = generate_alerts(1000.0, 1200.0, -200.0, -20.0);
        assert!(matches!(
            alerts[0].code,
            AlertCode::OperatingLoss { loss } if loss == -200.0
        ));
        assert_eq!(alerts[0].severity, Severity::Critical);
        // loss also implies a high expense ratio here
        assert!(alerts
            .iter()
            .any(|a| matches!(a.code, AlertCode::ExpenseRatioHigh { .. })));
    }

    #[test]
    fn test_zero_revenue_burn() {
        let alerts = generate_alerts(0.0, 100.0, -100.0, 0.0);
        // loss, burn, and thin margin (margin pinned to 0) all fire, in order
        assert!(matches!(alerts[0].code, AlertCode::OperatingLoss { .. }));
        assert!(matches!(
            alerts[1].code,
            AlertCode::ZeroRevenueBurn { expenses } if expenses == 100.0
        ));
        assert!(matches!(alerts[2].code, AlertCode::ThinMargin { .. }));
        assert!(!alerts.iter().any(|a| a.is_default()));
    }

    #[test]
    fn test_expense_ratio_boundary() {
        // exactly 85% does not fire
        let alerts = generate_alerts(1000.0, 850.0, 150.0, 15.0);
        assert!(!alerts
            .iter()
            .any(|a| matches!(a.code, AlertCode::ExpenseRatioHigh { .. })));

        // just above does
        let alerts = generate_alerts(1000.0, 851.0, 149.0, 14.9);
        assert!(alerts
            .iter()
            .any(|a| matches!(a.code, AlertCode::ExpenseRatioHigh { .. })));
    }

    #[test]
    fn test_thin_margin_bounds() {
        // margin 0 is inside the thin band
        let alerts = generate_alerts(1000.0, 1000.0, 0.0, 0.0);
        assert!(alerts
            .iter()
            .any(|a| matches!(a.code, AlertCode::ThinMargin { .. })));

        // margin exactly 10 is not
        let alerts = generate_alerts(1000.0, 900.0, 100.0, 10.0);
        assert!(!alerts
            .iter()
            .any(|a| matches!(a.code, AlertCode::ThinMargin { .. })));

        // negative margin is the loss check's territory, not thin margin
        let alerts = generate_alerts(1000.0, 1100.0, -100.0, -10.0);
        assert!(!alerts
            .iter()
            .any(|a| matches!(a.code, AlertCode::ThinMargin { .. })));
    }

    #[test]
    fn test_alert_list_never_empty() {
        let cases = [
            (1000.0, 400.0, 600.0, 60.0),
            (0.0, 0.0, 0.0, 0.0),
            (0.0, 100.0, -100.0, 0.0),
            (1000.0, 990.0, 10.0, 1.0),
        ];
        for (revenue, expenses, profit, margin) in cases {
            assert!(!generate_alerts(revenue, expenses, profit, margin).is_empty());
        }
    }

    #[test]
    fn test_stable_never_alongside_other_alerts() {
        let alerts = generate_alerts(1000.0, 990.0, 10.0, 1.0);
        assert!(alerts.len() > 1 || !alerts[0].is_default());
        assert!(!alerts.iter().any(|a| a.code == AlertCode::Stable) || alerts.len() == 1);
    }

    #[test]
    fn test_period_unchanged_healthy() {
        let alerts = generate_period_risk_alerts(100.0, 100.0, 50.0, 50.0, 10.0);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].code, AlertCode::AllHealthy);
    }

    #[test]
    fn test_period_spike_decline_and_inventory_in_order() {
        // expenses 50 -> 80 (+60%), margin 50% -> 20%, inventory 60 > 50
        let alerts = generate_period_risk_alerts(100.0, 100.0, 80.0, 50.0, 60.0);

        assert_eq!(alerts.len(), 3);
        assert!(matches!(
            codes(&alerts)[0],
            AlertCode::ExpenseSpike { increase_pct } if (*increase_pct - 60.0).abs() < 1e-9
        ));
        assert!(matches!(codes(&alerts)[1], AlertCode::MarginDecline { .. }));
        assert!(matches!(
            codes(&alerts)[2],
            AlertCode::InventoryOverhang { .. }
        ));
    }

    #[test]
    fn test_period_spike_needs_prior_expenses() {
        // previous expenses 0: the spike check cannot fire
        let alerts = generate_period_risk_alerts(100.0, 100.0, 80.0, 0.0, 0.0);
        assert!(!alerts
            .iter()
            .any(|a| matches!(a.code, AlertCode::ExpenseSpike { .. })));
    }

    #[test]
    fn test_period_margin_floor() {
        // margin 5% current vs 5% previous: no decline, but below floor
        let alerts = generate_period_risk_alerts(100.0, 100.0, 95.0, 95.0, 0.0);
        assert_eq!(alerts.len(), 1);
        assert!(matches!(
            alerts[0].code,
            AlertCode::MarginBelowFloor { margin_pct } if margin_pct == 5.0
        ));
    }

    #[test]
    fn test_compare_periods_uses_current_inventory() {
        let current = PeriodFigures::new(100.0, 50.0, 60.0);
        let previous = PeriodFigures::new(100.0, 50.0, 0.0);

        let alerts = RiskEvaluator::new().compare_periods(&current, &previous);
        assert!(alerts
            .iter()
            .any(|a| matches!(a.code, AlertCode::InventoryOverhang { .. })));
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = RiskThresholds {
            thin_margin_pct: 15.0,
            ..RiskThresholds::default()
        };
        let evaluator = RiskEvaluator::with_thresholds(thresholds);

        // margin 12% is thin under the stricter bound
        let alerts = evaluator.current_alerts(1000.0, 880.0, 120.0, 12.0);
        assert!(alerts
            .iter()
            .any(|a| matches!(a.code, AlertCode::ThinMargin { .. })));
    }

    #[test]
    fn test_idempotent() {
        let first = generate_period_risk_alerts(100.0, 100.0, 80.0, 50.0, 60.0);
        let second = generate_period_risk_alerts(100.0, 100.0, 80.0, 50.0, 60.0);
        assert_eq!(first, second);
    }
}
