// Health Report Assembly
// Combines the score and the alert checks into the structures handed back
// to whatever front end is asking (CLI here, HTTP/JSON elsewhere)

use crate::alerts::{render_messages, Alert};
use crate::metrics::{MetricsSummary, PeriodFigures};
use crate::records::BusinessRecord;
use crate::risk::RiskEvaluator;
use crate::scoring::{HealthScorer, ScoreBreakdown};
use serde::{Deserialize, Serialize};

// ============================================================================
// HEALTH REPORT
// ============================================================================

/// Score plus the structured alert list for one window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub score: u8,
    pub breakdown: ScoreBreakdown,
    pub alerts: Vec<Alert>,
}

impl HealthReport {
    /// Rendered alert messages, in check order
    pub fn messages(&self) -> Vec<String> {
        render_messages(&self.alerts)
    }

    /// The JSON wire shape consumed by dashboard callers
    pub fn payload(&self) -> HealthPayload {
        HealthPayload {
            health_score: self.score,
            alerts: self.messages(),
        }
    }
}

/// Wire form: `{ "healthScore": int, "alerts": [string, ...] }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthPayload {
    #[serde(rename = "healthScore")]
    pub health_score: u8,
    pub alerts: Vec<String>,
}

/// Evaluate one aggregated window with the default weights and thresholds
pub fn evaluate(figures: &PeriodFigures) -> HealthReport {
    let derived = figures.derived();
    let breakdown =
        HealthScorer::new().breakdown(figures.revenue, figures.expenses, derived.profit);
    let alerts = RiskEvaluator::new().evaluate_figures(figures);

    HealthReport {
        score: breakdown.score,
        breakdown,
        alerts,
    }
}

// ============================================================================
// DASHBOARD SUMMARY
// ============================================================================

/// Full summary body: totals block plus health score and rendered alerts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub metrics: MetricsSummary,
    pub health_score: u8,
    pub alerts: Vec<String>,
}

/// Aggregate a record slice and evaluate it in one step
pub fn dashboard_summary(records: &[BusinessRecord]) -> DashboardSummary {
    let figures = PeriodFigures::aggregate(records);
    let report = evaluate(&figures);

    DashboardSummary {
        metrics: MetricsSummary::from_figures(&figures),
        health_score: report.score,
        alerts: report.messages(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
