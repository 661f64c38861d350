// Alert Model - structured risk alert codes with derived presentation
// Codes carry their parameters; message text is rendered on demand so
// callers that localize can work from the code alone

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// SEVERITY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    /// Condition threatens the viability of the business
    Critical,

    /// Condition is deteriorating and needs attention
    Warning,

    /// Condition is acceptable but worth monitoring
    Advisory,

    /// Informational only
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "CRITICAL",
            Severity::Warning => "WARNING",
            Severity::Advisory => "ADVISORY",
            Severity::Info => "INFO",
        }
    }
}

// ============================================================================
// ALERT CODES
// ============================================================================

/// Enumerated alert reasons with their parameters.
/// All monetary amounts are in the ledger currency, all `_pct` fields are
/// percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AlertCode {
    /// Net profit is negative for the window
    OperatingLoss { loss: f64 },

    /// No revenue recorded while expenses are accruing
    ZeroRevenueBurn { expenses: f64 },

    /// Expenses consume more of revenue than the configured ceiling
    ExpenseRatioHigh { ratio_pct: f64 },

    /// Margin is non-negative but under the thin-margin bound
    ThinMargin { margin_pct: f64 },

    /// Expenses grew past the spike threshold versus the prior period
    ExpenseSpike { increase_pct: f64 },

    /// Margin fell versus the prior period
    MarginDecline { current_pct: f64, previous_pct: f64 },

    /// Margin is under the risk floor
    MarginBelowFloor { margin_pct: f64 },

    /// Inventory cost is disproportionate to period revenue
    InventoryOverhang { inventory_cost: f64, revenue: f64 },

    /// Default for the current-period checks: nothing fired
    Stable,

    /// Default for the period-comparison checks: nothing fired
    AllHealthy,
}

impl AlertCode {
    pub fn severity(&self) -> Severity {
        match self {
            AlertCode::OperatingLoss { .. } | AlertCode::ZeroRevenueBurn { .. } => {
                Severity::Critical
            }
            AlertCode::ExpenseRatioHigh { .. }
            | AlertCode::ExpenseSpike { .. }
            | AlertCode::MarginDecline { .. }
            | AlertCode::MarginBelowFloor { .. }
            | AlertCode::InventoryOverhang { .. } => Severity::Warning,
            AlertCode::ThinMargin { .. } => Severity::Advisory,
            AlertCode::Stable | AlertCode::AllHealthy => Severity::Info,
        }
    }

    /// Render the English message for this code
    pub fn message(&self) -> String {
        match self {
            AlertCode::OperatingLoss { loss } => format!(
                "CRITICAL: Business is operating at a loss of ${:.2}.",
                loss.abs()
            ),
            AlertCode::ZeroRevenueBurn { expenses } => format!(
                "CRITICAL: No revenue recorded while expenses total ${:.2}.",
                expenses
            ),
            AlertCode::ExpenseRatioHigh { ratio_pct } => format!(
                "WARNING: Operating expenses are consuming {:.1}% of revenue.",
                ratio_pct
            ),
            AlertCode::ThinMargin { margin_pct } => format!(
                "ADVISORY: Profit margin is thin ({:.1}%). Consider cost optimization.",
                margin_pct
            ),
            AlertCode::ExpenseSpike { increase_pct } => format!(
                "WARNING: Expenses increased by {:.1}% compared to the previous period.",
                increase_pct
            ),
            AlertCode::MarginDecline {
                current_pct,
                previous_pct,
            } => format!(
                "WARNING: Profit margin declined to {:.1}% from {:.1}% in the previous period.",
                current_pct, previous_pct
            ),
            AlertCode::MarginBelowFloor { margin_pct } => format!(
                "WARNING: Profit margin of {:.1}% is below the risk floor. Business may be at risk.",
                margin_pct
            ),
            AlertCode::InventoryOverhang {
                inventory_cost,
                revenue,
            } => format!(
                "WARNING: Inventory cost of ${:.2} is high relative to revenue of ${:.2}.",
                inventory_cost, revenue
            ),
            AlertCode::Stable => {
                "STABLE: All financial indicators are within healthy ranges.".to_string()
            }
            AlertCode::AllHealthy => "All metrics look healthy. No active alerts.".to_string(),
        }
    }
}

// ============================================================================
// ALERT
// ============================================================================

/// One fired check: the code plus its derived severity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub code: AlertCode,
    pub severity: Severity,
}

impl Alert {
    pub fn new(code: AlertCode) -> Self {
        let severity = code.severity();
        Alert { code, severity }
    }

    pub fn message(&self) -> String {
        self.code.message()
    }

    pub fn is_default(&self) -> bool {
        matches!(self.code, AlertCode::Stable | AlertCode::AllHealthy)
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// Render a batch of alerts to plain strings (the wire/display form)
pub fn render_messages(alerts: &[Alert]) -> Vec<String> {
    alerts.iter().map(|a| a.message()).collect()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_derived_from_code() {
        assert_eq!(
            Alert::new(AlertCode::OperatingLoss { loss: -200.0 }).severity,
            Severity::Critical
        );
        assert_eq!(
            Alert::new(AlertCode::ThinMargin { margin_pct: 4.0 }).severity,
            Severity::Advisory
        );
        assert_eq!(
            Alert::new(AlertCode::ExpenseSpike { increase_pct: 60.0 }).severity,
            Severity::Warning
        );
        assert_eq!(Alert::new(AlertCode::Stable).severity, Severity::Info);
    }

    #[test]
    fn test_loss_message_includes_magnitude() {
        let alert = Alert::new(AlertCode::OperatingLoss { loss: -250.5 });
        assert!(alert.message().contains("$250.50"));
        assert!(alert.message().starts_with("CRITICAL"));
    }

    #[test]
    fn test_margin_decline_message_includes_both_margins() {
        let alert = Alert::new(AlertCode::MarginDecline {
            current_pct: 20.0,
            previous_pct: 50.0,
        });
        let message = alert.message();
        assert!(message.contains("20.0%"));
        assert!(message.contains("50.0%"));
    }

    #[test]
    fn test_default_codes_are_defaults() {
        assert!(Alert::new(AlertCode::Stable).is_default());
        assert!(Alert::new(AlertCode::AllHealthy).is_default());
        assert!(!Alert::new(AlertCode::ZeroRevenueBurn { expenses: 1.0 }).is_default());
    }

    #[test]
    fn test_render_messages() {
        let alerts = vec![
            Alert::new(AlertCode::OperatingLoss { loss: -10.0 }),
            Alert::new(AlertCode::ThinMargin { margin_pct: 3.0 }),
        ];
        let messages = render_messages(&alerts);
        assert_eq!(messages.len(), 2);
        assert!(messages[0].starts_with("CRITICAL"));
        assert!(messages[1].starts_with("ADVISORY"));
    }

    #[test]
    fn test_alert_serializes_with_code_and_severity() {
        let alert = Alert::new(AlertCode::ExpenseRatioHigh { ratio_pct: 92.0 });
        let json = serde_json::to_string(&alert).unwrap();
        assert!(json.contains("ExpenseRatioHigh"));
        assert!(json.contains("Warning"));
    }
}
