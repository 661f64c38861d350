// BizHealth Analytics - Core Library
// Turns manually entered revenue/expense/inventory records into summary
// metrics, a bounded 0-100 health score, and prioritized risk alerts.
// Pure evaluation: no I/O, no shared state, safe to call concurrently.

pub mod records;
pub mod quality;
pub mod metrics;
pub mod scoring;
pub mod alerts;
pub mod risk;
pub mod report;

// Re-export commonly used types
pub use records::{load_csv, BusinessRecord};
pub use quality::{
    BatchSummary, QualityIssue, RecordQualityReport, RecordValidator, ValidationResult,
};
pub use metrics::{
    expense_ratio, monthly_figures, profit_margin, trend_series, DerivedMetrics, MetricsSummary,
    PeriodFigures, TrendPoint,
};
pub use scoring::{compute_health_score, HealthScorer, ScoreBreakdown, ScoreWeights};
pub use alerts::{render_messages, Alert, AlertCode, Severity};
pub use risk::{
    generate_alerts, generate_period_risk_alerts, RiskEvaluator, RiskThresholds,
};
pub use report::{dashboard_summary, evaluate, DashboardSummary, HealthPayload, HealthReport};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
