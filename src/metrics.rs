// Aggregated Figures & Derived Metrics
// Folds flat records into period windows; every metric is recomputed
// from scratch on each call, nothing is cached or mutated

use crate::records::BusinessRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// PERIOD FIGURES
// ============================================================================

/// Summed figures for one aggregation window (all-time, one month, ...)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PeriodFigures {
    pub revenue: f64,
    pub expenses: f64,
    pub inventory_cost: f64,
}

impl PeriodFigures {
    pub fn new(revenue: f64, expenses: f64, inventory_cost: f64) -> Self {
        PeriodFigures {
            revenue,
            expenses,
            inventory_cost,
        }
    }

    /// Sum any iterator of records into one window
    pub fn aggregate<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a BusinessRecord>,
    {
        let mut figures = PeriodFigures::default();
        for record in records {
            figures.revenue += record.revenue;
            figures.expenses += record.expenses;
            figures.inventory_cost += record.inventory_cost;
        }
        figures
    }

    /// Derive profit, margin, and expense ratio for this window
    pub fn derived(&self) -> DerivedMetrics {
        let profit = self.revenue - self.expenses;
        DerivedMetrics {
            profit,
            margin: profit_margin(self.revenue, self.expenses),
            expense_ratio: expense_ratio(self.revenue, self.expenses),
        }
    }
}

// ============================================================================
// DERIVED METRICS
// ============================================================================

/// Pure function of PeriodFigures.
/// `margin` and `expense_ratio` are percentages, both defined as 0 when
/// revenue is non-positive so no division by zero can occur downstream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    pub profit: f64,
    pub margin: f64,
    pub expense_ratio: f64,
}

/// Profit margin as a percentage; 0 when revenue is non-positive
pub fn profit_margin(revenue: f64, expenses: f64) -> f64 {
    if revenue <= 0.0 {
        return 0.0;
    }
    (revenue - expenses) / revenue * 100.0
}

/// Expenses as a percentage of revenue; 0 when revenue is non-positive
pub fn expense_ratio(revenue: f64, expenses: f64) -> f64 {
    if revenue <= 0.0 {
        return 0.0;
    }
    expenses / revenue * 100.0
}

// ============================================================================
// MONTHLY WINDOWS & TRENDS
// ============================================================================

/// Bucket records per calendar month, ascending month order.
/// Records with unparseable dates are skipped; the quality engine is the
/// place that reports them.
pub fn monthly_figures(records: &[BusinessRecord]) -> Vec<(String, PeriodFigures)> {
    let mut buckets: BTreeMap<String, Vec<&BusinessRecord>> = BTreeMap::new();

    for record in records {
        if let Some(key) = record.month_key() {
            buckets.entry(key).or_default().push(record);
        }
    }

    buckets
        .into_iter()
        .map(|(month, group)| (month, PeriodFigures::aggregate(group)))
        .collect()
}

/// One chart point per record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: String,
    pub revenue: f64,
    pub expenses: f64,
    pub category: String,
}

/// Per-record history sorted by date, oldest first
pub fn trend_series(records: &[BusinessRecord]) -> Vec<TrendPoint> {
    let mut dated: Vec<&BusinessRecord> = records
        .iter()
        .filter(|r| r.parsed_date().is_some())
        .collect();
    dated.sort_by_key(|r| r.parsed_date());

    dated
        .into_iter()
        .map(|r| TrendPoint {
            date: r.date.clone(),
            revenue: r.revenue,
            expenses: r.expenses,
            category: r.category.clone(),
        })
        .collect()
}

// ============================================================================
// METRICS SUMMARY
// ============================================================================

/// High-level totals block, rounded to cents for display/serialization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_revenue: f64,
    pub total_expenses: f64,
    pub total_inventory: f64,
    pub net_profit: f64,
    pub profit_margin: f64,
}

impl MetricsSummary {
    pub fn from_figures(figures: &PeriodFigures) -> Self {
        let derived = figures.derived();
        MetricsSummary {
            total_revenue: round2(figures.revenue),
            total_expenses: round2(figures.expenses),
            total_inventory: round2(figures.inventory_cost),
            net_profit: round2(derived.profit),
            profit_margin: round2(derived.margin),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_records() -> Vec<BusinessRecord> {
        vec![
            BusinessRecord::new("2026-01-05", 1000.0, 400.0, 100.0),
            BusinessRecord::new("2026-01-20", 500.0, 300.0, 50.0),
            BusinessRecord::new("2026-02-02", 800.0, 900.0, 200.0),
        ]
    }

    #[test]
    fn test_aggregate_sums_all_columns() {
        let records = sample_records();
        let figures = PeriodFigures::aggregate(&records);

        assert_eq!(figures.revenue, 2300.0);
        assert_eq!(figures.expenses, 1600.0);
        assert_eq!(figures.inventory_cost, 350.0);
    }

    #[test]
    fn test_aggregate_empty_is_zero() {
        let figures = PeriodFigures::aggregate(&[]);
        assert_eq!(figures, PeriodFigures::default());
    }

    #[test]
    fn test_derived_metrics() {
        let figures = PeriodFigures::new(1000.0, 400.0, 0.0);
        let derived = figures.derived();

        assert_eq!(derived.profit, 600.0);
        assert_eq!(derived.margin, 60.0);
        assert_eq!(derived.expense_ratio, 40.0);
    }

    #[test]
    fn test_margin_zero_revenue_guard() {
        assert_eq!(profit_margin(0.0, 500.0), 0.0);
        assert_eq!(profit_margin(-10.0, 500.0), 0.0);
        assert_eq!(expense_ratio(0.0, 500.0), 0.0);
    }

    #[test]
    fn test_monthly_figures_ordered_ascending() {
        let records = sample_records();
        let monthly = monthly_figures(&records);

        assert_eq!(monthly.len(), 2);
        assert_eq!(monthly[0].0, "2026-01");
        assert_eq!(monthly[0].1.revenue, 1500.0);
        assert_eq!(monthly[1].0, "2026-02");
        assert_eq!(monthly[1].1.expenses, 900.0);
    }

    #[test]
    fn test_monthly_figures_skips_bad_dates() {
        let mut records = sample_records();
        records.push(BusinessRecord::new("garbage", 9999.0, 0.0, 0.0));

        let monthly = monthly_figures(&records);
        let total: f64 = monthly.iter().map(|(_, f)| f.revenue).sum();
        assert_eq!(total, 2300.0);
    }

    #[test]
    fn test_trend_series_sorted_by_date() {
        let records = vec![
            BusinessRecord::new("2026-02-02", 800.0, 900.0, 0.0),
            BusinessRecord::new("2026-01-05", 1000.0, 400.0, 0.0),
        ];
        let series = trend_series(&records);

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].date, "2026-01-05");
        assert_eq!(series[1].date, "2026-02-02");
    }

    #[test]
    fn test_metrics_summary_rounding() {
        let figures = PeriodFigures::new(1000.555, 400.004, 10.0);
        let summary = MetricsSummary::from_figures(&figures);

        assert_eq!(summary.total_revenue, 1000.56);
        assert_eq!(summary.total_expenses, 400.0);
        assert_eq!(summary.net_profit, 600.55);
    }
}
