use anyhow::{bail, Result};
use std::env;
use std::path::Path;

use bizhealth::{
    dashboard_summary, load_csv, monthly_figures, RecordValidator, RiskEvaluator,
};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    match (args.get(1).map(String::as_str), args.get(2)) {
        (Some("summary"), Some(path)) => run_summary(Path::new(path)),
        (Some("monthly"), Some(path)) => run_monthly(Path::new(path)),
        (Some("check"), Some(path)) => run_check(Path::new(path)),
        _ => {
            eprintln!("Usage: bizhealth <summary|monthly|check> <records.csv>");
            eprintln!();
            eprintln!("  summary  - all-time metrics, health score, and alerts");
            eprintln!("  monthly  - per-month figures and period-over-period risk alerts");
            eprintln!("  check    - validate record quality before analysis");
            std::process::exit(1);
        }
    }
}

fn run_summary(csv_path: &Path) -> Result<()> {
    println!("📊 BizHealth Summary");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let records = load_csv(csv_path)?;
    println!("✓ Loaded {} records", records.len());

    let summary = dashboard_summary(&records);

    println!("\nMetrics:");
    println!("  Total revenue:    ${:.2}", summary.metrics.total_revenue);
    println!("  Total expenses:   ${:.2}", summary.metrics.total_expenses);
    println!("  Total inventory:  ${:.2}", summary.metrics.total_inventory);
    println!("  Net profit:       ${:.2}", summary.metrics.net_profit);
    println!("  Profit margin:    {:.2}%", summary.metrics.profit_margin);

    println!("\nHealth score: {}/100", summary.health_score);

    println!("\nAlerts:");
    for alert in &summary.alerts {
        println!("  • {}", alert);
    }

    Ok(())
}

fn run_monthly(csv_path: &Path) -> Result<()> {
    println!("📅 BizHealth Monthly Breakdown");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let records = load_csv(csv_path)?;
    let monthly = monthly_figures(&records);

    if monthly.is_empty() {
        bail!("No records with parseable dates in {:?}", csv_path);
    }

    println!("{:<10} {:>12} {:>12} {:>12}", "Month", "Revenue", "Expenses", "Inventory");
    for (month, figures) in &monthly {
        println!(
            "{:<10} {:>12.2} {:>12.2} {:>12.2}",
            month, figures.revenue, figures.expenses, figures.inventory_cost
        );
    }

    if monthly.len() < 2 {
        println!("\n(only one month of data, skipping period comparison)");
        return Ok(());
    }

    let (prev_month, previous) = &monthly[monthly.len() - 2];
    let (last_month, current) = &monthly[monthly.len() - 1];

    println!("\nRisk alerts for {} vs {}:", last_month, prev_month);
    let alerts = RiskEvaluator::new().compare_periods(current, previous);
    for alert in &alerts {
        println!("  [{}] {}", alert.severity.as_str(), alert.message());
    }

    Ok(())
}

fn run_check(csv_path: &Path) -> Result<()> {
    println!("🔍 BizHealth Record Check");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let records = load_csv(csv_path)?;
    let validator = RecordValidator::new();
    let reports = validator.validate_batch(&records);
    let summary = validator.batch_summary(&reports);

    for report in reports.iter().filter(|r| !r.is_clean()) {
        println!("\n{}", report.summary());
        for issue in &report.issues {
            println!(
                "  [{}] {}: {} ({})",
                issue.severity.as_str(),
                issue.field,
                issue.issue,
                issue.recommendation
            );
        }
    }

    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("✓ Records checked:  {}", summary.total_records);
    println!("✓ Clean:            {}", summary.clean_count);
    println!("✓ With issues:      {}", summary.with_issues_count);
    println!("✓ Critical:         {}", summary.critical_count);

    if summary.critical_count > 0 {
        bail!("{} record(s) have critical issues", summary.critical_count);
    }

    Ok(())
}
