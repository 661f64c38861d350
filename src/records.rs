// Business Records - manually entered revenue/expense/inventory rows
// One flat record per entry; aggregation and scoring happen downstream

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One manually entered financial record.
/// Value type: never mutated, re-aggregated from scratch on every evaluation.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BusinessRecord {
    #[serde(rename = "Date")]
    pub date: String,

    #[serde(rename = "Revenue")]
    pub revenue: f64,

    #[serde(rename = "Expenses")]
    pub expenses: f64,

    #[serde(rename = "Inventory_Cost")]
    pub inventory_cost: f64,

    /// Free-form grouping label (e.g. "Retail", "Wholesale")
    #[serde(rename = "Category")]
    #[serde(default = "default_category")]
    pub category: String,
}

fn default_category() -> String {
    "General".to_string()
}

impl BusinessRecord {
    pub fn new(date: &str, revenue: f64, expenses: f64, inventory_cost: f64) -> Self {
        BusinessRecord {
            date: date.to_string(),
            revenue,
            expenses,
            inventory_cost,
            category: default_category(),
        }
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = category.to_string();
        self
    }

    /// Parse the record date, accepting YYYY-MM-DD or MM/DD/YYYY
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(&self.date, "%m/%d/%Y"))
            .ok()
    }

    /// Calendar-month bucket key ("YYYY-MM"), None if the date is unparseable
    pub fn month_key(&self) -> Option<String> {
        self.parsed_date().map(|d| d.format("%Y-%m").to_string())
    }
}

/// Load business records from a CSV file.
/// Explicit, caller-invoked: this module performs no work at load time.
pub fn load_csv(csv_path: &Path) -> Result<Vec<BusinessRecord>> {
    let mut rdr = csv::Reader::from_path(csv_path)
        .with_context(|| format!("Failed to open records file: {:?}", csv_path))?;

    let mut records = Vec::new();

    for result in rdr.deserialize() {
        let record: BusinessRecord = result.context("Failed to deserialize record")?;
        records.push(record);
    }

    Ok(records)
}

// ============================================================================
// TESTS
// ============================================================================
