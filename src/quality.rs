// Record Quality Engine - caller-side input validation
// The evaluator is total over real numbers but undefined for NaN/infinite
// inputs, and it performs no validation of its own. This engine is the
// guard that runs before records are aggregated and scored.

use crate::alerts::Severity;
use crate::records::BusinessRecord;
use serde::{Deserialize, Serialize};

// ============================================================================
// VALIDATION RESULT
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub passed: bool,
    pub rule_name: String,
    pub field: String,
    pub message: String,
    pub severity: Severity,
}

impl ValidationResult {
    pub fn pass(rule_name: &str, field: &str, message: &str) -> Self {
        ValidationResult {
            passed: true,
            rule_name: rule_name.to_string(),
            field: field.to_string(),
            message: message.to_string(),
            severity: Severity::Info,
        }
    }

    pub fn fail(rule_name: &str, field: &str, message: &str, severity: Severity) -> Self {
        ValidationResult {
            passed: false,
            rule_name: rule_name.to_string(),
            field: field.to_string(),
            message: message.to_string(),
            severity,
        }
    }
}

// ============================================================================
// QUALITY REPORT
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityIssue {
    pub severity: Severity,
    pub field: String,
    pub issue: String,
    pub recommendation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordQualityReport {
    /// Index of the record in the validated batch
    pub record_index: usize,
    pub validations: Vec<ValidationResult>,
    pub issues: Vec<QualityIssue>,
    pub passed_count: usize,
    pub failed_count: usize,
}

impl RecordQualityReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn has_critical_issues(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Critical)
    }

    pub fn summary(&self) -> String {
        format!(
            "Record {}: {} checks passed, {} failed ({} critical)",
            self.record_index,
            self.passed_count,
            self.failed_count,
            self.issues
                .iter()
                .filter(|i| i.severity == Severity::Critical)
                .count()
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total_records: usize,
    pub clean_count: usize,
    pub with_issues_count: usize,
    pub critical_count: usize,
}

// ============================================================================
// RECORD VALIDATOR
// ============================================================================

pub struct RecordValidator {
    /// Categories considered known for entry consistency
    known_categories: Vec<String>,
}

impl RecordValidator {
    pub fn new() -> Self {
        RecordValidator {
            known_categories: vec![
                "General".to_string(),
                "Retail".to_string(),
                "Wholesale".to_string(),
                "Services".to_string(),
                "Online".to_string(),
                "Seasonal".to_string(),
            ],
        }
    }

    pub fn with_categories(categories: Vec<String>) -> Self {
        RecordValidator {
            known_categories: categories,
        }
    }

    /// Validate one record and collect the findings
    pub fn validate(&self, index: usize, record: &BusinessRecord) -> RecordQualityReport {
        let mut validations = Vec::new();
        let mut issues = Vec::new();

        // Rule 1: date parses in an accepted format
        let date_result = self.validate_date(record);
        collect(&mut validations, &mut issues, date_result, "Use YYYY-MM-DD or MM/DD/YYYY");

        // Rules 2-4: amounts are finite
        for (field, value) in [
            ("revenue", record.revenue),
            ("expenses", record.expenses),
            ("inventory_cost", record.inventory_cost),
        ] {
            let finite_result = self.validate_finite(field, value);
            collect(
                &mut validations,
                &mut issues,
                finite_result,
                "Re-enter the amount as a plain number",
            );
        }

        // Rule 5: amounts are non-negative (accepted downstream, but worth flagging)
        let sign_result = self.validate_signs(record);
        collect(
            &mut validations,
            &mut issues,
            sign_result,
            "Check whether the entry was meant as a correction",
        );

        // Rule 6: category is known
        let category_result = self.validate_category(&record.category);
        collect(
            &mut validations,
            &mut issues,
            category_result,
            &format!("Use one of: {}", self.known_categories.join(", ")),
        );

        let passed_count = validations.iter().filter(|v| v.passed).count();
        let failed_count = validations.len() - passed_count;

        RecordQualityReport {
            record_index: index,
            validations,
            issues,
            passed_count,
            failed_count,
        }
    }

    /// Validate a whole batch in entry order
    pub fn validate_batch(&self, records: &[BusinessRecord]) -> Vec<RecordQualityReport> {
        records
            .iter()
            .enumerate()
            .map(|(index, record)| self.validate(index, record))
            .collect()
    }

    pub fn batch_summary(&self, reports: &[RecordQualityReport]) -> BatchSummary {
        let clean_count = reports.iter().filter(|r| r.is_clean()).count();
        BatchSummary {
            total_records: reports.len(),
            clean_count,
            with_issues_count: reports.len() - clean_count,
            critical_count: reports.iter().filter(|r| r.has_critical_issues()).count(),
        }
    }

    // ========================================================================
    // VALIDATION RULES
    // ========================================================================

    fn validate_date(&self, record: &BusinessRecord) -> ValidationResult {
        if record.date.is_empty() {
            return ValidationResult::fail(
                "date_not_empty",
                "date",
                "Date is empty",
                Severity::Critical,
            );
        }

        match record.parsed_date() {
            Some(_) => ValidationResult::pass("date_valid", "date", "Date format valid"),
            None => ValidationResult::fail(
                "date_invalid_format",
                "date",
                &format!("Invalid date format: {}", record.date),
                Severity::Critical,
            ),
        }
    }

    fn validate_finite(&self, field: &str, value: f64) -> ValidationResult {
        if value.is_nan() || value.is_infinite() {
            return ValidationResult::fail(
                "amount_finite",
                field,
                &format!("{} is not a valid number", field),
                Severity::Critical,
            );
        }

        ValidationResult::pass("amount_finite", field, "Amount is a valid number")
    }

    fn validate_signs(&self, record: &BusinessRecord) -> ValidationResult {
        let negative: Vec<&str> = [
            ("revenue", record.revenue),
            ("expenses", record.expenses),
            ("inventory_cost", record.inventory_cost),
        ]
        .iter()
        .filter(|(_, v)| *v < 0.0)
        .map(|(name, _)| *name)
        .collect();

        if negative.is_empty() {
            ValidationResult::pass("amounts_non_negative", "amounts", "All amounts non-negative")
        } else {
            ValidationResult::fail(
                "amounts_non_negative",
                "amounts",
                &format!("Negative amounts: {}", negative.join(", ")),
                Severity::Warning,
            )
        }
    }

    fn validate_category(&self, category: &str) -> ValidationResult {
        if category.is_empty() {
            return ValidationResult::fail(
                "category_not_empty",
                "category",
                "Category is empty",
                Severity::Warning,
            );
        }

        if self.known_categories.iter().any(|c| c == category) {
            ValidationResult::pass("category_known", "category", "Category is known")
        } else {
            ValidationResult::fail(
                "category_known",
                "category",
                &format!("Unknown category: {}", category),
                Severity::Info,
            )
        }
    }
}

impl Default for RecordValidator {
    fn default() -> Self {
        Self::new()
    }
}

fn collect(
    validations: &mut Vec<ValidationResult>,
    issues: &mut Vec<QualityIssue>,
    result: ValidationResult,
    recommendation: &str,
) {
    if !result.passed {
        issues.push(QualityIssue {
            severity: result.severity,
            field: result.field.clone(),
            issue: result.message.clone(),
            recommendation: recommendation.to_string(),
        });
    }
    validations.push(result);
}

// ============================================================================
// TESTS
// ============================================================================
