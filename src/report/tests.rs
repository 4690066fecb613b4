use super::{ReportBuilder, ReportStatus};

use anyhow::Result;

use crate::analytics::{AnalyticsSummary, AnomalyReport};
use crate::models::EngineError;
use crate::validator::{ValidationError, ValidationResult};

fn clean_validation() -> ValidationResult {
    ValidationResult {
        total_transactions: 2,
        valid_transactions: 2,
        invalid_transactions: 0,
        errors: Vec::new(),
    }
}

#[test]
fn test_clean_validation_reports_success() {
    let report = ReportBuilder::new("batch_1", "input.json").completed(
        clean_validation(),
        AnalyticsSummary::default(),
        AnomalyReport::default(),
    );

    assert_eq!(report.status, ReportStatus::Success);
    assert!(report.error.is_none());
    assert!(report.validation.is_some());
}

#[test]
fn test_rejected_records_report_partial_success() {
    let validation = ValidationResult {
        total_transactions: 2,
        valid_transactions: 1,
        invalid_transactions: 1,
        errors: vec![ValidationError {
            transaction_id: "tx-2".to_string(),
            reason: "No line items in transaction".to_string(),
        }],
    };

    let report = ReportBuilder::new("batch_1", "input.json").completed(
        validation,
        AnalyticsSummary::default(),
        AnomalyReport::default(),
    );

    assert_eq!(report.status, ReportStatus::PartialSuccess);
}

#[test]
fn test_failure_report_carries_no_analysis_sections() -> Result<()> {
    let parse_error = serde_json::from_str::<crate::models::Batch>("{").unwrap_err();
    let report = ReportBuilder::new("unknown", "input.json")
        .failure(&EngineError::Parse(parse_error));

    assert_eq!(report.status, ReportStatus::Failure);
    assert!(report.error.is_some());
    assert!(report.validation.is_none());
    assert!(report.analytics.is_none());
    assert!(report.anomalies.is_none());

    let encoded = serde_json::to_value(&report)?;

    assert_eq!(encoded["status"], "failure");
    assert!(encoded.get("analytics").is_none());

    Ok(())
}

#[test]
fn test_status_serializes_snake_case() -> Result<()> {
    let report = ReportBuilder::new("batch_1", "input.json").completed(
        ValidationResult {
            total_transactions: 1,
            valid_transactions: 0,
            invalid_transactions: 1,
            errors: Vec::new(),
        },
        AnalyticsSummary::default(),
        AnomalyReport::default(),
    );

    let encoded = serde_json::to_value(&report)?;

    assert_eq!(encoded["status"], "partial_success");

    Ok(())
}
