use std::io::Write;
use std::path::Path;
use std::process::Command;

use anyhow::{Result, anyhow};
use serde_json::Value;
use tempfile::NamedTempFile;

fn run_engine(path: &Path) -> Result<(Value, bool)> {
    let binary_path = env!("CARGO_BIN_EXE_batch-analytics-engine");

    let output = Command::new(binary_path).arg(path).output()?;
    let report: Value = serde_json::from_slice(&output.stdout)?;

    Ok((report, output.status.success()))
}

#[test]
fn test_cli_produces_a_full_report_for_the_sample_batch() -> Result<()> {
    let sample_path = Path::new("samples").join("sample.json");

    let (report, succeeded) = run_engine(&sample_path)?;

    assert!(succeeded);
    assert_eq!(report["batch_id"], "batch_20260701_120000");
    assert!(
        report["input_file"]
            .as_str()
            .ok_or_else(|| anyhow!("input_file missing"))?
            .ends_with("sample.json")
    );

    // One transaction carries a zero quantity, so the run is partial.
    assert_eq!(report["status"], "partial_success");
    assert_eq!(report["validation"]["total_transactions"], 5);
    assert_eq!(report["validation"]["valid_transactions"], 4);
    assert_eq!(report["validation"]["invalid_transactions"], 1);
    assert_eq!(
        report["validation"]["errors"][0]["reason"],
        "Line item 0: quantity must be positive"
    );

    let analytics = &report["analytics"];
    assert_eq!(analytics["total_revenue"], "1610.38");
    assert_eq!(analytics["average_order_value"], "402.595");
    assert_eq!(analytics["total_items"], 18);
    assert_eq!(analytics["unique_customers"], 3);
    assert_eq!(analytics["revenue_by_category"]["Electronics"], "289.97");
    assert_eq!(analytics["revenue_by_category"]["Wearables"], "999.9");
    assert_eq!(analytics["payment_methods"]["Credit Card"], 2);
    assert_eq!(analytics["status_breakdown"]["completed"], 3);

    assert_eq!(analytics["top_customers"][0]["customer_id"], "CUST-10003");
    assert_eq!(analytics["top_customers"][1]["customer_id"], "CUST-10001");
    assert_eq!(analytics["top_customers"][1]["order_count"], 2);
    assert_eq!(analytics["top_products"][0]["product_id"], "PROD-6006");
    assert_eq!(analytics["top_products"][0]["units_sold"], 10);

    let anomalies = &report["anomalies"];
    assert_eq!(
        anomalies["high_value_transactions"]
            .as_array()
            .ok_or_else(|| anyhow!("high_value_transactions missing"))?
            .len(),
        1
    );
    assert_eq!(
        anomalies["high_value_transactions"][0]["transaction_id"],
        "7f9c2d1a-0005-4a2b-9c3d-5e6f7a8b9c0d"
    );
    assert_eq!(
        anomalies["high_value_transactions"][0]["reason"],
        "Exceeds 95th percentile"
    );
    assert_eq!(
        anomalies["suspicious_patterns"]
            .as_array()
            .ok_or_else(|| anyhow!("suspicious_patterns missing"))?
            .len(),
        0
    );

    // Timing metadata is stamped by the run itself.
    assert!(report["processed_at"].is_string());
    assert!(report["processing_time_seconds"].is_number());

    Ok(())
}

#[test]
fn test_cli_reports_failure_and_exits_nonzero_for_a_malformed_document() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, "{{\"batch_id\": \"broken\"")?;

    let (report, succeeded) = run_engine(file.path())?;

    assert!(!succeeded);
    assert_eq!(report["status"], "failure");
    assert_eq!(report["batch_id"], "unknown");
    assert!(report["error"].is_string());
    assert!(report.get("validation").is_none());
    assert!(report.get("analytics").is_none());

    Ok(())
}

#[test]
fn test_cli_reports_failure_for_a_document_missing_required_top_level_fields() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, "{{\"transactions\": []}}")?;

    let (report, succeeded) = run_engine(file.path())?;

    assert!(!succeeded);
    assert_eq!(report["status"], "failure");

    Ok(())
}
