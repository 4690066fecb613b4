#[cfg(test)]
mod tests;

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analytics::{AnalyticsSummary, AnomalyReport};
use crate::models::EngineError;
use crate::validator::ValidationResult;

/// Terminal outcome of one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Success,
    PartialSuccess,
    Failure,
}

/// The immutable output document of one batch run.
///
/// A failure report carries the error message and none of the analysis
/// sections; a completed report carries all three and no error.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub batch_id: String,
    /// Name of the document that was processed, supplied by the caller.
    pub input_file: String,
    pub processed_at: DateTime<Utc>,
    pub processing_time_seconds: f64,
    pub status: ReportStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analytics: Option<AnalyticsSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anomalies: Option<AnomalyReport>,
}

/// Assembles the final report and owns the run's wall-clock measurement,
/// started when the builder is created at pipeline entry.
pub struct ReportBuilder {
    batch_id: String,
    input_file: String,
    started: Instant,
}

impl ReportBuilder {
    pub fn new(batch_id: impl Into<String>, input_file: impl Into<String>) -> Self {
        Self {
            batch_id: batch_id.into(),
            input_file: input_file.into(),
            started: Instant::now(),
        }
    }

    /// Builds the report for a run that completed its analysis. The status
    /// is `partial_success` when validation rejected any records.
    pub fn completed(
        self,
        validation: ValidationResult,
        analytics: AnalyticsSummary,
        anomalies: AnomalyReport,
    ) -> Report {
        let status = if validation.invalid_transactions > 0 {
            ReportStatus::PartialSuccess
        } else {
            ReportStatus::Success
        };

        Report {
            batch_id: self.batch_id,
            input_file: self.input_file,
            processed_at: Utc::now(),
            processing_time_seconds: self.started.elapsed().as_secs_f64(),
            status,
            error: None,
            validation: Some(validation),
            analytics: Some(analytics),
            anomalies: Some(anomalies),
        }
    }

    /// Builds the report for a run that could not produce any analysis.
    pub fn failure(self, error: &EngineError) -> Report {
        Report {
            batch_id: self.batch_id,
            input_file: self.input_file,
            processed_at: Utc::now(),
            processing_time_seconds: self.started.elapsed().as_secs_f64(),
            status: ReportStatus::Failure,
            error: Some(error.to_string()),
            validation: None,
            analytics: None,
            anomalies: None,
        }
    }
}
