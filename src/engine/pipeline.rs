use std::sync::Arc;

use chrono::Utc;
use tokio::spawn;
use tracing::{error, info, warn};

use crate::analytics::{self, AnalyticsSummary};
use crate::models::{Batch, EngineError, Transaction};
use crate::report::{Report, ReportBuilder};
use crate::validator;

/// Knobs for one pipeline run. Immutable; passed in explicitly instead of
/// being read from the environment mid-flight.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    pub top_n_customers: usize,
    pub top_n_products: usize,
    /// Quantile of transaction totals above which a transaction counts as
    /// high-value, in `0.0..=1.0`.
    pub percentile_threshold: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            top_n_customers: 10,
            top_n_products: 10,
            percentile_threshold: 0.95,
        }
    }
}

/// Single-pass batch pipeline: validate, fan the four analytics stages out
/// over the immutable valid set, assemble the report.
pub struct Pipeline {
    config: Config,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Parses and processes a raw input document.
    ///
    /// A document that is not a well-formed batch yields a `failure` report
    /// with the parse error recorded; it is never returned as an `Err` so
    /// the caller always has a report to persist.
    pub async fn process_document(&self, document: &str, input_file: &str) -> Report {
        match serde_json::from_str::<Batch>(document) {
            Ok(batch) => self.process(batch, input_file).await,
            Err(source) => {
                let parse_error = EngineError::Parse(source);
                error!("Input document rejected: {parse_error}");
                ReportBuilder::new("unknown", input_file).failure(&parse_error)
            }
        }
    }

    /// Processes one parsed batch to completion.
    pub async fn process(&self, batch: Batch, input_file: &str) -> Report {
        let builder = ReportBuilder::new(batch.batch_id.clone(), input_file);

        info!(
            "Processing batch [{}] with {} transactions",
            batch.batch_id,
            batch.transactions.len()
        );
        if batch.transaction_count != batch.transactions.len() {
            warn!(
                "Batch [{}] declares {} transactions but carries {}",
                batch.batch_id,
                batch.transaction_count,
                batch.transactions.len()
            );
        }

        let (valid, validation) = validator::partition(batch.transactions, Utc::now());
        info!(
            "Batch [{}] validated: {} valid, {} invalid",
            batch.batch_id, validation.valid_transactions, validation.invalid_transactions
        );

        let valid: Arc<[Transaction]> = Arc::from(valid);
        let config = self.config;

        // The stages only read the shared valid set and each builds its own
        // private accumulator, so they run as independent tasks.
        let transactions = valid.clone();
        let aggregates = spawn(async move { analytics::aggregate(&transactions) });
        let transactions = valid.clone();
        let customers =
            spawn(async move { analytics::top_customers(&transactions, config.top_n_customers) });
        let transactions = valid.clone();
        let products =
            spawn(async move { analytics::top_products(&transactions, config.top_n_products) });
        let transactions = valid;
        let anomalies =
            spawn(async move { analytics::detect(&transactions, config.percentile_threshold) });

        let aggregates = match aggregates.await {
            Ok(aggregates) => aggregates,
            Err(source) => return stage_failure(builder, "aggregator", source),
        };
        let top_customers = match customers.await {
            Ok(top_customers) => top_customers,
            Err(source) => return stage_failure(builder, "customer-analyzer", source),
        };
        let top_products = match products.await {
            Ok(top_products) => top_products,
            Err(source) => return stage_failure(builder, "product-analyzer", source),
        };
        let anomalies = match anomalies.await {
            Ok(anomalies) => anomalies,
            Err(source) => return stage_failure(builder, "anomaly-detector", source),
        };

        let analytics = AnalyticsSummary {
            aggregates,
            top_customers,
            top_products,
        };

        builder.completed(validation, analytics, anomalies)
    }
}

fn stage_failure(
    builder: ReportBuilder,
    stage: &'static str,
    source: tokio::task::JoinError,
) -> Report {
    let stage_error = EngineError::stage_join(stage, source);
    error!("{stage_error}");
    builder.failure(&stage_error)
}
