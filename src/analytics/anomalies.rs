use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::Serialize;

use crate::models::Transaction;

/// Sliding window for the burst rule.
const BURST_WINDOW_MINUTES: i64 = 60;
/// High-value transactions inside one window needed to flag a customer.
const BURST_THRESHOLD: usize = 5;

/// A transaction whose total exceeds the percentile threshold.
#[derive(Debug, Clone, Serialize)]
pub struct HighValueTransaction {
    pub transaction_id: String,
    pub total: Decimal,
    pub reason: String,
}

/// A customer exhibiting repeated high-value purchases in a short span.
#[derive(Debug, Clone, Serialize)]
pub struct SuspiciousPattern {
    pub customer_id: String,
    pub concern: String,
    /// Size of the largest qualifying window.
    pub count: usize,
}

/// The anomaly section of the final report.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnomalyReport {
    pub high_value_transactions: Vec<HighValueTransaction>,
    pub suspicious_patterns: Vec<SuspiciousPattern>,
}

/// Flags statistically high-value transactions and per-customer bursts.
///
/// The threshold is the configured percentile of the batch's totals,
/// computed by linear interpolation over the sorted values. Below two valid
/// transactions the percentile is undefined and detection is skipped.
/// The burst rule reuses the same global threshold: a customer is flagged
/// when five or more of their high-value transactions fall inside any
/// one-hour window. Transactions whose timestamps do not parse take part in
/// high-value flagging but are excluded from window analysis.
pub fn detect(transactions: &[Transaction], percentile: f64) -> AnomalyReport {
    if transactions.len() < 2 {
        return AnomalyReport::default();
    }

    let mut totals: Vec<Decimal> = transactions.iter().map(|tx| tx.total).collect();
    totals.sort_unstable();
    let percentile = percentile.clamp(0.0, 1.0);
    let threshold = percentile_linear(&totals, percentile);
    let reason = format!("Exceeds {:.0}th percentile", percentile * 100.0);

    let mut report = AnomalyReport::default();
    // BTreeMap keeps pattern entries ordered by customer id.
    let mut bursts: BTreeMap<&str, Vec<DateTime<Utc>>> = BTreeMap::new();

    for transaction in transactions {
        if transaction.total > threshold {
            report.high_value_transactions.push(HighValueTransaction {
                transaction_id: transaction.transaction_id.clone(),
                total: transaction.total,
                reason: reason.clone(),
            });

            if let Some(timestamp) = transaction.parsed_timestamp() {
                bursts
                    .entry(transaction.customer.customer_id.as_str())
                    .or_default()
                    .push(timestamp);
            }
        }
    }

    let window = Duration::minutes(BURST_WINDOW_MINUTES);
    for (customer_id, mut timestamps) in bursts {
        timestamps.sort_unstable();

        let peak = largest_window(&timestamps, window);
        if peak >= BURST_THRESHOLD {
            report.suspicious_patterns.push(SuspiciousPattern {
                customer_id: customer_id.to_string(),
                concern: "Multiple high-value purchases within 1 hour".to_string(),
                count: peak,
            });
        }
    }

    report
}

/// Two-pointer scan for the most timestamps inside one window.
fn largest_window(timestamps: &[DateTime<Utc>], window: Duration) -> usize {
    let mut start = 0;
    let mut peak = 0;

    for end in 0..timestamps.len() {
        while timestamps[end] - timestamps[start] > window {
            start += 1;
        }
        peak = peak.max(end - start + 1);
    }

    peak
}

/// Linear-interpolation percentile: rank `q * (n - 1)` over ascending
/// `sorted`, interpolating between the bracketing samples.
fn percentile_linear(sorted: &[Decimal], quantile: f64) -> Decimal {
    let rank = quantile * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;

    if lower == upper {
        return sorted[lower];
    }

    let fraction = Decimal::from_f64(rank - lower as f64).unwrap_or(Decimal::ZERO);

    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}
