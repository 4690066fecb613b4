
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

use crate::models::Transaction;

/// Relative tolerance applied to every arithmetic consistency check.
const ARITHMETIC_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);
/// Minimum absolute slack, so amounts with an expected value of zero
/// still get a sensible comparison.
const TOLERANCE_FLOOR: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// A rejected transaction and the first check it failed.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationError {
    pub transaction_id: String,
    pub reason: String,
}

/// Outcome of validating one batch. Built once per run, read-only afterward.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationResult {
    pub total_transactions: usize,
    pub valid_transactions: usize,
    pub invalid_transactions: usize,
    pub errors: Vec<ValidationError>,
}

/// Splits a batch's transactions into the valid set and a validation result.
///
/// Each transaction runs through the checks in order and is classified by
/// the first failure; a bad record never aborts the run. `now` anchors the
/// future-timestamp check to a single processing instant.
pub fn partition(
    transactions: Vec<Transaction>,
    now: DateTime<Utc>,
) -> (Vec<Transaction>, ValidationResult) {
    let mut result = ValidationResult {
        total_transactions: transactions.len(),
        ..ValidationResult::default()
    };
    let mut valid = Vec::with_capacity(transactions.len());

    for transaction in transactions {
        match check(&transaction) {
            Ok(()) => {
                check_timestamp(&transaction, now);
                result.valid_transactions += 1;
                valid.push(transaction);
            }
            Err(reason) => {
                result.invalid_transactions += 1;
                result.errors.push(ValidationError {
                    transaction_id: transaction.transaction_id.clone(),
                    reason,
                });
            }
        }
    }

    (valid, result)
}

/// Structural and arithmetic checks 1-3. Returns the first failure reason.
fn check(transaction: &Transaction) -> Result<(), String> {
    if transaction.transaction_id.is_empty() {
        return Err("Missing required field: transaction_id".to_string());
    }
    if transaction.timestamp.is_empty() {
        return Err("Missing required field: timestamp".to_string());
    }
    if transaction.customer.customer_id.is_empty() {
        return Err("Missing required field: customer.customer_id".to_string());
    }
    if transaction.line_items.is_empty() {
        return Err("No line items in transaction".to_string());
    }

    for (index, item) in transaction.line_items.iter().enumerate() {
        if item.quantity <= 0 {
            return Err(format!("Line item {index}: quantity must be positive"));
        }
        if item.unit_price.is_sign_negative() {
            return Err(format!("Line item {index}: unit_price must not be negative"));
        }
    }

    for (index, item) in transaction.line_items.iter().enumerate() {
        let expected = item.expected_subtotal();
        if !within_tolerance(item.subtotal, expected) {
            return Err(format!(
                "Line item {index}: subtotal {} does not match quantity * unit_price ({expected})",
                item.subtotal
            ));
        }
    }

    let item_sum: Decimal = transaction
        .line_items
        .iter()
        .map(|item| item.subtotal)
        .sum();
    if !within_tolerance(transaction.subtotal, item_sum) {
        return Err(format!(
            "Subtotal {} does not match line item sum ({item_sum})",
            transaction.subtotal
        ));
    }

    let expected_total = transaction.subtotal + transaction.tax + transaction.shipping;
    if !within_tolerance(transaction.total, expected_total) {
        return Err(format!(
            "Total {} does not match subtotal + tax + shipping ({expected_total})",
            transaction.total
        ));
    }

    Ok(())
}

/// Check 4: timestamp sanity is warn-level only and never invalidates.
fn check_timestamp(transaction: &Transaction, now: DateTime<Utc>) {
    match transaction.parsed_timestamp() {
        Some(timestamp) if timestamp > now => {
            warn!(
                "Transaction [{}] is timestamped in the future [{}]",
                transaction.transaction_id, transaction.timestamp
            );
        }
        Some(_) => {}
        None => {
            warn!(
                "Transaction [{}] has an unparseable timestamp [{}]",
                transaction.transaction_id, transaction.timestamp
            );
        }
    }
}

fn within_tolerance(actual: Decimal, expected: Decimal) -> bool {
    let difference = (actual - expected).abs();
    let allowed = (expected.abs() * ARITHMETIC_TOLERANCE).max(TOLERANCE_FLOOR);
    difference <= allowed
}
