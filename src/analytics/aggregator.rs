use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::analytics::Aggregates;
use crate::models::Transaction;

/// Computes batch-wide summary statistics over the valid transactions.
///
/// The average order value is left at zero for an empty batch rather than
/// dividing by zero, and category revenue is accumulated from line-item
/// subtotals so it reflects merchandise value before tax and shipping.
pub fn aggregate(transactions: &[Transaction]) -> Aggregates {
    let mut aggregates = Aggregates::default();
    let mut customers = HashSet::new();

    for transaction in transactions {
        aggregates.total_revenue += transaction.total;
        aggregates.total_tax += transaction.tax;
        aggregates.total_shipping += transaction.shipping;
        customers.insert(transaction.customer.customer_id.as_str());

        *aggregates
            .payment_methods
            .entry(label(&transaction.payment_method).to_string())
            .or_insert(0) += 1;
        *aggregates
            .status_breakdown
            .entry(label(&transaction.status).to_string())
            .or_insert(0) += 1;

        for item in &transaction.line_items {
            // Quantities are validated positive before aggregation runs.
            aggregates.total_items += item.quantity as u64;
            *aggregates
                .revenue_by_category
                .entry(label(&item.category).to_string())
                .or_insert(Decimal::ZERO) += item.subtotal;
        }
    }

    if !transactions.is_empty() {
        aggregates.average_order_value =
            aggregates.total_revenue / Decimal::from(transactions.len());
    }
    aggregates.unique_customers = customers.len();

    aggregates
}

fn label(value: &str) -> &str {
    if value.is_empty() { "Unknown" } else { value }
}
