use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::analytics::TopCustomer;
use crate::models::Transaction;

/// Ranks customers by total spend, truncated to `limit`.
///
/// Ties break by order count descending, then customer id ascending, so the
/// ranking is identical under any permutation of the input transactions.
/// The displayed name is the first one seen for the customer.
pub fn top_customers(transactions: &[Transaction], limit: usize) -> Vec<TopCustomer> {
    let mut by_customer: HashMap<&str, TopCustomer> = HashMap::new();

    for transaction in transactions {
        let entry = by_customer
            .entry(transaction.customer.customer_id.as_str())
            .or_insert_with(|| TopCustomer {
                customer_id: transaction.customer.customer_id.clone(),
                name: transaction.customer.name.clone(),
                total_spent: Decimal::ZERO,
                order_count: 0,
            });

        entry.total_spent += transaction.total;
        entry.order_count += 1;
    }

    let mut ranked: Vec<TopCustomer> = by_customer.into_values().collect();
    ranked.sort_by(|a, b| {
        b.total_spent
            .cmp(&a.total_spent)
            .then_with(|| b.order_count.cmp(&a.order_count))
            .then_with(|| a.customer_id.cmp(&b.customer_id))
    });
    ranked.truncate(limit);

    ranked
}
