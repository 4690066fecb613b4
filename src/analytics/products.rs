use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::analytics::TopProduct;
use crate::models::Transaction;

/// Ranks products by revenue across all valid transactions' line items,
/// truncated to `limit`.
///
/// Ties break by units sold descending, then product id ascending. Name and
/// category are taken from the first line item seen for the product.
pub fn top_products(transactions: &[Transaction], limit: usize) -> Vec<TopProduct> {
    let mut by_product: HashMap<&str, TopProduct> = HashMap::new();

    for transaction in transactions {
        for item in &transaction.line_items {
            let entry = by_product
                .entry(item.product_id.as_str())
                .or_insert_with(|| TopProduct {
                    product_id: item.product_id.clone(),
                    product_name: item.product_name.clone(),
                    category: item.category.clone(),
                    units_sold: 0,
                    revenue: Decimal::ZERO,
                });

            entry.units_sold += item.quantity as u64;
            entry.revenue += item.subtotal;
        }
    }

    let mut ranked: Vec<TopProduct> = by_product.into_values().collect();
    ranked.sort_by(|a, b| {
        b.revenue
            .cmp(&a.revenue)
            .then_with(|| b.units_sold.cmp(&a.units_sold))
            .then_with(|| a.product_id.cmp(&b.product_id))
    });
    ranked.truncate(limit);

    ranked
}
