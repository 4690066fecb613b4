use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

/// Batch-wide scalars and breakdown maps over the valid transactions.
///
/// All amounts are exact `Decimal` sums; the maps are ordered so a report
/// serializes identically regardless of input transaction order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Aggregates {
    pub total_revenue: Decimal,
    pub total_tax: Decimal,
    pub total_shipping: Decimal,
    pub total_items: u64,
    pub average_order_value: Decimal,
    pub unique_customers: usize,
    pub revenue_by_category: BTreeMap<String, Decimal>,
    pub payment_methods: BTreeMap<String, u64>,
    pub status_breakdown: BTreeMap<String, u64>,
}

/// One entry in the customer ranking.
#[derive(Debug, Clone, Serialize)]
pub struct TopCustomer {
    pub customer_id: String,
    pub name: String,
    pub total_spent: Decimal,
    pub order_count: u64,
}

/// One entry in the product ranking.
#[derive(Debug, Clone, Serialize)]
pub struct TopProduct {
    pub product_id: String,
    pub product_name: String,
    pub category: String,
    pub units_sold: u64,
    pub revenue: Decimal,
}

/// The analytics section of the final report.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalyticsSummary {
    #[serde(flatten)]
    pub aggregates: Aggregates,
    pub top_customers: Vec<TopCustomer>,
    pub top_products: Vec<TopProduct>,
}
