mod aggregator;
mod anomalies;
mod customers;
mod products;
mod summary;

pub use aggregator::aggregate;
pub use anomalies::{AnomalyReport, HighValueTransaction, SuspiciousPattern, detect};
pub use customers::top_customers;
pub use products::top_products;
pub use summary::{Aggregates, AnalyticsSummary, TopCustomer, TopProduct};
