use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

/// One input file's full set of transactions, processed together.
///
/// A batch is immutable once parsed. `batch_id` and `transactions` are
/// required at the type level, so a document missing either fails to parse
/// and the run is reported as a failure. Everything inside a transaction is
/// lenient instead: bad records are the validator's job, not the parser's.
#[derive(Debug, Clone, Deserialize)]
pub struct Batch {
    /// Identifier of the batch, carried through to the report.
    pub batch_id: String,
    /// Transaction count declared by the producer of the document.
    /// Advisory only; validation totals reflect the actual sequence.
    #[serde(default)]
    pub transaction_count: usize,
    pub transactions: Vec<Transaction>,
}

/// A single raw transaction record from the input document.
///
/// Every field defaults to empty/zero when absent so that a malformed record
/// deserializes and gets rejected with a recorded reason downstream rather
/// than aborting the whole document parse.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Transaction {
    #[serde(default)]
    pub transaction_id: String,
    /// Raw timestamp string as found in the document. Parsed on demand via
    /// [`Transaction::parsed_timestamp`]; an unparseable value is a
    /// per-record concern, never a document parse failure.
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub customer: Customer,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    #[serde(default)]
    pub subtotal: Decimal,
    #[serde(default)]
    pub tax: Decimal,
    /// Shipping charge. Producers of the original document format spell
    /// this `shipping_cost`.
    #[serde(default, alias = "shipping_cost")]
    pub shipping: Decimal,
    #[serde(default)]
    pub total: Decimal,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub status: String,
}

impl Transaction {
    /// Parses the raw timestamp as RFC 3339, normalized to UTC.
    pub fn parsed_timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()
            .map(|parsed| parsed.with_timezone(&Utc))
    }
}

/// A product line within a transaction.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LineItem {
    #[serde(default)]
    pub product_id: String,
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub category: String,
    /// Units purchased. Signed so that a negative value in the document
    /// surfaces as a validation error instead of a parse failure.
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub unit_price: Decimal,
    /// Absolute discount applied to the line, zero when absent.
    #[serde(default)]
    pub discount: Decimal,
    #[serde(default)]
    pub subtotal: Decimal,
}

impl LineItem {
    /// The amount this line is expected to carry: `quantity * unit_price - discount`.
    pub fn expected_subtotal(&self) -> Decimal {
        Decimal::from(self.quantity) * self.unit_price - self.discount
    }
}

/// The purchasing customer. Identity is `customer_id` within one batch.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Customer {
    #[serde(default)]
    pub customer_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub country: String,
}
