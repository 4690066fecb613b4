use std::env;
use std::fs::{File, create_dir_all};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use chrono::{Duration, SecondsFormat, Utc};
use rand::Rng;
use rand::seq::IndexedRandom;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde_json::{Value, json};

const PROBABILITY_DISCOUNT: f64 = 0.15;
const PROBABILITY_WHALE: f64 = 0.01;
const PROBABILITY_INVALID: f64 = 0.02;

const CATALOG: &[(&str, &str, f64)] = &[
    ("Wireless Headphones", "Electronics", 79.99),
    ("USB-C Cable", "Electronics", 12.99),
    ("Laptop Stand", "Office", 45.00),
    ("Mechanical Keyboard", "Electronics", 129.99),
    ("Ergonomic Mouse", "Electronics", 59.99),
    ("Notebook Set", "Stationery", 15.99),
    ("Water Bottle", "Home", 24.99),
    ("Desk Lamp", "Office", 39.99),
    ("Phone Case", "Accessories", 19.99),
    ("Backpack", "Bags", 69.99),
    ("Portable Charger", "Electronics", 34.99),
    ("Screen Protector", "Accessories", 9.99),
    ("Coffee Mug", "Home", 12.99),
    ("Desk Organizer", "Office", 27.99),
    ("Fitness Tracker", "Wearables", 99.99),
];

const FIRST_NAMES: &[&str] = &[
    "James", "Mary", "John", "Patricia", "Robert", "Jennifer", "Michael", "Linda", "William",
    "Elizabeth", "David", "Barbara", "Richard", "Susan",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez",
];

const COUNTRIES: &[&str] = &["USA", "Canada", "UK", "Germany", "France", "Australia", "Japan"];

const PAYMENT_METHODS: &[&str] = &["Credit Card", "Debit Card", "PayPal", "Apple Pay", "Google Pay"];

const SHIPPING_METHODS: &[(&str, f64)] = &[
    ("Standard", 5.99),
    ("Express", 12.99),
    ("Next Day", 24.99),
    ("International", 35.99),
];

const STATUSES: &[&str] = &["completed", "completed", "completed", "pending", "cancelled"];

struct GeneratorConfig {
    num_records: usize,
    num_customers: usize,
    output_path: String,
}

impl GeneratorConfig {
    fn from_args() -> Self {
        let args: Vec<String> = env::args().collect();
        let num_records = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(1_000);
        let num_customers = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(200);

        Self {
            num_records,
            num_customers,
            output_path: "samples/generated_batch.json".to_string(),
        }
    }
}

fn main() -> io::Result<()> {
    let config = GeneratorConfig::from_args();

    println!(
        "Generating {} transactions for {} customers in {}...",
        config.num_records, config.num_customers, config.output_path
    );

    if let Some(parent) = Path::new(&config.output_path).parent() {
        create_dir_all(parent)?;
    }

    let mut rng = rand::rng();
    let customers: Vec<Value> = (0..config.num_customers)
        .map(|n| generate_customer(&mut rng, n))
        .collect();

    let transactions: Vec<Value> = (0..config.num_records)
        .map(|n| {
            let mut transaction = generate_transaction(&mut rng, &customers, n);
            if rng.random_bool(PROBABILITY_INVALID) {
                corrupt_transaction(&mut rng, &mut transaction);
            }
            transaction
        })
        .collect();

    let now = Utc::now();
    let batch = json!({
        "batch_id": format!("batch_{}", now.format("%Y%m%d_%H%M%S")),
        "generated_at": now.to_rfc3339_opts(SecondsFormat::Secs, true),
        "transaction_count": config.num_records,
        "transactions": transactions,
    });

    let file = File::create(&config.output_path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &batch).map_err(io::Error::other)?;
    writer.flush()?;

    println!("Generation complete.");

    Ok(())
}

fn generate_customer<R: Rng>(rng: &mut R, index: usize) -> Value {
    let first = FIRST_NAMES.choose(rng).copied().unwrap_or("James");
    let last = LAST_NAMES.choose(rng).copied().unwrap_or("Smith");

    json!({
        "customer_id": format!("CUST-{:05}", 10_000 + index),
        "name": format!("{first} {last}"),
        "email": format!("{}.{}@example.com", first.to_lowercase(), last.to_lowercase()),
        "country": COUNTRIES.choose(rng).copied().unwrap_or("USA"),
    })
}

fn generate_line_item<R: Rng>(rng: &mut R, whale: bool) -> (Value, Decimal) {
    let (name, category, base_price) = CATALOG.choose(rng).copied().unwrap_or(CATALOG[0]);
    let quantity = rng.random_range(1..=5i64);

    let mut price = base_price * rng.random_range(0.8..1.2);
    if whale {
        price *= rng.random_range(10.0..50.0);
    }
    let unit_price = Decimal::from_f64(price).unwrap_or(Decimal::ONE).round_dp(2);

    let discount = if rng.random_bool(PROBABILITY_DISCOUNT) {
        (unit_price * Decimal::from(quantity) * Decimal::new(rng.random_range(5..30), 2))
            .round_dp(2)
    } else {
        Decimal::ZERO
    };

    let subtotal = Decimal::from(quantity) * unit_price - discount;
    let item = json!({
        "product_id": format!("PROD-{}", rng.random_range(1_000..10_000)),
        "product_name": name,
        "category": category,
        "quantity": quantity,
        "unit_price": unit_price,
        "discount": discount,
        "subtotal": subtotal,
    });

    (item, subtotal)
}

fn generate_transaction<R: Rng>(rng: &mut R, customers: &[Value], index: usize) -> Value {
    let whale = rng.random_bool(PROBABILITY_WHALE);
    let num_items = rng.random_range(1..=5);

    let mut line_items = Vec::with_capacity(num_items);
    let mut subtotal = Decimal::ZERO;
    for _ in 0..num_items {
        let (item, item_subtotal) = generate_line_item(rng, whale);
        line_items.push(item);
        subtotal += item_subtotal;
    }

    let tax = (subtotal * Decimal::new(8, 2)).round_dp(2);
    let (shipping_method, shipping_cost) =
        SHIPPING_METHODS.choose(rng).copied().unwrap_or(SHIPPING_METHODS[0]);
    let shipping = Decimal::from_f64(shipping_cost).unwrap_or(Decimal::ZERO);
    let total = subtotal + tax + shipping;

    let timestamp = Utc::now()
        - Duration::days(rng.random_range(0..30))
        - Duration::seconds(rng.random_range(0..86_400));

    json!({
        "transaction_id": format!("tx-{index:08}"),
        "timestamp": timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
        "customer": customers.choose(rng).cloned().unwrap_or_else(|| json!({})),
        "line_items": line_items,
        "subtotal": subtotal,
        "tax": tax,
        "shipping_cost": shipping,
        "total": total,
        "payment_method": PAYMENT_METHODS.choose(rng).copied().unwrap_or("Credit Card"),
        "shipping_method": shipping_method,
        "status": STATUSES.choose(rng).copied().unwrap_or("completed"),
    })
}

/// Damages a record in one of the ways the validator is expected to catch.
fn corrupt_transaction<R: Rng>(rng: &mut R, transaction: &mut Value) {
    match rng.random_range(0..3) {
        0 => {
            transaction["line_items"][0]["quantity"] = json!(0);
        }
        1 => {
            transaction["transaction_id"] = json!("");
        }
        _ => {
            transaction["subtotal"] = json!(999_999.99);
        }
    }
}
