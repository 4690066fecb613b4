mod batch;
mod errors;

pub use batch::{Batch, Customer, LineItem, Transaction};
pub use errors::EngineError;
