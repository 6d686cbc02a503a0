pub mod aggregate;

pub use aggregate::{TransactionId, TransactionRecord, TransactionType};
