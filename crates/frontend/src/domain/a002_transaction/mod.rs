pub mod api;

pub use api::{HttpTransactionService, TransactionService};
