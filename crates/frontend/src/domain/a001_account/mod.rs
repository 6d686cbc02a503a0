pub mod api;

pub use api::{AccountService, HttpAccountService};
