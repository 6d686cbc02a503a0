pub mod a001_account;
pub mod a002_transaction;
