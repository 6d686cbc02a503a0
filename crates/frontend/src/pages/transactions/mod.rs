//! Страница доходов и расходов выбранного счёта

pub mod controller;
pub mod page;
pub mod state;
pub mod view;
pub mod view_model;

#[cfg(test)]
mod tests;

pub use controller::{Collaborators, TransactionsPageController};
pub use page::TransactionsPage;
pub use state::{PageOptions, PageState, SortField};
pub use view::TransactionsView;
pub use view_model::TransactionRow;
