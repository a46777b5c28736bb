//! Debt account records, ordering strategies, and CSV loading

mod data;
pub mod loader;
mod ordering;

pub use data::Account;
pub use loader::{load_accounts, load_accounts_from_reader};
pub use ordering::{order_accounts, Strategy};
