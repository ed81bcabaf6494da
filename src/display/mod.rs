//! Display formatting for terminal output

pub mod balance;
pub mod category;
pub mod transaction;

pub use balance::format_balance;
pub use category::format_category_list;
pub use transaction::{
    category_titles, format_transaction_details, format_transaction_register,
    format_transaction_short,
};
