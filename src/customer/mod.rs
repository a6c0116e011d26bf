//! Customers and their per-customer invoice totals.

mod core;
mod customers_page;

pub use core::create_customer_table;
pub use customers_page::get_customers_page;
