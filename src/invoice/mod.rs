//! Invoices: the searchable, paginated table and its queries.

mod core;
mod invoices_page;
mod view;

pub use core::create_invoice_table;
pub use invoices_page::get_invoices_page;
