//! Dashboard module
//!
//! Provides an overview page showing summary cards, a monthly revenue chart
//! and the most recent invoices.

mod cards;
mod chart;
mod handlers;
mod revenue;
mod tables;

pub use handlers::get_dashboard_page;
pub use revenue::create_revenue_table;
