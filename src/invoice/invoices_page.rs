//! Defines the route handler for the page that displays invoices as a
//! searchable, paginated table.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    format::{CurrencyFormatter, LocaleConfig},
    pagination::PaginationConfig,
};

use super::{
    core::{count_invoice_pages, get_filtered_invoices},
    view::{InvoiceRowView, invoices_view},
};

/// The state needed for the [get_invoices_page] route handler.
#[derive(Debug, Clone)]
pub struct InvoiceViewState {
    pub db_connection: Arc<Mutex<Connection>>,
    pub pagination_config: PaginationConfig,
    pub locale: LocaleConfig,
}

impl FromRef<AppState> for InvoiceViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            pagination_config: state.pagination_config.clone(),
            locale: state.locale.clone(),
        }
    }
}

/// The query parameters for the invoices page.
#[derive(Debug, Deserialize)]
pub struct InvoicesQuery {
    /// The search term to filter invoices by.
    pub query: Option<String>,
    /// The 1-indexed page number to display.
    pub page: Option<u64>,
}

/// Render one page of invoices matching the search term.
///
/// The requested page number is clamped to the available range, so stale
/// links (e.g. a bookmarked page ten of a search that now has two pages)
/// render the closest valid page instead of an empty table.
pub async fn get_invoices_page(
    State(state): State<InvoiceViewState>,
    Query(query_params): Query<InvoicesQuery>,
) -> Result<Response, Error> {
    let search_term = query_params.query.unwrap_or_default();
    let formatter = CurrencyFormatter::new(&state.locale)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let page_size = state.pagination_config.page_size;
    let total_pages = count_invoice_pages(&search_term, page_size, &connection)
        .inspect_err(|error| tracing::error!("could not count invoice pages: {error}"))?
        // A search with no matches still renders as one (empty) page.
        .max(1);

    let requested_page = query_params
        .page
        .unwrap_or(state.pagination_config.default_page);
    let current_page = requested_page.clamp(1, total_pages);

    let invoices = get_filtered_invoices(&search_term, current_page, page_size, &connection)
        .inspect_err(|error| tracing::error!("could not get invoices: {error}"))?;

    let mut rows = Vec::with_capacity(invoices.len());
    for invoice in invoices {
        rows.push(InvoiceRowView::new(invoice, &formatter)?);
    }

    invoices_view(&rows, &search_term, current_page, total_pages)
        .map(IntoResponse::into_response)
}
