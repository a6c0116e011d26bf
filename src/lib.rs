//! Ledgerboard is a server-rendered admin dashboard for invoices and
//! customers.
//!
//! This library serves HTML pages directly: a dashboard with summary cards,
//! a revenue chart and the latest invoices, plus searchable tables for
//! invoices (paginated) and customers.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::response::{IntoResponse, Response};
use axum_server::Handle;
use tokio::signal;

mod customer;
mod dashboard;
mod db;
mod endpoints;
mod format;
mod html;
mod internal_server_error;
mod invoice;
mod navigation;
mod not_found;
mod pagination;
mod routing;
mod state;

pub use db::initialize as initialize_db;
pub use format::{CurrencyFormatter, LocaleConfig, format_date};
pub use pagination::{PageToken, PaginationConfig, generate_pagination};
pub use routing::build_router;
pub use state::AppState;

use crate::{
    internal_server_error::{InternalServerErrorPage, render_internal_server_error},
    not_found::get_404_not_found_response,
};

/// An async task that waits for either the ctrl+c or terminate signal,
/// whichever comes first, and then signals the server to shut down
/// gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A page number or page count of zero was passed to the pagination
    /// window calculator. Pages are 1-indexed, so callers must clamp their
    /// inputs to at least one.
    #[error("page numbers are 1-indexed, got page {0} of {1}")]
    InvalidPageNumber(u64, u64),

    /// The y-axis label generator was given no revenue records.
    ///
    /// There is no sensible top bound for an empty data set, so callers
    /// should skip chart rendering instead.
    #[error("cannot generate y-axis labels from an empty revenue sequence")]
    EmptyRevenueData,

    /// A date string could not be parsed as a calendar date.
    #[error("could not parse \"{0}\" as a calendar date")]
    UnparseableDate(String),

    /// There was an error rendering a date for display.
    ///
    /// Callers should pass in the original error as a string and the date
    /// string that caused the error.
    #[error("could not format the date \"{1}\": {0}")]
    InvalidDateFormat(String, String),

    /// The currency symbol in the locale config could not be used to build
    /// a number formatter.
    #[error("invalid currency symbol \"{0}\"")]
    InvalidCurrencySymbol(String),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::DatabaseLockError => render_internal_server_error(Default::default()),
            Error::UnparseableDate(date_string) => {
                render_internal_server_error(InternalServerErrorPage {
                    description: "Invalid Date",
                    fix: &format!(
                        "The value \"{date_string}\" could not be read as a date. \
                        Check the data in the invoices table for malformed dates."
                    ),
                })
            }
            // Any errors that are not handled above are not intended to be
            // shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                render_internal_server_error(Default::default())
            }
        }
    }
}
