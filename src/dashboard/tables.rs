//! The latest-invoices list shown on the dashboard.

use maud::{Markup, html};
use rusqlite::Connection;

use crate::{Error, endpoints, format::CurrencyFormatter, html::link};

/// How many recent invoices the dashboard shows.
const LATEST_INVOICE_COUNT: i64 = 5;

/// A recent invoice with the customer details needed for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct LatestInvoice {
    /// The name of the customer the invoice was issued to.
    pub customer_name: String,
    /// The customer's email address.
    pub customer_email: String,
    /// The URL of the customer's avatar image.
    pub customer_image_url: String,
    /// The invoice amount in cents.
    pub amount_cents: i64,
}

/// Get the five most recent invoices with their customer details.
///
/// # Errors
/// Returns [Error] if the SQL query fails.
pub(super) fn get_latest_invoices(connection: &Connection) -> Result<Vec<LatestInvoice>, Error> {
    let mut statement = connection.prepare(
        "SELECT customer.name, customer.email, customer.image_url, invoice.amount_cents
        FROM invoice
        JOIN customer ON invoice.customer_id = customer.id
        ORDER BY invoice.date DESC, invoice.id DESC
        LIMIT ?1",
    )?;

    let rows = statement
        .query_map([LATEST_INVOICE_COUNT], |row| {
            Ok(LatestInvoice {
                customer_name: row.get(0)?,
                customer_email: row.get(1)?,
                customer_image_url: row.get(2)?,
                amount_cents: row.get(3)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// Render the latest invoices as a list of customer/amount rows.
pub(super) fn latest_invoices_view(
    invoices: &[LatestInvoice],
    formatter: &CurrencyFormatter,
) -> Markup {
    html!(
        section class="w-full mx-auto mb-4"
        {
            div class="flex justify-between items-baseline mb-4"
            {
                h2 class="text-xl font-semibold" { "Latest Invoices" }

                (link(endpoints::INVOICES_VIEW, "View all"))
            }

            ul class="rounded bg-white px-4 divide-y divide-gray-100 dark:bg-gray-800 dark:divide-gray-700"
            {
                @for invoice in invoices {
                    li class="flex items-center justify-between py-4"
                    {
                        div class="flex items-center gap-3"
                        {
                            img
                                src=(invoice.customer_image_url)
                                alt=(format!("{}'s profile picture", invoice.customer_name))
                                class="w-8 h-8 rounded-full";

                            div
                            {
                                p class="text-sm font-semibold" { (invoice.customer_name) }
                                p class="text-sm text-gray-500 dark:text-gray-400"
                                {
                                    (invoice.customer_email)
                                }
                            }
                        }

                        p class="text-sm font-medium tabular-nums"
                        {
                            (formatter.format_cents(invoice.amount_cents))
                        }
                    }
                }

                @if invoices.is_empty() {
                    li class="py-4 text-sm text-gray-500 dark:text-gray-400"
                    {
                        "No invoices yet."
                    }
                }
            }
        }
    )
}
