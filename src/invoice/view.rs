//! The markup for the invoices page.

use maud::{Markup, html};
use time::Date;

use crate::{
    Error, endpoints,
    format::{CurrencyFormatter, format_date_value},
    html::{
        BADGE_PAID_STYLE, BADGE_PENDING_STYLE, PAGE_CONTAINER_STYLE, SEARCH_INPUT_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base,
    },
    navigation::NavBar,
    pagination::pagination_nav,
};

use super::core::{InvoiceStatus, InvoiceTableRow};

/// An invoice row with its money and date columns formatted for display.
#[derive(Debug, PartialEq)]
pub(super) struct InvoiceRowView {
    customer_name: String,
    customer_email: String,
    customer_image_url: String,
    amount: String,
    status: InvoiceStatus,
    date: Date,
    date_display: String,
}

impl InvoiceRowView {
    pub(super) fn new(
        invoice: InvoiceTableRow,
        formatter: &CurrencyFormatter,
    ) -> Result<Self, Error> {
        let date_display = format_date_value(invoice.date)?;

        Ok(Self {
            customer_name: invoice.customer_name,
            customer_email: invoice.customer_email,
            customer_image_url: invoice.customer_image_url,
            amount: formatter.format_cents(invoice.amount_cents),
            status: invoice.status,
            date: invoice.date,
            date_display,
        })
    }
}

fn status_badge(status: InvoiceStatus) -> Markup {
    let style = match status {
        InvoiceStatus::Pending => BADGE_PENDING_STYLE,
        InvoiceStatus::Paid => BADGE_PAID_STYLE,
    };

    html!( span class=(style) { (status) } )
}

fn invoices_url(search_term: &str, page: u64) -> String {
    let params = [
        ("query", search_term.to_owned()),
        ("page", page.to_string()),
    ];

    match serde_urlencoded::to_string(params) {
        Ok(query_string) => format!("{}?{query_string}", endpoints::INVOICES_VIEW),
        Err(error) => {
            tracing::error!("could not encode invoices page URL: {error}");
            endpoints::INVOICES_VIEW.to_owned()
        }
    }
}

/// Render the invoices page: search form, invoice table and the pagination
/// control.
pub(super) fn invoices_view(
    invoices: &[InvoiceRowView],
    search_term: &str,
    current_page: u64,
    total_pages: u64,
) -> Result<Markup, Error> {
    let nav_bar = NavBar::new(endpoints::INVOICES_VIEW).into_html();
    let page_url = |page: u64| invoices_url(search_term, page);
    let pagination = pagination_nav(current_page, total_pages, &page_url)?;

    let table_row = |invoice: &InvoiceRowView| {
        html!(
            tr class=(TABLE_ROW_STYLE)
            {
                th
                    scope="row"
                    class="px-6 py-4 font-medium text-gray-900 whitespace-nowrap dark:text-white"
                {
                    div class="flex items-center gap-3"
                    {
                        img
                            src=(invoice.customer_image_url)
                            alt=(format!("{}'s profile picture", invoice.customer_name))
                            class="w-7 h-7 rounded-full";
                        (invoice.customer_name)
                    }
                }

                td class=(TABLE_CELL_STYLE) { (invoice.customer_email) }

                td class="px-6 py-4 text-right" { (invoice.amount) }

                td class=(TABLE_CELL_STYLE)
                {
                    time datetime=(invoice.date) { (invoice.date_display) }
                }

                td class=(TABLE_CELL_STYLE) { (status_badge(invoice.status)) }
            }
        )
    };

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full lg:max-w-5xl lg:mx-auto"
            {
                header class="flex justify-between flex-wrap items-end gap-4"
                {
                    h1 class="text-xl font-bold" { "Invoices" }

                    form method="get" action=(endpoints::INVOICES_VIEW)
                    {
                        label for="query" class="sr-only" { "Search invoices" }
                        input
                            type="search"
                            name="query"
                            id="query"
                            placeholder="Search invoices..."
                            value=(search_term)
                            class=(SEARCH_INPUT_STYLE);
                    }
                }

                section class="w-full overflow-x-auto dark:bg-gray-800"
                {
                    table class="w-full text-sm text-left rtl:text-right
                        text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Customer" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Email" }
                                th scope="col" class="px-6 py-3 text-right" { "Amount" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Status" }
                            }
                        }

                        tbody
                        {
                            @for invoice in invoices {
                                (table_row(invoice))
                            }

                            @if invoices.is_empty() {
                                tr
                                {
                                    td
                                        colspan="5"
                                        class="px-6 py-4 text-center
                                            text-gray-500 dark:text-gray-400"
                                    {
                                        "No invoices found."
                                    }
                                }
                            }
                        }
                    }
                }

                div class="flex justify-center"
                {
                    (pagination)
                }
            }
        }
    );

    Ok(base("Invoices", &content))
}
