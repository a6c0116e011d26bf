//! Displays customers and their invoice totals as a searchable table.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    endpoints,
    format::{CurrencyFormatter, LocaleConfig},
    html::{
        PAGE_CONTAINER_STYLE, SEARCH_INPUT_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE,
        TABLE_ROW_STYLE, base,
    },
    navigation::NavBar,
};

use super::core::{CustomerTableRow, get_filtered_customers};

/// The state needed for the [get_customers_page] route handler.
#[derive(Debug, Clone)]
pub struct CustomerViewState {
    pub db_connection: Arc<Mutex<Connection>>,
    pub locale: LocaleConfig,
}

impl FromRef<AppState> for CustomerViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            locale: state.locale.clone(),
        }
    }
}

/// The query parameters for the customers page.
#[derive(Debug, Deserialize)]
pub struct CustomersQuery {
    /// The search term to filter customers by.
    pub query: Option<String>,
}

/// A customer row with its money columns formatted for display.
#[derive(Debug, PartialEq)]
struct FormattedCustomerRow {
    name: String,
    email: String,
    image_url: String,
    total_invoices: i64,
    total_pending: String,
    total_paid: String,
}

impl FormattedCustomerRow {
    fn new(row: CustomerTableRow, formatter: &CurrencyFormatter) -> Self {
        Self {
            name: row.name,
            email: row.email,
            image_url: row.image_url,
            total_invoices: row.total_invoices,
            total_pending: formatter.format_cents(row.total_pending_cents),
            total_paid: formatter.format_cents(row.total_paid_cents),
        }
    }
}

/// Render a table of customers matching the search term.
pub async fn get_customers_page(
    State(state): State<CustomerViewState>,
    Query(query_params): Query<CustomersQuery>,
) -> Result<Response, Error> {
    let search_term = query_params.query.unwrap_or_default();
    let formatter = CurrencyFormatter::new(&state.locale)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let customers = get_filtered_customers(&search_term, &connection)
        .inspect_err(|error| tracing::error!("could not get customers: {error}"))?;

    let rows: Vec<FormattedCustomerRow> = customers
        .into_iter()
        .map(|row| FormattedCustomerRow::new(row, &formatter))
        .collect();

    Ok(customers_view(&rows, &search_term).into_response())
}

fn customers_view(customers: &[FormattedCustomerRow], search_term: &str) -> Markup {
    let nav_bar = NavBar::new(endpoints::CUSTOMERS_VIEW).into_html();

    let table_row = |customer: &FormattedCustomerRow| {
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
                            src=(customer.image_url)
                            alt=(format!("{}'s profile picture", customer.name))
                            class="w-7 h-7 rounded-full";
                        (customer.name)
                    }
                }

                td class=(TABLE_CELL_STYLE) { (customer.email) }

                td class="px-6 py-4 text-right" { (customer.total_invoices) }

                td class="px-6 py-4 text-right" { (customer.total_pending) }

                td class="px-6 py-4 text-right" { (customer.total_paid) }
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
                    h1 class="text-xl font-bold" { "Customers" }

                    form method="get" action=(endpoints::CUSTOMERS_VIEW)
                    {
                        label for="query" class="sr-only" { "Search customers" }
                        input
                            type="search"
                            name="query"
                            id="query"
                            placeholder="Search customers..."
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
                                th scope="col" class=(TABLE_CELL_STYLE) { "Name" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Email" }
                                th scope="col" class="px-6 py-3 text-right" { "Total Invoices" }
                                th scope="col" class="px-6 py-3 text-right" { "Total Pending" }
                                th scope="col" class="px-6 py-3 text-right" { "Total Paid" }
                            }
                        }

                        tbody
                        {
                            @for customer in customers {
                                (table_row(customer))
                            }

                            @if customers.is_empty() {
                                tr
                                {
                                    td
                                        colspan="5"
                                        class="px-6 py-4 text-center
                                            text-gray-500 dark:text-gray-400"
                                    {
                                        "No customers found."
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    );

    base("Customers", &content)
}

#[cfg(test)]
mod get_customers_page_tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::{Query, State};
    use rusqlite::Connection;
    use scraper::{Html, Selector};

    use crate::{db::initialize, format::LocaleConfig};

    use super::{CustomerViewState, CustomersQuery, get_customers_page};

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    fn get_test_state(conn: Connection) -> CustomerViewState {
        CustomerViewState {
            db_connection: Arc::new(Mutex::new(conn)),
            locale: LocaleConfig::default(),
        }
    }

    async fn render_page(state: CustomerViewState, query: Option<String>) -> Html {
        let response = get_customers_page(State(state), Query(CustomersQuery { query }))
            .await
            .unwrap();

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = Html::parse_document(&String::from_utf8_lossy(&body));
        assert!(
            html.errors.is_empty(),
            "Got HTML parsing errors: {:?}",
            html.errors
        );
        html
    }

    #[tokio::test]
    async fn displays_customer_with_formatted_totals() {
        let conn = get_test_connection();
        conn.execute(
            "INSERT INTO customer (id, name, email, image_url) VALUES (1, 'Amy Burns', 'amy@burns.com', '/customers/amy-burns.png')",
            (),
        )
        .unwrap();
        conn.execute(
            "INSERT INTO invoice (customer_id, amount_cents, status, date)
            VALUES (1, 123456, 'paid', '2024-06-01')",
            (),
        )
        .unwrap();

        let html = render_page(get_test_state(conn), None).await;

        let cell = Selector::parse("td").unwrap();
        let cells: Vec<String> = html
            .select(&cell)
            .map(|element| element.text().collect::<String>().trim().to_owned())
            .collect();

        assert!(cells.contains(&"amy@burns.com".to_owned()), "{cells:?}");
        assert!(cells.contains(&"$1,234.56".to_owned()), "{cells:?}");
        assert!(cells.contains(&"$0.00".to_owned()), "{cells:?}");
    }

    #[tokio::test]
    async fn search_term_filters_table_and_fills_input() {
        let conn = get_test_connection();
        conn.execute(
            "INSERT INTO customer (id, name, email, image_url) VALUES
                (1, 'Amy Burns', 'amy@burns.com', '/customers/amy-burns.png'),
                (2, 'Lee Robinson', 'lee@robinson.com', '/customers/lee-robinson.png')",
            (),
        )
        .unwrap();

        let html = render_page(get_test_state(conn), Some("amy".to_owned())).await;

        let row_header = Selector::parse("tbody th").unwrap();
        let names: Vec<String> = html
            .select(&row_header)
            .map(|element| element.text().collect::<String>().trim().to_owned())
            .collect();
        assert_eq!(names, ["Amy Burns"]);

        let search_input = Selector::parse("input[name='query']").unwrap();
        let input = html.select(&search_input).next().unwrap();
        assert_eq!(input.value().attr("value"), Some("amy"));
    }

    #[tokio::test]
    async fn empty_table_shows_placeholder_row() {
        let conn = get_test_connection();

        let html = render_page(get_test_state(conn), None).await;

        let cell = Selector::parse("tbody td").unwrap();
        let text: String = html
            .select(&cell)
            .map(|element| element.text().collect::<String>())
            .collect();

        assert!(text.contains("No customers found."));
    }
}
