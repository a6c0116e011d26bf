//! Dashboard HTTP handler and view rendering.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    endpoints,
    format::{CurrencyFormatter, LocaleConfig},
    html::{PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
};

use super::{
    cards::{CardData, cards_view, get_card_data},
    chart::{generate_y_axis, revenue_chart_view},
    revenue::{Revenue, get_revenue},
    tables::{LatestInvoice, get_latest_invoices, latest_invoices_view},
};

/// The state needed for the [get_dashboard_page] route handler.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for the dashboard queries.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The locale constants used for display formatting.
    pub locale: LocaleConfig,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            locale: state.locale.clone(),
        }
    }
}

/// Holds all the data needed to render the dashboard.
struct DashboardData {
    card_data: CardData,
    revenue: Vec<Revenue>,
    latest_invoices: Vec<LatestInvoice>,
}

/// Display a page with an overview of invoices, customers and revenue.
pub async fn get_dashboard_page(State(state): State<DashboardState>) -> Result<Response, Error> {
    let formatter = CurrencyFormatter::new(&state.locale)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let card_data = get_card_data(&connection)
        .inspect_err(|error| tracing::error!("could not get card data: {error}"))?;
    let revenue = get_revenue(&connection)
        .inspect_err(|error| tracing::error!("could not get revenue: {error}"))?;
    let latest_invoices = get_latest_invoices(&connection)
        .inspect_err(|error| tracing::error!("could not get latest invoices: {error}"))?;

    let data = DashboardData {
        card_data,
        revenue,
        latest_invoices,
    };

    dashboard_view(&data, &formatter).map(IntoResponse::into_response)
}

fn dashboard_view(data: &DashboardData, formatter: &CurrencyFormatter) -> Result<Markup, Error> {
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW).into_html();

    // An empty revenue table has no top bound for the chart's y-axis, so
    // show a placeholder instead.
    let chart = if data.revenue.is_empty() {
        empty_chart_view()
    } else {
        let y_axis = generate_y_axis(&data.revenue)?;
        revenue_chart_view(&data.revenue, &y_axis)
    };

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full lg:max-w-5xl lg:mx-auto"
            {
                h1 class="mb-4 text-xl font-bold" { "Dashboard" }

                (cards_view(&data.card_data, formatter))

                div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
                {
                    (chart)

                    (latest_invoices_view(&data.latest_invoices, formatter))
                }
            }
        }
    );

    Ok(base("Dashboard", &content))
}

fn empty_chart_view() -> Markup {
    html!(
        section class="w-full mx-auto mb-4"
        {
            h2 class="mb-4 text-xl font-semibold" { "Recent Revenue" }

            p class="mt-4 text-gray-400" { "No revenue data available." }
        }
    )
}

#[cfg(test)]
mod get_dashboard_page_tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::State;
    use rusqlite::Connection;
    use scraper::{Html, Selector};

    use crate::{db::initialize, format::LocaleConfig};

    use super::{DashboardState, get_dashboard_page};

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    fn get_test_state(conn: Connection) -> DashboardState {
        DashboardState {
            db_connection: Arc::new(Mutex::new(conn)),
            locale: LocaleConfig::default(),
        }
    }

    async fn render_page(state: DashboardState) -> Html {
        let response = get_dashboard_page(State(state)).await.unwrap();

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

    fn seed_dashboard_data(conn: &Connection) {
        conn.execute(
            "INSERT INTO customer (id, name, email, image_url) VALUES
                (1, 'Amy Burns', 'amy@burns.com', '/customers/amy-burns.png')",
            (),
        )
        .unwrap();
        conn.execute(
            "INSERT INTO invoice (customer_id, amount_cents, status, date) VALUES
                (1, 123456, 'paid', '2024-06-01'),
                (1, 50000, 'pending', '2024-06-02')",
            (),
        )
        .unwrap();
        conn.execute(
            "INSERT INTO revenue (month, revenue) VALUES ('Jan', 2000), ('Feb', 4500)",
            (),
        )
        .unwrap();
    }

    #[tokio::test]
    async fn displays_cards_chart_and_latest_invoices() {
        let conn = get_test_connection();
        seed_dashboard_data(&conn);

        let html = render_page(get_test_state(conn)).await;
        let text = html.root_element().text().collect::<String>();

        // Cards.
        assert!(text.contains("Collected"));
        assert!(text.contains("$1,234.56"));
        assert!(text.contains("Pending"));
        assert!(text.contains("$500.00"));

        // Chart y-axis runs from the rounded-up top bound down to zero.
        assert!(text.contains("$5K"));
        assert!(text.contains("$0K"));
        assert!(text.contains("Feb"));

        // Latest invoices.
        assert!(text.contains("Latest Invoices"));
        assert!(text.contains("amy@burns.com"));
    }

    #[tokio::test]
    async fn empty_database_shows_placeholders() {
        let conn = get_test_connection();

        let html = render_page(get_test_state(conn)).await;
        let text = html.root_element().text().collect::<String>();

        assert!(text.contains("No revenue data available."));
        assert!(text.contains("No invoices yet."));
        assert!(text.contains("$0.00"));
    }

    #[tokio::test]
    async fn card_counts_match_database() {
        let conn = get_test_connection();
        seed_dashboard_data(&conn);

        let html = render_page(get_test_state(conn)).await;

        let card_value = Selector::parse("section p.truncate").unwrap();
        let values: Vec<String> = html
            .select(&card_value)
            .map(|element| element.text().collect::<String>().trim().to_owned())
            .collect();

        assert_eq!(values, ["$1,234.56", "$500.00", "2", "1"]);
    }
}
