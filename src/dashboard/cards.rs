//! The summary cards shown at the top of the dashboard.

use maud::{Markup, html};
use rusqlite::Connection;

use crate::{Error, format::CurrencyFormatter};

/// The aggregate totals displayed in the dashboard's summary cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct CardData {
    /// The total number of invoices.
    pub invoice_count: i64,
    /// The total number of customers.
    pub customer_count: i64,
    /// The sum of all paid invoices in cents.
    pub paid_cents: i64,
    /// The sum of all pending invoices in cents.
    pub pending_cents: i64,
}

/// Get the invoice/customer counts and the paid/pending totals in one query.
///
/// # Errors
/// Returns [Error] if the SQL query fails.
pub(super) fn get_card_data(connection: &Connection) -> Result<CardData, Error> {
    let mut statement = connection.prepare(
        "SELECT
            (SELECT COUNT(*) FROM invoice),
            (SELECT COUNT(*) FROM customer),
            (SELECT COALESCE(SUM(CASE WHEN status = 'paid' THEN amount_cents ELSE 0 END), 0)
                FROM invoice),
            (SELECT COALESCE(SUM(CASE WHEN status = 'pending' THEN amount_cents ELSE 0 END), 0)
                FROM invoice)",
    )?;

    let card_data = statement.query_row([], |row| {
        Ok(CardData {
            invoice_count: row.get(0)?,
            customer_count: row.get(1)?,
            paid_cents: row.get(2)?,
            pending_cents: row.get(3)?,
        })
    })?;

    Ok(card_data)
}

fn card(title: &str, value: &str) -> Markup {
    html!(
        div class="rounded-xl bg-gray-50 p-2 shadow-sm dark:bg-gray-800"
        {
            h3 class="p-4 text-sm font-medium" { (title) }

            p class="truncate rounded-xl bg-white px-4 py-8 text-center text-2xl dark:bg-gray-700"
            {
                (value)
            }
        }
    )
}

/// Render the four summary cards.
pub(super) fn cards_view(card_data: &CardData, formatter: &CurrencyFormatter) -> Markup {
    html!(
        section class="grid w-full gap-4 sm:grid-cols-2 lg:grid-cols-4 mb-4"
        {
            (card("Collected", &formatter.format_cents(card_data.paid_cents)))
            (card("Pending", &formatter.format_cents(card_data.pending_cents)))
            (card("Total Invoices", &card_data.invoice_count.to_string()))
            (card("Total Customers", &card_data.customer_count.to_string()))
        }
    )
}

#[cfg(test)]
mod get_card_data_tests {
    use rusqlite::Connection;

    use crate::db::initialize;

    use super::{CardData, get_card_data};

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    #[test]
    fn returns_zeroes_for_empty_database() {
        let conn = get_test_connection();

        let got = get_card_data(&conn).unwrap();

        assert_eq!(
            got,
            CardData {
                invoice_count: 0,
                customer_count: 0,
                paid_cents: 0,
                pending_cents: 0,
            }
        );
    }

    #[test]
    fn sums_paid_and_pending_separately() {
        let conn = get_test_connection();
        conn.execute(
            "INSERT INTO customer (id, name, email, image_url)
            VALUES (1, 'Amy Burns', 'amy@burns.com', '/customers/amy-burns.png')",
            (),
        )
        .unwrap();
        for (amount, status) in [(1000, "paid"), (2500, "paid"), (400, "pending")] {
            conn.execute(
                "INSERT INTO invoice (customer_id, amount_cents, status, date)
                VALUES (1, ?1, ?2, '2024-06-01')",
                (amount, status),
            )
            .unwrap();
        }

        let got = get_card_data(&conn).unwrap();

        assert_eq!(
            got,
            CardData {
                invoice_count: 3,
                customer_count: 1,
                paid_cents: 3500,
                pending_cents: 400,
            }
        );
    }
}
