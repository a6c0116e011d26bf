use rusqlite::Connection;

use crate::Error;

/// The id for a customer row.
pub type CustomerId = i64;

/// A customer with their invoice totals, as displayed in the customers
/// table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerTableRow {
    /// The id for the customer.
    pub id: CustomerId,
    /// The customer's full name.
    pub name: String,
    /// The customer's email address.
    pub email: String,
    /// The URL of the customer's avatar image.
    pub image_url: String,
    /// How many invoices the customer has.
    pub total_invoices: i64,
    /// The sum of the customer's pending invoices in cents.
    pub total_pending_cents: i64,
    /// The sum of the customer's paid invoices in cents.
    pub total_paid_cents: i64,
}

pub fn create_customer_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS customer (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            image_url TEXT NOT NULL
        )",
        (),
    )?;

    Ok(())
}

/// Get customers whose name or email matches `query`, along with their
/// invoice counts and pending/paid totals, ordered by name.
///
/// An empty `query` matches every customer.
///
/// # Errors
/// Returns [Error] if the SQL query fails.
pub fn get_filtered_customers(
    query: &str,
    connection: &Connection,
) -> Result<Vec<CustomerTableRow>, Error> {
    let mut statement = connection.prepare(
        "SELECT
            customer.id,
            customer.name,
            customer.email,
            customer.image_url,
            COUNT(invoice.id),
            COALESCE(SUM(CASE WHEN invoice.status = 'pending' THEN invoice.amount_cents ELSE 0 END), 0),
            COALESCE(SUM(CASE WHEN invoice.status = 'paid' THEN invoice.amount_cents ELSE 0 END), 0)
        FROM customer
        LEFT JOIN invoice ON invoice.customer_id = customer.id
        WHERE customer.name LIKE '%' || ?1 || '%'
            OR customer.email LIKE '%' || ?1 || '%'
        GROUP BY customer.id, customer.name, customer.email, customer.image_url
        ORDER BY customer.name ASC",
    )?;

    let rows = statement
        .query_map([query], |row| {
            Ok(CustomerTableRow {
                id: row.get(0)?,
                name: row.get(1)?,
                email: row.get(2)?,
                image_url: row.get(3)?,
                total_invoices: row.get(4)?,
                total_pending_cents: row.get(5)?,
                total_paid_cents: row.get(6)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(rows)
}
