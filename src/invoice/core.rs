use std::fmt::Display;

use rusqlite::Connection;
use time::Date;

use crate::Error;

/// The id for an invoice row.
pub type InvoiceId = i64;

/// Whether an invoice has been paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvoiceStatus {
    /// The invoice has been issued but not paid.
    Pending,
    /// The invoice has been paid.
    Paid,
}

impl InvoiceStatus {
    fn from_sql_text(text: &str, column: usize) -> Result<Self, rusqlite::Error> {
        match text {
            "pending" => Ok(InvoiceStatus::Pending),
            "paid" => Ok(InvoiceStatus::Paid),
            _ => Err(rusqlite::Error::FromSqlConversionFailure(
                column,
                rusqlite::types::Type::Text,
                format!("invalid invoice status {text:?}").into(),
            )),
        }
    }
}

impl Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvoiceStatus::Pending => write!(f, "Pending"),
            InvoiceStatus::Paid => write!(f, "Paid"),
        }
    }
}

/// An invoice joined with its customer, as displayed in the invoices table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceTableRow {
    /// The id for the invoice.
    pub id: InvoiceId,
    /// The name of the customer the invoice was issued to.
    pub customer_name: String,
    /// The customer's email address.
    pub customer_email: String,
    /// The URL of the customer's avatar image.
    pub customer_image_url: String,
    /// The invoice amount in cents.
    pub amount_cents: i64,
    /// Whether the invoice has been paid.
    pub status: InvoiceStatus,
    /// The date the invoice was issued.
    pub date: Date,
}

pub fn create_invoice_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS invoice (
            id INTEGER PRIMARY KEY,
            customer_id INTEGER NOT NULL REFERENCES customer(id),
            amount_cents INTEGER NOT NULL,
            status TEXT NOT NULL,
            date TEXT NOT NULL
        )",
        (),
    )?;

    Ok(())
}

// The search term matches against the customer's name and email as well as
// the invoice's amount, date and status. SQLite's LIKE is ASCII
// case-insensitive, which matches the original search behavior.
const SEARCH_FILTER: &str = "customer.name LIKE '%' || ?1 || '%'
    OR customer.email LIKE '%' || ?1 || '%'
    OR CAST(invoice.amount_cents AS TEXT) LIKE '%' || ?1 || '%'
    OR invoice.date LIKE '%' || ?1 || '%'
    OR invoice.status LIKE '%' || ?1 || '%'";

/// Get one page of invoices matching `query`, most recent first.
///
/// `page` is 1-indexed; `page_size` rows are skipped for each page before
/// the first.
///
/// # Errors
/// Returns [Error] if the SQL query fails.
pub fn get_filtered_invoices(
    query: &str,
    page: u64,
    page_size: u64,
    connection: &Connection,
) -> Result<Vec<InvoiceTableRow>, Error> {
    let offset = page.saturating_sub(1) * page_size;

    let mut statement = connection.prepare(&format!(
        "SELECT
            invoice.id,
            customer.name,
            customer.email,
            customer.image_url,
            invoice.amount_cents,
            invoice.status,
            invoice.date
        FROM invoice
        JOIN customer ON invoice.customer_id = customer.id
        WHERE {SEARCH_FILTER}
        ORDER BY invoice.date DESC, invoice.id DESC
        LIMIT ?2 OFFSET ?3"
    ))?;

    let rows = statement
        .query_map((query, page_size as i64, offset as i64), |row| {
            let status_text: String = row.get(5)?;

            Ok(InvoiceTableRow {
                id: row.get(0)?,
                customer_name: row.get(1)?,
                customer_email: row.get(2)?,
                customer_image_url: row.get(3)?,
                amount_cents: row.get(4)?,
                status: InvoiceStatus::from_sql_text(&status_text, 5)?,
                date: row.get(6)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// Count the pages of invoices matching `query`.
///
/// Returns zero when no invoices match; callers that feed the result into
/// the pagination window calculator must clamp it to at least one.
///
/// # Errors
/// Returns [Error] if the SQL query fails.
pub fn count_invoice_pages(
    query: &str,
    page_size: u64,
    connection: &Connection,
) -> Result<u64, Error> {
    let mut statement = connection.prepare(&format!(
        "SELECT COUNT(*)
        FROM invoice
        JOIN customer ON invoice.customer_id = customer.id
        WHERE {SEARCH_FILTER}"
    ))?;

    let row_count: i64 = statement.query_row([query], |row| row.get(0))?;

    Ok((row_count as u64).div_ceil(page_size))
}
