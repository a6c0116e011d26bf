//! The monthly revenue records displayed in the dashboard chart.

use rusqlite::Connection;

use crate::Error;

/// The revenue recorded for one month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revenue {
    /// A short month label, e.g. "Jan".
    pub month: String,
    /// The month's revenue in whole dollars.
    pub revenue: i64,
}

pub fn create_revenue_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS revenue (
            month TEXT NOT NULL UNIQUE,
            revenue INTEGER NOT NULL
        )",
        (),
    )?;

    Ok(())
}

/// Get all revenue records in insertion order.
///
/// # Errors
/// Returns [Error] if the SQL query fails.
pub fn get_revenue(connection: &Connection) -> Result<Vec<Revenue>, Error> {
    let mut statement = connection.prepare("SELECT month, revenue FROM revenue")?;

    let rows = statement
        .query_map([], |row| {
            Ok(Revenue {
                month: row.get(0)?,
                revenue: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(rows)
}
