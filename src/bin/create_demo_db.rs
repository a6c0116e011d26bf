use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;

use ledgerboard::initialize_db;

/// A utility for creating a demo database for the Ledgerboard server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

const CUSTOMERS: [(i64, &str, &str); 6] = [
    (1, "Evil Rabbit", "evil@rabbit.com"),
    (2, "Delba de Oliveira", "delba@oliveira.com"),
    (3, "Lee Robinson", "lee@robinson.com"),
    (4, "Michael Novotny", "michael@novotny.com"),
    (5, "Amy Burns", "amy@burns.com"),
    (6, "Balazs Orban", "balazs@orban.com"),
];

const INVOICES: [(i64, i64, &str, &str); 13] = [
    (1, 15795, "pending", "2022-12-06"),
    (2, 20348, "pending", "2022-11-14"),
    (5, 3040, "paid", "2022-10-29"),
    (4, 44800, "paid", "2023-09-10"),
    (6, 34577, "pending", "2023-08-05"),
    (3, 54246, "pending", "2023-07-16"),
    (1, 666, "pending", "2023-06-27"),
    (4, 32545, "paid", "2023-06-09"),
    (5, 1250, "paid", "2023-06-17"),
    (6, 8546, "paid", "2023-06-07"),
    (1, 500, "paid", "2023-08-19"),
    (6, 8945, "paid", "2023-06-03"),
    (3, 1000, "paid", "2022-06-05"),
];

const REVENUE: [(&str, i64); 12] = [
    ("Jan", 2000),
    ("Feb", 1800),
    ("Mar", 2200),
    ("Apr", 2500),
    ("May", 2300),
    ("Jun", 3200),
    ("Jul", 3500),
    ("Aug", 3700),
    ("Sep", 2500),
    ("Oct", 2800),
    ("Nov", 3000),
    ("Dec", 4800),
];

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Inserting demo data...");

    for (id, name, email) in CUSTOMERS {
        let image_url = format!("/customers/{}.png", name.to_lowercase().replace(' ', "-"));
        conn.execute(
            "INSERT INTO customer (id, name, email, image_url) VALUES (?1, ?2, ?3, ?4)",
            (id, name, email, image_url),
        )?;
    }

    for (customer_id, amount_cents, status, date) in INVOICES {
        conn.execute(
            "INSERT INTO invoice (customer_id, amount_cents, status, date)
            VALUES (?1, ?2, ?3, ?4)",
            (customer_id, amount_cents, status, date),
        )?;
    }

    for (month, revenue) in REVENUE {
        conn.execute(
            "INSERT INTO revenue (month, revenue) VALUES (?1, ?2)",
            (month, revenue),
        )?;
    }

    println!("Success!");

    Ok(())
}
