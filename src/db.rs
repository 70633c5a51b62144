use std::path::Path;

use rusqlite::Connection;

use crate::error::Result;
use crate::models::{Source, Transaction, TransactionType};

pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS transactions (
    id TEXT PRIMARY KEY,
    txn_type TEXT NOT NULL,
    category TEXT NOT NULL,
    amount REAL NOT NULL,
    weight REAL NOT NULL DEFAULT 0,
    date TEXT NOT NULL,
    customer TEXT NOT NULL,
    description TEXT NOT NULL,
    order_id TEXT,
    source TEXT NOT NULL,
    is_printed INTEGER NOT NULL DEFAULT 0,
    created_at TEXT DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS product_costs (
    key TEXT PRIMARY KEY,
    wholesale_price_per_kg REAL NOT NULL DEFAULT 0,
    weight REAL NOT NULL DEFAULT 0.25,
    stock INTEGER,
    position INTEGER NOT NULL DEFAULT 0,
    created_at TEXT DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS shipping_rates (
    id INTEGER PRIMARY KEY,
    min_weight REAL NOT NULL,
    max_weight REAL NOT NULL,
    price REAL NOT NULL
);

CREATE TABLE IF NOT EXISTS labels (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    image_path TEXT NOT NULL DEFAULT '',
    match_keyword TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS imports (
    id INTEGER PRIMARY KEY,
    filename TEXT NOT NULL,
    source TEXT NOT NULL,
    import_date TEXT DEFAULT (datetime('now')),
    record_count INTEGER,
    date_range_start TEXT,
    date_range_end TEXT,
    checksum TEXT
);

";

pub fn get_connection(db_path: &Path) -> Result<Connection> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let conn = Connection::open(db_path)?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    Ok(conn)
}

pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

pub fn insert_transaction(conn: &Connection, txn: &Transaction) -> Result<()> {
    conn.execute(
        "INSERT INTO transactions \
         (id, txn_type, category, amount, weight, date, customer, description, order_id, source, is_printed) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        rusqlite::params![
            txn.id,
            txn.txn_type.code(),
            txn.category,
            txn.amount,
            txn.weight,
            txn.date,
            txn.customer,
            txn.description,
            txn.order_id,
            txn.source.code(),
            txn.is_printed as i64,
        ],
    )?;
    Ok(())
}

fn row_to_transaction(row: &rusqlite::Row) -> rusqlite::Result<Transaction> {
    let type_code: String = row.get(1)?;
    let source_code: String = row.get(9)?;
    Ok(Transaction {
        id: row.get(0)?,
        txn_type: TransactionType::from_code(&type_code)
            .unwrap_or(TransactionType::Expense),
        category: row.get(2)?,
        amount: row.get(3)?,
        weight: row.get(4)?,
        date: row.get(5)?,
        customer: row.get(6)?,
        description: row.get(7)?,
        order_id: row.get(8)?,
        source: Source::from_code(&source_code).unwrap_or(Source::Manual),
        is_printed: row.get::<_, i64>(10)? != 0,
    })
}

const TXN_COLS: &str = "id, txn_type, category, amount, weight, date, customer, \
                        description, order_id, source, is_printed";

pub fn all_transactions(conn: &Connection) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {TXN_COLS} FROM transactions ORDER BY date DESC, id"
    ))?;
    let rows = stmt.query_map([], row_to_transaction)?;
    Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
}

pub fn transactions_for_month(conn: &Connection, month: &str) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {TXN_COLS} FROM transactions WHERE date LIKE ?1 ORDER BY date DESC, id"
    ))?;
    let rows = stmt.query_map([format!("{month}%")], row_to_transaction)?;
    Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
}

/// Store-level idempotence for re-imports: an order already recorded for the
/// same source is skipped even though ingestion-timestamped ids differ.
pub fn order_exists(conn: &Connection, source: Source, order_id: &str) -> Result<bool> {
    let mut stmt = conn.prepare_cached(
        "SELECT 1 FROM transactions WHERE source = ?1 AND order_id = ?2",
    )?;
    Ok(stmt.exists(rusqlite::params![source.code(), order_id])?)
}
