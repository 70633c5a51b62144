//! Label designs and the print queue. A design matches an order when its
//! keyword appears (case- and accent-folded) in the order's description or
//! category; the first stored design wins.

use rusqlite::Connection;

use crate::error::Result;
use crate::locale::fold_turkish;
use crate::models::{LabelDesign, Transaction, TransactionType};

pub fn list_labels(conn: &Connection) -> Result<Vec<LabelDesign>> {
    let mut stmt =
        conn.prepare("SELECT id, name, image_path, match_keyword FROM labels ORDER BY id")?;
    let rows = stmt.query_map([], |row| {
        Ok(LabelDesign {
            id: row.get(0)?,
            name: row.get(1)?,
            image_path: row.get(2)?,
            match_keyword: row.get(3)?,
        })
    })?;
    Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
}

pub fn add_label(conn: &Connection, name: &str, image_path: &str, keyword: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO labels (name, image_path, match_keyword) VALUES (?1, ?2, ?3)",
        rusqlite::params![name, image_path, keyword],
    )?;
    Ok(())
}

pub fn remove_label(conn: &Connection, id: i64) -> Result<bool> {
    Ok(conn.execute("DELETE FROM labels WHERE id = ?1", [id])? > 0)
}

pub fn match_label<'a>(
    labels: &'a [LabelDesign],
    txn: &Transaction,
) -> Option<&'a LabelDesign> {
    let description = fold_turkish(&txn.description);
    let category = fold_turkish(&txn.category);
    labels.iter().find(|l| {
        let keyword = fold_turkish(&l.match_keyword);
        !keyword.is_empty() && (description.contains(&keyword) || category.contains(&keyword))
    })
}

pub struct QueueEntry {
    pub transaction: Transaction,
    pub label: Option<LabelDesign>,
}

/// Income orders paired with their matched label design, printed or not;
/// the caller decides how to render already-printed entries.
pub fn print_queue(transactions: &[Transaction], labels: &[LabelDesign]) -> Vec<QueueEntry> {
    transactions
        .iter()
        .filter(|t| t.txn_type == TransactionType::Income)
        .map(|t| QueueEntry {
            transaction: t.clone(),
            label: match_label(labels, t).cloned(),
        })
        .collect()
}

/// Flip the printed flag on an order's income row. Printed orders drop out
/// of the procurement list.
pub fn mark_printed(conn: &Connection, txn_id: &str) -> Result<bool> {
    Ok(conn.execute(
        "UPDATE transactions SET is_printed = 1 WHERE id = ?1",
        [txn_id],
    )? > 0)
}
