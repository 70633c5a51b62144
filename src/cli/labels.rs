use comfy_table::{Cell, Table};

use crate::db::{all_transactions, get_connection};
use crate::error::Result;
use crate::labels;
use crate::settings::get_data_dir;

pub fn list() -> Result<()> {
    let conn = get_connection(&get_data_dir().join("roastdesk.db"))?;
    let designs = labels::list_labels(&conn)?;
    if designs.is_empty() {
        println!("No label designs. Add one with `roastdesk labels add`.");
        return Ok(());
    }
    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Keyword", "Image"]);
    for d in &designs {
        table.add_row(vec![
            Cell::new(d.id),
            Cell::new(&d.name),
            Cell::new(&d.match_keyword),
            Cell::new(&d.image_path),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn add(name: &str, keyword: &str, image: &str) -> Result<()> {
    let conn = get_connection(&get_data_dir().join("roastdesk.db"))?;
    labels::add_label(&conn, name, image, keyword)?;
    println!("Added label design: {name}");
    Ok(())
}

pub fn remove(id: i64) -> Result<()> {
    let conn = get_connection(&get_data_dir().join("roastdesk.db"))?;
    if labels::remove_label(&conn, id)? {
        println!("Removed label {id}.");
    } else {
        println!("No label with id {id}.");
    }
    Ok(())
}

pub fn queue() -> Result<()> {
    let conn = get_connection(&get_data_dir().join("roastdesk.db"))?;
    let transactions = all_transactions(&conn)?;
    let designs = labels::list_labels(&conn)?;

    let queue = labels::print_queue(&transactions, &designs);
    if queue.is_empty() {
        println!("Print queue is empty.");
        return Ok(());
    }
    let mut table = Table::new();
    table.set_header(vec!["Transaction", "Customer", "Order", "Design", "Printed"]);
    for entry in &queue {
        let txn = &entry.transaction;
        table.add_row(vec![
            Cell::new(&txn.id),
            Cell::new(&txn.customer),
            Cell::new(&txn.description),
            Cell::new(
                entry
                    .label
                    .as_ref()
                    .map(|l| l.name.as_str())
                    .unwrap_or("(no match)"),
            ),
            Cell::new(if txn.is_printed { "yes" } else { "" }),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn mark_printed(id: &str) -> Result<()> {
    let conn = get_connection(&get_data_dir().join("roastdesk.db"))?;
    if labels::mark_printed(&conn, id)? {
        println!("Marked {id} as printed; it leaves the procurement list.");
    } else {
        println!("No transaction with id {id}.");
    }
    Ok(())
}
