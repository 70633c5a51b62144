use comfy_table::{Cell, Table};

use crate::catalog::{list_products, search_products, set_product};
use crate::db::get_connection;
use crate::error::Result;
use crate::fmt::money;
use crate::models::ProductCost;
use crate::settings::get_data_dir;

fn render(products: &[ProductCost]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Product / Variant", "Pack (kg)", "Wholesale ₺/kg", "Stock"]);
    for p in products {
        table.add_row(vec![
            Cell::new(&p.key),
            Cell::new(format!("{:.2}", p.weight)),
            Cell::new(if p.wholesale_price_per_kg > 0.0 {
                money(p.wholesale_price_per_kg)
            } else {
                "(default)".to_string()
            }),
            Cell::new(p.stock.map(|s| s.to_string()).unwrap_or_default()),
        ]);
    }
    table
}

pub fn list() -> Result<()> {
    let conn = get_connection(&get_data_dir().join("roastdesk.db"))?;
    let products = list_products(&conn)?;
    if products.is_empty() {
        println!("Catalog is empty. It fills itself when you import an order export.");
        return Ok(());
    }
    println!("{}", render(&products));
    Ok(())
}

pub fn set(key: &str, price_per_kg: f64, weight: f64, stock: Option<i64>) -> Result<()> {
    let conn = get_connection(&get_data_dir().join("roastdesk.db"))?;
    set_product(
        &conn,
        &ProductCost {
            key: key.to_string(),
            wholesale_price_per_kg: price_per_kg,
            weight,
            stock,
        },
    )?;
    println!("Saved: {key}");
    Ok(())
}

pub fn search(term: &str) -> Result<()> {
    let conn = get_connection(&get_data_dir().join("roastdesk.db"))?;
    let found = search_products(&conn, term)?;
    if found.is_empty() {
        println!("No catalog entry matches '{term}'.");
    } else {
        println!("{}", render(&found));
    }
    Ok(())
}
