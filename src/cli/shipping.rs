use comfy_table::{Cell, Table};

use crate::catalog::{add_shipping_rate, clear_shipping_rates, list_shipping_rates};
use crate::db::get_connection;
use crate::error::{Result, RoastError};
use crate::fmt::money;
use crate::models::ShippingRate;
use crate::settings::get_data_dir;

pub fn list() -> Result<()> {
    let conn = get_connection(&get_data_dir().join("roastdesk.db"))?;
    let rates = list_shipping_rates(&conn)?;
    if rates.is_empty() {
        println!("No shipping rate bands configured. Add one with `roastdesk shipping add`.");
        return Ok(());
    }
    let mut table = Table::new();
    table.set_header(vec!["Min desi", "Max desi", "Price"]);
    for r in &rates {
        table.add_row(vec![
            Cell::new(format!("{:.0}", r.min_weight)),
            Cell::new(format!("{:.0}", r.max_weight)),
            Cell::new(money(r.price)),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn add(min: f64, max: f64, price: f64) -> Result<()> {
    if max < min {
        return Err(RoastError::Other(format!(
            "band is empty: max {max} is below min {min}"
        )));
    }
    let conn = get_connection(&get_data_dir().join("roastdesk.db"))?;
    // Overlapping bands make range lookup ambiguous; refuse them here so
    // the table stays single-match.
    for existing in list_shipping_rates(&conn)? {
        if min <= existing.max_weight && max >= existing.min_weight {
            return Err(RoastError::Other(format!(
                "band {min}-{max} overlaps existing {}-{}",
                existing.min_weight, existing.max_weight
            )));
        }
    }
    add_shipping_rate(&conn, &ShippingRate { min_weight: min, max_weight: max, price })?;
    println!("Added band {min}-{max} at {}", money(price));
    Ok(())
}

pub fn clear() -> Result<()> {
    let conn = get_connection(&get_data_dir().join("roastdesk.db"))?;
    clear_shipping_rates(&conn)?;
    println!("Cleared all shipping rate bands.");
    Ok(())
}
