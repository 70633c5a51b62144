//! Product cost catalog and shipping-rate table.
//!
//! Transaction descriptions carry "Product Name x2"-style text; the catalog
//! is resolved by substring containment, first match wins over the stored
//! ordering. Overlapping keys are the operator's responsibility.

use rusqlite::Connection;

use crate::error::Result;
use crate::models::{ProductCost, ShippingRate};

/// Extract the product name from a transaction description: everything up
/// to the quantity marker `" x"`, trimmed.
pub fn product_name(description: &str) -> &str {
    description.split(" x").next().unwrap_or(description).trim()
}

/// Resolve the wholesale per-kg cost for a transaction description.
/// Explicit first-match-wins scan over the ordered catalog; unknown
/// products fall back to the configured default.
pub fn resolve_unit_cost(catalog: &[ProductCost], description: &str, default: f64) -> f64 {
    let name = product_name(description);
    catalog
        .iter()
        .find(|pc| pc.key.contains(name))
        .map(|pc| {
            if pc.wholesale_price_per_kg > 0.0 {
                pc.wholesale_price_per_kg
            } else {
                default
            }
        })
        .unwrap_or(default)
}

// ---------------------------------------------------------------------------
// product_costs table
// ---------------------------------------------------------------------------

pub fn list_products(conn: &Connection) -> Result<Vec<ProductCost>> {
    let mut stmt = conn.prepare(
        "SELECT key, wholesale_price_per_kg, weight, stock FROM product_costs \
         ORDER BY position, key",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(ProductCost {
            key: row.get(0)?,
            wholesale_price_per_kg: row.get(1)?,
            weight: row.get(2)?,
            stock: row.get(3)?,
        })
    })?;
    Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
}

pub fn set_product(conn: &Connection, product: &ProductCost) -> Result<()> {
    let position: i64 = conn.query_row(
        "SELECT COALESCE(MAX(position), 0) + 1 FROM product_costs",
        [],
        |r| r.get(0),
    )?;
    conn.execute(
        "INSERT INTO product_costs (key, wholesale_price_per_kg, weight, stock, position) \
         VALUES (?1, ?2, ?3, ?4, ?5) \
         ON CONFLICT(key) DO UPDATE SET \
           wholesale_price_per_kg = excluded.wholesale_price_per_kg, \
           weight = excluded.weight, \
           stock = excluded.stock",
        rusqlite::params![
            product.key,
            product.wholesale_price_per_kg,
            product.weight,
            product.stock,
            position,
        ],
    )?;
    Ok(())
}

/// Seed a catalog key discovered during import if it is not present yet.
/// Price stays zero (resolved against the default) until the operator
/// fills in the wholesale rate.
pub fn seed_product_key(conn: &Connection, key: &str, weight: f64) -> Result<()> {
    let position: i64 = conn.query_row(
        "SELECT COALESCE(MAX(position), 0) + 1 FROM product_costs",
        [],
        |r| r.get(0),
    )?;
    conn.execute(
        "INSERT OR IGNORE INTO product_costs (key, wholesale_price_per_kg, weight, position) \
         VALUES (?1, 0, ?2, ?3)",
        rusqlite::params![key, weight, position],
    )?;
    Ok(())
}

pub fn search_products(conn: &Connection, term: &str) -> Result<Vec<ProductCost>> {
    Ok(list_products(conn)?
        .into_iter()
        .filter(|p| {
            crate::locale::fold_turkish(&p.key).contains(&crate::locale::fold_turkish(term))
        })
        .collect())
}

// ---------------------------------------------------------------------------
// shipping_rates table
// ---------------------------------------------------------------------------

pub fn list_shipping_rates(conn: &Connection) -> Result<Vec<ShippingRate>> {
    let mut stmt = conn.prepare(
        "SELECT min_weight, max_weight, price FROM shipping_rates ORDER BY min_weight",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(ShippingRate {
            min_weight: row.get(0)?,
            max_weight: row.get(1)?,
            price: row.get(2)?,
        })
    })?;
    Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
}

pub fn add_shipping_rate(conn: &Connection, rate: &ShippingRate) -> Result<()> {
    conn.execute(
        "INSERT INTO shipping_rates (min_weight, max_weight, price) VALUES (?1, ?2, ?3)",
        rusqlite::params![rate.min_weight, rate.max_weight, rate.price],
    )?;
    Ok(())
}

pub fn clear_shipping_rates(conn: &Connection) -> Result<()> {
    conn.execute("DELETE FROM shipping_rates", [])?;
    Ok(())
}
