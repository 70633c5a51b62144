use rusqlite::Connection;

use crate::catalog::{add_shipping_rate, set_product};
use crate::db::{get_connection, init_db, insert_transaction};
use crate::error::Result;
use crate::importer::{map_platform_row, RawRow};
use crate::labels::add_label;
use crate::models::{ProductCost, ShippingRate};
use crate::settings::get_data_dir;

struct DemoOrder {
    order_id: &'static str,
    date: &'static str,
    amount: &'static str,
    customer: &'static str,
    product: &'static str,
    options: &'static str,
    service_fee: &'static str,
    vat: &'static str,
    shipping: &'static str,
}

const ORDERS: &[DemoOrder] = &[
    DemoOrder { order_id: "5001", date: "02/06/2025", amount: "240,00", customer: "Ayşe Demir", product: "Ethiopia Sidamo", options: "500 gr Çekirdek", service_fee: "12,50", vat: "2,40", shipping: "34,90" },
    DemoOrder { order_id: "5002", date: "05/06/2025", amount: "130,00", customer: "Mert Kaya", product: "House Blend", options: "250 gr Öğütülmüş", service_fee: "6,80", vat: "1,30", shipping: "34,90" },
    DemoOrder { order_id: "5003", date: "14/06/2025", amount: "460,00", customer: "Ayşe Demir", product: "Colombia Supremo", options: "1 kg Çekirdek", service_fee: "23,40", vat: "4,60", shipping: "44,90" },
    DemoOrder { order_id: "5004", date: "26/06/2025", amount: "240,00", customer: "Ayşe Demir", product: "Ethiopia Sidamo", options: "500 gr Çekirdek", service_fee: "12,50", vat: "2,40", shipping: "34,90" },
    DemoOrder { order_id: "5005", date: "03/07/2025", amount: "130,00", customer: "Mert Kaya", product: "House Blend", options: "250 gr Öğütülmüş", service_fee: "6,80", vat: "1,30", shipping: "34,90" },
];

const PRODUCTS: &[(&str, f64, f64)] = &[
    ("Ethiopia Sidamo 500 gr Çekirdek", 520.0, 0.5),
    ("House Blend 250 gr Öğütülmüş", 430.0, 0.25),
    ("Colombia Supremo 1 kg Çekirdek", 475.0, 1.0),
];

const SHIPPING_BANDS: &[(f64, f64, f64)] = &[
    (1.0, 2.0, 34.90),
    (3.0, 5.0, 44.90),
    (6.0, 10.0, 64.90),
    (11.0, 30.0, 109.90),
];

fn seed(conn: &Connection) -> Result<usize> {
    for (min, max, price) in SHIPPING_BANDS {
        add_shipping_rate(
            conn,
            &ShippingRate { min_weight: *min, max_weight: *max, price: *price },
        )?;
    }

    for (key, price, weight) in PRODUCTS {
        set_product(
            conn,
            &ProductCost {
                key: key.to_string(),
                wholesale_price_per_kg: *price,
                weight: *weight,
                stock: None,
            },
        )?;
    }

    add_label(conn, "Sidamo Kraft", "designs/sidamo.png", "sidamo")?;
    add_label(conn, "House Classic", "designs/house.png", "house")?;

    let timestamp = chrono::Utc::now().timestamp_millis();
    let mut inserted = 0;
    for (i, order) in ORDERS.iter().enumerate() {
        let mut row = RawRow::new();
        row.push("Sipariş No", order.order_id);
        row.push("Sipariş Tarihi", order.date);
        row.push("TL Karşılık", order.amount);
        row.push("Müşteri Adı", order.customer);
        row.push("Ürün Adı", order.product);
        row.push("Seçenekler", order.options);
        row.push("Hizmet Bedeli", order.service_fee);
        row.push("KDV", order.vat);
        row.push("Anlaşmalı Kargo Ücreti", order.shipping);
        for txn in map_platform_row(&row, i, timestamp) {
            insert_transaction(conn, &txn)?;
            inserted += 1;
        }
    }
    Ok(inserted)
}

pub fn run() -> Result<()> {
    let conn = get_connection(&get_data_dir().join("roastdesk.db"))?;
    init_db(&conn)?;

    let existing: i64 =
        conn.query_row("SELECT count(*) FROM transactions", [], |r| r.get(0))?;
    if existing > 0 {
        println!("Database already has data; demo seeding is for a fresh setup.");
        return Ok(());
    }

    let inserted = seed(&conn)?;
    println!("Seeded {inserted} transactions, {} products, {} shipping bands, 2 labels.",
        PRODUCTS.len(), SHIPPING_BANDS.len());
    println!("Try `roastdesk report dashboard` or `roastdesk report procurement`.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_is_consistent() {
        let dir = tempfile::tempdir().unwrap();
        let conn = get_connection(&dir.path().join("test.db")).unwrap();
        init_db(&conn).unwrap();
        let inserted = seed(&conn).unwrap();
        // Every demo order carries a fee and shipping expense.
        assert_eq!(inserted, ORDERS.len() * 3);
        let products = crate::catalog::list_products(&conn).unwrap();
        assert_eq!(products.len(), PRODUCTS.len());
    }
}
