use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::catalog::list_products;
use crate::db::{all_transactions, get_connection};
use crate::error::Result;
use crate::fmt::{kg, money, percent};
use crate::locale::current_month;
use crate::reports;
use crate::settings::{get_data_dir, load_settings};

pub fn dashboard() -> Result<()> {
    let settings = load_settings();
    let conn = get_connection(&get_data_dir().join("roastdesk.db"))?;
    let transactions = all_transactions(&conn)?;
    let catalog = list_products(&conn)?;

    let stats = reports::compute_stats(&transactions, &catalog, &settings);
    println!("Gross income:   {}", money(stats.income).green());
    println!("Est. expenses:  {}", money(stats.expenses).red());
    let net = money(stats.net);
    println!(
        "Net:            {}",
        if stats.net >= 0.0 { net.green() } else { net.red() }
    );
    println!("Shipped:        {}", kg(stats.weight));
    Ok(())
}

pub fn month(month: Option<String>) -> Result<()> {
    let settings = load_settings();
    let conn = get_connection(&get_data_dir().join("roastdesk.db"))?;
    let transactions = all_transactions(&conn)?;
    let month = month.unwrap_or_else(current_month);

    let progress = reports::target_progress(&transactions, &month, &settings);
    println!("Month: {month}");
    println!(
        "Revenue:  {} of {} ({})",
        money(progress.revenue),
        money(progress.revenue_target),
        percent(progress.revenue_pct())
    );
    println!(
        "Volume:   {} of {} ({})",
        kg(progress.kg),
        kg(progress.kg_target),
        percent(progress.kg_pct())
    );
    Ok(())
}

pub fn procurement() -> Result<()> {
    let settings = load_settings();
    let conn = get_connection(&get_data_dir().join("roastdesk.db"))?;
    let transactions = all_transactions(&conn)?;
    let catalog = list_products(&conn)?;

    let list = reports::procurement_list(&transactions, &catalog, &settings);
    if list.is_empty() {
        println!("Nothing pending; all orders are labelled.");
        return Ok(());
    }
    let mut table = Table::new();
    table.set_header(vec!["Product", "Orders", "Weight", "₺/kg", "Cost"]);
    let mut total = 0.0;
    for item in &list {
        table.add_row(vec![
            Cell::new(&item.product),
            Cell::new(item.order_count),
            Cell::new(kg(item.total_weight)),
            Cell::new(money(item.unit_wholesale)),
            Cell::new(money(item.total_cost)),
        ]);
        total += item.total_cost;
    }
    println!("{table}");
    println!("Total purchase: {}", money(total).bold());
    Ok(())
}

pub fn reorders() -> Result<()> {
    let conn = get_connection(&get_data_dir().join("roastdesk.db"))?;
    let transactions = all_transactions(&conn)?;

    let predictions = reports::reorder_predictions(&transactions, &crate::locale::today());
    if predictions.is_empty() {
        println!("No repeat customers yet.");
        return Ok(());
    }
    let mut table = Table::new();
    table.set_header(vec!["Customer", "Avg gap (days)", "Next order", "Days left"]);
    for p in &predictions {
        let days = if p.days_left < 0 {
            format!("{} (overdue)", p.days_left)
        } else {
            p.days_left.to_string()
        };
        table.add_row(vec![
            Cell::new(&p.customer),
            Cell::new(p.avg_gap_days),
            Cell::new(&p.next_order),
            Cell::new(days),
        ]);
    }
    println!("{table}");
    Ok(())
}
