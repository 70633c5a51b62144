use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::catalog::list_shipping_rates;
use crate::db::get_connection;
use crate::error::Result;
use crate::fmt::{money, percent};
use crate::pricing::{analyze, CostProfile, PriceAnalysis};
use crate::settings::{get_data_dir, load_settings, Settings};

pub fn build_profile(
    weight: f64,
    unit_cost: Option<f64>,
    margin: Option<f64>,
    commissioned: bool,
    settings: &Settings,
) -> CostProfile {
    CostProfile {
        weight,
        unit_wholesale_cost: unit_cost.unwrap_or(settings.cost_per_kg_default),
        packaging_cost: settings.cost_per_pack,
        commission_rate: if commissioned { settings.commission_rate } else { 0.0 },
        fixed_fee: if commissioned { settings.fixed_fee } else { 0.0 },
        target_margin: margin.unwrap_or(settings.target_margin),
    }
}

pub fn analysis_table(analysis: &PriceAnalysis, offer: f64) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec![Cell::new("Desi"), Cell::new(format!("{:.0}", analysis.desi))]);
    let shipping = if analysis.shipping_resolved {
        money(analysis.shipping_cost)
    } else {
        format!("{} (no rate band)", money(0.0))
    };
    table.add_row(vec![Cell::new("Shipping"), Cell::new(shipping)]);
    table.add_row(vec![Cell::new("Base cost"), Cell::new(money(analysis.base_cost))]);
    table.add_row(vec![Cell::new("Break-even"), Cell::new(money(analysis.break_even))]);
    table.add_row(vec![Cell::new("Target price"), Cell::new(money(analysis.target_price))]);
    table.add_row(vec![
        Cell::new("Suggested price"),
        Cell::new(money(analysis.convincing_price)),
    ]);
    if offer > 0.0 {
        table.add_row(vec![Cell::new("Offer"), Cell::new(money(offer))]);
        table.add_row(vec![Cell::new("Net profit"), Cell::new(money(analysis.net_profit))]);
        table.add_row(vec![
            Cell::new("Margin at offer"),
            Cell::new(percent(analysis.current_margin)),
        ]);
    }
    table
}

pub fn run(
    weight: f64,
    unit_cost: Option<f64>,
    offer: f64,
    margin: Option<f64>,
    commissioned: bool,
) -> Result<()> {
    let settings = load_settings();
    let conn = get_connection(&get_data_dir().join("roastdesk.db"))?;
    let rates = list_shipping_rates(&conn)?;

    let profile = build_profile(weight, unit_cost, margin, commissioned, &settings);
    let analysis = analyze(&profile, &rates, offer, settings.desi_factor);

    println!("{}", analysis_table(&analysis, offer));
    if !analysis.shipping_resolved {
        println!(
            "{}",
            "Warning: no shipping band covers this desi; costs are understated."
                .yellow()
        );
    }
    Ok(())
}
