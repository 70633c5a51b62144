use crate::catalog::{list_products, list_shipping_rates, resolve_unit_cost};
use crate::db::get_connection;
use crate::error::Result;
use crate::pricing::analyze;
use crate::settings::{get_data_dir, load_settings};

use super::price::{analysis_table, build_profile};

#[allow(clippy::too_many_arguments)]
pub fn run(
    customer: &str,
    product: &str,
    weight: f64,
    unit_cost: Option<f64>,
    offer: f64,
    margin: Option<f64>,
    #[cfg(feature = "pdf")] output: Option<String>,
) -> Result<()> {
    let settings = load_settings();
    let conn = get_connection(&get_data_dir().join("roastdesk.db"))?;
    let rates = list_shipping_rates(&conn)?;
    let catalog = list_products(&conn)?;

    // B2B deals carry no marketplace commission.
    let unit_cost = unit_cost
        .unwrap_or_else(|| resolve_unit_cost(&catalog, product, settings.cost_per_kg_default));
    let profile = build_profile(weight, Some(unit_cost), margin, false, &settings);
    let analysis = analyze(&profile, &rates, offer, settings.desi_factor);

    println!("Quote for {customer} — {product}");
    println!("{}", analysis_table(&analysis, offer));

    #[cfg(feature = "pdf")]
    if let Some(path) = output {
        let data = crate::pdf::QuoteData {
            customer: customer.to_string(),
            product: product.to_string(),
            weight,
            offer_price: offer,
            analysis,
        };
        crate::pdf::export_quote(&data, &settings.quote, &path)?;
        println!("Wrote {path}");
    }

    Ok(())
}
