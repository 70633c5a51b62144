use crate::error::Result;
use crate::settings::{load_settings, save_settings};

pub fn show() -> Result<()> {
    let s = load_settings();
    println!("data_dir               {}", s.data_dir);
    println!("commission_rate        {}", s.commission_rate);
    println!("fixed_fee              {}", s.fixed_fee);
    println!("cost_per_pack          {}", s.cost_per_pack);
    println!("cost_per_kg_default    {}", s.cost_per_kg_default);
    println!("monthly_target         {}", s.monthly_target);
    println!("monthly_kg_target      {}", s.monthly_kg_target);
    println!("target_margin          {}", s.target_margin);
    println!("desi_factor            {}", s.desi_factor);
    println!("business_name          {}", s.quote.business_name);
    println!("show_tax               {}", s.quote.show_tax);
    println!("show_terms             {}", s.quote.show_terms);
    println!("show_total_weight      {}", s.quote.show_total_weight);
    println!("footer_note            {}", s.quote.footer_note);
    Ok(())
}

pub fn set(key: &str, value: &str) -> Result<()> {
    let mut settings = load_settings();
    settings.set(key, value)?;
    save_settings(&settings)?;
    println!("Set {key} = {value}");
    Ok(())
}
