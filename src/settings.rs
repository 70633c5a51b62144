use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RoastError};

/// Process-wide configuration. Loaded once per command, persisted on every
/// change. Only numeric coercion is applied, no further validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub data_dir: String,
    /// Marketplace commission, percent of gross price.
    #[serde(default = "default_commission_rate")]
    pub commission_rate: f64,
    /// Fixed per-order transaction fee charged by the marketplace.
    #[serde(default = "default_fixed_fee")]
    pub fixed_fee: f64,
    /// Box + label + tape per shipped package.
    #[serde(default = "default_cost_per_pack")]
    pub cost_per_pack: f64,
    /// Wholesale cost per kg when a product is missing from the catalog.
    #[serde(default = "default_cost_per_kg")]
    pub cost_per_kg_default: f64,
    #[serde(default = "default_monthly_target")]
    pub monthly_target: f64,
    #[serde(default = "default_monthly_kg_target")]
    pub monthly_kg_target: f64,
    /// Desired net margin, percent of gross price.
    #[serde(default = "default_target_margin")]
    pub target_margin: f64,
    /// Carrier volumetric factor: desi = ceil(weight * desi_factor).
    #[serde(default = "default_desi_factor")]
    pub desi_factor: f64,
    #[serde(default)]
    pub quote: QuoteSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteSettings {
    #[serde(default = "default_business_name")]
    pub business_name: String,
    #[serde(default = "default_true")]
    pub show_tax: bool,
    #[serde(default = "default_true")]
    pub show_terms: bool,
    #[serde(default = "default_true")]
    pub show_total_weight: bool,
    #[serde(default = "default_footer_note")]
    pub footer_note: String,
}

fn default_commission_rate() -> f64 {
    4.99
}
fn default_fixed_fee() -> f64 {
    0.49
}
fn default_cost_per_pack() -> f64 {
    15.0
}
fn default_cost_per_kg() -> f64 {
    450.0
}
fn default_monthly_target() -> f64 {
    100_000.0
}
fn default_monthly_kg_target() -> f64 {
    100.0
}
fn default_target_margin() -> f64 {
    25.0
}
fn default_desi_factor() -> f64 {
    crate::pricing::DEFAULT_DESI_FACTOR
}
fn default_business_name() -> String {
    "Ventus Roast Co.".to_string()
}
fn default_footer_note() -> String {
    "Fresh roast lead time is 48 hours after confirmation.".to_string()
}
fn default_true() -> bool {
    true
}

impl Default for QuoteSettings {
    fn default() -> Self {
        Self {
            business_name: default_business_name(),
            show_tax: true,
            show_terms: true,
            show_total_weight: true,
            footer_note: default_footer_note(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir().to_string_lossy().to_string(),
            commission_rate: default_commission_rate(),
            fixed_fee: default_fixed_fee(),
            cost_per_pack: default_cost_per_pack(),
            cost_per_kg_default: default_cost_per_kg(),
            monthly_target: default_monthly_target(),
            monthly_kg_target: default_monthly_kg_target(),
            target_margin: default_target_margin(),
            desi_factor: default_desi_factor(),
            quote: QuoteSettings::default(),
        }
    }
}

impl Settings {
    /// Apply a `settings set key value` edit. Numeric fields go through the
    /// same locale-tolerant parser as imports.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let num = || crate::locale::parse_locale_number(value);
        match key {
            "commission_rate" => self.commission_rate = num(),
            "fixed_fee" => self.fixed_fee = num(),
            "cost_per_pack" => self.cost_per_pack = num(),
            "cost_per_kg_default" => self.cost_per_kg_default = num(),
            "monthly_target" => self.monthly_target = num(),
            "monthly_kg_target" => self.monthly_kg_target = num(),
            "target_margin" => self.target_margin = num(),
            "desi_factor" => self.desi_factor = num(),
            "business_name" => self.quote.business_name = value.to_string(),
            "footer_note" => self.quote.footer_note = value.to_string(),
            "show_tax" => self.quote.show_tax = value == "true",
            "show_terms" => self.quote.show_terms = value == "true",
            "show_total_weight" => self.quote.show_total_weight = value == "true",
            other => {
                return Err(RoastError::Settings(format!("unknown setting: {other}")));
            }
        }
        Ok(())
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("roastdesk")
}

fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Documents")
        .join("roastdesk")
}

pub fn load_settings() -> Settings {
    let path = settings_path();
    if path.exists() {
        let content = std::fs::read_to_string(&path).unwrap_or_default();
        serde_json::from_str(&content).unwrap_or_default()
    } else {
        Settings::default()
    }
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    let dir = config_dir();
    std::fs::create_dir_all(&dir)?;
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| RoastError::Settings(e.to_string()))?;
    std::fs::write(settings_path(), format!("{json}\n"))?;
    Ok(())
}

pub fn get_data_dir() -> PathBuf {
    PathBuf::from(&load_settings().data_dir)
}

pub fn shellexpand_path(path: &str) -> String {
    if path.starts_with('~') {
        if let Some(home) = dirs::home_dir() {
            return path.replacen('~', &home.to_string_lossy(), 1);
        }
    }
    std::fs::canonicalize(path)
        .unwrap_or_else(|_| PathBuf::from(path))
        .to_string_lossy()
        .to_string()
}
