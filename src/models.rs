use crate::error::{Result, RoastError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    pub fn from_code(code: &str) -> Result<Self> {
        match code {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(RoastError::Other(format!(
                "unknown transaction type: {other}"
            ))),
        }
    }
}

/// Where a transaction came from. `Platform` is the marketplace spreadsheet
/// export, `Storefront` the web-shop JSON order export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Platform,
    Storefront,
    B2b,
    Manual,
}

impl Source {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Platform => "platform",
            Self::Storefront => "storefront",
            Self::B2b => "b2b",
            Self::Manual => "manual",
        }
    }

    pub fn from_code(code: &str) -> Result<Self> {
        match code {
            "platform" => Ok(Self::Platform),
            "storefront" => Ok(Self::Storefront),
            "b2b" => Ok(Self::B2b),
            "manual" => Ok(Self::Manual),
            other => Err(RoastError::UnknownSource(other.to_string())),
        }
    }
}

/// A financial event. One imported order yields exactly one `Income` row
/// plus zero or more `Expense` rows (fee, shipping), all sharing `order_id`
/// and an id derived from the same source tag and ingestion timestamp.
#[derive(Debug, Clone)]
pub struct Transaction {
    pub id: String,
    pub txn_type: TransactionType,
    pub category: String,
    pub amount: f64,
    /// Kilograms; zero for non-product expense rows.
    pub weight: f64,
    /// ISO `YYYY-MM-DD`.
    pub date: String,
    pub customer: String,
    pub description: String,
    pub order_id: Option<String>,
    pub source: Source,
    /// Whether a physical label has been produced for this order.
    pub is_printed: bool,
}

/// Catalog entry mapping a product/variant name to wholesale unit economics.
/// `key` is matched by substring against transaction descriptions.
#[derive(Debug, Clone)]
pub struct ProductCost {
    pub key: String,
    pub wholesale_price_per_kg: f64,
    /// Packaged unit size in kilograms.
    pub weight: f64,
    pub stock: Option<i64>,
}

/// One tier of the weight-banded shipping table. Bounds are inclusive over
/// the computed desi and must not overlap across rows.
#[derive(Debug, Clone)]
pub struct ShippingRate {
    pub min_weight: f64,
    pub max_weight: f64,
    pub price: f64,
}

#[derive(Debug, Clone)]
pub struct LabelDesign {
    pub id: i64,
    pub name: String,
    pub image_path: String,
    pub match_keyword: String,
}
