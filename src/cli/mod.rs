pub mod completions;
pub mod demo;
pub mod import;
pub mod init;
pub mod labels;
pub mod price;
pub mod products;
pub mod quote;
pub mod report;
pub mod settings;
pub mod shipping;
pub mod status;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "roastdesk", about = "Back-office CLI for a coffee-roasting micro-business.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up roastdesk: choose a data directory and initialize the database.
    Init {
        /// Path for roastdesk data (default: ~/Documents/roastdesk)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Import a marketplace or storefront order export.
    Import {
        /// Path to CSV/XLSX (platform) or JSON (storefront) file
        file: String,
        /// Order source: platform, storefront
        #[arg(long, default_value = "platform")]
        source: String,
        /// Force the file format: csv, xlsx, json
        #[arg(long)]
        format: Option<String>,
    },
    /// What-if pricing: break-even, target price, charm suggestion.
    Price {
        /// Shipped weight in kg
        #[arg(long)]
        weight: f64,
        /// Wholesale cost per kg (default: settings cost_per_kg_default)
        #[arg(long = "unit-cost")]
        unit_cost: Option<f64>,
        /// Candidate offer price to evaluate
        #[arg(long, default_value_t = 0.0)]
        offer: f64,
        /// Target net margin, percent of gross (default: settings)
        #[arg(long)]
        margin: Option<f64>,
        /// Apply the marketplace commission and fixed fee
        #[arg(long)]
        commissioned: bool,
    },
    /// Build a wholesale quote for a B2B customer.
    Quote {
        /// Customer name
        #[arg(long)]
        customer: String,
        /// Product name
        #[arg(long)]
        product: String,
        /// Quoted weight in kg
        #[arg(long)]
        weight: f64,
        /// Wholesale cost per kg (default: catalog lookup, then settings)
        #[arg(long = "unit-cost")]
        unit_cost: Option<f64>,
        /// Candidate offer price
        #[arg(long, default_value_t = 0.0)]
        offer: f64,
        /// Target net margin, percent of gross (default: settings)
        #[arg(long)]
        margin: Option<f64>,
        /// Write the quote as a PDF to this path
        #[cfg(feature = "pdf")]
        #[arg(long)]
        output: Option<String>,
    },
    /// Manage the wholesale cost catalog.
    Products {
        #[command(subcommand)]
        command: ProductsCommands,
    },
    /// Manage the desi-banded shipping rate table.
    Shipping {
        #[command(subcommand)]
        command: ShippingCommands,
    },
    /// Reports over the ledger.
    Report {
        #[command(subcommand)]
        command: ReportCommands,
    },
    /// Label designs and the print queue.
    Labels {
        #[command(subcommand)]
        command: LabelsCommands,
    },
    /// Show or edit settings.
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },
    /// Load sample data to explore roastdesk.
    Demo,
    /// Show the data directory and summary statistics.
    Status,
    /// Generate shell completions.
    Completions {
        /// Shell: bash, zsh, fish, elvish, powershell
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
pub enum ProductsCommands {
    /// List catalog entries in match order.
    List,
    /// Add or update a catalog entry.
    Set {
        /// Product/variant key, e.g. 'Ethiopia Sidamo 500 gr'
        key: String,
        /// Wholesale price per kg
        #[arg(long = "price-per-kg")]
        price_per_kg: f64,
        /// Packaged unit weight in kg
        #[arg(long, default_value_t = 0.25)]
        weight: f64,
        /// Units in stock
        #[arg(long)]
        stock: Option<i64>,
    },
    /// Search the catalog (accent-insensitive).
    Search { term: String },
}

#[derive(Subcommand)]
pub enum ShippingCommands {
    /// List rate bands.
    List,
    /// Add a rate band.
    Add {
        /// Band lower bound (desi, inclusive)
        #[arg(long)]
        min: f64,
        /// Band upper bound (desi, inclusive)
        #[arg(long)]
        max: f64,
        /// Shipping price for the band
        #[arg(long)]
        price: f64,
    },
    /// Remove all rate bands.
    Clear,
}

#[derive(Subcommand)]
pub enum ReportCommands {
    /// Overall income, estimated expenses, net, and shipped weight.
    Dashboard,
    /// Current-month revenue and kg against the configured targets.
    Month {
        /// Month to report: YYYY-MM (default: current)
        #[arg(long)]
        month: Option<String>,
    },
    /// Pending bulk purchases grouped by product.
    Procurement,
    /// Predicted reorder dates for repeat customers.
    Reorders,
}

#[derive(Subcommand)]
pub enum LabelsCommands {
    /// List label designs.
    List,
    /// Add a label design.
    Add {
        name: String,
        /// Keyword matched against order descriptions
        #[arg(long)]
        keyword: String,
        /// Path to the design image
        #[arg(long, default_value = "")]
        image: String,
    },
    /// Remove a label design by id.
    Remove { id: i64 },
    /// Show the print queue with matched designs.
    Queue,
    /// Mark an order's label as printed.
    MarkPrinted {
        /// Income transaction id
        id: String,
    },
}

#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Print current settings.
    Show,
    /// Set a settings key, e.g. `settings set target_margin 30`.
    Set { key: String, value: String },
}
