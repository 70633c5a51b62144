mod catalog;
mod cli;
mod db;
mod error;
mod fmt;
mod importer;
mod labels;
mod locale;
mod models;
#[cfg(feature = "pdf")]
mod pdf;
mod pricing;
mod reports;
mod settings;

use clap::Parser;

use cli::{
    Cli, Commands, LabelsCommands, ProductsCommands, ReportCommands, SettingsCommands,
    ShippingCommands,
};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { data_dir } => cli::init::run(data_dir),
        Commands::Import {
            file,
            source,
            format,
        } => cli::import::run(&file, &source, format.as_deref()),
        Commands::Price {
            weight,
            unit_cost,
            offer,
            margin,
            commissioned,
        } => cli::price::run(weight, unit_cost, offer, margin, commissioned),
        #[cfg(feature = "pdf")]
        Commands::Quote {
            customer,
            product,
            weight,
            unit_cost,
            offer,
            margin,
            output,
        } => cli::quote::run(&customer, &product, weight, unit_cost, offer, margin, output),
        #[cfg(not(feature = "pdf"))]
        Commands::Quote {
            customer,
            product,
            weight,
            unit_cost,
            offer,
            margin,
        } => cli::quote::run(&customer, &product, weight, unit_cost, offer, margin),
        Commands::Products { command } => match command {
            ProductsCommands::List => cli::products::list(),
            ProductsCommands::Set {
                key,
                price_per_kg,
                weight,
                stock,
            } => cli::products::set(&key, price_per_kg, weight, stock),
            ProductsCommands::Search { term } => cli::products::search(&term),
        },
        Commands::Shipping { command } => match command {
            ShippingCommands::List => cli::shipping::list(),
            ShippingCommands::Add { min, max, price } => cli::shipping::add(min, max, price),
            ShippingCommands::Clear => cli::shipping::clear(),
        },
        Commands::Report { command } => match command {
            ReportCommands::Dashboard => cli::report::dashboard(),
            ReportCommands::Month { month } => cli::report::month(month),
            ReportCommands::Procurement => cli::report::procurement(),
            ReportCommands::Reorders => cli::report::reorders(),
        },
        Commands::Labels { command } => match command {
            LabelsCommands::List => cli::labels::list(),
            LabelsCommands::Add {
                name,
                keyword,
                image,
            } => cli::labels::add(&name, &keyword, &image),
            LabelsCommands::Remove { id } => cli::labels::remove(id),
            LabelsCommands::Queue => cli::labels::queue(),
            LabelsCommands::MarkPrinted { id } => cli::labels::mark_printed(&id),
        },
        Commands::Settings { command } => match command {
            SettingsCommands::Show => cli::settings::show(),
            SettingsCommands::Set { key, value } => cli::settings::set(&key, &value),
        },
        Commands::Demo => cli::demo::run(),
        Commands::Status => cli::status::run(),
        Commands::Completions { shell } => cli::completions::run(shell),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
