mod catalog;
mod query;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "storefront-cli")]
#[command(about = "Browse the storefront catalog from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List products, filtered and sorted like the storefront listing
    Products {
        /// Restrict to one category, spelled as the catalog spells it
        #[arg(long)]
        category: Option<String>,

        /// Price ordering
        #[arg(long, value_parser = ["default", "asc", "desc"])]
        sort: Option<String>,

        /// Inclusive lower price bound
        #[arg(long)]
        min_price: Option<f64>,

        /// Inclusive upper price bound
        #[arg(long)]
        max_price: Option<f64>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show a single product
    Product {
        id: u64,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List catalog categories
    Categories,
    /// Normalize a listing query string without contacting the catalog
    Query {
        /// Raw query, with or without the leading `?`
        query: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = storefront_core::load_app_config_from_env()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Products {
            category,
            sort,
            min_price,
            max_price,
            json,
        } => {
            let filters = catalog::filters_from_args(
                &config.filters,
                category,
                sort.as_deref(),
                min_price,
                max_price,
            );
            catalog::run_products(&config, &filters, json).await?;
        }
        Commands::Product { id, json } => catalog::run_product(&config, id, json).await?,
        Commands::Categories => catalog::run_categories(&config).await?,
        Commands::Query { query, json } => query::run_query(&config, &query, json)?,
    }

    Ok(())
}
