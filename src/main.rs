use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use catalog_sync::catalog::{validate_new_product, validate_update};
use catalog_sync::{Config, Coordinator, NewProductData, Product, UpdateProductData};

#[derive(Parser)]
#[command(name = "catalog-sync", about = "Browse and edit a remote product catalog")]
struct Cli {
    /// Config file (default: ~/.config/catalog-sync/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Overrides remote.base_url from the config file.
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every product.
    List,
    /// Re-fetch the collection, ignoring anything cached.
    Refresh,
    /// Create a product.
    Add {
        #[arg(short, long)]
        description: String,
        #[arg(short, long)]
        price: f64,
        #[arg(short, long)]
        stock: u32,
        /// Repeat for several categories.
        #[arg(short, long = "category")]
        categories: Vec<String>,
    },
    /// Change some fields of a product.
    Edit {
        id: String,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        price: Option<f64>,
        #[arg(short, long)]
        stock: Option<u32>,
        /// Replaces all categories. Repeat for several.
        #[arg(short, long = "category")]
        categories: Vec<String>,
    },
    /// Delete a product.
    Remove { id: String },
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let path = cli.config.clone().unwrap_or_else(Config::config_path);
    let mut config = Config::load_from(&path)?;
    if let Some(base_url) = &cli.base_url {
        config.remote.base_url = base_url.clone();
        config.validate()?;
    }
    Ok(config)
}

/// Mutations reconcile against the held collection, so fetch it first.
async fn load_current(coordinator: &Coordinator) -> anyhow::Result<()> {
    coordinator
        .load_products()
        .await
        .context("could not load products")
}

fn print_products(products: &[Product]) {
    if products.is_empty() {
        println!("No products.");
        return;
    }
    for product in products {
        println!(
            "{:<12} {:<32} {:>10.2} {:>6}  {}",
            product.id,
            product.description,
            product.price,
            product.stock,
            product.categories.join(", ")
        );
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    catalog_sync::logging::init_tracing();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let coordinator = Coordinator::from_config(&config)?;

    match cli.command {
        Command::List => {
            coordinator
                .load_products()
                .await
                .context("could not load products")?;
            print_products(&coordinator.products());
        }
        Command::Refresh => {
            coordinator
                .refresh_products()
                .await
                .context("could not refresh products")?;
            print_products(&coordinator.products());
        }
        Command::Add {
            description,
            price,
            stock,
            categories,
        } => {
            let data = NewProductData {
                description,
                price,
                stock,
                categories,
            };
            validate_new_product(&data)?;
            load_current(&coordinator).await?;
            let product = coordinator.create_product(data).await?;
            println!("Created {}", product.id);
        }
        Command::Edit {
            id,
            description,
            price,
            stock,
            categories,
        } => {
            let data = UpdateProductData {
                description,
                price,
                stock,
                categories: (!categories.is_empty()).then_some(categories),
            };
            if data.is_empty() {
                anyhow::bail!("nothing to change for {}", id);
            }
            validate_update(&data)?;
            load_current(&coordinator).await?;
            let product = coordinator.edit_product(&id, data).await?;
            print_products(&[product]);
        }
        Command::Remove { id } => {
            load_current(&coordinator).await?;
            coordinator.remove_product(&id).await?;
            println!("Removed {}", id);
        }
    }

    Ok(())
}
