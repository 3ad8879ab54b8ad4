use std::io::{BufRead, Write};
use std::sync::Arc;

use artshelf_core::config::API_URL_ENV;
use artshelf_core::{BrandFilter, CatalogSession, Config, Error, HttpRemote};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod render;

#[derive(Parser)]
#[command(name = "artshelf")]
#[command(version, about = "Browse the art supply catalog and keep a favorites list", long_about = None)]
struct Cli {
    /// Catalog service URL (overrides the config file)
    #[arg(long, global = true, env = API_URL_ENV)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// List products with a positive price
    Products {
        /// Only show products of this brand
        #[arg(long)]
        brand: Option<String>,
    },
    /// List the brands in the catalog
    Brands,
    /// Show product details and feedback
    Show {
        /// Product id
        id: String,
    },
    /// List favorites
    Favorites,
    /// Change the favorites list
    Favorite {
        #[command(subcommand)]
        action: FavoriteAction,
    },
    /// Print the effective configuration
    Config {
        /// Write it to the config file
        #[arg(long)]
        save: bool,
    },
}

#[derive(clap::Subcommand)]
enum FavoriteAction {
    /// Mark a product as favorite
    Add { id: String },
    /// Remove one favorite
    Remove { id: String },
    /// Remove every favorite
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "artshelf=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("No command specified. Try --help");
        return Ok(());
    };

    let mut config = Config::load()?;
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }

    if let Commands::Config { save } = command {
        print!("{}", config.to_toml_string()?);
        if save {
            let path = config.save()?;
            eprintln!("Saved to {}", path.display());
        }
        return Ok(());
    }

    tracing::debug!("Using catalog service at {}", config.api.base_url);
    let remote = HttpRemote::from_config(&config.api)?;
    let mut session = CatalogSession::new(Arc::new(remote));
    session.refresh().await?;

    match command {
        Commands::Products { brand } => {
            let filter = brand.map(BrandFilter::with_brand).unwrap_or_default();
            let products = session.visible_products(&filter);
            if products.is_empty() {
                println!("No products");
            }
            for product in products {
                let marked = session.favorites().contains(&product.id);
                println!("{}", render::product_line(product, marked));
            }
        }
        Commands::Brands => {
            for brand in session.brands() {
                println!("{}", brand);
            }
        }
        Commands::Show { id } => {
            let product = session.product(&id)?;
            let aggregate = session.feedback_aggregate(&id)?;
            print!("{}", render::details(product, &aggregate));
        }
        Commands::Favorites => {
            let favorites = session.favorites().favorites();
            if favorites.is_empty() {
                println!("Empty");
            }
            for favorite in favorites.iter() {
                println!("{}", render::favorite_line(favorite));
            }
        }
        Commands::Favorite { action } => match action {
            FavoriteAction::Add { id } => match session.favorite_product(&id).await {
                Ok(()) => println!("Added {} to favorites", id),
                Err(Error::AlreadyFavorited(_)) => println!("{} is already in favorites", id),
                Err(e) => return Err(e.into()),
            },
            FavoriteAction::Remove { id } => {
                session.favorites_mut().remove(&id).await?;
                println!("Removed {} from favorites", id);
            }
            FavoriteAction::Clear { yes } => {
                if !yes && !confirm("Are you sure to remove all favorites?")? {
                    println!("Nothing removed");
                    return Ok(());
                }
                session.favorites_mut().remove_all().await?;
                println!("All favorites removed");
            }
        },
        Commands::Config { .. } => unreachable!("handled before the catalog loads"),
    }

    Ok(())
}

fn confirm(question: &str) -> anyhow::Result<bool> {
    print!("{} [y/N] ", question);
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
