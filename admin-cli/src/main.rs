//! catalog-admin - command-line front end of the catalog admin client

mod commands;

use std::path::PathBuf;

use admin_client::ClientConfig;
use clap::{Parser, Subcommand, ValueEnum};
use shared::models::CatalogKind;

#[derive(Parser)]
#[command(name = "catalog-admin")]
#[command(about = "Administer the product catalog from the terminal")]
struct Cli {
    /// API base URL (`/api/v1` is appended)
    #[arg(long, env = "CATALOG_API_URL")]
    api_url: Option<String>,

    /// Session file holding the token and admin record
    #[arg(long, env = "CATALOG_SESSION_PATH", value_name = "FILE")]
    session: Option<PathBuf>,

    /// Print debug logs
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Log in and store the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "CATALOG_ADMIN_PASSWORD")]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the logged-in admin
    Whoami,
    /// Category, material or size lists
    Catalog {
        #[arg(value_enum)]
        kind: Kind,
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Products
    Product {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Blog posts
    Blog {
        #[command(subcommand)]
        action: BlogAction,
    },
    /// Customer queries from the contact form
    Queries {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = shared::request::DEFAULT_PAGE_LIMIT)]
        limit: u32,
    },
    /// Dashboard totals
    Counts,
    /// Admin profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Kind {
    Category,
    Material,
    Size,
}

impl From<Kind> for CatalogKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Category => CatalogKind::Category,
            Kind::Material => CatalogKind::Material,
            Kind::Size => CatalogKind::Size,
        }
    }
}

#[derive(Subcommand)]
pub enum CatalogAction {
    List {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = shared::request::DEFAULT_PAGE_LIMIT)]
        limit: u32,
        /// Only active rows
        #[arg(long)]
        active: bool,
    },
    Create {
        name: String,
    },
    Rename {
        id: String,
        name: String,
    },
    Toggle {
        id: String,
    },
    Delete {
        id: String,
    },
}

#[derive(Subcommand)]
pub enum ProductAction {
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = shared::request::DEFAULT_PAGE_LIMIT)]
        limit: u32,
    },
    Show {
        id: String,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        category: String,
        #[arg(long)]
        material: String,
        #[arg(long)]
        size: Option<String>,
        #[arg(long)]
        quantity: String,
        #[arg(long)]
        price: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Image files; non-images are skipped
        #[arg(long = "image", value_name = "FILE")]
        images: Vec<PathBuf>,
    },
    Toggle {
        id: String,
    },
    Delete {
        id: String,
    },
}

#[derive(Subcommand)]
pub enum BlogAction {
    List,
    Toggle { id: String },
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum ProfileAction {
    Show,
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long, requires = "new_password")]
        old_password: Option<String>,
        #[arg(long, requires = "old_password")]
        new_password: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "admin_client=debug,catalog_admin=debug"
    } else {
        "admin_client=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = ClientConfig::from_env();
    if let Some(url) = cli.api_url {
        config.base_url = url;
    }
    if let Some(path) = cli.session {
        config.session_path = path;
    }

    commands::run(&config, cli.command).await
}
