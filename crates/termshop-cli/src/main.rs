mod auth;
mod browse;
mod cart;
mod orders;
mod render;

use clap::{Parser, Subcommand};
use termshop_api::{ApiClient, TokenStore};
use termshop_engine::{CartEngine, CatalogEngine, SessionStore, ToastQueue};
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "termshop")]
#[command(about = "Retro terminal storefront client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse the catalog interactively (search, tags, pages)
    Browse,
    /// Show one product in full
    Product {
        /// Product id
        id: i64,
    },
    /// Cart and checkout operations
    Cart {
        #[command(subcommand)]
        command: cart::CartCommands,
    },
    /// List your placed orders
    Orders,
    /// Log in and store the session token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account and log in
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Clear the stored session
    Logout,
    /// Show the active session
    Whoami,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = termshop_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let tokens = TokenStore::new(&config.token_path);
    let api = ApiClient::new(&config, tokens.clone())?;
    let toasts = ToastQueue::new();
    let session = SessionStore::new(api.clone(), tokens);
    let catalog = CatalogEngine::new(api.clone(), toasts.clone());
    let cart = CartEngine::new(api.clone(), toasts.clone());

    // A stored token makes every command start from a validated session.
    session.restore().await;

    match cli.command {
        Commands::Browse => {
            let stdin = BufReader::new(tokio::io::stdin());
            browse::run_browse(&catalog, &cart, &session, &toasts, &api, stdin).await?;
        }
        Commands::Product { id } => browse::run_product(&api, id).await?,
        Commands::Cart { command } => cart::run_cart(&cart, &session, &toasts, command).await?,
        Commands::Orders => orders::run_orders(&api, &session).await?,
        Commands::Login { email, password } => auth::run_login(&session, &email, &password).await?,
        Commands::Signup {
            name,
            email,
            password,
        } => auth::run_signup(&session, &name, &email, &password).await?,
        Commands::Logout => auth::run_logout(&session),
        Commands::Whoami => auth::run_whoami(&session),
    }

    Ok(())
}
