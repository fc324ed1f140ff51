use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::context::App;

#[derive(Parser)]
#[command(name = "encore")]
#[command(about = "Encore - box-office ticketing client", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse published performances
    Events {
        #[command(subcommand)]
        action: EventsAction,
    },
    /// Inspect and edit the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Pay for the current cart
    Checkout(commands::checkout::CheckoutArgs),
    /// View or update the account profile
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },
    /// Store an auth bearer token for subsequent commands
    Login {
        #[arg(long)]
        token: String,
    },
}

#[derive(Subcommand)]
enum EventsAction {
    /// List published performances
    List,
    /// Show zones and prices for one performance
    Show { performance_id: i64 },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the current cart
    Show,
    /// Add tickets for a performance
    Add {
        #[arg(long)]
        performance: i64,
        /// Backend price type id (17 = Adult, 364 = Child / Youth)
        #[arg(long)]
        price_type: i64,
        /// Seating zone id; omit for general admission
        #[arg(long)]
        zone: Option<i64>,
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=8))]
        quantity: u32,
    },
    /// Remove one ticket unit from the cart
    Remove {
        #[arg(long)]
        line_item: i64,
        #[arg(long)]
        sub_line_item: i64,
    },
    /// Forget the current cart
    Clear,
}

#[derive(Subcommand)]
enum AccountAction {
    /// Show the signed-in patron's profile
    Show,
    /// Update the profile
    Update {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        phone: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let app = App::init().await?;

    match cli.command {
        Commands::Events { action } => match action {
            EventsAction::List => commands::events::list(&app).await?,
            EventsAction::Show { performance_id } => {
                commands::events::show(&app, performance_id).await?
            }
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&app).await?,
            CartAction::Add {
                performance,
                price_type,
                zone,
                quantity,
            } => commands::cart::add(&app, performance, price_type, zone, quantity).await?,
            CartAction::Remove {
                line_item,
                sub_line_item,
            } => commands::cart::remove(&app, line_item, sub_line_item).await?,
            CartAction::Clear => commands::cart::clear(&app).await?,
        },
        Commands::Checkout(args) => commands::checkout::run(&app, args).await?,
        Commands::Account { action } => match action {
            AccountAction::Show => commands::account::show(&app).await?,
            AccountAction::Update {
                first_name,
                last_name,
                phone,
            } => commands::account::update(&app, first_name, last_name, phone).await?,
        },
        Commands::Login { token } => commands::login::run(&app, &token).await?,
    }

    Ok(())
}
