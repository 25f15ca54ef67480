use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{submit_order, RequestEvent, StorefrontClient};
use futures::StreamExt;
use shared::{cart::Cart, domain::Customer};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod render;

use config::load_settings;

#[derive(Parser, Debug)]
struct Cli {
    #[arg(long, default_value = "storefront.toml")]
    config: PathBuf,
    /// Overrides the configured backend URL.
    #[arg(long)]
    server_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch and print the menu.
    Meals,
    /// Put meals in a cart and submit the order.
    Order {
        /// Meal id; repeat to order more than one unit.
        #[arg(long = "meal", required = true)]
        meals: Vec<String>,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        street: String,
        #[arg(long)]
        postal_code: String,
        #[arg(long)]
        city: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut settings = load_settings(&cli.config)?;
    if let Some(server_url) = cli.server_url {
        settings.server_url = server_url;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let client = StorefrontClient::new(&settings.server_url)
        .with_context(|| format!("invalid server url '{}'", settings.server_url))?;
    info!(server_url = %client.base_url(), config = %cli.config.display(), "storefront: ready");

    match cli.command {
        Command::Meals => show_meals(&client).await,
        Command::Order {
            meals,
            name,
            email,
            street,
            postal_code,
            city,
        } => {
            let customer = Customer {
                name,
                email,
                street,
                postal_code,
                city,
            };
            place_order(&client, &meals, customer).await
        }
    }
}

async fn show_meals(client: &StorefrontClient) -> Result<()> {
    let meals = client.meals();
    let mut updates = Box::pin(meals.updates());
    while let Some(state) = updates.next().await {
        println!("{}", render::meals_view(&state));
        if !state.is_loading {
            break;
        }
    }
    Ok(())
}

async fn place_order(client: &StorefrontClient, meal_ids: &[String], customer: Customer) -> Result<()> {
    let menu = client.meals();
    menu.wait_until_settled().await;
    let menu_state = menu.state();
    if let Some(error) = menu_state.error {
        bail!("failed to fetch meals: {error}");
    }

    let mut cart = Cart::new();
    for meal_id in meal_ids {
        let meal = menu_state
            .data
            .iter()
            .find(|meal| meal.id.as_str() == meal_id)
            .ok_or_else(|| anyhow!("unknown meal id '{meal_id}'"))?;
        cart.add_item(meal);
    }
    println!("{}", render::cart_view(&cart));

    let submission = client.order_submission();
    let mut events = submission.subscribe_events();
    let progress = tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            if matches!(event, RequestEvent::Started { .. }) {
                println!("Sending order data...");
            }
            if event.is_settled() {
                break;
            }
        }
    });

    if let Err(err) = submit_order(&submission, &cart, customer).await {
        progress.abort();
        return Err(err).context("order not sent");
    }
    let _ = progress.await;

    let state = submission.state();
    println!("{}", render::order_view(&state));
    if let Some(error) = state.error {
        bail!("order rejected: {error}");
    }
    Ok(())
}
