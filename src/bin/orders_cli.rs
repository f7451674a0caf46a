use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use coffee_shop_api::{
    client::{OrdersClient, DEFAULT_BASE_URL},
    entities::{OrderChanges, OrderModel},
    menu::MenuItem,
};
use rust_decimal::Decimal;
use serde::Serialize;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = OrdersClient::new(&cli.base_url).context("failed to build HTTP client")?;

    match cli.command {
        Commands::Menu => {
            let menu = client.list_menu().await.context("failed to fetch menu")?;
            if cli.json {
                print_json(&menu)?;
            } else {
                menu.iter().for_each(render_menu_item);
            }
        }
        Commands::Order(args) => {
            let order = client
                .quick_order(&args.menu_id, &args.name, &args.address)
                .await
                .context("failed to place order")?;
            if cli.json {
                print_json(&order)?;
            } else {
                println!("Order saved successfully!");
                render_order(&order);
            }
        }
        Commands::List => {
            let orders = client.list_orders().await.context("failed to list orders")?;
            if cli.json {
                print_json(&orders)?;
            } else if orders.is_empty() {
                println!("No orders found.");
            } else {
                orders.iter().for_each(render_order);
            }
        }
        Commands::Update(args) => {
            let id = args.id.clone();
            let order = client
                .update_order(&id, args.into_changes())
                .await
                .with_context(|| format!("failed to update order {id}"))?;
            if cli.json {
                print_json(&order)?;
            } else {
                println!("Order updated successfully!");
                render_order(&order);
            }
        }
        Commands::Delete { id } => {
            let order = client
                .delete_order(&id)
                .await
                .with_context(|| format!("failed to delete order {id}"))?;
            if cli.json {
                print_json(&order)?;
            } else {
                println!("Order deleted successfully!");
                render_order(&order);
            }
        }
    }

    Ok(())
}

#[derive(Parser)]
#[command(name = "orders-cli", about = "Coffee shop orders admin", version)]
struct Cli {
    #[arg(
        long,
        global = true,
        env = "ORDERS_API_URL",
        default_value = DEFAULT_BASE_URL,
        help = "Base URL of the orders service"
    )]
    base_url: String,
    #[arg(
        long,
        global = true,
        action = ArgAction::SetTrue,
        help = "Render command output as pretty JSON"
    )]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the coffee menu
    Menu,
    /// Order one of a menu item
    Order(OrderArgs),
    /// List every order
    List,
    /// Change fields of an existing order
    Update(UpdateArgs),
    /// Delete an order
    Delete { id: String },
}

#[derive(Args)]
struct OrderArgs {
    #[arg(help = "Menu item id, e.g. latte")]
    menu_id: String,
    #[arg(long, help = "Customer name")]
    name: String,
    #[arg(long, help = "Delivery address")]
    address: String,
}

#[derive(Args)]
struct UpdateArgs {
    id: String,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    address: Option<String>,
    #[arg(long, help = "New total price, e.g. 7.50")]
    total_price: Option<Decimal>,
}

impl UpdateArgs {
    fn into_changes(self) -> OrderChanges {
        OrderChanges {
            name: self.name,
            address: self.address,
            items: None,
            total_price: self.total_price,
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn render_menu_item(item: &MenuItem) {
    println!("- {} • {} • ${}", item.id, item.title, item.price);
}

fn render_order(order: &OrderModel) {
    println!(
        "- Order {} • {} • {} • total ${} • placed {}",
        order.id,
        order.name,
        order.address,
        order.total_price,
        order.created_at.to_rfc3339()
    );
    for item in &order.items.0 {
        println!("    {} x{} @ ${}", item.name, item.quantity, item.price);
    }
}
