//! Order placement, tracking, and history commands.

use clap::{Args, Subcommand, ValueEnum};
use std::io::{self, Write};

use smart_cafe_core::workflow::{place_order, push_status_update, track_order};
use smart_cafe_core::{
    CartStore, FileRecordStore, HttpOrderGateway, OrderLedger, OrderStatus,
};

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args)]
pub struct OrderCommand {
    #[command(subcommand)]
    pub command: OrderSubcommand,
}

#[derive(Subcommand)]
pub enum OrderSubcommand {
    /// Place the current cart as an order
    Place,

    /// Track an order by its ID
    Track {
        /// Order ID (e.g. SC-12345678K)
        order_id: String,
    },

    /// Show locally recorded orders, most recent first
    History {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Update an order's status (preparing, ready, completed, cancelled)
    Status {
        /// Order ID
        order_id: String,

        /// New status
        status: String,
    },

    /// Erase the local order history
    Reset {
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

impl OrderCommand {
    pub fn run(
        &self,
        cart: &mut CartStore<FileRecordStore>,
        ledger: &OrderLedger<FileRecordStore>,
        gateway: &HttpOrderGateway,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            OrderSubcommand::Place => {
                if cart.is_empty() {
                    return Err("Cart is empty. Add items before placing an order.".into());
                }

                let total_items = cart.total_items();
                let total_price = cart.total_price();

                let rt = tokio::runtime::Runtime::new()?;
                let order_id = rt.block_on(place_order(cart, ledger, gateway));

                println!("Order placed!");
                println!("Order ID: {}", order_id);
                println!("{} item(s), total {:.2}", total_items, total_price);
                println!("Track it with: cafe order track {}", order_id);
            }

            OrderSubcommand::Track { order_id } => {
                let rt = tokio::runtime::Runtime::new()?;
                match rt.block_on(track_order(ledger, gateway, order_id)) {
                    Some(order) => println!("{}", order),
                    None => println!(
                        "No order found with ID {}. Check the order number and try again.",
                        order_id
                    ),
                }
            }

            OrderSubcommand::History { format } => {
                let orders = ledger.stored_orders();
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&orders)?);
                    }
                    OutputFormat::Text => {
                        if orders.is_empty() {
                            println!("No orders yet.");
                        } else {
                            for order in &orders {
                                println!("{}\n", order);
                            }
                        }
                    }
                }
            }

            OrderSubcommand::Status { order_id, status } => {
                let status: OrderStatus = status.parse().map_err(|e: String| e)?;

                let rt = tokio::runtime::Runtime::new()?;
                rt.block_on(push_status_update(ledger, gateway, order_id, status));

                println!("Order {} marked as {}.", order_id, status);
            }

            OrderSubcommand::Reset { force } => {
                if !force && !confirm("This erases all locally recorded orders. Continue?")? {
                    println!("Aborted.");
                    return Ok(());
                }
                ledger.clear_all();
                println!("Order history cleared.");
            }
        }

        Ok(())
    }
}

fn confirm(prompt: &str) -> Result<bool, io::Error> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
