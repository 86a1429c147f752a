//! Cart management commands.
//!
//! Adding an item fetches the menu entry first so the cart line keeps
//! a snapshot of the name and price as they were at add time.

use clap::{Args, Subcommand, ValueEnum};

use smart_cafe_core::{CartItem, CartStore, FileRecordStore, HttpOrderGateway, OrderGateway};

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args)]
pub struct CartCommand {
    #[command(subcommand)]
    pub command: CartSubcommand,
}

#[derive(Subcommand)]
pub enum CartSubcommand {
    /// Add a menu item to the cart
    Add {
        /// Menu item ID
        menu_id: u32,

        /// Quantity to add
        #[arg(long, short, default_value_t = 1)]
        qty: u32,

        /// Customization note (e.g. "no sugar")
        #[arg(long, short)]
        note: Option<String>,
    },

    /// List the cart contents and totals
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Set the quantity of a cart line (0 removes it)
    Update {
        /// Menu item ID
        menu_id: u32,

        /// New quantity
        quantity: u32,
    },

    /// Remove a line from the cart
    Remove {
        /// Menu item ID
        menu_id: u32,
    },

    /// Empty the cart
    Clear,
}

impl CartCommand {
    pub fn run(
        &self,
        cart: &mut CartStore<FileRecordStore>,
        gateway: &HttpOrderGateway,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            CartSubcommand::Add { menu_id, qty, note } => {
                if *qty == 0 {
                    return Err("Quantity must be at least 1.".into());
                }

                let rt = tokio::runtime::Runtime::new()?;
                let menu_item = rt
                    .block_on(gateway.fetch_menu_item(*menu_id))
                    .map_err(|e| format!("Could not load menu item {}: {}", menu_id, e))?;

                let mut line = CartItem::from_menu_item(&menu_item, *qty);
                if let Some(note) = note {
                    line = line.with_note(note.clone());
                }
                cart.add_item(line);

                println!("Added {} x{} to the cart.", menu_item.name, qty);
                print_totals(cart);
            }

            CartSubcommand::List { format } => match format {
                OutputFormat::Json => {
                    let summary = serde_json::json!({
                        "items": cart.items(),
                        "totalItems": cart.total_items(),
                        "totalPrice": cart.total_price(),
                    });
                    println!("{}", serde_json::to_string_pretty(&summary)?);
                }
                OutputFormat::Text => {
                    if cart.is_empty() {
                        println!("Cart is empty.");
                    } else {
                        for item in cart.items() {
                            println!("{}", item);
                        }
                        print_totals(cart);
                    }
                }
            },

            CartSubcommand::Update { menu_id, quantity } => {
                if !cart.items().iter().any(|i| i.menu_id == *menu_id) {
                    println!("No cart line with menu ID {}.", menu_id);
                    return Ok(());
                }
                cart.update_quantity(*menu_id, *quantity);
                if *quantity == 0 {
                    println!("Removed line {} from the cart.", menu_id);
                } else {
                    println!("Set line {} to quantity {}.", menu_id, quantity);
                }
                print_totals(cart);
            }

            CartSubcommand::Remove { menu_id } => {
                if !cart.items().iter().any(|i| i.menu_id == *menu_id) {
                    println!("No cart line with menu ID {}.", menu_id);
                    return Ok(());
                }
                cart.remove_item(*menu_id);
                println!("Removed line {} from the cart.", menu_id);
                print_totals(cart);
            }

            CartSubcommand::Clear => {
                cart.clear();
                println!("Cart cleared.");
            }
        }

        Ok(())
    }
}

fn print_totals(cart: &CartStore<FileRecordStore>) {
    println!(
        "{} item(s), total {:.2}",
        cart.total_items(),
        cart.total_price()
    );
}
