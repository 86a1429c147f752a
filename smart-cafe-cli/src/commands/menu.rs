//! Menu browsing commands.

use clap::{Args, Subcommand, ValueEnum};

use smart_cafe_core::{HttpOrderGateway, OrderGateway};

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args)]
pub struct MenuCommand {
    #[command(subcommand)]
    pub command: MenuSubcommand,
}

#[derive(Subcommand)]
pub enum MenuSubcommand {
    /// List the menu
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Only show items in this category
        #[arg(long)]
        category: Option<String>,
    },

    /// Show one menu item
    Show {
        /// Menu item ID
        menu_id: u32,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl MenuCommand {
    pub fn run(&self, gateway: &HttpOrderGateway) -> Result<(), Box<dyn std::error::Error>> {
        let rt = tokio::runtime::Runtime::new()?;

        match &self.command {
            MenuSubcommand::List { format, category } => {
                let mut items = rt
                    .block_on(gateway.fetch_menu())
                    .map_err(|e| format!("Could not load the menu: {}", e))?;

                if let Some(category) = category {
                    items.retain(|i| i.category.as_deref() == Some(category.as_str()));
                }

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&items)?);
                    }
                    OutputFormat::Text => {
                        if items.is_empty() {
                            println!("No menu items available.");
                        } else {
                            for item in &items {
                                println!("{}", item);
                            }
                        }
                    }
                }
            }

            MenuSubcommand::Show { menu_id, format } => {
                let item = rt
                    .block_on(gateway.fetch_menu_item(*menu_id))
                    .map_err(|e| format!("Could not load menu item {}: {}", menu_id, e))?;

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&item)?);
                    }
                    OutputFormat::Text => {
                        println!("{}", item.name);
                        println!("{}", "=".repeat(item.name.len()));
                        println!("ID:    {}", item.menu_id);
                        println!("Price: {:.2}", item.price);
                        if let Some(category) = &item.category {
                            println!("Category: {}", category);
                        }
                        if !item.image.is_empty() {
                            println!("Image: {}", item.image);
                        }
                    }
                }
            }
        }

        Ok(())
    }
}
