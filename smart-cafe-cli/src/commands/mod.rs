pub mod cart;
pub mod config_cmd;
pub mod menu;
pub mod order;

pub use cart::CartCommand;
pub use config_cmd::ConfigCommand;
pub use menu::MenuCommand;
pub use order::OrderCommand;
