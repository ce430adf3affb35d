mod config;
mod server;
mod table;

pub use config::Config;
pub use server::ServerConfig;
pub use table::{TableEntry, parse_registry};
