// Module declarations
pub mod admin;
pub mod cli_context;
pub mod client;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod filtering;
pub mod formatting;
pub mod forms;
pub mod interactive;
pub mod logging;
pub mod models;
pub mod routing;
pub mod search;
pub mod session;
pub mod view;

#[cfg(test)]
mod tests;

// Re-export commonly used items
pub use client::TalkClient;
pub use config::{load_config, save_config, Config};
pub use error::{TalkError, TalkResult};
pub use models::*;
