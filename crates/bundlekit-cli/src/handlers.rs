//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

mod completions;
mod config;
mod schema;
mod utils;
mod validate;

pub use completions::handle_completions;
pub use config::handle_config;
pub use schema::handle_schema;
pub use validate::handle_validate;
