//! homefront_cli - command-line agenda over a JSON entries file.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod repository;

pub use config::Config;
pub use error::{CliError, Result};
pub use repository::JsonFileRepository;
