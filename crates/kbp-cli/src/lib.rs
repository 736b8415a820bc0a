//! # kbp-cli
//!
//! The `kbp` command-line tool: argument parsing, the optional YAML config
//! file, and the command runner that drives a [`kbp_client::KeyboardClient`].

pub mod app;
pub mod args;
pub mod config;
mod error;

pub use app::{run, unescape_newlines};
pub use args::{Cli, Command, OledState};
pub use config::KbpConfig;
pub use error::CliError;
