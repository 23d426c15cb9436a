//! Baby log CLI library.
//!
//! This crate provides the `bl` command: logging feedings, diaper changes and
//! naps to a shared remote collection and showing them grouped by day.

mod cli;
pub mod commands;
mod config;
pub mod session;
#[cfg(test)]
mod testing;

pub use cli::{Cli, Commands};
pub use config::Config;
pub use session::{Change, Session};
