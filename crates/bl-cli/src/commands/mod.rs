//! CLI subcommand implementations.

pub mod delete;
pub mod edit;
pub mod list;
pub mod log;
pub mod util;
pub mod watch;
