//! Command-line argument definitions.

use std::path::PathBuf;

use bl_core::{DiaperType, EntryId, FeedingType};
use clap::{Parser, Subcommand};

/// Baby log.
///
/// Logs feedings, diaper changes and naps to a shared remote JSON store and
/// shows them grouped by day.
#[derive(Debug, Parser)]
#[command(name = "bl", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the log grouped by day, newest first.
    List {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Log a feeding.
    Feeding {
        /// breast or bottle.
        kind: FeedingType,

        /// Amount in ml (10 to 300 in steps of 10). Omit when unknown.
        #[arg(long)]
        amount: Option<u32>,

        /// Accept any positive amount, not only the presets.
        #[arg(long)]
        any_amount: bool,
    },

    /// Log a diaper change.
    Diaper {
        /// poop or pee.
        kind: DiaperType,
    },

    /// Log the start of a nap.
    Nap,

    /// Delete an entry.
    Delete {
        /// The entry ID shown in brackets by `bl list`.
        id: EntryId,
    },

    /// Change when an entry happened.
    Edit {
        /// The entry ID shown in brackets by `bl list`.
        id: EntryId,

        /// New time: ISO 8601, local `YYYY-MM-DDTHH:MM`, or relative ("20 minutes ago").
        when: String,
    },

    /// Keep the log on screen, refreshing it periodically.
    Watch,
}
