use std::io;

use anyhow::{Context, Result};
use bl_core::EntryKind;
use bl_remote::HttpRemote;
use chrono::Local;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use bl_cli::commands::{delete, edit, list, log, watch};
use bl_cli::{Cli, Commands, Config, Session};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support. Logs go to stderr so
    // `list --json` output stays clean.
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let Some(command) = cli.command else {
        // No subcommand, show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config = Config::load_from(cli.config.as_deref())
        .context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let remote = HttpRemote::new(&config.remote_url, config.request_timeout())
        .context("failed to set up remote")?;
    tracing::debug!(url = %remote.url(), "using remote");
    let mut session = Session::new(remote);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    runtime.block_on(dispatch(command, &mut session, &config))
}

async fn dispatch(
    command: Commands,
    session: &mut Session<HttpRemote>,
    config: &Config,
) -> Result<()> {
    let locale = config.locale;
    let now = Local::now();
    let out = &mut io::stdout();

    match command {
        Commands::List { json } => {
            list::run(out, session, &now, locale, json).await?;
        }
        Commands::Feeding {
            kind,
            amount,
            any_amount,
        } => {
            let amount = log::validate_amount(amount, any_amount)?;
            let kind = EntryKind::Feeding {
                feeding_type: kind,
                amount,
            };
            log::run(out, session, kind, &now, locale).await?;
        }
        Commands::Diaper { kind } => {
            let kind = EntryKind::Diaper { diaper_type: kind };
            log::run(out, session, kind, &now, locale).await?;
        }
        Commands::Nap => {
            log::run(out, session, EntryKind::Nap, &now, locale).await?;
        }
        Commands::Delete { id } => {
            delete::run(out, session, id).await?;
        }
        Commands::Edit { id, when } => {
            edit::run(out, session, id, &when, &now).await?;
        }
        Commands::Watch => {
            watch::run(out, session, config).await?;
        }
    }

    Ok(())
}
