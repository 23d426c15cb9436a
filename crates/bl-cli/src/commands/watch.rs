//! Watch command: periodic refresh of the on-screen log.
//!
//! The refresh replaces the store with whatever the remote holds. There is
//! no merge, so a refresh that lands after a local change made elsewhere
//! simply shows the remote's version.

use std::future::Future;
use std::io::{self, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use bl_core::{Entry, EntryStore, Locale, project, render_text};
use bl_remote::EntryRemote;
use chrono::{Local, NaiveDate};
use tokio::time::MissedTickBehavior;

use crate::Config;
use crate::session::Session;

/// Refreshes every `period` and calls `render` after each refresh, until
/// `shutdown` resolves or `render` fails. The first refresh happens
/// immediately.
///
/// Returns the number of completed refreshes.
pub async fn run_until<R, F, G>(
    session: &mut Session<R>,
    period: Duration,
    shutdown: F,
    mut render: G,
) -> io::Result<usize>
where
    R: EntryRemote,
    F: Future<Output = ()> + Send,
    G: FnMut(&EntryStore) -> io::Result<()> + Send,
{
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    let mut ticks = 0;
    loop {
        tokio::select! {
            () = &mut shutdown => break,
            _ = ticker.tick() => {
                session.refresh().await;
                render(session.store())?;
                ticks += 1;
            }
        }
    }

    tracing::debug!(ticks, "refresh loop stopped");
    Ok(ticks)
}

/// Keeps the log on `writer` until Ctrl-C.
pub async fn run<W, R>(writer: &mut W, session: &mut Session<R>, config: &Config) -> Result<()>
where
    W: Write + Send,
    R: EntryRemote,
{
    let shutdown = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };
    let (period, locale) = (config.refresh_interval(), config.locale);
    draw_until(writer, session, period, locale, shutdown).await
}

/// Draws a frame after each refresh whenever the view changed.
///
/// Stops with an error when `writer` fails, e.g. on a closed pipe.
async fn draw_until<W, R, F>(
    writer: &mut W,
    session: &mut Session<R>,
    period: Duration,
    locale: Locale,
    shutdown: F,
) -> Result<()>
where
    W: Write + Send,
    R: EntryRemote,
    F: Future<Output = ()> + Send,
{
    let mut screen = Screen::new(locale);
    run_until(session, period, shutdown, |store| {
        let Some(frame) = screen.frame(store) else {
            return Ok(());
        };
        writer.write_all(frame.as_bytes())?;
        writer.flush()
    })
    .await
    .context("failed to write output")?;
    Ok(())
}

/// Tracks what was last drawn so unchanged refreshes print nothing.
struct Screen {
    locale: Locale,
    last: Option<(NaiveDate, Vec<Entry>)>,
}

impl Screen {
    const fn new(locale: Locale) -> Self {
        Self { locale, last: None }
    }

    /// Next frame to print, or `None` if neither the entries nor the local
    /// date changed since the previous frame.
    fn frame(&mut self, store: &EntryStore) -> Option<String> {
        let now = Local::now();
        let key = (now.date_naive(), store.snapshot().to_vec());
        if self.last.as_ref() == Some(&key) {
            return None;
        }
        self.last = Some(key);

        let groups = project(store.snapshot(), &now, self.locale);
        Some(format!(
            "── {} ──\n{}",
            now.format("%H:%M:%S"),
            render_text(&groups, self.locale)
        ))
    }
}
