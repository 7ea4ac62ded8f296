//! One sign display: load, render, and keep the clock current.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveTime;

use crate::clock::{format_time, ClockHandle, ClockTicker, SystemClock, TimeSource, CLOCK_INTERVAL};
use crate::error::DisplayError;
use crate::page::HtmlPage;
use crate::render::{render, RenderOptions, RenderTarget, Slot, CONFIG_ERROR_NOTICE};
use crate::source::{
    load_room_name, load_sign_config, source_from_location, ResourceSource, RoomName,
};

/// Result of one page load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Config loaded and every available slot was written.
    Rendered { room: RoomName },
    /// Config failed; the page body now holds the error notice.
    Failed,
}

impl LoadOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered { .. })
    }
}

/// Renders one sign from one resource source.
pub struct Display<S: ?Sized> {
    options: RenderOptions,
    source: Box<S>,
}

impl<S: ResourceSource + ?Sized> Display<S> {
    pub fn new(source: Box<S>, options: RenderOptions) -> Self {
        Self { options, source }
    }

    /// Fetch config and room name concurrently and render into `target`.
    pub async fn load<T: RenderTarget + ?Sized>(
        &self,
        target: &mut T,
        now: NaiveTime,
    ) -> LoadOutcome {
        let (config, room) = tokio::join!(
            load_sign_config(self.source.as_ref()),
            load_room_name(self.source.as_ref()),
        );

        match config {
            Ok(config) => {
                tracing::info!(
                    painting = %config.painting_name,
                    artist = %config.artist_name,
                    room = room.display_text(),
                    "rendering sign"
                );
                render(&config, &room, now, &self.options).apply(target);
                LoadOutcome::Rendered { room }
            }
            Err(err) => {
                tracing::error!(source = %self.source.describe(), %err, "error loading configuration");
                target.replace_body(CONFIG_ERROR_NOTICE);
                LoadOutcome::Failed
            }
        }
    }
}

/// Everything a display run needs, resolved from the command line.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Base URL or directory holding `config.json` and `room.txt`.
    pub source: String,
    /// Host page; the embedded default when `None`.
    pub page: Option<PathBuf>,
    pub out: PathBuf,
    /// Render once and exit instead of keeping the clock running.
    pub once: bool,
    pub render: RenderOptions,
    pub fetch_timeout: Duration,
}

/// Render the sign to `options.out`, then keep its clock current until
/// Ctrl-C (unless `once`).
pub async fn run(options: RunOptions) -> Result<LoadOutcome, DisplayError> {
    let source = source_from_location(&options.source, options.fetch_timeout)?;
    let mut page = match &options.page {
        Some(path) => HtmlPage::load(path).await?,
        None => HtmlPage::default_host(),
    };

    let display = Display::new(source, options.render);
    let outcome = display.load(&mut page, SystemClock.now()).await;
    page.write_to(&options.out).await?;
    tracing::info!(out = %options.out.display(), rendered = outcome.is_rendered(), "wrote sign");

    if options.once || !outcome.is_rendered() || !page.has_slot(Slot::CurrentTime) {
        return Ok(outcome);
    }

    let clock = ClockTicker::start(SystemClock, CLOCK_INTERVAL);
    let shown = format_time(SystemClock.now());
    let shutdown = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(%err, "ctrl-c handler failed");
        }
        tracing::info!("shutting down");
    };
    keep_clock_current(&mut page, &options.out, clock, shown, shutdown).await?;
    Ok(outcome)
}

/// Rewrite `out` whenever the clock shows a new time, until `stop`
/// resolves or the ticker ends. The ticker is stopped before returning.
pub async fn keep_clock_current<F>(
    page: &mut HtmlPage,
    out: &Path,
    mut clock: ClockHandle,
    mut shown: String,
    stop: F,
) -> Result<(), DisplayError>
where
    F: Future<Output = ()>,
{
    tokio::pin!(stop);
    let result: Result<(), DisplayError> = loop {
        tokio::select! {
            tick = clock.next_tick() => {
                let Some(tick) = tick else { break Ok(()) };
                if tick == shown {
                    continue;
                }
                page.set_text(Slot::CurrentTime, &tick);
                if let Err(err) = page.write_to(out).await {
                    break Err(err.into());
                }
                tracing::debug!(time = %tick, "clock updated");
                shown = tick;
            }
            () = &mut stop => break Ok(()),
        }
    };
    clock.stop().await;
    result
}
