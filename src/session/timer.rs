use std::{future::Future, time::Duration};

use anyhow::Result;
use chrono::{DateTime, Local};
use tracing::debug;

use crate::{terminal::Terminal, utils::clock::Clock, utils::elapsed::ElapsedTime};

/// How often the running timer is redrawn.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(10);

/// Keeps the elapsed time since `start` on screen until `stop` resolves, and returns the moment
/// it did. A failing `stop` or a failing redraw ends the timer with that error.
pub async fn run_timer(
    clock: &dyn Clock,
    terminal: &mut dyn Terminal,
    start: DateTime<Local>,
    refresh: Duration,
    stop: impl Future<Output = Result<()>>,
) -> Result<DateTime<Local>> {
    tokio::pin!(stop);
    let mut refresh_point = clock.instant();
    loop {
        refresh_point += refresh;
        terminal.redraw(&ElapsedTime::between(&start, &clock.time()).to_string())?;

        tokio::select! {
            result = &mut stop => {
                result?;
                let end = clock.time();
                debug!("Timer stopped at {end}");
                return Ok(end);
            }
            _ = clock.sleep_until(refresh_point) => ()
        }
    }
}
